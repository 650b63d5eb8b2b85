//! main.rs
//! Entry point for treeseek

pub(crate) mod app;
pub(crate) mod config;
pub(crate) mod core;
pub(crate) mod ui;
pub(crate) mod utils;

use crate::config::Config;
use crate::core::{SearchCoordinator, SearchEvent, terminal};
use crate::utils::cli::{CliAction, handle_args};
use crate::utils::{init_logging, resolve_initial_dir};

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

fn main() -> io::Result<()> {
    std::panic::set_hook(Box::new(|info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = crossterm::execute!(
            stdout,
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show
        );

        log::error!("panic: {}", info);
        eprintln!("\n[treeseek] Error occurred: {}", info);

        #[cfg(debug_assertions)]
        {
            let bt = std::backtrace::Backtrace::force_capture();
            eprintln!("\nStack Backtrace:\n{}", bt);
        }
    }));

    let action = handle_args();

    if let CliAction::Exit = action {
        return Ok(());
    }

    let config = Config::load();
    if let Err(e) = init_logging(config.general()) {
        eprintln!("[treeseek] Warning: logging disabled: {}", e);
    }

    match action {
        CliAction::Find { pattern, path } => {
            let root = match path {
                Some(arg) => resolve_initial_dir(&arg),
                None => std::env::current_dir()?,
            };
            run_find(&pattern, root)
        }
        CliAction::RunAppAtPath(path_arg) => {
            let target = resolve_initial_dir(&path_arg);
            if !target.is_dir() {
                eprintln!("\n[treeseek] Error: Path '{}' cannot be opened.", path_arg);
                std::process::exit(1);
            }
            let mut app = app::AppState::from_dir(&config, &target)?;
            terminal::run_terminal(&mut app)
        }
        CliAction::RunApp => {
            let mut app = app::AppState::new(&config)?;
            terminal::run_terminal(&mut app)
        }
        CliAction::Exit => Ok(()),
    }
}

/// Headless search: prints every match as soon as it arrives, then a summary on stderr.
fn run_find(pattern: &str, root: PathBuf) -> io::Result<()> {
    let mut search = SearchCoordinator::default();
    if let Err(e) = search.start_search(&root, pattern) {
        eprintln!("[treeseek] Error: {}", e);
        std::process::exit(1);
    }

    let mut out = io::stdout().lock();
    loop {
        let written = match search.next_event_timeout(Duration::from_millis(250)) {
            Some(SearchEvent::Match { path, .. }) => writeln!(out, "{}", path.display()),
            Some(SearchEvent::Complete { outcome, stats, .. }) => {
                out.flush()?;
                eprintln!(
                    "[treeseek] {:?}: {} matches, {} files and {} directories scanned, {} unreadable",
                    outcome, stats.matches, stats.files_seen, stats.dirs_seen, stats.unreadable
                );
                return Ok(());
            }
            // Keep output flowing while a slow walk is still going.
            None => out.flush(),
        };

        if let Err(e) = written {
            if e.kind() == io::ErrorKind::BrokenPipe {
                search.cancel_active();
                return Ok(());
            }
            return Err(e);
        }
    }
}
