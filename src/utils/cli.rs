//! Command-line argument parsing and help for treeseek.
//!
//! When invoked with no args (tsk), treeseek simply launches the TUI.

use crate::config::Config;

#[derive(Debug, PartialEq, Eq)]
pub enum CliAction {
    RunApp,
    RunAppAtPath(String),
    Find {
        pattern: String,
        path: Option<String>,
    },
    Exit,
}

pub fn handle_args() -> CliAction {
    let args: Vec<String> = std::env::args().skip(1).collect();
    parse_args(&args)
}

/// Parses the arguments after the program name.
pub fn parse_args(args: &[String]) -> CliAction {
    let Some(first) = args.first() else {
        return CliAction::RunApp;
    };

    if first == "--find" || first == "-f" {
        return match args {
            [_, pattern] => CliAction::Find {
                pattern: pattern.clone(),
                path: None,
            },
            [_, pattern, path] => CliAction::Find {
                pattern: pattern.clone(),
                path: Some(path.clone()),
            },
            _ => {
                eprintln!("Usage: tsk --find PATTERN [PATH]");
                CliAction::Exit
            }
        };
    }

    if args.len() > 1 {
        eprintln!("Error: treeseek accepts only one argument at a time.");
        eprintln!("Usage: tsk [PATH] or tsk [OPTION]");
        return CliAction::Exit;
    }

    match first.as_str() {
        "--version" | "-v" => {
            print_version();
            CliAction::Exit
        }
        "-h" | "--help" => {
            print_help();
            CliAction::Exit
        }
        "--init" => {
            let config_path = Config::default_path();
            match Config::generate_default(&config_path) {
                Ok(()) => println!("Default config generated at {:?}", config_path),
                Err(e) => eprintln!("Error: {}", e),
            }
            CliAction::Exit
        }
        arg if !arg.starts_with('-') && !arg.trim().is_empty() => {
            CliAction::RunAppAtPath(arg.to_string())
        }
        arg => {
            eprintln!("Unknown argument: {}", arg);
            eprintln!("Try --help for available options");
            CliAction::Exit
        }
    }
}

fn print_version() {
    println!("treeseek {}", env!("CARGO_PKG_VERSION"));
}

fn print_help() {
    println!(
        r#"treeseek - a terminal file browser with a background filename search

USAGE:
  tsk [PATH]
  tsk --find PATTERN [PATH]

PATH:
  Directory to open or search (defaults to the current directory)

OPTIONS:
  -f, --find PATTERN      Print every file below PATH whose name contains PATTERN
                          (case-insensitive) as soon as it is found
      --init              Generate the default configuration
  -h, --help              Print help information
  -v, --version           Display the current installed version of treeseek

KEYS (defaults):
  j/k, Up/Down            Move selection
  l, Right                Make the selected directory the root
  h, Left, Backspace      Move the root one directory up
  r                       Reset the root to the filesystem root
  ~                       Go to the home directory
  p                       Type a path and jump to it
  Enter, o                Open the selection with the default application
  s, /                    Search file names below the current root
  Ctrl+c                  Cancel the running search
  n / N                   Next / previous search result
  q, Esc                  Quit

ENVIRONMENT:
  TREESEEK_CONFIG         Override the default config path
"#
    );
}
