//! Key handlers of [AppState]: prompts, navigation, search and system actions.

use crate::app::actions::{ActionMode, InputMode};
use crate::app::keymap::{NavAction, SearchAction, SystemAction};
use crate::app::state::{AppState, KeypressResult};
use crate::utils::get_home;

use crossterm::event::KeyCode::*;
use crossterm::event::KeyEvent;

/// AppState input and action handlers
impl<'a> AppState<'a> {
    /// Handles key events while a prompt is open.
    ///
    /// Enter submits the prompt, Esc closes it, everything else edits the text.
    pub(super) fn handle_input_mode(&mut self, key: KeyEvent) -> KeypressResult {
        let Some(mode) = self.actions.input_mode() else {
            return KeypressResult::Continue;
        };

        match key.code {
            Enter => {
                let text = self.actions.take_input();
                match mode {
                    InputMode::Find => {
                        self.start_search(text.trim().to_string());
                    }
                    InputMode::GoToPath => {
                        self.nav.set_path_field(text);
                        self.nav.root_jump();
                    }
                }
            }
            Esc => self.actions.exit_mode(),
            Left => self.actions.action_move_cursor_left(),
            Right => self.actions.action_move_cursor_right(),
            Home => self.actions.action_cursor_home(),
            End => self.actions.action_cursor_end(),
            Backspace => self.actions.action_backspace_at_cursor(),
            Delete => self.actions.action_delete_at_cursor(),
            Char(c) => self.actions.action_insert_at_cursor(c),
            _ => {}
        }
        KeypressResult::Consumed
    }

    /// Handles navigation actions (up, down, into dir, etc).
    pub(super) fn handle_nav_action(&mut self, action: NavAction) -> KeypressResult {
        match action {
            NavAction::GoUp => {
                self.nav.move_up();
            }
            NavAction::GoDown => {
                self.nav.move_down();
            }
            NavAction::GoParent => {
                self.nav.root_up();
            }
            NavAction::GoIntoDir => {
                self.nav.root_into_selected();
            }
            NavAction::RootReset => self.nav.root_reset(),
            NavAction::GoHome => {
                self.nav.root_home(get_home());
            }
            NavAction::GoToPath => self.prompt_go_to_path(),
            NavAction::Open => return self.handle_open(),
        }
        KeypressResult::Consumed
    }

    pub(super) fn handle_search_action(&mut self, action: SearchAction) -> KeypressResult {
        match action {
            SearchAction::Find => self.prompt_find(),
            SearchAction::Cancel => self.cancel_search(),
            SearchAction::NextResult => {
                if let Some(path) = self.find.select_next().map(|p| p.to_path_buf()) {
                    self.nav.reveal(&path);
                }
            }
            SearchAction::PrevResult => {
                if let Some(path) = self.find.select_prev().map(|p| p.to_path_buf()) {
                    self.nav.reveal(&path);
                }
            }
        }
        KeypressResult::Consumed
    }

    pub(super) fn handle_sys_action(&mut self, action: SystemAction) -> KeypressResult {
        match action {
            SystemAction::Quit => KeypressResult::Quit,
        }
    }

    // Helpers

    fn handle_open(&mut self) -> KeypressResult {
        match self.nav.open_selected(self.opener.as_ref()) {
            Ok(_) => KeypressResult::Opened,
            Err(e) => {
                log::warn!("open failed: {}", e);
                KeypressResult::Consumed
            }
        }
    }

    fn prompt_find(&mut self) {
        let last = self.find.query().to_string();
        self.actions.enter_mode(
            ActionMode::Input {
                mode: InputMode::Find,
                prompt: "Find: ".into(),
            },
            last,
        );
    }

    fn prompt_go_to_path(&mut self) {
        let current = self.nav.path_field().to_string();
        self.actions.enter_mode(
            ActionMode::Input {
                mode: InputMode::GoToPath,
                prompt: "Go to: ".into(),
            },
            current,
        );
    }
}
