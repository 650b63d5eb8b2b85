//! Key mapping and action dispatch system for treeseek
//!
//! Maps keys to actions, parsed from the `[keys]` table of the config, and
//! defines the enum variants for all navigation, search and system actions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Represents any action in the app: navigation, search, or system.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Action {
    Nav(NavAction),
    Search(SearchAction),
    System(SystemAction),
}

/// Navigation actions of the tree pane
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum NavAction {
    GoUp,
    GoDown,
    GoParent,
    GoIntoDir,
    RootReset,
    GoHome,
    GoToPath,
    Open,
}

/// Search actions (start, cancel, step through results)
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum SearchAction {
    Find,
    Cancel,
    NextResult,
    PrevResult,
}

/// System actions (quit)
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum SystemAction {
    Quit,
}

/// Key + modifiers as used in keybind/keymap
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub(crate) struct Key {
    pub(crate) code: KeyCode,
    pub(crate) modifiers: KeyModifiers,
}

/// Stores the mapping from Key to action, which is built in the config
pub(crate) struct Keymap {
    map: HashMap<Key, Action>,
}

impl Keymap {
    /// Builds the keymap from the config
    #[rustfmt::skip]
    pub(crate) fn from_config(config: &crate::config::Config) -> Self {
        let mut map = HashMap::new();
        let keys = config.keys();

        macro_rules! bind {
            ($keys:expr, $action:expr) => {
                bind($keys, $action, &mut map);
            };
        }

        use NavAction as N;
        use SearchAction as F;
        use SystemAction as S;

        // NavActions
        bind!(keys.go_up(),         Action::Nav(N::GoUp));
        bind!(keys.go_down(),       Action::Nav(N::GoDown));
        bind!(keys.go_parent(),     Action::Nav(N::GoParent));
        bind!(keys.go_into_dir(),   Action::Nav(N::GoIntoDir));
        bind!(keys.root_reset(),    Action::Nav(N::RootReset));
        bind!(keys.go_home(),       Action::Nav(N::GoHome));
        bind!(keys.go_to_path(),    Action::Nav(N::GoToPath));
        bind!(keys.open_file(),     Action::Nav(N::Open));

        // SearchActions
        bind!(keys.find(),          Action::Search(F::Find));
        bind!(keys.cancel_find(),   Action::Search(F::Cancel));
        bind!(keys.next_result(),   Action::Search(F::NextResult));
        bind!(keys.prev_result(),   Action::Search(F::PrevResult));

        // SystemActions
        bind!(keys.quit(),          Action::System(S::Quit));

        Keymap { map }
    }

    /// Looks up the action for a given key event
    ///
    /// Terminals disagree on whether shifted characters carry the SHIFT
    /// modifier, so both spellings are tried.
    pub(crate) fn lookup(&self, key: KeyEvent) -> Option<Action> {
        let k = Key {
            code: key.code,
            modifiers: key.modifiers,
        };

        if let Some(action) = self.map.get(&k).copied() {
            return Some(action);
        }

        let KeyCode::Char(c) = key.code else {
            return None;
        };

        if key.modifiers.contains(KeyModifiers::SHIFT) {
            let k2 = Key {
                code: key.code,
                modifiers: key.modifiers - KeyModifiers::SHIFT,
            };
            return self.map.get(&k2).copied();
        }

        if c.is_uppercase() {
            let k2 = Key {
                code: key.code,
                modifiers: key.modifiers | KeyModifiers::SHIFT,
            };
            return self.map.get(&k2).copied();
        }
        None
    }
}

fn parse_key(s: &str) -> Option<Key> {
    let mut modifiers = KeyModifiers::NONE;
    let mut code: Option<KeyCode> = None;

    let is_bracketed = s.starts_with('<') && s.ends_with('>');
    let mut input = s.trim_start_matches('<').trim_end_matches('>').to_string();

    if is_bracketed && input.contains('-') {
        let parts: Vec<&str> = input.split('-').collect();

        for &prefix in parts.iter().take(parts.len().saturating_sub(1)) {
            match prefix.to_lowercase().as_str() {
                "c" | "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "a" | "m" | "alt" => modifiers |= KeyModifiers::ALT,
                "s" | "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }
        input = parts.last()?.to_string();
    }

    // A lone "+" or "-" is a key of its own, not a separator.
    if input.chars().count() == 1 {
        let c = input.chars().next()?;
        return Some(Key {
            code: KeyCode::Char(c),
            modifiers,
        });
    }

    let normalized = input.replace('-', "+");
    for part in normalized.split('+') {
        let p_low = part.to_lowercase();
        match p_low.as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "alt" | "meta" => modifiers |= KeyModifiers::ALT,
            "shift" => modifiers |= KeyModifiers::SHIFT,

            "up" => code = Some(KeyCode::Up),
            "down" => code = Some(KeyCode::Down),
            "left" => code = Some(KeyCode::Left),
            "right" => code = Some(KeyCode::Right),
            "enter" => code = Some(KeyCode::Enter),
            "esc" => code = Some(KeyCode::Esc),
            "backspace" | "back" => code = Some(KeyCode::Backspace),
            "tab" => code = Some(KeyCode::Tab),
            "home" => code = Some(KeyCode::Home),
            "end" => code = Some(KeyCode::End),
            "space" | "spc" => code = Some(KeyCode::Char(' ')),

            _ => {
                if part.chars().count() == 1 {
                    let mut c = part.chars().next()?;
                    if modifiers.contains(KeyModifiers::SHIFT) {
                        c = c.to_ascii_uppercase();
                    }
                    code = Some(KeyCode::Char(c));
                } else if p_low.starts_with('f')
                    && p_low.len() > 1
                    && p_low[1..].chars().all(|c| c.is_ascii_digit())
                {
                    let n = p_low[1..].parse().ok()?;
                    code = Some(KeyCode::F(n));
                } else if part.is_empty() {
                    continue;
                } else {
                    return None;
                }
            }
        }
    }

    Some(Key {
        code: code?,
        modifiers,
    })
}

fn bind(key_list: &[String], action: Action, map: &mut HashMap<Key, Action>) {
    for k in key_list {
        match parse_key(k) {
            Some(key) => {
                map.insert(key, action);
            }
            None => log::warn!("ignoring unknown key binding {:?}", k),
        }
    }
}
