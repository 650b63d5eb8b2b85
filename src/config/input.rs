//! Key binding options for treeseek
//!
//! Read from the `[keys]` table of treeseek.toml.

use serde::Deserialize;

/// Input configuration options of all actions
#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Keys {
    open_file: Vec<String>,
    go_up: Vec<String>,
    go_down: Vec<String>,
    go_parent: Vec<String>,
    go_into_dir: Vec<String>,
    root_reset: Vec<String>,
    go_home: Vec<String>,
    go_to_path: Vec<String>,
    find: Vec<String>,
    cancel_find: Vec<String>,
    next_result: Vec<String>,
    prev_result: Vec<String>,
    quit: Vec<String>,
}

macro_rules! accessor {
    ($($name:ident),+ $(,)?) => {
        impl Keys {
            $(
                #[inline]
                pub fn $name(&self) -> &[String] {
                    &self.$name
                }
            )+
        }
    };
}

accessor!(
    open_file,
    go_up,
    go_down,
    go_parent,
    go_into_dir,
    root_reset,
    go_home,
    go_to_path,
    find,
    cancel_find,
    next_result,
    prev_result,
    quit,
);

impl Default for Keys {
    fn default() -> Self {
        Keys {
            open_file: vec!["Enter".into(), "o".into()],
            go_up: vec!["k".into(), "Up".into()],
            go_down: vec!["j".into(), "Down".into()],
            go_parent: vec!["h".into(), "Left".into(), "Backspace".into()],
            go_into_dir: vec!["l".into(), "Right".into()],

            root_reset: vec!["r".into()],
            go_home: vec!["~".into()],
            go_to_path: vec!["p".into()],

            find: vec!["s".into(), "/".into()],
            cancel_find: vec!["Ctrl+c".into()],
            next_result: vec!["n".into()],
            prev_result: vec!["Shift+n".into()],

            quit: vec!["q".into(), "Esc".into()],
        }
    }
}
