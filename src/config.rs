//! Configuration module for treeseek.
//!
//! Settings are read from `treeseek.toml`:
//! - [general]: listing options, start directory and logging.
//! - [search]: limits for the filename search.
//! - [input]: key bindings.
//! - [load]: locating, parsing and generating the config file.

pub mod general;
pub mod input;
pub mod load;

pub use general::{General, InternalGeneral, InternalSearch, Search};
pub use input::Keys;
pub use load::Config;
