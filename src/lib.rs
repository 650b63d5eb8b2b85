//! Internal library crate for treeseek.
//!
//! The shipped application is the `tsk` binary (`src/main.rs`).
//!
//! This library exposes the search engine in [core] (matcher, scanner, session and
//! coordinator) to the integration tests and keeps the modules organized. It is
//! not considered a library for external use.

pub mod app;
pub mod config;
pub mod core;
pub mod ui;
pub mod utils;
