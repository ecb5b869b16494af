//! mlselect: hierarchical multi-select engine
//!
//! Options form a tree addressed by dotted path identifiers (`1.2.3`).
//! Toggling an option produces a new selection in which at most one entry
//! exists per top-level branch and an ancestor selection supersedes its
//! descendants.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
