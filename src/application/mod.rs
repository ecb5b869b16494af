//! Application layer: the select component used by hosts
//!
//! This layer orchestrates domain logic; it performs no I/O.

pub mod component;
pub mod error;

pub use component::{MultiLevelSelect, SelectionListener};
pub use error::{ApplicationError, ApplicationResult};
