//! Domain layer: option trees, path identifiers and the selection engine
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod builder;
pub mod entities;
pub mod error;
pub mod navigation;
pub mod path;
pub mod selection;
pub mod tree;

pub use builder::{slugify, OptionSpec, OptionTreeBuilder};
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use navigation::NavigationStack;
pub use path::{PathId, Segment};
pub use selection::{chips, remove_filter, selection_state, toggle};
pub use tree::{find_node, OptionTree, TreeIterator};
