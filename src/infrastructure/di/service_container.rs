//! Service container for dependency injection
//!
//! Wires settings and I/O implementations into the services the CLI uses.

use std::sync::Arc;

use crate::application::MultiLevelSelect;
use crate::config::Settings;
use crate::domain::OptionTree;
use crate::infrastructure::loader::OptionLoader;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        let settings = Arc::new(settings);

        Self { settings, fs }
    }

    pub fn option_loader(&self) -> OptionLoader {
        OptionLoader::new(Arc::clone(&self.fs))
    }

    /// Select component configured from settings.
    pub fn select_component(&self, tree: OptionTree) -> MultiLevelSelect {
        MultiLevelSelect::new(tree)
            .with_placeholder(self.settings.placeholder.clone())
            .with_chip_separator(self.settings.chip_separator.clone())
    }
}
