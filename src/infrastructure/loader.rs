//! Option file loading
//!
//! Reads option specs from `.toml` or `.json` files and builds the identified
//! option tree.
//!
//! TOML:
//! ```toml
//! [[options]]
//! label = "Fruit"
//! nested = [{ label = "Apple" }, { key = "p", label = "Pear" }]
//! ```
//!
//! JSON: either a bare array of options or `{"options": [...]}`.

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::domain::{OptionSpec, OptionTree, OptionTreeBuilder};
use crate::infrastructure::error::{InfraError, InfraResult};
use crate::infrastructure::traits::FileSystem;

#[derive(Debug, Deserialize)]
struct OptionFile {
    options: Vec<OptionSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonOptions {
    List(Vec<OptionSpec>),
    File(OptionFile),
}

/// Supported option file formats, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionFormat {
    Toml,
    Json,
}

impl OptionFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Parse option specs from file content.
pub fn parse_specs(content: &str, format: OptionFormat, path: &Path) -> InfraResult<Vec<OptionSpec>> {
    match format {
        OptionFormat::Toml => toml::from_str::<OptionFile>(content)
            .map(|f| f.options)
            .map_err(|e| InfraError::parse(path, e)),
        OptionFormat::Json => match serde_json::from_str::<JsonOptions>(content) {
            Ok(JsonOptions::List(specs)) => Ok(specs),
            Ok(JsonOptions::File(file)) => Ok(file.options),
            Err(e) => Err(InfraError::parse(path, e)),
        },
    }
}

/// Loads option trees from files.
pub struct OptionLoader {
    fs: Arc<dyn FileSystem>,
}

impl OptionLoader {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> InfraResult<OptionTree> {
        let format = OptionFormat::from_path(path)
            .ok_or_else(|| InfraError::parse(path, "unsupported extension, expected .toml or .json"))?;
        if !self.fs.is_file(path) {
            return Err(InfraError::io(
                format!("option file not found: {}", path.display()),
                std::io::Error::new(std::io::ErrorKind::NotFound, "file does not exist"),
            ));
        }
        let content = self
            .fs
            .read_to_string(path)
            .map_err(|e| InfraError::io(format!("read option file {}", path.display()), e))?;

        let specs = parse_specs(&content, format, path)?;
        let tree = OptionTreeBuilder::new().build(&specs)?;
        debug!("load: {} options, depth {}", tree.len(), tree.depth());
        Ok(tree)
    }
}
