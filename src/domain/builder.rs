//! Option tree builder: assigns path identifiers to host-supplied options.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::entities::OptionNode;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::path::{PathId, Segment};
use crate::domain::tree::OptionTree;

/// Option as supplied by the host, before identifiers are assigned.
///
/// `key` becomes the node's segment; without it the segment is derived from
/// the label, so identifiers stay stable when options are reordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nested: Option<Vec<OptionSpec>>,
}

impl OptionSpec {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            key: None,
            label: label.into(),
            nested: None,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_nested(mut self, nested: Vec<OptionSpec>) -> Self {
        self.nested = Some(nested);
        self
    }
}

/// Derive a segment code from a label: lowercased alphanumerics (any script),
/// every other run of characters collapsed into a single `-`.
pub fn slugify(label: &str) -> String {
    let mut slug = String::with_capacity(label.len());
    let mut pending_dash = false;
    for c in label.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase().filter(|l| l.is_alphanumeric()));
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Builds an `OptionTree` from `OptionSpec`s.
#[derive(Debug, Default)]
pub struct OptionTreeBuilder {
    assigned: usize,
}

impl OptionTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[instrument(level = "debug", skip(self, specs))]
    pub fn build(&mut self, specs: &[OptionSpec]) -> DomainResult<OptionTree> {
        self.assigned = 0;
        let nodes = self.build_level(specs, None)?;
        debug!("build: assigned {} identifiers", self.assigned);
        OptionTree::from_nodes(nodes)
    }

    fn build_level(
        &mut self,
        specs: &[OptionSpec],
        parent: Option<&PathId>,
    ) -> DomainResult<Vec<OptionNode>> {
        let mut seen = HashSet::new();
        let mut nodes = Vec::with_capacity(specs.len());

        for spec in specs {
            let code = match &spec.key {
                Some(key) => key.clone(),
                None => slugify(&spec.label),
            };
            if code.is_empty() {
                return Err(DomainError::invalid(
                    &spec.label,
                    "label yields an empty identifier segment; provide a key",
                ));
            }
            let segment = Segment::new(code)?;
            let id = match parent {
                Some(parent) => parent.child(segment),
                None => PathId::root(segment),
            };
            if !seen.insert(id.clone()) {
                return Err(DomainError::invalid(
                    id.to_string(),
                    format!("duplicate identifier for option '{}'", spec.label),
                ));
            }
            self.assigned += 1;

            let nested = match &spec.nested {
                Some(children) => Some(self.build_level(children, Some(&id))?),
                None => None,
            };
            nodes.push(OptionNode {
                id,
                label: spec.label.clone(),
                nested,
            });
        }
        Ok(nodes)
    }
}
