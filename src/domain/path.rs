//! Path identifiers: hierarchical addresses of option tree nodes.
//!
//! A `PathId` is a non-empty sequence of per-level segments. The identifier of
//! an ancestor is always a prefix of the identifiers of its descendants, so the
//! ancestor at depth `d` is recovered with `prefix_at(d)`.
//!
//! Text form joins segments with `.`: `"fruit.citrus.lemon"`, `"1.2"`.

use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::domain::error::{DomainError, DomainResult};

/// Separator between segments in the text form.
pub const SEPARATOR: char = '.';

fn is_segment_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

/// One level of a path identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Segment(String);

impl Segment {
    /// Create a segment from a code made of alphanumerics, `_` and `-`.
    pub fn new(code: impl Into<String>) -> DomainResult<Self> {
        let code = code.into();
        if code.is_empty() {
            return Err(DomainError::invalid(code, "empty segment"));
        }
        if let Some(bad) = code.chars().find(|c| !is_segment_char(*c)) {
            let reason = format!("invalid character '{}' in segment", bad);
            return Err(DomainError::invalid(code, reason));
        }
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hierarchical identifier of a node in the option tree.
///
/// Always holds at least one segment; a single segment addresses a top-level
/// option (depth 0).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PathId(Vec<Segment>);

impl PathId {
    /// Identifier of a top-level option.
    pub fn root(segment: Segment) -> Self {
        Self(vec![segment])
    }

    /// Identifier of a direct child of `self`.
    pub fn child(&self, segment: Segment) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment);
        Self(segments)
    }

    /// Parse the dotted text form.
    pub fn parse(text: &str) -> DomainResult<Self> {
        if text.is_empty() {
            return Err(DomainError::invalid(text, "identifier is empty"));
        }
        let segments = text
            .split(SEPARATOR)
            .map(|code| {
                Segment::new(code).map_err(|_| {
                    DomainError::invalid(text, format!("malformed segment '{}'", code))
                })
            })
            .collect::<DomainResult<Vec<_>>>()?;
        Ok(Self(segments))
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false: a `PathId` cannot be constructed without a segment.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Depth of the addressed node, 0 for top-level options.
    pub fn depth(&self) -> usize {
        self.0.len() - 1
    }

    /// Last segment, the node's own code within its siblings.
    pub fn last(&self) -> &Segment {
        &self.0[self.0.len() - 1]
    }

    /// Identifier of the ancestor at `depth` (the first `depth + 1` segments).
    ///
    /// `None` when `depth` is beyond this identifier.
    pub fn prefix_at(&self, depth: usize) -> Option<PathId> {
        if depth >= self.0.len() {
            return None;
        }
        Some(Self(self.0[..=depth].to_vec()))
    }

    /// Top-level branch this identifier belongs to.
    pub fn branch(&self) -> PathId {
        Self(vec![self.0[0].clone()])
    }

    pub fn parent(&self) -> Option<PathId> {
        if self.0.len() < 2 {
            return None;
        }
        Some(Self(self.0[..self.0.len() - 1].to_vec()))
    }

    /// True if `prefix` is equal to or an ancestor of `self`.
    pub fn starts_with(&self, prefix: &PathId) -> bool {
        self.0.starts_with(&prefix.0)
    }

    /// True if `self` is a proper ancestor of `other`.
    pub fn is_ancestor_of(&self, other: &PathId) -> bool {
        other.0.len() > self.0.len() && other.starts_with(self)
    }

    /// True if `self` is the direct parent of `other`.
    pub fn is_parent_of(&self, other: &PathId) -> bool {
        other.0.len() == self.0.len() + 1 && other.starts_with(self)
    }
}

impl fmt::Display for PathId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().join(&SEPARATOR.to_string()))
    }
}

impl FromStr for PathId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PathId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for PathId {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<PathId> for String {
    fn from(id: PathId) -> Self {
        id.to_string()
    }
}
