//! Domain entities: option nodes and selection entries

use serde::{Deserialize, Serialize};

use crate::domain::path::PathId;

/// A node of the option tree.
///
/// `nested` being `None` marks a leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionNode {
    pub id: PathId,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nested: Option<Vec<OptionNode>>,
}

impl OptionNode {
    pub fn leaf(id: PathId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            nested: None,
        }
    }

    pub fn branch(id: PathId, label: impl Into<String>, nested: Vec<OptionNode>) -> Self {
        Self {
            id,
            label: label.into(),
            nested: Some(nested),
        }
    }

    /// Children of this node, empty for leaves.
    pub fn children(&self) -> &[OptionNode] {
        self.nested.as_deref().unwrap_or(&[])
    }

    pub fn has_nested(&self) -> bool {
        !self.children().is_empty()
    }
}

/// A selected option, mirroring the `OptionNode` it was created from.
///
/// `nested` is present only when descendants, not the node itself, are what is
/// selected. An entry without `nested` is a direct selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionEntry {
    pub id: PathId,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nested: Option<Vec<SelectionEntry>>,
}

impl SelectionEntry {
    /// Direct selection of `node` (its descendants are not carried over).
    pub fn selected(node: &OptionNode) -> Self {
        Self {
            id: node.id.clone(),
            label: node.label.clone(),
            nested: None,
        }
    }

    /// Partial selection of `node` holding the selected descendants.
    pub fn partial(node: &OptionNode, nested: Vec<SelectionEntry>) -> Self {
        Self {
            id: node.id.clone(),
            label: node.label.clone(),
            nested: Some(nested),
        }
    }

    /// True when the node itself is selected rather than some descendant.
    pub fn is_direct(&self) -> bool {
        self.nested.is_none()
    }

    pub fn children(&self) -> &[SelectionEntry] {
        self.nested.as_deref().unwrap_or(&[])
    }

    /// Directly selected entries in this subtree, depth-first.
    pub fn direct_selections(&self) -> Vec<&SelectionEntry> {
        if self.is_direct() {
            return vec![self];
        }
        self.children()
            .iter()
            .flat_map(|c| c.direct_selections())
            .collect()
    }
}

/// The externally observable selection state.
///
/// Holds at most one entry per top-level branch, in the order the branches
/// were first selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionCollection(Vec<SelectionEntry>);

impl SelectionCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_entries(entries: Vec<SelectionEntry>) -> Self {
        Self(entries)
    }

    pub fn entries(&self) -> &[SelectionEntry] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SelectionEntry> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entry with exactly this identifier, at any depth.
    pub fn find(&self, id: &PathId) -> Option<&SelectionEntry> {
        let mut entries = self.entries();
        for depth in 0..id.len() {
            let prefix = id.prefix_at(depth)?;
            let entry = entries.iter().find(|e| e.id == prefix)?;
            if entry.id == *id {
                return Some(entry);
            }
            entries = entry.children();
        }
        None
    }

    /// True when the top-level branch of `id` has an entry.
    pub fn contains_branch(&self, id: &PathId) -> bool {
        let branch = id.branch();
        self.0.iter().any(|e| e.id == branch)
    }

    /// Identifiers of all directly selected entries, depth-first.
    pub fn selected_ids(&self) -> Vec<PathId> {
        self.0
            .iter()
            .flat_map(|e| e.direct_selections())
            .map(|e| e.id.clone())
            .collect()
    }
}

impl<'a> IntoIterator for &'a SelectionCollection {
    type Item = &'a SelectionEntry;
    type IntoIter = std::slice::Iter<'a, SelectionEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Checkbox state of an option row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionState {
    /// The option itself, or one of its ancestors, is selected
    Selected,
    /// Some descendants are selected
    Partial,
    /// Nothing at or below the option is selected
    Unselected,
}

/// Removable filter chip for one top-level selection entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chip {
    pub id: PathId,
    pub label: String,
    /// Labels of the directly selected descendants, empty for a direct selection
    pub detail: Vec<String>,
}

/// Displayable row of the currently shown option list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub id: PathId,
    pub label: String,
    pub has_nested: bool,
    pub state: SelectionState,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(text: &str) -> PathId {
        PathId::parse(text).unwrap()
    }

    fn entry(text: &str, nested: Option<Vec<SelectionEntry>>) -> SelectionEntry {
        SelectionEntry {
            id: id(text),
            label: text.to_string(),
            nested,
        }
    }

    #[test]
    fn given_nested_collection_when_finding_then_walks_prefixes() {
        let collection = SelectionCollection::from_entries(vec![
            entry("1", Some(vec![entry("1.1", Some(vec![entry("1.1.2", None)]))])),
            entry("2", None),
        ]);

        assert!(collection.find(&id("1.1.2")).is_some());
        assert!(collection.find(&id("1.1")).is_some_and(|e| !e.is_direct()));
        assert!(collection.find(&id("1.2")).is_none());
        assert!(collection.find(&id("2.1")).is_none());
        assert!(collection.contains_branch(&id("2.9")));
        assert!(!collection.contains_branch(&id("3")));
        assert_eq!(collection.selected_ids(), vec![id("1.1.2"), id("2")]);
    }

    #[test]
    fn given_entry_without_nested_when_serialized_then_omits_field() {
        let json = serde_json::to_value(entry("1", None)).unwrap();
        assert_eq!(json, serde_json::json!({"id": "1", "label": "1"}));
    }
}
