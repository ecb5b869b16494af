use std::collections::HashSet;

use tracing::instrument;

use crate::domain::entities::OptionNode;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::path::PathId;

/// Validated option tree.
///
/// Every child identifier extends its parent's identifier by exactly one
/// segment, top-level identifiers have a single segment, and siblings are
/// unique. The tree is read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionTree {
    roots: Vec<OptionNode>,
}

impl OptionTree {
    /// Validate caller-identified nodes.
    #[instrument(level = "debug", skip(nodes))]
    pub fn from_nodes(nodes: Vec<OptionNode>) -> DomainResult<Self> {
        validate_level(&nodes, None)?;
        Ok(Self { roots: nodes })
    }

    /// Top-level options.
    pub fn nodes(&self) -> &[OptionNode] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total number of options at all depths.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Locate a node by walking successive prefixes of `id`.
    #[instrument(level = "trace", skip(self))]
    pub fn find(&self, id: &PathId) -> DomainResult<&OptionNode> {
        find_node(&self.roots, id)
    }

    /// Number of levels, 0 for an empty tree.
    pub fn depth(&self) -> usize {
        fn calculate_depth(nodes: &[OptionNode]) -> usize {
            nodes
                .iter()
                .map(|n| 1 + calculate_depth(n.children()))
                .max()
                .unwrap_or(0)
        }
        calculate_depth(&self.roots)
    }

    /// Identifiers of all leaf options, in display order.
    pub fn leaf_ids(&self) -> Vec<PathId> {
        self.iter()
            .filter(|n| !n.has_nested())
            .map(|n| n.id.clone())
            .collect()
    }

    /// Pre-order, left-to-right traversal of all options.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(&self.roots)
    }
}

/// Locate the node `id` among `roots` by walking successive prefixes.
pub fn find_node<'a>(roots: &'a [OptionNode], id: &PathId) -> DomainResult<&'a OptionNode> {
    let mut level = roots;
    for depth in 0..id.len() {
        let prefix = id
            .prefix_at(depth)
            .ok_or_else(|| DomainError::NotFound(id.clone()))?;
        let node = level
            .iter()
            .find(|n| n.id == prefix)
            .ok_or_else(|| DomainError::NotFound(id.clone()))?;
        if node.id == *id {
            return Ok(node);
        }
        level = node.children();
    }
    Err(DomainError::NotFound(id.clone()))
}

fn validate_level(nodes: &[OptionNode], parent: Option<&PathId>) -> DomainResult<()> {
    let mut seen = HashSet::new();
    for node in nodes {
        let consistent = match parent {
            Some(parent) => parent.is_parent_of(&node.id),
            None => node.id.len() == 1,
        };
        if !consistent {
            let reason = match parent {
                Some(parent) => format!("not a direct child of '{}'", parent),
                None => "top-level option must have a single segment".to_string(),
            };
            return Err(DomainError::invalid(node.id.to_string(), reason));
        }
        if !seen.insert(&node.id) {
            return Err(DomainError::invalid(
                node.id.to_string(),
                "duplicate identifier among siblings",
            ));
        }
        if let Some(children) = &node.nested {
            validate_level(children, Some(&node.id))?;
        }
    }
    Ok(())
}

pub struct TreeIterator<'a> {
    stack: Vec<&'a OptionNode>,
}

impl<'a> TreeIterator<'a> {
    fn new(roots: &'a [OptionNode]) -> Self {
        Self {
            stack: roots.iter().rev().collect(),
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = &'a OptionNode;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        // Push children in reverse order for left-to-right traversal
        for child in current.children().iter().rev() {
            self.stack.push(child);
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(text: &str) -> PathId {
        PathId::parse(text).unwrap()
    }

    fn sample() -> Vec<OptionNode> {
        vec![
            OptionNode::branch(
                id("1"),
                "One",
                vec![
                    OptionNode::leaf(id("1.1"), "One-One"),
                    OptionNode::branch(
                        id("1.2"),
                        "One-Two",
                        vec![OptionNode::leaf(id("1.2.1"), "Deep")],
                    ),
                ],
            ),
            OptionNode::leaf(id("2"), "Two"),
        ]
    }

    #[test]
    fn given_valid_nodes_when_building_tree_then_exposes_structure() {
        let tree = OptionTree::from_nodes(sample()).unwrap();

        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.len(), 5);
        assert_eq!(tree.leaf_ids(), vec![id("1.1"), id("1.2.1"), id("2")]);
        let order: Vec<String> = tree.iter().map(|n| n.id.to_string()).collect();
        assert_eq!(order, ["1", "1.1", "1.2", "1.2.1", "2"]);
    }

    #[test]
    fn given_tree_when_finding_then_walks_prefixes() {
        let tree = OptionTree::from_nodes(sample()).unwrap();

        assert_eq!(tree.find(&id("1.2.1")).unwrap().label, "Deep");
        assert_eq!(tree.find(&id("1.3")), Err(DomainError::NotFound(id("1.3"))));
        assert_eq!(
            tree.find(&id("2.1")),
            Err(DomainError::NotFound(id("2.1")))
        );
    }

    #[test]
    fn given_child_outside_parent_prefix_when_building_then_invalid_identifier() {
        let nodes = vec![OptionNode::branch(
            id("1"),
            "One",
            vec![OptionNode::leaf(id("2.1"), "Misplaced")],
        )];
        assert!(matches!(
            OptionTree::from_nodes(nodes),
            Err(DomainError::InvalidIdentifier { .. })
        ));
    }

    #[test]
    fn given_duplicate_siblings_when_building_then_invalid_identifier() {
        let nodes = vec![
            OptionNode::leaf(id("1"), "One"),
            OptionNode::leaf(id("1"), "Uno"),
        ];
        assert!(matches!(
            OptionTree::from_nodes(nodes),
            Err(DomainError::InvalidIdentifier { .. })
        ));
    }

    #[test]
    fn given_empty_tree_when_measuring_then_zero() {
        let tree = OptionTree::default();
        assert!(tree.is_empty());
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.iter().next(), None);
    }
}
