//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;
use itertools::Itertools;
use termtree::Tree;

use crate::domain::{Chip, OptionNode, Row, SelectionEntry, SelectionState};

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print indented detail (no color)
pub fn detail(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {}", msg);
}

/// Print plain output (no color, for data such as JSON)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// Checkbox marker for a row state
pub fn state_marker(state: SelectionState) -> &'static str {
    match state {
        SelectionState::Selected => "●",
        SelectionState::Partial => "◐",
        SelectionState::Unselected => "○",
    }
}

/// Option subtree with identifiers, for `mlselect tree`.
pub fn option_tree(node: &OptionNode) -> Tree<String> {
    let leaves: Vec<_> = node.children().iter().map(option_tree).collect();
    Tree::new(format!("{} [{}]", node.label, node.id)).with_leaves(leaves)
}

/// Selection entry subtree; direct selections are marked.
pub fn selection_tree(entry: &SelectionEntry) -> Tree<String> {
    let marker = if entry.is_direct() {
        state_marker(SelectionState::Selected)
    } else {
        state_marker(SelectionState::Partial)
    };
    let leaves: Vec<_> = entry.children().iter().map(selection_tree).collect();
    Tree::new(format!("{} {} [{}]", marker, entry.label, entry.id)).with_leaves(leaves)
}

/// One-line chip rendering: `Label (detail, detail) ✗`
pub fn chip_line(chip: &Chip) -> String {
    if chip.detail.is_empty() {
        format!("{} {}", chip.label, "✗".red())
    } else {
        format!(
            "{} ({}) {}",
            chip.label,
            chip.detail.iter().join(", "),
            "✗".red()
        )
    }
}

/// One-line row rendering: marker, label, drill-down hint for nested options
pub fn row_line(row: &Row) -> String {
    let marker = match row.state {
        SelectionState::Selected => state_marker(row.state).green().to_string(),
        SelectionState::Partial => state_marker(row.state).yellow().to_string(),
        SelectionState::Unselected => state_marker(row.state).to_string(),
    };
    let hint = if row.has_nested { " ›" } else { "" };
    format!("{} {} [{}]{}", marker, row.label, row.id, hint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PathId;

    fn id(text: &str) -> PathId {
        PathId::parse(text).unwrap()
    }

    #[test]
    fn given_nested_option_when_rendering_tree_then_lists_ids() {
        let node = OptionNode::branch(id("1"), "Fruit", vec![OptionNode::leaf(id("1.1"), "Apple")]);
        let rendered = option_tree(&node).to_string();
        assert!(rendered.starts_with("Fruit [1]"));
        assert!(rendered.contains("Apple [1.1]"));
    }

    #[test]
    fn given_partial_entry_when_rendering_selection_then_marks_states() {
        let entry = SelectionEntry {
            id: id("1"),
            label: "Fruit".into(),
            nested: Some(vec![SelectionEntry {
                id: id("1.1"),
                label: "Apple".into(),
                nested: None,
            }]),
        };
        let rendered = selection_tree(&entry).to_string();
        assert!(rendered.contains("◐ Fruit [1]"));
        assert!(rendered.contains("● Apple [1.1]"));
    }

    #[test]
    fn given_row_with_nested_when_rendering_then_shows_hint() {
        colored::control::set_override(false);
        let row = Row {
            id: id("1"),
            label: "Fruit".into(),
            has_nested: true,
            state: SelectionState::Unselected,
        };
        assert_eq!(row_line(&row), "○ Fruit [1] ›");
    }
}
