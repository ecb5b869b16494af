//! Multi-level select component state
//!
//! Ties the selection engine and drill-down navigation together the way a
//! dropdown host uses them: taps become `handle_select`, chip removal becomes
//! `remove_filter`, and nested levels are entered and left with `load_nested`
//! and `go_back`. Rendering and animation belong to the host.

use std::fmt;
use std::mem;

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::ApplicationResult;
use crate::domain::{
    self, Chip, DomainError, NavigationStack, OptionNode, OptionTree, PathId, Row,
    SelectionCollection,
};

pub const DEFAULT_PLACEHOLDER: &str = "Multi Level Selector";
pub const DEFAULT_CHIP_SEPARATOR: &str = ", ";

/// Receives the new selection after every successful toggle.
pub trait SelectionListener {
    fn on_change(&mut self, selection: &SelectionCollection);
}

impl<F> SelectionListener for F
where
    F: FnMut(&SelectionCollection),
{
    fn on_change(&mut self, selection: &SelectionCollection) {
        self(selection)
    }
}

/// State of one multi-level select widget.
pub struct MultiLevelSelect {
    tree: OptionTree,
    /// Option list currently displayed
    options: Vec<OptionNode>,
    option_stack: NavigationStack<Vec<OptionNode>>,
    is_open: bool,
    selected: SelectionCollection,
    placeholder: String,
    chip_separator: String,
    listener: Option<Box<dyn SelectionListener>>,
}

impl fmt::Debug for MultiLevelSelect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiLevelSelect")
            .field("options", &self.options.len())
            .field("levels", &self.option_stack.depth())
            .field("is_open", &self.is_open)
            .field("selected", &self.selected)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}

impl MultiLevelSelect {
    pub fn new(tree: OptionTree) -> Self {
        let options = tree.nodes().to_vec();
        Self {
            tree,
            options,
            option_stack: NavigationStack::new(),
            is_open: false,
            selected: SelectionCollection::new(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            chip_separator: DEFAULT_CHIP_SEPARATOR.to_string(),
            listener: None,
        }
    }

    pub fn with_listener(mut self, listener: impl SelectionListener + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_chip_separator(mut self, separator: impl Into<String>) -> Self {
        self.chip_separator = separator.into();
        self
    }

    pub fn tree(&self) -> &OptionTree {
        &self.tree
    }

    pub fn selection(&self) -> &SelectionCollection {
        &self.selected
    }

    /// Option list currently displayed.
    pub fn options(&self) -> &[OptionNode] {
        &self.options
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn toggle_open(&mut self) -> bool {
        self.is_open = !self.is_open;
        debug!("toggle_open: is_open={}", self.is_open);
        self.is_open
    }

    /// Toggle the option `id`, store the result and notify the listener.
    #[instrument(level = "debug", skip(self, id), fields(id = %id))]
    pub fn handle_select(&mut self, id: &PathId) -> ApplicationResult<&SelectionCollection> {
        let selected = domain::toggle(&self.tree, &self.selected, id)?;
        self.selected = selected;
        if let Some(listener) = self.listener.as_mut() {
            listener.on_change(&self.selected);
        }
        Ok(&self.selected)
    }

    /// Strip the top-level entry `id` (chip removal).
    ///
    /// The listener is only notified by `handle_select`.
    pub fn remove_filter(&mut self, id: &PathId) -> &SelectionCollection {
        self.selected = domain::remove_filter(&self.selected, id);
        &self.selected
    }

    /// Drill into the children of the displayed option `id`.
    ///
    /// # Errors
    /// `NotFound` when `id` is not in the displayed list or has no nested
    /// options.
    #[instrument(level = "debug", skip(self, id), fields(id = %id))]
    pub fn load_nested(&mut self, id: &PathId) -> ApplicationResult<&[OptionNode]> {
        let children = match self.options.iter().find(|n| n.id == *id) {
            Some(node) if node.has_nested() => node.children().to_vec(),
            _ => return Err(DomainError::NotFound(id.clone()).into()),
        };
        let previous = mem::replace(&mut self.options, children);
        self.option_stack.push_level(previous);
        Ok(&self.options)
    }

    /// Return to the list shown before the last drill-down.
    ///
    /// # Errors
    /// `EmptyStack` when already at root level.
    pub fn go_back(&mut self) -> ApplicationResult<&[OptionNode]> {
        self.options = self.option_stack.pop_level()?;
        Ok(&self.options)
    }

    pub fn is_at_root(&self) -> bool {
        self.option_stack.is_at_root()
    }

    /// Displayed options with their checkbox state.
    pub fn rows(&self) -> Vec<Row> {
        self.options
            .iter()
            .map(|node| Row {
                id: node.id.clone(),
                label: node.label.clone(),
                has_nested: node.has_nested(),
                state: domain::selection_state(&self.selected, &node.id),
            })
            .collect()
    }

    pub fn chips(&self) -> Vec<Chip> {
        domain::chips(&self.selected)
    }

    /// Text for the closed widget: the placeholder, or the chip labels.
    pub fn display_text(&self) -> String {
        if self.selected.is_empty() {
            return self.placeholder.clone();
        }
        self.selected
            .iter()
            .map(|e| e.label.as_str())
            .join(&self.chip_separator)
    }
}
