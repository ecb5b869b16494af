//! Hierarchical selection engine
//!
//! Computes a new `SelectionCollection` from the option tree, the current
//! selection and a target identifier. The walk descends the tree guided by
//! successive prefixes of the target, then merges or prunes entries on the way
//! back up so that each top-level branch has at most one entry and nested
//! state lives in that entry's `nested` field.
//!
//! Inputs are only borrowed: every entry on the path from the target to the
//! top level is rebuilt, untouched siblings are cloned into the new
//! collection, and the caller's collection stays as it was.

use tracing::{debug, instrument, trace};

use crate::domain::entities::{
    Chip, OptionNode, SelectionCollection, SelectionEntry, SelectionState,
};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::path::PathId;
use crate::domain::tree::OptionTree;

/// Toggle the option at `target`.
///
/// - Toggling a directly selected option deselects it; ancestors left without
///   any selected descendant are pruned.
/// - Toggling an unselected option selects it. A partially selected option is
///   selected as a whole, replacing its descendant selections.
/// - Toggling an option whose ancestor is directly selected changes nothing:
///   the ancestor selection wins.
///
/// # Errors
/// `NotFound` when `target` does not address an option of `tree`.
#[instrument(level = "debug", skip(tree, current, target), fields(target = %target))]
pub fn toggle(
    tree: &OptionTree,
    current: &SelectionCollection,
    target: &PathId,
) -> DomainResult<SelectionCollection> {
    tree.find(target)?;
    let entries = toggle_level(tree.nodes(), current.entries(), target, 0)?;
    debug!("toggle: {} -> {} top-level entries", current.len(), entries.len());
    Ok(SelectionCollection::from_entries(entries))
}

/// One step of the walk: `nodes` are the options at `depth` and `entries` the
/// selection entries at the same level of the same branch. Returns the new
/// entries for this level.
pub(crate) fn toggle_level(
    nodes: &[OptionNode],
    entries: &[SelectionEntry],
    target: &PathId,
    depth: usize,
) -> DomainResult<Vec<SelectionEntry>> {
    let prefix = target
        .prefix_at(depth)
        .ok_or_else(|| DomainError::NotFound(target.clone()))?;
    let node = nodes
        .iter()
        .find(|n| n.id == prefix)
        .ok_or_else(|| DomainError::NotFound(target.clone()))?;
    let position = entries.iter().position(|e| e.id == node.id);
    trace!(depth, node = %node.id, "descending");

    if node.id == *target {
        trace!(depth, node = %node.id, "exact match");
        return Ok(match position {
            Some(i) if entries[i].is_direct() => {
                trace!("deselect");
                without(entries, i)
            }
            Some(i) => {
                trace!("select supersedes nested selection");
                replaced(entries, i, SelectionEntry::selected(node))
            }
            None => {
                trace!("select");
                appended(entries, SelectionEntry::selected(node))
            }
        });
    }

    if !node.has_nested() {
        return Err(DomainError::NotFound(target.clone()));
    }

    let nested: &[SelectionEntry] = match position {
        Some(i) if entries[i].is_direct() => {
            debug!(ancestor = %node.id, "ancestor already selected, ignoring toggle");
            return Ok(entries.to_vec());
        }
        Some(i) => entries[i].children(),
        None => &[],
    };

    let sub = toggle_level(node.children(), nested, target, depth + 1)?;

    if sub.is_empty() {
        trace!(depth, node = %node.id, "pruning");
        return Ok(match position {
            Some(i) => without(entries, i),
            None => entries.to_vec(),
        });
    }

    trace!(depth, node = %node.id, nested = sub.len(), "merging");
    let merged = SelectionEntry::partial(node, sub);
    Ok(match position {
        Some(i) => replaced(entries, i, merged),
        None => appended(entries, merged),
    })
}

fn without(entries: &[SelectionEntry], index: usize) -> Vec<SelectionEntry> {
    entries
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, e)| e.clone())
        .collect()
}

fn replaced(entries: &[SelectionEntry], index: usize, entry: SelectionEntry) -> Vec<SelectionEntry> {
    let mut result = entries.to_vec();
    result[index] = entry;
    result
}

fn appended(entries: &[SelectionEntry], entry: SelectionEntry) -> Vec<SelectionEntry> {
    let mut result = Vec::with_capacity(entries.len() + 1);
    result.extend_from_slice(entries);
    result.push(entry);
    result
}

/// Remove the top-level entry `id` outright.
///
/// Unlike `toggle` this does not cascade: the whole branch entry goes, whatever
/// its nested content. Identifiers below the top level match nothing and leave
/// the collection unchanged.
#[instrument(level = "debug", skip(current, id), fields(id = %id))]
pub fn remove_filter(current: &SelectionCollection, id: &PathId) -> SelectionCollection {
    let entries: Vec<SelectionEntry> = current
        .iter()
        .filter(|e| e.id != *id)
        .cloned()
        .collect();
    if entries.len() == current.len() {
        debug!("remove_filter: no top-level entry for {}", id);
    }
    SelectionCollection::from_entries(entries)
}

/// Checkbox state of the option `id` under `selection`.
pub fn selection_state(selection: &SelectionCollection, id: &PathId) -> SelectionState {
    let mut entries = selection.entries();
    for depth in 0..id.len() {
        let Some(prefix) = id.prefix_at(depth) else {
            break;
        };
        let Some(entry) = entries.iter().find(|e| e.id == prefix) else {
            return SelectionState::Unselected;
        };
        if entry.id == *id {
            return if entry.is_direct() {
                SelectionState::Selected
            } else {
                SelectionState::Partial
            };
        }
        if entry.is_direct() {
            return SelectionState::Selected;
        }
        entries = entry.children();
    }
    SelectionState::Unselected
}

/// One chip per top-level entry, in selection order.
pub fn chips(selection: &SelectionCollection) -> Vec<Chip> {
    selection
        .iter()
        .map(|entry| Chip {
            id: entry.id.clone(),
            label: entry.label.clone(),
            detail: if entry.is_direct() {
                Vec::new()
            } else {
                entry
                    .direct_selections()
                    .into_iter()
                    .map(|e| e.label.clone())
                    .collect()
            },
        })
        .collect()
}
