//! Addressing nodes by the path of sibling indices from the root.
//!
//! A location ignores visibility and collapsed state: `[]` is the root, `[2]` the third top level node and `[2, 0]` its first child.

use crate::error::{LocationReason, TreeError};
use crate::node::{Arena, NodeId};

/// Split a location into the location of the parent and the index within the parent.
///
/// # Examples
///
/// ```
/// # use tui_index_tree::location::split_leaf;
/// let (branch, leaf) = split_leaf(&[2, 4, 6]);
/// assert_eq!(branch, [2, 4]);
/// assert_eq!(leaf, Some(6));
///
/// let (branch, leaf) = split_leaf(&[]);
/// assert_eq!(branch, []);
/// assert_eq!(leaf, None);
/// ```
#[must_use]
pub fn split_leaf(location: &[usize]) -> (&[usize], Option<usize>) {
    match location.split_last() {
        Some((leaf, branch)) => (branch, Some(*leaf)),
        None => (location, None),
    }
}

/// Walk `location` from the root.
pub(crate) fn resolve<T>(arena: &Arena<T>, location: &[usize]) -> Result<NodeId, TreeError> {
    let mut current = NodeId::ROOT;
    for (depth, &index) in location.iter().enumerate() {
        let children = &arena.node(current).children;
        current = *children.get(index).ok_or_else(|| {
            TreeError::location(
                location,
                LocationReason::OutOfRange {
                    depth,
                    index,
                    len: children.len(),
                },
            )
        })?;
    }
    Ok(current)
}

/// Offset in the output of the child at `index` of the node at `parent_location`.
///
/// Only meaningful when the parent is revealed, see [`is_revealed`].
/// The location must resolve.
pub(crate) fn output_offset<T>(arena: &Arena<T>, parent_location: &[usize], index: usize) -> usize {
    let mut offset = 0;
    let mut current = NodeId::ROOT;
    let steps = parent_location.iter().copied().chain(Some(index));
    for (depth, step) in steps.enumerate() {
        let node = arena.node(current);
        if depth > 0 {
            // row of the ancestor itself
            offset += 1;
        }
        offset += node.children[..step]
            .iter()
            .map(|&sibling| arena.node(sibling).render_node_count)
            .sum::<usize>();
        match node.children.get(step) {
            Some(&child) => current = child,
            None => break,
        }
    }
    offset
}

/// Offset in the output of the row of the node at `location`.
///
/// Only meaningful when the node is rendered, see [`is_rendered`].
/// The location must resolve to a node other than the root.
pub(crate) fn node_offset<T>(arena: &Arena<T>, location: &[usize]) -> usize {
    match split_leaf(location) {
        (parent_location, Some(index)) => output_offset(arena, parent_location, index),
        (_, None) => 0,
    }
}

/// Whether the node and all of its ancestors are visible and expanded.
pub(crate) fn is_revealed<T>(arena: &Arena<T>, mut id: NodeId) -> bool {
    loop {
        let node = arena.node(id);
        if !node.visible || node.collapsed {
            return false;
        }
        match node.parent {
            Some(parent) => id = parent,
            None => return true,
        }
    }
}

/// Whether the node is a row of the output right now.
pub(crate) fn is_rendered<T>(arena: &Arena<T>, id: NodeId) -> bool {
    let node = arena.node(id);
    node.visible && node.parent.map_or(true, |parent| is_revealed(arena, parent))
}

/// Location of a node, the inverse of [`resolve`].
pub(crate) fn node_location<T>(arena: &Arena<T>, id: NodeId) -> Result<Vec<usize>, TreeError> {
    let mut node = arena.get(id).ok_or(TreeError::UnknownNode(id))?;
    let mut current = id;
    let mut location = Vec::with_capacity(node.depth);
    while let Some(parent_id) = node.parent {
        let parent = arena.node(parent_id);
        let index = parent
            .children
            .iter()
            .position(|&child| child == current)
            .unwrap_or_else(|| unreachable!("{current:?} is missing in its parent"));
        location.push(index);
        current = parent_id;
        node = parent;
    }
    location.reverse();
    Ok(location)
}
