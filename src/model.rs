use log::{debug, trace};

use crate::error::{LocationReason, TreeError};
use crate::flatten::{flatten_children, flatten_into};
use crate::location::{self, split_leaf};
use crate::node::{signed_difference, Arena, Node, NodeId};
use crate::sink::{Spliceable, TreeRow};
use crate::tree_element::TreeElement;
use crate::visibility::{self, TreeFilter, Visibility};

/// A tree of elements kept in sync with a flat list of its currently visible rows.
///
/// The list is owned by the `sink` and only changed through [`Spliceable::splice`].
/// Every operation results in at most one splice call describing exactly what changed.
///
/// # Example
///
/// ```
/// # use tui_index_tree::{IndexTreeModel, TreeElement, TreeRow};
/// let mut model = IndexTreeModel::new(Vec::<TreeRow<u32>>::new());
/// model.splice(
///     &[0],
///     0,
///     [
///         TreeElement::new(0, vec![TreeElement::new_leaf(10), TreeElement::new_leaf(11)]),
///         TreeElement::new_leaf(1),
///     ],
/// )?;
/// assert_eq!(model.len(), 4);
///
/// model.set_collapsed(&[0], true)?;
/// let rows = model.sink().iter().map(|row| row.element).collect::<Vec<_>>();
/// assert_eq!(rows, [0, 1]);
/// # Ok::<(), tui_index_tree::TreeError>(())
/// ```
pub struct IndexTreeModel<T, S> {
    arena: Arena<T>,
    sink: S,
    filter: Option<Box<dyn TreeFilter<T>>>,
}

/// Read only view on a node of an [`IndexTreeModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeNode<'a, T> {
    pub id: NodeId,
    pub element: &'a T,
    /// One based depth, equal to the length of the location.
    pub depth: usize,
    pub collapsed: bool,
    /// Resolved by the filter.
    pub visible: bool,
    pub children: usize,
    /// Rows the node contributes to the output when its ancestors are expanded.
    pub render_node_count: usize,
}

impl<T, S> core::fmt::Debug for IndexTreeModel<T, S>
where
    T: core::fmt::Debug,
    S: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("IndexTreeModel")
            .field("arena", &self.arena)
            .field("sink", &self.sink)
            .field("filtered", &self.filter.is_some())
            .finish()
    }
}

impl<T, S> IndexTreeModel<T, S>
where
    T: Clone,
    S: Spliceable<TreeRow<T>>,
{
    /// Create an empty model which shows every element.
    #[must_use]
    pub fn new(sink: S) -> Self {
        Self {
            arena: Arena::new(),
            sink,
            filter: None,
        }
    }

    /// Create an empty model which classifies every element with the `filter`.
    #[must_use]
    pub fn with_filter<F>(sink: S, filter: F) -> Self
    where
        F: TreeFilter<T> + 'static,
    {
        Self {
            arena: Arena::new(),
            sink,
            filter: Some(Box::new(filter)),
        }
    }

    /// Replace the filter.
    ///
    /// Existing nodes keep their visibility until [`refilter`](Self::refilter) is called.
    pub fn set_filter<F>(&mut self, filter: F)
    where
        F: TreeFilter<T> + 'static,
    {
        self.filter = Some(Box::new(filter));
    }

    /// Remove the filter. Takes effect on the next [`refilter`](Self::refilter).
    pub fn clear_filter(&mut self) {
        self.filter = None;
    }

    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the sink.
    ///
    /// Changing the rows through this breaks the synchronization with the model.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    #[must_use]
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Amount of rows currently rendered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.arena.node(NodeId::ROOT).children_render
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove `delete_count` children starting at `location` and insert `elements` in their place.
    ///
    /// The last index of `location` is the index among the siblings, the rest addresses their parent.
    /// Building a tree is a splice at `[0]` into the empty model.
    ///
    /// Returns the removed subtrees.
    ///
    /// # Errors
    ///
    /// Errors when `location` does not address a parent or the range to be deleted exceeds its children.
    /// Nothing is changed in that case.
    pub fn splice<I>(
        &mut self,
        location: &[usize],
        delete_count: usize,
        elements: I,
    ) -> Result<Vec<TreeElement<T>>, TreeError>
    where
        I: IntoIterator<Item = TreeElement<T>>,
    {
        let (parent_location, Some(start)) = split_leaf(location) else {
            return Err(TreeError::location(location, LocationReason::Empty));
        };
        let parent_id = location::resolve(&self.arena, parent_location)?;
        let parent = self.arena.node(parent_id);
        let len = parent.children.len();
        if start > len {
            return Err(TreeError::location(
                location,
                LocationReason::OutOfRange {
                    depth: parent_location.len(),
                    index: start,
                    len,
                },
            ));
        }
        let end = start
            .checked_add(delete_count)
            .filter(|end| *end <= len)
            .ok_or_else(|| {
                TreeError::location(
                    location,
                    LocationReason::DeleteOutOfRange {
                        start,
                        delete_count,
                        len,
                    },
                )
            })?;

        let depth = parent.depth + 1;
        let filter = self.filter.as_deref();
        let inserted = elements
            .into_iter()
            .map(|element| materialize(&mut self.arena, filter, parent_id, depth, element))
            .collect::<Vec<_>>();

        let removed = self
            .arena
            .node_mut(parent_id)
            .children
            .splice(start..end, inserted.iter().copied())
            .collect::<Vec<_>>();

        let inserted_render = self.render_node_count_sum(&inserted);
        let removed_render = self.render_node_count_sum(&removed);
        debug!(
            "splice at {location:?}: removing {} nodes ({removed_render} rows), inserting {} nodes ({inserted_render} rows)",
            removed.len(),
            inserted.len(),
        );

        if location::is_revealed(&self.arena, parent_id) {
            let offset = location::output_offset(&self.arena, parent_location, start);
            let mut rows = Vec::with_capacity(inserted_render);
            for &id in &inserted {
                flatten_into(&self.arena, id, &mut rows);
            }
            self.sink.splice(offset, removed_render, rows);
        }

        self.propagate(
            parent_id,
            signed_difference(inserted_render, removed_render),
        );

        Ok(removed
            .into_iter()
            .map(|id| take_subtree(&mut self.arena, id))
            .collect())
    }

    /// Collapse or expand the node at `location`.
    ///
    /// Returns `false` when the node already had the requested state. Nothing is emitted in that case.
    ///
    /// # Errors
    ///
    /// Errors when `location` does not address a node.
    pub fn set_collapsed(&mut self, location: &[usize], collapsed: bool) -> Result<bool, TreeError> {
        let id = self.resolve_node(location)?;
        let node = self.arena.node_mut(id);
        if node.collapsed == collapsed {
            return Ok(false);
        }

        let old_count = node.render_node_count;
        node.collapsed = collapsed;
        let delta = node.refresh_render_node_count();
        let parent = node.parent;
        debug!("set collapsed of {location:?} to {collapsed}, rendered rows change by {delta}");

        if location::is_rendered(&self.arena, id) {
            // Replace the row of the node too, it shows the collapsed state.
            let offset = location::node_offset(&self.arena, location);
            let mut rows = Vec::with_capacity(self.arena.node(id).render_node_count);
            flatten_into(&self.arena, id, &mut rows);
            self.sink.splice(offset, old_count, rows);
        }

        if let Some(parent) = parent {
            self.propagate(parent, delta);
        }
        Ok(true)
    }

    /// Flip the collapsed state of the node at `location`.
    ///
    /// Returns the new collapsed state.
    ///
    /// # Errors
    ///
    /// Errors when `location` does not address a node.
    pub fn toggle_collapsed(&mut self, location: &[usize]) -> Result<bool, TreeError> {
        let collapsed = !self.is_collapsed(location)?;
        self.set_collapsed(location, collapsed)?;
        Ok(collapsed)
    }

    /// # Errors
    ///
    /// Errors when `location` does not address a node.
    pub fn is_collapsed(&self, location: &[usize]) -> Result<bool, TreeError> {
        let id = self.resolve_node(location)?;
        Ok(self.arena.node(id).collapsed)
    }

    /// Collapse every node which has children.
    ///
    /// Returns `true` when any node was collapsed.
    pub fn collapse_all(&mut self) -> bool {
        let changed = collapse_descendants(&mut self.arena, NodeId::ROOT);
        if changed {
            let old_len = self.len();
            recount(&mut self.arena, NodeId::ROOT);
            debug!("collapse all: {old_len} rows before, {} after", self.len());
            self.replace_all(old_len);
        }
        changed
    }

    /// Classify every node again with the current filter and rebuild the whole output.
    ///
    /// The tree structure and the collapsed state of every node is kept.
    pub fn refilter(&mut self) {
        let old_len = self.len();
        resolve_subtree(&mut self.arena, self.filter.as_deref(), NodeId::ROOT);
        debug!("refilter: {old_len} rows before, {} after", self.len());
        self.replace_all(old_len);
    }

    /// Location of the node, independent of the visibility and collapsed state of it or its ancestors.
    ///
    /// # Errors
    ///
    /// Errors when the node was removed from the tree.
    pub fn get_node_location(&self, node: NodeId) -> Result<Vec<usize>, TreeError> {
        location::node_location(&self.arena, node)
    }

    /// Location of the parent of the node at `location`.
    ///
    /// # Errors
    ///
    /// Errors when `location` does not address a node.
    pub fn get_parent_node_location(&self, location: &[usize]) -> Result<Vec<usize>, TreeError> {
        self.resolve_node(location)?;
        let (parent_location, _) = split_leaf(location);
        Ok(parent_location.to_vec())
    }

    /// # Errors
    ///
    /// Errors when `location` does not address a node.
    pub fn get_node(&self, location: &[usize]) -> Result<TreeNode<'_, T>, TreeError> {
        let id = self.resolve_node(location)?;
        self.get_node_by_id(id)
    }

    /// # Errors
    ///
    /// Errors when the node was removed from the tree.
    pub fn get_node_by_id(&self, id: NodeId) -> Result<TreeNode<'_, T>, TreeError> {
        let node = self.arena.get(id).ok_or(TreeError::UnknownNode(id))?;
        let element = node.element.as_ref().ok_or(TreeError::UnknownNode(id))?;
        Ok(TreeNode {
            id,
            element,
            depth: node.depth,
            collapsed: node.collapsed,
            visible: node.visible,
            children: node.children.len(),
            render_node_count: node.render_node_count,
        })
    }

    /// Amount of children of the node at `location`. The empty location addresses the top level.
    ///
    /// # Errors
    ///
    /// Errors when `location` does not address a node.
    pub fn child_count(&self, location: &[usize]) -> Result<usize, TreeError> {
        let id = location::resolve(&self.arena, location)?;
        Ok(self.arena.node(id).children.len())
    }

    /// Index of the node in the output or `None` when it is currently not rendered.
    ///
    /// # Errors
    ///
    /// Errors when `location` does not address a node.
    pub fn get_list_index(&self, location: &[usize]) -> Result<Option<usize>, TreeError> {
        let id = self.resolve_node(location)?;
        if !location::is_rendered(&self.arena, id) {
            return Ok(None);
        }
        Ok(Some(location::node_offset(&self.arena, location)))
    }

    #[cfg(test)]
    pub(crate) const fn arena(&self) -> &Arena<T> {
        &self.arena
    }

    /// Resolve a location which has to address a node other than the root.
    fn resolve_node(&self, location: &[usize]) -> Result<NodeId, TreeError> {
        if location.is_empty() {
            return Err(TreeError::location(location, LocationReason::Empty));
        }
        location::resolve(&self.arena, location)
    }

    fn render_node_count_sum(&self, ids: &[NodeId]) -> usize {
        ids.iter()
            .map(|&id| self.arena.node(id).render_node_count)
            .sum()
    }

    /// Apply a change of the children rows to the node and pass the resulting change on to its ancestors.
    fn propagate(&mut self, mut id: NodeId, mut delta: isize) {
        while delta != 0 {
            let node = self.arena.node_mut(id);
            node.children_render = node.children_render.saturating_add_signed(delta);
            let upward = node.refresh_render_node_count();
            trace!(
                "propagate {delta} into {id:?}: children render {}, render node count {}",
                node.children_render,
                node.render_node_count
            );
            match node.parent {
                Some(parent) => {
                    id = parent;
                    delta = upward;
                }
                None => break,
            }
        }
    }

    fn replace_all(&mut self, old_len: usize) {
        let rows = flatten_children(&self.arena, NodeId::ROOT);
        self.sink.splice(0, old_len, rows);
    }
}

fn classify<T>(filter: Option<&dyn TreeFilter<T>>, node: &Node<T>) -> Visibility {
    match (filter, &node.element) {
        (Some(filter), Some(element)) => filter.filter(element),
        _ => Visibility::Visible,
    }
}

/// Create the node and its children. The counters are resolved children first.
fn materialize<T>(
    arena: &mut Arena<T>,
    filter: Option<&dyn TreeFilter<T>>,
    parent: NodeId,
    depth: usize,
    element: TreeElement<T>,
) -> NodeId {
    let (element, collapsed, children) = element.into_parts();
    let id = arena.insert(Node {
        element: Some(element),
        parent: Some(parent),
        children: Vec::with_capacity(children.len()),
        depth,
        collapsed,
        visible: false,
        children_render: 0,
        render_node_count: 0,
    });

    let mut children_render = 0;
    for child in children {
        let child = materialize(arena, filter, id, depth + 1, child);
        children_render += arena.node(child).render_node_count;
        arena.node_mut(id).children.push(child);
    }

    let classification = classify(filter, arena.node(id));
    let node = arena.node_mut(id);
    node.children_render = children_render;
    node.visible = visibility::resolve(classification, children_render);
    node.refresh_render_node_count();
    id
}

/// Remove the node and all of its descendants from the arena and rebuild what was inserted.
fn take_subtree<T>(arena: &mut Arena<T>, id: NodeId) -> TreeElement<T> {
    let Some(node) = arena.remove(id) else {
        unreachable!("removed subtree contains dead node {id:?}");
    };
    let Some(element) = node.element else {
        unreachable!("the root is never removed");
    };
    let children = node
        .children
        .into_iter()
        .map(|child| take_subtree(arena, child))
        .collect();
    TreeElement::new(element, children).collapsed(node.collapsed)
}

/// Resolve visibility and counters of the node and all of its descendants, children first.
///
/// Returns the new render node count of the node.
fn resolve_subtree<T>(arena: &mut Arena<T>, filter: Option<&dyn TreeFilter<T>>, id: NodeId) -> usize {
    let mut children_render = 0;
    for index in 0..arena.node(id).children.len() {
        let child = arena.node(id).children[index];
        children_render += resolve_subtree(arena, filter, child);
    }

    let classification = classify(filter, arena.node(id));
    let node = arena.node_mut(id);
    node.children_render = children_render;
    node.visible = node.parent.is_none() || visibility::resolve(classification, children_render);
    node.refresh_render_node_count();
    node.render_node_count
}

/// Recompute the counters of the subtree without asking the filter again.
fn recount<T>(arena: &mut Arena<T>, id: NodeId) -> usize {
    let mut children_render = 0;
    for index in 0..arena.node(id).children.len() {
        let child = arena.node(id).children[index];
        children_render += recount(arena, child);
    }
    let node = arena.node_mut(id);
    node.children_render = children_render;
    node.refresh_render_node_count();
    node.render_node_count
}

fn collapse_descendants<T>(arena: &mut Arena<T>, id: NodeId) -> bool {
    let mut changed = false;
    for index in 0..arena.node(id).children.len() {
        let child = arena.node(id).children[index];
        changed |= collapse_descendants(arena, child);
        let node = arena.node_mut(child);
        if !node.children.is_empty() && !node.collapsed {
            node.collapsed = true;
            changed = true;
        }
    }
    changed
}
