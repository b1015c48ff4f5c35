use crate::node::NodeId;

/// One rendered row of an [`IndexTreeModel`](crate::IndexTreeModel).
///
/// The rows handed to the output sink are exactly the currently visible nodes in preorder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow<T> {
    pub element: T,

    /// One based depth. Top level nodes have a depth of 1.
    pub depth: usize,

    pub collapsed: bool,

    /// Identity of the node this row shows. See [`IndexTreeModel::get_node_location`](crate::IndexTreeModel::get_node_location).
    pub node: NodeId,
}

/// Receiver of the incremental edits of an [`IndexTreeModel`](crate::IndexTreeModel).
///
/// Every edit removes `delete_count` items starting at `start` and inserts `items` at the same position.
/// The model never calls back into itself from within a splice, and an implementation must not either.
pub trait Spliceable<Item> {
    fn splice(&mut self, start: usize, delete_count: usize, items: Vec<Item>);
}

impl<Item> Spliceable<Item> for Vec<Item> {
    fn splice(&mut self, start: usize, delete_count: usize, items: Vec<Item>) {
        Vec::splice(self, start..start + delete_count, items);
    }
}

#[test]
fn vec_splice_replaces_range() {
    let mut list = vec![0, 1, 2, 3];
    Spliceable::splice(&mut list, 1, 2, vec![7, 8, 9]);
    assert_eq!(list, [0, 7, 8, 9, 3]);
    Spliceable::splice(&mut list, 0, 5, Vec::new());
    assert!(list.is_empty());
}
