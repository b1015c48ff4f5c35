use crate::visibility::render_node_count;

/// Handle of a node inside an [`IndexTreeModel`](crate::IndexTreeModel).
///
/// Handles are cheap to copy and compare nodes by identity.
/// A handle of a node removed by a splice never resolves again, even when its slot gets reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

impl NodeId {
    pub(crate) const ROOT: Self = Self {
        index: 0,
        generation: 0,
    };
}

#[derive(Debug)]
pub(crate) struct Node<T> {
    /// `None` only on the synthetic root.
    pub element: Option<T>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub depth: usize,
    pub collapsed: bool,
    pub visible: bool,
    pub children_render: usize,
    pub render_node_count: usize,
}

impl<T> Node<T> {
    /// Recompute `render_node_count` and return the difference to the previous value.
    pub fn refresh_render_node_count(&mut self) -> isize {
        let old = self.render_node_count;
        self.render_node_count =
            render_node_count(self.visible, self.collapsed, self.children_render);
        signed_difference(self.render_node_count, old)
    }
}

#[allow(clippy::cast_possible_wrap)]
pub(crate) const fn signed_difference(new: usize, old: usize) -> isize {
    new as isize - old as isize
}

#[derive(Debug)]
struct Slot<T> {
    generation: u32,
    node: Option<Node<T>>,
}

/// Owns all nodes of a tree. Children are only referenced by [`NodeId`].
#[derive(Debug)]
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        let root = Node {
            element: None,
            parent: None,
            children: Vec::new(),
            depth: 0,
            collapsed: false,
            visible: true,
            children_render: 0,
            render_node_count: 1,
        };
        Self {
            slots: vec![Slot {
                generation: 0,
                node: Some(root),
            }],
            free: Vec::new(),
        }
    }

    pub fn get(&self, id: NodeId) -> Option<&Node<T>> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<T>> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    /// Access a node which is known to be alive.
    ///
    /// Every `NodeId` stored inside the tree (children, parent) is alive, so lookups through them cannot fail.
    pub fn node(&self, id: NodeId) -> &Node<T> {
        self.get(id)
            .unwrap_or_else(|| unreachable!("tree references dead node {id:?}"))
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        self.get_mut(id)
            .unwrap_or_else(|| unreachable!("tree references dead node {id:?}"))
    }

    pub fn insert(&mut self, node: Node<T>) -> NodeId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            slot.node = Some(node);
            NodeId {
                index,
                generation: slot.generation,
            }
        } else {
            self.slots.push(Slot {
                generation: 0,
                node: Some(node),
            });
            NodeId {
                index: self.slots.len() - 1,
                generation: 0,
            }
        }
    }

    /// Take a node out of the arena. Its `NodeId` is invalid afterwards.
    pub fn remove(&mut self, id: NodeId) -> Option<Node<T>> {
        let slot = self
            .slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)?;
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        Some(node)
    }

    /// Amount of nodes alive, including the root.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }
}

#[cfg(test)]
fn leaf(element: &'static str) -> Node<&'static str> {
    Node {
        element: Some(element),
        parent: Some(NodeId::ROOT),
        children: Vec::new(),
        depth: 1,
        collapsed: false,
        visible: true,
        children_render: 0,
        render_node_count: 1,
    }
}

#[test]
fn removed_handles_stay_dead_after_slot_reuse() {
    let mut arena = Arena::new();
    let a = arena.insert(leaf("a"));
    assert_eq!(arena.len(), 2);
    assert_eq!(arena.remove(a).and_then(|node| node.element), Some("a"));
    assert!(arena.get(a).is_none());

    let b = arena.insert(leaf("b"));
    assert_ne!(a, b);
    assert!(arena.get(a).is_none());
    assert_eq!(arena.node(b).element, Some("b"));
    assert!(arena.remove(a).is_none());
}

#[test]
fn refresh_reports_difference() {
    let mut node = leaf("a");
    node.children_render = 3;
    assert_eq!(node.refresh_render_node_count(), 3);
    node.collapsed = true;
    assert_eq!(node.refresh_render_node_count(), -3);
    node.visible = false;
    assert_eq!(node.refresh_render_node_count(), -1);
}
