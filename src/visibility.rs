/// Classification of an element returned by a [`TreeFilter`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// The element is shown. Its children are classified on their own.
    #[default]
    Visible,

    /// The element and everything below it is not shown.
    Hidden,

    /// The element is shown only when at least one of its descendants is shown.
    Recurse,
}

/// Decides which elements of an [`IndexTreeModel`](crate::IndexTreeModel) end up in the output.
///
/// Any `Fn(&T) -> Visibility` closure is a filter:
///
/// ```
/// # use tui_index_tree::{TreeFilter, Visibility};
/// let even = |element: &u32| {
///     if element % 2 == 0 {
///         Visibility::Visible
///     } else {
///         Visibility::Hidden
///     }
/// };
/// assert_eq!(even.filter(&3), Visibility::Hidden);
/// ```
pub trait TreeFilter<T> {
    fn filter(&self, element: &T) -> Visibility;
}

impl<T, F> TreeFilter<T> for F
where
    F: Fn(&T) -> Visibility,
{
    fn filter(&self, element: &T) -> Visibility {
        self(element)
    }
}

/// Resolves the visibility of a node from its own classification and the rows its children render.
///
/// `children_render` is the amount of rows the children would render when the node is shown and expanded.
#[must_use]
pub const fn resolve(classification: Visibility, children_render: usize) -> bool {
    match classification {
        Visibility::Visible => true,
        Visibility::Hidden => false,
        Visibility::Recurse => children_render > 0,
    }
}

/// Rows a node contributes to the output.
#[must_use]
pub const fn render_node_count(visible: bool, collapsed: bool, children_render: usize) -> usize {
    match (visible, collapsed) {
        (false, _) => 0,
        (true, true) => 1,
        (true, false) => 1 + children_render,
    }
}

#[test]
fn recurse_needs_rendered_children() {
    assert!(!resolve(Visibility::Recurse, 0));
    assert!(resolve(Visibility::Recurse, 2));
    assert!(!resolve(Visibility::Hidden, 2));
    assert!(resolve(Visibility::Visible, 0));
}

#[test]
fn render_count_follows_collapse_and_visibility() {
    assert_eq!(render_node_count(false, false, 5), 0);
    assert_eq!(render_node_count(true, true, 5), 1);
    assert_eq!(render_node_count(true, false, 5), 6);
}
