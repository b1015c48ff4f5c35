/// One element to be inserted into an [`IndexTreeModel`](crate::IndexTreeModel).
///
/// Can have zero or more `children` which are inserted together with it.
///
/// The `element` is an opaque payload.
/// The model never compares elements; nodes are identified by their [`NodeId`](crate::NodeId) or their location.
///
/// # Example
///
/// ```
/// # use tui_index_tree::TreeElement;
/// let a = TreeElement::new_leaf("leaf");
/// let b = TreeElement::new("root", vec![a]).collapsed(true);
/// assert_eq!(b.children().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeElement<T> {
    pub(super) element: T,
    pub(super) collapsed: bool,
    pub(super) children: Vec<TreeElement<T>>,
}

impl<T> TreeElement<T> {
    /// Create a new `TreeElement` without children.
    #[must_use]
    pub const fn new_leaf(element: T) -> Self {
        Self {
            element,
            collapsed: false,
            children: Vec::new(),
        }
    }

    /// Create a new `TreeElement` with children.
    #[must_use]
    pub const fn new(element: T, children: Vec<Self>) -> Self {
        Self {
            element,
            collapsed: false,
            children,
        }
    }

    /// Set whether the element is inserted collapsed. Defaults to expanded.
    #[must_use]
    pub const fn collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }

    #[must_use]
    pub const fn element(&self) -> &T {
        &self.element
    }

    #[must_use]
    pub const fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Get a reference to a child by index.
    #[must_use]
    pub fn child(&self, index: usize) -> Option<&Self> {
        self.children.get(index)
    }

    /// Get a mutable reference to a child by index.
    #[must_use]
    pub fn child_mut(&mut self, index: usize) -> Option<&mut Self> {
        self.children.get_mut(index)
    }

    /// Add a child to the `TreeElement`.
    pub fn add_child(&mut self, child: Self) {
        self.children.push(child);
    }

    /// Split into the payload and the children.
    #[must_use]
    pub fn into_parts(self) -> (T, bool, Vec<Self>) {
        (self.element, self.collapsed, self.children)
    }
}

impl<T> From<T> for TreeElement<T> {
    fn from(element: T) -> Self {
        Self::new_leaf(element)
    }
}

#[cfg(test)]
impl TreeElement<&'static str> {
    /// The tree used throughout the tests:
    ///
    /// ```text
    /// vscode
    /// ├ .build
    /// ├ git
    /// ├ github
    /// │ ├ calendar.yml
    /// │ ├ endgame
    /// │ └ build.js
    /// └ build
    ///   ├ lib
    ///   └ gulpfile.js
    /// ```
    #[must_use]
    pub fn example() -> Vec<Self> {
        vec![Self::new(
            "vscode",
            vec![
                Self::new_leaf(".build"),
                Self::new_leaf("git"),
                Self::new(
                    "github",
                    vec![
                        Self::new_leaf("calendar.yml"),
                        Self::new_leaf("endgame"),
                        Self::new_leaf("build.js"),
                    ],
                ),
                Self::new(
                    "build",
                    vec![Self::new_leaf("lib"), Self::new_leaf("gulpfile.js")],
                ),
            ],
        )]
    }
}

#[test]
fn builder_keeps_children_in_order() {
    let mut root = TreeElement::new("root", vec![TreeElement::new_leaf("a")]);
    root.add_child("b".into());
    let children = root
        .children()
        .iter()
        .map(TreeElement::element)
        .collect::<Vec<_>>();
    assert_eq!(children, [&"a", &"b"]);
    assert!(!root.is_collapsed());
    assert!(root.collapsed(true).is_collapsed());
}
