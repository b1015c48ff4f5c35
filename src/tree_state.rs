use crate::model::IndexTreeModel;
use crate::sink::{Spliceable, TreeRow};

/// Keeps the state of what is currently selected and scrolled to in a [`Tree`](crate::Tree).
///
/// The selection is the index of a row in the output of an [`IndexTreeModel`].
/// Operations which collapse or expand nodes take the model and change it directly.
///
/// # Example
///
/// ```
/// # use tui_index_tree::TreeState;
/// let mut state = TreeState::default();
/// assert_eq!(state.selected(), None);
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TreeState {
    pub(super) offset: usize,
    pub(super) selected: Option<usize>,
    pub(super) ensure_selected_in_view_on_next_render: bool,
}

impl TreeState {
    #[must_use]
    pub const fn get_offset(&self) -> usize {
        self.offset
    }

    #[must_use]
    pub const fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Selects the given row.
    ///
    /// Returns `true` when the selection changed.
    ///
    /// Clear the selection by passing `None`:
    ///
    /// ```rust
    /// # use tui_index_tree::TreeState;
    /// # let mut state = TreeState::default();
    /// state.select(None);
    /// ```
    pub fn select(&mut self, index: Option<usize>) -> bool {
        self.ensure_selected_in_view_on_next_render = true;
        let changed = self.selected != index;
        self.selected = index;
        changed
    }

    /// Select the first row.
    ///
    /// Returns `true` when the selection changed.
    pub fn select_first<T>(&mut self, rows: &[TreeRow<T>]) -> bool {
        self.select((!rows.is_empty()).then_some(0))
    }

    /// Select the last row.
    ///
    /// Returns `true` when the selection changed.
    pub fn select_last<T>(&mut self, rows: &[TreeRow<T>]) -> bool {
        self.select(rows.len().checked_sub(1))
    }

    /// Select the row on the given index, clamped to the existing rows.
    ///
    /// Returns `true` when the selection changed.
    ///
    /// This can be useful for mouse clicks.
    pub fn select_visible_index<T>(&mut self, rows: &[TreeRow<T>], new_index: usize) -> bool {
        self.select_visible_relative(rows, |_| new_index)
    }

    /// Move the current selection with the direction/amount by the given function.
    ///
    /// Returns `true` when the selection changed.
    ///
    /// # Example
    ///
    /// ```
    /// # use tui_index_tree::{TreeRow, TreeState};
    /// # let rows: Vec<TreeRow<&str>> = Vec::new();
    /// # let mut state = TreeState::default();
    /// // Move the selection one down
    /// state.select_visible_relative(&rows, |current| {
    ///     current.map_or(0, |current| current.saturating_add(1))
    /// });
    /// ```
    pub fn select_visible_relative<T, F>(&mut self, rows: &[TreeRow<T>], change_function: F) -> bool
    where
        F: FnOnce(Option<usize>) -> usize,
    {
        let current = self.selected.filter(|index| *index < rows.len());
        let new_index = rows
            .len()
            .checked_sub(1)
            .map(|last| change_function(current).min(last));
        self.select(new_index)
    }

    /// Ensure the selected row is visible on next render
    pub fn scroll_selected_into_view(&mut self) {
        self.ensure_selected_in_view_on_next_render = true;
    }

    /// Scroll the specified amount of lines up
    ///
    /// Returns `true` when the scroll position changed.
    /// Returns `false` when the scrolling has reached the top.
    pub fn scroll_up(&mut self, lines: usize) -> bool {
        let before = self.offset;
        self.offset = self.offset.saturating_sub(lines);
        before != self.offset
    }

    /// Scroll the specified amount of lines down
    ///
    /// In contrast to [`scroll_up()`](Self::scroll_up) this can not return whether the view position changed or not as the actual change is determined on render.
    /// Always returns `true`.
    pub fn scroll_down(&mut self, lines: usize) -> bool {
        self.offset = self.offset.saturating_add(lines);
        true
    }

    /// Handles the up arrow key.
    ///
    /// Returns `true` when the selection changed.
    pub fn key_up<T>(&mut self, rows: &[TreeRow<T>]) -> bool {
        self.select_visible_relative(rows, |current| {
            current.map_or(usize::MAX, |current| current.saturating_sub(1))
        })
    }

    /// Handles the down arrow key.
    ///
    /// Returns `true` when the selection changed.
    pub fn key_down<T>(&mut self, rows: &[TreeRow<T>]) -> bool {
        self.select_visible_relative(rows, |current| {
            current.map_or(0, |current| current.saturating_add(1))
        })
    }

    /// Collapses or expands the selected node.
    ///
    /// Returns `true` when the collapsed state changed.
    pub fn toggle_selected<T, S>(&mut self, model: &mut IndexTreeModel<T, S>) -> bool
    where
        T: Clone,
        S: Spliceable<TreeRow<T>> + AsRef<[TreeRow<T>]>,
    {
        self.ensure_selected_in_view_on_next_render = true;
        let Some((location, _)) = self.selected_location(model) else {
            return false;
        };
        model.toggle_collapsed(&location).is_ok()
    }

    /// Handles the left arrow key.
    /// Collapses the selected node or moves to its parent.
    ///
    /// Returns `true` when the selection or the collapsed state changed.
    pub fn key_left<T, S>(&mut self, model: &mut IndexTreeModel<T, S>) -> bool
    where
        T: Clone,
        S: Spliceable<TreeRow<T>> + AsRef<[TreeRow<T>]>,
    {
        self.ensure_selected_in_view_on_next_render = true;
        let Some((location, expanded)) = self.selected_location(model) else {
            return false;
        };
        if expanded {
            return model.set_collapsed(&location, true).unwrap_or(false);
        }
        let parent = &location[..location.len() - 1];
        if parent.is_empty() {
            return false;
        }
        match model.get_list_index(parent) {
            Ok(Some(index)) => self.select(Some(index)),
            _ => false,
        }
    }

    /// Handles the right arrow key.
    /// Expands the selected node.
    ///
    /// Returns `true` if the node was collapsed and has been expanded.
    pub fn key_right<T, S>(&mut self, model: &mut IndexTreeModel<T, S>) -> bool
    where
        T: Clone,
        S: Spliceable<TreeRow<T>> + AsRef<[TreeRow<T>]>,
    {
        self.ensure_selected_in_view_on_next_render = true;
        let Some((location, _)) = self.selected_location(model) else {
            return false;
        };
        model.set_collapsed(&location, false).unwrap_or(false)
    }

    /// Location of the selected row and whether it is an expanded node with children.
    fn selected_location<T, S>(&self, model: &IndexTreeModel<T, S>) -> Option<(Vec<usize>, bool)>
    where
        T: Clone,
        S: Spliceable<TreeRow<T>> + AsRef<[TreeRow<T>]>,
    {
        let row = model.sink().as_ref().get(self.selected?)?;
        let node = model.get_node_by_id(row.node).ok()?;
        let expanded = !node.collapsed && node.children > 0;
        let location = model.get_node_location(row.node).ok()?;
        Some((location, expanded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TreeElement, Visibility};

    fn model() -> Model {
        let mut model = IndexTreeModel::new(Vec::new());
        model.splice(&[0], 0, TreeElement::example()).unwrap();
        model.set_collapsed(&[0, 2], true).unwrap();
        model
    }

    type Model = IndexTreeModel<&'static str, Vec<TreeRow<&'static str>>>;

    fn selected_element(state: &TreeState, model: &Model) -> Option<&'static str> {
        state
            .selected()
            .and_then(|index| model.sink().get(index))
            .map(|row| row.element)
    }

    #[test]
    fn key_down_and_up_move_through_rows() {
        let model = model();
        let mut state = TreeState::default();
        assert!(state.key_down(model.sink()));
        assert_eq!(state.selected(), Some(0));
        for _ in 0..10 {
            state.key_down(model.sink());
        }
        assert_eq!(selected_element(&state, &model), Some("gulpfile.js"));
        assert!(state.key_up(model.sink()));
        assert_eq!(selected_element(&state, &model), Some("lib"));
    }

    #[test]
    fn key_up_without_selection_selects_last() {
        let model = model();
        let mut state = TreeState::default();
        assert!(state.key_up(model.sink()));
        assert_eq!(state.selected(), Some(model.len() - 1));
    }

    #[test]
    fn select_on_empty_rows_clears() {
        let rows: Vec<TreeRow<&str>> = Vec::new();
        let mut state = TreeState::default();
        state.select(Some(3));
        assert!(state.select_last(&rows));
        assert_eq!(state.selected(), None);
        assert!(!state.select_first(&rows));
    }

    #[test]
    fn select_visible_index_clamps() {
        let model = model();
        let mut state = TreeState::default();
        assert!(state.select_visible_index(model.sink(), 100));
        assert_eq!(selected_element(&state, &model), Some("gulpfile.js"));
    }

    #[test]
    fn key_right_expands_selected() {
        let mut model = model();
        let mut state = TreeState::default();
        state.select(Some(3));
        assert_eq!(selected_element(&state, &model), Some("github"));
        assert!(state.key_right(&mut model));
        assert_eq!(model.len(), 10);
        assert!(!state.key_right(&mut model));
    }

    #[test]
    fn key_left_collapses_then_moves_to_parent() {
        let mut model = model();
        let mut state = TreeState::default();
        state.select(Some(5));
        assert_eq!(selected_element(&state, &model), Some("lib"));

        assert!(state.key_left(&mut model));
        assert_eq!(selected_element(&state, &model), Some("build"));

        assert!(state.key_left(&mut model));
        assert_eq!(selected_element(&state, &model), Some("build"));
        assert!(model.is_collapsed(&[0, 3]).unwrap());

        assert!(state.key_left(&mut model));
        assert_eq!(selected_element(&state, &model), Some("vscode"));

        assert!(state.key_left(&mut model));
        assert_eq!(model.len(), 1);
        assert!(!state.key_left(&mut model));
    }

    #[test]
    fn key_left_collapses_node_with_hidden_children() {
        let mut model = IndexTreeModel::with_filter(Vec::new(), |element: &&'static str| {
            if ["calendar.yml", "endgame", "build.js"].contains(element) {
                Visibility::Hidden
            } else {
                Visibility::Visible
            }
        });
        model.splice(&[0], 0, TreeElement::example()).unwrap();
        let mut state = TreeState::default();
        state.select(Some(3));
        assert_eq!(model.sink()[3].element, "github");
        assert!(!model.sink()[3].collapsed);

        assert!(state.key_left(&mut model));
        assert_eq!(state.selected(), Some(3));
        assert!(model.is_collapsed(&[0, 2]).unwrap());
        assert!(model.sink()[3].collapsed);

        assert!(state.key_left(&mut model));
        assert_eq!(state.selected(), Some(0));
    }

    #[test]
    fn toggle_selected_flips_collapsed() {
        let mut model = model();
        let mut state = TreeState::default();
        assert!(!state.toggle_selected(&mut model));
        state.select(Some(0));
        assert!(state.toggle_selected(&mut model));
        assert_eq!(model.len(), 1);
        assert!(state.toggle_selected(&mut model));
        assert_eq!(model.len(), 7);
    }

    #[test]
    fn scroll() {
        let mut state = TreeState::default();
        assert!(!state.scroll_up(1));
        assert!(state.scroll_down(4));
        assert!(state.scroll_up(1));
        assert_eq!(state.get_offset(), 3);
    }
}
