#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]

/*!
Tree model which projects a collapsible and filterable tree onto a flat list of visible rows.

The [`IndexTreeModel`] owns the tree and keeps an output sink (anything [`Spliceable`], for example a `Vec<TreeRow<T>>`) in sync with it.
Every change to the tree (splicing children, collapsing, expanding or refiltering) is reflected by exactly one incremental splice of the rows.
Nodes are addressed by their location, the indices of the siblings from the top level down to the node.

The rows can be rendered with the [`Tree`] widget, the user interaction state (scroll position and selection) is stored in the [`TreeState`].
*/

use std::fmt::Display;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Scrollbar, ScrollbarState, StatefulWidget, Widget};
use unicode_width::UnicodeWidthStr;

mod error;
mod flatten;
pub mod location;
mod model;
mod node;
mod sink;
mod tree_element;
mod tree_state;
mod visibility;

pub use crate::error::{LocationReason, TreeError};
pub use crate::model::{IndexTreeModel, TreeNode};
pub use crate::node::NodeId;
pub use crate::sink::{Spliceable, TreeRow};
pub use crate::tree_element::TreeElement;
pub use crate::tree_state::TreeState;
pub use crate::visibility::{TreeFilter, Visibility};

/// A `Tree` which renders the rows of an [`IndexTreeModel`].
///
/// # Example
///
/// ```
/// # use tui_index_tree::{IndexTreeModel, Tree, TreeElement, TreeRow, TreeState};
/// # use ratatui::backend::TestBackend;
/// # use ratatui::Terminal;
/// # use ratatui::widgets::Block;
/// # let mut terminal = Terminal::new(TestBackend::new(32, 32)).unwrap();
/// let mut state = TreeState::default();
/// let mut model = IndexTreeModel::new(Vec::<TreeRow<&str>>::new());
/// model.splice(&[0], 0, [TreeElement::new_leaf("leaf")]).expect("empty model has index 0");
///
/// terminal.draw(|frame| {
///     let area = frame.size();
///
///     let tree_widget = Tree::new(model.sink())
///         .block(Block::bordered().title("Tree Widget"));
///
///     frame.render_stateful_widget(tree_widget, area, &mut state);
/// })?;
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Tree<'a, T> {
    rows: &'a [TreeRow<T>],

    block: Option<Block<'a>>,
    scrollbar: Option<Scrollbar<'a>>,
    /// Style used as a base style for the widget
    style: Style,

    /// Style used to render selected row
    highlight_style: Style,
    /// Symbol in front of the selected row (Shift all rows to the right)
    highlight_symbol: &'a str,

    /// Symbol displayed in front of a collapsed node
    node_closed_symbol: &'a str,
    /// Symbol displayed in front of an expanded node with rendered children
    node_open_symbol: &'a str,
    /// Symbol displayed in front of a node without rendered children.
    node_no_children_symbol: &'a str,
}

impl<'a, T> Tree<'a, T> {
    #[must_use]
    pub const fn new(rows: &'a [TreeRow<T>]) -> Self {
        Self {
            rows,
            block: None,
            scrollbar: None,
            style: Style::new(),
            highlight_style: Style::new(),
            highlight_symbol: "",
            node_closed_symbol: "\u{25b6} ", // Arrow to right
            node_open_symbol: "\u{25bc} ",   // Arrow down
            node_no_children_symbol: "  ",
        }
    }

    #[allow(clippy::missing_const_for_fn)]
    #[must_use]
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Show the scrollbar when rendering this widget.
    ///
    /// Experimental: Can change on any release without any additional notice.
    #[must_use]
    pub const fn experimental_scrollbar(mut self, scrollbar: Option<Scrollbar<'a>>) -> Self {
        self.scrollbar = scrollbar;
        self
    }

    #[must_use]
    pub const fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub const fn highlight_style(mut self, style: Style) -> Self {
        self.highlight_style = style;
        self
    }

    #[must_use]
    pub const fn highlight_symbol(mut self, highlight_symbol: &'a str) -> Self {
        self.highlight_symbol = highlight_symbol;
        self
    }

    #[must_use]
    pub const fn node_closed_symbol(mut self, symbol: &'a str) -> Self {
        self.node_closed_symbol = symbol;
        self
    }

    #[must_use]
    pub const fn node_open_symbol(mut self, symbol: &'a str) -> Self {
        self.node_open_symbol = symbol;
        self
    }

    #[must_use]
    pub const fn node_no_children_symbol(mut self, symbol: &'a str) -> Self {
        self.node_no_children_symbol = symbol;
        self
    }

    fn twistie(&self, index: usize) -> &'a str {
        let row = &self.rows[index];
        if row.collapsed {
            self.node_closed_symbol
        } else if self
            .rows
            .get(index + 1)
            .is_some_and(|next| next.depth > row.depth)
        {
            self.node_open_symbol
        } else {
            self.node_no_children_symbol
        }
    }
}

impl<'a, T> StatefulWidget for Tree<'a, T>
where
    T: Display,
{
    type State = TreeState;

    #[allow(clippy::too_many_lines)]
    fn render(self, full_area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        buf.set_style(full_area, self.style);

        // Get the inner area inside a possible block, otherwise use the full area
        let area = self.block.as_ref().map_or(full_area, |block| {
            let inner_area = block.inner(full_area);
            block.clone().render(full_area, buf);
            inner_area
        });

        if area.width < 1 || area.height < 1 {
            return;
        }

        let rows = self.rows;
        if rows.is_empty() {
            return;
        }
        let available_height = area.height as usize;

        let ensure_index_in_view = if state.ensure_selected_in_view_on_next_render {
            state.selected.filter(|index| *index < rows.len())
        } else {
            None
        };

        // Ensure last line is still visible
        let mut start = state.offset.min(rows.len().saturating_sub(1));

        if let Some(ensure_index_in_view) = ensure_index_in_view {
            start = start.min(ensure_index_in_view);
        }

        let mut end = start.saturating_add(available_height).min(rows.len());

        if let Some(ensure_index_in_view) = ensure_index_in_view {
            if ensure_index_in_view >= end {
                end = ensure_index_in_view + 1;
                start = end.saturating_sub(available_height);
            }
        }
        let height = end - start;

        state.offset = start;
        state.ensure_selected_in_view_on_next_render = false;

        if let Some(scrollbar) = &self.scrollbar {
            let mut scrollbar_state = ScrollbarState::new(rows.len().saturating_sub(height))
                .position(start)
                .viewport_content_length(height);
            let scrollbar_area = Rect {
                // Inner height to be exactly as the content
                y: area.y,
                height: area.height,
                // Outer width to stay on the right border
                x: full_area.x,
                width: full_area.width,
            };
            scrollbar
                .clone()
                .render(scrollbar_area, buf, &mut scrollbar_state);
        }

        let blank_symbol = " ".repeat(self.highlight_symbol.width());
        let has_selection = state.selected.is_some();

        #[allow(clippy::cast_possible_truncation)]
        for (index, row) in rows.iter().enumerate().take(end).skip(start) {
            let x = area.x;
            let y = area.y + (index - start) as u16;
            let row_area = Rect {
                x,
                y,
                width: area.width,
                height: 1,
            };

            let is_selected = state.selected == Some(index);
            let after_highlight_symbol_x = if has_selection {
                let symbol = if is_selected {
                    self.highlight_symbol
                } else {
                    &blank_symbol
                };
                let (x, _) = buf.set_stringn(x, y, symbol, area.width as usize, self.style);
                x
            } else {
                x
            };

            let after_depth_x = {
                let indent_width = row.depth.saturating_sub(1) * 2;
                let max_width = area.width.saturating_sub(after_highlight_symbol_x - x);
                let (after_indent_x, _) = buf.set_stringn(
                    after_highlight_symbol_x,
                    y,
                    " ".repeat(indent_width),
                    indent_width.min(max_width as usize),
                    self.style,
                );
                let max_width = area.width.saturating_sub(after_indent_x - x);
                let (x, _) = buf.set_stringn(
                    after_indent_x,
                    y,
                    self.twistie(index),
                    max_width as usize,
                    self.style,
                );
                x
            };

            let max_element_width = area.width.saturating_sub(after_depth_x - x);
            buf.set_stringn(
                after_depth_x,
                y,
                row.element.to_string(),
                max_element_width as usize,
                self.style,
            );
            if is_selected {
                buf.set_style(row_area, self.highlight_style);
            }
        }
    }
}

impl<'a, T> Widget for Tree<'a, T>
where
    T: Display,
{
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut state = TreeState::default();
        StatefulWidget::render(self, area, buf, &mut state);
    }
}
