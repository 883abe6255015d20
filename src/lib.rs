#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]

/*!
Collapsible outline of a view hierarchy.

Any recursive data structure implementing [`Tree`] is flattened once into depth annotated records by a [`TreeDataSource`].
The data source answers how many rows are visible and what is shown in each of them and keeps track of which rows are collapsed.
The [`Hierarchy`] widget renders these rows, the user interaction state (like the current selection) is stored in the [`HierarchyState`].

[`Snapshot`] and [`Element`] describe a captured user interface hierarchy which can be shown this way.
*/

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Text;
use ratatui::widgets::{Block, Scrollbar, ScrollbarState, StatefulWidget, Widget};
use unicode_width::UnicodeWidthStr;

mod data_source;
mod error;
mod flatten;
pub mod snapshot;
mod state;
mod third_party;
mod tree;

pub use crate::data_source::TreeDataSource;
pub use crate::error::{Error, Result};
pub use crate::flatten::{flatten, Flattened};
pub use crate::snapshot::{Element, Frame, Snapshot};
pub use crate::state::HierarchyState;
#[cfg(feature = "json")]
pub use crate::third_party::json;
pub use crate::tree::Tree;

/// A list of the visible rows of a [`TreeDataSource`] which can be rendered.
///
/// Each row is built by the row factory from the surface the list is rendered on, the node, its depth and whether it is collapsed.
/// It is indented by its depth and prefixed with a symbol showing whether it is collapsed.
///
/// # Example
///
/// ```
/// # use tui_view_hierarchy::{snapshot, Element, Frame, Hierarchy, HierarchyState, TreeDataSource};
/// # use ratatui::backend::TestBackend;
/// # use ratatui::Terminal;
/// # use ratatui::widgets::Block;
/// # let mut terminal = Terminal::new(TestBackend::new(32, 32)).unwrap();
/// let root = Element::new("UIWindow", Frame::new(0.0, 0.0, 390.0, 844.0));
/// let source = TreeDataSource::new(&root);
/// let mut state = HierarchyState::default();
///
/// terminal.draw(|frame| {
///     let area = frame.size();
///
///     let widget = Hierarchy::new(&source, snapshot::row)
///         .block(Block::bordered().title("Hierarchy"));
///
///     frame.render_stateful_widget(widget, area, &mut state);
/// })?;
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Hierarchy<'a, T, F> {
    source: &'a TreeDataSource<'a, T>,
    row_factory: F,

    block: Option<Block<'a>>,
    scrollbar: Option<Scrollbar<'a>>,
    /// Style used as a base style for the widget
    style: Style,

    /// Style used to render selected row
    highlight_style: Style,
    /// Symbol in front of the selected row (Shift all rows to the right)
    highlight_symbol: &'a str,

    /// Symbol displayed in front of a collapsed node (As in the children are currently not visible)
    node_closed_symbol: &'a str,
    /// Symbol displayed in front of an expanded node. (As in the children are currently visible)
    node_open_symbol: &'a str,
    /// Symbol displayed in front of a node without children.
    node_no_children_symbol: &'a str,
}

impl<'a, T, F> Hierarchy<'a, T, F>
where
    F: Fn(Rect, &'a T, usize, bool) -> Text<'a>,
{
    /// Create a new `Hierarchy` showing the visible rows of `source`.
    ///
    /// `row_factory` builds the content of each row.
    #[must_use]
    pub const fn new(source: &'a TreeDataSource<'a, T>, row_factory: F) -> Self {
        Self {
            source,
            row_factory,
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
    #[allow(clippy::missing_const_for_fn)]
    #[must_use]
    pub fn scrollbar(mut self, scrollbar: Option<Scrollbar<'a>>) -> Self {
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
}

impl<'a, T, F> StatefulWidget for Hierarchy<'a, T, F>
where
    F: Fn(Rect, &'a T, usize, bool) -> Text<'a>,
{
    type State = HierarchyState;

    #[allow(clippy::too_many_lines)]
    fn render(self, full_area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        buf.set_style(full_area, self.style);

        // Get the inner area inside a possible block, otherwise use the full area
        let area = self.block.map_or(full_area, |block| {
            let inner_area = block.inner(full_area);
            block.render(full_area, buf);
            inner_area
        });

        if area.width < 1 || area.height < 1 {
            return;
        }

        let source = self.source;
        let row_count = source.row_count();
        if row_count == 0 {
            return;
        }
        let available_height = area.height as usize;

        // Rows are only built when they are needed, the list can be way longer than the area
        let row_factory = &self.row_factory;
        let cell = |row: usize| source.cell_for_row(area, row, row_factory);
        let row_height = |row: usize| cell(row).map_or(1, |text| text.height().max(1));

        let selected_row = state.selected_row(source);
        let ensure_index_in_view = if state.ensure_selected_in_view_on_next_render {
            selected_row
        } else {
            None
        };

        // Ensure last line is still visible
        let mut start = state.offset.min(row_count.saturating_sub(1));

        if let Some(ensure_index_in_view) = ensure_index_in_view {
            start = start.min(ensure_index_in_view);
        }

        let mut end = start;
        let mut height = 0;
        for item_height in (start..row_count).map(&row_height) {
            if height + item_height > available_height {
                break;
            }
            height += item_height;
            end += 1;
        }

        if let Some(ensure_index_in_view) = ensure_index_in_view {
            while ensure_index_in_view >= end {
                height += row_height(end);
                end += 1;
                while height > available_height {
                    height = height.saturating_sub(row_height(start));
                    start += 1;
                }
            }
        }

        state.offset = start;
        state.ensure_selected_in_view_on_next_render = false;

        if let Some(scrollbar) = self.scrollbar {
            let mut scrollbar_state = ScrollbarState::new(row_count.saturating_sub(height))
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
            scrollbar.render(scrollbar_area, buf, &mut scrollbar_state);
        }

        let blank_symbol = " ".repeat(self.highlight_symbol.width());

        let mut current_height = 0;
        let has_selection = selected_row.is_some();
        #[allow(clippy::cast_possible_truncation)]
        for row in start..end {
            let (Ok(record), Ok(text)) = (source.record_at(row), cell(row)) else {
                break;
            };

            let x = area.x;
            let y = area.y + current_height;
            let height = text.height().max(1) as u16;
            current_height += height;

            let area = Rect {
                x,
                y,
                width: area.width,
                height: height.min(area.bottom().saturating_sub(y)),
            };

            buf.set_style(area, self.style);

            let is_selected = selected_row == Some(row);
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
                let indent_width = record.depth * 2;
                let (after_indent_x, _) = buf.set_stringn(
                    after_highlight_symbol_x,
                    y,
                    " ".repeat(indent_width),
                    indent_width,
                    self.style,
                );
                let symbol = if !record.has_children() {
                    self.node_no_children_symbol
                } else if record.is_collapsed() {
                    self.node_closed_symbol
                } else {
                    self.node_open_symbol
                };
                let max_width = area.width.saturating_sub(after_indent_x - x);
                let (x, _) =
                    buf.set_stringn(after_indent_x, y, symbol, max_width as usize, self.style);
                x
            };

            let max_element_width = area.width.saturating_sub(after_depth_x - x);
            for (j, line) in text.lines.iter().enumerate().take(area.height as usize) {
                buf.set_line(after_depth_x, y + j as u16, line, max_element_width);
            }
            if is_selected {
                buf.set_style(area, self.highlight_style);
            }
        }
    }
}

impl<'a, T, F> Widget for Hierarchy<'a, T, F>
where
    F: Fn(Rect, &'a T, usize, bool) -> Text<'a>,
{
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut state = HierarchyState::default();
        StatefulWidget::render(self, area, buf, &mut state);
    }
}

#[cfg(test)]
use crate::tree::test_node::Node;

#[cfg(test)]
fn render_small(
    source: &TreeDataSource<'_, Node>,
    state: &mut HierarchyState,
    width: u16,
    height: u16,
) -> Buffer {
    let area = Rect::new(0, 0, width, height);
    let mut buffer = Buffer::empty(area);
    let widget = Hierarchy::new(source, |_, node: &Node, _, _| Text::raw(node.name));
    StatefulWidget::render(widget, area, &mut buffer, state);
    buffer
}

#[test]
fn renders_indented_rows() {
    let root = Node::small();
    let source = TreeDataSource::new(&root);
    let buffer = render_small(&source, &mut HierarchyState::default(), 8, 5);
    let expected = Buffer::with_lines(vec![
        "\u{25bc} a     ",
        "  \u{25bc} b   ",
        "      c ",
        "    d   ",
        "        ",
    ]);
    assert_eq!(buffer, expected);
}

#[test]
fn renders_collapsed_symbol() {
    let root = Node::small();
    let mut source = TreeDataSource::new(&root);
    source.toggle_collapsed(1).unwrap();
    let buffer = render_small(&source, &mut HierarchyState::default(), 8, 4);
    let expected = Buffer::with_lines(vec![
        "\u{25bc} a     ",
        "  \u{25b6} b   ",
        "    d   ",
        "        ",
    ]);
    assert_eq!(buffer, expected);
}

#[test]
fn scrolls_selected_into_view() {
    let root = Node::example();
    let source = TreeDataSource::new(&root);
    let mut state = HierarchyState::default();
    state.select_last(&source);
    let buffer = render_small(&source, &mut state, 8, 3);
    assert_eq!(state.get_offset(), 6);
    // f is indented too deep to fit
    let expected = Buffer::with_lines(vec!["        ", "      g ", "    h   "]);
    assert_eq!(buffer, expected);
}

#[test]
fn renders_highlight_symbol_for_selection() {
    let root = Node::small();
    let source = TreeDataSource::new(&root);
    let mut state = HierarchyState::default();
    state.select_visible_index(&source, 3);

    let area = Rect::new(0, 0, 9, 4);
    let mut buffer = Buffer::empty(area);
    let widget =
        Hierarchy::new(&source, |_, node: &Node, _, _| Text::raw(node.name)).highlight_symbol(">");
    StatefulWidget::render(widget, area, &mut buffer, &mut state);

    let expected = Buffer::with_lines(vec![
        " \u{25bc} a     ",
        "   \u{25bc} b   ",
        "       c ",
        ">    d   ",
    ]);
    assert_eq!(buffer, expected);
}

#[test]
fn row_factory_gets_depth_and_collapsed_state() {
    let root = Node::small();
    let mut source = TreeDataSource::new(&root);
    source.toggle_collapsed(1).unwrap();

    let area = Rect::new(0, 0, 12, 3);
    let mut buffer = Buffer::empty(area);
    let widget = Hierarchy::new(&source, |_, node: &Node, depth, is_collapsed| {
        Text::raw(format!("{}{depth}{}", node.name, u8::from(is_collapsed)))
    })
    .node_open_symbol("")
    .node_closed_symbol("")
    .node_no_children_symbol("");
    Widget::render(widget, area, &mut buffer);

    let expected = Buffer::with_lines(vec!["a00         ", "  b11       ", "  d10       "]);
    assert_eq!(buffer, expected);
}
