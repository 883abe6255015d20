/*! Captured view hierarchy.
 *
 * A [`Snapshot`] is an immutable copy of the element tree of a user interface at one point in time.
 * Capturing it is up to the caller, this module only describes its shape and how a single
 * [`Element`] is shown as a row.
 */

use std::borrow::Cow;

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use unicode_width::UnicodeWidthStr;

use crate::{Tree, TreeDataSource};

const LABEL: Style = Style::new().add_modifier(Modifier::BOLD);
const FRAME: Style = Style::new().fg(Color::DarkGray);
const HIDDEN_COUNT: Style = Style::new().fg(Color::Yellow);

/// Position and size of an [`Element`] in points, relative to its parent.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Frame {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

impl std::fmt::Display for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}, {}×{})",
            self.x, self.y, self.width, self.height
        )
    }
}

/// Descriptor of one element of a user interface, like a view or a layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    label: String,
    frame: Frame,
    children: Vec<Self>,
}

impl Element {
    /// Create a new `Element` without children.
    #[must_use]
    pub fn new<L>(label: L, frame: Frame) -> Self
    where
        L: Into<String>,
    {
        Self {
            label: label.into(),
            frame,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<Self>) -> Self {
        self.children = children;
        self
    }

    pub fn add_child(&mut self, child: Self) {
        self.children.push(child);
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub const fn frame(&self) -> Frame {
        self.frame
    }

    /// Get a reference to a child by index.
    #[must_use]
    pub fn child(&self, index: usize) -> Option<&Self> {
        self.children.get(index)
    }
}

impl Tree for Element {
    fn children(&self) -> impl Iterator<Item = &Self> {
        self.children.iter()
    }
}

/// Element hierarchy captured at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    root: Element,
}

impl Snapshot {
    #[must_use]
    pub const fn new(root: Element) -> Self {
        Self { root }
    }

    #[must_use]
    pub const fn root(&self) -> &Element {
        &self.root
    }

    /// Rows of the whole hierarchy, everything expanded.
    #[must_use]
    pub fn data_source(&self) -> TreeDataSource<'_, Element> {
        TreeDataSource::new(&self.root)
    }
}

/// Row for an [`Element`] to be used as the row factory of a [`Hierarchy`](crate::Hierarchy).
///
/// Shows the label followed by the frame.
/// The frame is left out when the row would not fit into `surface` otherwise.
/// Collapsed elements show how many direct children they hide.
#[must_use]
pub fn row(surface: Rect, element: &Element, depth: usize, is_collapsed: bool) -> Text<'_> {
    let mut spans = vec![Span::styled(element.label(), LABEL)];

    if is_collapsed && !element.children.is_empty() {
        spans.push(Span::styled(
            Cow::Owned(format!(" +{}", element.children.len())),
            HIDDEN_COUNT,
        ));
    }

    let frame = format!(" {}", element.frame);
    // Indentation and node symbol take about two columns per depth level
    let used = depth * 2 + 2 + spans.iter().map(|span| span.content.width()).sum::<usize>();
    if used + frame.width() <= surface.width as usize {
        spans.push(Span::styled(frame, FRAME));
    }

    Text::from(Line::from(spans))
}

impl Element {
    /// Small hierarchy of a phone screen.
    #[cfg(test)]
    pub(crate) fn example() -> Self {
        let title = Element::new("UILabel", Frame::new(16.0, 12.0, 200.0, 20.0));
        let close = Element::new("UIButton", Frame::new(340.0, 8.0, 34.0, 28.0));
        let bar = Element::new("UINavigationBar", Frame::new(0.0, 47.0, 390.0, 44.0))
            .with_children(vec![title, close]);
        let table = Element::new("UITableView", Frame::new(0.0, 91.0, 390.0, 753.0));
        Element::new("UIWindow", Frame::new(0.0, 0.0, 390.0, 844.0)).with_children(vec![bar, table])
    }
}

#[test]
fn frame_display() {
    let frame = Frame::new(0.0, 47.5, 390.0, 44.0);
    assert_eq!(frame.to_string(), "(0, 47.5, 390×44)");
}

#[test]
fn snapshot_data_source_contains_every_element() {
    let snapshot = Snapshot::new(Element::example());
    let source = snapshot.data_source();
    let labels = source
        .visible()
        .map(|record| (record.depth, record.value.label()))
        .collect::<Vec<_>>();
    assert_eq!(
        labels,
        [
            (0, "UIWindow"),
            (1, "UINavigationBar"),
            (2, "UILabel"),
            (2, "UIButton"),
            (1, "UITableView"),
        ]
    );
}

#[test]
fn add_child_appends() {
    let mut root = Element::new("root", Frame::default());
    root.add_child(Element::new("first", Frame::default()));
    root.add_child(Element::new("second", Frame::default()));
    assert_eq!(root.child(1).map(Element::label), Some("second"));
    assert_eq!(root.child(2), None);
}

#[cfg(test)]
fn row_text(width: u16, element: &Element, depth: usize, is_collapsed: bool) -> String {
    let text = row(Rect::new(0, 0, width, 1), element, depth, is_collapsed);
    text.lines[0]
        .spans
        .iter()
        .map(|span| span.content.as_ref())
        .collect()
}

#[test]
fn row_shows_frame_when_it_fits() {
    let element = Element::new("UIView", Frame::new(1.0, 2.0, 3.0, 4.0));
    assert_eq!(row_text(40, &element, 0, false), "UIView (1, 2, 3×4)");
}

#[test]
fn row_omits_frame_when_too_narrow() {
    let element = Element::new("UIView", Frame::new(1.0, 2.0, 3.0, 4.0));
    assert_eq!(row_text(12, &element, 1, false), "UIView");
}

#[test]
fn row_shows_hidden_children_when_collapsed() {
    let element = Element::example();
    assert_eq!(row_text(10, &element, 0, true), "UIWindow +2");
    assert_eq!(row_text(10, &element, 0, false), "UIWindow");
}
