/*! JSON documents as trees.
 *
 * Arrays have their items as children, objects their values in document order.
 * Everything else is a leaf.
 */

use std::borrow::Cow;

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};
use serde_json::Value;

use crate::Tree;

impl Tree for Value {
    fn children(&self) -> impl Iterator<Item = &Self> {
        let (array, object) = match self {
            Self::Array(array) => (Some(array.iter()), None),
            Self::Object(object) => (None, Some(object.values())),
            Self::Null | Self::Bool(_) | Self::Number(_) | Self::String(_) => (None, None),
        };
        array
            .into_iter()
            .flatten()
            .chain(object.into_iter().flatten())
    }
}

fn get_value_span(value: &Value, is_collapsed: bool) -> Span {
    use super::common::{BOOL, NULL, NUMBER, STRING};

    match value {
        Value::Array(array) if array.is_empty() => Span {
            content: Cow::Borrowed("[]"),
            style: Style::new(),
        },
        Value::Array(_) if is_collapsed => Span {
            content: Cow::Borrowed("[…]"),
            style: Style::new(),
        },
        Value::Array(_) => Span {
            content: Cow::Borrowed("["),
            style: Style::new(),
        },
        Value::Object(object) if object.is_empty() => Span {
            content: Cow::Borrowed("{}"),
            style: Style::new(),
        },
        Value::Object(_) if is_collapsed => Span {
            content: Cow::Borrowed("{…}"),
            style: Style::new(),
        },
        Value::Object(_) => Span {
            content: Cow::Borrowed("{"),
            style: Style::new(),
        },
        Value::Null => Span {
            content: Cow::Borrowed("null"),
            style: NULL,
        },
        Value::Bool(true) => Span {
            content: Cow::Borrowed("true"),
            style: BOOL,
        },
        Value::Bool(false) => Span {
            content: Cow::Borrowed("false"),
            style: BOOL,
        },
        Value::Number(number) => Span {
            content: Cow::Owned(number.to_string()),
            style: NUMBER,
        },
        Value::String(string) => Span {
            content: Cow::Borrowed(string),
            style: STRING,
        },
    }
}

/// Row for a JSON [`Value`] to be used as the row factory of a [`Hierarchy`](crate::Hierarchy).
///
/// Collapsed arrays and objects show how many children they hide.
#[must_use]
pub fn row(_surface: Rect, value: &Value, _depth: usize, is_collapsed: bool) -> Text<'_> {
    let mut spans = vec![get_value_span(value, is_collapsed)];
    let hidden = match value {
        Value::Array(array) => array.len(),
        Value::Object(object) => object.len(),
        _ => 0,
    };
    if is_collapsed && hidden > 0 {
        spans.push(Span::styled(format!(" {hidden}"), super::common::COUNT));
    }
    Text::from(Line::from(spans))
}

#[cfg(test)]
fn example() -> Value {
    serde_json::json!({
        "window": {
            "label": "UIWindow",
            "subviews": [
                { "label": "UIButton", "enabled": true },
                { "label": "UILabel", "text": null }
            ]
        },
        "scale": 3
    })
}

#[cfg(test)]
fn row_text(value: &Value, is_collapsed: bool) -> String {
    row(Rect::default(), value, 0, is_collapsed).lines[0]
        .spans
        .iter()
        .map(|span| span.content.as_ref())
        .collect()
}

#[test]
fn children_keep_document_order() {
    let value = example();
    let source = crate::TreeDataSource::new(&value);
    let rows = source
        .visible()
        .map(|record| (record.depth, row_text(record.value, false)))
        .collect::<Vec<_>>();
    let expected = [
        (0, "{"),
        (1, "{"),
        (2, "UIWindow"),
        (2, "["),
        (3, "{"),
        (4, "UIButton"),
        (4, "true"),
        (3, "{"),
        (4, "UILabel"),
        (4, "null"),
        (1, "3"),
    ];
    let expected = expected
        .into_iter()
        .map(|(depth, text)| (depth, text.to_owned()))
        .collect::<Vec<_>>();
    assert_eq!(rows, expected);
}

#[test]
fn scalars_are_leafs() {
    assert!(Value::Null.is_leaf());
    assert!(serde_json::json!("string").is_leaf());
    assert!(serde_json::json!([]).is_leaf());
    assert!(!serde_json::json!([1]).is_leaf());
}

#[test]
fn collapsed_row_shows_hidden_count() {
    let value = serde_json::json!([1, 2, 3]);
    assert_eq!(row_text(&value, true), "[…] 3");
    assert_eq!(row_text(&value, false), "[");
    assert_eq!(row_text(&serde_json::json!({}), true), "{}");
}
