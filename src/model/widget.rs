//! Widget node: one element of the declarative dialog tree.

#![allow(missing_docs)]

use serde::{Deserialize, Serialize};

use super::props::Props;

/// A single node of the widget tree.
///
/// The fixed fields below are shared by every widget kind; everything else in
/// the input object lands in [`Props`]. Unknown fixed-field types are a decode
/// failure, unknown extra keys are not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Widget {
    /// Registry key. Widgets without an id are rendered but not addressable.
    pub id: String,
    /// Widget tag (`"button"`, `"row"`, ...). Empty means "render nothing".
    #[serde(rename = "type")]
    pub kind: String,
    /// Caption rendered above the widget via the title-wrap rewrite.
    pub title: String,
    /// Group caption. On containers, a non-empty group wraps the children in
    /// a titled frame.
    pub group: String,
    /// Primary display text (label caption, button text, input content).
    pub text: String,
    /// Numeric payload for `number` widgets.
    pub value: i64,
    /// Requested width in pixels; zero means unset.
    pub width: i32,
    /// Requested height in pixels; zero means unset.
    pub height: i32,
    /// Interactive widgets start enabled unless the document says otherwise.
    pub enabled: bool,
    /// Whether the widget stretches to consume surplus space in its parent.
    pub fill: bool,
    /// Child nodes for containers; rows for `list` and `tree`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Item>,
    /// Everything else: type-specific properties.
    #[serde(flatten)]
    pub props: Props,
}

impl Default for Widget {
    fn default() -> Self {
        Self {
            id: String::new(),
            kind: String::new(),
            title: String::new(),
            group: String::new(),
            text: String::new(),
            value: 0,
            width: 0,
            height: 0,
            enabled: true,
            fill: false,
            items: Vec::new(),
            props: Props::default(),
        }
    }
}

impl Widget {
    /// A plain text leaf, as produced when a bare string appears in `items`.
    #[must_use]
    pub fn label(text: impl Into<String>) -> Self {
        Self {
            kind: "text".to_string(),
            text: text.into(),
            ..Self::default()
        }
    }

    /// Name used in outgoing events: the id when present, else the display
    /// text.
    #[must_use]
    pub fn event_name(&self) -> &str {
        if self.id.is_empty() { &self.text } else { &self.id }
    }
}

/// A child entry: either a full widget object or a bare string shorthand for
/// a text leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Item {
    Node(Widget),
    Label(String),
}

impl Item {
    /// Resolve the shorthand: bare strings become text leaves.
    #[must_use]
    pub fn into_widget(self) -> Widget {
        match self {
            Self::Node(widget) => widget,
            Self::Label(text) => Widget::label(text),
        }
    }

    /// Borrowing variant of [`Item::into_widget`].
    #[must_use]
    pub fn to_widget(&self) -> Widget {
        self.clone().into_widget()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_follow_document_conventions() {
        let widget = Widget::default();
        assert!(widget.enabled, "widgets start enabled");
        assert!(!widget.fill);
        assert_eq!(widget.width, 0);
        assert_eq!(widget.height, 0);
        assert_eq!(widget.value, 0);
    }

    #[test]
    fn decodes_fixed_fields_and_props() {
        let widget: Widget = serde_json::from_value(json!({
            "type": "input",
            "id": "name",
            "title": "Name",
            "text": "Alice",
            "placeholder": "your name",
        }))
        .expect("decode");

        assert_eq!(widget.kind, "input");
        assert_eq!(widget.id, "name");
        assert_eq!(widget.title, "Name");
        assert_eq!(widget.text, "Alice");
        assert_eq!(widget.props.string("placeholder"), "your name");
    }

    #[test]
    fn items_accept_bare_strings() {
        let widget: Widget = serde_json::from_value(json!({
            "type": "column",
            "items": ["hello", {"type": "button", "text": "Go"}],
        }))
        .expect("decode");

        assert_eq!(widget.items.len(), 2);
        let first = widget.items[0].to_widget();
        assert_eq!(first.kind, "text");
        assert_eq!(first.text, "hello");
        let second = widget.items[1].to_widget();
        assert_eq!(second.kind, "button");
    }

    #[test]
    fn event_name_prefers_id() {
        let mut widget = Widget::label("Cancel");
        assert_eq!(widget.event_name(), "Cancel");
        widget.id = "btn-cancel".to_string();
        assert_eq!(widget.event_name(), "btn-cancel");
    }

    #[test]
    fn wrong_fixed_field_type_is_a_decode_failure() {
        let result: std::result::Result<Widget, _> = serde_json::from_value(json!({
            "type": "number",
            "value": "not a number",
        }));
        assert!(result.is_err());
    }
}
