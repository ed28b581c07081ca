//! Backend capability interface.
//!
//! A backend turns the interpreted widget tree into something visible and
//! feeds user interactions back. Backends are selected by name at runtime;
//! which ones exist is a compile-time feature decision.

#![allow(missing_docs)]

use serde_json::Value;

use crate::core::errors::{Result, ShojiError};
use crate::model::{Widget, Window};
use crate::parse::{Filter, Header};

#[cfg(feature = "headless")]
pub mod headless;

/// Inclusive range for `number` widgets.
pub const NUMBER_MIN: i64 = 0;
/// Inclusive range for `number` widgets.
pub const NUMBER_MAX: i64 = 99;

/// Opaque reference to a node the backend has materialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle(u32);

impl NodeHandle {
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

/// The closed set of widget tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    Space,
    Text,
    Input,
    Number,
    Image,
    Button,
    Check,
    List,
    Tree,
    Row,
    Column,
    Grid,
    Form,
    Tabs,
}

impl WidgetKind {
    /// Resolve a document tag. The empty tag is a deliberate no-op node and
    /// resolves to `None`; an unrecognized tag is fatal.
    pub fn parse(tag: &str) -> Result<Option<Self>> {
        let kind = match tag {
            "" => return Ok(None),
            "space" => Self::Space,
            "text" => Self::Text,
            "input" => Self::Input,
            "number" => Self::Number,
            "image" => Self::Image,
            "button" => Self::Button,
            "check" => Self::Check,
            "list" => Self::List,
            "tree" => Self::Tree,
            "row" => Self::Row,
            "column" => Self::Column,
            "grid" => Self::Grid,
            "form" => Self::Form,
            "tabs" => Self::Tabs,
            other => {
                return Err(ShojiError::UnknownWidgetKind {
                    kind: other.to_string(),
                });
            }
        };
        Ok(Some(kind))
    }

    /// Whether this kind hosts child widgets.
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(
            self,
            Self::Row | Self::Column | Self::Grid | Self::Form | Self::Tabs
        )
    }
}

/// Flavor of a one-shot message dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// Single acknowledge button; the reply is always `"ok"`.
    Plain,
    /// Ok/Cancel pair; the reply names the chosen button.
    Confirm,
}

/// Icon shown next to a message dialog's text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MessageIcon {
    #[default]
    None,
    Info,
    Warning,
    Question,
    Error,
}

/// Whether a text prompt echoes its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Plain,
    Password,
}

/// One user interaction reported by the backend, keyed by registry id.
#[derive(Debug, Clone, PartialEq)]
pub enum Interaction {
    Clicked { from: String },
    DoubleClicked { from: String },
    Changed { from: String, detail: Option<Value> },
    Selected { from: String, detail: Option<Value> },
    /// The user closed the window without interacting. Nothing is emitted.
    Dismissed,
}

/// What a backend must provide to host a rendered window.
///
/// Container creation returns the handle the interpreter will pass as
/// `parent` for the children it creates next; backends never walk `items`
/// themselves, except for `list` and `tree`, whose rows are internal.
pub trait Backend {
    fn name(&self) -> &'static str;

    /// Prepare the top-level window before any widget is created.
    fn begin_window(&mut self, window: &Window) -> Result<()>;

    fn create_space(&mut self, parent: Option<NodeHandle>, spec: &Widget) -> Result<NodeHandle>;
    fn create_text(&mut self, parent: Option<NodeHandle>, spec: &Widget) -> Result<NodeHandle>;
    fn create_input(&mut self, parent: Option<NodeHandle>, spec: &Widget) -> Result<NodeHandle>;
    fn create_number(&mut self, parent: Option<NodeHandle>, spec: &Widget) -> Result<NodeHandle>;
    fn create_image(&mut self, parent: Option<NodeHandle>, spec: &Widget) -> Result<NodeHandle>;
    fn create_button(&mut self, parent: Option<NodeHandle>, spec: &Widget) -> Result<NodeHandle>;
    fn create_check(&mut self, parent: Option<NodeHandle>, spec: &Widget) -> Result<NodeHandle>;

    /// Collection widgets own their rows; `header` is the parsed column set.
    fn create_list(
        &mut self,
        parent: Option<NodeHandle>,
        spec: &Widget,
        header: &Header,
    ) -> Result<NodeHandle>;
    fn create_tree(
        &mut self,
        parent: Option<NodeHandle>,
        spec: &Widget,
        header: &Header,
    ) -> Result<NodeHandle>;

    fn create_row(&mut self, parent: Option<NodeHandle>, spec: &Widget) -> Result<NodeHandle>;
    fn create_column(&mut self, parent: Option<NodeHandle>, spec: &Widget) -> Result<NodeHandle>;
    fn create_grid(&mut self, parent: Option<NodeHandle>, spec: &Widget) -> Result<NodeHandle>;
    fn create_form(&mut self, parent: Option<NodeHandle>, spec: &Widget) -> Result<NodeHandle>;
    fn create_tabs(&mut self, parent: Option<NodeHandle>, spec: &Widget) -> Result<NodeHandle>;

    /// Titled frame inserted between a parent and a container carrying a
    /// non-empty `group`.
    fn create_group(
        &mut self,
        parent: Option<NodeHandle>,
        spec: &Widget,
        caption: &str,
    ) -> Result<NodeHandle>;

    /// Called after a widget and all of its children exist.
    fn widget_built(&mut self, _handle: NodeHandle, _spec: &Widget) -> Result<()> {
        Ok(())
    }

    /// Called exactly once, after the whole tree exists.
    fn window_built(&mut self, _window: &Window) -> Result<()> {
        Ok(())
    }

    /// Current value of a registered widget, for model-mode snapshots.
    /// `None` means "this widget contributes nothing".
    fn current_value(&self, handle: NodeHandle, spec: &Widget) -> Option<Value>;

    /// Block until the next interaction, or `None` once the window is gone.
    fn next_interaction(&mut self) -> Result<Option<Interaction>>;

    /// Tear the window down; subsequent `next_interaction` calls yield `None`.
    fn quit(&mut self) -> Result<()>;

    // One-shot modal dialogs. These bypass the widget tree entirely; `None`
    // means the dialog was cancelled without a reply.
    fn show_message(
        &mut self,
        title: &str,
        text: &str,
        kind: MessageKind,
        icon: MessageIcon,
    ) -> Result<Option<String>>;

    fn prompt_input(
        &mut self,
        title: &str,
        text: &str,
        default: &str,
        mode: InputMode,
    ) -> Result<Option<String>>;

    fn pick_file(
        &mut self,
        title: &str,
        start_dir: &str,
        filters: &[Filter],
        save: bool,
    ) -> Result<Option<String>>;

    fn pick_directory(&mut self, title: &str, start_dir: &str) -> Result<Option<String>>;
}

/// Backend names compiled into this build, in preference order.
#[must_use]
pub fn available_backends() -> Vec<&'static str> {
    let mut names = Vec::new();
    #[cfg(feature = "headless")]
    names.push("headless");
    names
}

/// Instantiate a backend by name. The empty name means "first available".
pub fn create_backend(name: &str) -> Result<Box<dyn Backend>> {
    let resolved = if name.is_empty() {
        *available_backends()
            .first()
            .ok_or_else(|| ShojiError::BackendUnavailable {
                name: "(none compiled in)".to_string(),
            })?
    } else {
        name
    };

    match resolved {
        #[cfg(feature = "headless")]
        "headless" => Ok(Box::new(headless::HeadlessBackend::new())),
        other => Err(ShojiError::BackendUnavailable {
            name: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_known_tag_resolves() {
        for tag in [
            "space", "text", "input", "number", "image", "button", "check", "list", "tree", "row",
            "column", "grid", "form", "tabs",
        ] {
            assert!(
                WidgetKind::parse(tag).expect("known tag").is_some(),
                "tag {tag}"
            );
        }
    }

    #[test]
    fn empty_tag_is_a_silent_no_op() {
        assert_eq!(WidgetKind::parse("").expect("empty tag"), None);
    }

    #[test]
    fn unknown_tag_is_fatal() {
        let err = WidgetKind::parse("slider").unwrap_err();
        assert_eq!(err.code(), "SHJ-1003");
        assert!(err.is_document_error());
    }

    #[test]
    fn container_classification() {
        assert!(WidgetKind::Row.is_container());
        assert!(WidgetKind::Tabs.is_container());
        assert!(!WidgetKind::List.is_container(), "collections own their rows");
        assert!(!WidgetKind::Button.is_container());
    }

    #[test]
    fn factory_resolves_names() {
        let backend = create_backend("headless").expect("headless is compiled in");
        assert_eq!(backend.name(), "headless");

        let default = create_backend("").expect("first available");
        assert_eq!(default.name(), "headless");

        match create_backend("gtk4") {
            Err(err) => assert_eq!(err.code(), "SHJ-3001"),
            Ok(backend) => panic!("unexpected backend {}", backend.name()),
        }
    }
}
