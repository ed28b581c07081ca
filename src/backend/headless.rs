//! In-memory backend: no toolkit, no display.
//!
//! Materializes the tree as a slab of nodes, answers modal dialogs
//! deterministically, and replays scripted interactions. This is both the
//! test harness for the interpreter and a real backend for piping dialogs
//! through scripts on machines without a display server.

use std::collections::VecDeque;

use serde_json::Value;

use super::{
    Backend, InputMode, Interaction, MessageIcon, MessageKind, NUMBER_MAX, NUMBER_MIN, NodeHandle,
};
use crate::core::errors::{Result, ShojiError};
use crate::model::{Widget, Window};
use crate::parse::{Filter, Header, parse_font};

/// Per-node mutable state backing model-mode snapshots.
#[derive(Debug, Clone, PartialEq)]
enum NodeState {
    /// Widget kinds that contribute nothing to a snapshot.
    Inert,
    Text(String),
    Flag(bool),
    Count { value: i64, min: i64, max: i64 },
    Collection { selection: Option<Value> },
}

#[derive(Debug, Clone)]
struct Node {
    label: &'static str,
    hosts_children: bool,
    spec: Widget,
    parent: Option<NodeHandle>,
    state: NodeState,
}

/// Backend that renders into memory.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    nodes: Vec<Node>,
    open: bool,
    interactions: VecDeque<Interaction>,
    replies: VecDeque<Option<String>>,
    trace: Vec<String>,
}

impl HeadlessBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the next user interaction to be reported by the event loop.
    pub fn push_interaction(&mut self, interaction: Interaction) {
        self.interactions.push_back(interaction);
    }

    /// Script the reply of the next modal dialog, overriding the default.
    pub fn push_reply(&mut self, reply: Option<String>) {
        self.replies.push_back(reply);
    }

    /// Overwrite a widget's state, as a user edit would.
    pub fn set_value(&mut self, handle: NodeHandle, value: Value) -> Result<()> {
        let node = self.node_mut(handle)?;
        node.state = match (&node.state, value) {
            (NodeState::Text(_), Value::String(s)) => NodeState::Text(s),
            (NodeState::Flag(_), Value::Bool(b)) => NodeState::Flag(b),
            (&NodeState::Count { min, max, .. }, Value::Number(n)) => NodeState::Count {
                value: n.as_i64().unwrap_or(min).clamp(min, max),
                min,
                max,
            },
            (state, value) => {
                return Err(ShojiError::Backend {
                    details: format!("cannot store {value} in {state:?}"),
                });
            }
        };
        Ok(())
    }

    /// Record a collection's current selection payload.
    pub fn set_selection(&mut self, handle: NodeHandle, detail: Option<Value>) -> Result<()> {
        let node = self.node_mut(handle)?;
        if let NodeState::Collection { selection } = &mut node.state {
            *selection = detail;
            Ok(())
        } else {
            Err(ShojiError::Backend {
                details: format!("node {} is not a collection", handle.index()),
            })
        }
    }

    /// Ordered log of every lifecycle call the interpreter made.
    #[must_use]
    pub fn trace(&self) -> &[String] {
        &self.trace
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Indented textual rendering of the materialized tree.
    #[must_use]
    pub fn render_outline(&self) -> String {
        let mut out = String::new();
        for root in 0..self.nodes.len() {
            if self.nodes[root].parent.is_none() {
                self.outline_into(NodeHandle::new(root as u32), 0, &mut out);
            }
        }
        out
    }

    fn outline_into(&self, handle: NodeHandle, depth: usize, out: &mut String) {
        let node = &self.nodes[handle.index() as usize];
        out.push_str(&"  ".repeat(depth));
        out.push_str(node.label);
        let caption = node.spec.event_name();
        if !caption.is_empty() {
            out.push_str(&format!(" \"{caption}\""));
        }
        out.push('\n');

        for (index, child) in self.nodes.iter().enumerate() {
            if child.parent == Some(handle) {
                self.outline_into(NodeHandle::new(index as u32), depth + 1, out);
            }
        }
    }

    fn node_mut(&mut self, handle: NodeHandle) -> Result<&mut Node> {
        let index = handle.index() as usize;
        self.nodes.get_mut(index).ok_or_else(|| ShojiError::Backend {
            details: format!("unknown node handle {index}"),
        })
    }

    /// Append a node after checking the parent can host children.
    fn attach(
        &mut self,
        label: &'static str,
        hosts_children: bool,
        parent: Option<NodeHandle>,
        spec: &Widget,
        state: NodeState,
    ) -> Result<NodeHandle> {
        if let Some(parent_handle) = parent {
            let parent_node =
                self.nodes
                    .get(parent_handle.index() as usize)
                    .ok_or_else(|| ShojiError::Backend {
                        details: format!("unknown parent handle {}", parent_handle.index()),
                    })?;
            if !parent_node.hosts_children {
                return Err(ShojiError::StructuralMismatch {
                    child: label.to_string(),
                    parent: parent_node.label.to_string(),
                });
            }
        }

        let handle = NodeHandle::new(self.nodes.len() as u32);
        self.trace.push(match parent {
            Some(p) => format!("create {label} #{} in #{}", handle.index(), p.index()),
            None => format!("create {label} #{}", handle.index()),
        });
        self.nodes.push(Node {
            label,
            hosts_children,
            spec: spec.clone(),
            parent,
            state,
        });
        Ok(handle)
    }

    fn leaf(
        &mut self,
        label: &'static str,
        parent: Option<NodeHandle>,
        spec: &Widget,
        state: NodeState,
    ) -> Result<NodeHandle> {
        self.attach(label, false, parent, spec, state)
    }

    fn container(
        &mut self,
        label: &'static str,
        parent: Option<NodeHandle>,
        spec: &Widget,
    ) -> Result<NodeHandle> {
        self.attach(label, true, parent, spec, NodeState::Inert)
    }

    fn take_reply(&mut self, default: Option<String>) -> Option<String> {
        self.replies.pop_front().unwrap_or(default)
    }
}

impl Backend for HeadlessBackend {
    fn name(&self) -> &'static str {
        "headless"
    }

    fn begin_window(&mut self, window: &Window) -> Result<()> {
        self.open = true;
        let mut entry = format!("window \"{}\"", window.title);
        if let Some(font) = parse_font(&window.font) {
            entry.push_str(&format!(" font={}", font.family));
        }
        self.trace.push(entry);
        Ok(())
    }

    fn create_space(&mut self, parent: Option<NodeHandle>, spec: &Widget) -> Result<NodeHandle> {
        self.leaf("space", parent, spec, NodeState::Inert)
    }

    fn create_text(&mut self, parent: Option<NodeHandle>, spec: &Widget) -> Result<NodeHandle> {
        self.leaf("text", parent, spec, NodeState::Inert)
    }

    fn create_input(&mut self, parent: Option<NodeHandle>, spec: &Widget) -> Result<NodeHandle> {
        let state = NodeState::Text(spec.text.clone());
        self.leaf("input", parent, spec, state)
    }

    fn create_number(&mut self, parent: Option<NodeHandle>, spec: &Widget) -> Result<NodeHandle> {
        let min = spec.props.integer("min", NUMBER_MIN);
        let max = spec.props.integer("max", NUMBER_MAX);
        // Inverted bounds in the document are reordered, not rejected.
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let state = NodeState::Count {
            value: spec.value.clamp(min, max),
            min,
            max,
        };
        self.leaf("number", parent, spec, state)
    }

    fn create_image(&mut self, parent: Option<NodeHandle>, spec: &Widget) -> Result<NodeHandle> {
        self.leaf("image", parent, spec, NodeState::Inert)
    }

    fn create_button(&mut self, parent: Option<NodeHandle>, spec: &Widget) -> Result<NodeHandle> {
        self.leaf("button", parent, spec, NodeState::Inert)
    }

    fn create_check(&mut self, parent: Option<NodeHandle>, spec: &Widget) -> Result<NodeHandle> {
        let state = NodeState::Flag(spec.props.flag("checked"));
        self.leaf("check", parent, spec, state)
    }

    fn create_list(
        &mut self,
        parent: Option<NodeHandle>,
        spec: &Widget,
        header: &Header,
    ) -> Result<NodeHandle> {
        let handle = self.leaf("list", parent, spec, NodeState::Collection { selection: None })?;
        if !header.is_empty() {
            self.trace
                .push(format!("list #{} columns={}", handle.index(), header.len()));
        }
        Ok(handle)
    }

    fn create_tree(
        &mut self,
        parent: Option<NodeHandle>,
        spec: &Widget,
        header: &Header,
    ) -> Result<NodeHandle> {
        let handle = self.leaf("tree", parent, spec, NodeState::Collection { selection: None })?;
        if !header.is_empty() {
            self.trace
                .push(format!("tree #{} columns={}", handle.index(), header.len()));
        }
        Ok(handle)
    }

    fn create_row(&mut self, parent: Option<NodeHandle>, spec: &Widget) -> Result<NodeHandle> {
        self.container("row", parent, spec)
    }

    fn create_column(&mut self, parent: Option<NodeHandle>, spec: &Widget) -> Result<NodeHandle> {
        self.container("column", parent, spec)
    }

    fn create_grid(&mut self, parent: Option<NodeHandle>, spec: &Widget) -> Result<NodeHandle> {
        self.container("grid", parent, spec)
    }

    fn create_form(&mut self, parent: Option<NodeHandle>, spec: &Widget) -> Result<NodeHandle> {
        self.container("form", parent, spec)
    }

    fn create_tabs(&mut self, parent: Option<NodeHandle>, spec: &Widget) -> Result<NodeHandle> {
        self.container("tabs", parent, spec)
    }

    fn create_group(
        &mut self,
        parent: Option<NodeHandle>,
        spec: &Widget,
        caption: &str,
    ) -> Result<NodeHandle> {
        let handle = self.attach("group", true, parent, spec, NodeState::Inert)?;
        self.trace
            .push(format!("group #{} \"{caption}\"", handle.index()));
        Ok(handle)
    }

    fn widget_built(&mut self, handle: NodeHandle, _spec: &Widget) -> Result<()> {
        self.trace.push(format!("built #{}", handle.index()));
        Ok(())
    }

    fn window_built(&mut self, _window: &Window) -> Result<()> {
        self.trace.push("window built".to_string());
        Ok(())
    }

    fn current_value(&self, handle: NodeHandle, _spec: &Widget) -> Option<Value> {
        let node = self.nodes.get(handle.index() as usize)?;
        match &node.state {
            NodeState::Inert => None,
            NodeState::Text(s) => Some(Value::String(s.clone())),
            NodeState::Flag(b) => Some(Value::Bool(*b)),
            NodeState::Count { value, .. } => Some(Value::from(*value)),
            NodeState::Collection { selection } => selection.clone(),
        }
    }

    fn next_interaction(&mut self) -> Result<Option<Interaction>> {
        if !self.open {
            return Ok(None);
        }
        Ok(self.interactions.pop_front())
    }

    fn quit(&mut self) -> Result<()> {
        self.open = false;
        self.interactions.clear();
        self.trace.push("quit".to_string());
        Ok(())
    }

    fn show_message(
        &mut self,
        title: &str,
        _text: &str,
        kind: MessageKind,
        _icon: MessageIcon,
    ) -> Result<Option<String>> {
        self.trace.push(format!("message \"{title}\""));
        let default = match kind {
            MessageKind::Plain | MessageKind::Confirm => Some("ok".to_string()),
        };
        Ok(self.take_reply(default))
    }

    fn prompt_input(
        &mut self,
        title: &str,
        _text: &str,
        default: &str,
        _mode: InputMode,
    ) -> Result<Option<String>> {
        self.trace.push(format!("prompt \"{title}\""));
        Ok(self.take_reply(Some(default.to_string())))
    }

    fn pick_file(
        &mut self,
        title: &str,
        _start_dir: &str,
        filters: &[Filter],
        save: bool,
    ) -> Result<Option<String>> {
        let verb = if save { "save" } else { "load" };
        self.trace
            .push(format!("pick-{verb} \"{title}\" filters={}", filters.len()));
        Ok(self.take_reply(None))
    }

    fn pick_directory(&mut self, title: &str, _start_dir: &str) -> Result<Option<String>> {
        self.trace.push(format!("pick-dir \"{title}\""));
        Ok(self.take_reply(None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn open_backend() -> HeadlessBackend {
        let mut backend = HeadlessBackend::new();
        backend
            .begin_window(&Window::default())
            .expect("begin window");
        backend
    }

    #[test]
    fn leaves_cannot_host_children() {
        let mut backend = open_backend();
        let button = backend
            .create_button(None, &Widget::default())
            .expect("button");
        let err = backend
            .create_text(Some(button), &Widget::default())
            .unwrap_err();
        assert_eq!(err.code(), "SHJ-2001");
    }

    #[test]
    fn containers_host_children() {
        let mut backend = open_backend();
        let column = backend
            .create_column(None, &Widget::default())
            .expect("column");
        backend
            .create_text(Some(column), &Widget::label("hi"))
            .expect("text under column");
        assert_eq!(backend.node_count(), 2);
    }

    #[test]
    fn number_values_are_clamped() {
        let mut backend = open_backend();
        let spec = Widget {
            kind: "number".to_string(),
            value: 500,
            ..Widget::default()
        };
        let handle = backend.create_number(None, &spec).expect("number");
        assert_eq!(
            backend.current_value(handle, &spec),
            Some(json!(NUMBER_MAX))
        );
    }

    #[test]
    fn number_bounds_come_from_props() {
        let mut backend = open_backend();
        let mut spec = Widget {
            kind: "number".to_string(),
            value: 250,
            ..Widget::default()
        };
        spec.props.insert("min", json!(100));
        spec.props.insert("max", json!(200));

        let handle = backend.create_number(None, &spec).expect("number");
        assert_eq!(backend.current_value(handle, &spec), Some(json!(200)));

        backend.set_value(handle, json!(50)).expect("set value");
        assert_eq!(backend.current_value(handle, &spec), Some(json!(100)));
    }

    #[test]
    fn inverted_number_bounds_are_reordered() {
        let mut backend = open_backend();
        let mut spec = Widget {
            kind: "number".to_string(),
            value: 5,
            ..Widget::default()
        };
        spec.props.insert("min", json!(10));
        spec.props.insert("max", json!(0));

        let handle = backend.create_number(None, &spec).expect("number");
        assert_eq!(backend.current_value(handle, &spec), Some(json!(5)));

        backend.set_value(handle, json!(99)).expect("set value");
        assert_eq!(backend.current_value(handle, &spec), Some(json!(10)));
    }

    #[test]
    fn set_value_enforces_state_types() {
        let mut backend = open_backend();
        let spec = Widget {
            kind: "input".to_string(),
            ..Widget::default()
        };
        let handle = backend.create_input(None, &spec).expect("input");

        backend
            .set_value(handle, json!("typed"))
            .expect("string into input");
        assert_eq!(backend.current_value(handle, &spec), Some(json!("typed")));

        let err = backend.set_value(handle, json!(true)).unwrap_err();
        assert_eq!(err.code(), "SHJ-3900");
    }

    #[test]
    fn scripted_interactions_replay_in_order() {
        let mut backend = open_backend();
        backend.push_interaction(Interaction::Changed {
            from: "a".to_string(),
            detail: None,
        });
        backend.push_interaction(Interaction::Clicked {
            from: "b".to_string(),
        });

        assert!(matches!(
            backend.next_interaction().expect("first"),
            Some(Interaction::Changed { .. })
        ));
        assert!(matches!(
            backend.next_interaction().expect("second"),
            Some(Interaction::Clicked { .. })
        ));
        assert_eq!(backend.next_interaction().expect("drained"), None);
    }

    #[test]
    fn quit_closes_the_loop() {
        let mut backend = open_backend();
        backend.push_interaction(Interaction::Dismissed);
        backend.quit().expect("quit");
        assert_eq!(backend.next_interaction().expect("after quit"), None);
    }

    #[test]
    fn modal_defaults_are_deterministic() {
        let mut backend = HeadlessBackend::new();
        assert_eq!(
            backend
                .show_message("t", "m", MessageKind::Plain, MessageIcon::Info)
                .expect("message"),
            Some("ok".to_string())
        );
        assert_eq!(
            backend
                .prompt_input("t", "m", "seed", InputMode::Plain)
                .expect("prompt"),
            Some("seed".to_string())
        );
        assert_eq!(
            backend.pick_file("t", "", &[], false).expect("pick"),
            None
        );
    }

    #[test]
    fn scripted_replies_override_defaults() {
        let mut backend = HeadlessBackend::new();
        backend.push_reply(Some("cancel".to_string()));
        assert_eq!(
            backend
                .show_message("t", "m", MessageKind::Confirm, MessageIcon::Question)
                .expect("message"),
            Some("cancel".to_string())
        );
    }

    #[test]
    fn outline_reflects_nesting() {
        let mut backend = open_backend();
        let column = backend
            .create_column(None, &Widget::default())
            .expect("column");
        let mut button = Widget::default();
        button.id = "go".to_string();
        backend
            .create_button(Some(column), &button)
            .expect("button");

        let outline = backend.render_outline();
        assert!(outline.contains("column\n  button \"go\"\n"), "{outline}");
    }
}
