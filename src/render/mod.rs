//! The widget-tree interpreter: walks a decoded [`Window`] and drives a
//! [`Backend`] through widget creation, then runs the interaction session.

pub mod registry;

pub use registry::{Registry, RegistryEntry};

use std::io::Write;

use crate::backend::{Backend, NodeHandle, WidgetKind};
use crate::core::errors::Result;
use crate::event::{EventEmitter, EventMode, Flow, SelectionPolicy};
use crate::model::{Item, Widget, Window};
use crate::parse::parse_header;

/// Rewrite a titled widget into an untitled column of caption + payload.
///
/// The wrapper takes over the original's `fill`; the payload always fills the
/// wrapper. The payload keeps its id, so registration is unaffected.
fn wrap_titled(spec: &Widget) -> Widget {
    let caption = Widget::label(spec.title.clone());

    let mut payload = spec.clone();
    payload.title.clear();
    payload.fill = true;

    Widget {
        kind: "column".to_string(),
        fill: spec.fill,
        items: vec![Item::Node(caption), Item::Node(payload)],
        ..Widget::default()
    }
}

/// Interpret the whole document against a backend. Returns the id registry
/// the event session will consult.
pub fn render(window: &Window, backend: &mut dyn Backend) -> Result<Registry> {
    let mut registry = Registry::default();
    backend.begin_window(window)?;
    process(&window.body, None, backend, &mut registry)?;
    backend.window_built(window)?;
    Ok(registry)
}

/// Interpret one node. `None` means the node was a deliberate no-op (empty
/// tag): nothing was created, registered, or hooked.
fn process(
    spec: &Widget,
    parent: Option<NodeHandle>,
    backend: &mut dyn Backend,
    registry: &mut Registry,
) -> Result<Option<NodeHandle>> {
    if !spec.title.is_empty() {
        return process(&wrap_titled(spec), parent, backend, registry);
    }

    let Some(kind) = WidgetKind::parse(&spec.kind)? else {
        return Ok(None);
    };

    let handle = match kind {
        WidgetKind::Space => backend.create_space(parent, spec)?,
        WidgetKind::Text => backend.create_text(parent, spec)?,
        WidgetKind::Input => backend.create_input(parent, spec)?,
        WidgetKind::Number => backend.create_number(parent, spec)?,
        WidgetKind::Image => backend.create_image(parent, spec)?,
        WidgetKind::Button => backend.create_button(parent, spec)?,
        WidgetKind::Check => backend.create_check(parent, spec)?,
        WidgetKind::List => {
            let header = parse_header(spec)?;
            backend.create_list(parent, spec, &header)?
        }
        WidgetKind::Tree => {
            let header = parse_header(spec)?;
            backend.create_tree(parent, spec, &header)?
        }
        WidgetKind::Row
        | WidgetKind::Column
        | WidgetKind::Grid
        | WidgetKind::Form
        | WidgetKind::Tabs => {
            let effective_parent = if spec.group.is_empty() {
                parent
            } else {
                let group_spec = Widget {
                    kind: "group".to_string(),
                    text: spec.group.clone(),
                    ..Widget::default()
                };
                Some(backend.create_group(parent, &group_spec, &spec.group)?)
            };

            let container = match kind {
                WidgetKind::Row => backend.create_row(effective_parent, spec)?,
                WidgetKind::Column => backend.create_column(effective_parent, spec)?,
                WidgetKind::Grid => backend.create_grid(effective_parent, spec)?,
                WidgetKind::Form => backend.create_form(effective_parent, spec)?,
                WidgetKind::Tabs => backend.create_tabs(effective_parent, spec)?,
                _ => unreachable!("only containers reach this branch"),
            };

            for item in &spec.items {
                process(&item.to_widget(), Some(container), backend, registry)?;
            }
            container
        }
    };

    registry.register(spec, handle);
    backend.widget_built(handle, spec)?;
    Ok(Some(handle))
}

/// Render a window and pump interactions until the session ends.
pub fn run_window<W: Write>(
    window: &Window,
    backend: &mut dyn Backend,
    out: W,
    selection: SelectionPolicy,
) -> Result<()> {
    let registry = render(window, backend)?;

    let mode = if window.model {
        EventMode::Snapshot
    } else {
        EventMode::Detail
    };
    let mut emitter = EventEmitter::new(out, mode, selection);

    loop {
        let Some(interaction) = backend.next_interaction()? else {
            break;
        };
        match emitter.emit(&interaction, &registry, &*backend)? {
            Flow::Continue => {}
            Flow::Quit => {
                backend.quit()?;
                break;
            }
        }
    }

    Ok(())
}
