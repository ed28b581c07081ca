//! Outgoing event protocol: JSON lines on a writer.
//!
//! Interactions reported by the backend pass through the emitter, which
//! decides three things per interaction: whether to print an event, what its
//! `detail` payload is, and whether the session ends.

#![allow(missing_docs)]

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::backend::{Backend, Interaction};
use crate::core::errors::{Result, ShojiError};
use crate::render::Registry;

/// Whether a `selected` event ends the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionPolicy {
    /// Selecting a row answers the dialog and closes it.
    #[default]
    Terminal,
    /// Selections stream out; only a click or a dismissal ends the session.
    Live,
}

impl FromStr for SelectionPolicy {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, ()> {
        match s {
            "terminal" => Ok(Self::Terminal),
            "live" => Ok(Self::Live),
            _ => Err(()),
        }
    }
}

impl fmt::Display for SelectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Terminal => "terminal",
            Self::Live => "live",
        })
    }
}

/// What the `detail` field of an event carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventMode {
    /// Per-interaction detail as reported by the backend.
    Detail,
    /// Model mode: every event carries a snapshot of current widget values,
    /// and intermediate events (changed, selected, doubleclicked) are
    /// suppressed.
    Snapshot,
}

/// Whether the session continues after an interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Flow {
    Continue,
    Quit,
}

/// Writes protocol events as JSON lines.
pub struct EventEmitter<W: Write> {
    out: W,
    mode: EventMode,
    selection: SelectionPolicy,
}

impl<W: Write> EventEmitter<W> {
    pub const fn new(out: W, mode: EventMode, selection: SelectionPolicy) -> Self {
        Self {
            out,
            mode,
            selection,
        }
    }

    /// Process one interaction: possibly print an event, and report whether
    /// the session goes on.
    pub fn emit(
        &mut self,
        interaction: &Interaction,
        registry: &Registry,
        backend: &dyn Backend,
    ) -> Result<Flow> {
        match interaction {
            Interaction::Clicked { from } => {
                self.print_event("clicked", from, None, registry, backend)?;
                Ok(Flow::Quit)
            }
            Interaction::DoubleClicked { from } => {
                if self.mode == EventMode::Snapshot {
                    return Ok(Flow::Continue);
                }
                self.print_event("doubleclicked", from, None, registry, backend)?;
                Ok(Flow::Quit)
            }
            Interaction::Changed { from, detail } => {
                if self.mode == EventMode::Snapshot {
                    return Ok(Flow::Continue);
                }
                self.print_event("changed", from, detail.clone(), registry, backend)?;
                Ok(Flow::Continue)
            }
            Interaction::Selected { from, detail } => {
                if self.mode == EventMode::Snapshot {
                    return Ok(Flow::Continue);
                }
                self.print_event("selected", from, detail.clone(), registry, backend)?;
                Ok(match self.selection {
                    SelectionPolicy::Terminal => Flow::Quit,
                    SelectionPolicy::Live => Flow::Continue,
                })
            }
            Interaction::Dismissed => Ok(Flow::Quit),
        }
    }

    fn print_event(
        &mut self,
        event_type: &str,
        from: &str,
        detail: Option<Value>,
        registry: &Registry,
        backend: &dyn Backend,
    ) -> Result<()> {
        let name = registry
            .get(from)
            .map_or(from, |entry| entry.spec.event_name());

        let mut event = json!({ "type": event_type, "from": name });
        let detail = match self.mode {
            EventMode::Snapshot => Some(Value::Object(snapshot(registry, backend))),
            EventMode::Detail => detail,
        };
        if let Some(detail) = detail {
            event["detail"] = detail;
        }

        let line = serde_json::to_string(&event)?;
        writeln!(self.out, "{line}").map_err(|source| ShojiError::io("event stream", source))?;
        self.out
            .flush()
            .map_err(|source| ShojiError::io("event stream", source))
    }
}

/// Current value of every registered widget, omitting those that carry none.
#[must_use]
pub fn snapshot(registry: &Registry, backend: &dyn Backend) -> Map<String, Value> {
    registry
        .iter()
        .filter_map(|(id, entry)| {
            backend
                .current_value(entry.handle, &entry.spec)
                .map(|value| (id.clone(), value))
        })
        .collect()
}
