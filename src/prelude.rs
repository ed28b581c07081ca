//! Convenience re-exports for library consumers.
//!
//! ```rust,no_run
//! use shoji::prelude::*;
//! ```

// Core
pub use crate::core::config::Config;
pub use crate::core::errors::{Result, ShojiError};

// Model
pub use crate::model::{Item, Props, Widget, Window, WindowKind};

// Backend
pub use crate::backend::{
    Backend, InputMode, Interaction, MessageIcon, MessageKind, NodeHandle, available_backends,
    create_backend,
};
#[cfg(feature = "headless")]
pub use crate::backend::headless::HeadlessBackend;

// Rendering and events
pub use crate::event::{EventEmitter, EventMode, Flow, SelectionPolicy};
pub use crate::render::{Registry, render, run_window};

// Micro-parsers
pub use crate::parse::{parse_filter, parse_font, parse_header, project_row};
