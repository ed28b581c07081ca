#![forbid(unsafe_code)]

//! shoji — a declarative window renderer.
//!
//! A dialog is a JSON document: window attributes plus a tree of widgets.
//! shoji interprets the tree against a pluggable [`backend::Backend`] and
//! reports user interactions as JSON lines, one event per line. One-shot
//! modal dialogs (messages, prompts, file pickers) bypass the tree and
//! answer with a single raw string.
//!
//! # Library usage
//!
//! Use the [`prelude`] for convenient access to the most common types:
//!
//! ```rust,no_run
//! use shoji::prelude::*;
//! ```
//!
//! Individual modules can also be imported directly:
//!
//! ```rust,no_run
//! use shoji::model::Window;
//! use shoji::render::run_window;
//! ```

pub mod prelude;

pub mod backend;
pub mod core;
pub mod event;
pub mod model;
pub mod parse;
pub mod render;
