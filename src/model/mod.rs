//! The declarative document model: window, widget tree, property bag.

pub mod props;
pub mod widget;
pub mod window;

pub use props::Props;
pub use widget::{Item, Widget};
pub use window::{Window, WindowKind};
