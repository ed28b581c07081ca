//! Micro-parsers for the small string formats embedded in documents.

pub mod filter;
pub mod font;
pub mod header;

pub use filter::{Filter, parse_filter, stringify_filter};
pub use font::{FontSpec, parse_font};
pub use header::{Header, HeaderColumn, parse_header, project_row};
