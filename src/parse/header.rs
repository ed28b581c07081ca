//! Column headers for `list` and `tree` widgets, and row projection.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::errors::{Result, ShojiError};
use crate::model::Widget;

/// One column: registry id plus display caption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderColumn {
    pub id: String,
    pub text: String,
}

/// Ordered column set. Empty means "single unnamed column".
pub type Header = Vec<HeaderColumn>;

/// Read the `header` property of a collection widget.
///
/// Each entry is either a bare string (id and caption coincide) or an object
/// with explicit `id` and `text`. A missing property yields an empty header;
/// anything else in the array is fatal.
pub fn parse_header(widget: &Widget) -> Result<Header> {
    let Some(entries) = widget.props.array("header") else {
        return Ok(Header::new());
    };

    entries
        .iter()
        .map(|entry| match entry {
            Value::String(s) => Ok(HeaderColumn {
                id: s.clone(),
                text: s.clone(),
            }),
            Value::Object(_) => serde_json::from_value(entry.clone()).map_err(|e| {
                ShojiError::InvalidHeader {
                    details: e.to_string(),
                }
            }),
            other => Err(ShojiError::InvalidHeader {
                details: format!("expected string or object, got {other}"),
            }),
        })
        .collect()
}

/// Project a row widget onto the header: a map from column id to the row's
/// matching property. Columns the row does not carry are omitted.
#[must_use]
pub fn project_row(header: &Header, row: &Widget) -> serde_json::Map<String, Value> {
    header
        .iter()
        .filter_map(|col| {
            row.props
                .get(&col.id)
                .map(|cell| (col.id.clone(), cell.clone()))
        })
        .collect()
}
