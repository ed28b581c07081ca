//! File-dialog filter strings.
//!
//! The wire format alternates display names and `;`-separated extension
//! lists, all joined by `|`: `"Images|png;jpg|Documents|pdf"`.

use serde::{Deserialize, Serialize};

/// One named group of file extensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub name: String,
    pub ext: Vec<String>,
}

/// Split on `sep`, trim whitespace, drop empty pieces.
fn split_clean(raw: &str, sep: char) -> impl Iterator<Item = &str> {
    raw.split(sep).map(str::trim).filter(|s| !s.is_empty())
}

/// Parse a filter string into named extension groups.
///
/// Pieces pair up as (name, extension list). A trailing name without an
/// extension list is dropped, as are empty pieces.
#[must_use]
pub fn parse_filter(raw: &str) -> Vec<Filter> {
    let mut filters = Vec::new();
    let mut pending_name: Option<&str> = None;

    for piece in split_clean(raw, '|') {
        match pending_name.take() {
            None => pending_name = Some(piece),
            Some(name) => filters.push(Filter {
                name: name.to_string(),
                ext: split_clean(piece, ';').map(str::to_string).collect(),
            }),
        }
    }

    filters
}

/// Inverse of [`parse_filter`] for filters with non-empty names and
/// extension lists.
#[must_use]
pub fn stringify_filter(filters: &[Filter]) -> String {
    filters
        .iter()
        .map(|f| format!("{}|{}", f.name, f.ext.join(";")))
        .collect::<Vec<_>>()
        .join("|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_multiple_groups() {
        let filters = parse_filter("Images|png;jpg|Documents|pdf");
        assert_eq!(filters.len(), 2);
        assert_eq!(filters[0].name, "Images");
        assert_eq!(filters[0].ext, vec!["png", "jpg"]);
        assert_eq!(filters[1].name, "Documents");
        assert_eq!(filters[1].ext, vec!["pdf"]);
    }

    #[test]
    fn trailing_name_without_extensions_is_dropped() {
        let filters = parse_filter("Images|png|Orphan");
        assert_eq!(filters.len(), 1);
        assert_eq!(filters[0].name, "Images");
    }

    #[test]
    fn whitespace_and_empty_pieces_are_ignored() {
        let filters = parse_filter("  Images | png ; jpg ||");
        assert_eq!(filters.len(), 1);
        assert_eq!(filters[0].ext, vec!["png", "jpg"]);
    }

    #[test]
    fn empty_input_yields_no_filters() {
        assert!(parse_filter("").is_empty());
        assert!(parse_filter("   ").is_empty());
        assert!(parse_filter("|||").is_empty());
    }

    fn token() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9_.-]{1,12}"
    }

    proptest! {
        #[test]
        fn stringify_then_parse_round_trips(
            filters in proptest::collection::vec(
                (token(), proptest::collection::vec(token(), 1..4))
                    .prop_map(|(name, ext)| Filter { name, ext }),
                0..5,
            )
        ) {
            let encoded = stringify_filter(&filters);
            prop_assert_eq!(parse_filter(&encoded), filters);
        }
    }
}
