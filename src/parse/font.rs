//! Font request strings: `"'DejaVu Sans' 11"`, `"Monospace 10"`, `"Arial"`.

/// A parsed font request. A missing size means "keep the backend default".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSpec {
    pub family: String,
    pub size: Option<u32>,
}

/// Parse a font request.
///
/// A family with spaces must be single-quoted; an unquoted family ends at the
/// first space. Returns `None` for empty input, an unterminated quote, or
/// trailing garbage after the size.
#[must_use]
pub fn parse_font(raw: &str) -> Option<FontSpec> {
    if raw.is_empty() {
        return None;
    }

    let (family, rest) = if let Some(quoted) = raw.strip_prefix('\'') {
        let end = quoted.find('\'')?;
        (&quoted[..end], &quoted[end + 1..])
    } else {
        match raw.find(' ') {
            Some(pos) => (&raw[..pos], &raw[pos..]),
            None => (raw, ""),
        }
    };

    let rest = rest.trim_start();
    let size = if rest.is_empty() {
        None
    } else {
        // A negative size is a valid "use the default" request.
        let parsed: i64 = rest.parse().ok()?;
        u32::try_from(parsed).ok().filter(|&size| size > 0)
    };

    Some(FontSpec {
        family: family.to_string(),
        size,
    })
}
