//! SHJ-prefixed error types with structured error codes.

#![allow(missing_docs)]

use thiserror::Error;

/// Shared `Result` alias for the project.
pub type Result<T> = std::result::Result<T, ShojiError>;

/// Top-level error type for shoji.
///
/// Every failure is fatal: a render either fully succeeds or the process
/// terminates. There is no partial-UI or degraded-rendering mode.
#[derive(Debug, Error)]
pub enum ShojiError {
    #[error("[SHJ-1001] malformed document: {details}")]
    DocumentParse { details: String },

    #[error("[SHJ-1002] invalid window type: '{kind}'")]
    InvalidWindowKind { kind: String },

    #[error("[SHJ-1003] unknown widget type: '{kind}'")]
    UnknownWidgetKind { kind: String },

    #[error("[SHJ-1004] malformed header projection: {details}")]
    InvalidHeader { details: String },

    #[error("[SHJ-1101] configuration parse failure in {context}: {details}")]
    ConfigParse {
        context: &'static str,
        details: String,
    },

    #[error("[SHJ-1102] invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("[SHJ-2001] widget '{child}' cannot be hosted by '{parent}'")]
    StructuralMismatch { child: String, parent: String },

    #[error("[SHJ-2101] serialization failure in {context}: {details}")]
    Serialization {
        context: &'static str,
        details: String,
    },

    #[error("[SHJ-3001] backend '{name}' is not available")]
    BackendUnavailable { name: String },

    #[error("[SHJ-3002] IO failure in {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("[SHJ-3900] backend failure: {details}")]
    Backend { details: String },
}

impl ShojiError {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::DocumentParse { .. } => "SHJ-1001",
            Self::InvalidWindowKind { .. } => "SHJ-1002",
            Self::UnknownWidgetKind { .. } => "SHJ-1003",
            Self::InvalidHeader { .. } => "SHJ-1004",
            Self::ConfigParse { .. } => "SHJ-1101",
            Self::InvalidConfig { .. } => "SHJ-1102",
            Self::StructuralMismatch { .. } => "SHJ-2001",
            Self::Serialization { .. } => "SHJ-2101",
            Self::BackendUnavailable { .. } => "SHJ-3001",
            Self::Io { .. } => "SHJ-3002",
            Self::Backend { .. } => "SHJ-3900",
        }
    }

    /// Whether the failure is attributable to the input document rather than
    /// the environment. Drives the CLI exit-code mapping.
    #[must_use]
    pub const fn is_document_error(&self) -> bool {
        matches!(
            self,
            Self::DocumentParse { .. }
                | Self::InvalidWindowKind { .. }
                | Self::UnknownWidgetKind { .. }
                | Self::InvalidHeader { .. }
                | Self::StructuralMismatch { .. }
        )
    }

    /// Convenience constructor for document decode failures.
    #[must_use]
    pub fn document(details: impl Into<String>) -> Self {
        Self::DocumentParse {
            details: details.into(),
        }
    }

    /// Convenience constructor for IO errors with a known context.
    #[must_use]
    pub const fn io(context: &'static str, source: std::io::Error) -> Self {
        Self::Io { context, source }
    }
}

impl From<serde_json::Error> for ShojiError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization {
            context: "serde_json",
            details: value.to_string(),
        }
    }
}

impl From<toml::de::Error> for ShojiError {
    fn from(value: toml::de::Error) -> Self {
        Self::ConfigParse {
            context: "toml",
            details: value.to_string(),
        }
    }
}
