//! Error types for droidprep
//!
//! Uses `thiserror` for library errors; the binary wraps these in
//! `anyhow` with context at the command boundary.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for droidprep operations
pub type PrepResult<T> = Result<T, PrepError>;

/// Main error type for droidprep operations
#[derive(Error, Debug)]
pub enum PrepError {
    /// Icon declarations failed validation (aggregated, fatal, pre-write)
    #[error("{}", icon_validation_message(.missing_pair, .legacy_needed))]
    IconValidation {
        /// Identifiers of declarations with exactly one of
        /// background/foreground, or neither and no src
        missing_pair: Vec<String>,
        /// Identifiers of adaptive-only declarations with no safe
        /// flat fallback for older OS versions
        legacy_needed: Vec<String>,
    },

    /// Project descriptor file is missing
    #[error("project descriptor not found: {path}")]
    DescriptorNotFound { path: PathBuf },

    /// Project descriptor is malformed
    #[error("malformed descriptor {file}: {message}")]
    MalformedDescriptor { file: PathBuf, message: String },

    /// No qualifying activity source file exists
    #[error("no activity source file found under {dir}")]
    ActivityNotFound { dir: PathBuf },

    /// A declared source asset does not exist
    #[error("source file not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// XML attribute error
    #[error("XML attribute error: {0}")]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn icon_validation_message(missing_pair: &[String], legacy_needed: &[String]) -> String {
    let mut parts = Vec::new();
    if !missing_pair.is_empty() {
        parts.push(format!(
            "icon declarations must set both background and foreground, or a src: {}",
            missing_pair.join(", ")
        ));
    }
    if !legacy_needed.is_empty() {
        parts.push(format!(
            "adaptive icons with a color or vector foreground need an explicit src \
             as a fallback for older Android versions: {}",
            legacy_needed.join(", ")
        ));
    }
    parts.join("; ")
}
