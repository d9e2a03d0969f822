use miette::{Diagnostic, SourceSpan};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while generating key code tables
#[derive(Debug, Error, Diagnostic)]
pub enum KeycodeError {
    /// IO error when reading an input, config or side-table file
    #[error("Failed to read {}", path.display())]
    #[diagnostic(code(qkeycode::io))]
    Read {
        #[source]
        source: io::Error,
        /// Path of the file that could not be read
        path: PathBuf,
    },

    /// The captured key code literal is missing or is not valid JSON
    #[error("Failed to parse the {marker} definition in {}", path.display())]
    #[diagnostic(
        code(qkeycode::parse_error),
        help("The definition must open on a line that starts with a brace and names the marker, and hold a 'data' list")
    )]
    ParseError {
        #[source]
        source: serde_json::Error,
        /// Path to the file that failed to parse
        path: PathBuf,
        /// Marker token the capture looked for
        marker: String,
        /// Normalized text that was handed to the JSON parser
        #[source_code]
        src: Option<String>,
        /// Location of the error in the captured text
        #[label("parse error here")]
        span: Option<SourceSpan>,
    },

    /// Two identifiers derive the same enumeration constant
    #[error("Key codes '{first}' and '{second}' both map to {name}")]
    #[diagnostic(
        code(qkeycode::duplicate_enum_name),
        help("Enumeration names are the prefix plus the uppercased identifier, so identifiers must differ by more than case")
    )]
    DuplicateEnumName {
        /// The colliding enumeration name
        name: String,
        /// Identifier that derived the name first
        first: String,
        /// Identifier that derived it again
        second: String,
        /// Position of the second identifier in the key code list
        position: usize,
    },

    /// The side table could not be read or a record could not be decoded
    #[error("Failed to load side table {}", path.display())]
    #[diagnostic(code(qkeycode::side_table))]
    SideTable {
        #[source]
        source: csv::Error,
        /// Path of the side table
        path: PathBuf,
    },

    /// Side table and key code list disagree on the number of keys
    #[error("Side table {} has {found} rows but the key code list has {expected} entries", path.display())]
    #[diagnostic(
        code(qkeycode::row_count),
        help("Add or remove rows so the side table has exactly one row per key code, in the same order")
    )]
    RowCount {
        path: PathBuf,
        expected: usize,
        found: usize,
    },

    /// A side-table row does not describe the key code at the same position
    #[error("Side table row {position} (line {line}) is {found}, expected {expected}")]
    #[diagnostic(
        code(qkeycode::row_mismatch),
        help("The side table has drifted out of sync with the key code list; regenerate or reorder it")
    )]
    RowMismatch {
        /// 0-based position in the key code list
        position: usize,
        /// Line of the offending record in the CSV file
        line: u64,
        expected: String,
        found: String,
    },

    /// Malformed generator configuration
    #[error("Invalid config: {message}")]
    #[diagnostic(code(qkeycode::config))]
    Config { message: String },

    /// Writing into the output buffer failed
    #[error("Failed to format generated code")]
    #[diagnostic(code(qkeycode::format_error))]
    Format(#[from] std::fmt::Error),
}

impl KeycodeError {
    /// Create a read error for `path`
    pub fn read(source: io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Read {
            source,
            path: path.into(),
        }
    }

    /// Create a parse error pointing into the captured text
    pub fn parse_error_with_source(
        source: serde_json::Error,
        path: impl Into<PathBuf>,
        marker: impl Into<String>,
        src: String,
    ) -> Self {
        let span = if src.is_empty() {
            None
        } else {
            Some((byte_offset(&src, source.line(), source.column()), 1).into())
        };

        Self::ParseError {
            source,
            path: path.into(),
            marker: marker.into(),
            src: Some(src),
            span,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Convert serde_json's 1-based line and column into a byte offset into `src`
fn byte_offset(src: &str, line: usize, column: usize) -> usize {
    let line_start: usize = src
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    let offset = line_start + column.saturating_sub(1);
    // serde_json reports EOF errors one past the end
    offset.min(src.len().saturating_sub(1))
}

/// Result type for key code generation
pub type Result<T> = std::result::Result<T, KeycodeError>;
