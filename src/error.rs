//! Error types for model asset loading
//!
//! This module provides error handling for OBJ/MTL/STL loading operations.
//! All errors include error codes for categorization and enough context to
//! locate the offending path or line.
//!
//! # Error Codes
//!
//! Error codes follow the pattern: `E<category><number>`
//!
//! Categories:
//! - **E1xxx**: I/O and fetch errors
//! - **E2xxx**: path resolution errors
//! - **E3xxx**: record parsing errors
//! - **E4xxx**: unsupported content
//!
//! ## Common Error Codes
//!
//! - `E1001`: I/O error reading a file
//! - `E1002`: the text/byte source could not retrieve a path
//! - `E2001`: a path mixes `/` and `\` separators
//! - `E3001`: malformed record (bad number, missing context, truncated data)
//! - `E3002`: `newmtl` redeclares an existing material name
//! - `E4001`: face arity outside the supported 3..=4 range
//! - `E4002`: divergent color/specular texture maps on one material
//! - `E4003`: no parser registered for the requested file extension

use std::io;
use thiserror::Error;

/// Result type for model loading operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when loading OBJ/MTL/STL assets
#[derive(Error, Debug)]
pub enum Error {
    /// IO error occurred while reading a file
    ///
    /// **Error Code**: E1001
    ///
    /// **Common Causes**:
    /// - File not found
    /// - Insufficient permissions
    /// - Disk read error
    #[error("[E1001] I/O error: {0}")]
    Io(#[from] io::Error),

    /// The underlying text/byte source failed to retrieve a path
    ///
    /// **Error Code**: E1002
    ///
    /// Propagated from the [`TextSource`](crate::source::TextSource)
    /// collaborator, never generated by the parsers themselves.
    #[error("[E1002] fetch failed for '{path}': {reason}")]
    Fetch {
        /// The path whose retrieval failed
        path: String,
        /// Human-readable failure description from the source
        reason: String,
    },

    /// A path string contains both `/` and `\` separators
    ///
    /// **Error Code**: E2001
    ///
    /// Relative-path resolution needs a single unambiguous separator
    /// convention per input path.
    #[error("[E2001] ambiguous path separator in '{0}'")]
    PathAmbiguity(String),

    /// A record could not be parsed
    ///
    /// **Error Code**: E3001
    ///
    /// **Common Causes**:
    /// - Non-numeric characters in numeric fields
    /// - Property records before any `newmtl` context
    /// - Face indices outside the vertex pools
    /// - Truncated STL buffers
    #[error("[E3001] malformed record: {0}")]
    MalformedRecord(String),

    /// `newmtl` redeclares an existing name within one MTL parse
    ///
    /// **Error Code**: E3002
    #[error("[E3002] material '{0}' does already exist")]
    DuplicateMaterial(String),

    /// A face has an unsupported number of vertices
    ///
    /// **Error Code**: E4001
    ///
    /// Only triangles and quadrilaterals are triangulated; faces with
    /// fewer than 3 or more than 4 vertices are rejected.
    #[error("[E4001] unsupported geometry: {0}")]
    UnsupportedGeometry(String),

    /// A material is assigned two distinct color/specular map paths
    ///
    /// **Error Code**: E4002
    ///
    /// `map_Kd` and `map_Ks` share one `color_map` slot; declaring two
    /// different paths for the same material is not supported.
    #[error("[E4002] unsupported material: {0}")]
    UnsupportedMaterial(String),

    /// A requested model path's extension has no matching parser
    ///
    /// **Error Code**: E4003
    #[error("[E4003] unsupported file type: '{0}'")]
    UnsupportedFileType(String),
}

impl From<std::num::ParseFloatError> for Error {
    fn from(err: std::num::ParseFloatError) -> Self {
        Error::MalformedRecord(format!("failed to parse floating-point number: {}", err))
    }
}

impl From<std::num::ParseIntError> for Error {
    fn from(err: std::num::ParseIntError) -> Self {
        Error::MalformedRecord(format!("failed to parse integer: {}", err))
    }
}

impl Error {
    /// Create a MalformedRecord error with record context
    ///
    /// # Arguments
    /// * `record` - The record keyword being parsed (e.g., "Kd", "f")
    /// * `message` - Description of the error
    pub fn malformed_record(record: &str, message: &str) -> Self {
        Error::MalformedRecord(format!("record '{}': {}", record, message))
    }

    /// Create a MalformedRecord error for a numeric field that failed to parse
    ///
    /// # Arguments
    /// * `record` - The record keyword being parsed
    /// * `value` - The value that failed to parse
    /// * `expected` - The expected type (e.g., "floating-point number")
    pub fn bad_field(record: &str, value: &str, expected: &str) -> Self {
        Error::MalformedRecord(format!(
            "record '{}': expected {}, got '{}'",
            record, expected, value
        ))
    }

    /// Create a Fetch error
    ///
    /// # Arguments
    /// * `path` - The path that could not be retrieved
    /// * `reason` - Failure description from the source
    pub fn fetch(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Fetch {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_in_messages() {
        let io_err = Error::Io(io::Error::new(io::ErrorKind::NotFound, "test"));
        assert!(io_err.to_string().contains("[E1001]"));

        let fetch = Error::fetch("models/a.obj", "404");
        assert!(fetch.to_string().contains("[E1002]"));
        assert!(fetch.to_string().contains("models/a.obj"));

        let ambiguous = Error::PathAmbiguity(r"a/b\c".to_string());
        assert!(ambiguous.to_string().contains("[E2001]"));

        let malformed = Error::MalformedRecord("test".to_string());
        assert!(malformed.to_string().contains("[E3001]"));

        let duplicate = Error::DuplicateMaterial("steel".to_string());
        assert!(duplicate.to_string().contains("[E3002]"));
        assert!(duplicate.to_string().contains("steel"));

        let geometry = Error::UnsupportedGeometry("not enough vertices".to_string());
        assert!(geometry.to_string().contains("[E4001]"));

        let material = Error::UnsupportedMaterial("test".to_string());
        assert!(material.to_string().contains("[E4002]"));

        let file_type = Error::UnsupportedFileType("model.ply".to_string());
        assert!(file_type.to_string().contains("[E4003]"));
    }

    #[test]
    fn test_malformed_record_helper() {
        let err = Error::malformed_record("Kd", "expected 3 components");
        assert!(err.to_string().contains("record 'Kd'"));
        assert!(err.to_string().contains("expected 3 components"));
        assert!(err.to_string().contains("[E3001]"));
    }

    #[test]
    fn test_bad_field_helper() {
        let err = Error::bad_field("Ns", "abc", "floating-point number");
        assert!(err.to_string().contains("record 'Ns'"));
        assert!(err.to_string().contains("'abc'"));
        assert!(err.to_string().contains("floating-point number"));
    }

    #[test]
    fn test_parse_float_error_conversion() {
        let parse_err: std::num::ParseFloatError = "not_a_number".parse::<f32>().unwrap_err();
        let err = Error::from(parse_err);
        assert!(err.to_string().contains("floating-point number"));
        assert!(err.to_string().contains("[E3001]"));
    }

    #[test]
    fn test_parse_int_error_conversion() {
        let parse_err: std::num::ParseIntError = "not_a_number".parse::<i64>().unwrap_err();
        let err = Error::from(parse_err);
        assert!(err.to_string().contains("integer"));
        assert!(err.to_string().contains("[E3001]"));
    }
}
