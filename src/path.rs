//! Relative path resolution for cross-file references
//!
//! OBJ files reference MTL libraries and MTL files reference textures
//! by paths relative to the referencing file. Resolution here is pure
//! string manipulation, independent of the local filesystem and of the
//! slash/backslash convention the asset was authored with.

use crate::error::{Error, Result};

/// Detect which separator a path uses
///
/// Returns `Some('/')` or `Some('\\')` when the path uses exactly one
/// of the two conventions, `None` when it contains neither, and a
/// [`Error::PathAmbiguity`] when it mixes both.
fn detect_separator(path: &str) -> Result<Option<char>> {
    let has_slash = path.contains('/');
    let has_backslash = path.contains('\\');
    match (has_slash, has_backslash) {
        (true, true) => Err(Error::PathAmbiguity(path.to_string())),
        (true, false) => Ok(Some('/')),
        (false, true) => Ok(Some('\\')),
        (false, false) => Ok(None),
    }
}

/// Split a path into non-empty segments on its detected separator
fn split_segments(path: &str, preferred: char) -> Result<Vec<&str>> {
    let separator = detect_separator(path)?.unwrap_or(preferred);
    Ok(path
        .split(separator)
        .filter(|segment| !segment.is_empty())
        .collect())
}

/// Resolve `relative` against `base` using `/` as the preferred separator
///
/// See [`resolve_relative_with`] for the full contract.
pub fn resolve_relative(base: &str, relative: &str) -> Result<String> {
    resolve_relative_with(base, relative, '/')
}

/// Resolve a relative reference path against a base file path
///
/// Each input may use `/` or `\` separators (but not both at once).
/// If the last segment of `base` contains a `.` it is treated as a
/// filename and dropped, so resolution happens against the containing
/// directory. `.` segments are elided and `..` segments pop the
/// previous segment; a `..` with nothing left to pop (or on top of
/// another `..`) is kept literally, which permits escaping above the
/// known root.
///
/// # Example
///
/// ```
/// use meshload::resolve_relative;
///
/// assert_eq!(resolve_relative("models/foo.obj", "tex.png").unwrap(), "models/tex.png");
/// assert_eq!(resolve_relative("a/b/c.obj", "../d.png").unwrap(), "a/d.png");
/// ```
pub fn resolve_relative_with(base: &str, relative: &str, preferred_separator: char) -> Result<String> {
    let mut segments = split_segments(base, preferred_separator)?;

    // directory-of-file semantics: a dotted last segment is a filename
    if segments.last().is_some_and(|last| last.contains('.')) {
        segments.pop();
    }

    segments.extend(split_segments(relative, preferred_separator)?);

    let mut resolved: Vec<&str> = Vec::with_capacity(segments.len());
    for segment in segments {
        match segment {
            "." => {}
            ".." => {
                if resolved.last().is_none_or(|&top| top == "..") {
                    resolved.push(segment);
                } else {
                    resolved.pop();
                }
            }
            _ => resolved.push(segment),
        }
    }

    Ok(resolved.join(&preferred_separator.to_string()))
}
