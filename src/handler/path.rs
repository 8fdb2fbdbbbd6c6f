//! Request path translation
//!
//! Maps a client-supplied request target onto the served directory tree.

use percent_encoding::percent_decode_str;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

/// A request path reduced to root-relative segments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPath {
    segments: Vec<String>,
    trailing_slash: bool,
}

impl RequestPath {
    /// Parse the path part of a request target
    ///
    /// Query and fragment are ignored. Segments are percent-decoded, then
    /// `.` and empty segments are dropped and `..` removes the previous
    /// segment, so the result can never climb above the root.
    pub fn parse(target: &str) -> Self {
        let path = target
            .split_once(['?', '#'])
            .map_or(target, |(path, _)| path);
        let trailing_slash = path.trim_end().ends_with('/');
        let decoded = decode(path);

        let mut segments: Vec<String> = Vec::new();
        for segment in decoded.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    segments.pop();
                }
                s if s.contains(MAIN_SEPARATOR) => {}
                s => segments.push(s.to_string()),
            }
        }

        Self {
            segments,
            trailing_slash,
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub const fn trailing_slash(&self) -> bool {
        self.trailing_slash
    }

    /// Filesystem location of this path under `root`
    pub fn resolve(&self, root: &Path) -> PathBuf {
        let mut path = root.to_path_buf();
        path.extend(&self.segments);
        path
    }
}

/// Percent-decode a request path; invalid UTF-8 is replaced, not rejected
pub fn decode(path: &str) -> String {
    percent_decode_str(path).decode_utf8_lossy().into_owned()
}
