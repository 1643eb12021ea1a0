//! When navigating, decoding or re-encoding a document goes wrong.

use bytes::Bytes;
use thiserror::Error as ThisError;

use crate::path::Path;

/// Alias for a `Result` with the error type `lazydoc::Error`.
pub type Result<T> = std::result::Result<T, Error>;

/// This type represents all possible errors that can occur when reading or
/// writing a [`Document`][crate::Document].
///
/// Every failure during path navigation carries the path prefix consumed so
/// far (up to and including the key being processed) and, when the failing
/// node holds one, its raw encoded bytes. Both are exposed through
/// [`path`][Error::path] and [`raw_bytes`][Error::raw_bytes] so callers can
/// diagnose which level of a nested document went wrong.
#[derive(Debug, ThisError)]
pub enum Error {
    /// The bytes at a tree position are not valid JSON, or not a JSON object
    /// where an object was required to keep traversing.
    #[error("invalid JSON at `{path}`: {source}, value={}", raw_lossy(.raw))]
    Decode {
        path: Path,
        raw: Option<Bytes>,
        source: serde_json::Error,
    },

    /// A value supplied to a write or produced by serialization cannot be
    /// represented by the codec.
    #[error("cannot encode value at `{path}`: {source}")]
    Encode {
        path: Path,
        source: serde_json::Error,
    },

    /// A requested key is absent at some level of the document.
    #[error("no data at `{path}`, value={}", raw_lossy(.raw))]
    NotFound { path: Path, raw: Option<Bytes> },

    /// A leaf decodes as JSON but not as the requested type.
    #[error("type mismatch at `{path}`: {source}, value={}", raw_lossy(.raw))]
    TypeMismatch {
        path: Path,
        raw: Option<Bytes>,
        source: serde_json::Error,
    },

    /// A read or write was attempted with a zero-length path.
    #[error("path must contain at least one key")]
    EmptyPath,
}

impl Error {
    pub(crate) fn decode(path: Path, raw: Option<Bytes>, source: serde_json::Error) -> Self {
        Error::Decode { path, raw, source }
    }

    pub(crate) fn encode(path: Path, source: serde_json::Error) -> Self {
        Error::Encode { path, source }
    }

    pub(crate) fn not_found(path: Path, raw: Option<Bytes>) -> Self {
        Error::NotFound { path, raw }
    }

    pub(crate) fn type_mismatch(path: Path, raw: Option<Bytes>, source: serde_json::Error) -> Self {
        Error::TypeMismatch { path, raw, source }
    }

    /// Returns true if this error was caused by bytes that are not valid
    /// JSON, or not a JSON object where one was required.
    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode { .. })
    }

    /// Returns true if this error was caused by a value the codec cannot
    /// represent.
    pub fn is_encode(&self) -> bool {
        matches!(self, Error::Encode { .. })
    }

    /// Returns true if this error was caused by a key that is absent at some
    /// level of the document.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// Returns true if this error was caused by a leaf that decodes as JSON
    /// but not as the requested type.
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Error::TypeMismatch { .. })
    }

    /// Returns true if this error was caused by an empty path.
    pub fn is_empty_path(&self) -> bool {
        matches!(self, Error::EmptyPath)
    }

    /// The path prefix consumed before the failure, if the error occurred
    /// during navigation.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Error::Decode { path, .. }
            | Error::Encode { path, .. }
            | Error::NotFound { path, .. }
            | Error::TypeMismatch { path, .. } => Some(path),
            Error::EmptyPath => None,
        }
    }

    /// The raw encoded bytes of the node at which the failure occurred, if
    /// that node held any.
    pub fn raw_bytes(&self) -> Option<&[u8]> {
        match self {
            Error::Decode { raw, .. }
            | Error::NotFound { raw, .. }
            | Error::TypeMismatch { raw, .. } => raw.as_deref(),
            Error::Encode { .. } | Error::EmptyPath => None,
        }
    }
}

fn raw_lossy(raw: &Option<Bytes>) -> String {
    match raw {
        Some(bytes) => format!("{:?}", String::from_utf8_lossy(bytes)),
        None => "<none>".to_string(),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_error_display() {
        let mut path = Path::new();
        path.push("a".into());
        path.push("b".into());
        let err = Error::not_found(path, Some(Bytes::from_static(b"{\"c\":1}")));
        assert_eq!(err.to_string(), "no data at `$.a.b`, value=\"{\\\"c\\\":1}\"");
        assert!(err.is_not_found());
        assert_eq!(err.raw_bytes(), Some(&b"{\"c\":1}"[..]));
    }

    #[test]
    fn test_empty_path_has_no_context() {
        let err = Error::EmptyPath;
        assert!(err.is_empty_path());
        assert!(err.path().is_none());
        assert!(err.raw_bytes().is_none());
    }
}
