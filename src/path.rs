use std::fmt;

use faststr::FastStr;

use crate::error::{Error, Result};

/// An ordered sequence of object keys identifying a location in a document.
///
/// Navigation APIs accept any `IntoIterator` of string-like keys directly;
/// `Path` is the owned form carried by errors to report the prefix consumed
/// before a failure.
///
/// ```
/// use lazydoc::Document;
///
/// let doc = Document::from_slice(br#"{"a": {"b": 1}}"#).unwrap();
/// let err = doc.get(["a", "missing"]).unwrap_err();
/// let consumed: Vec<&str> = err.path().unwrap().segments().iter().map(|s| s.as_str()).collect();
/// assert_eq!(consumed, ["a", "missing"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path(Vec<FastStr>);

impl Path {
    pub(crate) fn new() -> Self {
        Path(Vec::new())
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Path(Vec::with_capacity(capacity))
    }

    pub(crate) fn push(&mut self, key: FastStr) {
        self.0.push(key);
    }

    /// The keys consumed, in traversal order.
    pub fn segments(&self) -> &[FastStr] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&[FastStr]> for Path {
    fn from(segments: &[FastStr]) -> Self {
        Path(segments.to_vec())
    }
}

impl fmt::Display for Path {
    /// Renders as `$` for the root and `$.a.b` below it.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.0 {
            write!(f, ".{segment}")?;
        }
        Ok(())
    }
}

/// Collects a caller-supplied path into owned segments, rejecting the
/// zero-length path up front.
pub(crate) fn to_segments<P>(path: P) -> Result<Vec<FastStr>>
where
    P: IntoIterator,
    P::Item: AsRef<str>,
{
    let segments: Vec<FastStr> = path
        .into_iter()
        .map(|key| FastStr::new(key.as_ref()))
        .collect();
    if segments.is_empty() {
        return Err(Error::EmptyPath);
    }
    Ok(segments)
}
