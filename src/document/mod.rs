mod de;
mod get;
mod must;
mod put;
mod ser;

use std::collections::HashMap;
use std::str::FromStr;

use ahash::RandomState;
use bytes::Bytes;
use faststr::FastStr;
use serde_json::value::RawValue;

use crate::error::{Error, Result};
use crate::path::Path;

/// Mapping from object key to child document, one decoded level of a tree.
pub(crate) type Map = HashMap<FastStr, Document, RandomState>;

/// A lazily-parsed, path-addressable JSON document.
///
/// A `Document` wraps an encoded JSON value and defers parsing until a nested
/// field is actually read or written. Navigation decodes exactly one object
/// level at a time: the traversed levels become in-memory key maps while
/// every untouched sibling keeps its original bytes and is re-emitted
/// verbatim on serialization.
///
/// # Examples
///
/// ```
/// use lazydoc::Document;
///
/// let input = br#"{"user": {"name": "ada", "id": 7}, "extra": {"k": [1, 2]}}"#;
/// let mut doc = Document::from_slice(input).unwrap();
///
/// // reads decode only the levels they traverse
/// assert_eq!(doc.get_string(["user", "name"]).unwrap(), "ada");
/// assert_eq!(doc.get_i64(["user", "id"]).unwrap(), 7);
///
/// // writes create intermediate objects as needed
/// doc.put(["user", "tags", "vip"], true).unwrap();
///
/// // untouched subtrees round-trip unchanged
/// let out = doc.to_vec().unwrap();
/// let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
/// assert_eq!(value["extra"]["k"][1], 2);
/// assert_eq!(value["user"]["tags"]["vip"], true);
/// ```
///
/// A document holds an encoded form, a decoded key map, or both; when both
/// are present the map is authoritative. A child returned by [`get`][Self::get]
/// is an owned, detached subtree — in-place mutation of a tree goes through
/// [`put`][Self::put] on its root.
#[derive(Debug, Clone, Default)]
pub struct Document {
    // the raw slice of the origin json, kept verbatim for re-serialization
    raw: Option<Bytes>,
    // decoded immediate keys; authoritative over `raw` once present
    map: Option<Map>,
}

impl Document {
    /// Creates an empty document with neither encoded bytes nor decoded
    /// keys, the starting point for pure-write construction.
    ///
    /// ```
    /// use lazydoc::Document;
    ///
    /// let mut doc = Document::new();
    /// doc.put(["a", "b"], 1).unwrap();
    /// assert_eq!(doc.to_vec().unwrap(), br#"{"a":{"b":1}}"#);
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a document from a byte slice, copying it.
    ///
    /// The input must be one complete JSON value of any kind; syntax is
    /// checked with a raw scan that builds no tree. Nested structure is not
    /// decoded until navigated.
    pub fn from_slice(json: &[u8]) -> Result<Self> {
        Self::from_bytes(Bytes::copy_from_slice(json))
    }

    /// Parses a document from [`Bytes`] without copying.
    ///
    /// ```
    /// use bytes::Bytes;
    /// use lazydoc::Document;
    ///
    /// let doc = Document::from_bytes(Bytes::from_static(br#"{"a": 1}"#)).unwrap();
    /// assert_eq!(doc.get_i64(["a"]).unwrap(), 1);
    ///
    /// let err = Document::from_bytes(Bytes::from_static(b"{\"a\": tru }"));
    /// assert!(err.unwrap_err().is_decode());
    /// ```
    pub fn from_bytes(json: Bytes) -> Result<Self> {
        if let Err(err) = serde_json::from_slice::<&RawValue>(&json) {
            return Err(Error::decode(Path::new(), Some(json), err));
        }
        Ok(Document {
            raw: Some(json),
            map: None,
        })
    }

    // Wraps already-validated bytes: a sub-slice of a parsed parent or the
    // codec's output for a written leaf.
    pub(crate) fn from_raw(raw: Bytes) -> Self {
        Document {
            raw: Some(raw),
            map: None,
        }
    }

    /// The encoded form of this node, if one is present.
    ///
    /// Present on parsed nodes and written leaves; absent on fresh empty
    /// nodes and intermediate nodes created by [`put`][Self::put].
    pub fn as_raw_slice(&self) -> Option<&[u8]> {
        self.raw.as_deref()
    }

    /// Whether this node's immediate keys have been decoded.
    pub fn is_decoded(&self) -> bool {
        self.map.is_some()
    }

    /// The JSON type of this node, classified without decoding.
    ///
    /// Returns `None` for an empty node.
    ///
    /// ```
    /// use lazydoc::{Document, JsonType};
    ///
    /// let doc = Document::from_slice(br#"{"a": [1], "b": "s"}"#).unwrap();
    /// assert_eq!(doc.json_type(), Some(JsonType::Object));
    /// assert_eq!(doc.get(["a"]).unwrap().json_type(), Some(JsonType::Array));
    /// assert_eq!(doc.get(["b"]).unwrap().json_type(), Some(JsonType::String));
    /// assert_eq!(Document::new().json_type(), None);
    /// ```
    pub fn json_type(&self) -> Option<JsonType> {
        if self.map.is_some() {
            return Some(JsonType::Object);
        }
        let raw = self.raw.as_deref()?;
        let first = raw.iter().copied().find(|b| !b.is_ascii_whitespace())?;
        match first {
            b'-' | b'0'..=b'9' => Some(JsonType::Number),
            b'"' => Some(JsonType::String),
            b'{' => Some(JsonType::Object),
            b'[' => Some(JsonType::Array),
            b't' | b'f' => Some(JsonType::Boolean),
            b'n' => Some(JsonType::Null),
            _ => None,
        }
    }

    // Ensures this node has a decoded key map, decoding its bytes one level
    // if needed. `consumed` is the path prefix reported on a decode failure.
    pub(crate) fn materialize(&mut self, consumed: &[FastStr]) -> Result<&mut Map> {
        let map = match self.map.take() {
            Some(map) => map,
            None => match &self.raw {
                Some(raw) => decode_object(raw)
                    .map_err(|err| Error::decode(consumed.into(), Some(raw.clone()), err))?,
                None => Map::default(),
            },
        };
        Ok(self.map.insert(map))
    }
}

impl FromStr for Document {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_slice(s.as_bytes())
    }
}

/// Decodes one object level: the immediate keys of `raw`, each value wrapped
/// as an encoded-only child sharing the parent buffer.
///
/// Fails when `raw` is not a JSON object (scalar, array, malformed). This is
/// where shape errors surface, not at initial parse.
pub(crate) fn decode_object(raw: &Bytes) -> serde_json::Result<Map> {
    let entries: HashMap<FastStr, &RawValue, RandomState> = serde_json::from_slice(raw)?;
    let mut map = Map::with_capacity_and_hasher(entries.len(), RandomState::default());
    for (key, value) in entries {
        let sub = raw.slice_ref(value.get().as_bytes());
        map.insert(key, Document::from_raw(sub));
    }
    Ok(map)
}

/// The JSON type of a document node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonType {
    Null,
    Boolean,
    Number,
    String,
    Object,
    Array,
}
