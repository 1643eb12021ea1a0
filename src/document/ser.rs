use bytes::Bytes;
use serde::ser::{Error as _, Serialize, SerializeMap, Serializer};
use serde_json::value::RawValue;

use super::Document;
use crate::error::{Error, Result};
use crate::path::Path;

impl Document {
    /// Serializes the document to JSON bytes.
    ///
    /// A node with decoded keys is re-serialized from them, each child by
    /// this same rule, so a write anywhere below the root re-encodes the
    /// chain of touched ancestors while every untouched subtree is emitted
    /// from its original bytes verbatim. A node that was never decoded is
    /// returned byte-for-byte; an empty node serializes as `null`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazydoc::Document;
    ///
    /// // no writes: byte-identical round trip, whitespace included
    /// let input = br#"{ "a": 1,  "b": [ 2 ] }"#;
    /// let doc = Document::from_slice(input).unwrap();
    /// assert_eq!(doc.to_vec().unwrap(), input);
    /// ```
    pub fn to_vec(&self) -> Result<Vec<u8>> {
        if self.map.is_some() {
            serde_json::to_vec(self).map_err(|err| Error::encode(Path::new(), err))
        } else if let Some(raw) = &self.raw {
            Ok(raw.to_vec())
        } else {
            Ok(b"null".to_vec())
        }
    }

    /// Serializes the document to [`Bytes`], without copying when the
    /// document was never decoded.
    pub fn to_bytes(&self) -> Result<Bytes> {
        match &self.raw {
            Some(raw) if self.map.is_none() => Ok(raw.clone()),
            _ => self.to_vec().map(Bytes::from),
        }
    }
}

impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if let Some(map) = &self.map {
            let mut state = serializer.serialize_map(Some(map.len()))?;
            for (key, child) in map {
                state.serialize_entry(key.as_str(), child)?;
            }
            state.end()
        } else if let Some(raw) = &self.raw {
            // replay the stored span through the codec untouched
            let text = std::str::from_utf8(raw).map_err(S::Error::custom)?;
            let span: &RawValue = serde_json::from_str(text).map_err(S::Error::custom)?;
            span.serialize(serializer)
        } else {
            serializer.serialize_unit()
        }
    }
}
