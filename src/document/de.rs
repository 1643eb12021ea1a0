use std::borrow::Cow;

use bytes::Bytes;
use serde::de::{Deserialize, DeserializeOwned, Deserializer};
use serde_json::value::RawValue;

use super::Document;
use crate::error::{Error, Result};
use crate::path::Path;

impl Document {
    /// Decodes this node into a Rust type.
    ///
    /// An encoded node is decoded directly from its bytes; a decoded node is
    /// re-serialized first so writes below it are observed. An empty node
    /// decodes as `null`.
    ///
    /// ```
    /// use lazydoc::Document;
    ///
    /// let doc = Document::from_slice(br#"{"a": {"b": [1, 2]}}"#).unwrap();
    /// let b: Vec<u8> = doc.get(["a", "b"]).unwrap().deserialize().unwrap();
    /// assert_eq!(b, [1, 2]);
    /// ```
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        self.deserialize_at(&Path::new())
    }

    // Decode into `T`, reporting failures against the `consumed` prefix.
    // Data errors from the codec mean the JSON was fine but the type was
    // not: those become type-mismatch errors.
    pub(crate) fn deserialize_at<T: DeserializeOwned>(&self, consumed: &Path) -> Result<T> {
        let bytes: Cow<'_, [u8]> = if self.map.is_some() {
            Cow::Owned(self.to_vec()?)
        } else if let Some(raw) = &self.raw {
            Cow::Borrowed(raw.as_ref())
        } else {
            Cow::Borrowed(&b"null"[..])
        };

        serde_json::from_slice(&bytes).map_err(|err| {
            if err.is_data() {
                Error::type_mismatch(consumed.clone(), self.raw.clone(), err)
            } else {
                Error::decode(consumed.clone(), self.raw.clone(), err)
            }
        })
    }
}

impl<'de> Deserialize<'de> for Document {
    /// Captures the value as an opaque raw span, so documents nested inside
    /// caller structs stay lazy.
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        Ok(Document::from_raw(Bytes::copy_from_slice(
            raw.get().as_bytes(),
        )))
    }
}

#[cfg(test)]
mod test {
    use serde::Deserialize;

    use super::*;

    #[test]
    fn test_deserialize_encoded_node() {
        let doc = Document::from_slice(b"[1, 2, 3]").unwrap();
        let v: Vec<i64> = doc.deserialize().unwrap();
        assert_eq!(v, [1, 2, 3]);
    }

    #[test]
    fn test_deserialize_decoded_node_sees_writes() {
        let mut doc = Document::from_slice(br#"{"a": 1}"#).unwrap();
        doc.put(["b"], 2).unwrap();

        #[derive(Deserialize)]
        struct Pair {
            a: i64,
            b: i64,
        }
        let pair: Pair = doc.deserialize().unwrap();
        assert_eq!((pair.a, pair.b), (1, 2));
    }

    #[test]
    fn test_deserialize_empty_node_is_null() {
        let v: Option<i64> = Document::new().deserialize().unwrap();
        assert!(v.is_none());
    }

    #[test]
    fn test_document_nested_in_struct() {
        #[derive(Deserialize)]
        struct Envelope {
            kind: String,
            payload: Document,
        }

        let env: Envelope =
            serde_json::from_str(r#"{"kind": "event", "payload": {"id": 9}}"#).unwrap();
        assert_eq!(env.kind, "event");
        assert_eq!(env.payload.get_i64(["id"]).unwrap(), 9);
    }

    #[test]
    fn test_type_mismatch_classification() {
        let doc = Document::from_slice(b"\"text\"").unwrap();
        let err = doc.deserialize::<i64>().unwrap_err();
        assert!(err.is_type_mismatch());
    }
}
