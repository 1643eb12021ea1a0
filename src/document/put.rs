use bytes::Bytes;
use faststr::FastStr;
use serde::Serialize;

use super::Document;
use crate::error::{Error, Result};
use crate::path::{to_segments, Path};

impl Document {
    /// Writes `value` at a `path` of nested object keys, returning the root
    /// for chaining.
    ///
    /// Every node along the path is materialized in place: its bytes are
    /// decoded one object level (failing with a decode error if they are not
    /// a JSON object), or a fresh empty level is created for empty and
    /// missing nodes. The leaf is encoded through the codec and always
    /// replaces whatever was there before — writing a scalar over an object
    /// discards the old subtree.
    ///
    /// On failure the tree is never corrupted, but ancestors that were
    /// already materialized stay materialized; reads and further writes keep
    /// working against them.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazydoc::Document;
    ///
    /// let mut doc = Document::from_slice(br#"{"a": {"b": 1}}"#).unwrap();
    ///
    /// doc.put(["a", "b"], 2).unwrap();
    /// doc.put(["x", "y"], "made")?; // intermediate "x" is created
    ///
    /// assert_eq!(doc.get_i64(["a", "b"]).unwrap(), 2);
    /// assert_eq!(doc.get_string(["x", "y"]).unwrap(), "made");
    /// # Ok::<(), lazydoc::Error>(())
    /// ```
    pub fn put<P, V>(&mut self, path: P, value: V) -> Result<&mut Self>
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
        V: Serialize,
    {
        let segments = to_segments(path)?;
        self.put_at(&segments, 0, &value)?;
        Ok(self)
    }

    // `depth` is always in bounds: `put` hands over a non-empty path.
    fn put_at<V: Serialize>(&mut self, segments: &[FastStr], depth: usize, value: &V) -> Result<()> {
        let map = self.materialize(&segments[..=depth])?;
        let key = &segments[depth];

        if depth + 1 == segments.len() {
            let encoded = serde_json::to_vec(value)
                .map_err(|err| Error::encode(Path::from(&segments[..=depth]), err))?;
            map.insert(key.clone(), Document::from_raw(Bytes::from(encoded)));
            return Ok(());
        }

        let child = map.entry(key.clone()).or_insert_with(Document::new);
        child.put_at(segments, depth + 1, value)
    }
}
