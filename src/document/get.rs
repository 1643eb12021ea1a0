use faststr::FastStr;
use serde::de::DeserializeOwned;

use super::{decode_object, Document};
use crate::error::{Error, Result};
use crate::path::{to_segments, Path};

impl Document {
    /// Gets the document at a `path` of nested object keys.
    ///
    /// Each traversed level is decoded one object level at a time; the leaf
    /// is returned as-is, still encoded, as an owned detached subtree.
    /// Reading does not mutate the document — already-decoded levels are
    /// reused, encoded ones are decoded per call.
    ///
    /// The path must contain at least one key. A missing key fails with a
    /// not-found error, a traversed level that is not a JSON object with a
    /// decode error; both carry the consumed path prefix and the raw bytes
    /// of the node where the failure occurred.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazydoc::Document;
    ///
    /// let doc = Document::from_slice(br#"{"a": {"b": [0, 1]}, "c": 2}"#).unwrap();
    ///
    /// let b = doc.get(["a", "b"]).unwrap();
    /// assert_eq!(b.as_raw_slice(), Some(&b"[0, 1]"[..]));
    ///
    /// // missing key
    /// let err = doc.get(["a", "x"]).unwrap_err();
    /// assert!(err.is_not_found());
    ///
    /// // traversing through a scalar
    /// let err = doc.get(["c", "x"]).unwrap_err();
    /// assert!(err.is_decode());
    /// ```
    pub fn get<P>(&self, path: P) -> Result<Document>
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        let segments = to_segments(path)?;
        let mut consumed = Path::with_capacity(segments.len());
        self.get_at(&segments, &mut consumed)
    }

    // `segments` is never empty: `get` rejects zero-length paths up front.
    fn get_at(&self, segments: &[FastStr], consumed: &mut Path) -> Result<Document> {
        let key = &segments[0];
        let rest = &segments[1..];
        consumed.push(key.clone());

        if let Some(map) = &self.map {
            match map.get(key) {
                Some(child) if rest.is_empty() => Ok(child.clone()),
                Some(child) => child.get_at(rest, consumed),
                None => Err(Error::not_found(consumed.clone(), self.raw.clone())),
            }
        } else if let Some(raw) = &self.raw {
            let mut map = decode_object(raw)
                .map_err(|err| Error::decode(consumed.clone(), Some(raw.clone()), err))?;
            match map.remove(key) {
                Some(child) if rest.is_empty() => Ok(child),
                Some(child) => child.get_at(rest, consumed),
                None => Err(Error::not_found(consumed.clone(), Some(raw.clone()))),
            }
        } else {
            Err(Error::not_found(consumed.clone(), None))
        }
    }

    /// Gets the value at a `path` and decodes it into `T`.
    ///
    /// A leaf that is valid JSON but not representable as `T` fails with a
    /// type-mismatch error.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazydoc::Document;
    ///
    /// let doc = Document::from_slice(br#"{"a": {"n": 1, "s": "x"}}"#).unwrap();
    ///
    /// assert_eq!(doc.get_as::<u32, _>(["a", "n"]).unwrap(), 1);
    ///
    /// let err = doc.get_as::<String, _>(["a", "n"]).unwrap_err();
    /// assert!(err.is_type_mismatch());
    /// ```
    pub fn get_as<T, P>(&self, path: P) -> Result<T>
    where
        T: DeserializeOwned,
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        let segments = to_segments(path)?;
        let mut consumed = Path::with_capacity(segments.len());
        let leaf = self.get_at(&segments, &mut consumed)?;
        leaf.deserialize_at(&consumed)
    }

    /// Gets the string at a `path`.
    pub fn get_string<P>(&self, path: P) -> Result<String>
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        self.get_as(path)
    }

    /// Gets the boolean at a `path`.
    pub fn get_bool<P>(&self, path: P) -> Result<bool>
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        self.get_as(path)
    }

    /// Gets the signed integer at a `path`.
    ///
    /// ```
    /// use lazydoc::Document;
    ///
    /// let doc = Document::from_slice(br#"{"n": -3}"#).unwrap();
    /// assert_eq!(doc.get_i64(["n"]).unwrap(), -3);
    ///
    /// // fractional numbers do not silently truncate
    /// let doc = Document::from_slice(br#"{"n": 1.5}"#).unwrap();
    /// assert!(doc.get_i64(["n"]).unwrap_err().is_type_mismatch());
    /// ```
    pub fn get_i64<P>(&self, path: P) -> Result<i64>
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        self.get_as(path)
    }

    /// Gets the unsigned integer at a `path`.
    pub fn get_u64<P>(&self, path: P) -> Result<u64>
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        self.get_as(path)
    }

    /// Gets the float at a `path`.
    pub fn get_f64<P>(&self, path: P) -> Result<f64>
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        self.get_as(path)
    }
}

#[cfg(test)]
mod test {
    use serde::Deserialize;

    use super::*;

    fn doc(json: &str) -> Document {
        Document::from_slice(json.as_bytes()).unwrap()
    }

    fn consumed(err: &Error) -> Vec<&str> {
        err.path()
            .expect("error should carry a path")
            .segments()
            .iter()
            .map(|s| s.as_str())
            .collect()
    }

    #[test]
    fn test_get_one_level() {
        let doc = doc(r#"{"a": 1, "b": {"c": 2}}"#);
        assert_eq!(doc.get(["a"]).unwrap().as_raw_slice(), Some(&b"1"[..]));
        assert_eq!(
            doc.get(["b"]).unwrap().as_raw_slice(),
            Some(&b"{\"c\": 2}"[..])
        );
    }

    #[test]
    fn test_get_nested_leaf_stays_encoded() {
        let doc = doc(r#"{"a": {"b": {"c": [1, 2]}}}"#);
        let leaf = doc.get(["a", "b", "c"]).unwrap();
        assert!(!leaf.is_decoded());
        assert_eq!(leaf.as_raw_slice(), Some(&b"[1, 2]"[..]));
    }

    #[test]
    fn test_missing_key_records_consumed_prefix() {
        let doc = doc(r#"{"a": 1}"#);
        let err = doc.get(["x", "y"]).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(consumed(&err), ["x"]);
        assert_eq!(err.raw_bytes(), Some(&br#"{"a": 1}"#[..]));
    }

    #[test]
    fn test_missing_key_deeper() {
        let doc = doc(r#"{"a": {"b": 1}}"#);
        let err = doc.get(["a", "x"]).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(consumed(&err), ["a", "x"]);
        assert_eq!(err.raw_bytes(), Some(&br#"{"b": 1}"#[..]));
    }

    #[test]
    fn test_shape_mismatch_is_decode_error() {
        // scalar and array levels cannot be traversed
        for json in [r#"{"a": 1}"#, r#"{"a": [1, 2]}"#, r#"{"a": "s"}"#] {
            let err = doc(json).get(["a", "b"]).unwrap_err();
            assert!(err.is_decode(), "expected decode error in {json}");
            assert_eq!(consumed(&err), ["a", "b"]);
        }
    }

    #[test]
    fn test_root_shape_mismatch() {
        let err = doc("[1, 2, 3]").get(["a"]).unwrap_err();
        assert!(err.is_decode());
        assert_eq!(consumed(&err), ["a"]);
        assert_eq!(err.raw_bytes(), Some(&b"[1, 2, 3]"[..]));
    }

    #[test]
    fn test_empty_path_rejected() {
        let doc = doc(r#"{"a": 1}"#);
        let empty: [&str; 0] = [];
        assert!(doc.get(empty).unwrap_err().is_empty_path());
    }

    #[test]
    fn test_typed_getters() {
        let doc = doc(r#"{"s": "hi", "b": true, "i": -9, "u": 18446744073709551615, "f": 0.5}"#);
        assert_eq!(doc.get_string(["s"]).unwrap(), "hi");
        assert!(doc.get_bool(["b"]).unwrap());
        assert_eq!(doc.get_i64(["i"]).unwrap(), -9);
        assert_eq!(doc.get_u64(["u"]).unwrap(), u64::MAX);
        assert_eq!(doc.get_f64(["f"]).unwrap(), 0.5);
    }

    #[test]
    fn test_type_mismatch() {
        let doc = doc(r#"{"n": 42, "s": "x"}"#);

        let err = doc.get_string(["n"]).unwrap_err();
        assert!(err.is_type_mismatch());
        assert_eq!(consumed(&err), ["n"]);

        assert!(doc.get_i64(["s"]).unwrap_err().is_type_mismatch());
        assert!(doc.get_u64(["n"]).is_ok());
        assert!(doc.get_u64(["s"]).unwrap_err().is_type_mismatch());
    }

    #[test]
    fn test_negative_into_unsigned_mismatches() {
        let doc = doc(r#"{"n": -1}"#);
        assert!(doc.get_u64(["n"]).unwrap_err().is_type_mismatch());
    }

    #[test]
    fn test_get_as_struct() {
        #[derive(Debug, PartialEq, Deserialize)]
        struct Point {
            x: i32,
            y: i32,
        }

        let doc = doc(r#"{"geo": {"origin": {"x": 1, "y": 2}}}"#);
        let point: Point = doc.get_as(["geo", "origin"]).unwrap();
        assert_eq!(point, Point { x: 1, y: 2 });
    }

    #[test]
    fn test_get_reads_decoded_levels() {
        // a write decodes the path down from the root; reads afterwards must
        // see both decoded levels and still-encoded siblings
        let mut doc = doc(r#"{"a": {"b": 1}, "c": {"d": 2}}"#);
        doc.put(["a", "e"], 3).unwrap();

        assert_eq!(doc.get_i64(["a", "b"]).unwrap(), 1);
        assert_eq!(doc.get_i64(["a", "e"]).unwrap(), 3);
        assert_eq!(doc.get_i64(["c", "d"]).unwrap(), 2);
    }

    #[test]
    fn test_get_on_empty_document() {
        let err = Document::new().get(["a"]).unwrap_err();
        assert!(err.is_not_found());
        assert!(err.raw_bytes().is_none());
    }
}
