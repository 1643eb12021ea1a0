//! Panicking variants of the fallible document API.
//!
//! For call sites where the path and shape are invariants the caller
//! controls (reading a document it produced itself, a schema it owns), the
//! `must_*` methods convert any failure into a panic carrying the same
//! diagnostic message the error would have displayed. Everything else should
//! use the fallible API.

use serde::Serialize;

use super::Document;
use crate::error::Result;

fn must<T>(result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("{err}"),
    }
}

impl Document {
    /// Like [`get`][Self::get], but panics on any failure.
    pub fn must_get<P>(&self, path: P) -> Document
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        must(self.get(path))
    }

    /// Like [`get_string`][Self::get_string], but panics on any failure.
    pub fn must_get_string<P>(&self, path: P) -> String
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        must(self.get_string(path))
    }

    /// Like [`get_bool`][Self::get_bool], but panics on any failure.
    pub fn must_get_bool<P>(&self, path: P) -> bool
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        must(self.get_bool(path))
    }

    /// Like [`get_i64`][Self::get_i64], but panics on any failure.
    pub fn must_get_i64<P>(&self, path: P) -> i64
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        must(self.get_i64(path))
    }

    /// Like [`get_u64`][Self::get_u64], but panics on any failure.
    pub fn must_get_u64<P>(&self, path: P) -> u64
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        must(self.get_u64(path))
    }

    /// Like [`get_f64`][Self::get_f64], but panics on any failure.
    pub fn must_get_f64<P>(&self, path: P) -> f64
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        must(self.get_f64(path))
    }

    /// Like [`put`][Self::put], but panics on any failure.
    ///
    /// ```
    /// use lazydoc::Document;
    ///
    /// let mut doc = Document::new();
    /// doc.must_put(["a"], 1).must_put(["b"], 2);
    /// assert_eq!(doc.must_get_i64(["a"]), 1);
    /// ```
    pub fn must_put<P, V>(&mut self, path: P, value: V) -> &mut Self
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
        V: Serialize,
    {
        match self.put(path, value) {
            Ok(root) => root,
            Err(err) => panic!("{err}"),
        }
    }

    /// Like [`to_vec`][Self::to_vec], but panics on any failure.
    pub fn must_to_vec(&self) -> Vec<u8> {
        must(self.to_vec())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_must_variants_pass_through() {
        let mut doc = Document::from_slice(br#"{"a": {"n": 7, "s": "x", "b": true}}"#).unwrap();
        assert_eq!(doc.must_get(["a"]).json_type(), Some(crate::JsonType::Object));
        assert_eq!(doc.must_get_i64(["a", "n"]), 7);
        assert_eq!(doc.must_get_u64(["a", "n"]), 7);
        assert_eq!(doc.must_get_string(["a", "s"]), "x");
        assert!(doc.must_get_bool(["a", "b"]));

        doc.must_put(["a", "f"], 0.5);
        assert_eq!(doc.must_get_f64(["a", "f"]), 0.5);
        assert!(!doc.must_to_vec().is_empty());
    }

    #[test]
    #[should_panic(expected = "no data")]
    fn test_must_get_panics_on_missing_key() {
        let doc = Document::from_slice(br#"{"a": 1}"#).unwrap();
        doc.must_get(["b"]);
    }

    #[test]
    #[should_panic(expected = "type mismatch")]
    fn test_must_get_string_panics_on_number() {
        let doc = Document::from_slice(br#"{"a": 1}"#).unwrap();
        doc.must_get_string(["a"]);
    }

    #[test]
    #[should_panic(expected = "invalid JSON")]
    fn test_must_put_panics_through_scalar() {
        let mut doc = Document::from_slice(br#"{"a": 1}"#).unwrap();
        doc.must_put(["a", "b"], 2);
    }
}
