//! Lazily-parsed, path-addressable JSON documents.
//!
//! A [`Document`] keeps JSON as opaque encoded bytes until a caller reads or
//! writes a nested field by path. Navigation decodes exactly one object
//! level at a time, so the cost of parsing is paid only for the levels a
//! caller actually touches, and every unknown or ignored field round-trips
//! byte-for-byte.
//!
//! ```
//! use lazydoc::Document;
//!
//! let mut doc = Document::from_slice(br#"{"user": {"name": "ada"}, "raw": [1, 2]}"#).unwrap();
//!
//! assert_eq!(doc.get_string(["user", "name"]).unwrap(), "ada");
//!
//! doc.put(["user", "id"], 7).unwrap();
//!
//! let out = doc.to_vec().unwrap();
//! let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
//! assert_eq!(value["user"]["id"], 7);
//! assert_eq!(value["raw"][1], 2);
//! ```

mod document;
mod error;
mod path;

pub use faststr::FastStr;

pub use crate::document::{Document, JsonType};
pub use crate::error::{Error, Result};
pub use crate::path::Path;
