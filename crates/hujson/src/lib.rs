//! Lossless parsing and normalization of Human JSON.
//!
//! Human JSON is a superset of JSON (RFC 8259) that permits `//` and
//! `/* */` comments, trailing commas, and backtick-delimited multiline
//! strings. This crate parses such documents into a tree that preserves
//! every input byte, and rewrites that tree into strict JSON two ways:
//!
//! - [`minimize`] strips all whitespace, comments, and trailing commas,
//!   producing the shortest equivalent strict JSON;
//! - [`standardize`] blanks comments and trailing commas to spaces of the
//!   same width, producing strict JSON with every original byte offset
//!   and line number intact — handy when another tool reports positions
//!   against the original file.
//!
//! # Example
//!
//! ```
//! let src = b"{
//!     \"name\": \"demo\", // service name
//!     \"ports\": [80, 443,],
//! }";
//!
//! assert_eq!(
//!     hujson::minimize(src).unwrap(),
//!     b"{\"name\":\"demo\",\"ports\":[80,443]}",
//! );
//!
//! let standard = hujson::standardize(src).unwrap();
//! assert_eq!(standard.len(), src.len());
//! assert!(serde_json::from_slice::<serde_json::Value>(&standard).is_ok());
//! ```
//!
//! For finer control, [`parse`] yields a [`Value`] tree that can be
//! inspected, checked with [`Value::is_standard`], mutated in place with
//! [`Value::minimize`] / [`Value::standardize`], and serialized back with
//! [`Value::pack`].

pub mod normalize;
pub mod parse;
pub mod value;

pub use normalize::{convert_multiline_string, MalformedLiteral};
pub use parse::{parse, ParseError, MAX_DEPTH};
pub use value::{Array, Extra, Literal, LiteralKind, Object, ObjectMember, Payload, Value};

/// Parses `input` and returns its shortest strict-JSON equivalent.
///
/// # Example
///
/// ```
/// assert_eq!(hujson::minimize(b"[1, /*2*/ 3,]").unwrap(), b"[1,3]");
/// ```
pub fn minimize(input: &[u8]) -> Result<Vec<u8>, ParseError> {
    let mut tree = parse(input)?;
    tree.minimize();
    Ok(tree.pack())
}

/// Parses `input` and returns a strict-JSON equivalent of the same byte
/// length, with the original line numbers intact.
///
/// # Example
///
/// ```
/// assert_eq!(hujson::standardize(b"[1, /*2*/ 3,]").unwrap(), b"[1,       3 ]");
/// ```
pub fn standardize(input: &[u8]) -> Result<Vec<u8>, ParseError> {
    let mut tree = parse(input)?;
    tree.standardize();
    Ok(tree.pack())
}
