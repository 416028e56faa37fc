//! Rewrites between Human JSON and strict JSON (RFC 8259).
//!
//! Three in-tree operations live here:
//!
//! - [`Value::is_standard`] — read-only check for strict-JSON compliance;
//! - [`Value::minimize`] — drop all whitespace, comments, and trailing
//!   commas;
//! - [`Value::standardize`] — rewrite to strict JSON while keeping every
//!   byte offset and line number of the original document intact.
//!
//! Plus the pure [`convert_multiline_string`] transcoder they both use to
//! turn backtick multiline strings into regular JSON strings.

use thiserror::Error;

use crate::value::{Literal, LiteralKind, Value};

/// A multiline string literal whose span is not well formed.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MalformedLiteral {
    #[error("multiline string shorter than its two delimiters")]
    TooShort,
    #[error("multiline string does not start and end with a backtick")]
    MissingDelimiter,
    #[error("multiline string ends inside an escape sequence")]
    DanglingEscape,
}

impl Value {
    /// Reports whether this tree is already strict JSON: no comments, no
    /// trailing commas, no multiline strings.
    ///
    /// # Example
    ///
    /// ```
    /// assert!(hujson::parse(b"{\"a\": [1, 2]}").unwrap().is_standard());
    /// assert!(!hujson::parse(b"[1, 2,]").unwrap().is_standard());
    /// assert!(!hujson::parse(b"1 // one").unwrap().is_standard());
    /// ```
    pub fn is_standard(&self) -> bool {
        if !self.before_extra.is_standard() {
            return false;
        }
        if let Some(comp) = self.payload.composite() {
            if !comp.all_values(&mut |v| v.is_standard()) {
                return false;
            }
            if comp.trailing_comma() || !comp.after_extra().is_standard() {
                return false;
            }
        }
        if let Some(lit) = self.payload.literal() {
            if lit.kind() == LiteralKind::MultilineString {
                return false;
            }
        }
        self.after_extra.is_standard()
    }

    /// Removes all whitespace, comments, and trailing commas, making the
    /// tree strict JSON in its shortest form.
    ///
    /// # Example
    ///
    /// ```
    /// let mut tree = hujson::parse(b"{ \"a\": 1, /*c*/ }").unwrap();
    /// tree.minimize();
    /// assert_eq!(tree.pack(), b"{\"a\":1}");
    /// ```
    pub fn minimize(&mut self) {
        self.minimize_tree();
        self.update_offsets();
    }

    fn minimize_tree(&mut self) {
        self.before_extra.clear();
        if let Some(mut comp) = self.payload.composite_mut() {
            comp.for_each_value(&mut |v| v.minimize_tree());
            comp.set_trailing_comma(false);
            comp.after_extra_mut().clear();
        }
        if let Some(lit) = self.payload.literal_mut() {
            if lit.kind() == LiteralKind::MultilineString {
                *lit = lit.standardized();
            }
        }
        self.after_extra.clear();
    }

    /// Rewrites the tree to strict JSON in place while preserving the
    /// original line numbers and byte offsets: every comment byte and
    /// every trailing comma is replaced with a space of the same width,
    /// and only multiline string literals change length.
    ///
    /// # Example
    ///
    /// ```
    /// let src = b"{ \"a\": 1, /*c*/ }";
    /// let mut tree = hujson::parse(src).unwrap();
    /// tree.standardize();
    /// let out = tree.pack();
    /// assert_eq!(out.len(), src.len());
    /// assert_eq!(out, b"{ \"a\": 1        }");
    /// ```
    pub fn standardize(&mut self) {
        self.standardize_tree();
        // Noop unless a multiline string changed length.
        self.update_offsets();
    }

    fn standardize_tree(&mut self) {
        self.before_extra.standardize();
        if let Some(mut comp) = self.payload.composite_mut() {
            comp.for_each_value(&mut |v| v.standardize_tree());
            if comp.trailing_comma() {
                // The comma byte turns into a space: the last child's
                // trailing extra moves onto the composite, with one space
                // standing exactly where the comma was.
                let mut moved = match comp.last_value_mut() {
                    Some(last) => last.after_extra.take_bytes(),
                    None => Vec::new(),
                };
                moved.push(b' ');
                comp.after_extra_mut().prepend(moved);
                comp.set_trailing_comma(false);
            }
            comp.after_extra_mut().standardize();
        }
        if let Some(lit) = self.payload.literal_mut() {
            if lit.kind() == LiteralKind::MultilineString {
                *lit = lit.standardized();
            }
        }
        self.after_extra.standardize();
    }
}

impl Literal {
    /// The strict-JSON form of this literal. Only multiline strings
    /// change; every other kind passes through as-is.
    pub(crate) fn standardized(&self) -> Literal {
        if self.kind() == LiteralKind::MultilineString {
            Literal::from_raw(LiteralKind::String, convert_unchecked(self.as_bytes()))
        } else {
            self.clone()
        }
    }
}

/// Converts a backtick multiline string span into a standard double-quoted
/// JSON string literal.
///
/// Within the delimiters, a backslash escapes exactly the next byte:
/// an escaped backtick becomes a literal backtick, an escaped newline is
/// elided, and any other pair is emitted unchanged. Raw newlines become
/// the two-byte `\n` escape. This is the one conversion whose output
/// length may differ from its input length.
///
/// # Example
///
/// ```
/// use hujson::convert_multiline_string;
///
/// assert_eq!(convert_multiline_string(b"`hello`").unwrap(), b"\"hello\"");
/// assert_eq!(
///     convert_multiline_string(b"`line1\nline2`").unwrap(),
///     b"\"line1\\nline2\"",
/// );
/// ```
pub fn convert_multiline_string(raw: &[u8]) -> Result<Vec<u8>, MalformedLiteral> {
    if raw.len() < 2 {
        return Err(MalformedLiteral::TooShort);
    }
    if raw[0] != b'`' || raw[raw.len() - 1] != b'`' {
        return Err(MalformedLiteral::MissingDelimiter);
    }
    let mut escape_next = false;
    for &b in &raw[1..raw.len() - 1] {
        if escape_next {
            escape_next = false;
        } else if b == b'\\' {
            escape_next = true;
        }
    }
    if escape_next {
        // The closing backtick itself was escaped.
        return Err(MalformedLiteral::DanglingEscape);
    }
    Ok(convert_unchecked(raw))
}

/// The conversion proper. Callers have already validated the span shape
/// (the parser and the public wrapper both do).
fn convert_unchecked(raw: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(raw.len() + 10);
    let mut escape_next = false;
    for (i, &b) in raw.iter().enumerate() {
        // The initial and final backticks become double quotes.
        if i == 0 || i + 1 == raw.len() {
            out.push(b'"');
            continue;
        }
        if escape_next {
            escape_next = false;
            match b {
                b'`' => out.push(b'`'),
                b'\n' => {} // an escaped newline is elided
                _ => {
                    out.push(b'\\');
                    out.push(b);
                }
            }
        } else if b == b'\\' {
            escape_next = true;
        } else if b == b'\n' {
            out.extend_from_slice(b"\\n");
        } else {
            out.push(b);
        }
    }
    out
}
