//! The lossless syntax tree for Human JSON documents.
//!
//! Every byte of the parsed input is owned by exactly one node, so packing
//! the tree reproduces the source byte-for-byte. Whitespace and comments
//! live in [`Extra`] spans attached before and after each value, scalar
//! tokens keep their raw source bytes in [`Literal`], and arrays/objects
//! record whether a trailing comma was present.

use std::fmt;

/// A span of bytes between tokens: whitespace and/or comments.
///
/// An extra is *standard* when it contains only the four JSON whitespace
/// bytes (space, tab, CR, LF). Any other content, such as a comment, makes
/// it non-standard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extra(Vec<u8>);

impl Extra {
    /// Creates an empty extra.
    pub fn new() -> Self {
        Self::default()
    }

    /// The raw bytes of this span.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Reports whether this span is legal strict-JSON whitespace.
    ///
    /// # Example
    ///
    /// ```
    /// use hujson::Extra;
    ///
    /// assert!(Extra::from(&b" \t\r\n"[..]).is_standard());
    /// assert!(!Extra::from(&b" // comment\n"[..]).is_standard());
    /// ```
    pub fn is_standard(&self) -> bool {
        self.0
            .iter()
            .all(|b| matches!(b, b' ' | b'\t' | b'\r' | b'\n'))
    }

    pub(crate) fn clear(&mut self) {
        self.0.clear();
    }

    /// Moves `front` in before the current content, keeping total length.
    pub(crate) fn prepend(&mut self, mut front: Vec<u8>) {
        front.extend_from_slice(&self.0);
        self.0 = front;
    }

    pub(crate) fn take_bytes(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.0)
    }

    /// Overwrites every byte that is not strict-JSON whitespace with a
    /// space. LF is kept as-is so line numbers never change.
    pub(crate) fn standardize(&mut self) {
        for b in &mut self.0 {
            match *b {
                b' ' | b'\t' | b'\r' | b'\n' => {}
                _ => *b = b' ',
            }
        }
    }
}

impl From<Vec<u8>> for Extra {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for Extra {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

/// The concrete variant of a scalar token, fixed once at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Null,
    Bool,
    Number,
    /// A standard double-quoted JSON string.
    String,
    /// A backtick-delimited multiline string; never standard JSON.
    MultilineString,
}

/// A scalar token holding its raw source bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    kind: LiteralKind,
    raw: Vec<u8>,
}

impl Literal {
    pub(crate) fn from_raw(kind: LiteralKind, raw: Vec<u8>) -> Self {
        debug_assert!(!raw.is_empty());
        Self { kind, raw }
    }

    /// The `null` literal.
    pub fn null() -> Self {
        Self::from_raw(LiteralKind::Null, b"null".to_vec())
    }

    /// A `true` or `false` literal.
    pub fn bool(v: bool) -> Self {
        let raw = if v { b"true".to_vec() } else { b"false".to_vec() };
        Self::from_raw(LiteralKind::Bool, raw)
    }

    /// A standard JSON string literal for `s`, escaping as needed.
    pub fn string(s: &str) -> Self {
        let mut raw = Vec::with_capacity(s.len() + 2);
        raw.push(b'"');
        for b in s.bytes() {
            match b {
                b'"' => raw.extend_from_slice(b"\\\""),
                b'\\' => raw.extend_from_slice(b"\\\\"),
                b'\n' => raw.extend_from_slice(b"\\n"),
                b'\r' => raw.extend_from_slice(b"\\r"),
                b'\t' => raw.extend_from_slice(b"\\t"),
                0x08 => raw.extend_from_slice(b"\\b"),
                0x0c => raw.extend_from_slice(b"\\f"),
                b if b < 0x20 => {
                    raw.extend_from_slice(format!("\\u{b:04x}").as_bytes());
                }
                b => raw.push(b),
            }
        }
        raw.push(b'"');
        Self::from_raw(LiteralKind::String, raw)
    }

    pub fn kind(&self) -> LiteralKind {
        self.kind
    }

    /// The single-byte discriminant of this literal: its first source byte.
    /// Multiline strings are marked by a backtick.
    pub fn kind_byte(&self) -> u8 {
        self.raw.first().copied().unwrap_or(0)
    }

    /// The literal's full source span.
    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

/// An ordered sequence of values between `[` and `]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Array {
    pub elements: Vec<Value>,
    /// Was a comma present after the last element?
    pub trailing_comma: bool,
    /// Extra between the last element (or its comma) and `]`.
    pub after_extra: Extra,
}

/// An ordered sequence of members between `{` and `}`.
///
/// Key uniqueness is not enforced at this layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Object {
    pub members: Vec<ObjectMember>,
    /// Was a comma present after the last member?
    pub trailing_comma: bool,
    /// Extra between the last member (or its comma) and `}`.
    pub after_extra: Extra,
}

/// A single `name: value` pair. The name is itself a [`Value`] holding a
/// string literal, so comments around keys are preserved too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectMember {
    pub name: Value,
    pub value: Value,
}

/// What a [`Value`] holds: a scalar token or one of the two composites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Literal(Literal),
    Array(Array),
    Object(Object),
}

impl Payload {
    pub fn is_composite(&self) -> bool {
        matches!(self, Payload::Array(_) | Payload::Object(_))
    }

    pub fn literal(&self) -> Option<&Literal> {
        match self {
            Payload::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    pub(crate) fn literal_mut(&mut self) -> Option<&mut Literal> {
        match self {
            Payload::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    pub fn array(&self) -> Option<&Array> {
        match self {
            Payload::Array(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn object(&self) -> Option<&Object> {
        match self {
            Payload::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub(crate) fn composite(&self) -> Option<Composite<'_>> {
        match self {
            Payload::Array(arr) => Some(Composite::Array(arr)),
            Payload::Object(obj) => Some(Composite::Object(obj)),
            Payload::Literal(_) => None,
        }
    }

    pub(crate) fn composite_mut(&mut self) -> Option<CompositeMut<'_>> {
        match self {
            Payload::Array(arr) => Some(CompositeMut::Array(arr)),
            Payload::Object(obj) => Some(CompositeMut::Object(obj)),
            Payload::Literal(_) => None,
        }
    }
}

/// Shared view over the two composite variants.
pub(crate) enum Composite<'a> {
    Array(&'a Array),
    Object(&'a Object),
}

impl Composite<'_> {
    /// Visits every child value (for objects: each member name, then its
    /// value) and short-circuits on the first `false`.
    pub(crate) fn all_values(&self, f: &mut impl FnMut(&Value) -> bool) -> bool {
        match self {
            Composite::Array(arr) => arr.elements.iter().all(|v| f(v)),
            Composite::Object(obj) => obj.members.iter().all(|m| f(&m.name) && f(&m.value)),
        }
    }

    pub(crate) fn trailing_comma(&self) -> bool {
        match self {
            Composite::Array(arr) => arr.trailing_comma,
            Composite::Object(obj) => obj.trailing_comma,
        }
    }

    pub(crate) fn after_extra(&self) -> &Extra {
        match self {
            Composite::Array(arr) => &arr.after_extra,
            Composite::Object(obj) => &obj.after_extra,
        }
    }
}

/// Mutable view over the two composite variants.
pub(crate) enum CompositeMut<'a> {
    Array(&'a mut Array),
    Object(&'a mut Object),
}

impl CompositeMut<'_> {
    /// Visits every child value mutably (for objects: member names too).
    pub(crate) fn for_each_value(&mut self, f: &mut impl FnMut(&mut Value)) {
        match self {
            CompositeMut::Array(arr) => {
                for v in &mut arr.elements {
                    f(v);
                }
            }
            CompositeMut::Object(obj) => {
                for m in &mut obj.members {
                    f(&mut m.name);
                    f(&mut m.value);
                }
            }
        }
    }

    pub(crate) fn trailing_comma(&self) -> bool {
        match self {
            CompositeMut::Array(arr) => arr.trailing_comma,
            CompositeMut::Object(obj) => obj.trailing_comma,
        }
    }

    pub(crate) fn set_trailing_comma(&mut self, on: bool) {
        match self {
            CompositeMut::Array(arr) => arr.trailing_comma = on,
            CompositeMut::Object(obj) => obj.trailing_comma = on,
        }
    }

    pub(crate) fn after_extra_mut(&mut self) -> &mut Extra {
        match self {
            CompositeMut::Array(arr) => &mut arr.after_extra,
            CompositeMut::Object(obj) => &mut obj.after_extra,
        }
    }

    /// The last child value: the last array element, or the value of the
    /// last object member.
    pub(crate) fn last_value_mut(&mut self) -> Option<&mut Value> {
        match self {
            CompositeMut::Array(arr) => arr.elements.last_mut(),
            CompositeMut::Object(obj) => obj.members.last_mut().map(|m| &mut m.value),
        }
    }
}

/// One node of the tree: a payload with its surrounding extras and the
/// byte offsets of the payload token span within the packed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Value {
    /// Extra preceding the payload.
    pub before_extra: Extra,
    /// Offset of the payload's first byte (extras excluded).
    pub start_offset: usize,
    pub payload: Payload,
    /// Offset one past the payload's last byte (extras excluded).
    pub end_offset: usize,
    /// Extra following the payload.
    pub after_extra: Extra,
}

impl Value {
    /// A value with empty extras around `payload`. Offsets are zero until
    /// [`Value::update_offsets`] runs.
    pub fn from_payload(payload: Payload) -> Self {
        Self {
            before_extra: Extra::new(),
            start_offset: 0,
            payload,
            end_offset: 0,
            after_extra: Extra::new(),
        }
    }

    /// Serializes the tree back to bytes, reproducing the parsed input
    /// exactly when the tree has not been mutated.
    ///
    /// # Example
    ///
    /// ```
    /// let src = b"[1, /* two */ 2,]";
    /// let tree = hujson::parse(src).unwrap();
    /// assert_eq!(tree.pack(), src);
    /// ```
    pub fn pack(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.pack_into(&mut out);
        out
    }

    fn pack_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.before_extra.as_bytes());
        match &self.payload {
            Payload::Literal(lit) => out.extend_from_slice(lit.as_bytes()),
            Payload::Array(arr) => {
                out.push(b'[');
                let n = arr.elements.len();
                for (i, elem) in arr.elements.iter().enumerate() {
                    elem.pack_into(out);
                    if i + 1 < n {
                        out.push(b',');
                    }
                }
                if arr.trailing_comma {
                    out.push(b',');
                }
                out.extend_from_slice(arr.after_extra.as_bytes());
                out.push(b']');
            }
            Payload::Object(obj) => {
                out.push(b'{');
                let n = obj.members.len();
                for (i, m) in obj.members.iter().enumerate() {
                    m.name.pack_into(out);
                    out.push(b':');
                    m.value.pack_into(out);
                    if i + 1 < n {
                        out.push(b',');
                    }
                }
                if obj.trailing_comma {
                    out.push(b',');
                }
                out.extend_from_slice(obj.after_extra.as_bytes());
                out.push(b'}');
            }
        }
        out.extend_from_slice(self.after_extra.as_bytes());
    }

    /// Recomputes `start_offset`/`end_offset` for the whole tree.
    ///
    /// Idempotent, and a no-op when the offsets are already correct.
    /// Invoked by [`Value::minimize`] and [`Value::standardize`] after
    /// they mutate the tree.
    pub fn update_offsets(&mut self) {
        self.update_offsets_at(0);
    }

    fn update_offsets_at(&mut self, offset: usize) -> usize {
        let mut pos = offset + self.before_extra.len();
        self.start_offset = pos;
        match &mut self.payload {
            Payload::Literal(lit) => pos += lit.len(),
            Payload::Array(arr) => {
                pos += 1;
                let n = arr.elements.len();
                for (i, elem) in arr.elements.iter_mut().enumerate() {
                    pos = elem.update_offsets_at(pos);
                    if i + 1 < n {
                        pos += 1;
                    }
                }
                if arr.trailing_comma {
                    pos += 1;
                }
                pos += arr.after_extra.len() + 1;
            }
            Payload::Object(obj) => {
                pos += 1;
                let n = obj.members.len();
                for (i, m) in obj.members.iter_mut().enumerate() {
                    pos = m.name.update_offsets_at(pos);
                    pos += 1;
                    pos = m.value.update_offsets_at(pos);
                    if i + 1 < n {
                        pos += 1;
                    }
                }
                if obj.trailing_comma {
                    pos += 1;
                }
                pos += obj.after_extra.len() + 1;
            }
        }
        self.end_offset = pos;
        pos + self.after_extra.len()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.pack()))
    }
}
