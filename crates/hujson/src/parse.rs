//! Recursive-descent parser from Human JSON bytes to the lossless tree.
//!
//! The parser accepts strict JSON plus `//` and `/* */` comments, trailing
//! commas in arrays and objects, and backtick-delimited multiline strings.
//! Every input byte lands in exactly one node, so [`Value::pack`] on the
//! result reproduces the input unchanged.

use thiserror::Error;

use crate::value::{Array, Extra, Literal, LiteralKind, Object, ObjectMember, Payload, Value};

/// Maximum nesting depth of composites before parsing fails.
pub const MAX_DEPTH: usize = 64;

/// A fault in the input bytes, carrying the byte offset where it occurred.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected end of input at offset {0}")]
    UnexpectedEof(usize),
    #[error("unexpected byte {byte:#04x} at offset {offset}")]
    UnexpectedByte { byte: u8, offset: usize },
    #[error("unterminated block comment starting at offset {0}")]
    UnterminatedComment(usize),
    #[error("unterminated string starting at offset {0}")]
    UnterminatedString(usize),
    #[error("invalid number starting at offset {0}")]
    InvalidNumber(usize),
    #[error("invalid string escape at offset {0}")]
    InvalidEscape(usize),
    #[error("raw control character {byte:#04x} in string at offset {offset}")]
    ControlCharacter { byte: u8, offset: usize },
    #[error("values nested deeper than 64 levels at offset {0}")]
    TooDeep(usize),
}

/// Parses a Human JSON document into its lossless tree.
///
/// Exactly one top-level value is accepted; extras around it become the
/// root's `before_extra`/`after_extra`. Offsets are populated.
///
/// # Example
///
/// ```
/// let tree = hujson::parse(b"// config\n{ \"port\": 8080, }").unwrap();
/// assert!(!tree.is_standard());
/// ```
pub fn parse(input: &[u8]) -> Result<Value, ParseError> {
    let mut p = Parser { input, pos: 0 };
    let mut root = p.parse_value(0)?;
    root.after_extra = p.parse_extra()?;
    if let Some(b) = p.peek() {
        return Err(ParseError::UnexpectedByte {
            byte: b,
            offset: p.pos,
        });
    }
    Ok(root)
}

struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn peek_at(&self, ahead: usize) -> Option<u8> {
        self.input.get(self.pos + ahead).copied()
    }

    /// Consumes whitespace and comments into one extra span.
    fn parse_extra(&mut self) -> Result<Extra, ParseError> {
        let start = self.pos;
        loop {
            match self.peek() {
                Some(b' ' | b'\t' | b'\r' | b'\n') => self.pos += 1,
                Some(b'/') => match self.peek_at(1) {
                    Some(b'/') => {
                        // Line comment; the terminating LF belongs to it.
                        self.pos += 2;
                        while let Some(b) = self.peek() {
                            self.pos += 1;
                            if b == b'\n' {
                                break;
                            }
                        }
                    }
                    Some(b'*') => {
                        let open = self.pos;
                        self.pos += 2;
                        loop {
                            match self.peek() {
                                None => return Err(ParseError::UnterminatedComment(open)),
                                Some(b'*') if self.peek_at(1) == Some(b'/') => {
                                    self.pos += 2;
                                    break;
                                }
                                Some(_) => self.pos += 1,
                            }
                        }
                    }
                    // A lone slash is not extra; the caller reports it.
                    _ => break,
                },
                _ => break,
            }
        }
        Ok(Extra::from(self.input[start..self.pos].to_vec()))
    }

    /// Parses `before_extra` and a payload. `after_extra` stays empty; the
    /// enclosing composite (or the document driver) owns what follows.
    fn parse_value(&mut self, depth: usize) -> Result<Value, ParseError> {
        let before_extra = self.parse_extra()?;
        self.parse_value_with(before_extra, depth)
    }

    fn parse_value_with(&mut self, before_extra: Extra, depth: usize) -> Result<Value, ParseError> {
        let start_offset = self.pos;
        let payload = self.parse_payload(depth)?;
        Ok(Value {
            before_extra,
            start_offset,
            payload,
            end_offset: self.pos,
            after_extra: Extra::new(),
        })
    }

    fn parse_payload(&mut self, depth: usize) -> Result<Payload, ParseError> {
        match self.peek() {
            None => Err(ParseError::UnexpectedEof(self.pos)),
            Some(b'[') => {
                if depth >= MAX_DEPTH {
                    return Err(ParseError::TooDeep(self.pos));
                }
                self.parse_array(depth + 1).map(Payload::Array)
            }
            Some(b'{') => {
                if depth >= MAX_DEPTH {
                    return Err(ParseError::TooDeep(self.pos));
                }
                self.parse_object(depth + 1).map(Payload::Object)
            }
            Some(b'"') => self.parse_string_literal().map(Payload::Literal),
            Some(b'`') => self.parse_multiline_literal().map(Payload::Literal),
            Some(b'n') => self.parse_keyword(b"null", LiteralKind::Null),
            Some(b't') => self.parse_keyword(b"true", LiteralKind::Bool),
            Some(b'f') => self.parse_keyword(b"false", LiteralKind::Bool),
            Some(b'-' | b'0'..=b'9') => self.parse_number_literal().map(Payload::Literal),
            Some(b) => Err(ParseError::UnexpectedByte {
                byte: b,
                offset: self.pos,
            }),
        }
    }

    fn parse_array(&mut self, depth: usize) -> Result<Array, ParseError> {
        self.pos += 1; // '['
        let mut arr = Array::default();
        loop {
            // Here we are at the array start or just past a comma, so a
            // closing bracket ends the array and this extra belongs to it.
            let extra = self.parse_extra()?;
            if self.peek() == Some(b']') {
                self.pos += 1;
                arr.after_extra = extra;
                return Ok(arr);
            }
            let mut elem = self.parse_value_with(extra, depth)?;
            let after = self.parse_extra()?;
            match self.peek() {
                Some(b',') => {
                    self.pos += 1;
                    elem.after_extra = after;
                    arr.elements.push(elem);
                    arr.trailing_comma = true;
                }
                Some(b']') => {
                    self.pos += 1;
                    arr.elements.push(elem);
                    arr.trailing_comma = false;
                    arr.after_extra = after;
                    return Ok(arr);
                }
                Some(b) => {
                    return Err(ParseError::UnexpectedByte {
                        byte: b,
                        offset: self.pos,
                    })
                }
                None => return Err(ParseError::UnexpectedEof(self.pos)),
            }
        }
    }

    fn parse_object(&mut self, depth: usize) -> Result<Object, ParseError> {
        self.pos += 1; // '{'
        let mut obj = Object::default();
        loop {
            let extra = self.parse_extra()?;
            if self.peek() == Some(b'}') {
                self.pos += 1;
                obj.after_extra = extra;
                return Ok(obj);
            }
            let name_start = self.pos;
            let name_literal = match self.peek() {
                None => return Err(ParseError::UnexpectedEof(self.pos)),
                Some(b'"') => self.parse_string_literal()?,
                Some(b'`') => self.parse_multiline_literal()?,
                Some(b) => {
                    return Err(ParseError::UnexpectedByte {
                        byte: b,
                        offset: self.pos,
                    })
                }
            };
            let mut name = Value {
                before_extra: extra,
                start_offset: name_start,
                payload: Payload::Literal(name_literal),
                end_offset: self.pos,
                after_extra: Extra::new(),
            };
            name.after_extra = self.parse_extra()?;
            match self.peek() {
                Some(b':') => self.pos += 1,
                Some(b) => {
                    return Err(ParseError::UnexpectedByte {
                        byte: b,
                        offset: self.pos,
                    })
                }
                None => return Err(ParseError::UnexpectedEof(self.pos)),
            }
            let mut value = self.parse_value(depth)?;
            let after = self.parse_extra()?;
            match self.peek() {
                Some(b',') => {
                    self.pos += 1;
                    value.after_extra = after;
                    obj.members.push(ObjectMember { name, value });
                    obj.trailing_comma = true;
                }
                Some(b'}') => {
                    self.pos += 1;
                    obj.members.push(ObjectMember { name, value });
                    obj.trailing_comma = false;
                    obj.after_extra = after;
                    return Ok(obj);
                }
                Some(b) => {
                    return Err(ParseError::UnexpectedByte {
                        byte: b,
                        offset: self.pos,
                    })
                }
                None => return Err(ParseError::UnexpectedEof(self.pos)),
            }
        }
    }

    fn parse_keyword(
        &mut self,
        word: &'static [u8],
        kind: LiteralKind,
    ) -> Result<Payload, ParseError> {
        if self.input[self.pos..].starts_with(word) {
            self.pos += word.len();
            Ok(Payload::Literal(Literal::from_raw(kind, word.to_vec())))
        } else {
            Err(ParseError::UnexpectedByte {
                byte: self.input[self.pos],
                offset: self.pos,
            })
        }
    }

    fn parse_number_literal(&mut self) -> Result<Literal, ParseError> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        // Integer part: a single zero, or a nonzero digit run.
        match self.peek() {
            Some(b'0') => self.pos += 1,
            Some(b'1'..=b'9') => {
                self.pos += 1;
                self.skip_digits();
            }
            _ => return Err(ParseError::InvalidNumber(start)),
        }
        if self.peek() == Some(b'.') {
            self.pos += 1;
            if !self.skip_digits() {
                return Err(ParseError::InvalidNumber(start));
            }
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if !self.skip_digits() {
                return Err(ParseError::InvalidNumber(start));
            }
        }
        Ok(Literal::from_raw(
            LiteralKind::Number,
            self.input[start..self.pos].to_vec(),
        ))
    }

    /// Consumes a digit run, reporting whether at least one was present.
    fn skip_digits(&mut self) -> bool {
        let start = self.pos;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn parse_string_literal(&mut self) -> Result<Literal, ParseError> {
        let start = self.pos;
        self.pos += 1; // opening quote
        loop {
            match self.peek() {
                None => return Err(ParseError::UnterminatedString(start)),
                Some(b'"') => {
                    self.pos += 1;
                    break;
                }
                Some(b'\\') => {
                    self.pos += 1;
                    self.parse_escape()?;
                }
                Some(b) if b < 0x20 => {
                    return Err(ParseError::ControlCharacter {
                        byte: b,
                        offset: self.pos,
                    })
                }
                Some(_) => self.pos += 1,
            }
        }
        Ok(Literal::from_raw(
            LiteralKind::String,
            self.input[start..self.pos].to_vec(),
        ))
    }

    /// Validates the byte(s) after a backslash in a standard string.
    fn parse_escape(&mut self) -> Result<(), ParseError> {
        match self.peek() {
            None => Err(ParseError::UnexpectedEof(self.pos)),
            Some(b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't') => {
                self.pos += 1;
                Ok(())
            }
            Some(b'u') => {
                self.pos += 1;
                for _ in 0..4 {
                    match self.peek() {
                        None => return Err(ParseError::UnexpectedEof(self.pos)),
                        Some(b) if b.is_ascii_hexdigit() => self.pos += 1,
                        Some(_) => return Err(ParseError::InvalidEscape(self.pos)),
                    }
                }
                Ok(())
            }
            Some(_) => Err(ParseError::InvalidEscape(self.pos - 1)),
        }
    }

    /// A backtick-delimited multiline string. A backslash escapes exactly
    /// the next byte; raw newlines are permitted.
    fn parse_multiline_literal(&mut self) -> Result<Literal, ParseError> {
        let start = self.pos;
        self.pos += 1; // opening backtick
        loop {
            match self.peek() {
                None => return Err(ParseError::UnterminatedString(start)),
                Some(b'`') => {
                    self.pos += 1;
                    break;
                }
                Some(b'\\') => {
                    self.pos += 1;
                    if self.peek().is_none() {
                        return Err(ParseError::UnterminatedString(start));
                    }
                    self.pos += 1;
                }
                Some(_) => self.pos += 1,
            }
        }
        Ok(Literal::from_raw(
            LiteralKind::MultilineString,
            self.input[start..self.pos].to_vec(),
        ))
    }
}
