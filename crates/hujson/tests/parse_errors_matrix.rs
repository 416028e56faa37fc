use hujson::{parse, ParseError};

#[test]
fn unexpected_eof_matrix() {
    assert_eq!(parse(b""), Err(ParseError::UnexpectedEof(0)));
    assert_eq!(parse(b"  "), Err(ParseError::UnexpectedEof(2)));
    assert!(matches!(parse(b"[1,"), Err(ParseError::UnexpectedEof(_))));
    assert!(matches!(parse(b"{\"a\":"), Err(ParseError::UnexpectedEof(_))));
    assert!(matches!(parse(b"{\"a\""), Err(ParseError::UnexpectedEof(_))));
    assert!(matches!(parse(b"[1 "), Err(ParseError::UnexpectedEof(_))));
}

#[test]
fn unexpected_byte_matrix() {
    // Missing comma between elements.
    assert_eq!(
        parse(b"[1 2]"),
        Err(ParseError::UnexpectedByte {
            byte: b'2',
            offset: 3,
        }),
    );
    // Data after the top-level value.
    assert_eq!(
        parse(b"1 x"),
        Err(ParseError::UnexpectedByte {
            byte: b'x',
            offset: 2,
        }),
    );
    // Object member names must be strings.
    assert_eq!(
        parse(b"{1: 2}"),
        Err(ParseError::UnexpectedByte {
            byte: b'1',
            offset: 1,
        }),
    );
    // A lone slash is not a comment.
    assert!(matches!(
        parse(b"/ 1"),
        Err(ParseError::UnexpectedByte { byte: b'/', .. }),
    ));
    // Mistyped keyword.
    assert!(matches!(
        parse(b"nulL"),
        Err(ParseError::UnexpectedByte { byte: b'n', .. }),
    ));
    // Leading zeros are not standard numbers.
    assert!(matches!(
        parse(b"01"),
        Err(ParseError::UnexpectedByte { byte: b'1', .. }),
    ));
    // Missing colon.
    assert!(matches!(
        parse(b"{\"a\" 1}"),
        Err(ParseError::UnexpectedByte { byte: b'1', .. }),
    ));
}

#[test]
fn unterminated_comment_matrix() {
    assert_eq!(parse(b"/* open"), Err(ParseError::UnterminatedComment(0)));
    assert_eq!(
        parse(b"[1, /* open"),
        Err(ParseError::UnterminatedComment(4)),
    );
    // A line comment may end at EOF without a newline.
    assert!(parse(b"1 // fine").is_ok());
}

#[test]
fn unterminated_string_matrix() {
    assert_eq!(parse(b"\"abc"), Err(ParseError::UnterminatedString(0)));
    assert_eq!(parse(b"`abc"), Err(ParseError::UnterminatedString(0)));
    // A dangling escape cannot terminate a multiline string.
    assert_eq!(parse(b"`abc\\"), Err(ParseError::UnterminatedString(0)));
    assert_eq!(parse(b"`abc\\`"), Err(ParseError::UnterminatedString(0)));
}

#[test]
fn invalid_number_matrix() {
    assert_eq!(parse(b"-"), Err(ParseError::InvalidNumber(0)));
    assert_eq!(parse(b"-x"), Err(ParseError::InvalidNumber(0)));
    assert_eq!(parse(b"1."), Err(ParseError::InvalidNumber(0)));
    assert_eq!(parse(b"1.e5"), Err(ParseError::InvalidNumber(0)));
    assert_eq!(parse(b"2e"), Err(ParseError::InvalidNumber(0)));
    assert_eq!(parse(b"2e+"), Err(ParseError::InvalidNumber(0)));
    assert!(matches!(parse(b"[3e-]"), Err(ParseError::InvalidNumber(1))));
}

#[test]
fn invalid_escape_matrix() {
    assert!(matches!(parse(b"\"a\\x\""), Err(ParseError::InvalidEscape(_))));
    assert!(matches!(
        parse(b"\"\\u12g4\""),
        Err(ParseError::InvalidEscape(_)),
    ));
}

#[test]
fn control_character_matrix() {
    assert_eq!(
        parse(b"\"a\x01b\""),
        Err(ParseError::ControlCharacter {
            byte: 0x01,
            offset: 2,
        }),
    );
    // Raw newlines are fine in multiline strings, not in standard ones.
    assert!(matches!(
        parse(b"\"a\nb\""),
        Err(ParseError::ControlCharacter { byte: b'\n', .. }),
    ));
    assert!(parse(b"`a\nb`").is_ok());
}

#[test]
fn errors_format_with_offsets() {
    let err = parse(b"[1 2]").expect_err("must fail");
    assert_eq!(err.to_string(), "unexpected byte 0x32 at offset 3");
}
