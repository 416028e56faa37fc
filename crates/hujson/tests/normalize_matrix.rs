use hujson::{minimize, parse, standardize};

fn count_lf(bytes: &[u8]) -> usize {
    bytes.iter().filter(|&&b| b == b'\n').count()
}

#[test]
fn is_standard_accepts_strict_json() {
    for src in [
        &b"null"[..],
        b" true ",
        b"\t-1.5e3\r\n",
        b"\"str\"",
        b"[]",
        b"[ 1 , 2 ]",
        b"{ \"a\" : [ null , {} ] }",
    ] {
        assert!(
            parse(src).expect("must parse").is_standard(),
            "{:?} should be standard",
            String::from_utf8_lossy(src),
        );
    }
}

#[test]
fn is_standard_rejects_extensions() {
    for src in [
        &b"1 // comment"[..],
        b"/* c */ 1",
        b"[1 /* inner */, 2]",
        b"[1, /* before close */ ]",
        b"[1,]",
        b"{\"a\":1,}",
        b"`multi`",
        b"[`multi`]",
        b"{ `key`: 1 }",
        b"{ \"a\" /* on the key */ : 1 }",
    ] {
        assert!(
            !parse(src).expect("must parse").is_standard(),
            "{:?} should not be standard",
            String::from_utf8_lossy(src),
        );
    }
}

#[test]
fn minimize_matrix() {
    let cases: &[(&[u8], &[u8])] = &[
        (b"{ \"a\": 1, /*c*/ }", b"{\"a\":1}"),
        (b"[ 1 , 2 , ]", b"[1,2]"),
        (b"// doc\nnull", b"null"),
        (b"`hello`", b"\"hello\""),
        (b"[true, `x\ny`,]", b"[true,\"x\\ny\"]"),
        (b"{ `k` : { \"n\": [0,] } , }", b"{\"k\":{\"n\":[0]}}"),
        (b"[ /* only a comment */ ]", b"[]"),
        (b"1 // eof comment", b"1"),
    ];
    for &(src, want) in cases {
        assert_eq!(
            minimize(src).expect("must parse"),
            want,
            "minimize of {:?}",
            String::from_utf8_lossy(src),
        );
    }
}

#[test]
fn minimize_output_is_standard_and_idempotent() {
    let src = b"{ \"a\" /*k*/ : [1, `two\nlines`,], } // tail";
    let mut tree = parse(src).expect("must parse");
    tree.minimize();
    assert!(tree.is_standard());
    let once = tree.pack();
    tree.minimize();
    assert_eq!(tree.pack(), once);
}

#[test]
fn standardize_blanks_comments_in_place() {
    let cases: &[(&[u8], &[u8])] = &[
        (b"{ \"a\": 1, /*c*/ }", b"{ \"a\": 1        }"),
        (b"[1, /*2*/ 3,]", b"[1,       3 ]"),
        (b"// hi\n[1,\n 2,\n]", b"     \n[1,\n 2 \n]"),
        (b"[1,]", b"[1 ]"),
        (b"{\"a\":1,}", b"{\"a\":1 }"),
        (b"1 // eof comment", b"1               "),
        (b"/* a */ null /* b */", b"        null        "),
    ];
    for &(src, want) in cases {
        let got = standardize(src).expect("must parse");
        assert_eq!(
            got,
            want,
            "standardize of {:?} gave {:?}",
            String::from_utf8_lossy(src),
            String::from_utf8_lossy(&got),
        );
        assert_eq!(got.len(), src.len());
        assert_eq!(count_lf(&got), count_lf(src));
    }
}

#[test]
fn standardize_preserves_lines_across_multiline_comments() {
    let src = b"[1, /* a\nb\nc */ 2]";
    let got = standardize(src).expect("must parse");
    assert_eq!(got, b"[1,     \n \n     2]");
    assert_eq!(got.len(), src.len());
    assert_eq!(count_lf(&got), 2);
}

#[test]
fn standardize_converts_multiline_strings() {
    // The literal itself may change length; everything around it may not.
    let got = standardize(b"{\"k\": `a\nb`}").expect("must parse");
    assert_eq!(got, b"{\"k\": \"a\\nb\"}");

    let got = standardize(b"[`plain`, `tick \\` tock`]").expect("must parse");
    assert_eq!(got, b"[\"plain\", \"tick ` tock\"]");
}

#[test]
fn standardize_is_idempotent() {
    let src = b"{ \"a\": [1, `m\nn`, /*c*/], } // tail\n";
    let once = standardize(src).expect("must parse");
    let twice = standardize(&once).expect("standardized output must parse");
    assert_eq!(twice, once);
}

#[test]
fn standard_input_is_a_fixed_point() {
    for src in [
        &b"null"[..],
        b" { \"a\" : [ 1 , 2 ] } ",
        b"[\r\n  1,\r\n  2\r\n]",
        b"\"s\"",
    ] {
        assert_eq!(standardize(src).expect("must parse"), src);
    }
}

#[test]
fn normalized_trees_match_their_own_reparse() {
    // After either rewrite the tree, offsets included, is exactly what
    // parsing its packed output yields.
    let src = b"{ \"a\" /*x*/ : [null, `m\nn`,], } // done\n";

    let mut tree = parse(src).expect("must parse");
    tree.standardize();
    assert_eq!(parse(&tree.pack()).expect("must reparse"), tree);

    let mut tree = parse(src).expect("must parse");
    tree.minimize();
    assert_eq!(parse(&tree.pack()).expect("must reparse"), tree);
}
