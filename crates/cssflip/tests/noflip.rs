use cssflip::transform;

#[test]
fn test_marker_guards_only_the_next_declaration() {
    assert_eq!(
        transform(".a { /* noflip */ float: left; margin-left: 0; }").unwrap(),
        ".a { /* noflip */ float: left; margin-right: 0; }"
    );
}

#[test]
fn test_at_prefixed_marker() {
    let css = ".a { /* @noflip */ padding-left: 1px }";
    assert_eq!(transform(css).unwrap(), css);
}

#[test]
fn test_marker_is_case_and_space_insensitive() {
    let css = ".a {\n  /*   NoFlip\n */\n  left: 0;\n}";
    assert_eq!(transform(css).unwrap(), css);
}

#[test]
fn test_marker_before_rule_guards_every_declaration() {
    assert_eq!(
        transform("/* @noflip */ .a { left: 0; float: left } .b { left: 0 }").unwrap(),
        "/* @noflip */ .a { left: 0; float: left } .b { right: 0 }"
    );
}

#[test]
fn test_marker_before_nested_block_guards_it_whole() {
    let css = "/* noflip */ @media print { .a { left: 0 } } .b { left: 0 }";
    assert_eq!(
        transform(css).unwrap(),
        "/* noflip */ @media print { .a { left: 0 } } .b { right: 0 }"
    );
}

#[test]
fn test_other_comments_are_not_markers() {
    assert_eq!(
        transform(".a { /* no flip here */ float: left; }").unwrap(),
        ".a { /* no flip here */ float: right; }"
    );
}

#[test]
fn test_marker_followed_by_comment_still_guards_declaration() {
    let css = ".a { /* noflip */ /* why */ float: left; }";
    assert_eq!(transform(css).unwrap(), css);
}

#[test]
fn test_marker_inside_string_is_just_text() {
    assert_eq!(
        transform(r#".a { content: "/* noflip */"; float: left; }"#).unwrap(),
        r#".a { content: "/* noflip */"; float: right; }"#
    );
}

#[test]
fn test_marker_at_end_of_block_guards_nothing_else() {
    assert_eq!(
        transform(".a { float: left; /* noflip */ } .b { float: left }").unwrap(),
        ".a { float: right; /* noflip */ } .b { float: right }"
    );
}
