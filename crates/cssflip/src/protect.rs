//! Protection pass: hides every span the rewriter must never see.
//!
//! The scanner walks the source byte by byte. Everything it reacts to is
//! ASCII, so span boundaries always land on UTF-8 character boundaries and
//! multi-byte characters are simply carried along.
//!
//! Protected spans:
//!
//! - block comments `/* ... */` (not nestable)
//! - quoted strings, with backslash escapes
//! - `url(...)` tokens, including a quoted argument
//! - `@font-face` blocks
//! - a no-flip comment (`/* noflip */` or `/* @noflip */`) plus the single
//!   declaration, or the whole rule, that follows it
//! - raw marker delimiter bytes, so markers can never collide with source text
//!
//! Anything left unterminated at the end of input is protected through the
//! end of input.

use crate::placeholder::{MARKER_CLOSE, MARKER_OPEN, PlaceholderMap, SpanKind};

/// Output of the protection pass.
#[derive(Debug, Clone)]
pub struct Protected<'a> {
    /// Source text with each protected span replaced by its marker.
    pub text: String,
    pub map: PlaceholderMap<'a>,
}

/// Runs the protection pass over `source`.
pub fn protect(source: &str) -> Protected<'_> {
    Protector::new(source).run()
}

struct Protector<'a> {
    source: &'a str,
    pos: usize,
    /// Start of the pending run of unprotected text.
    copied: usize,
    text: String,
    map: PlaceholderMap<'a>,
}

impl<'a> Protector<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            copied: 0,
            text: String::with_capacity(source.len()),
            map: PlaceholderMap::new(),
        }
    }

    fn bytes(&self) -> &'a [u8] {
        self.source.as_bytes()
    }

    fn run(mut self) -> Protected<'a> {
        let bytes = self.bytes();
        while self.pos < bytes.len() {
            let start = self.pos;
            match bytes[start] {
                b'/' if bytes.get(start + 1) == Some(&b'*') => {
                    let end = comment_end(bytes, start);
                    if is_noflip_marker(&self.source[start..end]) {
                        let end = noflip_target_end(bytes, end);
                        self.protect(SpanKind::NoFlip, start, end);
                    } else {
                        self.protect(SpanKind::Comment, start, end);
                    }
                }
                b'"' | b'\'' => {
                    let end = string_end(bytes, start);
                    self.protect(SpanKind::String, start, end);
                }
                b'u' | b'U' if url_starts_at(bytes, start) => {
                    let end = url_end(bytes, start);
                    self.protect(SpanKind::Url, start, end);
                }
                b'@' if font_face_starts_at(bytes, start) => {
                    let end = rule_end(bytes, start);
                    self.protect(SpanKind::FontFace, start, end);
                }
                b'\\' => {
                    // An escaped byte is literal: `\"` opens no string.
                    self.pos += 1;
                    if self.pos < bytes.len() && !is_marker_byte(bytes[self.pos]) {
                        self.pos += 1;
                    }
                }
                b if is_marker_byte(b) => self.protect(SpanKind::Delimiter, start, start + 1),
                _ => self.pos += 1,
            }
        }
        self.text.push_str(&self.source[self.copied..]);

        log::trace!("protected {} spans", self.map.len());
        Protected {
            text: self.text,
            map: self.map,
        }
    }

    fn protect(&mut self, kind: SpanKind, start: usize, end: usize) {
        self.text.push_str(&self.source[self.copied..start]);
        let marker = self.map.push(kind, self.source, start..end);
        self.text.push_str(&marker);
        self.pos = end;
        self.copied = end;
    }
}

fn is_marker_byte(b: u8) -> bool {
    b == MARKER_OPEN as u8 || b == MARKER_CLOSE as u8
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b >= 0x80
}

fn starts_with_ignore_case(bytes: &[u8], at: usize, needle: &[u8]) -> bool {
    bytes
        .get(at..at + needle.len())
        .is_some_and(|window| window.eq_ignore_ascii_case(needle))
}

/// End of the comment opened at `start`, after its `*/`.
fn comment_end(bytes: &[u8], start: usize) -> usize {
    let mut i = start + 2;
    while i + 1 < bytes.len() {
        if bytes[i] == b'*' && bytes[i + 1] == b'/' {
            return i + 2;
        }
        i += 1;
    }
    bytes.len()
}

/// End of the string opened at `start`, after its closing quote.
fn string_end(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

fn url_starts_at(bytes: &[u8], at: usize) -> bool {
    starts_with_ignore_case(bytes, at, b"url(") && (at == 0 || !is_ident_byte(bytes[at - 1]))
}

/// End of the `url(` token at `start`, after its `)`.
fn url_end(bytes: &[u8], start: usize) -> usize {
    let mut i = start + 4;
    while i < bytes.len() {
        match bytes[i] {
            b')' => return i + 1,
            b'"' | b'\'' => i = string_end(bytes, i),
            b'\\' => i += 2,
            _ => i += 1,
        }
    }
    bytes.len()
}

fn font_face_starts_at(bytes: &[u8], at: usize) -> bool {
    let after = at + 1 + "font-face".len();
    starts_with_ignore_case(bytes, at + 1, b"font-face")
        && bytes.get(after).is_none_or(|&b| !is_ident_byte(b))
}

fn is_noflip_marker(comment: &str) -> bool {
    let body = comment.strip_prefix("/*").unwrap_or(comment);
    let body = body.strip_suffix("*/").unwrap_or(body).trim();
    body.eq_ignore_ascii_case("noflip") || body.eq_ignore_ascii_case("@noflip")
}

/// End of the construct guarded by a no-flip comment ending at `from`.
///
/// When nothing follows inside the current block, only the comment itself is
/// guarded and `from` is returned.
fn noflip_target_end(bytes: &[u8], from: usize) -> usize {
    let mut i = from;
    loop {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if bytes.get(i) == Some(&b'/') && bytes.get(i + 1) == Some(&b'*') {
            i = comment_end(bytes, i);
            continue;
        }
        break;
    }
    if i >= bytes.len() || bytes[i] == b'}' {
        return from;
    }
    rule_end(bytes, i)
}

/// End of the declaration or rule starting at `start`.
///
/// A `;` at bracket depth zero ends a declaration and is included. A `}` ends
/// the enclosing block and is excluded. A `{` makes this a rule, which ends
/// after its balanced closing brace.
fn rule_end(bytes: &[u8], start: usize) -> usize {
    let mut depth = 0usize;
    let mut i = start;
    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\'' => i = string_end(bytes, i),
            b'/' if bytes.get(i + 1) == Some(&b'*') => i = comment_end(bytes, i),
            b'\\' => i += 2,
            b'(' | b'[' => {
                depth += 1;
                i += 1;
            }
            b')' | b']' => {
                depth = depth.saturating_sub(1);
                i += 1;
            }
            b';' if depth == 0 => return i + 1,
            b'}' if depth == 0 => return i,
            b'{' => return block_end(bytes, i),
            _ => i += 1,
        }
    }
    bytes.len()
}

/// End of the block opened by the `{` at `open`, after its matching `}`.
fn block_end(bytes: &[u8], open: usize) -> usize {
    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\'' => i = string_end(bytes, i),
            b'/' if bytes.get(i + 1) == Some(&b'*') => i = comment_end(bytes, i),
            b'\\' => i += 2,
            b'{' => {
                depth += 1;
                i += 1;
            }
            b'}' => {
                depth -= 1;
                i += 1;
                if depth == 0 {
                    return i;
                }
            }
            _ => i += 1,
        }
    }
    bytes.len()
}
