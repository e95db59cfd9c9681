//! Directional rewriting of protected stylesheet text.
//!
//! The rewriter makes one forward pass, cutting the text at `{`, `}` and `;`.
//! A segment closed by `{` is a selector or at-rule prelude and is copied
//! as-is. Every other segment is a declaration candidate: if it parses as
//! `property: value`, the first rule in the table that accepts the property
//! is applied once and the segment is never looked at again.
//!
//! Text after the last `;` or `}` is a declaration candidate only inside an
//! unclosed block, or when the input has no blocks at all (an inline
//! `style` attribute). A trailing selector with no block is copied as-is.
//! In brace-free input, a selector-like `left:hover` reads as a declaration.
//!
//! Protected spans arrive as markers, so braces and semicolons inside
//! comments, strings and urls never reach the splitter.

pub mod swaps;
pub mod value;

use std::ops::Range;

use crate::placeholder::{MARKER_OPEN, marker_len};
use crate::rules::{Action, RewriteRule, RuleTable};
use swaps::match_case;
use value::Value;

/// Output of the rewrite pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewritten {
    pub text: String,
    /// Segments that parsed as declarations.
    pub declarations: usize,
    /// Declarations a rule changed.
    pub substitutions: usize,
}

/// Rewrites every declaration in `protected` using `rules`.
pub fn rewrite(protected: &str, rules: &RuleTable) -> Rewritten {
    let mut out = Rewritten {
        text: String::with_capacity(protected.len()),
        declarations: 0,
        substitutions: 0,
    };
    let mut start = 0;
    let mut depth = 0usize;
    let mut has_blocks = false;
    for (i, b) in protected.bytes().enumerate() {
        match b {
            b'{' => {
                out.text.push_str(&protected[start..=i]);
                depth += 1;
                has_blocks = true;
                start = i + 1;
            }
            b';' | b'}' => {
                out.push_segment(&protected[start..i], rules);
                out.text.push(b as char);
                if b == b'}' {
                    depth = depth.saturating_sub(1);
                    has_blocks = true;
                }
                start = i + 1;
            }
            _ => {}
        }
    }
    let tail = &protected[start..];
    if depth > 0 || !has_blocks {
        out.push_segment(tail, rules);
    } else {
        out.text.push_str(tail);
    }
    out
}

impl Rewritten {
    fn push_segment(&mut self, segment: &str, rules: &RuleTable) {
        let Some(declaration) = Declaration::parse(segment) else {
            self.text.push_str(segment);
            return;
        };
        self.declarations += 1;
        match declaration.flip(rules) {
            Some(flipped) => {
                self.substitutions += 1;
                self.text.push_str(&flipped);
            }
            None => self.text.push_str(segment),
        }
    }
}

/// A `property: value` segment, located by byte ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration<'a> {
    text: &'a str,
    /// Property name, hack character and vendor prefix included.
    name: Range<usize>,
    /// Length of a leading `*`/`_` hack plus any vendor prefix (`-webkit-`).
    prefix_len: usize,
    /// Value up to, not including, any `!important`.
    value: Range<usize>,
}

impl<'a> Declaration<'a> {
    /// Locates the property and value in `text`, skipping leading whitespace
    /// and markers. Returns `None` for anything that is not a declaration.
    pub fn parse(text: &'a str) -> Option<Self> {
        let bytes = text.as_bytes();
        let name_start = skip_trivia(text, 0);
        let hack_len = usize::from(matches!(bytes.get(name_start), Some(b'*' | b'_')));
        let mut name_end = name_start + hack_len;
        while name_end < bytes.len()
            && (bytes[name_end].is_ascii_alphanumeric()
                || bytes[name_end] == b'-'
                || bytes[name_end] == b'_')
        {
            name_end += 1;
        }
        if name_end == name_start + hack_len {
            return None;
        }
        let colon = skip_trivia(text, name_end);
        if bytes.get(colon) != Some(&b':') {
            return None;
        }
        let value_start = colon + 1;
        let value_end = important_start(bytes, value_start).unwrap_or(bytes.len());

        Some(Self {
            text,
            name: name_start..name_end,
            prefix_len: hack_len + vendor_prefix_len(&text[name_start + hack_len..name_end]),
            value: value_start..value_end,
        })
    }

    /// Property name as written, hack and vendor prefix included.
    pub fn name(&self) -> &'a str {
        &self.text[self.name.clone()]
    }

    /// Property name without its hack or vendor prefix, as written.
    pub fn base_name(&self) -> &'a str {
        &self.name()[self.prefix_len..]
    }

    pub fn value(&self) -> &'a str {
        &self.text[self.value.clone()]
    }

    /// Applies the first matching rule. Returns the rewritten segment, or
    /// `None` when no rule matched or the rule changed nothing.
    pub fn flip(&self, rules: &RuleTable) -> Option<String> {
        let property = self.base_name().to_ascii_lowercase();
        let rule = rules.rule_for(&property)?;
        let flipped = self.apply(rule, &property)?;
        log::trace!(
            "{}: `{}` -> `{}`",
            rule.name,
            self.text.trim(),
            flipped.trim()
        );
        Some(flipped)
    }

    fn apply(&self, rule: &RewriteRule, property: &str) -> Option<String> {
        if let Action::RenameProperty(map) = rule.action {
            let renamed = match_case(map.get(property)?, self.base_name());
            let name_start = self.name.start + self.prefix_len;
            return Some(format!(
                "{}{}{}",
                &self.text[..name_start],
                renamed,
                &self.text[self.name.end..]
            ));
        }

        let mut value = Value::parse(self.value());
        let changed = match rule.action {
            Action::SwapKeywords(map) => swaps::swap_keywords(&mut value, map),
            Action::BoxFourValue => swaps::box_four_value(&mut value),
            Action::CornerRadius => swaps::corner_radius(&mut value),
            Action::BackgroundPosition => swaps::background_position(&mut value),
            Action::NegateHorizontalOffset => swaps::negate_horizontal_offset(&mut value),
            Action::RenameProperty(_) => false,
        };
        changed.then(|| {
            format!(
                "{}{}{}",
                &self.text[..self.value.start],
                value.render(),
                &self.text[self.value.end..]
            )
        })
    }
}

/// Skips whitespace and placeholder markers starting at `from`.
fn skip_trivia(text: &str, from: usize) -> usize {
    let bytes = text.as_bytes();
    let mut i = from;
    while i < bytes.len() {
        if bytes[i].is_ascii_whitespace() {
            i += 1;
        } else if bytes[i] == MARKER_OPEN as u8 {
            match marker_len(&text[i..]) {
                Some(len) => i += len,
                None => break,
            }
        } else {
            break;
        }
    }
    i
}

/// Position of the `!` that starts an `!important` suffix, outside parentheses.
fn important_start(bytes: &[u8], from: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, &b) in bytes.iter().enumerate().skip(from) {
        match b {
            b'(' => depth += 1,
            b')' => depth = depth.saturating_sub(1),
            b'!' if depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}

/// Length of a `-vendor-` prefix on `name`. Custom properties (`--x`) have none.
fn vendor_prefix_len(name: &str) -> usize {
    if !name.starts_with('-') || name.starts_with("--") {
        return 0;
    }
    match name[1..].find('-') {
        Some(dash) if dash > 0 => dash + 2,
        _ => 0,
    }
}
