//! Declaration value tokens.
//!
//! A value is split into words, commas, slashes and placeholder markers.
//! Parenthesised groups (`rgba(0, 0, 0, .5)`, `calc(100% - 1px)`) stay inside
//! a single word. Gaps between tokens are never re-emitted from the token
//! list; rendering copies them from the original text, so whitespace survives
//! exactly.

use std::ops::Range;

use nom::{
    IResult,
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, char, digit1, one_of},
    combinator::{all_consuming, opt, recognize},
    sequence::{pair, terminated, tuple},
};

use crate::placeholder::{MARKER_OPEN, marker_len};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Word,
    Comma,
    Slash,
    /// A protected span. Opaque to every rule and never moved.
    Marker,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueToken {
    pub kind: TokenKind,
    pub span: Range<usize>,
}

/// A tokenised value with pending per-token replacements.
#[derive(Debug)]
pub struct Value<'a> {
    text: &'a str,
    tokens: Vec<ValueToken>,
    replacements: Vec<Option<String>>,
}

impl<'a> Value<'a> {
    pub fn parse(text: &'a str) -> Self {
        let tokens = tokenize(text);
        let replacements = vec![None; tokens.len()];
        Self {
            text,
            tokens,
            replacements,
        }
    }

    pub fn tokens(&self) -> &[ValueToken] {
        &self.tokens
    }

    /// Original text of token `index`.
    pub fn text_of(&self, index: usize) -> &'a str {
        &self.text[self.tokens[index].span.clone()]
    }

    pub fn has(&self, kind: TokenKind) -> bool {
        self.tokens.iter().any(|t| t.kind == kind)
    }

    /// Queues `replacement` for token `index`. Replacing a token with its own
    /// text is not recorded as a change.
    pub fn replace(&mut self, index: usize, replacement: impl Into<String>) {
        let replacement = replacement.into();
        if replacement != self.text_of(index) {
            self.replacements[index] = Some(replacement);
        }
    }

    pub fn is_changed(&self) -> bool {
        self.replacements.iter().any(Option::is_some)
    }

    /// Token indices split into comma-separated layers. Commas are dropped.
    pub fn layers(&self) -> Vec<Vec<usize>> {
        let mut layers = vec![Vec::new()];
        for (index, token) in self.tokens.iter().enumerate() {
            match token.kind {
                TokenKind::Comma => layers.push(Vec::new()),
                _ => {
                    if let Some(layer) = layers.last_mut() {
                        layer.push(index);
                    }
                }
            }
        }
        layers
    }

    /// Indices of word tokens among `indices`.
    pub fn words_in(&self, indices: &[usize]) -> Vec<usize> {
        indices
            .iter()
            .copied()
            .filter(|&i| self.tokens[i].kind == TokenKind::Word)
            .collect()
    }

    /// Renders the value with all queued replacements applied.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.text.len() + 8);
        let mut copied = 0;
        for (token, replacement) in self.tokens.iter().zip(&self.replacements) {
            if let Some(replacement) = replacement {
                out.push_str(&self.text[copied..token.span.start]);
                out.push_str(replacement);
                copied = token.span.end;
            }
        }
        out.push_str(&self.text[copied..]);
        out
    }
}

fn tokenize(text: &str) -> Vec<ValueToken> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let start = i;
        let kind = match bytes[i] {
            b if b.is_ascii_whitespace() => {
                i += 1;
                continue;
            }
            b',' => {
                i += 1;
                TokenKind::Comma
            }
            b'/' => {
                i += 1;
                TokenKind::Slash
            }
            b if b == MARKER_OPEN as u8 && marker_len(&text[i..]).is_some() => {
                i += marker_len(&text[i..]).unwrap_or(1);
                TokenKind::Marker
            }
            _ => {
                i = word_end(bytes, i);
                TokenKind::Word
            }
        };
        tokens.push(ValueToken {
            kind,
            span: start..i,
        });
    }
    tokens
}

fn word_end(bytes: &[u8], start: usize) -> usize {
    let mut depth = 0usize;
    let mut i = start;
    while i < bytes.len() {
        let b = bytes[i];
        if depth == 0
            && (b.is_ascii_whitespace() || b == b',' || b == b'/' || b == MARKER_OPEN as u8)
            && i > start
        {
            break;
        }
        match b {
            b'(' => depth += 1,
            b')' => depth = depth.saturating_sub(1),
            _ => {}
        }
        i += 1;
    }
    i
}

/// A numeric word: a percentage or a number with an optional unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric<'a> {
    Percentage(f64),
    Dimension { value: f64, unit: &'a str },
}

impl Numeric<'_> {
    pub fn value(&self) -> f64 {
        match *self {
            Numeric::Percentage(value) | Numeric::Dimension { value, .. } => value,
        }
    }
}

fn parse_number(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        opt(one_of("+-")),
        alt((
            recognize(pair(digit1, opt(pair(char('.'), digit1)))),
            recognize(pair(char('.'), digit1)),
        )),
    )))(input)
}

fn parse_numeric_word(input: &str) -> IResult<&str, Numeric<'_>> {
    let (input, number) = parse_number(input)?;
    let (input, unit) = opt(alt((tag("%"), alpha1)))(input)?;
    let value = number.parse::<f64>().map_err(|_| {
        nom::Err::Error(nom::error::Error::new(number, nom::error::ErrorKind::Float))
    })?;
    let numeric = match unit {
        Some("%") => Numeric::Percentage(value),
        unit => Numeric::Dimension {
            value,
            unit: unit.unwrap_or(""),
        },
    };
    Ok((input, numeric))
}

/// Parses `word` as a whole numeric token (`12px`, `-0.5em`, `30%`, `0`).
pub fn parse_numeric(word: &str) -> Option<Numeric<'_>> {
    all_consuming(parse_numeric_word)(word)
        .ok()
        .map(|(_, numeric)| numeric)
}

/// Mirrors a percentage word to `100% - p`.
///
/// The subtraction runs on the decimal digits, so the result keeps exactly
/// the input's precision and mirroring twice gives the input back. `None`
/// for anything that is not a percentage or has too many digits to hold.
pub fn mirror_percentage(word: &str) -> Option<String> {
    let (_, number) = all_consuming(terminated(parse_number, tag("%")))(word).ok()?;
    let (negative, unsigned) = match number.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, number.strip_prefix('+').unwrap_or(number)),
    };
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let places = fraction.len();
    let scale = 10i128.checked_pow(u32::try_from(places).ok()?)?;
    let digits: i128 = format!("{whole}{fraction}").parse().ok()?;
    let signed = if negative { -digits } else { digits };
    let mirrored = 100i128.checked_mul(scale)?.checked_sub(signed)?;

    let sign = if mirrored < 0 { "-" } else { "" };
    let magnitude = mirrored.unsigned_abs();
    let scale = scale.unsigned_abs();
    Some(if places == 0 {
        format!("{sign}{magnitude}%")
    } else {
        format!(
            "{sign}{}.{:0places$}%",
            magnitude / scale,
            magnitude % scale
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placeholder::marker;

    fn kinds(value: &Value<'_>) -> Vec<TokenKind> {
        value.tokens().iter().map(|t| t.kind).collect()
    }

    fn words(text: &str) -> Vec<&str> {
        let value = Value::parse(text);
        (0..value.tokens().len()).map(|i| value.text_of(i)).collect()
    }

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(words(" 1px  2px\t3px 4px "), vec!["1px", "2px", "3px", "4px"]);
    }

    #[test]
    fn keeps_parenthesised_groups_together() {
        assert_eq!(
            words("0 0 2px rgba(0, 0, 0, .5), calc(100% - 1px) 0"),
            vec!["0", "0", "2px", "rgba(0, 0, 0, .5)", ",", "calc(100% - 1px)", "0"]
        );
    }

    #[test]
    fn slash_and_markers_are_separate_tokens() {
        let text = format!("{}left 10px/2px", marker(3));
        let value = Value::parse(&text);
        assert_eq!(
            kinds(&value),
            vec![
                TokenKind::Marker,
                TokenKind::Word,
                TokenKind::Word,
                TokenKind::Slash,
                TokenKind::Word
            ]
        );
        assert_eq!(value.text_of(1), "left");
    }

    #[test]
    fn render_preserves_gaps() {
        let mut value = Value::parse("  a \t b  ");
        value.replace(1, "bee");
        assert_eq!(value.render(), "  a \t bee  ");
        assert!(value.is_changed());
    }

    #[test]
    fn replacing_with_same_text_is_no_change() {
        let mut value = Value::parse("left");
        value.replace(0, "left");
        assert!(!value.is_changed());
    }

    #[test]
    fn layers_split_on_commas() {
        let value = Value::parse("a b, c");
        assert_eq!(value.layers(), vec![vec![0, 1], vec![3]]);
    }

    #[test]
    fn numeric_words() {
        assert_eq!(parse_numeric("30%"), Some(Numeric::Percentage(30.0)));
        assert_eq!(
            parse_numeric("-1.5em"),
            Some(Numeric::Dimension {
                value: -1.5,
                unit: "em"
            })
        );
        assert_eq!(
            parse_numeric(".5px"),
            Some(Numeric::Dimension {
                value: 0.5,
                unit: "px"
            })
        );
        assert_eq!(
            parse_numeric("0"),
            Some(Numeric::Dimension {
                value: 0.0,
                unit: ""
            })
        );
        assert_eq!(parse_numeric("left"), None);
        assert_eq!(parse_numeric("10px)"), None);
        assert_eq!(parse_numeric("#fff"), None);
    }

    #[test]
    fn mirror_percentage_keeps_precision() {
        assert_eq!(mirror_percentage("25%").as_deref(), Some("75%"));
        assert_eq!(mirror_percentage("33.333333%").as_deref(), Some("66.666667%"));
        assert_eq!(mirror_percentage("12.345678%").as_deref(), Some("87.654322%"));
        assert_eq!(mirror_percentage("25.0%").as_deref(), Some("75.0%"));
        assert_eq!(mirror_percentage(".5%").as_deref(), Some("99.5%"));
        assert_eq!(mirror_percentage("-10%").as_deref(), Some("110%"));
        assert_eq!(mirror_percentage("150%").as_deref(), Some("-50%"));
        assert_eq!(mirror_percentage("100.5%").as_deref(), Some("-0.5%"));
    }

    #[test]
    fn mirror_percentage_twice_is_identity() {
        for word in ["0.00001%", "33.333333%", "-0.5%", "100000000000000000000000%", "0%"] {
            let once = mirror_percentage(word).unwrap();
            assert_eq!(mirror_percentage(&once).as_deref(), Some(word), "via {once}");
        }
    }

    #[test]
    fn mirror_percentage_handles_huge_values() {
        assert_eq!(
            mirror_percentage("100000000000000000000000%").as_deref(),
            Some("-99999999999999999999900%")
        );
        let too_long = format!("{}%", "9".repeat(60));
        assert_eq!(mirror_percentage(&too_long), None);
    }

    #[test]
    fn mirror_percentage_rejects_other_words() {
        assert_eq!(mirror_percentage("10px"), None);
        assert_eq!(mirror_percentage("left"), None);
        assert_eq!(mirror_percentage("10%%"), None);
    }
}
