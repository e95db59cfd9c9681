//! Value-level swap actions. Each returns `true` when it queued a change.

use crate::rewrite::value::{TokenKind, Value, mirror_percentage, parse_numeric};
use crate::rules::SIDE_KEYWORDS;

/// Re-cases `replacement` to follow `original`, one hyphen-separated part
/// at a time when both have the same number of parts:
/// `Margin-Left` → `Margin-Right`, `LEFT` → `RIGHT`.
pub fn match_case(replacement: &str, original: &str) -> String {
    if replacement.split('-').count() != original.split('-').count() {
        return match_word_case(replacement, original);
    }
    replacement
        .split('-')
        .zip(original.split('-'))
        .map(|(replacement, original)| match_word_case(replacement, original))
        .collect::<Vec<_>>()
        .join("-")
}

/// `LEFT` → `RIGHT`, `Left` → `Right`, anything else lowercase.
fn match_word_case(replacement: &str, original: &str) -> String {
    let mut letters = original.chars().filter(char::is_ascii_alphabetic).peekable();
    if letters.peek().is_none() {
        return replacement.to_string();
    }
    if letters.all(|c| c.is_ascii_uppercase()) {
        return replacement.to_ascii_uppercase();
    }
    if original.starts_with(|c: char| c.is_ascii_uppercase()) {
        let mut chars = replacement.chars();
        return match chars.next() {
            Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            None => String::new(),
        };
    }
    replacement.to_string()
}

/// Case-insensitive lookup of `word` in a keyword map, re-cased to match.
pub fn lookup_keyword(map: &phf::Map<&'static str, &'static str>, word: &str) -> Option<String> {
    map.get(word.to_ascii_lowercase().as_str())
        .map(|swapped| match_case(swapped, word))
}

/// Swaps every word found in `map`.
pub fn swap_keywords(value: &mut Value<'_>, map: &phf::Map<&'static str, &'static str>) -> bool {
    for index in 0..value.tokens().len() {
        if value.tokens()[index].kind != TokenKind::Word {
            continue;
        }
        if let Some(swapped) = lookup_keyword(map, value.text_of(index)) {
            value.replace(index, swapped);
        }
    }
    value.is_changed()
}

/// `top right bottom left` → `top left bottom right`.
///
/// Only the four-value form carries distinct left and right values; shorter
/// forms and anything with commas or slashes are left alone.
pub fn box_four_value(value: &mut Value<'_>) -> bool {
    if value.has(TokenKind::Comma) || value.has(TokenKind::Slash) {
        return false;
    }
    let all: Vec<usize> = (0..value.tokens().len()).collect();
    let words = value.words_in(&all);
    if let [_, right, _, left] = words[..] {
        let (right_text, left_text) = (value.text_of(right), value.text_of(left));
        value.replace(right, left_text);
        value.replace(left, right_text);
    }
    value.is_changed()
}

/// Mirrors border-radius corners horizontally.
///
/// Each side of the `/` is handled on its own:
/// `a b` → `b a`, `a b c` → `b a b c`, `a b c d` → `b a d c`.
pub fn corner_radius(value: &mut Value<'_>) -> bool {
    if value.has(TokenKind::Comma) {
        return false;
    }
    let mut groups: Vec<Vec<usize>> = vec![Vec::new()];
    for (index, token) in value.tokens().iter().enumerate() {
        match token.kind {
            TokenKind::Slash => groups.push(Vec::new()),
            TokenKind::Word => {
                if let Some(group) = groups.last_mut() {
                    group.push(index);
                }
            }
            _ => {}
        }
    }
    for group in groups {
        match group[..] {
            [a, b] => {
                let (a_text, b_text) = (value.text_of(a), value.text_of(b));
                value.replace(a, b_text);
                value.replace(b, a_text);
            }
            [a, b, c] => {
                let (a_text, b_text, c_text) =
                    (value.text_of(a), value.text_of(b), value.text_of(c));
                value.replace(a, b_text);
                value.replace(b, a_text);
                value.replace(c, format!("{b_text} {c_text}"));
            }
            [a, b, c, d] => {
                let texts = [a, b, c, d].map(|i| value.text_of(i));
                value.replace(a, texts[1]);
                value.replace(b, texts[0]);
                value.replace(c, texts[3]);
                value.replace(d, texts[2]);
            }
            _ => {}
        }
    }
    value.is_changed()
}

/// Whether `word` can take part in a `<position>`.
fn is_position_word(word: &str) -> bool {
    matches!(
        word.to_ascii_lowercase().as_str(),
        "left" | "right" | "center" | "top" | "bottom"
    ) || parse_numeric(word).is_some()
}

/// Mirrors the horizontal component of each background layer.
///
/// `left`/`right` keywords are swapped. A percentage in the leading
/// horizontal slot becomes `100% - p`. Lengths cannot be mirrored without
/// knowing the box size and are left alone. Words after a layer's `/` are a
/// size, not a position, and are skipped.
pub fn background_position(value: &mut Value<'_>) -> bool {
    for layer in value.layers() {
        let position: Vec<usize> = layer
            .iter()
            .copied()
            .take_while(|&i| value.tokens()[i].kind != TokenKind::Slash)
            .filter(|&i| value.tokens()[i].kind == TokenKind::Word)
            .collect();

        if let Some(&first) = position.iter().find(|&&i| is_position_word(value.text_of(i))) {
            if let Some(mirrored) = mirror_percentage(value.text_of(first)) {
                value.replace(first, mirrored);
            }
        }
        for &index in &position {
            if let Some(swapped) = lookup_keyword(&SIDE_KEYWORDS, value.text_of(index)) {
                value.replace(index, swapped);
            }
        }
    }
    value.is_changed()
}

/// Negates the horizontal offset (the first number) of each shadow layer.
pub fn negate_horizontal_offset(value: &mut Value<'_>) -> bool {
    for layer in value.layers() {
        let words = value.words_in(&layer);
        let Some((index, numeric)) = words
            .iter()
            .find_map(|&i| parse_numeric(value.text_of(i)).map(|n| (i, n)))
        else {
            continue;
        };
        if numeric.value() == 0.0 {
            continue;
        }
        let text = value.text_of(index);
        let negated = if let Some(rest) = text.strip_prefix('-') {
            rest.to_string()
        } else if let Some(rest) = text.strip_prefix('+') {
            format!("-{rest}")
        } else {
            format!("-{text}")
        };
        value.replace(index, negated);
    }
    value.is_changed()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(text: &str, action: fn(&mut Value<'_>) -> bool) -> String {
        let mut value = Value::parse(text);
        action(&mut value);
        value.render()
    }

    #[test]
    fn match_case_follows_original() {
        assert_eq!(match_case("right", "left"), "right");
        assert_eq!(match_case("right", "LEFT"), "RIGHT");
        assert_eq!(match_case("right", "Left"), "Right");
        assert_eq!(match_case("rtl", "lTr"), "rtl");
    }

    #[test]
    fn match_case_follows_each_hyphenated_part() {
        assert_eq!(match_case("margin-right", "Margin-Left"), "Margin-Right");
        assert_eq!(
            match_case("border-top-right-radius", "Border-Top-Left-Radius"),
            "Border-Top-Right-Radius"
        );
        assert_eq!(match_case("padding-right", "padding-LEFT"), "padding-RIGHT");
        assert_eq!(match_case("sw-resize", "SE-Resize"), "SW-Resize");
        assert_eq!(match_case("border-radius-topright", "Border-Radius-TopLeft"), "Border-Radius-Topright");
    }

    #[test]
    fn keywords_swap_whole_words_only() {
        let mut value = Value::parse("left leftish Right");
        assert!(swap_keywords(&mut value, &SIDE_KEYWORDS));
        assert_eq!(value.render(), "right leftish Left");
    }

    #[test]
    fn four_values_swap_second_and_fourth() {
        assert_eq!(apply("1px 2px 3px 4px", box_four_value), "1px 4px 3px 2px");
        assert_eq!(apply("1px  2px 3px   4px", box_four_value), "1px  4px 3px   2px");
    }

    #[test]
    fn fewer_than_four_values_are_untouched() {
        for text in ["1px", "1px 2px", "1px 2px 3px", "1px 2px 3px 4px 5px"] {
            let mut value = Value::parse(text);
            assert!(!box_four_value(&mut value), "{text}");
            assert_eq!(value.render(), text);
        }
    }

    #[test]
    fn four_equal_sides_are_no_change() {
        let mut value = Value::parse("1px 2px 3px 2px");
        assert!(!box_four_value(&mut value));
    }

    #[test]
    fn corner_radius_forms() {
        assert_eq!(apply("1px", corner_radius), "1px");
        assert_eq!(apply("1px 2px", corner_radius), "2px 1px");
        assert_eq!(apply("1px 2px 3px", corner_radius), "2px 1px 2px 3px");
        assert_eq!(apply("1px 2px 3px 4px", corner_radius), "2px 1px 4px 3px");
        assert_eq!(
            apply("1px 2px 3px 4px / 5px 6px", corner_radius),
            "2px 1px 4px 3px / 6px 5px"
        );
    }

    #[test]
    fn background_keywords_and_percentages() {
        assert_eq!(apply("left center", background_position), "right center");
        assert_eq!(apply("25% 50%", background_position), "75% 50%");
        assert_eq!(apply("12.5% 0", background_position), "87.5% 0");
        assert_eq!(apply("33.333333% 0", background_position), "66.666667% 0");
        assert_eq!(apply("10px 50%", background_position), "10px 50%");
        assert_eq!(apply("right 10px top 5px", background_position), "left 10px top 5px");
    }

    #[test]
    fn background_shorthand_skips_colors_and_sizes() {
        assert_eq!(
            apply("#fff no-repeat 10% 0 / 50% auto", background_position),
            "#fff no-repeat 90% 0 / 50% auto"
        );
        assert_eq!(
            apply("red 0 0, blue 20% top", background_position),
            "red 0 0, blue 80% top"
        );
    }

    #[test]
    fn shadow_offsets_negate() {
        assert_eq!(apply("1px 2px 3px red", negate_horizontal_offset), "-1px 2px 3px red");
        assert_eq!(apply("-1px 2px", negate_horizontal_offset), "1px 2px");
        assert_eq!(apply("+1px 2px", negate_horizontal_offset), "-1px 2px");
        assert_eq!(apply("0 2px 3px", negate_horizontal_offset), "0 2px 3px");
        assert_eq!(
            apply("inset 2px 0 red, 3px 3px blue", negate_horizontal_offset),
            "inset -2px 0 red, -3px 3px blue"
        );
        assert_eq!(apply("none", negate_horizontal_offset), "none");
    }
}
