//! Optional direction swaps inside protected `url(...)` spans.

use std::borrow::Cow;

use crate::options::FlipOptions;
use crate::placeholder::{PlaceholderMap, SpanKind};
use crate::rewrite::swaps::match_case;

/// Applies the url flags in `options` to every top-level url span in `map`.
///
/// Urls nested in other spans (comments, no-flip targets, `@font-face`) are
/// part of those spans and are left alone.
pub fn swap_in_urls(map: &mut PlaceholderMap<'_>, options: FlipOptions) -> usize {
    let mut swapped = 0;
    for placeholder in map.iter_mut().filter(|p| p.kind == SpanKind::Url) {
        let text = match swap_url_words(&placeholder.text, options) {
            Cow::Owned(text) => text,
            Cow::Borrowed(_) => continue,
        };
        placeholder.text = Cow::Owned(text);
        swapped += 1;
    }
    swapped
}

/// Swaps whole ASCII-letter runs in `url` as requested by `options`.
pub fn swap_url_words(url: &str, options: FlipOptions) -> Cow<'_, str> {
    let bytes = url.as_bytes();
    let mut out: Option<String> = None;
    let mut copied = 0;
    let mut i = 0;
    while i < bytes.len() {
        if !bytes[i].is_ascii_alphabetic() {
            i += 1;
            continue;
        }
        let start = i;
        while i < bytes.len() && bytes[i].is_ascii_alphabetic() {
            i += 1;
        }
        let word = &url[start..i];
        if let Some(swapped) = swap_word(word, options) {
            let buffer = out.get_or_insert_with(|| String::with_capacity(url.len()));
            buffer.push_str(&url[copied..start]);
            buffer.push_str(&match_case(swapped, word));
            copied = i;
        }
    }
    match out {
        Some(mut buffer) => {
            buffer.push_str(&url[copied..]);
            Cow::Owned(buffer)
        }
        None => Cow::Borrowed(url),
    }
}

fn swap_word(word: &str, options: FlipOptions) -> Option<&'static str> {
    let lower = word.to_ascii_lowercase();
    match lower.as_str() {
        "ltr" if options.contains(FlipOptions::SWAP_LTR_RTL_IN_URL) => Some("rtl"),
        "rtl" if options.contains(FlipOptions::SWAP_LTR_RTL_IN_URL) => Some("ltr"),
        "left" if options.contains(FlipOptions::SWAP_LEFT_RIGHT_IN_URL) => Some("right"),
        "right" if options.contains(FlipOptions::SWAP_LEFT_RIGHT_IN_URL) => Some("left"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protect::protect;

    #[test]
    fn no_flags_borrow() {
        let url = "url(arrow-left.png)";
        assert!(matches!(
            swap_url_words(url, FlipOptions::empty()),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn left_right_flag_swaps_whole_words() {
        let swapped = swap_url_words("url(img/left/arrow-LEFT.png?leftish)", FlipOptions::SWAP_LEFT_RIGHT_IN_URL);
        assert_eq!(swapped, "url(img/right/arrow-RIGHT.png?leftish)");
    }

    #[test]
    fn ltr_flag_leaves_left_alone() {
        let swapped = swap_url_words("url(ltr-left.png)", FlipOptions::SWAP_LTR_RTL_IN_URL);
        assert_eq!(swapped, "url(rtl-left.png)");
    }

    #[test]
    fn only_top_level_urls_change() {
        let source = "a { background: url(left.png) } /* url(left.png) */";
        let mut protected = protect(source);
        let count = swap_in_urls(&mut protected.map, FlipOptions::SWAP_LEFT_RIGHT_IN_URL);
        assert_eq!(count, 1);
        assert_eq!(protected.map.get(0).unwrap().text, "url(right.png)");
        assert_eq!(protected.map.get(1).unwrap().text, "/* url(left.png) */");
    }
}
