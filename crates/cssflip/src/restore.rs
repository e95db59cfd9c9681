//! Restoration pass: swaps markers back for the text they stand in for.

use crate::error::FlipError;
use crate::placeholder::{MARKER_OPEN, PlaceholderMap, parse_marker};

/// Replaces every marker in `text` with its stored span, in a single pass.
///
/// Fails if a marker names an id the map does not hold, or if a marker opener
/// is not followed by a well-formed marker. Both mean the rewriter damaged a
/// marker, which is a bug, never a property of the input.
pub fn restore(text: &str, map: &PlaceholderMap<'_>) -> Result<String, FlipError> {
    let extra: usize = map.iter().map(|p| p.text.len()).sum();
    let mut out = String::with_capacity(text.len() + extra);
    let mut rest = text;
    let mut offset = 0;

    while let Some(index) = rest.find(MARKER_OPEN) {
        out.push_str(&rest[..index]);
        let (after, id) = parse_marker(&rest[index..]).map_err(|_| {
            FlipError::MalformedPlaceholder {
                offset: offset + index,
            }
        })?;
        let placeholder = map.get(id).ok_or(FlipError::UnresolvedPlaceholder { id })?;
        out.push_str(&placeholder.text);

        offset += rest.len() - after.len();
        rest = after;
    }
    out.push_str(rest);
    Ok(out)
}
