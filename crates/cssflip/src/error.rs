//! Error types for stylesheet flipping.
//!
//! Malformed CSS is never an error: unterminated comments, strings and blocks
//! are carried through verbatim. The variants here only fire when the
//! placeholder lifecycle between protection and restoration is broken,
//! which indicates a bug in the engine rather than bad input.

use thiserror::Error;

/// Errors that can occur while flipping a stylesheet.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlipError {
    /// A placeholder marker referenced an id with no stored span.
    #[error("unresolved placeholder #{id}")]
    UnresolvedPlaceholder { id: usize },

    /// A marker opener was found that is not followed by `<digits><close>`.
    #[error("malformed placeholder marker at byte {offset}")]
    MalformedPlaceholder { offset: usize },
}
