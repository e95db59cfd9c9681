//! # cssflip - LTR to RTL stylesheet conversion
//!
//! Rewrites the directional parts of a CSS stylesheet so a left-to-right
//! layout renders as its right-to-left mirror, and leaves everything else
//! byte-for-byte alone.
//!
//! ## Quick Start
//!
//! ```rust
//! let rtl = cssflip::transform(".a { float: left; margin: 1px 2px 3px 4px; }").unwrap();
//! assert_eq!(rtl, ".a { float: right; margin: 1px 4px 3px 2px; }");
//! ```
//!
//! ## Pipeline
//!
//! 1. [`protect`]: comments, strings, `url(...)` tokens, `@font-face` blocks
//!    and no-flip targets are swapped out for placeholder markers.
//! 2. [`rewrite`]: every declaration is matched against the [`rules`] table
//!    and the first matching rule is applied once.
//! 3. [`url`]: optional `left`/`right` and `ltr`/`rtl` swaps inside urls.
//! 4. [`restore`]: markers are replaced with the original text.
//!
//! ## What gets flipped
//!
//! - Property names: `left`, `margin-left`, `padding-right`, `border-left-*`,
//!   `border-top-left-radius`, ...
//! - Keyword values: `float`, `clear`, `text-align`, `direction`, resize cursors
//! - Four-value box shorthands: `margin: 1px 2px 3px 4px` → `1px 4px 3px 2px`
//! - `border-radius` corners
//! - `background-position` keywords and leading percentages
//! - `box-shadow` / `text-shadow` horizontal offsets
//!
//! ## Opting out
//!
//! Put `/* noflip */` (or `/* @noflip */`) before a declaration to keep it as
//! written. Before a selector, it keeps the whole rule:
//!
//! ```rust
//! let css = ".a { /* noflip */ float: left; }\n/* @noflip */ .b { left: 0 }";
//! assert_eq!(cssflip::transform(css).unwrap(), css);
//! ```
//!
//! ## Modules
//!
//! - [`flipper`]: the configurable entry point and its diagnostics
//! - [`rules`]: the declarative rule table
//! - [`placeholder`]: marker syntax and the span side table
//! - [`error`]: error types

pub mod error;
pub mod flipper;
pub mod options;
pub mod placeholder;
pub mod protect;
pub mod restore;
pub mod rewrite;
pub mod rules;
pub mod url;

pub use error::FlipError;
pub use flipper::{Diagnostics, Flipper, TransformResult};
pub use options::FlipOptions;
pub use rules::{DEFAULT_RULES, RuleTable};

/// Flips `source` with the built-in rules and default options.
pub fn transform(source: &str) -> Result<String, FlipError> {
    Flipper::new().transform(source).map(|result| result.text)
}
