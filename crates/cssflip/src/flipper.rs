//! The protect → rewrite → restore pipeline.

use crate::error::FlipError;
use crate::options::FlipOptions;
use crate::protect::{Protected, protect};
use crate::restore::restore;
use crate::rewrite::rewrite;
use crate::rules::{DEFAULT_RULES, RuleTable};
use crate::url::swap_in_urls;

/// Counters collected during one transform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Diagnostics {
    /// Segments recognised as declarations.
    pub declarations: usize,
    /// Declarations changed by a rule.
    pub substitutions: usize,
    /// Spans hidden from the rewriter.
    pub protected: usize,
}

/// Flipped stylesheet text plus diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformResult {
    pub text: String,
    pub diagnostics: Diagnostics,
}

/// Converts stylesheets from LTR to RTL.
///
/// A `Flipper` holds only a borrowed rule table and a set of flags, so it is
/// cheap to build and can be shared freely between threads.
///
/// # Examples
///
/// ```rust
/// use cssflip::{Flipper, FlipOptions};
///
/// let flipper = Flipper::new().with_options(FlipOptions::SWAP_LEFT_RIGHT_IN_URL);
/// let result = flipper
///     .transform(".nav { background: url(arrow-left.png) left; }")
///     .unwrap();
/// assert_eq!(result.text, ".nav { background: url(arrow-right.png) right; }");
/// assert_eq!(result.diagnostics.substitutions, 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Flipper<'r> {
    rules: &'r RuleTable,
    options: FlipOptions,
}

impl Flipper<'static> {
    /// A flipper using the built-in rules and no options.
    pub fn new() -> Self {
        Self {
            rules: &*DEFAULT_RULES,
            options: FlipOptions::empty(),
        }
    }
}

impl Default for Flipper<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r> Flipper<'r> {
    /// Uses `rules` instead of the built-in table.
    pub fn with_rules<'s>(self, rules: &'s RuleTable) -> Flipper<'s> {
        Flipper {
            rules,
            options: self.options,
        }
    }

    pub fn with_options(mut self, options: FlipOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> FlipOptions {
        self.options
    }

    pub fn rules(&self) -> &'r RuleTable {
        self.rules
    }

    /// Flips `source`.
    ///
    /// Never fails on malformed CSS. An error means the placeholder lifecycle
    /// was broken inside the engine.
    pub fn transform(&self, source: &str) -> Result<TransformResult, FlipError> {
        let Protected { text, mut map } = protect(source);
        let rewritten = rewrite(&text, self.rules);

        if !self.options.is_empty() {
            let urls = swap_in_urls(&mut map, self.options);
            log::trace!("swapped directions in {urls} urls");
        }

        let text = restore(&rewritten.text, &map)?;
        let diagnostics = Diagnostics {
            declarations: rewritten.declarations,
            substitutions: rewritten.substitutions,
            protected: map.len(),
        };
        log::debug!(
            "flipped {} of {} declarations ({} protected spans)",
            diagnostics.substitutions,
            diagnostics.declarations,
            diagnostics.protected
        );
        Ok(TransformResult { text, diagnostics })
    }
}
