//! The directional rule table.
//!
//! Rules are plain data: a category, the properties a rule applies to and the
//! action to run on a matching declaration. The rewriter tries rules in table
//! order and stops at the first one whose matcher accepts the property, so a
//! declaration is transformed by at most one rule.
//!
//! ```rust
//! use cssflip::rules::{Category, DEFAULT_RULES};
//!
//! let rule = DEFAULT_RULES.rule_for("margin-left").unwrap();
//! assert_eq!(rule.category, Category::PropertyName);
//!
//! assert!(DEFAULT_RULES.rule_for("color").is_none());
//! ```

use once_cell::sync::Lazy;
use phf::phf_map;

/// Rule categories, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    /// The property name itself is directional (`margin-left`).
    PropertyName,
    /// The value carries a directional keyword (`float: left`).
    KeywordValue,
    /// A positional multi-value shorthand (`margin: 1px 2px 3px 4px`).
    PositionalShorthand,
    /// Horizontal background offsets.
    BackgroundPosition,
    /// Horizontal shadow offsets.
    ShadowOffset,
}

/// What a rule does to a matching declaration.
#[derive(Debug, Clone, Copy)]
pub enum Action {
    /// Replace the property name; the value is untouched.
    RenameProperty(&'static phf::Map<&'static str, &'static str>),
    /// Swap whole keyword words in the value.
    SwapKeywords(&'static phf::Map<&'static str, &'static str>),
    /// `top right bottom left` becomes `top left bottom right` when exactly
    /// four values are given.
    BoxFourValue,
    /// Mirror border-radius corners on each side of the `/`.
    CornerRadius,
    /// Swap `left`/`right` and mirror a leading horizontal percentage.
    BackgroundPosition,
    /// Negate the horizontal offset of each shadow layer.
    NegateHorizontalOffset,
}

/// One declarative rewrite rule.
#[derive(Debug, Clone)]
pub struct RewriteRule {
    pub name: &'static str,
    pub category: Category,
    /// Properties this rule applies to. Rename rules match on their map keys
    /// instead and leave this empty.
    pub properties: &'static [&'static str],
    pub action: Action,
}

impl RewriteRule {
    /// Whether this rule applies to `property` (lowercase, vendor prefix removed).
    pub fn matches(&self, property: &str) -> bool {
        match self.action {
            Action::RenameProperty(map) => map.contains_key(property),
            _ => self.properties.contains(&property),
        }
    }
}

/// An ordered, immutable set of rewrite rules.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<RewriteRule>,
}

/// The built-in table, built once on first use.
pub static DEFAULT_RULES: Lazy<RuleTable> = Lazy::new(RuleTable::builtin);

static PROPERTY_SWAPS: phf::Map<&'static str, &'static str> = phf_map! {
    "left" => "right",
    "right" => "left",
    "margin-left" => "margin-right",
    "margin-right" => "margin-left",
    "padding-left" => "padding-right",
    "padding-right" => "padding-left",
    "border-left" => "border-right",
    "border-right" => "border-left",
    "border-left-width" => "border-right-width",
    "border-right-width" => "border-left-width",
    "border-left-style" => "border-right-style",
    "border-right-style" => "border-left-style",
    "border-left-color" => "border-right-color",
    "border-right-color" => "border-left-color",
    "border-top-left-radius" => "border-top-right-radius",
    "border-top-right-radius" => "border-top-left-radius",
    "border-bottom-left-radius" => "border-bottom-right-radius",
    "border-bottom-right-radius" => "border-bottom-left-radius",
    "border-radius-topleft" => "border-radius-topright",
    "border-radius-topright" => "border-radius-topleft",
    "border-radius-bottomleft" => "border-radius-bottomright",
    "border-radius-bottomright" => "border-radius-bottomleft",
    "scroll-margin-left" => "scroll-margin-right",
    "scroll-margin-right" => "scroll-margin-left",
    "scroll-padding-left" => "scroll-padding-right",
    "scroll-padding-right" => "scroll-padding-left",
};

/// `left`/`right` as standalone keywords.
pub static SIDE_KEYWORDS: phf::Map<&'static str, &'static str> = phf_map! {
    "left" => "right",
    "right" => "left",
};

static DIRECTION_KEYWORDS: phf::Map<&'static str, &'static str> = phf_map! {
    "ltr" => "rtl",
    "rtl" => "ltr",
};

static CURSOR_KEYWORDS: phf::Map<&'static str, &'static str> = phf_map! {
    "e-resize" => "w-resize",
    "w-resize" => "e-resize",
    "ne-resize" => "nw-resize",
    "nw-resize" => "ne-resize",
    "se-resize" => "sw-resize",
    "sw-resize" => "se-resize",
};

impl RuleTable {
    pub fn new(rules: Vec<RewriteRule>) -> Self {
        Self { rules }
    }

    /// The standard LTR → RTL rules, in category order.
    pub fn builtin() -> Self {
        Self::new(vec![
            RewriteRule {
                name: "physical-property",
                category: Category::PropertyName,
                properties: &[],
                action: Action::RenameProperty(&PROPERTY_SWAPS),
            },
            RewriteRule {
                name: "side-keyword",
                category: Category::KeywordValue,
                properties: &["float", "clear", "text-align", "text-align-last"],
                action: Action::SwapKeywords(&SIDE_KEYWORDS),
            },
            RewriteRule {
                name: "direction",
                category: Category::KeywordValue,
                properties: &["direction"],
                action: Action::SwapKeywords(&DIRECTION_KEYWORDS),
            },
            RewriteRule {
                name: "resize-cursor",
                category: Category::KeywordValue,
                properties: &["cursor"],
                action: Action::SwapKeywords(&CURSOR_KEYWORDS),
            },
            RewriteRule {
                name: "box-four-value",
                category: Category::PositionalShorthand,
                properties: &[
                    "margin",
                    "padding",
                    "border-width",
                    "border-color",
                    "border-style",
                    "inset",
                    "scroll-margin",
                    "scroll-padding",
                ],
                action: Action::BoxFourValue,
            },
            RewriteRule {
                name: "corner-radius",
                category: Category::PositionalShorthand,
                properties: &["border-radius"],
                action: Action::CornerRadius,
            },
            RewriteRule {
                name: "background-position",
                category: Category::BackgroundPosition,
                properties: &["background", "background-position", "background-position-x"],
                action: Action::BackgroundPosition,
            },
            RewriteRule {
                name: "shadow-offset",
                category: Category::ShadowOffset,
                properties: &["box-shadow", "text-shadow"],
                action: Action::NegateHorizontalOffset,
            },
        ])
    }

    /// First rule in table order that applies to `property`.
    ///
    /// `property` is compared as given; callers lowercase it and strip any
    /// vendor prefix first.
    pub fn rule_for(&self, property: &str) -> Option<&RewriteRule> {
        self.rules.iter().find(|rule| rule.matches(property))
    }

    pub fn rules(&self) -> &[RewriteRule] {
        &self.rules
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::builtin()
    }
}
