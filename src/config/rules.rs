//! Per-domain filename rules.
//!
//! Each crawled domain carries an ordered list of rules. A source image is
//! matched by its filename: rules are tried longest pattern first and the
//! first whose pattern occurs in the filename wins.
//!
//! ```yaml
//! domains:
//!   shop.example.com:
//!     - pattern: "-front"
//!       action: process
//!       mockup_sets_to_use: [classic]
//!       coords: { x: 0, y: 0, w: 500, h: 500 }
//!       skipBlack: true
//!     - pattern: "-back"
//!       action: skip
//! ```

use serde::{Deserialize, Serialize};

/// What to do with a source matched by a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleAction {
    #[default]
    Process,
    Skip,
}

/// Rectangle cut out of the source before isolation.
///
/// Its origin doubles as the brightness sample point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl CropRect {
    pub fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRule {
    /// Substring looked up in the source filename; empty matches everything
    #[serde(default)]
    pub pattern: String,

    #[serde(default)]
    pub action: RuleAction,

    /// Template sets rendered for matching sources
    #[serde(default)]
    pub mockup_sets_to_use: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coords: Option<CropRect>,

    /// Reject sources classified as white-backed
    #[serde(default, rename = "skipWhite")]
    pub skip_white: bool,

    /// Reject sources classified as black-backed
    #[serde(default, rename = "skipBlack")]
    pub skip_black: bool,
}

impl DomainRule {
    pub fn matches(&self, filename: &str) -> bool {
        filename.contains(self.pattern.as_str())
    }
}

/// A domain's rules in resolution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainRules {
    rules: Vec<DomainRule>,
}

impl DomainRules {
    /// Order `rules` longest pattern first. Equal-length patterns keep their
    /// configured order.
    pub fn new(mut rules: Vec<DomainRule>) -> Self {
        rules.sort_by(|a, b| b.pattern.len().cmp(&a.pattern.len()));
        Self { rules }
    }

    /// First rule whose pattern occurs in `filename`.
    pub fn resolve(&self, filename: &str) -> Option<&DomainRule> {
        self.rules.iter().find(|rule| rule.matches(filename))
    }

    /// Every template set name referenced by any rule, deduplicated, in
    /// first-seen order.
    pub fn referenced_sets(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for name in self.rules.iter().flat_map(|r| r.mockup_sets_to_use.iter()) {
            if !names.contains(&name.as_str()) {
                names.push(name);
            }
        }
        names
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DomainRule> {
        self.rules.iter()
    }
}
