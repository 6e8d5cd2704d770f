//! Output titles derived from source filenames.
//!
//! `funny-cat-t-shirt.png` with keywords `["t-shirt"]`, prefix `Vintage` and
//! suffix `Tee` becomes `Vintage funny cat Tee.webp`.

use regex::{Regex, RegexBuilder};

use crate::imaging::OutputFormat;

/// Removes configured keywords from titles, case-insensitively and on word
/// boundaries. A keyword's parts may be joined by a hyphen, a whitespace
/// character or nothing: `t-shirt` also removes `T Shirt` and `tshirt`.
#[derive(Debug, Clone)]
pub struct TitleCleaner {
    pattern: Option<Regex>,
}

impl TitleCleaner {
    pub fn new(keywords: &[String]) -> Result<Self, regex::Error> {
        let mut alternatives: Vec<String> = keywords
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .map(|k| {
                k.split(['-', ' '])
                    .map(regex::escape)
                    .collect::<Vec<_>>()
                    .join(r"(?:-|\s)?")
            })
            .collect();

        if alternatives.is_empty() {
            return Ok(Self { pattern: None });
        }

        // Longest alternative first so `t-shirt` wins over `shirt`
        alternatives.sort_by(|a, b| b.len().cmp(&a.len()));
        let pattern = RegexBuilder::new(&format!(r"\b(?:{})\b", alternatives.join("|")))
            .case_insensitive(true)
            .build()?;

        Ok(Self {
            pattern: Some(pattern),
        })
    }

    /// Strip keywords, turn hyphens into spaces and collapse whitespace.
    pub fn clean(&self, title: &str) -> String {
        let stripped = match &self.pattern {
            Some(pattern) => pattern.replace_all(title, ""),
            None => title.into(),
        };
        collapse_whitespace(&stripped.replace('-', " "))
    }
}

/// Title candidate for a source file: the name without its extension,
/// hyphens turned into spaces.
pub fn title_from_filename(filename: &str) -> String {
    let stem = match filename.rfind('.') {
        Some(idx) if idx > 0 => &filename[..idx],
        _ => filename,
    };
    stem.replace('-', " ").trim().to_string()
}

/// `"{prefix} {title} {suffix}"` with whitespace collapsed, plus the format's
/// extension.
pub fn output_filename(prefix: &str, title: &str, suffix: &str, format: OutputFormat) -> String {
    let base = collapse_whitespace(&format!("{} {} {}", prefix, title, suffix));
    format!("{}.{}", base, format.extension())
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
