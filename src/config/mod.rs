// Configuration module
//
// YAML (or JSON, which parses as YAML) with `${ENV_VAR}` substitution.

pub mod error;
pub mod output;
pub mod rules;
pub mod template_set;

pub use error::ConfigError;
pub use output::OutputConfig;
pub use rules::{CropRect, DomainRule, DomainRules, RuleAction};
pub use template_set::TemplateSetConfig;

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feed: Option<FeedConfig>,
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default, alias = "mockup_sets")]
    pub template_sets: BTreeMap<String, TemplateSetConfig>,
    #[serde(default)]
    pub domains: BTreeMap<String, Vec<DomainRule>>,
}

/// Where the crawl log and the per-domain URL lists are published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Log with one `domain: N new URLs added` line per crawled domain
    pub crawl_log_url: String,
    /// URL list location; `{domain}` is replaced by the domain name
    pub url_list_template: String,
}

impl FeedConfig {
    pub fn url_list_for(&self, domain: &str) -> String {
        self.url_list_template.replace("{domain}", domain)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Words removed from titles before decoration
    #[serde(default)]
    pub title_clean_keywords: Vec<String>,
    /// Preferred font for text watermarks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_path: Option<PathBuf>,
}

impl Config {
    pub fn from_yaml_with_env(yaml: &str) -> Result<Self, ConfigError> {
        // Replace ${VAR_NAME} with environment variable values
        let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        let mut substituted = String::with_capacity(yaml.len());
        let mut last = 0;
        for caps in re.captures_iter(yaml) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let value = std::env::var(name.as_str())
                .map_err(|_| ConfigError::MissingEnvVar(name.as_str().to_string()))?;
            substituted.push_str(&yaml[last..whole.start()]);
            substituted.push_str(&value);
            last = whole.end();
        }
        substituted.push_str(&yaml[last..]);

        let config: Config = serde_yaml::from_str(&substituted)?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_with_env(&yaml)
    }

    /// Check the configuration.
    ///
    /// Rules referencing unknown template sets only log a warning: such a
    /// set is reported as a missing asset when a source needs it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.output.validate().map_err(ConfigError::Invalid)?;

        for (name, set) in &self.template_sets {
            if name.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "Template set name cannot be empty".to_string(),
                ));
            }
            set.validate(name).map_err(ConfigError::Invalid)?;
        }

        if let Some(feed) = &self.feed {
            if feed.crawl_log_url.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "feed.crawl_log_url cannot be empty".to_string(),
                ));
            }
            if !feed.url_list_template.contains("{domain}") {
                return Err(ConfigError::Invalid(format!(
                    "feed.url_list_template '{}' must contain {{domain}}",
                    feed.url_list_template
                )));
            }
        }

        for (domain, rules) in &self.domains {
            for rule in rules {
                if let Some(coords) = rule.coords {
                    if coords.w == 0 || coords.h == 0 {
                        return Err(ConfigError::Invalid(format!(
                            "Rule '{}' of domain '{}' has an empty crop rectangle",
                            rule.pattern, domain
                        )));
                    }
                }
                for set in &rule.mockup_sets_to_use {
                    if !self.template_sets.contains_key(set) {
                        tracing::warn!(
                            domain = %domain,
                            pattern = %rule.pattern,
                            template_set = %set,
                            "Rule references an unknown template set"
                        );
                    }
                }
            }
        }

        Ok(())
    }

    /// Rules of `domain` in resolution order, if any are configured.
    pub fn domain_rules(&self, domain: &str) -> Option<DomainRules> {
        self.domains
            .get(domain)
            .filter(|rules| !rules.is_empty())
            .map(|rules| DomainRules::new(rules.clone()))
    }

    pub fn template_set(&self, name: &str) -> Option<&TemplateSetConfig> {
        self.template_sets.get(name)
    }
}
