//! Run orchestration.
//!
//! A run reads the crawl log, and for every domain with new images fetches
//! its URL list, matches each source against the domain's rules, renders it
//! onto every template set the rule names and collects the encoded mockups
//! per template set. At the end one archive per template set is written
//! together with the run summary.
//!
//! Failures are confined to the image (or variant) they happen on: they are
//! logged, counted and the run continues.

pub mod feed;
pub mod summary;
pub mod title;

pub use feed::{filename_from_url, parse_crawl_log, parse_url_list, DomainBatch};
pub use summary::{ArchiveReport, DomainCounts, DomainReport, RunSummary};
pub use title::{output_filename, title_from_filename, TitleCleaner};

use chrono::Local;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

use crate::archive::{cleanup_old_archives, write_archive, ArchiveEntry, ArchiveError};
use crate::config::{Config, DomainRule, DomainRules, FeedConfig, RuleAction};
use crate::error::MockupError;
use crate::fetch::{fetch_image, FetchError, Fetcher};
use crate::pipeline::{
    prepare_source, render_variant, LoadedTemplateSet, RenderOptions, RenderRule,
};
use crate::watermark::resolve_watermark;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("no feed configured; add a `feed` section to the config")]
    NoFeed,

    #[error("failed to fetch crawl log: {0}")]
    CrawlLog(#[source] FetchError),

    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error("invalid title keywords: {0}")]
    TitleKeywords(#[from] regex::Error),

    #[error("failed to write summary: {0}")]
    Summary(String),
}

/// Run-time switches that are not part of the config file.
#[derive(Debug, Clone, Default)]
pub struct GeneratorOptions {
    /// Overrides `output.dir`
    pub output_dir: Option<PathBuf>,
    /// Process only this domain
    pub domain_filter: Option<String>,
    /// Render everything but write nothing to disk
    pub dry_run: bool,
}

pub struct Generator {
    config: Config,
    fetcher: Arc<dyn Fetcher>,
    options: GeneratorOptions,
    render_options: RenderOptions,
    titles: TitleCleaner,
    /// `None` marks a set that could not be loaded
    templates: HashMap<String, Option<LoadedTemplateSet>>,
    outputs: BTreeMap<String, Vec<ArchiveEntry>>,
    bytes_produced: u64,
    budget_exhausted: bool,
}

impl Generator {
    pub fn new(
        config: Config,
        fetcher: Arc<dyn Fetcher>,
        options: GeneratorOptions,
    ) -> Result<Self, GeneratorError> {
        let titles = TitleCleaner::new(&config.defaults.title_clean_keywords)?;
        let render_options = RenderOptions {
            format: config.output.format,
            quality: config.output.quality,
            ..RenderOptions::default()
        };

        Ok(Self {
            config,
            fetcher,
            options,
            render_options,
            titles,
            templates: HashMap::new(),
            outputs: BTreeMap::new(),
            bytes_produced: 0,
            budget_exhausted: false,
        })
    }

    pub fn output_dir(&self) -> PathBuf {
        self.options
            .output_dir
            .clone()
            .unwrap_or_else(|| self.config.output.dir.clone())
    }

    /// Mockups collected so far, keyed by template set.
    pub fn outputs(&self) -> &BTreeMap<String, Vec<ArchiveEntry>> {
        &self.outputs
    }

    pub fn bytes_produced(&self) -> u64 {
        self.bytes_produced
    }

    /// Execute a full run driven by the configured feed.
    pub async fn run(&mut self) -> Result<RunSummary, GeneratorError> {
        let feed = self.config.feed.clone().ok_or(GeneratorError::NoFeed)?;

        if !self.options.dry_run {
            cleanup_old_archives(&self.output_dir())?;
        }

        let log = self
            .fetcher
            .fetch(&feed.crawl_log_url)
            .await
            .map_err(GeneratorError::CrawlLog)?;
        let batches = parse_crawl_log(&String::from_utf8_lossy(&log));

        let mut summary = RunSummary::new();
        if batches.is_empty() {
            tracing::info!("No new URLs in crawl log");
        }

        for batch in &batches {
            if let Some(only) = &self.options.domain_filter {
                if &batch.domain != only {
                    continue;
                }
            }
            if self.budget_reached() {
                tracing::warn!(
                    budget_mb = self.config.output.max_total_mb,
                    "Output budget reached, remaining domains skipped"
                );
                break;
            }
            if let Some(counts) = self.process_domain(&feed, batch).await {
                summary.record_domain(batch.domain.clone(), counts);
            }
        }

        self.finish(summary)
    }

    async fn process_domain(
        &mut self,
        feed: &FeedConfig,
        batch: &DomainBatch,
    ) -> Option<DomainCounts> {
        tracing::info!(domain = %batch.domain, new = batch.new_count, "Processing domain");

        let Some(rules) = self.config.domain_rules(&batch.domain) else {
            tracing::warn!(domain = %batch.domain, "No rules configured for domain");
            return None;
        };

        let list_url = feed.url_list_for(&batch.domain);
        let urls = match self.fetcher.fetch(&list_url).await {
            Ok(body) => parse_url_list(&String::from_utf8_lossy(&body)),
            Err(e) => {
                tracing::warn!(
                    domain = %batch.domain,
                    url = %list_url,
                    error = %e,
                    "Failed to fetch URL list"
                );
                return None;
            }
        };

        for name in rules.referenced_sets() {
            self.ensure_template_set(name).await;
        }

        let take = batch.new_count.min(urls.len());
        Some(
            self.process_urls(&batch.domain, &rules, &urls[..take], batch.new_count)
                .await,
        )
    }

    /// Render every URL of `urls` under `rules`.
    pub async fn process_urls(
        &mut self,
        domain: &str,
        rules: &DomainRules,
        urls: &[String],
        total_to_process: usize,
    ) -> DomainCounts {
        let mut counts = DomainCounts {
            total_to_process,
            ..DomainCounts::default()
        };

        for url in urls {
            if self.budget_reached() {
                tracing::warn!(domain = %domain, "Output budget reached, stopping");
                break;
            }

            match self.process_source(url, rules).await {
                Ok(produced) => counts.processed += produced,
                Err(e) => {
                    tracing::info!(
                        domain = %domain,
                        url = %url,
                        reason = e.kind(),
                        error = %e,
                        "Skipping source"
                    );
                    counts.skipped += 1;
                }
            }
        }

        tracing::info!(
            domain = %domain,
            processed = counts.processed,
            skipped = counts.skipped,
            "Domain done"
        );
        counts
    }

    /// Returns the number of mockups produced from one source.
    async fn process_source(
        &mut self,
        url: &str,
        rules: &DomainRules,
    ) -> Result<usize, MockupError> {
        let filename = filename_from_url(url);

        let rule = processing_rule(rules, filename)?;
        if rule.mockup_sets_to_use.is_empty() {
            return Err(MockupError::MissingAsset(format!(
                "rule '{}' names no template sets",
                rule.pattern
            )));
        }
        let render_rule = RenderRule::from_domain_rule(rule).ok_or_else(|| {
            MockupError::MissingAsset(format!("rule '{}' has no crop coordinates", rule.pattern))
        })?;

        let source = self.fetcher.fetch(url).await?;
        let prepared = prepare_source(&source, &render_rule, &self.render_options)?;
        let title = self.titles.clean(&title_from_filename(filename));

        let mut produced = 0;
        for set_name in &rule.mockup_sets_to_use {
            self.ensure_template_set(set_name).await;
            let Some(Some(set)) = self.templates.get(set_name) else {
                continue;
            };

            let mockup = match render_variant(&prepared, set, &self.render_options) {
                Ok(mockup) => mockup,
                Err(e) => {
                    tracing::warn!(
                        url = %url,
                        template_set = %set_name,
                        reason = e.kind(),
                        error = %e,
                        "Variant skipped"
                    );
                    continue;
                }
            };

            let (prefix, suffix) = self
                .config
                .template_set(set_name)
                .map(|c| (c.title_prefix(), c.title_suffix()))
                .unwrap_or(("", ""));
            let name = output_filename(prefix, &title, suffix, mockup.format);

            tracing::debug!(
                url = %url,
                template_set = %set_name,
                backing = %mockup.backing,
                file = %name,
                bytes = mockup.bytes.len(),
                "Mockup rendered"
            );

            self.bytes_produced += mockup.bytes.len() as u64;
            self.outputs
                .entry(set_name.clone())
                .or_default()
                .push(ArchiveEntry::new(name, mockup.bytes));
            produced += 1;
        }

        if produced == 0 {
            return Err(MockupError::MissingAsset(
                "no template set produced a mockup".to_string(),
            ));
        }
        Ok(produced)
    }

    async fn ensure_template_set(&mut self, name: &str) {
        if self.templates.contains_key(name) {
            return;
        }
        let loaded = load_template_set(&self.config, self.fetcher.as_ref(), name).await;
        self.templates.insert(name.to_string(), loaded);
    }

    fn budget_reached(&mut self) -> bool {
        if self.bytes_produced >= self.config.output.max_total_bytes() {
            self.budget_exhausted = true;
        }
        self.budget_exhausted
    }

    /// Write one archive per template set and the summary file.
    ///
    /// On dry runs nothing is written; the summary still lists what would
    /// have been archived.
    pub fn finish(&mut self, mut summary: RunSummary) -> Result<RunSummary, GeneratorError> {
        let dir = self.output_dir();
        let timestamp = Local::now();

        for (set_name, entries) in &self.outputs {
            if entries.is_empty() {
                continue;
            }
            let path = if self.options.dry_run {
                None
            } else {
                Some(write_archive(&dir, set_name, entries, &timestamp)?)
            };
            summary.archives.push(ArchiveReport {
                template_set: set_name.clone(),
                images: entries.len(),
                path,
            });
        }

        summary.bytes_produced = self.bytes_produced;
        summary.budget_exhausted = self.budget_exhausted;
        summary.log();

        if !self.options.dry_run {
            std::fs::create_dir_all(&dir)
                .map_err(|e| GeneratorError::Summary(format!("{}: {}", dir.display(), e)))?;
            let path = summary.write_json(&dir)?;
            tracing::info!(path = %path.display(), "Summary written");
        }
        Ok(summary)
    }
}

/// The rule that sends `filename` through the pipeline.
fn processing_rule<'a>(
    rules: &'a DomainRules,
    filename: &str,
) -> Result<&'a DomainRule, MockupError> {
    match rules.resolve(filename) {
        None => Err(MockupError::RuleSkipped(format!("no rule matches {filename}"))),
        Some(rule) if rule.action == RuleAction::Skip => Err(MockupError::RuleSkipped(format!(
            "rule '{}' skips {filename}",
            rule.pattern
        ))),
        Some(rule) => Ok(rule),
    }
}

/// Fetch the templates and resolve the watermark of template set `name`.
///
/// Returns `None` (after logging why) when the set is unknown or neither of
/// its templates could be retrieved. A single missing backing only makes
/// sources of that backing fail for this set.
async fn load_template_set(
    config: &Config,
    fetcher: &dyn Fetcher,
    name: &str,
) -> Option<LoadedTemplateSet> {
    let Some(set_config) = config.template_set(name) else {
        tracing::warn!(template_set = %name, "Template set not found in config");
        return None;
    };

    let mut loaded = LoadedTemplateSet::new(name, set_config.coords);
    loaded.watermark_style = set_config.watermark_style;
    loaded.white = load_template(fetcher, name, "white", set_config.white.as_deref()).await;
    loaded.black = load_template(fetcher, name, "black", set_config.black.as_deref()).await;

    if loaded.white.is_none() && loaded.black.is_none() {
        tracing::warn!(template_set = %name, "No template of the set could be loaded");
        return None;
    }

    loaded.watermark = resolve_watermark(
        set_config.watermark.as_ref(),
        &set_config.watermark_style,
        fetcher,
        config.defaults.font_path.as_deref(),
    )
    .await;

    tracing::info!(
        template_set = %name,
        white = loaded.white.is_some(),
        black = loaded.black.is_some(),
        watermark = loaded.watermark.is_ready(),
        "Template set loaded"
    );
    Some(loaded)
}

async fn load_template(
    fetcher: &dyn Fetcher,
    set_name: &str,
    backing: &str,
    url: Option<&str>,
) -> Option<image::RgbaImage> {
    let url = url?;
    match fetch_image(fetcher, url).await {
        Ok(image) => Some(image),
        Err(e) => {
            tracing::warn!(
                template_set = %set_name,
                backing = %backing,
                url = %url,
                error = %e,
                "Failed to load template"
            );
            None
        }
    }
}
