//! Run summary: per-domain counts and the archives written.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::GeneratorError;
use crate::constants::SUMMARY_FILE_NAME;

/// Counts for one domain.
///
/// `processed` counts mockups produced (a source rendered onto two template
/// sets counts twice); `skipped` counts sources that produced nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainCounts {
    pub processed: usize,
    pub skipped: usize,
    pub total_to_process: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainReport {
    pub domain: String,
    #[serde(flatten)]
    pub counts: DomainCounts,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveReport {
    pub template_set: String,
    pub images: usize,
    /// `None` on dry runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub generated_at: DateTime<Local>,
    pub domains: Vec<DomainReport>,
    pub archives: Vec<ArchiveReport>,
    pub bytes_produced: u64,
    /// The output budget stopped the run early
    pub budget_exhausted: bool,
}

impl Default for RunSummary {
    fn default() -> Self {
        Self::new()
    }
}

impl RunSummary {
    pub fn new() -> Self {
        Self {
            generated_at: Local::now(),
            domains: Vec::new(),
            archives: Vec::new(),
            bytes_produced: 0,
            budget_exhausted: false,
        }
    }

    pub fn record_domain(&mut self, domain: impl Into<String>, counts: DomainCounts) {
        self.domains.push(DomainReport {
            domain: domain.into(),
            counts,
        });
    }

    pub fn domain(&self, domain: &str) -> Option<&DomainCounts> {
        self.domains
            .iter()
            .find(|d| d.domain == domain)
            .map(|d| &d.counts)
    }

    pub fn total_processed(&self) -> usize {
        self.domains.iter().map(|d| d.counts.processed).sum()
    }

    pub fn total_skipped(&self) -> usize {
        self.domains.iter().map(|d| d.counts.skipped).sum()
    }

    /// Emit one event per domain plus a run total.
    pub fn log(&self) {
        for report in &self.domains {
            tracing::info!(
                domain = %report.domain,
                processed = report.counts.processed,
                skipped = report.counts.skipped,
                total_to_process = report.counts.total_to_process,
                "Domain summary"
            );
        }
        tracing::info!(
            processed = self.total_processed(),
            skipped = self.total_skipped(),
            archives = self.archives.len(),
            bytes_produced = self.bytes_produced,
            budget_exhausted = self.budget_exhausted,
            "Generation finished"
        );
    }

    /// Write the summary as pretty JSON into `dir`.
    pub fn write_json(&self, dir: &Path) -> Result<PathBuf, GeneratorError> {
        let path = dir.join(SUMMARY_FILE_NAME);
        let json = serde_json::to_vec_pretty(self)
            .map_err(|e| GeneratorError::Summary(e.to_string()))?;
        std::fs::write(&path, json)
            .map_err(|e| GeneratorError::Summary(format!("{}: {}", path.display(), e)))?;
        Ok(path)
    }
}
