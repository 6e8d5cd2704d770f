//! Crawl log and URL list parsing.
//!
//! The crawler publishes a log with one line per domain:
//!
//! ```text
//! shop.example.com: 12 new URLs added
//! other.example.com: 0 new URLs added
//! ```
//!
//! and, per domain, a newline-separated list of image URLs, newest first.

/// A domain with new images waiting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainBatch {
    pub domain: String,
    pub new_count: usize,
}

/// Extract `(domain, count)` pairs with a positive count, in log order.
///
/// Lines that do not follow the `domain: N new URLs added` shape are
/// ignored. A domain listed twice keeps its first position and its last
/// positive count.
pub fn parse_crawl_log(content: &str) -> Vec<DomainBatch> {
    let mut batches: Vec<DomainBatch> = Vec::new();
    for line in content.lines().filter(|l| l.contains("new URLs added")) {
        let Some(batch) = parse_log_line(line) else {
            tracing::debug!(line = %line, "Ignoring malformed crawl log line");
            continue;
        };

        if batch.new_count == 0 {
            continue;
        }
        match batches.iter_mut().find(|b| b.domain == batch.domain) {
            Some(existing) => existing.new_count = batch.new_count,
            None => batches.push(batch),
        }
    }
    batches
}

fn parse_log_line(line: &str) -> Option<DomainBatch> {
    let (domain, rest) = line.split_once(':')?;
    let domain = domain.trim();
    if domain.is_empty() {
        return None;
    }
    let new_count = rest.split_whitespace().next()?.parse().ok()?;
    Some(DomainBatch {
        domain: domain.to_string(),
        new_count,
    })
}

/// Non-empty trimmed lines of a URL list.
pub fn parse_url_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Last path segment of `url`, without query string or fragment.
pub fn filename_from_url(url: &str) -> &str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit('/').next().unwrap_or(path)
}
