// src/job_scraper/mod.rs
//! Job posting acquisition: validate -> fetch -> extract -> clean

pub mod types;

pub use types::{ExtractionPath, JobDescription, JobSite};

use crate::error::OptimizeError;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{info, warn};
use url::Url;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
const FETCH_TIMEOUT_SECS: u64 = 10;

/// Advisory allow-list: membership only affects a warning, never blocks.
const KNOWN_JOB_SITES: &[&str] = &[
    "linkedin.com",
    "indeed.com",
    "glassdoor.com",
    "monster.com",
    "careerbuilder.com",
    "ziprecruiter.com",
    "angel.co",
    "wellfound.com",
    "stackoverflow.com",
    "dice.com",
    "simplyhired.com",
    "jobs.com",
];

pub struct JobScraper {
    client: reqwest::Client,
}

impl JobScraper {
    pub fn new() -> Result<Self, OptimizeError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()
            .map_err(|e| OptimizeError::Fetch(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Full acquisition chain for a job-posting URL.
    pub async fn scrape(&self, url: &str) -> Result<JobDescription, OptimizeError> {
        let url = validate_job_url(url)?;
        let html = self.fetch(&url).await?;

        let (raw, path) = extract_job_content(&html, &url);
        if path == ExtractionPath::FullText {
            warn!("No selector matched for {}, using full page text", url);
        }

        let text = clean_job_text(&raw);
        info!("Extracted {} chars of job text from {}", text.len(), url);

        Ok(JobDescription {
            text,
            source_url: Some(url),
        })
    }

    async fn fetch(&self, url: &str) -> Result<String, OptimizeError> {
        info!("Fetching job post: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| OptimizeError::Fetch(format!("Request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(OptimizeError::Fetch(format!(
                "HTTP error fetching {}: {}",
                url, status
            )));
        }

        response
            .text()
            .await
            .map_err(|e| OptimizeError::Fetch(format!("Failed to read response body: {}", e)))
    }
}

/// Normalize and validate a job-posting URL.
///
/// Empty input and unparsable authorities fail; a missing scheme gets
/// `https://` prepended; unrecognized domains only log a warning.
pub fn validate_job_url(input: &str) -> Result<String, OptimizeError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(OptimizeError::Validation("missing URL".to_string()));
    }

    let url = if input.starts_with("http://") || input.starts_with("https://") {
        input.to_string()
    } else {
        format!("https://{}", input)
    };

    let parsed =
        Url::parse(&url).map_err(|_| OptimizeError::Validation("invalid URL".to_string()))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| OptimizeError::Validation("invalid URL".to_string()))?
        .to_lowercase();

    if !KNOWN_JOB_SITES.iter().any(|site| host.contains(site)) {
        warn!("{} is not a recognized job site, proceeding anyway", host);
    }

    Ok(url)
}

/// Extract job-description text from a page via the heuristic ladder:
/// site-specific selectors, then the generic selector ladder, then the whole
/// page's visible text.
pub fn extract_job_content(html: &str, url: &str) -> (String, ExtractionPath) {
    let document = Html::parse_document(html);
    let host = Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_lowercase()))
        .unwrap_or_default();
    let site = JobSite::classify(&host);

    if let Some(text) = select_first_match(&document, site.selectors()) {
        let path = if site == JobSite::Generic {
            ExtractionPath::GenericSelector
        } else {
            ExtractionPath::SiteSelector
        };
        return (text, path);
    }

    (full_page_text(&document), ExtractionPath::FullText)
}

fn select_first_match(document: &Html, selectors: &[&str]) -> Option<String> {
    for selector_str in selectors {
        if let Ok(selector) = Selector::parse(selector_str) {
            let matched: Vec<String> = document
                .select(&selector)
                .map(|element| element.text().collect::<Vec<_>>().join(" "))
                .collect();
            if !matched.is_empty() {
                return Some(matched.join(" "));
            }
        }
    }
    None
}

/// Whole-page visible text with script/style subtrees skipped.
fn full_page_text(document: &Html) -> String {
    let mut out = String::new();
    collect_visible_text(document.root_element(), &mut out);
    out
}

fn collect_visible_text(element: ElementRef, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
            out.push(' ');
        } else if let Some(el) = ElementRef::wrap(child) {
            let name = el.value().name();
            if name != "script" && name != "style" {
                collect_visible_text(el, out);
            }
        }
    }
}

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static BOILERPLATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?is)(apply now|apply for this job|submit application|share this job|save job|email this job).*",
    )
    .unwrap()
});

/// Clean scraped job text: collapse whitespace, cut trailing apply/share
/// boilerplate, drop short and legal-footer lines. Idempotent.
pub fn clean_job_text(text: &str) -> String {
    let collapsed = WHITESPACE.replace_all(text, " ");
    let truncated = BOILERPLATE.replace(&collapsed, "");

    truncated
        .split('\n')
        .map(|line| line.trim())
        .filter(|line| {
            line.len() > 10
                && !line.starts_with('©')
                && !line.starts_with("Cookie")
                && !line.starts_with("Privacy")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
