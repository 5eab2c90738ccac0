// src/job_scraper/types.rs
/// A job description ready for the prompt stage: cleaned flat text plus the
/// originating URL when it came from scraping.
#[derive(Debug, Clone)]
pub struct JobDescription {
    pub text: String,
    pub source_url: Option<String>,
}

impl JobDescription {
    /// Pasted job text is taken verbatim, no cleaning applied.
    pub fn from_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            source_url: None,
        }
    }
}

/// Known job boards with bespoke markup, plus a generic bucket for the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobSite {
    LinkedIn,
    Indeed,
    Glassdoor,
    Wellfound,
    Generic,
}

impl JobSite {
    pub fn classify(host: &str) -> Self {
        if host.contains("linkedin.com") {
            JobSite::LinkedIn
        } else if host.contains("indeed.com") {
            JobSite::Indeed
        } else if host.contains("glassdoor.com") {
            JobSite::Glassdoor
        } else if host.contains("angel.co") || host.contains("wellfound.com") {
            JobSite::Wellfound
        } else {
            JobSite::Generic
        }
    }

    /// Ordered CSS selector ladder for this site's job description markup.
    /// First selector with at least one matching element wins.
    pub fn selectors(&self) -> &'static [&'static str] {
        match self {
            JobSite::LinkedIn => &[
                "div[class*='job-description']",
                "div[class*='jobs-description']",
                "div[class*='description__text']",
                ".jobs-box__html-content",
            ],
            JobSite::Indeed => &["#jobDescriptionText", "div[class*='jobsearch']"],
            JobSite::Glassdoor => &[
                "div[class*='jobDesc']",
                "div[class*='JobDetails_jobDescription']",
            ],
            JobSite::Wellfound => &["div[class*='description']"],
            JobSite::Generic => &[
                "div[class*='job-description']",
                "div[class*='description']",
                "div[id*='job-description']",
                "div[id*='description']",
                "section[class*='job']",
                "article[class*='job']",
                ".job-content",
                ".posting-content",
                ".job-details",
            ],
        }
    }
}

/// Which rung of the extraction ladder produced the text. The full-text
/// fallback is a soft condition worth logging, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionPath {
    SiteSelector,
    GenericSelector,
    FullText,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_sites() {
        assert_eq!(JobSite::classify("www.linkedin.com"), JobSite::LinkedIn);
        assert_eq!(JobSite::classify("de.indeed.com"), JobSite::Indeed);
        assert_eq!(JobSite::classify("www.glassdoor.com"), JobSite::Glassdoor);
        assert_eq!(JobSite::classify("wellfound.com"), JobSite::Wellfound);
        assert_eq!(JobSite::classify("angel.co"), JobSite::Wellfound);
        assert_eq!(JobSite::classify("careers.example.com"), JobSite::Generic);
    }

    #[test]
    fn test_generic_ladder_size() {
        assert_eq!(JobSite::Generic.selectors().len(), 9);
    }

    #[test]
    fn test_pasted_text_is_verbatim() {
        let job = JobDescription::from_text("  Python, distributed systems  ");
        assert_eq!(job.text, "  Python, distributed systems  ");
        assert!(job.source_url.is_none());
    }
}
