//! Job-text source resolution.
//!
//! The browser extension captures the text of a few well-known description
//! containers plus the whole page. This picks the first container that looks
//! like a real posting and falls back to the page text otherwise, flagging
//! the result as low confidence so the UI can warn.

use serde::{Deserialize, Serialize};

/// Containers tried in order on a job-posting page.
pub const DEFAULT_SELECTORS: &[&str] = &[
    "main",
    "article",
    "[role='main']",
    ".jobs-description",
    ".job-description",
    ".description",
    "#job-description",
];

/// Text must be longer than this to pass as a job description.
pub const MIN_PLAUSIBLE_CHARS: usize = 300;

#[derive(Debug, Clone, Deserialize)]
pub struct ContainerText {
    pub selector: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JobTextSource {
    Container { selector: String },
    PageFallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedJobText {
    pub text: String,
    pub source: JobTextSource,
    pub low_confidence: bool,
}

pub fn is_plausible_job_text(text: &str) -> bool {
    text.chars().count() > MIN_PLAUSIBLE_CHARS
}

/// Returns `None` when neither a plausible container nor any page text exists.
pub fn resolve_job_text(containers: &[ContainerText], page_text: &str) -> Option<ResolvedJobText> {
    if let Some(found) = containers.iter().find(|c| is_plausible_job_text(&c.text)) {
        return Some(ResolvedJobText {
            text: found.text.clone(),
            source: JobTextSource::Container {
                selector: found.selector.clone(),
            },
            low_confidence: false,
        });
    }

    if page_text.trim().is_empty() {
        return None;
    }

    Some(ResolvedJobText {
        text: page_text.to_string(),
        source: JobTextSource::PageFallback,
        low_confidence: true,
    })
}
