//! Advisory blending: folds an optional, untrusted relevance bonus from an
//! external model into the deterministic score.
//!
//! Every failure on this path (transport, timeout, unparseable output, wrong
//! type) is absorbed here and counts as a zero bonus. Nothing past
//! `AdvisoryBlender::blend` can observe an advisory error.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::llm_client::prompts::build_advisory_prompt;
use crate::llm_client::{LlmClient, LlmError};

pub const MAX_BONUS: f64 = 10.0;
/// Blended scores never reach 100, so no result signals full confidence.
pub const MAX_FINAL_SCORE: u32 = 95;

#[derive(Debug, Error)]
pub enum AdvisoryError {
    #[error("advisory call failed: {0}")]
    Client(#[from] LlmError),

    #[error("advisory call timed out after {0:?}")]
    Timeout(Duration),

    #[error("no JSON object in advisory response")]
    NoJsonObject,

    #[error("malformed advisory JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("advisory bonus missing or not numeric")]
    NonNumericBonus,
}

/// An external assessor returning free text that should contain
/// `{"bonus": <number>}` somewhere.
#[async_trait]
pub trait AdvisoryScorer: Send + Sync {
    async fn assess(&self, resume: &str, job: &str) -> Result<String, AdvisoryError>;
}

/// Advisory scorer backed by the shared LLM client.
pub struct LlmAdvisor(pub LlmClient);

#[async_trait]
impl AdvisoryScorer for LlmAdvisor {
    async fn assess(&self, resume: &str, job: &str) -> Result<String, AdvisoryError> {
        let prompt = build_advisory_prompt(resume, job);
        Ok(self.0.generate(&prompt).await?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BlendedScore {
    pub deterministic: u32,
    pub bonus: f64,
    pub score: u32,
}

#[derive(Clone)]
pub struct AdvisoryBlender {
    scorer: Option<Arc<dyn AdvisoryScorer>>,
    timeout: Duration,
}

impl AdvisoryBlender {
    pub fn new(scorer: Arc<dyn AdvisoryScorer>, timeout: Duration) -> Self {
        Self {
            scorer: Some(scorer),
            timeout,
        }
    }

    /// A blender that never calls out; every bonus is zero.
    pub fn disabled() -> Self {
        Self {
            scorer: None,
            timeout: Duration::ZERO,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.scorer.is_some()
    }

    /// Makes at most one advisory call and blends its bonus into `deterministic`.
    pub async fn blend(&self, deterministic: u32, resume: &str, job: &str) -> BlendedScore {
        let bonus = match self.fetch_bonus(resume, job).await {
            Ok(bonus) => bonus,
            Err(e) => {
                warn!("Advisory bonus unavailable, using 0: {e}");
                0.0
            }
        };

        let score = blend_scores(deterministic, bonus);
        debug!(deterministic, bonus, score, "Advisory bonus blended");
        BlendedScore {
            deterministic,
            bonus,
            score,
        }
    }

    async fn fetch_bonus(&self, resume: &str, job: &str) -> Result<f64, AdvisoryError> {
        let Some(scorer) = &self.scorer else {
            return Ok(0.0);
        };

        let text = tokio::time::timeout(self.timeout, scorer.assess(resume, job))
            .await
            .map_err(|_| AdvisoryError::Timeout(self.timeout))??;

        parse_bonus(&text)
    }
}

/// Reads the bonus from the first balanced JSON object in `text`, clamped to
/// `[0, MAX_BONUS]`.
pub fn parse_bonus(text: &str) -> Result<f64, AdvisoryError> {
    let object = extract_first_json_object(text).ok_or(AdvisoryError::NoJsonObject)?;
    let value: Value = serde_json::from_str(object)?;
    let bonus = value
        .get("bonus")
        .and_then(Value::as_f64)
        .ok_or(AdvisoryError::NonNumericBonus)?;
    Ok(bonus.clamp(0.0, MAX_BONUS))
}

/// deterministic + bonus, rounded and clamped to `[0, MAX_FINAL_SCORE]`.
pub fn blend_scores(deterministic: u32, bonus: f64) -> u32 {
    let bonus = if bonus.is_finite() {
        bonus.clamp(0.0, MAX_BONUS)
    } else {
        0.0
    };
    (deterministic as f64 + bonus)
        .round()
        .clamp(0.0, MAX_FINAL_SCORE as f64) as u32
}

/// Returns the first brace-balanced `{ ... }` span in `text`.
///
/// Braces inside JSON string literals are ignored. An opening brace that is
/// never closed yields `None`; later candidates are not tried.
pub fn extract_first_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}
