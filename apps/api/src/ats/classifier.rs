//! Requirement classifier: splits a job's skills into required and preferred
//! by their position relative to requirement-signal phrases.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::ats::vocabulary::{SkillSet, SkillVocabulary};

pub const DEFAULT_SIGNAL_PHRASES: &[&str] = &["required", "must have", "expertise"];

/// How far a signal phrase may sit from a skill mention and still mark it required.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalWindow {
    /// A signal anywhere before or after any mention of the skill counts.
    #[default]
    Unbounded,
    /// Only signals separated from a skill mention by at most this many bytes count.
    Within(usize),
}

/// Disjoint partition of a job's skill set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequirementClassification {
    pub required: SkillSet,
    pub preferred: SkillSet,
}

#[derive(Debug, Clone)]
pub struct RequirementClassifier {
    window: SignalWindow,
    signal: Regex,
    /// `(skill, signal-before-or-after pattern)` for every vocabulary skill.
    patterns: Vec<(String, Regex)>,
}

impl RequirementClassifier {
    /// Compiles one pattern per vocabulary skill up front. Skill tokens are
    /// escaped, so names like `c++` are matched literally.
    pub fn new<S: AsRef<str>>(
        vocabulary: &SkillVocabulary,
        signal_phrases: &[S],
        window: SignalWindow,
    ) -> Result<Self, regex::Error> {
        let signals = signal_phrases
            .iter()
            .map(|p| regex::escape(p.as_ref()))
            .collect::<Vec<_>>()
            .join("|");
        let signal = Regex::new(&format!("(?i){signals}"))?;

        let patterns = vocabulary
            .iter()
            .map(|skill| {
                let escaped = regex::escape(skill);
                let pattern = format!(
                    "(?is)(?:{signals}).*{escaped}|{escaped}.*(?:{signals})"
                );
                Regex::new(&pattern).map(|re| (skill.to_string(), re))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            window,
            signal,
            patterns,
        })
    }

    /// Labels each job skill. Every skill lands in exactly one bucket.
    pub fn classify(&self, job_skills: &SkillSet, job_text: &str) -> RequirementClassification {
        let mut required = Vec::new();
        let mut preferred = Vec::new();

        for skill in job_skills.iter() {
            if self.is_required(skill, job_text) {
                required.push(skill);
            } else {
                preferred.push(skill);
            }
        }

        RequirementClassification {
            required: required.into_iter().collect(),
            preferred: preferred.into_iter().collect(),
        }
    }

    fn is_required(&self, skill: &str, job_text: &str) -> bool {
        match self.window {
            SignalWindow::Unbounded => match self.patterns.iter().find(|(s, _)| s == skill) {
                Some((_, re)) => re.is_match(job_text),
                // skill outside the compiled vocabulary
                None => signal_near(&self.signal, skill, job_text, usize::MAX),
            },
            SignalWindow::Within(limit) => signal_near(&self.signal, skill, job_text, limit),
        }
    }
}

/// True when some signal occurrence ends before a skill mention starts (or
/// starts after it ends) with a gap of at most `limit` bytes.
fn signal_near(signal: &Regex, skill: &str, text: &str, limit: usize) -> bool {
    let lowered = text.to_lowercase();
    let skill = skill.to_lowercase();
    let signals: Vec<(usize, usize)> = signal
        .find_iter(&lowered)
        .map(|m| (m.start(), m.end()))
        .collect();
    if signals.is_empty() {
        return false;
    }

    lowered.match_indices(skill.as_str()).any(|(start, hit)| {
        let end = start + hit.len();
        signals.iter().any(|&(s_start, s_end)| {
            (s_end <= start && start - s_end <= limit) || (end <= s_start && s_start - end <= limit)
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier(window: SignalWindow) -> RequirementClassifier {
        RequirementClassifier::new(&SkillVocabulary::default(), DEFAULT_SIGNAL_PHRASES, window)
            .unwrap()
    }

    fn set(skills: &[&str]) -> SkillSet {
        skills.iter().copied().collect()
    }

    #[test]
    fn test_signal_anywhere_marks_every_skill_required() {
        let text = "required: python, sql. preferred: docker, aws.";
        let result = classifier(SignalWindow::Unbounded)
            .classify(&set(&["python", "sql", "docker", "aws"]), text);
        assert_eq!(result.required, set(&["python", "sql", "docker", "aws"]));
        assert!(result.preferred.is_empty());
    }

    #[test]
    fn test_signal_after_skill_counts() {
        let text = "docker experience is required";
        let result = classifier(SignalWindow::Unbounded).classify(&set(&["docker"]), text);
        assert_eq!(result.required, set(&["docker"]));
    }

    #[test]
    fn test_no_signal_means_preferred() {
        let text = "nice to have: python, docker";
        let result = classifier(SignalWindow::Unbounded).classify(&set(&["python", "docker"]), text);
        assert!(result.required.is_empty());
        assert_eq!(result.preferred, set(&["python", "docker"]));
    }

    #[test]
    fn test_signal_across_newlines() {
        let text = "must have\n\nlots of\nkubernetes";
        let result = classifier(SignalWindow::Unbounded).classify(&set(&["kubernetes"]), text);
        assert_eq!(result.required, set(&["kubernetes"]));
    }

    #[test]
    fn test_special_characters_are_literal() {
        // an unescaped "c++" would not even compile as a pattern
        let text = "c++ expertise";
        let result = classifier(SignalWindow::Unbounded).classify(&set(&["c++"]), text);
        assert_eq!(result.required, set(&["c++"]));
    }

    #[test]
    fn test_signal_overlapping_skill_does_not_count() {
        // the only "required" is the skill mention itself
        let vocab = SkillVocabulary::new(["required"]);
        let c = RequirementClassifier::new(&vocab, DEFAULT_SIGNAL_PHRASES, SignalWindow::Unbounded)
            .unwrap();
        let result = c.classify(&set(&["required"]), "required");
        assert_eq!(result.preferred, set(&["required"]));
    }

    #[test]
    fn test_partition_is_disjoint_and_complete() {
        let text = "python required. later on, docker would be nice";
        let skills = set(&["python", "docker", "git"]);
        let result = classifier(SignalWindow::Within(10)).classify(&skills, text);
        for skill in skills.iter() {
            assert!(result.required.contains(skill) ^ result.preferred.contains(skill));
        }
        assert_eq!(result.required.len() + result.preferred.len(), skills.len());
    }

    #[test]
    fn test_bounded_window_excludes_distant_skills() {
        let text = format!("python required.{}docker", " filler".repeat(40));
        let result = classifier(SignalWindow::Within(20)).classify(&set(&["python", "docker"]), &text);
        assert_eq!(result.required, set(&["python"]));
        assert_eq!(result.preferred, set(&["docker"]));
    }

    #[test]
    fn test_bounded_window_agrees_with_unbounded_when_close() {
        let text = "required: python, sql";
        let skills = set(&["python", "sql"]);
        let bounded = classifier(SignalWindow::Within(50)).classify(&skills, text);
        let unbounded = classifier(SignalWindow::Unbounded).classify(&skills, text);
        assert_eq!(bounded, unbounded);
    }

    #[test]
    fn test_skill_outside_vocabulary_falls_back_to_scan() {
        let result = classifier(SignalWindow::Unbounded).classify(&set(&["rust"]), "rust required");
        assert_eq!(result.required, set(&["rust"]));
    }
}
