//! Deterministic ATS scoring engine.
//!
//! Pipeline: normalize → clean (job) → quality gate (resume) → job skill
//! extraction → required/preferred split → resume matching → weighted score.
//!
//! The engine is pure: all vocabulary, aliases, markers and weights come in
//! through `AtsConfig` at construction. It never performs I/O; the advisory
//! bonus is blended afterwards by `ats::advisory`.

use serde::Serialize;
use tracing::{debug, info};

use crate::ats::classifier::{
    RequirementClassification, RequirementClassifier, SignalWindow, DEFAULT_SIGNAL_PHRASES,
};
use crate::ats::normalize::{
    normalize_text, JobTextCleaner, DEFAULT_BOILERPLATE_MARKERS, MAX_JOB_TEXT_CHARS,
};
use crate::ats::vocabulary::{
    extract_job_skills, extract_resume_skills, AliasTable, SkillSet, SkillVocabulary,
};

/// Score returned when the resume fails the quality gate.
pub const LOW_INFORMATION_SCORE: u32 = 5;
pub const LOW_INFORMATION_MESSAGE: &str = "Resume lacks sufficient technical detail";
pub const LOW_INFORMATION_SUGGESTIONS: &[&str] = &[
    "Add a technical skills section",
    "Include projects or work experience",
    "Mention technologies you have used",
];
pub const ALIGNED_MESSAGE: &str = "Your resume aligns well with this role";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoringWeights {
    pub required: f64,
    pub preferred: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            required: 0.7,
            preferred: 0.3,
        }
    }
}

/// Immutable engine configuration, built once at startup.
#[derive(Debug, Clone)]
pub struct AtsConfig {
    pub aliases: AliasTable,
    pub vocabulary: SkillVocabulary,
    pub boilerplate_markers: Vec<String>,
    pub max_job_chars: usize,
    pub signal_phrases: Vec<String>,
    pub signal_window: SignalWindow,
    pub weights: ScoringWeights,
    /// Resumes with fewer whitespace-delimited tokens skip scoring.
    pub min_resume_tokens: usize,
}

impl Default for AtsConfig {
    fn default() -> Self {
        Self {
            aliases: AliasTable::default(),
            vocabulary: SkillVocabulary::default(),
            boilerplate_markers: DEFAULT_BOILERPLATE_MARKERS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_job_chars: MAX_JOB_TEXT_CHARS,
            signal_phrases: DEFAULT_SIGNAL_PHRASES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            signal_window: SignalWindow::Unbounded,
            weights: ScoringWeights::default(),
            min_resume_tokens: 30,
        }
    }
}

/// Resume-vs-job coverage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub job_skills: SkillSet,
    pub classification: RequirementClassification,
    pub matched: SkillSet,
    pub missing: SkillSet,
    /// 0 – 100
    pub score: u32,
}

/// Outcome of the deterministic pass.
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    /// Resume too short to score; callers answer with the fixed degraded response.
    LowInformation,
    Scored {
        result: MatchResult,
        /// Inputs for the advisory step.
        normalized_resume: String,
        cleaned_job: String,
    },
}

#[derive(Debug, Clone)]
pub struct AtsEngine {
    aliases: AliasTable,
    vocabulary: SkillVocabulary,
    cleaner: JobTextCleaner,
    classifier: RequirementClassifier,
    weights: ScoringWeights,
    min_resume_tokens: usize,
}

impl AtsEngine {
    pub fn new(config: AtsConfig) -> Result<Self, regex::Error> {
        let cleaner = JobTextCleaner::new(&config.boilerplate_markers, config.max_job_chars)?;
        let classifier = RequirementClassifier::new(
            &config.vocabulary,
            &config.signal_phrases,
            config.signal_window,
        )?;
        Ok(Self {
            aliases: config.aliases,
            vocabulary: config.vocabulary,
            cleaner,
            classifier,
            weights: config.weights,
            min_resume_tokens: config.min_resume_tokens,
        })
    }

    pub fn normalize(&self, text: &str) -> String {
        normalize_text(text, &self.aliases)
    }

    /// Normalizes then cleans raw job text.
    pub fn prepare_job(&self, job: &str) -> String {
        self.cleaner.clean(&self.normalize(job))
    }

    pub fn is_low_information(&self, resume: &str) -> bool {
        is_low_information(resume, self.min_resume_tokens)
    }

    /// Runs the deterministic pipeline on raw resume and job text.
    pub fn evaluate(&self, resume: &str, job: &str) -> Evaluation {
        let normalized_resume = self.normalize(resume);
        let cleaned_job = self.prepare_job(job);

        if self.is_low_information(&normalized_resume) {
            info!(
                tokens = normalized_resume.split_whitespace().count(),
                "Resume below quality gate, skipping scoring"
            );
            return Evaluation::LowInformation;
        }

        let result = self.score_texts(&normalized_resume, &cleaned_job);
        Evaluation::Scored {
            result,
            normalized_resume,
            cleaned_job,
        }
    }

    /// Scores already-normalized resume text against cleaned job text.
    pub fn score_texts(&self, resume: &str, job: &str) -> MatchResult {
        let job_skills = extract_job_skills(job, &self.vocabulary);
        let classification = self.classifier.classify(&job_skills, job);
        let matched = extract_resume_skills(resume, &job_skills);
        let missing: SkillSet = job_skills.iter().filter(|s| !matched.contains(s)).collect();
        let score = compute_score(&classification, &matched, &self.weights);

        debug!(
            job_skills = job_skills.len(),
            required = classification.required.len(),
            preferred = classification.preferred.len(),
            matched = matched.len(),
            score,
            "Deterministic ATS score computed"
        );

        MatchResult {
            job_skills,
            classification,
            matched,
            missing,
            score,
        }
    }
}

/// Whitespace token count below `min_tokens`.
pub fn is_low_information(resume: &str, min_tokens: usize) -> bool {
    resume.split_whitespace().count() < min_tokens
}

/// Fraction of `bucket` present in `matched`; an empty bucket is full credit.
fn coverage(bucket: &SkillSet, matched: &SkillSet) -> f64 {
    if bucket.is_empty() {
        return 1.0;
    }
    let hits = bucket.iter().filter(|s| matched.contains(s)).count();
    hits as f64 / bucket.len() as f64
}

/// round(100 × (w_req × reqScore + w_pref × prefScore)), clamped to 0 – 100.
pub fn compute_score(
    classification: &RequirementClassification,
    matched: &SkillSet,
    weights: &ScoringWeights,
) -> u32 {
    let req_score = coverage(&classification.required, matched);
    let pref_score = coverage(&classification.preferred, matched);
    let raw = (weights.required * req_score + weights.preferred * pref_score) * 100.0;
    raw.round().clamp(0.0, 100.0) as u32
}

/// One suggestion per missing skill, or a single positive message.
pub fn build_suggestions(missing: &SkillSet) -> Vec<String> {
    if missing.is_empty() {
        return vec![ALIGNED_MESSAGE.to_string()];
    }
    missing
        .iter()
        .map(|s| format!("Consider adding experience with {s}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Pads a resume past the quality gate without introducing vocabulary hits.
    fn pad(text: &str) -> String {
        format!("{text} {}", "worked on many things every day for the team. ".repeat(5))
    }

    fn engine() -> AtsEngine {
        AtsEngine::new(AtsConfig::default()).unwrap()
    }

    fn set(skills: &[&str]) -> SkillSet {
        skills.iter().copied().collect()
    }

    fn scored(eval: Evaluation) -> MatchResult {
        match eval {
            Evaluation::Scored { result, .. } => result,
            Evaluation::LowInformation => panic!("expected a scored evaluation"),
        }
    }

    #[test]
    fn test_score_all_required_matched_no_preferred_matched() {
        let classification = RequirementClassification {
            required: set(&["python", "sql"]),
            preferred: set(&["docker", "aws"]),
        };
        let score = compute_score(&classification, &set(&["python", "sql"]), &ScoringWeights::default());
        assert_eq!(score, 70);
    }

    #[test]
    fn test_score_vacuous_buckets_give_full_credit() {
        let score = compute_score(
            &RequirementClassification::default(),
            &SkillSet::default(),
            &ScoringWeights::default(),
        );
        assert_eq!(score, 100);
    }

    #[test]
    fn test_score_empty_required_bucket_counts_as_covered() {
        let classification = RequirementClassification {
            required: SkillSet::default(),
            preferred: set(&["docker", "aws"]),
        };
        let score = compute_score(&classification, &set(&["docker"]), &ScoringWeights::default());
        // 0.7 + 0.3 * 0.5 = 0.85
        assert_eq!(score, 85);
    }

    #[test]
    fn test_score_rounds_half_up() {
        let classification = RequirementClassification {
            required: set(&["a", "b", "c"]),
            preferred: SkillSet::default(),
        };
        // 0.7 * 1/3 + 0.3 = 0.5333.. → 53
        assert_eq!(
            compute_score(&classification, &set(&["a"]), &ScoringWeights::default()),
            53
        );
    }

    #[test]
    fn test_quality_gate_threshold() {
        let short = "word ".repeat(29);
        let enough = "word ".repeat(30);
        assert!(is_low_information(&short, 30));
        assert!(!is_low_information(&enough, 30));
        assert!(is_low_information("", 30));
    }

    #[test]
    fn test_short_resume_always_low_information() {
        let eval = engine().evaluate("Python SQL Docker AWS expert", "Required: Python, SQL.");
        assert_eq!(eval, Evaluation::LowInformation);
    }

    #[test]
    fn test_end_to_end_required_and_preferred() {
        let resume = pad("I have 2 years experience with Python and SQL, built REST APIs using Git.");
        let job = "Required: Python, SQL. Preferred: Docker, AWS.";
        // drop the single-letter "c" token, which otherwise hits inside "docker"
        let base = SkillVocabulary::default();
        let vocabulary = SkillVocabulary::new(
            base.iter()
                .filter(|s| *s != "c")
                .map(String::from)
                .collect::<Vec<_>>(),
        );
        let engine = AtsEngine::new(AtsConfig {
            vocabulary,
            signal_window: SignalWindow::Within(12),
            ..AtsConfig::default()
        })
        .unwrap();

        let result = scored(engine.evaluate(&resume, job));
        assert_eq!(result.classification.required, set(&["python", "sql"]));
        assert_eq!(result.classification.preferred, set(&["docker", "aws"]));
        assert_eq!(result.matched, set(&["python", "sql"]));
        assert_eq!(result.missing, set(&["docker", "aws"]));
        assert_eq!(result.score, 70);
    }

    #[test]
    fn test_end_to_end_unbounded_marks_everything_required() {
        let resume = pad("I have 2 years experience with Python and SQL, built REST APIs using Git.");
        let job = "Required: Python, SQL. Preferred: Docker, AWS.";

        let result = scored(engine().evaluate(&resume, job));
        // "c" is found inside "docker" on the job side and "experience" on the resume side
        assert_eq!(
            result.classification.required,
            set(&["c", "python", "sql", "docker", "aws"])
        );
        assert!(result.classification.preferred.is_empty());
        assert_eq!(result.matched, set(&["c", "python", "sql"]));
        assert_eq!(result.missing, set(&["docker", "aws"]));
        // 0.7 * 3/5 + 0.3 * 1 = 0.72
        assert_eq!(result.score, 72);
    }

    #[test]
    fn test_aliases_match_across_resume_and_job() {
        let resume = pad("Built spring services for years.");
        let job = "Must have Spring Boot and CI/CD.";

        let result = scored(engine().evaluate(&resume, job));
        assert!(result.job_skills.contains("spring"));
        assert!(result.job_skills.contains("cicd"));
        assert!(result.matched.contains("spring"));
        assert!(result.missing.contains("cicd"));
    }

    #[test]
    fn test_job_without_vocabulary_scores_100() {
        let resume = pad("Plain prose.");
        let result = scored(engine().evaluate(&resume, "Seeking a friendly barista."));
        assert!(result.job_skills.is_empty());
        assert_eq!(result.score, 100);
    }

    #[test]
    fn test_matched_and_missing_partition_job_skills() {
        let resume = pad("docker kubernetes linux");
        let job = "Required: docker, kubernetes, python, linux, agile.";
        let result = scored(engine().evaluate(&resume, job));

        for skill in result.job_skills.iter() {
            assert!(result.matched.contains(skill) ^ result.missing.contains(skill));
        }
        assert_eq!(result.matched.len() + result.missing.len(), result.job_skills.len());
        assert!(result.missing.iter().all(|s| result.job_skills.contains(s)));
    }

    #[test]
    fn test_adding_missing_required_skill_never_decreases_score() {
        let job = "Required: python, docker, kubernetes. Nice: aws";
        let base = pad("python");
        let improved = pad("python kubernetes");
        let e = engine();
        let before = scored(e.evaluate(&base, job)).score;
        let after = scored(e.evaluate(&improved, job)).score;
        assert!(after >= before, "{after} < {before}");
    }

    #[test]
    fn test_boilerplate_skills_are_ignored() {
        let resume = pad("python");
        let job = "Required: python.\n\nAbout us: we run everything on docker.";
        let result = scored(engine().evaluate(&resume, job));
        assert!(!result.job_skills.contains("docker"));
        assert_eq!(result.score, 100);
    }

    #[test]
    fn test_suggestions_per_missing_skill() {
        let suggestions = build_suggestions(&set(&["docker", "aws"]));
        assert_eq!(
            suggestions,
            vec![
                "Consider adding experience with docker".to_string(),
                "Consider adding experience with aws".to_string(),
            ]
        );
    }

    #[test]
    fn test_suggestions_when_nothing_missing() {
        assert_eq!(build_suggestions(&SkillSet::default()), vec![ALIGNED_MESSAGE.to_string()]);
    }
}
