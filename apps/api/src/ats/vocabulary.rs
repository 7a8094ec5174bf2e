//! Skill vocabulary: the closed set of canonical skill tokens the ATS model
//! recognizes, plus the alias table that folds surface phrases onto them.

use serde::Serialize;

/// Surface phrase → canonical token, applied in declaration order.
/// Identity entries are kept so the table documents every canonical spelling.
const DEFAULT_ALIASES: &[(&str, &str)] = &[
    ("spring boot", "spring"),
    ("node.js", "node"),
    ("react.js", "react"),
    ("javascript", "javascript"),
    ("typescript", "typescript"),
    ("amazon web services", "aws"),
    ("restful", "rest"),
    ("rest api", "rest"),
    ("ci/cd", "cicd"),
    ("continuous integration", "cicd"),
    ("continuous deployment", "cicd"),
    ("github", "git"),
    ("mysql", "sql"),
    ("postgresql", "sql"),
    ("mariadb", "sql"),
];

const DEFAULT_SKILLS: &[&str] = &[
    // languages
    "java",
    "c",
    "c++",
    "python",
    "javascript",
    "typescript",
    // frameworks / runtimes
    "spring",
    "node",
    "react",
    // web
    "html",
    "css",
    "rest",
    "api",
    // databases
    "sql",
    "mongodb",
    "db2",
    // tooling
    "git",
    "cicd",
    "docker",
    "kubernetes",
    // platforms
    "linux",
    "windows",
    // methodology
    "agile",
    "scrum",
    "devops",
    // cloud
    "aws",
    "cloud",
    // architecture
    "microservices",
];

/// A single alias rewrite rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    pub phrase: String,
    pub canonical: String,
}

/// Ordered, many-to-one mapping from surface phrases to canonical tokens.
#[derive(Debug, Clone)]
pub struct AliasTable {
    entries: Vec<Alias>,
}

impl AliasTable {
    pub fn new<I, P, C>(entries: I) -> Self
    where
        I: IntoIterator<Item = (P, C)>,
        P: Into<String>,
        C: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(phrase, canonical)| Alias {
                    phrase: phrase.into(),
                    canonical: canonical.into(),
                })
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Alias> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::new(DEFAULT_ALIASES.iter().copied())
    }
}

/// Ordered set of canonical skill tokens. Iteration order is the order in
/// which extracted skills are reported.
#[derive(Debug, Clone)]
pub struct SkillVocabulary {
    skills: Vec<String>,
}

impl SkillVocabulary {
    /// Builds a vocabulary, dropping later duplicates and empty tokens.
    pub fn new<I, S>(skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for skill in skills {
            let skill = skill.into();
            if !skill.is_empty() && !out.contains(&skill) {
                out.push(skill);
            }
        }
        Self { skills: out }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().map(String::as_str)
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.skills.iter().any(|s| s == skill)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }
}

impl Default for SkillVocabulary {
    fn default() -> Self {
        Self::new(DEFAULT_SKILLS.iter().copied())
    }
}

/// Skills found in a job posting, in vocabulary order. Always a subset of the
/// vocabulary it was extracted with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SkillSet(Vec<String>);

impl SkillSet {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.0.iter().any(|s| s == skill)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl<S: Into<String>> FromIterator<S> for SkillSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut out: Vec<String> = Vec::new();
        for skill in iter {
            let skill = skill.into();
            if !out.contains(&skill) {
                out.push(skill);
            }
        }
        SkillSet(out)
    }
}

/// Returns every token of `candidates` that occurs as a literal substring of
/// `text`. No word boundaries, no fuzzy matching.
pub fn extract_skills<'a, I>(text: &str, candidates: I) -> SkillSet
where
    I: IntoIterator<Item = &'a str>,
{
    candidates
        .into_iter()
        .filter(|skill| text.contains(skill))
        .collect()
}

/// Job-side extraction over the full vocabulary.
pub fn extract_job_skills(job_text: &str, vocabulary: &SkillVocabulary) -> SkillSet {
    extract_skills(job_text, vocabulary.iter())
}

/// Resume-side extraction, restricted to what the job asked for. A skill the
/// posting never mentions is neither matched nor missing.
pub fn extract_resume_skills(resume_text: &str, job_skills: &SkillSet) -> SkillSet {
    extract_skills(resume_text, job_skills.iter())
}
