//! Text normalization: lowercasing, alias canonicalization and job-posting cleanup.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ats::vocabulary::AliasTable;

/// Boilerplate headings after which a job posting stops describing the role.
pub const DEFAULT_BOILERPLATE_MARKERS: &[&str] = &[
    "equal opportunity employer",
    "benefits include",
    "about us",
    "we offer",
];

/// Cleaned job text is cut to this many characters.
pub const MAX_JOB_TEXT_CHARS: usize = 5000;

static BLANK_LINES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{2,}").unwrap());

/// Lowercases `text` and rewrites every alias phrase to its canonical token.
///
/// Substitution is sequential: each alias runs over the output of the previous
/// one, in table order, with no word-boundary checks.
pub fn normalize_text(text: &str, aliases: &AliasTable) -> String {
    aliases
        .iter()
        .fold(text.to_lowercase(), |acc, alias| {
            if acc.contains(alias.phrase.as_str()) {
                acc.replace(alias.phrase.as_str(), &alias.canonical)
            } else {
                acc
            }
        })
}

/// Strips trailing boilerplate from job text and bounds its length.
#[derive(Debug, Clone)]
pub struct JobTextCleaner {
    markers: Vec<Regex>,
    max_chars: usize,
}

impl JobTextCleaner {
    pub fn new<S: AsRef<str>>(markers: &[S], max_chars: usize) -> Result<Self, regex::Error> {
        let markers = markers
            .iter()
            .map(|m| Regex::new(&format!("(?i){}", regex::escape(m.as_ref()))))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { markers, max_chars })
    }

    /// Each marker truncates from its first occurrence, applied in list order
    /// to the already-truncated text. Blank-line runs collapse to one newline,
    /// then the result is cut to `max_chars` characters.
    pub fn clean(&self, text: &str) -> String {
        let mut out = text;
        for marker in &self.markers {
            if let Some(m) = marker.find(out) {
                out = &out[..m.start()];
            }
        }

        let collapsed = BLANK_LINES_RE.replace_all(out, "\n");
        let cut = collapsed.char_indices().nth(self.max_chars).map(|(i, _)| i);
        match cut {
            Some(cut) => collapsed[..cut].to_string(),
            None => collapsed.into_owned(),
        }
    }
}
