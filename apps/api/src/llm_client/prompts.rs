// Prompt for the advisory relevance model.

/// Replace `{resume}` and `{job}` before sending.
pub const ADVISORY_PROMPT_TEMPLATE: &str = r#"
You are an ATS assistant.
Evaluate overall experience relevance ONLY.
Return JSON: { "bonus": number (0-10) }

Resume:
{resume}

Job:
{job}
"#;

pub fn build_advisory_prompt(resume: &str, job: &str) -> String {
    // job first, so neither input is re-expanded
    ADVISORY_PROMPT_TEMPLATE
        .replace("{job}", job)
        .replacen("{resume}", resume, 1)
}
