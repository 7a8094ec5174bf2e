// ATS scoring: deterministic keyword model plus an optional advisory bonus.
// The engine modules are pure; the only I/O lives behind `advisory::AdvisoryScorer`.

pub mod advisory;
pub mod classifier;
pub mod engine;
pub mod handlers;
pub mod job_source;
pub mod normalize;
pub mod vocabulary;
