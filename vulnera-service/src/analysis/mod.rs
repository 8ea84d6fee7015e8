// Financial-vulnerability assessment requester
pub mod analyst;
pub mod prompt;
pub mod schema;

// Re-export the assessment surface
pub use analyst::{AnalysisFailure, Analyst, AssessmentModel, OpenRouterModel};
pub use prompt::{
    ANALYST_PREAMBLE, GENERIC_ADDRESSEE, INVITATION_SENTENCE, build_assessment_prompt,
};
pub use schema::{RESULT_FIELDS, response_format, response_schema};
