use serde::{Deserialize, Serialize};

/// Questionnaire answers captured from the intake form.
///
/// Every field is a free-form string; the form widgets enforce presence and
/// nothing here re-validates numeric ranges. Created once on submission and
/// never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct QuestionnaireAnswers {
    pub age: String,
    pub income_range: String,
    pub employment_status: String,
    pub emergency_fund: String,
    pub debt_level: String,
    pub housing_cost: String,
    pub dependents: String,
    pub insurance_coverage: String,
    pub additional_context: String,
    pub retirement_savings: String,
    pub retirement_age_goal: String,
    pub retirement_contribution: String,
}

/// Lead contact details captured by the capture surface
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
}

/// Finalized request handed to the assessment requester.
///
/// The state machine only produces one of these once contact details have
/// been confirmed, so `contact` is populated on every request that actually
/// reaches the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRequest {
    #[serde(flatten)]
    pub answers: QuestionnaireAnswers,
    pub contact: Option<ContactInfo>,
}

/// Coarse risk bucket, low to high vulnerability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Zone {
    Green,
    Yellow,
    Red,
}

/// Structured assessment returned by the provider.
///
/// Fields are a direct structural copy of the provider JSON; `score` bounds
/// are asserted by the requested schema, not re-checked here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResult {
    pub overall_vulnerability: String,
    pub score: f64,
    pub zone: Zone,
    pub main_risks: Vec<String>,
    pub priority_risk: String,
    pub summary: String,
    pub invitation: String,
}
