use std::sync::Arc;

use async_trait::async_trait;
use rig::{client::CompletionClient, completion::Chat, providers::openrouter};
use thiserror::Error;
use tracing::{error, info};
use vulnera_flow::{AssessmentRequest, AssessmentResult};

use super::{
    prompt::{ANALYST_PREAMBLE, build_assessment_prompt},
    schema::response_format,
};

const ASSESSMENT_MODEL: &str = "google/gemini-2.5-flash";

/// The single user-facing failure condition of the assessment requester.
///
/// Network failures, provider-side errors and unparseable responses all
/// collapse into this one opaque condition. The upstream cause is logged
/// for operators and never carried in the error itself.
#[derive(Error, Debug)]
#[error("Impossible de générer l'analyse. Vérifiez vos informations et réessayez.")]
pub struct AnalysisFailure;

impl AnalysisFailure {
    fn from_cause(stage: &str, cause: impl std::fmt::Display) -> Self {
        error!(stage = %stage, error = %cause, "assessment generation failed");
        AnalysisFailure
    }
}

/// Provider seam: one text-generation call carrying the built prompt,
/// returning the raw response body
#[async_trait]
pub trait AssessmentModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> anyhow::Result<String>;
}

/// Real provider backend, reached through the openrouter client.
///
/// Each call builds an agent with the analyst preamble and the strict-JSON
/// response format of the assessment schema.
pub struct OpenRouterModel {
    api_key: String,
}

impl OpenRouterModel {
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = std::env::var("OPENROUTER_API_KEY")
            .map_err(|_| anyhow::anyhow!("OPENROUTER_API_KEY not set"))?;
        Ok(Self { api_key })
    }
}

#[async_trait]
impl AssessmentModel for OpenRouterModel {
    async fn generate(&self, prompt: &str) -> anyhow::Result<String> {
        let client = openrouter::Client::new(&self.api_key);
        let agent = client
            .agent(ASSESSMENT_MODEL)
            .preamble(ANALYST_PREAMBLE)
            .additional_params(response_format())
            .build();

        let response = agent.chat(prompt, vec![]).await?;
        Ok(response)
    }
}

/// Assessment requester: exactly one provider call per invocation, no
/// automatic retry. Retrying is a caller-level action, a fresh
/// user-initiated submission.
#[derive(Clone)]
pub struct Analyst {
    model: Arc<dyn AssessmentModel>,
}

impl Analyst {
    pub fn new(model: Arc<dyn AssessmentModel>) -> Self {
        Self { model }
    }

    /// Run the single external call and parse the structured assessment.
    ///
    /// The parsed result is a direct structural copy of the provider JSON;
    /// no field is dropped, renamed or recomputed, and `score` bounds are
    /// not re-checked beyond what the requested schema asserts.
    pub async fn analyze(
        &self,
        request: &AssessmentRequest,
    ) -> Result<AssessmentResult, AnalysisFailure> {
        let prompt = build_assessment_prompt(request);

        let raw = self
            .model
            .generate(&prompt)
            .await
            .map_err(|e| AnalysisFailure::from_cause("provider_call", e))?;

        let result: AssessmentResult = serde_json::from_str(raw.trim())
            .map_err(|e| AnalysisFailure::from_cause("response_parse", e))?;

        info!(score = result.score, zone = ?result.zone, "assessment generated");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vulnera_flow::{ContactInfo, QuestionnaireAnswers, Zone};

    struct ScriptedModel {
        reply: Option<String>,
    }

    impl ScriptedModel {
        fn replying(body: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Some(body.to_string()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self { reply: None })
        }
    }

    #[async_trait]
    impl AssessmentModel for ScriptedModel {
        async fn generate(&self, _prompt: &str) -> anyhow::Result<String> {
            match &self.reply {
                Some(body) => Ok(body.clone()),
                None => Err(anyhow::anyhow!("connection refused")),
            }
        }
    }

    fn request() -> AssessmentRequest {
        AssessmentRequest {
            answers: QuestionnaireAnswers {
                age: "42".to_string(),
                retirement_age_goal: "65".to_string(),
                ..Default::default()
            },
            contact: Some(ContactInfo {
                first_name: "Jean".to_string(),
                last_name: "Dupont".to_string(),
                phone: "5140000000".to_string(),
                email: "jean@example.ca".to_string(),
            }),
        }
    }

    const WELL_FORMED: &str = r#"{
        "overallVulnerability": "Vulnérabilité modérée",
        "score": 55,
        "zone": "Yellow",
        "mainRisks": ["Fonds d'urgence limité", "Logement coûteux", "Épargne retraite en retard"],
        "priorityRisk": "Fonds d'urgence limité",
        "summary": "Jean, votre situation est globalement stable mais votre retraite est en retard.",
        "invitation": "Un membre de l'équipe vous contactera dans le prochain jour pour discuter de stratégies pour optimiser votre situation sans frais."
    }"#;

    #[tokio::test]
    async fn well_formed_response_is_copied_structurally() {
        let analyst = Analyst::new(ScriptedModel::replying(WELL_FORMED));

        let result = analyst.analyze(&request()).await.unwrap();
        assert_eq!(result.overall_vulnerability, "Vulnérabilité modérée");
        assert_eq!(result.score, 55.0);
        assert_eq!(result.zone, Zone::Yellow);
        assert_eq!(result.main_risks.len(), 3);
        assert_eq!(result.priority_risk, "Fonds d'urgence limité");
        assert!(result.summary.starts_with("Jean"));
        assert!(result.invitation.contains("Un membre de l'équipe"));
    }

    #[tokio::test]
    async fn whitespace_around_the_body_is_tolerated() {
        let padded = format!("\n  {WELL_FORMED}\n");
        let analyst = Analyst::new(ScriptedModel::replying(&padded));
        assert!(analyst.analyze(&request()).await.is_ok());
    }

    #[tokio::test]
    async fn empty_body_fails_opaquely() {
        let analyst = Analyst::new(ScriptedModel::replying(""));
        assert!(analyst.analyze(&request()).await.is_err());
    }

    #[tokio::test]
    async fn truncated_body_fails_opaquely() {
        let truncated = "{\"overallVulnerability\": \"Vul";
        let analyst = Analyst::new(ScriptedModel::replying(truncated));
        assert!(analyst.analyze(&request()).await.is_err());
    }

    #[tokio::test]
    async fn provider_failure_collapses_to_the_single_condition() {
        let analyst = Analyst::new(ScriptedModel::failing());
        let failure = analyst.analyze(&request()).await.unwrap_err();
        assert_eq!(
            failure.to_string(),
            "Impossible de générer l'analyse. Vérifiez vos informations et réessayez."
        );
    }
}
