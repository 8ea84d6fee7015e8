//! IntakeFlow – convenience wrapper that loads a session, applies exactly
//! **one** state transition, and persists the updated session back to
//! storage.
//!
//! Interactive surfaces usually want to run one transition per HTTP
//! request, send the new phase back to the client, and have the session
//! automatically saved for the next roundtrip. `IntakeFlow` makes that a
//! one-liner per operation; callers that need custom persistence can still
//! drive `IntakeState` on a `Session` directly and save it themselves.

use std::sync::Arc;

use tracing::info;

use crate::{
    error::{FlowError, Result},
    model::{AssessmentRequest, AssessmentResult, ContactInfo, QuestionnaireAnswers},
    session::{Session, SessionStorage},
};

/// High-level helper that orchestrates the common _load → transition → save_
/// pattern over any [`SessionStorage`] implementation.
#[derive(Clone)]
pub struct IntakeFlow {
    storage: Arc<dyn SessionStorage>,
}

impl IntakeFlow {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self { storage }
    }

    async fn load(&self, session_id: &str) -> Result<Session> {
        self.storage
            .get(session_id)
            .await?
            .ok_or_else(|| FlowError::SessionNotFound(session_id.to_string()))
    }

    /// Store questionnaire answers, creating the session on first contact.
    ///
    /// Returns the new phase label, or `None` when the current phase
    /// refuses the submission (call in flight, result on display).
    pub async fn submit_questionnaire(
        &self,
        session_id: &str,
        answers: QuestionnaireAnswers,
    ) -> Result<Option<&'static str>> {
        let mut session = match self.storage.get(session_id).await? {
            Some(session) => session,
            None => Session::new(session_id.to_string()),
        };

        if !session.state.submit_questionnaire(answers) {
            info!(
                session_id = %session_id,
                phase = %session.state.phase(),
                "questionnaire submission refused in current phase"
            );
            return Ok(None);
        }

        let phase = session.state.phase();
        self.storage.save(session).await?;
        Ok(Some(phase))
    }

    /// Finalize the pending answers with contact details.
    ///
    /// On success the session is persisted in its in-flight phase *before*
    /// the request is returned, so a concurrent confirmation on the same
    /// session sees `awaiting_result` and becomes a no-op. Returns `None`
    /// when no submission is pending.
    pub async fn confirm_contact(
        &self,
        session_id: &str,
        contact: ContactInfo,
    ) -> Result<Option<AssessmentRequest>> {
        let mut session = self.load(session_id).await?;

        let request = session.state.confirm_contact(contact);
        if request.is_some() {
            self.storage.save(session).await?;
        } else {
            info!(
                session_id = %session_id,
                phase = %session.state.phase(),
                "contact confirmation ignored, no pending submission"
            );
        }
        Ok(request)
    }

    /// Dismiss the pending contact-capture flow
    pub async fn cancel_contact(&self, session_id: &str) -> Result<&'static str> {
        let mut session = self.load(session_id).await?;
        session.state.cancel_contact();
        let phase = session.state.phase();
        self.storage.save(session).await?;
        Ok(phase)
    }

    /// Attach the provider result to the in-flight request
    pub async fn record_result(
        &self,
        session_id: &str,
        result: AssessmentResult,
    ) -> Result<&'static str> {
        let mut session = self.load(session_id).await?;
        session.state.record_result(result);
        let phase = session.state.phase();
        self.storage.save(session).await?;
        Ok(phase)
    }

    /// Roll the in-flight request back to contact capture after a failure
    pub async fn record_failure(&self, session_id: &str) -> Result<&'static str> {
        let mut session = self.load(session_id).await?;
        session.state.record_failure();
        let phase = session.state.phase();
        self.storage.save(session).await?;
        Ok(phase)
    }

    /// Discard any finalized request and result
    pub async fn reset(&self, session_id: &str) -> Result<&'static str> {
        let mut session = self.load(session_id).await?;
        session.state.reset();
        let phase = session.state.phase();
        self.storage.save(session).await?;
        Ok(phase)
    }

    /// Fetch a session for inspection
    pub async fn session(&self, session_id: &str) -> Result<Option<Session>> {
        self.storage.get(session_id).await
    }
}
