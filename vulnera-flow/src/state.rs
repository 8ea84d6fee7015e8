use serde::{Deserialize, Serialize};

use crate::model::{AssessmentRequest, AssessmentResult, ContactInfo, QuestionnaireAnswers};

/// Per-session intake state machine.
///
/// Idle -> PendingContact -> AwaitingResult -> ResultShown -> Idle (reset).
/// `AwaitingResult` doubles as the loading flag: while a session sits in
/// that phase, further submissions and confirmations are refused, which
/// keeps exactly one provider call in flight per session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum IntakeState {
    #[default]
    Idle,
    PendingContact {
        answers: QuestionnaireAnswers,
    },
    AwaitingResult {
        request: AssessmentRequest,
    },
    ResultShown {
        request: AssessmentRequest,
        result: AssessmentResult,
    },
}

impl IntakeState {
    /// Store questionnaire answers and move to contact capture.
    ///
    /// Resubmitting while contact capture is pending replaces the stored
    /// answers. Returns false (state unchanged) while a call is in flight
    /// or a result is on display.
    pub fn submit_questionnaire(&mut self, answers: QuestionnaireAnswers) -> bool {
        match self {
            IntakeState::Idle | IntakeState::PendingContact { .. } => {
                *self = IntakeState::PendingContact { answers };
                true
            }
            _ => false,
        }
    }

    /// Merge contact details into a finalized request.
    ///
    /// Only meaningful in `PendingContact`; in every other phase this is a
    /// no-op and no request is produced. The returned request is what the
    /// caller forwards to the assessment requester.
    pub fn confirm_contact(&mut self, contact: ContactInfo) -> Option<AssessmentRequest> {
        match std::mem::take(self) {
            IntakeState::PendingContact { answers } => {
                let request = AssessmentRequest {
                    answers,
                    contact: Some(contact),
                };
                *self = IntakeState::AwaitingResult {
                    request: request.clone(),
                };
                Some(request)
            }
            other => {
                *self = other;
                None
            }
        }
    }

    /// Dismiss the pending contact-capture flow, discarding the answers
    pub fn cancel_contact(&mut self) -> bool {
        match self {
            IntakeState::PendingContact { .. } => {
                *self = IntakeState::Idle;
                true
            }
            _ => false,
        }
    }

    /// Attach the provider result to the in-flight request
    pub fn record_result(&mut self, result: AssessmentResult) -> bool {
        match std::mem::take(self) {
            IntakeState::AwaitingResult { request } => {
                *self = IntakeState::ResultShown { request, result };
                true
            }
            other => {
                *self = other;
                false
            }
        }
    }

    /// Roll an in-flight request back to contact capture after a provider
    /// failure, retaining the answers for a user-triggered retry
    pub fn record_failure(&mut self) -> bool {
        match std::mem::take(self) {
            IntakeState::AwaitingResult { request } => {
                *self = IntakeState::PendingContact {
                    answers: request.answers,
                };
                true
            }
            other => {
                *self = other;
                false
            }
        }
    }

    /// Discard any finalized request and result, back to the initial state
    pub fn reset(&mut self) {
        *self = IntakeState::Idle;
    }

    /// True while the single provider call is outstanding
    pub fn is_in_flight(&self) -> bool {
        matches!(self, IntakeState::AwaitingResult { .. })
    }

    /// Phase label used in status responses and logs
    pub fn phase(&self) -> &'static str {
        match self {
            IntakeState::Idle => "idle",
            IntakeState::PendingContact { .. } => "pending_contact",
            IntakeState::AwaitingResult { .. } => "awaiting_result",
            IntakeState::ResultShown { .. } => "result_shown",
        }
    }
}
