use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    http::{HeaderValue, Request},
    middleware::{Next, from_fn},
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::{Instrument, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;
use vulnera_flow::{
    AssessmentResult, ContactInfo, InMemorySessionStorage, IntakeFlow, QuestionnaireAnswers,
    Session, SessionStorage,
};
use vulnera_service::{
    analysis::{Analyst, OpenRouterModel},
    error::ApiError,
};

#[derive(Clone)]
struct AppState {
    flow: IntakeFlow,
    analyst: Analyst,
}

#[derive(Debug, Deserialize)]
struct SubmitRequest {
    session_id: Option<String>,
    answers: QuestionnaireAnswers,
}

#[derive(Debug, Serialize)]
struct SubmitResponse {
    session_id: String,
    status: String,
}

#[derive(Debug, Deserialize)]
struct ContactRequest {
    session_id: String,
    contact: ContactInfo,
}

#[derive(Debug, Serialize)]
struct ContactResponse {
    session_id: String,
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<AssessmentResult>,
}

#[derive(Debug, Deserialize)]
struct SessionRequest {
    session_id: String,
}

#[derive(Debug, Serialize)]
struct StatusResponse {
    session_id: String,
    status: String,
}

/// Initialize structured JSON tracing based on environment variables
fn init_tracing() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "vulnera_service=debug,vulnera_flow=debug,tower_http=debug".into());

    match log_format.as_str() {
        "pretty" => {
            // Human-readable logging for development
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        _ => {
            // Structured JSON logging for production
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_target(true)
                        .with_level(true),
                )
                .init();
        }
    }
}

/// Middleware to add correlation ID to all requests
async fn correlation_id_middleware(
    mut request: Request<axum::body::Body>,
    next: Next,
) -> axum::response::Response {
    let correlation_id = Uuid::new_v4().to_string();

    // Add correlation ID to request headers for downstream use
    request.headers_mut().insert(
        "x-correlation-id",
        HeaderValue::from_str(&correlation_id).unwrap(),
    );

    let span = tracing::info_span!("http_request", correlation_id = %correlation_id);
    next.run(request).instrument(span).await
}

#[tokio::main]
async fn main() {
    init_tracing();

    // The provider credential is required for every assessment call
    let model = match OpenRouterModel::from_env() {
        Ok(model) => Arc::new(model),
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let storage: Arc<dyn SessionStorage> = Arc::new(InMemorySessionStorage::new());

    let app_state = AppState {
        flow: IntakeFlow::new(storage),
        analyst: Analyst::new(model),
    };

    let app = Router::new()
        .route("/health", get(health_check))
        .route("/questionnaire", post(submit_questionnaire))
        .route("/contact", post(confirm_contact))
        .route("/contact/cancel", post(cancel_contact))
        .route("/reset", post(reset_session))
        .route("/session/{id}", get(get_session))
        .layer(from_fn(correlation_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();

    info!("Server running on http://0.0.0.0:3000");

    axum::serve(listener, app).await.unwrap();
}

async fn health_check() -> &'static str {
    "OK"
}

/// Store questionnaire answers and move the session to contact capture
async fn submit_questionnaire(
    State(state): State<AppState>,
    Json(request): Json<SubmitRequest>,
) -> Result<Json<SubmitResponse>, ApiError> {
    let session_id_provided = request.session_id.is_some();
    let session_id = request
        .session_id
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    // Validate session ID format if provided
    if session_id_provided && Uuid::parse_str(&session_id).is_err() {
        return Err(ApiError::BadRequest("Invalid session ID format".to_string()));
    }

    // A provided but unknown session ID is an error; only fresh
    // submissions create sessions
    if session_id_provided && state.flow.session(&session_id).await?.is_none() {
        return Err(ApiError::NotFound(format!("Session not found: {session_id}")));
    }

    info!(session_id = %session_id, "processing questionnaire submission");

    match state
        .flow
        .submit_questionnaire(&session_id, request.answers)
        .await?
    {
        Some(phase) => Ok(Json(SubmitResponse {
            session_id,
            status: phase.to_string(),
        })),
        None => Err(ApiError::Conflict(
            "Submission refused in the current session phase".to_string(),
        )),
    }
}

/// Confirm contact details and run the single assessment call.
///
/// A confirmation with no pending submission is a no-op: no request is
/// finalized and no provider call is made.
async fn confirm_contact(
    State(state): State<AppState>,
    Json(request): Json<ContactRequest>,
) -> Result<Json<ContactResponse>, ApiError> {
    let session_id = request.session_id;

    info!(session_id = %session_id, "processing contact confirmation");

    let Some(assessment_request) = state
        .flow
        .confirm_contact(&session_id, request.contact)
        .await?
    else {
        let session = state
            .flow
            .session(&session_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Session not found: {session_id}")))?;
        return Ok(Json(ContactResponse {
            session_id,
            status: session.state.phase().to_string(),
            result: None,
        }));
    };

    match state.analyst.analyze(&assessment_request).await {
        Ok(result) => {
            let phase = state.flow.record_result(&session_id, result.clone()).await?;
            info!(session_id = %session_id, status = %phase, "assessment completed");
            Ok(Json(ContactResponse {
                session_id,
                status: phase.to_string(),
                result: Some(result),
            }))
        }
        Err(failure) => {
            // Answers are retained so the user can re-trigger submission
            state.flow.record_failure(&session_id).await?;
            Err(failure.into())
        }
    }
}

/// Dismiss the pending contact-capture flow
async fn cancel_contact(
    State(state): State<AppState>,
    Json(request): Json<SessionRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    let phase = state.flow.cancel_contact(&request.session_id).await?;
    Ok(Json(StatusResponse {
        session_id: request.session_id,
        status: phase.to_string(),
    }))
}

/// Discard any finalized request and result
async fn reset_session(
    State(state): State<AppState>,
    Json(request): Json<SessionRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    let phase = state.flow.reset(&request.session_id).await?;
    info!(session_id = %request.session_id, "session reset");
    Ok(Json(StatusResponse {
        session_id: request.session_id,
        status: phase.to_string(),
    }))
}

/// Session inspection
async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Session>, ApiError> {
    match state.flow.session(&session_id).await? {
        Some(session) => Ok(Json(session)),
        None => Err(ApiError::NotFound(format!("Session not found: {session_id}"))),
    }
}
