//! Lead capture API endpoint
//!
//! - POST /api/send-email - Validate a project request and notify the team
//!
//! Every response, success or failure, is a `{success, error?}` body.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use std::sync::Arc;

use super::mailer::{MailError, Mailer, compose};
use crate::core::config::Config;
use crate::core::submission::{ProjectRequest, SEND_EMAIL_PATH, SendEmailResponse};

/// Shown to visitors when delivery fails; the real cause goes to the log
const DELIVERY_FAILED_MESSAGE: &str =
    "We could not send your request right now. Please try again later.";

/// Mail API state
#[derive(Debug, Clone)]
pub struct MailApiState {
    pub mailer: Mailer,
    pub sender: String,
    pub recipient: String,
}

impl MailApiState {
    pub fn from_config(config: &Config) -> Self {
        Self {
            mailer: Mailer::from_config(config),
            sender: config.mail_sender().to_string(),
            recipient: config.mail_recipient().to_string(),
        }
    }
}

/// Convert MailError to API response
impl IntoResponse for MailError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            MailError::Invalid(_) | MailError::Malformed(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            MailError::ProviderRejected(_) | MailError::Transport(_) => {
                tracing::error!("Lead delivery failed: {}", self);
                (StatusCode::BAD_GATEWAY, DELIVERY_FAILED_MESSAGE.to_string())
            }
        };

        (status, Json(SendEmailResponse::failed(message))).into_response()
    }
}

/// Create the mail API router
pub fn send_email_router(state: MailApiState) -> Router {
    Router::new()
        .route(SEND_EMAIL_PATH, post(send_email_handler))
        .with_state(Arc::new(state))
}

/// POST /api/send-email
async fn send_email_handler(
    State(state): State<Arc<MailApiState>>,
    payload: Result<Json<ProjectRequest>, JsonRejection>,
) -> Result<Json<SendEmailResponse>, MailError> {
    let Json(request) = payload.map_err(|rejection| MailError::Malformed(rejection.body_text()))?;

    request.validate()?;

    tracing::info!("Project request '{}' received", request.project_name.trim());

    let message = compose(&request, &state.sender, &state.recipient);
    state.mailer.deliver(&message).await?;

    tracing::info!("Project request delivered via {}", state.mailer.kind());

    Ok(Json(SendEmailResponse::ok()))
}
