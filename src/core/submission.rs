//! Request lifecycle of the "start a project" form
//!
//! `SubmissionState` is a small state machine:
//!
//! ```text
//! Idle ──begin──▶ Submitting ──finish(Delivered)──▶ Success ──auto_close──▶ Idle
//!  ▲                  │
//!  │                  └──finish(Rejected | Transport)──▶ Error(msg) ──begin──▶ Submitting
//!  └──────────── reset (manual close / reopen) from any phase
//! ```
//!
//! The post-success timer is represented by an [`AutoCloseToken`]. A reset
//! invalidates the token, so a timer that fires after the user already
//! closed the dialog does nothing.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Backend path receiving lead-capture submissions
pub const SEND_EMAIL_PATH: &str = "/api/send-email";

/// Delay between the success banner and the dialog closing itself
pub const AUTO_CLOSE_DELAY_MS: u32 = 2000;

/// Scope attached to logged submission failures
pub const FORM_SUBMISSION_ERROR_SCOPE: &str = "form-submission-error";

/// Payload posted to [`SEND_EMAIL_PATH`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRequest {
    pub user_name: String,
    pub user_email: String,
    pub project_name: String,
    #[serde(default)]
    pub budget: String,
    pub project_description: String,
}

/// Reason a request failed the required-field checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ValidationError {
    #[display("{_0} is required")]
    MissingField(&'static str),
    #[display("Please enter a valid email address")]
    InvalidEmail,
}

impl std::error::Error for ValidationError {}

impl ProjectRequest {
    /// Same checks the browser applies through `required` and `type="email"`
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            ("userName", &self.user_name),
            ("userEmail", &self.user_email),
            ("projectName", &self.project_name),
            ("projectDescription", &self.project_description),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ValidationError::MissingField(field));
            }
        }
        if !is_plausible_email(&self.user_email) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(())
    }
}

/// `local@domain.tld` with no whitespace
pub fn is_plausible_email(value: &str) -> bool {
    let value = value.trim();
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// Body returned by [`SEND_EMAIL_PATH`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SendEmailResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SendEmailResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

/// How a submission attempt ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 2xx and `success: true`
    Delivered,
    /// Non-2xx, `success: false`, or an unexpected body
    Rejected { message: Option<String> },
    /// The request never produced a response
    Transport(String),
}

impl SubmitOutcome {
    /// Details worth reporting to the logger, if this is a failure
    pub fn failure_details(&self) -> Option<String> {
        match self {
            SubmitOutcome::Delivered => None,
            SubmitOutcome::Rejected { message } => Some(format!(
                "rejected: {}",
                message.as_deref().unwrap_or("<no message>")
            )),
            SubmitOutcome::Transport(detail) => Some(format!("transport: {}", detail)),
        }
    }
}

/// Map an HTTP status and body to an outcome
///
/// Anything outside `{success, error?}` counts as a rejection.
pub fn interpret_response(status: u16, body: &str) -> SubmitOutcome {
    let parsed = serde_json::from_str::<SendEmailResponse>(body).ok();

    if !(200..300).contains(&status) {
        return SubmitOutcome::Rejected {
            message: parsed.and_then(|r| r.error),
        };
    }

    match parsed {
        Some(SendEmailResponse { success: true, .. }) => SubmitOutcome::Delivered,
        Some(response) => SubmitOutcome::Rejected {
            message: response.error,
        },
        None => SubmitOutcome::Rejected { message: None },
    }
}

/// Visible phase of the form
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Submitting,
    Success,
    Error(String),
}

/// Handle of a scheduled auto-close
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoCloseToken(u64);

/// Identifies one send; only the current attempt may finish
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptToken(u64);

/// Returned by [`SubmissionState::begin`] when a send is already in flight
/// or has just succeeded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[display("submission already {_0}")]
pub struct SubmitBlocked(&'static str);

impl std::error::Error for SubmitBlocked {}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionState {
    phase: SubmissionPhase,
    generation: u64,
    attempt: u64,
}

impl SubmissionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &SubmissionPhase {
        &self.phase
    }

    /// Idle/Error → Submitting
    ///
    /// The returned token must be handed back to [`finish`](Self::finish).
    pub fn begin(&mut self) -> Result<AttemptToken, SubmitBlocked> {
        match self.phase {
            SubmissionPhase::Submitting => Err(SubmitBlocked("in flight")),
            SubmissionPhase::Success => Err(SubmitBlocked("delivered")),
            SubmissionPhase::Idle | SubmissionPhase::Error(_) => {
                self.phase = SubmissionPhase::Submitting;
                self.attempt += 1;
                Ok(AttemptToken(self.attempt))
            }
        }
    }

    /// Submitting → Success/Error
    ///
    /// Returns the auto-close token on success. Outcomes of an attempt that
    /// is no longer current (reset, or superseded by a later `begin`) are
    /// dropped.
    pub fn finish(
        &mut self,
        attempt: AttemptToken,
        outcome: SubmitOutcome,
        fallback: &str,
    ) -> Option<AutoCloseToken> {
        if self.phase != SubmissionPhase::Submitting || attempt.0 != self.attempt {
            return None;
        }
        match outcome {
            SubmitOutcome::Delivered => {
                self.phase = SubmissionPhase::Success;
                self.generation += 1;
                Some(AutoCloseToken(self.generation))
            }
            SubmitOutcome::Rejected { message } => {
                let message = message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| fallback.to_string());
                self.phase = SubmissionPhase::Error(message);
                None
            }
            SubmitOutcome::Transport(_) => {
                self.phase = SubmissionPhase::Error(fallback.to_string());
                None
            }
        }
    }

    /// Timer expiry. True means the owner should close the dialog.
    pub fn auto_close(&mut self, token: AutoCloseToken) -> bool {
        if self.phase != SubmissionPhase::Success || token.0 != self.generation {
            return false;
        }
        self.phase = SubmissionPhase::Idle;
        true
    }

    /// Back to Idle, invalidating any pending auto-close and in-flight send
    pub fn reset(&mut self) {
        self.phase = SubmissionPhase::Idle;
        self.generation += 1;
        self.attempt += 1;
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == SubmissionPhase::Submitting
    }

    pub fn fields_disabled(&self) -> bool {
        self.is_submitting()
    }

    pub fn submit_disabled(&self) -> bool {
        matches!(
            self.phase,
            SubmissionPhase::Submitting | SubmissionPhase::Success
        )
    }

    /// Banner text; empty while idle or submitting
    pub fn message(&self) -> &str {
        match &self.phase {
            SubmissionPhase::Error(message) => message,
            _ => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FALLBACK: &str = "Something went wrong";

    fn request() -> ProjectRequest {
        ProjectRequest {
            user_name: "Ada Lovelace".to_string(),
            user_email: "ada@example.com".to_string(),
            project_name: "Analytical Engine site".to_string(),
            budget: "10k-25k".to_string(),
            project_description: "A site for our engine".to_string(),
        }
    }

    // ========================================================================
    // Payload
    // ========================================================================

    #[test]
    fn test_request_serializes_camel_case() {
        let json = serde_json::to_value(request()).unwrap();

        assert_eq!(json["userName"], "Ada Lovelace");
        assert_eq!(json["userEmail"], "ada@example.com");
        assert_eq!(json["projectName"], "Analytical Engine site");
        assert_eq!(json["budget"], "10k-25k");
        assert_eq!(json["projectDescription"], "A site for our engine");
    }

    #[test]
    fn test_request_budget_optional_on_deserialize() {
        let json = r#"{"userName":"a","userEmail":"a@b.co","projectName":"p","projectDescription":"d"}"#;
        let request: ProjectRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.budget, "");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_validate_required_fields() {
        let mut missing_name = request();
        missing_name.user_name = "   ".to_string();
        assert_eq!(
            missing_name.validate(),
            Err(ValidationError::MissingField("userName"))
        );

        let mut missing_description = request();
        missing_description.project_description.clear();
        assert_eq!(
            missing_description.validate(),
            Err(ValidationError::MissingField("projectDescription"))
        );

        let mut no_budget = request();
        no_budget.budget.clear();
        assert!(no_budget.validate().is_ok());
    }

    #[test]
    fn test_validate_email() {
        let mut bad = request();
        bad.user_email = "not-an-email".to_string();
        assert_eq!(bad.validate(), Err(ValidationError::InvalidEmail));
        assert_eq!(
            ValidationError::InvalidEmail.to_string(),
            "Please enter a valid email address"
        );
    }

    #[test]
    fn test_is_plausible_email() {
        assert!(is_plausible_email("hello@studio.dev"));
        assert!(is_plausible_email("  first.last@mail.example.org "));
        assert!(!is_plausible_email("@studio.dev"));
        assert!(!is_plausible_email("hello@studio"));
        assert!(!is_plausible_email("hello@.dev"));
        assert!(!is_plausible_email("hello@studio."));
        assert!(!is_plausible_email("he llo@studio.dev"));
        assert!(!is_plausible_email("a@b@c.dev"));
    }

    // ========================================================================
    // Response interpretation
    // ========================================================================

    #[test]
    fn test_interpret_success() {
        assert_eq!(
            interpret_response(200, r#"{"success":true}"#),
            SubmitOutcome::Delivered
        );
    }

    #[test]
    fn test_interpret_body_failure() {
        assert_eq!(
            interpret_response(200, r#"{"success":false,"error":"Budget required"}"#),
            SubmitOutcome::Rejected {
                message: Some("Budget required".to_string())
            }
        );
    }

    #[test]
    fn test_interpret_non_2xx_ignores_success_flag() {
        assert_eq!(
            interpret_response(500, r#"{"success":true}"#),
            SubmitOutcome::Rejected { message: None }
        );
        assert_eq!(
            interpret_response(400, r#"{"success":false,"error":"Bad input"}"#),
            SubmitOutcome::Rejected {
                message: Some("Bad input".to_string())
            }
        );
    }

    #[test]
    fn test_interpret_unexpected_shape() {
        assert_eq!(
            interpret_response(200, "<html>oops</html>"),
            SubmitOutcome::Rejected { message: None }
        );
        assert_eq!(
            interpret_response(200, r#"{"success":true,"queued":3}"#),
            SubmitOutcome::Rejected { message: None }
        );
    }

    #[test]
    fn test_response_serialization() {
        let ok = serde_json::to_string(&SendEmailResponse::ok()).unwrap();
        assert_eq!(ok, r#"{"success":true}"#);

        let failed = serde_json::to_string(&SendEmailResponse::failed("nope")).unwrap();
        assert_eq!(failed, r#"{"success":false,"error":"nope"}"#);
    }

    // ========================================================================
    // State machine
    // ========================================================================

    #[test]
    fn test_success_then_auto_close() {
        let mut state = SubmissionState::new();
        assert_eq!(state.phase(), &SubmissionPhase::Idle);

        let attempt = state.begin().unwrap();
        assert_eq!(state.phase(), &SubmissionPhase::Submitting);
        assert!(state.fields_disabled());
        assert!(state.submit_disabled());

        let outcome = interpret_response(200, r#"{"success":true}"#);
        let token = state.finish(attempt, outcome, FALLBACK).expect("token on success");
        assert_eq!(state.phase(), &SubmissionPhase::Success);
        assert!(!state.fields_disabled());
        assert!(state.submit_disabled());

        assert!(state.auto_close(token));
        assert_eq!(state.phase(), &SubmissionPhase::Idle);
    }

    #[test]
    fn test_server_error_message_surfaces() {
        let mut state = SubmissionState::new();
        let attempt = state.begin().unwrap();

        let outcome = interpret_response(200, r#"{"success":false,"error":"Budget required"}"#);
        assert!(state.finish(attempt, outcome, FALLBACK).is_none());

        assert_eq!(
            state.phase(),
            &SubmissionPhase::Error("Budget required".to_string())
        );
        assert_eq!(state.message(), "Budget required");
        assert!(!state.fields_disabled());
        assert!(!state.submit_disabled());
    }

    #[test]
    fn test_transport_failure_uses_fallback() {
        let mut state = SubmissionState::new();
        let attempt = state.begin().unwrap();
        state.finish(attempt, SubmitOutcome::Transport("offline".to_string()), FALLBACK);
        assert_eq!(state.message(), FALLBACK);
    }

    #[test]
    fn test_blank_server_message_uses_fallback() {
        let mut state = SubmissionState::new();
        let attempt = state.begin().unwrap();
        state.finish(
            attempt,
            SubmitOutcome::Rejected {
                message: Some("  ".to_string()),
            },
            FALLBACK,
        );
        assert_eq!(state.message(), FALLBACK);
    }

    #[test]
    fn test_error_allows_resubmit() {
        let mut state = SubmissionState::new();
        let attempt = state.begin().unwrap();
        state.finish(attempt, SubmitOutcome::Rejected { message: None }, FALLBACK);

        assert!(state.begin().is_ok());
        assert!(state.is_submitting());
        assert_eq!(state.message(), "");
    }

    #[test]
    fn test_duplicate_sends_blocked() {
        let mut state = SubmissionState::new();
        let attempt = state.begin().unwrap();
        assert!(state.begin().is_err());

        state.finish(attempt, SubmitOutcome::Delivered, FALLBACK);
        let blocked = state.begin().unwrap_err();
        assert_eq!(blocked.to_string(), "submission already delivered");
    }

    #[test]
    fn test_reset_invalidates_auto_close() {
        let mut state = SubmissionState::new();
        let attempt = state.begin().unwrap();
        let token = state.finish(attempt, SubmitOutcome::Delivered, FALLBACK).unwrap();

        // User closes the dialog before the timer fires
        state.reset();
        assert!(!state.auto_close(token));
        assert_eq!(state.phase(), &SubmissionPhase::Idle);

        // A later success hands out a fresh token; the stale one stays dead
        let attempt = state.begin().unwrap();
        let fresh = state.finish(attempt, SubmitOutcome::Delivered, FALLBACK).unwrap();
        assert!(!state.auto_close(token));
        assert!(state.auto_close(fresh));
    }

    #[test]
    fn test_late_outcome_after_reset_is_dropped() {
        let mut state = SubmissionState::new();
        let attempt = state.begin().unwrap();
        state.reset();

        assert!(state.finish(attempt, SubmitOutcome::Delivered, FALLBACK).is_none());
        assert_eq!(state.phase(), &SubmissionPhase::Idle);
    }

    #[test]
    fn test_superseded_attempt_cannot_finish() {
        let mut state = SubmissionState::new();
        let first = state.begin().unwrap();

        // Dialog closed and reopened while the first send is in flight
        state.reset();
        let second = state.begin().unwrap();

        assert!(state.finish(first, SubmitOutcome::Delivered, FALLBACK).is_none());
        assert_eq!(state.phase(), &SubmissionPhase::Submitting);

        assert!(
            state
                .finish(second, SubmitOutcome::Transport("offline".to_string()), FALLBACK)
                .is_none()
        );
        assert_eq!(state.phase(), &SubmissionPhase::Error(FALLBACK.to_string()));
    }

    #[test]
    fn test_failure_details() {
        assert_eq!(SubmitOutcome::Delivered.failure_details(), None);
        assert_eq!(
            SubmitOutcome::Transport("timeout".to_string()).failure_details(),
            Some("transport: timeout".to_string())
        );
        assert_eq!(
            SubmitOutcome::Rejected { message: None }.failure_details(),
            Some("rejected: <no message>".to_string())
        );
    }
}
