//! Message composition and delivery

use serde::Serialize;

use crate::core::config::{Config, REDACTED};
use crate::core::submission::{ProjectRequest, ValidationError};

/// Mail delivery error types
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("{0}")]
    Invalid(#[from] ValidationError),

    #[error("Malformed request: {0}")]
    Malformed(String),

    #[error("Mail provider rejected the message (status {0})")]
    ProviderRejected(u16),

    #[error("Mail provider unreachable: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for MailError {
    fn from(err: reqwest::Error) -> Self {
        MailError::Transport(err.to_string())
    }
}

/// Notification about a new lead
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingMessage {
    pub from: String,
    pub to: String,
    pub reply_to: String,
    pub subject: String,
    pub text: String,
}

/// Build the notification for `request`
pub fn compose(request: &ProjectRequest, from: &str, to: &str) -> OutgoingMessage {
    let budget = match request.budget.trim() {
        "" => "not specified",
        budget => budget,
    };

    let text = format!(
        "New project request\n\n\
         Name: {}\n\
         Email: {}\n\
         Project: {}\n\
         Budget: {}\n\n\
         {}\n",
        request.user_name.trim(),
        request.user_email.trim(),
        request.project_name.trim(),
        budget,
        request.project_description.trim(),
    );

    OutgoingMessage {
        from: from.to_string(),
        to: to.to_string(),
        reply_to: request.user_email.trim().to_string(),
        subject: format!("New project request: {}", request.project_name.trim()),
        text,
    }
}

/// Body accepted by Resend-style JSON mail APIs
#[derive(Debug, Serialize)]
struct ProviderPayload<'a> {
    from: &'a str,
    to: [&'a str; 1],
    reply_to: &'a str,
    subject: &'a str,
    text: &'a str,
}

/// Mail provider reached over HTTP with a bearer key
#[derive(Clone)]
pub struct HttpMailer {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl std::fmt::Debug for HttpMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpMailer")
            .field("api_url", &self.api_url)
            .field("api_key", &REDACTED)
            .finish_non_exhaustive()
    }
}

impl HttpMailer {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.into(),
            api_key: api_key.into(),
        }
    }

    pub async fn send(&self, message: &OutgoingMessage) -> Result<(), MailError> {
        let payload = ProviderPayload {
            from: &message.from,
            to: [&message.to],
            reply_to: &message.reply_to,
            subject: &message.subject,
            text: &message.text,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MailError::ProviderRejected(status.as_u16()));
        }
        Ok(())
    }
}

/// Where lead notifications go
#[derive(Debug, Clone)]
pub enum Mailer {
    /// Development fallback: write the message to the log
    Log,
    Http(HttpMailer),
}

impl Mailer {
    pub fn from_config(config: &Config) -> Self {
        match (&config.mail_api_url, &config.mail_api_key) {
            (Some(url), Some(key)) => Mailer::Http(HttpMailer::new(url, key)),
            _ => Mailer::Log,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Mailer::Log => "log",
            Mailer::Http(_) => "http",
        }
    }

    pub async fn deliver(&self, message: &OutgoingMessage) -> Result<(), MailError> {
        match self {
            Mailer::Log => {
                tracing::info!(
                    to = %message.to,
                    reply_to = %message.reply_to,
                    subject = %message.subject,
                    "Mail provider not configured, logging lead instead:\n{}",
                    message.text
                );
                Ok(())
            }
            Mailer::Http(http) => http.send(message).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ProjectRequest {
        ProjectRequest {
            user_name: " Grace Hopper ".to_string(),
            user_email: "grace@navy.mil".to_string(),
            project_name: "Compiler docs".to_string(),
            budget: String::new(),
            project_description: "Documentation portal".to_string(),
        }
    }

    #[test]
    fn test_compose() {
        let message = compose(&request(), "site@studio.dev", "leads@studio.dev");

        assert_eq!(message.from, "site@studio.dev");
        assert_eq!(message.to, "leads@studio.dev");
        assert_eq!(message.reply_to, "grace@navy.mil");
        assert_eq!(message.subject, "New project request: Compiler docs");
        assert!(message.text.contains("Name: Grace Hopper\n"));
        assert!(message.text.contains("Budget: not specified"));
        assert!(message.text.contains("Documentation portal"));
    }

    #[test]
    fn test_compose_with_budget() {
        let mut request = request();
        request.budget = "25k+".to_string();
        let message = compose(&request, "a@b.co", "c@d.co");
        assert!(message.text.contains("Budget: 25k+"));
    }

    #[test]
    fn test_mailer_from_config() {
        let configured = Config {
            mail_api_url: Some("https://mail.example.com/send".to_string()),
            mail_api_key: Some("key".to_string()),
            mail_from: None,
            mail_to: None,
        };
        let unconfigured = Config {
            mail_api_url: Some("https://mail.example.com/send".to_string()),
            mail_api_key: None,
            mail_from: None,
            mail_to: None,
        };

        assert_eq!(Mailer::from_config(&configured).kind(), "http");
        assert_eq!(Mailer::from_config(&unconfigured).kind(), "log");
    }

    #[test]
    fn test_debug_hides_api_key() {
        let mailer = Mailer::Http(HttpMailer::new("https://mail.example.com/send", "sk-live-secret"));
        let debug_str = format!("{:?}", mailer);
        assert!(!debug_str.contains("sk-live-secret"));
        assert!(debug_str.contains("https://mail.example.com/send"));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            MailError::from(ValidationError::MissingField("projectName")).to_string(),
            "projectName is required"
        );
        assert_eq!(
            MailError::ProviderRejected(422).to_string(),
            "Mail provider rejected the message (status 422)"
        );
    }

    #[tokio::test]
    async fn test_log_mailer_delivers() {
        let message = compose(&request(), "a@b.co", "c@d.co");
        assert!(Mailer::Log.deliver(&message).await.is_ok());
    }

    #[test]
    fn test_provider_payload_shape() {
        let message = compose(&request(), "a@b.co", "c@d.co");
        let payload = ProviderPayload {
            from: &message.from,
            to: [&message.to],
            reply_to: &message.reply_to,
            subject: &message.subject,
            text: &message.text,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["to"][0], "c@d.co");
        assert_eq!(json["reply_to"], "grace@navy.mil");
    }
}
