//! Application configuration from environment variables.
//!
//! Load configuration using `Config::from_env()` after calling `dotenvy::dotenv()`.

/// Recipient used when `MAIL_TO` is not set
pub const DEFAULT_MAIL_RECIPIENT: &str = "hello@localhost";

/// Sender used when `MAIL_FROM` is not set
pub const DEFAULT_MAIL_SENDER: &str = "website@localhost";

/// Application configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    /// HTTP endpoint of the transactional mail provider
    /// Example: https://api.resend.com/emails
    pub mail_api_url: Option<String>,

    /// Bearer key for the mail provider
    pub mail_api_key: Option<String>,

    /// Sender address of lead notifications
    pub mail_from: Option<String>,

    /// Inbox receiving lead notifications
    pub mail_to: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Call `dotenvy::dotenv()` before this to load from `.env` file.
    pub fn from_env() -> Self {
        Self {
            mail_api_url: non_empty_var("MAIL_API_URL"),
            mail_api_key: non_empty_var("MAIL_API_KEY"),
            mail_from: non_empty_var("MAIL_FROM"),
            mail_to: non_empty_var("MAIL_TO"),
        }
    }

    /// Both the provider URL and key are present
    pub fn has_mail_provider(&self) -> bool {
        self.mail_api_url.is_some() && self.mail_api_key.is_some()
    }

    pub fn mail_recipient(&self) -> &str {
        self.mail_to.as_deref().unwrap_or(DEFAULT_MAIL_RECIPIENT)
    }

    pub fn mail_sender(&self) -> &str {
        self.mail_from.as_deref().unwrap_or(DEFAULT_MAIL_SENDER)
    }
}

/// Shown instead of secrets in `Debug` output
pub const REDACTED: &str = "<redacted>";

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("mail_api_url", &self.mail_api_url)
            .field("mail_api_key", &self.mail_api_key.as_ref().map(|_| REDACTED))
            .field("mail_from", &self.mail_from)
            .field("mail_to", &self.mail_to)
            .finish()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
