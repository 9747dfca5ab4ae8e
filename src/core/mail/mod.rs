//! Lead notification delivery
//!
//! This module provides:
//! - The `POST /api/send-email` endpoint used by the lead-capture form
//! - Message composition from a `ProjectRequest`
//! - Delivery through a mail provider's HTTP API, or to the log in development

pub mod api;
pub mod mailer;

pub use api::{MailApiState, send_email_router};
pub use mailer::{HttpMailer, MailError, Mailer, OutgoingMessage, compose};
