//! Core state machines of the site's interactive pieces
//!
//! Nothing in here depends on the DOM, so every module is unit-tested
//! natively. The `ui` module adapts them to Leptos and the browser.

#[cfg(feature = "ssr")]
pub mod config;
pub mod counter;
pub mod i18n;
#[cfg(feature = "ssr")]
pub mod mail;
pub mod modal;
pub mod reveal;
pub mod submission;
pub mod visibility;

pub use counter::{AnimationHandle, CounterAnimation, CounterTemplate};
pub use modal::{LEAD_CAPTURE_MODAL, ModalId, ModalManager, ScrollLock, ScrollLockCounter};
pub use reveal::{RevealConfig, RevealTarget, SectionReveal};
pub use submission::{
    AttemptToken, AutoCloseToken, ProjectRequest, SendEmailResponse, SubmissionPhase, SubmissionState,
    SubmitOutcome,
};
pub use visibility::{ObserverOptions, VisibilityChange, VisibilityTrigger};
