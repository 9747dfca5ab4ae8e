pub mod common;
pub mod counter;
pub mod i18n;
pub mod icon;
pub mod lead_capture;
pub mod modal;
pub mod pages;
pub mod reveal;
pub mod visibility;

pub use counter::{CountUp, use_animated_counter};
pub use i18n::{provide_locale, use_translate};
pub use icon::{Icon, icons};
pub use lead_capture::{LeadCaptureModal, StartProjectButton};
pub use modal::{Modal, ModalContext, provide_modal_context, use_modal_context};
pub use reveal::ScrollReveal;
pub use visibility::use_visibility;
