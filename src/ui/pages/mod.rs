//! Application pages
//!
//! - Home page (landing)
//! - Not found page

mod home;
mod not_found;

pub use home::{HomePage, reveal_sections};
pub use not_found::NotFoundPage;
