//! Brochure - marketing site for a web design studio
//!
//! Server-rendered Leptos pages hydrated in the browser, with:
//! - a modal stack that locks page scroll and closes on Escape
//! - a lead capture form posting to `/api/send-email`
//! - scroll-triggered section reveals and count-up statistics

#![recursion_limit = "4096"]

pub mod app;
pub mod core;
pub mod ui;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
