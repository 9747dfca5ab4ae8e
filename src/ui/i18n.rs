//! Locale context

use leptos::prelude::*;

use crate::core::i18n::{Locale, t};

pub fn provide_locale(locale: Locale) {
    provide_context(locale);
}

/// Current locale, English when none was provided
pub fn use_locale() -> Locale {
    use_context::<Locale>().unwrap_or_default()
}

/// Translate `key` for the current locale
pub fn use_translate() -> impl Fn(&'static str) -> String + Copy + 'static {
    let locale = use_locale();
    move |key| t(locale, key).to_string()
}
