//! Copy lookup for user-facing strings
//!
//! `t(locale, key)` falls back to the default locale, then to the key itself.

/// Locales with a copy table; the site currently ships English only
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
}

const EN: &[(&str, &str)] = &[
    ("lead.title", "Start a project"),
    ("lead.subtitle", "Tell us what you are building and we will get back to you within a day."),
    ("lead.name", "Your name"),
    ("lead.email", "Email"),
    ("lead.project", "Project name"),
    ("lead.budget", "Budget"),
    ("lead.budget_placeholder", "e.g. 10k-25k"),
    ("lead.description", "What should we build?"),
    ("lead.submit", "Send request"),
    ("lead.submitting", "Sending..."),
    ("lead.success", "Thanks! We received your request and will be in touch soon."),
    ("lead.error_generic", "Something went wrong. Please try again."),
    ("lead.open", "Start a project"),
    ("modal.close", "Close"),
];

fn table(locale: Locale) -> &'static [(&'static str, &'static str)] {
    match locale {
        Locale::En => EN,
    }
}

fn lookup(locale: Locale, key: &str) -> Option<&'static str> {
    table(locale)
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
}

pub fn t<'a>(locale: Locale, key: &'a str) -> &'a str {
    lookup(locale, key)
        .or_else(|| lookup(Locale::default(), key))
        .unwrap_or(key)
}
