//! Inline banners for form feedback

use crate::ui::icon::{Icon, icons};
use leptos::prelude::*;

/// Error banner, shown while the signal holds a message
#[component]
pub fn ErrorMessage(
    #[prop(into)]
    error: Signal<Option<String>>,
) -> impl IntoView {
    view! {
        <Show when=move || error.get().is_some()>
            <div
                class="flex items-start gap-2 rounded-lg border border-red-500/30 bg-red-500/10 p-3 text-sm text-red-600 dark:text-red-300"
                role="alert"
            >
                <Icon name=icons::ALERT_CIRCLE class="w-4 h-4 mt-0.5 shrink-0"/>
                <span>{move || error.get().unwrap_or_default()}</span>
            </div>
        </Show>
    }
}

/// Success banner, shown while the signal holds a message
#[component]
pub fn SuccessMessage(
    #[prop(into)]
    message: Signal<Option<String>>,
) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some()>
            <div
                class="flex items-start gap-2 rounded-lg border border-green-500/30 bg-green-500/10 p-3 text-sm text-green-700 dark:text-green-300"
                role="status"
            >
                <Icon name=icons::CHECK class="w-4 h-4 mt-0.5 shrink-0"/>
                <span>{move || message.get().unwrap_or_default()}</span>
            </div>
        </Show>
    }
}
