use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    components::{Route, Router, Routes},
    path,
};

use crate::core::i18n::Locale;
use crate::ui::pages::{HomePage, NotFoundPage, reveal_sections};
use crate::ui::{LeadCaptureModal, ScrollReveal, provide_locale, provide_modal_context};

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone() />
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    // Server and client must agree on the first render
    provide_locale(Locale::En);

    // One modal stack for the whole site; owns the body scroll lock
    provide_modal_context();

    view! {
        // id=leptos means cargo-leptos will hot-reload this stylesheet
        <Stylesheet id="leptos" href="/pkg/brochure.css"/>
        <Title text="Northwind Studio"/>

        <Router>
            <Routes fallback=|| view! { <NotFoundPage/> }>
                <Route path=path!("/") view=HomePage/>
            </Routes>
            <ScrollReveal sections=reveal_sections()/>
            <LeadCaptureModal/>
        </Router>
    }
}
