//! Home page
//!
//! Brochure landing page:
//! - Hero with the "start a project" call to action
//! - Stats band whose numbers count up when scrolled into view
//! - Services and process sections revealed on scroll
//! - Closing call to action

use leptos::html::Section;
use leptos::prelude::*;
use leptos_meta::{Meta, Title};

use crate::core::reveal::RevealConfig;
use crate::core::visibility::ObserverOptions;
use crate::ui::counter::CountUp;
use crate::ui::icon::{Icon, icons};
use crate::ui::lead_capture::StartProjectButton;
use crate::ui::visibility::use_visibility;

/// Sections of this page revealed on scroll
pub fn reveal_sections() -> Vec<RevealConfig> {
    vec![
        RevealConfig::for_section("#services"),
        RevealConfig {
            duration_ms: 800,
            ..RevealConfig::for_section("#process")
        },
    ]
}

/// Home page component
#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <Title text="Northwind Studio - Websites that ship"/>
        <Meta
            name="description"
            content="Northwind Studio designs and builds fast marketing sites, product pages and design systems."
        />
        <RevealStyles/>

        <main class="min-h-screen bg-theme-primary overflow-x-hidden">
            <Hero/>
            <Stats/>
            <Services/>
            <Process/>
            <CallToAction/>
        </main>
    }
}

#[component]
fn Hero() -> impl IntoView {
    view! {
        <section class="min-h-[80vh] flex items-center justify-center px-4 pt-16">
            <div class="text-center max-w-3xl mx-auto">
                <h1 class="text-5xl sm:text-6xl font-bold text-theme-primary mb-6 tracking-tight">
                    "Websites that ship, and keep shipping"
                </h1>
                <p class="text-xl text-theme-secondary mb-10 leading-relaxed">
                    "We design and build marketing sites, product pages and design systems for teams that move fast."
                </p>
                <div class="flex flex-col sm:flex-row items-center justify-center gap-4">
                    <StartProjectButton/>
                    <a href="#services" class="landing-btn-secondary">"See what we do"</a>
                </div>
            </div>
        </section>
    }
}

#[component]
fn Stats() -> impl IntoView {
    let section = NodeRef::<Section>::new();
    let visible = use_visibility(section, ObserverOptions::default(), true);

    let stats = [
        ("247 clients", "served since 2013", 0),
        ("12 years", "of shipping", 150),
        ("98% retention", "year over year", 300),
        ("1500+ launches", "and counting", 450),
    ];

    view! {
        <section node_ref=section id="stats" class="py-16 px-4 bg-theme-secondary/10">
            <div class="max-w-5xl mx-auto grid grid-cols-2 md:grid-cols-4 gap-8 text-center">
                {stats
                    .into_iter()
                    .map(|(text, caption, delay_ms)| {
                        view! {
                            <div class="glass-card rounded-xl p-6">
                                <p class="text-3xl font-bold text-theme-primary">
                                    <CountUp text=text visible=visible delay_ms=delay_ms/>
                                </p>
                                <p class="mt-2 text-sm text-theme-secondary">{caption}</p>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </section>
    }
}

#[component]
fn Services() -> impl IntoView {
    let services = [
        (icons::LAYOUT, "Marketing sites", "Fast static pages your team can edit without a developer.", 0),
        (icons::SPARKLES, "Design systems", "Components, tokens and a style guide that stay in sync.", 150),
        (icons::ROCKET, "Launch support", "Performance budgets, analytics and a calm launch day.", 300),
    ];

    view! {
        <section id="services" class="py-20 px-4">
            <div class="max-w-6xl mx-auto">
                <h2 class="reveal-item text-3xl sm:text-4xl font-bold text-theme-primary text-center mb-12">
                    "What we do"
                </h2>
                <div class="grid md:grid-cols-3 gap-8">
                    {services
                        .into_iter()
                        .map(|(icon, title, description, delay)| {
                            view! {
                                <div class="reveal-item glass-card rounded-xl p-6" data-delay=delay.to_string()>
                                    <Icon name=icon class="w-8 h-8 mb-4"/>
                                    <h3 class="text-xl font-semibold text-theme-primary mb-2">{title}</h3>
                                    <p class="text-theme-secondary">{description}</p>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
        </section>
    }
}

#[component]
fn Process() -> impl IntoView {
    let steps = [
        ("01", "Discover", "A workshop to pin down goals, audience and scope."),
        ("02", "Design", "Wireframes, then high-fidelity pages in your brand."),
        ("03", "Build", "Accessible, fast pages with a content workflow."),
        ("04", "Launch", "Go live, measure, and iterate together."),
    ];

    view! {
        <section id="process" class="py-20 px-4 bg-theme-secondary/10">
            <div class="max-w-4xl mx-auto space-y-6">
                {steps
                    .into_iter()
                    .enumerate()
                    .map(|(i, (number, title, description))| {
                        view! {
                            <div class="reveal-item flex gap-6 items-start" data-delay=(i * 200).to_string()>
                                <span class="text-4xl font-bold text-accent-primary tabular-nums">{number}</span>
                                <div>
                                    <h3 class="text-xl font-semibold text-theme-primary">{title}</h3>
                                    <p class="text-theme-secondary">{description}</p>
                                </div>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </section>
    }
}

#[component]
fn CallToAction() -> impl IntoView {
    view! {
        <section class="py-24 px-4 text-center">
            <h2 class="text-3xl font-bold text-theme-primary mb-4">"Have a project in mind?"</h2>
            <p class="text-lg text-theme-secondary mb-8">
                "Tell us about it. We answer every request within one business day."
            </p>
            <StartProjectButton/>
        </section>
    }
}

/// Classes toggled by the scroll reveal
#[component]
fn RevealStyles() -> impl IntoView {
    view! {
        <style>
            r#"
            .reveal-item {
                opacity: 0;
                transform: translateY(24px);
                transition: opacity 600ms ease-out, transform 600ms ease-out;
            }

            .reveal-item.is-animating,
            .reveal-item.is-finished {
                opacity: 1;
                transform: none;
            }

            @media (prefers-reduced-motion: reduce) {
                .reveal-item {
                    opacity: 1;
                    transform: none;
                    transition: none;
                }
            }
            "#
        </style>
        <noscript>
            <style>".reveal-item { opacity: 1; transform: none; }"</style>
        </noscript>
    }
}
