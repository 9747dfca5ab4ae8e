//! DOM adapter for scroll-triggered reveals
//!
//! `setup_scroll_reveal` finds a section, registers a one-shot
//! `IntersectionObserver` on it and, on the first qualifying crossing, arms
//! one timer per class change computed by `core::reveal::schedule`.
//! Calling it again for a section that is armed or finished does nothing,
//! so it can run on every client-side navigation.

use leptos::prelude::*;

use crate::core::reveal::RevealConfig;

#[cfg(not(feature = "ssr"))]
pub use browser::{RevealHandle, setup_scroll_reveal};

#[cfg(not(feature = "ssr"))]
mod browser {
    use std::cell::RefCell;
    use std::rc::Rc;

    use gloo_timers::callback::Timeout;
    use leptos::wasm_bindgen::{JsCast, JsValue, closure::Closure};

    use crate::core::reveal::{
        ARMED_ATTRIBUTE, ElementPhase, RevealConfig, RevealTarget, SectionReveal, SetupDecision,
        decide_setup,
    };
    use crate::core::visibility::VisibilityTrigger;

    type ObserverCallback = Closure<dyn FnMut(js_sys::Array, web_sys::IntersectionObserver)>;

    /// Registered reveal; `disconnect` tears it down
    pub struct RevealHandle {
        section: web_sys::Element,
        observer: web_sys::IntersectionObserver,
        state: Rc<RefCell<SectionReveal>>,
        timers: Rc<RefCell<Vec<Timeout>>>,
        _callback: ObserverCallback,
    }

    impl RevealHandle {
        /// Whether the section is still part of the document
        pub fn is_attached(&self) -> bool {
            self.section.is_connected()
        }

        /// Stop observing and cancel pending class changes
        pub fn disconnect(self) {
            self.observer.disconnect();
            // Dropping a Timeout cancels it
            self.timers.borrow_mut().clear();
            if self.state.borrow().is_armed() {
                let _ = self.section.remove_attribute(ARMED_ATTRIBUTE);
            }
        }
    }

    fn apply_phase(element: &web_sys::Element, phase: ElementPhase, config: &RevealConfig) {
        let classes = element.class_list();
        match phase {
            ElementPhase::Pending => {}
            ElementPhase::Animating => {
                let _ = classes.add_1(&config.animating_class);
            }
            ElementPhase::Finished => {
                let _ = classes.add_1(&config.finished_class);
                let _ = classes.remove_1(&config.animating_class);
            }
        }
    }

    fn collect_targets(section: &web_sys::Element, selector: &str) -> Vec<web_sys::Element> {
        let Ok(nodes) = section.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
            .collect()
    }

    /// Arm the reveal for `config.section_selector`
    ///
    /// Returns `None` when there is nothing to do: no section on this page,
    /// no targets, or already armed or finished. Without
    /// `IntersectionObserver` the targets are marked finished right away.
    pub fn setup_scroll_reveal(config: &RevealConfig) -> Option<RevealHandle> {
        let document = web_sys::window()?.document()?;
        let section = document
            .query_selector(&config.section_selector)
            .ok()
            .flatten();

        let targets = section
            .as_ref()
            .map(|s| collect_targets(s, &config.target_selector()))
            .unwrap_or_default();
        let first_finished = targets
            .first()
            .is_some_and(|el| el.class_list().contains(&config.finished_class));
        let armed = section
            .as_ref()
            .is_some_and(|s| s.has_attribute(ARMED_ATTRIBUTE));

        if let SetupDecision::Skip(_) =
            decide_setup(section.is_some(), targets.len(), first_finished, armed)
        {
            return None;
        }
        let section = section?;

        let reveal_targets = targets
            .iter()
            .map(|el| RevealTarget::from_attr(el.get_attribute(&config.delay_attribute).as_deref()))
            .collect();
        let state = Rc::new(RefCell::new(SectionReveal::new()));
        state.borrow_mut().arm(reveal_targets);

        let timers = Rc::new(RefCell::new(Vec::new()));
        let mut trigger = VisibilityTrigger::one_shot(config.observer_options());

        let reveal_elements = targets.clone();
        let callback: ObserverCallback = Closure::new({
            let config = config.clone();
            let state = Rc::clone(&state);
            let timers = Rc::clone(&timers);
            move |entries: js_sys::Array, observer: web_sys::IntersectionObserver| {
                let crossed = entries.iter().any(|entry| {
                    let entry: web_sys::IntersectionObserverEntry = entry.unchecked_into();
                    trigger.record(entry.intersection_ratio(), entry.is_intersecting())
                        == crate::core::visibility::VisibilityChange::BecameVisible
                });
                if !crossed {
                    return;
                }
                observer.disconnect();

                let Some(changes) = state.borrow_mut().trigger(&config) else {
                    return;
                };
                let mut timers = timers.borrow_mut();
                for change in changes {
                    let Some(element) = targets.get(change.target).cloned() else {
                        continue;
                    };
                    let config = config.clone();
                    let delay = u32::try_from(change.at_ms).unwrap_or(u32::MAX);
                    timers.push(Timeout::new(delay, move || {
                        apply_phase(&element, change.phase, &config);
                    }));
                }
            }
        });

        let init = web_sys::IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(config.threshold));
        init.set_root_margin(&config.root_margin);
        let Ok(observer) =
            web_sys::IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
        else {
            // No observer support: show the content without animating
            for element in &reveal_elements {
                apply_phase(element, ElementPhase::Finished, config);
            }
            return None;
        };

        let _ = section.set_attribute(ARMED_ATTRIBUTE, "");
        observer.observe(&section);

        Some(RevealHandle {
            section,
            observer,
            state,
            timers,
            _callback: callback,
        })
    }
}

/// Arms scroll reveals for `sections` after every navigation
///
/// Place once near the router root. Handles of sections that left the page
/// are dropped on the next navigation; the rest on unmount.
#[component]
pub fn ScrollReveal(
    /// One config per revealed section
    sections: Vec<RevealConfig>,
) -> impl IntoView {
    #[cfg(not(feature = "ssr"))]
    {
        let location = leptos_router::hooks::use_location();
        let handles = StoredValue::new_local(Vec::<RevealHandle>::new());

        Effect::new(move |_| {
            let _ = location.pathname.get();
            let sections = sections.clone();
            // Wait for the new route's DOM
            request_animation_frame(move || {
                handles.try_update_value(|handles| {
                    let (attached, detached): (Vec<_>, Vec<_>) =
                        handles.drain(..).partition(RevealHandle::is_attached);
                    detached.into_iter().for_each(RevealHandle::disconnect);
                    *handles = attached;
                    handles.extend(sections.iter().filter_map(setup_scroll_reveal));
                });
            });
        });

        on_cleanup(move || {
            handles.try_update_value(|handles| {
                handles.drain(..).for_each(RevealHandle::disconnect);
            });
        });
    }

    #[cfg(feature = "ssr")]
    {
        let _ = sections;
    }
}
