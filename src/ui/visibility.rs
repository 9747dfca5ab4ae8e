//! Reactive viewport visibility for a section
//!
//! `use_visibility` observes the element behind a `NodeRef` with an
//! `IntersectionObserver` and exposes the `VisibilityTrigger` state as a
//! signal. The observer is disconnected when a one-shot trigger fires and
//! on cleanup.

use leptos::html::Section;
use leptos::prelude::*;

use crate::core::visibility::ObserverOptions;
#[cfg(not(feature = "ssr"))]
use crate::core::visibility::VisibilityTrigger;

/// Observe `node_ref` and report whether it is on screen
///
/// Without `IntersectionObserver` support the section is treated as
/// visible right away, so counters still reach their final values.
pub fn use_visibility(
    node_ref: NodeRef<Section>,
    options: ObserverOptions,
    one_shot: bool,
) -> ReadSignal<bool> {
    let (visible, set_visible) = signal(false);

    #[cfg(not(feature = "ssr"))]
    {
        use crate::core::visibility::VisibilityChange;
        use leptos::wasm_bindgen::{JsCast, JsValue, closure::Closure};

        type ObserverCallback = Closure<dyn FnMut(js_sys::Array, web_sys::IntersectionObserver)>;

        let trigger = StoredValue::new(if one_shot {
            VisibilityTrigger::one_shot(options)
        } else {
            VisibilityTrigger::repeating(options)
        });
        let observer = StoredValue::new_local(None::<(web_sys::IntersectionObserver, ObserverCallback)>);

        Effect::new(move |_| {
            let Some(element) = node_ref.get() else {
                return;
            };
            if observer.with_value(|o| o.is_some()) {
                return;
            }

            let callback: ObserverCallback = Closure::new(
                move |entries: js_sys::Array, observer: web_sys::IntersectionObserver| {
                    for entry in entries.iter() {
                        let entry: web_sys::IntersectionObserverEntry = entry.unchecked_into();
                        let change = trigger.try_update_value(|t| {
                            t.record(entry.intersection_ratio(), entry.is_intersecting())
                        });
                        match change {
                            Some(VisibilityChange::BecameVisible) => set_visible.set(true),
                            Some(VisibilityChange::BecameHidden) => set_visible.set(false),
                            _ => {}
                        }
                    }
                    if trigger.try_with_value(|t| t.should_disconnect()).unwrap_or(true) {
                        observer.disconnect();
                    }
                },
            );

            let (threshold, root_margin) =
                trigger.with_value(|t| (t.options().threshold, t.options().root_margin.clone()));
            let init = web_sys::IntersectionObserverInit::new();
            init.set_threshold(&JsValue::from_f64(threshold));
            init.set_root_margin(&root_margin);

            match web_sys::IntersectionObserver::new_with_options(
                callback.as_ref().unchecked_ref(),
                &init,
            ) {
                Ok(intersection_observer) => {
                    intersection_observer.observe(&element);
                    observer.set_value(Some((intersection_observer, callback)));
                }
                Err(_) => set_visible.set(true),
            }
        });

        on_cleanup(move || {
            trigger.try_update_value(|t| t.disconnect());
            observer.try_update_value(|o| {
                if let Some((intersection_observer, _callback)) = o.take() {
                    intersection_observer.disconnect();
                }
            });
        });
    }

    #[cfg(feature = "ssr")]
    {
        let _ = (node_ref, options, one_shot, set_visible);
    }

    visible
}
