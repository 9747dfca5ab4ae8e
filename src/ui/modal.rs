//! Modal context and dialog shell
//!
//! `provide_modal_context()` creates one `ModalManager` for the app and
//! keeps two browser side effects in sync with it:
//! - `overflow: hidden` on `<body>` while any dialog is open
//! - a window keydown listener for Escape, attached only while a dialog is open

use leptos::prelude::*;

use crate::core::modal::{ModalManager, ScrollLock, ScrollLockCounter};
use crate::ui::icon::{Icon, icons};

#[cfg(not(feature = "ssr"))]
use leptos::wasm_bindgen::JsCast;

/// Scroll lock backed by the body's `overflow` style
#[derive(Debug, Default, Clone, Copy)]
pub struct BodyScrollLock;

impl ScrollLock for BodyScrollLock {
    fn lock(&mut self) {
        set_body_overflow(Some("hidden"));
    }

    fn unlock(&mut self) {
        set_body_overflow(None);
    }
}

fn set_body_overflow(value: Option<&str>) {
    #[cfg(not(feature = "ssr"))]
    {
        let body = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.body());
        if let Some(body) = body {
            let style = body.style();
            let result = match value {
                Some(value) => style.set_property("overflow", value),
                None => style.remove_property("overflow").map(|_| ()),
            };
            if let Err(err) = result {
                leptos::logging::warn!("Failed to update body overflow: {:?}", err);
            }
        }
    }
    #[cfg(feature = "ssr")]
    {
        let _ = value;
    }
}

/// Reactive handle on the app's modal manager
#[derive(Clone, Copy)]
pub struct ModalContext {
    manager: RwSignal<ModalManager<BodyScrollLock>>,
}

impl ModalContext {
    pub fn open(&self, id: &str) {
        self.manager.try_update(|m| m.open(id));
    }

    pub fn close(&self, id: &str) {
        self.manager.try_update(|m| m.close(id));
    }

    pub fn toggle(&self, id: &str) {
        self.manager.try_update(|m| m.toggle(id));
    }

    pub fn close_all(&self) {
        self.manager.try_update(|m| m.close_all());
    }

    /// Tracked read
    pub fn is_open(&self, id: &str) -> bool {
        self.manager.with(|m| m.is_open(id))
    }

    /// Tracked read
    pub fn has_open_modals(&self) -> bool {
        self.manager.with(|m| m.has_open_modals())
    }

    pub fn is_open_signal(&self, id: &'static str) -> Signal<bool> {
        let ctx = *self;
        Signal::derive(move || ctx.is_open(id))
    }
}

/// Provide modal context to the component tree
pub fn provide_modal_context() -> ModalContext {
    let lock = ScrollLockCounter::new(BodyScrollLock);
    let manager = RwSignal::new(ModalManager::new(lock));
    let ctx = ModalContext { manager };

    // Escape listener lives only while something is open
    #[cfg(not(feature = "ssr"))]
    {
        use leptos::ev::keydown;

        let listener = StoredValue::new_local(None::<WindowListenerHandle>);

        Effect::new(move |_| {
            let wants = manager.with(|m| m.wants_escape_listener());
            let attached = listener.with_value(Option::is_some);

            if wants && !attached {
                let handle = window_event_listener(keydown, move |ev| {
                    manager.try_update(|m| m.handle_key(&ev.key()));
                });
                listener.set_value(Some(handle));
            } else if !wants && attached {
                listener.update_value(|l| {
                    if let Some(handle) = l.take() {
                        handle.remove();
                    }
                });
            }
        });

        on_cleanup(move || {
            listener.update_value(|l| {
                if let Some(handle) = l.take() {
                    handle.remove();
                }
            });
        });
    }

    provide_context(ctx);
    ctx
}

/// Get modal context from the component tree
pub fn use_modal_context() -> ModalContext {
    expect_context::<ModalContext>()
}

/// Dialog shell registered under `id` in the modal context
#[component]
pub fn Modal(
    /// Identifier in the modal manager
    id: &'static str,
    /// Modal title
    title: String,
    /// Optional subtitle/description
    #[prop(optional)]
    subtitle: Option<String>,
    /// Modal content
    children: Children,
    /// Maximum width class (default: max-w-xl)
    #[prop(default = "max-w-xl")]
    max_width: &'static str,
    /// Whether clicking backdrop closes modal
    #[prop(default = true)]
    close_on_backdrop: bool,
    /// Label of the close button
    #[prop(default = "Close".to_string())]
    close_label: String,
) -> impl IntoView {
    let modals = use_modal_context();
    let is_open = modals.is_open_signal(id);
    let title_id = format!("{}-title", id);

    view! {
        <div
            class=move || {
                if is_open.get() {
                    "modal-backdrop fixed inset-0 z-50 flex items-center justify-center p-4 bg-black/50 backdrop-blur-sm transition-all duration-300"
                } else {
                    "modal-backdrop fixed inset-0 z-50 flex items-center justify-center p-4 bg-black/50 backdrop-blur-sm opacity-0 pointer-events-none transition-all duration-300"
                }
            }
            aria-hidden=move || (!is_open.get()).to_string()
            on:click=move |e| {
                if close_on_backdrop {
                    #[cfg(not(feature = "ssr"))]
                    {
                        let on_backdrop = e
                            .target()
                            .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
                            .is_some_and(|element| element.class_list().contains("modal-backdrop"));
                        if on_backdrop {
                            modals.close(id);
                        }
                    }
                    #[cfg(feature = "ssr")]
                    {
                        let _ = e;
                    }
                }
            }
        >
            <div
                class=format!("relative w-full {} glass-card rounded-2xl shadow-xl", max_width)
                role="dialog"
                aria-modal="true"
                aria-labelledby=title_id.clone()
            >
                <div class="flex items-start justify-between gap-4 px-6 pt-6">
                    <div>
                        <h3 id=title_id.clone() class="text-xl font-semibold text-theme-primary">{title}</h3>
                        {subtitle.map(|s| view! { <p class="mt-1 text-sm text-theme-secondary">{s}</p> })}
                    </div>
                    <button
                        type="button"
                        class="btn-icon"
                        on:click=move |_| modals.close(id)
                        title=close_label.clone()
                        aria-label=close_label
                    >
                        <Icon name=icons::X class="w-5 h-5"/>
                    </button>
                </div>

                <div class="p-6">
                    {children()}
                </div>
            </div>
        </div>
    }
}
