//! Count-up numbers driven by visibility

use leptos::prelude::*;

use crate::core::counter::CounterTemplate;

/// Value counting from 0 to `target` once `visible` turns true
///
/// Waits `delay_ms` after becoming visible, then ticks every
/// `step_interval_ms()`. Losing visibility or unmounting cancels the pending
/// timers and keeps the last value.
pub fn use_animated_counter(target: u64, visible: Signal<bool>, delay_ms: u32) -> ReadSignal<u64> {
    let (value, set_value) = signal(0u64);

    #[cfg(not(feature = "ssr"))]
    {
        use crate::core::counter::{CounterAnimation, step_interval_ms};
        use std::time::Duration;

        #[derive(Default)]
        struct Timers {
            delay: Option<TimeoutHandle>,
            interval: Option<IntervalHandle>,
        }

        impl Timers {
            fn clear_interval(&mut self) {
                if let Some(interval) = self.interval.take() {
                    interval.clear();
                }
            }

            fn clear(&mut self) {
                if let Some(delay) = self.delay.take() {
                    delay.clear();
                }
                self.clear_interval();
            }
        }

        let counter = StoredValue::new(CounterAnimation::with_delay(target, delay_ms));
        let timers = StoredValue::new(Timers::default());

        let stop = move || {
            counter.try_update_value(|c| c.cancel());
            timers.try_update_value(|t| t.clear());
        };

        Effect::new(move |_| {
            if !visible.get() {
                stop();
                return;
            }
            let Some(handle) = counter.try_update_value(|c| c.start(true)).flatten() else {
                return;
            };

            let run = move || {
                let interval = set_interval_with_handle(
                    move || match counter.try_update_value(|c| c.tick(handle)).flatten() {
                        Some(next) => {
                            set_value.try_set(next);
                            if counter.try_with_value(|c| c.is_complete()).unwrap_or(true) {
                                timers.try_update_value(|t| t.clear_interval());
                            }
                        }
                        None => {
                            timers.try_update_value(|t| t.clear_interval());
                        }
                    },
                    Duration::from_millis(step_interval_ms().into()),
                )
                .ok();
                timers.try_update_value(|t| t.interval = interval);
            };

            match counter.with_value(|c| c.delay_ms()) {
                0 => run(),
                delay => {
                    let pending =
                        set_timeout_with_handle(run, Duration::from_millis(delay.into())).ok();
                    timers.update_value(|t| t.delay = pending);
                }
            }
        });

        on_cleanup(stop);
    }

    #[cfg(feature = "ssr")]
    {
        let _ = (target, visible, delay_ms, set_value);
    }

    value
}

/// Text whose first number counts up, e.g. "247 clients"
#[component]
pub fn CountUp(
    /// Final text
    #[prop(into)]
    text: String,
    /// Starts counting when true
    #[prop(into)]
    visible: Signal<bool>,
    /// Extra wait after becoming visible
    #[prop(default = 0)]
    delay_ms: u32,
) -> impl IntoView {
    let template = CounterTemplate::parse(&text);
    if !template.is_animated() {
        return view! { <span>{text}</span> }.into_any();
    }

    let value = use_animated_counter(template.target(), visible, delay_ms);

    view! {
        <span class="tabular-nums">{move || template.render(value.get())}</span>
    }
    .into_any()
}
