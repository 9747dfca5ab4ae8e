//! Count-up animation for numeric displays
//!
//! A counter goes from 0 to its target in [`COUNTER_STEPS`] equal steps
//! spread over [`COUNTER_DURATION_MS`]. Step `n` shows
//! `floor(target * n / 60)`, and the last step shows the target exactly.
//!
//! Runs are identified by an [`AnimationHandle`]. Cancelling (visibility
//! lost, component torn down) invalidates the handle, so ticks from a timer
//! that is still in flight produce nothing. The last shown value is kept.

/// Number of increments in one run
pub const COUNTER_STEPS: u32 = 60;

/// Length of one run
pub const COUNTER_DURATION_MS: u32 = 2000;

/// Interval between two ticks
pub const fn step_interval_ms() -> u32 {
    COUNTER_DURATION_MS / COUNTER_STEPS
}

/// Displayed value after `step` ticks
pub fn value_at_step(target: u64, step: u32) -> u64 {
    if step >= COUNTER_STEPS {
        return target;
    }
    let scaled = u128::from(target) * u128::from(step) / u128::from(COUNTER_STEPS);
    // scaled <= target, so this never truncates
    scaled as u64
}

/// Token of one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationHandle(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterAnimation {
    target: u64,
    current: u64,
    step: u32,
    delay_ms: u32,
    generation: u64,
    running: bool,
}

impl CounterAnimation {
    pub fn new(target: u64) -> Self {
        Self::with_delay(target, 0)
    }

    /// Counter that waits `delay_ms` after becoming visible before counting
    pub fn with_delay(target: u64, delay_ms: u32) -> Self {
        Self {
            target,
            current: 0,
            step: 0,
            delay_ms,
            generation: 0,
            running: false,
        }
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn current(&self) -> u64 {
        self.current
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_complete(&self) -> bool {
        self.step >= COUNTER_STEPS
    }

    /// Begin (or resume) a run if the display is visible
    ///
    /// The caller waits `delay_ms` before the first tick. A resumed run
    /// continues from the step it stopped at.
    pub fn start(&mut self, visible: bool) -> Option<AnimationHandle> {
        if !visible || self.is_complete() {
            return None;
        }
        self.generation += 1;
        self.running = true;
        Some(AnimationHandle(self.generation))
    }

    /// Advance one step. `None` when the handle is stale or the run is over.
    pub fn tick(&mut self, handle: AnimationHandle) -> Option<u64> {
        if !self.running || handle.0 != self.generation {
            return None;
        }
        self.step += 1;
        self.current = value_at_step(self.target, self.step);
        if self.is_complete() {
            self.running = false;
        }
        Some(self.current)
    }

    /// Stop the current run, keeping the value on screen
    pub fn cancel(&mut self) {
        self.running = false;
        self.generation += 1;
    }
}

/// A display string split around its first run of digits
///
/// `"247 clients"` becomes `{prefix: "", value: Some(247), suffix: " clients"}`
/// and renders as `"0 clients"`, `"4 clients"`, … `"247 clients"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterTemplate {
    pub prefix: String,
    pub value: Option<u64>,
    pub suffix: String,
}

impl CounterTemplate {
    pub fn parse(text: &str) -> Self {
        let Some(start) = text.find(|c: char| c.is_ascii_digit()) else {
            return Self::verbatim(text);
        };
        let end = text[start..]
            .find(|c: char| !c.is_ascii_digit())
            .map_or(text.len(), |offset| start + offset);

        match text[start..end].parse::<u64>() {
            Ok(value) => Self {
                prefix: text[..start].to_string(),
                value: Some(value),
                suffix: text[end..].to_string(),
            },
            // Too many digits to animate
            Err(_) => Self::verbatim(text),
        }
    }

    fn verbatim(text: &str) -> Self {
        Self {
            prefix: text.to_string(),
            value: None,
            suffix: String::new(),
        }
    }

    pub fn target(&self) -> u64 {
        self.value.unwrap_or(0)
    }

    pub fn is_animated(&self) -> bool {
        self.value.is_some()
    }

    pub fn render(&self, current: u64) -> String {
        match self.value {
            Some(_) => format!("{}{}{}", self.prefix, current, self.suffix),
            None => self.prefix.clone(),
        }
    }

    /// Final text, identical to the parsed input
    pub fn render_final(&self) -> String {
        self.render(self.target())
    }
}
