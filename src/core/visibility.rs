//! Viewport visibility triggers
//!
//! Wraps the samples an intersection observer produces into a boolean
//! "is visible" signal. One-shot triggers latch on the first qualifying
//! crossing and ask to be disconnected; repeating triggers follow the
//! latest sample.

/// Fraction of a section that must be on screen by default
pub const DEFAULT_THRESHOLD: f64 = 0.3;

/// Shrinks the effective viewport by 10% from the top
pub const DEFAULT_ROOT_MARGIN: &str = "-10% 0px 0px 0px";

/// Options handed to the observer
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverOptions {
    pub threshold: f64,
    pub root_margin: String,
}

impl ObserverOptions {
    pub fn new(threshold: f64, root_margin: impl Into<String>) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            root_margin: root_margin.into(),
        }
    }
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD, DEFAULT_ROOT_MARGIN)
    }
}

/// Result of feeding one sample into a trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityChange {
    Unchanged,
    BecameVisible,
    BecameHidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    OneShot,
    Repeating,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityTrigger {
    options: ObserverOptions,
    mode: Mode,
    is_visible: bool,
    connected: bool,
}

impl VisibilityTrigger {
    /// Latches visible forever after the first crossing
    pub fn one_shot(options: ObserverOptions) -> Self {
        Self::with_mode(options, Mode::OneShot)
    }

    /// Reports every crossing, in and out
    pub fn repeating(options: ObserverOptions) -> Self {
        Self::with_mode(options, Mode::Repeating)
    }

    fn with_mode(options: ObserverOptions, mode: Mode) -> Self {
        Self {
            options,
            mode,
            is_visible: false,
            connected: true,
        }
    }

    pub fn options(&self) -> &ObserverOptions {
        &self.options
    }

    pub fn is_visible(&self) -> bool {
        self.is_visible
    }

    pub fn is_one_shot(&self) -> bool {
        self.mode == Mode::OneShot
    }

    /// Feed one observer sample
    pub fn record(&mut self, intersection_ratio: f64, is_intersecting: bool) -> VisibilityChange {
        if !self.connected {
            return VisibilityChange::Unchanged;
        }

        let qualifies = is_intersecting && intersection_ratio >= self.options.threshold;

        match (self.is_visible, qualifies) {
            (false, true) => {
                self.is_visible = true;
                if self.mode == Mode::OneShot {
                    self.connected = false;
                }
                VisibilityChange::BecameVisible
            }
            (true, false) if self.mode == Mode::Repeating => {
                self.is_visible = false;
                VisibilityChange::BecameHidden
            }
            _ => VisibilityChange::Unchanged,
        }
    }

    /// True once a one-shot trigger has fired or after [`Self::disconnect`]
    pub fn should_disconnect(&self) -> bool {
        !self.connected
    }

    /// Teardown; further samples are ignored
    pub fn disconnect(&mut self) {
        self.connected = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ObserverOptions::default();
        assert_eq!(options.threshold, 0.3);
        assert_eq!(options.root_margin, "-10% 0px 0px 0px");
    }

    #[test]
    fn test_threshold_clamped() {
        assert_eq!(ObserverOptions::new(1.5, "0px").threshold, 1.0);
        assert_eq!(ObserverOptions::new(-0.2, "0px").threshold, 0.0);
    }

    #[test]
    fn test_one_shot_latches() {
        let mut trigger = VisibilityTrigger::one_shot(ObserverOptions::default());

        assert_eq!(trigger.record(0.1, true), VisibilityChange::Unchanged);
        assert!(!trigger.is_visible());

        assert_eq!(trigger.record(0.5, true), VisibilityChange::BecameVisible);
        assert!(trigger.is_visible());
        assert!(trigger.should_disconnect());

        // Scrolling away never reverts a one-shot trigger
        assert_eq!(trigger.record(0.0, false), VisibilityChange::Unchanged);
        assert!(trigger.is_visible());
    }

    #[test]
    fn test_repeating_follows_samples() {
        let mut trigger = VisibilityTrigger::repeating(ObserverOptions::new(0.5, "0px"));

        assert_eq!(trigger.record(0.6, true), VisibilityChange::BecameVisible);
        assert_eq!(trigger.record(0.9, true), VisibilityChange::Unchanged);
        assert_eq!(trigger.record(0.2, true), VisibilityChange::BecameHidden);
        assert!(!trigger.is_visible());
        assert_eq!(trigger.record(0.7, true), VisibilityChange::BecameVisible);
        assert!(!trigger.should_disconnect());
    }

    #[test]
    fn test_not_intersecting_never_qualifies() {
        let mut trigger = VisibilityTrigger::one_shot(ObserverOptions::new(0.0, "0px"));
        assert_eq!(trigger.record(0.0, false), VisibilityChange::Unchanged);
        assert_eq!(trigger.record(0.0, true), VisibilityChange::BecameVisible);
    }

    #[test]
    fn test_disconnect_ignores_samples() {
        let mut trigger = VisibilityTrigger::repeating(ObserverOptions::default());
        trigger.disconnect();
        assert_eq!(trigger.record(1.0, true), VisibilityChange::Unchanged);
        assert!(!trigger.is_visible());
    }
}
