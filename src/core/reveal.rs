//! Scroll-triggered reveal of a section's children
//!
//! A section is revealed once, when it first crosses the visibility
//! threshold. Every target element then waits for its own `data-delay`,
//! gets the animating class, and after the configured duration swaps it for
//! the finished class. All timers are measured from the same trigger
//! instant, so the reveal is staggered but parallel.
//!
//! The browser side (`ui::reveal`) only queries the DOM and applies the
//! class changes computed here.

use crate::core::visibility::{DEFAULT_ROOT_MARGIN, DEFAULT_THRESHOLD, ObserverOptions};

/// Marker set on a section while its observer is registered
pub const ARMED_ATTRIBUTE: &str = "data-reveal-armed";

#[derive(Debug, Clone, PartialEq)]
pub struct RevealConfig {
    /// Selector of the section root
    pub section_selector: String,
    /// Class carried by every element to reveal
    pub target_class: String,
    pub animating_class: String,
    pub finished_class: String,
    /// Per-element delay attribute, in milliseconds
    pub delay_attribute: String,
    pub duration_ms: u32,
    pub threshold: f64,
    pub root_margin: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            section_selector: "[data-reveal-section]".to_string(),
            target_class: "reveal-item".to_string(),
            animating_class: "is-animating".to_string(),
            finished_class: "is-finished".to_string(),
            delay_attribute: "data-delay".to_string(),
            duration_ms: 600,
            threshold: DEFAULT_THRESHOLD,
            root_margin: DEFAULT_ROOT_MARGIN.to_string(),
        }
    }
}

impl RevealConfig {
    pub fn for_section(selector: impl Into<String>) -> Self {
        Self {
            section_selector: selector.into(),
            ..Self::default()
        }
    }

    pub fn observer_options(&self) -> ObserverOptions {
        ObserverOptions::new(self.threshold, self.root_margin.clone())
    }

    /// Selector matching the targets inside the section
    pub fn target_selector(&self) -> String {
        format!(".{}", self.target_class)
    }
}

/// One element to reveal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RevealTarget {
    pub delay_ms: u32,
}

impl RevealTarget {
    pub fn new(delay_ms: u32) -> Self {
        Self { delay_ms }
    }

    /// Build from the raw delay attribute; missing or malformed means 0
    pub fn from_attr(value: Option<&str>) -> Self {
        let delay_ms = value
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite() && *v > 0.0)
            .map(|v| v.min(u32::MAX as f64) as u32)
            .unwrap_or(0);
        Self { delay_ms }
    }
}

/// Why setup did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoSection,
    NoTargets,
    AlreadyFinished,
    AlreadyArmed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupDecision {
    Arm,
    Skip(SkipReason),
}

/// Guard run before registering an observer
///
/// Safe to call on every page transition: finished or armed sections are
/// skipped, as are pages without the section.
pub fn decide_setup(
    section_found: bool,
    target_count: usize,
    first_target_finished: bool,
    armed: bool,
) -> SetupDecision {
    if !section_found {
        SetupDecision::Skip(SkipReason::NoSection)
    } else if target_count == 0 {
        SetupDecision::Skip(SkipReason::NoTargets)
    } else if first_target_finished {
        SetupDecision::Skip(SkipReason::AlreadyFinished)
    } else if armed {
        SetupDecision::Skip(SkipReason::AlreadyArmed)
    } else {
        SetupDecision::Arm
    }
}

/// Where an element is in its reveal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementPhase {
    Pending,
    Animating,
    Finished,
}

impl ElementPhase {
    /// Reveal classes the element carries in this phase
    pub fn classes<'a>(&self, config: &'a RevealConfig) -> Vec<&'a str> {
        match self {
            ElementPhase::Pending => Vec::new(),
            ElementPhase::Animating => vec![config.animating_class.as_str()],
            ElementPhase::Finished => vec![config.finished_class.as_str()],
        }
    }
}

/// Phase of one target `elapsed_ms` after the trigger
pub fn phase_at(elapsed_ms: u64, target: RevealTarget, config: &RevealConfig) -> ElementPhase {
    let start = u64::from(target.delay_ms);
    let end = start + u64::from(config.duration_ms);
    if elapsed_ms < start {
        ElementPhase::Pending
    } else if elapsed_ms < end {
        ElementPhase::Animating
    } else {
        ElementPhase::Finished
    }
}

/// Phases of all targets `elapsed_ms` after the trigger
pub fn frame(elapsed_ms: u64, targets: &[RevealTarget], config: &RevealConfig) -> Vec<ElementPhase> {
    targets
        .iter()
        .map(|target| phase_at(elapsed_ms, *target, config))
        .collect()
}

/// Class mutation scheduled relative to the trigger instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassChange {
    pub at_ms: u64,
    pub target: usize,
    pub phase: ElementPhase,
}

/// Timers to arm when the section triggers, sorted by time
pub fn schedule(targets: &[RevealTarget], config: &RevealConfig) -> Vec<ClassChange> {
    let mut changes: Vec<ClassChange> = targets
        .iter()
        .enumerate()
        .flat_map(|(index, target)| {
            let start = u64::from(target.delay_ms);
            [
                ClassChange {
                    at_ms: start,
                    target: index,
                    phase: ElementPhase::Animating,
                },
                ClassChange {
                    at_ms: start + u64::from(config.duration_ms),
                    target: index,
                    phase: ElementPhase::Finished,
                },
            ]
        })
        .collect();
    changes.sort_by_key(|change| (change.at_ms, change.target));
    changes
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum SectionState {
    #[default]
    Idle,
    Armed,
    Triggered,
}

/// Lifecycle of one section: `Idle → Armed → Triggered`
#[derive(Debug, Clone, Default)]
pub struct SectionReveal {
    state: SectionState,
    targets: Vec<RevealTarget>,
}

impl SectionReveal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register targets. Returns false if already armed or triggered.
    pub fn arm(&mut self, targets: Vec<RevealTarget>) -> bool {
        if self.state != SectionState::Idle || targets.is_empty() {
            return false;
        }
        self.targets = targets;
        self.state = SectionState::Armed;
        true
    }

    /// First qualifying crossing. Hands out the schedule exactly once.
    pub fn trigger(&mut self, config: &RevealConfig) -> Option<Vec<ClassChange>> {
        if self.state != SectionState::Armed {
            return None;
        }
        self.state = SectionState::Triggered;
        Some(schedule(&self.targets, config))
    }

    pub fn is_armed(&self) -> bool {
        self.state == SectionState::Armed
    }

    pub fn is_triggered(&self) -> bool {
        self.state == SectionState::Triggered
    }

    pub fn targets(&self) -> &[RevealTarget] {
        &self.targets
    }
}
