// file: src/pipeline/progress.rs
// description: phase status reporting and per-turn timing statistics
// reference: uses indicatif spinners for the searching and summarizing phases

use crate::error::AgentError;
use crate::utils::logging::{format_error, format_step};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Searching,
    Summarizing,
}

impl Phase {
    pub const COUNT: usize = 2;

    pub fn step(&self) -> usize {
        match self {
            Phase::Searching => 1,
            Phase::Summarizing => 2,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Phase::Searching => "Searching the web...",
            Phase::Summarizing => "Summarizing results...",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TurnStats {
    pub search_results: usize,
    pub search_duration: Duration,
    pub summarize_duration: Duration,
}

impl TurnStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_duration(&self) -> Duration {
        self.search_duration + self.summarize_duration
    }

    pub fn total_secs(&self) -> f64 {
        self.total_duration().as_secs_f64()
    }
}

/// Receives phase transitions while a turn runs.
pub trait ProgressObserver: Send + Sync {
    fn phase_started(&self, phase: Phase);

    fn phase_finished(&self, phase: Phase);

    fn phase_failed(&self, phase: Phase, error: &AgentError);
}

pub struct SilentProgress;

impl ProgressObserver for SilentProgress {
    fn phase_started(&self, _phase: Phase) {}

    fn phase_finished(&self, _phase: Phase) {}

    fn phase_failed(&self, _phase: Phase, _error: &AgentError) {}
}

/// Terminal spinner shown on stderr for the active phase.
pub struct SpinnerProgress {
    colored: bool,
    hidden: bool,
    active: Mutex<Option<ProgressBar>>,
}

impl SpinnerProgress {
    pub fn new() -> Self {
        Self::with_color(true)
    }

    pub fn with_color(colored: bool) -> Self {
        Self {
            colored,
            hidden: false,
            active: Mutex::new(None),
        }
    }

    /// Spinner that never draws, for non-interactive output.
    pub fn hidden() -> Self {
        Self {
            colored: false,
            hidden: true,
            active: Mutex::new(None),
        }
    }

    fn take_active(&self) -> Option<ProgressBar> {
        match self.active.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        }
    }
}

impl Default for SpinnerProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressObserver for SpinnerProgress {
    fn phase_started(&self, phase: Phase) {
        if let Some(previous) = self.take_active() {
            previous.finish_and_clear();
        }

        let bar = create_spinner(self.colored, self.hidden);
        bar.set_message(format_step(phase.step(), Phase::COUNT, phase.label()));
        bar.enable_steady_tick(Duration::from_millis(100));

        match self.active.lock() {
            Ok(mut guard) => *guard = Some(bar),
            Err(poisoned) => *poisoned.into_inner() = Some(bar),
        }
    }

    fn phase_finished(&self, _phase: Phase) {
        if let Some(bar) = self.take_active() {
            bar.finish_and_clear();
        }
    }

    fn phase_failed(&self, phase: Phase, error: &AgentError) {
        let message = match phase {
            Phase::Searching => format!("Search error: {}", error),
            Phase::Summarizing => format!("Summarization error: {}", error),
        };

        match self.take_active() {
            Some(bar) => {
                bar.finish_and_clear();
                if !self.hidden {
                    eprintln!("{}", format_error(&message));
                }
            }
            None if !self.hidden => eprintln!("{}", format_error(&message)),
            None => {}
        }
    }
}

impl Drop for SpinnerProgress {
    fn drop(&mut self) {
        if let Some(bar) = self.take_active() {
            bar.finish_and_clear();
        }
    }
}

fn create_spinner(colored: bool, hidden: bool) -> ProgressBar {
    let bar = if hidden {
        ProgressBar::with_draw_target(None, ProgressDrawTarget::hidden())
    } else {
        ProgressBar::new_spinner()
    };

    let template = if colored {
        "{spinner:.green} {msg} {elapsed:.dim}"
    } else {
        "{spinner} {msg} {elapsed}"
    };

    bar.set_style(
        ProgressStyle::default_spinner()
            .template(template)
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar
}
