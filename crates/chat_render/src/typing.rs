//! TypingAnimator - Time-driven incremental reveal of a fixed text
//!
//! A run reveals prefixes of its text one character at a time, one per
//! interval of `1 / rate`, then signals completion exactly once. Runs are keyed
//! by `(text, rate)`: asking to animate a different key cancels the current run
//! and starts over, while the same key leaves it alone. The run owns its
//! timer, so dropping the run (restart, [`TypingAnimator::cancel`] or dropping
//! the animator) releases it and nothing is emitted afterwards.

use std::fmt;
use std::num::NonZeroU32;
use std::time::Duration;

use thiserror::Error;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tracing::trace;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RevealRateError {
    #[error("reveal rate must be at least one character per second")]
    Zero,
    #[error("reveal rate must not exceed {max} characters per second, got {got}")]
    TooFast { max: u32, got: u32 },
}

/// Characters revealed per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RevealRate(NonZeroU32);

impl RevealRate {
    /// Fastest rate whose interval is still at least one nanosecond.
    pub const MAX: u32 = 1_000_000_000;

    pub fn new(chars_per_second: u32) -> Result<Self, RevealRateError> {
        if chars_per_second > Self::MAX {
            return Err(RevealRateError::TooFast {
                max: Self::MAX,
                got: chars_per_second,
            });
        }
        NonZeroU32::new(chars_per_second)
            .map(Self)
            .ok_or(RevealRateError::Zero)
    }

    pub fn chars_per_second(self) -> u32 {
        self.0.get()
    }

    /// Time between two reveals.
    pub fn interval(self) -> Duration {
        Duration::from_secs(1) / self.0.get()
    }
}

impl fmt::Display for RevealRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} chars/s", self.chars_per_second())
    }
}

/// One step of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypingFrame {
    /// The text revealed so far (a prefix one character longer than the last).
    Reveal(String),
    /// The whole text is shown; emitted once per run.
    Complete,
}

struct TypingRun {
    text: String,
    rate: RevealRate,
    /// Byte offset of the end of each character.
    ends: Vec<usize>,
    revealed: usize,
    ticker: Option<Interval>,
    completed: bool,
}

impl TypingRun {
    fn new(text: String, rate: RevealRate) -> Self {
        let ends = text
            .char_indices()
            .map(|(start, c)| start + c.len_utf8())
            .collect();
        Self {
            text,
            rate,
            ends,
            revealed: 0,
            ticker: None,
            completed: false,
        }
    }

    fn displayed(&self) -> &str {
        match self.revealed {
            0 => "",
            n => &self.text[..self.ends[n - 1]],
        }
    }

    fn is_fully_revealed(&self) -> bool {
        self.revealed == self.ends.len()
    }

    async fn tick(&mut self) {
        let period = self.rate.interval();
        let ticker = self.ticker.get_or_insert_with(|| {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker
        });
        ticker.tick().await;
    }
}

/// Drives at most one reveal run at a time.
#[derive(Default)]
pub struct TypingAnimator {
    run: Option<TypingRun>,
    on_complete: Option<Box<dyn FnMut() + Send>>,
}

impl fmt::Debug for TypingAnimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypingAnimator")
            .field("text", &self.text())
            .field("displayed", &self.displayed())
            .field("complete", &self.is_complete())
            .finish()
    }
}

impl TypingAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Animate `text` at `rate`.
    ///
    /// Returns `true` if a new run started. If the current run already has the
    /// same text and rate (running or complete) it is left untouched.
    pub fn animate(&mut self, text: &str, rate: RevealRate) -> bool {
        if let Some(run) = &self.run {
            if run.text == text && run.rate == rate {
                return false;
            }
            trace!("Restarting reveal ({} -> {} chars)", run.ends.len(), text.chars().count());
        }
        self.run = Some(TypingRun::new(text.to_string(), rate));
        true
    }

    /// Replace the completion callback. The current run is not affected.
    pub fn set_on_complete<F>(&mut self, callback: F)
    where
        F: FnMut() + Send + 'static,
    {
        self.on_complete = Some(Box::new(callback));
    }

    /// Stop the current run and release its timer.
    pub fn cancel(&mut self) {
        self.run = None;
    }

    /// Wait for the next frame of the current run.
    ///
    /// Returns `None` when there is no run or it has already completed.
    /// Cancel safe: dropping the future before it resolves loses no frame.
    pub async fn next(&mut self) -> Option<TypingFrame> {
        let run = self.run.as_mut()?;
        if run.completed {
            return None;
        }

        if !run.is_fully_revealed() {
            run.tick().await;
            run.revealed += 1;
            return Some(TypingFrame::Reveal(run.displayed().to_string()));
        }

        run.completed = true;
        run.ticker = None;
        if let Some(callback) = self.on_complete.as_mut() {
            callback();
        }
        Some(TypingFrame::Complete)
    }

    /// Text of the current run, if any.
    pub fn text(&self) -> Option<&str> {
        self.run.as_ref().map(|run| run.text.as_str())
    }

    /// The prefix revealed so far.
    pub fn displayed(&self) -> &str {
        self.run.as_ref().map(TypingRun::displayed).unwrap_or("")
    }

    /// A run exists and has not signalled completion.
    pub fn is_active(&self) -> bool {
        self.run.as_ref().is_some_and(|run| !run.completed)
    }

    pub fn is_complete(&self) -> bool {
        self.run.as_ref().is_some_and(|run| run.completed)
    }

    /// Whether the run currently holds a timer.
    pub fn holds_timer(&self) -> bool {
        self.run.as_ref().is_some_and(|run| run.ticker.is_some())
    }
}
