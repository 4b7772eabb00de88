//! State transitions - FSM transition logic
//!
//! Implements the state machine that handles event-driven state transitions.

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, trace};

use super::events::SubmissionEvent;
use super::states::SubmissionState;

/// Error type for invalid state transitions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Invalid transition from {from:?} with event {event}")]
    InvalidTransition {
        from: SubmissionState,
        event: &'static str,
    },
}

/// Represents a state transition result.
#[derive(Debug, Clone)]
pub struct StateTransition {
    /// The state before the transition.
    pub from: SubmissionState,
    /// The state after the transition.
    pub to: SubmissionState,
    /// The event that triggered the transition.
    pub event: SubmissionEvent,
    /// Whether the state actually changed.
    pub changed: bool,
    pub at: DateTime<Utc>,
}

/// State machine for managing submission state transitions.
#[derive(Debug, Clone)]
pub struct StateMachine {
    /// Current state.
    current_state: SubmissionState,
    /// Transition history (limited).
    history: Vec<StateTransition>,
    /// Max history entries to keep.
    max_history: usize,
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl StateMachine {
    /// Create a new state machine in Idle state.
    pub fn new() -> Self {
        Self::with_state(SubmissionState::Idle)
    }

    /// Create a state machine with a specific initial state.
    pub fn with_state(state: SubmissionState) -> Self {
        Self {
            current_state: state,
            history: Vec::new(),
            max_history: 50,
        }
    }

    /// Get the current state.
    pub fn state(&self) -> &SubmissionState {
        &self.current_state
    }

    /// Get the transition history.
    pub fn history(&self) -> &[StateTransition] {
        &self.history
    }

    /// Handle an event and transition to a new state.
    ///
    /// Events that do not apply to the current state leave it unchanged and
    /// are recorded with `changed == false`.
    pub fn handle_event(&mut self, event: SubmissionEvent) -> StateTransition {
        let old_state = self.current_state.clone();
        let new_state = self
            .compute_next_state(&old_state, &event)
            .unwrap_or_else(|| old_state.clone());
        let changed = old_state != new_state;

        if changed {
            debug!(
                "Submission state: {} -> {} on {}",
                old_state.description(),
                new_state.description(),
                event.name()
            );
        } else {
            trace!("Ignored {} while {}", event.name(), old_state.description());
        }

        self.current_state = new_state.clone();

        let transition = StateTransition {
            from: old_state,
            to: new_state,
            event,
            changed,
            at: Utc::now(),
        };

        // Add to history
        self.history.push(transition.clone());
        if self.history.len() > self.max_history {
            self.history.remove(0);
        }

        transition
    }

    /// Handle an event, failing if it does not apply to the current state.
    pub fn try_handle_event(
        &mut self,
        event: SubmissionEvent,
    ) -> Result<StateTransition, TransitionError> {
        if self
            .compute_next_state(&self.current_state, &event)
            .is_none()
        {
            debug!(
                "Rejected {} for {} while {}",
                event.name(),
                event.placeholder(),
                self.current_state.description()
            );
            return Err(TransitionError::InvalidTransition {
                from: self.current_state.clone(),
                event: event.name(),
            });
        }
        Ok(self.handle_event(event))
    }

    /// Compute the next state given current state and event.
    fn compute_next_state(
        &self,
        state: &SubmissionState,
        event: &SubmissionEvent,
    ) -> Option<SubmissionState> {
        use SubmissionEvent::*;
        use SubmissionState::*;

        match (state, event) {
            (Idle, QuestionSubmitted { placeholder }) => Some(Submitting {
                placeholder: *placeholder,
            }),

            (Submitting { placeholder }, AnswerReceived { placeholder: settled })
            | (Submitting { placeholder }, RequestFailed { placeholder: settled, .. })
                if placeholder == settled =>
            {
                Some(Idle)
            }

            _ => None,
        }
    }

    /// Check if a transition is valid without executing it.
    pub fn can_transition(&self, event: &SubmissionEvent) -> bool {
        self.compute_next_state(&self.current_state, event).is_some()
    }
}
