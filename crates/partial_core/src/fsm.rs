//! State machine helpers
//!
//! Interaction phases are small enums that know their own transitions via
//! [`StateTransitions`]. [`StateMachine`] holds the current state and logs
//! every transition.

use crate::events::EventType;

/// A state type that maps events to successor states
pub trait StateTransitions: Clone + Copy + PartialEq + Eq + std::fmt::Debug + 'static {
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: EventType) -> Option<Self>;
}

/// A state machine instance over a `StateTransitions` type
pub struct StateMachine<S: StateTransitions> {
    current_state: S,
}

impl<S: StateTransitions> StateMachine<S> {
    pub fn new(initial_state: S) -> Self {
        Self {
            current_state: initial_state,
        }
    }

    /// Get the current state
    pub fn current_state(&self) -> S {
        self.current_state
    }

    /// Send an event, returning the (possibly unchanged) current state
    pub fn send(&mut self, event: EventType) -> S {
        let from = self.current_state;
        let Some(to) = from.on_event(event) else {
            tracing::trace!(?from, event, "no transition");
            return from;
        };

        self.current_state = to;
        tracing::trace!(?from, event, ?to, "transition");
        to
    }
}

impl<S: StateTransitions> std::fmt::Debug for StateMachine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateMachine")
            .field("current_state", &self.current_state)
            .finish()
    }
}
