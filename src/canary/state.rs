//! Run state definitions for tracking a canary invocation
//!
//! A run walks `Idle -> Validating -> (ParseFailed | Navigating ->
//! Classifying -> {Success | NavigationError | NoResponse | BadStatus})`.
//! There is no retry edge: every terminal state is reached after at most
//! one navigation.
use crate::canary::outcome::OutcomeKind;
use std::fmt;

/// Represents the current state of a canary run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RunState {
    // ===== Active States =====
    /// No run in progress
    #[default]
    Idle,

    /// Parsing the target URL
    Validating,

    /// Waiting on the page driver
    Navigating,

    /// Mapping the driver's answer to an outcome
    Classifying,

    // ===== Terminal States =====
    /// Target URL did not parse
    ParseFailed,

    /// Status in 200..=299
    Success,

    /// Driver raised during navigation
    NavigationError,

    /// Driver produced no response
    NoResponse,

    /// Status outside 200..=299
    BadStatus,
}

impl RunState {
    /// Returns true if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        !matches!(
            self,
            Self::Idle | Self::Validating | Self::Navigating | Self::Classifying
        )
    }

    /// Returns true if the state machine allows moving to `next`
    pub fn can_transition_to(&self, next: RunState) -> bool {
        match (self, next) {
            // Any state may start a fresh run
            (_, Self::Idle) => true,
            (Self::Idle, Self::Validating) => true,
            (Self::Validating, Self::ParseFailed | Self::Navigating) => true,
            (Self::Navigating, Self::Classifying) => true,
            (
                Self::Classifying,
                Self::Success | Self::NavigationError | Self::NoResponse | Self::BadStatus,
            ) => true,
            _ => false,
        }
    }

    /// Moves to `next`, logging the transition
    pub fn advance(&mut self, next: RunState) {
        debug_assert!(
            self.can_transition_to(next),
            "invalid run state transition: {} -> {}",
            self,
            next
        );
        tracing::debug!("Run state: {} -> {}", self, next);
        *self = next;
    }

    /// The terminal state a run ends in for a given outcome kind
    pub fn terminal_for(kind: OutcomeKind) -> Self {
        match kind {
            OutcomeKind::UrlParseError => Self::ParseFailed,
            OutcomeKind::NavigationError => Self::NavigationError,
            OutcomeKind::NoResponse => Self::NoResponse,
            OutcomeKind::BadStatus => Self::BadStatus,
            OutcomeKind::Success => Self::Success,
        }
    }

    /// Converts the run state to its string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Navigating => "navigating",
            Self::Classifying => "classifying",
            Self::ParseFailed => "parse_failed",
            Self::Success => "success",
            Self::NavigationError => "navigation_error",
            Self::NoResponse => "no_response",
            Self::BadStatus => "bad_status",
        }
    }

    /// Returns all possible run states
    pub fn all_states() -> Vec<Self> {
        vec![
            Self::Idle,
            Self::Validating,
            Self::Navigating,
            Self::Classifying,
            Self::ParseFailed,
            Self::Success,
            Self::NavigationError,
            Self::NoResponse,
            Self::BadStatus,
        ]
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
