//! Dispatch loop state machine

use serde::{Deserialize, Serialize};

/// Phase of a dispatch run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchPhase {
    /// Waiting for the remote model's next turn
    AwaitingModel,
    /// Running the function calls of the latest turn
    ExecutingTool,
    /// The model answered without calling a tool
    Complete,
    /// The turn ceiling was reached first
    Aborted,
}

impl DispatchPhase {
    pub fn as_str(&self) -> &str {
        match self {
            DispatchPhase::AwaitingModel => "awaiting_model",
            DispatchPhase::ExecutingTool => "executing_tool",
            DispatchPhase::Complete => "complete",
            DispatchPhase::Aborted => "aborted",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, DispatchPhase::Complete | DispatchPhase::Aborted)
    }
}

impl std::fmt::Display for DispatchPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Turn accounting for one dispatch run.
///
/// A turn is one request to the model. At most `max_turns` are started;
/// asking for another one after that moves the run to `Aborted`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchState {
    phase: DispatchPhase,
    turns: usize,
    max_turns: usize,
}

impl DispatchState {
    pub fn new(max_turns: usize) -> Self {
        Self {
            phase: DispatchPhase::AwaitingModel,
            turns: 0,
            max_turns,
        }
    }

    pub fn phase(&self) -> DispatchPhase {
        self.phase
    }

    /// Model turns started so far
    pub fn turns(&self) -> usize {
        self.turns
    }

    pub fn max_turns(&self) -> usize {
        self.max_turns
    }

    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Start the next model turn; returns `false` (and aborts) once the
    /// ceiling is reached.
    pub fn begin_turn(&mut self) -> bool {
        if self.turns >= self.max_turns {
            self.phase = DispatchPhase::Aborted;
            return false;
        }
        self.turns += 1;
        true
    }

    /// Record the model's reply for the current turn.
    pub fn model_replied(&mut self, has_tool_calls: bool) {
        self.phase = if has_tool_calls {
            DispatchPhase::ExecutingTool
        } else {
            DispatchPhase::Complete
        };
    }

    /// All calls of the current turn have results; wait for the model again.
    pub fn tools_finished(&mut self) {
        self.phase = DispatchPhase::AwaitingModel;
    }
}

/// Terminal result of a dispatch run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The model finished; `output` is the text of the final turn
    Complete { output: String, turns: usize },
    /// The turn ceiling was hit; `last_output` is the last text seen, if any
    Aborted {
        turns: usize,
        last_output: Option<String>,
    },
}

impl DispatchOutcome {
    pub fn turns(&self) -> usize {
        match self {
            DispatchOutcome::Complete { turns, .. } | DispatchOutcome::Aborted { turns, .. } => {
                *turns
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, DispatchOutcome::Complete { .. })
    }

    pub fn phase(&self) -> DispatchPhase {
        match self {
            DispatchOutcome::Complete { .. } => DispatchPhase::Complete,
            DispatchOutcome::Aborted { .. } => DispatchPhase::Aborted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_on_first_turn() {
        let mut state = DispatchState::new(3);
        assert!(state.begin_turn());
        state.model_replied(false);
        assert_eq!(state.phase(), DispatchPhase::Complete);
        assert!(state.is_terminal());
        assert_eq!(state.turns(), 1);
    }

    #[test]
    fn test_tool_round_trip_returns_to_awaiting() {
        let mut state = DispatchState::new(3);
        assert!(state.begin_turn());
        state.model_replied(true);
        assert_eq!(state.phase(), DispatchPhase::ExecutingTool);
        state.tools_finished();
        assert_eq!(state.phase(), DispatchPhase::AwaitingModel);
        assert!(!state.is_terminal());
    }

    #[test]
    fn test_aborts_after_exactly_max_turns() {
        let mut state = DispatchState::new(2);
        for _ in 0..2 {
            assert!(state.begin_turn());
            state.model_replied(true);
            state.tools_finished();
        }
        assert!(!state.begin_turn());
        assert_eq!(state.phase(), DispatchPhase::Aborted);
        assert_eq!(state.turns(), 2);
    }

    #[test]
    fn test_zero_ceiling_aborts_immediately() {
        let mut state = DispatchState::new(0);
        assert!(!state.begin_turn());
        assert_eq!(state.turns(), 0);
    }

    #[test]
    fn test_outcome_accessors() {
        let done = DispatchOutcome::Complete {
            output: "ok".into(),
            turns: 4,
        };
        assert!(done.is_complete());
        assert_eq!(done.turns(), 4);
        assert_eq!(done.phase(), DispatchPhase::Complete);

        let aborted = DispatchOutcome::Aborted {
            turns: 50,
            last_output: None,
        };
        assert!(!aborted.is_complete());
        assert_eq!(aborted.phase().to_string(), "aborted");
    }
}
