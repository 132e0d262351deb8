use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use utoipa::ToSchema;

use crate::domain::common::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ScanMode {
    /// Photo of a dish, classified then looked up.
    Food,
    /// Photo of a product label, read as free text.
    Label,
}

impl ScanMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanMode::Food => "food",
            ScanMode::Label => "label",
        }
    }
}

impl fmt::Display for ScanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ScanState {
    Idle,
    Classifying,
    LookingUpDetails,
    Extracting,
    Evaluating,
    NotFood,
    Done,
    Failed,
}

impl ScanState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanState::Idle => "idle",
            ScanState::Classifying => "classifying",
            ScanState::LookingUpDetails => "looking_up_details",
            ScanState::Extracting => "extracting",
            ScanState::Evaluating => "evaluating",
            ScanState::NotFood => "not_food",
            ScanState::Done => "done",
            ScanState::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ScanState::NotFood | ScanState::Done | ScanState::Failed)
    }
}

impl fmt::Display for ScanState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tracks the states visited by a single scan and rejects illegal moves.
#[derive(Debug, Clone)]
pub struct ScanStateMachine {
    mode: ScanMode,
    current: ScanState,
    visited: Vec<ScanState>,
}

impl ScanStateMachine {
    pub fn new(mode: ScanMode) -> Self {
        Self {
            mode,
            current: ScanState::Idle,
            visited: vec![ScanState::Idle],
        }
    }

    pub fn current(&self) -> ScanState {
        self.current
    }

    pub fn visited(&self) -> &[ScanState] {
        &self.visited
    }

    pub fn can_transition(&self, next: ScanState) -> bool {
        use ScanState::*;

        if next == Failed {
            return !self.current.is_terminal();
        }

        match self.mode {
            ScanMode::Food => matches!(
                (self.current, next),
                (Idle, Classifying)
                    | (Classifying, NotFood)
                    | (Classifying, LookingUpDetails)
                    | (LookingUpDetails, Evaluating)
                    | (LookingUpDetails, Done)
                    | (Evaluating, Done)
            ),
            ScanMode::Label => matches!(
                (self.current, next),
                (Idle, Extracting)
                    | (Extracting, Evaluating)
                    | (Extracting, Done)
                    | (Evaluating, Done)
            ),
        }
    }

    pub fn transition(&mut self, next: ScanState) -> Result<(), CoreError> {
        if !self.can_transition(next) {
            error!(
                mode = %self.mode,
                from = %self.current,
                to = %next,
                "illegal scan state transition"
            );
            return Err(CoreError::InternalServerError);
        }

        debug!(mode = %self.mode, from = %self.current, to = %next, "scan state transition");
        self.current = next;
        self.visited.push(next);
        Ok(())
    }

    /// Moves to `Failed` unless the scan already finished.
    pub fn fail(&mut self) {
        if !self.current.is_terminal() {
            let _ = self.transition(ScanState::Failed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn food_mode_happy_path() {
        let mut machine = ScanStateMachine::new(ScanMode::Food);
        for state in [
            ScanState::Classifying,
            ScanState::LookingUpDetails,
            ScanState::Evaluating,
            ScanState::Done,
        ] {
            machine.transition(state).unwrap();
        }

        assert_eq!(
            machine.visited(),
            [
                ScanState::Idle,
                ScanState::Classifying,
                ScanState::LookingUpDetails,
                ScanState::Evaluating,
                ScanState::Done,
            ]
        );
    }

    #[test]
    fn not_food_is_terminal() {
        let mut machine = ScanStateMachine::new(ScanMode::Food);
        machine.transition(ScanState::Classifying).unwrap();
        machine.transition(ScanState::NotFood).unwrap();

        assert!(machine.current().is_terminal());
        assert!(machine.transition(ScanState::Evaluating).is_err());
        assert!(machine.transition(ScanState::Failed).is_err());
    }

    #[test]
    fn label_mode_cannot_classify() {
        let mut machine = ScanStateMachine::new(ScanMode::Label);

        assert!(machine.transition(ScanState::Classifying).is_err());
        machine.transition(ScanState::Extracting).unwrap();
        machine.transition(ScanState::Done).unwrap();
        assert_eq!(machine.current(), ScanState::Done);
    }

    #[test]
    fn any_running_state_can_fail() {
        let mut machine = ScanStateMachine::new(ScanMode::Label);
        machine.transition(ScanState::Extracting).unwrap();
        machine.fail();

        assert_eq!(machine.current(), ScanState::Failed);
        machine.fail();
        assert_eq!(
            machine.visited(),
            [ScanState::Idle, ScanState::Extracting, ScanState::Failed]
        );
    }
}
