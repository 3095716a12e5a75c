//! Scenario definition for headless sheet runs.
//!
//! A scenario is a JSON document with a list of steps, each tagged by `type`:
//!
//! ```json
//! {
//!   "steps": [
//!     { "type": "drag_start", "y": 700 },
//!     { "type": "drag_move", "y": 400 },
//!     { "type": "drag_end", "velocity": 0.0 },
//!     { "type": "settle" },
//!     { "type": "assert_state", "state": "mid" }
//!   ]
//! }
//! ```

use anyhow::{Context, Result};
use partial_core::PositionState;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Sequence of scenario steps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadlessScenario {
    pub steps: Vec<ScenarioStep>,
}

impl HeadlessScenario {
    pub fn from_json(input: &str) -> Result<Self> {
        serde_json::from_str(input).context("invalid scenario JSON")
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("failed to load {}", path.display()))
    }
}

fn default_tolerance() -> f32 {
    0.5
}

/// One scripted input or check.
///
/// Sheet drag velocities are on the offset axis (positive collapses); list
/// velocities use the list's convention (positive moves content up).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    DragStart {
        y: f32,
    },
    DragMove {
        y: f32,
    },
    DragEnd {
        velocity: f32,
    },
    ListDragBegin,
    ListScroll {
        content_offset: f32,
        translation: f32,
    },
    ListDragEnd {
        velocity: f32,
    },
    Resize {
        height: f32,
    },
    Tick {
        frames: u32,
    },
    Wait {
        ms: u64,
    },
    /// Run frames until the settle animation finishes
    Settle,
    AssertState {
        state: PositionState,
    },
    AssertOffset {
        value: f32,
        #[serde(default = "default_tolerance")]
        tolerance: f32,
    },
    AssertListOffset {
        value: f32,
    },
}

impl ScenarioStep {
    /// Step name as written in scenario files
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioStep::DragStart { .. } => "drag_start",
            ScenarioStep::DragMove { .. } => "drag_move",
            ScenarioStep::DragEnd { .. } => "drag_end",
            ScenarioStep::ListDragBegin => "list_drag_begin",
            ScenarioStep::ListScroll { .. } => "list_scroll",
            ScenarioStep::ListDragEnd { .. } => "list_drag_end",
            ScenarioStep::Resize { .. } => "resize",
            ScenarioStep::Tick { .. } => "tick",
            ScenarioStep::Wait { .. } => "wait",
            ScenarioStep::Settle => "settle",
            ScenarioStep::AssertState { .. } => "assert_state",
            ScenarioStep::AssertOffset { .. } => "assert_offset",
            ScenarioStep::AssertListOffset { .. } => "assert_list_offset",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_steps() {
        let scenario = HeadlessScenario::from_json(
            r#"{
                "steps": [
                    { "type": "list_drag_begin" },
                    { "type": "list_scroll", "content_offset": 4.0, "translation": -4.0 },
                    { "type": "settle" },
                    { "type": "assert_state", "state": "progressing" },
                    { "type": "assert_offset", "value": 120 }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(scenario.steps.len(), 5);
        assert_eq!(scenario.steps[0], ScenarioStep::ListDragBegin);
        assert_eq!(
            scenario.steps[3],
            ScenarioStep::AssertState {
                state: PositionState::Progressing
            }
        );
        assert_eq!(
            scenario.steps[4],
            ScenarioStep::AssertOffset {
                value: 120.0,
                tolerance: 0.5
            }
        );
        assert_eq!(scenario.steps[1].name(), "list_scroll");
    }

    #[test]
    fn test_rejects_unknown_step() {
        let err = HeadlessScenario::from_json(r#"{ "steps": [{ "type": "fling" }] }"#);
        assert!(err.is_err());
    }
}
