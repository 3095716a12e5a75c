//! Assertions over an observed sheet snapshot.

use partial_core::PositionState;
use serde::{Deserialize, Serialize};

/// List offsets closer than this compare equal
const LIST_OFFSET_EPSILON: f32 = 1e-3;

/// What a headless run can observe about the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SheetSnapshot {
    pub offset: f32,
    pub state: PositionState,
    pub list_content_offset: f32,
    pub settling: bool,
}

/// Assertion result with structured failure details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssertionResult {
    Passed,
    Failed { code: String, message: String },
}

impl AssertionResult {
    fn failed(code: &str, message: String) -> Self {
        AssertionResult::Failed {
            code: code.to_string(),
            message,
        }
    }
}

pub fn evaluate_assert_state(expected: PositionState, snapshot: &SheetSnapshot) -> AssertionResult {
    if snapshot.state == expected {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "state_mismatch",
            format!(
                "expected state {expected}, got {} at offset {}",
                snapshot.state, snapshot.offset
            ),
        )
    }
}

pub fn evaluate_assert_offset(
    expected: f32,
    tolerance: f32,
    snapshot: &SheetSnapshot,
) -> AssertionResult {
    let diff = (snapshot.offset - expected).abs();
    if diff <= tolerance.abs() {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "offset_mismatch",
            format!(
                "expected offset {expected} (±{tolerance}), got {}",
                snapshot.offset
            ),
        )
    }
}

pub fn evaluate_assert_list_offset(expected: f32, snapshot: &SheetSnapshot) -> AssertionResult {
    if (snapshot.list_content_offset - expected).abs() <= LIST_OFFSET_EPSILON {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "list_offset_mismatch",
            format!(
                "expected list content offset {expected}, got {}",
                snapshot.list_content_offset
            ),
        )
    }
}
