//! Sheet position model
//!
//! A sheet rests at one of a few named checkpoints. Offsets are measured from
//! the container's top edge, so smaller offsets mean a more expanded sheet.
//! Checkpoints are stored ordered from most expanded to most collapsed.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{Result, SheetError};

/// Which checkpoint (if any) the sheet currently occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionState {
    /// Resting at the most expanded checkpoint
    Top,
    /// Resting at the intermediate checkpoint
    Mid,
    /// Resting at the most collapsed checkpoint
    Bottom,
    /// Between checkpoints: mid-drag or mid-settle
    #[default]
    Progressing,
}

impl PositionState {
    /// Whether this is a rest state (any named checkpoint)
    pub fn is_resting(&self) -> bool {
        !matches!(self, PositionState::Progressing)
    }

    /// Short lowercase name, as used in scenarios and logs
    pub fn name(&self) -> &'static str {
        match self {
            PositionState::Top => "top",
            PositionState::Mid => "mid",
            PositionState::Bottom => "bottom",
            PositionState::Progressing => "progressing",
        }
    }
}

impl std::fmt::Display for PositionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A named, fixed offset the sheet can rest at
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub state: PositionState,
    pub offset: f32,
}

impl Checkpoint {
    pub fn new(state: PositionState, offset: f32) -> Self {
        Self { state, offset }
    }
}

/// Ordered checkpoints resolved for one container height.
///
/// Immutable once built; a resize builds a new set.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckpointSet {
    checkpoints: SmallVec<[Checkpoint; 3]>,
}

impl CheckpointSet {
    /// Build a checkpoint set, rejecting anything the snap logic cannot use.
    ///
    /// Requires at least two checkpoints with finite, strictly increasing
    /// offsets and distinct rest states.
    pub fn new(checkpoints: impl IntoIterator<Item = Checkpoint>) -> Result<Self> {
        let checkpoints: SmallVec<[Checkpoint; 3]> = checkpoints.into_iter().collect();

        if checkpoints.len() < 2 {
            return Err(SheetError::InvalidCheckpoints(format!(
                "need at least 2 checkpoints, got {}",
                checkpoints.len()
            )));
        }

        for (i, checkpoint) in checkpoints.iter().enumerate() {
            if !checkpoint.offset.is_finite() {
                return Err(SheetError::InvalidCheckpoints(format!(
                    "checkpoint {} has non-finite offset {}",
                    checkpoint.state, checkpoint.offset
                )));
            }
            if !checkpoint.state.is_resting() {
                return Err(SheetError::InvalidCheckpoints(
                    "progressing is not a checkpoint".to_string(),
                ));
            }
            if checkpoints[..i].iter().any(|c| c.state == checkpoint.state) {
                return Err(SheetError::InvalidCheckpoints(format!(
                    "duplicate checkpoint {}",
                    checkpoint.state
                )));
            }
        }

        if let Some(pair) = checkpoints
            .windows(2)
            .find(|pair| pair[0].offset >= pair[1].offset)
        {
            return Err(SheetError::InvalidCheckpoints(format!(
                "offsets must increase from expanded to collapsed ({} at {} >= {} at {})",
                pair[0].state, pair[0].offset, pair[1].state, pair[1].offset
            )));
        }

        Ok(Self { checkpoints })
    }

    /// Offset of the most expanded checkpoint
    pub fn min(&self) -> f32 {
        self.checkpoints[0].offset
    }

    /// Offset of the most collapsed checkpoint
    pub fn max(&self) -> f32 {
        self.checkpoints[self.checkpoints.len() - 1].offset
    }

    /// Clamp an offset into `[min, max]`
    pub fn clamp(&self, offset: f32) -> f32 {
        offset.clamp(self.min(), self.max())
    }

    /// The checkpoint name if `offset` sits exactly on one, else `Progressing`
    pub fn state_for(&self, offset: f32) -> PositionState {
        self.checkpoints
            .iter()
            .find(|c| c.offset == offset)
            .map(|c| c.state)
            .unwrap_or(PositionState::Progressing)
    }

    /// Index of the checkpoint closest to `offset` (ties go to the lower index)
    pub fn nearest_index(&self, offset: f32) -> usize {
        // Never empty: `new` guarantees at least two entries.
        nearest_checkpoint_index(&self.offsets(), offset).unwrap_or(0)
    }

    /// Index of the checkpoint with the given rest state
    pub fn index_of(&self, state: PositionState) -> Option<usize> {
        self.checkpoints.iter().position(|c| c.state == state)
    }

    pub fn get(&self, index: usize) -> Option<&Checkpoint> {
        self.checkpoints.get(index)
    }

    pub fn last_index(&self) -> usize {
        self.checkpoints.len() - 1
    }

    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Checkpoint> {
        self.checkpoints.iter()
    }

    /// Raw offsets in order
    pub fn offsets(&self) -> SmallVec<[f32; 3]> {
        self.checkpoints.iter().map(|c| c.offset).collect()
    }
}

/// Index of the value with the minimum absolute distance to `offset`.
///
/// The first match wins on ties. Returns `None` for an empty slice.
pub fn nearest_checkpoint_index(values: &[f32], offset: f32) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, value) in values.iter().enumerate() {
        let distance = (value - offset).abs();
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((i, distance)),
        }
    }
    best.map(|(i, _)| i)
}
