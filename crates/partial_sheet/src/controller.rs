//! Sheet controller
//!
//! Owns the authoritative sheet offset, the resolved checkpoints and the
//! `PositionState`, and decides where the sheet settles when a drag ends.
//!
//! Offsets grow downward: a smaller offset is a more expanded sheet. Release
//! velocities use the same axis, so a negative velocity is an expanding flick.
//!
//! # Interaction phases
//!
//! ```text
//! Idle ──DRAG_START──▶ Dragging ──DRAG_END──▶ Idle ──SETTLE_STARTED──▶ Settling
//!  ▲                      ▲                                              │
//!  │                      └──────────────────DRAG_START──────────────────┤
//!  └──────────────────────────────SETTLED────────────────────────────────┘
//! ```
//!
//! `SETTLED` ends a settle whether it completed or was interrupted.

use partial_core::events::event_types;
use partial_core::{
    nearest_checkpoint_index, CheckpointSet, EventType, PositionState, Result, SheetError,
    StateMachine, StateTransitions,
};

use crate::collaborators::{SettleAnimator, SettleRequest};
use crate::config::SheetConfig;

/// Where the sheet is in its gesture lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging,
    Settling,
}

impl StateTransitions for DragPhase {
    fn on_event(&self, event: EventType) -> Option<Self> {
        match (self, event) {
            // A new drag always wins, including over an in-flight settle
            (_, event_types::DRAG_START) => Some(DragPhase::Dragging),
            (DragPhase::Dragging, event_types::DRAG_END) => Some(DragPhase::Idle),
            (_, event_types::SETTLE_STARTED) => Some(DragPhase::Settling),
            (DragPhase::Settling, event_types::SETTLED) => Some(DragPhase::Idle),
            _ => None,
        }
    }
}

/// Values captured when a drag begins.
///
/// Every update is computed against these, never against the previous
/// frame, so rounding cannot accumulate over a long drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub start_offset: f32,
    pub start_location_y: f32,
}

/// Result of an offset mutation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetChange {
    pub offset: f32,
    pub previous_state: PositionState,
    pub state: PositionState,
}

impl OffsetChange {
    pub fn state_changed(&self) -> bool {
        self.previous_state != self.state
    }
}

/// Decision made by `settle`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettleOutcome {
    pub target_index: usize,
    pub target_offset: f32,
    pub target_state: PositionState,
    /// False when the sheet already sat on the target and finished at once
    pub animated: bool,
}

#[derive(Debug, Clone, Copy)]
struct ActiveSettle<H> {
    handle: H,
    target_index: usize,
    target_offset: f32,
}

/// Pick the checkpoint a release should settle on.
///
/// Slow releases (or releases while the list owned the gesture) go to the
/// nearest checkpoint. A flick faster than `threshold` moves past the nearest
/// checkpoint toward the next one in the flick's direction. Returns `None`
/// only for an empty checkpoint list.
pub fn snap_target_index(
    offsets: &[f32],
    offset: f32,
    velocity: f32,
    threshold: f32,
    list_scroll_active: bool,
) -> Option<usize> {
    let nearest = nearest_checkpoint_index(offsets, offset)?;

    if list_scroll_active || velocity.abs() <= threshold {
        return Some(nearest);
    }

    let last = offsets.len() - 1;
    let below_nearest = offsets[nearest] < offset;

    let target = if velocity < 0.0 {
        // Expanding
        if below_nearest {
            nearest
        } else {
            nearest.saturating_sub(1)
        }
    } else if below_nearest {
        (nearest + 1).min(last)
    } else {
        nearest
    };

    Some(target)
}

/// Sheet geometry and the settle state machine
pub struct SheetController<A: SettleAnimator> {
    config: SheetConfig,
    container_height: f32,
    checkpoints: CheckpointSet,
    offset: f32,
    position_state: PositionState,
    session: Option<DragSession>,
    active_settle: Option<ActiveSettle<A::Handle>>,
    list_scroll_active: bool,
    phase: StateMachine<DragPhase>,
    animator: A,
}

impl<A: SettleAnimator> SheetController<A> {
    /// Lay the sheet out in a container. Fails on invalid configuration.
    pub fn new(config: SheetConfig, container_height: f32, animator: A) -> Result<Self> {
        config.validate()?;
        let checkpoints = config.checkpoints(container_height)?;
        let offset = config.initial_offset(&checkpoints, container_height);
        let position_state = checkpoints.state_for(offset);

        tracing::debug!(
            container_height,
            offset,
            state = %position_state,
            checkpoints = checkpoints.len(),
            "sheet laid out"
        );

        Ok(Self {
            config,
            container_height,
            checkpoints,
            offset,
            position_state,
            session: None,
            active_settle: None,
            list_scroll_active: false,
            phase: StateMachine::new(DragPhase::Idle),
            animator,
        })
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn position_state(&self) -> PositionState {
        self.position_state
    }

    pub fn checkpoints(&self) -> &CheckpointSet {
        &self.checkpoints
    }

    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    pub fn container_height(&self) -> f32 {
        self.container_height
    }

    pub fn phase(&self) -> DragPhase {
        self.phase.current_state()
    }

    pub fn session(&self) -> Option<DragSession> {
        self.session
    }

    pub fn is_settling(&self) -> bool {
        self.active_settle.is_some()
    }

    /// Target offset of the in-flight settle, if any
    pub fn settle_target(&self) -> Option<f32> {
        self.active_settle.map(|s| s.target_offset)
    }

    pub fn animator(&self) -> &A {
        &self.animator
    }

    /// Mark whether the inner list owned the end of the current gesture.
    /// While set, releases never flick.
    pub fn set_list_scroll_active(&mut self, active: bool) {
        self.list_scroll_active = active;
    }

    /// Move the sheet by `delta` (positive expands).
    ///
    /// Clamps into the checkpoint range and recomputes the position state.
    pub fn update_offset(&mut self, delta: f32) -> OffsetChange {
        self.interrupt_settle();
        let change = self.set_offset(self.offset - delta, true);
        tracing::trace!(delta, offset = change.offset, state = %change.state, "offset updated");
        change
    }

    /// Begin a drag session at `location_y`.
    ///
    /// Cancels any settle in flight; the session starts from the offset the
    /// sheet is actually showing, not from the cancelled target.
    pub fn drag_started(&mut self, location_y: f32) -> OffsetChange {
        let interrupted = self.interrupt_settle();
        let change = self.set_offset(self.offset, true);

        self.session = Some(DragSession {
            start_offset: self.offset,
            start_location_y: location_y,
        });
        self.list_scroll_active = false;
        self.phase.send(event_types::DRAG_START);

        tracing::debug!(
            location_y,
            start_offset = self.offset,
            interrupted,
            "drag session started"
        );
        change
    }

    /// Follow the finger. Ignored when no session is active.
    pub fn drag_updated(&mut self, location_y: f32) -> Option<OffsetChange> {
        let Some(session) = self.session else {
            tracing::trace!(location_y, "drag update without session ignored");
            return None;
        };
        let offset = session.start_offset + (location_y - session.start_location_y);
        Some(self.set_offset(offset, true))
    }

    /// End the drag session and settle. Ignored when no session is active.
    pub fn drag_ended(&mut self, velocity: f32) -> Result<Option<SettleOutcome>> {
        if self.session.take().is_none() {
            tracing::trace!(velocity, "drag end without session ignored");
            return Ok(None);
        }
        self.phase.send(event_types::DRAG_END);
        self.settle(velocity).map(Some)
    }

    /// Choose a checkpoint for a release at `velocity` (points/ms) and start
    /// animating toward it.
    ///
    /// An animated settle reports `Progressing` from its first frame, even
    /// when it leaves a resting checkpoint. The checkpoint state is only
    /// recomputed once the animation completes, so intermediate frames never
    /// report a checkpoint the sheet merely passes through.
    pub fn settle(&mut self, velocity: f32) -> Result<SettleOutcome> {
        let offsets = self.checkpoints.offsets();
        let target_index = snap_target_index(
            &offsets,
            self.offset,
            velocity,
            self.config.flick_velocity_threshold,
            self.list_scroll_active,
        )
        .ok_or(SheetError::NoCheckpoints)?;

        let target_offset = offsets[target_index];
        let target_state = self
            .checkpoints
            .get(target_index)
            .map(|c| c.state)
            .ok_or(SheetError::NoCheckpoints)?;

        if let Some(active) = self.active_settle.take() {
            self.animator.cancel(active.handle);
        }

        tracing::debug!(
            offset = self.offset,
            velocity,
            target = target_offset,
            state = %target_state,
            list_scroll_active = self.list_scroll_active,
            "settle decided"
        );

        if target_offset == self.offset {
            self.finish_settle(target_offset);
            return Ok(SettleOutcome {
                target_index,
                target_offset,
                target_state,
                animated: false,
            });
        }

        let handle = self.animator.start(SettleRequest {
            from: self.offset,
            to: target_offset,
            velocity_hint: velocity,
            duration_hint: self.config.settle_duration(),
        });
        self.active_settle = Some(ActiveSettle {
            handle,
            target_index,
            target_offset,
        });
        self.position_state = PositionState::Progressing;
        self.phase.send(event_types::SETTLE_STARTED);

        Ok(SettleOutcome {
            target_index,
            target_offset,
            target_state,
            animated: true,
        })
    }

    /// Stop an in-flight settle where the sheet is currently drawn.
    ///
    /// Used when a drag begins somewhere the sheet does not own a session,
    /// such as the embedded list. Without a settle this only re-reports the
    /// current position.
    pub fn interrupt(&mut self) -> OffsetChange {
        self.interrupt_settle();
        self.set_offset(self.offset, true)
    }

    /// Advance the settle animation by `dt` seconds.
    ///
    /// Returns `None` when nothing is animating.
    pub fn tick(&mut self, dt: f32) -> Option<OffsetChange> {
        let active = self.active_settle?;

        match self.animator.advance(active.handle, dt) {
            Some(frame) if !frame.finished => Some(self.set_offset(frame.value, false)),
            _ => {
                self.active_settle = None;
                Some(self.finish_settle(active.target_offset))
            }
        }
    }

    /// Re-resolve checkpoints for a new container height.
    ///
    /// A sheet resting on (or settling toward) a checkpoint lands on the same
    /// checkpoint in the new layout; anywhere else keeps its relative position.
    pub fn resize(&mut self, container_height: f32) -> Result<OffsetChange> {
        let checkpoints = self.config.checkpoints(container_height)?;
        let previous_offset = self.offset;

        let old_min = self.checkpoints.min();
        let old_span = self.checkpoints.max() - old_min;
        let fraction = (self.offset - old_min) / old_span;
        let proportional = checkpoints.min() + fraction * (checkpoints.max() - checkpoints.min());

        let anchor = match self.active_settle.take() {
            Some(active) => {
                self.animator.cancel(active.handle);
                self.phase.send(event_types::SETTLED);
                Some(active.target_index)
            }
            None => self.checkpoints.index_of(self.position_state),
        };
        let offset = anchor
            .and_then(|i| checkpoints.get(i))
            .map(|c| c.offset)
            .unwrap_or(proportional);

        self.checkpoints = checkpoints;
        self.container_height = container_height;
        let change = self.set_offset(offset, true);

        if let Some(session) = self.session.as_mut() {
            session.start_offset += change.offset - previous_offset;
        }

        tracing::debug!(
            container_height,
            from = previous_offset,
            to = change.offset,
            state = %change.state,
            "sheet resized"
        );
        Ok(change)
    }

    fn set_offset(&mut self, offset: f32, recompute_state: bool) -> OffsetChange {
        let previous_state = self.position_state;
        self.offset = self.checkpoints.clamp(offset);
        if recompute_state {
            self.position_state = self.checkpoints.state_for(self.offset);
        }
        OffsetChange {
            offset: self.offset,
            previous_state,
            state: self.position_state,
        }
    }

    fn finish_settle(&mut self, target_offset: f32) -> OffsetChange {
        let change = self.set_offset(target_offset, true);
        self.phase.send(event_types::SETTLED);
        tracing::debug!(offset = change.offset, state = %change.state, "settle completed");
        change
    }

    /// Cancel an in-flight settle, leaving the sheet where it is
    fn interrupt_settle(&mut self) -> bool {
        let Some(active) = self.active_settle.take() else {
            return false;
        };
        let reported = self.animator.cancel(active.handle);
        self.phase.send(event_types::SETTLED);
        tracing::debug!(
            offset = self.offset,
            ?reported,
            target = active.target_offset,
            "settle interrupted"
        );
        true
    }
}

impl<A: SettleAnimator + std::fmt::Debug> std::fmt::Debug for SheetController<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetController")
            .field("offset", &self.offset)
            .field("position_state", &self.position_state)
            .field("phase", &self.phase.current_state())
            .field("session", &self.session)
            .field("settling", &self.active_settle.is_some())
            .field("animator", &self.animator)
            .finish()
    }
}
