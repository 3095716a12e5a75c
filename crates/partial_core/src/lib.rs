//! Partial Core
//!
//! Foundational primitives shared by every Partial crate:
//!
//! - **Position model**: named checkpoints and the `PositionState` a sheet rests at
//! - **Event stream**: gesture, list, frame and notification events with a dispatcher
//! - **State machines**: a small `StateTransitions` helper for interaction phases
//!
//! # Example
//!
//! ```rust
//! use partial_core::{Checkpoint, CheckpointSet, PositionState};
//!
//! let checkpoints = CheckpointSet::new(vec![
//!     Checkpoint::new(PositionState::Top, 40.0),
//!     Checkpoint::new(PositionState::Bottom, 680.0),
//! ])
//! .unwrap();
//!
//! assert_eq!(checkpoints.clamp(900.0), 680.0);
//! assert_eq!(checkpoints.state_for(680.0), PositionState::Bottom);
//! assert_eq!(checkpoints.state_for(300.0), PositionState::Progressing);
//! ```

pub mod error;
pub mod events;
pub mod fsm;
pub mod position;

pub use error::{Result, SheetError};
pub use events::{Event, EventData, EventDispatcher, EventType, SubscriptionId};
pub use fsm::{StateMachine, StateTransitions};
pub use position::{nearest_checkpoint_index, Checkpoint, CheckpointSet, PositionState};
