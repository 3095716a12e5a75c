//! Partial Sheet
//!
//! A draggable bottom sheet that shares one vertical gesture with the
//! scrollable list inside it.
//!
//! # Features
//!
//! - **Gesture arbitration**: every list delta either scrolls the list or moves the sheet
//! - **Checkpoints**: the sheet rests at top / optional mid / bottom offsets
//! - **Flick snapping**: fast releases move past the nearest checkpoint
//! - **Interruptible settles**: a new drag picks the sheet up mid-animation
//!
//! Rendering, the list widget and the animation engine are collaborators
//! behind the traits in [`collaborators`].
//!
//! # Example
//!
//! ```rust
//! use partial_sheet::testing::{RecordingLayout, RecordingList};
//! use partial_sheet::{PartialSheet, SheetConfig, SpringAnimator};
//! use partial_core::PositionState;
//!
//! let config = SheetConfig::with_mid(50.0);
//! let animator = SpringAnimator::new(config.spring);
//! let mut sheet = PartialSheet::new(
//!     config,
//!     800.0,
//!     RecordingLayout::default(),
//!     RecordingList::default(),
//!     animator,
//! )
//! .unwrap();
//!
//! sheet.drag_started(700.0).unwrap();
//! sheet.drag_updated(400.0).unwrap();
//! sheet.drag_ended(0.0).unwrap();
//!
//! while sheet.is_settling() {
//!     sheet.frame(1.0 / 60.0).unwrap();
//! }
//! assert_eq!(sheet.position_state(), PositionState::Mid);
//! assert_eq!(sheet.offset(), 400.0);
//! ```

pub mod animator;
pub mod arbiter;
pub mod collaborators;
pub mod config;
pub mod controller;
pub mod sheet;
pub mod testing;

pub use animator::{EasedAnimator, SpringAnimator};
pub use arbiter::{GestureArbiter, ListRelease, ScrollRouting};
pub use collaborators::{
    AnimationFrame, ScrollableList, SettleAnimator, SettleRequest, SheetLayout,
};
pub use config::SheetConfig;
pub use controller::{
    snap_target_index, DragPhase, DragSession, OffsetChange, SettleOutcome, SheetController,
};
pub use sheet::PartialSheet;
