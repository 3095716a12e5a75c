//! Interfaces to the toolkit around the sheet
//!
//! The sheet never draws, scrolls, or animates anything itself. The host
//! plugs in implementations of these traits for its rendering layer, its
//! scrollable list widget, and its animation engine.

use std::fmt::Debug;

/// Rendering/layout side: positions the sheet
pub trait SheetLayout {
    /// Set the sheet's distance from the container's top edge
    fn apply_offset_constraint(&mut self, offset: f32);
}

/// The scrollable list embedded in the sheet
pub trait ScrollableList {
    fn set_content_offset(&mut self, offset_y: f32);
    fn set_scroll_enabled(&mut self, enabled: bool);
    fn set_indicator_visible(&mut self, visible: bool);
}

/// Parameters for one settle animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettleRequest {
    pub from: f32,
    pub to: f32,
    /// Release velocity along the offset axis, points per millisecond
    pub velocity_hint: f32,
    /// Seconds
    pub duration_hint: f32,
}

/// One sampled animation frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationFrame {
    pub value: f32,
    /// Set exactly once, on the frame that completes the animation
    pub finished: bool,
}

/// Animation engine driving the settle motion.
///
/// After `advance` reports `finished`, the handle is dead: later calls
/// return `None`.
pub trait SettleAnimator {
    type Handle: Copy + Eq + Debug;

    fn start(&mut self, request: SettleRequest) -> Self::Handle;

    /// Step the animation by `dt` seconds and sample it
    fn advance(&mut self, handle: Self::Handle, dt: f32) -> Option<AnimationFrame>;

    /// Stop the animation, returning its last value if it was still live
    fn cancel(&mut self, handle: Self::Handle) -> Option<f32>;
}

impl<T: SheetLayout + ?Sized> SheetLayout for Box<T> {
    fn apply_offset_constraint(&mut self, offset: f32) {
        (**self).apply_offset_constraint(offset);
    }
}

impl<T: ScrollableList + ?Sized> ScrollableList for Box<T> {
    fn set_content_offset(&mut self, offset_y: f32) {
        (**self).set_content_offset(offset_y);
    }

    fn set_scroll_enabled(&mut self, enabled: bool) {
        (**self).set_scroll_enabled(enabled);
    }

    fn set_indicator_visible(&mut self, visible: bool) {
        (**self).set_indicator_visible(visible);
    }
}
