//! Gesture arbitration between the sheet and its inner list
//!
//! One vertical pan stream, two consumers. For every content-offset report
//! from the list, the arbiter decides in O(1) whether the list keeps scrolling
//! natively or the delta is forwarded to move the sheet.
//!
//! | sheet state  | forwarded when          |
//! |--------------|-------------------------|
//! | `Top`        | list offset < 0         |
//! | `Bottom`     | list offset > 0         |
//! | anything else| always                  |
//!
//! While forwarding, the list is pinned at offset zero with its indicator
//! hidden so it never visibly scrolls underneath a moving sheet.

use partial_core::PositionState;

use crate::collaborators::ScrollableList;

/// Routing decision for one list scroll report
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollRouting {
    /// The list scrolls natively
    Native,
    /// Move the sheet by `delta` (positive expands)
    Forward { delta: f32 },
    /// Would have been forwarded, but no drag session is active
    Ignored,
}

/// What the sheet should do when a list drag ends
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListRelease {
    /// Release velocity on the sheet's offset axis (negative expands), points/ms
    pub sheet_velocity: f32,
    /// The list, not the sheet, owned the last part of the gesture
    pub list_scroll_active: bool,
    /// The list's momentum target was overridden to zero
    pub suppressed: bool,
}

/// Decides who owns each vertical delta of a list drag
#[derive(Debug, Clone, Default)]
pub struct GestureArbiter {
    position_state: PositionState,
    last_translation_y: f32,
    session_active: bool,
    forwarded_in_session: bool,
    list_scrolling: bool,
}

impl GestureArbiter {
    pub fn new(position_state: PositionState) -> Self {
        Self {
            position_state,
            ..Default::default()
        }
    }

    /// State hint from the sheet controller
    pub fn set_position_state(&mut self, state: PositionState) {
        if self.position_state != state {
            tracing::trace!(from = %self.position_state, to = %state, "arbiter state hint");
        }
        self.position_state = state;
    }

    pub fn position_state(&self) -> PositionState {
        self.position_state
    }

    pub fn is_session_active(&self) -> bool {
        self.session_active
    }

    /// Whether the list last consumed the gesture natively
    pub fn is_list_scrolling(&self) -> bool {
        self.list_scrolling
    }

    /// The routing rule, without side effects
    pub fn should_forward(&self, content_offset_y: f32) -> bool {
        match self.position_state {
            PositionState::Top => content_offset_y < 0.0,
            PositionState::Bottom => content_offset_y > 0.0,
            PositionState::Mid | PositionState::Progressing => true,
        }
    }

    /// The list started tracking a pan
    pub fn begin_session<S: ScrollableList + ?Sized>(&mut self, list: &mut S) {
        tracing::debug!(state = %self.position_state, "list drag session began");
        self.last_translation_y = 0.0;
        self.session_active = true;
        self.forwarded_in_session = false;
        self.list_scrolling = false;
        list.set_scroll_enabled(true);
    }

    /// Route one content-offset report.
    ///
    /// `translation_y` is the pan's cumulative translation since the session
    /// began; deltas are differences between consecutive translations so the
    /// sheet picks up exactly where the list left off.
    pub fn route<S: ScrollableList + ?Sized>(
        &mut self,
        content_offset_y: f32,
        translation_y: f32,
        list: &mut S,
    ) -> ScrollRouting {
        let forward = self.should_forward(content_offset_y);

        if !self.session_active {
            if forward {
                tracing::trace!(content_offset_y, "delta without drag session ignored");
                return ScrollRouting::Ignored;
            }
            return ScrollRouting::Native;
        }

        if forward {
            let delta = self.last_translation_y - translation_y;
            self.last_translation_y = translation_y;
            self.forwarded_in_session = true;
            self.list_scrolling = false;

            list.set_content_offset(0.0);
            list.set_indicator_visible(false);

            tracing::trace!(content_offset_y, translation_y, delta, "forwarding to sheet");
            ScrollRouting::Forward { delta }
        } else {
            // Keep tracking so a later hand-off to the sheet has no jump
            self.last_translation_y = translation_y;
            self.list_scrolling = true;
            list.set_indicator_visible(true);
            ScrollRouting::Native
        }
    }

    /// The list drag is ending with `velocity_y` (list convention: positive
    /// moves content up). Returns `None` when no session was active.
    ///
    /// The list's momentum is suppressed (pinned at zero, scrolling toggled
    /// off and back on) whenever the sheet is not at `Top`. At `Top` it is
    /// suppressed only if the sheet consumed a delta during this session; a
    /// purely native scroll keeps its momentum.
    pub fn end_session<S: ScrollableList + ?Sized>(
        &mut self,
        velocity_y: f32,
        list: &mut S,
    ) -> Option<ListRelease> {
        if !self.session_active {
            tracing::trace!("list drag end without session ignored");
            return None;
        }
        self.session_active = false;

        let suppressed = match self.position_state {
            PositionState::Bottom | PositionState::Progressing | PositionState::Mid => true,
            PositionState::Top => self.forwarded_in_session,
        };

        if suppressed {
            tracing::debug!(state = %self.position_state, "suppressing list momentum");
            list.set_content_offset(0.0);
            list.set_scroll_enabled(false);
            list.set_indicator_visible(false);
        }
        list.set_scroll_enabled(true);

        Some(ListRelease {
            sheet_velocity: -velocity_y,
            list_scroll_active: self.list_scrolling,
            suppressed,
        })
    }
}
