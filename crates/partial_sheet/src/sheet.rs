//! The sheet host
//!
//! `PartialSheet` wires the controller and the arbiter to the toolkit. It
//! consumes input events, forwards list deltas through the arbiter, pushes
//! every offset change to the layout, and publishes notifications.

use partial_core::events::event_types;
use partial_core::{
    Event, EventData, EventDispatcher, EventType, PositionState, Result, SubscriptionId,
};

use crate::arbiter::{GestureArbiter, ScrollRouting};
use crate::collaborators::{ScrollableList, SettleAnimator, SheetLayout};
use crate::config::SheetConfig;
use crate::controller::{SettleOutcome, SheetController};

/// A bottom sheet with an embedded scrollable list
pub struct PartialSheet<L, S, A: SettleAnimator> {
    controller: SheetController<A>,
    arbiter: GestureArbiter,
    layout: L,
    list: S,
    dispatcher: EventDispatcher,
}

impl<L: SheetLayout, S: ScrollableList, A: SettleAnimator> PartialSheet<L, S, A> {
    /// Lay the sheet out and position it at its initial offset
    pub fn new(
        config: SheetConfig,
        container_height: f32,
        mut layout: L,
        list: S,
        animator: A,
    ) -> Result<Self> {
        let controller = SheetController::new(config, container_height, animator)?;
        let arbiter = GestureArbiter::new(controller.position_state());
        layout.apply_offset_constraint(controller.offset());

        Ok(Self {
            controller,
            arbiter,
            layout,
            list,
            dispatcher: EventDispatcher::new(),
        })
    }

    /// Handle one input event.
    ///
    /// Errors are configuration errors (a resize to an unusable height, an
    /// empty checkpoint list); whatever moved before the error is still
    /// applied to the layout.
    pub fn handle_event(&mut self, event: &Event) -> Result<()> {
        let old_offset = self.controller.offset();
        let old_state = self.controller.position_state();

        let result = self.route_event(event);

        let new_offset = self.controller.offset();
        let new_state = self.controller.position_state();

        if new_offset != old_offset {
            self.layout.apply_offset_constraint(new_offset);
            self.publish(Event::offset_changed(new_offset));
        }

        self.arbiter.set_position_state(new_state);
        if new_state != old_state {
            tracing::debug!(from = %old_state, to = %new_state, "position state changed");
            self.publish(Event::position_state_changed(old_state, new_state));
        }

        if let Ok(Some(outcome)) = &result {
            if outcome.animated {
                self.publish(Event::settle_started(
                    new_offset,
                    outcome.target_offset,
                    outcome.target_state,
                ));
            }
        }

        result.map(|_| ())
    }

    fn route_event(&mut self, event: &Event) -> Result<Option<SettleOutcome>> {
        match (event.event_type, &event.data) {
            (event_types::DRAG_START, EventData::Drag { location_y }) => {
                self.controller.drag_started(*location_y);
            }
            (event_types::DRAG_UPDATE, EventData::Drag { location_y }) => {
                self.controller.drag_updated(*location_y);
            }
            (event_types::DRAG_END, EventData::DragEnd { velocity_y }) => {
                return self.controller.drag_ended(*velocity_y);
            }
            (event_types::LIST_DRAG_BEGIN, _) => {
                // A drag from the list grabs the sheet just like a sheet drag
                let change = self.controller.interrupt();
                self.arbiter.set_position_state(change.state);
                self.controller.set_list_scroll_active(false);
                self.arbiter.begin_session(&mut self.list);
            }
            (
                event_types::LIST_SCROLL,
                EventData::ListScroll {
                    content_offset_y,
                    translation_y,
                },
            ) => {
                let routing = self
                    .arbiter
                    .route(*content_offset_y, *translation_y, &mut self.list);
                if let ScrollRouting::Forward { delta } = routing {
                    self.controller.update_offset(delta);
                }
            }
            (event_types::LIST_DRAG_END, EventData::DragEnd { velocity_y }) => {
                let Some(release) = self.arbiter.end_session(*velocity_y, &mut self.list) else {
                    return Ok(None);
                };
                self.controller
                    .set_list_scroll_active(release.list_scroll_active);
                return self.controller.settle(release.sheet_velocity).map(Some);
            }
            (event_types::FRAME, EventData::Frame { dt }) => {
                self.controller.tick(*dt);
            }
            (event_types::RESIZE, EventData::Resize { container_height }) => {
                self.controller.resize(*container_height)?;
            }
            (event_type, data) => {
                tracing::warn!(event_type, ?data, "unhandled sheet event");
            }
        }
        Ok(None)
    }

    fn publish(&self, mut event: Event) {
        self.dispatcher.dispatch(&mut event);
    }

    pub fn drag_started(&mut self, location_y: f32) -> Result<()> {
        self.handle_event(&Event::drag_started(location_y))
    }

    pub fn drag_updated(&mut self, location_y: f32) -> Result<()> {
        self.handle_event(&Event::drag_updated(location_y))
    }

    /// `velocity_y` is along the offset axis: positive collapses
    pub fn drag_ended(&mut self, velocity_y: f32) -> Result<()> {
        self.handle_event(&Event::drag_ended(velocity_y))
    }

    pub fn list_drag_began(&mut self) -> Result<()> {
        self.handle_event(&Event::list_drag_began())
    }

    pub fn list_scrolled(&mut self, content_offset_y: f32, translation_y: f32) -> Result<()> {
        self.handle_event(&Event::list_scrolled(content_offset_y, translation_y))
    }

    /// `velocity_y` uses the list's convention: positive moves content up
    pub fn list_drag_ended(&mut self, velocity_y: f32) -> Result<()> {
        self.handle_event(&Event::list_drag_ended(velocity_y))
    }

    /// Advance the settle animation by `dt` seconds
    pub fn frame(&mut self, dt: f32) -> Result<()> {
        self.handle_event(&Event::frame(dt))
    }

    pub fn resize(&mut self, container_height: f32) -> Result<()> {
        self.handle_event(&Event::resized(container_height))
    }

    /// Subscribe to a notification (`POSITION_STATE_CHANGED`,
    /// `OFFSET_CHANGED` or `SETTLE_STARTED`)
    pub fn subscribe<F>(&mut self, event_type: EventType, handler: F) -> SubscriptionId
    where
        F: Fn(&Event) + 'static,
    {
        self.dispatcher.subscribe(event_type, handler)
    }

    /// Called with `(previous, current)` whenever the position state changes
    pub fn on_position_state_changed<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: Fn(PositionState, PositionState) + 'static,
    {
        self.dispatcher
            .subscribe(event_types::POSITION_STATE_CHANGED, move |event| {
                if let EventData::PositionState { previous, current } = &event.data {
                    handler(*previous, *current);
                }
            })
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.dispatcher.unsubscribe(id)
    }

    pub fn offset(&self) -> f32 {
        self.controller.offset()
    }

    pub fn position_state(&self) -> PositionState {
        self.controller.position_state()
    }

    pub fn is_settling(&self) -> bool {
        self.controller.is_settling()
    }

    pub fn controller(&self) -> &SheetController<A> {
        &self.controller
    }

    pub fn arbiter(&self) -> &GestureArbiter {
        &self.arbiter
    }

    pub fn layout(&self) -> &L {
        &self.layout
    }

    pub fn list(&self) -> &S {
        &self.list
    }

    /// The host updates the list's native state (e.g. its content offset)
    /// through this
    pub fn list_mut(&mut self) -> &mut S {
        &mut self.list
    }
}

impl<L, S, A> std::fmt::Debug for PartialSheet<L, S, A>
where
    L: std::fmt::Debug,
    S: std::fmt::Debug,
    A: SettleAnimator + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PartialSheet")
            .field("controller", &self.controller)
            .field("arbiter", &self.arbiter)
            .field("layout", &self.layout)
            .field("list", &self.list)
            .field("subscriptions", &self.dispatcher.len())
            .finish()
    }
}
