//! Event stream and notification dispatch
//!
//! Input events (sheet drags, list scrolls, animation frames, resizes) and the
//! notifications a sheet publishes back to its host share one `Event` type.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::position::PositionState;

/// Event type identifier
pub type EventType = u32;

/// Event types understood by the sheet
pub mod event_types {
    use super::EventType;

    /// Finger down on the sheet itself (outside the list)
    pub const DRAG_START: EventType = 1;
    pub const DRAG_UPDATE: EventType = 2;
    /// Finger lifted after a sheet drag
    pub const DRAG_END: EventType = 3;

    /// The inner list started tracking a pan
    pub const LIST_DRAG_BEGIN: EventType = 10;
    /// The inner list reported a new content offset
    pub const LIST_SCROLL: EventType = 11;
    /// The inner list is about to end its drag
    pub const LIST_DRAG_END: EventType = 12;

    /// Animation frame callback
    pub const FRAME: EventType = 20;
    pub const RESIZE: EventType = 30;

    /// Settle animation finished (internal FSM event)
    pub const SETTLED: EventType = 40;

    // Notifications published to the host
    pub const POSITION_STATE_CHANGED: EventType = 50;
    pub const OFFSET_CHANGED: EventType = 51;
    pub const SETTLE_STARTED: EventType = 52;
}

/// An event with associated data
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub event_type: EventType,
    pub data: EventData,
    /// Host-supplied timestamp in milliseconds
    pub timestamp: u64,
    pub propagation_stopped: bool,
}

/// Event-specific data
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    /// Touch location along the vertical axis, in container coordinates
    Drag { location_y: f32 },
    /// Release velocity in points per millisecond
    DragEnd { velocity_y: f32 },
    ListScroll {
        /// Signed content offset of the list
        content_offset_y: f32,
        /// Cumulative pan translation since the list drag began
        translation_y: f32,
    },
    Frame {
        /// Seconds since the previous frame
        dt: f32,
    },
    Resize { container_height: f32 },
    PositionState {
        previous: PositionState,
        current: PositionState,
    },
    Offset { offset: f32 },
    Settle {
        from: f32,
        to: f32,
        target: PositionState,
    },
    None,
}

impl Event {
    pub fn new(event_type: EventType, data: EventData) -> Self {
        Self {
            event_type,
            data,
            timestamp: 0,
            propagation_stopped: false,
        }
    }

    pub fn drag_started(location_y: f32) -> Self {
        Self::new(event_types::DRAG_START, EventData::Drag { location_y })
    }

    pub fn drag_updated(location_y: f32) -> Self {
        Self::new(event_types::DRAG_UPDATE, EventData::Drag { location_y })
    }

    pub fn drag_ended(velocity_y: f32) -> Self {
        Self::new(event_types::DRAG_END, EventData::DragEnd { velocity_y })
    }

    pub fn list_drag_began() -> Self {
        Self::new(event_types::LIST_DRAG_BEGIN, EventData::None)
    }

    pub fn list_scrolled(content_offset_y: f32, translation_y: f32) -> Self {
        Self::new(
            event_types::LIST_SCROLL,
            EventData::ListScroll {
                content_offset_y,
                translation_y,
            },
        )
    }

    /// `velocity_y` uses the list's convention: positive moves content up
    pub fn list_drag_ended(velocity_y: f32) -> Self {
        Self::new(event_types::LIST_DRAG_END, EventData::DragEnd { velocity_y })
    }

    pub fn frame(dt: f32) -> Self {
        Self::new(event_types::FRAME, EventData::Frame { dt })
    }

    pub fn resized(container_height: f32) -> Self {
        Self::new(event_types::RESIZE, EventData::Resize { container_height })
    }

    pub fn position_state_changed(previous: PositionState, current: PositionState) -> Self {
        Self::new(
            event_types::POSITION_STATE_CHANGED,
            EventData::PositionState { previous, current },
        )
    }

    pub fn offset_changed(offset: f32) -> Self {
        Self::new(event_types::OFFSET_CHANGED, EventData::Offset { offset })
    }

    pub fn settle_started(from: f32, to: f32, target: PositionState) -> Self {
        Self::new(
            event_types::SETTLE_STARTED,
            EventData::Settle { from, to, target },
        )
    }

    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }
}

new_key_type! {
    /// Handle returned by `EventDispatcher::subscribe`
    pub struct SubscriptionId;
}

/// Event handler function type
pub type EventHandler = Box<dyn Fn(&Event)>;

struct Subscription {
    event_type: EventType,
    handler: EventHandler,
}

/// Dispatches events to handlers registered per event type.
///
/// Handlers run in subscription order; a handler may stop propagation to
/// keep later handlers from seeing the event.
pub struct EventDispatcher {
    subscriptions: SlotMap<SubscriptionId, Subscription>,
    by_type: FxHashMap<EventType, SmallVec<[SubscriptionId; 4]>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            subscriptions: SlotMap::with_key(),
            by_type: FxHashMap::default(),
        }
    }

    /// Register a handler for an event type
    pub fn subscribe<F>(&mut self, event_type: EventType, handler: F) -> SubscriptionId
    where
        F: Fn(&Event) + 'static,
    {
        let id = self.subscriptions.insert(Subscription {
            event_type,
            handler: Box::new(handler),
        });
        self.by_type.entry(event_type).or_default().push(id);
        id
    }

    /// Remove a handler. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let Some(subscription) = self.subscriptions.remove(id) else {
            return false;
        };
        if let Some(ids) = self.by_type.get_mut(&subscription.event_type) {
            ids.retain(|other| *other != id);
        }
        true
    }

    /// Dispatch an event to every handler registered for its type
    pub fn dispatch(&self, event: &mut Event) {
        let Some(ids) = self.by_type.get(&event.event_type) else {
            return;
        };
        for id in ids {
            if event.propagation_stopped {
                break;
            }
            if let Some(subscription) = self.subscriptions.get(*id) {
                (subscription.handler)(event);
            }
        }
    }

    /// Number of live subscriptions
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_dispatch_by_type() {
        let mut dispatcher = EventDispatcher::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let seen_clone = seen.clone();
        dispatcher.subscribe(event_types::OFFSET_CHANGED, move |event| {
            if let EventData::Offset { offset } = event.data {
                seen_clone.borrow_mut().push(offset);
            }
        });

        dispatcher.dispatch(&mut Event::offset_changed(12.0));
        dispatcher.dispatch(&mut Event::position_state_changed(
            PositionState::Top,
            PositionState::Progressing,
        ));
        dispatcher.dispatch(&mut Event::offset_changed(24.0));

        assert_eq!(*seen.borrow(), vec![12.0, 24.0]);
    }

    #[test]
    fn test_unsubscribe() {
        let mut dispatcher = EventDispatcher::new();
        let count = Rc::new(RefCell::new(0));

        let count_clone = count.clone();
        let id = dispatcher.subscribe(event_types::SETTLE_STARTED, move |_| {
            *count_clone.borrow_mut() += 1;
        });

        dispatcher.dispatch(&mut Event::settle_started(10.0, 0.0, PositionState::Top));
        assert!(dispatcher.unsubscribe(id));
        assert!(!dispatcher.unsubscribe(id));
        dispatcher.dispatch(&mut Event::settle_started(10.0, 0.0, PositionState::Top));

        assert_eq!(*count.borrow(), 1);
        assert!(dispatcher.is_empty());
    }

    #[test]
    fn test_stop_propagation() {
        let mut dispatcher = EventDispatcher::new();
        let calls = Rc::new(RefCell::new(Vec::new()));

        let first = calls.clone();
        dispatcher.subscribe(event_types::OFFSET_CHANGED, move |_| {
            first.borrow_mut().push("first");
        });
        let second = calls.clone();
        dispatcher.subscribe(event_types::OFFSET_CHANGED, move |_| {
            second.borrow_mut().push("second");
        });

        let mut event = Event::offset_changed(1.0);
        event.stop_propagation();
        dispatcher.dispatch(&mut event);
        assert!(calls.borrow().is_empty());

        dispatcher.dispatch(&mut Event::offset_changed(1.0));
        assert_eq!(*calls.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_constructors_pair_type_and_data() {
        let event = Event::list_scrolled(-4.0, 12.0).with_timestamp(99);
        assert_eq!(event.event_type, event_types::LIST_SCROLL);
        assert_eq!(event.timestamp, 99);
        assert_eq!(
            event.data,
            EventData::ListScroll {
                content_offset_y: -4.0,
                translation_y: 12.0
            }
        );
    }
}
