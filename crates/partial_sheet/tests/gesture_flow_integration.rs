//! Integration tests for full gesture flows through `PartialSheet`
//!
//! These drive the sheet the way a host toolkit would: sheet drags, list
//! scroll reports, animation frames and resizes, with the spring animator
//! doing the settle.

use std::cell::RefCell;
use std::rc::Rc;

use partial_core::events::event_types;
use partial_core::{EventData, PositionState};
use partial_sheet::testing::{ListCommand, RecordingLayout, RecordingList};
use partial_sheet::{DragPhase, PartialSheet, SheetConfig, SpringAnimator};
use tracing_subscriber::EnvFilter;

type Sheet = PartialSheet<RecordingLayout, RecordingList, SpringAnimator>;

const FRAME: f32 = 1.0 / 60.0;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Checkpoints at 40 / 400 / 680 in an 800pt container
fn sheet() -> Sheet {
    init_tracing();
    let config = SheetConfig::with_mid(50.0);
    let animator = SpringAnimator::new(config.spring);
    PartialSheet::new(
        config,
        800.0,
        RecordingLayout::default(),
        RecordingList::default(),
        animator,
    )
    .unwrap()
}

fn run_until_settled(sheet: &mut Sheet) -> usize {
    let mut frames = 0;
    while sheet.is_settling() && frames < 2000 {
        sheet.frame(FRAME).unwrap();
        frames += 1;
    }
    assert!(!sheet.is_settling(), "settle did not finish");
    frames
}

fn record_states(sheet: &mut Sheet) -> Rc<RefCell<Vec<(PositionState, PositionState)>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    sheet.on_position_state_changed(move |previous, current| {
        sink.borrow_mut().push((previous, current));
    });
    seen
}

/// Drag the sheet from its resting offset onto the top checkpoint
fn rest_at_top(sheet: &mut Sheet) {
    sheet.drag_started(700.0).unwrap();
    sheet.drag_updated(60.0).unwrap();
    sheet.drag_ended(0.0).unwrap();
    assert_eq!(sheet.position_state(), PositionState::Top);
    assert_eq!(sheet.offset(), 40.0);
}

/// An expanding flick from the bottom passes the nearest checkpoint and
/// reports `Mid` only once the spring has come to rest
#[test]
fn test_flick_settles_on_mid_with_single_notification() {
    let mut sheet = sheet();
    let states = record_states(&mut sheet);

    sheet.drag_started(700.0).unwrap();
    sheet.drag_updated(620.0).unwrap();
    assert_eq!(sheet.offset(), 600.0);

    sheet.drag_ended(-1.0).unwrap();
    assert_eq!(sheet.controller().settle_target(), Some(400.0));
    assert_eq!(sheet.controller().phase(), DragPhase::Settling);

    let frames = run_until_settled(&mut sheet);
    assert!(frames > 1);

    assert_eq!(sheet.offset(), 400.0);
    assert_eq!(sheet.layout().current(), Some(400.0));
    assert_eq!(
        *states.borrow(),
        vec![
            (PositionState::Bottom, PositionState::Progressing),
            (PositionState::Progressing, PositionState::Mid),
        ]
    );
    assert_eq!(sheet.controller().phase(), DragPhase::Idle);
}

/// Every frame stays inside the checkpoint range, even when the spring
/// overshoots
#[test]
fn test_frames_stay_clamped() {
    let mut sheet = sheet();
    rest_at_top(&mut sheet);

    sheet.drag_started(100.0).unwrap();
    sheet.drag_updated(120.0).unwrap();
    sheet.drag_ended(-6.0).unwrap();
    run_until_settled(&mut sheet);

    assert!(sheet
        .layout()
        .applied
        .iter()
        .all(|offset| (40.0..=680.0).contains(offset)));
    assert_eq!(sheet.position_state(), PositionState::Top);
}

/// Grabbing the sheet mid-settle continues from where it is drawn
#[test]
fn test_drag_interrupts_spring_settle() {
    let mut sheet = sheet();
    sheet.drag_started(700.0).unwrap();
    sheet.drag_updated(620.0).unwrap();
    sheet.drag_ended(-1.0).unwrap();

    for _ in 0..5 {
        sheet.frame(FRAME).unwrap();
    }
    let drawn = sheet.layout().current().unwrap();
    assert!(drawn < 600.0 && drawn != 400.0);

    sheet.drag_started(300.0).unwrap();
    assert!(!sheet.is_settling());
    assert_eq!(sheet.controller().session().unwrap().start_offset, drawn);

    sheet.drag_updated(310.0).unwrap();
    assert!((sheet.offset() - (drawn + 10.0)).abs() < 1e-3);

    // Frames after the interruption do not move the sheet
    let before = sheet.offset();
    sheet.frame(FRAME).unwrap();
    assert_eq!(sheet.offset(), before);
}

/// At the top, the list scrolls until it is pulled past its own top, then
/// the rest of the same pan moves the sheet
#[test]
fn test_list_hands_gesture_to_sheet_at_top() {
    let mut sheet = sheet();
    rest_at_top(&mut sheet);
    let states = record_states(&mut sheet);

    sheet.list_drag_began().unwrap();
    for (content_offset, translation) in [(20.0, -20.0), (10.0, -10.0), (0.0, 0.0)] {
        sheet.list_mut().content_offset = content_offset;
        sheet.list_scrolled(content_offset, translation).unwrap();
        assert_eq!(sheet.offset(), 40.0);
    }
    assert!(sheet.list().indicator_visible);

    sheet.list_scrolled(-5.0, 5.0).unwrap();
    assert_eq!(sheet.offset(), 45.0);
    assert_eq!(sheet.list().content_offset, 0.0);
    assert!(!sheet.list().indicator_visible);

    // Sheet is moving now, so every delta is forwarded
    sheet.list_scrolled(3.0, 20.0).unwrap();
    assert_eq!(sheet.offset(), 60.0);

    sheet.list_drag_ended(-0.1).unwrap();
    assert_eq!(sheet.list().content_offset, 0.0);
    assert!(sheet.list().scroll_enabled);
    run_until_settled(&mut sheet);

    assert_eq!(sheet.offset(), 40.0);
    assert_eq!(
        *states.borrow(),
        vec![
            (PositionState::Top, PositionState::Progressing),
            (PositionState::Progressing, PositionState::Top),
        ]
    );
}

/// A list sitting exactly at its content top belongs to the list at either
/// resting end; the sheet only moves once the list is pushed past it
#[test]
fn test_list_at_zero_offset_is_not_forwarded() {
    let mut sheet = sheet();
    sheet.list_drag_began().unwrap();
    sheet.list_scrolled(0.0, -6.0).unwrap();
    assert_eq!(sheet.offset(), 680.0);
    assert!(sheet.arbiter().is_list_scrolling());

    sheet.list_scrolled(2.0, -8.0).unwrap();
    assert_eq!(sheet.offset(), 678.0);
    sheet.list_drag_ended(0.0).unwrap();
    run_until_settled(&mut sheet);

    rest_at_top(&mut sheet);
    sheet.list_drag_began().unwrap();
    sheet.list_scrolled(0.0, 4.0).unwrap();
    assert_eq!(sheet.offset(), 40.0);
    assert_eq!(sheet.position_state(), PositionState::Top);

    sheet.list_scrolled(-1.0, 5.0).unwrap();
    assert_eq!(sheet.offset(), 41.0);
}

/// A pure list scroll at the top keeps its native momentum
#[test]
fn test_native_list_scroll_at_top_is_not_suppressed() {
    let mut sheet = sheet();
    rest_at_top(&mut sheet);

    sheet.list_drag_began().unwrap();
    sheet.list_mut().content_offset = 30.0;
    sheet.list_scrolled(30.0, -30.0).unwrap();
    sheet.list_mut().commands.clear();

    sheet.list_drag_ended(2.0).unwrap();
    assert_eq!(sheet.list().content_offset, 30.0);
    assert_eq!(sheet.list().commands, vec![ListCommand::ScrollEnabled(true)]);
    assert!(!sheet.is_settling());
    assert_eq!(sheet.offset(), 40.0);
}

/// At the bottom, a list drag that pushes the sheet up is suppressed on
/// release and the sheet settles
#[test]
fn test_list_release_at_bottom_suppresses_list() {
    let mut sheet = sheet();
    sheet.list_drag_began().unwrap();
    sheet.list_scrolled(50.0, -50.0).unwrap();
    assert_eq!(sheet.offset(), 630.0);

    sheet.list_mut().commands.clear();
    sheet.list_drag_ended(0.2).unwrap();
    assert_eq!(
        sheet.list().commands,
        vec![
            ListCommand::ContentOffset(0.0),
            ListCommand::ScrollEnabled(false),
            ListCommand::IndicatorVisible(false),
            ListCommand::ScrollEnabled(true),
        ]
    );

    run_until_settled(&mut sheet);
    assert_eq!(sheet.position_state(), PositionState::Bottom);
}

#[test]
fn test_list_scroll_without_session_is_ignored() {
    let mut sheet = sheet();
    sheet.list_scrolled(12.0, -12.0).unwrap();
    sheet.list_drag_ended(3.0).unwrap();

    assert_eq!(sheet.offset(), 680.0);
    assert!(sheet.list().commands.is_empty());
    assert!(!sheet.is_settling());
}

#[test]
fn test_resize_during_settle_lands_on_target() {
    let mut sheet = sheet();
    sheet.drag_started(700.0).unwrap();
    sheet.drag_updated(620.0).unwrap();
    sheet.drag_ended(-1.0).unwrap();
    sheet.frame(FRAME).unwrap();

    sheet.resize(1000.0).unwrap();
    assert!(!sheet.is_settling());
    assert_eq!(sheet.offset(), 500.0);
    assert_eq!(sheet.position_state(), PositionState::Mid);
    assert_eq!(sheet.layout().current(), Some(500.0));
}

#[test]
fn test_notifications_can_be_unsubscribed() {
    let mut sheet = sheet();
    let offsets = Rc::new(RefCell::new(Vec::new()));
    let sink = offsets.clone();
    let id = sheet.subscribe(event_types::OFFSET_CHANGED, move |event| {
        if let EventData::Offset { offset } = event.data {
            sink.borrow_mut().push(offset);
        }
    });

    sheet.drag_started(700.0).unwrap();
    sheet.drag_updated(690.0).unwrap();
    assert_eq!(*offsets.borrow(), vec![670.0]);

    assert!(sheet.unsubscribe(id));
    sheet.drag_updated(680.0).unwrap();
    assert_eq!(offsets.borrow().len(), 1);
}
