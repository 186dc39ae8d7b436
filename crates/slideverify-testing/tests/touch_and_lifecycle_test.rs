//! Touch input, layout changes, re-arming and subscription lifecycle.

use slideverify_core::{
    EventType, RawPointerInput, RearmPolicy, VerifierError, VerifierOptions, VerifierState,
};
use slideverify_dom::{mount, Document, EventTarget};
use slideverify_testing::robot_assertions::{assert_approx_eq, assert_count};
use slideverify_testing::VerifierRobot;
use std::cell::Cell;
use std::error::Error;
use std::rc::Rc;

#[test]
fn touch_swipe_verifies() {
    let mut robot = VerifierRobot::builder().build().expect("mount");
    let start = robot.touch_start(5.0).expect("touch start");
    assert!(start.is_default_prevented());

    robot.touch_move(150.0).expect("touch move");
    assert_approx_eq(robot.handle_left(), 145.0, 0.001, "mid swipe");

    robot.touch_move(275.0).expect("touch move");
    robot.touch_end().expect("touch end");
    assert_eq!(robot.state(), VerifierState::Success);
    assert_count(robot.success_count(), 1, "touch success");
}

#[test]
fn touch_cancel_resets_instead_of_sticking_in_drag() {
    let mut robot = VerifierRobot::builder().build().expect("mount");
    robot.touch_start(0.0).expect("touch start");
    robot.touch_move(290.0).expect("touch move");
    robot.touch_cancel().expect("touch cancel");

    assert_eq!(robot.state(), VerifierState::Idle);
    assert_eq!(robot.handle_left(), 0.0);
    assert_count(robot.success_count(), 0, "cancel never verifies");
}

#[test]
fn mouse_and_touch_share_one_drag() {
    let mut robot = VerifierRobot::builder().build().expect("mount");
    robot.press(0.0).expect("mouse press");
    robot
        .touch_start(100.0)
        .expect("touch press overwrites anchor");
    robot.move_to(130.0).expect("mouse move");

    assert_eq!(robot.handle_left(), 30.0);
}

#[test]
fn track_resize_between_moves_is_honored() {
    let mut robot = VerifierRobot::builder().build().expect("mount");
    robot.press(0.0).expect("press");
    robot.move_to(400.0).expect("move");
    assert_eq!(robot.handle_left(), 260.0);

    robot.resize_track(200.0);
    robot.move_to(400.0).expect("move");
    assert_eq!(robot.handle_left(), 160.0);
    robot.release().expect("release");

    assert_eq!(robot.state(), VerifierState::Success);
    assert_eq!(robot.handle_left(), 160.0);
}

#[test]
fn zero_width_layout_never_verifies() {
    let mut robot = VerifierRobot::builder()
        .track_width(0.0)
        .handle_width(0.0)
        .build()
        .expect("mount");

    robot.drag(0.0, 100.0).expect("drag");
    assert_eq!(robot.state(), VerifierState::Idle);
    assert_count(robot.success_count(), 0, "degenerate geometry");
}

#[test]
fn locked_widget_can_be_rearmed_by_host() {
    let mut robot = VerifierRobot::builder().build().expect("mount");
    robot.drag(0.0, 300.0).expect("verify");
    assert!(robot.is_succeeded());

    robot.reset();
    assert!(!robot.is_succeeded());
    assert_eq!(robot.handle_left(), 0.0);

    robot.drag(0.0, 300.0).expect("verify again");
    assert_count(robot.success_count(), 2, "after explicit reset");
}

#[test]
fn rearm_policy_processes_new_gestures() {
    let mut robot = VerifierRobot::new(VerifierOptions::default().with_rearm(RearmPolicy::Rearm))
        .expect("mount");
    robot.drag(0.0, 300.0).expect("verify");
    robot.drag(280.0, 290.0).expect("verify again");
    assert_count(robot.success_count(), 2, "re-armed success");

    robot.drag(280.0, 0.0).expect("drag back");
    assert_eq!(robot.state(), VerifierState::Idle);
    assert!(!robot.is_succeeded());
}

#[test]
fn callback_error_reaches_dispatcher() {
    let mut robot = VerifierRobot::builder()
        .failing_callback("audit log unavailable")
        .build()
        .expect("mount");
    robot.press(0.0).expect("press");
    robot.move_to(300.0).expect("move");

    let err = robot.release().expect_err("callback failure propagates");
    assert_eq!(err.event, "mouseup");
    let cause = err
        .source()
        .and_then(|source| source.downcast_ref::<VerifierError>())
        .expect("verifier error inside dispatch error");
    assert!(matches!(cause, VerifierError::Callback(_)));

    assert!(robot.is_succeeded());
    assert_count(robot.success_count(), 1, "callback invoked once");
}

#[test]
fn teardown_mid_drag_stops_tracking() {
    let mut robot = VerifierRobot::builder().build().expect("mount");
    robot.press(0.0).expect("press");
    robot.move_to(50.0).expect("move");

    assert_eq!(robot.teardown(), 7);
    assert_eq!(robot.document().listener_count(), 0);

    robot.move_to(290.0).expect("move");
    robot.release().expect("release");
    assert_eq!(robot.handle_left(), 50.0);
    assert_count(robot.success_count(), 0, "torn down widget");
}

#[test]
fn widgets_on_one_document_are_independent() {
    let document = Document::new();
    let first_host = document.create_element("div");
    let second_host = document.create_element("div");
    document
        .append_child(document.body(), first_host)
        .expect("append");
    document
        .append_child(document.body(), second_host)
        .expect("append");

    let verified = Rc::new(Cell::new(0));
    let first = mount(
        &document,
        first_host,
        VerifierOptions::default().on_success({
            let verified = verified.clone();
            move || verified.set(verified.get() + 1)
        }),
    )
    .expect("mount first");
    let second = mount(&document, second_host, VerifierOptions::default()).expect("mount second");
    for mounted in [&first, &second] {
        let surface = mounted.surface();
        document
            .set_layout_width(surface.container(), 300.0)
            .expect("layout");
        document
            .set_layout_width(surface.handle(), 40.0)
            .expect("layout");
    }
    assert_eq!(document.listener_count(), 14);

    document
        .dispatch_event(
            EventTarget::Element(first.surface().handle()),
            RawPointerInput::mouse(EventType::MouseDown, 0.0),
        )
        .expect("press");
    document
        .dispatch_event(
            EventTarget::Document,
            RawPointerInput::mouse(EventType::MouseMove, 280.0),
        )
        .expect("move");
    document
        .dispatch_event(
            EventTarget::Document,
            RawPointerInput::mouse(EventType::MouseUp, 280.0),
        )
        .expect("release");

    assert!(first.is_verified());
    assert_eq!(verified.get(), 1);
    assert_eq!(second.state(), VerifierState::Idle);
    assert_eq!(second.handle_left(), 0.0);

    drop(first);
    assert_eq!(document.listener_count(), 7);
}
