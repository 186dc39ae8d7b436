//! Geometry and state-machine properties exercised through the full
//! mount → dispatch → render path.

use slideverify_core::{VerifierOptions, VerifierState, DEFAULT_TEXT};
use slideverify_testing::prelude::*;
use slideverify_testing::robot_assertions::{assert_contains_text, assert_count, assert_within};

fn robot() -> VerifierRobot {
    VerifierRobot::builder()
        .track_width(300.0)
        .handle_width(40.0)
        .build()
        .expect("mount succeeds")
}

#[test]
fn handle_stays_clamped_for_any_delta() {
    let mut robot = robot();
    robot.press(100.0).expect("press");

    for x in [-10_000.0, -250.0, -1.0, 0.0, 99.0, 100.0, 240.0, 359.0, 360.0, 361.0, 5_000.0] {
        robot.move_to(x).expect("move");
        assert_within(
            robot.handle_left(),
            0.0,
            260.0,
            &format!("handle at x={}", x),
        );
        assert_eq!(robot.rendered_handle_left(), Some(robot.handle_left()));
    }
}

#[test]
fn progress_tracks_handle_center_after_every_move() {
    let mut robot = robot();
    robot.press(0.0).expect("press");

    for x in [0.0, 13.5, 77.0, 140.25, 259.0, 400.0] {
        robot.move_to(x).expect("move");
        let expected = robot.handle_left() + 20.0;
        assert_eq!(robot.progress_width(), expected);
        assert_eq!(robot.rendered_progress_width(), Some(expected));
    }
}

#[test]
fn release_past_threshold_succeeds() {
    let mut robot = robot();
    robot.press(0.0).expect("press");
    robot.move_to(261.0).expect("move");
    assert_eq!(robot.handle_left(), 260.0);
    robot.release().expect("release");

    assert_eq!(robot.state(), VerifierState::Success);
    assert!(robot.is_succeeded());
    assert_count(robot.success_count(), 1, "success callback");
}

#[test]
fn release_just_past_threshold_snaps_to_end() {
    let mut robot = robot();
    robot.press(0.0).expect("press");
    robot.move_to(256.0).expect("move");
    robot.release().expect("release");

    assert_eq!(robot.state(), VerifierState::Success);
    assert_eq!(robot.handle_left(), 260.0);
    assert_eq!(robot.rendered_handle_left(), Some(260.0));
    assert_eq!(robot.rendered_progress_width(), Some(280.0));
}

#[test]
fn release_short_of_threshold_resets() {
    let mut robot = robot();
    robot.press(0.0).expect("press");
    robot.move_to(254.0).expect("move");
    robot.release().expect("release");

    assert_eq!(robot.state(), VerifierState::Idle);
    assert!(!robot.is_succeeded());
    assert_eq!(robot.handle_left(), 0.0);
    assert_eq!(robot.rendered_handle_left(), Some(0.0));
    assert_eq!(robot.rendered_progress_width(), Some(0.0));
    assert_eq!(robot.label(), DEFAULT_TEXT);
    assert_count(robot.success_count(), 0, "success callback");
}

#[test]
fn release_exactly_at_threshold_is_not_enough() {
    let mut robot = robot();
    robot.press(0.0).expect("press");
    robot.move_to(255.0).expect("move");
    robot.release().expect("release");

    assert_eq!(robot.state(), VerifierState::Idle);
}

#[test]
fn failed_release_at_origin_is_idempotent() {
    let mut robot = robot();
    robot.press(50.0).expect("press");
    robot.release().expect("release");

    assert_eq!(robot.state(), VerifierState::Idle);
    assert_eq!(robot.handle_left(), 0.0);
    assert_eq!(robot.label(), DEFAULT_TEXT);
    let markup = robot.markup();

    robot.press(50.0).expect("press");
    robot.release().expect("release");
    assert_eq!(robot.handle_left(), 0.0);
    assert_eq!(robot.label(), DEFAULT_TEXT);
    assert_eq!(robot.markup(), markup);
}

#[test]
fn callback_fires_once_per_successful_gesture_only() {
    let mut robot = robot();

    robot.drag(0.0, 100.0).expect("short drag");
    assert_count(robot.success_count(), 0, "after short drag");

    robot.drag(0.0, 300.0).expect("full drag");
    assert_count(robot.success_count(), 1, "after full drag");

    robot.drag(260.0, 320.0).expect("drag on verified widget");
    assert_count(robot.success_count(), 1, "locked widget ignores gestures");
}

#[test]
fn moves_and_releases_before_any_press_change_nothing() {
    let mut robot = robot();
    let revision = robot.revision();
    let markup = robot.markup();

    robot.move_to(200.0).expect("move");
    robot.release().expect("release");
    robot.touch_move(120.0).expect("touch move");
    robot.touch_end().expect("touch end");

    assert_eq!(robot.state(), VerifierState::Idle);
    assert_eq!(robot.revision(), revision);
    assert_eq!(robot.markup(), markup);
}

#[test]
fn end_to_end_slide_and_done() {
    let mut robot = VerifierRobot::new(
        VerifierOptions::default()
            .with_default_text("slide")
            .with_success_text("done"),
    )
    .expect("mount succeeds");
    assert_eq!(robot.label(), "slide");

    robot.press(10.0).expect("press");
    robot.move_to(270.0).expect("move");
    assert_eq!(robot.handle_left(), 260.0);
    robot.release().expect("release");

    assert_eq!(robot.state(), VerifierState::Success);
    assert_eq!(robot.label(), "done");
    assert_eq!(robot.handle_left(), 260.0);
    assert_count(robot.success_count(), 1, "onSuccess");
    assert_contains_text(&robot.handle_icon_markup(), "fa-check", "success icon");
    assert_contains_text(
        &robot.markup(),
        "slider-container slider-success",
        "class hook",
    );
}

#[test]
fn press_off_the_handle_does_not_start_a_drag() {
    let mut robot = robot();
    let event = robot.press_track(150.0).expect("press");
    assert!(!event.is_default_prevented());

    robot.move_to(300.0).expect("move");
    assert_eq!(robot.handle_left(), 0.0);
    assert_eq!(robot.state(), VerifierState::Idle);
}

#[test]
fn second_press_mid_drag_restarts_from_current_offset() {
    let mut robot = robot();
    robot.press(0.0).expect("press");
    robot.move_to(80.0).expect("move");

    robot.press(200.0).expect("second press");
    robot.move_to(230.0).expect("move");
    assert_eq!(robot.handle_left(), 110.0);
}
