use bevy::prelude::*;
use waxwing::core::gesture::{
    DragRecognizer, GestureEnd, PointerPolicy, PointerSources,
};

#[test]
fn click_without_move_reports_press_position() {
    let mut recognizer = DragRecognizer::default();
    assert!(recognizer.pointer_down(PointerSources::PRIMARY, Vec2::new(10.0, 20.0)));

    let end = recognizer.pointer_up(PointerSources::PRIMARY).unwrap();
    assert_eq!(
        end,
        GestureEnd::Click {
            position: Vec2::new(10.0, 20.0)
        }
    );
    assert!(!recognizer.is_active());
}

#[test]
fn move_latches_free_moving_and_reports_delta() {
    let mut recognizer = DragRecognizer::default();
    recognizer.pointer_down(PointerSources::PRIMARY, Vec2::new(10.0, 10.0));

    let delta = recognizer
        .pointer_move(PointerSources::PRIMARY, Vec2::new(13.0, 14.0))
        .unwrap();
    assert_eq!(delta, Vec2::new(3.0, 4.0));
    assert!(recognizer.session().unwrap().free_moving);

    // every subsequent move reports the accumulated delta
    let delta = recognizer
        .pointer_move(PointerSources::PRIMARY, Vec2::new(20.0, 10.0))
        .unwrap();
    assert_eq!(delta, Vec2::new(10.0, 0.0));

    assert_eq!(
        recognizer.pointer_up(PointerSources::PRIMARY),
        Some(GestureEnd::DragEnd)
    );
}

#[test]
fn move_without_down_is_ignored() {
    let mut recognizer = DragRecognizer::default();
    assert_eq!(
        recognizer.pointer_move(PointerSources::PRIMARY, Vec2::ONE),
        None
    );
    assert_eq!(recognizer.pointer_up(PointerSources::PRIMARY), None);
}

#[test]
fn cancel_destroys_the_session() {
    let mut recognizer = DragRecognizer::default();
    recognizer.pointer_down(PointerSources::PRIMARY, Vec2::ZERO);
    recognizer.pointer_move(PointerSources::PRIMARY, Vec2::ONE);

    assert_eq!(recognizer.pointer_cancel(), Some(GestureEnd::Cancelled));
    assert!(!recognizer.is_active());
    assert_eq!(recognizer.pointer_cancel(), None);
}

#[test]
fn default_policy_rejects_non_primary_sources() {
    let mut recognizer = DragRecognizer::default();
    assert!(!recognizer.pointer_down(PointerSources::TOUCH, Vec2::ZERO));
    assert!(!recognizer.is_active());

    // a touch move cannot hijack a primary session either
    recognizer.pointer_down(PointerSources::PRIMARY, Vec2::ZERO);
    assert_eq!(recognizer.pointer_move(PointerSources::TOUCH, Vec2::ONE), None);
    assert!(!recognizer.session().unwrap().free_moving);
}

#[test]
fn accept_all_policy_admits_every_source() {
    let mut recognizer = DragRecognizer::new(PointerPolicy::accept_all());
    assert!(recognizer.pointer_down(PointerSources::TOUCH, Vec2::ZERO));
    assert!(
        recognizer
            .pointer_move(PointerSources::OTHER, Vec2::ONE)
            .is_some()
    );
    assert_eq!(
        recognizer.pointer_up(PointerSources::TOUCH),
        Some(GestureEnd::DragEnd)
    );
}

#[test]
fn new_down_replaces_a_stale_session() {
    let mut recognizer = DragRecognizer::default();
    recognizer.pointer_down(PointerSources::PRIMARY, Vec2::ZERO);
    recognizer.pointer_move(PointerSources::PRIMARY, Vec2::ONE);

    recognizer.pointer_down(PointerSources::PRIMARY, Vec2::new(5.0, 5.0));
    let session = recognizer.session().unwrap();
    assert_eq!(session.start_position, Vec2::new(5.0, 5.0));
    assert!(!session.free_moving, "down must reset the free-move flag");
}
