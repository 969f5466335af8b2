// Host-side tests for the loading overlay tracker.

use reel_web::core::LoadingTracker;

#[test]
fn tracker_reports_percent_and_label() {
    let mut t = LoadingTracker::new(2);
    assert_eq!(t.percent(), 0.0);
    assert_eq!(t.label(), "Loading 0%");
    assert!(!t.is_done());

    t.complete_one();
    assert_eq!(t.label(), "Loading 50%");
    assert_eq!(t.bar_width(), "50%");

    t.complete_one();
    t.complete_one();
    assert_eq!(t.percent(), 100.0);
    assert!(t.is_done());
}

#[test]
fn empty_tracker_is_done() {
    let t = LoadingTracker::new(0);
    assert!(t.is_done());
    assert_eq!(t.label(), "Loading 100%");
}

#[test]
fn thirds_round_in_label() {
    let mut t = LoadingTracker::new(3);
    t.complete_one();
    assert_eq!(t.label(), "Loading 33%");
    t.complete_one();
    assert_eq!(t.label(), "Loading 67%");
}
