#![forbid(unsafe_code)]

//! Integration tests for the carousel controller.
//!
//! Every test drives a headless [`TweenSurface`] with a virtual-clock
//! [`ManualScheduler`], so timing is deterministic: transitions last
//! 100ms and settle on the first `advance_surface` call covering them.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use carousel_core::{CarouselConfig, Direction, GestureEvent, Measurements};
use carousel_runtime::{
    CarouselController, GestureOutcome, Lifecycle, ManualScheduler, Notification, OffsetRequest,
    SlideEvent, TweenSurface,
};

const TRANSITION: Duration = Duration::from_millis(100);
const INTERVAL: Duration = Duration::from_millis(1000);
const EPS: f64 = 1e-9;

type Controller = CarouselController<TweenSurface, ManualScheduler>;
type Log = Rc<RefCell<Vec<Notification>>>;

fn build(panes: usize, config: CarouselConfig) -> Controller {
    CarouselController::new(
        Measurements::new(300.0, panes, 0.0),
        config,
        TweenSurface::new(TRANSITION),
        ManualScheduler::new(),
    )
}

fn still(panes: usize) -> Controller {
    build(panes, CarouselConfig::default().with_interval(None))
}

fn autoplaying(panes: usize) -> Controller {
    build(panes, CarouselConfig::default().with_interval(Some(INTERVAL)))
}

fn record(c: &mut Controller) -> Log {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    c.subscribe(move |n: &Notification| sink.borrow_mut().push(*n));
    log
}

fn settle(c: &mut Controller) {
    assert!(c.advance_surface(TRANSITION), "expected a pane to commit");
}

fn synced_count(log: &Log) -> usize {
    log.borrow()
        .iter()
        .filter(|n| matches!(n, Notification::IndicatorsSynced { .. }))
        .count()
}

// ============================================================================
// Navigation
// ============================================================================

#[test]
fn to_out_of_range_is_ignored() {
    let mut c = still(3);
    let log = record(&mut c);
    let applied = c.surface().applied_count();

    c.to(3);
    c.to(usize::MAX);

    assert_eq!(c.current_pane(), 0);
    assert!(!c.is_sliding());
    assert_eq!(c.surface().applied_count(), applied);
    assert!(log.borrow().is_empty());
}

#[test]
fn to_commits_indicator_once_after_settle() {
    let mut c = still(4);
    let log = record(&mut c);

    c.to(2);
    assert_eq!(c.current_pane(), 2);
    assert!(c.is_sliding());
    assert!(c.is_on_gesture());
    assert_eq!(synced_count(&log), 0);
    assert_eq!(c.surface().indicator(), Some(0));

    settle(&mut c);
    assert!(!c.is_sliding());
    assert_eq!(c.surface().indicator(), Some(2));
    assert_eq!(c.surface().active_panes(), vec![2]);
    assert_eq!(*log.borrow(), vec![Notification::IndicatorsSynced { index: 2 }]);

    // Nothing further settles.
    assert!(!c.advance_surface(TRANSITION));
    assert_eq!(synced_count(&log), 1);
}

#[test]
fn next_emits_slide_slid_then_synced() {
    let mut c = still(3);
    let log = record(&mut c);

    c.next();
    assert_eq!(
        *log.borrow(),
        vec![
            Notification::Slide(SlideEvent {
                direction: Direction::Left,
                related_target: Some(1),
                from: 0,
            }),
            Notification::Slid { index: 1 },
        ]
    );

    settle(&mut c);
    assert_eq!(
        log.borrow().last(),
        Some(&Notification::IndicatorsSynced { index: 1 })
    );
    assert!((c.surface().offset() - (-100.0 / 3.0)).abs() < EPS);
}

#[test]
fn prev_at_first_pane_has_no_related_target() {
    let mut c = still(3);
    let log = record(&mut c);

    c.prev();
    assert_eq!(c.current_pane(), 0);
    assert_eq!(
        log.borrow().first(),
        Some(&Notification::Slide(SlideEvent {
            direction: Direction::Right,
            related_target: None,
            from: 0,
        }))
    );
    settle(&mut c);
    assert_eq!(c.surface().offset(), 0.0);
}

#[test]
fn next_at_last_pane_clamps() {
    let mut c = still(3);
    c.to(2);
    settle(&mut c);
    let log = record(&mut c);

    c.next();
    assert_eq!(c.current_pane(), 2);
    assert_eq!(
        *log.borrow(),
        vec![
            Notification::Slide(SlideEvent {
                direction: Direction::Left,
                related_target: None,
                from: 2,
            }),
            Notification::Slid { index: 2 },
        ]
    );
}

#[test]
fn navigation_supersedes_pending_transition() {
    let mut c = still(4);
    let log = record(&mut c);

    c.next();
    c.to(2);
    assert_eq!(c.current_pane(), 2);
    assert!(c.is_sliding());
    assert_eq!(c.surface().indicator(), Some(0));

    settle(&mut c);
    assert_eq!(c.current_pane(), 2);
    assert_eq!(c.surface().indicator(), Some(2));
    assert_eq!(c.surface().active_panes(), vec![2]);
    assert!((c.surface().offset() - (-50.0)).abs() < EPS);

    let synced: Vec<_> = log
        .borrow()
        .iter()
        .filter(|n| matches!(n, Notification::IndicatorsSynced { .. }))
        .copied()
        .collect();
    assert_eq!(synced, vec![Notification::IndicatorsSynced { index: 2 }]);

    // The superseded transition never settles on its own.
    assert!(!c.advance_surface(TRANSITION));
    assert_eq!(synced_count(&log), 1);
}

#[test]
fn next_during_transition_counts_from_intended_pane() {
    let mut c = still(4);
    c.next();
    c.next();
    assert_eq!(c.current_pane(), 2);
    c.prev();
    assert_eq!(c.current_pane(), 1);
    settle(&mut c);
    assert_eq!(c.surface().indicator(), Some(1));
}

// ============================================================================
// Gestures
// ============================================================================

#[test]
fn drag_at_first_pane_is_resisted() {
    let mut c = still(3);
    let outcome = c.handle_gesture(&GestureEvent::drag(120.0));

    // (100 / 300) * 120 / 3 = 13.33..., scaled by the 0.25 default toughness.
    let expected = (100.0 / 300.0) * 120.0 / 3.0 * 0.25;
    match outcome {
        GestureOutcome::Tracked { offset } => assert!((offset - expected).abs() < EPS),
        other => panic!("unexpected outcome {other:?}"),
    }
    let request = c.surface().last_request().unwrap();
    assert!(!request.animate);
    assert!((request.percent - expected).abs() < EPS);
}

#[test]
fn drag_at_last_pane_is_resisted() {
    let mut c = still(3);
    c.to(2);
    settle(&mut c);

    let outcome = c.handle_gesture(&GestureEvent::drag(-120.0));
    let expected = (100.0 / 300.0) * -120.0 / 3.0 * 0.25 - 200.0 / 3.0;
    assert!(matches!(outcome, GestureOutcome::Tracked { offset } if (offset - expected).abs() < EPS));
}

#[test]
fn interior_drag_is_not_resisted() {
    let mut c = still(3);
    c.to(1);
    settle(&mut c);

    let expected = (100.0 / 300.0) * 120.0 / 3.0 - 100.0 / 3.0;
    let outcome = c.handle_gesture(&GestureEvent::drag(120.0));
    assert!(matches!(outcome, GestureOutcome::Tracked { offset } if (offset - expected).abs() < EPS));

    let expected = (100.0 / 300.0) * -120.0 / 3.0 - 100.0 / 3.0;
    let outcome = c.handle_gesture(&GestureEvent::drag(-120.0));
    assert!(matches!(outcome, GestureOutcome::Tracked { offset } if (offset - expected).abs() < EPS));
}

#[test]
fn drag_away_from_edge_is_not_resisted() {
    let mut c = still(3);
    let expected = (100.0 / 300.0) * -90.0 / 3.0;
    let outcome = c.handle_gesture(&GestureEvent::drag(-90.0));
    assert!(matches!(outcome, GestureOutcome::Tracked { offset } if (offset - expected).abs() < EPS));
}

#[test]
fn custom_toughness_scales_resistance() {
    let mut c = build(
        3,
        CarouselConfig::default()
            .with_interval(None)
            .with_toughness(0.5),
    );
    let expected = (100.0 / 300.0) * 60.0 / 3.0 * 0.5;
    let outcome = c.handle_gesture(&GestureEvent::drag(60.0));
    assert!(matches!(outcome, GestureOutcome::Tracked { offset } if (offset - expected).abs() < EPS));
}

#[test]
fn release_past_threshold_advances() {
    let mut c = still(3);
    c.to(1);
    settle(&mut c);

    let outcome = c.handle_gesture(&GestureEvent::release(-200.0));
    assert_eq!(
        outcome,
        GestureOutcome::Committed {
            direction: Direction::Left
        }
    );
    assert_eq!(c.current_pane(), 2);
}

#[test]
fn release_past_threshold_rightwards_goes_back() {
    let mut c = still(3);
    c.to(1);
    settle(&mut c);

    let outcome = c.handle_gesture(&GestureEvent::release(200.0));
    assert_eq!(
        outcome,
        GestureOutcome::Committed {
            direction: Direction::Right
        }
    );
    assert_eq!(c.current_pane(), 0);
}

#[test]
fn short_release_snaps_back() {
    let mut c = still(3);
    c.to(1);
    settle(&mut c);
    c.handle_gesture(&GestureEvent::drag(-100.0));
    let log = record(&mut c);

    let outcome = c.handle_gesture(&GestureEvent::release(-100.0));
    assert_eq!(outcome, GestureOutcome::SnappedBack);
    assert_eq!(c.current_pane(), 1);
    assert!(c.is_sliding());

    let request = c.surface().last_request().unwrap();
    assert!(request.animate);
    assert_eq!(request.target, Some(1));

    settle(&mut c);
    assert!((c.surface().offset() - (-100.0 / 3.0)).abs() < EPS);
    assert_eq!(*log.borrow(), vec![Notification::IndicatorsSynced { index: 1 }]);
}

#[test]
fn release_exactly_at_threshold_snaps_back() {
    let mut c = still(3);
    let outcome = c.handle_gesture(&GestureEvent::release(-150.0));
    assert_eq!(outcome, GestureOutcome::SnappedBack);
    assert_eq!(c.current_pane(), 0);
}

#[test]
fn swipe_commits_and_stops_detection() {
    let mut c = still(3);
    let outcome = c.handle_gesture(&GestureEvent::swipe(Direction::Left, -40.0));
    assert!(outcome.stops_detection());
    assert_eq!(c.current_pane(), 1);
    settle(&mut c);

    let outcome = c.handle_gesture(&GestureEvent::swipe(Direction::Right, 40.0));
    assert_eq!(
        outcome,
        GestureOutcome::Swiped {
            direction: Direction::Right
        }
    );
    assert_eq!(c.current_pane(), 0);
}

#[test]
fn gestures_during_transition_are_silent() {
    let mut c = autoplaying(4);
    c.next();
    let timer = c.autoplay_handle();
    assert!(timer.is_some());
    let log = record(&mut c);
    let applied = c.surface().applied_count();

    for event in [
        GestureEvent::drag(-80.0),
        GestureEvent::swipe(Direction::Left, -80.0),
        GestureEvent::release(-250.0),
    ] {
        assert_eq!(c.handle_gesture(&event), GestureOutcome::Ignored);
    }

    assert_eq!(c.current_pane(), 1);
    assert_eq!(c.surface().applied_count(), applied);
    assert_eq!(c.autoplay_handle(), timer);
    assert!(log.borrow().is_empty());
}

#[test]
fn gesture_pauses_autoplay_without_user_flag() {
    let mut c = autoplaying(3);
    assert!(c.autoplay_handle().is_some());

    c.handle_gesture(&GestureEvent::drag(-30.0));
    assert!(c.autoplay_handle().is_none());
    assert!(!c.is_paused());
    assert_eq!(c.scheduler().active_count(), 0);
}

// ============================================================================
// Autoplay
// ============================================================================

#[test]
fn autoplay_advances_each_interval() {
    let mut c = autoplaying(3);

    assert_eq!(c.advance_timers(INTERVAL), 1);
    assert_eq!(c.current_pane(), 1);
    settle(&mut c);

    c.advance_timers(INTERVAL);
    assert_eq!(c.current_pane(), 2);
    settle(&mut c);
}

#[test]
fn autoplay_stops_at_last_pane() {
    let mut c = autoplaying(3);
    c.to(2);
    settle(&mut c);
    assert!(c.autoplay_handle().is_some());

    c.advance_timers(INTERVAL);

    assert_eq!(c.current_pane(), 2);
    assert!(!c.is_paused());
    assert!(c.autoplay_handle().is_none());
    assert_eq!(c.scheduler().active_count(), 0);

    // The clamped transition still settles normally.
    settle(&mut c);
    assert_eq!(c.surface().indicator(), Some(2));
}

#[test]
fn tick_during_transition_is_dropped() {
    let mut c = autoplaying(4);
    c.next();
    c.advance_timers(INTERVAL);
    assert_eq!(c.current_pane(), 1);
    assert!(c.autoplay_handle().is_some());
}

#[test]
fn stale_tick_is_ignored() {
    let mut c = autoplaying(3);
    let old = c.autoplay_handle().unwrap();
    c.cycle(false);
    assert_ne!(c.autoplay_handle(), Some(old));

    c.on_autoplay_tick(old);
    assert_eq!(c.current_pane(), 0);
    assert!(!c.is_sliding());
}

#[test]
fn cycle_twice_keeps_one_timer() {
    let mut c = autoplaying(3);
    c.cycle(false);
    c.cycle(false);
    assert_eq!(c.scheduler().active_count(), 1);
    assert!(c.scheduler().is_active(c.autoplay_handle().unwrap()));
}

#[test]
fn user_pause_is_idempotent() {
    let mut c = autoplaying(3);
    c.pause(true);
    c.pause(true);
    assert!(c.is_paused());
    assert!(c.autoplay_handle().is_none());
    assert_eq!(c.scheduler().active_count(), 0);
}

#[test]
fn user_cycle_respects_pause_but_programmatic_clears_it() {
    let mut c = autoplaying(3);
    c.pause(true);

    c.cycle(true);
    assert!(c.is_paused());
    assert!(c.autoplay_handle().is_none());

    c.cycle(false);
    assert!(!c.is_paused());
    assert!(c.autoplay_handle().is_some());
}

#[test]
fn default_config_does_not_autoplay() {
    let mut c = build(3, CarouselConfig::default());
    assert_eq!(c.config().interval, None);
    assert!(c.autoplay_handle().is_none());
    assert_eq!(c.scheduler().active_count(), 0);

    assert_eq!(c.advance_timers(Duration::from_secs(5)), 0);
    assert_eq!(c.current_pane(), 0);
    assert!(!c.state().autoplay_active);
}

#[test]
fn no_interval_means_no_autoplay() {
    let mut c = still(3);
    c.cycle(false);
    assert!(c.autoplay_handle().is_none());
    assert_eq!(c.advance_timers(Duration::from_secs(60)), 0);
    assert_eq!(c.current_pane(), 0);
}

// ============================================================================
// Disabled carousels
// ============================================================================

#[test]
fn single_pane_carousel_is_disabled() {
    for panes in [0, 1] {
        let mut c = autoplaying(panes);
        let log = record(&mut c);

        assert!(c.is_disabled(), "{panes} panes");
        assert_eq!(c.state().lifecycle, Lifecycle::Disabled);
        assert!(!c.surface().indicators_visible());
        assert!(c.autoplay_handle().is_none());

        c.to(0);
        c.next();
        c.prev();
        c.cycle(false);
        assert_eq!(
            c.handle_gesture(&GestureEvent::release(-400.0)),
            GestureOutcome::Ignored
        );

        assert_eq!(c.current_pane(), 0);
        assert!(c.autoplay_handle().is_none());
        assert_eq!(c.surface().applied_count(), 0);
        assert!(log.borrow().is_empty());
    }
}

#[test]
fn disable_abandons_pending_transition() {
    let mut c = autoplaying(3);
    let log = record(&mut c);
    c.next();
    log.borrow_mut().clear();

    let carousel_runtime::Disabled = c.disable();
    assert!(!c.is_sliding());
    assert!(c.autoplay_handle().is_none());
    assert!(!c.advance_surface(TRANSITION));
    assert!(log.borrow().is_empty());
}

// ============================================================================
// Resize
// ============================================================================

#[test]
fn resize_resizes_track_and_keeps_position() {
    let mut c = still(3);
    c.to(1);
    settle(&mut c);

    c.resize(480.0);
    assert_eq!(c.current_pane(), 1);
    assert_eq!(c.surface().track_width(), 1440.0);
    assert_eq!(c.geometry().release_threshold(), 240.0);
    assert!((c.surface().offset() - (-100.0 / 3.0)).abs() < EPS);

    // Threshold follows the new width.
    let outcome = c.handle_gesture(&GestureEvent::release(-200.0));
    assert_eq!(outcome, GestureOutcome::SnappedBack);
}

#[test]
fn construction_places_track_at_first_pane() {
    let c = still(3);
    assert_eq!(
        c.surface().last_request(),
        Some(OffsetRequest::immediate(0.0, 0))
    );
    assert_eq!(c.surface().indicator(), Some(0));
    assert_eq!(c.state().current_pane, 0);
}
