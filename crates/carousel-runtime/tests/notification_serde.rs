#![forbid(unsafe_code)]
#![cfg(feature = "serde")]

//! Wire shape of notifications and state snapshots.
//!
//! Run:
//!   cargo test -p carousel-runtime --features serde --test notification_serde

use std::time::Duration;

use carousel_core::{CarouselConfig, Direction, Measurements};
use carousel_runtime::{CarouselController, ManualScheduler, Notification, SlideEvent, TweenSurface};
use serde_json::json;

#[test]
fn notifications_are_tagged_by_event() {
    let slide = Notification::Slide(SlideEvent {
        direction: Direction::Left,
        related_target: Some(3),
        from: 2,
    });
    assert_eq!(
        serde_json::to_value(slide).unwrap(),
        json!({"event": "slide", "direction": "left", "related_target": 3, "from": 2})
    );
    assert_eq!(
        serde_json::to_value(Notification::IndicatorsSynced { index: 1 }).unwrap(),
        json!({"event": "indicators-synced", "index": 1})
    );

    let parsed: Notification = serde_json::from_value(json!({"event": "slid", "index": 4})).unwrap();
    assert_eq!(parsed, Notification::Slid { index: 4 });
}

#[test]
fn state_snapshot_serializes() {
    let c = CarouselController::new(
        Measurements::new(300.0, 3, 0.0),
        CarouselConfig::default().with_interval(Some(Duration::from_secs(5))),
        TweenSurface::new(Duration::from_millis(100)),
        ManualScheduler::new(),
    );
    let value = serde_json::to_value(c.state()).unwrap();
    assert_eq!(value["current_pane"], 0);
    assert_eq!(value["pane_count"], 3);
    assert_eq!(value["autoplay_active"], true);
    assert_eq!(value["lifecycle"], "active");
}
