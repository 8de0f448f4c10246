#![no_main]

use std::time::Duration;

use arbitrary::Arbitrary;
use carousel_core::{CarouselConfig, Direction, GestureEvent, GestureKind, Measurements};
use carousel_runtime::{CarouselController, ManualScheduler, TweenSurface};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    Drag(i16),
    Swipe(bool),
    Release(i16),
    To(u8),
    Next,
    Prev,
    Pause(bool),
    Cycle(bool),
    Frame(u8),
    Clock(u16),
    Resize(u16),
}

#[derive(Debug, Arbitrary)]
struct Input {
    panes: u8,
    viewport: u16,
    padding: u8,
    interval_ms: Option<u16>,
    transition_ms: u8,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let panes = usize::from(input.panes % 12);
    let config = CarouselConfig::default()
        .with_interval(input.interval_ms.map(|ms| Duration::from_millis(u64::from(ms))))
        .with_transition(Duration::from_millis(u64::from(input.transition_ms)));
    let mut c = CarouselController::new(
        Measurements::new(f64::from(input.viewport), panes, f64::from(input.padding)),
        config.clone(),
        TweenSurface::new(config.transition),
        ManualScheduler::new(),
    );

    for op in input.ops {
        match op {
            Op::Drag(dx) => {
                c.handle_gesture(&GestureEvent::drag(f64::from(dx)));
            }
            Op::Swipe(left) => {
                let kind = if left { GestureKind::SwipeLeft } else { GestureKind::SwipeRight };
                let direction = if left { Direction::Left } else { Direction::Right };
                c.handle_gesture(&GestureEvent::new(kind, 0.0, direction));
            }
            Op::Release(dx) => {
                c.handle_gesture(&GestureEvent::release(f64::from(dx)));
            }
            Op::To(i) => c.to(usize::from(i)),
            Op::Next => c.next(),
            Op::Prev => c.prev(),
            Op::Pause(user) => c.pause(user),
            Op::Cycle(user) => c.cycle(user),
            Op::Frame(ms) => {
                c.advance_surface(Duration::from_millis(u64::from(ms)));
            }
            Op::Clock(ms) => {
                c.advance_timers(Duration::from_millis(u64::from(ms)));
            }
            Op::Resize(w) => c.resize(f64::from(w)),
        }

        // Post-conditions that must always hold:
        if panes > 1 {
            assert!(c.current_pane() < panes, "current pane OOB");
        } else {
            assert!(c.is_disabled(), "degenerate carousel not disabled");
        }
        assert!(c.scheduler().active_count() <= 1, "more than one autoplay timer");
        assert!(c.surface().offset().is_finite(), "non-finite offset");
    }
});
