#![forbid(unsafe_code)]

//! Tracing coverage for gesture handling.
//!
//! Every gesture runs inside a `carousel_gesture` span carrying the gesture
//! kind and pane, and pane commits are logged inside whatever span issued
//! them.
//!
//! Run:
//!   cargo test -p carousel-runtime --test tracing_gesture_spans

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use carousel_core::{CarouselConfig, GestureEvent, Measurements};
use carousel_runtime::{CarouselController, ManualScheduler, TweenSurface};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

#[derive(Debug, Clone)]
struct CapturedSpan {
    name: String,
    fields: HashMap<String, String>,
}

#[derive(Debug, Clone)]
struct CapturedEvent {
    message: String,
    parent_span_name: Option<String>,
}

#[derive(Default, Clone)]
struct Capture {
    spans: Arc<Mutex<Vec<CapturedSpan>>>,
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for Capture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        attrs.record(&mut visitor);
        self.spans.lock().unwrap().push(CapturedSpan {
            name: attrs.metadata().name().to_string(),
            fields: visitor.0.into_iter().collect(),
        });
    }

    fn on_event(&self, event: &tracing::Event<'_>, ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        let message = visitor
            .0
            .iter()
            .find(|(k, _)| k == "message")
            .map(|(_, v)| v.clone())
            .unwrap_or_default();
        let parent_span_name = ctx
            .current_span()
            .id()
            .and_then(|id| ctx.span(id))
            .map(|span_ref| span_ref.name().to_string());
        self.events.lock().unwrap().push(CapturedEvent {
            message,
            parent_span_name,
        });
    }
}

fn with_capture<F: FnOnce()>(f: F) -> Capture {
    let capture = Capture::default();
    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::filter::LevelFilter::TRACE)
        .with(capture.clone());
    tracing::subscriber::with_default(subscriber, f);
    capture
}

fn controller() -> CarouselController<TweenSurface, ManualScheduler> {
    CarouselController::new(
        Measurements::new(300.0, 3, 0.0),
        CarouselConfig::default().with_interval(Some(Duration::from_secs(5))),
        TweenSurface::new(Duration::from_millis(50)),
        ManualScheduler::new(),
    )
}

#[test]
fn gesture_span_carries_kind_and_pane() {
    let capture = with_capture(|| {
        let mut c = controller();
        c.handle_gesture(&GestureEvent::drag(-40.0));
    });

    let spans = capture.spans.lock().unwrap().clone();
    let span = spans
        .iter()
        .find(|s| s.name == "carousel_gesture")
        .expect("gesture span recorded");
    assert_eq!(span.fields.get("kind").map(String::as_str), Some("drag-left"));
    assert_eq!(span.fields.get("pane").map(String::as_str), Some("0"));
    assert!(span.fields.contains_key("delta_x"));
}

#[test]
fn gesture_pause_is_logged_inside_gesture_span() {
    let capture = with_capture(|| {
        let mut c = controller();
        c.handle_gesture(&GestureEvent::release(-200.0));
    });

    let events = capture.events.lock().unwrap().clone();
    let stopped = events
        .iter()
        .find(|e| e.message == "Autoplay stopped")
        .expect("autoplay stop logged");
    assert_eq!(stopped.parent_span_name.as_deref(), Some("carousel_gesture"));

    let issued = events
        .iter()
        .find(|e| e.message == "Pane transition issued")
        .expect("transition logged");
    assert_eq!(issued.parent_span_name.as_deref(), Some("carousel_gesture"));
}

#[test]
fn settle_commit_is_logged_outside_gestures() {
    let capture = with_capture(|| {
        let mut c = controller();
        c.next();
        c.advance_surface(Duration::from_millis(50));
    });

    let events = capture.events.lock().unwrap().clone();
    let committed: Vec<_> = events
        .iter()
        .filter(|e| e.message == "Pane committed")
        .collect();
    // Construction places pane 0 immediately, then the settle commits pane 1.
    assert_eq!(committed.len(), 2);
    assert!(committed.iter().all(|e| e.parent_span_name.is_none()));
}
