#![forbid(unsafe_code)]

//! Deterministic replay of a script against a headless controller.
//!
//! The controller runs over a [`TweenSurface`] and a [`ManualScheduler`], so
//! a replay is a pure function of the script, the configuration, and the
//! frame length. `advance` steps are cut into frames; each frame first
//! delivers due autoplay ticks, then steps the surface animation.

use std::cell::RefCell;
use std::io::Write;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use carousel_core::{CarouselConfig, Measurements};
use carousel_runtime::{
    CarouselController, CarouselState, GestureOutcome, ManualScheduler, Notification, TweenSurface,
};
use clap::Args;
use serde::Serialize;

use crate::error::{HarnessError, Result};
use crate::logging::{LogFormat, init_logging};
use crate::script::{ScriptStep, parse_script};

/// Default frame length for `advance` steps (roughly 60 Hz).
pub const DEFAULT_FRAME_MS: u64 = 16;

#[derive(Debug, Clone, Args)]
pub struct ReplayArgs {
    /// JSON-lines script to replay.
    #[arg(long)]
    pub script: PathBuf,

    /// TOML configuration file; defaults apply when omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of panes in the carousel.
    #[arg(long)]
    pub panes: usize,

    /// Viewport width in pixels.
    #[arg(long)]
    pub viewport: f64,

    /// Horizontal item padding in pixels.
    #[arg(long, default_value_t = 0.0)]
    pub padding: f64,

    /// Frame length used to step `advance` intervals, in milliseconds.
    #[arg(long = "frame-ms", default_value_t = DEFAULT_FRAME_MS)]
    pub frame_ms: u64,

    /// Emit logs as JSON on stderr.
    #[arg(long = "log-json")]
    pub log_json: bool,
}

/// Replay parameters independent of the CLI.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayOptions {
    pub measurements: Measurements,
    pub config: CarouselConfig,
    pub frame: Duration,
}

/// One line of replay output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "record", rename_all = "kebab-case")]
pub enum ReplayRecord {
    /// A notification emitted while processing step `step` (0-based).
    Notification {
        step: usize,
        #[serde(flatten)]
        notification: Notification,
    },
    /// What the controller did with a gesture step.
    Gesture { step: usize, outcome: String },
    /// Final controller state.
    Final {
        #[serde(flatten)]
        state: CarouselState,
        offset: f64,
    },
}

/// Replay `steps` and collect every output record.
pub fn replay(steps: &[ScriptStep], options: &ReplayOptions) -> Result<Vec<ReplayRecord>> {
    if options.frame.is_zero() {
        return Err(HarnessError::invalid("frame length must be > 0 ms"));
    }

    let config = options.config.sanitized();
    let surface = TweenSurface::new(config.transition);
    let mut controller =
        CarouselController::new(options.measurements, config, surface, ManualScheduler::new());

    let inbox: Rc<RefCell<Vec<Notification>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&inbox);
    controller.subscribe(move |n: &Notification| sink.borrow_mut().push(*n));

    let mut records = Vec::new();
    for (step, entry) in steps.iter().enumerate() {
        let _span = tracing::debug_span!("replay_step", step).entered();
        if let Some(outcome) = apply_step(&mut controller, entry, options.frame) {
            records.push(ReplayRecord::Gesture {
                step,
                outcome: describe(outcome),
            });
        }
        records.extend(
            inbox
                .borrow_mut()
                .drain(..)
                .map(|notification| ReplayRecord::Notification { step, notification }),
        );
    }

    records.push(ReplayRecord::Final {
        state: controller.state(),
        offset: controller.surface().offset(),
    });
    Ok(records)
}

fn apply_step(
    controller: &mut CarouselController<TweenSurface, ManualScheduler>,
    step: &ScriptStep,
    frame: Duration,
) -> Option<GestureOutcome> {
    match *step {
        ScriptStep::Gesture { .. } => {
            let event = step.gesture_event()?;
            return Some(controller.handle_gesture(&event));
        }
        ScriptStep::To { index } => controller.to(index),
        ScriptStep::Next => controller.next(),
        ScriptStep::Prev => controller.prev(),
        ScriptStep::Pause { user } => controller.pause(user),
        ScriptStep::Cycle { user } => controller.cycle(user),
        ScriptStep::Advance { ms } => {
            let mut remaining = Duration::from_millis(ms);
            while !remaining.is_zero() {
                let dt = remaining.min(frame);
                controller.advance_timers(dt);
                controller.advance_surface(dt);
                remaining -= dt;
            }
        }
        ScriptStep::Resize { width } => controller.resize(width),
    }
    None
}

fn describe(outcome: GestureOutcome) -> String {
    match outcome {
        GestureOutcome::Ignored => "ignored".to_string(),
        GestureOutcome::Tracked { offset } => format!("tracked {offset:.3}%"),
        GestureOutcome::Swiped { direction } => format!("swiped {direction}"),
        GestureOutcome::Committed { direction } => format!("committed {direction}"),
        GestureOutcome::SnappedBack => "snapped-back".to_string(),
    }
}

pub fn run_replay(args: ReplayArgs) -> Result<()> {
    init_logging(LogFormat::from_json_flag(args.log_json));

    if !args.script.exists() {
        return Err(HarnessError::MissingPath { path: args.script });
    }
    let config = match &args.config {
        Some(path) => CarouselConfig::from_toml_file(path)?.validated()?,
        None => CarouselConfig::default(),
    };
    let steps = parse_script(&std::fs::read_to_string(&args.script)?)?;
    tracing::info!(steps = steps.len(), panes = args.panes, "Replaying script");

    let options = ReplayOptions {
        measurements: Measurements::new(args.viewport, args.panes, args.padding),
        config,
        frame: Duration::from_millis(args.frame_ms),
    };
    let records = replay(&steps, &options)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for record in &records {
        serde_json::to_writer(&mut out, record)?;
        writeln!(out)?;
    }
    Ok(())
}
