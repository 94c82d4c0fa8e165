//! Detection-and-actuate cycle execution.
//!
//! One cycle queries the vision collaborator a fixed number of times, sounds
//! the buzzer on each not-detected to detected transition, then pauses before
//! the runner begins the next cycle. Failures are absorbed per tick: a failed
//! query or a failed buzz never ends the cycle, and only an explicit stop
//! ends the loop.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use futures::FutureExt;
use log::{debug, error, info};
use tokio::time::sleep;

use crate::domain::{Edge, any_match};
use crate::error::Result;
use crate::resource::{Dependencies, sound_buzzer};

/// Pacing and matching parameters for the cycle.
///
/// The defaults are the production behavior; tests and the demo binary
/// shorten the pacing to run at their own speed.
#[derive(Debug, Clone)]
pub struct CycleConfig {
    /// Detection queries per cycle.
    pub ticks: u32,
    /// Delay between consecutive ticks.
    pub tick_interval: Duration,
    /// Delay after the tick sequence before the next cycle starts.
    pub cycle_pause: Duration,
    /// Confidence a detection must strictly exceed to count.
    pub min_confidence: f64,
    /// Class label that counts as a person, matched case-insensitively.
    pub target_class: String,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            ticks: 100,
            tick_interval: Duration::from_secs(1),
            cycle_pause: Duration::from_secs(10),
            min_confidence: 0.8,
            target_class: "person".to_string(),
        }
    }
}

/// Executes detection-and-actuate cycles against bound collaborators.
pub struct Cycle {
    deps: Dependencies,
    config: CycleConfig,
}

impl Cycle {
    /// Create a cycle executor over the given collaborators.
    pub fn new(deps: Dependencies, config: CycleConfig) -> Self {
        Self { deps, config }
    }

    /// Run one full cycle: the tick sequence plus the trailing pause.
    ///
    /// A panic escaping the tick sequence is logged and treated as a
    /// completed sequence; the pause still elapses before returning.
    pub async fn run(&self) {
        if let Err(payload) = AssertUnwindSafe(self.run_ticks()).catch_unwind().await {
            error!("cycle aborted unexpectedly: {}", panic_message(&*payload));
        }
        sleep(self.config.cycle_pause).await;
    }

    /// The bounded tick sequence. Edge state starts fresh every cycle, so a
    /// person present across cycles re-triggers one buzz per cycle.
    async fn run_ticks(&self) {
        info!("starting detection cycle ({} ticks)", self.config.ticks);
        let mut last_detected = false;

        for tick in 0..self.config.ticks {
            if let Err(err) = self.run_tick(&mut last_detected).await {
                error!("tick {}/{}: {err}", tick + 1, self.config.ticks);
            }
            if tick + 1 < self.config.ticks {
                sleep(self.config.tick_interval).await;
            }
        }
    }

    /// One tick: query, evaluate the edge, buzz on a rising edge.
    ///
    /// `last_detected` is updated only when every fallible step succeeded, so
    /// a failed query or buzz leaves the edge state at its pre-tick value and
    /// the next qualifying tick fires again.
    async fn run_tick(&self, last_detected: &mut bool) -> Result<()> {
        let detections = self.deps.vision.detections(&self.deps.camera).await?;
        debug!("raw detections: {detections:?}");

        let found = any_match(
            &detections,
            &self.config.target_class,
            self.config.min_confidence,
        );

        match Edge::between(*last_detected, found) {
            Edge::Rising => {
                info!("new person detected, sounding buzzer");
                self.deps.actuator.execute(sound_buzzer()).await?;
            }
            Edge::Falling => info!("person no longer detected"),
            Edge::Steady => {}
        }

        *last_detected = found;
        Ok(())
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "non-string panic payload"
    }
}
