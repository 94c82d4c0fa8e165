//! Cancellable background runner for the control loop.
//!
//! At most one run is active at a time. `start` is a no-op while a run is
//! active; `stop` flags the run and aborts its task without blocking. The
//! stop flag is observed between cycles, while the abort ends a wait that is
//! currently suspended mid-cycle.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::info;
use tokio::task::JoinHandle;

use crate::control::cycle::{Cycle, CycleConfig};
use crate::resource::Dependencies;

/// One active run of the loop: its stop flag and its task.
struct RunHandle {
    stop: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

/// Owns the background task that repeats detection cycles until stopped.
pub struct ControlLoop {
    config: CycleConfig,
    run: Option<RunHandle>,
}

impl ControlLoop {
    /// Create a stopped loop with the given cycle pacing.
    pub fn new(config: CycleConfig) -> Self {
        Self { config, run: None }
    }

    /// Whether a run is currently active.
    pub fn is_running(&self) -> bool {
        self.run.as_ref().is_some_and(|run| !run.task.is_finished())
    }

    /// Spawn a new run unless one is already active.
    ///
    /// Each run gets a fresh stop flag, so a stop requested against a
    /// previous run never carries over into this one.
    pub fn start(&mut self, deps: Dependencies) {
        if self.is_running() {
            info!("control loop already running");
            return;
        }

        let stop = Arc::new(AtomicBool::new(false));
        let cycle = Cycle::new(deps, self.config.clone());
        let task = tokio::spawn({
            let stop = Arc::clone(&stop);
            async move {
                while !stop.load(Ordering::SeqCst) {
                    cycle.run().await;
                    tokio::task::yield_now().await;
                }
                info!("control loop stopped");
            }
        });

        self.run = Some(RunHandle { stop, task });
    }

    /// Request cancellation of the active run, if any. Does not block.
    pub fn stop(&mut self) {
        if let Some(run) = self.run.take() {
            run.stop.store(true, Ordering::SeqCst);
            run.task.abort();
        }
    }
}

impl Drop for ControlLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
