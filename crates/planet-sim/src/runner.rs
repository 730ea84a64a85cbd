//! Background stepping loop

use std::any::Any;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::config::SimulationConfig;
use crate::error::SimulationError;
use crate::shared::SharedSimulator;

/// How fast the stepping loop runs: `steps_per_tick` substeps every
/// `interval`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pacing {
    pub interval: Duration,
    pub steps_per_tick: u32,
}

impl Pacing {
    pub fn new(interval: Duration, steps_per_tick: u32) -> Self {
        Self {
            interval,
            steps_per_tick,
        }
    }

    /// One tick per frame, each running a frame's worth of substeps.
    pub fn from_config(config: &SimulationConfig) -> Self {
        let frame_rate = config.frame_rate.max(1);
        Self {
            interval: Duration::from_secs_f64(1.0 / f64::from(frame_rate)),
            steps_per_tick: config.substeps_per_frame,
        }
    }

    /// No sleeping between ticks.
    pub fn unthrottled(steps_per_tick: u32) -> Self {
        Self::new(Duration::ZERO, steps_per_tick)
    }
}

/// Why the stepping loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    Interrupted,
    /// The configured total time elapsed
    Finished,
}

#[derive(Debug, Default)]
struct Control {
    interrupted: AtomicBool,
    paused: AtomicBool,
}

/// A thread stepping a [`SharedSimulator`] until interrupted or finished.
///
/// The interruption flag is checked before every substep.
pub struct SteppingLoop {
    control: Arc<Control>,
    handle: Option<JoinHandle<Result<LoopExit, SimulationError>>>,
}

impl SteppingLoop {
    pub fn spawn(shared: SharedSimulator, pacing: Pacing) -> Result<Self, SimulationError> {
        let control = Arc::new(Control::default());
        let worker = Arc::clone(&control);
        let handle = thread::Builder::new()
            .name("planet-sim-stepper".into())
            .spawn(move || run(&shared, &worker, pacing))
            .map_err(|error| SimulationError::Spawn(error.to_string()))?;

        Ok(Self {
            control,
            handle: Some(handle),
        })
    }

    pub fn pause(&self) {
        if !self.control.paused.swap(true, Ordering::AcqRel) {
            info!("stepping loop paused");
        }
    }

    pub fn play(&self) {
        if self.control.paused.swap(false, Ordering::AcqRel) {
            info!("stepping loop resumed");
        }
        self.wake();
    }

    pub fn is_paused(&self) -> bool {
        self.control.paused.load(Ordering::Acquire)
    }

    /// The thread has exited on its own or been stopped.
    pub fn is_finished(&self) -> bool {
        self.handle
            .as_ref()
            .map_or(true, |handle| handle.is_finished())
    }

    /// Interrupts the loop and waits for the thread to exit.
    pub fn stop(mut self) -> Result<LoopExit, SimulationError> {
        self.interrupt();
        self.join_worker()
    }

    /// Waits for the loop to finish on its own.
    pub fn join(mut self) -> Result<LoopExit, SimulationError> {
        self.join_worker()
    }

    fn interrupt(&self) {
        self.control.interrupted.store(true, Ordering::Release);
        self.wake();
    }

    /// Unparks a paused worker so it re-reads the control flags.
    fn wake(&self) {
        if let Some(handle) = &self.handle {
            handle.thread().unpark();
        }
    }

    fn join_worker(&mut self) -> Result<LoopExit, SimulationError> {
        match self.handle.take() {
            Some(handle) => handle.join().unwrap_or_else(|payload| Err(worker_panicked(payload))),
            None => Ok(LoopExit::Interrupted),
        }
    }
}

/// Turns the payload of a panicked stepping thread into an error.
pub(crate) fn worker_panicked(payload: Box<dyn Any + Send>) -> SimulationError {
    let message = payload
        .downcast_ref::<&str>()
        .map(|message| message.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    warn!(%message, "stepping thread panicked");
    SimulationError::WorkerPanicked(message)
}

impl Drop for SteppingLoop {
    fn drop(&mut self) {
        if self.handle.is_some() {
            self.interrupt();
            if let Err(error) = self.join_worker() {
                warn!(%error, "stepping loop ended with an error");
            }
        }
    }
}

fn run(
    shared: &SharedSimulator,
    control: &Control,
    pacing: Pacing,
) -> Result<LoopExit, SimulationError> {
    info!(
        interval = ?pacing.interval,
        steps_per_tick = pacing.steps_per_tick,
        "stepping loop started"
    );
    let mut next_tick = Instant::now();

    loop {
        if control.interrupted.load(Ordering::Acquire) {
            info!("stepping loop interrupted");
            return Ok(LoopExit::Interrupted);
        }
        if control.paused.load(Ordering::Acquire) {
            // play() and stop() unpark; spurious wakeups just loop again
            thread::park();
            next_tick = Instant::now();
            continue;
        }
        if shared.latest().finished {
            info!(time = shared.latest().time, "total time reached");
            return Ok(LoopExit::Finished);
        }

        for _ in 0..pacing.steps_per_tick {
            if control.interrupted.load(Ordering::Acquire) {
                info!("stepping loop interrupted");
                return Ok(LoopExit::Interrupted);
            }
            let frame = shared.step()?;
            if frame.finished {
                info!(time = frame.time, step = frame.step, "total time reached");
                return Ok(LoopExit::Finished);
            }
        }

        next_tick += pacing.interval;
        let now = Instant::now();
        if next_tick > now {
            thread::sleep(next_tick - now);
        } else {
            if !pacing.interval.is_zero() {
                debug!(behind = ?(now - next_tick), "stepping loop falling behind");
            }
            next_tick = now;
        }
    }
}
