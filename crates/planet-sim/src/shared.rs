//! A simulator shared between a stepping thread and interactive callers
//!
//! One mutex guards the simulator: every step, restart, lock change,
//! position override and constant change goes through it. After each write
//! the committed states are published as an immutable [`Frame`] that readers
//! fetch without touching that mutex, and a completion signal wakes anyone
//! waiting for a substep or for a queued drag move to land.

use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError, RwLock, TryLockError};
use std::time::Duration;

use nalgebra::Point2;
use tracing::{debug, warn};

use crate::config::SimulationConfig;
use crate::diagnostics;
use crate::error::SimulationError;
use crate::forces::ForceModelKind;
use crate::planet::{Planet, PlanetState};
use crate::simulator::Simulator;

/// Snapshot of the simulator published after every write.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Substeps since start or the last restart
    pub step: u64,
    /// Substeps committed through this handle, never reset
    pub sequence: u64,
    /// Writes committed through this handle, steps included; never reset
    pub revision: u64,
    pub time: f64,
    pub states: Vec<PlanetState>,
    pub kinetic_energy: f64,
    pub potential_energy: f64,
    /// The configured total time has elapsed
    pub finished: bool,
}

impl Frame {
    /// Copies the committed states. Energies stay zero until
    /// [`measure`](Self::measure), which needs no simulator.
    fn capture(simulator: &Simulator, sequence: u64, revision: u64) -> Self {
        Self {
            step: simulator.step_count(),
            sequence,
            revision,
            time: simulator.time(),
            states: simulator.states().to_vec(),
            kinetic_energy: 0.0,
            potential_energy: 0.0,
            finished: simulator.is_finished(),
        }
    }

    fn measure(mut self, planets: &[Planet], force: &ForceModelKind) -> Self {
        self.kinetic_energy = diagnostics::kinetic_energy(planets, &self.states);
        self.potential_energy = force
            .as_force_model()
            .potential_energy(planets, &self.states);
        self
    }

    pub fn total_energy(&self) -> f64 {
        self.kinetic_energy + self.potential_energy
    }
}

#[derive(Debug, Clone, Copy)]
struct QueuedMove {
    ticket: u64,
    index: usize,
    position: Point2<f64>,
}

#[derive(Debug, Default)]
struct Progress {
    /// Completed substeps whose frame is published
    steps: u64,
    /// Substeps committed, assigned under the simulator lock
    sequence: u64,
    /// Writes committed, assigned under the simulator lock
    revision: u64,
    /// Position overrides waiting for the simulator, oldest first
    moves: Vec<QueuedMove>,
    /// Last ticket handed out to a queued move
    issued: u64,
    /// Last ticket applied to the simulator
    applied: u64,
}

struct Shared {
    simulator: Mutex<Simulator>,
    /// Copy of the simulator's planets, which never change after construction
    planets: Arc<[Planet]>,
    published: RwLock<Arc<Frame>>,
    progress: Mutex<Progress>,
    committed: Condvar,
}

/// Cloneable handle to one simulator behind one mutex.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use planet_sim::config::{ElasticConstants, ForceConfig, SimulationConfig};
/// use planet_sim::planet::Planet;
/// use planet_sim::shared::SharedSimulator;
///
/// let config = SimulationConfig::new(ForceConfig::ElasticMesh(ElasticConstants::default()))
///     .with_planet(Planet::new(0.0, 0.0))
///     .with_planet(Planet::new(1.0, 0.0));
/// let shared = SharedSimulator::from_config(config).unwrap();
///
/// let stepper = shared.clone();
/// let worker = std::thread::spawn(move || stepper.step().map(|frame| frame.sequence));
///
/// assert_eq!(shared.wait_for_step(0, Duration::from_secs(5)), Ok(1));
/// assert_eq!(worker.join().unwrap(), Ok(1));
/// ```
#[derive(Clone)]
pub struct SharedSimulator {
    inner: Arc<Shared>,
}

impl SharedSimulator {
    pub fn new(simulator: Simulator) -> Self {
        let planets: Arc<[Planet]> = simulator.planets().into();
        let frame = Frame::capture(&simulator, 0, 0).measure(&planets, simulator.force_model());
        Self {
            inner: Arc::new(Shared {
                simulator: Mutex::new(simulator),
                planets,
                published: RwLock::new(Arc::new(frame)),
                progress: Mutex::new(Progress::default()),
                committed: Condvar::new(),
            }),
        }
    }

    pub fn from_config(config: SimulationConfig) -> Result<Self, SimulationError> {
        Simulator::new(config).map(Self::new)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Simulator>, SimulationError> {
        self.inner.simulator.lock().map_err(|_| {
            warn!("simulator lock poisoned");
            SimulationError::LockPoisoned
        })
    }

    fn progress(&self) -> MutexGuard<'_, Progress> {
        self.inner
            .progress
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Applies queued moves and copies the committed states, then releases
    /// the simulator before measuring energies and publishing the frame.
    ///
    /// Revisions are handed out under the simulator lock, so a frame that
    /// loses the race to publish against a newer one is dropped and the
    /// published frame never goes backwards.
    fn commit(&self, mut simulator: MutexGuard<'_, Simulator>, stepped: bool) -> Arc<Frame> {
        let (moves, sequence, revision) = {
            let mut progress = self.progress();
            progress.sequence += u64::from(stepped);
            progress.revision += 1;
            (
                std::mem::take(&mut progress.moves),
                progress.sequence,
                progress.revision,
            )
        };
        for queued in &moves {
            if let Err(error) = simulator.set_planet_location(queued.index, queued.position) {
                warn!(index = queued.index, %error, "dropped queued move");
            }
        }

        let frame = Frame::capture(&simulator, sequence, revision);
        let force = simulator.force_model().clone();
        drop(simulator);

        let frame = Arc::new(frame.measure(&self.inner.planets, &force));
        {
            let mut published = self
                .inner
                .published
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            if frame.revision > published.revision {
                *published = Arc::clone(&frame);
            }
        }

        {
            let mut progress = self.progress();
            progress.steps = progress.steps.max(sequence);
            if let Some(last) = moves.last() {
                progress.applied = progress.applied.max(last.ticket);
            }
        }
        self.inner.committed.notify_all();
        frame
    }

    /// Runs one substep and returns the frame it committed.
    pub fn step(&self) -> Result<Arc<Frame>, SimulationError> {
        let mut simulator = self.lock()?;
        simulator.step();
        Ok(self.commit(simulator, true))
    }

    /// Runs `operation` on the simulator under the lock, then publishes.
    pub fn with_simulator<R>(
        &self,
        operation: impl FnOnce(&mut Simulator) -> R,
    ) -> Result<R, SimulationError> {
        let mut simulator = self.lock()?;
        let result = operation(&mut simulator);
        self.commit(simulator, false);
        Ok(result)
    }

    /// Like [`with_simulator`](Self::with_simulator) but returns `Ok(None)`
    /// instead of blocking when the simulator is busy.
    pub fn try_with_simulator<R>(
        &self,
        operation: impl FnOnce(&mut Simulator) -> R,
    ) -> Result<Option<R>, SimulationError> {
        match self.inner.simulator.try_lock() {
            Ok(mut simulator) => {
                let result = operation(&mut simulator);
                self.commit(simulator, false);
                Ok(Some(result))
            }
            Err(TryLockError::WouldBlock) => Ok(None),
            Err(TryLockError::Poisoned(_)) => {
                warn!("simulator lock poisoned");
                Err(SimulationError::LockPoisoned)
            }
        }
    }

    /// The most recently published frame. Never waits for a step.
    pub fn latest(&self) -> Arc<Frame> {
        let frame = self
            .inner
            .published
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&frame)
    }

    /// Substeps committed through this handle so far.
    pub fn completed_steps(&self) -> u64 {
        self.progress().steps
    }

    /// Blocks until more than `after` substeps have completed, returning the
    /// new count, or fails with [`SimulationError::Timeout`].
    pub fn wait_for_step(&self, after: u64, timeout: Duration) -> Result<u64, SimulationError> {
        let progress = self.progress();
        let (progress, wait) = self
            .inner
            .committed
            .wait_timeout_while(progress, timeout, |progress| progress.steps <= after)
            .unwrap_or_else(PoisonError::into_inner);
        if wait.timed_out() && progress.steps <= after {
            Err(SimulationError::Timeout)
        } else {
            Ok(progress.steps)
        }
    }

    /// Queues a move for whoever holds the simulator and waits until it
    /// has been applied.
    fn queue_move(
        &self,
        index: usize,
        position: Point2<f64>,
        timeout: Duration,
    ) -> Result<(), SimulationError> {
        let ticket = {
            let mut progress = self.progress();
            progress.issued += 1;
            let ticket = progress.issued;
            progress.moves.push(QueuedMove {
                ticket,
                index,
                position,
            });
            ticket
        };

        // the holder may have committed before the move was queued
        if self.try_with_simulator(|_| ())?.is_some() {
            return Ok(());
        }

        let progress = self.progress();
        let (mut progress, wait) = self
            .inner
            .committed
            .wait_timeout_while(progress, timeout, |progress| progress.applied < ticket)
            .unwrap_or_else(PoisonError::into_inner);
        if !wait.timed_out() {
            return Ok(());
        }

        // a move already taken off the queue is being applied right now
        let before = progress.moves.len();
        progress.moves.retain(|queued| queued.ticket != ticket);
        if progress.moves.len() == before {
            return Ok(());
        }
        warn!(index, "drag gave up waiting for the simulator");
        Err(SimulationError::Timeout)
    }

    pub fn restart(&self) -> Result<(), SimulationError> {
        self.with_simulator(Simulator::restart)
    }

    pub fn add_locked_planet(&self, index: usize) -> Result<bool, SimulationError> {
        self.with_simulator(|simulator| simulator.add_locked_planet(index))?
    }

    pub fn remove_locked_planet(&self, index: usize) -> Result<bool, SimulationError> {
        self.with_simulator(|simulator| simulator.remove_locked_planet(index))?
    }

    pub fn toggle_locked_planet(&self, index: usize) -> Result<bool, SimulationError> {
        self.with_simulator(|simulator| simulator.toggle_locked_planet(index))?
    }

    pub fn set_planet_location(
        &self,
        index: usize,
        position: Point2<f64>,
    ) -> Result<(), SimulationError> {
        self.with_simulator(|simulator| simulator.set_planet_location(index, position))?
    }

    pub fn set_elastic_constant(&self, elastic: f64) -> Result<(), SimulationError> {
        self.with_simulator(|simulator| simulator.set_elastic_constant(elastic))?
    }

    pub fn set_resting_distance(&self, resting_distance: f64) -> Result<(), SimulationError> {
        self.with_simulator(|simulator| simulator.set_resting_distance(resting_distance))?
    }

    pub fn set_friction(&self, friction: f64) -> Result<(), SimulationError> {
        self.with_simulator(|simulator| simulator.set_friction(friction))?
    }

    /// Starts dragging planet `index`: the planet is locked until the
    /// session is released.
    pub fn begin_drag(&self, index: usize) -> Result<DragSession, SimulationError> {
        let newly_locked = self.add_locked_planet(index)?;
        debug!(index, "drag started");
        Ok(DragSession {
            shared: self.clone(),
            index,
            was_locked: !newly_locked,
            released: false,
        })
    }
}

/// An interactive drag of one planet.
///
/// The planet stays locked while dragged. Dropping the session without
/// calling [`release`](Self::release) releases it too.
pub struct DragSession {
    shared: SharedSimulator,
    index: usize,
    was_locked: bool,
    released: bool,
}

impl DragSession {
    pub fn index(&self) -> usize {
        self.index
    }

    /// Moves the dragged planet to `position`.
    ///
    /// If a substep is in flight, the move is queued and applied as that
    /// substep commits. Waits for that at most `timeout`; on timeout the
    /// move is discarded.
    pub fn move_to(&self, position: Point2<f64>, timeout: Duration) -> Result<(), SimulationError> {
        let index = self.index;
        match self
            .shared
            .try_with_simulator(|simulator| simulator.set_planet_location(index, position))?
        {
            Some(moved) => moved,
            None => self.shared.queue_move(index, position, timeout),
        }
    }

    /// Ends the drag, unlocking the planet unless it was locked before.
    pub fn release(mut self) -> Result<(), SimulationError> {
        self.released = true;
        self.unlock()
    }

    fn unlock(&self) -> Result<(), SimulationError> {
        debug!(index = self.index, "drag released");
        if self.was_locked {
            return Ok(());
        }
        self.shared.remove_locked_planet(self.index).map(|_| ())
    }
}

impl Drop for DragSession {
    fn drop(&mut self) {
        if !self.released {
            if let Err(error) = self.unlock() {
                warn!(index = self.index, %error, "failed to release dragged planet");
            }
        }
    }
}
