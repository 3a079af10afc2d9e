//! Frame scheduling
//!
//! Every trace loop is started through a [`FrameScheduler`] and returns a
//! [`FrameLoopHandle`]. Cancellation is explicit: restarting a channel must
//! cancel the old handle before spawning a new one, so there is never more
//! than one live loop per surface. [`TokioScheduler`] drives frames off a
//! tokio interval; [`ManualScheduler`] steps frames deterministically and is
//! what the tests (and offline rendering) use.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

/// A frame callback. The argument is seconds elapsed since the loop
/// started.
pub type FrameFn = Box<dyn FnMut(f64) + Send>;

/// Starts repeating frame loops.
pub trait FrameScheduler {
    /// Start a frame loop. The loop runs until the handle is cancelled.
    fn spawn_loop(&self, frame: FrameFn) -> FrameLoopHandle;
}

/// Cancellation handle for one frame loop.
///
/// Cancelling is idempotent; dropping the handle cancels the loop, so a
/// leaked loop cannot keep painting a stale surface.
pub struct FrameLoopHandle {
    active: Arc<AtomicBool>,
    task: Option<JoinHandle<()>>,
}

impl FrameLoopHandle {
    fn new(active: Arc<AtomicBool>, task: Option<JoinHandle<()>>) -> Self {
        Self { active, task }
    }

    /// Whether the loop is still registered.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Stop the loop. Safe to call more than once.
    pub fn cancel(&mut self) {
        self.active.store(false, Ordering::SeqCst);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for FrameLoopHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Frame loops as aborted tokio interval tasks.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    frame_period: Duration,
}

impl TokioScheduler {
    /// Scheduler with an explicit frame period.
    pub fn new(frame_period: Duration) -> Self {
        Self { frame_period }
    }
}

impl Default for TokioScheduler {
    /// Nominal 60 Hz.
    fn default() -> Self {
        Self::new(Duration::from_millis(16))
    }
}

impl FrameScheduler for TokioScheduler {
    fn spawn_loop(&self, mut frame: FrameFn) -> FrameLoopHandle {
        let active = Arc::new(AtomicBool::new(true));
        let flag = active.clone();
        let period = self.frame_period;
        let task = tokio::spawn(async move {
            let start = tokio::time::Instant::now();
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                if !flag.load(Ordering::SeqCst) {
                    break;
                }
                frame(start.elapsed().as_secs_f64());
            }
        });
        FrameLoopHandle::new(active, Some(task))
    }
}

struct Registration {
    active: Arc<AtomicBool>,
    frame: FrameFn,
}

/// Deterministic scheduler: frames run only when [`ManualScheduler::step`]
/// is called, and active registrations can be counted. No runtime required.
#[derive(Default)]
pub struct ManualScheduler {
    loops: Mutex<Vec<Registration>>,
    clock: Mutex<f64>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the simulated clock by `dt` seconds and run every active
    /// frame callback once.
    pub fn step(&self, dt: f64) {
        let t = {
            let mut clock = self.clock.lock().expect("scheduler clock poisoned");
            *clock += dt;
            *clock
        };
        let mut loops = self.loops.lock().expect("scheduler registry poisoned");
        for reg in loops.iter_mut() {
            if reg.active.load(Ordering::SeqCst) {
                (reg.frame)(t);
            }
        }
    }

    /// Number of loops whose handles have not been cancelled.
    pub fn active_count(&self) -> usize {
        self.loops
            .lock()
            .expect("scheduler registry poisoned")
            .iter()
            .filter(|r| r.active.load(Ordering::SeqCst))
            .count()
    }

    /// Total loops ever registered, cancelled ones included.
    pub fn total_registered(&self) -> usize {
        self.loops.lock().expect("scheduler registry poisoned").len()
    }
}

impl FrameScheduler for ManualScheduler {
    fn spawn_loop(&self, frame: FrameFn) -> FrameLoopHandle {
        let active = Arc::new(AtomicBool::new(true));
        debug!("registering manual frame loop");
        self.loops
            .lock()
            .expect("scheduler registry poisoned")
            .push(Registration {
                active: active.clone(),
                frame,
            });
        FrameLoopHandle::new(active, None)
    }
}
