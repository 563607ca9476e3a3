use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tracing::error;

/// Work to run when a scheduled delay elapses.
pub type TimerCallback = Box<dyn FnOnce() + Send>;

/// One-shot timer supplied by the host environment.
///
/// Scheduling replaces any earlier schedule; `cancel` drops the pending
/// callback without running it. Precision is whatever the host offers.
pub trait Timer: Send + Sync {
    fn schedule(&self, delay: Duration, callback: TimerCallback);
    fn cancel(&self);

    /// Whether a due callback can only reach the viewer through a fire hook.
    /// Timers the host polls itself (and answers with `delayed_redraw`)
    /// return false.
    fn needs_fire_hook(&self) -> bool {
        true
    }
}

/// Timer backed by a short-lived sleeping thread per schedule.
///
/// Every schedule or cancel bumps a generation counter; a woken thread only
/// runs its callback if its generation is still current.
#[derive(Debug, Default)]
pub struct ThreadTimer {
    generation: Arc<AtomicU64>,
}

impl ThreadTimer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Timer for ThreadTimer {
    fn schedule(&self, delay: Duration, callback: TimerCallback) {
        let generation = Arc::clone(&self.generation);
        let ticket = generation.fetch_add(1, Ordering::SeqCst) + 1;
        let spawned = std::thread::Builder::new()
            .name("starview-redraw-timer".into())
            .spawn(move || {
                std::thread::sleep(delay);
                if generation.load(Ordering::SeqCst) == ticket {
                    callback();
                }
            });
        if let Err(e) = spawned {
            error!(error = %e, "failed to spawn redraw timer thread");
        }
    }

    fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

/// Timer that only records what was scheduled; the host (or a test) fires
/// it explicitly.
#[derive(Default)]
pub struct ManualTimer {
    slot: Mutex<Option<(Duration, TimerCallback)>>,
}

impl std::fmt::Debug for ManualTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualTimer")
            .field("pending_delay", &self.pending_delay())
            .finish()
    }
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay of the scheduled callback, if any.
    pub fn pending_delay(&self) -> Option<Duration> {
        self.lock().as_ref().map(|(delay, _)| *delay)
    }

    pub fn is_pending(&self) -> bool {
        self.lock().is_some()
    }

    /// Run the scheduled callback now. Returns false if nothing was pending.
    pub fn fire(&self) -> bool {
        // Release the lock before running: the callback may reschedule.
        let pending = self.lock().take();
        match pending {
            Some((_, callback)) => {
                callback();
                true
            }
            None => false,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<(Duration, TimerCallback)>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Timer for ManualTimer {
    fn schedule(&self, delay: Duration, callback: TimerCallback) {
        *self.lock() = Some((delay, callback));
    }

    fn cancel(&self) {
        self.lock().take();
    }

    fn needs_fire_hook(&self) -> bool {
        false
    }
}
