use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::pipeline::Whence;

use super::timer::Timer;

/// Called when a deferred redraw comes due.
pub type FireHook = Arc<dyn Fn() + Send + Sync>;

/// What the caller must do after [`RedrawScheduler::request`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RedrawDecision {
    /// Run the pipeline now from this whence.
    Immediate(Whence),
    /// A timer is (now) pending; the request was folded into it.
    Deferred,
    /// Redraws are held; the request was folded into the pending whence.
    Held,
}

#[derive(Debug, Default)]
struct SchedulerState {
    pending: Option<Whence>,
    timer_pending: bool,
    holds: usize,
    last_redraw: Option<Instant>,
}

/// Coalesces redraw requests into at most one pipeline execution per lag
/// interval, always keeping the most expensive whence requested.
///
/// The scheduler only decides; the owner runs the pipeline and reports back
/// with [`mark_complete`](Self::mark_complete).
///
/// Deferral needs someone to answer the timer. A timer that calls back on
/// its own (see [`Timer::needs_fire_hook`]) only defers once a fire hook is
/// installed; until then every request is immediate.
pub struct RedrawScheduler {
    timer: Arc<dyn Timer>,
    defer: bool,
    lag: Duration,
    state: Mutex<SchedulerState>,
    fire_hook: Arc<Mutex<Option<FireHook>>>,
}

impl std::fmt::Debug for RedrawScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedrawScheduler")
            .field("defer", &self.defer)
            .field("deferring", &self.is_deferring())
            .field("lag", &self.lag)
            .field("state", &*self.lock())
            .finish_non_exhaustive()
    }
}

fn min_whence(current: Option<Whence>, whence: Whence) -> Whence {
    current.map_or(whence, |w| w.min(whence))
}

impl RedrawScheduler {
    pub fn new(timer: Arc<dyn Timer>, defer: bool, lag: Duration) -> Self {
        Self {
            timer,
            defer,
            lag,
            state: Mutex::new(SchedulerState::default()),
            fire_hook: Arc::new(Mutex::new(None)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SchedulerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether requests inside the lag are currently deferred.
    pub fn is_deferring(&self) -> bool {
        self.defer && (!self.timer.needs_fire_hook() || self.has_fire_hook())
    }

    pub fn has_fire_hook(&self) -> bool {
        self.fire_hook
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn lag(&self) -> Duration {
        self.lag
    }

    /// Install the function the timer calls when a deferred redraw is due.
    pub fn set_fire_hook(&self, hook: FireHook) {
        *self.fire_hook.lock().unwrap_or_else(PoisonError::into_inner) = Some(hook);
    }

    /// Register a redraw request.
    pub fn request(&self, whence: Whence) -> RedrawDecision {
        let mut state = self.lock();

        if state.holds > 0 {
            state.pending = Some(min_whence(state.pending, whence));
            return RedrawDecision::Held;
        }

        if !self.is_deferring() {
            let whence = min_whence(state.pending.take(), whence);
            if state.timer_pending {
                state.timer_pending = false;
                self.timer.cancel();
            }
            return RedrawDecision::Immediate(whence);
        }

        if state.timer_pending {
            // The original deadline still governs.
            state.pending = Some(min_whence(state.pending, whence));
            return RedrawDecision::Deferred;
        }

        let elapsed = state.last_redraw.map(|t| t.elapsed());
        match elapsed {
            Some(elapsed) if elapsed <= self.lag => {
                let delay = self.lag - elapsed;
                state.pending = Some(min_whence(state.pending, whence));
                state.timer_pending = true;
                // The hook is looked up when the timer fires, not now.
                let slot = Arc::clone(&self.fire_hook);
                self.timer.schedule(
                    delay,
                    Box::new(move || {
                        let hook = slot.lock().unwrap_or_else(PoisonError::into_inner).clone();
                        match hook {
                            Some(hook) => hook(),
                            None => warn!("deferred redraw due with no fire hook installed"),
                        }
                    }),
                );
                debug!(%whence, delay_ms = delay.as_secs_f64() * 1000.0, "redraw deferred");
                RedrawDecision::Deferred
            }
            _ => RedrawDecision::Immediate(min_whence(state.pending.take(), whence)),
        }
    }

    /// Consume the accumulated whence when the deferred timer fires.
    pub fn take_pending(&self) -> Option<Whence> {
        let mut state = self.lock();
        state.timer_pending = false;
        if state.holds > 0 {
            return None;
        }
        state.pending.take()
    }

    /// Record that a pipeline execution finished (successfully or not).
    pub fn mark_complete(&self) {
        self.lock().last_redraw = Some(Instant::now());
    }

    /// Minimum whence waiting to be drawn.
    pub fn pending_whence(&self) -> Option<Whence> {
        self.lock().pending
    }

    pub fn is_timer_pending(&self) -> bool {
        self.lock().timer_pending
    }

    pub fn is_held(&self) -> bool {
        self.lock().holds > 0
    }

    /// Suspend redraws; requests accumulate until the matching release.
    pub fn hold(&self) {
        self.lock().holds += 1;
    }

    /// Undo one [`hold`](Self::hold). When the last hold is released and a
    /// redraw accumulated meanwhile, returns its whence for the caller to
    /// request again.
    pub fn release(&self) -> Option<Whence> {
        let mut state = self.lock();
        state.holds = state.holds.saturating_sub(1);
        if state.holds > 0 || state.timer_pending {
            return None;
        }
        state.pending.take()
    }

    /// Drop any pending redraw and its timer.
    pub fn cancel(&self) {
        let mut state = self.lock();
        if state.timer_pending {
            self.timer.cancel();
        }
        state.timer_pending = false;
        state.pending = None;
    }
}
