//! Redraw coalescing: a deferral state machine over an injected timer.

mod scheduler;
mod timer;

pub use scheduler::{FireHook, RedrawDecision, RedrawScheduler};
pub use timer::{ManualTimer, ThreadTimer, Timer, TimerCallback};
