//! Catching pipeline panics with the backtrace of the panic site.
//!
//! `catch_unwind` only hands back the payload; by the time it returns the
//! stack is gone. A chained panic hook captures the backtrace while the
//! panicking frame is still live, but only on threads inside
//! [`catch_with_backtrace`], so panics elsewhere keep the default behavior.

use std::any::Any;
use std::backtrace::Backtrace;
use std::cell::{Cell, RefCell};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

thread_local! {
    static CAPTURING: Cell<bool> = const { Cell::new(false) };
    static CAPTURED: RefCell<Option<Backtrace>> = const { RefCell::new(None) };
}

static INSTALL_HOOK: Once = Once::new();

fn install_hook() {
    INSTALL_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if CAPTURING.with(Cell::get) {
                let backtrace = Backtrace::force_capture();
                CAPTURED.with(|slot| *slot.borrow_mut() = Some(backtrace));
            } else {
                previous(info);
            }
        }));
    });
}

/// A panic caught by [`catch_with_backtrace`].
#[derive(Debug)]
pub(crate) struct CaughtPanic {
    pub message: String,
    pub backtrace: Option<Backtrace>,
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

/// Run `f`, turning a panic into a [`CaughtPanic`] that carries the backtrace
/// of the panic site.
pub(crate) fn catch_with_backtrace<R>(f: impl FnOnce() -> R) -> Result<R, CaughtPanic> {
    install_hook();
    let was_capturing = CAPTURING.with(|c| c.replace(true));
    let outcome = panic::catch_unwind(AssertUnwindSafe(f));
    CAPTURING.with(|c| c.set(was_capturing));

    outcome.map_err(|payload| CaughtPanic {
        message: panic_message(payload.as_ref()),
        backtrace: CAPTURED.with(|slot| slot.borrow_mut().take()),
    })
}
