use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::ImageViewer;

/// Thread-safe handle to a viewer whose deferred redraws are driven by its
/// timer.
///
/// The timer callback holds only a weak reference, so dropping the last
/// handle lets the viewer go even with a redraw still scheduled.
#[derive(Clone, Debug)]
pub struct SharedViewer {
    inner: Arc<Mutex<ImageViewer>>,
}

impl SharedViewer {
    pub fn new(viewer: ImageViewer) -> Self {
        let inner = Arc::new(Mutex::new(viewer));
        let weak = Arc::downgrade(&inner);
        let hook = Arc::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .delayed_redraw();
            }
        });
        inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .scheduler()
            .set_fire_hook(hook);
        Self { inner }
    }

    pub fn lock(&self) -> MutexGuard<'_, ImageViewer> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with exclusive access to the viewer.
    pub fn with<R>(&self, f: impl FnOnce(&mut ImageViewer) -> R) -> R {
        f(&mut self.lock())
    }
}
