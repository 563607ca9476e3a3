use std::sync::Arc;

use super::types::{Cutout, IndexArray, RgbObject, Transformed};
use super::whence::Whence;

/// One level of the render cache. Stored values are shared so a reader
/// holding an old result is unaffected when the slot is replaced.
#[derive(Debug)]
pub enum CacheSlot<T> {
    Valid(Arc<T>),
    Invalid,
}

impl<T> Default for CacheSlot<T> {
    fn default() -> Self {
        Self::Invalid
    }
}

impl<T> CacheSlot<T> {
    pub fn get(&self) -> Option<Arc<T>> {
        match self {
            Self::Valid(v) => Some(Arc::clone(v)),
            Self::Invalid => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    pub fn store(&mut self, value: T) -> Arc<T> {
        let value = Arc::new(value);
        *self = Self::Valid(Arc::clone(&value));
        value
    }

    pub fn invalidate(&mut self) {
        *self = Self::Invalid;
    }
}

/// The four dependent pipeline caches, cutout -> transform -> visual -> rgb.
///
/// Invariant: if a level is invalid, every later level is invalid too.
#[derive(Debug, Default)]
pub struct RenderCache {
    pub(crate) cutout: CacheSlot<Cutout>,
    pub(crate) transformed: CacheSlot<Transformed>,
    pub(crate) visual: CacheSlot<IndexArray>,
    pub(crate) rgb: CacheSlot<RgbObject>,
}

impl RenderCache {
    /// Drop every level that must be recomputed for `whence`, cascading to
    /// all levels that depend on it.
    pub fn invalidate(&mut self, whence: Whence) {
        if whence <= Whence::Geometry {
            self.cutout.invalidate();
        }
        if whence <= Whence::Transform {
            self.transformed.invalidate();
        }
        if whence <= Whence::Visual {
            self.visual.invalidate();
        }
        if whence <= Whence::Color {
            self.rgb.invalidate();
        }
    }

    pub fn invalidate_all(&mut self) {
        self.invalidate(Whence::Geometry);
    }

    pub fn cutout(&self) -> Option<Arc<Cutout>> {
        self.cutout.get()
    }

    pub fn transformed(&self) -> Option<Arc<Transformed>> {
        self.transformed.get()
    }

    pub fn visual(&self) -> Option<Arc<IndexArray>> {
        self.visual.get()
    }

    pub fn rgb(&self) -> Option<Arc<RgbObject>> {
        self.rgb.get()
    }

    /// Lowest whence whose cache is missing, or `None` when everything up to
    /// the RGB object is valid.
    pub fn first_invalid(&self) -> Option<Whence> {
        if !self.cutout.is_valid() {
            Some(Whence::Geometry)
        } else if !self.transformed.is_valid() {
            Some(Whence::Transform)
        } else if !self.visual.is_valid() {
            Some(Whence::Visual)
        } else if !self.rgb.is_valid() {
            Some(Whence::Color)
        } else {
            None
        }
    }
}
