//! The render pipeline: cutout -> transform -> visual -> colour, with a
//! cache per stage and an explicit invalidation cascade.

pub mod cache;
pub mod cutout;
pub mod transform;
mod types;
pub mod visual;
mod whence;

pub use cache::{CacheSlot, RenderCache};
pub use cutout::{extract_cutout, CutoutOptions};
pub use transform::{apply_transforms, TransformParams};
pub use types::{Cutout, DataRect, IndexArray, RgbObject, StageCounters, Transformed};
pub use visual::apply_visuals;
pub use whence::Whence;
