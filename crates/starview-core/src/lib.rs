pub mod autocuts;
pub mod buffer;
pub mod config;
pub mod consts;
pub mod error;
mod parallel;
pub mod pipeline;
pub mod redraw;
pub mod render;
pub mod rgbmap;
pub mod view;
pub mod viewer;

pub use buffer::{AstroImage, ImageSource};
pub use config::ViewerConfig;
pub use error::{Result, ViewerError};
pub use pipeline::Whence;
pub use viewer::{ImageViewer, SharedViewer};
