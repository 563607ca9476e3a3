use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("No image loaded in viewer")]
    NoImage,

    #[error("Window dimensions not yet determined")]
    DimensionsUnknown,

    #[error("Scale ({scale_x}, {scale_y}) out of bounds [{min}, {max}]")]
    ScaleOutOfBounds {
        scale_x: f64,
        scale_y: f64,
        min: f64,
        max: f64,
    },

    #[error("Transform error: {0}")]
    Transform(String),

    #[error("Unknown color map: {0}")]
    UnknownColorMap(String),

    #[error("Unknown intensity map: {0}")]
    UnknownIntensityMap(String),

    #[error("Unknown color algorithm: {0}")]
    UnknownColorAlgorithm(String),

    #[error("Unknown autocut method: {0}")]
    UnknownAutocutMethod(String),

    #[error("Invalid image: {0}")]
    InvalidImage(String),
}

pub type Result<T> = std::result::Result<T, ViewerError>;
