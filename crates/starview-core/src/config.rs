use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_COLOR_HASHSIZE, DEFAULT_DEFER_LAGTIME_MS, DEFAULT_SCALE_MAX, DEFAULT_SCALE_MIN,
    DEFAULT_SQUARE_SLOP, DEFAULT_ZOOM_RATE,
};

/// Per-viewer configuration. Every field has a default so partial TOML
/// tables deserialize cleanly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Coalesce rapid redraw requests into one execution per lag interval.
    pub defer_redraw: bool,
    pub defer_lagtime_ms: u64,
    pub scale_min: f64,
    pub scale_max: f64,
    pub zoom_algorithm: ZoomAlgorithm,
    /// Multiplier per zoom level for [`ZoomAlgorithm::Rate`].
    pub zoom_rate: f64,
    pub autocuts: AutoPolicy,
    pub autozoom: AutoPolicy,
    pub autocenter: AutoPolicy,
    pub autocut_method: String,
    pub color_map: String,
    pub intensity_map: String,
    pub color_algorithm: String,
    /// Number of entries in the colour lookup table; index arrays range
    /// over `0..color_hashsize`.
    pub color_hashsize: usize,
    pub interpolation: Interpolation,
    /// Window row 0 is the top of the screen (most toolkits). Data Y grows
    /// upward, so this also flips the rendered array once for display.
    pub window_origin_upper: bool,
    /// Always embed the cutout in a rotation-ready square, even at 0 degrees.
    pub always_square: bool,
    pub square_slop: usize,
    pub bg_color: [u8; 3],
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            defer_redraw: true,
            defer_lagtime_ms: DEFAULT_DEFER_LAGTIME_MS,
            scale_min: DEFAULT_SCALE_MIN,
            scale_max: DEFAULT_SCALE_MAX,
            zoom_algorithm: ZoomAlgorithm::default(),
            zoom_rate: DEFAULT_ZOOM_RATE,
            autocuts: AutoPolicy::Override,
            autozoom: AutoPolicy::On,
            autocenter: AutoPolicy::On,
            autocut_method: "zscale".into(),
            color_map: "gray".into(),
            intensity_map: "ramp".into(),
            color_algorithm: "linear".into(),
            color_hashsize: DEFAULT_COLOR_HASHSIZE,
            interpolation: Interpolation::default(),
            window_origin_upper: true,
            always_square: false,
            square_slop: DEFAULT_SQUARE_SLOP,
            bg_color: [0, 0, 0],
        }
    }
}

/// How zoom levels map to scale factors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoomAlgorithm {
    /// Integer steps: level N is N× magnification, level -N is 1/N.
    #[default]
    Step,
    /// Geometric: scale = zoom_rate ^ level.
    Rate,
}

impl std::fmt::Display for ZoomAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Step => write!(f, "step"),
            Self::Rate => write!(f, "rate"),
        }
    }
}

/// When an automatic adjustment (cuts, zoom, centring) is applied on a new
/// image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutoPolicy {
    /// Every new image.
    On,
    /// Every new image until the user sets the value by hand.
    #[default]
    Override,
    /// The next image only.
    Once,
    Off,
}

impl std::fmt::Display for AutoPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::On => write!(f, "on"),
            Self::Override => write!(f, "override"),
            Self::Once => write!(f, "once"),
            Self::Off => write!(f, "off"),
        }
    }
}

impl AutoPolicy {
    /// Whether the adjustment runs for an incoming image.
    pub fn applies(self) -> bool {
        !matches!(self, Self::Off)
    }

    /// Policy after an automatic application on a new image.
    pub fn after_auto(self) -> Self {
        match self {
            Self::Once => Self::Off,
            other => other,
        }
    }

    /// Policy after the user set the value manually.
    pub fn after_manual(self) -> Self {
        match self {
            Self::Override => Self::Off,
            other => other,
        }
    }
}

/// Resampling used when producing the scaled cutout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    #[default]
    Nearest,
    Bilinear,
}

impl std::fmt::Display for Interpolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nearest => write!(f, "nearest"),
            Self::Bilinear => write!(f, "bilinear"),
        }
    }
}
