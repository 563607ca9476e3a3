use crate::error::{Result, ViewerError};

/// Number of levels in the `stairs` intensity map.
const STAIR_LEVELS: f64 = 8.0;

/// Exponent of the `gamma` intensity map.
const GAMMA: f64 = 1.0 / 2.2;

/// Intensity remapping applied after the colour distribution, before the
/// colour map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntensityMap {
    Ramp,
    Neg,
    Log,
    Expo,
    Gamma,
    Jigsaw,
    Stairs,
    Null,
}

impl IntensityMap {
    pub const NAMES: [&'static str; 8] = [
        "ramp", "neg", "log", "expo", "gamma", "jigsaw", "stairs", "null",
    ];

    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "ramp" => Ok(Self::Ramp),
            "neg" => Ok(Self::Neg),
            "log" => Ok(Self::Log),
            "expo" => Ok(Self::Expo),
            "gamma" => Ok(Self::Gamma),
            "jigsaw" => Ok(Self::Jigsaw),
            "stairs" => Ok(Self::Stairs),
            "null" => Ok(Self::Null),
            _ => Err(ViewerError::UnknownIntensityMap(name.to_string())),
        }
    }

    pub fn apply(self, x: f64) -> f64 {
        let x = x.clamp(0.0, 1.0);
        let y = match self {
            Self::Ramp => x,
            Self::Neg => 1.0 - x,
            Self::Log => (1.0 + 1000.0 * x).ln() / 1001f64.ln(),
            Self::Expo => (10f64.powf(x) - 1.0) / 9.0,
            Self::Gamma => x.powf(GAMMA),
            Self::Jigsaw => {
                if x >= 1.0 {
                    1.0
                } else {
                    (2.0 * x).fract()
                }
            }
            Self::Stairs => (x * STAIR_LEVELS).floor().min(STAIR_LEVELS - 1.0) / (STAIR_LEVELS - 1.0),
            Self::Null => 0.0,
        };
        y.clamp(0.0, 1.0)
    }
}
