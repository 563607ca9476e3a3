use crate::error::{Result, ViewerError};

/// Exponent used by the log and power distributions.
const LOG_EXP: f64 = 1000.0;

/// Nonlinearity of the asinh distribution.
const ASINH_NONLINEARITY: f64 = 10.0;

/// Nonlinearity of the sinh distribution.
const SINH_NONLINEARITY: f64 = 3.0;

/// How index values are distributed over the colour range. Every variant
/// maps `[0, 1]` monotonically onto `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorDistribution {
    Linear,
    Log,
    Power,
    Sqrt,
    Squared,
    Asinh,
    Sinh,
}

impl ColorDistribution {
    pub const NAMES: [&'static str; 7] =
        ["linear", "log", "power", "sqrt", "squared", "asinh", "sinh"];

    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "linear" => Ok(Self::Linear),
            "log" => Ok(Self::Log),
            "power" => Ok(Self::Power),
            "sqrt" => Ok(Self::Sqrt),
            "squared" => Ok(Self::Squared),
            "asinh" => Ok(Self::Asinh),
            "sinh" => Ok(Self::Sinh),
            _ => Err(ViewerError::UnknownColorAlgorithm(name.to_string())),
        }
    }

    pub fn apply(self, x: f64) -> f64 {
        let x = x.clamp(0.0, 1.0);
        let y = match self {
            Self::Linear => x,
            Self::Log => (LOG_EXP * x + 1.0).ln() / (LOG_EXP + 1.0).ln(),
            Self::Power => (LOG_EXP.powf(x) - 1.0) / (LOG_EXP - 1.0),
            Self::Sqrt => x.sqrt(),
            Self::Squared => x * x,
            Self::Asinh => (ASINH_NONLINEARITY * x).asinh() / ASINH_NONLINEARITY.asinh(),
            Self::Sinh => (SINH_NONLINEARITY * x).sinh() / SINH_NONLINEARITY.sinh(),
        };
        y.clamp(0.0, 1.0)
    }
}

impl std::fmt::Display for ColorDistribution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Linear => "linear",
            Self::Log => "log",
            Self::Power => "power",
            Self::Sqrt => "sqrt",
            Self::Squared => "squared",
            Self::Asinh => "asinh",
            Self::Sinh => "sinh",
        };
        write!(f, "{name}")
    }
}
