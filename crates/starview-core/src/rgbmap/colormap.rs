use crate::error::{Result, ViewerError};

/// Procedural colour maps over `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorMap {
    Gray,
    Heat,
    Cool,
    Rainbow,
    Red,
    Green,
    Blue,
}

impl ColorMap {
    pub const NAMES: [&'static str; 7] = ["gray", "heat", "cool", "rainbow", "red", "green", "blue"];

    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "gray" | "grey" => Ok(Self::Gray),
            "heat" => Ok(Self::Heat),
            "cool" => Ok(Self::Cool),
            "rainbow" => Ok(Self::Rainbow),
            "red" => Ok(Self::Red),
            "green" => Ok(Self::Green),
            "blue" => Ok(Self::Blue),
            _ => Err(ViewerError::UnknownColorMap(name.to_string())),
        }
    }

    /// Colour at position `t`, components in `[0, 1]`.
    pub fn color(self, t: f64) -> [f64; 3] {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Gray => [t, t, t],
            Self::Heat => [
                (3.0 * t).clamp(0.0, 1.0),
                (3.0 * t - 1.0).clamp(0.0, 1.0),
                (3.0 * t - 2.0).clamp(0.0, 1.0),
            ],
            Self::Cool => [t, 1.0 - t, 1.0],
            // Violet through blue, green and yellow to red.
            Self::Rainbow => hsv_to_rgb((1.0 - t) * 270.0, 1.0, 1.0),
            Self::Red => [t, 0.0, 0.0],
            Self::Green => [0.0, t, 0.0],
            Self::Blue => [0.0, 0.0, t],
        }
    }
}

fn hsv_to_rgb(hue_deg: f64, s: f64, v: f64) -> [f64; 3] {
    let h = (hue_deg.rem_euclid(360.0)) / 60.0;
    let c = v * s;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = v - c;
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    [r + m, g + m, b + m]
}
