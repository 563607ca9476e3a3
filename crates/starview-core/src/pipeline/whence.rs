/// How far back in the render pipeline a change forces recomputation.
///
/// Variants are ordered: a smaller value means more work. Accumulating
/// several requests keeps the minimum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Whence {
    /// Re-extract the scaled cutout (pan, scale, window size, new image).
    Geometry,
    /// Re-apply flips, swap and rotation to the cached cutout.
    Transform,
    /// Re-apply cut levels.
    Visual,
    /// Re-run the colour lookup.
    Color,
    /// Re-blit the cached RGB object only.
    Overlay,
}

impl Whence {
    pub const ALL: [Whence; 5] = [
        Whence::Geometry,
        Whence::Transform,
        Whence::Visual,
        Whence::Color,
        Whence::Overlay,
    ];

    /// Numeric level used by hosts that still speak in 0 / 0.5 / 1 / 2 / 3.
    pub fn level(self) -> f64 {
        match self {
            Self::Geometry => 0.0,
            Self::Transform => 0.5,
            Self::Visual => 1.0,
            Self::Color => 2.0,
            Self::Overlay => 3.0,
        }
    }

    /// Most expensive whence whose level is at least `level`.
    pub fn from_level(level: f64) -> Self {
        Self::ALL
            .into_iter()
            .find(|w| level <= w.level())
            .unwrap_or(Self::Overlay)
    }
}

impl std::fmt::Display for Whence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Geometry => write!(f, "geometry"),
            Self::Transform => write!(f, "transform"),
            Self::Visual => write!(f, "visual"),
            Self::Color => write!(f, "color"),
            Self::Overlay => write!(f, "overlay"),
        }
    }
}
