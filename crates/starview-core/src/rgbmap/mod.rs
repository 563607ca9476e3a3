//! Colour mapping: index arrays to RGB(A) through a lookup table built from
//! a colour distribution, an intensity map and a colour map.

mod colormap;
mod dist;
mod imap;

pub use colormap::ColorMap;
pub use dist::ColorDistribution;
pub use imap::IntensityMap;

use ndarray::Array3;
use tracing::debug;

use crate::error::Result;
use crate::parallel::for_each_row;
use crate::pipeline::IndexArray;

/// Channel layout of an RGB object and of renderer surfaces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PixelOrder {
    Rgb,
    #[default]
    Rgba,
    Bgra,
    Argb,
}

impl PixelOrder {
    pub fn channels(self) -> usize {
        match self {
            Self::Rgb => 3,
            Self::Rgba | Self::Bgra | Self::Argb => 4,
        }
    }

    /// Offsets of red, green, blue and (if present) alpha within a pixel.
    pub fn offsets(self) -> ([usize; 3], Option<usize>) {
        match self {
            Self::Rgb => ([0, 1, 2], None),
            Self::Rgba => ([0, 1, 2], Some(3)),
            Self::Bgra => ([2, 1, 0], Some(3)),
            Self::Argb => ([1, 2, 3], Some(0)),
        }
    }
}

/// Maps colour-table indices to RGB values.
#[derive(Clone, Debug)]
pub struct RgbMapper {
    hashsize: usize,
    dist: ColorDistribution,
    imap: IntensityMap,
    cmap: ColorMap,
    lut: Vec<[u8; 3]>,
    /// Per-channel table for images that already carry colour.
    gray_lut: Vec<u8>,
}

impl RgbMapper {
    pub fn new(hashsize: usize) -> Self {
        let mut mapper = Self {
            hashsize: hashsize.max(2),
            dist: ColorDistribution::Linear,
            imap: IntensityMap::Ramp,
            cmap: ColorMap::Gray,
            lut: Vec::new(),
            gray_lut: Vec::new(),
        };
        mapper.rebuild();
        mapper
    }

    /// Build a mapper from colour setting names.
    pub fn from_names(hashsize: usize, cmap: &str, imap: &str, dist: &str) -> Result<Self> {
        let mut mapper = Self::new(hashsize);
        mapper.cmap = ColorMap::from_name(cmap)?;
        mapper.imap = IntensityMap::from_name(imap)?;
        mapper.dist = ColorDistribution::from_name(dist)?;
        mapper.rebuild();
        Ok(mapper)
    }

    /// Largest index the mapper accepts.
    pub fn vmax(&self) -> u32 {
        (self.hashsize - 1) as u32
    }

    pub fn hashsize(&self) -> usize {
        self.hashsize
    }

    pub fn set_hashsize(&mut self, hashsize: usize) {
        self.hashsize = hashsize.max(2);
        self.rebuild();
    }

    pub fn color_map(&self) -> ColorMap {
        self.cmap
    }

    pub fn set_color_map(&mut self, name: &str) -> Result<()> {
        self.cmap = ColorMap::from_name(name)?;
        self.rebuild();
        Ok(())
    }

    pub fn intensity_map(&self) -> IntensityMap {
        self.imap
    }

    pub fn set_intensity_map(&mut self, name: &str) -> Result<()> {
        self.imap = IntensityMap::from_name(name)?;
        self.rebuild();
        Ok(())
    }

    pub fn distribution(&self) -> ColorDistribution {
        self.dist
    }

    pub fn set_distribution(&mut self, name: &str) -> Result<()> {
        self.dist = ColorDistribution::from_name(name)?;
        self.rebuild();
        Ok(())
    }

    /// Colour for a single index, clamped to the table.
    pub fn lookup(&self, index: u32) -> [u8; 3] {
        self.lut[(index as usize).min(self.hashsize - 1)]
    }

    fn rebuild(&mut self) {
        let last = (self.hashsize - 1) as f64;
        let (dist, imap, cmap) = (self.dist, self.imap, self.cmap);
        self.gray_lut = (0..self.hashsize)
            .map(|i| to_u8(imap.apply(dist.apply(i as f64 / last))))
            .collect();
        self.lut = (0..self.hashsize)
            .map(|i| {
                let [r, g, b] = cmap.color(imap.apply(dist.apply(i as f64 / last)));
                [to_u8(r), to_u8(g), to_u8(b)]
            })
            .collect();
        debug!(
            hashsize = self.hashsize,
            cmap = ?self.cmap,
            imap = ?self.imap,
            dist = %self.dist,
            "colour table rebuilt"
        );
    }

    /// Map an index array to an RGB(A) array in `order`.
    ///
    /// Single-channel input goes through the colour map; input with three
    /// or more channels maps each of the first three through the
    /// distribution and intensity map only. Pixels outside the source data
    /// are fully transparent.
    pub fn get_rgbarray(&self, indices: &IndexArray, order: PixelOrder) -> Array3<u8> {
        let (ht, wd, channels) = indices.index.dim();
        let (rgb_at, alpha_at) = order.offsets();
        let mut out = Array3::<u8>::zeros((ht, wd, order.channels()));
        let color = channels >= 3;

        for_each_row(&mut out, |row, mut lane| {
            for col in 0..wd {
                if !indices.valid[[row, col]] {
                    continue;
                }
                let rgb = if color {
                    [0, 1, 2].map(|ch| {
                        let idx = indices.index[[row, col, ch]] as usize;
                        self.gray_lut[idx.min(self.hashsize - 1)]
                    })
                } else {
                    self.lookup(indices.index[[row, col, 0]])
                };
                for (value, at) in rgb.into_iter().zip(rgb_at) {
                    lane[[col, at]] = value;
                }
                if let Some(at) = alpha_at {
                    lane[[col, at]] = u8::MAX;
                }
            }
        });
        out
    }
}

fn to_u8(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
