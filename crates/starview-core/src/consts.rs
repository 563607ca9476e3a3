/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Small epsilon to avoid division by zero in floating-point comparisons.
pub const EPSILON: f64 = 1e-10;

/// Offset added to data coordinates when pixels are centre-referenced
/// (pixel `i` spans `[i - 0.5, i + 0.5)` in FITS convention).
pub const DATA_CENTER_OFFSET: f64 = 0.5;

/// Extra pixels added to the window diagonal when preparing the square
/// cutout used for rotation.
pub const DEFAULT_SQUARE_SLOP: usize = 20;

/// Default number of entries in the colour lookup table.
pub const DEFAULT_COLOR_HASHSIZE: usize = 256;

/// Default deferred redraw lag, in milliseconds.
pub const DEFAULT_DEFER_LAGTIME_MS: u64 = 25;

/// Default scale limits.
pub const DEFAULT_SCALE_MIN: f64 = 1e-5;
pub const DEFAULT_SCALE_MAX: f64 = 1e4;

/// Default zoom multiplier per level for the `rate` zoom algorithm.
pub const DEFAULT_ZOOM_RATE: f64 = std::f64::consts::SQRT_2;

/// Maximum number of samples taken from an image by the zscale algorithm.
pub const ZSCALE_MAX_SAMPLES: usize = 1000;

/// zscale contrast parameter (IRAF default).
pub const ZSCALE_CONTRAST: f64 = 0.25;

/// Rejection threshold (in sigma) for the zscale line fit.
pub const ZSCALE_KREJ: f64 = 2.5;

/// Maximum line-fit iterations for zscale.
pub const ZSCALE_MAX_ITERATIONS: usize = 5;

/// Default percentile kept by the histogram autocut method.
pub const DEFAULT_HISTOGRAM_PCT: f64 = 0.999;

/// Default sigma multipliers below and above the mean for the stddev
/// autocut method.
pub const DEFAULT_STDDEV_LO_SIGMA: f64 = 1.5;
pub const DEFAULT_STDDEV_HI_SIGMA: f64 = 4.0;

/// Sample cap for the statistics-based autocut methods.
pub const AUTOCUT_MAX_SAMPLES: usize = 1_000_000;

/// Window size of the median filter used by the median autocut method.
pub const MEDIAN_FILTER_SIZE: usize = 3;
