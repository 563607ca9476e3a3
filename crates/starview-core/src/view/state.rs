//! The viewer's mutable settings.
//!
//! Every setter records the new value and synchronously dispatches a typed
//! [`ViewEvent`] to the registered subscribers, then hands the event back so
//! the owning viewer can invalidate caches and schedule a redraw.

use crate::config::{AutoPolicy, ViewerConfig, ZoomAlgorithm};

use super::coords::ViewGeometry;

/// A change to one view setting, carrying the new value.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewEvent {
    Pan { x: f64, y: f64 },
    Scale { x: f64, y: f64 },
    Rotation { old: f64, new: f64 },
    Flip { flip_x: bool, flip_y: bool },
    SwapXY(bool),
    Cuts { lo: f64, hi: f64 },
    WindowSize { width: usize, height: usize },
    ZoomAlgorithm(ZoomAlgorithm),
    AutoCuts(AutoPolicy),
    AutoZoom(AutoPolicy),
    AutoCenter(AutoPolicy),
    AutocutMethod(String),
    ColorMap(String),
    IntensityMap(String),
    ColorAlgorithm(String),
    BgColor([u8; 3]),
}

/// Handle returned by [`ViewState::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub type Subscriber = Box<dyn FnMut(&ViewEvent) + Send>;

/// Single source of truth for pan, scale, orientation, cuts and colour
/// settings.
pub struct ViewState {
    pan: (f64, f64),
    scale: (f64, f64),
    zoom_level: f64,
    rot_deg: f64,
    flip_x: bool,
    flip_y: bool,
    swap_xy: bool,
    cuts: (f64, f64),
    window_size: Option<(usize, usize)>,
    origin_upper: bool,
    zoom_algorithm: ZoomAlgorithm,
    zoom_rate: f64,
    autocuts: AutoPolicy,
    autozoom: AutoPolicy,
    autocenter: AutoPolicy,
    autocut_method: String,
    color_map: String,
    intensity_map: String,
    color_algorithm: String,
    bg_color: [u8; 3],
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: u64,
}

impl std::fmt::Debug for ViewState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewState")
            .field("pan", &self.pan)
            .field("scale", &self.scale)
            .field("rot_deg", &self.rot_deg)
            .field("flip_x", &self.flip_x)
            .field("flip_y", &self.flip_y)
            .field("swap_xy", &self.swap_xy)
            .field("cuts", &self.cuts)
            .field("window_size", &self.window_size)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

impl ViewState {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            pan: (0.0, 0.0),
            scale: (1.0, 1.0),
            zoom_level: 1.0,
            rot_deg: 0.0,
            flip_x: false,
            flip_y: false,
            swap_xy: false,
            cuts: (0.0, 1.0),
            window_size: None,
            origin_upper: config.window_origin_upper,
            zoom_algorithm: config.zoom_algorithm,
            zoom_rate: config.zoom_rate,
            autocuts: config.autocuts,
            autozoom: config.autozoom,
            autocenter: config.autocenter,
            autocut_method: config.autocut_method.clone(),
            color_map: config.color_map.clone(),
            intensity_map: config.intensity_map.clone(),
            color_algorithm: config.color_algorithm.clone(),
            bg_color: config.bg_color,
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    /// Register a handler called synchronously on every setting change.
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&ViewEvent) + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(handler)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    fn emit(&mut self, event: ViewEvent) -> ViewEvent {
        for (_, handler) in self.subscribers.iter_mut() {
            handler(&event);
        }
        event
    }

    /// Snapshot of the parameters the coordinate transformer needs.
    pub fn geometry(&self) -> ViewGeometry {
        ViewGeometry {
            pan: self.pan,
            scale: self.scale,
            rot_deg: self.rot_deg,
            flip_x: self.flip_x,
            flip_y: self.flip_y,
            swap_xy: self.swap_xy,
            origin_upper: self.origin_upper,
        }
    }

    pub fn pan(&self) -> (f64, f64) {
        self.pan
    }

    pub fn set_pan(&mut self, x: f64, y: f64) -> ViewEvent {
        self.pan = (x, y);
        self.emit(ViewEvent::Pan { x, y })
    }

    pub fn scale(&self) -> (f64, f64) {
        self.scale
    }

    pub fn zoom_level(&self) -> f64 {
        self.zoom_level
    }

    /// Set the scale and the zoom level that produced it.
    pub fn set_scale(&mut self, x: f64, y: f64, zoom_level: f64) -> ViewEvent {
        self.scale = (x, y);
        self.zoom_level = zoom_level;
        self.emit(ViewEvent::Scale { x, y })
    }

    pub fn rotation(&self) -> f64 {
        self.rot_deg
    }

    pub fn set_rotation(&mut self, deg: f64) -> ViewEvent {
        let old = self.rot_deg;
        self.rot_deg = deg;
        self.emit(ViewEvent::Rotation { old, new: deg })
    }

    pub fn flip(&self) -> (bool, bool) {
        (self.flip_x, self.flip_y)
    }

    pub fn set_flip(&mut self, flip_x: bool, flip_y: bool) -> ViewEvent {
        self.flip_x = flip_x;
        self.flip_y = flip_y;
        self.emit(ViewEvent::Flip { flip_x, flip_y })
    }

    pub fn swap_xy(&self) -> bool {
        self.swap_xy
    }

    pub fn set_swap_xy(&mut self, swap: bool) -> ViewEvent {
        self.swap_xy = swap;
        self.emit(ViewEvent::SwapXY(swap))
    }

    pub fn cuts(&self) -> (f64, f64) {
        self.cuts
    }

    pub fn set_cuts(&mut self, lo: f64, hi: f64) -> ViewEvent {
        self.cuts = (lo, hi);
        self.emit(ViewEvent::Cuts { lo, hi })
    }

    pub fn window_size(&self) -> Option<(usize, usize)> {
        self.window_size
    }

    pub fn set_window_size(&mut self, width: usize, height: usize) -> ViewEvent {
        self.window_size = Some((width, height));
        self.emit(ViewEvent::WindowSize { width, height })
    }

    pub fn origin_upper(&self) -> bool {
        self.origin_upper
    }

    pub fn zoom_algorithm(&self) -> ZoomAlgorithm {
        self.zoom_algorithm
    }

    pub fn zoom_rate(&self) -> f64 {
        self.zoom_rate
    }

    pub fn set_zoom_algorithm(&mut self, algorithm: ZoomAlgorithm) -> ViewEvent {
        self.zoom_algorithm = algorithm;
        self.emit(ViewEvent::ZoomAlgorithm(algorithm))
    }

    pub fn autocuts(&self) -> AutoPolicy {
        self.autocuts
    }

    pub fn set_autocuts(&mut self, policy: AutoPolicy) -> ViewEvent {
        self.autocuts = policy;
        self.emit(ViewEvent::AutoCuts(policy))
    }

    pub fn autozoom(&self) -> AutoPolicy {
        self.autozoom
    }

    pub fn set_autozoom(&mut self, policy: AutoPolicy) -> ViewEvent {
        self.autozoom = policy;
        self.emit(ViewEvent::AutoZoom(policy))
    }

    pub fn autocenter(&self) -> AutoPolicy {
        self.autocenter
    }

    pub fn set_autocenter(&mut self, policy: AutoPolicy) -> ViewEvent {
        self.autocenter = policy;
        self.emit(ViewEvent::AutoCenter(policy))
    }

    pub fn autocut_method(&self) -> &str {
        &self.autocut_method
    }

    pub fn set_autocut_method(&mut self, name: &str) -> ViewEvent {
        self.autocut_method = name.to_string();
        self.emit(ViewEvent::AutocutMethod(name.to_string()))
    }

    pub fn color_map(&self) -> &str {
        &self.color_map
    }

    pub fn set_color_map(&mut self, name: &str) -> ViewEvent {
        self.color_map = name.to_string();
        self.emit(ViewEvent::ColorMap(name.to_string()))
    }

    pub fn intensity_map(&self) -> &str {
        &self.intensity_map
    }

    pub fn set_intensity_map(&mut self, name: &str) -> ViewEvent {
        self.intensity_map = name.to_string();
        self.emit(ViewEvent::IntensityMap(name.to_string()))
    }

    pub fn color_algorithm(&self) -> &str {
        &self.color_algorithm
    }

    pub fn set_color_algorithm(&mut self, name: &str) -> ViewEvent {
        self.color_algorithm = name.to_string();
        self.emit(ViewEvent::ColorAlgorithm(name.to_string()))
    }

    pub fn bg_color(&self) -> [u8; 3] {
        self.bg_color
    }

    pub fn set_bg_color(&mut self, color: [u8; 3]) -> ViewEvent {
        self.bg_color = color;
        self.emit(ViewEvent::BgColor(color))
    }
}
