//! The image viewer: owns the view state, the render cache and the redraw
//! scheduler, and runs the pipeline into a backend renderer.

mod panic;
mod shared;

pub use shared::SharedViewer;

use std::sync::Arc;
use std::time::{Duration, Instant};

use ndarray::ArrayView3;
use tracing::{debug, error, info, warn};

use crate::autocuts::{autocuts_for, Autocuts};
use crate::buffer::ImageSource;
use crate::config::{AutoPolicy, ViewerConfig, ZoomAlgorithm};
use crate::error::{Result, ViewerError};
use crate::pipeline::cutout::{clamp_box, needs_square};
use crate::pipeline::{
    apply_transforms, apply_visuals, extract_cutout, CutoutOptions, DataRect, RenderCache,
    RgbObject, StageCounters, TransformParams, Whence,
};
use crate::redraw::{RedrawDecision, RedrawScheduler, ThreadTimer, Timer};
use crate::render::{BufferRenderer, Renderer};
use crate::rgbmap::RgbMapper;
use crate::view::zoom::{
    fit_level, fit_scale, level_for_scale, scale_for_level, zoom_in_level, zoom_out_level,
};
use crate::view::{window_center, CoordTransformer, SubscriptionId, ViewEvent, ViewState};

pub struct ImageViewer {
    config: ViewerConfig,
    state: ViewState,
    image: Option<Arc<dyn ImageSource>>,
    cache: RenderCache,
    autocuts: Box<dyn Autocuts>,
    rgbmap: RgbMapper,
    scheduler: RedrawScheduler,
    renderer: Box<dyn Renderer>,
    counters: StageCounters,
}

impl std::fmt::Debug for ImageViewer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageViewer")
            .field("state", &self.state)
            .field("image", &self.image)
            .field("autocuts", &self.autocuts)
            .field("scheduler", &self.scheduler)
            .field("counters", &self.counters)
            .finish_non_exhaustive()
    }
}

impl ImageViewer {
    /// Viewer with a thread-backed redraw timer and an in-memory surface.
    ///
    /// Redraws only defer once the viewer is wrapped in a [`SharedViewer`];
    /// on its own it draws every change immediately.
    pub fn new(config: ViewerConfig) -> Result<Self> {
        Self::with_timer(config, Arc::new(ThreadTimer::new()))
    }

    pub fn with_timer(config: ViewerConfig, timer: Arc<dyn Timer>) -> Result<Self> {
        let autocuts = autocuts_for(&config.autocut_method)?;
        let rgbmap = RgbMapper::from_names(
            config.color_hashsize,
            &config.color_map,
            &config.intensity_map,
            &config.color_algorithm,
        )?;
        let scheduler = RedrawScheduler::new(
            timer,
            config.defer_redraw,
            Duration::from_millis(config.defer_lagtime_ms),
        );
        Ok(Self {
            state: ViewState::new(&config),
            image: None,
            cache: RenderCache::default(),
            autocuts,
            rgbmap,
            scheduler,
            renderer: Box::new(BufferRenderer::default()),
            counters: StageCounters::default(),
            config,
        })
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn cache(&self) -> &RenderCache {
        &self.cache
    }

    pub fn counters(&self) -> StageCounters {
        self.counters
    }

    pub fn scheduler(&self) -> &RedrawScheduler {
        &self.scheduler
    }

    pub fn rgbmap(&self) -> &RgbMapper {
        &self.rgbmap
    }

    pub fn renderer(&self) -> &dyn Renderer {
        self.renderer.as_ref()
    }

    /// The renderer's current surface.
    pub fn surface(&self) -> ArrayView3<'_, u8> {
        self.renderer.get_surface()
    }

    /// Replace the drawing backend. The colour stage is rerun since the new
    /// backend may want a different pixel order.
    pub fn set_renderer(&mut self, mut renderer: Box<dyn Renderer>) {
        if let Some((wd, ht)) = self.state.window_size() {
            renderer.resize(wd, ht);
        }
        self.renderer = renderer;
        self.invalidate_and_redraw(Whence::Color);
    }

    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&ViewEvent) + Send + 'static,
    {
        self.state.subscribe(handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.state.unsubscribe(id)
    }

    // ---- Window and image ----

    pub fn set_window_size(&mut self, width: usize, height: usize) {
        self.renderer.resize(width, height);
        let event = self.state.set_window_size(width, height);
        self.on_event(&event);
    }

    pub fn get_window_size(&self) -> Result<(usize, usize)> {
        self.state.window_size().ok_or(ViewerError::DimensionsUnknown)
    }

    pub fn get_image(&self) -> Option<Arc<dyn ImageSource>> {
        self.image.clone()
    }

    /// Show a new image, applying the auto cuts / zoom / centre policies.
    pub fn set_image(&mut self, image: Arc<dyn ImageSource>) {
        let (width, height) = image.size();
        info!(
            width,
            height,
            channels = image.channels(),
            name = image.name().unwrap_or(""),
            "image set"
        );
        self.image = Some(image);

        self.with_redraw_held(|viewer| {
            viewer.invalidate_and_redraw(Whence::Geometry);

            let policy = viewer.state.autocuts();
            if policy.applies() {
                if let Err(e) = viewer.auto_levels_inner() {
                    warn!(error = %e, "auto cut levels failed");
                }
                viewer.state.set_autocuts(policy.after_auto());
            }

            let policy = viewer.state.autozoom();
            if policy.applies() {
                match viewer.zoom_fit_inner() {
                    Ok(()) => {
                        viewer.state.set_autozoom(policy.after_auto());
                    }
                    Err(e) => debug!(error = %e, "auto zoom skipped"),
                }
            }

            let policy = viewer.state.autocenter();
            if policy.applies() {
                viewer.center_image_inner();
                viewer.state.set_autocenter(policy.after_auto());
            }
        });
    }

    pub fn set_autocuts(&mut self, policy: AutoPolicy) {
        self.state.set_autocuts(policy);
    }

    pub fn set_autozoom(&mut self, policy: AutoPolicy) {
        self.state.set_autozoom(policy);
    }

    pub fn set_autocenter(&mut self, policy: AutoPolicy) {
        self.state.set_autocenter(policy);
    }

    // ---- Pan ----

    pub fn get_pan(&self) -> (f64, f64) {
        self.state.pan()
    }

    /// Centre the window on data coordinate `(x, y)`.
    pub fn set_pan(&mut self, x: f64, y: f64) {
        let policy = self.state.autocenter().after_manual();
        self.state.set_autocenter(policy);
        let event = self.state.set_pan(x, y);
        self.on_event(&event);
    }

    /// Move the pan position by `(dx, dy)` data pixels.
    pub fn pan_delta(&mut self, dx: f64, dy: f64) {
        let (x, y) = self.state.pan();
        self.set_pan(x + dx, y + dy);
    }

    pub fn center_image(&mut self) -> Result<()> {
        if self.image.is_none() {
            return Err(ViewerError::NoImage);
        }
        self.center_image_inner();
        Ok(())
    }

    fn center_image_inner(&mut self) {
        if let Some(image) = &self.image {
            let (wd, ht) = image.size();
            let event = self.state.set_pan(wd as f64 / 2.0, ht as f64 / 2.0);
            self.on_event(&event);
        }
    }

    // ---- Zoom ----

    pub fn get_scale(&self) -> (f64, f64) {
        self.state.scale()
    }

    pub fn get_zoom(&self) -> f64 {
        self.state.zoom_level()
    }

    pub fn set_zoom_algorithm(&mut self, algorithm: ZoomAlgorithm) {
        self.state.set_zoom_algorithm(algorithm);
    }

    /// Set the scale directly. Out-of-range requests are rejected and the
    /// current scale is kept.
    pub fn scale_to(&mut self, scale_x: f64, scale_y: f64) -> Result<()> {
        let level = level_for_scale(
            scale_x.max(scale_y),
            self.state.zoom_algorithm(),
            self.state.zoom_rate(),
        );
        self.set_scale_manual(scale_x, scale_y, level)
    }

    pub fn zoom_to(&mut self, level: f64) -> Result<()> {
        let scale = scale_for_level(level, self.state.zoom_algorithm(), self.state.zoom_rate());
        self.set_scale_manual(scale, scale, level)
    }

    pub fn zoom_in(&mut self) -> Result<()> {
        let level = zoom_in_level(self.state.zoom_level(), self.state.zoom_algorithm());
        self.zoom_to(level)
    }

    pub fn zoom_out(&mut self) -> Result<()> {
        let level = zoom_out_level(self.state.zoom_level(), self.state.zoom_algorithm());
        self.zoom_to(level)
    }

    /// Zoom so the whole image fits the window.
    pub fn zoom_fit(&mut self) -> Result<()> {
        self.zoom_fit_inner()?;
        let policy = self.state.autozoom().after_manual();
        self.state.set_autozoom(policy);
        Ok(())
    }

    fn zoom_fit_inner(&mut self) -> Result<()> {
        let image = self.image.as_ref().ok_or(ViewerError::NoImage)?;
        let window = self.get_window_size()?;
        let algorithm = self.state.zoom_algorithm();
        let rate = self.state.zoom_rate();
        let fitted = fit_scale(
            image.size(),
            window,
            self.state.rotation(),
            self.state.swap_xy(),
        );
        let level = fit_level(fitted, algorithm, rate);
        let scale = scale_for_level(level, algorithm, rate);
        self.set_scale_inner(scale, scale, level)
    }

    fn set_scale_manual(&mut self, scale_x: f64, scale_y: f64, level: f64) -> Result<()> {
        self.set_scale_inner(scale_x, scale_y, level)?;
        let policy = self.state.autozoom().after_manual();
        self.state.set_autozoom(policy);
        Ok(())
    }

    fn set_scale_inner(&mut self, scale_x: f64, scale_y: f64, level: f64) -> Result<()> {
        let (min, max) = (self.config.scale_min, self.config.scale_max);
        let in_range = |s: f64| s.is_finite() && s >= min && s <= max;
        if !in_range(scale_x) || !in_range(scale_y) {
            warn!(scale_x, scale_y, min, max, "scale out of bounds, keeping current scale");
            return Err(ViewerError::ScaleOutOfBounds {
                scale_x,
                scale_y,
                min,
                max,
            });
        }
        let event = self.state.set_scale(scale_x, scale_y, level);
        self.on_event(&event);
        Ok(())
    }

    // ---- Orientation ----

    pub fn get_rotation(&self) -> f64 {
        self.state.rotation()
    }

    pub fn set_rotation(&mut self, deg: f64) {
        let event = self.state.set_rotation(deg.rem_euclid(360.0));
        self.on_event(&event);
    }

    pub fn get_flip(&self) -> (bool, bool) {
        self.state.flip()
    }

    pub fn set_flip(&mut self, flip_x: bool, flip_y: bool) {
        let event = self.state.set_flip(flip_x, flip_y);
        self.on_event(&event);
    }

    pub fn get_swap_xy(&self) -> bool {
        self.state.swap_xy()
    }

    pub fn set_swap_xy(&mut self, swap: bool) {
        let event = self.state.set_swap_xy(swap);
        self.on_event(&event);
    }

    /// Set flips and swap together with a single redraw.
    pub fn transform(&mut self, flip_x: bool, flip_y: bool, swap_xy: bool) {
        self.with_redraw_held(|viewer| {
            viewer.set_flip(flip_x, flip_y);
            viewer.set_swap_xy(swap_xy);
        });
    }

    // ---- Cuts and colour ----

    pub fn get_cut_levels(&self) -> (f64, f64) {
        self.state.cuts()
    }

    /// Set cut levels by hand.
    pub fn cut_levels(&mut self, lo: f64, hi: f64) {
        let policy = self.state.autocuts().after_manual();
        self.state.set_autocuts(policy);
        let event = self.state.set_cuts(lo, hi);
        self.on_event(&event);
    }

    /// Compute cut levels with the current autocut method and apply them.
    pub fn auto_levels(&mut self) -> Result<(f64, f64)> {
        self.auto_levels_inner()
    }

    fn auto_levels_inner(&mut self) -> Result<(f64, f64)> {
        let image = self.image.clone().ok_or(ViewerError::NoImage)?;
        let start = Instant::now();
        let (lo, hi) = self.autocuts.calc_cut_levels(image.pixels());
        debug!(
            method = self.autocuts.name(),
            lo,
            hi,
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "auto cut levels"
        );
        let event = self.state.set_cuts(lo, hi);
        self.on_event(&event);
        Ok((lo, hi))
    }

    pub fn set_autocut_method(&mut self, name: &str) -> Result<()> {
        self.autocuts = autocuts_for(name)?;
        self.state.set_autocut_method(name);
        Ok(())
    }

    pub fn set_color_map(&mut self, name: &str) -> Result<()> {
        self.rgbmap.set_color_map(name)?;
        let event = self.state.set_color_map(name);
        self.on_event(&event);
        Ok(())
    }

    pub fn set_intensity_map(&mut self, name: &str) -> Result<()> {
        self.rgbmap.set_intensity_map(name)?;
        let event = self.state.set_intensity_map(name);
        self.on_event(&event);
        Ok(())
    }

    pub fn set_color_algorithm(&mut self, name: &str) -> Result<()> {
        self.rgbmap.set_distribution(name)?;
        let event = self.state.set_color_algorithm(name);
        self.on_event(&event);
        Ok(())
    }

    pub fn set_bg_color(&mut self, color: [u8; 3]) {
        let event = self.state.set_bg_color(color);
        self.on_event(&event);
    }

    // ---- Coordinates ----

    /// Transformer for the current view. Once a cutout exists its achieved
    /// scale is used, so coordinates agree with what is on screen.
    pub fn coord_transformer(&self) -> CoordTransformer {
        let coords = CoordTransformer::new(self.state.geometry(), self.state.window_size());
        match self.cache.cutout() {
            Some(cutout) => coords.with_scale(cutout.scale_x, cutout.scale_y),
            None => coords,
        }
    }

    pub fn data_to_window(&self, data_x: f64, data_y: f64) -> Result<(f64, f64)> {
        self.coord_transformer().data_to_window(data_x, data_y, true)
    }

    pub fn window_to_data(&self, win_x: f64, win_y: f64) -> Result<(f64, f64)> {
        self.coord_transformer().window_to_data(win_x, win_y, true)
    }

    /// Value of the first channel at data pixel `(x, y)`.
    pub fn get_data_xy(&self, x: i64, y: i64) -> Result<Option<f32>> {
        let image = self.image.as_ref().ok_or(ViewerError::NoImage)?;
        Ok(image.data_xy(x, y))
    }

    /// Data pixel and value under window pixel `(win_x, win_y)`.
    pub fn pixel_at_window(&self, win_x: i64, win_y: i64) -> Result<((i64, i64), Option<f32>)> {
        let (x, y) = self.coord_transformer().window_to_data(
            win_x as f64 + 0.5,
            win_y as f64 + 0.5,
            false,
        )?;
        let (x, y) = (x.floor() as i64, y.floor() as i64);
        Ok(((x, y), self.get_data_xy(x, y)?))
    }

    /// Data coordinates of the four window corners.
    pub fn get_pan_rect(&self) -> Result<[(f64, f64); 4]> {
        self.coord_transformer().window_corners_to_data()
    }

    /// Bounding box of the visible data, clamped to the image.
    pub fn get_datarect(&self) -> Result<DataRect> {
        let image = self.image.as_ref().ok_or(ViewerError::NoImage)?;
        let corners = self.get_pan_rect()?;
        let (mut x1, mut y1) = (f64::INFINITY, f64::INFINITY);
        let (mut x2, mut y2) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for (x, y) in corners {
            x1 = x1.min(x);
            y1 = y1.min(y);
            x2 = x2.max(x);
            y2 = y2.max(y);
        }
        let (wd, ht) = image.size();
        Ok(clamp_box(x1, y1, x2, y2, wd, ht))
    }

    // ---- Pipeline ----

    /// Run the pipeline from `whence` (and from any stage whose cache is
    /// missing) and return the RGB object for the renderer.
    pub fn get_rgb_object(&mut self, whence: Whence) -> Result<Arc<RgbObject>> {
        let image = self.image.clone().ok_or(ViewerError::NoImage)?;
        let (win_wd, win_ht) = self.get_window_size()?;
        self.cache.invalidate(whence);

        let cutout = match self.cache.cutout() {
            Some(cutout) => cutout,
            None => {
                let coords =
                    CoordTransformer::new(self.state.geometry(), self.state.window_size());
                let options = CutoutOptions {
                    interpolation: self.config.interpolation,
                    always_square: self.config.always_square,
                    square_slop: self.config.square_slop,
                };
                let cutout = extract_cutout(image.as_ref(), &coords, &options)?;
                self.counters.cutout += 1;
                self.cache.cutout.store(cutout)
            }
        };

        let transformed = match self.cache.transformed() {
            Some(transformed) => transformed,
            None => {
                let (flip_x, flip_y) = self.state.flip();
                let params = TransformParams {
                    flip_x,
                    flip_y,
                    swap_xy: self.state.swap_xy(),
                    rot_deg: self.state.rotation(),
                    window_center: window_center(win_wd, win_ht),
                    origin_upper: self.state.origin_upper(),
                };
                let transformed = apply_transforms(&cutout, &params);
                self.counters.transform += 1;
                self.cache.transformed.store(transformed)
            }
        };

        let visual = match self.cache.visual() {
            Some(visual) => visual,
            None => {
                let visual = apply_visuals(
                    &transformed,
                    self.state.cuts(),
                    self.autocuts.as_ref(),
                    self.rgbmap.vmax(),
                    self.state.origin_upper(),
                );
                self.counters.visual += 1;
                self.cache.visual.store(visual)
            }
        };

        let rgb = match self.cache.rgb() {
            Some(rgb) => rgb,
            None => {
                let order = self.renderer.pixel_order();
                let rgb = RgbObject {
                    rgb: Arc::new(self.rgbmap.get_rgbarray(&visual, order)),
                    order,
                    dst_x: visual.dst_x,
                    dst_y: visual.dst_y,
                };
                self.counters.color += 1;
                self.cache.rgb.store(rgb)
            }
        };

        Ok(rgb)
    }

    /// Request a redraw from `whence`; runs now or is deferred depending on
    /// the scheduler.
    pub fn redraw(&mut self, whence: Whence) {
        match self.scheduler.request(whence) {
            RedrawDecision::Immediate(whence) => self.redraw_now(whence),
            RedrawDecision::Deferred | RedrawDecision::Held => {}
        }
    }

    /// Run the pipeline and blit synchronously. Failures are logged and the
    /// viewer stays usable; a failed run leaves every cache invalid.
    pub fn redraw_now(&mut self, whence: Whence) {
        let start = Instant::now();
        let outcome = panic::catch_with_backtrace(|| self.render(whence));
        match outcome {
            Ok(Ok(())) => debug!(
                %whence,
                elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
                "redraw complete"
            ),
            Ok(Err(ViewerError::NoImage)) => debug!(%whence, "no image to draw"),
            Ok(Err(e)) => {
                error!(
                    %whence,
                    error = %e,
                    first_invalid = ?self.cache.first_invalid(),
                    counters = ?self.counters,
                    "redraw failed"
                );
                self.cache.invalidate_all();
            }
            Err(caught) => {
                let backtrace = caught
                    .backtrace
                    .as_ref()
                    .map_or_else(|| "unavailable".to_string(), ToString::to_string);
                error!(
                    %whence,
                    panic = %caught.message,
                    first_invalid = ?self.cache.first_invalid(),
                    counters = ?self.counters,
                    %backtrace,
                    "redraw panicked"
                );
                self.cache.invalidate_all();
            }
        }
        self.scheduler.mark_complete();
    }

    fn render(&mut self, whence: Whence) -> Result<()> {
        let rgb = self.get_rgb_object(whence)?;
        self.renderer.clear(self.state.bg_color());
        self.renderer.render_image(&rgb, rgb.dst_x, rgb.dst_y);
        self.renderer.update_image();
        self.counters.blit += 1;
        Ok(())
    }

    /// Timer entry point: run the accumulated deferred redraw, if any.
    pub fn delayed_redraw(&mut self) {
        if let Some(whence) = self.scheduler.take_pending() {
            self.redraw_now(whence);
        }
    }

    /// Drop any pending deferred redraw.
    pub fn cancel_redraw(&mut self) {
        self.scheduler.cancel();
    }

    pub fn hold_redraw(&mut self) {
        self.scheduler.hold();
    }

    pub fn release_redraw(&mut self) {
        if let Some(whence) = self.scheduler.release() {
            self.redraw(whence);
        }
    }

    /// Run `f` with redraws held, then issue one redraw for everything it
    /// changed.
    pub fn with_redraw_held<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.hold_redraw();
        let result = f(self);
        self.release_redraw();
        result
    }

    fn invalidate_and_redraw(&mut self, whence: Whence) {
        self.cache.invalidate(whence);
        self.redraw(whence);
    }

    fn on_event(&mut self, event: &ViewEvent) {
        if let Some(whence) = self.whence_for(event) {
            self.invalidate_and_redraw(whence);
        }
    }

    /// Earliest pipeline stage affected by a setting change.
    fn whence_for(&self, event: &ViewEvent) -> Option<Whence> {
        let squared = |rot: f64| needs_square(rot, self.config.always_square);
        match event {
            ViewEvent::Pan { .. } | ViewEvent::Scale { .. } | ViewEvent::WindowSize { .. } => {
                Some(Whence::Geometry)
            }
            ViewEvent::Rotation { old, new } => {
                if squared(*old) == squared(*new) {
                    Some(Whence::Transform)
                } else {
                    Some(Whence::Geometry)
                }
            }
            ViewEvent::Flip { .. } => Some(Whence::Transform),
            ViewEvent::SwapXY(_) => {
                if squared(self.state.rotation()) {
                    Some(Whence::Transform)
                } else {
                    Some(Whence::Geometry)
                }
            }
            ViewEvent::Cuts { .. } => Some(Whence::Visual),
            ViewEvent::ColorMap(_) | ViewEvent::IntensityMap(_) | ViewEvent::ColorAlgorithm(_) => {
                Some(Whence::Color)
            }
            ViewEvent::BgColor(_) => Some(Whence::Overlay),
            ViewEvent::ZoomAlgorithm(_)
            | ViewEvent::AutoCuts(_)
            | ViewEvent::AutoZoom(_)
            | ViewEvent::AutoCenter(_)
            | ViewEvent::AutocutMethod(_) => None,
        }
    }
}
