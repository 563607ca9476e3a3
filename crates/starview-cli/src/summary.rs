use std::path::{Path, PathBuf};

use console::Style;
use starview_core::pipeline::StageCounters;
use starview_core::{ImageSource, ImageViewer};

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            path: Style::new().underlined(),
        }
    }
}

fn print_title(s: &Styles, title: &str) {
    println!();
    println!("  {}", s.title.apply_to(title));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(title.chars().count())));
    println!();
}

/// What a render produced, captured before the viewer is dropped.
#[derive(Clone, Debug)]
pub struct RenderSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    pub image_size: (usize, usize),
    pub window: (usize, usize),
    pub scale: (f64, f64),
    pub pan: (f64, f64),
    pub rotation: f64,
    pub cuts: (f64, f64),
    pub color_map: String,
    pub counters: StageCounters,
}

impl RenderSummary {
    pub fn from_viewer(input: &Path, output: &Path, viewer: &ImageViewer) -> Self {
        Self {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            image_size: viewer.get_image().map_or((0, 0), |image| image.size()),
            window: viewer.get_window_size().unwrap_or((0, 0)),
            scale: viewer.get_scale(),
            pan: viewer.get_pan(),
            rotation: viewer.get_rotation(),
            cuts: viewer.get_cut_levels(),
            color_map: viewer.state().color_map().to_string(),
            counters: viewer.counters(),
        }
    }
}

pub fn print_render_summary(summary: &RenderSummary) {
    let s = Styles::new();
    print_title(&s, "Starview Render");

    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(summary.input.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(summary.output.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Image"),
        s.value
            .apply_to(format!("{}x{}", summary.image_size.0, summary.image_size.1))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Window"),
        s.value.apply_to(format!("{}x{}", summary.window.0, summary.window.1))
    );
    println!();

    println!("  {}", s.header.apply_to("View"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Scale"),
        s.value
            .apply_to(format!("{:.4} x {:.4}", summary.scale.0, summary.scale.1))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Pan"),
        s.value
            .apply_to(format!("{:.2}, {:.2}", summary.pan.0, summary.pan.1))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Rotation"),
        s.value.apply_to(format!("{:.1} deg", summary.rotation))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Cuts"),
        s.value
            .apply_to(format!("{:.3} .. {:.3}", summary.cuts.0, summary.cuts.1))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Colour map"),
        s.method.apply_to(&summary.color_map)
    );
    println!();

    let c = summary.counters;
    println!("  {}", s.header.apply_to("Stages run"));
    for (name, count) in [
        ("cutout", c.cutout),
        ("transform", c.transform),
        ("visual", c.visual),
        ("color", c.color),
        ("blit", c.blit),
    ] {
        println!(
            "    {:<12}{}",
            s.label.apply_to(name),
            s.value.apply_to(count)
        );
    }
    println!();
}

/// Statistics shown by `starview info`.
#[derive(Clone, Debug)]
pub struct ImageInfo {
    pub path: PathBuf,
    pub size: (usize, usize),
    pub channels: usize,
    pub range: Option<(f64, f64)>,
    pub cut_levels: Vec<(&'static str, f64, f64)>,
}

pub fn print_image_info(info: &ImageInfo) {
    let s = Styles::new();
    print_title(&s, "Starview Image");

    println!(
        "  {:<14}{}",
        s.label.apply_to("File"),
        s.path.apply_to(info.path.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Dimensions"),
        s.value.apply_to(format!("{}x{}", info.size.0, info.size.1))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Channels"),
        s.value.apply_to(info.channels)
    );
    let range = match info.range {
        Some((lo, hi)) => format!("{lo:.3} .. {hi:.3}"),
        None => "no finite values".to_string(),
    };
    println!(
        "  {:<14}{}",
        s.label.apply_to("Range"),
        s.value.apply_to(range)
    );
    println!();

    println!("  {}", s.header.apply_to("Cut levels"));
    for (method, lo, hi) in &info.cut_levels {
        println!(
            "    {:<12}{}",
            s.method.apply_to(method),
            s.value.apply_to(format!("{lo:.3} .. {hi:.3}"))
        );
    }
    println!();
}

pub fn print_probe(window: (i64, i64), data: (i64, i64), value: Option<f32>, back: (f64, f64)) {
    let s = Styles::new();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Window"),
        s.value.apply_to(format!("{}, {}", window.0, window.1))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Data"),
        s.value.apply_to(format!("{}, {}", data.0, data.1))
    );
    let value = match value {
        Some(v) => format!("{v}"),
        None => "outside image".to_string(),
    };
    println!(
        "  {:<14}{}",
        s.label.apply_to("Value"),
        s.method.apply_to(value)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Pixel centre"),
        s.value
            .apply_to(format!("{:.2}, {:.2} (window)", back.0, back.1))
    );
}
