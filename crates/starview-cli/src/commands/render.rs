use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::commands::view::{build_viewer, ViewArgs};
use crate::io::{load_image, save_surface};
use crate::summary::{print_render_summary, RenderSummary};

#[derive(Args)]
pub struct RenderArgs {
    /// Input image files (PNG, TIFF, ...)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output file; a directory when several inputs are given
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub view: ViewArgs,
}

/// Output path for `input`: `<stem>_view.png` beside it or in `dir`.
fn output_for(input: &Path, dir: Option<&Path>) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let name = format!("{stem}_view.png");
    match dir.or_else(|| input.parent()) {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}

fn render_one(input: &Path, output: &Path, view: &ViewArgs) -> Result<RenderSummary> {
    let image = load_image(input)?;
    let viewer = build_viewer(image, view)
        .with_context(|| format!("Failed to set up view of {}", input.display()))?;
    save_surface(viewer.surface(), output)?;
    info!(input = %input.display(), output = %output.display(), "rendered");
    Ok(RenderSummary::from_viewer(input, output, &viewer))
}

pub fn run(args: &RenderArgs) -> Result<()> {
    if let [input] = args.files.as_slice() {
        let output = match &args.output {
            Some(path) => path.clone(),
            None => output_for(input, None),
        };
        let summary = render_one(input, &output, &args.view)?;
        print_render_summary(&summary);
        return Ok(());
    }

    if let Some(dir) = &args.output {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    let pb = ProgressBar::new(args.files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    pb.set_message("Rendering");

    let mut written = Vec::with_capacity(args.files.len());
    for input in &args.files {
        let output = output_for(input, args.output.as_deref());
        written.push(render_one(input, &output, &args.view)?);
        pb.inc(1);
    }
    pb.finish_with_message("Rendered");

    for summary in &written {
        println!("{} -> {}", summary.input.display(), summary.output.display());
    }
    Ok(())
}
