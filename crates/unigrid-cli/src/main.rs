//! unigrid CLI - lay out, check and preview grid scenes.

#![allow(
    clippy::needless_pass_by_value,
    clippy::ptr_arg,
    clippy::uninlined_format_args,
    clippy::disallowed_methods,
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::cast_possible_truncation,
    clippy::doc_markdown
)]

use clap::{Parser, Subcommand};
use log::{debug, LevelFilter};
use serde::Serialize;
use std::path::PathBuf;
use unigrid_core::{GridBox, Rect, Size};
use unigrid_layout::GridMetrics;
use unigrid_yaml::Scene;

#[derive(Parser)]
#[command(name = "unigrid")]
#[command(about = "Uniform grid layout engine CLI")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lay out a scene and print every box's bounds
    Layout {
        /// Path to scene file
        #[arg(default_value = "scene.yaml")]
        scene: PathBuf,

        /// Override the container width (0 leaves it unsized)
        #[arg(short, long)]
        width: Option<u32>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Check scene file validity
    Check {
        /// Path to scene file
        #[arg(default_value = "scene.yaml")]
        scene: PathBuf,
    },

    /// Draw the laid out scene as text
    Preview {
        /// Path to scene file
        #[arg(default_value = "scene.yaml")]
        scene: PathBuf,

        /// Override the container width (0 leaves it unsized)
        #[arg(short, long)]
        width: Option<u32>,

        /// Pixels per character column; rows are twice as tall
        #[arg(short, long, default_value = "10")]
        scale: u32,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Layout {
            scene,
            width,
            format,
        } => {
            layout_scene(&scene, width, &format);
        }
        Commands::Check { scene } => {
            check_scene(&scene);
        }
        Commands::Preview {
            scene,
            width,
            scale,
        } => {
            preview_scene(&scene, width, scale);
        }
    }
}

/// `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn load_scene(path: &PathBuf, width: Option<u32>) -> Scene {
    let mut scene = match Scene::load(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Scene invalid: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(width) = width {
        debug!("container width overridden to {width}");
        scene.set_width(width);
    }
    scene
}

// =============================================================================
// Layout
// =============================================================================

#[derive(Debug, Serialize)]
struct BoxReport {
    index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    visible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    bounds: Option<Rect>,
}

#[derive(Debug, Serialize)]
struct LayoutReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    width: Option<u32>,
    metrics: GridMetrics,
    minimum: Size,
    preferred: Size,
    boxes: Vec<BoxReport>,
}

impl LayoutReport {
    fn run(scene: &mut Scene) -> Self {
        let metrics = scene.perform_layout();
        let width = scene.width();
        Self {
            width: (width > 0).then_some(width),
            metrics,
            minimum: scene.minimum_size(),
            preferred: scene.preferred_size(),
            boxes: scene
                .boxes()
                .iter()
                .enumerate()
                .map(|(index, b)| BoxReport {
                    index,
                    label: b.label.clone(),
                    visible: b.visible,
                    bounds: b.visible.then_some(b.bounds()),
                })
                .collect(),
        }
    }

    fn to_text(&self) -> String {
        let m = &self.metrics;
        let mut out = String::new();
        match self.width {
            Some(w) => out.push_str(&format!("Width: {}\n", w)),
            None => out.push_str("Width: unbounded\n"),
        }
        out.push_str(&format!(
            "Grid: {} cols x {} rows of {}x{} cells\n",
            m.cols, m.rows, m.cell.width, m.cell.height
        ));
        out.push_str(&format!(
            "Gaps: inner {}, leading {}, trailing {}\n",
            m.inner_gap, m.leading_gap, m.trailing_gap
        ));
        out.push_str(&format!(
            "Minimum: {}x{}\nPreferred: {}x{}\n",
            self.minimum.width, self.minimum.height, self.preferred.width, self.preferred.height
        ));
        for b in &self.boxes {
            let label = b.label.as_deref().unwrap_or("-");
            match b.bounds {
                Some(r) => out.push_str(&format!(
                    "  [{}] {:<12} x={} y={} w={} h={}\n",
                    b.index, label, r.x, r.y, r.width, r.height
                )),
                None => out.push_str(&format!("  [{}] {:<12} hidden\n", b.index, label)),
            }
        }
        out
    }
}

fn layout_scene(path: &PathBuf, width: Option<u32>, format: &str) {
    let mut scene = load_scene(path, width);
    let report = LayoutReport::run(&mut scene);

    match format {
        "json" => match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to serialize report: {}", e);
                std::process::exit(1);
            }
        },
        "text" => print!("{}", report.to_text()),
        other => {
            eprintln!("Unknown format: {} (expected text or json)", other);
            std::process::exit(1);
        }
    }
}

// =============================================================================
// Check
// =============================================================================

fn check_scene(path: &PathBuf) {
    println!("Checking scene: {}", path.display());
    let scene = load_scene(path, None);
    let visible = scene.boxes().iter().filter(|b| b.visible).count();
    let layout = scene.layout();

    println!("Scene valid!");
    println!("  Boxes: {} ({} visible)", scene.len(), visible);
    match scene.width() {
        0 => println!("  Width: unsized"),
        w => println!("  Width: {}", w),
    }
    println!("  Horizontal gap: {:?}", layout.h_gap());
    println!("  Vertical gap: {}", layout.v_gap());
    let size = scene.preferred_size();
    println!("  Preferred size: {}x{}", size.width, size.height);
}

// =============================================================================
// Preview
// =============================================================================

const MAX_PREVIEW_COLUMNS: u32 = 160;
const MAX_PREVIEW_ROWS: u32 = 100;

/// Smallest scale at or above `requested` whose canvas fits the preview limits.
fn preview_scale(size: Size, requested: u32) -> u32 {
    requested
        .max(1)
        .max(size.width.div_ceil(MAX_PREVIEW_COLUMNS))
        .max(size.height.div_ceil(MAX_PREVIEW_ROWS * 2))
}

/// Character grid covering `size` at `scale` pixels per column.
///
/// The scale is raised when the canvas would exceed
/// `MAX_PREVIEW_COLUMNS` x `MAX_PREVIEW_ROWS` characters.
fn render_preview(size: Size, boxes: &[GridBox], scale: u32) -> String {
    let x_scale = preview_scale(size, scale);
    if x_scale != scale.max(1) {
        debug!("preview scale raised from {scale} to {x_scale} for {}x{}", size.width, size.height);
    }
    let y_scale = x_scale.saturating_mul(2);
    let cols = size.width.div_ceil(x_scale) as usize;
    let rows = size.height.div_ceil(y_scale) as usize;
    let mut canvas = vec![vec!['.'; cols]; rows];

    for (index, b) in boxes.iter().enumerate().filter(|(_, b)| b.visible) {
        let glyph = glyph_for(b, index);
        let r = b.bounds();
        let (x0, x1) = (r.x / x_scale, r.right().div_ceil(x_scale));
        let (y0, y1) = (r.y / y_scale, r.bottom().div_ceil(y_scale));
        for row in canvas.iter_mut().take(y1 as usize).skip(y0 as usize) {
            for cell in row.iter_mut().take(x1 as usize).skip(x0 as usize) {
                *cell = glyph;
            }
        }
    }

    let mut out = String::with_capacity(rows * (cols + 1));
    for row in canvas {
        out.extend(row);
        out.push('\n');
    }
    out
}

/// First character of the label, else the index digit.
fn glyph_for(b: &GridBox, index: usize) -> char {
    b.label
        .as_deref()
        .and_then(|label| label.chars().next())
        .unwrap_or_else(|| char::from_digit((index % 36) as u32, 36).unwrap_or('#'))
}

fn preview_scene(path: &PathBuf, width: Option<u32>, scale: u32) {
    let mut scene = load_scene(path, width);
    let _ = scene.perform_layout();
    let size = scene.preferred_size();
    print!("{}", render_preview(size, scene.boxes(), scale));
}
