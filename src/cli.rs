//! `arcball-drag`: evaluate a single drag against a configured sphere and camera

use crate::config::ArcballConfig;
use anyhow::{Context, Result};
use arcball_core::AxisMode;
use arcball_math::{Matrix3, Vector2};
use clap::{ArgAction, Parser};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "arcball-drag",
    version,
    about = "Compute the arcball rotation for a drag between two window points"
)]
pub struct Cli {
    /// Path to a TOML config file (falls back to $ARCBALL_CONFIG, then defaults)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Drag start in window pixels, as X,Y
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    pub start: Vector2,

    /// Drag end in window pixels, as X,Y
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    pub end: Vector2,

    /// Override the configured axis handling (normalized or raw)
    #[arg(long)]
    pub axis_mode: Option<AxisMode>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Outcome of one evaluated drag
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DragReport {
    pub start: Vector2,
    pub end: Vector2,
    pub axis_mode: AxisMode,
    /// Whether the start / end rays hit the sphere
    pub start_hit: bool,
    pub end_hit: bool,
    pub angle_degrees: f32,
    pub rotation: Matrix3,
}

impl Cli {
    pub fn run(&self) -> Result<DragReport> {
        let config = ArcballConfig::load_or_default(self.config.as_deref())
            .context("Failed to load arcball configuration")?;
        Ok(evaluate(&config, self.start, self.end, self.axis_mode))
    }
}

/// Evaluate a drag with the sphere and camera described by `config`.
pub fn evaluate(
    config: &ArcballConfig,
    start: Vector2,
    end: Vector2,
    axis_mode: Option<AxisMode>,
) -> DragReport {
    let arcball = config.arcball();
    let camera = config.camera_state();
    let axis_mode = axis_mode.unwrap_or(config.rotation.axis_mode);

    let p1 = arcball.surface_point(start, &camera);
    let p2 = arcball.surface_point(end, &camera);
    let angle_degrees = match (p1, p2) {
        (Some(p1), Some(p2)) => p1.dot(&p2).clamp(-1.0, 1.0).acos().to_degrees(),
        _ => 0.0,
    };

    let rotation = arcball.rotation_with_axis_mode(start, end, &camera, axis_mode);
    info!(
        start_hit = p1.is_some(),
        end_hit = p2.is_some(),
        angle_degrees,
        %axis_mode,
        "Evaluated drag"
    );

    DragReport {
        start,
        end,
        axis_mode,
        start_hit: p1.is_some(),
        end_hit: p2.is_some(),
        angle_degrees,
        rotation,
    }
}

impl DragReport {
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "drag ({}, {}) -> ({}, {})  axis: {}",
            self.start.x, self.start.y, self.end.x, self.end.y, self.axis_mode
        );
        if !(self.start_hit && self.end_hit) {
            let _ = writeln!(out, "drag leaves the sphere, rotation ignored");
        }
        let _ = writeln!(out, "angle: {:.4} deg", self.angle_degrees);
        for row in &self.rotation.rows {
            let _ = writeln!(out, "[{:>10.6} {:>10.6} {:>10.6}]", row[0], row[1], row[2]);
        }
        out
    }
}

/// Parse `X,Y` into a window point.
pub fn parse_point(s: &str) -> std::result::Result<Vector2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("Expected X,Y but got '{}'", s))?;
    let x: f32 = x
        .trim()
        .parse()
        .map_err(|e| format!("Invalid X coordinate '{}': {}", x.trim(), e))?;
    let y: f32 = y
        .trim()
        .parse()
        .map_err(|e| format!("Invalid Y coordinate '{}': {}", y.trim(), e))?;
    Ok(Vector2::new(x, y))
}

/// Install a stderr subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
