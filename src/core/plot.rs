//! Static PNG chart of one shot, used by the command-line calculator.
//!
//! Only shapes are drawn (no text) so rendering never depends on system fonts.

use std::fmt::Display;
use std::fs;
use std::path::Path;

use plotters::prelude::*;
use thiserror::Error;

use crate::core::range::RangeEstimate;
use crate::core::window::{compute_world_window, ruler_ticks};

const GRID_TICKS: usize = 20;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("failed to prepare output directory: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to draw chart: {0}")]
    Draw(String),
}

fn draw_err<E: Display>(err: E) -> PlotError {
    PlotError::Draw(err.to_string())
}

pub struct ShotPlot<'a> {
    /// Closed-form curve.
    pub ideal: &'a [(f64, f64)],
    /// Fixed-step samples as the simulation produced them.
    pub simulated: &'a [(f64, f64)],
    pub estimate: RangeEstimate,
    pub apex_height_m: f64,
}

pub fn render_shot_png(path: &Path, shot: &ShotPlot<'_>, size: (u32, u32)) -> Result<(), PlotError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let (world_max_x, world_max_y) =
        compute_world_window(shot.estimate.upper_m, shot.apex_height_m, shot.simulated, 0.0);
    let floor = -0.05 * world_max_y;

    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&RGBColor(135, 206, 235)).map_err(draw_err)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .build_cartesian_2d(0.0..world_max_x, floor..world_max_y)
        .map_err(draw_err)?;

    let grid_style = ShapeStyle::from(&WHITE.mix(0.6)).stroke_width(1);
    chart
        .draw_series(ruler_ticks(world_max_x, GRID_TICKS).into_iter().map(|tick| {
            PathElement::new(vec![(tick.value_m, 0.0), (tick.value_m, world_max_y)], grid_style)
        }))
        .map_err(draw_err)?;
    chart
        .draw_series(ruler_ticks(world_max_y, GRID_TICKS / 2).into_iter().map(|tick| {
            PathElement::new(vec![(0.0, tick.value_m), (world_max_x, tick.value_m)], grid_style)
        }))
        .map_err(draw_err)?;

    chart
        .draw_series(std::iter::once(Rectangle::new(
            [(0.0, floor), (world_max_x, 0.0)],
            RGBColor(34, 139, 34).filled(),
        )))
        .map_err(draw_err)?;

    let band_top = world_max_y * 0.03;
    chart
        .draw_series(std::iter::once(Rectangle::new(
            [
                (shot.estimate.lower_m, 0.0),
                (shot.estimate.upper_m, band_top),
            ],
            RGBColor(0, 100, 0).mix(0.45).filled(),
        )))
        .map_err(draw_err)?;

    chart
        .draw_series(LineSeries::new(
            shot.ideal.iter().copied(),
            ShapeStyle::from(&BLUE).stroke_width(2),
        ))
        .map_err(draw_err)?;
    chart
        .draw_series(
            shot.simulated
                .iter()
                .map(|&point| Circle::new(point, 2, RED.filled())),
        )
        .map_err(draw_err)?;

    root.present().map_err(draw_err)?;
    Ok(())
}
