use super::ChartEmitter;
use crate::errors::{AppError, AppResult};
use crate::models::plan::{ChartPlan, DrawInstruction, Rgb};
use plotters::prelude::*;
use std::error::Error;
use std::path::Path;

const FONT: &str = "sans-serif";
const FONT_SIZE: u32 = 12;
const TICK_FONT_SIZE: u32 = 10;

/// Draws plans with the plotters bitmap backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct PngEmitter;

impl ChartEmitter for PngEmitter {
    fn emit(&self, plan: &ChartPlan, path: &Path) -> AppResult<()> {
        draw_plan(plan, path).map_err(|e| AppError::Chart(e.to_string()))
    }

    fn extension(&self) -> &'static str {
        "png"
    }
}

fn color(rgb: &Rgb) -> RGBColor {
    let (r, g, b) = rgb.to_u8();
    RGBColor(r, g, b)
}

fn draw_plan(plan: &ChartPlan, path: &Path) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, (plan.width, plan.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let (x0, x1) = plan.axis.x_range;
    let (y0, y1) = plan.axis.y_range();

    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(55)
        .build_cartesian_2d(x0..x1, y0..y1)?;

    let x_labels = ((x1 - x0) / plan.axis.x_major_step_hours).round() as usize + 1;
    let minor_lines = match plan.axis.minor_subdivisions {
        Some(n) if plan.axis.minor_grid_visible => n.saturating_sub(1) as usize,
        _ => 0,
    };

    chart
        .configure_mesh()
        .x_labels(x_labels)
        .y_labels(plan.axis.y_ticks.len())
        .x_label_formatter(&|x: &f64| format!("{:02}:00", x.round() as i64))
        .y_label_formatter(&|y: &f64| format!("{:.0}", y))
        .x_max_light_lines(0)
        .y_max_light_lines(minor_lines)
        .y_desc(plan.title.as_str())
        .axis_desc_style((FONT, FONT_SIZE))
        .label_style((FONT, TICK_FONT_SIZE))
        .draw()?;

    for instruction in &plan.instructions {
        match instruction {
            DrawInstruction::Fill {
                color: rgb, points, ..
            } => {
                chart.draw_series(std::iter::once(Polygon::new(
                    points.clone(),
                    color(rgb).filled(),
                )))?;
            }
            DrawInstruction::Line {
                color: rgb,
                width,
                points,
                ..
            } => {
                chart.draw_series(LineSeries::new(
                    points.iter().copied(),
                    color(rgb).stroke_width(*width),
                ))?;
            }
        }
    }

    root.present()?;
    Ok(())
}
