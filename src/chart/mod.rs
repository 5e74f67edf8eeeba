//! Raster output for chart plans.

pub mod png;

use crate::errors::AppResult;
use crate::models::plan::ChartPlan;
use std::path::Path;

pub use png::PngEmitter;

/// Turns a finished [`ChartPlan`] into an image file.
///
/// The plan fixes every series, color and the figure size; an emitter only
/// owns the drawing mechanics.
pub trait ChartEmitter {
    fn emit(&self, plan: &ChartPlan, path: &Path) -> AppResult<()>;

    /// File extension of the images this emitter writes.
    fn extension(&self) -> &'static str;
}
