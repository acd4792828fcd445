// In crates/engine/src/lib.rs

//! Fetch-free core of the service: price bars in, chart payload out.
//!
//! [`run_pipeline`] derives every column from the bars it is given and holds
//! no state between calls; [`present`] shapes the result for the renderer.

pub mod dump;
pub mod error;
pub mod metadata;
pub mod pipeline;
pub mod presentation;

pub use error::{EngineError, Result};
pub use metadata::{chart_metadata, ChartMetadata};
pub use pipeline::{run_pipeline, AugmentedRow, AugmentedSeries, Pipeline};
pub use presentation::{present, ChartPayload, PresentedRow};

/// Runs the pipeline and shapes the result in one step.
pub fn compute_chart(bars: Vec<core_types::Bar>) -> Result<(AugmentedSeries, ChartPayload)> {
    let series = run_pipeline(bars)?;
    let payload = present(&series);
    Ok((series, payload))
}
