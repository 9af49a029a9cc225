//! Bin ND-GAIN country scores into a histogram, boost chosen score ranges and
//! export the renormalized bins as sampling weights for a geographic lottery.

pub mod binning;
pub mod config;
pub mod data;
pub mod export;
pub mod pipeline;

pub use pipeline::{run_pipeline, PipelineOutcome, PipelineResult};
