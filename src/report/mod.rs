//! Charts over the combined accident dataset.

pub mod analysis;
pub mod frame;
pub mod geo;
pub mod kmeans;
pub mod output;
pub mod stat;

pub use output::{render, Chart, ChartOutput};
