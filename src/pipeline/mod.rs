//! The filter -> aggregate -> normalize -> reshape pipeline.
//!
//! Each run is a pure, synchronous function of the immutable record set and
//! the query built from the current control values. Nothing is cached
//! between runs; every invocation recomputes from scratch.

pub mod aggregate;
pub mod filter;
pub mod normalize;
pub mod shape;

use serde::{Deserialize, Serialize};

use crate::chart::ChartSpec;
use crate::data::{DietData, DietGroup};

/// Which of the two charts the dashboard is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartMode {
    Radar,
    Treemap,
}

/// One user interaction's worth of control values. Built fresh per request
/// and discarded after the pipeline run.
#[derive(Debug, Clone)]
pub struct Query {
    pub diets: Vec<DietGroup>,
    pub sexes: Vec<String>,
    pub age_groups: Vec<String>,
    pub mode: ChartMode,
}

/// Run the full pipeline for one interaction and produce a chart-ready spec.
pub fn run_pipeline(data: &DietData, query: &Query) -> ChartSpec {
    let filtered = filter::filter_records(&data.records, query);
    let aggregated = aggregate::aggregate(&filtered, query.mode);
    let normalized = normalize::normalize(&aggregated, query.mode);

    match query.mode {
        ChartMode::Radar => ChartSpec::radar(shape::to_radar_series(&normalized, &query.diets)),
        ChartMode::Treemap => ChartSpec::treemap(shape::to_treemap_series(&normalized)),
    }
}
