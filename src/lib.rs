//! Diet Dashboard Rust Implementation
//!
//! Interactive dashboard core for dietary environmental-impact data:
//! - `data`: one-time CSV loading into typed, immutable records
//! - `pipeline`: the filter -> aggregate -> normalize -> reshape stages
//! - `chart`: the serializable chart spec handed to the renderer
//! - `api_server`: Axum routes exposing options and chart specs as JSON

pub mod api_server;
pub mod chart;
pub mod data;
pub mod pipeline;

// Re-export commonly used types
pub use api_server::{create_router, AppState};
pub use chart::ChartSpec;
pub use data::{DietData, DietGroup, ImpactMetric, LoadError, Record};
pub use pipeline::{run_pipeline, ChartMode, Query};
