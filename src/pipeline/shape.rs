//! Shape Adapter
//!
//! Reformats the normalized aggregate table into the exact layout each chart
//! type consumes: closed polygons (first axis repeated at the end) for the
//! radar chart, and a melted (metric, diet group, value) triple list for the
//! treemap.

use serde::Serialize;

use crate::data::{DietGroup, ImpactMetric};
use crate::pipeline::normalize::NormalizedRow;

/// One radar axis sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarPoint {
    pub axis: &'static str,
    pub value: f64,
}

/// One closed polygon per diet group: nine axis points in canonical metric
/// order plus the first point repeated.
#[derive(Debug, Clone, PartialEq)]
pub struct RadarSeries {
    pub diet_group: DietGroup,
    pub points: Vec<RadarPoint>,
}

/// One melted treemap cell; the rendering hierarchy is metric -> diet group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreemapTile {
    pub metric: &'static str,
    pub diet_group: &'static str,
    pub value: f64,
}

/// Build radar polygons for the selected diet groups. A selected group with
/// no normalized row (filtered down to zero records) is silently skipped, so
/// the output may hold fewer series than selections.
pub fn to_radar_series(rows: &[NormalizedRow], selected: &[DietGroup]) -> Vec<RadarSeries> {
    selected
        .iter()
        .filter_map(|diet| {
            let row = rows.iter().find(|r| r.diet_group == *diet)?;

            let mut points: Vec<RadarPoint> = ImpactMetric::ALL
                .iter()
                .map(|metric| RadarPoint {
                    axis: metric.label(),
                    value: row.values[metric.index()],
                })
                .collect();
            // Repeat the first axis to close the polygon
            points.push(points[0].clone());

            Some(RadarSeries {
                diet_group: *diet,
                points,
            })
        })
        .collect()
}

/// Melt the wide normalized table into one tile per (metric, diet group)
/// pair, metric-major.
pub fn to_treemap_series(rows: &[NormalizedRow]) -> Vec<TreemapTile> {
    ImpactMetric::ALL
        .iter()
        .flat_map(|metric| {
            rows.iter().map(|row| TreemapTile {
                metric: metric.label(),
                diet_group: row.diet_group.label(),
                value: row.values[metric.index()],
            })
        })
        .collect()
}
