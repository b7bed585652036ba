//! Chart Specification
//!
//! The pipeline's output: a serializable description of either chart,
//! complete enough for an external renderer (the browser-side plotting
//! library) to draw without further computation.

use serde::Serialize;

use crate::data::{DietGroup, ImpactMetric};
use crate::pipeline::shape::{RadarPoint, RadarSeries, TreemapTile};

const RADAR_TITLE: &str = "Environmental Impact by Diet Group";
const TREEMAP_TITLE: &str =
    "Normalized Treemap of Dietary Habits Contribution to Environmental Impact by Age and Gender";

/// Shared translucent fill under every radar polygon.
const RADAR_FILL: &str = "rgba(68, 206, 246, 0.2)";

/// Fixed line color per diet group, stable across queries.
pub fn diet_color(group: DietGroup) -> &'static str {
    match group {
        DietGroup::Meat100Plus => "rgba(54, 162, 235, 1)",
        DietGroup::Meat50To99 => "rgba(255, 99, 132, 1)",
        DietGroup::MeatUnder50 => "rgba(255, 206, 86, 1)",
        DietGroup::Fish => "rgba(75, 192, 192, 1)",
        DietGroup::Vegetarian => "rgba(153, 102, 255, 1)",
        DietGroup::Vegan => "rgba(255, 159, 64, 1)",
    }
}

/// One styled radar polygon.
#[derive(Debug, Clone, Serialize)]
pub struct RadarTrace {
    pub name: &'static str,
    pub line_color: &'static str,
    pub fill_color: &'static str,
    pub points: Vec<RadarPoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RadarChart {
    pub title: &'static str,
    /// Radial axis bounds; normalized values peak at 1.0, the headroom
    /// keeps the outermost polygon off the chart edge.
    pub radial_range: [f64; 2],
    /// Closed axis labels (first repeated), matching every trace's points.
    pub axes: Vec<&'static str>,
    pub series: Vec<RadarTrace>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TreemapChart {
    pub title: &'static str,
    pub color_scale: &'static str,
    pub tiles: Vec<TreemapTile>,
}

/// Everything the renderer needs for one chart, tagged by kind.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ChartSpec {
    Radar(RadarChart),
    Treemap(TreemapChart),
}

impl ChartSpec {
    pub fn radar(series: Vec<RadarSeries>) -> ChartSpec {
        let mut axes: Vec<&'static str> =
            ImpactMetric::ALL.iter().map(|m| m.label()).collect();
        axes.push(axes[0]);

        let series = series
            .into_iter()
            .map(|s| RadarTrace {
                name: s.diet_group.label(),
                line_color: diet_color(s.diet_group),
                fill_color: RADAR_FILL,
                points: s.points,
            })
            .collect();

        ChartSpec::Radar(RadarChart {
            title: RADAR_TITLE,
            radial_range: [0.0, 1.3],
            axes,
            series,
        })
    }

    pub fn treemap(tiles: Vec<TreemapTile>) -> ChartSpec {
        ChartSpec::Treemap(TreemapChart {
            title: TREEMAP_TITLE,
            color_scale: "Blues",
            tiles,
        })
    }
}
