//! Normalization Stage
//!
//! Rescales each impact-metric column independently across the aggregate
//! rows: divide-by-column-max for radar, divide-by-column-sum for treemap.
//! A non-positive denominator maps the whole column to zero rather than
//! dividing, so the output never contains a NaN or an infinity.

use crate::data::{DietGroup, ImpactMetric};
use crate::pipeline::aggregate::AggregateRow;
use crate::pipeline::ChartMode;

/// Same shape as [`AggregateRow`] with every column rescaled: max-normalized
/// columns peak at 1.0, sum-normalized columns total 1.0 (all-zero columns
/// stay all-zero in both modes).
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRow {
    pub diet_group: DietGroup,
    pub values: [f64; ImpactMetric::COUNT],
}

/// Normalize every metric column independently. Null aggregate values are
/// treated as zero before rescaling.
pub fn normalize(rows: &[AggregateRow], mode: ChartMode) -> Vec<NormalizedRow> {
    let mut out: Vec<NormalizedRow> = rows
        .iter()
        .map(|row| NormalizedRow {
            diet_group: row.diet_group,
            values: row.values.map(|v| v.unwrap_or(0.0)),
        })
        .collect();

    for metric in ImpactMetric::ALL {
        let idx = metric.index();
        let denominator = match mode {
            ChartMode::Radar => out
                .iter()
                .map(|row| row.values[idx])
                .fold(f64::NEG_INFINITY, f64::max),
            ChartMode::Treemap => out.iter().map(|row| row.values[idx]).sum(),
        };

        for row in &mut out {
            row.values[idx] = if denominator > 0.0 {
                row.values[idx] / denominator
            } else {
                0.0
            };
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn row(diet: DietGroup, ghgs: Option<f64>, land: Option<f64>) -> AggregateRow {
        let mut values = [Some(0.0); ImpactMetric::COUNT];
        values[0] = ghgs;
        values[1] = land;
        AggregateRow {
            diet_group: diet,
            values,
        }
    }

    #[test]
    fn test_max_normalization_peaks_at_one() {
        let rows = vec![
            row(DietGroup::Vegan, Some(10.0), Some(2.0)),
            row(DietGroup::Fish, Some(5.0), Some(4.0)),
        ];

        let out = normalize(&rows, ChartMode::Radar);
        assert_relative_eq!(out[0].values[0], 1.0);
        assert_relative_eq!(out[1].values[0], 0.5);
        assert_relative_eq!(out[0].values[1], 0.5);
        assert_relative_eq!(out[1].values[1], 1.0);
    }

    #[test]
    fn test_sum_normalization_totals_one() {
        let rows = vec![
            row(DietGroup::Vegan, Some(3.0), Some(1.0)),
            row(DietGroup::Fish, Some(1.0), Some(1.0)),
        ];

        let out = normalize(&rows, ChartMode::Treemap);
        assert_relative_eq!(out[0].values[0], 0.75);
        assert_relative_eq!(out[1].values[0], 0.25);
        assert_relative_eq!(out[0].values[0] + out[1].values[0], 1.0);
    }

    #[test]
    fn test_zero_denominator_yields_zero_column() {
        let rows = vec![
            row(DietGroup::Vegan, Some(0.0), None),
            row(DietGroup::Fish, Some(0.0), None),
        ];

        for mode in [ChartMode::Radar, ChartMode::Treemap] {
            let out = normalize(&rows, mode);
            for r in &out {
                assert_eq!(r.values[0], 0.0);
                assert_eq!(r.values[1], 0.0);
                assert!(r.values.iter().all(|v| v.is_finite()));
            }
        }
    }

    #[test]
    fn test_negative_max_yields_zero_column() {
        let rows = vec![
            row(DietGroup::Vegan, Some(-2.0), Some(1.0)),
            row(DietGroup::Fish, Some(-1.0), Some(1.0)),
        ];

        let out = normalize(&rows, ChartMode::Radar);
        assert_eq!(out[0].values[0], 0.0);
        assert_eq!(out[1].values[0], 0.0);
    }

    #[test]
    fn test_max_normalization_is_idempotent() {
        let rows = vec![
            row(DietGroup::Vegan, Some(10.0), Some(2.0)),
            row(DietGroup::Fish, Some(5.0), Some(4.0)),
        ];

        let once = normalize(&rows, ChartMode::Radar);
        let again: Vec<AggregateRow> = once
            .iter()
            .map(|r| AggregateRow {
                diet_group: r.diet_group,
                values: r.values.map(Some),
            })
            .collect();
        let twice = normalize(&again, ChartMode::Radar);

        for (a, b) in once.iter().zip(&twice) {
            for (x, y) in a.values.iter().zip(b.values.iter()) {
                assert_relative_eq!(*x, *y);
            }
        }
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert!(normalize(&[], ChartMode::Radar).is_empty());
        assert!(normalize(&[], ChartMode::Treemap).is_empty());
    }
}
