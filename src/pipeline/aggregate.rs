//! Aggregation Stage
//!
//! Groups filtered records by diet group and reduces each impact metric to
//! a mean (radar) or a sum (treemap), ignoring null cells. Output rows are
//! sorted ascending by display label so downstream results and test
//! expectations are deterministic.

use rustc_hash::FxHashMap;

use crate::data::{DietGroup, ImpactMetric, Record};
use crate::pipeline::ChartMode;

/// One row per diet group after grouping. A `None` value marks a metric
/// whose cells were all null within the group (mean mode only; sums treat
/// null cells as contributing nothing and always produce a value).
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateRow {
    pub diet_group: DietGroup,
    pub values: [Option<f64>; ImpactMetric::COUNT],
}

#[derive(Debug, Default, Clone, Copy)]
struct Accumulator {
    sum: f64,
    count: u32,
}

/// Group by diet group and reduce every metric according to the chart mode.
/// Records with an unmapped diet group are excluded.
pub fn aggregate(records: &[&Record], mode: ChartMode) -> Vec<AggregateRow> {
    let mut groups: FxHashMap<DietGroup, [Accumulator; ImpactMetric::COUNT]> =
        FxHashMap::default();

    for record in records {
        let Some(group) = record.diet_group else {
            continue;
        };
        let accs = groups
            .entry(group)
            .or_insert([Accumulator::default(); ImpactMetric::COUNT]);
        for (acc, value) in accs.iter_mut().zip(record.impacts) {
            if let Some(v) = value {
                acc.sum += v;
                acc.count += 1;
            }
        }
    }

    let mut rows: Vec<AggregateRow> = groups
        .into_iter()
        .map(|(group, accs)| {
            let values = accs.map(|acc| match mode {
                ChartMode::Radar => (acc.count > 0).then(|| acc.sum / f64::from(acc.count)),
                ChartMode::Treemap => Some(acc.sum),
            });
            AggregateRow {
                diet_group: group,
                values,
            }
        })
        .collect();

    rows.sort_by_key(|row| row.diet_group.label());
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn record(diet: DietGroup, ghgs: Option<f64>, land: Option<f64>) -> Record {
        let mut impacts = [Some(0.0); ImpactMetric::COUNT];
        impacts[ImpactMetric::GreenhouseGases.index()] = ghgs;
        impacts[ImpactMetric::LandUse.index()] = land;
        Record {
            diet_group: Some(diet),
            sex: "female".to_string(),
            age_group: "20-29".to_string(),
            impacts,
        }
    }

    #[test]
    fn test_mean_ignores_null_cells() {
        let records = vec![
            record(DietGroup::Vegan, Some(10.0), Some(2.0)),
            record(DietGroup::Vegan, None, Some(4.0)),
        ];
        let refs: Vec<&Record> = records.iter().collect();

        let rows = aggregate(&refs, ChartMode::Radar);
        assert_eq!(rows.len(), 1);
        // Null cell is excluded from the mean denominator
        assert_relative_eq!(rows[0].values[0].unwrap(), 10.0);
        assert_relative_eq!(rows[0].values[1].unwrap(), 3.0);
    }

    #[test]
    fn test_all_null_metric_yields_none_in_mean_mode() {
        let records = vec![
            record(DietGroup::Vegan, None, Some(2.0)),
            record(DietGroup::Vegan, None, Some(4.0)),
        ];
        let refs: Vec<&Record> = records.iter().collect();

        let rows = aggregate(&refs, ChartMode::Radar);
        assert_eq!(rows[0].values[0], None);
    }

    #[test]
    fn test_sum_treats_null_as_zero() {
        let records = vec![
            record(DietGroup::Fish, Some(5.0), None),
            record(DietGroup::Fish, None, None),
        ];
        let refs: Vec<&Record> = records.iter().collect();

        let rows = aggregate(&refs, ChartMode::Treemap);
        assert_relative_eq!(rows[0].values[0].unwrap(), 5.0);
        assert_relative_eq!(rows[0].values[1].unwrap(), 0.0);
    }

    #[test]
    fn test_rows_sorted_by_display_label() {
        let records = vec![
            record(DietGroup::Vegan, Some(1.0), Some(1.0)),
            record(DietGroup::Fish, Some(1.0), Some(1.0)),
            record(DietGroup::Meat100Plus, Some(1.0), Some(1.0)),
        ];
        let refs: Vec<&Record> = records.iter().collect();

        let rows = aggregate(&refs, ChartMode::Radar);
        let labels: Vec<&str> = rows.iter().map(|r| r.diet_group.label()).collect();
        // Ascending label order: "Fish" < "Vegan" < "meat 100+"
        assert_eq!(labels, vec!["Fish", "Vegan", "meat 100+"]);
    }

    #[test]
    fn test_unmapped_diet_group_excluded() {
        let mut orphan = record(DietGroup::Vegan, Some(1.0), Some(1.0));
        orphan.diet_group = None;
        let records = vec![orphan];
        let refs: Vec<&Record> = records.iter().collect();

        assert!(aggregate(&refs, ChartMode::Radar).is_empty());
        assert!(aggregate(&refs, ChartMode::Treemap).is_empty());
    }
}
