//! Dataset Loading and Typed Records
//!
//! Loads the respondent-level diet survey CSV using Polars, keeps the twelve
//! columns the dashboard uses, coerces the nine impact columns to floats
//! (unparseable cells become nulls, not errors) and materializes the frame
//! into fixed typed records. Loading happens once at startup; the record set
//! is read-only afterwards.

use std::path::Path;

use polars::prelude::*;
use thiserror::Error;

/// The nine environmental-impact metrics, in canonical axis order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImpactMetric {
    GreenhouseGases,
    LandUse,
    WaterScarcity,
    Eutrophication,
    GhgCh4,
    GhgN2o,
    Biodiversity,
    WaterUse,
    Acidification,
}

impl ImpactMetric {
    pub const COUNT: usize = 9;

    pub const ALL: [ImpactMetric; Self::COUNT] = [
        ImpactMetric::GreenhouseGases,
        ImpactMetric::LandUse,
        ImpactMetric::WaterScarcity,
        ImpactMetric::Eutrophication,
        ImpactMetric::GhgCh4,
        ImpactMetric::GhgN2o,
        ImpactMetric::Biodiversity,
        ImpactMetric::WaterUse,
        ImpactMetric::Acidification,
    ];

    /// Column name in the source CSV.
    pub fn raw_column(self) -> &'static str {
        match self {
            ImpactMetric::GreenhouseGases => "mean_ghgs",
            ImpactMetric::LandUse => "mean_land",
            ImpactMetric::WaterScarcity => "mean_watscar",
            ImpactMetric::Eutrophication => "mean_eut",
            ImpactMetric::GhgCh4 => "mean_ghgs_ch4",
            ImpactMetric::GhgN2o => "mean_ghgs_n2o",
            ImpactMetric::Biodiversity => "mean_bio",
            ImpactMetric::WaterUse => "mean_watuse",
            ImpactMetric::Acidification => "mean_acid",
        }
    }

    /// Human-readable axis label.
    pub fn label(self) -> &'static str {
        match self {
            ImpactMetric::GreenhouseGases => "Greenhouse Gases",
            ImpactMetric::LandUse => "Land Use",
            ImpactMetric::WaterScarcity => "Water Scarcity",
            ImpactMetric::Eutrophication => "Eutrophication",
            ImpactMetric::GhgCh4 => "GHG CH4",
            ImpactMetric::GhgN2o => "GHG N2O",
            ImpactMetric::Biodiversity => "Biodiversity",
            ImpactMetric::WaterUse => "Water Usage",
            ImpactMetric::Acidification => "Acidification",
        }
    }

    /// Position in the canonical order (index into `Record::impacts`).
    pub fn index(self) -> usize {
        self as usize
    }
}

/// The six canonical diet groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DietGroup {
    Meat100Plus,
    Meat50To99,
    MeatUnder50,
    Fish,
    Vegetarian,
    Vegan,
}

impl DietGroup {
    pub const ALL: [DietGroup; 6] = [
        DietGroup::Meat100Plus,
        DietGroup::Meat50To99,
        DietGroup::MeatUnder50,
        DietGroup::Fish,
        DietGroup::Vegetarian,
        DietGroup::Vegan,
    ];

    /// Map a raw survey code to its diet group. Codes outside the six-entry
    /// mapping yield `None` and are excluded from every grouped result.
    pub fn from_code(code: &str) -> Option<DietGroup> {
        match code {
            "meat100" => Some(DietGroup::Meat100Plus),
            "meat" => Some(DietGroup::Meat50To99),
            "meat50" => Some(DietGroup::MeatUnder50),
            "fish" => Some(DietGroup::Fish),
            "veggie" => Some(DietGroup::Vegetarian),
            "vegan" => Some(DietGroup::Vegan),
            _ => None,
        }
    }

    /// Reverse lookup from the display label (used by the query interface).
    pub fn from_label(label: &str) -> Option<DietGroup> {
        DietGroup::ALL.into_iter().find(|g| g.label() == label)
    }

    /// Display label shown in legends and option lists.
    pub fn label(self) -> &'static str {
        match self {
            DietGroup::Meat100Plus => "meat 100+",
            DietGroup::Meat50To99 => "meat50-99",
            DietGroup::MeatUnder50 => "meat <50",
            DietGroup::Fish => "Fish",
            DietGroup::Vegetarian => "Vegetarian",
            DietGroup::Vegan => "Vegan",
        }
    }
}

/// One respondent-level observation. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// `None` when the source code had no display label.
    pub diet_group: Option<DietGroup>,
    pub sex: String,
    pub age_group: String,
    /// Nine impact values in canonical metric order; `None` marks a cell
    /// that was missing or failed numeric coercion.
    pub impacts: [Option<f64>; ImpactMetric::COUNT],
}

/// Load-time failures. All of these abort startup; nothing is retried.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read dataset: {0}")]
    Read(#[from] PolarsError),

    #[error("dataset is missing required column '{0}'")]
    MissingColumn(&'static str),
}

/// The full record set, loaded once and shared read-only with every
/// pipeline invocation.
#[derive(Debug, Clone)]
pub struct DietData {
    pub records: Vec<Record>,
}

const CATEGORY_COLUMNS: [&str; 3] = ["diet_group", "sex", "age_group"];

impl DietData {
    /// Read the survey CSV and materialize typed records.
    ///
    /// Extra columns in the file are ignored. A missing file or a missing
    /// required column is fatal; malformed numeric cells are not.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.as_ref().into()))?
            .finish()?;

        Self::from_frame(df)
    }

    fn from_frame(df: DataFrame) -> Result<Self, LoadError> {
        for name in CATEGORY_COLUMNS {
            if df.column(name).is_err() {
                return Err(LoadError::MissingColumn(name));
            }
        }
        for metric in ImpactMetric::ALL {
            if df.column(metric.raw_column()).is_err() {
                return Err(LoadError::MissingColumn(metric.raw_column()));
            }
        }

        let diet = df.column("diet_group")?.cast(&DataType::String)?;
        let diet = diet.str()?.clone();
        let sex = df.column("sex")?.cast(&DataType::String)?;
        let sex = sex.str()?.clone();
        let age = df.column("age_group")?.cast(&DataType::String)?;
        let age = age.str()?.clone();

        // Non-strict cast: cells that do not parse as numbers become nulls.
        let mut impact_cols = Vec::with_capacity(ImpactMetric::COUNT);
        for metric in ImpactMetric::ALL {
            let col = df.column(metric.raw_column())?.cast(&DataType::Float64)?;
            impact_cols.push(col.f64()?.clone());
        }

        let mut records = Vec::with_capacity(df.height());
        for idx in 0..df.height() {
            let mut impacts = [None; ImpactMetric::COUNT];
            for (slot, col) in impacts.iter_mut().zip(&impact_cols) {
                *slot = col.get(idx);
            }

            records.push(Record {
                diet_group: diet.get(idx).and_then(DietGroup::from_code),
                sex: sex.get(idx).unwrap_or_default().to_string(),
                age_group: age.get(idx).unwrap_or_default().to_string(),
                impacts,
            });
        }

        Ok(DietData { records })
    }

    /// Distinct sex values, sorted (UI option list).
    pub fn sexes(&self) -> Vec<String> {
        let mut out: Vec<String> = self.records.iter().map(|r| r.sex.clone()).collect();
        out.sort();
        out.dedup();
        out
    }

    /// Distinct age-group values, sorted (UI option list).
    pub fn age_groups(&self) -> Vec<String> {
        let mut out: Vec<String> = self.records.iter().map(|r| r.age_group.clone()).collect();
        out.sort();
        out.dedup();
        out
    }
}
