use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::assessments::domain::{CulturalAdjustment, Dimension};

/// Factor bounds enforced when a table is loaded. A factor outside this
/// band could invert dimension rankings outright, which adjustment must
/// never do on its own.
pub const FACTOR_LOWER_BOUND: f32 = 0.85;
pub const FACTOR_UPPER_BOUND: f32 = 1.15;

/// Context label that always means "no adjustment".
pub const UNIVERSAL_CONTEXT: &str = "universal";

/// Versioned lookup of multiplicative factors keyed by cultural context
/// and dimension. Loaded from configuration by the caller; apply-time
/// trusts the bounds enforced here.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CulturalAdjustmentTable {
    factors: BTreeMap<String, BTreeMap<Dimension, f32>>,
}

impl CulturalAdjustmentTable {
    /// A table with no entries; every context resolves to factor 1.0.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Build from `(dimension, context, factor)` rows, rejecting factors
    /// outside the allowed band and unknown dimension tags.
    pub fn from_rows<I>(rows: I) -> Result<Self, AdjustmentTableError>
    where
        I: IntoIterator<Item = (String, String, f32)>,
    {
        let mut factors: BTreeMap<String, BTreeMap<Dimension, f32>> = BTreeMap::new();

        for (tag, context, factor) in rows {
            let dimension = Dimension::from_tag(&tag)
                .ok_or_else(|| AdjustmentTableError::UnknownDimension { tag: tag.clone() })?;

            if !(FACTOR_LOWER_BOUND..=FACTOR_UPPER_BOUND).contains(&factor) {
                return Err(AdjustmentTableError::FactorOutOfBounds {
                    dimension,
                    context,
                    factor,
                });
            }

            factors
                .entry(context.trim().to_ascii_lowercase())
                .or_default()
                .insert(dimension, factor);
        }

        Ok(Self { factors })
    }

    /// Parse a `dimension,context,factor` CSV export.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, AdjustmentTableError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut rows = Vec::new();
        for record in csv_reader.deserialize::<AdjustmentRow>() {
            let row = record?;
            rows.push((row.dimension, row.context, row.factor));
        }

        Self::from_rows(rows)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, AdjustmentTableError> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file)
    }

    /// Whether the table defines any factor for the given context.
    pub fn knows_context(&self, context: &str) -> bool {
        self.factors.contains_key(&context.trim().to_ascii_lowercase())
    }

    fn factor(&self, context: &str, dimension: Dimension) -> f32 {
        self.factors
            .get(&context.trim().to_ascii_lowercase())
            .and_then(|by_dimension| by_dimension.get(&dimension))
            .copied()
            .unwrap_or(1.0)
    }
}

#[derive(Debug, Deserialize)]
struct AdjustmentRow {
    dimension: String,
    context: String,
    factor: f32,
}

/// Faults raised while loading an adjustment table.
#[derive(Debug, thiserror::Error)]
pub enum AdjustmentTableError {
    #[error("adjustment table references unknown dimension tag '{tag}'")]
    UnknownDimension { tag: String },
    #[error(
        "factor {factor} for {dimension}/{context} outside [{FACTOR_LOWER_BOUND}, {FACTOR_UPPER_BOUND}]"
    )]
    FactorOutOfBounds {
        dimension: Dimension,
        context: String,
        factor: f32,
    },
    #[error("failed to parse adjustment table: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to read adjustment table: {0}")]
    Io(#[from] std::io::Error),
}

/// Apply the declared context's factors to every dimension in one pass.
///
/// An absent or "universal" context, or one the table has never heard of,
/// leaves the scores untouched and records `applied = false`.
pub(crate) fn apply(
    normalized: &BTreeMap<Dimension, f32>,
    cultural_context: Option<&str>,
    table: &CulturalAdjustmentTable,
) -> (BTreeMap<Dimension, f32>, CulturalAdjustment) {
    let context = cultural_context
        .map(str::trim)
        .filter(|context| !context.is_empty() && !context.eq_ignore_ascii_case(UNIVERSAL_CONTEXT));

    let Some(context) = context.filter(|context| table.knows_context(context)) else {
        let adjusted = normalized.clone();
        let record = CulturalAdjustment::identity(cultural_context.map(str::to_string));
        return (adjusted, record);
    };

    let mut adjusted = BTreeMap::new();
    let mut factors = BTreeMap::new();

    for (dimension, value) in normalized {
        let factor = table.factor(context, *dimension);
        adjusted.insert(*dimension, (value * factor).clamp(0.0, 100.0));
        factors.insert(*dimension, factor);
    }

    let record = CulturalAdjustment {
        applied: true,
        context: Some(context.to_string()),
        factors,
    };

    (adjusted, record)
}
