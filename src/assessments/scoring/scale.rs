use std::collections::BTreeMap;

use tracing::warn;

use super::aggregate::DimensionTotals;
use crate::assessments::domain::{Dimension, ScoringWarning};

/// Midpoint used when a dimension's theoretical range collapses to a point.
const NEUTRAL_MIDPOINT: f32 = 50.0;

/// Rescale raw dimension sums onto the common 0-100 scale.
///
/// Each dimension is normalized independently against its own theoretical
/// range; cross-dimension ranking happens only after cultural adjustment.
pub(crate) fn normalize_scores(
    totals: &DimensionTotals,
    warnings: &mut Vec<ScoringWarning>,
) -> BTreeMap<Dimension, f32> {
    let mut normalized = BTreeMap::new();

    for (dimension, raw) in &totals.raw_sums {
        let range = totals
            .ranges
            .get(dimension)
            .copied()
            .unwrap_or_default();

        let value = if (range.max - range.min).abs() < f32::EPSILON {
            warn!(dimension = %dimension, "degenerate theoretical range, using neutral midpoint");
            warnings.push(ScoringWarning::DegenerateRange {
                dimension: *dimension,
            });
            NEUTRAL_MIDPOINT
        } else {
            (((raw - range.min) / (range.max - range.min)) * 100.0).clamp(0.0, 100.0)
        };

        normalized.insert(*dimension, value);
    }

    normalized
}
