use std::collections::BTreeMap;

use crate::assessments::domain::{Dimension, NormalizedResponse};
use crate::assessments::question_bank::QuestionSet;

/// Per-dimension theoretical range derived from the question bank.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct DimensionRange {
    pub min: f32,
    pub max: f32,
}

/// Raw sums grouped by dimension plus the attempt-wide totals needed for
/// normalization and completion accounting.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DimensionTotals {
    pub raw_sums: BTreeMap<Dimension, f32>,
    pub ranges: BTreeMap<Dimension, DimensionRange>,
    pub answered_counts: BTreeMap<Dimension, usize>,
    pub total_raw: f32,
    pub total_max: f32,
}

/// Group contributions by dimension.
///
/// Ranges and `total_max` are computed over every question in the bank,
/// answered or skipped, so completion gaps never shrink the denominator.
pub(crate) fn aggregate(
    questions: &QuestionSet,
    normalized: &[NormalizedResponse],
) -> DimensionTotals {
    let mut raw_sums: BTreeMap<Dimension, f32> = BTreeMap::new();
    let mut ranges: BTreeMap<Dimension, DimensionRange> = BTreeMap::new();
    let mut answered_counts: BTreeMap<Dimension, usize> = BTreeMap::new();
    let mut total_max = 0.0;

    for question in questions.iter() {
        let range = ranges.entry(question.dimension).or_default();
        range.min += question.min_contribution();
        range.max += question.max_contribution();
        total_max += question.max_contribution();

        raw_sums.entry(question.dimension).or_insert(0.0);
        answered_counts.entry(question.dimension).or_insert(0);
    }

    let mut total_raw = 0.0;
    for response in normalized {
        let sum = raw_sums.entry(response.dimension).or_insert(0.0);
        *sum += response.contribution;
        total_raw += response.contribution;

        if response.answered {
            *answered_counts.entry(response.dimension).or_insert(0) += 1;
        }
    }

    DimensionTotals {
        raw_sums,
        ranges,
        answered_counts,
        total_raw,
        total_max,
    }
}
