use std::collections::BTreeMap;

use crate::assessments::domain::{
    ConsistencyReport, Dimension, NormalizedResponse, ScoringWarning, TimePlausibility,
};

/// Sub-2-second averages imply inattentive click-through.
const TOO_FAST_FLOOR_SECONDS: f32 = 2.0;

/// Minimum answered questions before a dimension's spread is meaningful.
const MIN_SAMPLE: usize = 3;

/// Estimate how internally coherent the answers were.
///
/// For each dimension with at least three answered questions, the
/// coefficient of variation of the oriented canonical values is averaged
/// across dimensions and mapped inversely onto 0-1: tight answers within
/// a dimension push the score toward 1. Dimensions below the sample
/// minimum are recorded as warnings and excluded, never blocking scoring.
pub(crate) fn evaluate(
    normalized: &[NormalizedResponse],
    total_time_seconds: u32,
    question_count: usize,
    too_slow_ceiling_seconds: f32,
    warnings: &mut Vec<ScoringWarning>,
) -> ConsistencyReport {
    // Every dimension in the bank is seeded, so a fully skipped one
    // still shows up below as an insufficient sample.
    let mut by_dimension: BTreeMap<Dimension, Vec<f32>> = BTreeMap::new();
    for response in normalized {
        let values = by_dimension.entry(response.dimension).or_default();
        if response.answered {
            values.push(response.canonical);
        }
    }

    let mut coefficient_sum = 0.0;
    let mut sampled_dimensions = 0usize;

    for (dimension, values) in &by_dimension {
        if values.len() < MIN_SAMPLE {
            warnings.push(ScoringWarning::InsufficientData {
                dimension: *dimension,
                answered: values.len(),
            });
            continue;
        }

        let mean = values.iter().sum::<f32>() / values.len() as f32;
        if mean.abs() < f32::EPSILON {
            // Coefficient of variation is undefined around a zero mean.
            continue;
        }

        let variance = values
            .iter()
            .map(|value| (value - mean).powi(2))
            .sum::<f32>()
            / values.len() as f32;
        coefficient_sum += variance.sqrt() / mean;
        sampled_dimensions += 1;
    }

    let consistency_score = if sampled_dimensions > 0 {
        let average_cv = coefficient_sum / sampled_dimensions as f32;
        1.0 / (1.0 + average_cv)
    } else {
        // No dimension offered enough evidence of inconsistency.
        1.0
    };

    let time_plausibility = classify_time(total_time_seconds, question_count, too_slow_ceiling_seconds);

    ConsistencyReport {
        consistency_score,
        time_plausibility,
    }
}

fn classify_time(
    total_time_seconds: u32,
    question_count: usize,
    too_slow_ceiling_seconds: f32,
) -> TimePlausibility {
    if question_count == 0 {
        return TimePlausibility::Plausible;
    }

    let average = total_time_seconds as f32 / question_count as f32;
    if average < TOO_FAST_FLOOR_SECONDS {
        TimePlausibility::TooFast
    } else if average > too_slow_ceiling_seconds {
        TimePlausibility::TooSlow
    } else {
        TimePlausibility::Plausible
    }
}
