use std::collections::BTreeMap;

use super::aggregate::DimensionTotals;
use crate::assessments::domain::{
    AssessmentResult, ConsistencyReport, CulturalAdjustment, Dimension, DimensionScore,
    ScoringWarning,
};
use crate::assessments::recommendations;
use crate::assessments::scoring::AttemptContext;

/// Input bundle for the final assembly stage.
pub(crate) struct InsightInputs<'a> {
    pub attempt: &'a AttemptContext,
    pub totals: &'a DimensionTotals,
    pub normalized: &'a BTreeMap<Dimension, f32>,
    pub adjusted: &'a BTreeMap<Dimension, f32>,
    pub adjustment: CulturalAdjustment,
    pub consistency: ConsistencyReport,
    pub classification: (Dimension, Dimension),
    pub answered_count: usize,
    pub question_count: usize,
    pub completion_time_seconds: u32,
    pub mean_confidence: Option<f32>,
    pub warnings: Vec<ScoringWarning>,
}

/// Fold every stage output into the immutable result record.
///
/// Pure aggregation: nothing here recomputes scores, and the free-text
/// insight field is left for the external generator to populate.
pub(crate) fn assemble(inputs: InsightInputs<'_>) -> AssessmentResult {
    let InsightInputs {
        attempt,
        totals,
        normalized,
        adjusted,
        adjustment,
        consistency,
        classification,
        answered_count,
        question_count,
        completion_time_seconds,
        mean_confidence,
        warnings,
    } = inputs;

    let mut dimension_scores = BTreeMap::new();
    for (dimension, raw) in &totals.raw_sums {
        let range = totals.ranges.get(dimension).copied().unwrap_or_default();
        dimension_scores.insert(
            *dimension,
            DimensionScore {
                raw: *raw,
                theoretical_min: range.min,
                theoretical_max: range.max,
                normalized: normalized.get(dimension).copied().unwrap_or(0.0),
                adjusted: adjusted.get(dimension).copied().unwrap_or(0.0),
            },
        );
    }

    // Floored: 100 means every question answered. The provisional flag
    // compares the raw counts, not the truncated percentage.
    let completion_percentage = if question_count > 0 {
        ((answered_count as f32 / question_count as f32) * 100.0).floor() as u8
    } else {
        0
    };
    let provisional = answered_count < question_count;

    let (primary_gift, secondary_gift) = classification;
    let complementary_gifts = recommendations::complementary_gifts(adjusted);
    let recommendations = recommendations::for_profile(adjusted, primary_gift);

    AssessmentResult {
        attempt_id: attempt.attempt_id.clone(),
        respondent_id: attempt.respondent_id.clone(),
        assessment_id: attempt.assessment_id.clone(),
        dimension_scores,
        total_raw: totals.total_raw,
        total_max: totals.total_max,
        completion_percentage,
        provisional,
        consistency,
        completion_time_seconds,
        mean_confidence,
        primary_gift,
        secondary_gift,
        cultural_adjustment: adjustment,
        complementary_gifts,
        recommendations,
        ai_insights: None,
        warnings,
    }
}
