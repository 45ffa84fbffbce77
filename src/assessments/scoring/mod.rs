//! The scoring pipeline: normalize, aggregate, rescale, evaluate
//! consistency, adjust, classify, assemble. Every stage is a pure
//! function over the previous stage's output; the engine performs no I/O
//! and re-running it over the same inputs yields an identical result.

mod aggregate;
pub mod adjustment;
mod classify;
mod consistency;
mod insight;
mod normalizer;
mod scale;

#[cfg(test)]
mod tests;

pub use adjustment::{AdjustmentTableError, CulturalAdjustmentTable};

use std::collections::BTreeMap;

use super::domain::{
    AssessmentResult, NormalizedResponse, QuestionDefinition, QuestionId, RawResponse,
    ScoringError, ScoringWarning,
};
use super::question_bank::QuestionSet;

/// Identity of the attempt being scored. Supplied by the caller, echoed
/// onto the result unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct AttemptContext {
    pub attempt_id: String,
    pub respondent_id: String,
    pub assessment_id: String,
}

/// Knobs the engine does not default silently; callers pass them
/// explicitly so behavior is fully determined by the arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringOptions {
    /// Average seconds per question beyond which an attempt reads as
    /// abandoned-and-resumed.
    pub too_slow_ceiling_seconds: f32,
}

impl Default for ScoringOptions {
    fn default() -> Self {
        Self {
            too_slow_ceiling_seconds: 300.0,
        }
    }
}

/// Stateless scorer holding the adjustment table and tuning options.
///
/// Safe to share across threads and attempts; nothing here mutates.
pub struct ScoringEngine {
    table: CulturalAdjustmentTable,
    options: ScoringOptions,
}

impl ScoringEngine {
    pub fn new(table: CulturalAdjustmentTable, options: ScoringOptions) -> Self {
        Self { table, options }
    }

    /// Score one attempt end to end.
    ///
    /// Fatal data faults (unmapped answers, unknown dimension tags,
    /// responses for questions outside the bank) abort the whole attempt;
    /// no partial result is returned. Non-fatal conditions accumulate as
    /// warnings on the result.
    pub fn score(
        &self,
        attempt: &AttemptContext,
        questions: &[QuestionDefinition],
        responses: &[RawResponse],
        cultural_context: Option<&str>,
    ) -> Result<AssessmentResult, ScoringError> {
        let question_set = QuestionSet::resolve(questions)?;
        let mut warnings: Vec<ScoringWarning> = Vec::new();

        let mut by_question: BTreeMap<&QuestionId, &RawResponse> = BTreeMap::new();
        for response in responses {
            if question_set.get(&response.question_id).is_none() {
                return Err(ScoringError::UnknownQuestion {
                    question_id: response.question_id.0.clone(),
                });
            }
            by_question.insert(&response.question_id, response);
        }

        // Questions without an explicit response contribute nothing and
        // stay out of the answered count, same as an explicit skip.
        let mut normalized: Vec<NormalizedResponse> = Vec::with_capacity(question_set.len());
        for question in question_set.iter() {
            match by_question.get(&question.id) {
                Some(response) => normalized.push(normalizer::normalize(question, response)?),
                None => normalized.push(NormalizedResponse {
                    question_id: question.id.clone(),
                    dimension: question.dimension,
                    canonical: 0.0,
                    contribution: 0.0,
                    answered: false,
                }),
            }
        }

        let totals = aggregate::aggregate(&question_set, &normalized);
        let normalized_scores = scale::normalize_scores(&totals, &mut warnings);
        let consistency = consistency::evaluate(
            &normalized,
            total_time_seconds(responses),
            question_set.len(),
            self.options.too_slow_ceiling_seconds,
            &mut warnings,
        );
        let (adjusted_scores, adjustment) =
            adjustment::apply(&normalized_scores, cultural_context, &self.table);
        let classification = classify::classify(&adjusted_scores)?;

        let answered_count = normalized.iter().filter(|entry| entry.answered).count();

        Ok(insight::assemble(insight::InsightInputs {
            attempt,
            totals: &totals,
            normalized: &normalized_scores,
            adjusted: &adjusted_scores,
            adjustment,
            consistency,
            classification,
            answered_count,
            question_count: question_set.len(),
            completion_time_seconds: total_time_seconds(responses),
            mean_confidence: mean_confidence(responses),
            warnings,
        }))
    }
}

fn total_time_seconds(responses: &[RawResponse]) -> u32 {
    responses
        .iter()
        .filter_map(|response| response.response_time_seconds)
        .sum()
}

fn mean_confidence(responses: &[RawResponse]) -> Option<f32> {
    let reported: Vec<u8> = responses
        .iter()
        .filter_map(|response| response.confidence)
        .collect();

    if reported.is_empty() {
        return None;
    }

    Some(reported.iter().map(|value| *value as f32).sum::<f32>() / reported.len() as f32)
}
