use crate::assessments::domain::{NormalizedResponse, RawResponse, ResponseValue, ScoringError};
use crate::assessments::question_bank::ResolvedQuestion;

/// Convert one raw answer into its canonical contribution.
///
/// Reverse scoring reflects the canonical value across the instrument's
/// scale (`max + min - value`) instead of flipping its sign, so polarity
/// is preserved on scales that are not symmetric around zero.
pub(crate) fn normalize(
    question: &ResolvedQuestion,
    response: &RawResponse,
) -> Result<NormalizedResponse, ScoringError> {
    let value = match response.value.as_ref() {
        Some(value) if !response.skipped => value,
        _ => return Ok(unanswered(question)),
    };

    let canonical = match value {
        ResponseValue::Numeric(value) => *value,
        ResponseValue::Text(key) => lookup_option(question, key)?,
        // Averaged so the canonical value stays inside the scale bounds
        // derived from single selections.
        ResponseValue::MultiSelect(keys) => {
            if keys.is_empty() {
                return Ok(unanswered(question));
            }
            let mut sum = 0.0;
            for key in keys {
                sum += lookup_option(question, key)?;
            }
            sum / keys.len() as f32
        }
    };

    let oriented = if question.reverse_scored {
        question.scale_max + question.scale_min - canonical
    } else {
        canonical
    };

    Ok(NormalizedResponse {
        question_id: question.id.clone(),
        dimension: question.dimension,
        canonical: oriented,
        contribution: oriented * question.weight,
        answered: true,
    })
}

fn unanswered(question: &ResolvedQuestion) -> NormalizedResponse {
    NormalizedResponse {
        question_id: question.id.clone(),
        dimension: question.dimension,
        canonical: 0.0,
        contribution: 0.0,
        answered: false,
    }
}

fn lookup_option(question: &ResolvedQuestion, key: &str) -> Result<f32, ScoringError> {
    question
        .options
        .get(key)
        .copied()
        .ok_or_else(|| ScoringError::UnmappedAnswer {
            question_id: question.id.0.clone(),
            key: key.to_string(),
        })
}
