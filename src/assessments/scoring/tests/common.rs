use crate::assessments::domain::{
    AnswerOption, Dimension, QuestionDefinition, QuestionId, RawResponse, ResponseValue,
};
use crate::assessments::question_bank::QuestionSet;
use crate::assessments::scoring::{
    AttemptContext, CulturalAdjustmentTable, ScoringEngine, ScoringOptions,
};

pub(super) fn attempt() -> AttemptContext {
    AttemptContext {
        attempt_id: "attempt-001".to_string(),
        respondent_id: "user-001".to_string(),
        assessment_id: "apest-standard-v1".to_string(),
    }
}

pub(super) fn engine() -> ScoringEngine {
    ScoringEngine::new(CulturalAdjustmentTable::identity(), ScoringOptions::default())
}

pub(super) fn likert_question(
    id: &str,
    dimension: Dimension,
    order_index: u32,
) -> QuestionDefinition {
    QuestionDefinition {
        id: QuestionId(id.to_string()),
        assessment_id: "apest-standard-v1".to_string(),
        dimension: dimension.label().to_string(),
        weight: 1.0,
        reverse_scored: false,
        answer_options: Vec::new(),
        scale_min: 1.0,
        scale_max: 5.0,
        order_index,
    }
}

pub(super) fn option_question(
    id: &str,
    dimension: Dimension,
    order_index: u32,
) -> QuestionDefinition {
    QuestionDefinition {
        answer_options: vec![
            AnswerOption {
                key: "rarely".to_string(),
                value: 1.0,
                label: "Rarely".to_string(),
            },
            AnswerOption {
                key: "sometimes".to_string(),
                value: 3.0,
                label: "Sometimes".to_string(),
            },
            AnswerOption {
                key: "often".to_string(),
                value: 5.0,
                label: "Often".to_string(),
            },
        ],
        ..likert_question(id, dimension, order_index)
    }
}

/// One Likert question per APEST dimension, canonical order.
pub(super) fn apest_bank() -> Vec<QuestionDefinition> {
    Dimension::ALL
        .iter()
        .enumerate()
        .map(|(index, dimension)| {
            likert_question(&format!("q-{}", dimension.label()), *dimension, index as u32)
        })
        .collect()
}

pub(super) fn resolved(definitions: &[QuestionDefinition]) -> QuestionSet {
    QuestionSet::resolve(definitions).expect("bank resolves")
}

pub(super) fn numeric_answer(id: &str, value: f32) -> RawResponse {
    RawResponse {
        question_id: QuestionId(id.to_string()),
        respondent_id: "user-001".to_string(),
        value: Some(ResponseValue::Numeric(value)),
        response_time_seconds: Some(8),
        confidence: None,
        skipped: false,
    }
}

pub(super) fn text_answer(id: &str, key: &str) -> RawResponse {
    RawResponse {
        value: Some(ResponseValue::Text(key.to_string())),
        ..numeric_answer(id, 0.0)
    }
}

pub(super) fn skipped_answer(id: &str) -> RawResponse {
    RawResponse {
        value: None,
        skipped: true,
        ..numeric_answer(id, 0.0)
    }
}
