use std::collections::BTreeMap;

use super::domain::{Dimension, QuestionDefinition, QuestionId, ScoringError};

/// Question definition after dimension-tag validation, ready for scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedQuestion {
    pub id: QuestionId,
    pub dimension: Dimension,
    pub weight: f32,
    pub reverse_scored: bool,
    /// Option key to numeric score, for multi-select and text answers.
    pub options: BTreeMap<String, f32>,
    pub scale_min: f32,
    pub scale_max: f32,
    pub order_index: u32,
}

impl ResolvedQuestion {
    /// Largest weighted contribution this question can make.
    pub fn max_contribution(&self) -> f32 {
        self.scale_max * self.weight
    }

    pub fn min_contribution(&self) -> f32 {
        self.scale_min * self.weight
    }
}

/// An assessment's question bank resolved into the closed dimension set,
/// ordered by declared index. The engine trusts the caller to have scoped
/// the definitions to one published assessment already.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionSet {
    questions: Vec<ResolvedQuestion>,
}

impl QuestionSet {
    /// Validate and order raw question definitions.
    ///
    /// A tag outside the fixed enumeration means the bank is corrupt, so
    /// resolution fails whole rather than dropping the question.
    pub fn resolve(definitions: &[QuestionDefinition]) -> Result<Self, ScoringError> {
        let mut questions = Vec::with_capacity(definitions.len());

        for definition in definitions {
            let dimension = Dimension::from_tag(&definition.dimension).ok_or_else(|| {
                ScoringError::UnknownDimension {
                    question_id: definition.id.0.clone(),
                    tag: definition.dimension.clone(),
                }
            })?;

            let options: BTreeMap<String, f32> = definition
                .answer_options
                .iter()
                .map(|option| (option.key.clone(), option.value))
                .collect();

            // Option-mapped questions take their scale bounds from the
            // mapped values rather than the declared Likert bounds.
            let (scale_min, scale_max) = if options.is_empty() {
                (definition.scale_min, definition.scale_max)
            } else {
                let min = options.values().copied().fold(f32::INFINITY, f32::min);
                let max = options.values().copied().fold(f32::NEG_INFINITY, f32::max);
                (min, max)
            };

            questions.push(ResolvedQuestion {
                id: definition.id.clone(),
                dimension,
                weight: definition.weight,
                reverse_scored: definition.reverse_scored,
                options,
                scale_min,
                scale_max,
                order_index: definition.order_index,
            });
        }

        questions.sort_by_key(|question| question.order_index);

        let mut covered: Vec<Dimension> = questions.iter().map(|q| q.dimension).collect();
        covered.sort();
        covered.dedup();
        if covered.len() < 2 {
            return Err(ScoringError::TooFewDimensions);
        }

        Ok(Self { questions })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedQuestion> {
        self.questions.iter()
    }

    pub fn get(&self, id: &QuestionId) -> Option<&ResolvedQuestion> {
        self.questions.iter().find(|question| &question.id == id)
    }

    /// Dimensions actually covered by this bank, canonical order.
    pub fn dimensions(&self) -> Vec<Dimension> {
        let mut covered: Vec<Dimension> = self.questions.iter().map(|q| q.dimension).collect();
        covered.sort();
        covered.dedup();
        covered
    }
}
