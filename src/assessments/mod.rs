//! Assessment scoring and insight engine.
//!
//! Consumes question definitions and raw responses already loaded by the
//! caller, and emits an immutable [`AssessmentResult`] for a separate
//! write path to persist. Access control, persistence, and the free-text
//! AI insight generator are external collaborators.

pub mod domain;
pub mod question_bank;
pub mod recommendations;
pub mod scoring;

pub use domain::{
    AnswerOption, AssessmentResult, ConsistencyReport, CulturalAdjustment, Dimension,
    DimensionScore, GiftRecommendations, NormalizedResponse, QuestionDefinition, QuestionId,
    RawResponse, ResponseValue, ScoringError, ScoringWarning, TimePlausibility,
};
pub use question_bank::{QuestionSet, ResolvedQuestion};
pub use scoring::{
    AdjustmentTableError, AttemptContext, CulturalAdjustmentTable, ScoringEngine, ScoringOptions,
};
