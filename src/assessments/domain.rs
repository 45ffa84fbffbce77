use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The five APEST dimensions scored by the engine, in canonical order.
///
/// The declaration order doubles as the tie-break order used by the
/// classifier, so `Ord` must never be derived from anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Apostolic,
    Prophetic,
    Evangelistic,
    Shepherding,
    Teaching,
}

impl Dimension {
    /// All dimensions in canonical order.
    pub const ALL: [Dimension; 5] = [
        Dimension::Apostolic,
        Dimension::Prophetic,
        Dimension::Evangelistic,
        Dimension::Shepherding,
        Dimension::Teaching,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Dimension::Apostolic => "apostolic",
            Dimension::Prophetic => "prophetic",
            Dimension::Evangelistic => "evangelistic",
            Dimension::Shepherding => "shepherding",
            Dimension::Teaching => "teaching",
        }
    }

    /// Parse a raw dimension tag as stored in the question bank.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "apostolic" => Some(Dimension::Apostolic),
            "prophetic" => Some(Dimension::Prophetic),
            "evangelistic" => Some(Dimension::Evangelistic),
            "shepherding" => Some(Dimension::Shepherding),
            "teaching" => Some(Dimension::Teaching),
            _ => None,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Identifier wrapper for question-bank entries.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QuestionId(pub String);

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One selectable answer on a discrete-choice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub key: String,
    pub value: f32,
    pub label: String,
}

/// Question definition as supplied by the question-bank source.
///
/// The dimension arrives as a raw string tag; [`QuestionSet::resolve`] is
/// responsible for validating it against the closed [`Dimension`] enum.
///
/// [`QuestionSet::resolve`]: crate::assessments::question_bank::QuestionSet::resolve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionDefinition {
    pub id: QuestionId,
    pub assessment_id: String,
    pub dimension: String,
    #[serde(default = "default_weight")]
    pub weight: f32,
    #[serde(default)]
    pub reverse_scored: bool,
    /// Empty for plain numeric/Likert questions; non-empty for
    /// multi-select or text questions scored through an option map.
    #[serde(default)]
    pub answer_options: Vec<AnswerOption>,
    #[serde(default = "default_scale_min")]
    pub scale_min: f32,
    #[serde(default = "default_scale_max")]
    pub scale_max: f32,
    pub order_index: u32,
}

fn default_weight() -> f32 {
    1.0
}

fn default_scale_min() -> f32 {
    1.0
}

fn default_scale_max() -> f32 {
    5.0
}

/// Raw answer payload for a single question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ResponseValue {
    Numeric(f32),
    Text(String),
    MultiSelect(Vec<String>),
}

/// One respondent answer as captured by the response source. Immutable
/// after submission; a new attempt supersedes rather than edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawResponse {
    pub question_id: QuestionId,
    pub respondent_id: String,
    #[serde(default)]
    pub value: Option<ResponseValue>,
    #[serde(default)]
    pub response_time_seconds: Option<u32>,
    /// Self-reported confidence on a 1-5 scale.
    #[serde(default)]
    pub confidence: Option<u8>,
    #[serde(default)]
    pub skipped: bool,
}

impl RawResponse {
    /// An answer counts as given only when it is neither skipped nor empty.
    pub fn answered(&self) -> bool {
        !self.skipped && self.value.is_some()
    }
}

/// Ephemeral per-question scoring artifact. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedResponse {
    pub question_id: QuestionId,
    pub dimension: Dimension,
    /// Oriented canonical value: reverse scoring applied, weight not.
    pub canonical: f32,
    /// Signed contribution to the dimension raw sum (`canonical * weight`).
    pub contribution: f32,
    pub answered: bool,
}

/// Scores for a single dimension across one attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionScore {
    pub raw: f32,
    pub theoretical_min: f32,
    pub theoretical_max: f32,
    /// Rescaled onto 0-100.
    pub normalized: f32,
    /// Normalized score after cultural adjustment, still 0-100.
    pub adjusted: f32,
}

/// Advisory read on whether the total completion time is believable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimePlausibility {
    TooFast,
    Plausible,
    TooSlow,
}

/// Data-quality signals for one attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyReport {
    /// 0-1, higher means more internally consistent answers per dimension.
    pub consistency_score: f32,
    pub time_plausibility: TimePlausibility,
}

/// Non-fatal conditions recorded during scoring. Attached to the result
/// metadata; never abort the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoringWarning {
    /// A dimension's theoretical max equals its min; the neutral-midpoint
    /// rule was applied.
    DegenerateRange { dimension: Dimension },
    /// Too few answered questions to include a dimension in the
    /// consistency average.
    InsufficientData { dimension: Dimension, answered: usize },
}

/// Record of the cultural adjustment decision for one attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CulturalAdjustment {
    pub applied: bool,
    pub context: Option<String>,
    /// The multiplicative factor used per dimension (1.0 when identity).
    pub factors: BTreeMap<Dimension, f32>,
}

impl CulturalAdjustment {
    pub fn identity(context: Option<String>) -> Self {
        let factors = Dimension::ALL.iter().map(|dim| (*dim, 1.0)).collect();
        Self {
            applied: false,
            context,
            factors,
        }
    }
}

/// Deterministic recommendation stubs derived from the adjusted profile.
/// Free-text AI insights are produced by an external service and merged
/// by the caller; the engine only seeds structured material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiftRecommendations {
    pub strengths: Vec<String>,
    pub growth_areas: Vec<String>,
    pub action_items: Vec<String>,
    pub content_recommendations: Vec<String>,
}

/// Immutable scoring outcome for one attempt. Append-only downstream: a
/// new attempt produces a new result, never edits to a completed one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub attempt_id: String,
    pub respondent_id: String,
    pub assessment_id: String,
    pub dimension_scores: BTreeMap<Dimension, DimensionScore>,
    pub total_raw: f32,
    pub total_max: f32,
    pub completion_percentage: u8,
    /// Set when the attempt was scored before every question was answered.
    pub provisional: bool,
    pub consistency: ConsistencyReport,
    pub completion_time_seconds: u32,
    /// Mean self-reported confidence when any response carried one.
    pub mean_confidence: Option<f32>,
    pub primary_gift: Dimension,
    pub secondary_gift: Dimension,
    pub cultural_adjustment: CulturalAdjustment,
    /// Peer-matching signal: the gifts this profile most benefits from
    /// finding in others.
    pub complementary_gifts: Vec<Dimension>,
    pub recommendations: GiftRecommendations,
    /// Reserved for the external insight generator; always `None` as
    /// assembled here.
    pub ai_insights: Option<String>,
    pub warnings: Vec<ScoringWarning>,
}

/// Fatal scoring faults. These abort the attempt and surface whole to the
/// caller; no partial result is produced and nothing is retried here.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("question {question_id} has no answer option mapped for '{key}'")]
    UnmappedAnswer { question_id: String, key: String },
    #[error("question {question_id} references unknown dimension tag '{tag}'")]
    UnknownDimension { question_id: String, tag: String },
    #[error("response references question {question_id} outside the resolved bank")]
    UnknownQuestion { question_id: String },
    #[error("question bank resolved to fewer than two scored dimensions")]
    TooFewDimensions,
}
