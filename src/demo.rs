//! Bundled sample attempt for the `score demo` subcommand.

use assessment_engine::assessments::{
    AnswerOption, AssessmentResult, AttemptContext, Dimension, QuestionDefinition, QuestionId,
    RawResponse, ResponseValue,
};

pub(crate) fn sample_attempt() -> AttemptContext {
    AttemptContext {
        attempt_id: "attempt-demo-001".to_string(),
        respondent_id: "respondent-demo".to_string(),
        assessment_id: "apest-standard-v1".to_string(),
    }
}

pub(crate) fn sample_questions() -> Vec<QuestionDefinition> {
    let mut questions = Vec::new();
    let mut order = 0u32;

    let likert = |id: &str, dimension: Dimension, reverse: bool, order: u32| QuestionDefinition {
        id: QuestionId(id.to_string()),
        assessment_id: "apest-standard-v1".to_string(),
        dimension: dimension.label().to_string(),
        weight: 1.0,
        reverse_scored: reverse,
        answer_options: Vec::new(),
        scale_min: 1.0,
        scale_max: 5.0,
        order_index: order,
    };

    for dimension in Dimension::ALL {
        questions.push(likert(
            &format!("{}-1", dimension.label()),
            dimension,
            false,
            order,
        ));
        order += 1;
        questions.push(likert(
            &format!("{}-2", dimension.label()),
            dimension,
            dimension == Dimension::Prophetic,
            order,
        ));
        order += 1;
    }

    // One discrete-choice question scored through an option map.
    questions.push(QuestionDefinition {
        id: QuestionId("teaching-style".to_string()),
        assessment_id: "apest-standard-v1".to_string(),
        dimension: Dimension::Teaching.label().to_string(),
        weight: 1.0,
        reverse_scored: false,
        answer_options: vec![
            AnswerOption {
                key: "one_on_one".to_string(),
                value: 2.0,
                label: "One-on-one discipleship".to_string(),
            },
            AnswerOption {
                key: "small_group".to_string(),
                value: 3.0,
                label: "Small group facilitation".to_string(),
            },
            AnswerOption {
                key: "classroom".to_string(),
                value: 5.0,
                label: "Classroom instruction".to_string(),
            },
        ],
        scale_min: 1.0,
        scale_max: 5.0,
        order_index: order,
    });

    questions
}

pub(crate) fn sample_responses() -> Vec<RawResponse> {
    let answers: [(&str, f32); 10] = [
        ("apostolic-1", 5.0),
        ("apostolic-2", 4.0),
        ("prophetic-1", 3.0),
        ("prophetic-2", 4.0),
        ("evangelistic-1", 2.0),
        ("evangelistic-2", 3.0),
        ("shepherding-1", 4.0),
        ("shepherding-2", 4.0),
        ("teaching-1", 3.0),
        ("teaching-2", 2.0),
    ];

    let mut responses: Vec<RawResponse> = answers
        .iter()
        .map(|(id, value)| RawResponse {
            question_id: QuestionId(id.to_string()),
            respondent_id: "respondent-demo".to_string(),
            value: Some(ResponseValue::Numeric(*value)),
            response_time_seconds: Some(9),
            confidence: Some(4),
            skipped: false,
        })
        .collect();

    responses.push(RawResponse {
        question_id: QuestionId("teaching-style".to_string()),
        respondent_id: "respondent-demo".to_string(),
        value: Some(ResponseValue::Text("small_group".to_string())),
        response_time_seconds: Some(14),
        confidence: Some(5),
        skipped: false,
    });

    responses
}

pub(crate) fn render_result(result: &AssessmentResult) {
    println!("Assessment scoring demo");
    println!("  attempt:      {}", result.attempt_id);
    println!("  assessment:   {}", result.assessment_id);
    println!(
        "  completion:   {}%{}",
        result.completion_percentage,
        if result.provisional { " (provisional)" } else { "" }
    );
    println!(
        "  total:        {:.1} of {:.1}",
        result.total_raw, result.total_max
    );
    println!();
    println!("  dimension       raw    normalized  adjusted");
    for (dimension, score) in &result.dimension_scores {
        println!(
            "  {:<14} {:>6.1}  {:>9.1}  {:>8.1}",
            dimension.label(),
            score.raw,
            score.normalized,
            score.adjusted
        );
    }
    println!();
    println!("  primary gift:    {}", result.primary_gift);
    println!("  secondary gift:  {}", result.secondary_gift);
    println!(
        "  complementary:   {}",
        result
            .complementary_gifts
            .iter()
            .map(|dimension| dimension.label())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!(
        "  consistency:     {:.2} ({:?})",
        result.consistency.consistency_score, result.consistency.time_plausibility
    );
    if result.cultural_adjustment.applied {
        println!(
            "  cultural ctx:    {} (adjusted)",
            result
                .cultural_adjustment
                .context
                .as_deref()
                .unwrap_or("unknown")
        );
    }
    for warning in &result.warnings {
        println!("  warning:         {warning:?}");
    }
}
