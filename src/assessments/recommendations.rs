//! Deterministic recommendation stubs and the peer-matching signal.
//!
//! Everything here is fixed-table material seeded from the adjusted
//! profile. The conversational insight text comes from an external
//! AI collaborator and is merged downstream by the caller.

use std::collections::BTreeMap;

use super::domain::{Dimension, GiftRecommendations};

/// Adjusted score at or above which a dimension counts as a strength.
const STRENGTH_THRESHOLD: f32 = 75.0;

/// Adjusted score below which a dimension counts as a growth area.
const GROWTH_THRESHOLD: f32 = 50.0;

/// Spread between top and bottom scores that reads as specialization.
const SPECIALIZATION_SPREAD: f32 = 20.0;

/// Build the structured recommendation stubs for a scored profile.
pub fn for_profile(
    adjusted: &BTreeMap<Dimension, f32>,
    primary: Dimension,
) -> GiftRecommendations {
    let mut strengths = Vec::new();
    let mut growth_areas = Vec::new();

    for (dimension, score) in adjusted {
        if *score >= STRENGTH_THRESHOLD {
            strengths.push(format!(
                "Strong {dimension} gifts - leverage this in your ministry"
            ));
        } else if *score < GROWTH_THRESHOLD {
            growth_areas.push(format!(
                "Develop your {dimension} gifts through intentional practice"
            ));
        }
    }

    GiftRecommendations {
        strengths,
        growth_areas,
        action_items: action_items(primary).iter().map(|s| s.to_string()).collect(),
        content_recommendations: content_recommendations(primary)
            .iter()
            .map(|s| s.to_string())
            .collect(),
    }
}

/// Peer-matching signal: the two lowest-scoring dimensions, the gifts a
/// respondent most benefits from finding in collaborators. Ties resolve
/// to the canonically earlier dimension so the signal is reproducible.
pub fn complementary_gifts(adjusted: &BTreeMap<Dimension, f32>) -> Vec<Dimension> {
    let mut ranked: Vec<(Dimension, f32)> = adjusted
        .iter()
        .map(|(dimension, score)| (*dimension, *score))
        .collect();

    // Stable sort over a canonically ordered map keeps ties canonical.
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
    ranked
        .into_iter()
        .take(2)
        .map(|(dimension, _)| dimension)
        .collect()
}

/// One-paragraph deterministic summary of the classified profile. Used by
/// the demo CLI; never written into the reserved `ai_insights` field.
pub fn profile_summary(
    adjusted: &BTreeMap<Dimension, f32>,
    primary: Dimension,
    secondary: Dimension,
) -> String {
    let mut parts = vec![description(primary).to_string()];

    if secondary != primary {
        parts.push(format!(
            "Your secondary gift of {secondary} complements your primary {primary} gift, \
             creating a well-rounded ministry profile."
        ));
    }

    let highest = adjusted.values().copied().fold(f32::NEG_INFINITY, f32::max);
    let lowest = adjusted.values().copied().fold(f32::INFINITY, f32::min);

    if highest - lowest > SPECIALIZATION_SPREAD {
        parts.push(
            "Your profile shows strong specialization in certain areas. Consider how you can \
             work with others who have complementary gifts."
                .to_string(),
        );
    } else {
        parts.push(
            "You have a relatively balanced profile across all APEST dimensions, making you \
             versatile in ministry contexts."
                .to_string(),
        );
    }

    parts.join(" ")
}

const fn description(dimension: Dimension) -> &'static str {
    match dimension {
        Dimension::Apostolic => {
            "Apostolic gifts focus on pioneering, vision-casting, and expanding God's kingdom \
             into new territories. You are drawn to starting new things and reaching unreached \
             people."
        }
        Dimension::Prophetic => {
            "Prophetic gifts involve speaking truth, challenging the status quo, and calling \
             people back to God's heart. You have a deep sense of what God is saying and aren't \
             afraid to speak up."
        }
        Dimension::Evangelistic => {
            "Evangelistic gifts center on sharing the gospel and connecting with people who \
             don't yet know Christ. You naturally build bridges between the church and the world."
        }
        Dimension::Shepherding => {
            "Shepherding gifts focus on caring for, nurturing, and protecting God's people. You \
             have a heart for helping others grow and supporting them through difficult times."
        }
        Dimension::Teaching => {
            "Teaching gifts involve helping people understand and apply God's Word. You have a \
             passion for discipleship and helping others develop a solid biblical foundation."
        }
    }
}

const fn action_items(dimension: Dimension) -> [&'static str; 3] {
    match dimension {
        Dimension::Apostolic => [
            "Consider starting a new ministry or expanding existing work",
            "Connect with other apostolic leaders for mentoring",
            "Develop skills in vision-casting and team building",
        ],
        Dimension::Prophetic => [
            "Find opportunities to speak truth in your context",
            "Develop discernment through prayer and Scripture study",
            "Connect with prophetic communities for accountability",
        ],
        Dimension::Evangelistic => [
            "Practice sharing your faith story regularly",
            "Build relationships with people outside the church",
            "Develop cultural intelligence for different contexts",
        ],
        Dimension::Shepherding => [
            "Mentor someone in their spiritual journey",
            "Develop counseling and care skills",
            "Create safe spaces for vulnerable conversations",
        ],
        Dimension::Teaching => [
            "Develop a systematic approach to discipleship",
            "Study theology and biblical interpretation",
            "Practice explaining complex concepts simply",
        ],
    }
}

const fn content_recommendations(dimension: Dimension) -> [&'static str; 3] {
    match dimension {
        Dimension::Apostolic => [
            "Church Planting Resources",
            "Leadership Development",
            "Vision and Strategy",
        ],
        Dimension::Prophetic => [
            "Social Justice Resources",
            "Spiritual Formation",
            "Cultural Engagement",
        ],
        Dimension::Evangelistic => [
            "Evangelism Training",
            "Cross-Cultural Ministry",
            "Community Outreach",
        ],
        Dimension::Shepherding => [
            "Pastoral Care Resources",
            "Counseling Skills",
            "Small Group Leadership",
        ],
        Dimension::Teaching => [
            "Biblical Studies",
            "Theological Education",
            "Discipleship Resources",
        ],
    }
}
