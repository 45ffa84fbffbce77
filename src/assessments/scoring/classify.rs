use std::collections::BTreeMap;

use crate::assessments::domain::{Dimension, ScoringError};

/// Pick primary and secondary gifts from adjusted scores.
///
/// Ties resolve to the canonically earlier dimension. The scan walks the
/// map in canonical order and only a strictly greater score displaces an
/// incumbent, so identical inputs classify identically no matter how the
/// caller assembled the map.
pub(crate) fn classify(
    adjusted: &BTreeMap<Dimension, f32>,
) -> Result<(Dimension, Dimension), ScoringError> {
    let mut primary: Option<(Dimension, f32)> = None;
    let mut secondary: Option<(Dimension, f32)> = None;

    for (&dimension, &score) in adjusted {
        match primary {
            Some((_, best)) if score <= best => match secondary {
                Some((_, second)) if score <= second => {}
                _ => secondary = Some((dimension, score)),
            },
            _ => {
                secondary = primary;
                primary = Some((dimension, score));
            }
        }
    }

    match (primary, secondary) {
        (Some((primary, _)), Some((secondary, _))) => Ok((primary, secondary)),
        _ => Err(ScoringError::TooFewDimensions),
    }
}
