//! # Aggregate Calculator
//!
//! Mean rating and count over a collection of ratings.
//!
//! An empty collection has no summary at all; callers omit the rating node
//! instead of emitting a zero count. Ratings outside `[1, 5]` are reported
//! but still counted in the mean.

// Means are the one place the engine does float arithmetic.
#![allow(clippy::float_arithmetic)]

use crate::primitives::{MAX_RATING, MIN_RATING};
use crate::{AggregateSummary, Diagnostic};

/// Summarize ratings: mean rounded to one decimal, and the sample size.
///
/// Returns `None` for an empty slice.
#[must_use]
pub fn aggregate(ratings: &[f64]) -> Option<AggregateSummary> {
    if ratings.is_empty() {
        return None;
    }
    let count = ratings.len();
    let mean = ratings.iter().sum::<f64>() / count as f64;
    Some(AggregateSummary {
        value: round_one_decimal(mean),
        count,
    })
}

/// Summarize the ratings of one entity, collecting soft conditions.
///
/// - No ratings: `EmptyCollection`, no summary
/// - Finite ratings outside `[1, 5]`: `MalformedEntity`, still included
/// - Non-finite ratings: `MalformedEntity`, excluded (they have no mean)
#[must_use]
pub fn aggregate_entity(entity: &str, ratings: &[f64]) -> (Option<AggregateSummary>, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();
    let mut usable = Vec::with_capacity(ratings.len());

    for &rating in ratings {
        if !rating.is_finite() {
            diagnostics.push(Diagnostic::MalformedEntity {
                entity: entity.to_string(),
                detail: "non-numeric rating excluded from mean".to_string(),
            });
            continue;
        }
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            diagnostics.push(Diagnostic::MalformedEntity {
                entity: entity.to_string(),
                detail: format!("rating {} outside [1, 5] included in mean", rating),
            });
        }
        usable.push(rating);
    }

    let summary = aggregate(&usable);
    if summary.is_none() {
        diagnostics.push(Diagnostic::EmptyCollection {
            entity: entity.to_string(),
        });
    }
    (summary, diagnostics)
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
