use tracing::warn;

use super::domain::RatingCategory;

/// Failure raised when a category set cannot produce a weighted average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ScoringError {
    #[error("category weights sum to zero; overall score is undefined")]
    InvalidWeights,
}

/// Weighted average of category scores rounded to one decimal place.
///
/// Weights are percentages but are normalised by their actual total, so a set
/// summing to 60 still yields the weighted average over those 60 points.
pub fn compute_overall_score(categories: &[RatingCategory]) -> Result<f64, ScoringError> {
    let (weighted_sum, total_weight) =
        categories
            .iter()
            .fold((0.0_f64, 0.0_f64), |(sum, total), category| {
                let weight = f64::from(category.weight) / 100.0;
                (sum + category.score * weight, total + weight)
            });

    if total_weight <= 0.0 {
        return Err(ScoringError::InvalidWeights);
    }

    Ok(round_to_tenth(weighted_sum / total_weight))
}

/// Permissive variant used on save: an undefined score becomes `0.0`.
pub fn overall_score_or_zero(categories: &[RatingCategory]) -> f64 {
    match compute_overall_score(categories) {
        Ok(score) => score,
        Err(err) => {
            warn!(categories = categories.len(), %err, "falling back to zero overall score");
            0.0
        }
    }
}

/// Sum of the raw percentage weights.
pub fn weight_total(categories: &[RatingCategory]) -> u64 {
    categories
        .iter()
        .map(|category| u64::from(category.weight))
        .sum()
}

pub(crate) fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
