use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::repository::RatingRepository;
use super::scoring::round_to_tenth;
use super::service::{Clock, PerformanceRatingStore, RatingStoreError};

/// Fixed offset used to synthesize a previous score until real history is
/// wired in.
const PLACEHOLDER_PREVIOUS_OFFSET: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreTrend {
    Improving,
    Stable,
    Declining,
}

/// Read-only metrics view derived from the stored rating of one employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    pub employee_id: String,
    pub current_score: f64,
    pub previous_score: Option<f64>,
    pub trend: ScoreTrend,
    /// `None` means unranked: no department roster was supplied.
    pub rank_in_department: Option<u32>,
    pub total_in_department: Option<u32>,
    pub last_review_date: Option<DateTime<Utc>>,
    pub next_review_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentRank {
    pub rank: u32,
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub period: String,
    pub score: f64,
}

/// Metrics for `employee_id` based on its first stored rating.
///
/// The previous score is synthetic (`current - 0.2`), so any existing rating
/// reports an improving trend. Department rank is left unset.
pub fn derive_metrics<R, C>(
    store: &PerformanceRatingStore<R, C>,
    employee_id: &str,
) -> Result<PerformanceMetrics, RatingStoreError>
where
    R: RatingRepository + 'static,
    C: Clock,
{
    let rating = store.get_by_employee(employee_id)?;

    let metrics = match rating {
        Some(rating) => {
            let current_score = rating.overall_score;
            let previous_score = round_to_tenth(current_score - PLACEHOLDER_PREVIOUS_OFFSET);
            PerformanceMetrics {
                employee_id: employee_id.to_string(),
                current_score,
                previous_score: Some(previous_score),
                trend: ScoreTrend::Improving,
                rank_in_department: None,
                total_in_department: None,
                last_review_date: Some(rating.review_date),
                next_review_date: Some(rating.next_review_date),
            }
        }
        None => PerformanceMetrics {
            employee_id: employee_id.to_string(),
            current_score: 0.0,
            previous_score: None,
            trend: ScoreTrend::Stable,
            rank_in_department: None,
            total_in_department: None,
            last_review_date: None,
            next_review_date: None,
        },
    };

    Ok(metrics)
}

/// Same as [`derive_metrics`] with the rank filled in from `peers`.
pub fn derive_metrics_with_peers<'a, R, C, I>(
    store: &PerformanceRatingStore<R, C>,
    employee_id: &str,
    peers: I,
) -> Result<PerformanceMetrics, RatingStoreError>
where
    R: RatingRepository + 'static,
    C: Clock,
    I: IntoIterator<Item = &'a str>,
{
    let mut metrics = derive_metrics(store, employee_id)?;
    if let Some(rank) = rank_in_department(store, employee_id, peers)? {
        metrics.rank_in_department = Some(rank.rank);
        metrics.total_in_department = Some(rank.total);
    }
    Ok(metrics)
}

/// Rank `employee_id` by current score among the rated members of `peers`.
///
/// Rank 1 is the highest score and ties share the better rank. Peers without
/// a rating are not counted and duplicates count once. Returns `None` when
/// the employee is unrated.
pub fn rank_in_department<'a, R, C, I>(
    store: &PerformanceRatingStore<R, C>,
    employee_id: &str,
    peers: I,
) -> Result<Option<DepartmentRank>, RatingStoreError>
where
    R: RatingRepository + 'static,
    C: Clock,
    I: IntoIterator<Item = &'a str>,
{
    let Some(own) = store.get_by_employee(employee_id)? else {
        return Ok(None);
    };

    let mut seen = HashSet::new();
    let mut ahead = 0u32;
    let mut total = 1u32;
    for peer in peers {
        if peer == employee_id || !seen.insert(peer) {
            continue;
        }
        if let Some(rating) = store.get_by_employee(peer)? {
            total += 1;
            if rating.overall_score > own.overall_score {
                ahead += 1;
            }
        }
    }

    Ok(Some(DepartmentRank {
        rank: ahead + 1,
        total,
    }))
}

/// Static quarterly series shown on the trends dashboard. It is not derived
/// from stored ratings.
pub fn performance_trends() -> Vec<TrendPoint> {
    [("Q1 2024", 3.8), ("Q2 2024", 4.0), ("Q3 2024", 4.1), ("Q4 2024", 4.2)]
        .into_iter()
        .map(|(period, score)| TrendPoint {
            period: period.to_string(),
            score,
        })
        .collect()
}
