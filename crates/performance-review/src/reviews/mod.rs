//! Performance ratings: weighted scoring, the rating store, the edit access
//! policy, and the metrics view derived from stored ratings.

pub mod access;
pub mod authorized;
pub mod domain;
pub mod export;
pub mod metrics;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use access::can_edit;
pub use authorized::{AuthorizedRatingStore, AuthorizedStoreError};
pub use domain::{
    default_categories, fiscal_quarter_label, EmployeeProfile, EvaluatorIdentity, GoalStatus,
    NewRating, PerformanceGoal, PerformanceRating, RatingCategory, RatingId, RatingStatus,
    RatingUpdate, Role,
};
pub use export::{rating_summary_csv, write_rating_summary, ExportError};
pub use metrics::{
    derive_metrics, derive_metrics_with_peers, performance_trends, rank_in_department,
    DepartmentRank, PerformanceMetrics, ScoreTrend, TrendPoint,
};
pub use repository::{InMemoryRatingRepository, RatingRepository, RepositoryError};
pub use router::{rating_router, CreateRatingRequest, UpdateRatingRequest};
pub use scoring::{compute_overall_score, overall_score_or_zero, weight_total, ScoringError};
pub use service::{Clock, PerformanceRatingStore, RatingStoreError, SystemClock};
