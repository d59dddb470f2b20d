use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use super::domain::{
    default_categories, fiscal_quarter_label, EvaluatorIdentity, NewRating, PerformanceRating,
    RatingId, RatingStatus, RatingUpdate,
};
use super::repository::{RatingRepository, RepositoryError};
use super::scoring::overall_score_or_zero;
use crate::config::{ReviewConfig, DEFAULT_NEXT_REVIEW_DAYS};

/// Time source for rating timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

static RATING_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_rating_id(now: DateTime<Utc>) -> RatingId {
    let sequence = RATING_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    RatingId(format!("rating-{}-{sequence:04}", now.timestamp_millis()))
}

/// Next review date `days` after `now`. Intervals chrono cannot represent
/// fall back to the default spacing.
fn scheduled_review(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    Duration::try_days(days)
        .and_then(|interval| now.checked_add_signed(interval))
        .unwrap_or_else(|| {
            warn!(days, "review interval out of range, using default");
            now.checked_add_signed(Duration::days(DEFAULT_NEXT_REVIEW_DAYS))
                .unwrap_or(now)
        })
}

/// Owner of every performance rating record.
///
/// The store applies structural defaults and rescoring but performs no
/// authorization; see [`super::AuthorizedRatingStore`] for the guarded facade.
/// Creates and updates are serialized through a single writer lock.
pub struct PerformanceRatingStore<R, C = SystemClock> {
    repository: Arc<R>,
    clock: C,
    config: ReviewConfig,
    writer: Mutex<()>,
}

impl<R> PerformanceRatingStore<R, SystemClock>
where
    R: RatingRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: ReviewConfig) -> Self {
        Self::with_clock(repository, SystemClock, config)
    }
}

impl<R, C> PerformanceRatingStore<R, C>
where
    R: RatingRepository + 'static,
    C: Clock,
{
    pub fn with_clock(repository: Arc<R>, clock: C, config: ReviewConfig) -> Self {
        Self {
            repository,
            clock,
            config,
            writer: Mutex::new(()),
        }
    }

    pub fn config(&self) -> ReviewConfig {
        self.config
    }

    /// Create a draft rating for `employee_id`, filling defaults for every
    /// omitted field. The overall score is taken as given (or 0) and is not
    /// derived from the template categories.
    pub fn create(
        &self,
        evaluator: &EvaluatorIdentity,
        employee_id: &str,
        partial: NewRating,
    ) -> Result<PerformanceRating, RatingStoreError> {
        let _writer = self.writer()?;
        let now = self.clock.now();

        let NewRating {
            employee_name,
            period,
            overall_score,
            categories,
            goals,
            strengths,
            areas_for_improvement,
            comments,
            review_date,
            next_review_date,
        } = partial;

        let rating = PerformanceRating {
            id: next_rating_id(now),
            employee_id: employee_id.to_string(),
            employee_name: employee_name.unwrap_or_default(),
            evaluator_id: evaluator.id.clone(),
            evaluator_name: evaluator.display_name.clone(),
            period: period.unwrap_or_else(|| fiscal_quarter_label(now.date_naive())),
            overall_score: overall_score.unwrap_or(0.0),
            categories: categories.unwrap_or_else(default_categories),
            goals: goals.unwrap_or_default(),
            strengths: strengths.unwrap_or_default(),
            areas_for_improvement: areas_for_improvement.unwrap_or_default(),
            comments: comments.unwrap_or_default(),
            status: RatingStatus::Draft,
            created_at: now,
            updated_at: now,
            review_date: review_date.unwrap_or(now),
            next_review_date: next_review_date
                .unwrap_or_else(|| scheduled_review(now, self.config.next_review_days)),
        };

        let stored = self.repository.insert(rating)?;
        info!(
            rating_id = %stored.id,
            employee_id = %stored.employee_id,
            evaluator_id = %stored.evaluator_id,
            period = %stored.period,
            "performance rating created"
        );
        Ok(stored)
    }

    /// First-inserted rating for the employee. Later ratings for the same
    /// employee are shadowed; use [`Self::ratings_for_employee`] for history.
    pub fn get_by_employee(
        &self,
        employee_id: &str,
    ) -> Result<Option<PerformanceRating>, RatingStoreError> {
        Ok(self.repository.first_for_employee(employee_id)?)
    }

    pub fn get(&self, rating_id: &RatingId) -> Result<Option<PerformanceRating>, RatingStoreError> {
        Ok(self.repository.fetch(rating_id)?)
    }

    /// Merge `updates` into the rating. Returns `None` for an unknown id.
    /// The overall score is recomputed only when `updates` carries categories.
    pub fn update(
        &self,
        rating_id: &RatingId,
        updates: RatingUpdate,
    ) -> Result<Option<PerformanceRating>, RatingStoreError> {
        let _writer = self.writer()?;

        let Some(mut rating) = self.repository.fetch(rating_id)? else {
            debug!(rating_id = %rating_id, "update skipped for unknown rating");
            return Ok(None);
        };

        if rating.merge(updates) {
            rating.overall_score = overall_score_or_zero(&rating.categories);
        }
        rating.updated_at = self.clock.now();

        self.repository.replace(rating.clone())?;
        info!(
            rating_id = %rating.id,
            overall_score = rating.overall_score,
            status = rating.status.label(),
            "performance rating updated"
        );
        Ok(Some(rating))
    }

    /// Every stored rating in insertion order.
    pub fn list(&self) -> Result<Vec<PerformanceRating>, RatingStoreError> {
        Ok(self.repository.all()?)
    }

    pub fn ratings_for_employee(
        &self,
        employee_id: &str,
    ) -> Result<Vec<PerformanceRating>, RatingStoreError> {
        Ok(self
            .repository
            .all()?
            .into_iter()
            .filter(|rating| rating.employee_id == employee_id)
            .collect())
    }

    pub fn len(&self) -> Result<usize, RatingStoreError> {
        Ok(self.repository.count()?)
    }

    pub fn is_empty(&self) -> Result<bool, RatingStoreError> {
        Ok(self.len()? == 0)
    }

    fn writer(&self) -> Result<MutexGuard<'_, ()>, RepositoryError> {
        self.writer
            .lock()
            .map_err(|_| RepositoryError::Unavailable("rating writer lock poisoned".to_string()))
    }
}

/// Error raised by the rating store. Missing records are reported as `None`,
/// never through this type.
#[derive(Debug, thiserror::Error)]
pub enum RatingStoreError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
