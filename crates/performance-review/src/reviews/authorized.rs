use std::sync::Arc;

use tracing::warn;

use super::access::can_edit;
use super::domain::{
    EmployeeProfile, EvaluatorIdentity, NewRating, PerformanceRating, RatingId, RatingUpdate,
};
use super::repository::RatingRepository;
use super::service::{Clock, PerformanceRatingStore, RatingStoreError, SystemClock};

/// Rating store facade that checks the edit policy before every write.
///
/// The wrapped store stays reachable through [`Self::store`] for trusted
/// internal callers and for reads.
pub struct AuthorizedRatingStore<R, C = SystemClock> {
    store: Arc<PerformanceRatingStore<R, C>>,
}

impl<R, C> Clone for AuthorizedRatingStore<R, C> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<R, C> AuthorizedRatingStore<R, C>
where
    R: RatingRepository + 'static,
    C: Clock,
{
    pub fn new(store: Arc<PerformanceRatingStore<R, C>>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &PerformanceRatingStore<R, C> {
        &self.store
    }

    pub fn create(
        &self,
        evaluator: &EvaluatorIdentity,
        employee: &EmployeeProfile,
        partial: NewRating,
    ) -> Result<PerformanceRating, AuthorizedStoreError> {
        self.authorize(evaluator, employee)?;
        Ok(self.store.create(evaluator, &employee.id, partial)?)
    }

    /// Update a rating the evaluator may edit. Returns `None` when the rating
    /// does not exist or belongs to a different employee than `employee`.
    pub fn update(
        &self,
        evaluator: &EvaluatorIdentity,
        employee: &EmployeeProfile,
        rating_id: &RatingId,
        updates: RatingUpdate,
    ) -> Result<Option<PerformanceRating>, AuthorizedStoreError> {
        self.authorize(evaluator, employee)?;

        match self.store.get(rating_id)? {
            Some(existing) if existing.employee_id == employee.id => {}
            _ => return Ok(None),
        }

        Ok(self.store.update(rating_id, updates)?)
    }

    fn authorize(
        &self,
        evaluator: &EvaluatorIdentity,
        employee: &EmployeeProfile,
    ) -> Result<(), AuthorizedStoreError> {
        if can_edit(evaluator, employee) {
            return Ok(());
        }

        warn!(
            evaluator_id = %evaluator.id,
            role = ?evaluator.role,
            employee_id = %employee.id,
            "rating edit denied by access policy"
        );
        Err(AuthorizedStoreError::Unauthorized {
            evaluator_id: evaluator.id.clone(),
            employee_id: employee.id.clone(),
        })
    }
}

/// Error raised by the authorized facade.
#[derive(Debug, thiserror::Error)]
pub enum AuthorizedStoreError {
    #[error("evaluator {evaluator_id} may not edit ratings for employee {employee_id}")]
    Unauthorized {
        evaluator_id: String,
        employee_id: String,
    },
    #[error(transparent)]
    Store(#[from] RatingStoreError),
}
