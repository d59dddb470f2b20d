use std::sync::{Arc, Mutex, MutexGuard};

use super::domain::{PerformanceRating, RatingId};

/// Storage abstraction so the rating store can be exercised in isolation.
///
/// Implementations keep insertion order: lookups by employee return the
/// first-inserted match.
pub trait RatingRepository: Send + Sync {
    fn insert(&self, rating: PerformanceRating) -> Result<PerformanceRating, RepositoryError>;
    fn replace(&self, rating: PerformanceRating) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &RatingId) -> Result<Option<PerformanceRating>, RepositoryError>;
    fn first_for_employee(
        &self,
        employee_id: &str,
    ) -> Result<Option<PerformanceRating>, RepositoryError>;
    fn all(&self) -> Result<Vec<PerformanceRating>, RepositoryError>;
    fn count(&self) -> Result<usize, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("rating already exists")]
    Conflict,
    #[error("rating not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Process-local, append-only rating collection. Restarting the process loses
/// every record.
#[derive(Debug, Default, Clone)]
pub struct InMemoryRatingRepository {
    ratings: Arc<Mutex<Vec<PerformanceRating>>>,
}

impl InMemoryRatingRepository {
    fn lock(&self) -> Result<MutexGuard<'_, Vec<PerformanceRating>>, RepositoryError> {
        self.ratings
            .lock()
            .map_err(|_| RepositoryError::Unavailable("rating mutex poisoned".to_string()))
    }
}

impl RatingRepository for InMemoryRatingRepository {
    fn insert(&self, rating: PerformanceRating) -> Result<PerformanceRating, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.iter().any(|existing| existing.id == rating.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(rating.clone());
        Ok(rating)
    }

    fn replace(&self, rating: PerformanceRating) -> Result<(), RepositoryError> {
        let mut guard = self.lock()?;
        let slot = guard
            .iter_mut()
            .find(|existing| existing.id == rating.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = rating;
        Ok(())
    }

    fn fetch(&self, id: &RatingId) -> Result<Option<PerformanceRating>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.iter().find(|rating| &rating.id == id).cloned())
    }

    fn first_for_employee(
        &self,
        employee_id: &str,
    ) -> Result<Option<PerformanceRating>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard
            .iter()
            .find(|rating| rating.employee_id == employee_id)
            .cloned())
    }

    fn all(&self) -> Result<Vec<PerformanceRating>, RepositoryError> {
        Ok(self.lock()?.clone())
    }

    fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.lock()?.len())
    }
}
