use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

use crate::config::ReviewConfig;
use crate::reviews::domain::{
    EmployeeProfile, EvaluatorIdentity, PerformanceRating, RatingCategory, RatingId, Role,
};
use crate::reviews::repository::{InMemoryRatingRepository, RatingRepository, RepositoryError};
use crate::reviews::service::{Clock, PerformanceRatingStore};
use crate::reviews::{rating_router, AuthorizedRatingStore};

/// Clock the tests move forward explicitly.
#[derive(Clone)]
pub(super) struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub(super) fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub(super) fn advance(&self, by: Duration) {
        let mut guard = self.now.lock().expect("clock mutex poisoned");
        *guard += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock mutex poisoned")
    }
}

pub(super) fn review_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 11, 4, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn build_store() -> (
    PerformanceRatingStore<InMemoryRatingRepository, ManualClock>,
    Arc<InMemoryRatingRepository>,
    ManualClock,
) {
    let repository = Arc::new(InMemoryRatingRepository::default());
    let clock = ManualClock::starting_at(review_start());
    let store = PerformanceRatingStore::with_clock(
        repository.clone(),
        clock.clone(),
        ReviewConfig::default(),
    );
    (store, repository, clock)
}

pub(super) fn build_authorized() -> (
    AuthorizedRatingStore<InMemoryRatingRepository, ManualClock>,
    ManualClock,
) {
    let (store, _, clock) = build_store();
    (AuthorizedRatingStore::new(Arc::new(store)), clock)
}

pub(super) fn router_with_store() -> axum::Router {
    let (authorized, _) = build_authorized();
    rating_router(Arc::new(authorized))
}

pub(super) fn evaluator(role: Role) -> EvaluatorIdentity {
    EvaluatorIdentity {
        id: "mgr_eng_01".to_string(),
        display_name: "Priya Raman".to_string(),
        role,
        department: "Engineering".to_string(),
        team: Some("Platform".to_string()),
    }
}

pub(super) fn engineer() -> EmployeeProfile {
    EmployeeProfile {
        id: "emp_eng_07".to_string(),
        department: "Engineering".to_string(),
        team: Some("Platform".to_string()),
    }
}

pub(super) fn account_executive() -> EmployeeProfile {
    EmployeeProfile {
        id: "emp_sales_03".to_string(),
        department: "Sales".to_string(),
        team: Some("Enterprise".to_string()),
    }
}

pub(super) fn single_category(score: f64) -> Vec<RatingCategory> {
    vec![RatingCategory::new("Overall", score, 100)]
}

pub(super) struct UnavailableRepository;

impl RatingRepository for UnavailableRepository {
    fn insert(&self, _rating: PerformanceRating) -> Result<PerformanceRating, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn replace(&self, _rating: PerformanceRating) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &RatingId) -> Result<Option<PerformanceRating>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn first_for_employee(
        &self,
        _employee_id: &str,
    ) -> Result<Option<PerformanceRating>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn all(&self) -> Result<Vec<PerformanceRating>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn count(&self) -> Result<usize, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
