use metrics_exporter_prometheus::PrometheusHandle;
use performance_review::config::ReviewConfig;
use performance_review::reviews::{
    AuthorizedRatingStore, InMemoryRatingRepository, PerformanceRatingStore,
};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

pub(crate) type RatingService = AuthorizedRatingStore<InMemoryRatingRepository>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Fresh in-memory rating service. Nothing survives a restart.
pub(crate) fn in_memory_rating_service(config: ReviewConfig) -> RatingService {
    let repository = Arc::new(InMemoryRatingRepository::default());
    let store = PerformanceRatingStore::new(repository, config);
    AuthorizedRatingStore::new(Arc::new(store))
}
