use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::authorized::{AuthorizedRatingStore, AuthorizedStoreError};
use super::domain::{EmployeeProfile, EvaluatorIdentity, NewRating, RatingId, RatingUpdate};
use super::export::rating_summary_csv;
use super::metrics::{derive_metrics, performance_trends};
use super::repository::RatingRepository;
use super::service::Clock;

/// Payload for creating a rating on behalf of an evaluator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRatingRequest {
    pub evaluator: EvaluatorIdentity,
    pub employee: EmployeeProfile,
    #[serde(default)]
    pub rating: NewRating,
}

/// Payload for merging changes into an existing rating.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRatingRequest {
    pub evaluator: EvaluatorIdentity,
    pub employee: EmployeeProfile,
    #[serde(default)]
    pub updates: RatingUpdate,
}

/// Router builder exposing the rating endpoints. Writes go through the
/// authorized facade; reads use the underlying store directly.
pub fn rating_router<R, C>(ratings: Arc<AuthorizedRatingStore<R, C>>) -> Router
where
    R: RatingRepository + 'static,
    C: Clock + 'static,
{
    Router::new()
        .route(
            "/api/v1/performance/ratings",
            get(list_handler::<R, C>).post(create_handler::<R, C>),
        )
        .route(
            "/api/v1/performance/ratings/:rating_id",
            get(rating_handler::<R, C>).patch(update_handler::<R, C>),
        )
        .route(
            "/api/v1/performance/employees/:employee_id/rating",
            get(employee_rating_handler::<R, C>),
        )
        .route(
            "/api/v1/performance/employees/:employee_id/metrics",
            get(metrics_handler::<R, C>),
        )
        .route("/api/v1/performance/trends", get(trends_handler))
        .route(
            "/api/v1/performance/exports/ratings.csv",
            get(export_handler::<R, C>),
        )
        .with_state(ratings)
}

pub(crate) async fn create_handler<R, C>(
    State(ratings): State<Arc<AuthorizedRatingStore<R, C>>>,
    axum::Json(request): axum::Json<CreateRatingRequest>,
) -> Response
where
    R: RatingRepository + 'static,
    C: Clock + 'static,
{
    let CreateRatingRequest {
        evaluator,
        employee,
        rating,
    } = request;

    match ratings.create(&evaluator, &employee, rating) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record)).into_response(),
        Err(error) => authorized_error_response(error),
    }
}

pub(crate) async fn update_handler<R, C>(
    State(ratings): State<Arc<AuthorizedRatingStore<R, C>>>,
    Path(rating_id): Path<String>,
    axum::Json(request): axum::Json<UpdateRatingRequest>,
) -> Response
where
    R: RatingRepository + 'static,
    C: Clock + 'static,
{
    let id = RatingId(rating_id);
    let UpdateRatingRequest {
        evaluator,
        employee,
        updates,
    } = request;

    match ratings.update(&evaluator, &employee, &id, updates) {
        Ok(Some(record)) => (StatusCode::OK, axum::Json(record)).into_response(),
        Ok(None) => not_found(json!({ "rating_id": id.0 })),
        Err(error) => authorized_error_response(error),
    }
}

pub(crate) async fn list_handler<R, C>(
    State(ratings): State<Arc<AuthorizedRatingStore<R, C>>>,
) -> Response
where
    R: RatingRepository + 'static,
    C: Clock + 'static,
{
    match ratings.store().list() {
        Ok(records) => (StatusCode::OK, axum::Json(records)).into_response(),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn rating_handler<R, C>(
    State(ratings): State<Arc<AuthorizedRatingStore<R, C>>>,
    Path(rating_id): Path<String>,
) -> Response
where
    R: RatingRepository + 'static,
    C: Clock + 'static,
{
    let id = RatingId(rating_id);
    match ratings.store().get(&id) {
        Ok(Some(record)) => (StatusCode::OK, axum::Json(record)).into_response(),
        Ok(None) => not_found(json!({ "rating_id": id.0 })),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn employee_rating_handler<R, C>(
    State(ratings): State<Arc<AuthorizedRatingStore<R, C>>>,
    Path(employee_id): Path<String>,
) -> Response
where
    R: RatingRepository + 'static,
    C: Clock + 'static,
{
    match ratings.store().get_by_employee(&employee_id) {
        Ok(Some(record)) => (StatusCode::OK, axum::Json(record)).into_response(),
        Ok(None) => not_found(json!({ "employee_id": employee_id })),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn metrics_handler<R, C>(
    State(ratings): State<Arc<AuthorizedRatingStore<R, C>>>,
    Path(employee_id): Path<String>,
) -> Response
where
    R: RatingRepository + 'static,
    C: Clock + 'static,
{
    match derive_metrics(ratings.store(), &employee_id) {
        Ok(metrics) => (StatusCode::OK, axum::Json(metrics)).into_response(),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn trends_handler() -> Response {
    (StatusCode::OK, axum::Json(performance_trends())).into_response()
}

pub(crate) async fn export_handler<R, C>(
    State(ratings): State<Arc<AuthorizedRatingStore<R, C>>>,
) -> Response
where
    R: RatingRepository + 'static,
    C: Clock + 'static,
{
    let records = match ratings.store().list() {
        Ok(records) => records,
        Err(error) => return internal_error(error),
    };

    match rating_summary_csv(&records) {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(error) => internal_error(error),
    }
}

fn authorized_error_response(error: AuthorizedStoreError) -> Response {
    match error {
        AuthorizedStoreError::Unauthorized { .. } => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::FORBIDDEN, axum::Json(payload)).into_response()
        }
        AuthorizedStoreError::Store(inner) => internal_error(inner),
    }
}

fn not_found(mut payload: serde_json::Value) -> Response {
    payload["error"] = json!("rating not found");
    (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
}

fn internal_error(error: impl std::fmt::Display) -> Response {
    let payload = json!({ "error": error.to_string() });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
