//! Integration specifications for the performance review workflow.
//!
//! Scenarios drive the public store, policy, and metrics facade end to end:
//! a manager drafts a review, scores it, submits it, and the metrics view
//! reflects the stored result.

use std::sync::Arc;

use performance_review::config::ReviewConfig;
use performance_review::reviews::{
    can_edit, compute_overall_score, derive_metrics, rating_summary_csv, AuthorizedRatingStore,
    AuthorizedStoreError, EmployeeProfile, EvaluatorIdentity, GoalStatus, InMemoryRatingRepository,
    NewRating, PerformanceGoal, PerformanceRatingStore, RatingCategory, RatingStatus, RatingUpdate,
    Role, ScoreTrend, ScoringError,
};

fn manager() -> EvaluatorIdentity {
    EvaluatorIdentity {
        id: "mgr_ops_02".to_string(),
        display_name: "Luis Ortega".to_string(),
        role: Role::DepartmentManager,
        department: "Operations".to_string(),
        team: None,
    }
}

fn analyst() -> EmployeeProfile {
    EmployeeProfile {
        id: "emp_ops_11".to_string(),
        department: "Operations".to_string(),
        team: Some("Logistics".to_string()),
    }
}

fn scored_categories() -> Vec<RatingCategory> {
    vec![
        RatingCategory::new("Technical Skills", 4.0, 30),
        RatingCategory::new("Communication", 4.5, 20),
        RatingCategory::new("Leadership", 3.0, 15),
        RatingCategory::new("Innovation", 4.0, 20),
        RatingCategory::new("Reliability", 5.0, 15),
    ]
}

#[test]
fn manager_drafts_scores_and_submits_a_review() {
    let store = Arc::new(PerformanceRatingStore::new(
        Arc::new(InMemoryRatingRepository::default()),
        ReviewConfig::default(),
    ));
    let ratings = AuthorizedRatingStore::new(store.clone());

    assert!(can_edit(&manager(), &analyst()));

    let draft = ratings
        .create(
            &manager(),
            &analyst(),
            NewRating {
                employee_name: Some("Sam Okafor".to_string()),
                goals: Some(vec![PerformanceGoal {
                    title: "Cut carrier onboarding time".to_string(),
                    description: "Bring onboarding under two weeks".to_string(),
                    status: GoalStatus::Exceeded,
                }]),
                ..NewRating::default()
            },
        )
        .expect("draft created");
    assert_eq!(draft.status, RatingStatus::Draft);
    assert_eq!(draft.overall_score, 0.0);

    let expected = compute_overall_score(&scored_categories()).expect("valid weights");
    assert_eq!(expected, 4.1);

    let submitted = ratings
        .update(
            &manager(),
            &analyst(),
            &draft.id,
            RatingUpdate {
                categories: Some(scored_categories()),
                strengths: Some(vec!["Vendor negotiations".to_string()]),
                status: Some(RatingStatus::Submitted),
                ..RatingUpdate::default()
            },
        )
        .expect("update allowed")
        .expect("draft exists");
    assert_eq!(submitted.overall_score, expected);
    assert_eq!(submitted.status, RatingStatus::Submitted);
    assert!(submitted.updated_at >= draft.updated_at);

    let metrics = derive_metrics(&store, &analyst().id).expect("metrics derive");
    assert_eq!(metrics.current_score, 4.1);
    assert_eq!(metrics.previous_score, Some(3.9));
    assert_eq!(metrics.trend, ScoreTrend::Improving);
    assert_eq!(metrics.rank_in_department, None);

    let csv = rating_summary_csv(&store.list().expect("list")).expect("export");
    assert!(csv.contains("Sam Okafor"));
    assert!(csv.contains("submitted"));
}

#[test]
fn peer_outside_department_cannot_edit() {
    let store = Arc::new(PerformanceRatingStore::new(
        Arc::new(InMemoryRatingRepository::default()),
        ReviewConfig::default(),
    ));
    let ratings = AuthorizedRatingStore::new(store.clone());
    let outsider = EvaluatorIdentity {
        department: "Marketing".to_string(),
        ..manager()
    };

    let result = ratings.create(&outsider, &analyst(), NewRating::default());

    assert!(matches!(
        result,
        Err(AuthorizedStoreError::Unauthorized { .. })
    ));
    assert_eq!(store.len().expect("count"), 0);
}

#[test]
fn zero_weight_categories_are_reported() {
    let categories = vec![RatingCategory::new("Unweighted", 4.0, 0)];
    assert_eq!(
        compute_overall_score(&categories),
        Err(ScoringError::InvalidWeights)
    );
}
