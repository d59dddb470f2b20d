use super::common::*;

use crate::reviews::domain::{NewRating, RatingId, RatingUpdate, Role};
use crate::reviews::AuthorizedStoreError;

#[test]
fn department_manager_creates_within_department() {
    let (authorized, _) = build_authorized();

    let rating = authorized
        .create(
            &evaluator(Role::DepartmentManager),
            &engineer(),
            NewRating::default(),
        )
        .expect("manager may rate own department");

    assert_eq!(rating.employee_id, engineer().id);
    assert_eq!(authorized.store().len().expect("count"), 1);
}

#[test]
fn department_manager_denied_outside_department() {
    let (authorized, _) = build_authorized();

    match authorized.create(
        &evaluator(Role::DepartmentManager),
        &account_executive(),
        NewRating::default(),
    ) {
        Err(AuthorizedStoreError::Unauthorized {
            evaluator_id,
            employee_id,
        }) => {
            assert_eq!(evaluator_id, "mgr_eng_01");
            assert_eq!(employee_id, "emp_sales_03");
        }
        other => panic!("expected unauthorized, got {other:?}"),
    }
    assert!(authorized.store().is_empty().expect("count"));
}

#[test]
fn employee_role_cannot_update() {
    let (authorized, _) = build_authorized();
    let created = authorized
        .create(&evaluator(Role::HrManager), &engineer(), NewRating::default())
        .expect("hr manager may rate anyone");

    let result = authorized.update(
        &evaluator(Role::Employee),
        &engineer(),
        &created.id,
        RatingUpdate {
            comments: Some("self-review edit".to_string()),
            ..RatingUpdate::default()
        },
    );

    assert!(matches!(
        result,
        Err(AuthorizedStoreError::Unauthorized { .. })
    ));
    let stored = authorized
        .store()
        .get(&created.id)
        .expect("fetch")
        .expect("present");
    assert!(stored.comments.is_empty());
}

#[test]
fn team_lead_updates_own_team_member() {
    let (authorized, _) = build_authorized();
    let created = authorized
        .create(&evaluator(Role::TeamLead), &engineer(), NewRating::default())
        .expect("team lead may rate own team");

    let updated = authorized
        .update(
            &evaluator(Role::TeamLead),
            &engineer(),
            &created.id,
            RatingUpdate {
                categories: Some(single_category(4.0)),
                ..RatingUpdate::default()
            },
        )
        .expect("update allowed")
        .expect("rating exists");

    assert_eq!(updated.overall_score, 4.0);
}

#[test]
fn update_rejects_rating_of_other_employee() {
    let (authorized, _) = build_authorized();
    let created = authorized
        .create(&evaluator(Role::OrgAdmin), &account_executive(), NewRating::default())
        .expect("admin may rate anyone");

    // Authorized for the engineer, but the rating belongs to someone else.
    let result = authorized
        .update(
            &evaluator(Role::DepartmentManager),
            &engineer(),
            &created.id,
            RatingUpdate {
                comments: Some("cross-department edit".to_string()),
                ..RatingUpdate::default()
            },
        )
        .expect("no store error");

    assert!(result.is_none());
}

#[test]
fn update_unknown_rating_returns_none() {
    let (authorized, _) = build_authorized();

    let result = authorized
        .update(
            &evaluator(Role::OrgAdmin),
            &engineer(),
            &RatingId("rating-missing".to_string()),
            RatingUpdate::default(),
        )
        .expect("no store error");

    assert!(result.is_none());
}
