//! Edit permission policy for performance ratings.
//!
//! The policy only answers the question. The rating store never consults it;
//! callers that expose edits go through [`super::AuthorizedRatingStore`] or
//! check [`can_edit`] themselves.

use super::domain::{EmployeeProfile, EvaluatorIdentity, Role};

/// Whether `evaluator` may create or edit a rating for `employee`.
pub fn can_edit(evaluator: &EvaluatorIdentity, employee: &EmployeeProfile) -> bool {
    match evaluator.role {
        // hr_manager is nominally scoped to an organization, but neither side
        // carries an organization id, so the grant is unconditional.
        Role::OrgAdmin | Role::HrManager => true,
        Role::DepartmentManager => employee.department == evaluator.department,
        Role::TeamLead => match (&evaluator.team, &employee.team) {
            (Some(lead_team), Some(member_team)) => lead_team == member_team,
            _ => false,
        },
        Role::Employee => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluator(role: Role, department: &str, team: Option<&str>) -> EvaluatorIdentity {
        EvaluatorIdentity {
            id: "eval-1".to_string(),
            display_name: "Morgan Ellis".to_string(),
            role,
            department: department.to_string(),
            team: team.map(str::to_string),
        }
    }

    fn employee(department: &str, team: Option<&str>) -> EmployeeProfile {
        EmployeeProfile {
            id: "emp-1".to_string(),
            department: department.to_string(),
            team: team.map(str::to_string),
        }
    }

    #[test]
    fn policy_matrix() {
        let cases = [
            (Role::DepartmentManager, "Engineering", None, "Engineering", None, true),
            (Role::DepartmentManager, "Engineering", None, "Sales", None, false),
            (Role::TeamLead, "Engineering", Some("Platform"), "Engineering", Some("Platform"), true),
            (Role::TeamLead, "Engineering", Some("Platform"), "Engineering", Some("Mobile"), false),
            (Role::TeamLead, "Engineering", Some("Platform"), "Sales", Some("Platform"), true),
            (Role::TeamLead, "Engineering", None, "Engineering", None, false),
            (Role::OrgAdmin, "Finance", None, "Engineering", Some("Mobile"), true),
            (Role::HrManager, "People", None, "Sales", None, true),
            (Role::Employee, "Engineering", Some("Platform"), "Engineering", Some("Platform"), false),
            (Role::Employee, "Sales", None, "Engineering", None, false),
        ];

        for (role, eval_dept, eval_team, emp_dept, emp_team, expected) in cases {
            let allowed = can_edit(
                &evaluator(role, eval_dept, eval_team),
                &employee(emp_dept, emp_team),
            );
            assert_eq!(
                allowed, expected,
                "{role:?} in {eval_dept}/{eval_team:?} editing {emp_dept}/{emp_team:?}"
            );
        }
    }
}
