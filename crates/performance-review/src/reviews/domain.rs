use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for stored ratings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RatingId(pub String);

impl RatingId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RatingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named performance dimension with a 0-5 score and a percentage weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingCategory {
    pub name: String,
    pub score: f64,
    pub weight: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

impl RatingCategory {
    pub fn new(name: impl Into<String>, score: f64, weight: u32) -> Self {
        Self {
            name: name.into(),
            score,
            weight,
            comments: None,
        }
    }
}

/// Template applied when a rating is created without categories.
pub fn default_categories() -> Vec<RatingCategory> {
    [
        ("Technical Skills", 30),
        ("Communication", 20),
        ("Leadership", 15),
        ("Innovation", 20),
        ("Reliability", 15),
    ]
    .into_iter()
    .map(|(name, weight)| RatingCategory::new(name, 0.0, weight))
    .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    NotStarted,
    InProgress,
    Completed,
    Exceeded,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceGoal {
    pub title: String,
    pub description: String,
    pub status: GoalStatus,
}

/// Workflow marker for a rating. Any value may be set at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingStatus {
    Draft,
    Submitted,
    Approved,
}

impl RatingStatus {
    pub const fn label(self) -> &'static str {
        match self {
            RatingStatus::Draft => "draft",
            RatingStatus::Submitted => "submitted",
            RatingStatus::Approved => "approved",
        }
    }
}

/// One evaluation record for one employee in one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceRating {
    pub id: RatingId,
    pub employee_id: String,
    pub employee_name: String,
    pub evaluator_id: String,
    pub evaluator_name: String,
    pub period: String,
    pub overall_score: f64,
    pub categories: Vec<RatingCategory>,
    pub goals: Vec<PerformanceGoal>,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub comments: String,
    pub status: RatingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub review_date: DateTime<Utc>,
    pub next_review_date: DateTime<Utc>,
}

impl PerformanceRating {
    /// Shallow-merge the present fields of `update`. Returns whether the
    /// update replaced the categories, in which case the caller rescores.
    pub(crate) fn merge(&mut self, update: RatingUpdate) -> bool {
        let RatingUpdate {
            employee_name,
            evaluator_name,
            period,
            overall_score,
            categories,
            goals,
            strengths,
            areas_for_improvement,
            comments,
            status,
            review_date,
            next_review_date,
        } = update;

        if let Some(value) = employee_name {
            self.employee_name = value;
        }
        if let Some(value) = evaluator_name {
            self.evaluator_name = value;
        }
        if let Some(value) = period {
            self.period = value;
        }
        if let Some(value) = overall_score {
            self.overall_score = value;
        }
        if let Some(value) = goals {
            self.goals = value;
        }
        if let Some(value) = strengths {
            self.strengths = value;
        }
        if let Some(value) = areas_for_improvement {
            self.areas_for_improvement = value;
        }
        if let Some(value) = comments {
            self.comments = value;
        }
        if let Some(value) = status {
            self.status = value;
        }
        if let Some(value) = review_date {
            self.review_date = value;
        }
        if let Some(value) = next_review_date {
            self.next_review_date = value;
        }

        match categories {
            Some(value) => {
                self.categories = value;
                true
            }
            None => false,
        }
    }
}

/// Caller-supplied fields for a new rating. Omitted fields take structural defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewRating {
    pub employee_name: Option<String>,
    pub period: Option<String>,
    pub overall_score: Option<f64>,
    pub categories: Option<Vec<RatingCategory>>,
    pub goals: Option<Vec<PerformanceGoal>>,
    pub strengths: Option<Vec<String>>,
    pub areas_for_improvement: Option<Vec<String>>,
    pub comments: Option<String>,
    pub review_date: Option<DateTime<Utc>>,
    pub next_review_date: Option<DateTime<Utc>>,
}

/// Partial update merged field-by-field into a stored rating.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RatingUpdate {
    pub employee_name: Option<String>,
    pub evaluator_name: Option<String>,
    pub period: Option<String>,
    pub overall_score: Option<f64>,
    pub categories: Option<Vec<RatingCategory>>,
    pub goals: Option<Vec<PerformanceGoal>>,
    pub strengths: Option<Vec<String>>,
    pub areas_for_improvement: Option<Vec<String>>,
    pub comments: Option<String>,
    pub status: Option<RatingStatus>,
    pub review_date: Option<DateTime<Utc>>,
    pub next_review_date: Option<DateTime<Utc>>,
}

/// Roles recognised by the edit policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    OrgAdmin,
    HrManager,
    DepartmentManager,
    TeamLead,
    Employee,
}

/// Identity of the user performing a review, supplied by the session layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluatorIdentity {
    pub id: String,
    pub display_name: String,
    pub role: Role,
    pub department: String,
    #[serde(default)]
    pub team: Option<String>,
}

/// Organizational placement of the reviewed employee, supplied by the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeProfile {
    pub id: String,
    pub department: String,
    #[serde(default)]
    pub team: Option<String>,
}

/// Fiscal quarter label such as `"Q4 2024"`.
pub fn fiscal_quarter_label(date: NaiveDate) -> String {
    let quarter = (date.month0() / 3) + 1;
    format!("Q{quarter} {}", date.year())
}
