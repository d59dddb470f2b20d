use crate::infra::{in_memory_rating_service, RatingService};
use clap::Args;
use performance_review::config::{AppConfig, ReviewConfig};
use performance_review::error::AppError;
use performance_review::reviews::{
    derive_metrics_with_peers, rating_summary_csv, EmployeeProfile, EvaluatorIdentity, GoalStatus,
    NewRating, PerformanceGoal, PerformanceRating, RatingCategory, RatingStatus, RatingUpdate,
    Role,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Employee id used for the sample review.
    #[arg(long, default_value = "emp_eng_07")]
    pub(crate) employee_id: String,
    /// Department shared by the reviewer and the employee.
    #[arg(long, default_value = "Engineering")]
    pub(crate) department: String,
    /// Skip printing the CSV export at the end of the demo.
    #[arg(long)]
    pub(crate) skip_export: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let output = build_demo_output(&args, config.review)?;
    print!("{output}");
    Ok(())
}

fn build_demo_output(args: &DemoArgs, config: ReviewConfig) -> Result<String, AppError> {
    let ratings = in_memory_rating_service(config);
    let reviewer = EvaluatorIdentity {
        id: "mgr_demo_01".to_string(),
        display_name: "Priya Raman".to_string(),
        role: Role::DepartmentManager,
        department: args.department.clone(),
        team: None,
    };
    let employee = EmployeeProfile {
        id: args.employee_id.clone(),
        department: args.department.clone(),
        team: Some("Platform".to_string()),
    };

    let mut out = String::new();
    push_line(&mut out, "Performance Review Demo");
    push_line(&mut out, "=======================");

    let draft = ratings.create(
        &reviewer,
        &employee,
        NewRating {
            employee_name: Some("Dana Whitfield".to_string()),
            goals: Some(vec![PerformanceGoal {
                title: "Stabilize deploy pipeline".to_string(),
                description: "Keep weekly deploy failures under two".to_string(),
                status: GoalStatus::Completed,
            }]),
            ..NewRating::default()
        },
    )?;
    describe(&mut out, "Draft created", &draft);

    let submitted = ratings
        .update(
            &reviewer,
            &employee,
            &draft.id,
            RatingUpdate {
                categories: Some(demo_categories()),
                strengths: Some(vec!["Incident response".to_string()]),
                areas_for_improvement: Some(vec!["Design reviews".to_string()]),
                status: Some(RatingStatus::Submitted),
                ..RatingUpdate::default()
            },
        )?
        .unwrap_or(draft);
    describe(&mut out, "Scored and submitted", &submitted);

    seed_peers(&ratings, &reviewer, &args.department)?;
    let peers = ["emp_peer_01", "emp_peer_02", args.employee_id.as_str()];
    let metrics = derive_metrics_with_peers(ratings.store(), &args.employee_id, peers)?;
    push_line(&mut out, "\nMetrics");
    push_line(
        &mut out,
        format!("  Current score: {:.1}", metrics.current_score),
    );
    if let Some(previous) = metrics.previous_score {
        push_line(&mut out, format!("  Previous score: {previous:.1}"));
    }
    push_line(&mut out, format!("  Trend: {:?}", metrics.trend));
    if let (Some(rank), Some(total)) = (metrics.rank_in_department, metrics.total_in_department) {
        push_line(&mut out, format!("  Department rank: {rank} of {total}"));
    }

    if !args.skip_export {
        let csv = rating_summary_csv(&ratings.store().list()?)?;
        push_line(&mut out, "\nExport");
        out.push_str(&csv);
    }

    Ok(out)
}

fn demo_categories() -> Vec<RatingCategory> {
    vec![
        RatingCategory::new("Technical Skills", 4.5, 30),
        RatingCategory::new("Communication", 4.0, 20),
        RatingCategory::new("Leadership", 3.5, 15),
        RatingCategory::new("Innovation", 4.0, 20),
        RatingCategory::new("Reliability", 5.0, 15),
    ]
}

fn seed_peers(
    ratings: &RatingService,
    reviewer: &EvaluatorIdentity,
    department: &str,
) -> Result<(), AppError> {
    for (peer_id, score) in [("emp_peer_01", 4.6), ("emp_peer_02", 3.4)] {
        let peer = EmployeeProfile {
            id: peer_id.to_string(),
            department: department.to_string(),
            team: None,
        };
        ratings.create(
            reviewer,
            &peer,
            NewRating {
                overall_score: Some(score),
                ..NewRating::default()
            },
        )?;
    }
    Ok(())
}

fn push_line(out: &mut String, line: impl AsRef<str>) {
    out.push_str(line.as_ref());
    out.push('\n');
}

fn describe(out: &mut String, heading: &str, rating: &PerformanceRating) {
    push_line(out, format!("\n{heading}"));
    push_line(out, format!("  Rating: {}", rating.id));
    push_line(
        out,
        format!("  Employee: {} ({})", rating.employee_name, rating.employee_id),
    );
    push_line(out, format!("  Period: {}", rating.period));
    push_line(out, format!("  Status: {}", rating.status.label()));
    push_line(out, format!("  Overall score: {:.1}", rating.overall_score));
}
