use std::io::Write;

use serde::Serialize;

use super::domain::PerformanceRating;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write rating export: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush rating export: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Serialize)]
struct RatingSummaryRow<'a> {
    id: &'a str,
    employee_id: &'a str,
    employee_name: &'a str,
    evaluator_id: &'a str,
    period: &'a str,
    overall_score: String,
    status: &'static str,
    updated_at: String,
}

impl<'a> From<&'a PerformanceRating> for RatingSummaryRow<'a> {
    fn from(rating: &'a PerformanceRating) -> Self {
        Self {
            id: rating.id.as_str(),
            employee_id: &rating.employee_id,
            employee_name: &rating.employee_name,
            evaluator_id: &rating.evaluator_id,
            period: &rating.period,
            overall_score: format!("{:.1}", rating.overall_score),
            status: rating.status.label(),
            updated_at: rating.updated_at.to_rfc3339(),
        }
    }
}

/// Write one summary line per rating, in the given order, with a header row.
pub fn write_rating_summary<W: Write>(
    writer: W,
    ratings: &[PerformanceRating],
) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    if ratings.is_empty() {
        csv_writer.write_record([
            "id",
            "employee_id",
            "employee_name",
            "evaluator_id",
            "period",
            "overall_score",
            "status",
            "updated_at",
        ])?;
    }
    for rating in ratings {
        csv_writer.serialize(RatingSummaryRow::from(rating))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn rating_summary_csv(ratings: &[PerformanceRating]) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    write_rating_summary(&mut buffer, ratings)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
