pub mod json;
pub mod md;
pub mod points;

use crate::error::OkrError;
use crate::types::report::RunReport;
use points::PointsTable;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

pub fn render(
    report: &RunReport,
    format: OutputFormat,
    points: &PointsTable,
) -> Result<String, OkrError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(OkrError::Json),
        OutputFormat::Md => Ok(md::to_markdown(report, points)),
    }
}
