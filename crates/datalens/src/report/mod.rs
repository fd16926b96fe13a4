//! Report assembly: result records, the SQL preview and the final report.

mod assembler;
#[allow(clippy::module_inception)]
mod report;
mod result;
mod sql;

pub use assembler::ResultsAssembler;
pub use report::{generate_report_id, overall_confidence, AnalysisReport, ReportContext};
pub use result::{
    AnalysisResult, Confidence, DatasetOverview, QualitySummary, ResultType, ResultValue,
    TypeCounts,
};
pub use sql::{QueryStep, SqlPreview};
