//! Data validation for detecting structural and quality issues.

mod duplicates;
mod finding;
mod result;
mod validators;

pub use duplicates::estimate_duplicate_rows;
pub use finding::{Finding, Severity};
pub use result::ValidationResult;
pub use validators::{
    ColumnCountValidator, ConstantColumnValidator, DataValidator, FillRateValidator,
    RowCountValidator, Validator,
};
