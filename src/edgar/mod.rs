pub mod client;
pub mod date_range;
pub mod quarter;
pub mod query;
pub mod report;

pub use client::{FilingQueryClient, QueryError, QueryParams};
pub use date_range::DateRange;
pub use quarter::Quarter;
pub use query::SearchCriteria;
pub use report::ReportType;
