pub mod core;
pub mod edgar;
pub mod form;
pub mod repl;
pub mod utils;

// Re-exports
pub use crate::core::config::FilingsConfig;
pub use crate::core::types::{FilingBackend, FilingQueryResult};
pub use edgar::{DateRange, FilingQueryClient, Quarter, QueryError, QueryParams, ReportType, SearchCriteria};
pub use form::{FormState, Submit};
