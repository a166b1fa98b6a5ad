pub mod aggregator;
pub mod filter_options;
pub mod filter_resolver;
pub mod record_service;
pub mod salary_service;

pub use aggregator::{AggregationResult, Aggregator};
pub use filter_options::{FilterOptions, FilterOptionsProvider, OptionsSource};
pub use filter_resolver::{FilterCriteria, FilterResolver, ResolvedFilters};
pub use record_service::RecordService;
pub use salary_service::SalaryService;

use crate::database::DatabaseError;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Store(#[from] DatabaseError),

    /// Every filter-options strategy failed; carries each failure in order
    #[error("Filter options unavailable: {0}")]
    FilterOptionsUnavailable(String),

    #[error("Salary {0} not found")]
    RecordNotFound(i64),

    #[error("Invalid salary record: {0}")]
    InvalidRecord(String),
}
