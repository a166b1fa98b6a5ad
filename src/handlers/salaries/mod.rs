// Salary routes (/api/salaries/*)
pub mod average_post;
pub mod create_post;
pub mod delete;
pub mod filters_get;
pub mod list_get;
pub mod lookup_get;
pub mod record_get;
pub mod update_put;

pub use average_post::average_post;
pub use create_post::create_post;
pub use delete::record_delete;
pub use filters_get::filters_get;
pub use list_get::list_get;
pub use lookup_get::lookup_get;
pub use record_get::record_get;
pub use update_put::update_put;

use crate::error::ApiError;

/// Salary id from the `:id` path segment
fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request(format!("Invalid salary id '{}'", raw)))
}
