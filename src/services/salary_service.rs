use std::sync::Arc;
use tracing::info;

use crate::database::models::ReferenceEntity;
use crate::database::{DatabaseError, ReferenceReader, SalaryReader, SqlRepository};
use crate::services::{
    AggregationResult, Aggregator, FilterCriteria, FilterOptions, FilterOptionsProvider, FilterResolver,
    ServiceError,
};
use crate::types::Dimension;

/// Entry point for the salary statistics operations
pub struct SalaryService {
    resolver: FilterResolver,
    aggregator: Aggregator,
    options: FilterOptionsProvider,
    salaries: Arc<dyn SalaryReader>,
}

impl SalaryService {
    pub fn new(references: Arc<dyn ReferenceReader>, salaries: Arc<dyn SalaryReader>) -> Self {
        Self {
            resolver: FilterResolver::new(references.clone()),
            aggregator: Aggregator::new(salaries.clone()),
            options: FilterOptionsProvider::new(references, salaries.clone()),
            salaries,
        }
    }

    pub fn from_repository(repository: SqlRepository) -> Self {
        let repository = Arc::new(repository);
        Self::new(repository.clone(), repository)
    }

    /// Resolve the criteria, then average the matching salaries. Filters that
    /// do not resolve are dropped; with none left the average is global.
    pub async fn average_salary(&self, criteria: FilterCriteria) -> Result<AggregationResult, ServiceError> {
        let resolved = self.resolver.resolve(&criteria).await?;
        let result = self.aggregator.average(&resolved, criteria).await?;
        info!(
            sample_size = result.sample_size,
            average = %result.average_usd,
            unconstrained = resolved.is_unconstrained(),
            "average salary computed"
        );
        Ok(result)
    }

    pub async fn filter_options(&self) -> Result<FilterOptions, ServiceError> {
        self.options.options().await
    }

    pub async fn lookup(&self, dimension: Dimension, needle: &str) -> Result<Vec<ReferenceEntity>, ServiceError> {
        Ok(self.resolver.inspect(dimension, needle).await?)
    }

    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        self.salaries.health_check().await
    }
}
