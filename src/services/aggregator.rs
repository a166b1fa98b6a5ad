use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::sync::Arc;

use crate::database::{DatabaseError, SalaryAggregate, SalaryReader};
use crate::services::filter_resolver::{FilterCriteria, ResolvedFilters};

pub const CURRENCY: &str = "USD";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregationResult {
    pub average_usd: Decimal,
    pub sample_size: i64,
    pub currency: &'static str,
    pub echoed_filters: FilterCriteria,
}

/// Mean of the aggregate rounded half away from zero to exactly two
/// fraction digits; 0.00 for an empty set. `None` only when the total does
/// not fit a `Decimal` (96 bits).
pub fn mean_usd(aggregate: SalaryAggregate) -> Option<Decimal> {
    if aggregate.count <= 0 {
        return Some(Decimal::new(0, 2));
    }
    let total = Decimal::from_i128(aggregate.total)?;
    let mut mean = (total / Decimal::from(aggregate.count))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    mean.rescale(2);
    Some(mean)
}

/// Read-only (sum, count) over salaries matching every resolved filter
pub struct Aggregator {
    salaries: Arc<dyn SalaryReader>,
}

impl Aggregator {
    pub fn new(salaries: Arc<dyn SalaryReader>) -> Self {
        Self { salaries }
    }

    pub async fn aggregate(&self, filters: &ResolvedFilters) -> Result<SalaryAggregate, DatabaseError> {
        self.salaries.aggregate(&filters.predicates()).await
    }

    pub async fn average(
        &self,
        filters: &ResolvedFilters,
        echoed_filters: FilterCriteria,
    ) -> Result<AggregationResult, DatabaseError> {
        let aggregate = self.aggregate(filters).await?;
        let average_usd = mean_usd(aggregate).ok_or_else(|| {
            DatabaseError::QueryError(format!("salary total {} exceeds the decimal range", aggregate.total))
        })?;
        Ok(AggregationResult {
            average_usd,
            sample_size: aggregate.count,
            currency: CURRENCY,
            echoed_filters,
        })
    }
}
