use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

use crate::database::{DatabaseError, ReferenceReader, SalaryReader};
use crate::services::ServiceError;
use crate::types::{Dimension, SalaryColumn};

/// Where a set of filter options came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionsSource {
    /// Labels from the normalization tables
    ReferenceTables,
    /// Raw ids from the salaries foreign-key columns
    SalaryColumns,
}

impl OptionsSource {
    /// Strategies in the order they are attempted
    pub const CHAIN: [OptionsSource; 2] = [OptionsSource::ReferenceTables, OptionsSource::SalaryColumns];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub job_titles: Vec<String>,
    pub locations: Vec<String>,
    pub experience_levels: Vec<String>,
    pub source: OptionsSource,
}

pub struct FilterOptionsProvider {
    references: Arc<dyn ReferenceReader>,
    salaries: Arc<dyn SalaryReader>,
}

impl FilterOptionsProvider {
    pub fn new(references: Arc<dyn ReferenceReader>, salaries: Arc<dyn SalaryReader>) -> Self {
        Self { references, salaries }
    }

    /// First strategy in `OptionsSource::CHAIN` that succeeds
    pub async fn options(&self) -> Result<FilterOptions, ServiceError> {
        let mut failures = Vec::new();
        for source in OptionsSource::CHAIN {
            match self.load(source).await {
                Ok(options) => return Ok(options),
                Err(e) => {
                    warn!("Filter options from {:?} failed: {}", source, e);
                    failures.push(format!("{:?}: {}", source, e));
                }
            }
        }
        Err(ServiceError::FilterOptionsUnavailable(failures.join("; ")))
    }

    async fn load(&self, source: OptionsSource) -> Result<FilterOptions, DatabaseError> {
        let (job_titles, locations, experience_levels) = match source {
            OptionsSource::ReferenceTables => (
                self.labels(Dimension::JobTitle).await?,
                self.labels(Dimension::Location).await?,
                self.labels(Dimension::ExperienceLevel).await?,
            ),
            OptionsSource::SalaryColumns => (
                self.raw_ids(SalaryColumn::JobTitle).await?,
                self.raw_ids(SalaryColumn::Location).await?,
                self.raw_ids(SalaryColumn::ExperienceLevel).await?,
            ),
        };
        Ok(FilterOptions {
            job_titles,
            locations,
            experience_levels,
            source,
        })
    }

    async fn labels(&self, dimension: Dimension) -> Result<Vec<String>, DatabaseError> {
        let rows = self.references.list_all(dimension).await?;
        let mut labels: Vec<String> = Vec::with_capacity(rows.len());
        for label in rows.iter().filter_map(|r| r.usable_label()) {
            if !labels.iter().any(|l| l == label) {
                labels.push(label.to_string());
            }
        }
        Ok(labels)
    }

    async fn raw_ids(&self, column: SalaryColumn) -> Result<Vec<String>, DatabaseError> {
        Ok(self
            .salaries
            .distinct(column)
            .await?
            .into_iter()
            .map(|id| id.to_string())
            .collect())
    }
}
