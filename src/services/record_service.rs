use std::sync::Arc;
use tracing::info;

use crate::database::models::{NewSalary, SalaryPatch, SalaryView};
use crate::database::{SalaryStore, SqlRepository};
use crate::services::ServiceError;

/// Create, read, update and delete individual salary records
pub struct RecordService {
    store: Arc<dyn SalaryStore>,
}

impl RecordService {
    pub fn new(store: Arc<dyn SalaryStore>) -> Self {
        Self { store }
    }

    pub fn from_repository(repository: SqlRepository) -> Self {
        Self::new(Arc::new(repository))
    }

    pub async fn list(&self) -> Result<Vec<SalaryView>, ServiceError> {
        Ok(self.store.list_records().await?)
    }

    pub async fn get(&self, id: i64) -> Result<SalaryView, ServiceError> {
        self.store
            .get_record(id)
            .await?
            .ok_or(ServiceError::RecordNotFound(id))
    }

    pub async fn create(&self, salary: NewSalary) -> Result<SalaryView, ServiceError> {
        check_year(&salary.year)?;
        check_amount(salary.salary_in_usd)?;

        let record = self.store.create_record(&salary).await?;
        info!(id = record.id, "salary record created");
        Ok(record)
    }

    pub async fn update(&self, id: i64, patch: SalaryPatch) -> Result<SalaryView, ServiceError> {
        if let Some(year) = &patch.year {
            check_year(year)?;
        }
        if let Some(amount) = patch.salary_in_usd {
            check_amount(amount)?;
        }

        let record = self
            .store
            .update_record(id, &patch)
            .await?
            .ok_or(ServiceError::RecordNotFound(id))?;
        info!(id, "salary record updated");
        Ok(record)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        if !self.store.delete_record(id).await? {
            return Err(ServiceError::RecordNotFound(id));
        }
        info!(id, "salary record deleted");
        Ok(())
    }
}

fn check_year(year: &str) -> Result<(), ServiceError> {
    if year.trim().is_empty() {
        return Err(ServiceError::InvalidRecord("year must not be empty".to_string()));
    }
    Ok(())
}

fn check_amount(amount: i64) -> Result<(), ServiceError> {
    if amount < 0 {
        return Err(ServiceError::InvalidRecord(format!(
            "salary_in_usd must be non-negative, got {}",
            amount
        )));
    }
    Ok(())
}
