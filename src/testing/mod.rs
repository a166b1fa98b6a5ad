use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::database::models::{NewSalary, ReferenceEntity, SalaryPatch, SalaryView};
use crate::database::{DatabaseError, ReferenceReader, SalaryAggregate, SalaryReader, SalaryStore};
use crate::types::{Dimension, Predicate, SalaryColumn};

/// Reference reader over fixed rows; unknown dimensions are empty tables
#[derive(Debug, Default)]
pub struct StaticReferences {
    rows: HashMap<Dimension, Vec<ReferenceEntity>>,
}

impl StaticReferences {
    pub fn with(mut self, dimension: Dimension, rows: &[(i64, &str)]) -> Self {
        self.rows.insert(
            dimension,
            rows.iter().map(|(id, label)| ReferenceEntity::new(*id, *label)).collect(),
        );
        self
    }
}

#[async_trait]
impl ReferenceReader for StaticReferences {
    async fn list_all(&self, dimension: Dimension) -> Result<Vec<ReferenceEntity>, DatabaseError> {
        Ok(self.rows.get(&dimension).cloned().unwrap_or_default())
    }
}

/// Store whose every read fails, as if the tables were missing
#[derive(Debug, Default)]
pub struct FailingStore;

fn missing_table(name: &str) -> DatabaseError {
    DatabaseError::QueryError(format!("no such table: {}", name))
}

#[async_trait]
impl ReferenceReader for FailingStore {
    async fn list_all(&self, dimension: Dimension) -> Result<Vec<ReferenceEntity>, DatabaseError> {
        Err(missing_table(dimension.table_name()))
    }
}

#[async_trait]
impl SalaryReader for FailingStore {
    async fn aggregate(&self, _predicates: &[Predicate]) -> Result<SalaryAggregate, DatabaseError> {
        Err(missing_table("salaries"))
    }

    async fn distinct(&self, _column: SalaryColumn) -> Result<Vec<i64>, DatabaseError> {
        Err(missing_table("salaries"))
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Err(missing_table("salaries"))
    }
}

#[async_trait]
impl SalaryStore for FailingStore {
    async fn list_records(&self) -> Result<Vec<SalaryView>, DatabaseError> {
        Err(missing_table("salaries"))
    }

    async fn get_record(&self, _id: i64) -> Result<Option<SalaryView>, DatabaseError> {
        Err(missing_table("salaries"))
    }

    async fn create_record(&self, _salary: &NewSalary) -> Result<SalaryView, DatabaseError> {
        Err(missing_table("salaries"))
    }

    async fn update_record(&self, _id: i64, _patch: &SalaryPatch) -> Result<Option<SalaryView>, DatabaseError> {
        Err(missing_table("salaries"))
    }

    async fn delete_record(&self, _id: i64) -> Result<bool, DatabaseError> {
        Err(missing_table("salaries"))
    }
}

/// Salary reader returning canned results and recording the predicates it saw
#[derive(Debug, Default)]
pub struct RecordingSalaries {
    aggregate: SalaryAggregate,
    distinct: Vec<i64>,
    calls: Mutex<Vec<Vec<Predicate>>>,
}

impl RecordingSalaries {
    pub fn returning(aggregate: SalaryAggregate) -> Self {
        Self { aggregate, ..Default::default() }
    }

    pub fn with_distinct(mut self, ids: Vec<i64>) -> Self {
        self.distinct = ids;
        self
    }

    pub fn calls(&self) -> Vec<Vec<Predicate>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SalaryReader for RecordingSalaries {
    async fn aggregate(&self, predicates: &[Predicate]) -> Result<SalaryAggregate, DatabaseError> {
        self.calls.lock().unwrap().push(predicates.to_vec());
        Ok(self.aggregate)
    }

    async fn distinct(&self, _column: SalaryColumn) -> Result<Vec<i64>, DatabaseError> {
        Ok(self.distinct.clone())
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
