use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{NewSalary, ReferenceEntity, SalaryPatch, SalaryRecord, SalaryView};
use crate::database::query_builder::{distinct_sql, salary_view_sql, AggregateQuery, SUM_SPLIT};
use crate::types::{Dimension, Predicate, SalaryColumn};

const SALARY_TABLE: &str = "salaries";
const AMOUNT_COLUMN: &str = "salary_in_usd";

/// Exact sum and row count of the matching salaries. The sum is wider than a
/// single amount so large sets cannot overflow it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SalaryAggregate {
    pub total: i128,
    pub count: i64,
}

/// Read access to the normalization tables
#[async_trait]
pub trait ReferenceReader: Send + Sync {
    /// Every row of the dimension's table, ordered by id
    async fn list_all(&self, dimension: Dimension) -> Result<Vec<ReferenceEntity>, DatabaseError>;
}

/// Read access to the salary observations
#[async_trait]
pub trait SalaryReader: Send + Sync {
    async fn aggregate(&self, predicates: &[Predicate]) -> Result<SalaryAggregate, DatabaseError>;

    async fn distinct(&self, column: SalaryColumn) -> Result<Vec<i64>, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;
}

/// Record-level access to `salaries`. Reads come back with labels resolved.
#[async_trait]
pub trait SalaryStore: Send + Sync {
    async fn list_records(&self) -> Result<Vec<SalaryView>, DatabaseError>;

    async fn get_record(&self, id: i64) -> Result<Option<SalaryView>, DatabaseError>;

    async fn create_record(&self, salary: &NewSalary) -> Result<SalaryView, DatabaseError>;

    /// `None` when no row has this id
    async fn update_record(&self, id: i64, patch: &SalaryPatch) -> Result<Option<SalaryView>, DatabaseError>;

    /// `false` when no row has this id
    async fn delete_record(&self, id: i64) -> Result<bool, DatabaseError>;
}

/// SQLite-backed store implementing both readers, plus the inserts used to
/// populate it
#[derive(Debug, Clone)]
pub struct SqlRepository {
    pool: SqlitePool,
}

impl SqlRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a label into a dimension's table, returning its id
    pub async fn insert_reference(&self, dimension: Dimension, label: &str) -> Result<i64, DatabaseError> {
        if label.is_empty() {
            return Err(DatabaseError::QueryError(format!("{} label must not be empty", dimension)));
        }
        let sql = format!(
            "INSERT INTO \"{}\" (\"{}\") VALUES (?1)",
            dimension.table_name(),
            dimension.label_column()
        );
        let result = sqlx::query(&sql).bind(label).execute(&self.pool).await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn insert_salary(&self, salary: &NewSalary) -> Result<SalaryRecord, DatabaseError> {
        let now = Utc::now().naive_utc();
        let result = sqlx::query(
            "INSERT INTO salaries
             (year, salary_in_usd, employment_type, job_title, location, experience_level, created_date, updated_date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )
        .bind(&salary.year)
        .bind(salary.salary_in_usd)
        .bind(salary.employment_type)
        .bind(salary.job_title)
        .bind(salary.location)
        .bind(salary.experience_level)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::from_write)?;

        self.find_salary(result.last_insert_rowid())
            .await?
            .ok_or_else(|| DatabaseError::QueryError("inserted salary row not readable".to_string()))
    }

    pub async fn find_salary(&self, id: i64) -> Result<Option<SalaryRecord>, DatabaseError> {
        let record = sqlx::query_as::<_, SalaryRecord>(
            "SELECT id, year, salary_in_usd, employment_type, job_title, location, experience_level,
             created_date, updated_date
             FROM salaries
             WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Overwrite every mutable column of an existing row and bump `updated_date`
    async fn store_salary(&self, record: &SalaryRecord) -> Result<(), DatabaseError> {
        sqlx::query(
            "UPDATE salaries
             SET year = ?1, salary_in_usd = ?2, employment_type = ?3, job_title = ?4, location = ?5,
                 experience_level = ?6, updated_date = ?7
             WHERE id = ?8",
        )
        .bind(&record.year)
        .bind(record.salary_in_usd)
        .bind(record.employment_type)
        .bind(record.job_title)
        .bind(record.location)
        .bind(record.experience_level)
        .bind(Utc::now().naive_utc())
        .bind(record.id)
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::from_write)?;
        Ok(())
    }

    fn view_sql(clause: &str) -> String {
        format!("{} {}", salary_view_sql(SALARY_TABLE), clause)
    }
}

#[async_trait]
impl ReferenceReader for SqlRepository {
    async fn list_all(&self, dimension: Dimension) -> Result<Vec<ReferenceEntity>, DatabaseError> {
        let sql = format!(
            "SELECT id, \"{}\" AS label FROM \"{}\" ORDER BY id",
            dimension.label_column(),
            dimension.table_name()
        );
        let rows = sqlx::query_as::<_, ReferenceEntity>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

#[async_trait]
impl SalaryReader for SqlRepository {
    async fn aggregate(&self, predicates: &[Predicate]) -> Result<SalaryAggregate, DatabaseError> {
        let sql_result = AggregateQuery::new(SALARY_TABLE, AMOUNT_COLUMN)
            .filter(predicates)
            .to_sql();

        let mut q = sqlx::query(&sql_result.query);
        for p in sql_result.params.iter() {
            q = q.bind(*p);
        }
        let row = q.fetch_one(&self.pool).await?;

        let high: i64 = row.try_get("total_high")?;
        let low: i64 = row.try_get("total_low")?;
        Ok(SalaryAggregate {
            total: i128::from(high) * i128::from(SUM_SPLIT) + i128::from(low),
            count: row.try_get("sample_size")?,
        })
    }

    async fn distinct(&self, column: SalaryColumn) -> Result<Vec<i64>, DatabaseError> {
        let rows = sqlx::query(&distinct_sql(SALARY_TABLE, column))
            .fetch_all(&self.pool)
            .await?;
        rows.iter()
            .map(|row| row.try_get::<i64, _>("value").map_err(DatabaseError::from))
            .collect()
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}

#[async_trait]
impl SalaryStore for SqlRepository {
    async fn list_records(&self) -> Result<Vec<SalaryView>, DatabaseError> {
        let rows = sqlx::query_as::<_, SalaryView>(&Self::view_sql("ORDER BY s.id"))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_record(&self, id: i64) -> Result<Option<SalaryView>, DatabaseError> {
        let row = sqlx::query_as::<_, SalaryView>(&Self::view_sql("WHERE s.id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create_record(&self, salary: &NewSalary) -> Result<SalaryView, DatabaseError> {
        let record = self.insert_salary(salary).await?;
        self.get_record(record.id)
            .await?
            .ok_or_else(|| DatabaseError::QueryError(format!("salary {} vanished after insert", record.id)))
    }

    async fn update_record(&self, id: i64, patch: &SalaryPatch) -> Result<Option<SalaryView>, DatabaseError> {
        let Some(mut record) = self.find_salary(id).await? else {
            return Ok(None);
        };
        patch.apply(&mut record);
        self.store_salary(&record).await?;
        self.get_record(id).await
    }

    async fn delete_record(&self, id: i64) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM salaries WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::from_write)?;
        Ok(result.rows_affected() > 0)
    }
}
