use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct SalaryRecord {
    pub id: i64,
    pub year: Option<String>,
    pub salary_in_usd: i64,
    pub employment_type: Option<i64>,
    pub job_title: i64,
    pub location: Option<i64>,
    pub experience_level: Option<i64>,
    pub created_date: Option<NaiveDateTime>,
    pub updated_date: Option<NaiveDateTime>,
}

/// Insert payload for `salaries`; timestamps are stamped by the repository
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSalary {
    pub year: String,
    pub salary_in_usd: i64,
    pub employment_type: Option<i64>,
    pub job_title: i64,
    pub location: Option<i64>,
    pub experience_level: Option<i64>,
}

/// Salary row as served to clients, with reference ids resolved to labels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct SalaryView {
    pub id: i64,
    pub year: Option<String>,
    pub salary_in_usd: i64,
    pub employment_type: Option<String>,
    pub job_title: Option<String>,
    pub location: Option<String>,
    pub experience_level: Option<String>,
    pub created_date: Option<NaiveDateTime>,
    pub updated_date: Option<NaiveDateTime>,
}

/// Partial update for `salaries`. `None` leaves a column untouched; for the
/// nullable references `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SalaryPatch {
    pub year: Option<String>,
    pub salary_in_usd: Option<i64>,
    pub employment_type: Option<Option<i64>>,
    pub job_title: Option<i64>,
    pub location: Option<Option<i64>>,
    pub experience_level: Option<Option<i64>>,
}

impl SalaryPatch {
    pub fn apply(&self, record: &mut SalaryRecord) {
        if let Some(year) = &self.year {
            record.year = Some(year.clone());
        }
        if let Some(amount) = self.salary_in_usd {
            record.salary_in_usd = amount;
        }
        if let Some(employment_type) = self.employment_type {
            record.employment_type = employment_type;
        }
        if let Some(job_title) = self.job_title {
            record.job_title = job_title;
        }
        if let Some(location) = self.location {
            record.location = location;
        }
        if let Some(experience_level) = self.experience_level {
            record.experience_level = experience_level;
        }
    }
}
