/// Shared types used across the codebase

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reference dimensions backed by a normalization table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    EmploymentType,
    ExperienceLevel,
    JobTitle,
    Location,
    Role,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::EmploymentType,
        Dimension::ExperienceLevel,
        Dimension::JobTitle,
        Dimension::Location,
        Dimension::Role,
    ];

    /// Normalization table holding this dimension's labels
    pub fn table_name(&self) -> &'static str {
        match self {
            Dimension::EmploymentType => "employment_types",
            Dimension::ExperienceLevel => "experience_levels",
            Dimension::JobTitle => "job_titles",
            Dimension::Location => "locations",
            Dimension::Role => "roles",
        }
    }

    /// Label column inside `table_name()`
    pub fn label_column(&self) -> &'static str {
        match self {
            Dimension::EmploymentType => "employment_type",
            Dimension::ExperienceLevel => "experience_level",
            Dimension::JobTitle => "job_title",
            Dimension::Location => "location",
            Dimension::Role => "role",
        }
    }

    /// Foreign-key column on `salaries` referencing this dimension.
    /// Roles are referenced by users only.
    pub fn salary_column(&self) -> Option<SalaryColumn> {
        match self {
            Dimension::EmploymentType => Some(SalaryColumn::EmploymentType),
            Dimension::ExperienceLevel => Some(SalaryColumn::ExperienceLevel),
            Dimension::JobTitle => Some(SalaryColumn::JobTitle),
            Dimension::Location => Some(SalaryColumn::Location),
            Dimension::Role => None,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label_column())
    }
}

impl FromStr for Dimension {
    type Err = String;

    /// Accepts the snake_case column name or the camelCase route segment
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "employment_type" | "employmentType" | "employmentTypes" => Ok(Dimension::EmploymentType),
            "experience_level" | "experienceLevel" | "experienceLevels" => Ok(Dimension::ExperienceLevel),
            "job_title" | "jobTitle" | "jobTitles" => Ok(Dimension::JobTitle),
            "location" | "locations" => Ok(Dimension::Location),
            "role" | "roles" => Ok(Dimension::Role),
            other => Err(format!("unknown dimension '{}'", other)),
        }
    }
}

/// Foreign-key columns of the `salaries` table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalaryColumn {
    EmploymentType,
    ExperienceLevel,
    JobTitle,
    Location,
}

impl SalaryColumn {
    pub fn column_name(&self) -> &'static str {
        match self {
            SalaryColumn::EmploymentType => "employment_type",
            SalaryColumn::ExperienceLevel => "experience_level",
            SalaryColumn::JobTitle => "job_title",
            SalaryColumn::Location => "location",
        }
    }
}

/// Equality constraint `salaries.<column> = <id>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Predicate {
    pub column: SalaryColumn,
    pub id: i64,
}

impl Predicate {
    pub fn new(column: SalaryColumn, id: i64) -> Self {
        Self { column, id }
    }
}
