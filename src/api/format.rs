use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::database::models::{NewSalary, ReferenceEntity, SalaryPatch};
use crate::services::{AggregationResult, FilterCriteria, FilterOptions};
use crate::types::Dimension;

/// Body of POST /api/salaries/average-salary. `area` is the job title text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AverageSalaryRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<String>,
}

/// Parse a JSON request body; an empty body or a JSON `null` is `T::default()`
pub fn parse_body<T: DeserializeOwned + Default>(body: &[u8]) -> Result<T, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    Ok(serde_json::from_slice::<Option<T>>(body)?.unwrap_or_default())
}

impl AverageSalaryRequest {
    /// An empty body or a JSON `null` means no filters
    pub fn from_body(body: &[u8]) -> Result<Self, serde_json::Error> {
        parse_body(body)
    }
}

impl From<AverageSalaryRequest> for FilterCriteria {
    fn from(req: AverageSalaryRequest) -> Self {
        FilterCriteria {
            job_title_text: req.area,
            location_text: req.location,
            experience_level_text: req.experience_level,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterEcho {
    pub job_title: Option<String>,
    pub location: Option<String>,
    pub experience_level: Option<String>,
}

impl From<FilterCriteria> for FilterEcho {
    fn from(criteria: FilterCriteria) -> Self {
        Self {
            job_title: criteria.job_title_text,
            location: criteria.location_text,
            experience_level: criteria.experience_level_text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AverageSalaryResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub average_salary: Decimal,
    pub sample_size: i64,
    pub currency: String,
    pub filters: FilterEcho,
}

impl From<AggregationResult> for AverageSalaryResponse {
    fn from(result: AggregationResult) -> Self {
        Self {
            average_salary: result.average_usd,
            sample_size: result.sample_size,
            currency: result.currency.to_string(),
            filters: result.echoed_filters.into(),
        }
    }
}

/// `positions` repeats `areas` for clients using either name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptionsResponse {
    pub areas: Vec<String>,
    pub locations: Vec<String>,
    pub positions: Vec<String>,
    pub experience_levels: Vec<String>,
}

impl From<FilterOptions> for FilterOptionsResponse {
    fn from(options: FilterOptions) -> Self {
        Self {
            positions: options.job_titles.clone(),
            areas: options.job_titles,
            locations: options.locations,
            experience_levels: options.experience_levels,
        }
    }
}

/// Survey year as sent by clients; spreadsheets give numbers, forms give text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum YearValue {
    Number(i64),
    Text(String),
}

impl From<YearValue> for String {
    fn from(year: YearValue) -> Self {
        match year {
            YearValue::Number(n) => n.to_string(),
            YearValue::Text(text) => text,
        }
    }
}

/// Body of POST /api/salaries. Reference fields are ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSalaryRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<YearValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_in_usd: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<i64>,
}

impl CreateSalaryRequest {
    /// Names of the required fields the body left out, in field order
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("year", self.year.is_none()),
            ("salary_in_usd", self.salary_in_usd.is_none()),
            ("employment_type", self.employment_type.is_none()),
            ("job_title", self.job_title.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, missing)| missing.then_some(name))
        .collect()
    }

    /// `Err` lists the missing required fields
    pub fn into_new_salary(self) -> Result<NewSalary, Vec<&'static str>> {
        match (self.year, self.salary_in_usd, self.employment_type, self.job_title) {
            (Some(year), Some(salary_in_usd), Some(employment_type), Some(job_title)) => Ok(NewSalary {
                year: year.into(),
                salary_in_usd,
                employment_type: Some(employment_type),
                job_title,
                location: self.location,
                experience_level: self.experience_level,
            }),
            (year, salary_in_usd, employment_type, job_title) => Err(CreateSalaryRequest {
                year,
                salary_in_usd,
                employment_type,
                job_title,
                ..Default::default()
            }
            .missing_fields()),
        }
    }
}

/// Present-but-null stays distinguishable from absent
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Body of PUT /api/salaries/:id. Absent fields are left unchanged; `null`
/// clears the nullable references.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateSalaryRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<YearValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_in_usd: Option<i64>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<Option<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<i64>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub location: Option<Option<i64>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<Option<i64>>,
}

impl From<UpdateSalaryRequest> for SalaryPatch {
    fn from(req: UpdateSalaryRequest) -> Self {
        SalaryPatch {
            year: req.year.map(String::from),
            salary_in_usd: req.salary_in_usd,
            employment_type: req.employment_type,
            job_title: req.job_title,
            location: req.location,
            experience_level: req.experience_level,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupResponse {
    pub dimension: Dimension,
    pub query: String,
    pub matches: Vec<ReferenceEntity>,
}
