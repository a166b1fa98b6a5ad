#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use salary_survey_api::config::AppConfig;
use salary_survey_api::database::models::{NewSalary, ReferenceEntity, SalaryPatch, SalaryView};
use salary_survey_api::database::{
    DatabaseError, DatabaseManager, ReferenceReader, SalaryAggregate, SalaryReader, SalaryStore, SqlRepository,
};
use salary_survey_api::server::{self, AppState};
use salary_survey_api::services::{RecordService, SalaryService};
use salary_survey_api::types::{Dimension, Predicate, SalaryColumn};

/// In-memory store seeded with a small survey
pub struct Survey {
    pub repo: SqlRepository,
}

impl Survey {
    pub async fn empty() -> Result<Self> {
        Ok(Self {
            repo: SqlRepository::new(DatabaseManager::in_memory().await?),
        })
    }

    pub async fn label(&self, dimension: Dimension, label: &str) -> Result<i64> {
        Ok(self.repo.insert_reference(dimension, label).await?)
    }

    /// Insert a salary row, returning its id
    pub async fn salary(&self, amount: i64, job_title: i64, location: Option<i64>, level: Option<i64>) -> Result<i64> {
        let record = self
            .repo
            .insert_salary(&NewSalary {
                year: "2024".into(),
                salary_in_usd: amount,
                job_title,
                location,
                experience_level: level,
                ..Default::default()
            })
            .await?;
        Ok(record.id)
    }

    pub fn router(&self) -> Router {
        router_for(AppState::from_repository(self.repo.clone()))
    }
}

pub fn router_for(state: AppState) -> Router {
    let mut config = AppConfig::development();
    config.api.enable_request_logging = false;
    server::app(state, &config.api)
}

/// State whose every store call fails
pub fn broken_state() -> AppState {
    let store = Arc::new(BrokenStore);
    AppState::new(SalaryService::new(store.clone(), store.clone()), RecordService::new(store))
}

/// Reference and salary reader that fails every call
pub struct BrokenStore;

fn broken() -> DatabaseError {
    DatabaseError::QueryError("database is locked".into())
}

#[async_trait]
impl ReferenceReader for BrokenStore {
    async fn list_all(&self, _dimension: Dimension) -> Result<Vec<ReferenceEntity>, DatabaseError> {
        Err(broken())
    }
}

#[async_trait]
impl SalaryReader for BrokenStore {
    async fn aggregate(&self, _predicates: &[Predicate]) -> Result<SalaryAggregate, DatabaseError> {
        Err(broken())
    }

    async fn distinct(&self, _column: SalaryColumn) -> Result<Vec<i64>, DatabaseError> {
        Err(broken())
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Err(broken())
    }
}

#[async_trait]
impl SalaryStore for BrokenStore {
    async fn list_records(&self) -> Result<Vec<SalaryView>, DatabaseError> {
        Err(broken())
    }

    async fn get_record(&self, _id: i64) -> Result<Option<SalaryView>, DatabaseError> {
        Err(broken())
    }

    async fn create_record(&self, _salary: &NewSalary) -> Result<SalaryView, DatabaseError> {
        Err(broken())
    }

    async fn update_record(&self, _id: i64, _patch: &SalaryPatch) -> Result<Option<SalaryView>, DatabaseError> {
        Err(broken())
    }

    async fn delete_record(&self, _id: i64) -> Result<bool, DatabaseError> {
        Err(broken())
    }
}

/// Send a request through the router and decode the JSON body
pub async fn send(router: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(raw) => {
            builder = builder.header("Content-Type", "application/json");
            Body::from(raw.to_string())
        }
        None => Body::empty(),
    };

    let response = router.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

pub async fn post_json(router: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
    send(router, "POST", uri, Some(body)).await
}

pub async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    send(router, "GET", uri, None).await
}

pub async fn put_json(router: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
    send(router, "PUT", uri, Some(body)).await
}

pub async fn delete(router: &Router, uri: &str) -> (StatusCode, Value) {
    send(router, "DELETE", uri, None).await
}

