mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

use common::{post_json, send, Survey};
use salary_survey_api::types::Dimension;

const AVERAGE: &str = "/api/salaries/average-salary";

/// Engineers and analysts across two countries and two seniorities
async fn seeded() -> Result<Survey> {
    let survey = Survey::empty().await?;
    let junior = survey.label(Dimension::ExperienceLevel, "Junior").await?;
    let senior = survey.label(Dimension::ExperienceLevel, "Senior").await?;
    let engineer = survey.label(Dimension::JobTitle, "Data Engineer").await?;
    let analyst = survey.label(Dimension::JobTitle, "Data Analyst").await?;
    let spain = survey.label(Dimension::Location, "Spain").await?;
    let chile = survey.label(Dimension::Location, "Chile").await?;

    survey.salary(100, engineer, Some(spain), Some(senior)).await?;
    survey.salary(200, engineer, Some(spain), Some(senior)).await?;
    survey.salary(300, engineer, Some(chile), Some(senior)).await?;
    survey.salary(40, analyst, Some(spain), Some(junior)).await?;
    survey.salary(60, analyst, None, None).await?;
    Ok(survey)
}

#[tokio::test]
async fn senior_scenario_averages_three_rows() -> Result<()> {
    let survey = Survey::empty().await?;
    let senior = survey.label(Dimension::ExperienceLevel, "Senior").await?;
    let title = survey.label(Dimension::JobTitle, "Data Scientist").await?;
    for amount in [100, 200, 300] {
        survey.salary(amount, title, None, Some(senior)).await?;
    }

    let (status, body) = post_json(&survey.router(), AVERAGE, r#"{"experienceLevel":"Senior"}"#).await;
    assert_eq!(status, StatusCode::OK, "body: {}", body);
    assert_eq!(body["averageSalary"], json!(200.0));
    assert_eq!(body["sampleSize"], json!(3));
    assert_eq!(body["currency"], json!("USD"));
    assert_eq!(
        body["filters"],
        json!({ "jobTitle": null, "location": null, "experienceLevel": "Senior" })
    );
    Ok(())
}

#[tokio::test]
async fn all_three_filters_are_conjunctive() -> Result<()> {
    let router = seeded().await?.router();
    let (status, body) = post_json(
        &router,
        AVERAGE,
        r#"{"area":"Data Engineer","location":"Spain","experienceLevel":"Senior"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sampleSize"], json!(2));
    assert_eq!(body["averageSalary"], json!(150.0));
    assert_eq!(body["filters"]["jobTitle"], json!("Data Engineer"));
    Ok(())
}

#[tokio::test]
async fn no_filters_is_the_global_average() -> Result<()> {
    let router = seeded().await?.router();
    let (status, body) = post_json(&router, AVERAGE, "{}").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sampleSize"], json!(5));
    assert_eq!(body["averageSalary"], json!(140.0));
    Ok(())
}

#[tokio::test]
async fn missing_body_is_the_global_average() -> Result<()> {
    let router = seeded().await?.router();
    let (status, body) = send(&router, "POST", AVERAGE, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sampleSize"], json!(5));
    Ok(())
}

#[tokio::test]
async fn unknown_job_title_is_silently_dropped() -> Result<()> {
    let router = seeded().await?.router();
    let (_, unfiltered) = post_json(&router, AVERAGE, "{}").await;
    let (status, unknown) = post_json(&router, AVERAGE, r#"{"area":"Nonexistent Title"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(unknown["averageSalary"], unfiltered["averageSalary"]);
    assert_eq!(unknown["sampleSize"], unfiltered["sampleSize"]);
    assert_eq!(unknown["filters"]["jobTitle"], json!("Nonexistent Title"));
    Ok(())
}

#[tokio::test]
async fn unresolved_values_fall_back_to_global() -> Result<()> {
    let router = seeded().await?.router();
    let (_, body) = post_json(
        &router,
        AVERAGE,
        r#"{"area":"data engineer","location":"","experienceLevel":"Principal"}"#,
    )
    .await;
    assert_eq!(body["sampleSize"], json!(5));
    Ok(())
}

#[tokio::test]
async fn empty_store_returns_zero_with_success() -> Result<()> {
    let survey = Survey::empty().await?;
    survey.label(Dimension::ExperienceLevel, "Senior").await?;

    let (status, body) = post_json(
        &survey.router(),
        AVERAGE,
        r#"{"area":"Data Engineer","experienceLevel":"Senior"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["averageSalary"], json!(0.0));
    assert_eq!(body["sampleSize"], json!(0));
    Ok(())
}

#[tokio::test]
async fn averages_are_rounded_to_cents() -> Result<()> {
    let survey = Survey::empty().await?;
    let title = survey.label(Dimension::JobTitle, "BI Analyst").await?;
    for amount in [1, 1, 2] {
        survey.salary(amount, title, None, None).await?;
    }

    let (_, body) = post_json(&survey.router(), AVERAGE, r#"{"area":"BI Analyst"}"#).await;
    let average = body["averageSalary"].as_f64().unwrap_or_default();
    assert!((average - 1.33).abs() < 1e-9, "average was {}", average);
    assert_eq!(body["sampleSize"], json!(3));
    Ok(())
}

#[tokio::test]
async fn malformed_body_is_a_bad_request() -> Result<()> {
    let router = seeded().await?.router();
    let (status, body) = post_json(&router, AVERAGE, r#"{"area": "#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap_or_default().starts_with("Invalid JSON body"));
    Ok(())
}

#[tokio::test]
async fn store_failure_is_a_500_with_error() -> Result<()> {
    let router = common::router_for(common::broken_state());

    let (status, body) = post_json(&router, AVERAGE, r#"{"area":"Data Engineer"}"#).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Query error: database is locked" }));
    Ok(())
}

#[tokio::test]
async fn sums_past_i64_still_average() -> Result<()> {
    let survey = Survey::empty().await?;
    let title = survey.label(Dimension::JobTitle, "Founder").await?;
    survey.salary(i64::MAX, title, None, None).await?;
    survey.salary(i64::MAX - 1, title, None, None).await?;

    let (status, body) = post_json(&survey.router(), AVERAGE, r#"{"area":"Founder"}"#).await;
    assert_eq!(status, StatusCode::OK, "body: {}", body);
    assert_eq!(body["sampleSize"], json!(2));
    assert!(body["averageSalary"].as_f64().unwrap_or_default() > 9.2e18);
    Ok(())
}
