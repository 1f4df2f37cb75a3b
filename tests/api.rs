use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use base64::{Engine, engine::general_purpose::STANDARD};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use temp_dir::TempDir;
use tower::ServiceExt;

mod common;

use common::{send, setup_app};

const USER: &str = "01JUSER0000000000000000000";

#[tokio::test]
async fn test_health_endpoints() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let (app, _) = setup_app(&dir).await?;

    let (status, body) = send(&app, Method::GET, "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, _) = send(&app, Method::GET, "/ready", None).await?;
    assert_eq!(status, StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn test_users() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let (app, _) = setup_app(&dir).await?;
    let user = json!({ "name": "Mina", "email": "mina@example.com" });

    let (status, body) = send(&app, Method::POST, "/api/users", Some(user.clone())).await?;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_str().unwrap_or_default().to_owned();

    let (status, body) = send(&app, Method::GET, &format!("/api/users/{id}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "mina@example.com");

    let (status, body) = send(&app, Method::POST, "/api/users", Some(user)).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Conflict");

    let (status, body) = send(&app, Method::GET, "/api/users/unknown", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NotFound");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/users",
        Some(json!({ "name": "", "email": "not-an-email" })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["email"].is_string());

    Ok(())
}

#[tokio::test]
async fn test_schedule_lifecycle() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let (app, _) = setup_app(&dir).await?;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/schedules",
        Some(json!({
            "userId": USER,
            "title": "Gym",
            "startDate": "2024-03-04",
            "endDate": "2024-03-17",
            "selectedDays": [1, 3, 5],
            "time": "07:00",
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["count"], 6);
    let series_id = body["seriesId"].as_str().unwrap_or_default().to_owned();

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/schedules?userId={USER}&from=2024-03-04&to=2024-03-10"),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().cloned().unwrap_or_default();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["date"], "2024-03-04");

    let id = rows[0]["id"].as_str().unwrap_or_default().to_owned();
    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/schedules/{id}/completed"),
        Some(json!({ "completed": true })),
    )
    .await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/api/schedules/series/{series_id}"),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], 6);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/schedules/{id}"), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_schedule_rejections() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let (app, _) = setup_app(&dir).await?;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/schedules",
        Some(json!({ "userId": USER, "startDate": "2024-03-04" })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "ValidationFailed");
    assert!(body["details"]["title"].is_string());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/schedules",
        Some(json!({
            "userId": USER,
            "title": "Gym",
            "startDate": "2024-03-04",
            "selectedDays": [1],
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "InvalidInput");

    let (_, body) = send(
        &app,
        Method::GET,
        &format!("/api/schedules?userId={USER}&from=2024-01-01&to=2024-12-31"),
        None,
    )
    .await?;
    assert_eq!(body, json!([]));

    Ok(())
}

#[tokio::test]
async fn test_template_apply() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let (app, _) = setup_app(&dir).await?;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/templates",
        Some(json!({ "userId": USER, "title": "Yoga", "color": "#88cc00" })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_str().unwrap_or_default().to_owned();

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/templates/{id}/apply"),
        Some(json!({ "startDate": "2024-03-05", "selectedDates": ["2024-03-05", "2024-03-07"] })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["count"], 2);

    let (_, body) = send(
        &app,
        Method::GET,
        &format!("/api/templates?userId={USER}"),
        None,
    )
    .await?;
    assert_eq!(body[0]["title"], "Yoga");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/templates/missing/apply",
        Some(json!({ "startDate": "2024-03-05" })),
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_todo_toggle() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let (app, _) = setup_app(&dir).await?;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/todos",
        Some(json!({ "userId": USER, "title": "Laundry", "startDate": "2024-04-06" })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = send(
        &app,
        Method::GET,
        &format!("/api/todos?userId={USER}&from=2024-04-06&to=2024-04-06"),
        None,
    )
    .await?;
    let id = body[0]["id"].as_str().unwrap_or_default().to_owned();

    let (_, body) = send(&app, Method::PUT, &format!("/api/todos/{id}/toggle"), None).await?;
    assert_eq!(body["completed"], true);
    let (_, body) = send(&app, Method::PUT, &format!("/api/todos/{id}/toggle"), None).await?;
    assert_eq!(body["completed"], false);

    let (status, _) = send(&app, Method::PUT, "/api/todos/missing/toggle", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_cycle_prediction() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let (app, _) = setup_app(&dir).await?;
    let uri = format!("/api/cycles?userId={USER}");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/cycles",
        Some(json!({ "userId": USER, "startDate": "2024-01-01", "endDate": "2024-01-05" })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = send(&app, Method::GET, &uri, None).await?;
    assert_eq!(body["prediction"], Value::Null);
    assert_eq!(body["history"].as_array().map(Vec::len), Some(1));

    send(
        &app,
        Method::POST,
        "/api/cycles",
        Some(json!({ "userId": USER, "startDate": "2024-01-29", "endDate": "2024-02-02" })),
    )
    .await?;

    let (_, body) = send(&app, Method::GET, &uri, None).await?;
    assert_eq!(body["prediction"]["startDate"], "2024-02-26");
    assert_eq!(body["prediction"]["endDate"], "2024-03-01");
    assert_eq!(body["history"][0]["startDate"], "2024-01-29");

    let (_, body) = send(&app, Method::GET, &format!("{uri}&today=2024-02-20"), None).await?;
    assert_eq!(body["prediction"]["dDay"], 6);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/cycles",
        Some(json!({ "userId": USER, "startDate": "2024-03-05", "endDate": "2024-03-01" })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "InvalidInput");

    Ok(())
}

#[tokio::test]
async fn test_day_draft_is_persisted_on_flush() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let (app, _) = setup_app(&dir).await?;
    let day = format!("userId={USER}&date=2024-05-02");

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/days",
        Some(json!({
            "userId": USER,
            "date": "2024-05-02",
            "steps": 8000,
            "meals": [{
                "mealType": "breakfast",
                "foods": [{ "name": "Oatmeal", "grams": 80.0, "calories": 300.0 }],
            }],
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::ACCEPTED);

    let (_, body) = send(&app, Method::GET, &format!("/api/days?{day}"), None).await?;
    assert_eq!(body["steps"], 8000);

    let (_, body) = send(&app, Method::GET, &format!("/api/steps?{day}"), None).await?;
    assert_eq!(body["steps"], 0);

    let (_, body) = send(&app, Method::POST, "/api/days/flush", None).await?;
    assert_eq!(body["flushed"], 1);

    let (_, body) = send(&app, Method::GET, &format!("/api/steps?{day}"), None).await?;
    assert_eq!(body["steps"], 8000);

    let (_, body) = send(&app, Method::GET, &format!("/api/meals?{day}"), None).await?;
    assert_eq!(body["meals"][0]["mealType"], "breakfast");
    assert_eq!(body["totals"]["calories"], 300.0);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/days?{day}"), None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, Method::GET, &format!("/api/days?{day}"), None).await?;
    assert_eq!(body["steps"], 8000);
    assert_eq!(body["meals"][0]["foods"][0]["name"], "Oatmeal");

    Ok(())
}

#[tokio::test]
async fn test_invalid_day_draft_is_rejected() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let (app, _) = setup_app(&dir).await?;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/days",
        Some(json!({
            "userId": USER,
            "date": "2024-05-02",
            "meals": [{ "mealType": "lunch", "foods": [{ "name": "", "grams": -5.0 }] }],
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "ValidationFailed");

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/days",
        Some(json!({ "userId": "", "date": "2024-05-02", "steps": 10 })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/days",
        Some(json!({ "userId": "01JOTHER", "date": "2024-05-02", "steps": 4000 })),
    )
    .await?;
    assert_eq!(status, StatusCode::ACCEPTED);

    let (status, body) = send(&app, Method::POST, "/api/days/flush", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["flushed"], 1);

    let (_, body) = send(
        &app,
        Method::GET,
        &format!("/api/days?userId={USER}&date=2024-05-02"),
        None,
    )
    .await?;
    assert_eq!(body["meals"], json!([]));

    Ok(())
}

#[tokio::test]
async fn test_malformed_requests_get_error_body() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let (app, _) = setup_app(&dir).await?;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/schedules",
        Some(json!({
            "userId": USER,
            "title": "Gym",
            "startDate": "2024-13-40",
            "startTime": "07:00",
            "endTime": "08:00",
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "InvalidInput");
    assert!(body["message"].is_string());

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/steps?userId={USER}&date=yesterday"),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "InvalidInput");

    Ok(())
}

#[tokio::test]
async fn test_diaries() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let (app, _) = setup_app(&dir).await?;

    let mut png = b"\x89PNG\r\n\x1a\n".to_vec();
    png.extend_from_slice(b"IHDR");

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/diaries",
        Some(json!({
            "userId": USER,
            "date": "2024-05-02",
            "title": "Rainy day",
            "content": "Stayed in.",
            "canvas": format!("data:image/png;base64,{}", STANDARD.encode(&png)),
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    let id = body["id"].as_str().unwrap_or_default().to_owned();

    let (_, body) = send(
        &app,
        Method::GET,
        &format!("/api/diaries?userId={USER}&date=2024-05-02"),
        None,
    )
    .await?;
    assert_eq!(body["title"], "Rainy day");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/diaries/{id}/canvas"))
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
    assert_eq!(response.into_body().collect().await?.to_bytes(), png);

    let (_, body) = send(
        &app,
        Method::GET,
        &format!("/api/diaries/month?userId={USER}&year=2024&month=5"),
        None,
    )
    .await?;
    assert_eq!(body.as_array().map(Vec::len), Some(1));

    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/api/diaries/month?userId={USER}&year=2024&month=13"),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/diaries/{id}"), None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/api/diaries?userId={USER}&date=2024-05-02"),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_stopwatch_summary() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let (app, _) = setup_app(&dir).await?;

    for (task, category, started, ended) in [
        ("Reading", "study", "2024-05-02T09:00:00Z", "2024-05-02T09:30:00Z"),
        ("Coding", "work", "2024-05-02T10:00:00Z", "2024-05-02T12:00:00Z"),
        ("Notes", "study", "2024-05-02T13:00:00Z", "2024-05-02T13:15:00Z"),
    ] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/stopwatch",
            Some(json!({
                "userId": USER,
                "task": task,
                "category": category,
                "startedAt": started,
                "endedAt": ended,
            })),
        )
        .await?;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, body) = send(
        &app,
        Method::GET,
        &format!("/api/stopwatch?userId={USER}&date=2024-05-02"),
        None,
    )
    .await?;
    assert_eq!(body["totalSecs"], 9900);
    assert_eq!(body["categories"][0]["category"], "work");
    assert_eq!(body["categories"][1]["totalSecs"], 2700);
    assert_eq!(body["categories"][1]["sessions"], 2);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/stopwatch",
        Some(json!({
            "userId": USER,
            "task": "Backwards",
            "startedAt": "2024-05-02T10:00:00Z",
            "endedAt": "2024-05-02T09:00:00Z",
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    Ok(())
}
