use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use oneday::AppState;
use serde_json::Value;
use temp_dir::TempDir;
use tower::ServiceExt;

pub async fn setup_app(dir: &TempDir) -> anyhow::Result<(Router, AppState)> {
    let path = dir.child("db.sqlite3");
    let pool = oneday::create_pool(&format!("sqlite:{}", path.display()), 1).await?;
    oneday::migrate(&pool).await?;

    let state = AppState::new(
        oneday_shared::State::single(pool),
        dir.child("canvas"),
        Duration::from_secs(60),
    );

    Ok((oneday::router(state.clone()), state))
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> anyhow::Result<(StatusCode, Value)> {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body)?))?,
        None => request.body(Body::empty())?,
    };

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = response.into_body().collect().await?.to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };

    Ok((status, json))
}
