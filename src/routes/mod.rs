mod cycles;
mod days;
mod diaries;
mod extract;
mod health;
mod meals;
mod schedules;
mod steps;
mod stopwatch;
mod templates;
mod todos;
mod users;

use std::{path::PathBuf, sync::Arc, time::Duration};

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use chrono::NaiveDate;
use oneday_daycache::{DayCache, MemoryMirror};
use oneday_diary::FsCanvasStore;
use oneday_health::{DayLog, DayLogSink};
use serde::Deserialize;
use sqlx::SqlitePool;

pub use health::{health, ready};

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub user_command: oneday_user::Command,
    pub schedule_command: oneday_schedule::Command,
    pub todo_command: oneday_todo::Command,
    pub health_command: oneday_health::Command,
    pub diary_command: oneday_diary::Command,
    pub stopwatch_command: oneday_stopwatch::Command,
    pub days: DayCache<DayLog>,
}

impl AppState {
    pub fn new(
        db: oneday_shared::State,
        canvas_dir: impl Into<PathBuf>,
        debounce: Duration,
    ) -> Self {
        let health_command = oneday_health::Command(db.clone());
        let days = DayCache::<DayLog>::new(
            Arc::new(MemoryMirror::default()),
            Arc::new(DayLogSink(health_command.clone())),
            debounce,
        );

        Self {
            pool: db.read_db.clone(),
            user_command: oneday_user::Command(db.clone()),
            schedule_command: oneday_schedule::Command(db.clone()),
            todo_command: oneday_todo::Command(db.clone()),
            diary_command: oneday_diary::Command::new(
                db.clone(),
                Arc::new(FsCanvasStore::new(canvas_dir)),
            ),
            stopwatch_command: oneday_stopwatch::Command(db),
            health_command,
            days,
        }
    }
}

/// `?userId=..&date=..`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DayParams {
    pub user_id: String,
    pub date: NaiveDate,
}

/// `?userId=..&from=..&to=..`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RangeParams {
    pub user_id: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserParams {
    pub user_id: String,
}

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/users", post(users::create))
        .route("/users/{id}", get(users::find))
        .route("/schedules", get(schedules::list).post(schedules::create))
        .route(
            "/schedules/{id}",
            put(schedules::update).delete(schedules::delete),
        )
        .route("/schedules/{id}/completed", put(schedules::set_completed))
        .route("/schedules/series/{series_id}", delete(schedules::delete_series))
        .route("/templates", get(templates::list).post(templates::create))
        .route("/templates/{id}", delete(templates::delete))
        .route("/templates/{id}/apply", post(templates::apply))
        .route("/todos", get(todos::list).post(todos::create))
        .route("/todos/{id}", put(todos::update).delete(todos::delete))
        .route("/todos/{id}/toggle", put(todos::toggle))
        .route("/todos/series/{series_id}", delete(todos::delete_series))
        .route("/cycles", get(cycles::history).post(cycles::add))
        .route("/cycles/{id}", delete(cycles::delete))
        .route("/steps", get(steps::day).put(steps::upsert))
        .route("/steps/range", get(steps::range))
        .route("/meals", get(meals::day).put(meals::replace))
        .route(
            "/days",
            get(days::read).put(days::write).delete(days::invalidate),
        )
        .route("/days/flush", post(days::flush))
        .route("/diaries", get(diaries::by_date).put(diaries::upsert))
        .route("/diaries/month", get(diaries::month))
        .route("/diaries/{id}", delete(diaries::delete))
        .route("/diaries/{id}/canvas", get(diaries::canvas))
        .route("/stopwatch", get(stopwatch::summary).post(stopwatch::record))
        .route("/stopwatch/{id}", delete(stopwatch::delete));

    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .with_state(state.pool.clone())
        .merge(Router::new().nest("/api", api).with_state(state))
}
