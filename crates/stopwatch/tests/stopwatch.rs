use chrono::{DateTime, NaiveDate, Utc};
use oneday_shared::Error;
use oneday_stopwatch::{CategoryTotal, Command, Query, RecordInput};
use temp_dir::TempDir;

mod helpers;

const USER: &str = "01JUSER0000000000000000000";

fn at(s: &str) -> DateTime<Utc> {
    s.parse().unwrap()
}

fn session(task: &str, category: Option<&str>, start: &str, end: &str) -> RecordInput {
    RecordInput {
        user_id: USER.to_owned(),
        task: task.to_owned(),
        category: category.map(ToOwned::to_owned),
        started_at: at(start),
        ended_at: at(end),
        date: None,
    }
}

#[tokio::test]
async fn test_daily_summary_per_category() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let command = Command(state.clone());
    let query = Query(state.read_db.clone());

    command
        .record(session(
            "Rust book",
            Some("study"),
            "2024-03-04T09:00:00Z",
            "2024-03-04T10:30:00Z",
        ))
        .await?;
    command
        .record(session(
            "Run",
            Some("sport"),
            "2024-03-04T18:00:00Z",
            "2024-03-04T18:45:00Z",
        ))
        .await?;
    command
        .record(session(
            "Exercises",
            Some("study"),
            "2024-03-04T20:00:00Z",
            "2024-03-04T20:20:00Z",
        ))
        .await?;
    command
        .record(session(
            "Inbox",
            None,
            "2024-03-05T08:00:00Z",
            "2024-03-05T08:10:00Z",
        ))
        .await?;

    let date: NaiveDate = "2024-03-04".parse()?;
    let summary = query.summary(USER, date).await?;

    assert_eq!(summary.records.len(), 3);
    assert_eq!(summary.records[0].duration_secs, 5400);
    assert_eq!(summary.total_secs, 5400 + 2700 + 1200);
    assert_eq!(
        summary.categories,
        vec![
            CategoryTotal {
                category: Some("study".to_owned()),
                total_secs: 6600,
                sessions: 2,
            },
            CategoryTotal {
                category: Some("sport".to_owned()),
                total_secs: 2700,
                sessions: 1,
            },
        ]
    );

    Ok(())
}

#[tokio::test]
async fn test_record_rejects_reversed_times() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;

    let err = Command(state)
        .record(session(
            "Nap",
            None,
            "2024-03-04T14:00:00Z",
            "2024-03-04T13:00:00Z",
        ))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidInput(_)));

    Ok(())
}

#[tokio::test]
async fn test_delete_record() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let command = Command(state.clone());

    let id = command
        .record(RecordInput {
            date: Some("2024-03-03".parse()?),
            ..session(
                "Late reading",
                Some("study"),
                "2024-03-04T00:10:00Z",
                "2024-03-04T00:40:00Z",
            )
        })
        .await?;

    let query = Query(state.read_db.clone());
    assert_eq!(query.day(USER, "2024-03-03".parse()?).await?.len(), 1);

    command.delete(&id).await?;
    assert!(query.day(USER, "2024-03-03".parse()?).await?.is_empty());
    assert!(matches!(command.delete(&id).await.unwrap_err(), Error::NotFound));

    Ok(())
}
