use oneday_shared::Error;
use oneday_user::{Command, FindType, Query, RegisterInput};
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn test_register_and_find() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let command = Command(state.clone());
    let query = Query(state.read_db.clone());

    let id = command
        .register(RegisterInput {
            name: "Jane".to_owned(),
            email: "Jane@OneDay.localhost".to_owned(),
        })
        .await?;

    let user = query.find(FindType::Id(id.to_owned())).await?.unwrap();
    assert_eq!(user.name, "Jane");
    assert_eq!(user.email, "jane@oneday.localhost");

    let by_email = query
        .find(FindType::Email("jane@oneday.localhost".to_owned()))
        .await?
        .unwrap();
    assert_eq!(by_email.id, id);

    Ok(())
}

#[tokio::test]
async fn test_register_duplicate_email_is_conflict() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let command = Command(state);

    command
        .register(RegisterInput {
            name: "Jane".to_owned(),
            email: "jane@oneday.localhost".to_owned(),
        })
        .await?;

    let err = command
        .register(RegisterInput {
            name: "Other Jane".to_owned(),
            email: "jane@oneday.localhost".to_owned(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Conflict(_)));

    Ok(())
}

#[tokio::test]
async fn test_register_invalid_email() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;

    let err = Command(state)
        .register(RegisterInput {
            name: "Jane".to_owned(),
            email: "not-an-email".to_owned(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Validate(_)));

    Ok(())
}
