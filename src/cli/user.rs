use oneday::Config;

pub async fn add(config: &Config, name: String, email: String) -> anyhow::Result<()> {
    let pool = oneday::create_pool(&config.database.url, 1).await?;
    let command = oneday_user::Command(oneday_shared::State::single(pool.clone()));

    match command
        .register(oneday_user::RegisterInput {
            name,
            email: email.to_owned(),
        })
        .await
    {
        Ok(id) => tracing::info!(user_id = %id, "{email} registered"),
        Err(oneday_shared::Error::Conflict(_)) => tracing::error!("{email} is already registered"),
        Err(err) => {
            pool.close().await;
            return Err(err.into());
        }
    }

    pool.close().await;

    Ok(())
}
