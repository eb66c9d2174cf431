use sqlx::mysql::{MySqlPool, MySqlPoolOptions};

/// Establish a connection pool using the `DATABASE_URL` environment variable
/// and apply any pending migrations.
pub async fn establish_connection() -> Result<MySqlPool, sqlx::Error> {
    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| sqlx::Error::Configuration("DATABASE_URL is not set".into()))?;

    let pool = MySqlPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;
    tracing::info!("Successfully connected to the database");

    // Run migrations automatically on startup
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations applied successfully");

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_database_url_is_an_error_not_a_panic() {
        let prev = std::env::var("DATABASE_URL").ok();
        unsafe {
            std::env::remove_var("DATABASE_URL");
        }

        let res = establish_connection().await;
        assert!(matches!(res, Err(sqlx::Error::Configuration(_))));

        if let Some(v) = prev {
            unsafe {
                std::env::set_var("DATABASE_URL", v);
            }
        }
    }
}
