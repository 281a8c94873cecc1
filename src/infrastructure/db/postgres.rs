use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};

const MAX_ATTEMPTS: u32 = 5;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens the shared pool, retrying with doubling backoff so startup
/// survives the database coming up slightly later than the server.
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let mut backoff = Duration::from_secs(2);
    let mut attempt = 1;

    loop {
        match PgPoolOptions::new()
            .max_connections(20)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect(database_url)
            .await
        {
            Ok(pool) => {
                tracing::info!("database pool ready after {attempt} attempt(s)");
                return Ok(pool);
            }
            Err(err) if attempt < MAX_ATTEMPTS => {
                tracing::warn!(
                    "database connect attempt {attempt}/{MAX_ATTEMPTS} failed: {err}, retrying in {}s",
                    backoff.as_secs()
                );
                tokio::time::sleep(backoff).await;
                backoff *= 2;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
