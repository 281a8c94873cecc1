use anyhow::Context;

use portfolio_cms::auth_infra::password::hash_password;
use portfolio_cms::db::postgres::create_pool;
use portfolio_cms::settings::AppConfig;

/// Creates (or refreshes) the single admin account from ADMIN_NAME,
/// ADMIN_EMAIL and ADMIN_PASSWORD.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = AppConfig::new().context("failed to load configuration")?;
    let name = std::env::var("ADMIN_NAME").context("ADMIN_NAME must be set")?;
    let email = std::env::var("ADMIN_EMAIL").context("ADMIN_EMAIL must be set")?;
    let password = std::env::var("ADMIN_PASSWORD").context("ADMIN_PASSWORD must be set")?;

    let pool = create_pool(&config.database_url)
        .await
        .context("failed to connect to database")?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let hash = hash_password(&password).map_err(|e| anyhow::anyhow!(e.to_string()))?;
    sqlx::query(
        "INSERT INTO users (uuid, name, email, password)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT (email) DO UPDATE
         SET name = EXCLUDED.name, password = EXCLUDED.password, updated_at = NOW()",
    )
    .bind(uuid::Uuid::new_v4())
    .bind(&name)
    .bind(&email)
    .bind(&hash)
    .execute(&pool)
    .await?;

    tracing::info!("admin account ready for {}", email);
    Ok(())
}
