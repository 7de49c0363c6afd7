use crate::config::DatabaseConfig;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};

pub async fn create_pool(database: &DatabaseConfig, max_connections: u32) -> anyhow::Result<MySqlPool> {
    let pool = MySqlPoolOptions::new()
        .max_connections(max_connections)
        .connect_with(database.connect_options()?)
        .await?;
    Ok(pool)
}
