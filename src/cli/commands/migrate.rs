use crate::config::config;
use crate::database::DatabaseManager;

pub async fn handle() -> anyhow::Result<()> {
    let pool = DatabaseManager::connect(config()).await?;
    DatabaseManager::migrate(&pool).await?;
    pool.close().await;

    println!("Migrations applied");
    Ok(())
}
