use pr_shared::DatabaseConfig;

use crate::database::{DatabasePool, PoolStatistics};
use crate::InfrastructureError;

fn config_with_url(url: &str) -> DatabaseConfig {
    DatabaseConfig {
        url: url.to_string(),
        ..DatabaseConfig::default()
    }
}

#[tokio::test]
async fn test_invalid_url_is_config_error() {
    let result = DatabasePool::new(config_with_url("not-a-database-url")).await;

    assert!(matches!(result, Err(InfrastructureError::Config(_))));
}

#[test]
fn test_pool_statistics_display() {
    let stats = PoolStatistics {
        connections: 3,
        idle_connections: 2,
        max_connections: 10,
    };

    assert_eq!(stats.to_string(), "Pool Stats: 3/10 connections (2 idle)");
}

#[tokio::test]
#[ignore = "requires a running MySQL instance (DATABASE_URL)"]
async fn test_pool_connects_and_migrates() {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = DatabasePool::new(config_with_url(&url)).await.unwrap();

    pool.run_migrations().await.unwrap();

    let stats = pool.get_statistics();
    assert!(stats.connections >= 1);

    pool.close().await;
}
