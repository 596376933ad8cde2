#[macro_use]
extern crate rocket;

use std::sync::Arc;

use skywings_booking::config::{init_tracing, AppConfig, StorageBackend};
use skywings_booking::db::Database;
use skywings_booking::realtime::ChangeFeed;
use skywings_booking::repository::memory::InMemoryRepository;
use skywings_booking::repository::mysql::MySqlRepository;
use skywings_booking::repository::seed::{seed_demo_data, seed_mysql_if_empty};
use skywings_booking::repository::BookingRepository;
use skywings_booking::{build_rocket, AppState};

#[launch]
async fn rocket() -> _ {
    let config = AppConfig::from_env().expect("invalid configuration");
    init_tracing(&config.log_filter);

    let repository: Arc<dyn BookingRepository> = match &config.storage {
        StorageBackend::MySql(db_config) => {
            // Connect to the database
            let database = Database::connect(db_config)
                .await
                .expect("Failed to connect to database");
            database
                .ensure_schema()
                .await
                .expect("Failed to create database schema");

            let repository = MySqlRepository::new(database.get_pool().clone());
            if config.seed_demo_data {
                if let Err(e) = seed_mysql_if_empty(&repository).await {
                    tracing::warn!(error = ?e, "failed to seed demo schedule");
                }
            }
            Arc::new(repository)
        }
        StorageBackend::Memory => {
            let repository = InMemoryRepository::new();
            if config.seed_demo_data {
                seed_demo_data(&repository).await;
            }
            Arc::new(repository)
        }
    };

    let feed = ChangeFeed::new(config.realtime_buffer);
    let state = AppState::new(repository, feed, config.auth.clone());

    build_rocket(state)
}
