use std::time::Instant;

use chrono::Utc;
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};

use crate::domain::{
    common::entities::app_errors::CoreError,
    health::{
        entities::{DatabaseHealthStatus, HealthState},
        ports::HealthCheckRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PostgresHealthCheckRepository {
    pub db: DatabaseConnection,
}

impl PostgresHealthCheckRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl HealthCheckRepository for PostgresHealthCheckRepository {
    async fn health(&self) -> Result<u64, CoreError> {
        let started = Instant::now();

        self.db
            .execute(Statement::from_string(
                self.db.get_database_backend(),
                "SELECT 1",
            ))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Database health check failed");
                CoreError::DatabaseError(e.to_string())
            })?;

        Ok(started.elapsed().as_millis() as u64)
    }

    async fn readiness(&self) -> Result<DatabaseHealthStatus, CoreError> {
        let status = match self.health().await {
            Ok(latency_ms) => DatabaseHealthStatus {
                status: HealthState::Up,
                latency_ms,
                checked_at: Utc::now(),
            },
            Err(_) => DatabaseHealthStatus {
                status: HealthState::Down,
                latency_ms: 0,
                checked_at: Utc::now(),
            },
        };

        Ok(status)
    }
}
