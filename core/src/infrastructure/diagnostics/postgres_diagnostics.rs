use sea_orm::{ConnectionTrait, DatabaseConnection, FromQueryResult, Statement};
use tokio::net::TcpStream;
use tracing::instrument;

use crate::domain::{
    common::{DatabaseConfig, entities::app_errors::CoreError},
    diagnostics::{
        entities::{ConnectionSummary, ProbeKind, describe_password},
        ports::DiagnosticsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PostgresDiagnosticsRepository {
    db: DatabaseConnection,
    config: DatabaseConfig,
}

impl PostgresDiagnosticsRepository {
    pub fn new(db: DatabaseConnection, config: DatabaseConfig) -> Self {
        Self { db, config }
    }
}

impl DiagnosticsRepository for PostgresDiagnosticsRepository {
    #[instrument(skip(self))]
    async fn run_probe(&self, kind: ProbeKind) -> Result<serde_json::Value, CoreError> {
        let statement = Statement::from_string(self.db.get_database_backend(), kind.sql());

        let row = serde_json::Value::find_by_statement(statement)
            .one(&self.db)
            .await
            .map_err(|e| CoreError::DatabaseError(e.to_string()))?;

        row.ok_or_else(|| CoreError::DatabaseError(format!("{} probe returned no rows", kind.name())))
    }

    #[instrument(skip(self), fields(host = %self.config.host, port = self.config.port))]
    async fn tcp_connect(&self) -> Result<(), CoreError> {
        let address = (self.config.host.as_str(), self.config.port);

        let stream = TcpStream::connect(address)
            .await
            .map_err(|e| CoreError::ExternalServiceError(e.to_string()))?;

        drop(stream);
        Ok(())
    }

    fn connection_summary(&self) -> ConnectionSummary {
        ConnectionSummary {
            host: self.config.host.clone(),
            port: self.config.port,
            database: self.config.name.clone(),
            user: self.config.username.clone(),
            password: describe_password(&self.config.password),
        }
    }
}
