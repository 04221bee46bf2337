use crate::{
    domain::common::{HealthTrackConfig, entities::app_errors::CoreError, services::Service},
    infrastructure::{
        db::postgres::{Postgres, PostgresConfig},
        diagnostics::postgres_diagnostics::PostgresDiagnosticsRepository,
        health::repository::PostgresHealthCheckRepository,
        image::http_image_fetcher::HttpImageFetcher,
        llm::gemini_client::GeminiLLMClient,
        object_storage::s3::S3ObjectStorage,
        record::repositories::record_repository::PostgresRecordRepository,
    },
};

pub type HealthTrackService = Service<
    PostgresRecordRepository,
    GeminiLLMClient,
    HttpImageFetcher,
    S3ObjectStorage,
    PostgresHealthCheckRepository,
    PostgresDiagnosticsRepository,
>;

/// Connects to every backing service, applies migrations and wires the
/// adapters into one service value.
pub async fn create_service(config: HealthTrackConfig) -> Result<HealthTrackService, CoreError> {
    let postgres = Postgres::new(PostgresConfig {
        database_url: config.database.url(),
    })
    .await?;
    postgres.run_migrations().await?;

    let db = postgres.get_db();

    Ok(Service::new(
        PostgresRecordRepository::new(db.clone()),
        GeminiLLMClient::new(config.llm)?,
        HttpImageFetcher::new()?,
        S3ObjectStorage::new(config.object_storage),
        PostgresHealthCheckRepository::new(db.clone()),
        PostgresDiagnosticsRepository::new(db, config.database),
    ))
}
