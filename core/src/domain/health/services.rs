use crate::domain::{
    assessment::ports::{ImageFetcher, LLMClient},
    common::{entities::app_errors::CoreError, services::Service},
    diagnostics::ports::DiagnosticsRepository,
    health::{
        entities::DatabaseHealthStatus,
        ports::{HealthCheckRepository, HealthCheckService},
    },
    record::ports::RecordRepository,
    storage::ports::ObjectStoragePort,
};

impl<RR, LLM, IF, OS, HC, DG> HealthCheckService for Service<RR, LLM, IF, OS, HC, DG>
where
    RR: RecordRepository,
    LLM: LLMClient,
    IF: ImageFetcher,
    OS: ObjectStoragePort,
    HC: HealthCheckRepository,
    DG: DiagnosticsRepository,
{
    async fn readiness(&self) -> Result<DatabaseHealthStatus, CoreError> {
        self.health_check_repository.readiness().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        health::entities::HealthState,
        test_support::{StaticHealth, health_service},
    };

    #[tokio::test]
    async fn readiness_reports_database_up() {
        let service = health_service(StaticHealth::default());

        let status = service.readiness().await.unwrap();
        assert_eq!(status.status, HealthState::Up);
    }

    #[tokio::test]
    async fn readiness_reports_database_down() {
        let service = health_service(StaticHealth::down());

        let status = service.readiness().await.unwrap();
        assert_eq!(status.status, HealthState::Down);
        assert_eq!(status.latency_ms, 0);
    }
}
