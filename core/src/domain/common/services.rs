use crate::domain::{
    assessment::ports::{ImageFetcher, LLMClient},
    diagnostics::ports::DiagnosticsRepository,
    health::ports::HealthCheckRepository,
    record::ports::RecordRepository,
    storage::ports::ObjectStoragePort,
};

/// Holds every outbound port. Each domain implements its service trait for
/// this struct in its own `services.rs`.
#[derive(Clone)]
pub struct Service<RR, LLM, IF, OS, HC, DG>
where
    RR: RecordRepository,
    LLM: LLMClient,
    IF: ImageFetcher,
    OS: ObjectStoragePort,
    HC: HealthCheckRepository,
    DG: DiagnosticsRepository,
{
    pub(crate) record_repository: RR,
    pub(crate) llm_client: LLM,
    pub(crate) image_fetcher: IF,
    pub(crate) object_storage: OS,
    pub(crate) health_check_repository: HC,
    pub(crate) diagnostics_repository: DG,
}

impl<RR, LLM, IF, OS, HC, DG> Service<RR, LLM, IF, OS, HC, DG>
where
    RR: RecordRepository,
    LLM: LLMClient,
    IF: ImageFetcher,
    OS: ObjectStoragePort,
    HC: HealthCheckRepository,
    DG: DiagnosticsRepository,
{
    pub fn new(
        record_repository: RR,
        llm_client: LLM,
        image_fetcher: IF,
        object_storage: OS,
        health_check_repository: HC,
        diagnostics_repository: DG,
    ) -> Self {
        Self {
            record_repository,
            llm_client,
            image_fetcher,
            object_storage,
            health_check_repository,
            diagnostics_repository,
        }
    }
}
