use std::time::{Duration, Instant};

use crate::domain::{
    assessment::ports::{ImageFetcher, LLMClient},
    common::{entities::app_errors::CoreError, services::Service},
    diagnostics::{
        entities::{
            ConnectionSummary, DatabaseProbeReport, NetworkProbeResult, ProbeKind, ProbeResult,
        },
        ports::{DiagnosticsRepository, DiagnosticsService},
    },
    health::ports::HealthCheckRepository,
    record::ports::RecordRepository,
    storage::ports::ObjectStoragePort,
};

pub const NETWORK_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

impl<RR, LLM, IF, OS, HC, DG> DiagnosticsService for Service<RR, LLM, IF, OS, HC, DG>
where
    RR: RecordRepository,
    LLM: LLMClient,
    IF: ImageFetcher,
    OS: ObjectStoragePort,
    HC: HealthCheckRepository,
    DG: DiagnosticsRepository,
{
    async fn database_probe(&self) -> Result<DatabaseProbeReport, CoreError> {
        let mut probes = Vec::with_capacity(ProbeKind::ALL.len());

        for kind in ProbeKind::ALL {
            let started = Instant::now();
            let outcome = self.diagnostics_repository.run_probe(kind).await;
            let duration_ms = started.elapsed().as_millis() as u64;

            let probe = match outcome {
                Ok(row) => {
                    tracing::info!(probe = kind.name(), duration_ms, "Database probe passed");
                    ProbeResult {
                        name: kind.name().to_string(),
                        success: true,
                        duration_ms,
                        result: Some(row),
                        error: None,
                    }
                }
                Err(e) => {
                    tracing::warn!(probe = kind.name(), duration_ms, error = %e, "Database probe failed");
                    ProbeResult {
                        name: kind.name().to_string(),
                        success: false,
                        duration_ms,
                        result: None,
                        error: Some(e.to_string()),
                    }
                }
            };
            probes.push(probe);
        }

        let passed = probes.iter().filter(|p| p.success).count();

        Ok(DatabaseProbeReport {
            success: passed > 0,
            passed,
            total: probes.len(),
            probes,
        })
    }

    async fn network_probe(&self) -> Result<NetworkProbeResult, CoreError> {
        let summary = self.diagnostics_repository.connection_summary();
        let started = tokio::time::Instant::now();

        let outcome = tokio::time::timeout(
            NETWORK_PROBE_TIMEOUT,
            self.diagnostics_repository.tcp_connect(),
        )
        .await;
        let duration_ms = started.elapsed().as_millis() as u64;

        let (success, message, error) = match outcome {
            Ok(Ok(())) => (true, "Network connection successful", None),
            Ok(Err(e)) => (false, "Network connection failed", Some(e.to_string())),
            Err(_) => (false, "Network connection timeout", None),
        };

        tracing::info!(
            host = %summary.host,
            port = summary.port,
            success,
            duration_ms,
            "Network probe finished"
        );

        Ok(NetworkProbeResult {
            success,
            message: message.to_string(),
            host: summary.host,
            port: summary.port,
            duration_ms,
            error,
        })
    }

    fn connection_summary(&self) -> ConnectionSummary {
        self.diagnostics_repository.connection_summary()
    }
}
