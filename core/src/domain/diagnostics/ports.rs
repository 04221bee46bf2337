use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    diagnostics::entities::{
        ConnectionSummary, DatabaseProbeReport, NetworkProbeResult, ProbeKind,
    },
};

/// Low-level access to the configured database for troubleshooting.
#[cfg_attr(test, mockall::automock)]
pub trait DiagnosticsRepository: Send + Sync {
    /// Runs one probe query and returns its first row as JSON
    fn run_probe(
        &self,
        kind: ProbeKind,
    ) -> impl Future<Output = Result<serde_json::Value, CoreError>> + Send;

    /// Opens and closes a TCP connection to the database host. Callers bound
    /// the wait.
    fn tcp_connect(&self) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn connection_summary(&self) -> ConnectionSummary;
}

pub trait DiagnosticsService: Send + Sync {
    fn database_probe(&self) -> impl Future<Output = Result<DatabaseProbeReport, CoreError>> + Send;

    fn network_probe(&self) -> impl Future<Output = Result<NetworkProbeResult, CoreError>> + Send;

    fn connection_summary(&self) -> ConnectionSummary;
}
