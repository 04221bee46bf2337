//! In-memory port implementations shared by the service tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::{
    assessment::{
        entities::{AnalysisReport, ClarifyingAnswers, InlineImage},
        ports::{ImageFetcher, LLMClient},
    },
    common::{entities::app_errors::CoreError, services::Service},
    diagnostics::{
        entities::{ConnectionSummary, ProbeKind, describe_password},
        ports::DiagnosticsRepository,
    },
    health::{
        entities::{DatabaseHealthStatus, HealthState},
        ports::HealthCheckRepository,
    },
    intake::{entities::IntakeForm, value_objects::RawIntake},
    record::{
        entities::HealthRecord,
        ports::RecordRepository,
        value_objects::{OffsetLimit, RecordFilter},
    },
    storage::ports::ObjectStoragePort,
};

pub type TestService = Service<
    InMemoryRecords,
    ScriptedLlm,
    StubImageFetcher,
    RecordingStorage,
    StaticHealth,
    FakeDiagnostics,
>;

pub fn test_service(records: InMemoryRecords) -> TestService {
    test_service_with(records, FakeDiagnostics::default())
}

pub fn test_service_with(records: InMemoryRecords, diagnostics: FakeDiagnostics) -> TestService {
    Service::new(
        records,
        ScriptedLlm::default(),
        StubImageFetcher::default(),
        RecordingStorage::default(),
        StaticHealth::default(),
        diagnostics,
    )
}

pub fn assessment_service(
    records: InMemoryRecords,
    llm: ScriptedLlm,
    image_fetcher: StubImageFetcher,
) -> TestService {
    Service::new(
        records,
        llm,
        image_fetcher,
        RecordingStorage::default(),
        StaticHealth::default(),
        FakeDiagnostics::default(),
    )
}

pub fn health_service(health: StaticHealth) -> TestService {
    Service::new(
        InMemoryRecords::default(),
        ScriptedLlm::default(),
        StubImageFetcher::default(),
        RecordingStorage::default(),
        health,
        FakeDiagnostics::default(),
    )
}

pub fn sample_intake(image_url: Option<&str>) -> IntakeForm {
    IntakeForm::new(RawIntake {
        height: 170.0,
        weight: 60.0,
        tongue_body_color: "淡红色".to_string(),
        tongue_shape: "正常".to_string(),
        tongue_coating_color: "白苔".to_string(),
        tongue_coating_thickness: "薄苔".to_string(),
        image_url: image_url.map(str::to_string),
        ..Default::default()
    })
    .expect("sample intake is valid")
}

pub fn record_at(created_at: &str, device_id: Option<&str>) -> HealthRecord {
    let mut record = HealthRecord::new(
        &sample_intake(None),
        ClarifyingAnswers::new(),
        AnalysisReport::default(),
        false,
        device_id.map(str::to_string),
    );
    record.id = Uuid::new_v4();
    record.created_at = created_at.parse().expect("valid RFC 3339 timestamp");
    record
}

#[derive(Clone, Default)]
pub struct InMemoryRecords {
    records: Arc<Mutex<Vec<HealthRecord>>>,
    fail_writes: bool,
}

impl InMemoryRecords {
    pub fn with(records: Vec<HealthRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
            fail_writes: false,
        }
    }

    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Default::default()
        }
    }

    pub fn all(&self) -> Vec<HealthRecord> {
        self.records.lock().unwrap().clone()
    }

    fn matching(&self, filter: &RecordFilter) -> Vec<HealthRecord> {
        let mut matching: Vec<HealthRecord> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| {
                filter
                    .device_id
                    .as_ref()
                    .is_none_or(|d| r.device_id.as_ref() == Some(d))
            })
            .filter(|r| filter.created_after.is_none_or(|t| r.created_at >= t))
            .filter(|r| filter.created_before.is_none_or(|t| r.created_at < t))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matching
    }
}

impl RecordRepository for InMemoryRecords {
    async fn create(&self, record: HealthRecord) -> Result<HealthRecord, CoreError> {
        if self.fail_writes {
            return Err(CoreError::DatabaseError("connection refused".to_string()));
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn get_by_id(&self, record_id: Uuid) -> Result<Option<HealthRecord>, CoreError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == record_id)
            .cloned())
    }

    async fn list(
        &self,
        filter: RecordFilter,
        pagination: Option<OffsetLimit>,
    ) -> Result<Vec<HealthRecord>, CoreError> {
        let matching = self.matching(&filter);
        Ok(match pagination {
            Some(page) => matching
                .into_iter()
                .skip(page.offset as usize)
                .take(page.limit as usize)
                .collect(),
            None => matching,
        })
    }

    async fn count(&self, filter: RecordFilter) -> Result<i64, CoreError> {
        Ok(self.matching(&filter).len() as i64)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LlmCall {
    pub prompt: String,
    pub image: Option<InlineImage>,
}

/// Replies with queued responses in order.
#[derive(Clone, Default)]
pub struct ScriptedLlm {
    responses: Arc<Mutex<VecDeque<Result<String, CoreError>>>>,
    calls: Arc<Mutex<Vec<LlmCall>>>,
}

impl ScriptedLlm {
    pub fn replying(response: Result<&str, CoreError>) -> Self {
        let llm = Self::default();
        llm.responses
            .lock()
            .unwrap()
            .push_back(response.map(str::to_string));
        llm
    }

    pub fn calls(&self) -> Vec<LlmCall> {
        self.calls.lock().unwrap().clone()
    }

    fn next(&self, call: LlmCall) -> Result<String, CoreError> {
        self.calls.lock().unwrap().push(call);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(CoreError::ExternalServiceError("no scripted reply".into())))
    }
}

impl LLMClient for ScriptedLlm {
    async fn generate_with_image(
        &self,
        prompt: String,
        image: InlineImage,
        _response_schema: serde_json::Value,
    ) -> Result<String, CoreError> {
        self.next(LlmCall {
            prompt,
            image: Some(image),
        })
    }

    async fn generate_with_text(
        &self,
        prompt: String,
        _response_schema: serde_json::Value,
    ) -> Result<String, CoreError> {
        self.next(LlmCall {
            prompt,
            image: None,
        })
    }
}

/// Returns `image` for every URL, or fails when it is `None`.
#[derive(Clone, Default)]
pub struct StubImageFetcher {
    pub image: Option<InlineImage>,
}

impl StubImageFetcher {
    pub fn serving(mime_type: &str, data: &[u8]) -> Self {
        Self {
            image: Some(InlineImage {
                mime_type: mime_type.to_string(),
                data: data.to_vec(),
            }),
        }
    }
}

impl ImageFetcher for StubImageFetcher {
    async fn fetch_image(&self, url: &str) -> Result<InlineImage, CoreError> {
        self.image
            .clone()
            .ok_or_else(|| CoreError::ExternalServiceError(format!("failed to fetch {url}")))
    }
}

#[derive(Clone, Default)]
pub struct RecordingStorage {
    puts: Arc<Mutex<Vec<(String, String, String)>>>,
}

impl RecordingStorage {
    /// `(bucket, object_key, content_type)` of every upload
    pub fn puts(&self) -> Vec<(String, String, String)> {
        self.puts.lock().unwrap().clone()
    }
}

impl ObjectStoragePort for RecordingStorage {
    fn bucket(&self) -> String {
        "health-images".to_string()
    }

    fn public_url(&self, object_key: &str) -> String {
        format!("http://localhost:9000/health-images/{object_key}")
    }

    async fn put_object(
        &self,
        bucket: &str,
        object_key: &str,
        _payload: Bytes,
        content_type: &str,
    ) -> Result<(), CoreError> {
        self.puts.lock().unwrap().push((
            bucket.to_string(),
            object_key.to_string(),
            content_type.to_string(),
        ));
        Ok(())
    }
}

#[derive(Clone)]
pub struct StaticHealth {
    state: HealthState,
}

impl Default for StaticHealth {
    fn default() -> Self {
        Self {
            state: HealthState::Up,
        }
    }
}

impl StaticHealth {
    pub fn down() -> Self {
        Self {
            state: HealthState::Down,
        }
    }
}

impl HealthCheckRepository for StaticHealth {
    async fn health(&self) -> Result<u64, CoreError> {
        match self.state {
            HealthState::Up => Ok(1),
            HealthState::Down => Err(CoreError::DatabaseError("connection refused".to_string())),
        }
    }

    async fn readiness(&self) -> Result<DatabaseHealthStatus, CoreError> {
        let latency_ms = self.health().await.unwrap_or(0);
        Ok(DatabaseHealthStatus {
            status: self.state,
            latency_ms,
            checked_at: Utc::now(),
        })
    }
}

#[derive(Clone)]
pub struct FakeDiagnostics {
    failing: Vec<ProbeKind>,
    network: FakeNetwork,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum FakeNetwork {
    Reachable,
    Refused,
    Silent,
}

impl Default for FakeDiagnostics {
    fn default() -> Self {
        Self {
            failing: Vec::new(),
            network: FakeNetwork::Reachable,
        }
    }
}

impl FakeDiagnostics {
    pub fn failing_probes(kinds: &[ProbeKind]) -> Self {
        Self {
            failing: kinds.to_vec(),
            ..Self::default()
        }
    }

    pub fn unreachable() -> Self {
        Self {
            network: FakeNetwork::Refused,
            ..Self::default()
        }
    }

    /// Connection attempts never complete.
    pub fn silent() -> Self {
        Self {
            network: FakeNetwork::Silent,
            ..Self::default()
        }
    }
}

impl DiagnosticsRepository for FakeDiagnostics {
    async fn run_probe(&self, kind: ProbeKind) -> Result<serde_json::Value, CoreError> {
        if self.failing.contains(&kind) {
            return Err(CoreError::DatabaseError(format!("{} failed", kind.name())));
        }
        Ok(serde_json::json!({ "probe": kind.name() }))
    }

    async fn tcp_connect(&self) -> Result<(), CoreError> {
        match self.network {
            FakeNetwork::Reachable => Ok(()),
            FakeNetwork::Refused => Err(CoreError::ExternalServiceError(
                "connection refused".to_string(),
            )),
            FakeNetwork::Silent => std::future::pending().await,
        }
    }

    fn connection_summary(&self) -> ConnectionSummary {
        ConnectionSummary {
            host: "db.internal".to_string(),
            port: 5432,
            database: "health_tracker".to_string(),
            user: "app_user".to_string(),
            password: describe_password("password"),
        }
    }
}
