use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Queries run by the database probe, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProbeKind {
    Basic,
    Time,
    DatabaseInfo,
}

impl ProbeKind {
    pub const ALL: [ProbeKind; 3] = [ProbeKind::Basic, ProbeKind::Time, ProbeKind::DatabaseInfo];

    pub fn name(&self) -> &'static str {
        match self {
            ProbeKind::Basic => "basic",
            ProbeKind::Time => "time",
            ProbeKind::DatabaseInfo => "database info",
        }
    }

    pub fn sql(&self) -> &'static str {
        match self {
            ProbeKind::Basic => "SELECT 1 AS test",
            ProbeKind::Time => "SELECT NOW()::text AS server_time",
            ProbeKind::DatabaseInfo => {
                "SELECT current_database()::text AS database, current_user::text AS \"user\""
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProbeResult {
    pub name: String,
    pub success: bool,
    pub duration_ms: u64,
    #[schema(value_type = Option<Object>)]
    pub result: Option<serde_json::Value>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DatabaseProbeReport {
    /// True when at least one probe passed
    pub success: bool,
    pub passed: usize,
    pub total: usize,
    pub probes: Vec<ProbeResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NetworkProbeResult {
    pub success: bool,
    pub message: String,
    pub host: String,
    pub port: u16,
    pub duration_ms: u64,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ConnectionSummary {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    /// `Set (N chars)` or `NOT SET`; the password itself never leaves the process
    pub password: String,
}

pub fn describe_password(password: &str) -> String {
    if password.is_empty() {
        "NOT SET".to_string()
    } else {
        format!("Set ({} chars)", password.chars().count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_is_never_echoed() {
        assert_eq!(describe_password(""), "NOT SET");
        assert_eq!(describe_password("s3cr3t@pw"), "Set (9 chars)");
    }

    #[test]
    fn probes_run_in_declared_order() {
        let names: Vec<_> = ProbeKind::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(names, vec!["basic", "time", "database info"]);
    }
}
