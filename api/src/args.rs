use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use healthtrack_core::{
    domain::{
        common::{DatabaseConfig, HealthTrackConfig, LLMConfig, ObjectStorageConfig},
        record::calendar::DEFAULT_UTC_OFFSET_MINUTES,
    },
    infrastructure::llm::gemini_client::DEFAULT_GEMINI_BASE_URL,
};
use serde::Serialize;

#[derive(Debug, Clone, Parser)]
#[command(name = "healthtrack-api", version, about = "Tongue diagnosis health tracker API")]
pub struct Args {
    #[arg(long, env = "ENV", value_enum, default_value_t = Environment::Development)]
    pub env: Environment,

    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub db: DatabaseArgs,

    #[command(flatten)]
    pub llm: LlmArgs,

    #[command(flatten)]
    pub object_storage: ObjectStorageArgs,

    #[command(flatten)]
    pub calendar: CalendarArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 3333)]
    pub port: u16,

    /// Prefix for every route, e.g. `/api`
    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,

    #[command(flatten)]
    pub tls: Option<TlsArgs>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct TlsArgs {
    #[arg(long = "server-tls-cert", env = "SERVER_TLS_CERT")]
    pub cert: PathBuf,

    #[arg(long = "server-tls-key", env = "SERVER_TLS_KEY")]
    pub key: PathBuf,
}

#[derive(clap::Args, Debug, Clone)]
pub struct DatabaseArgs {
    #[arg(long = "database-host", env = "DATABASE_HOST", default_value = "localhost")]
    pub host: String,

    #[arg(long = "database-port", env = "DATABASE_PORT", default_value_t = 5432)]
    pub port: u16,

    #[arg(long = "database-user", env = "DATABASE_USER", default_value = "postgres")]
    pub user: String,

    #[arg(long = "database-password", env = "DATABASE_PASSWORD", default_value = "postgres")]
    pub password: String,

    #[arg(long = "database-name", env = "DATABASE_NAME", default_value = "health_tracker")]
    pub name: String,
}

#[derive(clap::Args, Debug, Clone)]
pub struct LlmArgs {
    #[arg(long = "gemini-api-key", env = "GEMINI_API_KEY", default_value = "")]
    pub gemini_api_key: String,

    #[arg(long = "gemini-model", env = "GEMINI_MODEL", default_value = "gemini-2.5-flash")]
    pub gemini_model: String,

    #[arg(long = "gemini-base-url", env = "GEMINI_BASE_URL", default_value = DEFAULT_GEMINI_BASE_URL)]
    pub gemini_base_url: String,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ObjectStorageArgs {
    #[arg(long = "storage-endpoint", env = "STORAGE_ENDPOINT", default_value = "http://localhost:9000")]
    pub endpoint: String,

    #[arg(long = "storage-region", env = "STORAGE_REGION", default_value = "us-east-1")]
    pub region: String,

    #[arg(long = "storage-access-key", env = "STORAGE_ACCESS_KEY", default_value = "minioadmin")]
    pub access_key: String,

    #[arg(long = "storage-secret-key", env = "STORAGE_SECRET_KEY", default_value = "minioadmin")]
    pub secret_key: String,

    #[arg(long = "storage-bucket", env = "STORAGE_BUCKET", default_value = "health-images")]
    pub bucket: String,

    /// Base URL objects are publicly served from; defaults to the endpoint
    #[arg(long = "storage-public-base-url", env = "STORAGE_PUBLIC_BASE_URL")]
    pub public_base_url: Option<String>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct CalendarArgs {
    /// UTC offset used for calendar grouping when a request does not give one
    #[arg(
        long = "calendar-utc-offset-minutes",
        env = "CALENDAR_UTC_OFFSET_MINUTES",
        default_value_t = DEFAULT_UTC_OFFSET_MINUTES,
        allow_negative_numbers = true
    )]
    pub utc_offset_minutes: i32,
}

#[derive(clap::Args, Debug, Clone)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

impl From<Args> for HealthTrackConfig {
    fn from(args: Args) -> Self {
        let public_base_url = args
            .object_storage
            .public_base_url
            .unwrap_or_else(|| args.object_storage.endpoint.clone());

        Self {
            database: DatabaseConfig {
                host: args.db.host,
                port: args.db.port,
                username: args.db.user,
                password: args.db.password,
                name: args.db.name,
            },
            llm: LLMConfig {
                gemini_api_key: args.llm.gemini_api_key,
                gemini_model: args.llm.gemini_model,
                gemini_base_url: args.llm.gemini_base_url,
            },
            object_storage: ObjectStorageConfig {
                endpoint: args.object_storage.endpoint,
                region: args.object_storage.region,
                access_key: args.object_storage.access_key,
                secret_key: args.object_storage.secret_key,
                bucket: args.object_storage.bucket,
                public_base_url,
            },
        }
    }
}

#[cfg(test)]
pub(crate) fn test_args() -> Args {
    Args::try_parse_from(["healthtrack-api"]).expect("defaults parse")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_parse_without_flags() {
        let args = test_args();
        assert_eq!(args.server.port, 3333);
        assert_eq!(args.server.root_path, "");
        assert!(args.server.tls.is_none());
        assert_eq!(args.calendar.utc_offset_minutes, 480);
    }

    #[test]
    fn parses_origins_and_negative_offset() {
        let args = Args::try_parse_from([
            "healthtrack-api",
            "--allowed-origins",
            "https://a.example.com,https://b.example.com",
            "--calendar-utc-offset-minutes",
            "-300",
        ])
        .unwrap();

        assert_eq!(
            args.server.allowed_origins,
            vec!["https://a.example.com", "https://b.example.com"]
        );
        assert_eq!(args.calendar.utc_offset_minutes, -300);
    }

    #[test]
    fn tls_requires_both_paths() {
        let result = Args::try_parse_from(["healthtrack-api", "--server-tls-cert", "cert.pem"]);
        assert!(result.is_err());
    }

    #[test]
    fn public_base_url_defaults_to_endpoint() {
        let args = Args::try_parse_from([
            "healthtrack-api",
            "--storage-endpoint",
            "http://minio:9000",
        ])
        .unwrap();

        let config = HealthTrackConfig::from(args);
        assert_eq!(config.object_storage.public_base_url, "http://minio:9000");
        assert_eq!(config.database.name, "health_tracker");
    }
}
