//! `SeaORM` Entity prelude

pub use super::health_records::Entity as HealthRecords;
