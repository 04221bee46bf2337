//! `SeaORM` Entity definitions

pub mod prelude;

pub mod health_records;
