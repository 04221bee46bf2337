pub mod connection_summary;
pub mod database_probe;
pub mod network_probe;
