pub mod assessment;
pub mod diagnostics;
pub mod health;
pub mod query_extractor;
pub mod query_params;
pub mod record;
pub mod server;
pub mod upload;
