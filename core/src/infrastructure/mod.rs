pub mod db;
pub mod diagnostics;
pub mod health;
pub mod image;
pub mod llm;
pub mod object_storage;
pub mod record;
