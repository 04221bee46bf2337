pub mod postgres_diagnostics;
