pub mod assessment;
pub mod common;
pub mod diagnostics;
pub mod health;
pub mod intake;
pub mod record;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_support;
