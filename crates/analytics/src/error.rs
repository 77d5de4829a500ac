use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Invalid input collection: {count} record(s) break the engine's contract, first: {first}")]
    InvalidInput { count: usize, first: CoreError },
}
