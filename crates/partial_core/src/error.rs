//! Sheet error types

use thiserror::Error;

/// Configuration errors raised while setting up a sheet.
///
/// Runtime input (deltas, velocities, stray events) never produces an error;
/// everything here is detected at setup or layout time.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SheetError {
    /// A configuration value is out of range
    #[error("Invalid sheet configuration: {0}")]
    InvalidConfig(String),

    /// The resolved checkpoint list is unusable
    #[error("Invalid checkpoints: {0}")]
    InvalidCheckpoints(String),

    /// Settle was asked to pick a target from an empty checkpoint list
    #[error("Cannot settle without checkpoints")]
    NoCheckpoints,

    /// The container reported a height the sheet cannot be laid out in
    #[error("Invalid container height: {0}")]
    InvalidContainerHeight(f32),
}

/// Result type for sheet setup operations
pub type Result<T> = std::result::Result<T, SheetError>;
