//! Error types for smartcab

use thiserror::Error;

/// Main error type for smartcab
#[derive(Error, Debug)]
pub enum SmartcabError {
    /// A caller broke a contract, e.g. an action or channel outside the fixed sets
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Simulation error: {0}")]
    Simulation(String),
}

/// Result type alias for smartcab operations
pub type Result<T> = std::result::Result<T, SmartcabError>;
