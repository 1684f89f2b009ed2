//! Configuration module
//!
//! Handles CLI configuration including the process manager URL.

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the process manager
    pub manager_url: String,
}
