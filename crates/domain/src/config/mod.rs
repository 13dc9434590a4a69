//! Configuration module for madoh
//!
//! - `root`: Main configuration and CLI overrides
//! - `doh`: DNS-over-HTTPS backend selection and HTTP client settings
//! - `logging`: Logging settings
//! - `errors`: Configuration errors

pub mod doh;
pub mod errors;
pub mod logging;
pub mod root;

pub use doh::{BackendSelection, DohConfig, DEFAULT_DOH_TIMEOUT_SECS, DEFAULT_DOH_URL};
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
