//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! built-in defaults
//!     → loader.rs (optional TOML file)
//!     → cli.rs (command-line overrides)
//!     → validation.rs (semantic checks)
//!     → ProbeConfig (validated, immutable)
//!     → passed by reference to prober and recorder
//! ```
//!
//! # Design Decisions
//! - Config is a plain value threaded through the pipeline; no globals
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{read_config, ConfigError};
pub use schema::{HeaderCheck, LogFormat, ObservabilityConfig, ProbeConfig, ProbeSettings, RecorderConfig};
pub use validation::{validate_config, ValidationError};
