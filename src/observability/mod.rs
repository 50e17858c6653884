//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! prober, recorder, pipeline
//!     → logging.rs (structured events on stderr, one span per check)
//!
//! report.rs owns stdout; nothing here writes to it.
//! ```

pub mod logging;

pub use logging::init_logging;
