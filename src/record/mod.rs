//! Persistence subsystem.
//!
//! # Data Flow
//! ```text
//! CheckResult
//!     → format.rs (fixed-order CSV row, 2-decimal latency)
//!     → recorder.rs (exclusive create + header, or append)
//!     → log file (append-only, one header)
//! ```

pub mod format;
pub mod recorder;

pub use format::{parse_row, read_log, LogRecord, COLUMNS, HEADER_LINE};
pub use recorder::{append, Recorder, RecorderError};
