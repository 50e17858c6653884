//! Probing subsystem.
//!
//! # Data Flow
//! ```text
//! raw URL string
//!     → target.rs (validate, keep verbatim spelling)
//!     → prober.rs (one GET, monotonic timing, failure classification)
//!     → result.rs (CheckResult, is_up derived from status)
//! ```
//!
//! # Design Decisions
//! - `Prober::probe` is total: transport errors never escape it
//! - Input errors surface before the client is ever used

pub mod prober;
pub mod result;
pub mod target;

pub use prober::{probe, FailureKind, ProbeError, Prober};
pub use result::{is_up_status, CheckResult, NO_RESPONSE};
pub use target::TargetUrl;
