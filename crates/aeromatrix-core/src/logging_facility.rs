//! Structured logging facility for AeroMatrix
//!
//! One initialization point, `init(profile)`, plus three macros that give
//! every top-level operation the same event shape:
//!
//! - `log_op_start!(op, ...)` - operation start
//! - `log_op_end!(op, duration_ms = ...)` - successful end
//! - `log_op_error!(op, err, duration_ms = ...)` - failed end, with `err_kind` and `err_code`
//!
//! Only the engine boundary emits these; lower layers use `tracing::debug!`.
//!
//! ```rust
//! use aeromatrix_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
