//! Canonical schema constants for structured logging and events
//!
//! These constants keep field names identical across the engine, store and CLI.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";
pub const FIELD_TRACE_ID: &str = "trace_id";
pub const FIELD_ACTOR: &str = "actor";

// Entity identifiers
pub const FIELD_DRONE_ID: &str = "drone_id";
pub const FIELD_MATRIX_ID: &str = "matrix_id";

// Collection sizes
pub const FIELD_COMMAND_COUNT: &str = "command_count";
pub const FIELD_DRONE_COUNT: &str = "drone_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
