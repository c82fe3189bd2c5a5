//! Canonical schema constants for structured logging and events
//!
//! These constants keep field names consistent between the logging macros,
//! the purge progress events and the test capture layer.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Pipeline identifiers
pub const FIELD_PUBLIC_DIR: &str = "public_dir";
pub const FIELD_MANIFEST_PATH: &str = "manifest_path";
pub const FIELD_STAGE: &str = "stage";
pub const FIELD_MODE: &str = "mode";
pub const FIELD_ZONE_ID: &str = "zone_id";

// Purge batches
pub const FIELD_BATCH_INDEX: &str = "batch_index";
pub const FIELD_BATCH_COUNT: &str = "batch_count";
pub const FIELD_URL_COUNT: &str = "url_count";
pub const FIELD_STATUS: &str = "status";

// Collection sizes
pub const FIELD_FILE_COUNT: &str = "file_count";
pub const FIELD_CHANGED_COUNT: &str = "changed_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
pub const EVENT_BATCH_SENT: &str = "batch_sent";
pub const EVENT_BATCH_PURGED: &str = "batch_purged";
pub const EVENT_STAGE: &str = "stage";
