//! Canonical logging macros
//!
//! These macros provide a structured, consistent way to log operation
//! boundaries. Callers need `tracing` and `edgepurge-core-types` as
//! dependencies.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use edgepurge_core::log_op_start;
/// log_op_start!("fingerprint_tree");
/// log_op_start!("fingerprint_tree", public_dir = "public");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = edgepurge_core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = edgepurge_core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use edgepurge_core::log_op_end;
/// log_op_end!("fingerprint_tree", duration_ms = 42);
/// log_op_end!("fingerprint_tree", duration_ms = 42, file_count = 7);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = edgepurge_core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = edgepurge_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// `err` must be a `&EdgeError`.
///
/// # Example
///
/// ```
/// # use edgepurge_core::log_op_error;
/// use edgepurge_core::errors::{EdgeError, EdgeErrorKind};
/// let err = EdgeError::new(EdgeErrorKind::Io).with_message("denied");
/// log_op_error!("load_manifest", &err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let err: &$crate::errors::EdgeError = $err;
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = edgepurge_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?err.kind(),
            err_code = err.code(),
            "{}",
            err
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let err: &$crate::errors::EdgeError = $err;
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = edgepurge_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?err.kind(),
            err_code = err.code(),
            $($field)*
        );
    }};
}
