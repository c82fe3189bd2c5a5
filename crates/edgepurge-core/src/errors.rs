use std::path::Path;

/// Result type alias using EdgeError
pub type Result<T> = std::result::Result<T, EdgeError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every fatal condition in the purge pipeline maps to one of these kinds.
/// Each kind has a stable error code used in logs and CLI diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeErrorKind {
    // Caller input
    /// Publish directory missing or not a directory
    Precondition,
    /// Invalid configuration value (base URL, batch size, ...)
    InvalidInput,
    /// A file name under the publish root cannot be represented as UTF-8
    InvalidPath,

    // Filesystem
    Io,

    // Purge API
    /// The request never got an HTTP response (DNS, connect, timeout, TLS)
    Transport,
    /// The API answered with a non-2xx status
    UpstreamRejected,
    /// The API answered 2xx but the body was not JSON
    InvalidResponse,

    // Internal
    Internal,
}

impl EdgeErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            EdgeErrorKind::Precondition => "ERR_PRECONDITION",
            EdgeErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            EdgeErrorKind::InvalidPath => "ERR_INVALID_PATH",
            EdgeErrorKind::Io => "ERR_IO",
            EdgeErrorKind::Transport => "ERR_TRANSPORT",
            EdgeErrorKind::UpstreamRejected => "ERR_UPSTREAM_REJECTED",
            EdgeErrorKind::InvalidResponse => "ERR_INVALID_RESPONSE",
            EdgeErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries the classification plus whatever context the failing operation
/// knows: the filesystem path involved, or the purge batch that failed and
/// the HTTP status it got.
#[derive(Debug, Clone)]
pub struct EdgeError {
    kind: EdgeErrorKind,
    op: Option<String>,
    path: Option<String>,
    batch_index: Option<usize>,
    status: Option<u16>,
    message: String,
}

impl EdgeError {
    /// Create a new error with the specified kind
    pub fn new(kind: EdgeErrorKind) -> Self {
        Self {
            kind,
            op: None,
            path: None,
            batch_index: None,
            status: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add filesystem path context
    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().display().to_string());
        self
    }

    /// Add the 1-based index of the purge batch that failed
    pub fn with_batch_index(mut self, index: usize) -> Self {
        self.batch_index = Some(index);
        self
    }

    /// Add the HTTP status returned by the purge API
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> EdgeErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the path context, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the failed batch index, if any
    pub fn batch_index(&self) -> Option<usize> {
        self.batch_index
    }

    /// Get the HTTP status, if any
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for EdgeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        if let Some(batch) = self.batch_index {
            write!(f, " (batch: {})", batch)?;
        }
        if let Some(status) = self.status {
            write!(f, " (status: {})", status)?;
        }
        Ok(())
    }
}

impl std::error::Error for EdgeError {}

// ========== End Error Facility ==========

/// Create an IO error for the given operation and path
pub fn io_error(op: &str, path: impl AsRef<Path>, err: std::io::Error) -> EdgeError {
    EdgeError::new(EdgeErrorKind::Io)
        .with_op(op)
        .with_path(path)
        .with_message(err.to_string())
}

/// Create a precondition error (bad publish directory)
pub fn precondition(op: &str, path: impl AsRef<Path>, reason: &str) -> EdgeError {
    EdgeError::new(EdgeErrorKind::Precondition)
        .with_op(op)
        .with_path(path)
        .with_message(reason.to_string())
}

/// Create an invalid input error
pub fn invalid_input(op: &str, reason: impl Into<String>) -> EdgeError {
    EdgeError::new(EdgeErrorKind::InvalidInput)
        .with_op(op)
        .with_message(reason)
}
