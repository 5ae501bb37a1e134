use std::fmt;

/// Errors that can occur while importing a capture table.
///
/// Rows that are too short or that do not carry the target object are
/// skipped by the resampler and never show up here.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("No tracked objects found in header")]
    NoTrackedObjects,

    #[error("Tracked object not found: {0}")]
    ObjectNotFound(String),

    #[error("Invalid number {value:?} at row {row}, field {field}")]
    Parse {
        row: u64,
        field: usize,
        value: String,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Thread-safe last-error storage for the C FFI layer.
pub(crate) struct LastError {
    message: std::sync::Mutex<String>,
}

impl LastError {
    pub const fn new() -> Self {
        Self {
            message: std::sync::Mutex::new(String::new()),
        }
    }

    pub fn set(&self, err: &ImportError) {
        self.set_message(&err.to_string());
    }

    pub fn set_message(&self, message: &str) {
        if let Ok(mut msg) = self.message.lock() {
            // Interior NULs would truncate the C string early.
            let cleaned = message.replace('\0', " ");
            *msg = fmt::format(format_args!("{}\0", cleaned));
        }
    }

    pub fn clear(&self) {
        if let Ok(mut msg) = self.message.lock() {
            msg.clear();
        }
    }

    pub fn as_ptr(&self) -> *const std::ffi::c_char {
        match self.message.lock() {
            Ok(msg) if !msg.is_empty() => msg.as_ptr() as *const std::ffi::c_char,
            _ => std::ptr::null(),
        }
    }
}
