//! Error types for the sync CLI.
//!
//! Provides structured error handling with:
//! - Machine-readable error codes (`ErrorCode`)
//! - Category-based exit codes (4=validation, 6=api, 7=config, 8=io)
//! - Recovery hints for misconfigured environments
//! - Structured JSON output for piped / non-TTY consumers
//!
//! Only fatal, pre-loop errors ever reach the process boundary;
//! per-record failures are converted to a `Failed` sync status inside
//! the engine loop and never escape it.

use thiserror::Error;

/// Result type alias for sync operations.
pub type Result<T> = std::result::Result<T, Error>;

// ── Error Code ────────────────────────────────────────────────

/// Machine-readable error codes grouped by category.
///
/// Each code maps to a SCREAMING_SNAKE string and a category-based
/// exit code. Agents match on the string; shell scripts on the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Validation (exit 4)
    MissingFields,

    // API (exit 6)
    ApiError,
    HttpError,

    // Config (exit 7)
    ConfigError,

    // I/O (exit 8)
    IoError,
    JsonError,

    // Internal (exit 1)
    InternalError,
}

impl ErrorCode {
    /// Machine-readable SCREAMING_SNAKE code string.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::MissingFields => "MISSING_FIELDS",
            Self::ApiError => "API_ERROR",
            Self::HttpError => "HTTP_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Category-based exit code.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InternalError => 1,
            Self::MissingFields => 4,
            Self::ApiError | Self::HttpError => 6,
            Self::ConfigError => 7,
            Self::IoError | Self::JsonError => 8,
        }
    }
}

// ── Error Enum ────────────────────────────────────────────────

/// Errors that can occur during a sync run.
#[derive(Error, Debug)]
pub enum Error {
    /// Required environment variables are absent. Fatal, pre-loop.
    #[error("Missing required environment variables: {}", missing.join(", "))]
    Config { missing: Vec<String> },

    /// The Notion API returned a non-success status.
    #[error("Notion API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Transport-level failure talking to the Notion API.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// One or more required properties are missing or empty on a
    /// source page. Caught at the record boundary, never fatal.
    #[error("Missing or empty required properties: {}", fields.join(", "))]
    MissingFields { fields: Vec<String> },

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Map this error to its structured `ErrorCode`.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::Config { .. } => ErrorCode::ConfigError,
            Self::Api { .. } => ErrorCode::ApiError,
            Self::Http(_) => ErrorCode::HttpError,
            Self::Json(_) => ErrorCode::JsonError,
            Self::Io(_) => ErrorCode::IoError,
            Self::MissingFields { .. } => ErrorCode::MissingFields,
            Self::Other(_) => ErrorCode::InternalError,
        }
    }

    /// Category-based exit code, delegating to the `ErrorCode`.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.error_code().exit_code()
    }

    /// Recovery hint for humans and agents.
    ///
    /// Returns `None` if no actionable suggestion exists.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::Config { missing } => Some(format!(
                "Add {} to your .env file or environment",
                missing.join(", ")
            )),
            Self::Api { status: 401, .. } => {
                Some("Check that NOTION_API_KEY is valid and the integration has access".to_string())
            }
            Self::Api { status: 404, .. } => Some(
                "Check MASTER_DB_ID / SLAVE_DB_ID and share both databases with the integration"
                    .to_string(),
            ),
            _ => None,
        }
    }

    /// Structured JSON representation for machine consumption.
    #[must_use]
    pub fn to_structured_json(&self) -> serde_json::Value {
        let code = self.error_code();
        let mut obj = serde_json::json!({
            "error": {
                "code": code.as_str(),
                "message": self.to_string(),
                "exit_code": code.exit_code(),
            }
        });

        if let Some(hint) = self.hint() {
            obj["error"]["hint"] = serde_json::Value::String(hint);
        }

        obj
    }
}
