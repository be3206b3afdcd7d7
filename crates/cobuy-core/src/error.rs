use std::fmt;

use thiserror::Error;

/// Machine-readable error codes for agent-friendly decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    DatasetNotFound,
    InvalidDataset,
    UnsupportedFormat,
    ProductNotFound,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1002",
            Self::DatasetNotFound => "E1101",
            Self::InvalidDataset => "E1102",
            Self::UnsupportedFormat => "E1103",
            Self::ProductNotFound => "E2001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::DatasetNotFound => "Dataset file not found",
            Self::InvalidDataset => "Invalid dataset",
            Self::UnsupportedFormat => "Unsupported dataset format",
            Self::ProductNotFound => "Product not found",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in .cobuy/config.toml and retry."),
            Self::DatasetNotFound => Some("Check the --data path or the [data] path setting."),
            Self::InvalidDataset => {
                Some("Product ids must be unique and popularity must be within 0..=100.")
            }
            Self::UnsupportedFormat => Some("Use a .toml or .json dataset file."),
            Self::ProductNotFound => {
                Some("Try a product ID or part of a name (e.g. '1' or 'Laptop').")
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Domain failures raised outside the (infallible) recommendation core.
#[derive(Debug, Error)]
pub enum CobuyError {
    #[error("no product matches '{query}'")]
    ProductNotFound { query: String },

    #[error("dataset file {path} does not exist")]
    DatasetNotFound { path: String },

    #[error("invalid dataset: {reason}")]
    InvalidDataset { reason: String },

    #[error("unsupported dataset format '{extension}'")]
    UnsupportedFormat { extension: String },

    #[error("failed to parse config {path}: {reason}")]
    ConfigParse { path: String, reason: String },
}

impl CobuyError {
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::ProductNotFound { .. } => ErrorCode::ProductNotFound,
            Self::DatasetNotFound { .. } => ErrorCode::DatasetNotFound,
            Self::InvalidDataset { .. } => ErrorCode::InvalidDataset,
            Self::UnsupportedFormat { .. } => ErrorCode::UnsupportedFormat,
            Self::ConfigParse { .. } => ErrorCode::ConfigParseError,
        }
    }

    /// Remediation hint for this error, falling back to the code's message.
    #[must_use]
    pub fn suggestion(&self) -> String {
        let code = self.error_code();
        code.hint().unwrap_or(code.message()).to_string()
    }
}
