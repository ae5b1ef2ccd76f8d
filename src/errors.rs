//! Unified error type for the ledger.
//!
//! Business logic, the JSON store and configuration loading all return
//! [`Result`]. The HTTP layer maps each variant onto a status code.

use thiserror::Error;

/// Errors raised anywhere in the ledger.
#[derive(Debug, Error)]
pub enum Error {
    /// Bad or unreadable configuration.
    #[error("Configuration error: {message}")]
    Config {
        /// Human readable description
        message: String,
    },

    /// A record failed field validation.
    #[error("Validation error: {message}")]
    Validation {
        /// Human readable description
        message: String,
    },

    /// A money amount that is negative or not finite.
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: f64,
    },

    /// No employee with this id.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The requested id
        id: String,
    },

    /// No expense with this id.
    #[error("Expense not found: {id}")]
    ExpenseNotFound {
        /// The requested id
        id: String,
    },

    /// No product with this id.
    #[error("Product not found: {id}")]
    ProductNotFound {
        /// The requested id
        id: String,
    },

    /// A record with this id already exists.
    #[error("Duplicate {kind} id: {id}")]
    DuplicateId {
        /// Record kind ("employee", "expense", "product")
        kind: &'static str,
        /// The clashing id
        id: String,
    },

    /// Filesystem failure while reading or writing the data file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The data file is not valid JSON for the document shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The bind address could not be parsed.
    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),
}

impl Error {
    /// Whether this error means the addressed record does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::EmployeeNotFound { .. } | Self::ExpenseNotFound { .. } | Self::ProductNotFound { .. }
        )
    }

    /// Whether this error was caused by the caller's input.
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::InvalidAmount { .. })
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
