//! Error types for the grid model.
//!
//! Every fallible operation in the crate reports a [`GridError`] carrying a
//! human-readable message and a small structured context describing where the
//! failure happened.

use std::fmt;

/// Result type for grid operations
pub type GridResult<T> = Result<T, GridError>;

/// Structured context for grid errors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorContext {
    /// The operation being performed (e.g., "snap_to_minute", "from_clock")
    pub operation: Option<String>,
    /// The offending input, rendered as text
    pub input: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with an operation name.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: Some(operation.into()),
            ..Default::default()
        }
    }

    /// Record the input that triggered the error.
    pub fn with_input(mut self, input: impl ToString) -> Self {
        self.input = Some(input.to_string());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(ref op) = self.operation {
            parts.push(format!("operation={}", op));
        }
        if let Some(ref input) = self.input {
            parts.push(format!("input={}", input));
        }
        write!(f, "[{}]", parts.join(", "))
    }
}

/// Error type for grid operations
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// Malformed interval data (e.g. a negative duration).
    #[error("Validation error: {message} {context}")]
    Validation {
        message: String,
        context: ErrorContext,
    },

    /// Pixel geometry that cannot be mapped onto minutes.
    #[error("Geometry error: {message} {context}")]
    Geometry {
        message: String,
        context: ErrorContext,
    },

    /// Unparseable clock strings, dates or timestamps.
    #[error("Parse error: {message} {context}")]
    Parse {
        message: String,
        context: ErrorContext,
    },

    /// Configuration file could not be read or understood.
    #[error("Configuration error: {message} {context}")]
    Configuration {
        message: String,
        context: ErrorContext,
    },
}

impl GridError {
    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Create a validation error with context.
    pub fn validation_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::Validation {
            message: message.into(),
            context,
        }
    }

    /// Create a geometry error with context.
    pub fn geometry_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::Geometry {
            message: message.into(),
            context,
        }
    }

    /// Create a parse error with context.
    pub fn parse_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::Parse {
            message: message.into(),
            context,
        }
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Create a configuration error with context.
    pub fn configuration_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::Configuration {
            message: message.into(),
            context,
        }
    }

    /// Get the error context.
    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::Validation { context, .. }
            | Self::Geometry { context, .. }
            | Self::Parse { context, .. }
            | Self::Configuration { context, .. } => context,
        }
    }
}
