//! Error types for the PubMed MCP server.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

use std::time::Duration;

/// Errors from the E-utilities client layer.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// XML parsing error (efetch responses)
    #[error("Failed to parse XML response: {0}")]
    Xml(String),

    /// Rate limited by NCBI (429 response)
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Suggested wait time before retry
        retry_after: Duration,
    },

    /// Resource not found (404 response)
    #[error("Resource not found: {resource}")]
    NotFound {
        /// Description of the missing resource
        resource: String,
    },

    /// Invalid request parameters (400 response)
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message from API
        message: String,
    },

    /// Server error (5xx response)
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Unexpected HTTP status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },
}

impl ClientError {
    /// Create a rate limited error with retry-after duration.
    #[must_use]
    pub fn rate_limited(seconds: u64) -> Self {
        Self::RateLimited { retry_after: Duration::from_secs(seconds) }
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    /// Create a bad request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into() }
    }

    /// Create a server error.
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server { status, message: message.into() }
    }

    /// Create an XML parse error.
    #[must_use]
    pub fn xml(message: impl Into<String>) -> Self {
        Self::Xml(message.into())
    }
}

impl From<quick_xml::Error> for ClientError {
    fn from(err: quick_xml::Error) -> Self {
        Self::Xml(err.to_string())
    }
}

/// A full record that could not be located in an efetch response.
///
/// The display text is returned to the caller verbatim as the tool result.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// The article set wrapper is missing or empty.
    #[error("Error: PMID {pmid} not found. Please check the PMID and try again.")]
    NotFound {
        /// Requested PMID
        pmid: String,
    },

    /// The article exists but lacks its citation or article node.
    #[error("Error: PMID {pmid} not found or invalid. Please check the PMID and try again.")]
    Incomplete {
        /// Requested PMID
        pmid: String,
    },
}

/// Errors from MCP tool execution.
///
/// Tools report remote failures as text results; these variants cover
/// failures that happen before a tool can run or that escape it.
#[derive(thiserror::Error, Debug)]
pub enum ToolError {
    /// Error from the API client
    #[error("API error: {0}")]
    Client(#[from] ClientError),

    /// Input validation failed
    #[error("Validation error: {message}")]
    Validation {
        /// Field that failed validation
        field: String,
        /// Validation error message
        message: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Tool name not registered
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

impl ToolError {
    /// Create a validation error.
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation { field: field.into(), message: message.into() }
    }

    /// Convert to a user-friendly error message for MCP response.
    #[must_use]
    pub fn to_user_message(&self) -> String {
        match self {
            Self::Client(ClientError::RateLimited { retry_after }) => {
                format!("Rate limited by NCBI E-utilities. Please wait {:?} before retrying.", retry_after)
            }
            Self::Validation { field, message } => {
                format!("Invalid input for '{field}': {message}")
            }
            Self::Serialization(e) => format!("Invalid arguments: {e}"),
            Self::UnknownTool(name) => format!("Unknown tool: {name}"),
            _ => self.to_string(),
        }
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for tool operations.
pub type ToolResult<T> = Result<T, ToolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limited_user_message() {
        let err = ToolError::from(ClientError::rate_limited(60));
        assert_eq!(
            err.to_user_message(),
            "Rate limited by NCBI E-utilities. Please wait 60s before retrying."
        );
    }

    #[test]
    fn test_record_error_messages() {
        let err = RecordError::NotFound { pmid: "999".to_string() };
        assert_eq!(err.to_string(), "Error: PMID 999 not found. Please check the PMID and try again.");

        let err = RecordError::Incomplete { pmid: "42".to_string() };
        assert!(err.to_string().contains("PMID 42 not found or invalid"));
    }

    #[test]
    fn test_tool_error_user_message() {
        let err = ToolError::validation("query", "cannot be empty");
        assert!(err.to_user_message().contains("query"));
        assert!(err.to_user_message().contains("cannot be empty"));

        let err = ToolError::UnknownTool("nope".to_string());
        assert_eq!(err.to_user_message(), "Unknown tool: nope");
    }

    #[test]
    fn test_server_error_display() {
        let err = ClientError::server(502, "Bad Gateway");
        assert_eq!(err.to_string(), "Server error (502): Bad Gateway");
    }
}
