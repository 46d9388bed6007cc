//! Error classification for product API requests.
//!
//! A failed exchange is first captured as a [`TransportError`], then
//! [`classify`] maps it once to a [`RequestError`] carrying the single message
//! shown to the user. Nothing here retries.

use thiserror::Error;

/// Raw outcome of a failed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request never produced a response (connection refused, DNS, ...).
    #[error("network failure: {0}")]
    Network(String),

    /// The server answered with an unsuccessful status, or with a body that
    /// could not be decoded.
    #[error("HTTP {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Transport-level description of the failure.
        message: String,
    },
}

impl TransportError {
    /// HTTP status, if the server answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Network(_) => None,
            Self::Status { status, .. } => Some(*status),
        }
    }
}

/// A classified, terminal request failure.
///
/// `Display` yields exactly the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RequestError {
    message: String,
    status: Option<u16>,
}

impl RequestError {
    /// The user-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status of the failed response, if there was one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        self.status
    }

    /// Whether the server reported the resource as missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status == Some(404)
    }
}

/// Map a transport failure to its user-facing message.
#[must_use]
pub fn classify(error: &TransportError) -> RequestError {
    let message = match error {
        TransportError::Network(message) => format!("Network error: {message}"),
        TransportError::Status { status, message } => match status {
            400 => "Bad request. Please check your input.".to_string(),
            401 => "Unauthorized. Please log in.".to_string(),
            403 => "Forbidden. You do not have permission.".to_string(),
            404 => "Resource not found.".to_string(),
            500 => "Internal server error. Please try again later.".to_string(),
            _ => format!("Server error: {status} - {message}"),
        },
    };

    tracing::error!(
        status = ?error.status(),
        transport_error = %error,
        "Error occurred: {message}"
    );

    RequestError {
        message,
        status: error.status(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(status: u16) -> TransportError {
        TransportError::Status {
            status,
            message: format!("Http failure response for http://api/products: {status}"),
        }
    }

    #[test]
    fn test_status_table() {
        let cases = [
            (400, "Bad request. Please check your input."),
            (401, "Unauthorized. Please log in."),
            (403, "Forbidden. You do not have permission."),
            (404, "Resource not found."),
            (500, "Internal server error. Please try again later."),
        ];
        for (code, expected) in cases {
            let err = classify(&status(code));
            assert_eq!(err.to_string(), expected);
            assert_eq!(err.status(), Some(code));
        }
    }

    #[test]
    fn test_unlisted_status_falls_back_to_generic_message() {
        let err = classify(&TransportError::Status {
            status: 503,
            message: "Http failure response for http://api/products: 503 Service Unavailable"
                .to_string(),
        });
        assert_eq!(
            err.message(),
            "Server error: 503 - Http failure response for http://api/products: 503 Service Unavailable"
        );
    }

    #[test]
    fn test_network_error_passes_message_through() {
        let err = classify(&TransportError::Network("connection refused".to_string()));
        assert_eq!(err.message(), "Network error: connection refused");
        assert_eq!(err.status(), None);
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_not_found_flag() {
        assert!(classify(&status(404)).is_not_found());
        assert!(!classify(&status(401)).is_not_found());
    }
}
