//! Error type shared by all query parsers.
//!
//! Parse failures map uniformly onto HTTP status codes downstream, so the
//! error is a flat enum of status-shaped variants carrying a message
//! suitable for a response body. Parsers fail fast: the first structural
//! error aborts the parse and surfaces to the caller unwrapped.

/// Result alias used across the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// An error raised while parsing an OData request.
///
/// Every variant carries a human-readable message; [`Error::response_code`]
/// maps the variant to the HTTP status a service should answer with.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The request is malformed (HTTP 400). All parse failures use this.
    #[error("{0}")]
    BadRequest(String),

    /// The addressed resource does not exist (HTTP 404).
    #[error("{0}")]
    NotFound(String),

    /// The method is not allowed on the addressed resource (HTTP 405).
    #[error("{0}")]
    MethodNotAllowed(String),

    /// The addressed resource is gone (HTTP 410).
    #[error("{0}")]
    Gone(String),

    /// A precondition on the request failed (HTTP 412).
    #[error("{0}")]
    PreconditionFailed(String),

    /// An internal invariant was violated (HTTP 500).
    #[error("{0}")]
    InternalServerError(String),

    /// The request uses a feature the service does not implement (HTTP 501).
    #[error("{0}")]
    NotImplemented(String),
}

impl Error {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Error::BadRequest(message.into())
    }

    pub fn not_implemented(message: impl Into<String>) -> Self {
        Error::NotImplemented(message.into())
    }

    /// The HTTP status code this error maps to.
    pub fn response_code(&self) -> u16 {
        match self {
            Error::BadRequest(_) => 400,
            Error::NotFound(_) => 404,
            Error::MethodNotAllowed(_) => 405,
            Error::Gone(_) => 410,
            Error::PreconditionFailed(_) => 412,
            Error::InternalServerError(_) => 500,
            Error::NotImplemented(_) => 501,
        }
    }

    /// The message carried by this error.
    pub fn message(&self) -> &str {
        match self {
            Error::BadRequest(m)
            | Error::NotFound(m)
            | Error::MethodNotAllowed(m)
            | Error::Gone(m)
            | Error::PreconditionFailed(m)
            | Error::InternalServerError(m)
            | Error::NotImplemented(m) => m,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_codes() {
        assert_eq!(Error::bad_request("x").response_code(), 400);
        assert_eq!(Error::not_implemented("x").response_code(), 501);
        assert_eq!(Error::NotFound("x".into()).response_code(), 404);
        assert_eq!(Error::MethodNotAllowed("x".into()).response_code(), 405);
        assert_eq!(Error::Gone("x".into()).response_code(), 410);
        assert_eq!(Error::PreconditionFailed("x".into()).response_code(), 412);
        assert_eq!(Error::InternalServerError("x".into()).response_code(), 500);
    }

    #[test]
    fn display_is_the_message() {
        let err = Error::bad_request("no matching token for %$!");
        assert_eq!(err.to_string(), "no matching token for %$!");
        assert_eq!(err.message(), "no matching token for %$!");
    }
}
