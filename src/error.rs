//! Boundary errors for the HTTP front end.
//!
//! The engine itself never errors: a search either returns a path or an
//! empty result with its counters populated. Requests are rejected here,
//! before they reach the core.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RequestError {
    /// The body was not a valid request document.
    #[error("malformed request: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The method is not supported on this route.
    #[error("method not allowed")]
    MethodNotAllowed,

    /// No route or file matches the request target.
    #[error("not found")]
    NotFound,
}

impl RequestError {
    /// HTTP status line parts for this error.
    pub fn status(&self) -> (u16, &'static str) {
        match self {
            RequestError::Malformed(_) => (400, "Bad Request"),
            RequestError::MethodNotAllowed => (405, "Method Not Allowed"),
            RequestError::NotFound => (404, "Not Found"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_map_to_http_codes() {
        let malformed: RequestError =
            serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert_eq!(malformed.status().0, 400);
        assert_eq!(RequestError::MethodNotAllowed.status().0, 405);
        assert_eq!(RequestError::NotFound.status().0, 404);
    }
}
