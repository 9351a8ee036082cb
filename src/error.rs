// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Api(ApiError),
}

/// Failures talking to the gallery server.
/// Each variant maps to a user-friendly, localized reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The configured server address is not a usable http(s) base URL.
    InvalidUrl(String),

    /// The request never produced a response (DNS, refused connection, timeout, TLS).
    Transport(String),

    /// The server answered with a non-2xx status.
    Status { status: u16, endpoint: String },

    /// The response body could not be decoded into the expected shape.
    Decode(String),
}

impl ApiError {
    /// Returns the i18n message key describing this failure.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            ApiError::InvalidUrl(_) => "api-error-invalid-url",
            ApiError::Transport(_) => "api-error-transport",
            ApiError::Status { .. } => "api-error-status",
            ApiError::Decode(_) => "api-error-decode",
        }
    }

    /// Arguments interpolated into the message returned by [`ApiError::i18n_key`].
    pub fn i18n_args(&self) -> Vec<(&'static str, String)> {
        match self {
            ApiError::Status { status, .. } => vec![("status", status.to_string())],
            _ => Vec::new(),
        }
    }

    /// Whether the server answered with the given status code.
    pub fn is_status(&self, code: u16) -> bool {
        matches!(self, ApiError::Status { status, .. } if *status == code)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidUrl(url) => write!(f, "Invalid server URL: {}", url),
            ApiError::Transport(msg) => write!(f, "Request failed: {}", msg),
            ApiError::Status { status, endpoint } => {
                write!(f, "HTTP status {} from {}", status, endpoint)
            }
            ApiError::Decode(msg) => write!(f, "Unexpected response: {}", msg),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return ApiError::Decode(err.to_string());
        }
        if let Some(status) = err.status() {
            return ApiError::Status {
                status: status.as_u16(),
                endpoint: err
                    .url()
                    .map(|url| url.path().to_string())
                    .unwrap_or_default(),
            };
        }
        ApiError::Transport(err.to_string())
    }
}

impl Error {
    /// Returns the i18n key for the failure reason shown to the user.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Error::Io(_) => "error-reason-io",
            Error::Config(_) => "error-reason-config",
            Error::Api(err) => err.i18n_key(),
        }
    }

    /// Arguments for the message returned by [`Error::i18n_key`].
    pub fn i18n_args(&self) -> Vec<(&'static str, String)> {
        match self {
            Error::Api(err) => err.i18n_args(),
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Api(e) => write!(f, "API Error: {}", e),
        }
    }
}

impl From<ApiError> for Error {
    fn from(err: ApiError) -> Self {
        Error::Api(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Api(err.into())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn status_error_mentions_code_and_endpoint() {
        let err = ApiError::Status {
            status: 404,
            endpoint: "/api/delete/a.png".into(),
        };
        let text = err.to_string();
        assert!(text.contains("404"));
        assert!(text.contains("/api/delete/a.png"));
    }

    #[test]
    fn api_error_i18n_keys() {
        assert_eq!(
            ApiError::Transport("refused".into()).i18n_key(),
            "api-error-transport"
        );
        assert_eq!(ApiError::Decode("eof".into()).i18n_key(), "api-error-decode");
        assert_eq!(
            ApiError::InvalidUrl("ftp://x".into()).i18n_key(),
            "api-error-invalid-url"
        );
    }

    #[test]
    fn status_error_exposes_status_argument() {
        let err = ApiError::Status {
            status: 500,
            endpoint: "/api/images".into(),
        };
        assert_eq!(err.i18n_args(), vec![("status", "500".to_string())]);
        assert!(err.is_status(500));
        assert!(!err.is_status(401));
    }

    #[test]
    fn wrapped_api_error_keeps_its_key() {
        let err: Error = ApiError::Transport("timeout".into()).into();
        assert_eq!(err.i18n_key(), "api-error-transport");
        assert!(format!("{}", err).starts_with("API Error:"));
    }
}
