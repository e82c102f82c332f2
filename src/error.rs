/******************************************************************************
    Author: Joaquín Béjar García
    Email: jb@taunais.com
    Date: 2/10/26
 ******************************************************************************/
use reqwest::StatusCode;
use std::error::Error;
use std::fmt;
use std::fmt::{Display, Formatter};

pub type BoxError = Box<dyn Error + Send + Sync>;

#[derive(Debug)]
pub enum SubscriptionError {
    /// A required setting is missing or a supplied value is malformed.
    /// Raised before any network access.
    Validation(String),
    /// The underlying HTTP call failed before a response was obtained.
    Transport { context: String, source: BoxError },
    /// The platform answered 400 or 503 with a structured error body.
    Platform {
        status: StatusCode,
        error_type: Option<String>,
        message: Option<String>,
        code: Option<u16>,
    },
    /// A body that should have been JSON of `target` shape could not be parsed.
    Decode {
        target: &'static str,
        body: String,
        source: serde_json::Error,
    },
    UnknownResponse { status: StatusCode, body: String },
}

impl SubscriptionError {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        SubscriptionError::Validation(msg.into())
    }

    pub(crate) fn transport(context: impl Into<String>, source: impl Into<BoxError>) -> Self {
        SubscriptionError::Transport {
            context: context.into(),
            source: source.into(),
        }
    }

    /// 503 from the platform means the credential exceeded its request quota.
    pub fn is_rate_limited(&self) -> bool {
        matches!(
            self,
            SubscriptionError::Platform { status, .. } if *status == StatusCode::SERVICE_UNAVAILABLE
        )
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, SubscriptionError::Transport { .. }) || self.is_rate_limited()
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            SubscriptionError::Platform { status, .. }
            | SubscriptionError::UnknownResponse { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl Display for SubscriptionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SubscriptionError::Validation(msg) => write!(f, "validation error: {msg}"),
            SubscriptionError::Transport { context, source } => {
                write!(f, "transport error: {context}: {source}")
            }
            SubscriptionError::Platform {
                status,
                error_type,
                message,
                code,
            } => {
                write!(
                    f,
                    "instagram error {}: {}",
                    error_type.as_deref().unwrap_or("UnknownError"),
                    message.as_deref().unwrap_or("no error message")
                )?;
                match code {
                    Some(code) => write!(f, " (code {code}, http status {status})"),
                    None => write!(f, " (http status {status})"),
                }
            }
            SubscriptionError::Decode { target, body, source } => {
                write!(f, "failed to decode {target} from response {body}: {source}")
            }
            SubscriptionError::UnknownResponse { status, body } => {
                write!(f, "unknown error response code: {} {}", status.as_u16(), body)
            }
        }
    }
}

impl Error for SubscriptionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SubscriptionError::Transport { source, .. } => Some(source.as_ref()),
            SubscriptionError::Decode { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests_subscription_error {
    use super::*;
    use pretty_assertions::assert_eq;

    fn platform(status: StatusCode) -> SubscriptionError {
        SubscriptionError::Platform {
            status,
            error_type: Some("APINotAllowedError".to_string()),
            message: Some("you cannot view this resource".to_string()),
            code: Some(400),
        }
    }

    #[test]
    fn test_platform_display_includes_type_and_message() {
        let err = platform(StatusCode::BAD_REQUEST);
        assert_eq!(
            err.to_string(),
            "instagram error APINotAllowedError: you cannot view this resource (code 400, http status 400 Bad Request)"
        );
    }

    #[test]
    fn test_rate_limited_only_on_503() {
        assert!(platform(StatusCode::SERVICE_UNAVAILABLE).is_rate_limited());
        assert!(platform(StatusCode::SERVICE_UNAVAILABLE).is_retryable());
        assert!(!platform(StatusCode::BAD_REQUEST).is_rate_limited());
        assert!(!platform(StatusCode::BAD_REQUEST).is_retryable());
    }

    #[test]
    fn test_transport_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = SubscriptionError::transport("Failed to get subscription list", io);
        assert!(err.is_retryable());
        assert!(err.source().is_some());
        assert_eq!(
            err.to_string(),
            "transport error: Failed to get subscription list: refused"
        );
    }

    #[test]
    fn test_unknown_response_display() {
        let err = SubscriptionError::UnknownResponse {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "server exploded".to_string(),
        };
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(
            err.to_string(),
            "unknown error response code: 500 server exploded"
        );
    }

    #[test]
    fn test_validation_has_no_status() {
        let err = SubscriptionError::validation("You must provide a clientId key");
        assert_eq!(err.status(), None);
        assert!(!err.is_retryable());
    }
}
