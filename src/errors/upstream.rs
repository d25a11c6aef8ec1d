//! Errors raised by the HTTP clients talking to upstream services.

use reqwest::StatusCode;
use thiserror::Error;

use super::{CoreError, CoreErrorKind};

#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Connection, TLS or timeout failure before a response arrived
    #[error("Request to {service} failed: {source}")]
    Transport {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// Upstream answered with a non-success status
    #[error("{service} responded with {status}: {body}")]
    Status {
        service: &'static str,
        status: StatusCode,
        body: String,
    },

    /// Response body did not match the expected shape
    #[error("Could not decode {service} response: {reason}")]
    Decode {
        service: &'static str,
        reason: String,
    },

    /// Base URL and path could not be joined
    #[error("Invalid URL for {service}: {reason}")]
    InvalidUrl {
        service: &'static str,
        reason: String,
    },
}

impl UpstreamError {
    pub fn service(&self) -> &'static str {
        match self {
            UpstreamError::Transport { service, .. }
            | UpstreamError::Status { service, .. }
            | UpstreamError::Decode { service, .. }
            | UpstreamError::InvalidUrl { service, .. } => service,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            UpstreamError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    fn core_kind(&self) -> CoreErrorKind {
        match self {
            UpstreamError::Transport { .. } => CoreErrorKind::Unavailable,
            UpstreamError::Decode { .. } | UpstreamError::InvalidUrl { .. } => {
                CoreErrorKind::Internal
            }
            UpstreamError::Status { status, .. } => match *status {
                StatusCode::NOT_FOUND => CoreErrorKind::NotFound,
                StatusCode::UNAUTHORIZED => CoreErrorKind::Unauthorized,
                StatusCode::FORBIDDEN => CoreErrorKind::Forbidden,
                StatusCode::CONFLICT => CoreErrorKind::Conflict,
                StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                    CoreErrorKind::Validation
                }
                s if s.is_server_error() => CoreErrorKind::Unavailable,
                _ => CoreErrorKind::Internal,
            },
        }
    }
}

impl From<UpstreamError> for CoreError {
    fn from(err: UpstreamError) -> Self {
        let kind = err.core_kind();
        let service = err.service();
        let status = err.status();

        let mut core = CoreError::new(kind, err.to_string()).with_field("service", service);
        if let Some(status) = status {
            core = core.with_field("status", status.as_u16().to_string());
        }
        core.with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_error(status: StatusCode) -> UpstreamError {
        UpstreamError::Status {
            service: "rest",
            status,
            body: "{}".to_string(),
        }
    }

    #[test]
    fn status_codes_map_to_core_kinds() {
        let cases = [
            (StatusCode::NOT_FOUND, CoreErrorKind::NotFound),
            (StatusCode::UNAUTHORIZED, CoreErrorKind::Unauthorized),
            (StatusCode::FORBIDDEN, CoreErrorKind::Forbidden),
            (StatusCode::CONFLICT, CoreErrorKind::Conflict),
            (StatusCode::BAD_REQUEST, CoreErrorKind::Validation),
            (StatusCode::BAD_GATEWAY, CoreErrorKind::Unavailable),
            (StatusCode::IM_A_TEAPOT, CoreErrorKind::Internal),
        ];

        for (status, kind) in cases {
            let core: CoreError = status_error(status).into();
            assert_eq!(core.kind(), kind, "status {}", status);
        }
    }

    #[test]
    fn conversion_keeps_service_and_status_fields() {
        let core: CoreError = status_error(StatusCode::NOT_FOUND).into();
        let fields = core.fields().unwrap();
        assert_eq!(fields.get("service").map(String::as_str), Some("rest"));
        assert_eq!(fields.get("status").map(String::as_str), Some("404"));
    }
}
