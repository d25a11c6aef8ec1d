//! Error types shared across the gateway.
//!
//! - **CoreError**: kind-tagged error every service trait returns. The GraphQL
//!   layer and the REST handlers translate it into their own representation.
//! - **UpstreamError**: failures of the HTTP clients, folded into `CoreError`
//!   by response status.

pub mod core_error;
pub mod upstream;

pub use core_error::{CoreError, CoreErrorKind};
pub use upstream::UpstreamError;

/// Result alias used by the service traits
pub type CoreResult<T> = Result<T, CoreError>;
