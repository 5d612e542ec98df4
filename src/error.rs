//! Error taxonomy for portal operations.
//!
//! Every failure is recovered at the boundary where it occurs (a fetch call,
//! a player event) and converted into a user-facing notice; nothing here is
//! fatal to the process.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Transport-level failure (DNS, connect, TLS, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx HTTP status from the portal.
    #[error("HTTP error: {0}")]
    Http(u16),

    /// Response body did not decode into the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// Empty body where the portal was expected to return data.
    #[error("empty response")]
    EmptyResponse,

    /// Portal URL is not a usable http/https base.
    #[error("invalid portal URL: {0}")]
    InvalidUrl(String),
}
