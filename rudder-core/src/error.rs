use serde::Serialize;
use thiserror::Error;

/// Possible errors when building requests or encoding bodies.
#[derive(Debug, Error)]
pub enum Error {
    /// The request would be nonsensical and was refused before any I/O.
    #[error("request validation failed: {0}")]
    Validation(String),

    /// The underlying http crate rejected the request parts.
    #[error("failed to build request: {0}")]
    Http(#[source] http::Error),

    /// The body could not be serialized to JSON.
    #[error("failed to serialize body: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Serialize a body, wrapping serde failures in [`Error::Serialize`].
pub(crate) fn to_vec<T: Serialize>(value: &T) -> Result<Vec<u8>, Error> {
    serde_json::to_vec(value).map_err(Error::Serialize)
}
