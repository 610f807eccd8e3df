//! Error taxonomy and the HTTP response classifier.
use rudder_core::{
    registry::{BindingConflict, MissingBinding},
    response::Status,
};
use thiserror::Error;

/// A failure reported by the server, with its HTTP code and status payload.
///
/// Constructed once per failed call and embedded in the matching [`Error`]
/// variant. `status.code`/`status.reason` are the machine-readable surface;
/// `http_code` is always present even when the body carried no status.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{}: {} (http {http_code})", .status.reason, .status.message)]
pub struct ApiError {
    /// The HTTP status code of the response.
    pub http_code: u16,
    /// The status payload the server returned, or a synthesized one when
    /// the body was not a status document.
    pub status: Status,
}

/// Possible errors from the typed operation layer.
///
/// Every failed operation surfaces as exactly one of these; nothing is
/// retried or swallowed at this layer.
#[derive(Error, Debug)]
pub enum Error {
    /// The named object does not exist (HTTP 404).
    #[error("resource {name:?} not found")]
    NotFound {
        /// Name of the missing object, as reported in the status details.
        name: String,
        /// The underlying server error.
        #[source]
        source: ApiError,
    },

    /// A concurrent write won; the sent `resourceVersion` is stale
    /// (HTTP 409). Retrying is the caller's decision.
    #[error("write conflict: {0}")]
    Conflict(#[source] ApiError),

    /// The server rejected the object as invalid (HTTP 422).
    #[error("rejected by server validation: {0}")]
    Validation(#[source] ApiError),

    /// Any other server-reported failure.
    #[error("api failure: {0}")]
    Api(#[source] ApiError),

    /// A status/scale operation was attempted on a type whose identity does
    /// not enable that facet. No request is sent.
    #[error("{subresource} subresource is not enabled for {kind}")]
    SubresourceDisabled {
        /// The facet that was attempted.
        subresource: &'static str,
        /// Kind of the type missing the facet.
        kind: String,
    },

    /// The type was never registered with an identity.
    #[error(transparent)]
    MissingBinding(#[from] MissingBinding),

    /// The type was registered twice with disagreeing identities.
    #[error(transparent)]
    BindingConflict(#[from] BindingConflict),

    /// A response body could not be decoded into the expected type.
    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The transport failed before a response arrived: connection refused,
    /// timeout, or a body read error.
    #[error("transport failure: {0}")]
    Transport(#[source] tower::BoxError),

    /// A response body was not valid UTF-8.
    #[error("response body is not utf-8: {0}")]
    FromUtf8(#[source] std::string::FromUtf8Error),

    /// The request could not be built or encoded.
    #[error("failed to build request: {0}")]
    BuildRequest(#[from] rudder_core::Error),

    /// A watch stream ended abnormally; wraps the failure encountered
    /// mid-stream.
    #[error("watch stream failed: {0}")]
    Stream(#[source] Box<Error>),
}

/// Map a non-2xx response to its taxonomy variant.
///
/// The body is parsed as a status document; when it is not one, a status is
/// synthesized from the HTTP code so callers always see `http_code` and a
/// message.
pub(crate) fn classify(code: http::StatusCode, body: &str) -> Error {
    let status = serde_json::from_str::<Status>(body).unwrap_or_else(|_| {
        tracing::debug!(%code, "response body is not a status document");
        Status::failure(body, "").with_code(code.as_u16())
    });
    let err = ApiError {
        http_code: code.as_u16(),
        status,
    };
    match code.as_u16() {
        404 => Error::NotFound {
            name: err
                .status
                .details
                .as_ref()
                .map(|d| d.name.clone())
                .unwrap_or_default(),
            source: err,
        },
        409 => Error::Conflict(err),
        422 => Error::Validation(err),
        _ => Error::Api(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_mapping() {
        let err = classify(
            http::StatusCode::NOT_FOUND,
            r#"{"code":404,"reason":"NotFound","message":"x not found","details":{"name":"x"}}"#,
        );
        match err {
            Error::NotFound { name, source } => {
                assert_eq!(name, "x");
                assert_eq!(source.http_code, 404);
                assert_eq!(source.status.code, Some(404));
                assert_eq!(source.status.reason, "NotFound");
            }
            other => panic!("wrong classification: {other}"),
        }
    }

    #[test]
    fn conflict_mapping() {
        let err = classify(
            http::StatusCode::CONFLICT,
            r#"{"code":409,"reason":"Conflict","message":"the object has been modified"}"#,
        );
        assert!(matches!(err, Error::Conflict(ref e) if e.http_code == 409));
    }

    #[test]
    fn unprocessable_maps_to_validation() {
        let err = classify(
            http::StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"code":422,"reason":"Invalid","message":"spec.replicas: must be non-negative"}"#,
        );
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn other_codes_stay_generic() {
        for code in [
            http::StatusCode::BAD_REQUEST,
            http::StatusCode::GONE,
            http::StatusCode::INTERNAL_SERVER_ERROR,
        ] {
            let err = classify(code, r#"{"reason":"Whatever"}"#);
            assert!(matches!(err, Error::Api(_)), "{code} must stay generic");
        }
    }

    #[test]
    fn non_status_body_synthesizes_a_status() {
        let err = classify(http::StatusCode::BAD_GATEWAY, "upstream fell over");
        match err {
            Error::Api(e) => {
                assert_eq!(e.http_code, 502);
                assert_eq!(e.status.code, Some(502));
                assert_eq!(e.status.message, "upstream fell over");
            }
            other => panic!("wrong classification: {other}"),
        }
    }
}
