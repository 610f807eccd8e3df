//! A basic client for a resource-oriented API server.
//!
//! The [`Client`] owns no connections itself: it wraps a caller-supplied
//! [`tower::Service`] that accepts `http::Request<Body>` and owns the
//! transport concerns (connection pooling, TLS, auth, base uri). On top of
//! that seam it provides JSON decoding and error classification; the typed
//! [`Api`][crate::Api] layer builds on these.
use bytes::Bytes;
use futures::future::BoxFuture;
use http::{Request, Response, StatusCode};
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;
use tower::{buffer::Buffer, util::BoxService, BoxError, Layer, Service, ServiceExt};
use tower_http::map_response_body::MapResponseBodyLayer;

use crate::{error::classify, Error, Result};

mod body;
pub use body::Body;

/// Client for connecting with a resource-oriented API server.
///
/// Cheap to clone; every clone shares the same buffered service. A clone
/// per call is the intended usage, each call is independent.
#[derive(Clone)]
pub struct Client {
    // Buffer for cheap clones, BoxService to erase the stack's type
    inner: Buffer<Request<Body>, BoxFuture<'static, Result<Response<Body>, BoxError>>>,
}

impl Client {
    /// Create a [`Client`] from a `Service` stack.
    ///
    /// The service owns transport, TLS and auth; its response body type is
    /// erased here so middleware stacks compose freely. Must be called
    /// within a tokio runtime.
    pub fn new<S, B>(service: S) -> Self
    where
        S: Service<Request<Body>, Response = Response<B>> + Send + 'static,
        S::Future: Send + 'static,
        S::Error: Into<BoxError>,
        B: http_body::Body<Data = Bytes> + Send + 'static,
        B::Error: Into<BoxError>,
    {
        let service = MapResponseBodyLayer::new(Body::wrap_body)
            .layer(service)
            .map_err(|e| e.into());
        Self {
            inner: Buffer::new(BoxService::new(service), 1024),
        }
    }

    /// Perform a raw request and return the raw response.
    ///
    /// Transport-level failures surface as [`Error::Transport`]; the status
    /// code is not inspected here.
    pub async fn send(&self, request: Request<Body>) -> Result<Response<Body>> {
        let mut svc = self.inner.clone();
        svc.ready()
            .await
            .map_err(Error::Transport)?
            .call(request)
            .await
            .map_err(|err| {
                // Error decorating request
                match err.downcast::<Error>() {
                    Ok(err) => *err,
                    // Error from the transport or another middleware
                    Err(err) => Error::Transport(err),
                }
            })
    }

    /// Perform a request and deserialize the JSON response.
    pub async fn request<T>(&self, request: Request<Vec<u8>>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let text = self.request_text(request).await?;
        serde_json::from_str(&text).map_err(|e| {
            tracing::warn!("failed to decode response: {e}");
            Error::Decode(e)
        })
    }

    /// Perform a request and return the response body as a string.
    ///
    /// Non-2xx responses are classified into the error taxonomy before any
    /// decoding is attempted.
    pub async fn request_text(&self, request: Request<Vec<u8>>) -> Result<String> {
        let res = self.send(request.map(Body::from)).await?;
        let status = res.status();
        let body = res.into_body().collect().await?.to_bytes();
        let text = String::from_utf8(body.to_vec()).map_err(Error::FromUtf8)?;
        handle_api_errors(&text, status)?;
        Ok(text)
    }
}

/// Reject failed responses with a classified error.
///
/// Either the server returned an explicit status payload, or it returned
/// something we could not parse as one; in both cases the caller sees a
/// typed error carrying the HTTP code.
fn handle_api_errors(text: &str, status: StatusCode) -> Result<()> {
    if status.is_client_error() || status.is_server_error() {
        tracing::debug!(%status, "unsuccessful api call");
        Err(classify(status, text))
    } else {
        Ok(())
    }
}
