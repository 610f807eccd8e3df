//! The watch subsystem: a lazy, cancellable stream of change events.
//!
//! A watch call returns a [`WatchStream`] immediately; a background reader
//! task owns the connection and feeds decoded events through a bounded
//! channel. The task stops on end-of-transport, on the first mid-stream
//! failure, or when the stream's [`WatchCanceller`] fires, whichever comes
//! first. This layer never reconnects: resuming is the caller's decision,
//! using the last seen object's `resourceVersion` as the next cursor.
use std::{
    io,
    pin::Pin,
    task::{Context, Poll},
};

use futures::{Stream, StreamExt};
use serde::de::DeserializeOwned;
use tokio::sync::mpsc;
use tokio_util::{
    codec::{FramedRead, LinesCodec, LinesCodecError},
    io::StreamReader,
    sync::CancellationToken,
};

use crate::{
    api::Api,
    client::{Body, Client},
    error::classify,
    Error, Result,
};
use http_body_util::BodyExt;
use rudder_core::{params::WatchParams, watch::WatchEvent};

// Bounded so a stalled consumer backpressures the reader instead of
// buffering the server's event history.
const EVENT_BUFFER: usize = 32;

impl<K> Api<K>
where
    K: DeserializeOwned + Send + 'static,
{
    /// Watch the collection for changes, optionally from a starting cursor.
    ///
    /// Without a cursor the server starts from its current state. The call
    /// does not wait for the connection: setup errors arrive as the first
    /// stream item. A single consumer reads the stream; cancellation via
    /// [`WatchStream::canceller`] is safe from any task at any point,
    /// including before the connection is established.
    ///
    /// Must be called within a tokio runtime.
    pub fn watch(&self, wp: &WatchParams, cursor: Option<&str>) -> Result<WatchStream<K>> {
        let request = self.request.watch(wp, cursor)?;
        let token = CancellationToken::new();
        let (tx, events) = mpsc::channel(EVENT_BUFFER);
        tracing::trace!(uri = %request.uri(), "starting watch");
        tokio::spawn(run_watch(self.client.clone(), request, tx, token.clone()));
        Ok(WatchStream { events, token })
    }
}

/// A stream of [`WatchEvent`]s for a watched collection.
///
/// Lazy and unbounded: it ends only when the server closes the connection
/// (end of stream), a failure occurs (one final `Err` item), or it is
/// cancelled (no further items). Dropping the stream cancels the watch.
pub struct WatchStream<K> {
    events: mpsc::Receiver<Result<WatchEvent<K>>>,
    token: CancellationToken,
}

impl<K> WatchStream<K> {
    /// A handle that cancels this watch when fired.
    ///
    /// Cloneable and idempotent; callable from any task.
    pub fn canceller(&self) -> WatchCanceller {
        WatchCanceller(self.token.clone())
    }
}

impl<K> Stream for WatchStream<K> {
    type Item = Result<WatchEvent<K>>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().events.poll_recv(cx)
    }
}

impl<K> Drop for WatchStream<K> {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Cancellation handle for a [`WatchStream`].
#[derive(Clone, Debug)]
pub struct WatchCanceller(CancellationToken);

impl WatchCanceller {
    /// Cancel the watch: abort the connection (or connection attempt),
    /// discard partially decoded bytes and deliver no further events.
    pub fn cancel(&self) {
        self.0.cancel();
    }
}

async fn run_watch<K>(
    client: Client,
    request: http::Request<Vec<u8>>,
    tx: mpsc::Sender<Result<WatchEvent<K>>>,
    token: CancellationToken,
) where
    K: DeserializeOwned + Send + 'static,
{
    let res = tokio::select! {
        _ = token.cancelled() => return,
        res = client.send(request.map(Body::from)) => res,
    };
    let res = match res {
        Ok(res) => res,
        Err(err) => {
            deliver(&tx, &token, Err(Error::Stream(Box::new(err)))).await;
            return;
        }
    };

    let status = res.status();
    if status.is_client_error() || status.is_server_error() {
        let text = tokio::select! {
            _ = token.cancelled() => return,
            body = res.into_body().collect() => match body {
                Ok(body) => String::from_utf8_lossy(&body.to_bytes()).into_owned(),
                Err(_) => String::new(),
            },
        };
        deliver(&tx, &token, Err(Error::Stream(Box::new(classify(status, &text))))).await;
        return;
    }

    let reader = StreamReader::new(
        res.into_body()
            .into_data_stream()
            .map(|chunk| chunk.map_err(io::Error::other)),
    );
    let mut frames = FramedRead::new(reader, LinesCodec::new());

    loop {
        let frame = tokio::select! {
            _ = token.cancelled() => return,
            frame = frames.next() => frame,
        };
        match frame {
            // server closed the stream cleanly: end of sequence
            None => return,
            Some(Ok(line)) => match serde_json::from_str::<WatchEvent<K>>(&line) {
                Ok(event) => {
                    if !deliver(&tx, &token, Ok(event)).await {
                        return;
                    }
                }
                // an incomplete trailing frame flushed at end of body
                Err(err) if err.is_eof() => continue,
                Err(err) => {
                    deliver(&tx, &token, Err(Error::Stream(Box::new(Error::Decode(err))))).await;
                    return;
                }
            },
            Some(Err(LinesCodecError::Io(err)))
                if matches!(err.kind(), io::ErrorKind::TimedOut | io::ErrorKind::UnexpectedEof) =>
            {
                // routine for long-lived watches; the caller re-issues with
                // its last seen cursor if it wants to resume
                tracing::debug!("watch poll ended: {err}");
                return;
            }
            Some(Err(err)) => {
                deliver(
                    &tx,
                    &token,
                    Err(Error::Stream(Box::new(Error::Transport(Box::new(err))))),
                )
                .await;
                return;
            }
        }
    }
}

/// Forward one item to the consumer; false when the watch should stop
/// (cancellation fired or the consumer went away).
async fn deliver<K>(
    tx: &mpsc::Sender<Result<WatchEvent<K>>>,
    token: &CancellationToken,
    item: Result<WatchEvent<K>>,
) -> bool {
    tokio::select! {
        _ = token.cancelled() => false,
        sent = tx.send(item) => sent.is_ok(),
    }
}
