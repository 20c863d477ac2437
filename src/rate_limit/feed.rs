//! Unbounded channel exposed as a stream.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::mpsc::{self, UnboundedSender};

/// Receiving half of an unbounded channel, usable as a rate-limiter source.
///
/// Sending never blocks, which lets synchronous store callbacks push into it.
/// The channel buffer is the limiter's pending queue.
#[derive(Debug)]
pub struct Feed<T> {
    rx: mpsc::UnboundedReceiver<T>,
}

impl<T> Feed<T> {
    pub fn channel() -> (UnboundedSender<T>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, Self { rx })
    }
}

impl<T> Stream for Feed<T> {
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        self.rx.poll_recv(cx)
    }
}
