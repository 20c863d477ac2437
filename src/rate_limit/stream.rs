//! Stream adapter that delivers values as bucket tokens allow.

use std::future::{poll_fn, Future};
use std::pin::Pin;
use std::task::{ready, Context, Poll};

use futures_core::Stream;
use tokio::time::{sleep_until, Instant, Sleep};

use super::bucket::TokenBucket;

/// Rate-limited view of `S`.
///
/// Pulls one value at a time from the source and holds it until a token is
/// available, so arrival order is preserved and nothing is dropped. The
/// source itself buffers everything that arrives in the meantime.
pub struct RateLimited<S: Stream> {
    source: S,
    bucket: TokenBucket,
    held: Option<S::Item>,
    delay: Option<Pin<Box<Sleep>>>,
    released: u64,
}

// `held` is never pinned.
impl<S: Stream + Unpin> Unpin for RateLimited<S> {}

impl<S: Stream + Unpin> RateLimited<S> {
    pub(crate) fn new(source: S, bucket: TokenBucket) -> Self {
        Self {
            source,
            bucket,
            held: None,
            delay: None,
            released: 0,
        }
    }

    /// Wait for the next released value.
    pub async fn next(&mut self) -> Option<S::Item> {
        poll_fn(|cx| Pin::new(&mut *self).poll_next(cx)).await
    }

    /// Number of values released so far.
    pub fn released(&self) -> u64 {
        self.released
    }

    /// True while a value is waiting for a token.
    pub fn is_waiting(&self) -> bool {
        self.held.is_some()
    }
}

impl<S: Stream + Unpin> Stream for RateLimited<S> {
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<S::Item>> {
        let this = self.get_mut();
        loop {
            if this.held.is_none() {
                match Pin::new(&mut this.source).poll_next(cx) {
                    Poll::Ready(Some(item)) => this.held = Some(item),
                    Poll::Ready(None) => return Poll::Ready(None),
                    Poll::Pending => return Poll::Pending,
                }
            }

            match this.bucket.try_acquire(Instant::now()) {
                Ok(()) => {
                    this.delay = None;
                    this.released += 1;
                    tracing::trace!(released = this.released, "Token consumed, value released");
                    return Poll::Ready(this.held.take());
                }
                Err(next_token) => {
                    let delay = this
                        .delay
                        .get_or_insert_with(|| Box::pin(sleep_until(next_token)));
                    if delay.deadline() != next_token {
                        delay.as_mut().reset(next_token);
                    }
                    ready!(delay.as_mut().poll(cx));
                }
            }
        }
    }
}
