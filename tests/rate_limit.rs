mod common;

use common::assert_elapsed;
use tokio::time::{self, Duration, Instant};
use turnsync::rate_limit::{rate_limit, ConfigurationError, Feed, RateLimitConfig};

#[test]
fn zero_capacity_fails_at_construction() {
    assert_eq!(
        rate_limit(RateLimitConfig::new(0, 1000)).unwrap_err(),
        ConfigurationError::ZeroCapacity
    );
}

#[tokio::test(start_paused = true)]
async fn single_token_releases_once_per_window() {
    let (tx, feed) = Feed::channel();
    let mut limited = rate_limit(RateLimitConfig::new(1, 1000)).unwrap().apply(feed);
    let start = Instant::now();

    for value in 1..=3 {
        tx.send(value).unwrap();
    }

    assert_eq!(limited.next().await, Some(1));
    assert_elapsed(start, 0);
    assert_eq!(limited.next().await, Some(2));
    assert_elapsed(start, 1000);
    assert_eq!(limited.next().await, Some(3));
    assert_elapsed(start, 2000);
}

#[tokio::test(start_paused = true)]
async fn burst_up_to_capacity_then_waits() {
    let (tx, feed) = Feed::channel();
    let mut limited = rate_limit(RateLimitConfig::new(2, 1000)).unwrap().apply(feed);
    let start = Instant::now();

    for value in 0..5 {
        tx.send(value).unwrap();
    }

    let mut times = Vec::new();
    for expected in 0..5 {
        assert_eq!(limited.next().await, Some(expected));
        times.push(start.elapsed().as_millis() / 100 * 100);
    }
    assert_eq!(times, vec![0, 0, 1000, 1000, 2000]);
}

#[tokio::test(start_paused = true)]
async fn window_slides_per_token() {
    let (tx, feed) = Feed::channel();
    let mut limited = rate_limit(RateLimitConfig::new(2, 1000)).unwrap().apply(feed);
    let start = Instant::now();

    tx.send("a").unwrap();
    assert_eq!(limited.next().await, Some("a"));

    time::advance(Duration::from_millis(400)).await;
    tx.send("b").unwrap();
    assert_eq!(limited.next().await, Some("b"));
    assert_elapsed(start, 400);

    // "a"'s token returns at 1000, "b"'s at 1400.
    tx.send("c").unwrap();
    tx.send("d").unwrap();
    assert_eq!(limited.next().await, Some("c"));
    assert_elapsed(start, 1000);
    assert_eq!(limited.next().await, Some("d"));
    assert_elapsed(start, 1400);
}

#[tokio::test(start_paused = true)]
async fn never_drops_or_reorders() {
    let (tx, feed) = Feed::channel();
    let mut limited = rate_limit(RateLimitConfig::new(3, 250)).unwrap().apply(feed);

    for value in 0..20 {
        tx.send(value).unwrap();
    }
    drop(tx);

    let mut received = Vec::new();
    while let Some(value) = limited.next().await {
        received.push(value);
    }
    assert_eq!(received, (0..20).collect::<Vec<_>>());
    assert_eq!(limited.released(), 20);
}

#[tokio::test(start_paused = true)]
async fn no_more_than_capacity_in_any_window() {
    let (tx, feed) = Feed::channel();
    let mut limited = rate_limit(RateLimitConfig::new(2, 500)).unwrap().apply(feed);
    let start = Instant::now();

    for value in 0..9 {
        tx.send(value).unwrap();
    }
    drop(tx);

    let mut released = Vec::new();
    while limited.next().await.is_some() {
        released.push(start.elapsed());
    }

    for (i, at) in released.iter().enumerate() {
        let within = released[i..]
            .iter()
            .filter(|t| **t < *at + Duration::from_millis(500))
            .count();
        assert!(within <= 2, "{within} releases within one window");
    }
}

#[tokio::test(start_paused = true)]
async fn value_waits_while_bucket_is_empty() {
    let (tx, feed) = Feed::channel();
    let mut limited = rate_limit(RateLimitConfig::new(1, 1000)).unwrap().apply(feed);

    tx.send(1).unwrap();
    tx.send(2).unwrap();
    assert_eq!(limited.next().await, Some(1));

    let pending = time::timeout(Duration::from_millis(999), limited.next()).await;
    assert!(pending.is_err());
    assert!(limited.is_waiting());

    assert_eq!(limited.next().await, Some(2));
    assert!(!limited.is_waiting());
}

#[tokio::test(start_paused = true)]
async fn each_apply_gets_its_own_bucket() {
    let limit = rate_limit(RateLimitConfig::new(1, 1000)).unwrap();
    let (tx_a, feed_a) = Feed::channel();
    let (tx_b, feed_b) = Feed::channel();
    let mut a = limit.apply(feed_a);
    let mut b = limit.apply(feed_b);
    let start = Instant::now();

    tx_a.send(1).unwrap();
    tx_b.send(1).unwrap();
    assert_eq!(a.next().await, Some(1));
    assert_eq!(b.next().await, Some(1));
    assert_elapsed(start, 0);
}
