use pmark_signals::{SignalError, SignalHub, SignalReceiverExt};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Changed(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
struct Other(&'static str);

#[tokio::test]
async fn broadcast_subscriber_receives_emitted_signal() {
    let hub = SignalHub::new();
    let mut rx = hub.subscribe::<Changed>().unwrap();

    assert_eq!(hub.emit(Changed(42)).unwrap(), 1);

    let received = rx.recv_signal().await.unwrap();
    assert_eq!(*received, Changed(42));
}

#[tokio::test]
async fn listeners_and_subscribers_both_count_as_deliveries() {
    let hub = SignalHub::new();
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);
    hub.connect::<Changed>(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap();
    let mut rx = hub.subscribe::<Changed>().unwrap();

    assert_eq!(hub.emit(Changed(1)).unwrap(), 2);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert_eq!(rx.recv_signal().await.unwrap().0, 1);
}

#[tokio::test]
async fn lagged_subscriber_skips_to_retained_tail() {
    let hub = SignalHub::new();
    let capacity = 2;
    let mut rx = hub.subscribe_with_capacity::<Changed>(capacity).unwrap();

    let total = 50;
    for i in 0..total {
        hub.emit(Changed(i)).unwrap();
    }

    let first = rx.recv_signal().await.unwrap();
    assert!(first.0 >= total - capacity, "expected the retained tail, got {}", first.0);
    let second = rx.recv_signal().await.unwrap();
    assert_eq!(second.0, first.0 + 1);
}

#[tokio::test]
async fn signal_types_are_isolated() {
    let hub = SignalHub::new();
    let mut changed = hub.subscribe::<Changed>().unwrap();
    let mut other = hub.subscribe::<Other>().unwrap();

    hub.emit(Changed(7)).unwrap();
    hub.emit(Other("legacy")).unwrap();

    assert_eq!(changed.recv_signal().await.unwrap().0, 7);
    assert_eq!(other.recv_signal().await.unwrap().0, "legacy");
}

#[tokio::test]
async fn shutdown_closes_subscriptions() {
    let hub = SignalHub::new();
    let mut rx = hub.subscribe::<Changed>().unwrap();

    assert_eq!(hub.shutdown(), 1);

    assert!(rx.recv_signal().await.is_none());
    assert!(matches!(hub.subscribe::<Changed>(), Err(SignalError::Closed { .. })));
}
