use crate::hub::Signal;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Ergonomic receive for broadcast subscriptions created by the hub.
///
/// Lagged receivers skip ahead to the oldest retained signal instead of failing.
pub trait SignalReceiverExt<T> {
    /// Receives the next signal, returning `None` once the hub dropped the channel.
    fn recv_signal(&mut self) -> impl Future<Output = Option<Arc<T>>> + Send;
}

impl<T: Signal> SignalReceiverExt<T> for broadcast::Receiver<Arc<T>> {
    async fn recv_signal(&mut self) -> Option<Arc<T>> {
        let mut skipped = 0u64;

        loop {
            match self.recv().await {
                Ok(signal) => {
                    if skipped > 0 {
                        warn!(
                            signal = std::any::type_name::<T>(),
                            skipped, "Signal receiver lagged; continuing from the oldest retained signal"
                        );
                    }
                    return Some(signal);
                },
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    skipped = skipped.saturating_add(n);
                    debug!(signal = std::any::type_name::<T>(), skipped = n, "Signal receiver lagged");
                },
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
