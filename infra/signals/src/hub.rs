use crate::error::SignalError;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::broadcast;
use tracing::trace;

/// Buffer size for broadcast subscriptions created without an explicit capacity.
pub const DEFAULT_CAPACITY: usize = 64;
const MIN_CAPACITY: usize = 1;

/// Marker trait for types that can travel through a [`SignalHub`].
///
/// Any type that is `Send + Sync + 'static` automatically implements this trait.
pub trait Signal: Any + Send + Sync + 'static {}
impl<T: Any + Send + Sync + 'static> Signal for T {}

/// Handle returned by [`SignalHub::connect`], used to disconnect a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Slot<T> {
    listeners: Vec<(ListenerId, Listener<T>)>,
    sender: Option<broadcast::Sender<Arc<T>>>,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self { listeners: Vec::new(), sender: None }
    }
}

struct HubInner {
    slots: RwLock<FxHashMap<TypeId, Box<dyn Any + Send + Sync>>>,
    capacity: usize,
    next_id: AtomicU64,
    closed: AtomicBool,
}

impl fmt::Debug for HubInner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HubInner")
            .field("signal_types", &self.slots.read().len())
            .field("capacity", &self.capacity)
            .field("closed", &self.closed.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

/// A thread-safe, type-keyed signal hub.
///
/// Each signal type gets its own slot holding synchronous listeners and, lazily, a
/// `tokio` broadcast sender for asynchronous subscribers. Listeners run inline on the
/// emitting thread, in connection order, after the registry lock has been released.
#[derive(Debug, Clone)]
pub struct SignalHub {
    inner: Arc<HubInner>,
}

impl Default for SignalHub {
    fn default() -> Self {
        Self::build(DEFAULT_CAPACITY)
    }
}

impl SignalHub {
    /// Creates a hub whose broadcast subscriptions default to [`DEFAULT_CAPACITY`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a hub with a custom default broadcast capacity.
    ///
    /// # Errors
    /// Returns [`SignalError::InvalidCapacity`] if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Result<Self, SignalError> {
        Ok(Self::build(validate_capacity(capacity)?))
    }

    fn build(capacity: usize) -> Self {
        Self {
            inner: Arc::new(HubInner {
                slots: RwLock::new(FxHashMap::default()),
                capacity,
                next_id: AtomicU64::new(1),
                closed: AtomicBool::new(false),
            }),
        }
    }

    /// Registers a synchronous listener for signals of type `T`.
    ///
    /// # Errors
    /// Returns [`SignalError::Closed`] after [`SignalHub::shutdown`].
    ///
    /// # Examples
    /// ```rust
    /// use pmark_signals::SignalHub;
    /// use std::sync::Arc;
    /// use std::sync::atomic::{AtomicUsize, Ordering};
    ///
    /// struct Redraw;
    ///
    /// # fn main() -> Result<(), pmark_signals::SignalError> {
    /// let hub = SignalHub::new();
    /// let hits = Arc::new(AtomicUsize::new(0));
    /// let counter = Arc::clone(&hits);
    /// hub.connect::<Redraw>(move |_| {
    ///     counter.fetch_add(1, Ordering::SeqCst);
    /// })?;
    /// hub.emit(Redraw)?;
    /// assert_eq!(hits.load(Ordering::SeqCst), 1);
    /// # Ok(())
    /// # }
    /// ```
    pub fn connect<T: Signal>(
        &self,
        listener: impl Fn(&T) + Send + Sync + 'static,
    ) -> Result<ListenerId, SignalError> {
        self.ensure_open::<T>()?;
        let id = ListenerId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        self.with_slot_mut::<T, _>(|slot| slot.listeners.push((id, Arc::new(listener))))?;
        trace!(signal = std::any::type_name::<T>(), ?id, "Listener connected");
        Ok(id)
    }

    /// Removes a listener previously returned by [`SignalHub::connect`].
    ///
    /// Returns `false` when the id is unknown for `T`.
    pub fn disconnect<T: Signal>(&self, id: ListenerId) -> bool {
        let mut slots = self.inner.slots.write();
        let Some(slot) = slots.get_mut(&TypeId::of::<T>()).and_then(|s| s.downcast_mut::<Slot<T>>())
        else {
            return false;
        };
        let before = slot.listeners.len();
        slot.listeners.retain(|(existing, _)| *existing != id);
        before != slot.listeners.len()
    }

    /// Subscribes to `T` through a broadcast channel using the hub's default capacity.
    ///
    /// # Errors
    /// Returns [`SignalError::Closed`] after shutdown.
    pub fn subscribe<T: Signal>(&self) -> Result<broadcast::Receiver<Arc<T>>, SignalError> {
        self.subscribe_with_capacity::<T>(self.inner.capacity)
    }

    /// Subscribes to `T` through a broadcast channel with a specific buffer capacity.
    ///
    /// The capacity only applies when the channel is created; later subscribers share it.
    ///
    /// # Errors
    /// Returns [`SignalError::InvalidCapacity`] if `capacity` is zero, or
    /// [`SignalError::Closed`] after shutdown.
    pub fn subscribe_with_capacity<T: Signal>(
        &self,
        capacity: usize,
    ) -> Result<broadcast::Receiver<Arc<T>>, SignalError> {
        let capacity = validate_capacity(capacity)?;
        self.ensure_open::<T>()?;
        self.with_slot_mut::<T, _>(|slot| {
            slot.sender
                .get_or_insert_with(|| {
                    trace!(signal = std::any::type_name::<T>(), capacity, "Opening broadcast channel");
                    broadcast::channel::<Arc<T>>(capacity).0
                })
                .subscribe()
        })
    }

    /// Emits a signal to every listener and broadcast subscriber of `T`.
    ///
    /// Returns the number of deliveries (listeners invoked plus live receivers).
    ///
    /// # Errors
    /// Returns [`SignalError::TypeMismatch`] if the registry holds a slot of the wrong type.
    pub fn emit<T: Signal>(&self, signal: T) -> Result<usize, SignalError> {
        self.emit_arc(Arc::new(signal))
    }

    /// Emits an already shared signal without re-wrapping it.
    ///
    /// # Errors
    /// Returns [`SignalError::TypeMismatch`] if the registry holds a slot of the wrong type.
    pub fn emit_arc<T: Signal>(&self, signal: Arc<T>) -> Result<usize, SignalError> {
        let (listeners, sender) = {
            let slots = self.inner.slots.read();
            let Some(slot) = slots.get(&TypeId::of::<T>()) else {
                trace!(signal = std::any::type_name::<T>(), "Signal dropped: nobody connected");
                return Ok(0);
            };
            let slot = slot.downcast_ref::<Slot<T>>().ok_or_else(type_mismatch::<T>)?;
            let listeners: Vec<Listener<T>> =
                slot.listeners.iter().map(|(_, listener)| Arc::clone(listener)).collect();
            (listeners, slot.sender.clone())
        };

        for listener in &listeners {
            listener(&signal);
        }

        let received = sender.and_then(|tx| tx.send(signal).ok()).unwrap_or_default();
        let delivered = listeners.len() + received;
        trace!(signal = std::any::type_name::<T>(), delivered, "Signal emitted");
        Ok(delivered)
    }

    /// Number of synchronous listeners currently connected for `T`.
    #[must_use]
    pub fn listener_count<T: Signal>(&self) -> usize {
        self.inner
            .slots
            .read()
            .get(&TypeId::of::<T>())
            .and_then(|s| s.downcast_ref::<Slot<T>>())
            .map_or(0, |slot| slot.listeners.len())
    }

    /// Drops every listener and broadcast channel and refuses new connections.
    ///
    /// Returns the number of signal types that were registered.
    #[must_use]
    pub fn shutdown(&self) -> usize {
        self.inner.closed.store(true, Ordering::Release);
        let mut slots = self.inner.slots.write();
        let count = slots.len();
        slots.clear();
        count
    }

    /// Returns `true` once [`SignalHub::shutdown`] has been called on any clone.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::Acquire)
    }

    fn ensure_open<T: Signal>(&self) -> Result<(), SignalError> {
        if self.is_closed() {
            return Err(SignalError::Closed {
                message: "hub has been shut down".into(),
                context: Some(std::any::type_name::<T>().into()),
            });
        }
        Ok(())
    }

    fn with_slot_mut<T: Signal, R>(
        &self,
        f: impl FnOnce(&mut Slot<T>) -> R,
    ) -> Result<R, SignalError> {
        let mut slots = self.inner.slots.write();
        let slot = slots
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(Slot::<T>::default()) as Box<dyn Any + Send + Sync>)
            .downcast_mut::<Slot<T>>()
            .ok_or_else(type_mismatch::<T>)?;
        Ok(f(slot))
    }
}

fn type_mismatch<T: Signal>() -> SignalError {
    SignalError::TypeMismatch {
        message: std::any::type_name::<T>().into(),
        context: Some("Unexpected signal slot type".into()),
    }
}

fn validate_capacity(capacity: usize) -> Result<usize, SignalError> {
    if capacity < MIN_CAPACITY {
        return Err(SignalError::InvalidCapacity {
            message: format!("capacity must be >= {MIN_CAPACITY}").into(),
            context: None,
        });
    }
    Ok(capacity)
}
