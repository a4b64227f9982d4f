//! # formwright-signals
//!
//! Signal dispatcher for the formwright engine. Lets a host observe form
//! events ("values changed", "error message changed") without the engine
//! knowing who is listening.
//!
//! ## Usage
//!
//! ```
//! use formwright_signals::Signal;
//! use std::sync::Arc;
//!
//! let signal: Signal<String> = Signal::new();
//!
//! signal.connect("printer", Arc::new(|msg: &String| {
//!     println!("Received: {msg}");
//! }));
//!
//! assert_eq!(signal.send(&"hello".to_string()), 1);
//! ```

use std::fmt;
use std::sync::{Arc, RwLock};

/// The type signature for a signal receiver callback.
///
/// Receivers must be `Send + Sync` so that a form can be moved between
/// threads together with its observers.
pub type SignalReceiver<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// A signal that can be connected to and dispatched.
///
/// Each signal carries a payload type `T`. Receivers are called in the order
/// they were connected.
pub struct Signal<T: 'static> {
    receivers: RwLock<Vec<(String, SignalReceiver<T>)>>,
}

impl<T: 'static> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("receivers", &self.receiver_ids())
            .finish()
    }
}

impl<T: 'static> Signal<T> {
    /// Creates a new signal with no connected receivers.
    pub fn new() -> Self {
        Self {
            receivers: RwLock::new(Vec::new()),
        }
    }

    /// Connects a receiver to this signal.
    ///
    /// The `receiver_id` is used to identify the receiver for later disconnection.
    /// If a receiver with the same ID is already connected, it is replaced.
    pub fn connect(&self, receiver_id: impl Into<String>, callback: SignalReceiver<T>) {
        let id = receiver_id.into();
        let mut receivers = self.receivers.write().expect("signal lock poisoned");

        if let Some(entry) = receivers.iter_mut().find(|(rid, _)| *rid == id) {
            entry.1 = callback;
        } else {
            receivers.push((id, callback));
        }
    }

    /// Connects a plain closure, wrapping it in an `Arc`.
    pub fn connect_fn<F>(&self, receiver_id: impl Into<String>, callback: F)
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.connect(receiver_id, Arc::new(callback));
    }

    /// Disconnects the receiver with the given ID.
    ///
    /// Returns `true` if a receiver was found and removed.
    pub fn disconnect(&self, receiver_id: &str) -> bool {
        let mut receivers = self.receivers.write().expect("signal lock poisoned");
        let len_before = receivers.len();
        receivers.retain(|(id, _)| id != receiver_id);
        receivers.len() < len_before
    }

    /// Sends the signal to all connected receivers.
    ///
    /// Receivers are called in connection order. Returns the number of
    /// receivers that were called.
    pub fn send(&self, payload: &T) -> usize {
        // Snapshot the list so a receiver may connect or disconnect while
        // being called without deadlocking on the lock.
        let receivers: Vec<SignalReceiver<T>> = self
            .receivers
            .read()
            .expect("signal lock poisoned")
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();
        for callback in &receivers {
            callback(payload);
        }
        receivers.len()
    }

    /// Returns the number of connected receivers.
    pub fn receiver_count(&self) -> usize {
        self.receivers.read().expect("signal lock poisoned").len()
    }

    /// Returns the IDs of connected receivers in connection order.
    pub fn receiver_ids(&self) -> Vec<String> {
        self.receivers
            .read()
            .expect("signal lock poisoned")
            .iter()
            .map(|(id, _)| id.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[test]
    fn test_signal_connect_and_send() {
        let signal: Signal<String> = Signal::new();
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = count.clone();

        signal.connect(
            "counter",
            Arc::new(move |_: &String| {
                count_clone.fetch_add(1, Ordering::SeqCst);
            }),
        );

        assert_eq!(signal.send(&"hello".to_string()), 1);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_signal_multiple_receivers_in_order() {
        let signal: Signal<i32> = Signal::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for i in 0..3 {
            let s = seen.clone();
            signal.connect_fn(format!("receiver_{i}"), move |v: &i32| {
                s.lock().unwrap().push((i, *v));
            });
        }

        assert_eq!(signal.receiver_count(), 3);
        assert_eq!(signal.send(&42), 3);
        assert_eq!(*seen.lock().unwrap(), vec![(0, 42), (1, 42), (2, 42)]);
    }

    #[test]
    fn test_signal_disconnect() {
        let signal: Signal<()> = Signal::new();

        signal.connect_fn("a", |(): &()| {});
        signal.connect_fn("b", |(): &()| {});
        assert_eq!(signal.receiver_count(), 2);

        assert!(signal.disconnect("a"));
        assert_eq!(signal.receiver_ids(), vec!["b".to_string()]);

        assert!(!signal.disconnect("nonexistent"));
        assert_eq!(signal.receiver_count(), 1);
    }

    #[test]
    fn test_signal_replace_receiver() {
        let signal: Signal<()> = Signal::new();
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = count.clone();

        signal.connect_fn("handler", |(): &()| {});
        signal.connect_fn("handler", move |(): &()| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(signal.receiver_count(), 1);
        signal.send(&());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_receiver_may_disconnect_itself() {
        let signal: Arc<Signal<()>> = Arc::new(Signal::new());
        let inner = Arc::downgrade(&signal);
        signal.connect_fn("once", move |(): &()| {
            if let Some(s) = inner.upgrade() {
                s.disconnect("once");
            }
        });

        assert_eq!(signal.send(&()), 1);
        assert_eq!(signal.send(&()), 0);
    }

    #[test]
    fn test_empty_signal_send() {
        let signal: Signal<()> = Signal::default();
        assert_eq!(signal.send(&()), 0);
    }
}
