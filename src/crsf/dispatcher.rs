//! # Frame Dispatcher
//!
//! Delivers validated frames to registered handlers.
//!
//! Handlers are called synchronously in registration order. Each dispatch
//! works on a snapshot of the registry, so handlers registered or removed
//! while a dispatch is running only affect later dispatches.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use tracing::trace;

use super::protocol::CrsfFrame;

/// Receiver of validated frames
#[cfg_attr(test, mockall::automock)]
pub trait FrameHandler: Send + Sync {
    /// Handle one frame
    fn handle(&self, frame: &CrsfFrame);
}

impl<F> FrameHandler for F
where
    F: Fn(&CrsfFrame) + Send + Sync,
{
    fn handle(&self, frame: &CrsfFrame) {
        self(frame)
    }
}

/// Token identifying one registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

struct Registration {
    id: Subscription,
    handler: Arc<dyn FrameHandler>,
}

/// Registry of frame handlers
///
/// Cheap to share behind an `Arc`; registration may happen from any thread,
/// concurrently with dispatch.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use crsf_link::crsf::dispatcher::FrameDispatcher;
/// use crsf_link::crsf::protocol::CrsfFrame;
///
/// let dispatcher = FrameDispatcher::new();
/// let subscription = dispatcher.register(Arc::new(|frame: &CrsfFrame| {
///     println!("frame type 0x{:02X}", frame.frame_type);
/// }));
///
/// dispatcher.dispatch(&CrsfFrame::new(0x28, vec![])?);
/// assert!(dispatcher.unregister(subscription));
/// # Ok::<(), crsf_link::error::CrsfError>(())
/// ```
#[derive(Default)]
pub struct FrameDispatcher {
    handlers: RwLock<Vec<Registration>>,
    next_id: AtomicU64,
}

impl std::fmt::Debug for FrameDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameDispatcher")
            .field("handlers", &self.len())
            .finish_non_exhaustive()
    }
}

impl FrameDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler
    ///
    /// Registering the same `Arc` again returns the existing subscription,
    /// so a handler is never delivered a frame twice.
    pub fn register(&self, handler: Arc<dyn FrameHandler>) -> Subscription {
        let mut handlers = self.handlers.write().unwrap_or_else(|e| e.into_inner());

        if let Some(existing) = handlers.iter().find(|r| Arc::ptr_eq(&r.handler, &handler)) {
            return existing.id;
        }

        let id = Subscription(self.next_id.fetch_add(1, Ordering::Relaxed));
        handlers.push(Registration { id, handler });
        trace!("Registered frame handler {:?}", id);
        id
    }

    /// Remove a registration
    ///
    /// Returns `false` if the subscription was not (or no longer) registered.
    pub fn unregister(&self, subscription: Subscription) -> bool {
        let mut handlers = self.handlers.write().unwrap_or_else(|e| e.into_inner());
        let before = handlers.len();
        handlers.retain(|r| r.id != subscription);
        before != handlers.len()
    }

    /// Deliver a frame to every handler registered when the call starts
    pub fn dispatch(&self, frame: &CrsfFrame) {
        // Lock is released before any handler runs
        let snapshot: Vec<Arc<dyn FrameHandler>> = self
            .handlers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|r| Arc::clone(&r.handler))
            .collect();

        for handler in snapshot {
            handler.handle(frame);
        }
    }

    /// Drop every registration
    pub fn clear(&self) {
        self.handlers.write().unwrap_or_else(|e| e.into_inner()).clear();
    }

    /// Number of registered handlers
    pub fn len(&self) -> usize {
        self.handlers.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crsf::protocol::frame_type;
    use std::sync::Mutex;

    fn ping() -> CrsfFrame {
        CrsfFrame::new(frame_type::DEVICE_PING, vec![]).unwrap()
    }

    #[test]
    fn test_dispatch_reaches_mock_handler() {
        let mut mock = MockFrameHandler::new();
        mock.expect_handle()
            .withf(|frame| frame.frame_type == frame_type::DEVICE_PING)
            .times(2)
            .return_const(());

        let dispatcher = FrameDispatcher::new();
        dispatcher.register(Arc::new(mock));

        dispatcher.dispatch(&ping());
        dispatcher.dispatch(&ping());
    }

    #[test]
    fn test_dispatch_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let dispatcher = FrameDispatcher::new();

        for tag in ["a", "b", "c"] {
            let log = Arc::clone(&log);
            dispatcher.register(Arc::new(move |_: &CrsfFrame| log.lock().unwrap().push(tag)));
        }

        dispatcher.dispatch(&ping());
        assert_eq!(*log.lock().unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_duplicate_registration_delivers_once() {
        let count = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&count);
        let handler: Arc<dyn FrameHandler> = Arc::new(move |_: &CrsfFrame| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let dispatcher = FrameDispatcher::new();
        let first = dispatcher.register(Arc::clone(&handler));
        let second = dispatcher.register(Arc::clone(&handler));

        assert_eq!(first, second);
        assert_eq!(dispatcher.len(), 1);

        dispatcher.dispatch(&ping());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unregister_is_idempotent() {
        let dispatcher = FrameDispatcher::new();
        let subscription = dispatcher.register(Arc::new(|_: &CrsfFrame| {}));

        assert!(dispatcher.unregister(subscription));
        assert!(!dispatcher.unregister(subscription));
        assert!(dispatcher.is_empty());
    }

    #[test]
    fn test_unregistered_handler_not_called() {
        let mut mock = MockFrameHandler::new();
        mock.expect_handle().times(0);

        let dispatcher = FrameDispatcher::new();
        let subscription = dispatcher.register(Arc::new(mock));
        dispatcher.unregister(subscription);

        dispatcher.dispatch(&ping());
    }

    #[test]
    fn test_registration_during_dispatch_uses_snapshot() {
        let dispatcher = Arc::new(FrameDispatcher::new());
        let late_calls = Arc::new(AtomicU64::new(0));

        let inner = Arc::clone(&dispatcher);
        let late = Arc::clone(&late_calls);
        dispatcher.register(Arc::new(move |_: &CrsfFrame| {
            let late = Arc::clone(&late);
            inner.register(Arc::new(move |_: &CrsfFrame| {
                late.fetch_add(1, Ordering::SeqCst);
            }));
        }));

        dispatcher.dispatch(&ping());
        assert_eq!(late_calls.load(Ordering::SeqCst), 0);
        assert_eq!(dispatcher.len(), 2);

        dispatcher.dispatch(&ping());
        assert_eq!(late_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unregister_during_dispatch_uses_snapshot() {
        let dispatcher = Arc::new(FrameDispatcher::new());
        let calls = Arc::new(AtomicU64::new(0));
        let victim = Arc::new(Mutex::new(None));

        let inner = Arc::clone(&dispatcher);
        let target = Arc::clone(&victim);
        dispatcher.register(Arc::new(move |_: &CrsfFrame| {
            if let Some(subscription) = *target.lock().unwrap() {
                inner.unregister(subscription);
            }
        }));

        let counter = Arc::clone(&calls);
        let subscription = dispatcher.register(Arc::new(move |_: &CrsfFrame| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        *victim.lock().unwrap() = Some(subscription);

        // Removed by the first handler, still called from this dispatch's snapshot
        dispatcher.dispatch(&ping());
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        dispatcher.dispatch(&ping());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
