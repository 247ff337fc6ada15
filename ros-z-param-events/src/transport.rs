//! Seam to the pub/sub transport delivering parameter events.
//!
//! The handler does not talk to a wire protocol itself; it asks its owning
//! node for a subscription to the parameter events topic and hands over a
//! callback. Anything that can provide node identity and such a subscription
//! implements [`ParameterEventsTransport`].
//!
//! [`LocalEventBus`] is an in-process implementation used by tests and
//! examples.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::Result;
use crate::qos::QosProfile;
use crate::wire::WireParameterEvent;

/// Guard for an active subscription. Dropping it releases the subscription;
/// no events are delivered afterwards.
pub trait EventSubscription: Send + Sync {}

pub type EventHandlerFn = Arc<dyn Fn(WireParameterEvent) + Send + Sync>;

/// Node-side capabilities the handler needs: identity plus the ability to
/// subscribe to the parameter events topic. Events may arrive on any thread
/// the transport chooses, one at a time or concurrently.
pub trait ParameterEventsTransport {
    fn node_name(&self) -> String;
    fn node_namespace(&self) -> String;

    /// Subscribe to `topic` with the given QoS, delivering every decoded
    /// event to `handler`.
    fn subscribe_parameter_events(
        &self,
        topic: &str,
        qos: QosProfile,
        handler: EventHandlerFn,
    ) -> Result<Box<dyn EventSubscription>>;
}

/// How a subscription consumes incoming events.
enum DataHandler<T> {
    /// Queue-based: store for later retrieval
    Queue(flume::Sender<T>),
    /// Direct callback: process immediately
    Callback(Arc<dyn Fn(T) + Send + Sync>),
}

impl<T> Clone for DataHandler<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Queue(tx) => Self::Queue(tx.clone()),
            Self::Callback(cb) => Self::Callback(cb.clone()),
        }
    }
}

impl<T> DataHandler<T> {
    /// Returns false once the consumer is gone.
    fn handle(&self, data: T) -> bool {
        match self {
            DataHandler::Queue(tx) => tx.send(data).is_ok(),
            DataHandler::Callback(cb) => {
                cb(data);
                true
            }
        }
    }
}

type BusEntries = Mutex<Vec<(usize, DataHandler<WireParameterEvent>)>>;

/// In-process parameter event bus.
///
/// `publish` fans an event out to every live subscription on the calling
/// thread. Disconnected queue subscriptions are pruned as they are
/// encountered.
pub struct LocalEventBus {
    name: String,
    namespace: String,
    entries: Arc<BusEntries>,
    next_id: AtomicUsize,
}

impl LocalEventBus {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            entries: Arc::new(Mutex::new(Vec::new())),
            next_id: AtomicUsize::new(0),
        }
    }

    /// Deliver an event to all live subscriptions, in subscription order.
    pub fn publish(&self, event: &WireParameterEvent) {
        // Snapshot under the lock, deliver outside it, so a consumer may
        // subscribe or unsubscribe from within its callback.
        let snapshot: Vec<(usize, DataHandler<WireParameterEvent>)> =
            self.entries.lock().clone();
        trace!(
            "[BUS] publishing event from {} to {} subscription(s)",
            event.node,
            snapshot.len()
        );
        let mut dead = Vec::new();
        for (id, handler) in &snapshot {
            if !handler.handle(event.clone()) {
                dead.push(*id);
            }
        }
        if !dead.is_empty() {
            self.entries
                .lock()
                .retain(|(id, _)| !dead.contains(id));
        }
    }

    /// Subscribe with a queue instead of a callback; events are pulled from
    /// the returned receiver.
    pub fn subscribe_queue(
        &self,
    ) -> (Box<dyn EventSubscription>, flume::Receiver<WireParameterEvent>) {
        let (tx, rx) = flume::unbounded();
        (self.attach(DataHandler::Queue(tx)), rx)
    }

    fn attach(&self, handler: DataHandler<WireParameterEvent>) -> Box<dyn EventSubscription> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.entries.lock().push((id, handler));
        debug!("[BUS] subscription {} attached", id);
        Box::new(LocalSubscription {
            entries: Arc::downgrade(&self.entries),
            id,
        })
    }
}

impl ParameterEventsTransport for LocalEventBus {
    fn node_name(&self) -> String {
        self.name.clone()
    }

    fn node_namespace(&self) -> String {
        self.namespace.clone()
    }

    fn subscribe_parameter_events(
        &self,
        topic: &str,
        qos: QosProfile,
        handler: EventHandlerFn,
    ) -> Result<Box<dyn EventSubscription>> {
        debug!("[BUS] subscribing to {} with {}", topic, qos);
        Ok(self.attach(DataHandler::Callback(handler)))
    }
}

struct LocalSubscription {
    entries: Weak<BusEntries>,
    id: usize,
}

impl EventSubscription for LocalSubscription {}

impl Drop for LocalSubscription {
    fn drop(&mut self) {
        if let Some(entries) = self.entries.upgrade() {
            entries.lock().retain(|(id, _)| *id != self.id);
            debug!("[BUS] subscription {} released", self.id);
        }
    }
}
