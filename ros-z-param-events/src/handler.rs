//! Parameter event callback registry and dispatcher.
//!
//! [`ParameterEventHandler`] subscribes to the `/parameter_events` topic via
//! its owning node's transport and invokes registered callbacks as events
//! arrive. Two kinds of registration exist:
//!
//! - per-parameter: keyed by `(parameter name, fully-qualified node name)`,
//!   invoked with the typed [`Parameter`] extracted from the event;
//! - whole-event: invoked with every [`WireParameterEvent`], regardless of
//!   content.
//!
//! Handles returned from the `add_*` methods own the callback. The registry
//! keeps only weak references: dropping the last `Arc` clone of a handle
//! retires its callback, and the stale entry is pruned during the next
//! dispatch that touches it. Dispatch snapshots the live handles under the
//! registry lock and invokes them after releasing it, so a callback may add
//! or remove registrations (including its own) without deadlocking.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::Builder;
use crate::node_name::{self, NodeNameError};
use crate::qos::QosProfile;
use crate::transport::{EventSubscription, ParameterEventsTransport};
use crate::types::{Parameter, ParameterValue};
use crate::wire::{WireParameter, WireParameterEvent};

/// Well-known topic parameter events are published on.
pub const PARAMETER_EVENTS_TOPIC: &str = "/parameter_events";

pub type ParameterCallback = Box<dyn Fn(&Parameter) + Send + Sync>;
pub type ParameterEventCallback = Box<dyn Fn(&WireParameterEvent) + Send + Sync>;

/// Identity token for one per-parameter registration.
///
/// Owned by the caller; cloning the `Arc` refers to the same registration.
/// Dropping the last clone retires the callback.
pub struct ParameterCallbackHandle {
    parameter_name: String,
    node_name: String,
    callback: ParameterCallback,
}

impl ParameterCallbackHandle {
    pub fn parameter_name(&self) -> &str {
        &self.parameter_name
    }

    /// The fully-qualified node name this registration targets, resolved at
    /// registration time.
    pub fn node_name(&self) -> &str {
        &self.node_name
    }
}

impl fmt::Debug for ParameterCallbackHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterCallbackHandle")
            .field("parameter_name", &self.parameter_name)
            .field("node_name", &self.node_name)
            .finish_non_exhaustive()
    }
}

/// Identity token for one whole-event registration.
pub struct ParameterEventCallbackHandle {
    callback: ParameterEventCallback,
}

impl fmt::Debug for ParameterEventCallbackHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterEventCallbackHandle")
            .finish_non_exhaustive()
    }
}

/// Errors from callback registration and removal.
#[derive(Debug)]
pub enum CallbackError {
    /// The handle, or the (parameter, node) key, is not registered.
    HandleNotFound,
    /// The node path given at registration did not resolve.
    InvalidNodeName(NodeNameError),
}

impl fmt::Display for CallbackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HandleNotFound => write!(f, "Callback handle not registered"),
            Self::InvalidNodeName(e) => write!(f, "Invalid node name: {}", e),
        }
    }
}

impl std::error::Error for CallbackError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidNodeName(e) => Some(e),
            _ => None,
        }
    }
}

impl From<NodeNameError> for CallbackError {
    fn from(e: NodeNameError) -> Self {
        Self::InvalidNodeName(e)
    }
}

/// Registration key: (parameter name, fully-qualified node name).
type CallbackKey = (String, String);

#[derive(Default)]
struct RegistryState {
    parameter_callbacks: HashMap<CallbackKey, Vec<Weak<ParameterCallbackHandle>>>,
    event_callbacks: Vec<Weak<ParameterEventCallbackHandle>>,
}

struct CallbackRegistry {
    state: Mutex<RegistryState>,
    node_name: String,
    namespace: String,
}

impl CallbackRegistry {
    fn add_parameter_callback(
        &self,
        parameter_name: &str,
        node_name: &str,
        callback: ParameterCallback,
    ) -> Result<Arc<ParameterCallbackHandle>, CallbackError> {
        let resolved = node_name::resolve_node_path(node_name, &self.namespace, &self.node_name)?;
        let handle = Arc::new(ParameterCallbackHandle {
            parameter_name: parameter_name.to_string(),
            node_name: resolved.clone(),
            callback,
        });
        self.state
            .lock()
            .parameter_callbacks
            .entry((parameter_name.to_string(), resolved))
            .or_default()
            .push(Arc::downgrade(&handle));
        debug!(
            "[PARAM] registered callback for '{}' on {}",
            handle.parameter_name, handle.node_name
        );
        Ok(handle)
    }

    fn remove_parameter_callback(
        &self,
        handle: &Arc<ParameterCallbackHandle>,
    ) -> Result<(), CallbackError> {
        let key = (handle.parameter_name.clone(), handle.node_name.clone());
        let mut state = self.state.lock();
        let Some(bucket) = state.parameter_callbacks.get_mut(&key) else {
            return Err(CallbackError::HandleNotFound);
        };
        let target = Arc::as_ptr(handle);
        let before = bucket.len();
        bucket.retain(|weak| weak.as_ptr() != target);
        let removed = bucket.len() != before;
        if bucket.is_empty() {
            state.parameter_callbacks.remove(&key);
        }
        if removed {
            debug!(
                "[PARAM] removed callback for '{}' on {}",
                handle.parameter_name, handle.node_name
            );
            Ok(())
        } else {
            Err(CallbackError::HandleNotFound)
        }
    }

    fn remove_parameter_callbacks(
        &self,
        parameter_name: &str,
        node_name: &str,
    ) -> Result<(), CallbackError> {
        let resolved = node_name::resolve_node_path(node_name, &self.namespace, &self.node_name)?;
        let key = (parameter_name.to_string(), resolved);
        self.state
            .lock()
            .parameter_callbacks
            .remove(&key)
            .map(|bucket| {
                debug!(
                    "[PARAM] removed {} callback(s) for '{}' on {}",
                    bucket.len(),
                    key.0,
                    key.1
                );
            })
            .ok_or(CallbackError::HandleNotFound)
    }

    fn add_parameter_event_callback(
        &self,
        callback: ParameterEventCallback,
    ) -> Arc<ParameterEventCallbackHandle> {
        let handle = Arc::new(ParameterEventCallbackHandle { callback });
        self.state
            .lock()
            .event_callbacks
            .push(Arc::downgrade(&handle));
        debug!("[PARAM] registered event callback");
        handle
    }

    fn remove_parameter_event_callback(
        &self,
        handle: &Arc<ParameterEventCallbackHandle>,
    ) -> Result<(), CallbackError> {
        let mut state = self.state.lock();
        let target = Arc::as_ptr(handle);
        let before = state.event_callbacks.len();
        state.event_callbacks.retain(|weak| weak.as_ptr() != target);
        if state.event_callbacks.len() == before {
            Err(CallbackError::HandleNotFound)
        } else {
            Ok(())
        }
    }

    #[tracing::instrument(name = "param_event", skip(self, event), fields(
        node = %event.node,
        new = event.new_parameters.len(),
        changed = event.changed_parameters.len(),
        deleted = event.deleted_parameters.len(),
    ))]
    fn dispatch(&self, event: &WireParameterEvent) {
        self.dispatch_deltas(event, &event.new_parameters, false);
        self.dispatch_deltas(event, &event.changed_parameters, false);
        self.dispatch_deltas(event, &event.deleted_parameters, true);

        let snapshot = {
            let mut state = self.state.lock();
            let mut live = Vec::with_capacity(state.event_callbacks.len());
            state.event_callbacks.retain(|weak| match weak.upgrade() {
                Some(handle) => {
                    live.push(handle);
                    true
                }
                None => false,
            });
            live
        };
        for handle in snapshot {
            (handle.callback)(event);
        }
    }

    fn dispatch_deltas(&self, event: &WireParameterEvent, deltas: &[WireParameter], deleted: bool) {
        for wire in deltas {
            let snapshot = {
                let mut state = self.state.lock();
                let key = (wire.name.clone(), event.node.clone());
                let Some(bucket) = state.parameter_callbacks.get_mut(&key) else {
                    continue;
                };
                let mut live = Vec::with_capacity(bucket.len());
                bucket.retain(|weak| match weak.upgrade() {
                    Some(handle) => {
                        live.push(handle);
                        true
                    }
                    None => false,
                });
                if bucket.is_empty() {
                    state.parameter_callbacks.remove(&key);
                }
                live
            };
            if snapshot.is_empty() {
                continue;
            }
            // Deletions still notify, with the not-set sentinel.
            let param = if deleted {
                Parameter::new(wire.name.clone(), ParameterValue::NotSet)
            } else {
                Parameter::from_wire(wire)
            };
            trace!(
                "[PARAM] '{}' on {}: invoking {} callback(s)",
                param.name,
                event.node,
                snapshot.len()
            );
            for handle in snapshot {
                (handle.callback)(&param);
            }
        }
    }
}

/// Subscribes to parameter events and dispatches registered callbacks.
pub struct ParameterEventHandler {
    registry: Arc<CallbackRegistry>,
    _event_subscription: Box<dyn EventSubscription>,
}

pub struct ParameterEventHandlerBuilder<'a, T> {
    transport: &'a T,
    qos: QosProfile,
}

impl<'a, T> ParameterEventHandlerBuilder<'a, T> {
    pub fn with_qos(mut self, qos: QosProfile) -> Self {
        self.qos = qos;
        self
    }
}

impl<'a, T: ParameterEventsTransport> Builder for ParameterEventHandlerBuilder<'a, T> {
    type Output = ParameterEventHandler;

    fn build(self) -> crate::Result<ParameterEventHandler> {
        let registry = Arc::new(CallbackRegistry {
            state: Mutex::new(RegistryState::default()),
            node_name: self.transport.node_name(),
            namespace: self.transport.node_namespace(),
        });
        let dispatch_registry = registry.clone();
        let subscription = self.transport.subscribe_parameter_events(
            PARAMETER_EVENTS_TOPIC,
            self.qos,
            Arc::new(move |event| dispatch_registry.dispatch(&event)),
        )?;
        Ok(ParameterEventHandler {
            registry,
            _event_subscription: subscription,
        })
    }
}

impl ParameterEventHandler {
    /// Start building a handler on top of the given transport. The default
    /// QoS is [`QosProfile::parameter_events`].
    pub fn builder<T: ParameterEventsTransport>(
        transport: &T,
    ) -> ParameterEventHandlerBuilder<'_, T> {
        ParameterEventHandlerBuilder {
            transport,
            qos: QosProfile::parameter_events(),
        }
    }

    /// Register a callback for a parameter on the owning node.
    pub fn add_parameter_callback<F>(
        &self,
        parameter_name: &str,
        callback: F,
    ) -> Result<Arc<ParameterCallbackHandle>, CallbackError>
    where
        F: Fn(&Parameter) + Send + Sync + 'static,
    {
        self.add_parameter_callback_for_node(parameter_name, "", callback)
    }

    /// Register a callback for a parameter on another node. `node_name` is
    /// resolved now, against the owning node's namespace; an empty path means
    /// the owning node itself.
    pub fn add_parameter_callback_for_node<F>(
        &self,
        parameter_name: &str,
        node_name: &str,
        callback: F,
    ) -> Result<Arc<ParameterCallbackHandle>, CallbackError>
    where
        F: Fn(&Parameter) + Send + Sync + 'static,
    {
        self.registry
            .add_parameter_callback(parameter_name, node_name, Box::new(callback))
    }

    /// Remove a per-parameter registration by its handle.
    ///
    /// Removal is identity-based: only the exact registration the handle was
    /// returned for is removed. Fails with [`CallbackError::HandleNotFound`]
    /// if the handle is not (or no longer) registered.
    pub fn remove_parameter_callback(
        &self,
        handle: &Arc<ParameterCallbackHandle>,
    ) -> Result<(), CallbackError> {
        self.registry.remove_parameter_callback(handle)
    }

    /// Remove every registration for a parameter on the owning node.
    pub fn remove_parameter_callbacks(&self, parameter_name: &str) -> Result<(), CallbackError> {
        self.registry.remove_parameter_callbacks(parameter_name, "")
    }

    /// Remove every registration for a parameter on the given node. Fails
    /// with [`CallbackError::HandleNotFound`] if nothing is registered under
    /// that key.
    pub fn remove_parameter_callbacks_for_node(
        &self,
        parameter_name: &str,
        node_name: &str,
    ) -> Result<(), CallbackError> {
        self.registry
            .remove_parameter_callbacks(parameter_name, node_name)
    }

    /// Register a callback invoked with every parameter event.
    ///
    /// Repeated calls register additional callbacks; all of them fire, in
    /// registration order.
    pub fn add_parameter_event_callback<F>(&self, callback: F) -> Arc<ParameterEventCallbackHandle>
    where
        F: Fn(&WireParameterEvent) + Send + Sync + 'static,
    {
        self.registry.add_parameter_event_callback(Box::new(callback))
    }

    /// Remove a whole-event registration by its handle.
    pub fn remove_parameter_event_callback(
        &self,
        handle: &Arc<ParameterEventCallbackHandle>,
    ) -> Result<(), CallbackError> {
        self.registry.remove_parameter_event_callback(handle)
    }

    /// Feed one event through the dispatcher. The transport subscription
    /// calls this internally; it is public so events from other sources can
    /// be injected.
    pub fn dispatch(&self, event: &WireParameterEvent) {
        self.registry.dispatch(event);
    }

    /// The owning node's fully-qualified name.
    pub fn node_fqn(&self) -> String {
        node_name::node_fqn(&self.registry.namespace, &self.registry.node_name)
    }

    /// Find a parameter in an event's changed or new lists.
    ///
    /// `node_name` filters on the event's originating node; empty matches any
    /// origin. If a name appears in both lists, the changed entry wins.
    /// Deleted parameters are never returned.
    pub fn get_parameter_from_event(
        event: &WireParameterEvent,
        parameter_name: &str,
        node_name: &str,
    ) -> Option<Parameter> {
        if !node_name.is_empty() && event.node != node_name {
            return None;
        }
        event
            .changed_parameters
            .iter()
            .chain(event.new_parameters.iter())
            .find(|wire| wire.name == parameter_name)
            .map(Parameter::from_wire)
    }

    /// Like [`Self::get_parameter_from_event`], but returns a
    /// [`ParameterValue::NotSet`]-valued parameter when absent.
    pub fn parameter_from_event(
        event: &WireParameterEvent,
        parameter_name: &str,
        node_name: &str,
    ) -> Parameter {
        Self::get_parameter_from_event(event, parameter_name, node_name)
            .unwrap_or_else(|| Parameter::new(parameter_name, ParameterValue::NotSet))
    }

    /// Find a parameter in an event originating from the owning node.
    pub fn get_parameter(
        &self,
        event: &WireParameterEvent,
        parameter_name: &str,
    ) -> Option<Parameter> {
        Self::get_parameter_from_event(event, parameter_name, &self.node_fqn())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex as StdMutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::transport::LocalEventBus;
    use crate::wire::{WireParameterValue, parameter_type};

    fn make_handler() -> (LocalEventBus, ParameterEventHandler) {
        let bus = LocalEventBus::new("tester", "/ns");
        let handler = ParameterEventHandler::builder(&bus).build().unwrap();
        (bus, handler)
    }

    fn int_param(name: &str, value: i64) -> WireParameter {
        WireParameter {
            name: name.to_string(),
            value: WireParameterValue {
                r#type: parameter_type::INTEGER,
                integer_value: value,
                ..Default::default()
            },
        }
    }

    fn new_event(node: &str, params: Vec<WireParameter>) -> WireParameterEvent {
        WireParameterEvent {
            node: node.to_string(),
            new_parameters: params,
            ..Default::default()
        }
    }

    #[test]
    fn test_matching_key_invoked_others_not() {
        let (bus, handler) = make_handler();
        let hits = Arc::new(AtomicUsize::new(0));
        let misses = Arc::new(AtomicUsize::new(0));

        let h = hits.clone();
        let _foo = handler
            .add_parameter_callback_for_node("foo", "/n", move |p| {
                assert_eq!(p.value, ParameterValue::Integer(1));
                h.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
        let m1 = misses.clone();
        let _bar = handler
            .add_parameter_callback_for_node("bar", "/n", move |_| {
                m1.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
        let m2 = misses.clone();
        let _other_node = handler
            .add_parameter_callback_for_node("foo", "/other", move |_| {
                m2.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();

        bus.publish(&new_event("/n", vec![int_param("foo", 1)]));

        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(misses.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_dispatch_in_registration_order() {
        let (bus, handler) = make_handler();
        let order = Arc::new(StdMutex::new(Vec::new()));

        let mut handles = Vec::new();
        for i in 0..4 {
            let order = order.clone();
            handles.push(
                handler
                    .add_parameter_callback_for_node("p", "/n", move |_| {
                        order.lock().unwrap().push(i);
                    })
                    .unwrap(),
            );
        }

        bus.publish(&new_event("/n", vec![int_param("p", 0)]));
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_removed_handle_not_invoked() {
        let (bus, handler) = make_handler();
        let count = Arc::new(AtomicUsize::new(0));

        let c = count.clone();
        let handle = handler
            .add_parameter_callback_for_node("p", "/n", move |_| {
                c.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();

        bus.publish(&new_event("/n", vec![int_param("p", 0)]));
        assert_eq!(count.load(Ordering::SeqCst), 1);

        handler.remove_parameter_callback(&handle).unwrap();
        bus.publish(&new_event("/n", vec![int_param("p", 0)]));
        assert_eq!(count.load(Ordering::SeqCst), 1);

        // Second removal of the same handle reports HandleNotFound.
        assert!(matches!(
            handler.remove_parameter_callback(&handle),
            Err(CallbackError::HandleNotFound)
        ));
    }

    #[test]
    fn test_dropped_handle_is_pruned_not_invoked() {
        let (bus, handler) = make_handler();
        let count = Arc::new(AtomicUsize::new(0));

        let c = count.clone();
        let handle = handler
            .add_parameter_callback_for_node("p", "/n", move |_| {
                c.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
        drop(handle);

        // Stale weak entry is skipped and pruned without error.
        bus.publish(&new_event("/n", vec![int_param("p", 0)]));
        assert_eq!(count.load(Ordering::SeqCst), 0);

        // The bucket was emptied, so bulk removal now reports not-found.
        assert!(matches!(
            handler.remove_parameter_callbacks_for_node("p", "/n"),
            Err(CallbackError::HandleNotFound)
        ));
    }

    #[test]
    fn test_bulk_removal_erases_all_registrants() {
        let (bus, handler) = make_handler();
        let count = Arc::new(AtomicUsize::new(0));

        let c1 = count.clone();
        let _h1 = handler
            .add_parameter_callback_for_node("p", "/n", move |_| {
                c1.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
        let c2 = count.clone();
        let _h2 = handler
            .add_parameter_callback_for_node("p", "/n", move |_| {
                c2.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();

        handler.remove_parameter_callbacks_for_node("p", "/n").unwrap();
        bus.publish(&new_event("/n", vec![int_param("p", 0)]));
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_unregistered_key_removal_fails() {
        let (_bus, handler) = make_handler();
        assert!(matches!(
            handler.remove_parameter_callbacks("nope"),
            Err(CallbackError::HandleNotFound)
        ));
    }

    #[test]
    fn test_empty_node_name_resolves_to_own_fqn() {
        let (bus, handler) = make_handler();
        assert_eq!(handler.node_fqn(), "/ns/tester");

        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        let handle = handler
            .add_parameter_callback("own", move |_| {
                c.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
        assert_eq!(handle.node_name(), "/ns/tester");

        bus.publish(&new_event("/ns/tester", vec![int_param("own", 0)]));
        bus.publish(&new_event("/elsewhere", vec![int_param("own", 0)]));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_deleted_parameter_passes_not_set() {
        let (bus, handler) = make_handler();
        let seen = Arc::new(StdMutex::new(Vec::new()));

        let s = seen.clone();
        let _h = handler
            .add_parameter_callback_for_node("gone", "/n", move |p| {
                s.lock().unwrap().push(p.value.clone());
            })
            .unwrap();

        let event = WireParameterEvent {
            node: "/n".to_string(),
            deleted_parameters: vec![int_param("gone", 9)],
            ..Default::default()
        };
        bus.publish(&event);

        assert_eq!(*seen.lock().unwrap(), vec![ParameterValue::NotSet]);
    }

    #[test]
    fn test_event_callbacks_fire_for_every_event_in_order() {
        let (bus, handler) = make_handler();
        let order = Arc::new(StdMutex::new(Vec::new()));

        let o1 = order.clone();
        let _e1 = handler.add_parameter_event_callback(move |_| o1.lock().unwrap().push(1));
        let o2 = order.clone();
        let _e2 = handler.add_parameter_event_callback(move |_| o2.lock().unwrap().push(2));

        // Fires even for an event carrying no matching parameters at all.
        bus.publish(&new_event("/n", vec![]));
        bus.publish(&new_event("/m", vec![int_param("x", 1)]));

        assert_eq!(*order.lock().unwrap(), vec![1, 2, 1, 2]);
    }

    #[test]
    fn test_event_callback_removal() {
        let (bus, handler) = make_handler();
        let count = Arc::new(AtomicUsize::new(0));

        let c = count.clone();
        let handle = handler.add_parameter_event_callback(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });

        bus.publish(&new_event("/n", vec![]));
        handler.remove_parameter_event_callback(&handle).unwrap();
        bus.publish(&new_event("/n", vec![]));

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(matches!(
            handler.remove_parameter_event_callback(&handle),
            Err(CallbackError::HandleNotFound)
        ));
    }

    #[test]
    fn test_callback_can_remove_itself_during_dispatch() {
        let (bus, handler) = make_handler();
        let handler = Arc::new(handler);
        let count = Arc::new(AtomicUsize::new(0));

        let slot: Arc<StdMutex<Option<Arc<ParameterCallbackHandle>>>> =
            Arc::new(StdMutex::new(None));
        let c = count.clone();
        let slot_in_cb = slot.clone();
        let handler_in_cb = handler.clone();
        let handle = handler
            .add_parameter_callback_for_node("once", "/n", move |_| {
                c.fetch_add(1, Ordering::SeqCst);
                if let Some(own) = slot_in_cb.lock().unwrap().take() {
                    handler_in_cb.remove_parameter_callback(&own).unwrap();
                }
            })
            .unwrap();
        *slot.lock().unwrap() = Some(handle);

        bus.publish(&new_event("/n", vec![int_param("once", 0)]));
        bus.publish(&new_event("/n", vec![int_param("once", 0)]));

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_changed_takes_precedence_over_new() {
        let event = WireParameterEvent {
            node: "/n".to_string(),
            new_parameters: vec![int_param("p", 1)],
            changed_parameters: vec![int_param("p", 2)],
            ..Default::default()
        };

        let param =
            ParameterEventHandler::get_parameter_from_event(&event, "p", "/n").unwrap();
        assert_eq!(param.value, ParameterValue::Integer(2));
    }

    #[test]
    fn test_get_parameter_from_event_filters_and_misses() {
        let event = WireParameterEvent {
            node: "/n".to_string(),
            new_parameters: vec![int_param("p", 1)],
            deleted_parameters: vec![int_param("q", 3)],
            ..Default::default()
        };

        // Wrong node filter.
        assert!(ParameterEventHandler::get_parameter_from_event(&event, "p", "/other").is_none());
        // Empty filter matches the event's own node.
        assert!(ParameterEventHandler::get_parameter_from_event(&event, "p", "").is_some());
        // Deleted entries are never found.
        assert!(ParameterEventHandler::get_parameter_from_event(&event, "q", "/n").is_none());

        // Sentinel form.
        let missing = ParameterEventHandler::parameter_from_event(&event, "absent", "/n");
        assert_eq!(missing.name, "absent");
        assert_eq!(missing.value, ParameterValue::NotSet);
    }

    #[test]
    fn test_invalid_node_path_rejected_at_registration() {
        let (_bus, handler) = make_handler();
        let result = handler.add_parameter_callback_for_node("p", "bad-name", |_| {});
        assert!(matches!(result, Err(CallbackError::InvalidNodeName(_))));
    }
}
