//! Consumer-side ROS 2 parameter events for ros-z style nodes.
//!
//! Nodes publish a `ParameterEvent` on the well-known `/parameter_events`
//! topic whenever parameters are declared, changed, or deleted. This crate
//! provides the receiving half:
//!
//! - [`ParameterEventHandler`]: subscribes to the topic and dispatches
//!   registered callbacks, either per `(parameter, node)` pair or for every
//!   event.
//! - [`wire`]: the CDR-serializable `rcl_interfaces`-shaped message types.
//! - [`types`]: typed parameter values handed to callbacks.
//! - [`transport`]: the seam to the actual pub/sub transport, plus an
//!   in-process [`transport::LocalEventBus`] for tests and demos.
//!
//! Callback handles are owned by the caller; the handler only observes them
//! through weak references. Dropping a handle (or removing it explicitly)
//! stops its callback from firing.

pub mod handler;
pub mod node_name;
pub mod qos;
pub mod transport;
pub mod types;
pub mod wire;

pub use handler::{
    CallbackError, ParameterCallbackHandle, ParameterEventCallbackHandle, ParameterEventHandler,
    PARAMETER_EVENTS_TOPIC,
};
pub use types::{Parameter, ParameterType, ParameterValue};
pub use wire::{WireParameter, WireParameterEvent, WireParameterValue};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

pub trait Builder {
    type Output;
    fn build(self) -> Result<Self::Output>;
}
