//! Event system for roster actions.
//!
//! Events are fired from every successful mutation and from rejected
//! last-manager transitions. If no listeners are registered, they are
//! silently ignored.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use roster::register_event_listeners;
//! use roster::events::listeners::LoggingListener;
//!
//! register_event_listeners(|registry| {
//!     registry.listen(LoggingListener::new());
//! });
//! ```

mod event;
mod listener;
mod registry;

pub mod listeners;

pub use event::RosterEvent;
pub use listener::Listener;
pub use registry::{dispatch, register_event_listeners, EventFilter, EventRegistry};
