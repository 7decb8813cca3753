use std::sync::OnceLock;

use super::{Listener, RosterEvent};

static REGISTRY: OnceLock<EventRegistry> = OnceLock::new();

/// Decides whether a listener receives an event.
pub type EventFilter = fn(&RosterEvent) -> bool;

struct Registration {
    listener: Box<dyn Listener>,
    filter: Option<EventFilter>,
}

impl Registration {
    fn accepts(&self, event: &RosterEvent) -> bool {
        self.filter.map_or(true, |filter| filter(event))
    }
}

/// Listeners notified of roster events, in registration order.
///
/// Built once through [`register_event_listeners`].
pub struct EventRegistry {
    registrations: Vec<Registration>,
}

impl EventRegistry {
    fn new() -> Self {
        Self {
            registrations: Vec::new(),
        }
    }

    /// Sends every event to `listener`.
    pub fn listen(&mut self, listener: impl Listener) -> &mut Self {
        self.registrations.push(Registration {
            listener: Box::new(listener),
            filter: None,
        });
        self
    }

    /// Sends `listener` only the events `filter` accepts.
    ///
    /// ```rust,ignore
    /// // membership changes only, no messages
    /// registry.listen_where(|e| e.team_id().is_some(), AuditTrail::new());
    /// ```
    pub fn listen_where(&mut self, filter: EventFilter, listener: impl Listener) -> &mut Self {
        self.registrations.push(Registration {
            listener: Box::new(listener),
            filter: Some(filter),
        });
        self
    }

    async fn dispatch(&self, event: &RosterEvent) {
        for registration in self.registrations.iter().filter(|r| r.accepts(event)) {
            registration.listener.handle(event).await;
        }
    }
}

/// Installs the process-wide listeners.
///
/// Only the first call takes effect; later calls log a warning. Without a
/// call, events are dropped.
///
/// ```rust,ignore
/// use roster::register_event_listeners;
/// use roster::events::listeners::LoggingListener;
///
/// register_event_listeners(|registry| {
///     registry.listen(LoggingListener::new());
/// });
/// ```
pub fn register_event_listeners<F>(f: F)
where
    F: FnOnce(&mut EventRegistry),
{
    let mut registry = EventRegistry::new();
    f(&mut registry);
    if REGISTRY.set(registry).is_err() {
        log::warn!(
            target: "roster",
            "msg=\"event listeners already registered, ignoring\""
        );
    }
}

/// Notifies the registered listeners of `event`.
pub async fn dispatch(event: RosterEvent) {
    match REGISTRY.get() {
        Some(registry) => registry.dispatch(&event).await,
        None => log::trace!(
            target: "roster::events",
            "msg=\"no listeners\", event={}",
            event.name()
        ),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::Utc;

    use super::*;
    use crate::teams::RoleName;

    struct Counter(Arc<AtomicUsize>);

    #[async_trait]
    impl Listener for Counter {
        async fn handle(&self, _event: &RosterEvent) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn member_added() -> RosterEvent {
        RosterEvent::MemberAdded {
            team_id: 1,
            user_id: 2,
            role: RoleName::Member,
            at: Utc::now(),
        }
    }

    fn message_seen() -> RosterEvent {
        RosterEvent::MessageSeen {
            message_id: 1,
            recipient_id: 2,
            at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_filtered_listener() {
        let all = Arc::new(AtomicUsize::new(0));
        let teams_only = Arc::new(AtomicUsize::new(0));

        let mut registry = EventRegistry::new();
        registry
            .listen(Counter(Arc::clone(&all)))
            .listen_where(|e| e.team_id().is_some(), Counter(Arc::clone(&teams_only)));

        registry.dispatch(&member_added()).await;
        registry.dispatch(&message_seen()).await;

        assert_eq!(all.load(Ordering::SeqCst), 2);
        assert_eq!(teams_only.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_dispatch_without_registry() {
        // nothing registered in unit tests; must be a no-op
        dispatch(member_added()).await;
    }
}
