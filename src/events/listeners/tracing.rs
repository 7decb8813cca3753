use async_trait::async_trait;

use crate::events::{Listener, RosterEvent};

/// Emits roster events as tracing events.
///
/// Requires the `tracing` feature to be enabled.
pub struct TracingListener;

#[async_trait]
impl Listener for TracingListener {
    async fn handle(&self, event: &RosterEvent) {
        tracing::info!(
            target: "roster::events",
            event_name = event.name(),
            team_id = event.team_id(),
            ?event,
            "roster event"
        );
    }
}
