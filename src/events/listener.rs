use async_trait::async_trait;

use super::RosterEvent;

/// Trait for handling roster events asynchronously.
///
/// This is the notification seam: a listener can turn
/// [`RosterEvent::NoManagersRejected`] into a flash message, send mail on
/// [`RosterEvent::MessageSent`], update metrics, and so on.
///
/// # Example
///
/// ```rust,ignore
/// use roster::events::{Listener, RosterEvent};
/// use async_trait::async_trait;
///
/// struct FlashMessages { /* ... */ }
///
/// #[async_trait]
/// impl Listener for FlashMessages {
///     async fn handle(&self, event: &RosterEvent) {
///         if let RosterEvent::NoManagersRejected { user_id, .. } = event {
///             // queue "the team needs at least one manager" for user_id
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait Listener: Send + Sync + 'static {
    /// Called for every event dispatched.
    async fn handle(&self, event: &RosterEvent);
}
