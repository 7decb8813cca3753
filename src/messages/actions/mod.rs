mod mark_seen;
mod send;

pub use mark_seen::MarkSeenAction;
pub use send::SendMessageAction;
