//! Event bus port: publish/subscribe for layout events.

use std::future::Future;

use aurahome_domain::error::HomeError;
use aurahome_domain::event::Event;

/// Publishes layout events to interested subscribers.
pub trait EventPublisher {
    /// Publish an event to all current subscribers.
    fn publish(&self, event: Event) -> impl Future<Output = Result<(), HomeError>> + Send;
}

impl<T: EventPublisher + Send + Sync> EventPublisher for std::sync::Arc<T> {
    fn publish(&self, event: Event) -> impl Future<Output = Result<(), HomeError>> + Send {
        (**self).publish(event)
    }
}
