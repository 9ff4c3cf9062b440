//! Synchronous publish/subscribe over a context type.
//!
//! Handlers receive `&mut C`, the context that owns the bus, so a handler can
//! mutate state, touch views and emit further events. Emission snapshots the
//! matching handlers first: subscriptions made while an event is being
//! delivered apply from the next emission, and a nested emission is fully
//! delivered before the outer one continues.

use std::fmt;
use std::rc::Rc;

use super::{Event, Topic};

/// Event handler over a context `C`.
pub type Handler<C> = Rc<dyn Fn(&mut C, &Event)>;

/// Identifies a subscription, for [`EventBus::off`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

struct Subscription<C> {
    id: SubscriptionId,
    topic: Topic,
    handler: Handler<C>,
}

/// Ordered list of topic subscriptions.
pub struct EventBus<C> {
    subscriptions: Vec<Subscription<C>>,
    next_id: u64,
}

impl<C> Default for EventBus<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for EventBus<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field(
                "topics",
                &self.subscriptions.iter().map(|s| &s.topic).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl<C> EventBus<C> {
    /// Create an empty bus.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            subscriptions: Vec::new(),
            next_id: 0,
        }
    }

    /// Subscribe `handler` to `topic`. Handlers run in subscription order.
    pub fn on<F>(&mut self, topic: impl Into<Topic>, handler: F) -> SubscriptionId
    where
        F: Fn(&mut C, &Event) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription {
            id,
            topic: topic.into(),
            handler: Rc::new(handler),
        });
        id
    }

    /// Remove a subscription. Returns `false` if it was already gone.
    pub fn off(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Handlers that `event` would be delivered to, in order.
    #[must_use]
    pub fn handlers_for(&self, event: &Event) -> Vec<Handler<C>> {
        self.subscriptions
            .iter()
            .filter(|s| s.topic.matches(event))
            .map(|s| Rc::clone(&s.handler))
            .collect()
    }
}

/// A context that owns an [`EventBus`] over itself.
pub trait BusContext: Sized {
    fn bus(&self) -> &EventBus<Self>;
}

/// Deliver `event` to every matching handler of `ctx`'s bus.
pub fn emit<C: BusContext>(ctx: &mut C, event: &Event) {
    let handlers = ctx.bus().handlers_for(event);
    tracing::trace!(topic = %event.topic(), handlers = handlers.len(), "emit");
    for handler in handlers {
        handler(ctx, event);
    }
}
