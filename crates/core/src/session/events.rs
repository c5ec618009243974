//! Observer registry for game events.

use slotmap::SlotMap;

use crate::types::{GameEvent, SubscriptionId};

type Observer = Box<dyn FnMut(&GameEvent)>;

#[derive(Default)]
pub struct EventBus {
    observers: SlotMap<SubscriptionId, Observer>,
}

impl EventBus {
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&GameEvent) + 'static,
    {
        self.observers.insert(Box::new(observer))
    }

    /// Returns `false` when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub fn publish(&mut self, event: &GameEvent) {
        for observer in self.observers.values_mut() {
            observer(event);
        }
    }
}
