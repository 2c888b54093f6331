use std::cell::{Cell, RefCell};

use log::{debug, trace, warn};

use crate::event::{EditorEvent, EventHandler};

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

/// Subscription changes made by a handler while an event is dispatched
enum PendingChange {
    Add(Subscription, Box<dyn EventHandler>),
    Remove(Subscription),
}

/// Synchronous event bus: every emitted event is handed to each subscriber,
/// in subscription order, before `emit` returns.
///
/// Handlers may subscribe and unsubscribe from inside `handle_event`; those
/// changes take effect once the current event has been delivered.
pub struct EventBus {
    handlers: RefCell<Vec<(Subscription, Box<dyn EventHandler>)>>,
    pending: RefCell<Vec<PendingChange>>,
    next_id: Cell<u64>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &format!("<{} handlers>", self.handler_count()))
            .finish()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
            pending: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    /// Subscribe a handler to receive every later event
    pub fn subscribe(&self, handler: Box<dyn EventHandler>) -> Subscription {
        let id = Subscription(self.next_id.get());
        self.next_id.set(id.0 + 1);
        match self.handlers.try_borrow_mut() {
            Ok(mut handlers) => handlers.push((id, handler)),
            Err(_) => self.pending.borrow_mut().push(PendingChange::Add(id, handler)),
        }
        id
    }

    /// Returns false if `subscription` was already removed. During dispatch
    /// the removal is queued and reported as done.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        let Ok(mut handlers) = self.handlers.try_borrow_mut() else {
            debug!("Deferring unsubscribe of {subscription:?} until dispatch ends");
            self.pending.borrow_mut().push(PendingChange::Remove(subscription));
            return true;
        };
        let before = handlers.len();
        handlers.retain(|(id, _)| *id != subscription);
        if handlers.len() != before {
            return true;
        }
        drop(handlers);

        // Subscribed during dispatch and not yet applied
        let mut pending = self.pending.borrow_mut();
        let before = pending.len();
        pending.retain(|change| !matches!(change, PendingChange::Add(id, _) if *id == subscription));
        pending.len() != before
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.try_borrow().map_or(0, |h| h.len())
    }

    /// Hand `event` to all handlers.
    ///
    /// An event emitted from inside a handler is dropped with a warning.
    pub fn emit(&self, event: EditorEvent) {
        let Ok(mut handlers) = self.handlers.try_borrow_mut() else {
            warn!("Dropping re-entrant event {event:?}");
            return;
        };
        trace!("Emitting {event:?} to {} handlers", handlers.len());
        for (_, handler) in handlers.iter_mut() {
            handler.handle_event(&event);
        }

        for change in self.pending.take() {
            match change {
                PendingChange::Add(id, handler) => handlers.push((id, handler)),
                PendingChange::Remove(subscription) => handlers.retain(|(id, _)| *id != subscription),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn recorder(bus: &EventBus) -> (Subscription, Rc<RefCell<Vec<EditorEvent>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let id = bus.subscribe(Box::new(move |event: &EditorEvent| sink.borrow_mut().push(event.clone())));
        (id, seen)
    }

    #[test]
    fn test_emit_reaches_every_subscriber() {
        let bus = EventBus::new();
        let (_, first) = recorder(&bus);
        let (_, second) = recorder(&bus);

        bus.emit(EditorEvent::HistoryChanged { can_undo: true });
        assert_eq!(bus.handler_count(), 2);
        assert_eq!(first.borrow().len(), 1);
        assert_eq!(second.borrow().len(), 1);
    }

    #[test]
    fn test_unsubscribe() {
        let bus = EventBus::new();
        let (id, seen) = recorder(&bus);
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));

        bus.emit(EditorEvent::HistoryChanged { can_undo: false });
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_handler_may_subscribe_during_dispatch() {
        let bus = Rc::new(EventBus::new());
        let (_, later) = recorder(&bus);
        let inner_seen = Rc::new(Cell::new(0));

        let bus_ref = Rc::downgrade(&bus);
        let counter = Rc::clone(&inner_seen);
        bus.subscribe(Box::new(move |_: &EditorEvent| {
            if let Some(bus) = bus_ref.upgrade() {
                let counter = Rc::clone(&counter);
                bus.subscribe(Box::new(move |_: &EditorEvent| counter.set(counter.get() + 1)));
            }
        }));

        bus.emit(EditorEvent::HistoryChanged { can_undo: true });
        assert_eq!(bus.handler_count(), 3);
        // Added during dispatch, so the first event never reached it
        assert_eq!(inner_seen.get(), 0);

        bus.emit(EditorEvent::HistoryChanged { can_undo: false });
        assert_eq!(inner_seen.get(), 1);
        assert_eq!(later.borrow().len(), 2);
    }

    #[test]
    fn test_one_shot_handler_unsubscribes_itself() {
        let bus = Rc::new(EventBus::new());
        let calls = Rc::new(Cell::new(0));
        let own_id: Rc<Cell<Option<Subscription>>> = Rc::new(Cell::new(None));

        let bus_ref = Rc::downgrade(&bus);
        let (counter, id_slot) = (Rc::clone(&calls), Rc::clone(&own_id));
        let id = bus.subscribe(Box::new(move |_: &EditorEvent| {
            counter.set(counter.get() + 1);
            if let (Some(bus), Some(id)) = (bus_ref.upgrade(), id_slot.get()) {
                assert!(bus.unsubscribe(id));
            }
        }));
        own_id.set(Some(id));

        bus.emit(EditorEvent::HistoryChanged { can_undo: true });
        bus.emit(EditorEvent::HistoryChanged { can_undo: true });
        assert_eq!(calls.get(), 1);
        assert_eq!(bus.handler_count(), 0);
    }
}
