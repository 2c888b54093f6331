mod bus;
mod events;

pub use bus::{EventBus, Subscription};
pub use events::{DocumentEvent, EditorEvent, SelectionEvent};

pub trait EventHandler {
    fn handle_event(&mut self, event: &EditorEvent);
}

impl<F> EventHandler for F
where
    F: FnMut(&EditorEvent),
{
    fn handle_event(&mut self, event: &EditorEvent) {
        self(event)
    }
}
