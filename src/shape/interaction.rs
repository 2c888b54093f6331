/// One-shot gate marking the first user-driven mutation of a shape in a gesture.
///
/// `fire` returns `true` exactly once between two `rearm` calls. The engine
/// turns that edge into a single undo checkpoint, so a drag that produces a
/// hundred pointer events still yields one checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionGate {
    #[default]
    Armed,
    Fired,
}

impl InteractionGate {
    /// Trip the gate. Returns `true` only on the armed -> fired edge.
    pub fn fire(&mut self) -> bool {
        match self {
            Self::Armed => {
                *self = Self::Fired;
                true
            }
            Self::Fired => false,
        }
    }

    /// Gesture finished, the next one gets its own checkpoint
    pub fn rearm(&mut self) {
        *self = Self::Armed;
    }

    pub fn is_armed(&self) -> bool {
        matches!(self, Self::Armed)
    }
}
