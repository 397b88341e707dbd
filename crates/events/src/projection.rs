use crate::{Event, EventEnvelope};

/// A read model folded from published envelopes.
///
/// Delivery is at-least-once, so `apply` must tolerate seeing the same
/// envelope twice (dedupe on `event_id` or make the update naturally
/// idempotent). Events the projection does not care about are ignored.
pub trait Projection {
    type Ev: Event;

    fn apply(&mut self, envelope: &EventEnvelope<Self::Ev>);

    /// Fold a batch in order.
    fn apply_all<'a, I>(&mut self, envelopes: I)
    where
        I: IntoIterator<Item = &'a EventEnvelope<Self::Ev>>,
        Self::Ev: 'a,
    {
        for envelope in envelopes {
            self.apply(envelope);
        }
    }
}
