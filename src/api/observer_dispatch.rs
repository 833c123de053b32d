use tracing::trace;

use crate::error::{TimelineError, TimelineResult};
use crate::extensions::{TimelineEvent, TimelineObserver};

use super::TimelineEngine;

impl TimelineEngine {
    /// Registers an observer; ids must be unique.
    pub fn register_observer(&mut self, observer: Box<dyn TimelineObserver>) -> TimelineResult<()> {
        let id = observer.id().to_owned();
        if self.observers.contains_key(&id) {
            return Err(TimelineError::DuplicateObserver(id));
        }
        self.observers.insert(id, observer);
        Ok(())
    }

    /// Removes an observer by id. Returns `true` when one was removed.
    pub fn unregister_observer(&mut self, id: &str) -> bool {
        self.observers.shift_remove(id).is_some()
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    #[must_use]
    pub fn has_observer(&self, id: &str) -> bool {
        self.observers.contains_key(id)
    }

    pub(super) fn emit_event(&mut self, event: TimelineEvent) {
        if self.observers.is_empty() {
            return;
        }
        let context = self.context();
        trace!(?event, observers = self.observers.len(), "dispatch timeline event");
        for observer in self.observers.values_mut() {
            observer.on_event(event, context);
        }
    }
}
