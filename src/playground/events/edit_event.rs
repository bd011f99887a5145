//! # Edit Events
//!
//! Signals emitted by editable panes whenever their document is mutated by
//! the user. They are transient: the debouncer keeps at most one of them.

use super::types::EditOrigin;

/// Handler invoked synchronously when a pane is edited by the user
pub type EditListener = Box<dyn Fn(&EditEvent) + Send + Sync>;

/// A single user edit on the Input or Template pane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditEvent {
    pub origin: EditOrigin,
    /// Whether the document text actually differs after the edit
    pub changed: bool,
}

impl EditEvent {
    pub fn new(origin: EditOrigin, changed: bool) -> Self {
        Self { origin, changed }
    }

    /// An edit that changed the document of `origin`
    pub fn changed(origin: EditOrigin) -> Self {
        Self::new(origin, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn changed_constructor_should_mark_event_changed() {
        let event = EditEvent::changed(EditOrigin::Template);
        assert_eq!(event.origin, EditOrigin::Template);
        assert!(event.changed);
    }

    #[test]
    fn edit_listener_should_receive_event() {
        let received = Arc::new(Mutex::new(None));
        let received_clone = received.clone();

        let listener: EditListener = Box::new(move |event| {
            *received_clone.lock().unwrap() = Some(*event);
        });
        listener(&EditEvent::new(EditOrigin::Input, false));

        assert_eq!(
            *received.lock().unwrap(),
            Some(EditEvent::new(EditOrigin::Input, false))
        );
    }
}
