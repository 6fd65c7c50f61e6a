//! # Form Lifecycle Events
//!
//! An explicit two-case callback interface in place of a string-keyed
//! event map: the host processes one form lifecycle at a time and
//! fires [`FormEvent::InitialData`] once when initial data is set,
//! then [`FormEvent::PreSubmit`] once when submitted data arrives
//! before validation. Subscribers register once per form instance.

use serde_json::Value;

use formdep_tree::{FieldId, FieldTree};

/// The two points in a form's lifecycle at which dependency
/// reconciliation runs. There are deliberately no other variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormEvent {
    /// Initial data has been set on the tree (population).
    InitialData,
    /// Submitted data has arrived, before validation runs.
    PreSubmit,
}

impl std::fmt::Display for FormEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InitialData => f.write_str("initial_data"),
            Self::PreSubmit => f.write_str("pre_submit"),
        }
    }
}

/// A lifecycle listener. Implementations declare which events they
/// want and receive the live tree plus the data snapshot at that
/// stage; the snapshot is read-only, the tree is theirs to reconcile.
pub trait FormSubscriber {
    /// The events this subscriber handles.
    fn subscribed_events(&self) -> &'static [FormEvent];

    /// Handle one firing. `root` is the node the snapshot is relative
    /// to — always the tree root for host-driven firings.
    fn handle(&self, event: FormEvent, tree: &mut FieldTree, root: FieldId, data: &Value);
}

/// Per-form registry of lifecycle subscribers.
///
/// The host builds one per form instance, registers its subscribers
/// once, and fires events in-line during request processing. Firings
/// are synchronous and sequential — a subscriber sees the tree exactly
/// as the previous one left it.
#[derive(Default)]
pub struct FormLifecycle {
    subscribers: Vec<Box<dyn FormSubscriber>>,
}

impl FormLifecycle {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber. Registration order is firing order.
    pub fn subscribe(&mut self, subscriber: Box<dyn FormSubscriber>) {
        self.subscribers.push(subscriber);
    }

    /// Fire one lifecycle event, invoking every subscriber that
    /// listed it.
    pub fn fire(&self, event: FormEvent, tree: &mut FieldTree, root: FieldId, data: &Value) {
        tracing::debug!(%event, subscribers = self.subscribers.len(), "firing form event");
        for subscriber in &self.subscribers {
            if subscriber.subscribed_events().contains(&event) {
                subscriber.handle(event, tree, root, data);
            }
        }
    }

    /// Convenience for the population firing.
    pub fn on_initial_data(&self, tree: &mut FieldTree, root: FieldId, data: &Value) {
        self.fire(FormEvent::InitialData, tree, root, data);
    }

    /// Convenience for the pre-validation firing.
    pub fn on_pre_submit(&self, tree: &mut FieldTree, root: FieldId, data: &Value) {
        self.fire(FormEvent::PreSubmit, tree, root, data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recorder {
        events: &'static [FormEvent],
        seen: Rc<RefCell<Vec<FormEvent>>>,
    }

    impl FormSubscriber for Recorder {
        fn subscribed_events(&self) -> &'static [FormEvent] {
            self.events
        }

        fn handle(&self, event: FormEvent, _tree: &mut FieldTree, _root: FieldId, _data: &Value) {
            self.seen.borrow_mut().push(event);
        }
    }

    #[test]
    fn fire_reaches_only_subscribed_events() {
        let mut tree = FieldTree::new("form");
        let root = tree.root();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut lifecycle = FormLifecycle::new();
        lifecycle.subscribe(Box::new(Recorder {
            events: &[FormEvent::PreSubmit],
            seen: Rc::clone(&seen),
        }));

        lifecycle.on_initial_data(&mut tree, root, &Value::Null);
        lifecycle.on_pre_submit(&mut tree, root, &Value::Null);

        assert_eq!(*seen.borrow(), vec![FormEvent::PreSubmit]);
    }

    #[test]
    fn event_display_names() {
        assert_eq!(FormEvent::InitialData.to_string(), "initial_data");
        assert_eq!(FormEvent::PreSubmit.to_string(), "pre_submit");
    }
}
