// Structural events delivered to the presentation collaborator.

use crate::tree::{ContainerId, ItemId};

/// Events fired after structural mutations and placeholder passes.
///
/// Delivery is synchronous and in registration order, before the
/// triggering call returns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TreeEvent {
    ItemCreated {
        item: ItemId,
        parent: ContainerId,
    },
    ItemRemoved {
        item: ItemId,
    },
    ItemRelocated {
        item: ItemId,
        from: ContainerId,
        to: ContainerId,
    },
    /// Fired after every placeholder pass; the renderer re-derives
    /// positions and depth-based colors on this signal.
    TreeUpdated,
}

/// Registered observer callback.
pub type Observer = Box<dyn FnMut(&TreeEvent)>;

/// Ordered list of observers owned by a workspace.
#[derive(Default)]
pub struct Observers {
    list: Vec<Observer>,
}

impl Observers {
    pub fn new() -> Self {
        Self { list: Vec::new() }
    }

    pub fn register(&mut self, observer: Observer) {
        self.list.push(observer);
    }

    pub fn emit(&mut self, event: &TreeEvent) {
        for observer in &mut self.list {
            observer(event);
        }
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn emit_reaches_all_observers_in_registration_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut observers = Observers::new();
        for tag in ["first", "second", "third"] {
            let seen = Rc::clone(&seen);
            observers.register(Box::new(move |_| seen.borrow_mut().push(tag)));
        }

        observers.emit(&TreeEvent::TreeUpdated);
        assert_eq!(*seen.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn observers_receive_event_payload() {
        let seen = Rc::new(RefCell::new(None));
        let mut observers = Observers::new();
        {
            let seen = Rc::clone(&seen);
            observers.register(Box::new(move |event| {
                *seen.borrow_mut() = Some(*event);
            }));
        }

        let event = TreeEvent::ItemCreated {
            item: ItemId(1),
            parent: ContainerId(0),
        };
        observers.emit(&event);
        assert_eq!(*seen.borrow(), Some(event));
    }

    #[test]
    fn emit_with_no_observers_is_fine() {
        let mut observers = Observers::new();
        observers.emit(&TreeEvent::TreeUpdated);
        assert!(observers.is_empty());
    }
}
