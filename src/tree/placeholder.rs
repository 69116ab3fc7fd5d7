// Placeholder policy: every empty container exposes exactly one
// "add here" affordance; non-empty containers expose none.

use super::{ContainerId, Size, Tree, TreeError};

/// The transient affordance shown in an empty container.
///
/// Never serialized; it exists only as derived state of the emptiness
/// rule. `size_hint` is set while a drag hovers the container so the
/// renderer can pre-size the slot to the dragged item, and cleared when
/// the pointer leaves or the drag ends.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Placeholder {
    pub size_hint: Option<Size>,
}

impl Tree {
    /// Re-derive placeholders for the whole tree.
    ///
    /// Runs over every container rather than tracking deltas; any
    /// sequence of moves leaves the tree globally consistent after one
    /// pass. Idempotent: returns whether anything changed.
    pub fn refresh_placeholders(&mut self) -> bool {
        let mut changed = false;
        let ids: Vec<ContainerId> = self.container_ids().collect();
        for id in ids {
            let empty = self
                .is_container_empty(id)
                .expect("container enumerated from the tree");
            let slot = self
                .placeholder_mut(id)
                .expect("container enumerated from the tree");
            match (empty, slot.is_some()) {
                (true, false) => {
                    *slot = Some(Placeholder::default());
                    changed = true;
                }
                (false, true) => {
                    *slot = None;
                    changed = true;
                }
                _ => {}
            }
        }
        changed
    }

    /// Set the hover size hint on a container's placeholder. No-op when
    /// the container has no placeholder (it holds items).
    pub fn hint_placeholder(&mut self, container: ContainerId, size: Size) -> Result<(), TreeError> {
        if let Some(placeholder) = self.placeholder_mut(container)?.as_mut() {
            placeholder.size_hint = Some(size);
        }
        Ok(())
    }

    /// Clear the hover size hint on one container's placeholder.
    pub fn clear_placeholder_hint(&mut self, container: ContainerId) -> Result<(), TreeError> {
        if let Some(placeholder) = self.placeholder_mut(container)?.as_mut() {
            placeholder.size_hint = None;
        }
        Ok(())
    }

    /// Clear hover size hints tree-wide (drag ended).
    pub fn clear_all_placeholder_hints(&mut self) {
        let ids: Vec<ContainerId> = self.container_ids().collect();
        for id in ids {
            let _ = self.clear_placeholder_hint(id);
        }
    }
}
