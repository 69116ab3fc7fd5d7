// Tree model: alternating Container/Item tree backing the nested box layout.

pub mod placeholder;

use std::collections::HashMap;
use std::fmt;

pub use placeholder::Placeholder;

/// Unique identifier for a movable item (box).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(pub u32);

/// Unique identifier for a container (drop target).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContainerId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item-{}", self.0)
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "container-{}", self.0)
    }
}

/// Width/height of an item in pixels, captured at drag start.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub w: f32,
    pub h: f32,
}

impl Size {
    pub fn new(w: f32, h: f32) -> Self {
        Self { w, h }
    }
}

/// Errors raised by structural tree operations.
///
/// Both variants are recoverable: callers at the drag/command boundary
/// degrade them to a logged no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("{0} not found")]
    ItemNotFound(ItemId),
    #[error("{0} not found")]
    ContainerNotFound(ContainerId),
    #[error("cannot move {item} into {target}: target belongs to the moved subtree")]
    InvalidMove { item: ItemId, target: ContainerId },
}

impl TreeError {
    /// True for the not-found class (stale id), as opposed to a rejected move.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TreeError::ItemNotFound(_) | TreeError::ContainerNotFound(_)
        )
    }
}

#[derive(Debug)]
struct ItemNode {
    /// Container this item currently sits in.
    parent: ContainerId,
    /// The item's own drop target, created with it and never reparented.
    child: ContainerId,
    size: Size,
}

#[derive(Debug)]
struct ContainerNode {
    /// Owning item; `None` only for the root container.
    owner: Option<ItemId>,
    items: Vec<ItemId>,
    placeholder: Option<Placeholder>,
}

/// The whole structure rooted at a single root container.
///
/// Ids are allocated from per-tree monotonic counters and never reused,
/// so a stale reference held elsewhere (e.g. a just-ended drag session)
/// can never alias a newer node.
#[derive(Debug)]
pub struct Tree {
    items: HashMap<ItemId, ItemNode>,
    containers: HashMap<ContainerId, ContainerNode>,
    root: ContainerId,
    next_item: u32,
    next_container: u32,
}

impl Tree {
    /// Create a tree holding a single empty root container.
    pub fn new() -> Self {
        let mut tree = Self {
            items: HashMap::new(),
            containers: HashMap::new(),
            root: ContainerId(0),
            next_item: 0,
            next_container: 0,
        };
        tree.root = tree.alloc_container(None);
        tree
    }

    /// The root container id. The root has depth 0 and no owning item.
    pub fn root(&self) -> ContainerId {
        self.root
    }

    fn alloc_container(&mut self, owner: Option<ItemId>) -> ContainerId {
        let id = ContainerId(self.next_container);
        self.next_container += 1;
        self.containers.insert(
            id,
            ContainerNode {
                owner,
                items: Vec::new(),
                placeholder: None,
            },
        );
        id
    }

    fn item(&self, id: ItemId) -> Result<&ItemNode, TreeError> {
        self.items.get(&id).ok_or(TreeError::ItemNotFound(id))
    }

    fn container(&self, id: ContainerId) -> Result<&ContainerNode, TreeError> {
        self.containers
            .get(&id)
            .ok_or(TreeError::ContainerNotFound(id))
    }

    // ── Structural operations ───────────────────────────────────────────

    /// Create a new item as the last child of `parent`, together with its
    /// own (empty) child container.
    pub fn create_item(&mut self, parent: ContainerId) -> Result<ItemId, TreeError> {
        if !self.containers.contains_key(&parent) {
            return Err(TreeError::ContainerNotFound(parent));
        }

        let id = ItemId(self.next_item);
        self.next_item += 1;
        let child = self.alloc_container(Some(id));

        self.items.insert(
            id,
            ItemNode {
                parent,
                child,
                size: Size::default(),
            },
        );
        self.containers
            .get_mut(&parent)
            .expect("parent checked above")
            .items
            .push(id);

        log::debug!(target: "nestbox::tree", "created {id} in {parent}");
        Ok(id)
    }

    /// Remove an item and its entire owned subtree.
    pub fn remove_item(&mut self, item: ItemId) -> Result<(), TreeError> {
        let parent = self.item(item)?.parent;
        if let Some(container) = self.containers.get_mut(&parent) {
            container.items.retain(|i| *i != item);
        }

        // Cascading delete over the subtree, iterative to keep deep
        // nesting off the call stack.
        let mut pending = vec![item];
        while let Some(i) = pending.pop() {
            if let Some(node) = self.items.remove(&i) {
                if let Some(child) = self.containers.remove(&node.child) {
                    pending.extend(child.items);
                }
            }
        }

        log::debug!(target: "nestbox::tree", "removed {item} and its subtree");
        Ok(())
    }

    /// Move an item (with its subtree) into `target`, placed immediately
    /// before `before` if given, else appended last.
    ///
    /// Fails with `InvalidMove` when `target` lies inside the moved
    /// subtree; the check walks current ownership, so a container that
    /// has since been relocated out of the subtree is a valid target.
    pub fn relocate_item(
        &mut self,
        item: ItemId,
        target: ContainerId,
        before: Option<ItemId>,
    ) -> Result<(), TreeError> {
        let from = self.item(item)?.parent;
        self.container(target)?;

        // Cycle check: walk the owner chain upward from the target.
        let mut cursor = target;
        while let Some(owner) = self.container(cursor)?.owner {
            if owner == item {
                return Err(TreeError::InvalidMove { item, target });
            }
            cursor = self.item(owner)?.parent;
        }

        if let Some(anchor) = before {
            if !self.container(target)?.items.contains(&anchor) {
                return Err(TreeError::ItemNotFound(anchor));
            }
            if anchor == item {
                // Inserting before itself: position unchanged.
                return Ok(());
            }
        }

        // All checks passed; splice.
        self.containers
            .get_mut(&from)
            .expect("source container resolved above")
            .items
            .retain(|i| *i != item);

        let slot = self
            .containers
            .get_mut(&target)
            .expect("target checked above");
        match before {
            Some(anchor) => {
                let index = slot
                    .items
                    .iter()
                    .position(|i| *i == anchor)
                    .expect("anchor membership checked above");
                slot.items.insert(index, item);
            }
            None => slot.items.push(item),
        }

        self.items
            .get_mut(&item)
            .expect("item resolved above")
            .parent = target;

        log::debug!(target: "nestbox::tree", "relocated {item}: {from} -> {target}");
        Ok(())
    }

    // ── Queries ─────────────────────────────────────────────────────────

    /// Nesting depth of an item: 1 for items sitting directly in the root
    /// container, parent item's depth + 1 otherwise. Walks live parent
    /// pointers, so relocations are reflected immediately.
    pub fn depth(&self, item: ItemId) -> Result<usize, TreeError> {
        let mut depth = 1;
        let mut container = self.item(item)?.parent;
        while let Some(owner) = self.container(container)?.owner {
            depth += 1;
            container = self.item(owner)?.parent;
        }
        Ok(depth)
    }

    /// Whether a container currently holds no items.
    pub fn is_container_empty(&self, container: ContainerId) -> Result<bool, TreeError> {
        Ok(self.container(container)?.items.is_empty())
    }

    /// Ordered items of a container.
    pub fn items_in(&self, container: ContainerId) -> Result<&[ItemId], TreeError> {
        Ok(&self.container(container)?.items)
    }

    /// The container an item currently sits in.
    pub fn parent_of(&self, item: ItemId) -> Result<ContainerId, TreeError> {
        Ok(self.item(item)?.parent)
    }

    /// The drop target owned by an item.
    pub fn container_of(&self, item: ItemId) -> Result<ContainerId, TreeError> {
        Ok(self.item(item)?.child)
    }

    /// The item owning a container, or `None` for the root.
    pub fn owner_of(&self, container: ContainerId) -> Result<Option<ItemId>, TreeError> {
        Ok(self.container(container)?.owner)
    }

    /// Last size captured for an item.
    pub fn item_size(&self, item: ItemId) -> Result<Size, TreeError> {
        Ok(self.item(item)?.size)
    }

    /// Record an item's measured size (set by the renderer at drag start).
    pub fn set_item_size(&mut self, item: ItemId, size: Size) -> Result<(), TreeError> {
        self.items
            .get_mut(&item)
            .ok_or(TreeError::ItemNotFound(item))?
            .size = size;
        Ok(())
    }

    pub fn contains_item(&self, item: ItemId) -> bool {
        self.items.contains_key(&item)
    }

    pub fn contains_container(&self, container: ContainerId) -> bool {
        self.containers.contains_key(&container)
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// All container ids, in no particular order.
    pub fn container_ids(&self) -> impl Iterator<Item = ContainerId> + '_ {
        self.containers.keys().copied()
    }

    /// All item ids, in no particular order.
    pub fn item_ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.items.keys().copied()
    }

    // ── Placeholder access (policy itself lives in placeholder.rs) ──────

    /// The placeholder of a container, if the policy pass has assigned one.
    pub fn placeholder(&self, container: ContainerId) -> Result<Option<&Placeholder>, TreeError> {
        Ok(self.container(container)?.placeholder.as_ref())
    }

    pub(crate) fn placeholder_mut(
        &mut self,
        container: ContainerId,
    ) -> Result<&mut Option<Placeholder>, TreeError> {
        Ok(&mut self
            .containers
            .get_mut(&container)
            .ok_or(TreeError::ContainerNotFound(container))?
            .placeholder)
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_with_item() -> (Tree, ItemId) {
        let mut tree = Tree::new();
        let item = tree.create_item(tree.root()).unwrap();
        (tree, item)
    }

    // ── Id allocation ────────────────────────────────────────────────

    #[test]
    fn item_ids_are_monotonic_per_tree() {
        let mut tree = Tree::new();
        let root = tree.root();
        let a = tree.create_item(root).unwrap();
        let b = tree.create_item(root).unwrap();
        assert!(b.0 > a.0);
    }

    #[test]
    fn item_ids_never_reused_after_delete() {
        let mut tree = Tree::new();
        let root = tree.root();
        let a = tree.create_item(root).unwrap();
        tree.remove_item(a).unwrap();
        let b = tree.create_item(root).unwrap();
        assert_ne!(a, b);
        assert!(b.0 > a.0);
    }

    #[test]
    fn independent_trees_do_not_share_counters() {
        let mut first = Tree::new();
        let mut second = Tree::new();
        let a = first.create_item(first.root()).unwrap();
        let b = second.create_item(second.root()).unwrap();
        // Same numeric id in two trees is fine; each tree is self-contained.
        assert_eq!(a.0, b.0);
    }

    // ── create_item ──────────────────────────────────────────────────

    #[test]
    fn create_item_appends_to_parent() {
        let mut tree = Tree::new();
        let root = tree.root();
        let a = tree.create_item(root).unwrap();
        let b = tree.create_item(root).unwrap();
        assert_eq!(tree.items_in(root).unwrap(), &[a, b]);
    }

    #[test]
    fn create_item_makes_child_container_eagerly() {
        let (tree, item) = tree_with_item();
        let child = tree.container_of(item).unwrap();
        assert!(tree.is_container_empty(child).unwrap());
        assert_eq!(tree.owner_of(child).unwrap(), Some(item));
    }

    #[test]
    fn create_item_in_unknown_container_fails() {
        let mut tree = Tree::new();
        let err = tree.create_item(ContainerId(999)).unwrap_err();
        assert_eq!(err, TreeError::ContainerNotFound(ContainerId(999)));
    }

    // ── remove_item ──────────────────────────────────────────────────

    #[test]
    fn remove_item_detaches_from_parent() {
        let mut tree = Tree::new();
        let root = tree.root();
        let a = tree.create_item(root).unwrap();
        let b = tree.create_item(root).unwrap();
        tree.remove_item(a).unwrap();
        assert_eq!(tree.items_in(root).unwrap(), &[b]);
    }

    #[test]
    fn remove_item_cascades_through_subtree() {
        let mut tree = Tree::new();
        let a = tree.create_item(tree.root()).unwrap();
        let a_slot = tree.container_of(a).unwrap();
        let b = tree.create_item(a_slot).unwrap();
        let b_slot = tree.container_of(b).unwrap();
        let c = tree.create_item(b_slot).unwrap();

        tree.remove_item(a).unwrap();

        assert!(!tree.contains_item(a));
        assert!(!tree.contains_item(b));
        assert!(!tree.contains_item(c));
        assert!(!tree.contains_container(a_slot));
        assert!(!tree.contains_container(b_slot));
    }

    #[test]
    fn lookups_after_remove_fail_with_not_found() {
        let mut tree = Tree::new();
        let a = tree.create_item(tree.root()).unwrap();
        let a_slot = tree.container_of(a).unwrap();
        let b = tree.create_item(a_slot).unwrap();
        tree.remove_item(a).unwrap();

        assert_eq!(tree.depth(a).unwrap_err(), TreeError::ItemNotFound(a));
        assert_eq!(tree.depth(b).unwrap_err(), TreeError::ItemNotFound(b));
        assert_eq!(
            tree.is_container_empty(a_slot).unwrap_err(),
            TreeError::ContainerNotFound(a_slot)
        );
    }

    #[test]
    fn remove_unknown_item_fails() {
        let mut tree = Tree::new();
        let err = tree.remove_item(ItemId(42)).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn remove_preserves_sibling_order() {
        let mut tree = Tree::new();
        let root = tree.root();
        let a = tree.create_item(root).unwrap();
        let b = tree.create_item(root).unwrap();
        let c = tree.create_item(root).unwrap();
        tree.remove_item(b).unwrap();
        assert_eq!(tree.items_in(root).unwrap(), &[a, c]);
    }

    // ── relocate_item ────────────────────────────────────────────────

    #[test]
    fn relocate_appends_last_without_anchor() {
        let mut tree = Tree::new();
        let root = tree.root();
        let a = tree.create_item(root).unwrap();
        let b = tree.create_item(root).unwrap();
        let a_slot = tree.container_of(a).unwrap();

        tree.relocate_item(b, a_slot, None).unwrap();

        assert_eq!(tree.items_in(root).unwrap(), &[a]);
        assert_eq!(tree.items_in(a_slot).unwrap(), &[b]);
        assert_eq!(tree.parent_of(b).unwrap(), a_slot);
    }

    #[test]
    fn relocate_inserts_before_anchor() {
        let mut tree = Tree::new();
        let root = tree.root();
        let a = tree.create_item(root).unwrap();
        let b = tree.create_item(root).unwrap();
        let c = tree.create_item(root).unwrap();

        tree.relocate_item(c, root, Some(a)).unwrap();
        assert_eq!(tree.items_in(root).unwrap(), &[c, a, b]);
    }

    #[test]
    fn relocate_within_same_container_reorders() {
        let mut tree = Tree::new();
        let root = tree.root();
        let a = tree.create_item(root).unwrap();
        let b = tree.create_item(root).unwrap();
        let c = tree.create_item(root).unwrap();

        tree.relocate_item(a, root, Some(c)).unwrap();
        assert_eq!(tree.items_in(root).unwrap(), &[b, a, c]);
    }

    #[test]
    fn relocate_into_own_container_is_invalid() {
        let (mut tree, item) = tree_with_item();
        let own = tree.container_of(item).unwrap();
        let err = tree.relocate_item(item, own, None).unwrap_err();
        assert_eq!(
            err,
            TreeError::InvalidMove {
                item,
                target: own
            }
        );
    }

    #[test]
    fn relocate_into_descendant_container_is_invalid() {
        let mut tree = Tree::new();
        let a = tree.create_item(tree.root()).unwrap();
        let a_slot = tree.container_of(a).unwrap();
        let b = tree.create_item(a_slot).unwrap();
        let b_slot = tree.container_of(b).unwrap();

        let err = tree.relocate_item(a, b_slot, None).unwrap_err();
        assert!(matches!(err, TreeError::InvalidMove { .. }));
    }

    #[test]
    fn cycle_check_uses_current_ownership_not_history() {
        // I1 owns C1; I2 starts inside C1 then moves out to the root.
        // Afterwards C2 (owned by I2) is a legal target for I1.
        let mut tree = Tree::new();
        let root = tree.root();
        let i1 = tree.create_item(root).unwrap();
        let c1 = tree.container_of(i1).unwrap();
        let i2 = tree.create_item(c1).unwrap();
        let c2 = tree.container_of(i2).unwrap();

        tree.relocate_item(i2, root, None).unwrap();
        tree.relocate_item(i1, c2, None).unwrap();

        assert_eq!(tree.parent_of(i1).unwrap(), c2);
        assert_eq!(tree.depth(i1).unwrap(), 2);
    }

    #[test]
    fn relocate_with_unknown_target_fails() {
        let (mut tree, item) = tree_with_item();
        let err = tree
            .relocate_item(item, ContainerId(777), None)
            .unwrap_err();
        assert_eq!(err, TreeError::ContainerNotFound(ContainerId(777)));
    }

    #[test]
    fn relocate_with_anchor_outside_target_fails() {
        let mut tree = Tree::new();
        let root = tree.root();
        let a = tree.create_item(root).unwrap();
        let a_slot = tree.container_of(a).unwrap();
        let b = tree.create_item(a_slot).unwrap();
        let c = tree.create_item(root).unwrap();

        // b lives in a's container, not in the root.
        let err = tree.relocate_item(c, root, Some(b)).unwrap_err();
        assert_eq!(err, TreeError::ItemNotFound(b));
    }

    #[test]
    fn relocate_before_itself_is_a_no_op() {
        let mut tree = Tree::new();
        let root = tree.root();
        let a = tree.create_item(root).unwrap();
        let b = tree.create_item(root).unwrap();
        tree.relocate_item(a, root, Some(a)).unwrap();
        assert_eq!(tree.items_in(root).unwrap(), &[a, b]);
    }

    #[test]
    fn relocate_moves_whole_subtree() {
        let mut tree = Tree::new();
        let root = tree.root();
        let a = tree.create_item(root).unwrap();
        let a_slot = tree.container_of(a).unwrap();
        let b = tree.create_item(a_slot).unwrap();
        let c = tree.create_item(root).unwrap();
        let c_slot = tree.container_of(c).unwrap();

        tree.relocate_item(a, c_slot, None).unwrap();

        assert_eq!(tree.parent_of(a).unwrap(), c_slot);
        // b travels with a: still inside a's container, depth shifted.
        assert_eq!(tree.parent_of(b).unwrap(), a_slot);
        assert_eq!(tree.depth(a).unwrap(), 2);
        assert_eq!(tree.depth(b).unwrap(), 3);
    }

    // ── depth ────────────────────────────────────────────────────────

    #[test]
    fn root_direct_items_have_depth_one() {
        let (tree, item) = tree_with_item();
        assert_eq!(tree.depth(item).unwrap(), 1);
    }

    #[test]
    fn depth_increments_per_nesting_level() {
        let mut tree = Tree::new();
        let a = tree.create_item(tree.root()).unwrap();
        let b = tree.create_item(tree.container_of(a).unwrap()).unwrap();
        let c = tree.create_item(tree.container_of(b).unwrap()).unwrap();
        assert_eq!(tree.depth(a).unwrap(), 1);
        assert_eq!(tree.depth(b).unwrap(), 2);
        assert_eq!(tree.depth(c).unwrap(), 3);
    }

    #[test]
    fn depth_reflects_relocation_immediately() {
        let mut tree = Tree::new();
        let root = tree.root();
        let a = tree.create_item(root).unwrap();
        let b = tree.create_item(tree.container_of(a).unwrap()).unwrap();
        assert_eq!(tree.depth(b).unwrap(), 2);

        tree.relocate_item(b, root, None).unwrap();
        assert_eq!(tree.depth(b).unwrap(), 1);
    }

    // ── size ─────────────────────────────────────────────────────────

    #[test]
    fn item_size_defaults_to_zero_and_is_settable() {
        let (mut tree, item) = tree_with_item();
        assert_eq!(tree.item_size(item).unwrap(), Size::default());
        tree.set_item_size(item, Size::new(120.0, 80.0)).unwrap();
        assert_eq!(tree.item_size(item).unwrap(), Size::new(120.0, 80.0));
    }

    #[test]
    fn size_of_unknown_item_fails() {
        let tree = Tree::new();
        assert!(tree.item_size(ItemId(5)).unwrap_err().is_not_found());
    }
}
