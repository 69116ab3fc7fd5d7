// Workspace: one controller instance owning a tree, its drag session,
// the command registry and the observer list. Multiple workspaces can
// coexist; nothing here is process-global.

use crate::command::{CommandHandler, CommandRegistry};
use crate::config::{Config, ConfigError, DraggingMode};
use crate::drag::{DragEffect, DragSession, DragState};
use crate::events::{Observers, TreeEvent};
use crate::style;
use crate::tree::{ContainerId, ItemId, Size, Tree, TreeError};

/// Top-level controller for one nested box tree.
///
/// Structural errors raised by the tree are returned to direct callers,
/// but the drag and command surfaces catch them and degrade to a logged
/// no-op; only configuration errors at construction are fatal.
pub struct Workspace {
    config: Config,
    tree: Tree,
    session: DragSession,
    commands: CommandRegistry,
    observers: Observers,
}

impl Workspace {
    /// Create a workspace from a validated configuration. The tree
    /// starts as a single empty root container with its placeholder.
    pub fn new(config: Config) -> Self {
        let mut workspace = Self {
            config,
            tree: Tree::new(),
            session: DragSession::new(),
            commands: CommandRegistry::new(),
            observers: Observers::new(),
        };
        workspace.tree.refresh_placeholders();
        workspace
    }

    /// Create a workspace from TOML configuration text. This is the one
    /// fallible construction path: invalid configuration aborts here.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(Self::new(Config::from_toml(toml_str)?))
    }

    // ── Read-only surface ───────────────────────────────────────────────

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Styling hint passed through to the renderer.
    pub fn dragging_mode(&self) -> DraggingMode {
        self.config.dragging.mode
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn root(&self) -> ContainerId {
        self.tree.root()
    }

    pub fn depth(&self, item: ItemId) -> Result<usize, TreeError> {
        self.tree.depth(item)
    }

    pub fn item_size(&self, item: ItemId) -> Result<Size, TreeError> {
        self.tree.item_size(item)
    }

    /// CSS color for an item derived from its depth and the configured
    /// color method.
    pub fn depth_color(&self, item: ItemId) -> Result<String, TreeError> {
        let depth = self.tree.depth(item)?;
        Ok(style::depth_color(
            depth,
            self.config.boxes.color_method,
            self.config.boxes.primary_color,
            self.config.boxes.secondary_color,
        ))
    }

    pub fn drag_state(&self) -> DragState {
        self.session.state()
    }

    // ── Observers ───────────────────────────────────────────────────────

    /// Register an observer; delivery is synchronous and in
    /// registration order.
    pub fn observe(&mut self, observer: impl FnMut(&TreeEvent) + 'static) {
        self.observers.register(Box::new(observer));
    }

    // ── Structural mutations ────────────────────────────────────────────

    /// Create an item in `parent` (the affordance-activation path).
    pub fn create_item(&mut self, parent: ContainerId) -> Result<ItemId, TreeError> {
        log::info!(target: "nestbox::tree", "creating item in {parent}...");
        let item = self.tree.create_item(parent)?;
        self.observers.emit(&TreeEvent::ItemCreated { item, parent });
        self.update();
        Ok(item)
    }

    /// Remove an item and its subtree.
    pub fn remove_item(&mut self, item: ItemId) -> Result<(), TreeError> {
        self.tree.remove_item(item)?;
        self.observers.emit(&TreeEvent::ItemRemoved { item });
        self.update();
        Ok(())
    }

    /// Move an item into `target`, before `before` if given.
    pub fn relocate_item(
        &mut self,
        item: ItemId,
        target: ContainerId,
        before: Option<ItemId>,
    ) -> Result<(), TreeError> {
        let from = self.tree.parent_of(item)?;
        self.tree.relocate_item(item, target, before)?;
        self.observers.emit(&TreeEvent::ItemRelocated {
            item,
            from,
            to: target,
        });
        self.update();
        Ok(())
    }

    /// Re-derive placeholders and notify observers. Idempotent; safe to
    /// call at any time.
    pub fn update(&mut self) {
        self.tree.refresh_placeholders();
        self.observers.emit(&TreeEvent::TreeUpdated);
    }

    // ── Drag surface ────────────────────────────────────────────────────

    /// Begin dragging an item, recording its measured size. A stale id
    /// is a logged no-op; an in-flight drag is overwritten.
    pub fn begin_drag(&mut self, item: ItemId, size: Size) {
        if self.tree.set_item_size(item, size).is_err() {
            log::warn!(target: "nestbox::drag", "cannot drag {item}: not found");
            return;
        }
        self.session.begin(item, size);
    }

    /// Pointer hovering over a candidate container: pre-size its
    /// placeholder to the dragged item.
    pub fn hover(&mut self, container: ContainerId) {
        if let DragEffect::SizePlaceholder { container, size } = self.session.hover(container) {
            if self.tree.hint_placeholder(container, size).is_err() {
                log::warn!(target: "nestbox::drag", "hover over {container}: not found");
            }
        }
    }

    /// Pointer left a candidate container: drop its size hint.
    pub fn drag_leave(&mut self, container: ContainerId) {
        let _ = self.tree.clear_placeholder_hint(container);
    }

    /// Drop the dragged item into `target`. The session always ends;
    /// a failed move (cycle, stale id) degrades to a logged no-op.
    /// Returns whether the tree changed.
    pub fn drop_dragged(&mut self, target: ContainerId, before: Option<ItemId>) -> bool {
        let Some((item, _size)) = self.session.take() else {
            return false;
        };
        self.tree.clear_all_placeholder_hints();

        match self.relocate_item(item, target, before) {
            Ok(()) => true,
            Err(e) => {
                log::warn!(target: "nestbox::drag", "cannot move {item} here: {e}");
                self.update();
                false
            }
        }
    }

    /// Abort the drag without touching the tree.
    pub fn cancel_drag(&mut self) {
        self.session.cancel();
        self.tree.clear_all_placeholder_hints();
    }

    // ── Command surface ─────────────────────────────────────────────────

    /// Register (or replace) a named command.
    pub fn register_command(&mut self, name: &str, handler: CommandHandler) {
        self.commands.register(name, handler);
    }

    /// Names of the currently available commands, in menu order.
    pub fn commands(&self) -> Vec<&str> {
        self.commands.names()
    }

    /// Run a command against an item. Commands may be invoked against
    /// stale menu state, so structural errors degrade to a logged
    /// no-op; a placeholder pass runs either way.
    pub fn run_command(&mut self, name: &str, item: ItemId) {
        let existed = self.tree.contains_item(item);
        if let Err(e) = self.commands.dispatch(&mut self.tree, name, item) {
            log::warn!(target: "nestbox::command", "command '{name}' on {item}: {e}");
        }
        if existed && !self.tree.contains_item(item) {
            self.observers.emit(&TreeEvent::ItemRemoved { item });
        }
        self.update();
    }
}
