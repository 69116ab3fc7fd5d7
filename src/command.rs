// Command engine: named item-level commands dispatched from a context menu.

use crate::tree::{ItemId, Tree, TreeError};

/// Commands the engine always knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinCommand {
    Delete,
    Cut,
    Copy,
    Paste,
}

impl BuiltinCommand {
    pub const ALL: [BuiltinCommand; 4] = [
        BuiltinCommand::Delete,
        BuiltinCommand::Cut,
        BuiltinCommand::Copy,
        BuiltinCommand::Paste,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BuiltinCommand::Delete => "delete",
            BuiltinCommand::Cut => "cut",
            BuiltinCommand::Copy => "copy",
            BuiltinCommand::Paste => "paste",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

/// Handler invoked with the tree and the item the menu was opened on.
pub type CommandHandler = Box<dyn FnMut(&mut Tree, ItemId) -> Result<(), TreeError>>;

/// Registry mapping command names to handlers.
///
/// The built-in commands are installed at construction, in menu order;
/// `register` adds custom commands or replaces existing ones. Cut, copy
/// and paste are reserved extension points: they are listed in the menu
/// but their stock handlers leave the tree untouched.
pub struct CommandRegistry {
    entries: Vec<(String, CommandHandler)>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            entries: Vec::new(),
        };
        registry.register(
            BuiltinCommand::Delete.name(),
            Box::new(|tree, item| tree.remove_item(item)),
        );
        for inert in [BuiltinCommand::Cut, BuiltinCommand::Copy, BuiltinCommand::Paste] {
            registry.register(
                inert.name(),
                Box::new(move |_tree, item| {
                    log::debug!(target: "nestbox::command", "{} on {item}: not implemented", inert.name());
                    Ok(())
                }),
            );
        }
        registry
    }

    /// Register (or replace) a command handler.
    pub fn register(&mut self, name: &str, handler: CommandHandler) {
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| n == name) {
            log::warn!(target: "nestbox::command", "replacing handler for command '{name}'");
            entry.1 = handler;
        } else {
            self.entries.push((name.to_string(), handler));
        }
    }

    /// Currently available command names, in menu order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Run a command against an item. Unknown names are a logged no-op;
    /// structural errors propagate so the caller can degrade them.
    pub fn dispatch(
        &mut self,
        tree: &mut Tree,
        name: &str,
        item: ItemId,
    ) -> Result<(), TreeError> {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, handler)) => handler(tree, item),
            None => {
                log::warn!(target: "nestbox::command", "unknown command '{name}'");
                Ok(())
            }
        }
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
