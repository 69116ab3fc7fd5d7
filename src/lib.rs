// nestbox: a nested-container drag-reordering engine.
//
// Users build arbitrarily nested layouts by dragging movable boxes into
// drop targets; every box carries its own drop target, so nesting is
// unbounded. This crate is the headless core: the tree of alternating
// containers and items, the placeholder (affordance) policy, the drag
// session state machine and the command engine. Rendering, hit testing
// and styling belong to an external collaborator that consumes the
// workspace's events and read-only queries.

pub mod command;
pub mod config;
pub mod drag;
pub mod events;
pub mod style;
pub mod tree;
pub mod workspace;

pub use command::{BuiltinCommand, CommandHandler, CommandRegistry};
pub use config::{Config, ConfigError, DraggingMode};
pub use drag::{DragEffect, DragSession, DragState};
pub use events::TreeEvent;
pub use style::{ColorMethod, Rgb};
pub use tree::{ContainerId, ItemId, Placeholder, Size, Tree, TreeError};
pub use workspace::Workspace;
