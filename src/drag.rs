// Drag session state machine: tracks the item being relocated from
// pick-up to drop or cancel.

use crate::tree::{ContainerId, ItemId, Size};

/// The current state of a drag gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    /// No drag in progress.
    Idle,
    /// An item is being dragged; its id and measured size are captured
    /// for the duration of the gesture.
    Dragging { item: ItemId, size: Size },
}

/// Effects the host should apply after feeding an event to the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEffect {
    /// Nothing to render.
    None,
    /// Pre-size the placeholder of the hovered container to the dragged
    /// item, so the layout does not jump when the drop completes.
    SizePlaceholder { container: ContainerId, size: Size },
}

/// Single-slot drag session. At most one drag is active per workspace;
/// starting a new one while dragging overwrites the old session
/// (last-writer-wins).
#[derive(Debug, Default)]
pub struct DragSession {
    state: DragState,
}

impl Default for DragState {
    fn default() -> Self {
        DragState::Idle
    }
}

impl DragSession {
    pub fn new() -> Self {
        Self {
            state: DragState::Idle,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Begin a drag, capturing the item and its size.
    ///
    /// An in-flight session is silently replaced; upstream never
    /// specified whether overlapping gestures are intended, so the
    /// overwrite is kept but logged.
    pub fn begin(&mut self, item: ItemId, size: Size) {
        if let DragState::Dragging { item: previous, .. } = self.state {
            log::warn!(target: "nestbox::drag", "drag of {item} overwrites active drag of {previous}");
        }
        log::info!(target: "nestbox::drag", "moving {item}...");
        self.state = DragState::Dragging { item, size };
    }

    /// Hover over a candidate container. No state change; returns the
    /// placeholder-sizing effect for the renderer.
    pub fn hover(&self, container: ContainerId) -> DragEffect {
        match self.state {
            DragState::Dragging { size, .. } => DragEffect::SizePlaceholder { container, size },
            DragState::Idle => DragEffect::None,
        }
    }

    /// End the session, returning the dragged item and captured size if
    /// a drag was active. The gesture always ends the session, whether
    /// or not the subsequent move succeeds.
    pub fn take(&mut self) -> Option<(ItemId, Size)> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging { item, size } => Some((item, size)),
            DragState::Idle => None,
        }
    }

    /// Abort the session without any tree mutation.
    pub fn cancel(&mut self) {
        if let DragState::Dragging { item, .. } = self.state {
            log::debug!(target: "nestbox::drag", "drag of {item} cancelled");
        }
        self.state = DragState::Idle;
    }
}
