/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 *
 * Unless you explicitly state otherwise, any contribution intentionally
 * submitted for inclusion in the work by you, as defined in the Apache-2.0
 * license, shall be dual licensed as above, without any additional terms or
 * conditions.
 */

//! Floating panels: chat, calculator and participants.
//!
//! Panels are dragged by their header. While a drag is active we need exactly
//! one window-level pointer subscription; [`PanelManager`] reports when that
//! subscription must be installed or removed through [`ListenerChange`], and
//! the host (or `PanelDragBinding` under the `wasm` feature) applies it.

#[cfg(feature = "wasm")]
mod dom;

#[cfg(feature = "wasm")]
pub use dom::PanelDragBinding;

use log::trace;

use crate::constants::{CALCULATOR_LEFT, CHAT_RIGHT_OFFSET, PANEL_TOP, PARTICIPANTS_RIGHT_OFFSET};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelId {
    Chat,
    Calculator,
    Participants,
}

impl PanelId {
    pub const ALL: [PanelId; 3] = [PanelId::Chat, PanelId::Calculator, PanelId::Participants];

    fn index(self) -> usize {
        match self {
            PanelId::Chat => 0,
            PanelId::Calculator => 1,
            PanelId::Participants => 2,
        }
    }
}

/// Top-left corner in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatingPanel {
    pub is_open: bool,
    pub position: Position,
    pub is_dragging: bool,
}

/// What to do with the window pointer subscription after a drag call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerChange {
    Install,
    Remove,
    Unchanged,
}

/// Area panels are kept inside when bounds are set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
    /// Size of a panel; its top-left corner stays within `width - panel_width`.
    pub panel_width: f64,
    pub panel_height: f64,
}

impl Bounds {
    fn constrain(&self, p: Position) -> Position {
        let max_x = (self.width - self.panel_width).max(0.0);
        let max_y = (self.height - self.panel_height).max(0.0);
        Position {
            x: p.x.max(0.0).min(max_x),
            y: p.y.max(0.0).min(max_y),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
    panel: PanelId,
    offset_x: f64,
    offset_y: f64,
}

#[derive(Debug, Clone)]
pub struct PanelManager {
    panels: [FloatingPanel; 3],
    drag: Option<Drag>,
    bounds: Option<Bounds>,
}

impl PanelManager {
    /// All panels closed at their default positions for a viewport of `viewport_width`.
    pub fn new(viewport_width: f64) -> Self {
        let closed_at = |x: f64| FloatingPanel {
            is_open: false,
            position: Position::new(x, PANEL_TOP),
            is_dragging: false,
        };
        Self {
            panels: [
                closed_at(viewport_width - CHAT_RIGHT_OFFSET),
                closed_at(CALCULATOR_LEFT),
                closed_at(viewport_width - PARTICIPANTS_RIGHT_OFFSET),
            ],
            drag: None,
            bounds: None,
        }
    }

    /// Clamp every position to `bounds` from now on.
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        for panel in &mut self.panels {
            panel.position = bounds.constrain(panel.position);
        }
        self.bounds = Some(bounds);
        self
    }

    pub fn panel(&self, id: PanelId) -> &FloatingPanel {
        &self.panels[id.index()]
    }

    fn panel_mut(&mut self, id: PanelId) -> &mut FloatingPanel {
        &mut self.panels[id.index()]
    }

    pub fn is_open(&self, id: PanelId) -> bool {
        self.panel(id).is_open
    }

    pub fn open_panel(&mut self, id: PanelId) {
        self.panel_mut(id).is_open = true;
    }

    /// Closing the panel being dragged also ends the drag.
    pub fn close_panel(&mut self, id: PanelId) -> ListenerChange {
        self.panel_mut(id).is_open = false;
        if self.drag.map(|d| d.panel) == Some(id) {
            return self.pointer_up();
        }
        ListenerChange::Unchanged
    }

    pub fn toggle_panel(&mut self, id: PanelId) -> ListenerChange {
        if self.is_open(id) {
            self.close_panel(id)
        } else {
            self.open_panel(id);
            ListenerChange::Unchanged
        }
    }

    /// Pointer went down on the header of `id` at (`x`, `y`).
    ///
    /// Closed panels cannot be grabbed. Grabbing a second panel mid-drag
    /// moves the capture to it.
    pub fn start_drag(&mut self, id: PanelId, x: f64, y: f64) -> ListenerChange {
        if !self.is_open(id) {
            return ListenerChange::Unchanged;
        }
        let change = match self.drag.take() {
            Some(previous) => {
                self.panel_mut(previous.panel).is_dragging = false;
                ListenerChange::Unchanged
            }
            None => ListenerChange::Install,
        };
        let panel = self.panel_mut(id);
        panel.is_dragging = true;
        let origin = panel.position;
        self.drag = Some(Drag {
            panel: id,
            offset_x: x - origin.x,
            offset_y: y - origin.y,
        });
        trace!("drag start {id:?} at ({x}, {y})");
        change
    }

    /// Moves only the captured panel. Ignored when no drag is active.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        let Some(drag) = self.drag else {
            return;
        };
        let mut next = Position::new(x - drag.offset_x, y - drag.offset_y);
        if let Some(bounds) = &self.bounds {
            next = bounds.constrain(next);
        }
        self.panel_mut(drag.panel).position = next;
    }

    /// Release wherever the pointer is.
    pub fn pointer_up(&mut self) -> ListenerChange {
        for panel in &mut self.panels {
            panel.is_dragging = false;
        }
        match self.drag.take() {
            Some(drag) => {
                trace!("drag end {:?}", drag.panel);
                ListenerChange::Remove
            }
            None => ListenerChange::Unchanged,
        }
    }

    /// True iff a window pointer subscription should exist.
    pub fn is_listening(&self) -> bool {
        self.drag.is_some()
    }

    pub fn dragging(&self) -> Option<PanelId> {
        self.drag.map(|d| d.panel)
    }
}
