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

//! Window pointer listeners for panel drags.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use log::warn;
use wasm_bindgen::JsCast;
use web_sys::MouseEvent;

use super::{ListenerChange, PanelId, PanelManager};

type Listeners = Rc<RefCell<Option<[EventListener; 2]>>>;

/// Applies [`ListenerChange`]s from a shared [`PanelManager`] to real
/// `mousemove` / `mouseup` listeners on `window`.
///
/// `on_change` runs after every position or drag-state update so the host can
/// re-render.
pub struct PanelDragBinding {
    manager: Rc<RefCell<PanelManager>>,
    listeners: Listeners,
    on_change: Rc<dyn Fn()>,
}

impl PanelDragBinding {
    pub fn new(manager: Rc<RefCell<PanelManager>>, on_change: impl Fn() + 'static) -> Self {
        Self {
            manager,
            listeners: Rc::new(RefCell::new(None)),
            on_change: Rc::new(on_change),
        }
    }

    /// Call from the panel header's `mousedown` handler.
    pub fn start_drag(&self, id: PanelId, event: &MouseEvent) {
        event.prevent_default();
        let change = self
            .manager
            .borrow_mut()
            .start_drag(id, event.client_x() as f64, event.client_y() as f64);
        self.apply(change);
        (self.on_change)();
    }

    pub fn toggle_panel(&self, id: PanelId) {
        let change = self.manager.borrow_mut().toggle_panel(id);
        self.apply(change);
        (self.on_change)();
    }

    pub fn is_listening(&self) -> bool {
        self.listeners.borrow().is_some()
    }

    fn apply(&self, change: ListenerChange) {
        match change {
            ListenerChange::Install => self.install(),
            ListenerChange::Remove => remove(&self.listeners),
            ListenerChange::Unchanged => {}
        }
    }

    fn install(&self) {
        let Some(window) = web_sys::window() else {
            warn!("no window, panel drag listeners not installed");
            return;
        };

        let manager = self.manager.clone();
        let on_change = self.on_change.clone();
        let on_move = EventListener::new(&window, "mousemove", move |event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                manager
                    .borrow_mut()
                    .pointer_move(event.client_x() as f64, event.client_y() as f64);
                on_change();
            }
        });

        let manager = self.manager.clone();
        let on_change = self.on_change.clone();
        let listeners = self.listeners.clone();
        let on_up = EventListener::new(&window, "mouseup", move |_| {
            let change = manager.borrow_mut().pointer_up();
            if change == ListenerChange::Remove {
                remove(&listeners);
            }
            on_change();
        });

        *self.listeners.borrow_mut() = Some([on_move, on_up]);
    }
}

impl Drop for PanelDragBinding {
    fn drop(&mut self) {
        self.manager.borrow_mut().pointer_up();
        self.listeners.borrow_mut().take();
    }
}

// A listener may be removed from inside its own callback, so the drop is
// deferred to the next task.
fn remove(listeners: &Listeners) {
    if let Some(active) = listeners.borrow_mut().take() {
        wasm_bindgen_futures::spawn_local(async move {
            drop(active);
        });
    }
}
