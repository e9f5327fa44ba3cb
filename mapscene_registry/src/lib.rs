// Copyright 2025 the Mapscene Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point interaction registry: scene object id → behavior bundle.
//!
//! ## Overview
//!
//! Marker components register a [`CallbackBundle`] when they mount, replace
//! it when their props change, and unregister it when they unmount. The
//! engine's gesture controller looks bundles up by id while handling pointer
//! events; any consumer can ask "does this object have behavior?" without
//! knowing whether the marker component is currently mounted.
//!
//! The registry is an explicitly owned instance with view-session lifetime,
//! never a process global, so concurrent sessions (and tests) do not share
//! state. Access is single-threaded from the session's event-callback
//! context; the types are `Rc`-based and deliberately not `Send`.
//!
//! ## Contract
//!
//! - At most one bundle per id: [`InteractionRegistry::register`] replaces,
//!   never merges.
//! - [`InteractionRegistry::get`] is O(1) and never fails; a missing entry
//!   means "no interactive behavior", not an error.
//! - Bundles are handed out as `Rc<CallbackBundle>`, so an in-flight gesture
//!   keeps the bundle it resolved at pointer-down alive even if the marker
//!   unregisters mid-drag.
//!
//! ## Example
//!
//! ```
//! use mapscene_registry::{CallbackBundle, InteractionRegistry};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let clicks = Rc::new(Cell::new(0));
//! let seen = clicks.clone();
//!
//! let registry = InteractionRegistry::new();
//! registry.register(
//!     "wp-1",
//!     CallbackBundle::new()
//!         .draggable()
//!         .on_left_click(move |_event, _id| seen.set(seen.get() + 1)),
//! );
//!
//! let bundle = registry.get(&"wp-1".into()).expect("registered");
//! assert!(bundle.draggable);
//! ```

use core::fmt;
use std::cell::RefCell;
use std::rc::Rc;

use hashbrown::HashMap;
use tracing::debug;

use mapscene_scene::{PointerEvent, SceneObjectId, WorldPoint};

/// Handler for resolved click interactions (left or right).
pub type ClickHandler = Rc<dyn Fn(&PointerEvent, &SceneObjectId)>;

/// Handler fired when a drag gesture begins.
pub type DragStartHandler = Rc<dyn Fn(&SceneObjectId)>;

/// Handler fired with the unprojected world position while dragging.
pub type DragHandler = Rc<dyn Fn(&SceneObjectId, WorldPoint)>;

/// Handler fired when a drag gesture ends; the flag reports whether the
/// pointer actually moved past the drag threshold.
pub type DragEndHandler = Rc<dyn Fn(&SceneObjectId, WorldPoint, bool)>;

/// Interaction behavior associated with one scene object.
///
/// All handlers are optional. Drag handlers only fire when [`draggable`] is
/// set; click handlers fire on resolved non-drag interactions regardless.
///
/// Note that `on_drag_start` fires at pointer-down, before the drag
/// threshold is crossed, so a pure click on a draggable object also
/// observes it.
///
/// [`draggable`]: CallbackBundle::draggable
#[derive(Clone, Default)]
pub struct CallbackBundle {
    /// Whether the object can be dragged.
    pub draggable: bool,
    /// Fired on a resolved left click.
    pub on_left_click: Option<ClickHandler>,
    /// Fired on a right click.
    pub on_right_click: Option<ClickHandler>,
    /// Fired at pointer-down on a draggable object.
    pub on_drag_start: Option<DragStartHandler>,
    /// Fired per move while dragging, with the unprojected position.
    pub on_drag: Option<DragHandler>,
    /// Fired at pointer-up after a drag.
    pub on_drag_end: Option<DragEndHandler>,
}

impl CallbackBundle {
    /// Empty bundle: not draggable, no handlers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the object as draggable.
    pub fn draggable(mut self) -> Self {
        self.draggable = true;
        self
    }

    /// Set the left-click handler.
    pub fn on_left_click(mut self, f: impl Fn(&PointerEvent, &SceneObjectId) + 'static) -> Self {
        self.on_left_click = Some(Rc::new(f));
        self
    }

    /// Set the right-click handler.
    pub fn on_right_click(mut self, f: impl Fn(&PointerEvent, &SceneObjectId) + 'static) -> Self {
        self.on_right_click = Some(Rc::new(f));
        self
    }

    /// Set the drag-start handler.
    pub fn on_drag_start(mut self, f: impl Fn(&SceneObjectId) + 'static) -> Self {
        self.on_drag_start = Some(Rc::new(f));
        self
    }

    /// Set the per-move drag handler.
    pub fn on_drag(mut self, f: impl Fn(&SceneObjectId, WorldPoint) + 'static) -> Self {
        self.on_drag = Some(Rc::new(f));
        self
    }

    /// Set the drag-end handler.
    pub fn on_drag_end(mut self, f: impl Fn(&SceneObjectId, WorldPoint, bool) + 'static) -> Self {
        self.on_drag_end = Some(Rc::new(f));
        self
    }
}

impl fmt::Debug for CallbackBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackBundle")
            .field("draggable", &self.draggable)
            .field("on_left_click", &self.on_left_click.is_some())
            .field("on_right_click", &self.on_right_click.is_some())
            .field("on_drag_start", &self.on_drag_start.is_some())
            .field("on_drag", &self.on_drag.is_some())
            .field("on_drag_end", &self.on_drag_end.is_some())
            .finish()
    }
}

/// Session-scoped map from scene object id to behavior bundle.
///
/// The map is interior-mutable: every method takes `&self`, so marker
/// components can hold the registry by `Rc` and mutate it while the engine
/// holds a shared reference. Handlers fired by the engine may re-enter the
/// registry (a drag-end handler unmounting its own marker is the common
/// case); the inner borrow is released before any handler can run, so
/// re-entry never conflicts.
#[derive(Debug, Default)]
pub struct InteractionRegistry {
    bundles: RefCell<HashMap<SceneObjectId, Rc<CallbackBundle>>>,
}

impl InteractionRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate a bundle with an id, replacing any existing bundle.
    pub fn register(&self, id: impl Into<SceneObjectId>, bundle: CallbackBundle) {
        let id = id.into();
        let replaced = self
            .bundles
            .borrow_mut()
            .insert(id.clone(), Rc::new(bundle))
            .is_some();
        debug!(target: "mapscene::registry", %id, replaced, "register");
    }

    /// Remove the bundle for an id. Returns whether one was present.
    pub fn unregister(&self, id: &SceneObjectId) -> bool {
        let removed = self.bundles.borrow_mut().remove(id).is_some();
        if removed {
            debug!(target: "mapscene::registry", %id, "unregister");
        }
        removed
    }

    /// The bundle for an id, if registered. O(1), never fails.
    pub fn get(&self, id: &SceneObjectId) -> Option<Rc<CallbackBundle>> {
        self.bundles.borrow().get(id).cloned()
    }

    /// Whether an id has a registered bundle.
    pub fn contains(&self, id: &SceneObjectId) -> bool {
        self.bundles.borrow().contains_key(id)
    }

    /// Number of registered bundles.
    pub fn len(&self) -> usize {
        self.bundles.borrow().len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.bundles.borrow().is_empty()
    }

    /// Remove every bundle.
    pub fn clear(&self) {
        self.bundles.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn absent_id_is_normal() {
        let registry = InteractionRegistry::new();
        assert!(registry.get(&"nope".into()).is_none());
        assert!(!registry.contains(&"nope".into()));
        assert!(registry.is_empty());
    }

    #[test]
    fn register_then_get() {
        let registry = InteractionRegistry::new();
        registry.register("wp-1", CallbackBundle::new().draggable());

        let bundle = registry.get(&"wp-1".into()).expect("registered bundle");
        assert!(bundle.draggable);
        assert!(bundle.on_left_click.is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn reregistration_replaces_never_merges() {
        let hits = Rc::new(Cell::new(0));
        let seen = hits.clone();

        let registry = InteractionRegistry::new();
        registry.register(
            "wp-1",
            CallbackBundle::new()
                .draggable()
                .on_left_click(move |_, _| seen.set(seen.get() + 1)),
        );
        // Replacement drops both the draggable flag and the click handler.
        registry.register("wp-1", CallbackBundle::new());

        let bundle = registry.get(&"wp-1".into()).expect("replaced bundle");
        assert!(!bundle.draggable);
        assert!(bundle.on_left_click.is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn unregister_reports_presence() {
        let registry = InteractionRegistry::new();
        registry.register("wp-1", CallbackBundle::new());

        assert!(registry.unregister(&"wp-1".into()));
        assert!(!registry.unregister(&"wp-1".into()));
        assert!(registry.get(&"wp-1".into()).is_none());
    }

    #[test]
    fn bundle_outlives_unregistration() {
        // A consumer holding the Rc keeps the bundle alive after the
        // marker unmounts; this is what lets an in-flight drag finish.
        let fired = Rc::new(Cell::new(false));
        let seen = fired.clone();

        let registry = InteractionRegistry::new();
        registry.register(
            "wp-1",
            CallbackBundle::new().on_drag_start(move |_| seen.set(true)),
        );

        let held = registry.get(&"wp-1".into()).expect("bundle");
        registry.unregister(&"wp-1".into());

        let start = held.on_drag_start.as_ref().expect("handler");
        start(&"wp-1".into());
        assert!(fired.get());
    }

    #[test]
    fn clear_empties_the_registry() {
        let registry = InteractionRegistry::new();
        registry.register("a", CallbackBundle::new());
        registry.register("b", CallbackBundle::new());
        assert_eq!(registry.len(), 2);

        registry.clear();
        assert!(registry.is_empty());
    }

    #[test]
    fn bundle_debug_reports_handler_presence() {
        let bundle = CallbackBundle::new().draggable().on_drag(|_, _| {});
        let text = format!("{bundle:?}");
        assert!(text.contains("draggable: true"), "got: {text}");
        assert!(text.contains("on_drag: true"), "got: {text}");
        assert!(text.contains("on_drag_end: false"), "got: {text}");
    }
}
