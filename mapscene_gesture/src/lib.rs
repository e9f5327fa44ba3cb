// Copyright 2025 the Mapscene Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Click-vs-drag disambiguation for point markers.
//!
//! ## Overview
//!
//! [`DragController`] consumes pointer down/move/up events over the scene
//! and drives a per-gesture state machine:
//!
//! ```text
//! Idle --down on registered id--> Pending --move > threshold--> Dragging
//!   ^                                |                             |
//!   +------------- up --------------+----------- up --------------+
//! ```
//!
//! A gesture that never travels more than the pixel threshold resolves as a
//! click (`on_left_click`); one that does resolves as a drag
//! (`on_drag` per move, `on_drag_end` at release). While a drag is active
//! the controller exclusively owns camera navigation: every capability is
//! suspended on the Pending → Dragging transition and restored on every
//! pointer up, idempotently, so dragging a marker can never also move the
//! camera.
//!
//! ## Behavior notes
//!
//! - `on_drag_start` fires optimistically at pointer-down, before the
//!   threshold is crossed, so a pure click on a draggable marker also
//!   observes it. This mirrors the long-standing behavior of the map view
//!   this engine was built for and is kept deliberately.
//! - The Pending → Dragging transition is only considered for draggable
//!   bundles; a non-draggable bundle always resolves as a click no matter
//!   how far the pointer travels.
//! - The bundle is captured at pointer-down. Unregistering the id mid-drag
//!   does not affect the in-flight gesture.
//! - Failed unprojection (pointer over open sky) silently skips the
//!   dependent callback for that event only; the gesture continues.
//!
//! ## Example
//!
//! ```
//! use mapscene_gesture::DragController;
//! use mapscene_registry::{CallbackBundle, InteractionRegistry};
//! use mapscene_scene::memory::MemoryScene;
//! use mapscene_scene::{PickHit, PointerEvent, ShapeKind};
//! use kurbo::Point;
//!
//! let mut scene = MemoryScene::new();
//! scene.place_hits(
//!     Point::new(100.0, 100.0),
//!     vec![PickHit::object("wp-1", ShapeKind::Marker)],
//! );
//!
//! let registry = InteractionRegistry::new();
//! registry.register("wp-1", CallbackBundle::new().draggable());
//!
//! let mut controller = DragController::new();
//! controller.on_pointer_down(&mut scene, &registry, PointerEvent::new(Point::new(100.0, 100.0)));
//! controller.on_pointer_move(&mut scene, &registry, PointerEvent::new(Point::new(110.0, 100.0)));
//! assert!(controller.is_dragging());
//! controller.on_pointer_up(&mut scene, PointerEvent::new(Point::new(110.0, 100.0)));
//! assert!(!controller.is_dragging());
//! ```

use std::rc::Rc;

use tracing::{debug, trace};

use mapscene_registry::{CallbackBundle, InteractionRegistry};
use mapscene_scene::{
    CursorIcon, NavFlags, PickHit, PointerEvent, Scene, SceneObjectId, ScreenPoint, ShapeKind,
    query,
};

/// Pixel distance a pointer must travel from its down position before a
/// gesture is treated as a drag rather than a click.
pub const DRAG_THRESHOLD_PX: f64 = 4.0;

/// Phase of the current gesture.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum GesturePhase {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Pointer is down on a registered object; not yet past the threshold.
    Pending,
    /// Threshold exceeded; camera navigation is suspended.
    Dragging,
}

/// The object a gesture resolved at pointer-down.
///
/// Holds the bundle by `Rc` so the gesture survives mid-flight
/// unregistration.
#[derive(Debug)]
struct ActiveTarget {
    id: SceneObjectId,
    bundle: Rc<CallbackBundle>,
}

/// Drag/click interaction controller.
///
/// One instance exists per view session; a single active pointer is
/// assumed. See the [module docs](self) for the state machine.
#[derive(Debug)]
pub struct DragController {
    phase: GesturePhase,
    down: Option<ScreenPoint>,
    active: Option<ActiveTarget>,
    has_moved: bool,
    threshold: f64,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new()
    }
}

impl DragController {
    /// Controller with the default drag threshold ([`DRAG_THRESHOLD_PX`]).
    pub fn new() -> Self {
        Self::with_threshold(DRAG_THRESHOLD_PX)
    }

    /// Controller with a custom drag threshold in pixels.
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            phase: GesturePhase::Idle,
            down: None,
            active: None,
            has_moved: false,
            threshold,
        }
    }

    /// Current gesture phase.
    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// True while a drag (threshold exceeded) is in progress.
    pub fn is_dragging(&self) -> bool {
        self.phase == GesturePhase::Dragging
    }

    /// The id the current gesture is operating on, if any.
    pub fn active_id(&self) -> Option<&SceneObjectId> {
        self.active.as_ref().map(|t| &t.id)
    }

    /// Handle a pointer-down event.
    ///
    /// Resolves the object under the pointer (drilling through overlays)
    /// and, when the registry holds a bundle for it, arms the gesture. On a
    /// draggable bundle `on_drag_start` fires here, optimistically.
    pub fn on_pointer_down<S: Scene + ?Sized>(
        &mut self,
        scene: &mut S,
        registry: &InteractionRegistry,
        event: PointerEvent,
    ) {
        let Some((id, _kind)) = query::resolve_id(scene, event.position) else {
            return;
        };
        let Some(bundle) = registry.get(&id) else {
            return;
        };

        debug!(target: "mapscene::gesture", %id, draggable = bundle.draggable, "pointer down");
        self.phase = GesturePhase::Pending;
        self.down = Some(event.position);
        self.has_moved = false;
        if bundle.draggable
            && let Some(on_drag_start) = &bundle.on_drag_start
        {
            on_drag_start(&id);
        }
        self.active = Some(ActiveTarget { id, bundle });
    }

    /// Handle a pointer-move event.
    ///
    /// Updates the cursor affordance on every move regardless of phase,
    /// advances Pending → Dragging once the threshold is exceeded (for
    /// draggable bundles), and streams `on_drag` with the unprojected
    /// pointer position while dragging.
    pub fn on_pointer_move<S: Scene + ?Sized>(
        &mut self,
        scene: &mut S,
        registry: &InteractionRegistry,
        event: PointerEvent,
    ) {
        self.update_cursor(scene, registry, event.position);

        if self.phase == GesturePhase::Pending
            && let (Some(target), Some(down)) = (&self.active, self.down)
            && target.bundle.draggable
            && event.position.distance(down) > self.threshold
        {
            debug!(target: "mapscene::gesture", id = %target.id, "drag start; nav suspended");
            self.has_moved = true;
            self.phase = GesturePhase::Dragging;
            scene.set_nav(NavFlags::empty());
        }

        if self.phase == GesturePhase::Dragging
            && let Some(target) = &self.active
            && let Some(on_drag) = &target.bundle.on_drag
        {
            // Open sky: no world position, no callback, gesture continues.
            if let Some(world) = scene.unproject(event.position) {
                on_drag(&target.id, world);
            }
        }
    }

    /// Handle a pointer-up event.
    ///
    /// Camera navigation is restored first, unconditionally. A moved
    /// gesture resolves as a drag end (`did_drag = true`), an unmoved one
    /// as a left click; either way the controller returns to idle.
    pub fn on_pointer_up<S: Scene + ?Sized>(&mut self, scene: &mut S, event: PointerEvent) {
        scene.set_nav(NavFlags::all());

        if let Some(target) = self.active.take() {
            if self.has_moved {
                debug!(target: "mapscene::gesture", id = %target.id, "drag end; nav restored");
                if let Some(on_drag_end) = &target.bundle.on_drag_end
                    && let Some(world) = scene.unproject(event.position)
                {
                    on_drag_end(&target.id, world, true);
                }
            } else if let Some(on_left_click) = &target.bundle.on_left_click {
                debug!(target: "mapscene::gesture", id = %target.id, "click");
                on_left_click(&event, &target.id);
            }
        }

        self.phase = GesturePhase::Idle;
        self.down = None;
        self.has_moved = false;
    }

    /// Handle a right click. Independent of the drag state machine.
    pub fn on_right_click<S: Scene + ?Sized>(
        &self,
        scene: &mut S,
        registry: &InteractionRegistry,
        event: PointerEvent,
    ) {
        let Some((id, _kind)) = query::resolve_id(scene, event.position) else {
            return;
        };
        if let Some(bundle) = registry.get(&id)
            && let Some(on_right_click) = &bundle.on_right_click
        {
            debug!(target: "mapscene::gesture", %id, "right click");
            on_right_click(&event, &id);
        }
    }

    /// Abort any in-flight gesture without firing click or drag-end
    /// callbacks, restoring camera navigation. Used on session teardown.
    pub fn cancel<S: Scene + ?Sized>(&mut self, scene: &mut S) {
        if self.phase != GesturePhase::Idle {
            debug!(target: "mapscene::gesture", phase = ?self.phase, "gesture canceled");
        }
        scene.set_nav(NavFlags::all());
        self.phase = GesturePhase::Idle;
        self.down = None;
        self.active = None;
        self.has_moved = false;
    }

    /// Pointer-style cursor over interactive or registry-bound objects,
    /// default cursor otherwise.
    fn update_cursor<S: Scene + ?Sized>(
        &self,
        scene: &mut S,
        registry: &InteractionRegistry,
        at: ScreenPoint,
    ) {
        let wants_pointer = query::resolve(scene, at)
            .is_some_and(|hit| is_interactive(registry, &hit));
        trace!(target: "mapscene::gesture", wants_pointer, "cursor");
        scene.set_cursor(if wants_pointer {
            CursorIcon::Pointer
        } else {
            CursorIcon::Default
        });
    }
}

/// Whether a resolved hit should show the pointer cursor: any identified
/// area, volume, or marker shape, or any id with a registered bundle.
fn is_interactive(registry: &InteractionRegistry, hit: &PickHit) -> bool {
    let Some(id) = hit.id() else {
        return false;
    };
    match hit.kind() {
        Some(ShapeKind::Area | ShapeKind::Volume | ShapeKind::Marker) => true,
        _ => registry.contains(id),
    }
}
