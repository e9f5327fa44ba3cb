// Copyright 2025 the Mapscene Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-view-session input wiring.
//!
//! ## Overview
//!
//! [`InteractionSession`] is the single owner binding the interaction engine
//! to one render surface: one registry, one hover-highlight manager per
//! shape family, and one drag/click controller, all fed from one stream of
//! pointer events. Exactly one session exists per active view session; it is
//! created on session start and torn down on session end.
//!
//! Consumers never attach their own input handlers to the surface. Two
//! independent dispatchers on the same surface would race on cursor and
//! camera state and double-fire effects, so independently mounted consumers
//! reach the one session through a [`SessionSlot`] instead.
//!
//! ## Event routing
//!
//! - `Move` events go to both highlight managers first (read-only picking,
//!   overlay mutation), then to the controller (cursor affordance, drag
//!   streaming). The two managers are independent and each hit-test the
//!   event on their own; the relative order of the consumer groups is not
//!   observable, but a fixed order keeps handling deterministic.
//! - `Down` and `Up` events go to the controller only.
//! - Right clicks are routed separately via
//!   [`InteractionSession::handle_right_click`]; they never touch gesture
//!   state.
//!
//! ## Teardown
//!
//! [`InteractionSession::teardown`] is defensive and idempotent: it cancels
//! any in-flight gesture (restoring camera navigation without firing click
//! or drag-end callbacks), destroys every outstanding overlay, restores the
//! default cursor, and clears the registry. Safe to call mid-drag and
//! mid-highlight, and required before the render surface is destroyed.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use mapscene_gesture::DragController;
use mapscene_highlight::{AreaHighlighter, VolumeHighlighter};
use mapscene_registry::InteractionRegistry;
use mapscene_scene::{CursorIcon, PointerEvent, Scene};

/// A routed pointer event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerInput {
    /// Primary button pressed.
    Down(PointerEvent),
    /// Pointer moved.
    Move(PointerEvent),
    /// Primary button released.
    Up(PointerEvent),
}

/// The one interaction session bound to a render surface.
///
/// See the [module docs](self) for routing and teardown semantics.
#[derive(Debug)]
pub struct InteractionSession {
    registry: Rc<InteractionRegistry>,
    area: AreaHighlighter,
    volume: VolumeHighlighter,
    controller: DragController,
}

impl Default for InteractionSession {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionSession {
    /// Session with a fresh registry.
    pub fn new() -> Self {
        Self::with_registry(Rc::new(InteractionRegistry::new()))
    }

    /// Session sharing an existing registry.
    pub fn with_registry(registry: Rc<InteractionRegistry>) -> Self {
        debug!(target: "mapscene::session", "session created");
        Self {
            registry,
            area: AreaHighlighter::new(),
            volume: VolumeHighlighter::new(),
            controller: DragController::new(),
        }
    }

    /// The registry marker components register against.
    pub fn registry(&self) -> &Rc<InteractionRegistry> {
        &self.registry
    }

    /// The area-family highlight manager.
    pub fn area(&self) -> &AreaHighlighter {
        &self.area
    }

    /// The volume-family highlight manager.
    pub fn volume(&self) -> &VolumeHighlighter {
        &self.volume
    }

    /// The drag/click controller.
    pub fn controller(&self) -> &DragController {
        &self.controller
    }

    /// Route one pointer event to the session's consumers.
    pub fn handle<S: Scene + ?Sized>(&mut self, scene: &mut S, input: PointerInput) {
        match input {
            PointerInput::Down(event) => {
                self.controller.on_pointer_down(scene, &self.registry, event);
            }
            PointerInput::Move(event) => {
                self.area.on_pointer_move(scene, event.position);
                self.volume.on_pointer_move(scene, event.position);
                self.controller.on_pointer_move(scene, &self.registry, event);
            }
            PointerInput::Up(event) => {
                self.controller.on_pointer_up(scene, event);
            }
        }
    }

    /// Route a right click. Independent of the drag state machine.
    pub fn handle_right_click<S: Scene + ?Sized>(&mut self, scene: &mut S, event: PointerEvent) {
        self.controller.on_right_click(scene, &self.registry, event);
    }

    /// Tear the session down before the render surface goes away.
    ///
    /// Cancels any in-flight gesture without firing callbacks, destroys all
    /// outstanding overlays, restores the default cursor, and clears the
    /// registry. Idempotent.
    pub fn teardown<S: Scene + ?Sized>(&mut self, scene: &mut S) {
        debug!(target: "mapscene::session", "session teardown");
        self.controller.cancel(scene);
        self.area.clear(scene);
        self.volume.clear(scene);
        scene.set_cursor(CursorIcon::Default);
        self.registry.clear();
    }
}

/// Settable reference to the current session.
///
/// One slot exists per view session; cloning the slot clones the handle,
/// not the session. The component that owns the render surface creates the
/// session and `set`s it; independently mounted consumers `get` it instead
/// of constructing their own. Never a process global.
#[derive(Clone, Debug, Default)]
pub struct SessionSlot {
    current: Rc<RefCell<Option<Rc<RefCell<InteractionSession>>>>>,
}

impl SessionSlot {
    /// Empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a session, replacing any previous one.
    pub fn set(&self, session: Rc<RefCell<InteractionSession>>) {
        *self.current.borrow_mut() = Some(session);
    }

    /// The current session, if one is installed.
    pub fn get(&self) -> Option<Rc<RefCell<InteractionSession>>> {
        self.current.borrow().clone()
    }

    /// Remove and return the current session.
    pub fn take(&self) -> Option<Rc<RefCell<InteractionSession>>> {
        self.current.borrow_mut().take()
    }

    /// Remove the current session.
    pub fn clear(&self) {
        *self.current.borrow_mut() = None;
    }

    /// Whether a session is installed.
    pub fn is_set(&self) -> bool {
        self.current.borrow().is_some()
    }
}
