// Copyright 2025 the Mapscene Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The renderer-facing [`Scene`] trait.

use crate::types::{
    AreaGeometry, CursorIcon, NavFlags, OverlayHandle, OverlaySpec, PickHit, SceneObjectId,
    SceneTime, ScreenPoint, VolumeGeometry, WorldPoint,
};

/// Rendering backend surface consumed by the interaction engine.
///
/// Implementations wrap a live 3D scene graph: the pick methods query the
/// shapes currently rendered, `unproject` intersects the pick ray with the
/// reference surface, and the mutation methods manage synthetic overlay
/// shapes, camera navigation capabilities, and the surface cursor.
///
/// ## Contract
///
/// - Pick and unproject methods are pure queries against current scene
///   state; "nothing there" is `None` or an empty list, never an error.
/// - `pick_all` returns candidates front to back, so drill-through can skip
///   overlays and find the first real object beneath.
/// - Overlay shapes created through [`Scene::add_overlay`] must be tagged
///   with [`OVERLAY_TAG`](crate::OVERLAY_TAG) and reported as
///   [`PickHit::Overlay`] by the pick methods.
/// - `set_nav` and `set_cursor` are idempotent; callers re-apply them
///   defensively.
/// - Geometry evaluation is best-effort: a missing shape, a shape of the
///   wrong family, or properties that cannot be evaluated at the given time
///   all yield `None`.
pub trait Scene {
    /// The topmost rendered candidate at a screen position.
    ///
    /// Default implementation takes the front of [`Scene::pick_all`];
    /// backends with a cheaper single-candidate pick should override it.
    fn pick(&self, at: ScreenPoint) -> Option<PickHit> {
        self.pick_all(at).into_iter().next()
    }

    /// All candidates stacked at a screen position, front to back.
    fn pick_all(&self, at: ScreenPoint) -> Vec<PickHit>;

    /// Intersect the pick ray through `at` with the reference surface.
    ///
    /// `None` when the ray misses the surface (pointing at open sky).
    fn unproject(&self, at: ScreenPoint) -> Option<WorldPoint>;

    /// Create a synthetic overlay shape and return its handle.
    fn add_overlay(&mut self, spec: OverlaySpec) -> OverlayHandle;

    /// Destroy a previously created overlay shape.
    ///
    /// Removing an already-removed handle is a no-op.
    fn remove_overlay(&mut self, handle: OverlayHandle);

    /// Enable exactly the given camera navigation capabilities, disabling
    /// all others.
    fn set_nav(&mut self, flags: NavFlags);

    /// Set the cursor shown over the render surface.
    fn set_cursor(&mut self, icon: CursorIcon);

    /// The scene clock, for evaluating time-varying shape properties.
    fn current_time(&self) -> SceneTime;

    /// Boundary rings and height extent of an area shape at `time`.
    fn area_geometry(&self, id: &SceneObjectId, time: SceneTime) -> Option<AreaGeometry>;

    /// Center, vertical extent, and end radii of a volumetric shape at
    /// `time`.
    fn volume_geometry(&self, id: &SceneObjectId, time: SceneTime) -> Option<VolumeGeometry>;
}
