// Copyright 2025 the Mapscene Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drill-through query facade over a [`Scene`].
//!
//! Highlight overlays are drawn directly above the shape they emphasize, so
//! the topmost candidate at a pixel is often the overlay itself. These
//! helpers resolve through the candidate stack to the first real object, so
//! hovering an overlay behaves exactly like hovering the shape beneath it.
//! All helpers are pure queries; none mutate the scene.

use crate::scene::Scene;
use crate::types::{PickHit, SceneObjectId, ScreenPoint, ShapeKind};

/// The first non-overlay candidate at a screen position.
///
/// Drill picks through every candidate stacked at the pixel, front to back,
/// and skips synthetic highlight overlays. `None` when only overlays (or
/// nothing) are under the cursor.
pub fn resolve<S: Scene + ?Sized>(scene: &S, at: ScreenPoint) -> Option<PickHit> {
    scene.pick_all(at).into_iter().find(|h| !h.is_overlay())
}

/// The first non-overlay candidate carrying an identifier.
///
/// An anonymous shape still wins the pick; it just carries no id, so this
/// helper reports `None` for it rather than drilling further. A shape
/// beneath an anonymous shape is genuinely occluded.
pub fn resolve_id<S: Scene + ?Sized>(
    scene: &S,
    at: ScreenPoint,
) -> Option<(SceneObjectId, ShapeKind)> {
    match resolve(scene, at)? {
        PickHit::Object {
            id: Some(id),
            kind,
        } => Some((id, kind)),
        _ => None,
    }
}

/// The identifier of the first non-overlay candidate, when it belongs to
/// the given shape family.
pub fn resolve_kind<S: Scene + ?Sized>(
    scene: &S,
    at: ScreenPoint,
    kind: ShapeKind,
) -> Option<SceneObjectId> {
    let (id, hit_kind) = resolve_id(scene, at)?;
    (hit_kind == kind).then_some(id)
}
