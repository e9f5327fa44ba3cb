// Copyright 2025 the Mapscene Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover-highlight managers for area and volumetric shapes.
//!
//! ## Overview
//!
//! One manager exists per highlightable shape family: [`AreaHighlighter`]
//! for extruded polygon shapes and [`VolumeHighlighter`] for radial
//! volumetric shapes. Each maintains the currently highlighted object and
//! the synthetic overlay shapes visualizing it, and reacts to pointer-move
//! events by destroying and synthesizing overlays on hover transitions.
//!
//! The managers are independent: they share no mutable state and each
//! hit-tests the pointer position on its own. Both may run against the same
//! pointer-move event in any order.
//!
//! ## State machine
//!
//! Per family: `Idle` (no highlight) or `Highlighting(id)` (overlays live
//! for exactly one id). On every pointer move, the hovered object is
//! resolved through drill-through picking, so hovering a highlight overlay
//! behaves exactly like hovering the shape beneath it and does not cause
//! overlay churn.
//!
//! Invariants:
//! - live overlays imply a highlighted id;
//! - at most one highlighted id per family;
//! - old overlays are destroyed before new ones are created.
//!
//! ## Failure semantics
//!
//! Highlighting is best-effort visual feedback, never load-bearing. When a
//! shape's geometry cannot be evaluated at the current scene time, the hover
//! produces no overlays and no error; the next pointer move retries.
//!
//! ## Example
//!
//! ```
//! use mapscene_highlight::AreaHighlighter;
//! use mapscene_scene::memory::MemoryScene;
//! use mapscene_scene::{AreaGeometry, PickHit, ShapeKind, WorldPoint};
//! use kurbo::Point;
//!
//! let mut scene = MemoryScene::new();
//! scene.place_hits(
//!     Point::new(10.0, 10.0),
//!     vec![PickHit::object("zone", ShapeKind::Area)],
//! );
//! scene.insert_area(
//!     "zone",
//!     AreaGeometry::flat(vec![
//!         WorldPoint::new(0.0, 0.0, 0.0),
//!         WorldPoint::new(1.0, 0.0, 0.0),
//!         WorldPoint::new(1.0, 1.0, 0.0),
//!     ]),
//! );
//!
//! let mut highlighter = AreaHighlighter::new();
//! highlighter.on_pointer_move(&mut scene, Point::new(10.0, 10.0));
//! assert_eq!(highlighter.highlighted().unwrap().as_str(), "zone");
//! assert_eq!(scene.live_overlays(), 4);
//!
//! // Moving off the shape destroys every overlay.
//! highlighter.on_pointer_move(&mut scene, Point::new(90.0, 90.0));
//! assert!(highlighter.highlighted().is_none());
//! assert_eq!(scene.live_overlays(), 0);
//! ```

mod area;
mod volume;

pub use area::AreaHighlighter;
pub use volume::{RADIUS_SCALE, VolumeHighlighter};

use smallvec::SmallVec;
use tracing::trace;

use mapscene_scene::{OverlayHandle, Scene, SceneObjectId};

/// Overlay handles owned by one highlight. Area highlights with a few holes
/// stay inline.
type OverlayHandles = SmallVec<[OverlayHandle; 8]>;

/// Highlight bookkeeping shared by both families: the highlighted id and
/// the overlays visualizing it.
///
/// `!overlays.is_empty()` implies `highlighted.is_some()`; overlays belong
/// to exactly one `HighlightState` and are destroyed before a new highlight
/// is recorded.
#[derive(Debug, Default)]
struct HighlightState {
    highlighted: Option<SceneObjectId>,
    overlays: OverlayHandles,
}

impl HighlightState {
    /// Destroy every live overlay and forget the highlighted id.
    fn clear<S: Scene + ?Sized>(&mut self, scene: &mut S) {
        if let Some(id) = self.highlighted.take() {
            trace!(target: "mapscene::highlight", %id, overlays = self.overlays.len(), "clear");
        }
        for handle in self.overlays.drain(..) {
            scene.remove_overlay(handle);
        }
    }

    /// Run one hover transition: keep the highlight when the hovered id is
    /// unchanged, otherwise clear and re-synthesize via `build`.
    ///
    /// `build` returns `None` when the shape's geometry cannot be evaluated;
    /// the state is left idle for this hover.
    fn transition<S: Scene + ?Sized>(
        &mut self,
        scene: &mut S,
        hovered: Option<SceneObjectId>,
        build: impl FnOnce(&mut S, &SceneObjectId) -> Option<OverlayHandles>,
    ) {
        if hovered == self.highlighted {
            return;
        }
        self.clear(scene);
        if let Some(id) = hovered
            && let Some(overlays) = build(scene, &id)
        {
            trace!(target: "mapscene::highlight", %id, overlays = overlays.len(), "highlight");
            self.highlighted = Some(id);
            self.overlays = overlays;
        }
    }
}
