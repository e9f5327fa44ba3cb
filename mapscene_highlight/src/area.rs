// Copyright 2025 the Mapscene Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover highlighting for extruded area shapes.

use smallvec::SmallVec;

use mapscene_scene::{AreaGeometry, OverlaySpec, Scene, SceneObjectId, ScreenPoint, ShapeKind, query};

use crate::{HighlightState, OverlayHandles};

/// Hover-highlight manager for the area shape family.
///
/// Synthesizes, per highlighted shape: a side wall ribbon over the shape's
/// height extent, a thin rim at the top edge, a translucent cap at the top
/// face, and a footprint outline at the base, plus a wall and rim for each
/// interior hole ring.
#[derive(Debug, Default)]
pub struct AreaHighlighter {
    state: HighlightState,
}

impl AreaHighlighter {
    /// Idle manager with no highlight.
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently highlighted area shape, if any.
    pub fn highlighted(&self) -> Option<&SceneObjectId> {
        self.state.highlighted.as_ref()
    }

    /// Number of overlay shapes currently owned by this manager.
    pub fn overlay_count(&self) -> usize {
        self.state.overlays.len()
    }

    /// React to a pointer move: resolve the hovered shape through
    /// drill-through picking and update the highlight.
    pub fn on_pointer_move<S: Scene + ?Sized>(&mut self, scene: &mut S, at: ScreenPoint) {
        let hovered = query::resolve_kind(scene, at, ShapeKind::Area);
        self.state.transition(scene, hovered, build_overlays);
    }

    /// Destroy any live overlays and return to idle.
    pub fn clear<S: Scene + ?Sized>(&mut self, scene: &mut S) {
        self.state.clear(scene);
    }
}

/// Top height of the highlight.
///
/// Flat and degenerate shapes still get non-zero visual thickness:
/// `max(extruded_height, min_height + 1)`, with a missing extruded height
/// treated as the floor itself.
fn top_height(geometry: &AreaGeometry) -> f64 {
    let floor = geometry.min_height + 1.0;
    geometry.extruded_height.unwrap_or(floor).max(floor)
}

/// Synthesize the overlay set for one area shape.
///
/// `None` when the geometry cannot be evaluated at the current scene time
/// or the outer ring is degenerate.
fn build_overlays<S: Scene + ?Sized>(
    scene: &mut S,
    id: &SceneObjectId,
) -> Option<OverlayHandles> {
    let time = scene.current_time();
    let geometry = scene.area_geometry(id, time)?;
    if geometry.outer.len() < 3 {
        return None;
    }

    let top = top_height(&geometry);
    let base = geometry.min_height;
    let holes: Vec<_> = geometry
        .holes
        .iter()
        .filter(|ring| ring.len() >= 3)
        .cloned()
        .collect();

    let mut overlays = SmallVec::new();
    overlays.push(scene.add_overlay(OverlaySpec::Wall {
        ring: geometry.outer.clone(),
        base_height: base,
        top_height: top,
    }));
    overlays.push(scene.add_overlay(OverlaySpec::Rim {
        ring: geometry.outer.clone(),
        height: top,
    }));
    overlays.push(scene.add_overlay(OverlaySpec::Cap {
        ring: geometry.outer.clone(),
        holes: holes.clone(),
        height: top,
    }));
    overlays.push(scene.add_overlay(OverlaySpec::Outline {
        ring: geometry.outer,
        height: base,
    }));
    for ring in holes {
        overlays.push(scene.add_overlay(OverlaySpec::Wall {
            ring: ring.clone(),
            base_height: base,
            top_height: top,
        }));
        overlays.push(scene.add_overlay(OverlaySpec::Rim { ring, height: top }));
    }
    Some(overlays)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapscene_scene::memory::MemoryScene;
    use mapscene_scene::{PickHit, WorldPoint};
    use kurbo::Point;

    fn triangle() -> Vec<WorldPoint> {
        vec![
            WorldPoint::new(0.0, 0.0, 0.0),
            WorldPoint::new(10.0, 0.0, 0.0),
            WorldPoint::new(0.0, 10.0, 0.0),
        ]
    }

    fn scene_with_area(id: &str, at: Point, geometry: AreaGeometry) -> MemoryScene {
        let mut scene = MemoryScene::new();
        scene.place_hits(at, vec![PickHit::object(id, ShapeKind::Area)]);
        scene.insert_area(id, geometry);
        scene
    }

    #[test]
    fn hover_creates_four_overlays_for_hole_free_shape() {
        let mut scene = scene_with_area(
            "zone",
            Point::new(5.0, 5.0),
            AreaGeometry::flat(triangle()),
        );
        let mut highlighter = AreaHighlighter::new();

        highlighter.on_pointer_move(&mut scene, Point::new(5.0, 5.0));

        assert_eq!(highlighter.highlighted().unwrap().as_str(), "zone");
        assert_eq!(highlighter.overlay_count(), 4);
        assert_eq!(scene.live_overlays(), 4);
    }

    #[test]
    fn flat_shape_top_height_is_one() {
        // min_height = 0 with no extruded height resolves to top = 1.
        let mut scene = scene_with_area(
            "zone",
            Point::new(5.0, 5.0),
            AreaGeometry::flat(triangle()),
        );
        let mut highlighter = AreaHighlighter::new();
        highlighter.on_pointer_move(&mut scene, Point::new(5.0, 5.0));

        let wall_top = scene
            .overlay_specs()
            .find_map(|spec| match spec {
                OverlaySpec::Wall { top_height, .. } => Some(*top_height),
                _ => None,
            })
            .expect("wall overlay");
        assert_eq!(wall_top, 1.0);
    }

    #[test]
    fn extruded_height_below_floor_is_clamped() {
        let geometry = AreaGeometry {
            outer: triangle(),
            holes: Vec::new(),
            min_height: 100.0,
            extruded_height: Some(100.5),
        };
        assert_eq!(top_height(&geometry), 101.0);

        let tall = AreaGeometry {
            extruded_height: Some(250.0),
            ..geometry
        };
        assert_eq!(top_height(&tall), 250.0);
    }

    #[test]
    fn hole_rings_add_wall_and_rim_each() {
        let hole = vec![
            WorldPoint::new(2.0, 2.0, 0.0),
            WorldPoint::new(4.0, 2.0, 0.0),
            WorldPoint::new(2.0, 4.0, 0.0),
        ];
        let geometry = AreaGeometry {
            outer: triangle(),
            holes: vec![hole],
            min_height: 0.0,
            extruded_height: Some(50.0),
        };
        let mut scene = scene_with_area("zone", Point::new(5.0, 5.0), geometry);
        let mut highlighter = AreaHighlighter::new();

        highlighter.on_pointer_move(&mut scene, Point::new(5.0, 5.0));
        assert_eq!(highlighter.overlay_count(), 6);
    }

    #[test]
    fn degenerate_hole_rings_are_skipped() {
        let geometry = AreaGeometry {
            outer: triangle(),
            holes: vec![vec![WorldPoint::ZERO, WorldPoint::X]],
            min_height: 0.0,
            extruded_height: None,
        };
        let mut scene = scene_with_area("zone", Point::new(5.0, 5.0), geometry);
        let mut highlighter = AreaHighlighter::new();

        highlighter.on_pointer_move(&mut scene, Point::new(5.0, 5.0));
        assert_eq!(highlighter.overlay_count(), 4);
    }

    #[test]
    fn hovering_same_shape_does_not_churn_overlays() {
        let mut scene = scene_with_area(
            "zone",
            Point::new(5.0, 5.0),
            AreaGeometry::flat(triangle()),
        );
        // The overlay stack now sits above the shape at a nearby pixel.
        scene.place_hits(
            Point::new(6.0, 6.0),
            vec![PickHit::Overlay, PickHit::object("zone", ShapeKind::Area)],
        );
        let mut highlighter = AreaHighlighter::new();

        highlighter.on_pointer_move(&mut scene, Point::new(5.0, 5.0));
        assert_eq!(scene.overlays_created(), 4);

        // Direct re-hover and overlay hover both resolve to the same id.
        highlighter.on_pointer_move(&mut scene, Point::new(5.0, 5.0));
        highlighter.on_pointer_move(&mut scene, Point::new(6.0, 6.0));
        assert_eq!(scene.overlays_created(), 4);
        assert_eq!(scene.live_overlays(), 4);
    }

    #[test]
    fn switching_shapes_destroys_old_overlays_first() {
        let mut scene = scene_with_area(
            "a",
            Point::new(5.0, 5.0),
            AreaGeometry::flat(triangle()),
        );
        scene.place_hits(
            Point::new(50.0, 50.0),
            vec![PickHit::object("b", ShapeKind::Area)],
        );
        scene.insert_area("b", AreaGeometry::flat(triangle()));
        let mut highlighter = AreaHighlighter::new();

        highlighter.on_pointer_move(&mut scene, Point::new(5.0, 5.0));
        highlighter.on_pointer_move(&mut scene, Point::new(50.0, 50.0));

        assert_eq!(highlighter.highlighted().unwrap().as_str(), "b");
        // Never more than one overlay set alive.
        assert_eq!(scene.live_overlays(), 4);
        assert_eq!(scene.overlays_removed(), 4);
    }

    #[test]
    fn hovering_other_family_clears_highlight() {
        let mut scene = scene_with_area(
            "zone",
            Point::new(5.0, 5.0),
            AreaGeometry::flat(triangle()),
        );
        scene.place_hits(
            Point::new(50.0, 50.0),
            vec![PickHit::object("cyl", ShapeKind::Volume)],
        );
        let mut highlighter = AreaHighlighter::new();

        highlighter.on_pointer_move(&mut scene, Point::new(5.0, 5.0));
        highlighter.on_pointer_move(&mut scene, Point::new(50.0, 50.0));

        assert!(highlighter.highlighted().is_none());
        assert_eq!(scene.live_overlays(), 0);
    }

    #[test]
    fn missing_geometry_skips_highlight_without_panic() {
        let mut scene = MemoryScene::new();
        scene.place_hits(
            Point::new(5.0, 5.0),
            vec![PickHit::object("ghost", ShapeKind::Area)],
        );
        let mut highlighter = AreaHighlighter::new();

        highlighter.on_pointer_move(&mut scene, Point::new(5.0, 5.0));

        assert!(highlighter.highlighted().is_none());
        assert_eq!(scene.live_overlays(), 0);
    }

    #[test]
    fn degenerate_outer_ring_produces_no_overlays() {
        let mut scene = scene_with_area(
            "line",
            Point::new(5.0, 5.0),
            AreaGeometry::flat(vec![WorldPoint::ZERO, WorldPoint::X]),
        );
        let mut highlighter = AreaHighlighter::new();

        highlighter.on_pointer_move(&mut scene, Point::new(5.0, 5.0));
        assert!(highlighter.highlighted().is_none());
        assert_eq!(scene.live_overlays(), 0);
    }

    #[test]
    fn clear_is_idempotent() {
        let mut scene = scene_with_area(
            "zone",
            Point::new(5.0, 5.0),
            AreaGeometry::flat(triangle()),
        );
        let mut highlighter = AreaHighlighter::new();
        highlighter.on_pointer_move(&mut scene, Point::new(5.0, 5.0));

        highlighter.clear(&mut scene);
        highlighter.clear(&mut scene);
        assert_eq!(scene.live_overlays(), 0);
        assert!(highlighter.highlighted().is_none());
    }
}
