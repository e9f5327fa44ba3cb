// Copyright 2025 the Mapscene Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover highlighting for volumetric radial shapes.

use smallvec::SmallVec;

use mapscene_scene::{OverlaySpec, Scene, SceneObjectId, ScreenPoint, ShapeKind, query};

use crate::{HighlightState, OverlayHandles};

/// Enlargement factor applied to the source radius so the highlight reads
/// as a ring around the shape rather than a re-render of it.
pub const RADIUS_SCALE: f64 = 1.3;

/// Enlargement factor applied to the source half-extent so the highlight
/// stands slightly taller than the shape.
const EXTENT_SCALE: f64 = 1.1;

/// Fraction of the source half-extent at which the emphasis disc sits,
/// just below the top face.
const DISC_POSITION: f64 = 0.95;

/// Hover-highlight manager for the volumetric shape family.
///
/// Synthesizes, per highlighted shape: an oversized outlined ring shape
/// slightly taller than the source, and a thin translucent disc near the
/// top.
#[derive(Debug, Default)]
pub struct VolumeHighlighter {
    state: HighlightState,
}

impl VolumeHighlighter {
    /// Idle manager with no highlight.
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently highlighted volumetric shape, if any.
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
        let hovered = query::resolve_kind(scene, at, ShapeKind::Volume);
        self.state.transition(scene, hovered, build_overlays);
    }

    /// Destroy any live overlays and return to idle.
    pub fn clear<S: Scene + ?Sized>(&mut self, scene: &mut S) {
        self.state.clear(scene);
    }
}

/// Synthesize the overlay pair for one volumetric shape.
///
/// `None` when the geometry cannot be evaluated or is degenerate (empty
/// vertical extent or radius).
fn build_overlays<S: Scene + ?Sized>(
    scene: &mut S,
    id: &SceneObjectId,
) -> Option<OverlayHandles> {
    let time = scene.current_time();
    let geometry = scene.volume_geometry(id, time)?;
    if geometry.length <= 0.0 {
        return None;
    }
    let radius = geometry.top_radius.max(geometry.bottom_radius) * RADIUS_SCALE;
    if radius <= 0.0 {
        return None;
    }

    let mid = geometry.center.z;
    let half = geometry.length / 2.0;

    let mut overlays = SmallVec::new();
    overlays.push(scene.add_overlay(OverlaySpec::Cylinder {
        center: geometry.center,
        base_height: mid - half * EXTENT_SCALE,
        top_height: mid + half * EXTENT_SCALE,
        radius,
    }));
    overlays.push(scene.add_overlay(OverlaySpec::Disc {
        center: geometry.center,
        height: mid + half * DISC_POSITION,
        radius,
    }));
    Some(overlays)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapscene_scene::memory::MemoryScene;
    use mapscene_scene::{PickHit, VolumeGeometry, WorldPoint};
    use kurbo::Point;

    fn cylinder(center: WorldPoint, length: f64, radius: f64) -> VolumeGeometry {
        VolumeGeometry {
            center,
            length,
            top_radius: radius,
            bottom_radius: radius * 0.5,
        }
    }

    fn scene_with_volume(id: &str, at: Point, geometry: VolumeGeometry) -> MemoryScene {
        let mut scene = MemoryScene::new();
        scene.place_hits(at, vec![PickHit::object(id, ShapeKind::Volume)]);
        scene.insert_volume(id, geometry);
        scene
    }

    #[test]
    fn hover_creates_ring_and_disc() {
        let center = WorldPoint::new(0.0, 0.0, 500.0);
        let mut scene = scene_with_volume("cyl", Point::new(5.0, 5.0), cylinder(center, 200.0, 40.0));
        let mut highlighter = VolumeHighlighter::new();

        highlighter.on_pointer_move(&mut scene, Point::new(5.0, 5.0));

        assert_eq!(highlighter.highlighted().unwrap().as_str(), "cyl");
        assert_eq!(scene.live_overlays(), 2);
    }

    #[test]
    fn highlight_radius_uses_larger_end_scaled() {
        let center = WorldPoint::new(0.0, 0.0, 500.0);
        let mut scene = scene_with_volume("cyl", Point::new(5.0, 5.0), cylinder(center, 200.0, 40.0));
        let mut highlighter = VolumeHighlighter::new();
        highlighter.on_pointer_move(&mut scene, Point::new(5.0, 5.0));

        let ring_radius = scene
            .overlay_specs()
            .find_map(|spec| match spec {
                OverlaySpec::Cylinder { radius, .. } => Some(*radius),
                _ => None,
            })
            .expect("cylinder overlay");
        assert!((ring_radius - 40.0 * RADIUS_SCALE).abs() < 1e-9);
    }

    #[test]
    fn ring_is_slightly_taller_than_source() {
        let center = WorldPoint::new(0.0, 0.0, 500.0);
        let mut scene = scene_with_volume("cyl", Point::new(5.0, 5.0), cylinder(center, 200.0, 40.0));
        let mut highlighter = VolumeHighlighter::new();
        highlighter.on_pointer_move(&mut scene, Point::new(5.0, 5.0));

        let (base, top) = scene
            .overlay_specs()
            .find_map(|spec| match spec {
                OverlaySpec::Cylinder {
                    base_height,
                    top_height,
                    ..
                } => Some((*base_height, *top_height)),
                _ => None,
            })
            .expect("cylinder overlay");
        assert!(top - base > 200.0);
        // Disc sits below the ring's top.
        let disc_height = scene
            .overlay_specs()
            .find_map(|spec| match spec {
                OverlaySpec::Disc { height, .. } => Some(*height),
                _ => None,
            })
            .expect("disc overlay");
        assert!(disc_height < top);
        assert!(disc_height > base);
    }

    #[test]
    fn switching_volumes_never_doubles_overlays() {
        let mut scene = scene_with_volume(
            "a",
            Point::new(5.0, 5.0),
            cylinder(WorldPoint::new(0.0, 0.0, 100.0), 50.0, 10.0),
        );
        scene.place_hits(
            Point::new(50.0, 50.0),
            vec![PickHit::object("b", ShapeKind::Volume)],
        );
        scene.insert_volume("b", cylinder(WorldPoint::new(9.0, 9.0, 100.0), 50.0, 10.0));
        let mut highlighter = VolumeHighlighter::new();

        highlighter.on_pointer_move(&mut scene, Point::new(5.0, 5.0));
        highlighter.on_pointer_move(&mut scene, Point::new(50.0, 50.0));

        assert_eq!(highlighter.highlighted().unwrap().as_str(), "b");
        assert_eq!(scene.live_overlays(), 2);
        assert_eq!(scene.overlays_removed(), 2);
    }

    #[test]
    fn degenerate_volume_produces_no_overlays() {
        let mut scene = scene_with_volume(
            "flat",
            Point::new(5.0, 5.0),
            cylinder(WorldPoint::ZERO, 0.0, 10.0),
        );
        let mut highlighter = VolumeHighlighter::new();
        highlighter.on_pointer_move(&mut scene, Point::new(5.0, 5.0));
        assert_eq!(scene.live_overlays(), 0);

        let mut scene = scene_with_volume(
            "thin",
            Point::new(5.0, 5.0),
            cylinder(WorldPoint::ZERO, 10.0, 0.0),
        );
        highlighter.on_pointer_move(&mut scene, Point::new(5.0, 5.0));
        assert_eq!(scene.live_overlays(), 0);
        assert!(highlighter.highlighted().is_none());
    }

    #[test]
    fn missing_geometry_skips_highlight() {
        let mut scene = MemoryScene::new();
        scene.place_hits(
            Point::new(5.0, 5.0),
            vec![PickHit::object("ghost", ShapeKind::Volume)],
        );
        let mut highlighter = VolumeHighlighter::new();

        highlighter.on_pointer_move(&mut scene, Point::new(5.0, 5.0));
        assert!(highlighter.highlighted().is_none());
        assert_eq!(scene.live_overlays(), 0);
    }

    #[test]
    fn area_hits_do_not_engage_volume_highlighter() {
        let mut scene = MemoryScene::new();
        scene.place_hits(
            Point::new(5.0, 5.0),
            vec![PickHit::object("zone", ShapeKind::Area)],
        );
        let mut highlighter = VolumeHighlighter::new();

        highlighter.on_pointer_move(&mut scene, Point::new(5.0, 5.0));
        assert!(highlighter.highlighted().is_none());
    }
}
