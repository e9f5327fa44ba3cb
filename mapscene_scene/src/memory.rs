// Copyright 2025 the Mapscene Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic in-memory [`Scene`] for tests, doctests, and demos.
//!
//! `MemoryScene` scripts pick results per pixel and records every mutation
//! the engine performs: live overlays (with creation/removal counters, so
//! leak properties are assertable), the navigation capability register, and
//! the cursor register. Unprojection maps a pixel `(x, y)` to the world
//! position `(x, y, 0)` unless the pixel was marked as sky.
//!
//! Positions are keyed by rounding to the nearest integer pixel, which is
//! plenty for scripted interactions.

use hashbrown::{HashMap, HashSet};

use crate::scene::Scene;
use crate::types::{
    AreaGeometry, CursorIcon, NavFlags, OverlayHandle, OverlaySpec, PickHit, SceneObjectId,
    SceneTime, ScreenPoint, VolumeGeometry, WorldPoint,
};

/// Integer pixel key for scripted lookups.
type PixelKey = (i64, i64);

#[allow(
    clippy::cast_possible_truncation,
    reason = "scripted scenes use small pixel coordinates"
)]
fn key(at: ScreenPoint) -> PixelKey {
    (at.x.round() as i64, at.y.round() as i64)
}

/// Scripted in-memory scene.
///
/// See the [module docs](self) for semantics.
#[derive(Debug, Default)]
pub struct MemoryScene {
    hits: HashMap<PixelKey, Vec<PickHit>>,
    sky: HashSet<PixelKey>,
    areas: HashMap<SceneObjectId, AreaGeometry>,
    volumes: HashMap<SceneObjectId, VolumeGeometry>,
    overlays: HashMap<OverlayHandle, OverlaySpec>,
    next_overlay: u64,
    overlays_created: usize,
    overlays_removed: usize,
    nav: NavFlags,
    cursor: CursorIcon,
    time: SceneTime,
}

impl MemoryScene {
    /// Empty scene: nothing to pick, everything unprojects, all navigation
    /// capabilities enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the pick candidate list at a pixel, front to back.
    pub fn place_hits(&mut self, at: ScreenPoint, hits: Vec<PickHit>) {
        self.hits.insert(key(at), hits);
    }

    /// Remove the scripted candidates at a pixel.
    pub fn clear_hits(&mut self, at: ScreenPoint) {
        self.hits.remove(&key(at));
    }

    /// Mark a pixel as open sky: unprojection there yields `None`.
    pub fn mark_sky(&mut self, at: ScreenPoint) {
        self.sky.insert(key(at));
    }

    /// Register evaluable area geometry for an id.
    pub fn insert_area(&mut self, id: impl Into<SceneObjectId>, geometry: AreaGeometry) {
        self.areas.insert(id.into(), geometry);
    }

    /// Register evaluable volume geometry for an id.
    pub fn insert_volume(&mut self, id: impl Into<SceneObjectId>, geometry: VolumeGeometry) {
        self.volumes.insert(id.into(), geometry);
    }

    /// Set the scene clock.
    pub fn set_time(&mut self, time: SceneTime) {
        self.time = time;
    }

    /// Number of overlay shapes currently alive.
    pub fn live_overlays(&self) -> usize {
        self.overlays.len()
    }

    /// Total overlays ever created.
    pub fn overlays_created(&self) -> usize {
        self.overlays_created
    }

    /// Total overlays removed.
    pub fn overlays_removed(&self) -> usize {
        self.overlays_removed
    }

    /// Specs of the overlays currently alive, in unspecified order.
    pub fn overlay_specs(&self) -> impl Iterator<Item = &OverlaySpec> {
        self.overlays.values()
    }

    /// The currently enabled navigation capabilities.
    pub fn nav(&self) -> NavFlags {
        self.nav
    }

    /// The current cursor.
    pub fn cursor(&self) -> CursorIcon {
        self.cursor
    }
}

impl Scene for MemoryScene {
    fn pick_all(&self, at: ScreenPoint) -> Vec<PickHit> {
        self.hits.get(&key(at)).cloned().unwrap_or_default()
    }

    fn unproject(&self, at: ScreenPoint) -> Option<WorldPoint> {
        if self.sky.contains(&key(at)) {
            return None;
        }
        Some(WorldPoint::new(at.x, at.y, 0.0))
    }

    fn add_overlay(&mut self, spec: OverlaySpec) -> OverlayHandle {
        let handle = OverlayHandle::new(self.next_overlay);
        self.next_overlay += 1;
        self.overlays_created += 1;
        self.overlays.insert(handle, spec);
        handle
    }

    fn remove_overlay(&mut self, handle: OverlayHandle) {
        if self.overlays.remove(&handle).is_some() {
            self.overlays_removed += 1;
        }
    }

    fn set_nav(&mut self, flags: NavFlags) {
        self.nav = flags;
    }

    fn set_cursor(&mut self, icon: CursorIcon) {
        self.cursor = icon;
    }

    fn current_time(&self) -> SceneTime {
        self.time
    }

    fn area_geometry(&self, id: &SceneObjectId, _time: SceneTime) -> Option<AreaGeometry> {
        self.areas.get(id).cloned()
    }

    fn volume_geometry(&self, id: &SceneObjectId, _time: SceneTime) -> Option<VolumeGeometry> {
        self.volumes.get(id).copied()
    }
}
