// Copyright 2025 the Mapscene Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene boundary for the mapscene interaction engine.
//!
//! ## Overview
//!
//! This crate defines the vocabulary shared by every mapscene crate (screen
//! and world coordinates, scene object identifiers, pick hits, overlay
//! specifications, camera navigation capability flags, cursor icons, and
//! pointer events) together with the [`Scene`] trait, the only surface
//! through which the engine talks to a rendering backend.
//!
//! The engine never owns a renderer. It consumes one through [`Scene`]:
//! picking at a pixel, drill picking through stacked shapes, unprojecting a
//! pixel onto the reference surface, creating and destroying synthetic
//! overlay shapes, and toggling camera navigation capabilities. Everything
//! here is a pure query or a narrowly scoped mutation; no method fails
//! loudly, and "nothing there" is always an ordinary `None`.
//!
//! ## Drill-through picking
//!
//! Highlight overlays are rendered directly above the shape they emphasize,
//! so a plain topmost pick over a highlighted shape would return the overlay
//! and shadow the real object. The [`query`] module resolves through the
//! stack to the first non-overlay candidate:
//!
//! ```
//! use mapscene_scene::memory::MemoryScene;
//! use mapscene_scene::{PickHit, ShapeKind, query};
//! use kurbo::Point;
//!
//! let mut scene = MemoryScene::new();
//! scene.place_hits(
//!     Point::new(40.0, 40.0),
//!     vec![
//!         PickHit::Overlay,
//!         PickHit::object("zone-7", ShapeKind::Area),
//!     ],
//! );
//!
//! // The overlay on top is skipped; the area shape beneath it wins.
//! let hit = query::resolve(&scene, Point::new(40.0, 40.0)).unwrap();
//! assert_eq!(hit.id().unwrap().as_str(), "zone-7");
//! ```
//!
//! ## Fixture
//!
//! [`memory::MemoryScene`] is a deterministic in-memory [`Scene`] used by
//! tests, doctests, and the demo binary. It scripts per-pixel pick lists and
//! records overlay, navigation, and cursor mutations so tests can assert on
//! them. It is not a renderer.

pub mod memory;
pub mod query;
mod scene;
mod types;

pub use scene::Scene;
pub use types::{
    AreaGeometry, CursorIcon, NavFlags, OVERLAY_TAG, OverlayHandle, OverlaySpec, PickHit,
    PointerButton, PointerEvent, SceneObjectId, SceneTime, ScreenPoint, ShapeKind, VolumeGeometry,
    WorldPoint,
};
