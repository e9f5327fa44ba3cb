// Copyright 2025 the Mapscene Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared vocabulary: coordinates, identifiers, pick hits, overlays, and
//! camera capability flags.

use core::fmt;

use glam::DVec3;

/// A position in screen space, in logical pixels.
///
/// The origin and axis orientation are whatever the host render surface
/// uses; the engine only measures pixel distances and passes positions
/// through to the scene.
pub type ScreenPoint = kurbo::Point;

/// A position in world space, on or above the reference surface.
pub type WorldPoint = DVec3;

/// Scene clock value used when evaluating time-varying shape properties.
///
/// Opaque seconds on the scene's own timeline. Shapes whose geometry is
/// animated resolve their property values at a specific `SceneTime`.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct SceneTime(pub f64);

/// Opaque identifier of a logical scene object.
///
/// Stable for the object's lifetime. Anonymous shapes have no identifier and
/// therefore no interaction behavior.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SceneObjectId(String);

impl SceneObjectId {
    /// Wrap an identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SceneObjectId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SceneObjectId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for SceneObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shape family of a picked object, resolved once at pick time.
///
/// The scene classifies each candidate when it answers a pick; downstream
/// consumers match on the variant instead of re-probing shape properties.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ShapeKind {
    /// An extruded area shape (polygon with height extent).
    Area,
    /// A volumetric radial shape (cylinder/cone).
    Volume,
    /// A point marker.
    Marker,
    /// Any other identifiable shape.
    Other,
}

/// Reserved tag for synthetic highlight overlays.
///
/// Scene implementations mark every shape created through
/// [`Scene::add_overlay`](crate::Scene::add_overlay) with this tag and
/// report it as [`PickHit::Overlay`], which is how drill-through picking
/// distinguishes highlight feedback from real objects.
pub const OVERLAY_TAG: &str = "mapscene.highlight-overlay";

/// One candidate produced by picking at a screen position.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PickHit {
    /// A synthetic highlight overlay (tagged with [`OVERLAY_TAG`]).
    /// Overlays are non-interactive and are skipped by drill-through.
    Overlay,
    /// A rendered scene object.
    Object {
        /// Logical identifier, absent for anonymous shapes.
        id: Option<SceneObjectId>,
        /// Shape family, resolved by the scene at pick time.
        kind: ShapeKind,
    },
}

impl PickHit {
    /// Convenience constructor for an identified object hit.
    pub fn object(id: impl Into<SceneObjectId>, kind: ShapeKind) -> Self {
        Self::Object {
            id: Some(id.into()),
            kind,
        }
    }

    /// Convenience constructor for an anonymous object hit.
    pub fn anonymous(kind: ShapeKind) -> Self {
        Self::Object { id: None, kind }
    }

    /// True for synthetic highlight overlays.
    pub fn is_overlay(&self) -> bool {
        matches!(self, Self::Overlay)
    }

    /// The object identifier, if this hit carries one.
    pub fn id(&self) -> Option<&SceneObjectId> {
        match self {
            Self::Object { id, .. } => id.as_ref(),
            Self::Overlay => None,
        }
    }

    /// The shape family, for object hits.
    pub fn kind(&self) -> Option<ShapeKind> {
        match self {
            Self::Object { kind, .. } => Some(*kind),
            Self::Overlay => None,
        }
    }
}

/// Handle to a synthetic overlay shape owned by a highlight manager.
///
/// Handed out by [`Scene::add_overlay`](crate::Scene::add_overlay) and
/// passed back to [`Scene::remove_overlay`](crate::Scene::remove_overlay).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct OverlayHandle(u64);

impl OverlayHandle {
    /// Wrap a raw handle value. Scene implementations choose the scheme.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw handle value.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Renderer-agnostic geometry of a synthetic highlight overlay.
///
/// Specs describe geometry only; color, translucency levels, and material
/// are the renderer's concern.
#[derive(Clone, Debug, PartialEq)]
pub enum OverlaySpec {
    /// Vertical ribbon along a ring between two heights.
    Wall {
        /// Ring the wall follows, in order, not closed.
        ring: Vec<WorldPoint>,
        /// Lower edge height.
        base_height: f64,
        /// Upper edge height.
        top_height: f64,
    },
    /// Thin emphasis ribbon along a ring at a single height.
    Rim {
        /// Ring the rim follows.
        ring: Vec<WorldPoint>,
        /// Height of the rim.
        height: f64,
    },
    /// Translucent face covering a ring, with holes punched through.
    Cap {
        /// Outer boundary ring.
        ring: Vec<WorldPoint>,
        /// Interior hole rings.
        holes: Vec<Vec<WorldPoint>>,
        /// Height of the face.
        height: f64,
    },
    /// Footprint outline loop at a single height.
    Outline {
        /// Ring the outline follows.
        ring: Vec<WorldPoint>,
        /// Height of the outline.
        height: f64,
    },
    /// Oversized outlined ring shape around a volumetric source.
    Cylinder {
        /// Center of the shape, on the reference surface.
        center: WorldPoint,
        /// Lower extent.
        base_height: f64,
        /// Upper extent.
        top_height: f64,
        /// Radius, already enlarged relative to the source.
        radius: f64,
    },
    /// Thin translucent disc.
    Disc {
        /// Center of the disc.
        center: WorldPoint,
        /// Height of the disc.
        height: f64,
        /// Radius of the disc.
        radius: f64,
    },
}

/// Boundary rings and height extent of an area shape, evaluated at one
/// scene time.
#[derive(Clone, Debug, PartialEq)]
pub struct AreaGeometry {
    /// Outer boundary ring, in order, not closed.
    pub outer: Vec<WorldPoint>,
    /// Interior hole rings, if any.
    pub holes: Vec<Vec<WorldPoint>>,
    /// Base height of the shape.
    pub min_height: f64,
    /// Extruded top height, when the shape has one.
    pub extruded_height: Option<f64>,
}

impl AreaGeometry {
    /// Geometry with the given outer ring, no holes, and a flat base at 0.
    pub fn flat(outer: Vec<WorldPoint>) -> Self {
        Self {
            outer,
            holes: Vec::new(),
            min_height: 0.0,
            extruded_height: None,
        }
    }
}

/// Center, vertical extent, and end radii of a volumetric radial shape,
/// evaluated at one scene time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VolumeGeometry {
    /// Center of the shape on the reference surface; `z` is the height of
    /// the vertical midpoint.
    pub center: WorldPoint,
    /// Vertical extent of the shape.
    pub length: f64,
    /// Radius at the top face.
    pub top_radius: f64,
    /// Radius at the bottom face.
    pub bottom_radius: f64,
}

bitflags::bitflags! {
    /// Camera navigation capabilities that can be toggled on the scene's
    /// camera controller.
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
    pub struct NavFlags: u8 {
        /// Rotate the camera around the globe.
        const ROTATE    = 0b0000_0001;
        /// Pan/translate the camera.
        const TRANSLATE = 0b0000_0010;
        /// Zoom in and out.
        const ZOOM      = 0b0000_0100;
        /// Tilt the view.
        const TILT      = 0b0000_1000;
        /// Free-look from the camera position.
        const LOOK      = 0b0001_0000;
    }
}

impl Default for NavFlags {
    fn default() -> Self {
        Self::all()
    }
}

/// Cursor affordance shown over the render surface.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CursorIcon {
    /// The platform default arrow.
    #[default]
    Default,
    /// Pointer/hand cursor indicating an interactive object.
    Pointer,
}

/// Mouse button a pointer event was generated with.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PointerButton {
    /// Left button.
    Primary,
    /// Right button.
    Secondary,
}

/// A raw pointer event delivered by the host render surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// Position in screen space.
    pub position: ScreenPoint,
    /// Button associated with the event. Move events report the button
    /// held during the gesture, or `Primary` when none is.
    pub button: PointerButton,
}

impl PointerEvent {
    /// Event at `position` with the primary button.
    pub fn new(position: ScreenPoint) -> Self {
        Self {
            position,
            button: PointerButton::Primary,
        }
    }

    /// Event at `position` with an explicit button.
    pub fn with_button(position: ScreenPoint, button: PointerButton) -> Self {
        Self { position, button }
    }
}
