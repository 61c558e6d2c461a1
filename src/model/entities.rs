use crate::geometry::CircleArc;
use crate::math::Point3;
use crate::tags::{LoopTag, OrientedArc, PointTag, SurfaceLoopTag, SurfaceTag};

/// Data associated with a point.
#[derive(Debug, Clone)]
pub struct PointData {
    /// The 3D position of the point.
    pub position: Point3,
    /// Target mesh element size near this point.
    pub mesh_size: f64,
}

/// Data associated with a circle arc.
#[derive(Debug, Clone)]
pub struct ArcData {
    pub start: PointTag,
    pub center: PointTag,
    pub end: PointTag,
    /// The evaluated arc geometry.
    pub geometry: CircleArc,
}

impl ArcData {
    /// First and last point of the arc in the given traversal direction.
    #[must_use]
    pub fn endpoints(&self, forward: bool) -> (PointTag, PointTag) {
        if forward {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        }
    }
}

/// A closed, chained sequence of signed arcs.
#[derive(Debug, Clone)]
pub struct CurveLoopData {
    pub arcs: Vec<OrientedArc>,
}

/// A surface patch filling a curve loop.
#[derive(Debug, Clone)]
pub struct SurfaceData {
    /// Bounding curve loop. A filling has exactly one.
    pub curve_loop: LoopTag,
}

/// A closed collection of surfaces.
#[derive(Debug, Clone)]
pub struct SurfaceLoopData {
    pub surfaces: Vec<SurfaceTag>,
}

/// A solid bounded by surface loops.
///
/// The first loop is the outer boundary; additional loops bound cavities.
#[derive(Debug, Clone)]
pub struct VolumeData {
    pub surface_loops: Vec<SurfaceLoopTag>,
}
