//! The narrow interface to a CAD kernel and the scoped session that owns it.

mod session;

pub use session::Session;

use crate::error::BackendError;
use crate::math::Point3;
use crate::tags::{CurveTag, LoopTag, OrientedArc, PointTag, SurfaceLoopTag, SurfaceTag, VolumeTag};

/// Entity-creation primitives of a boundary-representation kernel.
///
/// Every entity is keyed by a caller-supplied tag. Implementations reject a
/// tag that is already used in its namespace, a reference to an entity that
/// does not exist yet, and geometrically invalid arguments.
pub trait GeoBackend {
    /// Adds a point with a target local mesh size.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag is taken or the point is not finite.
    fn add_point(
        &mut self,
        position: Point3,
        mesh_size: f64,
        tag: PointTag,
    ) -> Result<(), BackendError>;

    /// Adds a circle arc from `start` to `end` around `center`, shorter than a half turn.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag is taken, a point is missing, or the arc is degenerate.
    fn add_circle_arc(
        &mut self,
        start: PointTag,
        center: PointTag,
        end: PointTag,
        tag: CurveTag,
    ) -> Result<(), BackendError>;

    /// Adds a closed loop of signed arcs.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag is taken, an arc is missing, or the arcs do not chain.
    fn add_curve_loop(&mut self, arcs: &[OrientedArc], tag: LoopTag) -> Result<(), BackendError>;

    /// Adds a surface filling the given curve loops.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag is taken, a loop is missing, or the loops cannot be filled.
    fn add_surface_filling(
        &mut self,
        loops: &[LoopTag],
        tag: SurfaceTag,
    ) -> Result<(), BackendError>;

    /// Adds a closed collection of surfaces.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag is taken, a surface is missing, or the surfaces are not closed.
    fn add_surface_loop(
        &mut self,
        surfaces: &[SurfaceTag],
        tag: SurfaceLoopTag,
    ) -> Result<(), BackendError>;

    /// Adds a volume bounded by surface loops; loops after the first bound cavities.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag is taken or a surface loop is missing.
    fn add_volume(
        &mut self,
        shells: &[SurfaceLoopTag],
        tag: VolumeTag,
    ) -> Result<(), BackendError>;

    /// Makes all added entities visible to post-build steps (meshing, export).
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot finish the model.
    fn synchronize(&mut self) -> Result<(), BackendError> {
        Ok(())
    }

    /// Releases the kernel model. Called exactly once, by [`Session`].
    fn finalize(&mut self);
}
