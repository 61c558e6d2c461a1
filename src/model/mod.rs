//! In-memory reference kernel.
//!
//! [`GeoModel`] implements [`GeoBackend`] with one independent namespace per
//! entity kind and checks every primitive the way a boundary-representation
//! kernel would, so a wrong tag or a mis-oriented loop fails at the call that
//! introduced it.

mod entities;
mod watertight;

pub use entities::{ArcData, CurveLoopData, PointData, SurfaceData, SurfaceLoopData, VolumeData};

use std::collections::BTreeMap;

use tracing::info;

use crate::backend::GeoBackend;
use crate::error::BackendError;
use crate::geometry::CircleArc;
use crate::math::Point3;
use crate::tags::{
    CurveTag, EntityKind, LoopTag, OrientedArc, PointTag, SurfaceLoopTag, SurfaceTag, Tag,
    VolumeTag,
};

/// Central store owning every entity of one model, keyed by tag.
#[derive(Debug, Default)]
pub struct GeoModel {
    points: BTreeMap<PointTag, PointData>,
    arcs: BTreeMap<CurveTag, ArcData>,
    curve_loops: BTreeMap<LoopTag, CurveLoopData>,
    surfaces: BTreeMap<SurfaceTag, SurfaceData>,
    surface_loops: BTreeMap<SurfaceLoopTag, SurfaceLoopData>,
    volumes: BTreeMap<VolumeTag, VolumeData>,
    finalized: bool,
}

/// Fails if `tag` is already used in its namespace.
fn claim<T: Tag, V>(map: &BTreeMap<T, V>, tag: T) -> Result<(), BackendError> {
    if map.contains_key(&tag) {
        return Err(BackendError::DuplicateTag {
            kind: T::KIND,
            tag: tag.get(),
        });
    }
    Ok(())
}

fn lookup<T: Tag, V>(map: &BTreeMap<T, V>, tag: T) -> Result<&V, BackendError> {
    map.get(&tag).ok_or(BackendError::MissingEntity {
        kind: T::KIND,
        tag: tag.get(),
    })
}

impl GeoModel {
    /// Creates a new, empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entities in the namespace of `kind`.
    #[must_use]
    pub fn count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Point => self.points.len(),
            EntityKind::Curve => self.arcs.len(),
            EntityKind::CurveLoop => self.curve_loops.len(),
            EntityKind::Surface => self.surfaces.len(),
            EntityKind::SurfaceLoop => self.surface_loops.len(),
            EntityKind::Volume => self.volumes.len(),
        }
    }

    /// Returns whether the model has been released.
    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    // --- Lookups ---

    /// Returns the point data.
    ///
    /// # Errors
    ///
    /// Returns an error if the point does not exist.
    pub fn point(&self, tag: PointTag) -> Result<&PointData, BackendError> {
        lookup(&self.points, tag)
    }

    /// Returns the arc data.
    ///
    /// # Errors
    ///
    /// Returns an error if the arc does not exist.
    pub fn arc(&self, tag: CurveTag) -> Result<&ArcData, BackendError> {
        lookup(&self.arcs, tag)
    }

    /// Returns the curve loop data.
    ///
    /// # Errors
    ///
    /// Returns an error if the curve loop does not exist.
    pub fn curve_loop(&self, tag: LoopTag) -> Result<&CurveLoopData, BackendError> {
        lookup(&self.curve_loops, tag)
    }

    /// Returns the surface data.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface does not exist.
    pub fn surface(&self, tag: SurfaceTag) -> Result<&SurfaceData, BackendError> {
        lookup(&self.surfaces, tag)
    }

    /// Returns the surface loop data.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface loop does not exist.
    pub fn surface_loop(&self, tag: SurfaceLoopTag) -> Result<&SurfaceLoopData, BackendError> {
        lookup(&self.surface_loops, tag)
    }

    /// Returns the volume data.
    ///
    /// # Errors
    ///
    /// Returns an error if the volume does not exist.
    pub fn volume(&self, tag: VolumeTag) -> Result<&VolumeData, BackendError> {
        lookup(&self.volumes, tag)
    }

    // --- Iteration in tag order ---

    pub fn points(&self) -> impl Iterator<Item = (PointTag, &PointData)> {
        self.points.iter().map(|(t, d)| (*t, d))
    }

    pub fn arcs(&self) -> impl Iterator<Item = (CurveTag, &ArcData)> {
        self.arcs.iter().map(|(t, d)| (*t, d))
    }

    pub fn curve_loops(&self) -> impl Iterator<Item = (LoopTag, &CurveLoopData)> {
        self.curve_loops.iter().map(|(t, d)| (*t, d))
    }

    pub fn surfaces(&self) -> impl Iterator<Item = (SurfaceTag, &SurfaceData)> {
        self.surfaces.iter().map(|(t, d)| (*t, d))
    }

    pub fn surface_loops(&self) -> impl Iterator<Item = (SurfaceLoopTag, &SurfaceLoopData)> {
        self.surface_loops.iter().map(|(t, d)| (*t, d))
    }

    pub fn volumes(&self) -> impl Iterator<Item = (VolumeTag, &VolumeData)> {
        self.volumes.iter().map(|(t, d)| (*t, d))
    }

    fn check_open(&self) -> Result<(), BackendError> {
        if self.finalized {
            return Err(BackendError::Finalized);
        }
        Ok(())
    }
}

impl GeoBackend for GeoModel {
    fn add_point(
        &mut self,
        position: Point3,
        mesh_size: f64,
        tag: PointTag,
    ) -> Result<(), BackendError> {
        self.check_open()?;
        claim(&self.points, tag)?;
        if !position.iter().all(|c| c.is_finite()) || !mesh_size.is_finite() || mesh_size < 0.0 {
            return Err(BackendError::NonFinitePoint { tag: tag.get() });
        }
        self.points.insert(
            tag,
            PointData {
                position,
                mesh_size,
            },
        );
        Ok(())
    }

    fn add_circle_arc(
        &mut self,
        start: PointTag,
        center: PointTag,
        end: PointTag,
        tag: CurveTag,
    ) -> Result<(), BackendError> {
        self.check_open()?;
        claim(&self.arcs, tag)?;
        let geometry = CircleArc::through(
            &self.point(start)?.position,
            &self.point(center)?.position,
            &self.point(end)?.position,
        )
        .map_err(|source| BackendError::InvalidArc {
            tag: tag.get(),
            source,
        })?;
        self.arcs.insert(
            tag,
            ArcData {
                start,
                center,
                end,
                geometry,
            },
        );
        Ok(())
    }

    fn add_curve_loop(&mut self, arcs: &[OrientedArc], tag: LoopTag) -> Result<(), BackendError> {
        self.check_open()?;
        claim(&self.curve_loops, tag)?;
        if arcs.is_empty() {
            return Err(BackendError::Empty {
                kind: EntityKind::CurveLoop,
                tag: tag.get(),
            });
        }
        let ends = arcs
            .iter()
            .map(|o| Ok(self.arc(o.arc)?.endpoints(o.forward)))
            .collect::<Result<Vec<_>, BackendError>>()?;
        for (position, (_, end)) in ends.iter().enumerate() {
            let (next_start, _) = ends[(position + 1) % ends.len()];
            if *end != next_start {
                return Err(BackendError::BrokenLoop {
                    tag: tag.get(),
                    position,
                });
            }
        }
        self.curve_loops.insert(
            tag,
            CurveLoopData {
                arcs: arcs.to_vec(),
            },
        );
        Ok(())
    }

    fn add_surface_filling(
        &mut self,
        loops: &[LoopTag],
        tag: SurfaceTag,
    ) -> Result<(), BackendError> {
        self.check_open()?;
        claim(&self.surfaces, tag)?;
        let [curve_loop] = loops else {
            return Err(BackendError::InvalidFilling {
                tag: tag.get(),
                reason: format!("expected exactly one curve loop, got {}", loops.len()),
            });
        };
        let sides = self.curve_loop(*curve_loop)?.arcs.len();
        if !(3..=4).contains(&sides) {
            return Err(BackendError::InvalidFilling {
                tag: tag.get(),
                reason: format!("a filling needs 3 or 4 boundary curves, got {sides}"),
            });
        }
        self.surfaces.insert(
            tag,
            SurfaceData {
                curve_loop: *curve_loop,
            },
        );
        Ok(())
    }

    fn add_surface_loop(
        &mut self,
        surfaces: &[SurfaceTag],
        tag: SurfaceLoopTag,
    ) -> Result<(), BackendError> {
        self.check_open()?;
        claim(&self.surface_loops, tag)?;
        if surfaces.is_empty() {
            return Err(BackendError::Empty {
                kind: EntityKind::SurfaceLoop,
                tag: tag.get(),
            });
        }
        watertight::check(self, surfaces, tag)?;
        self.surface_loops.insert(
            tag,
            SurfaceLoopData {
                surfaces: surfaces.to_vec(),
            },
        );
        Ok(())
    }

    fn add_volume(
        &mut self,
        shells: &[SurfaceLoopTag],
        tag: VolumeTag,
    ) -> Result<(), BackendError> {
        self.check_open()?;
        claim(&self.volumes, tag)?;
        if shells.is_empty() {
            return Err(BackendError::Empty {
                kind: EntityKind::Volume,
                tag: tag.get(),
            });
        }
        for shell in shells {
            self.surface_loop(*shell)?;
        }
        self.volumes.insert(
            tag,
            VolumeData {
                surface_loops: shells.to_vec(),
            },
        );
        Ok(())
    }

    fn synchronize(&mut self) -> Result<(), BackendError> {
        self.check_open()?;
        info!(
            points = self.points.len(),
            curves = self.arcs.len(),
            curve_loops = self.curve_loops.len(),
            surfaces = self.surfaces.len(),
            surface_loops = self.surface_loops.len(),
            volumes = self.volumes.len(),
            "model synchronized"
        );
        Ok(())
    }

    fn finalize(&mut self) {
        self.finalized = true;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(tag: u32) -> PointTag {
        PointTag::new(tag)
    }

    fn c(tag: u32) -> CurveTag {
        CurveTag::new(tag)
    }

    /// Unit circle in the xy plane split into four quarter arcs 1..=4,
    /// points 2..=5 counter-clockwise, center 1.
    fn quarter_circle() -> GeoModel {
        let mut model = GeoModel::new();
        model.add_point(Point3::origin(), 1.0, p(1)).unwrap();
        let corners = [(1.0, 0.0), (0.0, 1.0), (-1.0, 0.0), (0.0, -1.0)];
        for (i, (x, y)) in (2..).zip(corners) {
            model.add_point(Point3::new(x, y, 0.0), 1.0, p(i)).unwrap();
        }
        for i in 0..4 {
            model
                .add_circle_arc(p(2 + i), p(1), p(2 + (i + 1) % 4), c(1 + i))
                .unwrap();
        }
        model
    }

    fn forward_loop() -> Vec<OrientedArc> {
        (1..=4).map(|t| OrientedArc::forward(c(t))).collect()
    }

    #[test]
    fn namespaces_are_independent() {
        let mut model = quarter_circle();
        // Tag 1 is both a point and a curve; a loop and surface may use it too.
        model
            .add_curve_loop(&forward_loop(), LoopTag::new(1))
            .unwrap();
        model
            .add_surface_filling(&[LoopTag::new(1)], SurfaceTag::new(1))
            .unwrap();
        assert_eq!(model.count(EntityKind::Point), 5);
        assert_eq!(model.count(EntityKind::Curve), 4);
        assert_eq!(model.count(EntityKind::CurveLoop), 1);
        assert_eq!(model.count(EntityKind::Surface), 1);
    }

    #[test]
    fn duplicate_tag_is_rejected() {
        let mut model = quarter_circle();
        let err = model
            .add_point(Point3::new(5.0, 0.0, 0.0), 1.0, p(3))
            .unwrap_err();
        assert_eq!(
            err,
            BackendError::DuplicateTag {
                kind: EntityKind::Point,
                tag: 3,
            }
        );
        let err = model.add_circle_arc(p(2), p(1), p(3), c(4)).unwrap_err();
        assert!(matches!(
            err,
            BackendError::DuplicateTag {
                kind: EntityKind::Curve,
                tag: 4,
            }
        ));
    }

    #[test]
    fn missing_reference_is_rejected() {
        let mut model = quarter_circle();
        let err = model.add_circle_arc(p(2), p(1), p(42), c(9)).unwrap_err();
        assert_eq!(
            err,
            BackendError::MissingEntity {
                kind: EntityKind::Point,
                tag: 42,
            }
        );
        let err = model
            .add_surface_filling(&[LoopTag::new(7)], SurfaceTag::new(1))
            .unwrap_err();
        assert!(matches!(
            err,
            BackendError::MissingEntity {
                kind: EntityKind::CurveLoop,
                ..
            }
        ));
    }

    #[test]
    fn half_turn_arc_is_rejected() {
        let mut model = quarter_circle();
        let err = model.add_circle_arc(p(2), p(1), p(4), c(9)).unwrap_err();
        assert!(matches!(err, BackendError::InvalidArc { tag: 9, .. }));
    }

    #[test]
    fn broken_loop_is_rejected() {
        let mut model = quarter_circle();
        let mut arcs = forward_loop();
        arcs[2] = OrientedArc::reversed(c(3));
        let err = model.add_curve_loop(&arcs, LoopTag::new(1)).unwrap_err();
        assert_eq!(
            err,
            BackendError::BrokenLoop {
                tag: 1,
                position: 1,
            }
        );
    }

    #[test]
    fn reversed_loop_is_closed() {
        let mut model = quarter_circle();
        let arcs: Vec<_> = (1..=4).rev().map(c).map(OrientedArc::reversed).collect();
        model.add_curve_loop(&arcs, LoopTag::new(1)).unwrap();
    }

    #[test]
    fn filling_needs_one_small_loop() {
        let mut model = quarter_circle();
        model
            .add_curve_loop(&forward_loop(), LoopTag::new(1))
            .unwrap();
        let err = model
            .add_surface_filling(&[LoopTag::new(1), LoopTag::new(1)], SurfaceTag::new(1))
            .unwrap_err();
        assert!(matches!(err, BackendError::InvalidFilling { tag: 1, .. }));
    }

    #[test]
    fn open_surface_loop_is_rejected() {
        let mut model = quarter_circle();
        model
            .add_curve_loop(&forward_loop(), LoopTag::new(1))
            .unwrap();
        model
            .add_surface_filling(&[LoopTag::new(1)], SurfaceTag::new(1))
            .unwrap();
        // A single disc leaves every boundary arc used once.
        let err = model
            .add_surface_loop(&[SurfaceTag::new(1)], SurfaceLoopTag::new(1))
            .unwrap_err();
        assert!(matches!(
            err,
            BackendError::NotWatertight { uses: "once", .. }
        ));
    }

    #[test]
    fn two_opposite_discs_close() {
        let mut model = quarter_circle();
        model
            .add_curve_loop(&forward_loop(), LoopTag::new(1))
            .unwrap();
        let reversed: Vec<_> = (1..=4).rev().map(c).map(OrientedArc::reversed).collect();
        model.add_curve_loop(&reversed, LoopTag::new(2)).unwrap();
        for t in 1..=2 {
            model
                .add_surface_filling(&[LoopTag::new(t)], SurfaceTag::new(t))
                .unwrap();
        }
        let surfaces = [SurfaceTag::new(1), SurfaceTag::new(2)];
        model
            .add_surface_loop(&surfaces, SurfaceLoopTag::new(1))
            .unwrap();
        model
            .add_volume(&[SurfaceLoopTag::new(1)], VolumeTag::new(1))
            .unwrap();
        assert_eq!(model.count(EntityKind::Volume), 1);
    }

    #[test]
    fn same_disc_twice_is_not_watertight() {
        let mut model = quarter_circle();
        model
            .add_curve_loop(&forward_loop(), LoopTag::new(1))
            .unwrap();
        model
            .add_surface_filling(&[LoopTag::new(1)], SurfaceTag::new(1))
            .unwrap();
        let err = model
            .add_surface_loop(
                &[SurfaceTag::new(1), SurfaceTag::new(1)],
                SurfaceLoopTag::new(1),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            BackendError::NotWatertight {
                uses: "twice in the same direction",
                ..
            }
        ));
    }

    #[test]
    fn empty_volume_is_rejected() {
        let mut model = GeoModel::new();
        let err = model.add_volume(&[], VolumeTag::new(1)).unwrap_err();
        assert!(matches!(
            err,
            BackendError::Empty {
                kind: EntityKind::Volume,
                ..
            }
        ));
    }

    #[test]
    fn non_finite_point_is_rejected() {
        let mut model = GeoModel::new();
        let err = model
            .add_point(Point3::new(f64::NAN, 0.0, 0.0), 1.0, p(1))
            .unwrap_err();
        assert_eq!(err, BackendError::NonFinitePoint { tag: 1 });
    }

    #[test]
    fn finalized_model_rejects_entities() {
        let mut model = GeoModel::new();
        model.finalize();
        assert!(model.is_finalized());
        let err = model.add_point(Point3::origin(), 1.0, p(1)).unwrap_err();
        assert_eq!(err, BackendError::Finalized);
    }
}
