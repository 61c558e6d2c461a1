//! Construction of the double-torus shell.

mod plan;

pub use plan::{big_arcs, lune_boundary, small_arcs, ArcSpec};

use std::f64::consts::TAU;
use std::fmt;

use tracing::{debug, info};

use crate::backend::{GeoBackend, Session};
use crate::config::TorusParams;
use crate::error::{BackendError, Result, ToroshellError};
use crate::geometry::Torus;
use crate::math::Point3;
use crate::tags::{CirclePoint, SurfaceLoopTag, TagAllocator, TorusSide, VolumeTag};

/// The construction step an entity belongs to, reported with backend errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStep {
    GlobalCenter,
    Poles(TorusSide),
    LocalCircle { torus: TorusSide, segment: u32 },
    ConnectingArcs { torus: TorusSide, segment: u32 },
    Lunes { torus: TorusSide, segment: u32 },
    SurfaceLoop(TorusSide),
    Volume,
}

impl fmt::Display for BuildStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GlobalCenter => write!(f, "global center"),
            Self::Poles(torus) => write!(f, "pole centers of the {torus}"),
            Self::LocalCircle { torus, segment } => {
                write!(f, "local circle {segment} of the {torus}")
            }
            Self::ConnectingArcs { torus, segment } => {
                write!(f, "connecting arcs of segment {segment} of the {torus}")
            }
            Self::Lunes { torus, segment } => {
                write!(f, "lunes of segment {segment} of the {torus}")
            }
            Self::SurfaceLoop(torus) => write!(f, "surface loop of the {torus}"),
            Self::Volume => write!(f, "shell volume"),
        }
    }
}

/// Number of entities created per namespace during one build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntityCounts {
    pub points: usize,
    pub arcs: usize,
    pub curve_loops: usize,
    pub surfaces: usize,
}

/// Result of a completed build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub counts: EntityCounts,
    /// Outer and inner surface loop, in that order.
    pub surface_loops: [SurfaceLoopTag; 2],
    /// The shell solid.
    pub volume: VolumeTag,
}

/// Maps a backend rejection to a construction error at `step`.
fn at(step: BuildStep) -> impl Fn(BackendError) -> ToroshellError {
    move |source| {
        debug!(%step, error = %source, "backend rejected entity");
        ToroshellError::Construction { step, source }
    }
}

/// Builds the shell between two concentric tori sharing one major circle.
///
/// Entities are created in dependency order: the global center, then per
/// torus its pole centers, every local circle with its quarter arcs, and in
/// a second pass the connecting arcs, lune loops and surfaces of each
/// segment, closed by the torus surface loop. The volume comes last.
pub struct BuildDoubleTorus {
    params: TorusParams,
}

impl BuildDoubleTorus {
    /// Creates a new `BuildDoubleTorus` operation.
    #[must_use]
    pub fn new(params: TorusParams) -> Self {
        Self { params }
    }

    /// Executes the operation against the session's backend.
    ///
    /// Parameters are validated before any entity is created. A rejected
    /// primitive aborts the build; entities created so far stay in the
    /// backend until the session is dropped.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for invalid parameters, or a
    /// construction error naming the step whose entity the backend rejected.
    pub fn execute<B: GeoBackend>(&self, session: &mut Session<B>) -> Result<BuildSummary> {
        let tags = self.params.validate()?;
        let backend = session.backend_mut();
        let mut counts = EntityCounts::default();

        backend
            .add_point(Point3::origin(), self.params.mesh_size, tags.center())
            .map_err(at(BuildStep::GlobalCenter))?;
        counts.points += 1;

        let outer = self.build_torus(backend, tags, TorusSide::Outer, &mut counts)?;
        let inner = self.build_torus(backend, tags, TorusSide::Inner, &mut counts)?;

        let volume = tags.volume();
        backend
            .add_volume(&[outer, inner], volume)
            .map_err(at(BuildStep::Volume))?;
        info!(?counts, %volume, "double torus shell built");

        Ok(BuildSummary {
            counts,
            surface_loops: [outer, inner],
            volume,
        })
    }

    fn minor_radius(&self, side: TorusSide) -> f64 {
        match side {
            TorusSide::Outer => self.params.outer_minor_radius,
            TorusSide::Inner => self.params.inner_minor_radius,
        }
    }

    fn build_torus<B: GeoBackend>(
        &self,
        backend: &mut B,
        tags: TagAllocator,
        side: TorusSide,
        counts: &mut EntityCounts,
    ) -> Result<SurfaceLoopTag> {
        let torus = Torus::new(self.params.major_radius, self.minor_radius(side))?;
        let mesh_size = self.params.mesh_size;
        let n = tags.segments();

        let poles = at(BuildStep::Poles(side));
        backend
            .add_point(torus.pole(1.0), mesh_size, tags.top_center(side))
            .map_err(&poles)?;
        backend
            .add_point(torus.pole(-1.0), mesh_size, tags.bot_center(side))
            .map_err(&poles)?;
        counts.points += 2;

        info!(torus = %side, minor_radius = torus.minor_radius(), "building local circles");
        for segment in 0..n {
            let step = at(BuildStep::LocalCircle {
                torus: side,
                segment,
            });
            let u = TAU * f64::from(segment) / f64::from(n);
            backend
                .add_point(
                    torus.tube_center(u),
                    mesh_size,
                    tags.circle_center(side, segment),
                )
                .map_err(&step)?;
            for point in CirclePoint::ALL {
                backend
                    .add_point(
                        torus.evaluate(u, point.tube_angle()),
                        mesh_size,
                        tags.circle_point(side, segment, point),
                    )
                    .map_err(&step)?;
            }
            for arc in small_arcs(&tags, side, segment) {
                backend
                    .add_circle_arc(arc.start, arc.center, arc.end, arc.tag)
                    .map_err(&step)?;
            }
            counts.points += 5;
            counts.arcs += 4;
            debug!(torus = %side, segment, "local circle done");
        }

        info!(torus = %side, "building connecting arcs and lunes");
        let mut surfaces = Vec::with_capacity(4 * n as usize);
        for segment in 0..n {
            let step = at(BuildStep::ConnectingArcs {
                torus: side,
                segment,
            });
            for arc in big_arcs(&tags, side, segment) {
                backend
                    .add_circle_arc(arc.start, arc.center, arc.end, arc.tag)
                    .map_err(&step)?;
            }
            counts.arcs += 4;

            let step = at(BuildStep::Lunes {
                torus: side,
                segment,
            });
            for start in CirclePoint::ALL {
                let curve_loop = tags.curve_loop(side, segment, start);
                backend
                    .add_curve_loop(&lune_boundary(&tags, side, segment, start), curve_loop)
                    .map_err(&step)?;
                let surface = tags.surface(side, segment, start);
                backend
                    .add_surface_filling(&[curve_loop], surface)
                    .map_err(&step)?;
                surfaces.push(surface);
            }
            counts.curve_loops += 4;
            counts.surfaces += 4;
            debug!(torus = %side, segment, "lunes done");
        }

        let surface_loop = tags.surface_loop(side);
        backend
            .add_surface_loop(&surfaces, surface_loop)
            .map_err(at(BuildStep::SurfaceLoop(side)))?;
        Ok(surface_loop)
    }
}
