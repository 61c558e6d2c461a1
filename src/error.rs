use thiserror::Error;

use crate::builder::BuildStep;
use crate::tags::EntityKind;

/// Top-level error type for the toroshell model builder.
#[derive(Debug, Error)]
pub enum ToroshellError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A backend primitive rejected an entity while the shell was being built.
    #[error("construction failed at {step}: {source}")]
    Construction {
        step: BuildStep,
        #[source]
        source: BackendError,
    },

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors detected while validating build parameters, before any entity exists.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("segment count {0} is below the minimum of 3")]
    TooFewSegments(u32),

    #[error("segment count {count} exceeds the tag range (max {max})")]
    TooManySegments { count: u32, max: u32 },

    #[error("{parameter} = {value} must be finite and positive")]
    NotPositive { parameter: &'static str, value: f64 },

    #[error("outer minor radius {outer} must be larger than inner minor radius {inner}")]
    RadiiNotNested { outer: f64, inner: f64 },
}

/// Errors related to geometric computations.
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors reported by a backend when it rejects an entity-creation call.
#[derive(Debug, Error, PartialEq)]
pub enum BackendError {
    #[error("{kind} tag {tag} is already in use")]
    DuplicateTag { kind: EntityKind, tag: u32 },

    #[error("{kind} {tag} does not exist")]
    MissingEntity { kind: EntityKind, tag: u32 },

    #[error("{kind} {tag} has no members")]
    Empty { kind: EntityKind, tag: u32 },

    #[error("circle arc {tag} is invalid: {source}")]
    InvalidArc {
        tag: u32,
        #[source]
        source: GeometryError,
    },

    #[error("curve loop {tag} is not chained at position {position}")]
    BrokenLoop { tag: u32, position: usize },

    #[error("surface filling {tag} is invalid: {reason}")]
    InvalidFilling { tag: u32, reason: String },

    #[error("surface loop {tag} is not watertight: arc {arc} is used {uses}")]
    NotWatertight {
        tag: u32,
        arc: u32,
        uses: &'static str,
    },

    #[error("point {tag} has a non-finite coordinate or mesh size")]
    NonFinitePoint { tag: u32 },

    #[error("backend session has already been finalized")]
    Finalized,
}

/// Convenience type alias for results using [`ToroshellError`].
pub type Result<T> = std::result::Result<T, ToroshellError>;
