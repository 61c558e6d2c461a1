//! Tag addressing for every entity of the double-torus shell.
//!
//! A tag is a positive integer that is unique only inside its own entity
//! kind. Points, curves, curve loops, surfaces, surface loops and volumes
//! each live in a separate namespace, so the same numeric value may name a
//! curve and a surface at the same time. The tag newtypes below make that
//! separation explicit in the type system.

mod allocator;

pub use allocator::{TagAllocator, TagBlock, MAX_SEGMENTS, MIN_SEGMENTS};

use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;

/// The entity kinds a backend keeps separate namespaces for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Point,
    Curve,
    CurveLoop,
    Surface,
    SurfaceLoop,
    Volume,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Point => "point",
            Self::Curve => "curve",
            Self::CurveLoop => "curve loop",
            Self::Surface => "surface",
            Self::SurfaceLoop => "surface loop",
            Self::Volume => "volume",
        };
        f.write_str(name)
    }
}

macro_rules! tag_type {
    ($(#[$meta:meta])* $name:ident => $kind:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(u32);

        impl $name {
            /// Wraps a raw tag value.
            #[must_use]
            pub const fn new(value: u32) -> Self {
                Self(value)
            }

            /// Returns the raw tag value.
            #[must_use]
            pub const fn get(self) -> u32 {
                self.0
            }
        }

        impl Tag for $name {
            const KIND: EntityKind = EntityKind::$kind;

            fn get(self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

/// Common view of the per-namespace tag types.
pub trait Tag: Copy + Ord + fmt::Display {
    /// Namespace the tag belongs to.
    const KIND: EntityKind;

    /// Returns the raw tag value.
    fn get(self) -> u32;
}

tag_type! {
    /// Tag of a point.
    PointTag => Point
}
tag_type! {
    /// Tag of a curve (every curve in this model is a circle arc).
    CurveTag => Curve
}
tag_type! {
    /// Tag of a curve loop.
    LoopTag => CurveLoop
}
tag_type! {
    /// Tag of a filled surface.
    SurfaceTag => Surface
}
tag_type! {
    /// Tag of a surface loop.
    SurfaceLoopTag => SurfaceLoop
}
tag_type! {
    /// Tag of a volume.
    VolumeTag => Volume
}

/// Which of the two concentric tori an entity belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TorusSide {
    /// The torus with the larger minor radius.
    Outer = 0,
    /// The torus with the smaller minor radius; bounds the cavity.
    Inner = 1,
}

impl TorusSide {
    pub const ALL: [Self; 2] = [Self::Outer, Self::Inner];

    /// Zero-based torus index used by the tag formulas.
    #[must_use]
    pub const fn index(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for TorusSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Outer => f.write_str("outer torus"),
            Self::Inner => f.write_str("inner torus"),
        }
    }
}

/// One of the four canonical points on a local tube circle.
///
/// The cyclic order `Top -> In -> Bot -> Out -> Top` is the order in which
/// the quarter arcs of a local circle chain together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CirclePoint {
    Top = 0,
    In = 1,
    Bot = 2,
    Out = 3,
}

impl CirclePoint {
    pub const ALL: [Self; 4] = [Self::Top, Self::In, Self::Bot, Self::Out];

    /// Zero-based selector index used by the tag formulas.
    #[must_use]
    pub const fn index(self) -> u32 {
        self as u32
    }

    /// The cyclically next point; the quarter arc starting here ends there.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Top => Self::In,
            Self::In => Self::Bot,
            Self::Bot => Self::Out,
            Self::Out => Self::Top,
        }
    }

    /// Angle around the tube cross-section, measured from the outward
    /// radial direction towards +z.
    #[must_use]
    pub fn tube_angle(self) -> f64 {
        match self {
            Self::Out => 0.0,
            Self::Top => FRAC_PI_2,
            Self::In => PI,
            Self::Bot => PI + FRAC_PI_2,
        }
    }
}

/// A curve reference with a traversal direction inside a curve loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrientedArc {
    /// The referenced arc.
    pub arc: CurveTag,
    /// If `true`, the arc is traversed start -> end; otherwise end -> start.
    pub forward: bool,
}

impl OrientedArc {
    /// References `arc` in its natural direction.
    #[must_use]
    pub const fn forward(arc: CurveTag) -> Self {
        Self { arc, forward: true }
    }

    /// References `arc` traversed backwards.
    #[must_use]
    pub const fn reversed(arc: CurveTag) -> Self {
        Self {
            arc,
            forward: false,
        }
    }

    /// Signed tag as kernels expect it: negative means reversed.
    #[must_use]
    pub fn signed(self) -> i64 {
        let tag = i64::from(self.arc.get());
        if self.forward {
            tag
        } else {
            -tag
        }
    }
}

impl fmt::Display for OrientedArc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.signed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_points_cycle_back() {
        for point in CirclePoint::ALL {
            let mut p = point;
            for _ in 0..4 {
                p = p.next();
            }
            assert_eq!(p, point);
        }
    }

    #[test]
    fn next_point_is_a_quarter_turn_ahead() {
        for point in CirclePoint::ALL {
            let delta = (point.next().tube_angle() - point.tube_angle()).rem_euclid(2.0 * PI);
            assert!((delta - FRAC_PI_2).abs() < 1e-12, "{point:?}: {delta}");
        }
    }

    #[test]
    fn signed_reference() {
        let arc = CurveTag::new(17);
        assert_eq!(OrientedArc::forward(arc).signed(), 17);
        assert_eq!(OrientedArc::reversed(arc).signed(), -17);
        assert_eq!(OrientedArc::reversed(arc).to_string(), "-17");
    }
}
