use crate::error::GeometryError;
use crate::math::{Point3, Vector3, TOLERANCE};

/// A torus centered at the origin with the z axis as its axis of symmetry.
///
/// `P(u, v) = (R + r*cos(v)) * (cos(u), sin(u), 0) + r*sin(v) * (0, 0, 1)`
///
/// `u` runs along the major circle starting at +x, `v` around the tube
/// starting at the outward radial direction.
#[derive(Debug, Clone, Copy)]
pub struct Torus {
    major_radius: f64,
    minor_radius: f64,
}

impl Torus {
    /// Creates a new torus.
    ///
    /// The minor radius may reach or exceed the major radius; such a torus
    /// self-intersects, and it is left to the kernel to reject what it
    /// cannot represent.
    ///
    /// # Errors
    ///
    /// Returns an error if either radius is not positive.
    pub fn new(major_radius: f64, minor_radius: f64) -> Result<Self, GeometryError> {
        if major_radius < TOLERANCE {
            return Err(GeometryError::Degenerate(
                "torus major radius must be positive".into(),
            ));
        }
        if minor_radius < TOLERANCE {
            return Err(GeometryError::Degenerate(
                "torus minor radius must be positive".into(),
            ));
        }
        Ok(Self {
            major_radius,
            minor_radius,
        })
    }

    /// Returns the major radius (center to tube center).
    #[must_use]
    pub fn major_radius(&self) -> f64 {
        self.major_radius
    }

    /// Returns the minor radius (tube radius).
    #[must_use]
    pub fn minor_radius(&self) -> f64 {
        self.minor_radius
    }

    /// Unit radial direction at major angle `u`.
    fn radial(u: f64) -> Vector3 {
        Vector3::new(u.cos(), u.sin(), 0.0)
    }

    /// Center of the tube cross-section at major angle `u`.
    #[must_use]
    pub fn tube_center(&self, u: f64) -> Point3 {
        Point3::origin() + Self::radial(u) * self.major_radius
    }

    /// Center of the horizontal circle through all points at tube angle
    /// `pi/2` (`sign > 0`) or `3pi/2` (`sign < 0`).
    #[must_use]
    pub fn pole(&self, sign: f64) -> Point3 {
        Point3::new(0.0, 0.0, self.minor_radius.copysign(sign))
    }

    /// Evaluates the surface at `(u, v)`.
    #[must_use]
    pub fn evaluate(&self, u: f64, v: f64) -> Point3 {
        let radial = Self::radial(u);
        self.tube_center(u)
            + radial * (self.minor_radius * v.cos())
            + Vector3::z() * (self.minor_radius * v.sin())
    }

    /// Unsigned distance from `point` to the surface.
    #[must_use]
    pub fn distance(&self, point: &Point3) -> f64 {
        let u = point.y.atan2(point.x);
        ((point - self.tube_center(u)).norm() - self.minor_radius).abs()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn torus() -> Torus {
        Torus::new(3.0, 1.0).unwrap()
    }

    #[test]
    fn evaluate_outer_equator() {
        // u=0, v=0: (R+r, 0, 0)
        let p = torus().evaluate(0.0, 0.0);
        assert!((p - Point3::new(4.0, 0.0, 0.0)).norm() < TOLERANCE);
    }

    #[test]
    fn evaluate_inner_equator() {
        let p = torus().evaluate(0.0, PI);
        assert!((p - Point3::new(2.0, 0.0, 0.0)).norm() < 1e-9);
    }

    #[test]
    fn evaluate_top_rotated() {
        let p = torus().evaluate(FRAC_PI_2, FRAC_PI_2);
        assert!((p - Point3::new(0.0, 3.0, 1.0)).norm() < 1e-9);
    }

    #[test]
    fn tube_centers_follow_the_major_circle() {
        let t = torus();
        for u in [0.0, 1.0, PI, 4.5] {
            let c = t.tube_center(u);
            assert!((c.coords.norm() - t.major_radius()).abs() < 1e-12, "u={u}");
            assert!(c.z.abs() < TOLERANCE);
        }
    }

    #[test]
    fn poles_sit_at_tube_height() {
        let t = torus();
        assert!((t.pole(1.0) - Point3::new(0.0, 0.0, 1.0)).norm() < TOLERANCE);
        assert!((t.pole(-1.0) - Point3::new(0.0, 0.0, -1.0)).norm() < TOLERANCE);
    }

    #[test]
    fn evaluated_points_are_on_surface() {
        let t = torus();
        for &(u, v) in &[(0.0, 0.0), (1.0, 0.5), (2.5, 4.0), (5.9, 3.3)] {
            assert!(t.distance(&t.evaluate(u, v)) < 1e-9, "u={u}, v={v}");
        }
        assert!((t.distance(&Point3::origin()) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn invalid_radii() {
        assert!(Torus::new(0.0, 1.0).is_err());
        assert!(Torus::new(3.0, -1.0).is_err());
        assert!(Torus::new(1.0, 2.0).is_ok());
    }
}
