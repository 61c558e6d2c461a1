use crate::error::GeometryError;
use crate::math::{Point3, Vector3, RELATIVE_TOLERANCE, TOLERANCE};

/// A circular arc in 3D space, shorter than a half turn.
///
/// Defined the way kernels accept circle arcs: by a start point, the circle
/// center and an end point. The arc runs from start to end the short way
/// around, so the three points fully determine it as long as they are not
/// collinear.
#[derive(Debug, Clone)]
pub struct CircleArc {
    center: Point3,
    radius: f64,
    normal: Vector3,
    ref_dir: Vector3,
    sweep: f64,
}

impl CircleArc {
    /// Creates the arc from `start` to `end` around `center`.
    ///
    /// # Errors
    ///
    /// Returns an error if an endpoint coincides with the center, the
    /// endpoints are at different distances from the center, or the three
    /// points are collinear (sweep of zero or a half turn).
    pub fn through(start: &Point3, center: &Point3, end: &Point3) -> Result<Self, GeometryError> {
        let a = start - center;
        let b = end - center;
        let ra = a.norm();
        let rb = b.norm();
        if ra < TOLERANCE || rb < TOLERANCE {
            return Err(GeometryError::ZeroVector);
        }
        if (ra - rb).abs() > RELATIVE_TOLERANCE * ra.max(rb) {
            return Err(GeometryError::Degenerate(format!(
                "endpoints lie at distances {ra} and {rb} from the center"
            )));
        }

        let cross = a.cross(&b);
        let sin_part = cross.norm();
        if sin_part <= RELATIVE_TOLERANCE * ra * rb {
            return Err(GeometryError::Degenerate(
                "start, center and end are collinear".into(),
            ));
        }

        Ok(Self {
            center: *center,
            radius: ra,
            normal: cross / sin_part,
            ref_dir: a / ra,
            sweep: sin_part.atan2(a.dot(&b)),
        })
    }

    /// Returns the center of the arc circle.
    #[must_use]
    pub fn center(&self) -> &Point3 {
        &self.center
    }

    /// Returns the radius of the arc.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the unit normal of the arc plane (right-handed with the sweep).
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Returns the swept angle in radians, always in `(0, pi)`.
    #[must_use]
    pub fn sweep(&self) -> f64 {
        self.sweep
    }

    /// Evaluates the arc at normalized parameter `t` (0 = start, 1 = end).
    #[must_use]
    pub fn evaluate(&self, t: f64) -> Point3 {
        let angle = self.sweep * t;
        let binormal = self.normal.cross(&self.ref_dir);
        self.center + (self.ref_dir * angle.cos() + binormal * angle.sin()) * self.radius
    }
}
