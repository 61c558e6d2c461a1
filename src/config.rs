use crate::error::ConfigError;
use crate::tags::TagAllocator;

/// Parameters of the double-torus shell.
#[derive(Debug, Clone, PartialEq)]
pub struct TorusParams {
    /// Number of angular segments per torus.
    pub segments: u32,
    /// Radius of the shared sweep circle (`R`).
    pub major_radius: f64,
    /// Tube radius of the outer torus (`r1`).
    pub outer_minor_radius: f64,
    /// Tube radius of the inner torus (`r2`); bounds the cavity.
    pub inner_minor_radius: f64,
    /// Target mesh size attached to every point.
    pub mesh_size: f64,
}

impl Default for TorusParams {
    fn default() -> Self {
        Self {
            segments: 5,
            major_radius: 1000.0,
            outer_minor_radius: 400.0,
            inner_minor_radius: 340.0,
            mesh_size: 100.0,
        }
    }
}

impl TorusParams {
    /// Checks the parameters and returns the tag allocator for them.
    ///
    /// A minor radius reaching the major radius is not rejected here; the
    /// kernel reports the degenerate arcs such a torus produces.
    ///
    /// # Errors
    ///
    /// Returns an error if the segment count is out of range, a length is
    /// not finite and positive, or the outer tube is not wider than the inner one.
    pub fn validate(&self) -> Result<TagAllocator, ConfigError> {
        let tags = TagAllocator::new(self.segments)?;
        for (parameter, value) in [
            ("major radius", self.major_radius),
            ("outer minor radius", self.outer_minor_radius),
            ("inner minor radius", self.inner_minor_radius),
            ("mesh size", self.mesh_size),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NotPositive { parameter, value });
            }
        }
        if self.outer_minor_radius <= self.inner_minor_radius {
            return Err(ConfigError::RadiiNotNested {
                outer: self.outer_minor_radius,
                inner: self.inner_minor_radius,
            });
        }
        Ok(tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let tags = TorusParams::default().validate();
        assert_eq!(tags.map(|t| t.segments()), Ok(5));
    }

    #[test]
    fn too_few_segments() {
        for segments in 0..3 {
            let params = TorusParams {
                segments,
                ..TorusParams::default()
            };
            assert_eq!(params.validate(), Err(ConfigError::TooFewSegments(segments)));
        }
    }

    #[test]
    fn radii_must_be_nested() {
        let params = TorusParams {
            outer_minor_radius: 300.0,
            inner_minor_radius: 300.0,
            ..TorusParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ConfigError::RadiiNotNested { .. })
        ));
    }

    #[test]
    fn lengths_must_be_positive() {
        let params = TorusParams {
            inner_minor_radius: 0.0,
            ..TorusParams::default()
        };
        assert_eq!(
            params.validate(),
            Err(ConfigError::NotPositive {
                parameter: "inner minor radius",
                value: 0.0,
            })
        );
        let params = TorusParams {
            mesh_size: f64::NAN,
            ..TorusParams::default()
        };
        assert!(params.validate().is_err());
    }
}
