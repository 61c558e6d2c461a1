use tracing::{debug, info, warn};

use crate::error::Result;

use super::GeoBackend;

/// An open kernel model, finalized when the session is dropped.
///
/// The session is the only owner of the backend, so the model is released on
/// every exit path: normal return, early `?` return, or unwinding.
pub struct Session<B: GeoBackend> {
    name: String,
    backend: B,
    synchronized: bool,
}

impl<B: GeoBackend> Session<B> {
    /// Opens a session named `name` over a fresh backend.
    pub fn open(name: impl Into<String>, backend: B) -> Self {
        let name = name.into();
        info!(model = %name, "backend session opened");
        Self {
            name,
            backend,
            synchronized: false,
        }
    }

    /// Returns the model name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the backend for inspection.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns the backend for entity creation.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Returns whether [`Self::synchronize`] has completed.
    #[must_use]
    pub fn is_synchronized(&self) -> bool {
        self.synchronized
    }

    /// Synchronizes the backend model so post-build steps can see it.
    ///
    /// # Errors
    ///
    /// Returns [`ToroshellError::Backend`](crate::error::ToroshellError::Backend)
    /// if the backend cannot finish the model.
    pub fn synchronize(&mut self) -> Result<()> {
        self.backend.synchronize()?;
        self.synchronized = true;
        Ok(())
    }
}

impl<B: GeoBackend> Drop for Session<B> {
    fn drop(&mut self) {
        if !self.synchronized {
            warn!(model = %self.name, "closing session whose model was never synchronized");
        }
        self.backend.finalize();
        debug!(model = %self.name, "backend session finalized");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::error::{BackendError, ToroshellError};
    use crate::math::Point3;
    use crate::model::GeoModel;
    use crate::tags::{
        CurveTag, LoopTag, OrientedArc, PointTag, SurfaceLoopTag, SurfaceTag, VolumeTag,
    };

    type Result<T> = std::result::Result<T, BackendError>;

    /// Backend that accepts every entity and counts finalizations.
    struct Counting {
        finalized: Rc<Cell<u32>>,
        fail_sync: bool,
    }

    impl Counting {
        fn new(finalized: &Rc<Cell<u32>>) -> Self {
            Self {
                finalized: Rc::clone(finalized),
                fail_sync: false,
            }
        }
    }

    impl GeoBackend for Counting {
        fn add_point(&mut self, _: Point3, _: f64, _: PointTag) -> Result<()> {
            Ok(())
        }
        fn add_circle_arc(
            &mut self,
            _: PointTag,
            _: PointTag,
            _: PointTag,
            _: CurveTag,
        ) -> Result<()> {
            Ok(())
        }
        fn add_curve_loop(&mut self, _: &[OrientedArc], _: LoopTag) -> Result<()> {
            Ok(())
        }
        fn add_surface_filling(&mut self, _: &[LoopTag], _: SurfaceTag) -> Result<()> {
            Ok(())
        }
        fn add_surface_loop(&mut self, _: &[SurfaceTag], _: SurfaceLoopTag) -> Result<()> {
            Ok(())
        }
        fn add_volume(&mut self, _: &[SurfaceLoopTag], _: VolumeTag) -> Result<()> {
            Ok(())
        }
        fn synchronize(&mut self) -> Result<()> {
            if self.fail_sync {
                return Err(BackendError::Finalized);
            }
            Ok(())
        }
        fn finalize(&mut self) {
            self.finalized.set(self.finalized.get() + 1);
        }
    }

    #[test]
    fn finalizes_once_on_drop() {
        let count = Rc::new(Cell::new(0));
        {
            let mut session = Session::open("test", Counting::new(&count));
            session.synchronize().unwrap();
            assert!(session.is_synchronized());
            assert_eq!(count.get(), 0);
        }
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn finalizes_on_early_return() {
        fn fails(count: &Rc<Cell<u32>>) -> Result<()> {
            let _session = Session::open("test", Counting::new(count));
            Err(BackendError::Finalized)
        }
        let count = Rc::new(Cell::new(0));
        assert!(fails(&count).is_err());
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn failed_synchronize_is_a_backend_error() {
        let count = Rc::new(Cell::new(0));
        {
            let mut session = Session::open(
                "test",
                Counting {
                    fail_sync: true,
                    ..Counting::new(&count)
                },
            );
            let err = session.synchronize().unwrap_err();
            assert!(matches!(
                err,
                ToroshellError::Backend(BackendError::Finalized)
            ));
            assert!(!session.is_synchronized());
        }
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn exposes_backend() {
        let mut session = Session::open("torus", GeoModel::new());
        assert_eq!(session.name(), "torus");
        session
            .backend_mut()
            .add_point(Point3::origin(), 1.0, PointTag::new(1))
            .unwrap();
        assert!(session.backend().point(PointTag::new(1)).is_ok());
        assert!(!session.backend().is_finalized());
    }
}
