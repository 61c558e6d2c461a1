use std::collections::BTreeMap;

use crate::error::BackendError;
use crate::tags::{CurveTag, SurfaceLoopTag, SurfaceTag};

use super::GeoModel;

/// Checks that `surfaces` form a closed, consistently oriented 2-manifold.
///
/// Every boundary arc must be used by exactly two surfaces, once in each
/// direction.
pub(super) fn check(
    model: &GeoModel,
    surfaces: &[SurfaceTag],
    tag: SurfaceLoopTag,
) -> Result<(), BackendError> {
    // arc -> (forward uses, reversed uses)
    let mut uses: BTreeMap<CurveTag, (u32, u32)> = BTreeMap::new();
    for surface in surfaces {
        let curve_loop = model.surface(*surface)?.curve_loop;
        for oriented in &model.curve_loop(curve_loop)?.arcs {
            let entry = uses.entry(oriented.arc).or_default();
            if oriented.forward {
                entry.0 += 1;
            } else {
                entry.1 += 1;
            }
        }
    }

    for (arc, counts) in uses {
        let problem = match counts {
            (1, 1) => continue,
            (f, r) if f + r == 1 => "once",
            (2, 0) | (0, 2) => "twice in the same direction",
            _ => "more than twice",
        };
        return Err(BackendError::NotWatertight {
            tag: tag.get(),
            arc: arc.get(),
            uses: problem,
        });
    }
    Ok(())
}
