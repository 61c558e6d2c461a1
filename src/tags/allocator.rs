use std::ops::RangeInclusive;

use crate::error::ConfigError;

use super::{
    CirclePoint, CurveTag, EntityKind, LoopTag, PointTag, SurfaceLoopTag, SurfaceTag, TorusSide,
    VolumeTag,
};

/// Fewest segments that close the sweep with arcs shorter than a half turn.
pub const MIN_SEGMENTS: u32 = 3;

/// Most segments whose curve tags still fit a signed 32-bit kernel tag.
pub const MAX_SEGMENTS: u32 = i32::MAX.unsigned_abs() / 16;

/// A contiguous range of tags reserved for one family of entities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagBlock {
    pub kind: EntityKind,
    pub name: &'static str,
    pub range: RangeInclusive<u32>,
}

/// Closed-form tag formulas for a double torus with `n` segments.
///
/// Layout (all tags 1-based):
///
/// | namespace     | block                  | range               |
/// |---------------|------------------------|---------------------|
/// | point         | global center          | `1`                 |
/// | point         | pole centers           | `2..=5`             |
/// | point         | local circle centers   | `6..=5+2n`          |
/// | point         | local circle points    | `6+2n..=5+10n`      |
/// | curve         | small (quarter) arcs   | `1..=8n`            |
/// | curve         | big (connecting) arcs  | `8n+1..=16n`        |
/// | curve loop    | lune boundaries        | `1..=8n`            |
/// | surface       | lunes                  | `1..=8n`            |
/// | surface loop  | one per torus          | `1..=2`             |
/// | volume        | the shell              | `1`                 |
///
/// Curve loops and surfaces reuse the small-arc formula on purpose. They
/// live in namespaces of their own, so equal numbers never collide. Do not
/// offset them "to avoid duplicates": the layout is already collision free.
///
/// Every index method panics on an out-of-domain segment; that is a bug in
/// the caller, not a runtime condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagAllocator {
    segments: u32,
}

impl TagAllocator {
    /// Creates the allocator for `segments` segments per torus.
    ///
    /// # Errors
    ///
    /// Returns an error if `segments` is below [`MIN_SEGMENTS`] or above
    /// [`MAX_SEGMENTS`].
    ///
    /// # Panics
    ///
    /// Panics if two tag blocks of the same namespace overlap, which would
    /// mean the layout table itself is wrong.
    pub fn new(segments: u32) -> Result<Self, ConfigError> {
        if segments < MIN_SEGMENTS {
            return Err(ConfigError::TooFewSegments(segments));
        }
        if segments > MAX_SEGMENTS {
            return Err(ConfigError::TooManySegments {
                count: segments,
                max: MAX_SEGMENTS,
            });
        }
        let allocator = Self { segments };
        let blocks = allocator.blocks();
        for (i, a) in blocks.iter().enumerate() {
            for b in blocks.iter().skip(i + 1).filter(|b| b.kind == a.kind) {
                assert!(
                    a.range.end() < b.range.start() || b.range.end() < a.range.start(),
                    "{} block {} overlaps {}",
                    a.kind,
                    a.name,
                    b.name
                );
            }
        }
        Ok(allocator)
    }

    /// Number of segments per torus.
    #[must_use]
    pub fn segments(&self) -> u32 {
        self.segments
    }

    /// Cyclic predecessor of `segment`; segment 0 follows the last one.
    #[must_use]
    pub fn predecessor(&self, segment: u32) -> u32 {
        self.check_segment(segment);
        if segment == 0 {
            self.segments - 1
        } else {
            segment - 1
        }
    }

    /// Every reserved tag block, in namespace order.
    #[must_use]
    pub fn blocks(&self) -> Vec<TagBlock> {
        let n = self.segments;
        let block = |kind, name, range| TagBlock { kind, name, range };
        vec![
            block(EntityKind::Point, "global center", 1..=1),
            block(EntityKind::Point, "pole centers", 2..=5),
            block(EntityKind::Point, "circle centers", 6..=5 + 2 * n),
            block(EntityKind::Point, "circle points", 6 + 2 * n..=5 + 10 * n),
            block(EntityKind::Curve, "small arcs", 1..=8 * n),
            block(EntityKind::Curve, "big arcs", 8 * n + 1..=16 * n),
            block(EntityKind::CurveLoop, "lune boundaries", 1..=8 * n),
            block(EntityKind::Surface, "lunes", 1..=8 * n),
            block(EntityKind::SurfaceLoop, "torus shells", 1..=2),
            block(EntityKind::Volume, "shell solid", 1..=1),
        ]
    }

    /// Total number of tags reserved in the namespace of `kind`.
    #[must_use]
    pub fn count(&self, kind: EntityKind) -> u32 {
        self.blocks()
            .iter()
            .filter(|b| b.kind == kind)
            .map(|b| b.range.end() - b.range.start() + 1)
            .sum()
    }

    // --- Points ---

    /// The global center, shared by both tori.
    #[must_use]
    pub fn center(&self) -> PointTag {
        PointTag::new(1)
    }

    /// Center of the circle through all `Top` points of `torus`.
    #[must_use]
    pub fn top_center(&self, torus: TorusSide) -> PointTag {
        match torus {
            TorusSide::Outer => PointTag::new(3),
            TorusSide::Inner => PointTag::new(2),
        }
    }

    /// Center of the circle through all `Bot` points of `torus`.
    #[must_use]
    pub fn bot_center(&self, torus: TorusSide) -> PointTag {
        match torus {
            TorusSide::Outer => PointTag::new(5),
            TorusSide::Inner => PointTag::new(4),
        }
    }

    /// Center of the local tube circle of `segment`.
    ///
    /// # Panics
    ///
    /// Panics if `segment` is not below the segment count.
    #[must_use]
    pub fn circle_center(&self, torus: TorusSide, segment: u32) -> PointTag {
        self.check_segment(segment);
        PointTag::new(6 + self.segments * torus.index() + segment)
    }

    /// One of the four canonical points on the local circle of `segment`.
    ///
    /// # Panics
    ///
    /// Panics if `segment` is not below the segment count.
    #[must_use]
    pub fn circle_point(&self, torus: TorusSide, segment: u32, point: CirclePoint) -> PointTag {
        self.check_segment(segment);
        PointTag::new(6 + 2 * self.segments + self.quad_offset(torus, segment, point))
    }

    // --- Curves ---

    /// Quarter arc of the local circle of `segment`, from `start` to `start.next()`.
    ///
    /// # Panics
    ///
    /// Panics if `segment` is not below the segment count.
    #[must_use]
    pub fn small_arc(&self, torus: TorusSide, segment: u32, start: CirclePoint) -> CurveTag {
        self.check_segment(segment);
        CurveTag::new(1 + self.quad_offset(torus, segment, start))
    }

    /// Arc joining point `which` of the predecessor of `end_segment` to the
    /// same point of `end_segment`.
    ///
    /// # Panics
    ///
    /// Panics if `end_segment` is not below the segment count.
    #[must_use]
    pub fn big_arc(&self, torus: TorusSide, end_segment: u32, which: CirclePoint) -> CurveTag {
        self.check_segment(end_segment);
        CurveTag::new(1 + 8 * self.segments + self.quad_offset(torus, end_segment, which))
    }

    // --- Loops and surfaces ---

    /// Boundary loop of the lune whose leading small arc starts at `start`.
    ///
    /// Numerically equal to [`Self::small_arc`]; curve loops have their own namespace.
    ///
    /// # Panics
    ///
    /// Panics if `segment` is not below the segment count.
    #[must_use]
    pub fn curve_loop(&self, torus: TorusSide, segment: u32, start: CirclePoint) -> LoopTag {
        LoopTag::new(self.small_arc(torus, segment, start).get())
    }

    /// Filled lune bounded by [`Self::curve_loop`] with the same indices.
    ///
    /// # Panics
    ///
    /// Panics if `segment` is not below the segment count.
    #[must_use]
    pub fn surface(&self, torus: TorusSide, segment: u32, start: CirclePoint) -> SurfaceTag {
        SurfaceTag::new(self.curve_loop(torus, segment, start).get())
    }

    /// Closed surface of one torus.
    #[must_use]
    pub fn surface_loop(&self, torus: TorusSide) -> SurfaceLoopTag {
        SurfaceLoopTag::new(torus.index() + 1)
    }

    /// The shell solid between the two tori.
    #[must_use]
    pub fn volume(&self) -> VolumeTag {
        VolumeTag::new(1)
    }

    /// Offset of a (torus, segment, selector) triple inside a `8n` block.
    fn quad_offset(self, torus: TorusSide, segment: u32, point: CirclePoint) -> u32 {
        4 * self.segments * torus.index() + 4 * segment + point.index()
    }

    fn check_segment(self, segment: u32) {
        assert!(
            segment < self.segments,
            "segment index {segment} out of range 0..{}",
            self.segments
        );
    }
}
