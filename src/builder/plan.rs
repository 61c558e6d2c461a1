use crate::tags::{CirclePoint, CurveTag, OrientedArc, PointTag, TagAllocator, TorusSide};

/// A circle arc to create: `start -> end` around `center`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArcSpec {
    pub tag: CurveTag,
    pub start: PointTag,
    pub center: PointTag,
    pub end: PointTag,
}

/// The four quarter arcs of the local circle of `segment`.
///
/// Each runs from a canonical point to the next one in `Top -> In -> Bot ->
/// Out` order around the local center, so it spans exactly a quarter turn.
#[must_use]
pub fn small_arcs(tags: &TagAllocator, torus: TorusSide, segment: u32) -> [ArcSpec; 4] {
    CirclePoint::ALL.map(|start| ArcSpec {
        tag: tags.small_arc(torus, segment, start),
        start: tags.circle_point(torus, segment, start),
        center: tags.circle_center(torus, segment),
        end: tags.circle_point(torus, segment, start.next()),
    })
}

/// The four arcs joining the local circle of the predecessor of `segment`
/// to the local circle of `segment`.
///
/// `Top` and `Bot` arcs turn around the pole centers of the torus; `In` and
/// `Out` arcs turn around the global center.
#[must_use]
pub fn big_arcs(tags: &TagAllocator, torus: TorusSide, segment: u32) -> [ArcSpec; 4] {
    let previous = tags.predecessor(segment);
    CirclePoint::ALL.map(|which| ArcSpec {
        tag: tags.big_arc(torus, segment, which),
        start: tags.circle_point(torus, previous, which),
        center: match which {
            CirclePoint::Top => tags.top_center(torus),
            CirclePoint::Bot => tags.bot_center(torus),
            CirclePoint::In | CirclePoint::Out => tags.center(),
        },
        end: tags.circle_point(torus, segment, which),
    })
}

/// Boundary of the lune between the predecessor of `segment` and `segment`,
/// spanning the quarter of the tube that starts at `start`.
///
/// With `p` the predecessor and `q = start.next()` the loop runs
///
/// ```text
/// p.start --small(p, start)--> p.q --big(segment, q)--> segment.q
///         --small(segment, start) reversed--> segment.start
///         --big(segment, start) reversed--> p.start
/// ```
///
/// Every arc ends up in exactly two lunes with opposite orientation:
/// `small(s, x)` forward in lune `(s+1, x)` and reversed in `(s, x)`;
/// `big(s, x)` reversed in lune `(s, x)` and forward in `(s, x.prev)`.
#[must_use]
pub fn lune_boundary(
    tags: &TagAllocator,
    torus: TorusSide,
    segment: u32,
    start: CirclePoint,
) -> [OrientedArc; 4] {
    let previous = tags.predecessor(segment);
    [
        OrientedArc::forward(tags.small_arc(torus, previous, start)),
        OrientedArc::forward(tags.big_arc(torus, segment, start.next())),
        OrientedArc::reversed(tags.small_arc(torus, segment, start)),
        OrientedArc::reversed(tags.big_arc(torus, segment, start)),
    ]
}
