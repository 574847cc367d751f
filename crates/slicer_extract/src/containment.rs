use slicer_geometry::Rect;

/// Drops every rectangle that lies entirely inside another rectangle of the
/// same list.
///
/// Containment is inclusive and tolerant to [`slicer_geometry::CONTAINMENT_EPSILON`].
/// A rectangle is never compared with itself, so two identical entries
/// contain each other and are both dropped.
pub fn filter_contained(rects: &[Rect]) -> Vec<Rect> {
    rects
        .iter()
        .enumerate()
        .filter(|&(i, inner)| {
            !rects
                .iter()
                .enumerate()
                .any(|(j, outer)| i != j && outer.contains_rect(inner))
        })
        .map(|(_, rect)| *rect)
        .collect()
}
