use derive_more::Constructor;
use nalgebra::{point, vector, Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Tolerance used when checking whether one rectangle encloses another.
pub const CONTAINMENT_EPSILON: f32 = 0.001;

/// An axis-aligned rectangle defined by its top-left corner and a size.
///
/// Coordinates are in image pixels, but fractional values are allowed so that
/// an in-progress drag can give sub-pixel feedback. The size is never negative
/// for rectangles built through [`Rect::from_points`] or [`Rect::from_edges`].
#[derive(Constructor, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub position: Point2<f32>,
    pub size: Vector2<f32>,
}

impl Default for Rect {
    fn default() -> Self {
        Self::new(Point2::origin(), Vector2::zeros())
    }
}

impl Rect {
    #[inline]
    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(point![x, y], vector![width, height])
    }

    /// A rectangle spanned by two opposite corners in any order.
    pub fn from_points(a: Point2<f32>, b: Point2<f32>) -> Self {
        Self::new(
            point![a.x.min(b.x), a.y.min(b.y)],
            vector![(a.x - b.x).abs(), (a.y - b.y).abs()],
        )
    }

    pub fn from_edges(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self::from_xywh(left, top, (right - left).max(0.), (bottom - top).max(0.))
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.position.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.position.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.position.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.position.y + self.size.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    #[inline]
    pub fn end(&self) -> Point2<f32> {
        self.position + self.size
    }

    #[inline]
    pub fn area(&self) -> f32 {
        self.size.x * self.size.y
    }

    /// True when either side is zero or negative.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size.x <= 0. || self.size.y <= 0.
    }

    /// Half-open point test, matching how pixels are addressed.
    pub fn contains_point(&self, p: Point2<f32>) -> bool {
        p.x >= self.left() && p.x < self.right() && p.y >= self.top() && p.y < self.bottom()
    }

    /// Whether `inner` lies within `self` on all four sides, with
    /// [`CONTAINMENT_EPSILON`] slack.
    pub fn contains_rect(&self, inner: &Rect) -> bool {
        inner.left() + CONTAINMENT_EPSILON >= self.left()
            && inner.top() + CONTAINMENT_EPSILON >= self.top()
            && inner.right() <= self.right() + CONTAINMENT_EPSILON
            && inner.bottom() <= self.bottom() + CONTAINMENT_EPSILON
    }

    /// The overlapping area of two rectangles, or an empty rectangle at the
    /// origin when they do not overlap.
    pub fn intersection(&self, other: &Rect) -> Rect {
        let left = self.left().max(other.left());
        let top = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right <= left || bottom <= top {
            return Rect::default();
        }

        Rect::from_edges(left, top, right, bottom)
    }

    /// Rounds position and size to whole pixels.
    pub fn snapped(&self) -> Rect {
        Rect::new(
            self.position.map(|v| v.round()),
            self.size.map(|v| v.round()),
        )
    }

    /// Clamps the rectangle into `[0, bounds]` on both axes.
    pub fn clamped_to(&self, bounds: Vector2<f32>) -> Rect {
        let x = self.position.x.clamp(0., bounds.x);
        let y = self.position.y.clamp(0., bounds.y);
        let w = self.size.x.clamp(0., bounds.x - x);
        let h = self.size.y.clamp(0., bounds.y - y);
        Rect::from_xywh(x, y, w, h)
    }

    pub fn center(&self) -> Point2<f32> {
        self.position + self.size * 0.5
    }
}
