use nalgebra::{point, Point2, Vector2};
use slicer_geometry::Rect;
use strum::{Display, EnumCount, EnumIter};

/// One of the eight grab zones around a selected rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumCount, EnumIter)]
pub enum Handle {
    TopLeft,
    Top,
    TopRight,
    Left,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

/// Pointer cursor hint for hovering a handle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum CursorShape {
    #[default]
    Arrow,
    /// Left-right arrows.
    Horizontal,
    /// Up-down arrows.
    Vertical,
    /// Top-left to bottom-right.
    DiagonalMain,
    /// Top-right to bottom-left.
    DiagonalAnti,
}

impl Handle {
    #[inline]
    pub fn moves_left(self) -> bool {
        matches!(self, Self::Left | Self::TopLeft | Self::BottomLeft)
    }

    #[inline]
    pub fn moves_right(self) -> bool {
        matches!(self, Self::Right | Self::TopRight | Self::BottomRight)
    }

    #[inline]
    pub fn moves_top(self) -> bool {
        matches!(self, Self::Top | Self::TopLeft | Self::TopRight)
    }

    #[inline]
    pub fn moves_bottom(self) -> bool {
        matches!(self, Self::Bottom | Self::BottomLeft | Self::BottomRight)
    }

    pub fn cursor(self) -> CursorShape {
        match self {
            Self::Left | Self::Right => CursorShape::Horizontal,
            Self::Top | Self::Bottom => CursorShape::Vertical,
            Self::TopLeft | Self::BottomRight => CursorShape::DiagonalMain,
            Self::TopRight | Self::BottomLeft => CursorShape::DiagonalAnti,
        }
    }

    /// Where the handle sits on `rect`, for renderers.
    pub fn anchor(self, rect: &Rect) -> Point2<f32> {
        let center = rect.center();
        let x = if self.moves_left() {
            rect.left()
        } else if self.moves_right() {
            rect.right()
        } else {
            center.x
        };
        let y = if self.moves_top() {
            rect.top()
        } else if self.moves_bottom() {
            rect.bottom()
        } else {
            center.y
        };
        point![x, y]
    }
}

/// Finds the handle of `rect` under `point`, if any.
///
/// `tolerance` is the half-width of a handle zone per axis, in the same space
/// as `rect`. Corners win over edges when both are in reach.
pub fn hit_handle(rect: &Rect, point: Point2<f32>, tolerance: Vector2<f32>) -> Option<Handle> {
    let within_x = point.x >= rect.left() - tolerance.x && point.x <= rect.right() + tolerance.x;
    let within_y = point.y >= rect.top() - tolerance.y && point.y <= rect.bottom() + tolerance.y;
    if !within_x || !within_y {
        return None;
    }

    let near_left = (point.x - rect.left()).abs() <= tolerance.x;
    let near_right = (point.x - rect.right()).abs() <= tolerance.x;
    let near_top = (point.y - rect.top()).abs() <= tolerance.y;
    let near_bottom = (point.y - rect.bottom()).abs() <= tolerance.y;

    match (near_left, near_right, near_top, near_bottom) {
        (true, _, true, _) => Some(Handle::TopLeft),
        (_, true, true, _) => Some(Handle::TopRight),
        (true, _, _, true) => Some(Handle::BottomLeft),
        (_, true, _, true) => Some(Handle::BottomRight),
        (true, ..) => Some(Handle::Left),
        (_, true, ..) => Some(Handle::Right),
        (_, _, true, _) => Some(Handle::Top),
        (.., true) => Some(Handle::Bottom),
        _ => None,
    }
}

/// Moves the edges `handle` controls to `point`, keeping the others where
/// they are in `start`.
///
/// A moved edge never gets closer than `min_size` to the edge opposite it, so
/// dragging past the opposite side pins the rectangle at its minimum size
/// instead of flipping it.
pub fn apply_resize(start: &Rect, point: Point2<f32>, handle: Handle, min_size: f32) -> Rect {
    let mut left = start.left();
    let mut top = start.top();
    let mut right = start.right();
    let mut bottom = start.bottom();

    if handle.moves_left() {
        left = point.x.min(right - min_size);
    }
    if handle.moves_right() {
        right = point.x.max(left + min_size);
    }
    if handle.moves_top() {
        top = point.y.min(bottom - min_size);
    }
    if handle.moves_bottom() {
        bottom = point.y.max(top + min_size);
    }

    Rect::from_edges(left, top, right, bottom)
}
