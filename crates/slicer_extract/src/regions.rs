use bitvec::prelude::*;
use slicer_geometry::Rect;

use crate::AlphaSource;

/// A 4-connected blob of foreground pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Component {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
    /// Number of foreground pixels in the blob, not the bounding box.
    pub pixels: u64,
}

impl Component {
    #[inline]
    pub fn width(&self) -> u32 {
        self.max_x - self.min_x + 1
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.max_y - self.min_y + 1
    }

    /// Area of the bounding box in pixels.
    #[inline]
    pub fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_xywh(
            self.min_x as f32,
            self.min_y as f32,
            self.width() as f32,
            self.height() as f32,
        )
    }
}

/// Finds every 4-connected component of pixels whose alpha is strictly above
/// `alpha_threshold`, in the order their first pixel is met by a row-major
/// scan.
pub fn components(image: &impl AlphaSource, alpha_threshold: f32) -> Vec<Component> {
    let width = image.width();
    let height = image.height();
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let mut visited = bitvec![0; width as usize * height as usize];
    let mut stack = Vec::new();
    let mut result = Vec::new();

    for y in 0..height {
        for x in 0..width {
            let index = y as usize * width as usize + x as usize;
            if visited[index] {
                continue;
            }

            if image.alpha(x, y) <= alpha_threshold {
                visited.set(index, true);
                continue;
            }

            result.push(flood_fill(
                image,
                (x, y),
                alpha_threshold,
                &mut visited,
                &mut stack,
            ));
        }
    }

    result
}

/// Walks one component with an explicit stack so that blobs covering the
/// whole image cannot overflow the call stack.
fn flood_fill(
    image: &impl AlphaSource,
    (start_x, start_y): (u32, u32),
    alpha_threshold: f32,
    visited: &mut BitVec,
    stack: &mut Vec<(u32, u32)>,
) -> Component {
    let width = image.width();
    let height = image.height();

    let mut component = Component {
        min_x: start_x,
        min_y: start_y,
        max_x: start_x,
        max_y: start_y,
        pixels: 0,
    };

    stack.clear();
    stack.push((start_x, start_y));

    while let Some((x, y)) = stack.pop() {
        let index = y as usize * width as usize + x as usize;
        if visited[index] {
            continue;
        }
        visited.set(index, true);

        if image.alpha(x, y) <= alpha_threshold {
            continue;
        }

        component.pixels += 1;
        component.min_x = component.min_x.min(x);
        component.min_y = component.min_y.min(y);
        component.max_x = component.max_x.max(x);
        component.max_y = component.max_y.max(y);

        if x + 1 < width {
            stack.push((x + 1, y));
        }
        if x > 0 {
            stack.push((x - 1, y));
        }
        if y + 1 < height {
            stack.push((x, y + 1));
        }
        if y > 0 {
            stack.push((x, y - 1));
        }
    }

    component
}

/// Bounding rectangles of the opaque blobs of an image.
///
/// A blob is kept only when its bounding box covers at least `min_area`
/// pixels and both of its sides are at least `min_side` pixels long.
/// Degenerate images produce an empty list.
pub fn extract(
    image: &impl AlphaSource,
    alpha_threshold: f32,
    min_area: u32,
    min_side: u32,
) -> Vec<Rect> {
    let found = components(image, alpha_threshold);
    let total = found.len();

    let rects: Vec<Rect> = found
        .into_iter()
        .filter(|c| c.area() >= min_area as u64 && c.width() >= min_side && c.height() >= min_side)
        .map(|c| c.bounds())
        .collect();

    log::debug!(
        "extracted {} regions from {}x{} image ({} components, {} below minimum size)",
        rects.len(),
        image.width(),
        image.height(),
        total,
        total - rects.len()
    );

    rects
}
