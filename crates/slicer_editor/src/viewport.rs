use derive_more::Constructor;
use nalgebra::{vector, Point2, Vector2};
use serde::{Deserialize, Serialize};
use slicer_geometry::Rect;
use strum::Display;

/// Maps widget-local coordinates onto image pixels.
///
/// The editor never assumes a 1:1 mapping: the image may be letterboxed,
/// stretched or cropped inside its widget, and an external camera may zoom
/// the whole widget.
pub trait CoordinateMapping {
    /// The area, in local space, the image is drawn into.
    fn draw_rect(&self) -> Rect;

    /// Image size in pixels.
    fn image_size(&self) -> Vector2<f32>;

    /// Zoom factor of the camera looking at the widget. Screen pixels per
    /// local unit.
    fn zoom(&self) -> f32 {
        1.
    }

    /// Local units per image pixel, per axis.
    fn draw_scale(&self) -> Vector2<f32> {
        let image = self.image_size();
        let draw = self.draw_rect();
        vector![draw.size.x / image.x, draw.size.y / image.y]
    }

    fn local_to_image(&self, local: Point2<f32>) -> Point2<f32> {
        let draw = self.draw_rect();
        let scale = self.draw_scale();
        Point2::from((local - draw.position).component_div(&scale))
    }

    fn image_to_local(&self, image: Point2<f32>) -> Point2<f32> {
        let draw = self.draw_rect();
        draw.position + image.coords.component_mul(&self.draw_scale())
    }

    /// Whether a local point falls on the drawn image.
    fn contains_local(&self, local: Point2<f32>) -> bool {
        self.draw_rect().contains_point(local)
    }

    /// Whether there is anything to map onto.
    fn has_image(&self) -> bool {
        let image = self.image_size();
        let draw = self.draw_rect();
        image.x > 0. && image.y > 0. && draw.size.x > 0. && draw.size.y > 0.
    }
}

/// How an image is fitted into its widget.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum StretchMode {
    /// Stretched to fill the widget, ignoring aspect ratio.
    #[default]
    Scale,
    /// Drawn as a repeating pattern; the editable area is the whole widget.
    Tile,
    /// Drawn at its own size at the top-left corner.
    Keep,
    /// Drawn at its own size in the middle of the widget.
    KeepCentered,
    /// Scaled to fit inside the widget, anchored top-left.
    KeepAspect,
    /// Scaled to fit inside the widget, centered.
    KeepAspectCentered,
    /// Scaled to cover the whole widget, anchored top-left.
    KeepAspectCovered,
}

/// A widget showing an image with a given stretch mode under an external
/// camera zoom.
#[derive(Constructor, Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub container: Vector2<f32>,
    pub image: Vector2<f32>,
    pub stretch: StretchMode,
    pub zoom: f32,
}

impl Viewport {
    /// A viewport where local coordinates are image pixels.
    pub fn identity(image: Vector2<f32>) -> Self {
        Self::new(image, image, StretchMode::Keep, 1.)
    }

    pub fn with_zoom(self, zoom: f32) -> Self {
        Self { zoom, ..self }
    }
}

impl CoordinateMapping for Viewport {
    fn draw_rect(&self) -> Rect {
        let container = self.container;
        let image = self.image;

        match self.stretch {
            StretchMode::Scale | StretchMode::Tile => Rect::new(Point2::origin(), container),
            StretchMode::Keep => Rect::new(Point2::origin(), image),
            StretchMode::KeepCentered => {
                Rect::new(Point2::from((container - image) * 0.5), image)
            }
            StretchMode::KeepAspect
            | StretchMode::KeepAspectCentered
            | StretchMode::KeepAspectCovered => {
                let ratio_x = container.x / image.x;
                let ratio_y = container.y / image.y;
                let scale = if self.stretch == StretchMode::KeepAspectCovered {
                    ratio_x.max(ratio_y)
                } else {
                    ratio_x.min(ratio_y)
                };

                let size = image * scale;
                let position = if self.stretch == StretchMode::KeepAspectCentered {
                    Point2::from((container - size) * 0.5)
                } else {
                    Point2::origin()
                };

                Rect::new(position, size)
            }
        }
    }

    fn image_size(&self) -> Vector2<f32> {
        self.image
    }

    fn zoom(&self) -> f32 {
        self.zoom
    }
}
