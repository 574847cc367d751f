mod config;
mod slicer;

pub use config::*;
pub use slicer::*;

pub use slicer_assets::{document, png, AssetError};
pub use slicer_collections::{SpriteId, SpriteRecord};
pub use slicer_editor::{CoordinateMapping, EditEffect, StretchMode, Viewport};
pub use slicer_geometry::Rect;
pub use slicer_input::InputEvent;
