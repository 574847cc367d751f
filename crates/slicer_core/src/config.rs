use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

/// Tuning knobs for automatic slicing and manual editing.
///
/// Every field is optional in YAML; missing ones keep their defaults.
#[derive(SmartDefault, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlicerConfig {
    /// Pixels with alpha at or below this value count as background.
    #[default(0.1)]
    pub alpha_threshold: f32,
    /// Smallest bounding box area, in pixels, an extracted region may have.
    #[default(4)]
    pub min_region_area: u32,
    /// Smallest side length, in pixels, of an extracted region. Also the
    /// smallest size of a hand-drawn rectangle.
    #[default(1)]
    pub min_region_size: u32,
    /// Drop extracted regions that lie entirely inside another one.
    #[default(true)]
    pub filter_contained_rects: bool,
    #[default(true)]
    pub enable_manual_selection: bool,
    /// Round rectangles to whole pixels when handing them to a renderer.
    #[default(true)]
    pub snap_preview_to_pixels: bool,
    /// Size of a resize handle in screen pixels.
    #[default(4.)]
    pub handle_pixels: f32,
}

impl SlicerConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_yaml(&yaml).with_context(|| format!("invalid config {}", path.display()))
    }
}
