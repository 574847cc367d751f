use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use slicer_assets::{
    document::SpriteDocument,
    png::{load_png, RgbaImage},
    AssetError,
};
use slicer_collections::{reconcile_ids, SpriteId, SpriteRecord};
use slicer_editor::{CoordinateMapping, EditEffect, EditSession, EditSettings};
use slicer_events::Events;
use slicer_extract::{extract, filter_contained, AlphaSource};
use slicer_geometry::Rect;
use slicer_input::InputEvent;

use crate::SlicerConfig;

/// Owns everything about one atlas being sliced: the image, the interactive
/// editor and the id-keyed sprite list that gets exported.
pub struct Slicer {
    config: SlicerConfig,
    atlas_path: Option<PathBuf>,
    image: Option<RgbaImage>,
    session: EditSession,
    sprites: Vec<SpriteRecord>,
}

impl Default for Slicer {
    fn default() -> Self {
        Self::new(SlicerConfig::default())
    }
}

impl Slicer {
    pub fn new(config: SlicerConfig) -> Self {
        let session = EditSession::new(EditSettings {
            enabled: config.enable_manual_selection,
            min_size: config.min_region_size.max(1) as f32,
            handle_pixels: config.handle_pixels,
        });

        Self {
            config,
            atlas_path: None,
            image: None,
            session,
            sprites: Vec::new(),
        }
    }

    pub fn config(&self) -> &SlicerConfig {
        &self.config
    }

    pub fn atlas_path(&self) -> Option<&Path> {
        self.atlas_path.as_deref()
    }

    pub fn image(&self) -> Option<&RgbaImage> {
        self.image.as_ref()
    }

    pub fn has_image(&self) -> bool {
        self.image.as_ref().map_or(false, |i| !i.is_empty())
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn sprites(&self) -> &[SpriteRecord] {
        &self.sprites
    }

    /// The session's rectangles as a renderer should draw them.
    pub fn display_rects(&self) -> Vec<Rect> {
        self.session
            .sprites()
            .iter()
            .map(|r| {
                if self.config.snap_preview_to_pixels {
                    r.rect.snapped()
                } else {
                    r.rect
                }
            })
            .collect()
    }

    pub fn load_image(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let image = load_png(path)
            .with_context(|| format!("failed to load atlas {}", path.display()))
            .map_err(|e| {
                log::error!("{e:#}");
                e
            })?;

        self.set_image(path, image);
        Ok(())
    }

    /// Switches to an already decoded atlas. Any previous slicing is dropped.
    pub fn set_image(&mut self, path: impl Into<PathBuf>, image: RgbaImage) {
        let path = path.into();
        log::info!(
            "loaded atlas {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );

        self.atlas_path = Some(path);
        self.image = Some(image);
        self.clear_preview();
    }

    /// Replaces the current sprites with the opaque regions of the atlas.
    /// Returns how many were found.
    pub fn auto_slice(&mut self) -> usize {
        let Some(image) = self.image.as_ref().filter(|i| !i.is_empty()) else {
            log::warn!("auto-slice requested without an image");
            return 0;
        };

        let config = &self.config;
        let mut rects = extract(
            image,
            config.alpha_threshold,
            config.min_region_area,
            config.min_region_size,
        );
        if config.filter_contained_rects {
            let before = rects.len();
            rects = filter_contained(&rects);
            log::debug!("dropped {} contained regions", before - rects.len());
        }

        log::info!("auto-slice found {} sprites", rects.len());
        self.preview_slices(&rects);
        rects.len()
    }

    /// Shows `rects` as the current slicing, numbered from zero.
    pub fn preview_slices(&mut self, rects: &[Rect]) {
        let records: Vec<_> = rects
            .iter()
            .enumerate()
            .map(|(i, rect)| SpriteRecord::new(SpriteId(i as u32), *rect))
            .collect();

        self.session.set_sprites(records.iter().copied());
        self.sprites = records;
    }

    pub fn clear_preview(&mut self) {
        self.session.clear();
        self.sprites.clear();
    }

    /// Feeds one input event to the editor. Whenever the editor commits a
    /// change, the exported sprite list is rebuilt from it.
    pub fn handle_input(
        &mut self,
        event: &InputEvent,
        mapping: Option<&dyn CoordinateMapping>,
    ) -> Events<EditEffect> {
        let mapping = mapping.filter(|_| self.has_image());
        let effects = self.session.update(event, mapping);

        for effect in effects.iter() {
            if let EditEffect::Changed(rects) = effect {
                self.sprites = reconcile_ids(&self.sprites, rects);
            }
        }

        effects
    }

    /// Writes the sprites as JSON and returns the path written, which gains
    /// a `.json` extension if `path` lacks one.
    pub fn export_json(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = path.as_ref();
        let atlas = self
            .atlas_path
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();

        let document = SpriteDocument::from_records(atlas, &self.sprites);
        let written = document.write(path).map_err(|e| {
            match e {
                AssetError::NothingToExport => log::warn!("nothing to export"),
                _ => log::error!("export to {} failed: {e}", path.display()),
            }
            anyhow::Error::from(e)
        })?;

        log::info!("exported {} sprites to {}", self.sprites.len(), written.display());
        Ok(written)
    }

    /// Loads a JSON document together with the atlas it points to. Nothing
    /// changes unless both load successfully.
    pub fn import_json(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let (atlas, image, document) = Self::read_document(path).map_err(|e| {
            log::error!("import of {} failed: {e:#}", path.display());
            e
        })?;

        self.atlas_path = Some(atlas);
        self.image = Some(image);
        self.session.set_sprites(document.to_records());
        self.sprites = self.session.sprites().records();

        log::info!("imported {} sprites from {}", self.sprites.len(), path.display());
        Ok(self.sprites.len())
    }

    fn read_document(path: &Path) -> Result<(PathBuf, RgbaImage, SpriteDocument)> {
        let document = SpriteDocument::read(path)?;

        let atlas = PathBuf::from(&document.atlas);
        if !atlas.is_file() {
            return Err(AssetError::AtlasNotFound(atlas).into());
        }
        let image = load_png(&atlas)?;

        Ok((atlas, image, document))
    }
}
