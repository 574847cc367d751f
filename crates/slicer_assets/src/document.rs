use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use slicer_collections::{SpriteId, SpriteRecord, MAX_SPRITE_ID};
use slicer_geometry::Rect;

use crate::AssetError;

/// One sprite as it is stored on disk, in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteEntry {
    pub id: u32,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl From<SpriteRecord> for SpriteEntry {
    /// Coordinates are truncated toward zero.
    fn from(record: SpriteRecord) -> Self {
        let rect = record.rect;
        Self {
            id: record.id.0,
            x: rect.left() as i32,
            y: rect.top() as i32,
            width: rect.width() as i32,
            height: rect.height() as i32,
        }
    }
}

impl From<SpriteEntry> for SpriteRecord {
    fn from(entry: SpriteEntry) -> Self {
        SpriteRecord::new(
            SpriteId(entry.id),
            Rect::from_xywh(
                entry.x as f32,
                entry.y as f32,
                entry.width as f32,
                entry.height as f32,
            ),
        )
    }
}

/// The exported slicing of an atlas: where the image lives and the ordered
/// list of its sprites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteDocument {
    pub atlas: String,
    pub sprites: Vec<SpriteEntry>,
}

impl SpriteDocument {
    pub fn from_records(atlas: impl Into<String>, records: &[SpriteRecord]) -> Self {
        Self {
            atlas: atlas.into(),
            sprites: records.iter().copied().map(SpriteEntry::from).collect(),
        }
    }

    pub fn to_records(&self) -> Vec<SpriteRecord> {
        self.sprites.iter().copied().map(SpriteRecord::from).collect()
    }

    /// Parses a document, rejecting sprites that could not have been
    /// exported: empty sizes and ids out of range.
    pub fn decode(json: &str) -> Result<Self, AssetError> {
        let document: Self = serde_json::from_str(json)?;
        document.validate()?;
        Ok(document)
    }

    fn validate(&self) -> Result<(), AssetError> {
        for (index, entry) in self.sprites.iter().enumerate() {
            let reason = if entry.width <= 0 || entry.height <= 0 {
                "width and height must be positive"
            } else if entry.id > MAX_SPRITE_ID {
                "id out of range"
            } else {
                continue;
            };
            return Err(AssetError::InvalidSprite { index, reason });
        }
        Ok(())
    }

    pub fn encode(&self) -> Result<String, AssetError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn read(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| AssetError::io(path, e))?;
        Self::decode(&json)
    }

    /// Writes the document, appending `.json` to `path` when it has another
    /// extension or none. Returns the path actually written.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<PathBuf, AssetError> {
        if self.sprites.is_empty() {
            return Err(AssetError::NothingToExport);
        }

        let path = with_json_extension(path.as_ref());
        let json = self.encode()?;
        std::fs::write(&path, json).map_err(|e| AssetError::io(&path, e))?;
        Ok(path)
    }
}

pub fn with_json_extension(path: &Path) -> PathBuf {
    let has_json = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));
    if has_json {
        return path.to_owned();
    }

    let mut name = OsString::from(path.as_os_str());
    name.push(".json");
    PathBuf::from(name)
}
