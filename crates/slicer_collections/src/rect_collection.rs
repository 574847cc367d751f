use derive_more::{Constructor, Display, From};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use slicer_geometry::Rect;

/// Largest id accepted from outside a session. Counters still saturate
/// rather than wrap should an id above it ever get in.
pub const MAX_SPRITE_ID: u32 = i32::MAX as u32;

/// Identifier of a sprite within a single editing session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Serialize, Deserialize,
)]
#[display(fmt = "#{}", _0)]
pub struct SpriteId(pub u32);

#[derive(Constructor, Debug, Clone, Copy, PartialEq)]
pub struct SpriteRecord {
    pub id: SpriteId,
    pub rect: Rect,
}

/// A deep copy of a [`RectCollection`] taken before a mutation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot(pub Vec<SpriteRecord>);

/// The authoritative list of sprite rectangles.
///
/// Records are kept in creation order and addressed either by slot index
/// (the order the user sees them in) or by id. Ids are handed out from a
/// counter that only grows, except when the whole collection is replaced or
/// restored from a snapshot, where the counter restarts at `max(id) + 1`.
#[derive(Debug, Default, Clone)]
pub struct RectCollection {
    records: IndexMap<SpriteId, Rect>,
    next_id: u32,
}

impl RectCollection {
    pub fn from_records(records: impl IntoIterator<Item = SpriteRecord>) -> Self {
        let mut collection = Self::default();
        collection.replace(records);
        collection
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The id the next pushed rectangle will receive.
    #[inline]
    pub fn next_id(&self) -> SpriteId {
        SpriteId(self.next_id)
    }

    pub fn get(&self, index: usize) -> Option<SpriteRecord> {
        self.records
            .get_index(index)
            .map(|(id, rect)| SpriteRecord::new(*id, *rect))
    }

    pub fn index_of(&self, id: SpriteId) -> Option<usize> {
        self.records.get_index_of(&id)
    }

    pub fn iter(
        &self,
    ) -> impl DoubleEndedIterator<Item = SpriteRecord> + ExactSizeIterator + '_ {
        self.records
            .iter()
            .map(|(id, rect)| SpriteRecord::new(*id, *rect))
    }

    pub fn rects(&self) -> Vec<Rect> {
        self.records.values().copied().collect()
    }

    pub fn records(&self) -> Vec<SpriteRecord> {
        self.iter().collect()
    }

    /// Appends a rectangle with a fresh id.
    pub fn push(&mut self, rect: Rect) -> SpriteId {
        let id = SpriteId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.records.insert(id, rect);
        id
    }

    /// Overwrites the rectangle at `index`. Returns false if there is none.
    pub fn set_rect(&mut self, index: usize, rect: Rect) -> bool {
        match self.records.get_index_mut(index) {
            Some((_, slot)) => {
                *slot = rect;
                true
            }
            None => false,
        }
    }

    /// Removes the record at `index`, keeping the order of the rest.
    pub fn remove(&mut self, index: usize) -> Option<SpriteRecord> {
        self.records
            .shift_remove_index(index)
            .map(|(id, rect)| SpriteRecord::new(id, rect))
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.next_id = 0;
    }

    /// Replaces the whole collection and restarts the id counter after the
    /// largest id present.
    ///
    /// A record whose id already appeared earlier in `records` is given a
    /// fresh id instead of overwriting its predecessor.
    pub fn replace(&mut self, records: impl IntoIterator<Item = SpriteRecord>) {
        self.records.clear();

        let mut duplicates = Vec::new();
        for record in records {
            if self.records.contains_key(&record.id) {
                duplicates.push(record.rect);
            } else {
                self.records.insert(record.id, record.rect);
            }
        }

        self.next_id = following_id(self.records.keys().copied());
        for rect in duplicates {
            self.push(rect);
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot(self.records())
    }

    pub fn restore(&mut self, snapshot: Snapshot) {
        self.replace(snapshot.0);
    }
}

/// Re-attaches ids to a list of rectangles that arrived without them.
///
/// Position `i` keeps the id of `existing[i]` while there is one; any
/// additional rectangles get sequential ids starting right after the largest
/// existing id.
pub fn reconcile_ids(existing: &[SpriteRecord], rects: &[Rect]) -> Vec<SpriteRecord> {
    let mut next_id = following_id(existing.iter().map(|r| r.id));

    rects
        .iter()
        .enumerate()
        .map(|(i, rect)| {
            let id = match existing.get(i) {
                Some(record) => record.id,
                None => {
                    let id = SpriteId(next_id);
                    next_id = next_id.saturating_add(1);
                    id
                }
            };
            SpriteRecord::new(id, *rect)
        })
        .collect()
}

/// `max(id) + 1`, or 0 for no ids.
fn following_id(ids: impl Iterator<Item = SpriteId>) -> u32 {
    ids.map(|id| id.0.saturating_add(1)).max().unwrap_or(0)
}
