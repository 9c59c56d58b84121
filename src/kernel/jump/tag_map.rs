use compact_str::CompactString;
use rustc_hash::FxHashMap;

pub type Tag = CompactString;

/// Bijection between tag strings and document offsets.
///
/// Both directions are kept in sync; an insert that would make a tag or an
/// offset appear twice is refused.
#[derive(Debug, Clone, Default)]
pub struct TagMap {
    by_tag: FxHashMap<Tag, usize>,
    by_offset: FxHashMap<usize, Tag>,
}

impl TagMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            by_tag: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            by_offset: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    pub fn len(&self) -> usize {
        self.by_tag.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_tag.is_empty()
    }

    /// Returns false (and leaves the map untouched) if either side is taken.
    pub fn insert(&mut self, tag: Tag, offset: usize) -> bool {
        if self.by_tag.contains_key(&tag) || self.by_offset.contains_key(&offset) {
            return false;
        }
        self.by_offset.insert(offset, tag.clone());
        self.by_tag.insert(tag, offset);
        true
    }

    pub fn offset_of(&self, tag: &str) -> Option<usize> {
        self.by_tag.get(tag).copied()
    }

    pub fn tag_at(&self, offset: usize) -> Option<&Tag> {
        self.by_offset.get(&offset)
    }

    pub fn contains_tag(&self, tag: &str) -> bool {
        self.by_tag.contains_key(tag)
    }

    pub fn contains_offset(&self, offset: usize) -> bool {
        self.by_offset.contains_key(&offset)
    }

    pub fn clear(&mut self) {
        self.by_tag.clear();
        self.by_offset.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Tag, usize)> + '_ {
        self.by_tag.iter().map(|(tag, &offset)| (tag, offset))
    }

    /// Entries ordered by offset.
    pub fn sorted(&self) -> Vec<(Tag, usize)> {
        let mut entries: Vec<(Tag, usize)> = self
            .by_tag
            .iter()
            .map(|(tag, &offset)| (tag.clone(), offset))
            .collect();
        entries.sort_by_key(|(_, offset)| *offset);
        entries
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/jump/tag_map.rs"]
mod tests;
