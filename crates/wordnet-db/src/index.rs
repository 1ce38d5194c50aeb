use std::collections::HashMap;
use std::ops::Range;

use wordnet_types::{LemmaEntry, Pos, Synset, SynsetId};

/// Synsets keyed by `(offset, pos)`.
#[derive(Debug, Default)]
pub struct SynsetIndex {
    synsets: HashMap<SynsetId, Synset>,
}

impl SynsetIndex {
    /// Insert a synset unless its id is already present. Returns `false` on a
    /// duplicate, leaving the first record in place.
    pub(crate) fn insert(&mut self, synset: Synset) -> bool {
        match self.synsets.entry(synset.id) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(synset);
                true
            }
        }
    }

    pub fn get(&self, id: SynsetId) -> Option<&Synset> {
        self.synsets.get(&id)
    }

    pub fn contains(&self, id: SynsetId) -> bool {
        self.synsets.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.synsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.synsets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Synset> + '_ {
        self.synsets.values()
    }
}

/// Lemma entries keyed by `(pos, normalized lemma)`, remembering file order.
///
/// Entries of one POS are stored contiguously in the order their lines
/// appeared in `index.<pos>`.
#[derive(Debug, Default)]
pub struct LemmaIndex {
    entries: Vec<LemmaEntry>,
    by_key: HashMap<(Pos, String), usize>,
    spans: HashMap<Pos, Range<usize>>,
}

impl LemmaIndex {
    /// Append all entries of one POS. A lemma repeated within the batch keeps
    /// its first entry; the number of dropped repeats is returned.
    pub(crate) fn extend_part(
        &mut self,
        pos: Pos,
        entries: impl IntoIterator<Item = LemmaEntry>,
    ) -> usize {
        let start = self.entries.len();
        let mut duplicates = 0;
        for entry in entries {
            let key = (pos, normalize_lemma(&entry.lemma));
            if self.by_key.contains_key(&key) {
                duplicates += 1;
                continue;
            }
            self.by_key.insert(key, self.entries.len());
            self.entries.push(entry);
        }
        self.spans.insert(pos, start..self.entries.len());
        duplicates
    }

    pub fn get(&self, pos: Pos, lemma: &str) -> Option<&LemmaEntry> {
        let key = (pos, normalize_lemma(lemma));
        self.by_key.get(&key).map(|&i| &self.entries[i])
    }

    /// Entries of one POS in file order, or an empty slice if not loaded.
    pub fn part(&self, pos: Pos) -> &[LemmaEntry] {
        self.spans
            .get(&pos)
            .map(|span| &self.entries[span.clone()])
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Canonical lookup key: trimmed, ASCII-lowercased, spaces as underscores.
pub fn normalize_lemma(text: &str) -> String {
    let mut s = text.trim().to_string();
    s.make_ascii_lowercase();
    s.replace(' ', "_")
}
