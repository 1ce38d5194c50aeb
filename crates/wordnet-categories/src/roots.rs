use wordnet_types::{Pos, SynsetId};

/// Noun synsets (WordNet 3.0 offsets) that end a hypernym closure, with the
/// label reported for each.
pub const ROOT_CATEGORIES: [(u32, &str); 11] = [
    (1740, "Entity"),
    (1930, "Physical"),
    (2137, "Abstraction"),
    (4475, "Organism"),
    (7846, "Person"),
    (21265, "Food"),
    (21939, "Artifact"),
    (27167, "Place"),
    (29378, "Event"),
    (30358, "Act"),
    (31264, "Group"),
];

/// Root label for a synset, if it is one of [`ROOT_CATEGORIES`].
pub fn root_label(id: SynsetId) -> Option<&'static str> {
    if id.pos != Pos::Noun {
        return None;
    }
    ROOT_CATEGORIES
        .iter()
        .find(|(offset, _)| *offset == id.offset)
        .map(|(_, label)| *label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roots_are_noun_only() {
        let entity = SynsetId {
            pos: Pos::Noun,
            offset: 1740,
        };
        assert_eq!(root_label(entity), Some("Entity"));
        assert_eq!(
            root_label(SynsetId {
                pos: Pos::Adj,
                ..entity
            }),
            None
        );
        assert_eq!(
            root_label(SynsetId {
                pos: Pos::Noun,
                offset: 27167,
            }),
            Some("Place")
        );
    }

    #[test]
    fn offsets_are_unique() {
        let mut offsets: Vec<u32> = ROOT_CATEGORIES.iter().map(|(o, _)| *o).collect();
        offsets.sort_unstable();
        offsets.dedup();
        assert_eq!(offsets.len(), ROOT_CATEGORIES.len());
    }
}
