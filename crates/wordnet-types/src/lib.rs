//! Shared types that mirror WordNet's dictionary format.
//!
//! Records here are owned: the loader parses `data.*`/`index.*` once and the
//! resulting [`Synset`]s and [`LemmaEntry`]s live as long as the database.
//! Numeric fields keep their raw representation (`offset`, `lex_filenum`,
//! `ss_type`), so out-of-range values from the files survive parsing and are
//! resolved at lookup time.
//!
//! Use [`Pos`] and [`SynsetId`] to key into a database, [`Synset`] and
//! [`LemmaEntry`] to inspect parsed records, and [`lexname`] to turn a
//! lexicographer file number into its category label.
//!
//! ```rust
//! use wordnet_types::{Pos, SynsetId, lexname};
//!
//! let pos = Pos::from_char('n').unwrap();
//! let id = SynsetId { pos, offset: 1740 };
//! assert_eq!(id.pos, Pos::Noun);
//! assert_eq!(lexname(5), "noun.animal");
//! assert_eq!(lexname(99), "UNKNOWN(99)");
//! ```

use std::fmt;

mod lexname;

pub use lexname::{LEXNAMES, lexname};

/// Pointer symbol marking a hypernym ("is-a") relation.
pub const HYPERNYM: &str = "@";

/// Part-of-speech marker as used by WordNet files (`n`, `v`, `a`/`s`, `r`).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Pos {
    Noun,
    Verb,
    Adj,
    Adv,
}

impl Pos {
    /// Every POS in the conventional file order.
    pub const ALL: [Pos; 4] = [Pos::Noun, Pos::Verb, Pos::Adj, Pos::Adv];

    /// Parse a WordNet POS character into an enum.
    ///
    /// Adjective satellites (`s`) fold into [`Pos::Adj`].
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'n' => Some(Pos::Noun),
            'v' => Some(Pos::Verb),
            'a' | 's' => Some(Pos::Adj),
            'r' => Some(Pos::Adv),
            _ => None,
        }
    }

    /// Emit the POS character used in `index.*`/`data.*`.
    pub fn to_char(self) -> char {
        match self {
            Pos::Noun => 'n',
            Pos::Verb => 'v',
            Pos::Adj => 'a',
            Pos::Adv => 'r',
        }
    }

    /// Parse a long (`noun`, `adjective`) or short (`n`, `s`) POS name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "noun" | "n" => Some(Pos::Noun),
            "verb" | "v" => Some(Pos::Verb),
            "adj" | "adjective" | "a" | "s" => Some(Pos::Adj),
            "adv" | "adverb" | "r" => Some(Pos::Adv),
            _ => None,
        }
    }

    /// Map a Penn Treebank tag (`NNS`, `VBD`, `JJR`, `RB`, ...) to a POS.
    ///
    /// Tags with no WordNet counterpart (determiners, pronouns, particles)
    /// return `None`.
    pub fn from_penn_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        if tag.starts_with("NN") {
            Some(Pos::Noun)
        } else if tag.starts_with("VB") {
            Some(Pos::Verb)
        } else if tag.starts_with("JJ") {
            Some(Pos::Adj)
        } else if tag.starts_with("RB") {
            Some(Pos::Adv)
        } else {
            None
        }
    }

    /// Suffix of the `data.*`/`index.*` file holding this POS.
    pub fn file_suffix(self) -> &'static str {
        match self {
            Pos::Noun => "noun",
            Pos::Verb => "verb",
            Pos::Adj => "adj",
            Pos::Adv => "adv",
        }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_suffix())
    }
}

/// `(offset, pos)` pair uniquely identifying a synset within the WordNet files.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct SynsetId {
    pub pos: Pos,
    pub offset: u32,
}

impl fmt::Display for SynsetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08}-{}", self.offset, self.pos.to_char())
    }
}

/// Raw `ss_type` marker from `data.*`, including adjective satellites.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum SynsetType {
    Noun,
    Verb,
    Adj,
    Adv,
    AdjSatellite,
}

impl SynsetType {
    /// Parse the `ss_type` character from a data line.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'n' => Some(SynsetType::Noun),
            'v' => Some(SynsetType::Verb),
            'a' => Some(SynsetType::Adj),
            's' => Some(SynsetType::AdjSatellite),
            'r' => Some(SynsetType::Adv),
            _ => None,
        }
    }
}

/// Typed link from one synset to another (`p_cnt` section of a data line).
///
/// The target is not guaranteed to exist in the loaded database.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Relation {
    pub symbol: String,
    pub target: SynsetId,
}

impl Relation {
    pub fn is_hypernym(&self) -> bool {
        self.symbol == HYPERNYM
    }
}

/// Word-sense record parsed from one `data.*` line.
#[derive(Clone, Debug)]
pub struct Synset {
    pub id: SynsetId,
    pub lex_filenum: u32,
    pub synset_type: SynsetType,
    pub words: Vec<String>,
    pub relations: Vec<Relation>,
    pub gloss: String,
}

impl Synset {
    /// Lexical-file category label, `UNKNOWN(n)` when out of range.
    pub fn lexname(&self) -> std::borrow::Cow<'static, str> {
        lexname(self.lex_filenum)
    }

    /// Targets of the synset's hypernym relations, in source order.
    pub fn hypernyms(&self) -> impl Iterator<Item = SynsetId> + '_ {
        self.relations
            .iter()
            .filter(|r| r.is_hypernym())
            .map(|r| r.target)
    }
}

/// Lemma record from `index.*`: the senses of one word under one POS.
///
/// `senses` keeps file order, so the first entry is the most common sense.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LemmaEntry {
    pub lemma: String,
    pub pos: Pos,
    pub senses: Vec<SynsetId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn satellites_fold_into_adjectives() {
        assert_eq!(Pos::from_char('s'), Some(Pos::Adj));
        assert_eq!(SynsetType::from_char('s'), Some(SynsetType::AdjSatellite));
        assert_eq!(Pos::from_char('x'), None);
    }

    #[test]
    fn penn_tags_map_to_wordnet_pos() {
        assert_eq!(Pos::from_penn_tag("NNP"), Some(Pos::Noun));
        assert_eq!(Pos::from_penn_tag("VBG"), Some(Pos::Verb));
        assert_eq!(Pos::from_penn_tag("JJS"), Some(Pos::Adj));
        assert_eq!(Pos::from_penn_tag("RB"), Some(Pos::Adv));
        assert_eq!(Pos::from_penn_tag("DT"), None);
        assert_eq!(Pos::from_penn_tag("WRB"), None);
    }

    #[test]
    fn pos_names_accept_long_and_short_forms() {
        assert_eq!(Pos::from_name("Noun"), Some(Pos::Noun));
        assert_eq!(Pos::from_name("adjective"), Some(Pos::Adj));
        assert_eq!(Pos::from_name("r"), Some(Pos::Adv));
        assert_eq!(Pos::from_name("pronoun"), None);
    }

    #[test]
    fn hypernyms_filter_by_symbol() {
        let target = |offset| SynsetId {
            pos: Pos::Noun,
            offset,
        };
        let syn = Synset {
            id: target(1),
            lex_filenum: 5,
            synset_type: SynsetType::Noun,
            words: vec!["dog".into()],
            relations: vec![
                Relation {
                    symbol: "@".into(),
                    target: target(2),
                },
                Relation {
                    symbol: "~".into(),
                    target: target(3),
                },
                Relation {
                    symbol: "@".into(),
                    target: target(4),
                },
            ],
            gloss: String::new(),
        };
        assert_eq!(syn.hypernyms().collect::<Vec<_>>(), vec![target(2), target(4)]);
        assert_eq!(syn.lexname(), "noun.animal");
    }

    #[test]
    fn synset_id_displays_padded_offset() {
        let id = SynsetId {
            pos: Pos::Verb,
            offset: 2500,
        };
        assert_eq!(id.to_string(), "00002500-v");
    }
}
