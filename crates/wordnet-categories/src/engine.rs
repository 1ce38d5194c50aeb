use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use wordnet_db::WordNet;
use wordnet_types::{LemmaEntry, Pos, SynsetId};

use crate::categories::CategorySet;
use crate::roots::root_label;

/// Which classifier to run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Strategy {
    /// Lexicographer file of every sense (`noun.animal`, `verb.motion`, ...).
    #[default]
    Lexfile,
    /// Root categories reached by walking hypernyms upward.
    RootHypernym,
}

impl Strategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Lexfile => "lexfile",
            Strategy::RootHypernym => "root-hypernym",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown strategy {0:?} (expected lexfile or root-hypernym)")]
pub struct ParseStrategyError(String);

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lexfile" => Ok(Strategy::Lexfile),
            "root-hypernym" => Ok(Strategy::RootHypernym),
            _ => Err(ParseStrategyError(s.to_string())),
        }
    }
}

/// Read-only classifiers over a loaded [`WordNet`].
///
/// The engine holds only a shared borrow, so copies of it can classify from
/// many threads at once.
#[derive(Clone, Copy)]
pub struct CategoryEngine<'a> {
    wn: &'a WordNet,
}

impl<'a> CategoryEngine<'a> {
    pub fn new(wn: &'a WordNet) -> Self {
        Self { wn }
    }

    pub fn wordnet(&self) -> &'a WordNet {
        self.wn
    }

    /// Lexical-file labels over all senses of `lemma`. Unknown lemmas yield an
    /// empty set.
    pub fn classify_by_lexfile(&self, lemma: &str, pos: Pos) -> CategorySet {
        self.lexfile_labels(self.wn.synsets_for_lemma(pos, lemma))
    }

    /// Same as [`classify_by_lexfile`](Self::classify_by_lexfile) for an entry
    /// already in hand.
    pub fn classify_entry_by_lexfile(&self, entry: &LemmaEntry) -> CategorySet {
        self.lexfile_labels(&entry.senses)
    }

    /// Root categories reachable through hypernym links from any sense of
    /// `lemma`.
    ///
    /// Depth-first over an explicit stack. Each synset is expanded at most
    /// once per call, so cycles terminate; targets missing from the database
    /// are leaves and contribute nothing.
    pub fn classify_by_root_hypernym(&self, lemma: &str, pos: Pos) -> CategorySet {
        let senses = self.wn.synsets_for_lemma(pos, lemma);
        let mut out = CategorySet::new();
        let mut visited: HashSet<SynsetId> = HashSet::new();
        let mut stack: Vec<SynsetId> = senses.iter().rev().copied().collect();

        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            let Some(synset) = self.wn.get_synset(id) else {
                continue;
            };
            if let Some(label) = root_label(id) {
                out.insert(label);
            }
            // Reverse so the first hypernym is explored first.
            let start = stack.len();
            stack.extend(synset.hypernyms());
            stack[start..].reverse();
        }

        out
    }

    pub fn classify(&self, lemma: &str, pos: Pos, strategy: Strategy) -> CategorySet {
        match strategy {
            Strategy::Lexfile => self.classify_by_lexfile(lemma, pos),
            Strategy::RootHypernym => self.classify_by_root_hypernym(lemma, pos),
        }
    }

    /// Classify a word given the grammatical tag an external tagger assigned
    /// to it. Returns `None` when the tag has no WordNet part of speech.
    pub fn classify_tagged(
        &self,
        word: &str,
        tag: &str,
        strategy: Strategy,
    ) -> Option<(Pos, CategorySet)> {
        let pos = Pos::from_penn_tag(tag)?;
        Some((pos, self.classify(word, pos, strategy)))
    }

    fn lexfile_labels(&self, senses: &[SynsetId]) -> CategorySet {
        senses
            .iter()
            .filter_map(|id| self.wn.get_synset(*id))
            .map(|synset| synset.lexname())
            .collect()
    }
}
