use std::collections::HashMap;
use std::fmt::Write as _;
use std::fs;

use tempfile::TempDir;
use wordnet_db::{LoadMode, WordNet};
use wordnet_types::Pos;

/// Writes a throwaway WordNet directory line by line.
#[derive(Default)]
pub(crate) struct DbBuilder {
    data: HashMap<Pos, Vec<String>>,
    index: HashMap<Pos, Vec<String>>,
}

impl DbBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Synset whose single word is `w<offset>`; relations are
    /// `(symbol, target offset, target pos char)`.
    pub(crate) fn synset(
        mut self,
        pos: Pos,
        offset: u32,
        lex_filenum: u32,
        relations: &[(&str, u32, char)],
    ) -> Self {
        let mut line = format!(
            "{offset:08} {lex_filenum:02} {} 01 w{offset} 0 {:03}",
            pos.to_char(),
            relations.len()
        );
        for (symbol, target, target_pos) in relations {
            write!(line, " {symbol} {target:08} {target_pos} 0000").unwrap();
        }
        line.push_str(" | generated synset");
        self.data.entry(pos).or_default().push(line);
        self
    }

    pub(crate) fn lemma(mut self, pos: Pos, lemma: &str, offsets: &[u32]) -> Self {
        let mut line = format!(
            "{lemma} {} {} 0 {} 0",
            pos.to_char(),
            offsets.len(),
            offsets.len()
        );
        for offset in offsets {
            write!(line, " {offset:08}").unwrap();
        }
        self.index.entry(pos).or_default().push(line);
        self
    }

    pub(crate) fn build(self) -> (TempDir, WordNet) {
        let dir = tempfile::tempdir().unwrap();
        for pos in Pos::ALL {
            let suffix = pos.file_suffix();
            let data = self.data.get(&pos).map(|l| l.join("\n")).unwrap_or_default();
            let index = self.index.get(&pos).map(|l| l.join("\n")).unwrap_or_default();
            fs::write(dir.path().join(format!("data.{suffix}")), data + "\n").unwrap();
            fs::write(dir.path().join(format!("index.{suffix}")), index + "\n").unwrap();
        }
        let wn = WordNet::load_with_mode(dir.path(), LoadMode::Owned).unwrap();
        (dir, wn)
    }
}
