//! Load WordNet dictionaries into immutable in-memory indices.
//!
//! This crate ingests the canonical `data.*`/`index.*` files and builds a
//! [`SynsetIndex`] (`(offset, pos)` → [`Synset`]) and a [`LemmaIndex`]
//! (`(lemma, pos)` → ordered senses). Callers choose between memory-mapped
//! files or owned buffers at runtime via [`LoadMode`]; either way the parsed
//! records are owned and the file buffers are released once loading ends.
//!
//! Public access is read-only (no `pub` fields, no mutation after load), so a
//! loaded [`WordNet`] can be shared across threads freely.
//!
//! # Parsing
//! - Blank lines and lines starting with whitespace (license header,
//!   continuations) are ignored.
//! - A line with too few fields or a non-numeric field where a number is
//!   required is skipped and counted in [`LoadStats`]; loading continues.
//! - Relation targets are recorded as-is, whether or not they exist.
//!
//! # Example
//! ```no_run
//! use wordnet_db::{LoadMode, WordNet};
//! use wordnet_types::Pos;
//!
//! # fn main() -> Result<(), wordnet_db::LoadError> {
//! let wn = WordNet::load_with_mode("/path/to/wordnet", LoadMode::Mmap)?;
//! for sid in wn.synsets_for_lemma(Pos::Noun, "dog") {
//!     let syn = wn.get_synset(*sid).unwrap();
//!     println!("{}: {}", syn.id, syn.lexname());
//! }
//! # Ok(()) }
//! ```
//!
//! For a runnable demo, see `cargo run -p wordnet-db --example stats -- <dict>`.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use memmap2::Mmap;
use thiserror::Error;
use tracing::{debug, info};
use wordnet_types::{LemmaEntry, Pos, Relation, Synset, SynsetId, SynsetType};

mod index;

pub use index::{LemmaIndex, SynsetIndex, normalize_lemma};

/// Strategy for loading dictionary files.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LoadMode {
    /// Memory-map each WordNet file (fast, no upfront copy).
    Mmap,
    /// Read each file into an owned buffer (portable fallback).
    Owned,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("wordnet database unavailable at {}: {source}", path.display())]
    DatabaseUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LoadError {
    fn unavailable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        LoadError::DatabaseUnavailable {
            path: path.into(),
            source,
        }
    }
}

enum Buffer {
    Mmap(Mmap),
    Owned(Vec<u8>),
}

impl Buffer {
    fn as_slice(&self) -> &[u8] {
        match self {
            Buffer::Mmap(m) => m.as_ref(),
            Buffer::Owned(v) => v.as_slice(),
        }
    }
}

/// Per-POS parse counters.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PartStats {
    pub synsets: usize,
    pub skipped_data_lines: usize,
    pub lemmas: usize,
    pub skipped_index_lines: usize,
}

/// Parse counters for every loaded POS.
#[derive(Clone, Debug, Default)]
pub struct LoadStats {
    parts: HashMap<Pos, PartStats>,
}

impl LoadStats {
    pub fn part(&self, pos: Pos) -> Option<&PartStats> {
        self.parts.get(&pos)
    }

    pub fn skipped_lines(&self) -> usize {
        self.parts
            .values()
            .map(|p| p.skipped_data_lines + p.skipped_index_lines)
            .sum()
    }
}

/// In-memory view of a WordNet dictionary.
pub struct WordNet {
    synsets: SynsetIndex,
    lemmas: LemmaIndex,
    parts: Vec<Pos>,
    stats: LoadStats,
}

impl WordNet {
    /// Load every POS from a directory containing `data.*` and `index.*`.
    ///
    /// Defaults to memory-mapping the source files. Use [`load_with_mode`] to
    /// force owned buffers instead.
    ///
    /// [`load_with_mode`]: WordNet::load_with_mode
    pub fn load(dict_dir: impl AsRef<Path>) -> Result<Self, LoadError> {
        Self::load_with_mode(dict_dir, LoadMode::Mmap)
    }

    /// Load every POS choosing between mmap and owned buffers at runtime.
    pub fn load_with_mode(dict_dir: impl AsRef<Path>, mode: LoadMode) -> Result<Self, LoadError> {
        Self::load_parts(dict_dir, &Pos::ALL, mode)
    }

    /// Load only the requested parts of speech.
    ///
    /// Each requested POS needs both `data.<pos>` and `index.<pos>`; a missing
    /// or unreadable file fails the whole load.
    pub fn load_parts(
        dict_dir: impl AsRef<Path>,
        parts: &[Pos],
        mode: LoadMode,
    ) -> Result<Self, LoadError> {
        let dir = dict_dir.as_ref();
        if !dir.is_dir() {
            return Err(LoadError::unavailable(
                dir,
                io::Error::new(io::ErrorKind::NotFound, "not a directory"),
            ));
        }

        let mut wn = WordNet {
            synsets: SynsetIndex::default(),
            lemmas: LemmaIndex::default(),
            parts: Vec::with_capacity(parts.len()),
            stats: LoadStats::default(),
        };

        for &pos in parts {
            if wn.parts.contains(&pos) {
                continue;
            }
            let data = load_file(dir.join(format!("data.{}", pos.file_suffix())), mode)?;
            let index = load_file(dir.join(format!("index.{}", pos.file_suffix())), mode)?;

            let mut stats = PartStats::default();
            let (synsets, skipped) = parse_data(data.as_slice(), pos, &mut wn.synsets);
            stats.synsets = synsets;
            stats.skipped_data_lines = skipped;

            let (entries, skipped) = parse_index(index.as_slice(), pos);
            let duplicates = wn.lemmas.extend_part(pos, entries);
            stats.lemmas = wn.lemmas.part(pos).len();
            stats.skipped_index_lines = skipped + duplicates;

            info!(
                "loaded {pos}: {} synsets, {} lemmas ({} data / {} index lines skipped)",
                stats.synsets, stats.lemmas, stats.skipped_data_lines, stats.skipped_index_lines
            );
            wn.stats.parts.insert(pos, stats);
            wn.parts.push(pos);
        }

        Ok(wn)
    }

    /// Check whether a lemma exists for the given POS according to index files.
    pub fn lemma_exists(&self, pos: Pos, lemma: &str) -> bool {
        self.lemmas.get(pos, lemma).is_some()
    }

    /// Fetch the index entry for a lemma if present.
    pub fn lemma_entry(&self, pos: Pos, lemma: &str) -> Option<&LemmaEntry> {
        self.lemmas.get(pos, lemma)
    }

    /// Return the synsets associated with a lemma, or an empty slice.
    pub fn synsets_for_lemma(&self, pos: Pos, lemma: &str) -> &[SynsetId] {
        self.lemmas
            .get(pos, lemma)
            .map(|e| e.senses.as_slice())
            .unwrap_or(&[])
    }

    /// Fetch a `Synset` by id if loaded.
    pub fn get_synset(&self, id: SynsetId) -> Option<&Synset> {
        self.synsets.get(id)
    }

    /// Lemma entries of one POS in `index.<pos>` line order.
    pub fn lemmas(&self, pos: Pos) -> &[LemmaEntry] {
        self.lemmas.part(pos)
    }

    /// Iterate over all loaded synsets.
    pub fn iter_synsets(&self) -> impl Iterator<Item = &Synset> + '_ {
        self.synsets.iter()
    }

    pub fn synset_index(&self) -> &SynsetIndex {
        &self.synsets
    }

    pub fn lemma_index(&self) -> &LemmaIndex {
        &self.lemmas
    }

    /// Number of synsets.
    pub fn synset_count(&self) -> usize {
        self.synsets.len()
    }

    /// Number of lemmas tracked across all parts of speech.
    pub fn lemma_count(&self) -> usize {
        self.lemmas.len()
    }

    /// Parts of speech loaded, in load order.
    pub fn loaded_parts(&self) -> &[Pos] {
        &self.parts
    }

    pub fn stats(&self) -> &LoadStats {
        &self.stats
    }
}

fn load_file(path: PathBuf, mode: LoadMode) -> Result<Buffer, LoadError> {
    let mut file = match File::open(&path) {
        Ok(file) => file,
        Err(err) => return Err(LoadError::unavailable(path, err)),
    };
    match mode {
        LoadMode::Mmap => match unsafe { Mmap::map(&file) } {
            Ok(map) => Ok(Buffer::Mmap(map)),
            Err(err) => Err(LoadError::unavailable(path, err)),
        },
        LoadMode::Owned => {
            let mut buf = Vec::new();
            match file.read_to_end(&mut buf) {
                Ok(_) => Ok(Buffer::Owned(buf)),
                Err(err) => Err(LoadError::unavailable(path, err)),
            }
        }
    }
}

/// Parse `data.<pos>` into `synsets`. Returns `(inserted, skipped)`.
fn parse_data(bytes: &[u8], pos: Pos, synsets: &mut SynsetIndex) -> (usize, usize) {
    let mut inserted = 0;
    let mut skipped = 0;
    for (lineno, line) in record_lines(bytes) {
        match parse_data_line(line, pos) {
            Some(synset) => {
                if synsets.insert(synset) {
                    inserted += 1;
                } else {
                    debug!("data.{pos}:{} duplicate offset", lineno + 1);
                    skipped += 1;
                }
            }
            None => {
                debug!("data.{pos}:{} malformed data line", lineno + 1);
                skipped += 1;
            }
        }
    }
    (inserted, skipped)
}

/// Parse `index.<pos>` into entries in file order. Returns `(entries, skipped)`.
fn parse_index(bytes: &[u8], pos: Pos) -> (Vec<LemmaEntry>, usize) {
    let mut entries = Vec::new();
    let mut skipped = 0;
    for (lineno, line) in record_lines(bytes) {
        match parse_index_line(line, pos) {
            Some(entry) => entries.push(entry),
            None => {
                debug!("index.{pos}:{} malformed index line", lineno + 1);
                skipped += 1;
            }
        }
    }
    (entries, skipped)
}

/// Non-blank, non-indented lines with their zero-based line numbers.
///
/// Lines that are not valid UTF-8 come through as `None`.
fn record_lines(bytes: &[u8]) -> impl Iterator<Item = (usize, Option<&str>)> {
    bytes
        .split(|b| *b == b'\n')
        .map(strip_cr)
        .enumerate()
        .filter(|(_, line)| !line.is_empty() && !matches!(line.first(), Some(b' ' | b'\t')))
        .map(|(lineno, line)| (lineno, std::str::from_utf8(line).ok()))
}

/// `offset lex_filenum ss_type w_cnt [word lex_id]* p_cnt [sym offset pos st]* ... | gloss`
fn parse_data_line(line: Option<&str>, pos: Pos) -> Option<Synset> {
    let line = line?;
    let (left, gloss) = match line.split_once('|') {
        Some((l, r)) => (l, r.trim()),
        None => (line, ""),
    };

    let tokens: Vec<&str> = left.split_ascii_whitespace().collect();
    if tokens.len() < 5 {
        return None;
    }

    let offset: u32 = tokens[0].parse().ok()?;
    let lex_filenum: u32 = tokens[1].parse().ok()?;
    let synset_type = tokens[2].chars().next().and_then(SynsetType::from_char)?;
    let w_cnt = usize::from_str_radix(tokens[3], 16).ok()?;

    let mut idx = 4;
    let words_end = w_cnt.checked_mul(2)?.checked_add(idx)?;
    let words = tokens
        .get(idx..words_end)?
        .chunks_exact(2)
        .map(|pair| pair[0].to_string())
        .collect();
    idx = words_end;

    let p_cnt: usize = tokens.get(idx)?.parse().ok()?;
    idx += 1;
    let relations_end = p_cnt.checked_mul(4)?.checked_add(idx)?;
    let relations = tokens
        .get(idx..relations_end)?
        .chunks_exact(4)
        .filter_map(|ptr| {
            let target = ptr[1].parse::<u32>().ok().zip(
                ptr[2].chars().next().and_then(Pos::from_char),
            );
            let Some((offset, target_pos)) = target else {
                debug!(
                    "synset {}-{}: dropped pointer {} {} {}",
                    tokens[0],
                    pos.to_char(),
                    ptr[0],
                    ptr[1],
                    ptr[2]
                );
                return None;
            };
            Some(Relation {
                symbol: ptr[0].to_string(),
                target: SynsetId {
                    pos: target_pos,
                    offset,
                },
            })
        })
        .collect();

    Some(Synset {
        id: SynsetId { pos, offset },
        lex_filenum,
        synset_type,
        words,
        relations,
        gloss: gloss.to_string(),
    })
}

/// `lemma pos synset_cnt p_cnt [ptr_symbol]* sense_cnt tagsense_cnt [offset]{synset_cnt}`
fn parse_index_line(line: Option<&str>, pos: Pos) -> Option<LemmaEntry> {
    let tokens: Vec<&str> = line?.split_ascii_whitespace().collect();
    if tokens.len() < 6 {
        return None;
    }
    let synset_cnt: usize = tokens[2].parse().ok()?;
    if tokens.len() < synset_cnt.checked_add(6)? {
        return None;
    }

    let senses = tokens[tokens.len() - synset_cnt..]
        .iter()
        .map(|t| t.parse::<u32>().ok().map(|offset| SynsetId { pos, offset }))
        .collect::<Option<Vec<_>>>()?;

    Some(LemmaEntry {
        lemma: tokens[0].to_string(),
        pos,
        senses,
    })
}

fn strip_cr(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\r").unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_data_line_relations_and_gloss() {
        let line = "02084071 05 n 02 dog 0 domestic_dog 0 002 @ 02083346 n 0000 ~ 01322604 n 0000 | a member of the genus Canis";
        let syn = parse_data_line(Some(line), Pos::Noun).expect("parsed");
        assert_eq!(syn.id.offset, 2084071);
        assert_eq!(syn.lex_filenum, 5);
        assert_eq!(syn.words, vec!["dog", "domestic_dog"]);
        assert_eq!(syn.relations.len(), 2);
        assert_eq!(syn.relations[0].symbol, "@");
        assert_eq!(syn.relations[0].target.offset, 2083346);
        assert_eq!(syn.gloss, "a member of the genus Canis");
    }

    #[test]
    fn satellite_targets_fold_to_adjective() {
        let line = "00001740 00 s 01 able 0 001 & 00002098 s 0000 | having skill";
        let syn = parse_data_line(Some(line), Pos::Adj).expect("parsed");
        assert_eq!(syn.synset_type, SynsetType::AdjSatellite);
        assert_eq!(syn.relations[0].target.pos, Pos::Adj);
    }

    #[test]
    fn rejects_truncated_or_non_numeric_data_lines() {
        assert!(parse_data_line(Some("00001740 03 n"), Pos::Noun).is_none());
        assert!(parse_data_line(Some("xx 03 n 01 entity 0 000 | gloss"), Pos::Noun).is_none());
        assert!(
            parse_data_line(Some("00001740 03 n 01 entity 0 002 @ 1 n 0000 | short"), Pos::Noun)
                .is_none()
        );
        assert!(parse_data_line(None, Pos::Noun).is_none());
    }

    #[test]
    fn wide_lex_filenum_resolves_to_unknown() {
        let syn = parse_data_line(Some("00000100 70000 n 01 w 0 000 | g"), Pos::Noun)
            .expect("parsed");
        assert_eq!(syn.lex_filenum, 70000);
        assert_eq!(syn.lexname(), "UNKNOWN(70000)");
        assert!(parse_data_line(Some("00000100 7x n 01 w 0 000 | g"), Pos::Noun).is_none());
    }

    #[test]
    fn bad_pointer_drops_only_that_relation() {
        let line = "00000100 05 n 01 w 0 002 @ 00000200 n 0000 = 00000300 x 0000 | g";
        let syn = parse_data_line(Some(line), Pos::Noun).expect("parsed");
        assert_eq!(syn.lexname(), "noun.animal");
        assert_eq!(syn.relations.len(), 1);
        assert_eq!(
            syn.hypernyms().collect::<Vec<_>>(),
            vec![SynsetId {
                pos: Pos::Noun,
                offset: 200
            }]
        );
    }

    #[test]
    fn parses_index_line_trailing_offsets() {
        let line = "dog n 2 2 @ ~ 2 1 02084071 10114209";
        let entry = parse_index_line(Some(line), Pos::Noun).expect("parsed");
        assert_eq!(entry.lemma, "dog");
        let offsets: Vec<u32> = entry.senses.iter().map(|s| s.offset).collect();
        assert_eq!(offsets, vec![2084071, 10114209]);
    }

    #[test]
    fn rejects_index_line_with_missing_offsets() {
        assert!(parse_index_line(Some("dog n 3 0 3 1 02084071"), Pos::Noun).is_none());
        assert!(parse_index_line(Some("dog n x 0 1 0 02084071"), Pos::Noun).is_none());
    }

    #[test]
    fn record_lines_skip_header_and_blank_lines() {
        let bytes = b"  1 license header\n\nentity n 1 0 1 0 00001740\r\n\tcontinued\n";
        let lines: Vec<_> = record_lines(bytes).collect();
        assert_eq!(lines, vec![(2, Some("entity n 1 0 1 0 00001740"))]);
    }
}
