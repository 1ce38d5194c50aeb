//! Bulk `lemma,category,...` export.
//!
//! Every distinct lemma is emitted once, under the first part of speech in
//! the export order that lists it. Categories the lemma has under later
//! parts of speech are not merged in: a word that is both a noun and a verb
//! exports with its noun categories only when nouns come first.

use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;
use wordnet_db::{WordNet, normalize_lemma};
use wordnet_types::{LemmaEntry, Pos};

use crate::categories::CategorySet;
use crate::engine::CategoryEngine;

/// Noun, verb, adjective, adverb.
pub const DEFAULT_EXPORT_ORDER: [Pos; 4] = Pos::ALL;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to create export file {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write export: {0}")]
    Io(#[from] io::Error),
}

/// One output line: a lemma and the categories of the POS it was assigned to.
#[derive(Clone, Debug)]
pub struct ExportRecord<'a> {
    pub lemma: &'a str,
    pub pos: Pos,
    pub categories: CategorySet,
}

impl fmt::Display for ExportRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.lemma)?;
        for label in self.categories.iter() {
            write!(f, ",{label}")?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ExportSummary {
    pub records: usize,
    pub without_categories: usize,
}

/// Pick the entry each distinct lemma is exported under.
///
/// Folds over `order`, carrying the set of lemmas already assigned; within a
/// POS, entries keep `index.<pos>` line order.
pub fn assign_first_seen<'a>(wn: &'a WordNet, order: &[Pos]) -> Vec<&'a LemmaEntry> {
    let (_, assigned) = order.iter().fold(
        (HashSet::new(), Vec::new()),
        |(mut seen, mut assigned), &pos| {
            for entry in wn.lemmas(pos) {
                if seen.insert(normalize_lemma(&entry.lemma)) {
                    assigned.push(entry);
                }
            }
            (seen, assigned)
        },
    );
    assigned
}

/// Records in output order, classified lazily by lexical file.
pub fn export_records<'a>(
    engine: CategoryEngine<'a>,
    order: &[Pos],
) -> impl Iterator<Item = ExportRecord<'a>> + use<'a> {
    assign_first_seen(engine.wordnet(), order)
        .into_iter()
        .map(move |entry| ExportRecord {
            lemma: &entry.lemma,
            pos: entry.pos,
            categories: engine.classify_entry_by_lexfile(entry),
        })
}

/// Stream the export to `writer`, one `\n`-terminated line per lemma.
pub fn write_export<W: Write>(
    engine: CategoryEngine<'_>,
    order: &[Pos],
    mut writer: W,
) -> Result<ExportSummary, ExportError> {
    let mut summary = ExportSummary::default();
    for record in export_records(engine, order) {
        writeln!(writer, "{record}")?;
        summary.records += 1;
        if record.categories.is_empty() {
            summary.without_categories += 1;
        }
    }
    writer.flush()?;
    info!(
        "exported {} lemmas ({} without categories)",
        summary.records, summary.without_categories
    );
    Ok(summary)
}

/// Create (or truncate) `path` and write the export into it.
pub fn export_to_path(
    engine: CategoryEngine<'_>,
    order: &[Pos],
    path: impl AsRef<Path>,
) -> Result<ExportSummary, ExportError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| ExportError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    info!("writing export to {}", path.display());
    write_export(engine, order, BufWriter::new(file))
}
