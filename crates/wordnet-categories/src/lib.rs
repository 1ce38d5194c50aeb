//! Semantic categories for WordNet lemmas.
//!
//! Two classifiers run over a loaded [`wordnet_db::WordNet`]:
//!
//! - **Lexical file** ([`CategoryEngine::classify_by_lexfile`]): the
//!   lexicographer file of each sense, e.g. `noun.animal`.
//! - **Root hypernym** ([`CategoryEngine::classify_by_root_hypernym`]): walk
//!   `@` links upward from each sense and report the [`ROOT_CATEGORIES`]
//!   reached, e.g. `Entity`, `Place`. The walk keeps a visited set per call,
//!   so cyclic data terminates and dangling targets are treated as leaves.
//!
//! Both return a [`CategorySet`]; an unknown lemma gives an empty set, never
//! an error. The [`export`] module writes one `lemma,category,...` line per
//! distinct lemma across parts of speech.
//!
//! ```no_run
//! use wordnet_categories::CategoryEngine;
//! use wordnet_db::WordNet;
//! use wordnet_types::Pos;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let wn = WordNet::load("/path/to/wordnet")?;
//! let engine = CategoryEngine::new(&wn);
//! println!("{}", engine.classify_by_lexfile("dog", Pos::Noun));
//! println!("{}", engine.classify_by_root_hypernym("dog", Pos::Noun));
//! # Ok(()) }
//! ```

mod categories;
mod engine;
pub mod export;
mod roots;

#[cfg(test)]
mod test_utils;

pub use categories::CategorySet;
pub use engine::{CategoryEngine, ParseStrategyError, Strategy};
pub use export::{
    DEFAULT_EXPORT_ORDER, ExportError, ExportRecord, ExportSummary, assign_first_seen,
    export_records, export_to_path, write_export,
};
pub use roots::{ROOT_CATEGORIES, root_label};
