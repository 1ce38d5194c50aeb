use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use wordnet_db::{LoadMode, WordNet};
use wordnet_types::Pos;

fn main() -> Result<()> {
    let dict_dir = env::args()
        .nth(1)
        .map(PathBuf::from)
        .context("usage: cargo run -p wordnet-db --example stats -- <path-to-wordnet-dir>")?;

    let wn = WordNet::load_with_mode(&dict_dir, LoadMode::Mmap)
        .with_context(|| format!("loading WordNet from {}", dict_dir.display()))?;

    let mut word_count = 0usize;
    let mut relation_count = 0usize;
    let mut hypernym_count = 0usize;
    let mut dangling_count = 0usize;

    for syn in wn.iter_synsets() {
        word_count += syn.words.len();
        relation_count += syn.relations.len();
        for target in syn.hypernyms() {
            hypernym_count += 1;
            if wn.get_synset(target).is_none() {
                dangling_count += 1;
            }
        }
    }

    println!("Dictionary: {}", dict_dir.display());
    println!("Lemma keys   : {}", wn.lemma_count());
    println!("Synsets      : {}", wn.synset_count());
    println!("Words in synsets: {}", word_count);
    println!("Relations    : {}", relation_count);
    println!("Hypernym edges: {} ({} dangling)", hypernym_count, dangling_count);
    for pos in wn.loaded_parts() {
        if let Some(part) = wn.stats().part(*pos) {
            println!(
                "{:<5} {} synsets, {} lemmas, {} skipped lines",
                pos,
                part.synsets,
                part.lemmas,
                part.skipped_data_lines + part.skipped_index_lines
            );
        }
    }

    for (pos, lemma) in [(Pos::Noun, "dog"), (Pos::Verb, "run")] {
        println!(
            "Lemma '{}' ({:?}) exists? {}",
            lemma,
            pos,
            wn.lemma_exists(pos, lemma)
        );
    }

    Ok(())
}
