use std::borrow::Cow;

/// Lexicographer file names, indexed by the `lex_filenum` field of `data.*`.
pub const LEXNAMES: [&str; 45] = [
    "adj.all",
    "adj.pert",
    "adv.all",
    "noun.Tops",
    "noun.act",
    "noun.animal",
    "noun.artifact",
    "noun.attribute",
    "noun.body",
    "noun.cognition",
    "noun.communication",
    "noun.event",
    "noun.feeling",
    "noun.food",
    "noun.group",
    "noun.location",
    "noun.motive",
    "noun.object",
    "noun.person",
    "noun.phenomenon",
    "noun.plant",
    "noun.possession",
    "noun.process",
    "noun.quantity",
    "noun.relation",
    "noun.shape",
    "noun.state",
    "noun.substance",
    "noun.time",
    "verb.body",
    "verb.change",
    "verb.cognition",
    "verb.communication",
    "verb.competition",
    "verb.consumption",
    "verb.contact",
    "verb.creation",
    "verb.emotion",
    "verb.motion",
    "verb.perception",
    "verb.possession",
    "verb.social",
    "verb.stative",
    "verb.weather",
    "adj.ppl",
];

/// Resolve a lexicographer file number to its label.
///
/// Numbers outside the table yield `UNKNOWN(<n>)` instead of failing.
pub fn lexname(index: u32) -> Cow<'static, str> {
    match usize::try_from(index).ok().and_then(|i| LEXNAMES.get(i)) {
        Some(name) => Cow::Borrowed(name),
        None => Cow::Owned(format!("UNKNOWN({index})")),
    }
}
