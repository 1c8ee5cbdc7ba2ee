use serde::{Deserialize, Serialize};

use super::word::{Gender, Number, Word};

/// A built noun group: one specifier, one noun, any number of adjectives,
/// all agreeing in gender and number.
///
/// `specifier`, `noun` and `adjectives` hold the inflected forms before
/// elision; `words` holds the surface tokens in rendering order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NounGroup {
    pub specifier: String,
    pub noun: String,
    pub adjectives: Vec<String>,
    pub gender: Gender,
    pub number: Number,
    pub words: Vec<Word>,
}

impl NounGroup {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(|w| w.text.as_str())
    }
}

/// Preposition + noun group expressing place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocativeComplement {
    /// Surface preposition after contraction (`au`, `aux`, `sur`, ...).
    pub preposition: String,
    pub group: NounGroup,
}
