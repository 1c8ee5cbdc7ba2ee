//! Phrase Engine: random grammatical French sentences.
//!
//! Draws words from a gendered lexicon, agrees them into noun groups,
//! conjugates verbs across three tenses, and lays the result out along a
//! catalog of sentence skeletons that can be negated or turned into
//! questions. Every draw goes through a seedable random source.

pub mod core;
pub mod schema;
