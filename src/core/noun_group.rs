//! Noun-group builder: agreement resolution, lexical draws, word order and
//! elision.

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use crate::core::lexicon::{Category, Lexicon, LexiconError};
use crate::core::morphology;
use crate::schema::phrase::NounGroup;
use crate::schema::request::NounGroupRequest;
use crate::schema::word::{Features, Gender, Number, Word, WordKind};

#[derive(Debug, Error)]
pub enum NounGroupError {
    #[error("invalid agreement: {part} '{word}' does not agree with {expected}")]
    InvalidAgreement {
        part: &'static str,
        word: String,
        expected: String,
    },
    #[error("lexicon error: {0}")]
    Lexicon(#[from] LexiconError),
}

/// Builds agreeing noun groups from a lexicon.
#[derive(Debug, Clone, Copy)]
pub struct NounGroupBuilder<'a> {
    lexicon: &'a Lexicon,
}

impl<'a> NounGroupBuilder<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self { lexicon }
    }

    /// Build a group from optional pins.
    ///
    /// Gender and number come from the first source that has them: the
    /// explicit override, the specifier, the noun, then the adjectives.
    /// With nothing pinned they are drawn uniformly. Every pinned word must
    /// agree with the result.
    pub fn build<R: Rng + ?Sized>(
        &self,
        request: &NounGroupRequest,
        rng: &mut R,
    ) -> Result<NounGroup, NounGroupError> {
        let lex = self.lexicon;

        let mut pinned: Vec<(&'static str, &str, Features)> = Vec::new();
        if let Some(ref s) = request.specifier {
            pinned.push(("specifier", s, lex.specifier_features(s)));
        }
        if let Some(ref n) = request.noun {
            pinned.push(("noun", n, lex.noun_features(n)));
        }
        for adj in request.adjectives.iter().flatten() {
            pinned.push(("adjective", adj, lex.adjective_features(adj)));
        }

        let gender = match request
            .gender
            .or_else(|| pinned.iter().find_map(|(_, _, f)| f.gender))
        {
            Some(g) => g,
            None => *Gender::ALL.choose(rng).unwrap_or(&Gender::Masculine),
        };
        let number = match request
            .number
            .or_else(|| pinned.iter().find_map(|(_, _, f)| f.number))
        {
            Some(n) => n,
            None => *Number::ALL.choose(rng).unwrap_or(&Number::Singular),
        };

        for (part, word, features) in &pinned {
            check_agreement(part, word, *features, gender, number)?;
        }

        let specifier = match request.specifier {
            Some(ref s) => s.clone(),
            None => match number {
                Number::Singular => lex.pick(Category::Specifier, Some(gender), rng)?,
                Number::Plural => lex.pick(Category::PluralSpecifier, None, rng)?,
            }
            .to_string(),
        };
        let noun = match request.noun {
            Some(ref n) => n.clone(),
            None => lex.pick(Category::Noun, Some(gender), rng)?.to_string(),
        };
        let base_adjectives = match request.adjectives {
            Some(ref adjs) => adjs.clone(),
            None => vec![lex.pick(Category::Adjective, Some(gender), rng)?.to_string()],
        };

        let inflect = |word: &str| match number {
            Number::Singular => word.to_string(),
            Number::Plural => morphology::pluralize(word),
        };
        let noun = inflect(&noun);
        let adjectives: Vec<String> = base_adjectives.iter().map(|a| inflect(a)).collect();

        let mut words = vec![Word::new(WordKind::Specifier, specifier.clone())];
        for (base, inflected) in base_adjectives.iter().zip(&adjectives) {
            if lex.is_pre_nominal(base) {
                words.push(Word::new(WordKind::Adjective, inflected.clone()));
            }
        }
        words.push(Word::new(WordKind::Noun, noun.clone()));
        for (base, inflected) in base_adjectives.iter().zip(&adjectives) {
            if !lex.is_pre_nominal(base) {
                words.push(Word::new(WordKind::Adjective, inflected.clone()));
            }
        }
        elide_in_place(&mut words);

        Ok(NounGroup {
            specifier,
            noun,
            adjectives,
            gender,
            number,
            words,
        })
    }
}

fn check_agreement(
    part: &'static str,
    word: &str,
    features: Features,
    gender: Gender,
    number: Number,
) -> Result<(), NounGroupError> {
    let gender_ok = features.gender.map_or(true, |g| g == gender);
    let number_ok = features.number.map_or(true, |n| n == number);
    if gender_ok && number_ok {
        return Ok(());
    }
    Err(NounGroupError::InvalidAgreement {
        part,
        word: word.to_string(),
        expected: format!("{:?} {:?}", gender, number),
    })
}

/// Elide each word against the one after it, right to left so a changed
/// adjective (`bel`) is what the specifier sees.
fn elide_in_place(words: &mut [Word]) {
    for i in (0..words.len().saturating_sub(1)).rev() {
        let next = words[i + 1].text.clone();
        words[i] = morphology::elide_word(&words[i], &next);
    }
}
