//! Sentence skeletons: the catalog, selection under pinned constraints, and
//! the interrogative and negative rewrites.

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use crate::core::conjugation::VerbPhrase;
use crate::core::morphology;
use crate::schema::request::{GenerationRequest, NegationMarker, SubjectRequest};
use crate::schema::skeleton::{Skeleton, SlotTag};
use crate::schema::verb::VerbDescriptor;
use crate::schema::word::{Pronoun, Word};

#[derive(Debug, Error)]
pub enum StructureError {
    #[error("no sentence structure contains {required:?}")]
    NoMatchingStructure { required: Vec<SlotTag> },
}

/// The declarative shapes every engine starts from.
pub fn catalog() -> Vec<Skeleton> {
    use SlotTag::*;
    vec![
        Skeleton::new(&[SubjectNounGroup, Verb, Adverbial]),
        Skeleton::new(&[SubjectNounGroup, Verb]),
        Skeleton::new(&[SubjectNounGroup, TransitiveVerb, ObjectNounGroup]),
        Skeleton::new(&[SubjectNounGroup, TransitiveVerb, ObjectNounGroup, Adverbial]),
        Skeleton::new(&[Adverbial, Comma, SubjectNounGroup, Verb]),
        Skeleton::new(&[SubjectPronoun, Verb]),
        Skeleton::new(&[SubjectPronoun, Verb, Adverbial]),
        Skeleton::new(&[SubjectPronoun, TransitiveVerb, ObjectNounGroup, Adverbial]),
        Skeleton::new(&[Adverbial, Comma, SubjectPronoun, TransitiveVerb, ObjectNounGroup]),
        Skeleton::new(&[
            SubjectNounGroup,
            TransitiveVerb,
            ObjectNounGroup,
            LocativeComplement,
        ]),
        Skeleton::new(&[
            SubjectPronoun,
            TransitiveVerb,
            ObjectNounGroup,
            Adverbial,
            LocativeComplement,
        ]),
        Skeleton::new(&[
            Adverbial,
            Comma,
            SubjectNounGroup,
            TransitiveVerb,
            ObjectNounGroup,
            LocativeComplement,
        ]),
        Skeleton::new(&[SubjectPronoun, Verb, LocativeComplement]),
        Skeleton::new(&[SubjectNounGroup, Verb, LocativeComplement]),
    ]
}

/// Tags a skeleton must contain to host everything the request pins.
///
/// A pinned transitive verb implies nothing since it can be used
/// absolutely; an intransitive one rules out objects.
pub fn implied_tags(request: &GenerationRequest, verb: Option<&VerbDescriptor>) -> Vec<SlotTag> {
    let mut tags = Vec::new();
    match request.subject {
        Some(SubjectRequest::Pronoun(_)) | Some(SubjectRequest::Person { .. }) => {
            tags.push(SlotTag::SubjectPronoun)
        }
        Some(SubjectRequest::NounGroup(_)) => tags.push(SlotTag::SubjectNounGroup),
        None => {}
    }
    if verb.is_some_and(|v| !v.transitive) {
        tags.push(SlotTag::Verb);
    }
    if request.object.is_some() {
        tags.push(SlotTag::ObjectNounGroup);
    }
    if request.adverbial.is_some() {
        tags.push(SlotTag::Adverbial);
    }
    if request.locative.is_some() {
        tags.push(SlotTag::LocativeComplement);
    }
    tags
}

/// Picks skeletons from a fixed catalog.
#[derive(Debug, Clone)]
pub struct StructureSelector {
    catalog: Vec<Skeleton>,
}

impl Default for StructureSelector {
    fn default() -> Self {
        Self::new(catalog())
    }
}

impl StructureSelector {
    pub fn new(catalog: Vec<Skeleton>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &[Skeleton] {
        &self.catalog
    }

    /// Choose a skeleton containing every `required` tag.
    ///
    /// A pinned skeleton is checked and returned as is. Otherwise one of the
    /// covering catalog entries is drawn uniformly.
    pub fn select<R: Rng + ?Sized>(
        &self,
        pinned: Option<&Skeleton>,
        required: &[SlotTag],
        rng: &mut R,
    ) -> Result<Skeleton, StructureError> {
        let no_match = || StructureError::NoMatchingStructure {
            required: required.to_vec(),
        };

        if let Some(skeleton) = pinned {
            return if skeleton.covers(required) {
                Ok(skeleton.clone())
            } else {
                Err(no_match())
            };
        }

        let candidates: Vec<&Skeleton> = self
            .catalog
            .iter()
            .filter(|s| s.covers(required))
            .collect();
        log::debug!(
            "{} of {} skeletons cover {:?}",
            candidates.len(),
            self.catalog.len(),
            required
        );
        candidates.choose(rng).map(|s| (*s).clone()).ok_or_else(no_match)
    }
}

/// Rewrite a declarative skeleton as a question.
///
/// Pronoun subjects invert behind the verb; noun-group subjects take the
/// `Est-ce que` prefix. Complements keep their relative order after the
/// verb and a leading comma disappears.
pub fn to_interrogative(skeleton: &Skeleton) -> Skeleton {
    if skeleton.is_interrogative() {
        return skeleton.clone();
    }

    let verb = skeleton.verb_slot().unwrap_or(SlotTag::Verb);
    let trailing = skeleton
        .slots
        .iter()
        .copied()
        .filter(SlotTag::is_trailing_complement);

    let mut slots = if skeleton.uses_pronoun_subject() {
        vec![verb, SlotTag::InversionHyphen, SlotTag::SubjectPronoun]
    } else {
        vec![
            SlotTag::InterrogativePrefix,
            SlotTag::SubjectNounGroup,
            verb,
        ]
    };
    slots.extend(trailing);
    slots.push(SlotTag::QuestionMarker);
    Skeleton { slots }
}

/// The joint between an inverted verb and its pronoun: `-t-` between two
/// vowels, `-` otherwise.
pub fn inversion_hyphen(finite: &str, pronoun: Pronoun) -> &'static str {
    if morphology::starts_with_vowel(pronoun.text()) && !finite.ends_with(['d', 't']) {
        "-t-"
    } else {
        "-"
    }
}

/// Lay out a verb group as tokens, wrapping it in negation and inverting
/// the subject pronoun when asked.
///
/// Order: `ne`, reflexive pronoun, finite verb, hyphen and pronoun,
/// negation marker, participle.
pub fn verb_tokens(
    phrase: &VerbPhrase,
    negation: Option<NegationMarker>,
    inverted: Option<Pronoun>,
) -> Vec<Word> {
    let mut tokens = Vec::new();
    if negation.is_some() {
        tokens.push(Word::clitic("ne"));
    }
    if let Some(ref reflexive) = phrase.reflexive {
        tokens.push(Word::clitic(reflexive.clone()));
    }
    tokens.push(Word::plain(phrase.finite.clone()));
    if let Some(pronoun) = inverted {
        tokens.push(Word::plain(inversion_hyphen(&phrase.finite, pronoun)));
        tokens.push(Word::plain(pronoun.text()));
    }
    if let Some(marker) = negation {
        tokens.push(Word::plain(marker.text()));
    }
    if let Some(ref participle) = phrase.participle {
        tokens.push(Word::plain(participle.clone()));
    }
    tokens
}
