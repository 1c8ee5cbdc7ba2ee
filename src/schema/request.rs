use serde::{Deserialize, Serialize};

use super::phrase::{LocativeComplement, NounGroup};
use super::skeleton::Skeleton;
use super::verb::{Tense, VerbDescriptor};
use super::word::{Gender, Number, Person, PersonNumber, Pronoun, Word};

/// Second half of the `ne ... X` negation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NegationMarker {
    Pas,
    Plus,
    Jamais,
    PresquePlus,
    PresqueJamais,
}

impl NegationMarker {
    pub const ALL: [NegationMarker; 5] = [
        NegationMarker::Pas,
        NegationMarker::Plus,
        NegationMarker::Jamais,
        NegationMarker::PresquePlus,
        NegationMarker::PresqueJamais,
    ];

    pub fn text(&self) -> &'static str {
        match self {
            Self::Pas => "pas",
            Self::Plus => "plus",
            Self::Jamais => "jamais",
            Self::PresquePlus => "presque plus",
            Self::PresqueJamais => "presque jamais",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarity {
    Affirmative,
    Negated(NegationMarker),
}

impl Polarity {
    pub fn marker(&self) -> Option<NegationMarker> {
        match self {
            Self::Affirmative => None,
            Self::Negated(marker) => Some(*marker),
        }
    }
}

/// Optional pins for one noun group. Anything left `None` is drawn.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NounGroupRequest {
    pub specifier: Option<String>,
    pub noun: Option<String>,
    /// `Some(vec![])` asks for a bare group with no adjective.
    pub adjectives: Option<Vec<String>>,
    pub gender: Option<Gender>,
    pub number: Option<Number>,
}

impl NounGroupRequest {
    pub fn specifier(mut self, specifier: &str) -> Self {
        self.specifier = Some(specifier.to_string());
        self
    }

    pub fn noun(mut self, noun: &str) -> Self {
        self.noun = Some(noun.to_string());
        self
    }

    pub fn adjectives(mut self, adjectives: &[&str]) -> Self {
        self.adjectives = Some(adjectives.iter().map(|a| a.to_string()).collect());
        self
    }

    pub fn gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn number(mut self, number: Number) -> Self {
        self.number = Some(number);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubjectRequest {
    Pronoun(Pronoun),
    /// A pronoun looked up by grammatical features. Third person needs a
    /// gender.
    Person {
        person: Person,
        number: Number,
        gender: Option<Gender>,
    },
    NounGroup(NounGroupRequest),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerbRequest {
    /// Resolved against the engine's verb table, then the regular
    /// `-er`/`-ir` patterns.
    Infinitive(String),
    /// Request-scoped overlay; never written into the engine's tables.
    Custom(VerbDescriptor),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LocativeRequest {
    pub preposition: Option<String>,
    pub group: Option<NounGroupRequest>,
}

/// Constraints for one generated sentence.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub skeleton: Option<Skeleton>,
    pub tense: Option<Tense>,
    pub negated: Option<bool>,
    /// Pinning a marker implies `negated`.
    pub negation_marker: Option<NegationMarker>,
    pub interrogative: Option<bool>,
    pub subject: Option<SubjectRequest>,
    pub verb: Option<VerbRequest>,
    pub object: Option<NounGroupRequest>,
    pub adverbial: Option<String>,
    pub locative: Option<LocativeRequest>,
}

impl GenerationRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn skeleton(mut self, skeleton: Skeleton) -> Self {
        self.skeleton = Some(skeleton);
        self
    }

    pub fn tense(mut self, tense: Tense) -> Self {
        self.tense = Some(tense);
        self
    }

    pub fn negated(mut self, negated: bool) -> Self {
        self.negated = Some(negated);
        self
    }

    pub fn negation_marker(mut self, marker: NegationMarker) -> Self {
        self.negation_marker = Some(marker);
        self
    }

    pub fn interrogative(mut self, interrogative: bool) -> Self {
        self.interrogative = Some(interrogative);
        self
    }

    pub fn subject(mut self, subject: SubjectRequest) -> Self {
        self.subject = Some(subject);
        self
    }

    pub fn pronoun(self, pronoun: Pronoun) -> Self {
        self.subject(SubjectRequest::Pronoun(pronoun))
    }

    pub fn verb(mut self, infinitive: &str) -> Self {
        self.verb = Some(VerbRequest::Infinitive(infinitive.to_string()));
        self
    }

    pub fn custom_verb(mut self, verb: VerbDescriptor) -> Self {
        self.verb = Some(VerbRequest::Custom(verb));
        self
    }

    pub fn object(mut self, object: NounGroupRequest) -> Self {
        self.object = Some(object);
        self
    }

    pub fn adverbial(mut self, adverbial: &str) -> Self {
        self.adverbial = Some(adverbial.to_string());
        self
    }

    pub fn locative(mut self, locative: LocativeRequest) -> Self {
        self.locative = Some(locative);
        self
    }
}

/// The subject actually used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Subject {
    Pronoun(Pronoun),
    NounGroup(NounGroup),
}

impl Subject {
    /// Person/number the verb must agree with.
    pub fn person_number(&self) -> PersonNumber {
        match self {
            Self::Pronoun(p) => p.person_number(),
            Self::NounGroup(g) => PersonNumber::third(g.number),
        }
    }

    /// Gender for participle agreement; unmarked pronouns read as masculine.
    pub fn gender(&self) -> Gender {
        match self {
            Self::Pronoun(p) => p.gender().unwrap_or(Gender::Masculine),
            Self::NounGroup(g) => g.gender,
        }
    }
}

/// Metadata and tokens for one generated sentence. Enough to audit or
/// replay the generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub skeleton: Skeleton,
    pub tense: Tense,
    pub polarity: Polarity,
    pub interrogative: bool,
    pub person: PersonNumber,
    pub subject: Subject,
    /// Citation form of the verb (`s'amuser`, `manger`).
    pub verb: String,
    /// Conjugated verb group as it would read in a plain declarative
    /// clause (`me suis amusée`).
    pub conjugated: String,
    pub object: Option<NounGroup>,
    pub adverbial: Option<String>,
    pub locative: Option<LocativeComplement>,
    pub tokens: Vec<Word>,
}

impl GenerationResult {
    pub fn token_texts(&self) -> Vec<&str> {
        self.tokens.iter().map(|w| w.text.as_str()).collect()
    }

    pub fn render(&self) -> String {
        crate::core::render::render(self)
    }
}
