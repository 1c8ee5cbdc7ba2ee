use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Grammatical gender of nouns, adjectives and determiners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Masculine,
    Feminine,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Masculine, Gender::Feminine];
}

/// Grammatical number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Number {
    Singular,
    Plural,
}

impl Number {
    pub const ALL: [Number; 2] = [Number::Singular, Number::Plural];
}

/// Grammatical person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Person {
    First,
    Second,
    Third,
}

/// A person/number pair. Indexes the six conjugation slots
/// `1s, 2s, 3s, 1p, 2p, 3p` as `0..6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersonNumber {
    pub person: Person,
    pub number: Number,
}

impl PersonNumber {
    pub fn new(person: Person, number: Number) -> Self {
        Self { person, number }
    }

    /// Third person, used for every noun-group subject.
    pub fn third(number: Number) -> Self {
        Self::new(Person::Third, number)
    }

    /// Position in a six-slot conjugation table.
    pub fn index(&self) -> usize {
        let person = match self.person {
            Person::First => 0,
            Person::Second => 1,
            Person::Third => 2,
        };
        match self.number {
            Number::Singular => person,
            Number::Plural => person + 3,
        }
    }
}

/// Agreement features a word imposes. `None` means the word does not
/// constrain that feature (e.g. `bizarre` is both masculine and feminine).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Features {
    pub gender: Option<Gender>,
    pub number: Option<Number>,
}

/// An immutable lexical entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lexeme {
    pub text: String,
    pub gender: Option<Gender>,
    pub number: Option<Number>,
}

impl Lexeme {
    pub fn new(text: &str, gender: Option<Gender>, number: Option<Number>) -> Self {
        Self {
            text: text.to_string(),
            gender,
            number,
        }
    }

    pub fn features(&self) -> Features {
        Features {
            gender: self.gender,
            number: self.number,
        }
    }
}

/// Subject pronouns. Each variant is a plain value; lookup by agreement
/// features goes through [`Pronoun::lookup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pronoun {
    Je,
    Tu,
    Il,
    Elle,
    Nous,
    Vous,
    Ils,
    Elles,
}

/// `(gender, number, person)` → pronoun. Gender is only part of the key in
/// the third person.
const PRONOUN_TABLE: &[(Option<Gender>, Number, Person, Pronoun)] = &[
    (None, Number::Singular, Person::First, Pronoun::Je),
    (None, Number::Singular, Person::Second, Pronoun::Tu),
    (Some(Gender::Masculine), Number::Singular, Person::Third, Pronoun::Il),
    (Some(Gender::Feminine), Number::Singular, Person::Third, Pronoun::Elle),
    (None, Number::Plural, Person::First, Pronoun::Nous),
    (None, Number::Plural, Person::Second, Pronoun::Vous),
    (Some(Gender::Masculine), Number::Plural, Person::Third, Pronoun::Ils),
    (Some(Gender::Feminine), Number::Plural, Person::Third, Pronoun::Elles),
];

impl Pronoun {
    pub const ALL: [Pronoun; 8] = [
        Pronoun::Je,
        Pronoun::Tu,
        Pronoun::Il,
        Pronoun::Elle,
        Pronoun::Nous,
        Pronoun::Vous,
        Pronoun::Ils,
        Pronoun::Elles,
    ];

    /// Find the pronoun for a set of agreement features. Gender is ignored
    /// in the first and second person and required in the third.
    pub fn lookup(gender: Option<Gender>, number: Number, person: Person) -> Option<Pronoun> {
        let gender = match person {
            Person::Third => gender,
            _ => None,
        };
        PRONOUN_TABLE
            .iter()
            .find(|(g, n, p, _)| *g == gender && *n == number && *p == person)
            .map(|(_, _, _, pronoun)| *pronoun)
    }

    /// One pronoun drawn uniformly.
    pub fn pick<R: Rng + ?Sized>(rng: &mut R) -> Pronoun {
        *Self::ALL.choose(rng).unwrap_or(&Pronoun::Il)
    }

    fn entry(&self) -> &'static (Option<Gender>, Number, Person, Pronoun) {
        // Every variant has exactly one row.
        PRONOUN_TABLE
            .iter()
            .find(|(_, _, _, p)| p == self)
            .unwrap_or(&PRONOUN_TABLE[0])
    }

    pub fn text(&self) -> &'static str {
        match self {
            Self::Je => "je",
            Self::Tu => "tu",
            Self::Il => "il",
            Self::Elle => "elle",
            Self::Nous => "nous",
            Self::Vous => "vous",
            Self::Ils => "ils",
            Self::Elles => "elles",
        }
    }

    pub fn gender(&self) -> Option<Gender> {
        self.entry().0
    }

    pub fn person_number(&self) -> PersonNumber {
        let (_, number, person, _) = *self.entry();
        PersonNumber::new(person, number)
    }
}

/// The role a word plays when deciding how it elides before the next word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WordKind {
    Specifier,
    Adjective,
    Noun,
    /// Elidable function words: `je`, `me`, `te`, `se`, `ne`, `que`.
    Clitic,
    Plain,
}

/// A surface token tagged with its kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub kind: WordKind,
    pub text: String,
}

impl Word {
    pub fn new(kind: WordKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(WordKind::Plain, text)
    }

    pub fn clitic(text: impl Into<String>) -> Self {
        Self::new(WordKind::Clitic, text)
    }
}
