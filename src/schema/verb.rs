use serde::{Deserialize, Serialize};

/// Indicative tenses the engine conjugates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tense {
    Present,
    Imperfect,
    /// Passé composé: auxiliary in the present + past participle.
    CompoundPast,
}

impl Tense {
    pub const ALL: [Tense; 3] = [Tense::Present, Tense::Imperfect, Tense::CompoundPast];
}

/// Conjugation group. Groups 1 and 2 are regular, group 3 is table-driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConjugationGroup {
    /// Regular `-er` verbs.
    First,
    /// Regular `-ir` verbs (`-issons` plural).
    Second,
    /// Irregular verbs; require an [`IrregularTable`].
    Third,
}

/// Auxiliary used to build the compound past.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Auxiliary {
    #[default]
    Avoir,
    Etre,
}

impl Auxiliary {
    /// Infinitive of the auxiliary verb in the conjugation table.
    pub fn infinitive(&self) -> &'static str {
        match self {
            Self::Avoir => "avoir",
            Self::Etre => "être",
        }
    }
}

/// Explicit forms for an irregular verb. Person/number rows hold six forms
/// in `1s 2s 3s 1p 2p 3p` order. A missing tense or a short row is
/// reported, not guessed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct IrregularTable {
    #[serde(default)]
    pub present: Option<Vec<String>>,
    #[serde(default)]
    pub imperfect: Option<Vec<String>>,
    #[serde(default)]
    pub past_participle: Option<String>,
}

impl IrregularTable {
    pub fn new(present: [&str; 6], imperfect: [&str; 6], past_participle: &str) -> Self {
        Self {
            present: Some(present.iter().map(|s| s.to_string()).collect()),
            imperfect: Some(imperfect.iter().map(|s| s.to_string()).collect()),
            past_participle: Some(past_participle.to_string()),
        }
    }
}

/// Everything the conjugation engine needs to know about a verb.
///
/// `infinitive` is the dictionary form without the reflexive pronoun
/// (`laver`, not `se laver`); `reflexive` says whether a person-matching
/// pronoun is attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerbDescriptor {
    pub infinitive: String,
    pub group: ConjugationGroup,
    pub root: String,
    #[serde(default)]
    pub transitive: bool,
    #[serde(default)]
    pub reflexive: bool,
    #[serde(default)]
    pub auxiliary: Auxiliary,
    #[serde(default)]
    pub irregular: Option<IrregularTable>,
}

impl VerbDescriptor {
    /// A regular verb (group 1 or 2) taking `avoir`.
    pub fn regular(infinitive: &str, group: ConjugationGroup, root: &str, transitive: bool) -> Self {
        Self {
            infinitive: infinitive.to_string(),
            group,
            root: root.to_string(),
            transitive,
            reflexive: false,
            auxiliary: Auxiliary::Avoir,
            irregular: None,
        }
    }

    /// An irregular (group 3) verb taking `avoir`.
    pub fn irregular(infinitive: &str, transitive: bool, table: IrregularTable) -> Self {
        Self {
            infinitive: infinitive.to_string(),
            group: ConjugationGroup::Third,
            root: String::new(),
            transitive,
            reflexive: false,
            auxiliary: Auxiliary::Avoir,
            irregular: Some(table),
        }
    }

    /// Mark the verb pronominal. Reflexive verbs always take `être`.
    pub fn pronominal(mut self) -> Self {
        self.reflexive = true;
        self.transitive = false;
        self.auxiliary = Auxiliary::Etre;
        self
    }

    pub fn with_auxiliary(mut self, auxiliary: Auxiliary) -> Self {
        self.auxiliary = auxiliary;
        self
    }

    /// Auxiliary the compound past is built with. Reflexive verbs take
    /// `être` whatever `auxiliary` says.
    pub fn compound_auxiliary(&self) -> Auxiliary {
        if self.reflexive {
            Auxiliary::Etre
        } else {
            self.auxiliary
        }
    }

    /// Dictionary citation form, e.g. `s'amuser`, `se laver`, `manger`.
    pub fn citation(&self) -> String {
        if !self.reflexive {
            return self.infinitive.clone();
        }
        if crate::core::morphology::starts_with_vowel(&self.infinitive) {
            format!("s'{}", self.infinitive)
        } else {
            format!("se {}", self.infinitive)
        }
    }
}
