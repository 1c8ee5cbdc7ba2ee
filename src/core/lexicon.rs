//! Word tables: the default French lexicon, RON overlays and uniform picks.

use rand::seq::SliceRandom;
use rand::Rng;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::schema::verb::{Auxiliary, ConjugationGroup, IrregularTable, VerbDescriptor};
use crate::schema::word::{Features, Gender, Number};

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("no {category:?} entries for gender {gender:?}")]
    EmptyCategory {
        category: Category,
        gender: Option<Gender>,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Word categories that can be drawn from the lexicon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Noun,
    Adjective,
    Specifier,
    PluralSpecifier,
    Adverb,
    LocativePreposition,
    Verb,
}

/// Entries split by gender.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenderTable {
    #[serde(default)]
    pub masculine: Vec<String>,
    #[serde(default)]
    pub feminine: Vec<String>,
}

impl GenderTable {
    fn from_static(masculine: &[&str], feminine: &[&str]) -> Self {
        Self {
            masculine: to_owned(masculine),
            feminine: to_owned(feminine),
        }
    }

    pub fn get(&self, gender: Gender) -> &[String] {
        match gender {
            Gender::Masculine => &self.masculine,
            Gender::Feminine => &self.feminine,
        }
    }

    /// Candidates for an optional gender. With no gender, both lists in
    /// order, without duplicates.
    fn candidates(&self, gender: Option<Gender>) -> Vec<&str> {
        match gender {
            Some(g) => self.get(g).iter().map(String::as_str).collect(),
            None => {
                let mut seen = FxHashSet::default();
                self.masculine
                    .iter()
                    .chain(self.feminine.iter())
                    .map(String::as_str)
                    .filter(|w| seen.insert(*w))
                    .collect()
            }
        }
    }

    /// The gender a word pins, or `None` if it is listed under both or
    /// neither.
    fn gender_of(&self, word: &str) -> Option<Gender> {
        let m = self.masculine.iter().any(|w| w == word);
        let f = self.feminine.iter().any(|w| w == word);
        match (m, f) {
            (true, false) => Some(Gender::Masculine),
            (false, true) => Some(Gender::Feminine),
            _ => None,
        }
    }

    fn contains(&self, word: &str) -> bool {
        self.masculine.iter().any(|w| w == word) || self.feminine.iter().any(|w| w == word)
    }

    fn merge(&mut self, other: GenderTable) {
        extend_unique(&mut self.masculine, other.masculine);
        extend_unique(&mut self.feminine, other.feminine);
    }
}

/// The read-only word tables an engine draws from.
///
/// `verbs` are drawable main verbs; `auxiliaries` are only reachable by
/// infinitive (compound tenses, explicit pins).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lexicon {
    #[serde(default)]
    pub nouns: GenderTable,
    #[serde(default)]
    pub adjectives: GenderTable,
    #[serde(default)]
    pub specifiers: GenderTable,
    #[serde(default)]
    pub plural_specifiers: Vec<String>,
    /// Adjectives rendered before the noun.
    #[serde(default)]
    pub pre_nominal: Vec<String>,
    #[serde(default)]
    pub adverbs: Vec<String>,
    #[serde(default)]
    pub locative_prepositions: Vec<String>,
    #[serde(default)]
    pub verbs: Vec<VerbDescriptor>,
    #[serde(default)]
    pub auxiliaries: Vec<VerbDescriptor>,
}

impl Lexicon {
    /// The built-in French lexicon.
    pub fn french() -> Self {
        Self {
            nouns: GenderTable::from_static(MASCULINE_NOUNS, FEMININE_NOUNS),
            adjectives: GenderTable::from_static(MASCULINE_ADJECTIVES, FEMININE_ADJECTIVES),
            specifiers: GenderTable::from_static(MASCULINE_SPECIFIERS, FEMININE_SPECIFIERS),
            plural_specifiers: to_owned(PLURAL_SPECIFIERS),
            pre_nominal: to_owned(PRE_NOMINAL_ADJECTIVES),
            adverbs: to_owned(ADVERBS),
            locative_prepositions: to_owned(LOCATIVE_PREPOSITIONS),
            verbs: default_verbs(),
            auxiliaries: vec![avoir(), etre()],
        }
    }

    /// Load a lexicon from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<Lexicon, LexiconError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse a lexicon from a RON string. Missing sections are empty.
    pub fn parse_ron(input: &str) -> Result<Lexicon, LexiconError> {
        Ok(ron::from_str(input)?)
    }

    /// Merge another lexicon into this one. Word lists are extended without
    /// duplicates; verbs from `other` replace verbs with the same infinitive.
    pub fn merge(&mut self, other: Lexicon) {
        self.nouns.merge(other.nouns);
        self.adjectives.merge(other.adjectives);
        self.specifiers.merge(other.specifiers);
        extend_unique(&mut self.plural_specifiers, other.plural_specifiers);
        extend_unique(&mut self.pre_nominal, other.pre_nominal);
        extend_unique(&mut self.adverbs, other.adverbs);
        extend_unique(&mut self.locative_prepositions, other.locative_prepositions);
        merge_verbs(&mut self.verbs, other.verbs);
        merge_verbs(&mut self.auxiliaries, other.auxiliaries);
    }

    fn candidates(&self, category: Category, gender: Option<Gender>) -> Vec<&str> {
        match category {
            Category::Noun => self.nouns.candidates(gender),
            Category::Adjective => self.adjectives.candidates(gender),
            Category::Specifier => self.specifiers.candidates(gender),
            Category::PluralSpecifier => flat(&self.plural_specifiers),
            Category::Adverb => flat(&self.adverbs),
            Category::LocativePreposition => flat(&self.locative_prepositions),
            Category::Verb => self.verbs.iter().map(|v| v.infinitive.as_str()).collect(),
        }
    }

    /// One uniformly random entry of `category`, restricted to `gender`
    /// for gendered categories.
    pub fn pick<R: Rng + ?Sized>(
        &self,
        category: Category,
        gender: Option<Gender>,
        rng: &mut R,
    ) -> Result<&str, LexiconError> {
        self.candidates(category, gender)
            .choose(rng)
            .copied()
            .ok_or(LexiconError::EmptyCategory { category, gender })
    }

    /// A drawable verb; transitive ones only when `transitive` is set.
    pub fn pick_verb<R: Rng + ?Sized>(
        &self,
        transitive: bool,
        rng: &mut R,
    ) -> Result<&VerbDescriptor, LexiconError> {
        let pool: Vec<&VerbDescriptor> = self
            .verbs
            .iter()
            .filter(|v| !transitive || v.transitive)
            .collect();
        pool.choose(rng)
            .copied()
            .ok_or(LexiconError::EmptyCategory {
                category: Category::Verb,
                gender: None,
            })
    }

    /// Any known verb by infinitive, auxiliaries included.
    pub fn verb(&self, infinitive: &str) -> Option<&VerbDescriptor> {
        self.verbs
            .iter()
            .chain(self.auxiliaries.iter())
            .find(|v| v.infinitive == infinitive)
    }

    pub fn is_pre_nominal(&self, adjective: &str) -> bool {
        self.pre_nominal.iter().any(|a| a == adjective)
    }

    /// Gender/number a determiner pins. Unknown words pin nothing.
    pub fn specifier_features(&self, specifier: &str) -> Features {
        let singular = self.specifiers.contains(specifier);
        let plural = self.plural_specifiers.iter().any(|s| s == specifier);
        let number = match (singular, plural) {
            (true, false) => Some(Number::Singular),
            (false, true) => Some(Number::Plural),
            _ => None,
        };
        Features {
            gender: self.specifiers.gender_of(specifier),
            number,
        }
    }

    pub fn noun_features(&self, noun: &str) -> Features {
        Features {
            gender: self.nouns.gender_of(noun),
            number: None,
        }
    }

    pub fn adjective_features(&self, adjective: &str) -> Features {
        Features {
            gender: self.adjectives.gender_of(adjective),
            number: None,
        }
    }
}

fn flat(list: &[String]) -> Vec<&str> {
    list.iter().map(String::as_str).collect()
}

fn to_owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn extend_unique(list: &mut Vec<String>, extra: Vec<String>) {
    for word in extra {
        if !list.contains(&word) {
            list.push(word);
        }
    }
}

fn merge_verbs(list: &mut Vec<VerbDescriptor>, extra: Vec<VerbDescriptor>) {
    for verb in extra {
        match list.iter_mut().find(|v| v.infinitive == verb.infinitive) {
            Some(existing) => *existing = verb,
            None => list.push(verb),
        }
    }
}

// ---------------------------------------------------------------------------
// Default French tables
// ---------------------------------------------------------------------------

const MASCULINE_NOUNS: &[&str] = &[
    "papier", "ordinateur", "mot", "casse-croûte", "véhicule", "métier", "verre", "bois", "boa",
    "schtroumpf", "arbre", "oiseau", "animal", "travail", "chou", "éléphant",
];
const FEMININE_NOUNS: &[&str] = &[
    "nourriture", "couverture", "arrivée", "tente", "voiture", "nature", "éternité", "histoire",
    "maison", "idée",
];
const MASCULINE_ADJECTIVES: &[&str] = &[
    "noir", "bleu", "beau", "rigolo", "bizarre", "breton", "lumineux", "grand", "transparent",
    "énorme", "schtroumpf", "nouveau", "vieux",
];
const FEMININE_ADJECTIVES: &[&str] = &[
    "noire", "bleue", "belle", "rigolote", "bizarre", "bretonne", "lumineuse", "grande",
    "transparente", "énorme", "schtroumpf", "nouvelle", "vieille",
];
const PRE_NOMINAL_ADJECTIVES: &[&str] = &[
    "beau", "belle", "grand", "grande", "nouveau", "nouvelle", "vieux", "vieille",
];
const MASCULINE_SPECIFIERS: &[&str] = &[
    "le", "un", "mon", "ce", "notre", "votre", "son", "ton", "leur",
];
const FEMININE_SPECIFIERS: &[&str] = &[
    "la", "une", "ma", "cette", "notre", "votre", "sa", "ta", "leur",
];
const PLURAL_SPECIFIERS: &[&str] = &[
    "les", "des", "mes", "ces", "nos", "vos", "ses", "tes", "leurs",
];
const ADVERBS: &[&str] = &[
    "rapidement",
    "bien",
    "bruyamment",
    "calmement",
    "sans effort",
    "schtroumpfement",
];
const LOCATIVE_PREPOSITIONS: &[&str] = &["à", "sur", "dans"];

fn avoir() -> VerbDescriptor {
    VerbDescriptor::irregular(
        "avoir",
        true,
        IrregularTable::new(
            ["ai", "as", "a", "avons", "avez", "ont"],
            ["avais", "avais", "avait", "avions", "aviez", "avaient"],
            "eu",
        ),
    )
}

fn etre() -> VerbDescriptor {
    VerbDescriptor::irregular(
        "être",
        false,
        IrregularTable::new(
            ["suis", "es", "est", "sommes", "êtes", "sont"],
            ["étais", "étais", "était", "étions", "étiez", "étaient"],
            "été",
        ),
    )
}

fn default_verbs() -> Vec<VerbDescriptor> {
    use ConjugationGroup::{First, Second};

    vec![
        VerbDescriptor::regular("manger", First, "mang", true),
        VerbDescriptor::regular("marcher", First, "march", false),
        VerbDescriptor::regular("fabriquer", First, "fabriqu", true),
        VerbDescriptor::regular("rigoler", First, "rigol", false),
        VerbDescriptor::regular("parler", First, "parl", false),
        VerbDescriptor::regular("casser", First, "cass", true),
        VerbDescriptor::regular("aimer", First, "aim", true),
        VerbDescriptor::regular("écouter", First, "écout", true),
        VerbDescriptor::regular("arriver", First, "arriv", false).with_auxiliary(Auxiliary::Etre),
        VerbDescriptor::regular("tomber", First, "tomb", false).with_auxiliary(Auxiliary::Etre),
        VerbDescriptor::regular("laver", First, "lav", false).pronominal(),
        VerbDescriptor::regular("amuser", First, "amus", false).pronominal(),
        VerbDescriptor::regular("reposer", First, "repos", false).pronominal(),
        VerbDescriptor::regular("applaudir", Second, "applaud", true),
        VerbDescriptor::regular("finir", Second, "fin", true),
        VerbDescriptor::regular("choisir", Second, "chois", true),
        VerbDescriptor::regular("réfléchir", Second, "réfléch", false),
        VerbDescriptor::regular("grandir", Second, "grand", false),
        VerbDescriptor::irregular(
            "courir",
            false,
            IrregularTable::new(
                ["cours", "cours", "court", "courons", "courez", "courent"],
                ["courais", "courais", "courait", "courions", "couriez", "couraient"],
                "couru",
            ),
        ),
        VerbDescriptor::irregular(
            "dormir",
            false,
            IrregularTable::new(
                ["dors", "dors", "dort", "dormons", "dormez", "dorment"],
                ["dormais", "dormais", "dormait", "dormions", "dormiez", "dormaient"],
                "dormi",
            ),
        ),
        VerbDescriptor::irregular(
            "faire",
            true,
            IrregularTable::new(
                ["fais", "fais", "fait", "faisons", "faites", "font"],
                ["faisais", "faisais", "faisait", "faisions", "faisiez", "faisaient"],
                "fait",
            ),
        ),
        VerbDescriptor::irregular(
            "boire",
            true,
            IrregularTable::new(
                ["bois", "bois", "boit", "buvons", "buvez", "boivent"],
                ["buvais", "buvais", "buvait", "buvions", "buviez", "buvaient"],
                "bu",
            ),
        ),
        VerbDescriptor::irregular(
            "prendre",
            true,
            IrregularTable::new(
                ["prends", "prends", "prend", "prenons", "prenez", "prennent"],
                ["prenais", "prenais", "prenait", "prenions", "preniez", "prenaient"],
                "pris",
            ),
        ),
        VerbDescriptor::irregular(
            "lire",
            true,
            IrregularTable::new(
                ["lis", "lis", "lit", "lisons", "lisez", "lisent"],
                ["lisais", "lisais", "lisait", "lisions", "lisiez", "lisaient"],
                "lu",
            ),
        ),
        VerbDescriptor::irregular(
            "voir",
            true,
            IrregularTable::new(
                ["vois", "vois", "voit", "voyons", "voyez", "voient"],
                ["voyais", "voyais", "voyait", "voyions", "voyiez", "voyaient"],
                "vu",
            ),
        ),
        VerbDescriptor::irregular(
            "endormir",
            false,
            IrregularTable::new(
                ["endors", "endors", "endort", "endormons", "endormez", "endorment"],
                [
                    "endormais",
                    "endormais",
                    "endormait",
                    "endormions",
                    "endormiez",
                    "endormaient",
                ],
                "endormi",
            ),
        )
        .pronominal(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn pick_respects_gender() {
        let lex = Lexicon::french();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let noun = lex.pick(Category::Noun, Some(Gender::Feminine), &mut rng).unwrap();
            assert!(FEMININE_NOUNS.contains(&noun), "{noun} is not feminine");
        }
    }

    #[test]
    fn pick_without_gender_draws_from_both() {
        let lex = Lexicon::french();
        let mut rng = StdRng::seed_from_u64(3);
        let mut genders = FxHashSet::default();
        for _ in 0..200 {
            let noun = lex.pick(Category::Noun, None, &mut rng).unwrap();
            genders.insert(lex.noun_features(noun).gender);
        }
        assert!(genders.contains(&Some(Gender::Masculine)));
        assert!(genders.contains(&Some(Gender::Feminine)));
    }

    #[test]
    fn pick_empty_category_is_an_error() {
        let lex = Lexicon::default();
        let mut rng = StdRng::seed_from_u64(0);
        let err = lex.pick(Category::Adverb, None, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            LexiconError::EmptyCategory {
                category: Category::Adverb,
                ..
            }
        ));
    }

    #[test]
    fn pick_does_not_mutate_tables() {
        let lex = Lexicon::french();
        let before = lex.clone();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            lex.pick(Category::Adjective, Some(Gender::Masculine), &mut rng)
                .unwrap();
            lex.pick_verb(true, &mut rng).unwrap();
        }
        assert_eq!(lex, before);
    }

    #[test]
    fn specifier_features() {
        let lex = Lexicon::french();
        assert_eq!(
            lex.specifier_features("la"),
            Features {
                gender: Some(Gender::Feminine),
                number: Some(Number::Singular),
            }
        );
        assert_eq!(
            lex.specifier_features("leur"),
            Features {
                gender: None,
                number: Some(Number::Singular),
            }
        );
        assert_eq!(
            lex.specifier_features("les"),
            Features {
                gender: None,
                number: Some(Number::Plural),
            }
        );
        assert_eq!(lex.specifier_features("quelque"), Features::default());
    }

    #[test]
    fn adjective_listed_twice_pins_no_gender() {
        let lex = Lexicon::french();
        assert_eq!(lex.adjective_features("bizarre").gender, None);
        assert_eq!(lex.adjective_features("noire").gender, Some(Gender::Feminine));
    }

    #[test]
    fn transitive_pool_only_has_transitive_verbs() {
        let lex = Lexicon::french();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            assert!(lex.pick_verb(true, &mut rng).unwrap().transitive);
        }
    }

    #[test]
    fn auxiliaries_are_known_but_not_drawn() {
        let lex = Lexicon::french();
        assert!(lex.verb("avoir").is_some());
        assert!(lex.verb("être").is_some());
        assert!(lex.verbs.iter().all(|v| v.infinitive != "avoir"));
    }

    #[test]
    fn group_three_verbs_carry_tables() {
        let lex = Lexicon::french();
        for verb in lex.verbs.iter().chain(lex.auxiliaries.iter()) {
            if verb.group == ConjugationGroup::Third {
                assert!(verb.irregular.is_some(), "{} has no table", verb.infinitive);
            } else {
                assert!(!verb.root.is_empty(), "{} has no root", verb.infinitive);
            }
        }
    }

    #[test]
    fn parse_and_merge_overlay() {
        let overlay = Lexicon::parse_ron(
            r#"(
                nouns: (masculine: ["chat", "mot"]),
                adverbs: ["lentement"],
                verbs: [
                    (infinitive: "manger", group: First, root: "mang", transitive: false),
                    (infinitive: "chanter", group: First, root: "chant"),
                ],
            )"#,
        )
        .unwrap();
        assert!(overlay.nouns.feminine.is_empty());

        let mut lex = Lexicon::french();
        let verb_count = lex.verbs.len();
        lex.merge(overlay);

        assert!(lex.nouns.masculine.contains(&"chat".to_string()));
        assert_eq!(lex.nouns.masculine.iter().filter(|n| *n == "mot").count(), 1);
        assert!(lex.adverbs.contains(&"lentement".to_string()));
        assert_eq!(lex.verbs.len(), verb_count + 1);
        assert!(!lex.verb("manger").unwrap().transitive);
    }

    #[test]
    fn malformed_ron_is_reported() {
        assert!(matches!(
            Lexicon::parse_ron("(nouns: oops)"),
            Err(LexiconError::Ron(_))
        ));
    }
}
