//! Conjugation engine: regular paradigms, irregular tables, the compound
//! past and reflexive pronoun attachment.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use thiserror::Error;

use crate::core::lexicon::Lexicon;
use crate::core::morphology;
use crate::schema::verb::{Auxiliary, ConjugationGroup, Tense, VerbDescriptor};
use crate::schema::word::{Gender, Number, PersonNumber, WordKind};

#[derive(Debug, Error)]
pub enum ConjugationError {
    #[error("unknown verb: {0}")]
    UnknownVerb(String),
    #[error("regular verb '{0}' has an empty root")]
    EmptyRoot(String),
    #[error("irregular verb '{infinitive}' has no {form} form")]
    MissingIrregularForm { infinitive: String, form: String },
}

const GROUP1_PRESENT: [&str; 6] = ["e", "es", "e", "ons", "ez", "ent"];
const GROUP1_IMPERFECT: [&str; 6] = ["ais", "ais", "ait", "ions", "iez", "aient"];
const GROUP2_PRESENT: [&str; 6] = ["is", "is", "it", "issons", "issez", "issent"];
const GROUP2_IMPERFECT: [&str; 6] = [
    "issais", "issais", "issait", "issions", "issiez", "issaient",
];

const REFLEXIVE_PRONOUNS: [&str; 6] = ["me", "te", "se", "nous", "vous", "se"];

/// Verbs known to an engine, indexed by infinitive. Built once from the
/// lexicon and never written to afterwards.
#[derive(Debug, Clone, Default)]
pub struct VerbTable {
    verbs: FxHashMap<String, VerbDescriptor>,
}

impl VerbTable {
    pub fn from_lexicon(lexicon: &Lexicon) -> Self {
        let verbs = lexicon
            .verbs
            .iter()
            .chain(lexicon.auxiliaries.iter())
            .map(|v| (v.infinitive.clone(), v.clone()))
            .collect();
        Self { verbs }
    }

    pub fn get(&self, infinitive: &str) -> Option<&VerbDescriptor> {
        self.verbs.get(infinitive)
    }

    pub fn len(&self) -> usize {
        self.verbs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }
}

/// A conjugated verb group split into the pieces negation and inversion
/// need to move around: `[reflexive] finite [participle]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerbPhrase {
    /// Reflexive pronoun, already elided (`m'`, `se`, `nous`).
    pub reflexive: Option<String>,
    /// The conjugated word: the verb itself or its auxiliary.
    pub finite: String,
    /// Past participle in the compound past, agreed when needed.
    pub participle: Option<String>,
}

impl VerbPhrase {
    pub fn text(&self) -> String {
        let mut out = String::new();
        if let Some(ref pronoun) = self.reflexive {
            out.push_str(pronoun);
            if !pronoun.ends_with('\'') {
                out.push(' ');
            }
        }
        out.push_str(&self.finite);
        if let Some(ref participle) = self.participle {
            out.push(' ');
            out.push_str(participle);
        }
        out
    }
}

/// Conjugates against an engine's verb table plus an optional
/// request-scoped overlay. The overlay is consulted first and dropped with
/// the conjugator; the table is never modified.
#[derive(Debug, Clone, Copy)]
pub struct Conjugator<'a> {
    table: &'a VerbTable,
    overlay: Option<&'a VerbDescriptor>,
}

impl<'a> Conjugator<'a> {
    pub fn new(table: &'a VerbTable) -> Self {
        Self {
            table,
            overlay: None,
        }
    }

    pub fn with_overlay(mut self, verb: &'a VerbDescriptor) -> Self {
        self.overlay = Some(verb);
        self
    }

    /// Find a verb by infinitive. Accepts citation forms (`se laver`,
    /// `s'amuser`). Falls back to the regular `-er`/`-ir` patterns.
    pub fn resolve(&self, infinitive: &str) -> Result<Cow<'a, VerbDescriptor>, ConjugationError> {
        let (bare, pronominal) = match infinitive
            .strip_prefix("se ")
            .or_else(|| infinitive.strip_prefix("s'"))
        {
            Some(rest) => (rest, true),
            None => (infinitive, false),
        };

        let found = self
            .overlay
            .filter(|v| v.infinitive == bare)
            .or_else(|| self.table.get(bare));

        let verb = match found {
            Some(v) if pronominal && !v.reflexive => Cow::Owned(v.clone().pronominal()),
            Some(v) => Cow::Borrowed(v),
            None => {
                let derived = derive_regular(bare)?;
                Cow::Owned(if pronominal {
                    derived.pronominal()
                } else {
                    derived
                })
            }
        };
        Ok(verb)
    }

    /// Conjugate a verb by infinitive, reading as masculine for the
    /// compound past.
    pub fn conjugate(
        &self,
        infinitive: &str,
        person: PersonNumber,
        tense: Tense,
    ) -> Result<String, ConjugationError> {
        let verb = self.resolve(infinitive)?;
        Ok(self
            .verb_phrase(&verb, person, Gender::Masculine, tense)?
            .text())
    }

    /// Conjugate a descriptor into its split verb group. `gender` only
    /// matters for participle agreement with `être`.
    pub fn verb_phrase(
        &self,
        verb: &VerbDescriptor,
        person: PersonNumber,
        gender: Gender,
        tense: Tense,
    ) -> Result<VerbPhrase, ConjugationError> {
        let (finite, participle) = match tense {
            Tense::Present | Tense::Imperfect => (simple_form(verb, person, tense)?, None),
            Tense::CompoundPast => {
                let auxiliary = self.auxiliary_of(verb)?;
                let finite = simple_form(&auxiliary, person, Tense::Present)?;
                let mut participle = past_participle(verb)?;
                if verb.compound_auxiliary() == Auxiliary::Etre {
                    participle = agree_participle(&participle, gender, person.number);
                }
                (finite, Some(participle))
            }
        };

        let reflexive = verb.reflexive.then(|| {
            let pronoun = REFLEXIVE_PRONOUNS[person.index()];
            morphology::elide(WordKind::Clitic, pronoun, &finite).to_string()
        });

        Ok(VerbPhrase {
            reflexive,
            finite,
            participle,
        })
    }

    fn auxiliary_of(&self, verb: &VerbDescriptor) -> Result<Cow<'a, VerbDescriptor>, ConjugationError> {
        let name = verb.compound_auxiliary().infinitive();
        if verb.infinitive == name {
            // avoir conjugates with itself
            return Ok(Cow::Owned(verb.clone()));
        }
        self.table
            .get(name)
            .map(Cow::Borrowed)
            .ok_or_else(|| ConjugationError::UnknownVerb(name.to_string()))
    }
}

/// Build a descriptor for an infinitive matching a regular ending.
fn derive_regular(infinitive: &str) -> Result<VerbDescriptor, ConjugationError> {
    let (group, root) = if let Some(root) = infinitive.strip_suffix("er") {
        (ConjugationGroup::First, root)
    } else if let Some(root) = infinitive.strip_suffix("ir") {
        (ConjugationGroup::Second, root)
    } else {
        return Err(ConjugationError::UnknownVerb(infinitive.to_string()));
    };
    if root.is_empty() {
        return Err(ConjugationError::EmptyRoot(infinitive.to_string()));
    }
    log::debug!("derived regular descriptor for '{}'", infinitive);
    Ok(VerbDescriptor::regular(infinitive, group, root, false))
}

fn regular_root(verb: &VerbDescriptor) -> Result<&str, ConjugationError> {
    if verb.root.is_empty() {
        return Err(ConjugationError::EmptyRoot(verb.infinitive.clone()));
    }
    Ok(&verb.root)
}

/// Present or imperfect form.
fn simple_form(
    verb: &VerbDescriptor,
    person: PersonNumber,
    tense: Tense,
) -> Result<String, ConjugationError> {
    let index = person.index();
    match verb.group {
        ConjugationGroup::First => {
            let root = regular_root(verb)?;
            let suffix = match tense {
                Tense::Imperfect => GROUP1_IMPERFECT[index],
                _ => GROUP1_PRESENT[index],
            };
            // Keep the soft g: mangeons, mangeait.
            let soft_g = root.ends_with('g') && suffix.starts_with(['a', 'o', 'u']);
            Ok(format!("{}{}{}", root, if soft_g { "e" } else { "" }, suffix))
        }
        ConjugationGroup::Second => {
            let root = regular_root(verb)?;
            let suffix = match tense {
                Tense::Imperfect => GROUP2_IMPERFECT[index],
                _ => GROUP2_PRESENT[index],
            };
            Ok(format!("{}{}", root, suffix))
        }
        ConjugationGroup::Third => {
            let table = verb
                .irregular
                .as_ref()
                .ok_or_else(|| ConjugationError::UnknownVerb(verb.infinitive.clone()))?;
            let (row, form) = match tense {
                Tense::Imperfect => (table.imperfect.as_ref(), "imperfect"),
                _ => (table.present.as_ref(), "present"),
            };
            row.and_then(|forms| forms.get(index))
                .cloned()
                .ok_or_else(|| ConjugationError::MissingIrregularForm {
                    infinitive: verb.infinitive.clone(),
                    form: form.to_string(),
                })
        }
    }
}

/// Past participle: `-é` for group 1, `-i` for group 2, the table's entry
/// for group 3.
pub fn past_participle(verb: &VerbDescriptor) -> Result<String, ConjugationError> {
    match verb.group {
        ConjugationGroup::First => Ok(format!("{}é", regular_root(verb)?)),
        ConjugationGroup::Second => Ok(format!("{}i", regular_root(verb)?)),
        ConjugationGroup::Third => verb
            .irregular
            .as_ref()
            .ok_or_else(|| ConjugationError::UnknownVerb(verb.infinitive.clone()))?
            .past_participle
            .clone()
            .ok_or_else(|| ConjugationError::MissingIrregularForm {
                infinitive: verb.infinitive.clone(),
                form: "past participle".to_string(),
            }),
    }
}

/// Participle agreement with the subject, used with `être`.
fn agree_participle(participle: &str, gender: Gender, number: Number) -> String {
    let mut out = participle.to_string();
    if gender == Gender::Feminine {
        out.push('e');
    }
    if number == Number::Plural && !out.ends_with('s') {
        out.push('s');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::verb::IrregularTable;
    use crate::schema::word::Person;

    fn table() -> VerbTable {
        VerbTable::from_lexicon(&Lexicon::french())
    }

    fn pn(person: Person, number: Number) -> PersonNumber {
        PersonNumber::new(person, number)
    }

    #[test]
    fn soft_g_before_o_suffix() {
        let t = table();
        let c = Conjugator::new(&t);
        assert_eq!(
            c.conjugate("manger", pn(Person::First, Number::Plural), Tense::Present)
                .unwrap(),
            "mangeons"
        );
        assert_eq!(
            c.conjugate("manger", pn(Person::Third, Number::Singular), Tense::Imperfect)
                .unwrap(),
            "mangeait"
        );
        // No insertion before an i-initial suffix.
        assert_eq!(
            c.conjugate("manger", pn(Person::First, Number::Plural), Tense::Imperfect)
                .unwrap(),
            "mangions"
        );
    }

    #[test]
    fn second_group_present() {
        let t = table();
        let c = Conjugator::new(&t);
        assert_eq!(
            c.conjugate("applaudir", pn(Person::Third, Number::Singular), Tense::Present)
                .unwrap(),
            "applaudit"
        );
        assert_eq!(
            c.conjugate("finir", pn(Person::Second, Number::Plural), Tense::Imperfect)
                .unwrap(),
            "finissiez"
        );
    }

    #[test]
    fn irregular_lookup() {
        let t = table();
        let c = Conjugator::new(&t);
        assert_eq!(
            c.conjugate("dormir", pn(Person::Third, Number::Singular), Tense::Present)
                .unwrap(),
            "dort"
        );
        assert_eq!(
            c.conjugate("faire", pn(Person::Second, Number::Plural), Tense::Present)
                .unwrap(),
            "faites"
        );
        assert_eq!(
            c.conjugate("boire", pn(Person::Third, Number::Plural), Tense::Imperfect)
                .unwrap(),
            "buvaient"
        );
    }

    #[test]
    fn compound_past_with_avoir() {
        let t = table();
        let c = Conjugator::new(&t);
        assert_eq!(
            c.conjugate("manger", pn(Person::First, Number::Singular), Tense::CompoundPast)
                .unwrap(),
            "ai mangé"
        );
        assert_eq!(
            c.conjugate("choisir", pn(Person::Third, Number::Plural), Tense::CompoundPast)
                .unwrap(),
            "ont choisi"
        );
        assert_eq!(
            c.conjugate("avoir", pn(Person::Third, Number::Singular), Tense::CompoundPast)
                .unwrap(),
            "a eu"
        );
        assert_eq!(
            c.conjugate("être", pn(Person::First, Number::Plural), Tense::CompoundPast)
                .unwrap(),
            "avons été"
        );
    }

    #[test]
    fn compound_past_with_etre_agrees() {
        let t = table();
        let c = Conjugator::new(&t);
        let arriver = c.resolve("arriver").unwrap();
        let phrase = c
            .verb_phrase(
                &arriver,
                pn(Person::Third, Number::Plural),
                Gender::Feminine,
                Tense::CompoundPast,
            )
            .unwrap();
        assert_eq!(phrase.text(), "sont arrivées");

        let prendre = c.resolve("se prendre").unwrap();
        let phrase = c
            .verb_phrase(
                &prendre,
                pn(Person::Third, Number::Plural),
                Gender::Masculine,
                Tense::CompoundPast,
            )
            .unwrap();
        assert_eq!(phrase.text(), "se sont pris");
    }

    #[test]
    fn reflexive_pronoun_attachment() {
        let t = table();
        let c = Conjugator::new(&t);
        assert_eq!(
            c.conjugate("se laver", pn(Person::First, Number::Singular), Tense::Present)
                .unwrap(),
            "me lave"
        );
        assert_eq!(
            c.conjugate("s'amuser", pn(Person::Third, Number::Singular), Tense::Present)
                .unwrap(),
            "s'amuse"
        );
        assert_eq!(
            c.conjugate("amuser", pn(Person::First, Number::Plural), Tense::Present)
                .unwrap(),
            "nous amusons"
        );
        assert_eq!(
            c.conjugate("laver", pn(Person::Third, Number::Singular), Tense::CompoundPast)
                .unwrap(),
            "s'est lavé"
        );
        assert_eq!(
            c.conjugate("endormir", pn(Person::Second, Number::Singular), Tense::Present)
                .unwrap(),
            "t'endors"
        );
    }

    #[test]
    fn verb_phrase_pieces() {
        let t = table();
        let c = Conjugator::new(&t);
        let verb = c.resolve("reposer").unwrap();
        let phrase = c
            .verb_phrase(
                &verb,
                pn(Person::First, Number::Singular),
                Gender::Feminine,
                Tense::CompoundPast,
            )
            .unwrap();
        assert_eq!(phrase.reflexive.as_deref(), Some("me"));
        assert_eq!(phrase.finite, "suis");
        assert_eq!(phrase.participle.as_deref(), Some("reposée"));
    }

    #[test]
    fn unknown_verb_is_an_error() {
        let t = table();
        let c = Conjugator::new(&t);
        let err = c
            .conjugate("dire", pn(Person::First, Number::Singular), Tense::Present)
            .unwrap_err();
        assert!(matches!(err, ConjugationError::UnknownVerb(ref v) if v == "dire"));
    }

    #[test]
    fn regular_endings_are_derived() {
        let t = table();
        let c = Conjugator::new(&t);
        assert_eq!(
            c.conjugate("chanter", pn(Person::Third, Number::Plural), Tense::Present)
                .unwrap(),
            "chantent"
        );
        assert_eq!(
            c.conjugate("bâtir", pn(Person::First, Number::Plural), Tense::Present)
                .unwrap(),
            "bâtissons"
        );
    }

    #[test]
    fn empty_root_is_an_error() {
        let t = table();
        let c = Conjugator::new(&t);
        assert!(matches!(
            c.conjugate("er", pn(Person::First, Number::Singular), Tense::Present),
            Err(ConjugationError::EmptyRoot(_))
        ));

        let broken = VerbDescriptor::regular("vider", ConjugationGroup::First, "", true);
        let c = Conjugator::new(&t).with_overlay(&broken);
        assert!(matches!(
            c.conjugate("vider", pn(Person::First, Number::Singular), Tense::Present),
            Err(ConjugationError::EmptyRoot(_))
        ));
    }

    #[test]
    fn group_three_without_table_is_not_guessed() {
        let t = table();
        let mut verb = VerbDescriptor::regular("dire", ConjugationGroup::Third, "di", true);
        verb.irregular = None;
        let c = Conjugator::new(&t).with_overlay(&verb);
        assert!(matches!(
            c.conjugate("dire", pn(Person::First, Number::Singular), Tense::Present),
            Err(ConjugationError::UnknownVerb(_))
        ));

        let partial = VerbDescriptor::irregular(
            "dire",
            true,
            IrregularTable {
                present: Some(vec!["dis".to_string(); 6]),
                imperfect: None,
                past_participle: None,
            },
        );
        let c = Conjugator::new(&t).with_overlay(&partial);
        assert_eq!(
            c.conjugate("dire", pn(Person::First, Number::Singular), Tense::Present)
                .unwrap(),
            "dis"
        );
        assert!(matches!(
            c.conjugate("dire", pn(Person::First, Number::Singular), Tense::Imperfect),
            Err(ConjugationError::MissingIrregularForm { .. })
        ));
        assert!(matches!(
            c.conjugate("dire", pn(Person::First, Number::Singular), Tense::CompoundPast),
            Err(ConjugationError::MissingIrregularForm { .. })
        ));
    }

    #[test]
    fn reflexive_overlay_defaults_to_etre() {
        let t = table();
        let coiffer: VerbDescriptor = ron::from_str(
            r#"(infinitive: "coiffer", group: First, root: "coiff", reflexive: true)"#,
        )
        .unwrap();
        let c = Conjugator::new(&t).with_overlay(&coiffer);
        let phrase = c
            .verb_phrase(
                &coiffer,
                pn(Person::Third, Number::Singular),
                Gender::Feminine,
                Tense::CompoundPast,
            )
            .unwrap();
        assert_eq!(phrase.text(), "s'est coiffée");
        assert_eq!(
            c.conjugate("se coiffer", pn(Person::First, Number::Singular), Tense::CompoundPast)
                .unwrap(),
            "me suis coiffé"
        );
    }

    #[test]
    fn overlay_shadows_table_without_mutating_it() {
        let t = table();
        let custom = VerbDescriptor::irregular(
            "dormir",
            false,
            IrregularTable::new(["z"; 6], ["zz"; 6], "zzz"),
        );
        {
            let c = Conjugator::new(&t).with_overlay(&custom);
            assert_eq!(
                c.conjugate("dormir", pn(Person::First, Number::Singular), Tense::Present)
                    .unwrap(),
                "z"
            );
        }
        let c = Conjugator::new(&t);
        assert_eq!(
            c.conjugate("dormir", pn(Person::First, Number::Singular), Tense::Present)
                .unwrap(),
            "dors"
        );
    }
}
