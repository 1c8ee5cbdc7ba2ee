//! Fills a skeleton's slots and flattens them into tokens.

use rand::Rng;

use crate::core::conjugation::Conjugator;
use crate::core::lexicon::{Category, Lexicon};
use crate::core::morphology;
use crate::core::noun_group::NounGroupBuilder;
use crate::core::pipeline::GenerationError;
use crate::core::structure;
use crate::schema::phrase::LocativeComplement;
use crate::schema::request::{
    GenerationRequest, GenerationResult, LocativeRequest, NounGroupRequest, Polarity, Subject,
    SubjectRequest,
};
use crate::schema::skeleton::{Skeleton, SlotTag};
use crate::schema::verb::{Tense, VerbDescriptor};
use crate::schema::word::{Pronoun, Word, WordKind};

/// Everything decided before slot filling starts.
#[derive(Debug, Clone)]
pub struct SentencePlan<'v> {
    pub skeleton: Skeleton,
    pub tense: Tense,
    pub polarity: Polarity,
    /// Resolved pinned verb; drawn from the lexicon when `None`.
    pub verb: Option<&'v VerbDescriptor>,
}

pub struct Assembler<'a> {
    lexicon: &'a Lexicon,
    conjugator: Conjugator<'a>,
}

impl<'a> Assembler<'a> {
    pub fn new(lexicon: &'a Lexicon, conjugator: Conjugator<'a>) -> Self {
        Self {
            lexicon,
            conjugator,
        }
    }

    /// Draw or take every piece the skeleton asks for, conjugate the verb
    /// against the subject, and lay the sentence out as tokens.
    pub fn assemble<R: Rng + ?Sized>(
        &self,
        plan: &SentencePlan<'_>,
        request: &GenerationRequest,
        rng: &mut R,
    ) -> Result<GenerationResult, GenerationError> {
        let skeleton = &plan.skeleton;
        let groups = NounGroupBuilder::new(self.lexicon);

        let subject = self.subject(skeleton, request.subject.as_ref(), &groups, rng)?;
        let person = subject.person_number();

        let verb = match plan.verb {
            Some(v) => v,
            None => {
                let transitive = skeleton.verb_slot() == Some(SlotTag::TransitiveVerb);
                self.lexicon.pick_verb(transitive, rng)?
            }
        };
        let phrase = self
            .conjugator
            .verb_phrase(verb, person, subject.gender(), plan.tense)?;

        let object = if skeleton.contains(SlotTag::ObjectNounGroup) {
            let pins = request.object.clone().unwrap_or_default();
            Some(groups.build(&pins, rng)?)
        } else {
            None
        };

        let adverbial = if skeleton.contains(SlotTag::Adverbial) {
            Some(match request.adverbial {
                Some(ref a) => a.clone(),
                None => self.lexicon.pick(Category::Adverb, None, rng)?.to_string(),
            })
        } else {
            None
        };

        let locative = if skeleton.contains(SlotTag::LocativeComplement) {
            Some(self.locative(request.locative.as_ref(), &groups, rng)?)
        } else {
            None
        };

        let mut tokens = Vec::new();
        let mut slots = skeleton.slots.iter().copied().peekable();
        while let Some(slot) = slots.next() {
            match slot {
                SlotTag::SubjectPronoun => {
                    if let Subject::Pronoun(p) = &subject {
                        tokens.push(Word::clitic(p.text()));
                    }
                }
                SlotTag::SubjectNounGroup => {
                    if let Subject::NounGroup(ref g) = subject {
                        tokens.extend(g.words.iter().cloned());
                    }
                }
                SlotTag::Verb | SlotTag::TransitiveVerb => {
                    let inverts = slots.peek() == Some(&SlotTag::InversionHyphen);
                    let inverted = match &subject {
                        Subject::Pronoun(p) if inverts => {
                            // hyphen and pronoun travel with the verb
                            slots.next();
                            if slots.peek() == Some(&SlotTag::SubjectPronoun) {
                                slots.next();
                            }
                            Some(*p)
                        }
                        _ => None,
                    };
                    tokens.extend(structure::verb_tokens(
                        &phrase,
                        plan.polarity.marker(),
                        inverted,
                    ));
                }
                SlotTag::ObjectNounGroup => {
                    if let Some(ref g) = object {
                        tokens.extend(g.words.iter().cloned());
                    }
                }
                SlotTag::Adverbial => {
                    if let Some(ref a) = adverbial {
                        tokens.push(Word::plain(a.clone()));
                    }
                }
                SlotTag::LocativeComplement => {
                    if let Some(ref l) = locative {
                        tokens.push(Word::plain(l.preposition.clone()));
                        tokens.extend(l.group.words.iter().cloned());
                    }
                }
                SlotTag::Comma => tokens.push(Word::plain(",")),
                SlotTag::QuestionMarker => tokens.push(Word::plain("?")),
                SlotTag::InversionHyphen => {}
                SlotTag::InterrogativePrefix => {
                    tokens.push(Word::plain("Est-ce"));
                    tokens.push(Word::clitic("que"));
                }
            }
        }
        elide_clitics(&mut tokens);

        log::debug!(
            "assembled {:?} {:?} sentence with {} tokens",
            plan.tense,
            plan.polarity,
            tokens.len()
        );

        Ok(GenerationResult {
            skeleton: skeleton.clone(),
            tense: plan.tense,
            polarity: plan.polarity,
            interrogative: skeleton.is_interrogative(),
            person,
            subject,
            verb: verb.citation(),
            conjugated: phrase.text(),
            object,
            adverbial,
            locative,
            tokens,
        })
    }

    fn subject<R: Rng + ?Sized>(
        &self,
        skeleton: &Skeleton,
        pins: Option<&SubjectRequest>,
        groups: &NounGroupBuilder<'_>,
        rng: &mut R,
    ) -> Result<Subject, GenerationError> {
        if skeleton.uses_pronoun_subject() {
            let pronoun = match pins {
                Some(SubjectRequest::Pronoun(p)) => *p,
                Some(SubjectRequest::Person {
                    person,
                    number,
                    gender,
                }) => Pronoun::lookup(*gender, *number, *person).ok_or_else(|| {
                    GenerationError::InvalidAgreement(format!(
                        "no {:?} {:?} pronoun without a gender",
                        person, number
                    ))
                })?,
                _ => Pronoun::pick(rng),
            };
            return Ok(Subject::Pronoun(pronoun));
        }

        let pins = match pins {
            Some(SubjectRequest::NounGroup(g)) => g.clone(),
            _ => NounGroupRequest::default(),
        };
        Ok(Subject::NounGroup(groups.build(&pins, rng)?))
    }

    fn locative<R: Rng + ?Sized>(
        &self,
        pins: Option<&LocativeRequest>,
        groups: &NounGroupBuilder<'_>,
        rng: &mut R,
    ) -> Result<LocativeComplement, GenerationError> {
        let preposition = match pins.and_then(|l| l.preposition.clone()) {
            Some(p) => p,
            None => self
                .lexicon
                .pick(Category::LocativePreposition, None, rng)?
                .to_string(),
        };
        let group_pins = pins.and_then(|l| l.group.clone()).unwrap_or_default();
        let mut group = groups.build(&group_pins, rng)?;
        let preposition = morphology::contract_locative(&preposition, &mut group);
        Ok(LocativeComplement { preposition, group })
    }
}

/// Elide every clitic against the token that follows it.
fn elide_clitics(tokens: &mut [Word]) {
    for i in 0..tokens.len().saturating_sub(1) {
        if tokens[i].kind != WordKind::Clitic {
            continue;
        }
        let next = tokens[i + 1].text.clone();
        tokens[i] = morphology::elide_word(&tokens[i], &next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::conjugation::VerbTable;
    use crate::schema::request::NegationMarker;
    use crate::schema::word::{Gender, Number, Person};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use SlotTag::*;

    struct Fixture {
        lexicon: Lexicon,
        table: VerbTable,
    }

    impl Fixture {
        fn new() -> Self {
            let lexicon = Lexicon::french();
            let table = VerbTable::from_lexicon(&lexicon);
            Self { lexicon, table }
        }

        fn run(
            &self,
            slots: &[SlotTag],
            tense: Tense,
            polarity: Polarity,
            verb: &str,
            request: GenerationRequest,
        ) -> GenerationResult {
            let conjugator = Conjugator::new(&self.table);
            let verb = self.table.get(verb).unwrap();
            let plan = SentencePlan {
                skeleton: Skeleton::new(slots),
                tense,
                polarity,
                verb: Some(verb),
            };
            let mut rng = StdRng::seed_from_u64(9);
            Assembler::new(&self.lexicon, conjugator)
                .assemble(&plan, &request, &mut rng)
                .unwrap()
        }
    }

    fn object(specifier: &str, noun: &str) -> NounGroupRequest {
        NounGroupRequest::default()
            .specifier(specifier)
            .noun(noun)
            .adjectives(&[])
    }

    #[test]
    fn preverbal_je_elides_before_vowel() {
        let f = Fixture::new();
        let r = f.run(
            &[SubjectPronoun, TransitiveVerb, ObjectNounGroup],
            Tense::Present,
            Polarity::Affirmative,
            "aimer",
            GenerationRequest::new()
                .pronoun(Pronoun::Je)
                .object(object("la", "voiture")),
        );
        assert_eq!(r.token_texts(), vec!["j'", "aime", "la", "voiture"]);
    }

    #[test]
    fn negated_je_keeps_full_form() {
        let f = Fixture::new();
        let r = f.run(
            &[SubjectPronoun, Verb],
            Tense::Present,
            Polarity::Negated(NegationMarker::Pas),
            "arriver",
            GenerationRequest::new().pronoun(Pronoun::Je),
        );
        assert_eq!(r.token_texts(), vec!["je", "n'", "arrive", "pas"]);
    }

    #[test]
    fn inverted_compound_past() {
        let f = Fixture::new();
        let r = f.run(
            &[TransitiveVerb, InversionHyphen, SubjectPronoun, ObjectNounGroup, QuestionMarker],
            Tense::CompoundPast,
            Polarity::Negated(NegationMarker::Pas),
            "manger",
            GenerationRequest::new()
                .pronoun(Pronoun::Il)
                .object(object("le", "chou")),
        );
        assert_eq!(
            r.token_texts(),
            vec!["n'", "a", "-t-", "il", "pas", "mangé", "le", "chou", "?"]
        );
        assert!(r.interrogative);
        assert_eq!(r.conjugated, "a mangé");
    }

    #[test]
    fn prefix_question_elides_que() {
        let f = Fixture::new();
        let r = f.run(
            &[InterrogativePrefix, SubjectNounGroup, Verb, QuestionMarker],
            Tense::Present,
            Polarity::Affirmative,
            "dormir",
            GenerationRequest::new().subject(SubjectRequest::NounGroup(object("un", "oiseau"))),
        );
        assert_eq!(r.token_texts(), vec!["Est-ce", "qu'", "un", "oiseau", "dort", "?"]);
    }

    #[test]
    fn locative_contracts_after_elision() {
        let f = Fixture::new();
        let r = f.run(
            &[SubjectPronoun, Verb, LocativeComplement],
            Tense::Present,
            Polarity::Affirmative,
            "marcher",
            GenerationRequest::new()
                .pronoun(Pronoun::Nous)
                .locative(LocativeRequest {
                    preposition: Some("à".to_string()),
                    group: Some(object("le", "bois")),
                }),
        );
        assert_eq!(r.token_texts(), vec!["nous", "marchons", "au", "bois"]);
        let loc = r.locative.unwrap();
        assert_eq!(loc.preposition, "au");
        assert_eq!(loc.group.specifier, "le");
    }

    #[test]
    fn reflexive_compound_past_agrees_with_subject() {
        let f = Fixture::new();
        let r = f.run(
            &[SubjectNounGroup, Verb],
            Tense::CompoundPast,
            Polarity::Affirmative,
            "amuser",
            GenerationRequest::new().subject(SubjectRequest::NounGroup(
                NounGroupRequest::default()
                    .specifier("les")
                    .noun("tente")
                    .adjectives(&[]),
            )),
        );
        assert_eq!(r.token_texts(), vec!["les", "tentes", "se", "sont", "amusées"]);
        assert_eq!(r.verb, "s'amuser");
    }

    #[test]
    fn person_lookup_needs_gender_in_third_person() {
        let f = Fixture::new();
        let conjugator = Conjugator::new(&f.table);
        let plan = SentencePlan {
            skeleton: Skeleton::new(&[SubjectPronoun, Verb]),
            tense: Tense::Present,
            polarity: Polarity::Affirmative,
            verb: f.table.get("marcher"),
        };
        let request = GenerationRequest::new().subject(SubjectRequest::Person {
            person: Person::Third,
            number: Number::Plural,
            gender: None,
        });
        let mut rng = StdRng::seed_from_u64(1);
        let err = Assembler::new(&f.lexicon, conjugator)
            .assemble(&plan, &request, &mut rng)
            .unwrap_err();
        assert!(matches!(err, GenerationError::InvalidAgreement(_)));

        let request = GenerationRequest::new().subject(SubjectRequest::Person {
            person: Person::Third,
            number: Number::Plural,
            gender: Some(Gender::Feminine),
        });
        let r = Assembler::new(&f.lexicon, conjugator)
            .assemble(&plan, &request, &mut rng)
            .unwrap();
        assert_eq!(r.token_texts(), vec!["elles", "marchent"]);
    }
}
