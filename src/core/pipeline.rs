//! The sentence pipeline: request → skeleton → filled tokens.
//!
//! Wires together verb resolution, structure selection, the interrogative
//! rewrite, slot filling and rendering.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::path::Path;
use thiserror::Error;

use crate::core::assembler::{Assembler, SentencePlan};
use crate::core::conjugation::{ConjugationError, Conjugator, VerbTable};
use crate::core::lexicon::{Lexicon, LexiconError};
use crate::core::noun_group::NounGroupError;
use crate::core::render;
use crate::core::structure::{self, StructureError, StructureSelector};
use crate::schema::request::{
    GenerationRequest, GenerationResult, NegationMarker, Polarity, VerbRequest,
};
use crate::schema::verb::{Tense, VerbDescriptor};

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("conjugation error: {0}")]
    Conjugation(#[from] ConjugationError),
    #[error("noun group error: {0}")]
    NounGroup(#[from] NounGroupError),
    #[error("structure error: {0}")]
    Structure(#[from] StructureError),
    #[error("lexicon error: {0}")]
    Lexicon(#[from] LexiconError),
    #[error("invalid agreement: {0}")]
    InvalidAgreement(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Tunable draw probabilities. Pinned request fields always win over these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub seed: u64,
    /// Chance an unpinned sentence is a question.
    pub question_frequency: f64,
    /// Chance an unpinned sentence is negated.
    pub negation_frequency: f64,
    /// Tenses drawn when the request pins none.
    pub tenses: Vec<Tense>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            question_frequency: 0.15,
            negation_frequency: 0.25,
            tenses: Tense::ALL.to_vec(),
        }
    }
}

impl EngineConfig {
    pub fn load_from_ron(path: &Path) -> Result<Self, GenerationError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    pub fn parse_ron(input: &str) -> Result<Self, GenerationError> {
        Ok(ron::from_str(input)?)
    }
}

/// The top-level sentence engine. Built via `PhraseEngine::builder()`.
pub struct PhraseEngine {
    lexicon: Lexicon,
    verbs: VerbTable,
    selector: StructureSelector,
    config: EngineConfig,
    seed: u64,
    generation_count: u64,
}

/// Builder for constructing a `PhraseEngine`.
pub struct PhraseEngineBuilder {
    seed: Option<u64>,
    lexicon_files: Vec<String>,
    config_file: Option<String>,
    /// Directly provided base lexicon (replaces the built-in one).
    lexicon: Option<Lexicon>,
    /// Directly provided configuration (for testing without files).
    config: Option<EngineConfig>,
}

impl PhraseEngine {
    pub fn builder() -> PhraseEngineBuilder {
        PhraseEngineBuilder {
            seed: None,
            lexicon_files: Vec::new(),
            config_file: None,
            lexicon: None,
            config: None,
        }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Restart the deterministic sequence from a new seed.
    pub fn reset(&mut self, seed: u64) {
        self.seed = seed;
        self.generation_count = 0;
    }

    /// Generate one sentence, seeding the random source from the engine
    /// seed and the number of sentences generated so far.
    pub fn generate_sentence(
        &mut self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, GenerationError> {
        let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(self.generation_count));
        self.generation_count += 1;
        self.generate_sentence_with(request, &mut rng)
    }

    /// Generate `count` sentences for the same request.
    pub fn generate_batch(
        &mut self,
        request: &GenerationRequest,
        count: usize,
    ) -> Result<Vec<GenerationResult>, GenerationError> {
        let mut results = Vec::with_capacity(count);
        for _ in 0..count {
            results.push(self.generate_sentence(request)?);
        }
        Ok(results)
    }

    /// Generate one sentence with a caller-supplied random source.
    pub fn generate_sentence_with<R: Rng + ?Sized>(
        &self,
        request: &GenerationRequest,
        rng: &mut R,
    ) -> Result<GenerationResult, GenerationError> {
        // 1. Tense, polarity, mood
        let tense = match request.tense {
            Some(t) => t,
            None => *self.config.tenses.choose(rng).unwrap_or(&Tense::Present),
        };
        let polarity = self.polarity(request, rng)?;
        let interrogative = self.interrogative(request, rng)?;

        // 2. Resolve a pinned verb; a custom descriptor shadows the table
        let mut conjugator = Conjugator::new(&self.verbs);
        let verb: Option<Cow<'_, VerbDescriptor>> = match request.verb {
            Some(VerbRequest::Infinitive(ref infinitive)) => Some(conjugator.resolve(infinitive)?),
            Some(VerbRequest::Custom(ref descriptor)) => {
                conjugator = conjugator.with_overlay(descriptor);
                Some(conjugator.resolve(&descriptor.infinitive)?)
            }
            None => None,
        };

        // 3. Pick the skeleton
        let required = structure::implied_tags(request, verb.as_deref());
        let mut skeleton = self
            .selector
            .select(request.skeleton.as_ref(), &required, rng)?;
        if interrogative {
            skeleton = structure::to_interrogative(&skeleton);
        }

        // 4. Fill it
        let plan = SentencePlan {
            skeleton,
            tense,
            polarity,
            verb: verb.as_deref(),
        };
        let result = Assembler::new(&self.lexicon, conjugator).assemble(&plan, request, rng)?;
        log::debug!("generated: {}", render::render(&result));
        Ok(result)
    }

    pub fn render(&self, result: &GenerationResult) -> String {
        render::render(result)
    }

    /// A pinned question skeleton forces a question.
    fn interrogative<R: Rng + ?Sized>(
        &self,
        request: &GenerationRequest,
        rng: &mut R,
    ) -> Result<bool, GenerationError> {
        let pinned_question = request
            .skeleton
            .as_ref()
            .is_some_and(|s| s.is_interrogative());
        match (request.interrogative, pinned_question) {
            (Some(false), true) => Err(GenerationError::InvalidAgreement(
                "interrogative skeleton pinned on a declarative request".to_string(),
            )),
            (Some(q), false) => Ok(q),
            (_, true) => Ok(true),
            (None, false) => Ok(rng.gen_bool(probability(self.config.question_frequency))),
        }
    }

    fn polarity<R: Rng + ?Sized>(
        &self,
        request: &GenerationRequest,
        rng: &mut R,
    ) -> Result<Polarity, GenerationError> {
        let negated = match (request.negated, request.negation_marker) {
            (Some(false), Some(marker)) => {
                return Err(GenerationError::InvalidAgreement(format!(
                    "negation marker '{}' pinned on an affirmative request",
                    marker.text()
                )))
            }
            (_, Some(marker)) => return Ok(Polarity::Negated(marker)),
            (Some(negated), None) => negated,
            (None, None) => rng.gen_bool(probability(self.config.negation_frequency)),
        };
        if !negated {
            return Ok(Polarity::Affirmative);
        }
        let marker = *NegationMarker::ALL.choose(rng).unwrap_or(&NegationMarker::Pas);
        Ok(Polarity::Negated(marker))
    }
}

/// Clamp a configured frequency into `[0, 1]`; NaN reads as never.
fn probability(p: f64) -> f64 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}

impl PhraseEngineBuilder {
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Merge a RON lexicon overlay onto the base lexicon. May be called
    /// several times; later files win on verb conflicts.
    pub fn lexicon_file(mut self, path: &str) -> Self {
        self.lexicon_files.push(path.to_string());
        self
    }

    pub fn config_file(mut self, path: &str) -> Self {
        self.config_file = Some(path.to_string());
        self
    }

    /// Provide the base lexicon directly instead of the built-in French one.
    pub fn with_lexicon(mut self, lexicon: Lexicon) -> Self {
        self.lexicon = Some(lexicon);
        self
    }

    /// Provide configuration directly (for testing without files).
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn build(self) -> Result<PhraseEngine, GenerationError> {
        let mut lexicon = self.lexicon.unwrap_or_else(Lexicon::french);

        // Overlays extend the base tables
        for path in &self.lexicon_files {
            let overlay = Lexicon::load_from_ron(Path::new(path))?;
            lexicon.merge(overlay);
            log::info!("merged lexicon overlay {}", path);
        }

        let config = match self.config_file {
            Some(ref path) => {
                let config = EngineConfig::load_from_ron(Path::new(path))?;
                log::info!("loaded engine config {}", path);
                config
            }
            None => self.config.unwrap_or_default(),
        };

        let verbs = VerbTable::from_lexicon(&lexicon);
        Ok(PhraseEngine {
            lexicon,
            verbs,
            selector: StructureSelector::default(),
            seed: self.seed.unwrap_or(config.seed),
            config,
            generation_count: 0,
        })
    }
}
