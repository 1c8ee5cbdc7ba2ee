//! WASM bindings for phrase-engine: powers the one-button web demo.

use wasm_bindgen::prelude::*;

use phrase_engine::core::pipeline::PhraseEngine;
use phrase_engine::schema::request::{GenerationRequest, GenerationResult};

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(serde::Serialize)]
struct SentenceInfo<'a> {
    text: String,
    result: &'a GenerationResult,
}

// ---------------------------------------------------------------------------
// PhraseDemo: the main exported struct
// ---------------------------------------------------------------------------
#[wasm_bindgen]
pub struct PhraseDemo {
    engine: PhraseEngine,
}

#[wasm_bindgen]
impl PhraseDemo {
    /// Create a new demo instance with the built-in lexicon.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> Result<PhraseDemo, JsError> {
        let engine = PhraseEngine::builder()
            .seed(seed)
            .build()
            .map_err(|e| JsError::new(&format!("Engine build error: {e}")))?;
        Ok(PhraseDemo { engine })
    }

    /// Generate and render one unconstrained sentence.
    pub fn sentence(&mut self) -> Result<String, JsError> {
        let result = self.generate(&GenerationRequest::new())?;
        Ok(self.engine.render(&result))
    }

    /// Generate one sentence and return `{ text, result }` as JSON.
    pub fn sentence_json(&mut self) -> Result<String, JsError> {
        let result = self.generate(&GenerationRequest::new())?;
        to_json(&result, &self.engine)
    }

    /// Generate one sentence under the pins of a JSON `GenerationRequest`.
    ///
    /// Example: `{"tense": "CompoundPast", "negated": true}`.
    pub fn sentence_for(&mut self, request_json: &str) -> Result<String, JsError> {
        let request: GenerationRequest = serde_json::from_str(request_json)
            .map_err(|e| JsError::new(&format!("Invalid request JSON: {e}")))?;
        let result = self.generate(&request)?;
        to_json(&result, &self.engine)
    }

    /// Generate `count` rendered sentences. Returns a JSON array of strings.
    pub fn sentences(&mut self, count: usize) -> Result<String, JsError> {
        let results = self
            .engine
            .generate_batch(&GenerationRequest::new(), count)
            .map_err(|e| JsError::new(&format!("Generation error: {e}")))?;
        let texts: Vec<String> = results.iter().map(|r| self.engine.render(r)).collect();
        serde_json::to_string(&texts)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Restart the sequence from a new seed.
    pub fn reset(&mut self, seed: u64) {
        self.engine.reset(seed);
    }
}

impl PhraseDemo {
    fn generate(&mut self, request: &GenerationRequest) -> Result<GenerationResult, JsError> {
        self.engine
            .generate_sentence(request)
            .map_err(|e| JsError::new(&format!("Generation error: {e}")))
    }
}

fn to_json(result: &GenerationResult, engine: &PhraseEngine) -> Result<String, JsError> {
    let info = SentenceInfo {
        text: engine.render(result),
        result,
    };
    serde_json::to_string(&info).map_err(|e| JsError::new(&format!("Serialization error: {e}")))
}
