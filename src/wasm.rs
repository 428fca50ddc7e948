//! WASM API module for browser/JS interop
//!
//! Provides WebAssembly bindings so a browser form can generate snippets and
//! options objects from its JSON snapshot.

use wasm_bindgen::prelude::*;

use crate::emit::{build_code, GenerationResult};
use crate::error::GenerateError;
use crate::form::FormSnapshot;
use crate::options;
use crate::schema::{ANIMATION_FIELDS, PROP_FIELDS};

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Result of generating a snippet.
#[wasm_bindgen]
pub struct GenerateOutput {
    code: String,
    missing_fields: Vec<String>,
    error: Option<String>,
}

#[wasm_bindgen]
impl GenerateOutput {
    /// True when a snippet was produced
    #[wasm_bindgen(getter)]
    pub fn valid(&self) -> bool {
        self.error.is_none() && self.missing_fields.is_empty()
    }

    /// Generated snippet (empty unless valid)
    #[wasm_bindgen(getter)]
    pub fn code(&self) -> String {
        self.code.clone()
    }

    /// Labels of missing required fields
    #[wasm_bindgen(getter, js_name = missingFields)]
    pub fn missing_fields(&self) -> Vec<String> {
        self.missing_fields.clone()
    }

    /// Set when the form JSON could not be parsed
    #[wasm_bindgen(getter)]
    pub fn error(&self) -> Option<String> {
        self.error.clone()
    }
}

/// Result of building a live-preview options object.
#[wasm_bindgen]
pub struct OptionsOutput {
    json: String,
    error: Option<String>,
}

#[wasm_bindgen]
impl OptionsOutput {
    /// Options object as JSON (empty on error)
    #[wasm_bindgen(getter)]
    pub fn json(&self) -> String {
        self.json.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn error(&self) -> Option<String> {
        self.error.clone()
    }
}

/// Generate the snippet for a form snapshot.
///
/// # Arguments
/// * `form_json` - Form snapshot as JSON (`{"dict": ..., "props": [...]}`)
#[wasm_bindgen]
pub fn generate(form_json: &str) -> GenerateOutput {
    let form = match FormSnapshot::from_json(form_json) {
        Ok(form) => form,
        Err(e) => {
            return GenerateOutput {
                code: String::new(),
                missing_fields: Vec::new(),
                error: Some(GenerateError::from(e).to_string()),
            }
        }
    };

    match build_code(&form) {
        GenerationResult::Valid { code } => {
            GenerateOutput { code, missing_fields: Vec::new(), error: None }
        }
        GenerationResult::Invalid { missing_fields } => GenerateOutput {
            code: String::new(),
            missing_fields: missing_fields.iter().map(|m| m.to_string()).collect(),
            error: None,
        },
    }
}

/// Build the options object the host plays for a live preview.
#[wasm_bindgen]
pub fn build_options(form_json: &str) -> OptionsOutput {
    let result = FormSnapshot::from_json(form_json)
        .map_err(GenerateError::from)
        .and_then(|form| options::build_options(&form))
        .and_then(|options| options.to_json(false).map_err(GenerateError::from));

    match result {
        Ok(json) => OptionsOutput { json, error: None },
        Err(e) => OptionsOutput { json: String::new(), error: Some(e.to_string()) },
    }
}

/// Both field schemas as JSON, for building the form.
#[wasm_bindgen]
pub fn field_schema() -> String {
    serde_json::json!({ "animation": ANIMATION_FIELDS, "prop": PROP_FIELDS }).to_string()
}
