pub mod client;
pub mod config;
pub mod error;
pub mod extract;
pub mod format;
pub mod ir;
pub mod logging;
pub mod prompt;
pub mod render;
pub mod service;

use wasm_bindgen::prelude::*;

pub use error::{SchemaError, ValidationError};
pub use extract::extract;
pub use format::Format;
pub use ir::Schema;
pub use service::SchemaService;

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

/// Recover a schema from model output, returned as JSON
#[wasm_bindgen(js_name = "extractSchema")]
pub fn extract_schema(raw: &str) -> Result<String, String> {
    let schema = extract(raw).map_err(|e| e.to_string())?;
    serde_json::to_string(&schema).map_err(|e| e.to_string())
}

/// Render a schema JSON document in the given format
#[wasm_bindgen(js_name = "exportSchema")]
pub fn export_schema(schema_json: &str, format: &str) -> Result<String, String> {
    let value = serde_json::from_str(schema_json).map_err(|e| e.to_string())?;
    let schema = Schema::from_value(value).map_err(|e| SchemaError::from(e).to_string())?;
    format::render(&schema, format).map_err(|e| e.to_string())
}

/// Example application descriptions as a JS array
#[wasm_bindgen(js_name = "schemaExamples")]
pub fn schema_examples() -> Result<JsValue, JsValue> {
    let json = serde_json::to_string(&service::examples())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    js_sys::JSON::parse(&json)
}
