use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("DOM call failed: {0}")]
    Js(String),
    #[error("invalid settings: {0}")]
    Settings(#[from] serde_json::Error),
}

impl From<JsValue> for BehaviorError {
    fn from(value: JsValue) -> Self {
        BehaviorError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}
