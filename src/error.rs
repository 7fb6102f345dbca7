use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage is not available")]
    Unavailable,
    #[error("storage call failed: {0}")]
    Js(String),
}

impl From<JsValue> for StorageError {
    fn from(value: JsValue) -> Self {
        StorageError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate record id: {0}")]
    DuplicateId(String),
}
