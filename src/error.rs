use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum ExtensionError {
    #[error("DOM operation failed: {0}")]
    Dom(String),

    #[error("request failed: {0}")]
    Network(#[from] gloo_net::Error),

    #[error("server responded with HTTP {0}")]
    Status(u16),

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("extension bridge call failed: {0}")]
    Bridge(String),

    #[error("no session token available")]
    MissingToken,
}

impl ExtensionError {
    pub fn dom(err: JsValue) -> Self {
        ExtensionError::Dom(format!("{:?}", err))
    }

    pub fn bridge(err: JsValue) -> Self {
        ExtensionError::Bridge(format!("{:?}", err))
    }
}

impl From<serde_wasm_bindgen::Error> for ExtensionError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        ExtensionError::Bridge(err.to_string())
    }
}

pub type Result<T, E = ExtensionError> = std::result::Result<T, E>;
