/// Typed access to the chrome.* APIs exposed by `chrome_bridge.js`

use crate::error::{self, ExtensionError};
use crate::session::{ExtensionMessage, UserData, USER_DATA_STORAGE_KEY};
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

// Import JS bridge functions
#[wasm_bindgen(module = "/chrome_bridge.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn sendRuntimeMessage(message: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn getStorage(key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setStorage(key: &str, value: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    fn runtimeUrl(path: &str) -> Result<String, JsValue>;
}

/// Send a message to the background worker and decode its reply
pub async fn send_message<T: DeserializeOwned>(message: &ExtensionMessage) -> error::Result<T> {
    let message_js = serde_wasm_bindgen::to_value(message)?;
    let reply = sendRuntimeMessage(message_js)
        .await
        .map_err(ExtensionError::bridge)?;

    if reply.is_null() || reply.is_undefined() {
        return Err(ExtensionError::Bridge(format!("no reply to {:?}", message)));
    }
    Ok(serde_wasm_bindgen::from_value(reply)?)
}

pub async fn load_user_data() -> error::Result<Option<UserData>> {
    let stored = getStorage(USER_DATA_STORAGE_KEY)
        .await
        .map_err(ExtensionError::bridge)?;

    if stored.is_null() || stored.is_undefined() {
        Ok(None)
    } else {
        Ok(Some(serde_wasm_bindgen::from_value(stored)?))
    }
}

pub async fn store_user_data(data: &UserData) -> error::Result<()> {
    let data_js = serde_wasm_bindgen::to_value(data)?;
    setStorage(USER_DATA_STORAGE_KEY, data_js)
        .await
        .map_err(ExtensionError::bridge)
}

/// URL of a file packaged with the extension
pub fn packaged_url(path: &str) -> error::Result<String> {
    runtimeUrl(path).map_err(ExtensionError::bridge)
}
