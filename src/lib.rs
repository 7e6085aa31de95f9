/// AscenTube - Chrome Extension marking favorite YouTube channels
/// Built with Rust + WASM + Yew

pub mod api;
pub mod background;
mod bridge;
pub mod channel_data;
pub mod config;
pub mod content;
pub mod directory;
pub mod dom;
pub mod error;
pub mod identifier;
pub mod modal;
pub mod page;
pub mod scanner;
pub mod scheduler;
pub mod session;
pub mod studio;
mod timer;
pub mod token_bridge;
pub mod ui;

use crate::config::CONFIG;
use crate::content::ContentScript;
use crate::session::ExtensionMessage;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

thread_local! {
    // Keeps the content script alive for the lifetime of the page
    static CONTENT_SCRIPT: RefCell<Option<Rc<ContentScript>>> = const { RefCell::new(None) };
}

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Re-export channel identifier extraction for JavaScript access
#[wasm_bindgen]
pub fn extract_channel_identifier(url: &str) -> Option<String> {
    identifier::extract_channel_identifier(url, identifier::DEFAULT_ORIGIN)
}

// Start favorite marking on a YouTube page
#[wasm_bindgen]
pub fn start_content_script() {
    if CONTENT_SCRIPT.with(|slot| slot.borrow().is_some()) {
        log::debug!("content script already running");
        return;
    }

    match ContentScript::start(CONFIG.clone()) {
        Ok(script) => CONTENT_SCRIPT.with(|slot| *slot.borrow_mut() = Some(script)),
        Err(e) => log::error!("content script failed to start: {}", e),
    }
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}

// Start the session hand-over on the dashboard site
#[wasm_bindgen]
pub fn start_token_bridge() {
    if let Err(e) = token_bridge::start(&CONFIG) {
        log::error!("token bridge failed to start: {}", e);
    }
}

// Add the dashboard shortcut to YouTube Studio
#[wasm_bindgen]
pub fn start_studio_button() {
    if let Err(e) = studio::start(&CONFIG) {
        log::error!("studio button failed to start: {}", e);
    }
}

// Answer a runtime message in the background worker
#[wasm_bindgen]
pub async fn handle_background_message(message: JsValue) -> Result<JsValue, JsValue> {
    let message: ExtensionMessage = serde_wasm_bindgen::from_value(message)
        .map_err(|e| JsValue::from_str(&format!("unknown message: {}", e)))?;

    background::handle_message(&CONFIG, message)
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
