/// Dashboard-side script that hands the login session to the extension

use crate::bridge;
use crate::config::ExtensionConfig;
use crate::error::{ExtensionError, Result};
use crate::session::{AckResponse, ExtensionMessage};
use crate::timer::run_later;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// Dispatched by the dashboard once it has saved a fresh token
pub const TOKEN_STORED_EVENT: &str = "ascenTubeTokenStored";

const TOKEN_KEY: &str = "access_token";
const GOOGLE_ID_KEY: &str = "user_google_id";
const USER_NAME_KEY: &str = "user_name";
const USER_EMAIL_KEY: &str = "user_email";

/// Build the hand-over message from dashboard storage
///
/// Both the token and the Google ID are required.
pub fn session_message<F>(read: F) -> Option<ExtensionMessage>
where
    F: Fn(&str) -> Option<String>,
{
    let present = |key: &str| read(key).filter(|value| !value.is_empty());

    let token = present(TOKEN_KEY)?;
    let google_id = present(GOOGLE_ID_KEY)?;

    Some(ExtensionMessage::SetUserDataFromWeb {
        token,
        user_name: present(USER_NAME_KEY),
        user_email: present(USER_EMAIL_KEY),
        google_id: Some(google_id),
    })
}

pub fn start(config: &ExtensionConfig) -> Result<()> {
    let window = web_sys::window().ok_or_else(|| ExtensionError::Dom("no window".to_string()))?;

    let on_token_stored = Closure::<dyn FnMut()>::new(|| {
        log::info!("{} received", TOKEN_STORED_EVENT);
        spawn_local(sync_session());
    });
    window
        .add_event_listener_with_callback(TOKEN_STORED_EVENT, on_token_stored.as_ref().unchecked_ref())
        .map_err(ExtensionError::dom)?;
    on_token_stored.forget();

    // Also pick up a session saved before this script loaded
    run_later(config.token_bridge_delay_ms, || spawn_local(sync_session()))
}

async fn sync_session() {
    let Some(message) = read_local_storage().and_then(|storage| {
        session_message(|key| storage.get_item(key).ok().flatten())
    }) else {
        log::warn!("no dashboard session found in localStorage");
        return;
    };

    match bridge::send_message::<AckResponse>(&message).await {
        Ok(ack) if ack.success => log::info!("session handed to extension"),
        Ok(_) => log::warn!("extension did not store the session"),
        Err(e) => log::error!("session hand-over failed: {}", e),
    }
}

fn read_local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}
