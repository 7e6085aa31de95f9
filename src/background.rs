/// Background worker message handling

use crate::api::fetch_directory;
use crate::bridge;
use crate::config::ExtensionConfig;
use crate::error::Result;
use crate::session::{
    AckResponse, ExtensionMessage, FavoriteChannelsResponse, UserData, UserDataResponse, UserStatus,
};
use serde::Serialize;
use wasm_bindgen::JsValue;

/// Answer one runtime message
pub async fn handle_message(config: &ExtensionConfig, message: ExtensionMessage) -> Result<JsValue> {
    log::debug!("message received: {:?}", message);

    match message {
        ExtensionMessage::GetUserDataForApi => {
            let response = match bridge::load_user_data().await {
                Ok(stored) => UserDataResponse::from_stored(stored),
                Err(e) => UserDataResponse::failure(e.to_string()),
            };
            to_js(&response)
        }
        ExtensionMessage::GetFavoriteChannelsInfo => {
            let token = stored_user().await.map(|user| user.token);
            let directory = fetch_directory(config, token.as_deref()).await;
            to_js(&FavoriteChannelsResponse {
                success: true,
                favorite_channels_data: directory.records().to_vec(),
            })
        }
        ExtensionMessage::SetUserDataFromWeb {
            token,
            user_name,
            user_email,
            google_id,
        } => {
            let user = UserData {
                token,
                user_name,
                user_email,
                google_id,
            };
            let stored = bridge::store_user_data(&user).await;
            match &stored {
                Ok(()) => log::info!("user data stored"),
                Err(e) => log::error!("failed to store user data: {}", e),
            }
            to_js(&AckResponse {
                success: stored.is_ok(),
            })
        }
        ExtensionMessage::GetUserStatus => {
            let user = stored_user().await;
            to_js(&UserStatus::from_user_data(user.as_ref()))
        }
    }
}

async fn stored_user() -> Option<UserData> {
    match bridge::load_user_data().await {
        Ok(user) => user,
        Err(e) => {
            log::error!("failed to load user data: {}", e);
            None
        }
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue> {
    Ok(serde_wasm_bindgen::to_value(value)?)
}
