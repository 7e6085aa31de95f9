/// Messages exchanged between the content scripts, popup and background worker
use crate::channel_data::FavoriteChannelRecord;
use serde::{Deserialize, Serialize};

/// `chrome.storage.local` key holding the signed-in user
pub const USER_DATA_STORAGE_KEY: &str = "ascenTubeUserData";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExtensionMessage {
    GetUserDataForApi,
    GetFavoriteChannelsInfo,
    #[serde(rename_all = "camelCase")]
    SetUserDataFromWeb {
        token: String,
        user_name: Option<String>,
        user_email: Option<String>,
        google_id: Option<String>,
    },
    GetUserStatus,
}

/// Session handed over from the dashboard after login
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct UserData {
    pub token: String,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
    pub google_id: Option<String>,
}

impl UserData {
    pub fn has_token(&self) -> bool {
        !self.token.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct UserDataResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_data: Option<UserData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UserDataResponse {
    pub fn from_stored(stored: Option<UserData>) -> Self {
        match stored {
            Some(data) if data.has_token() => UserDataResponse {
                success: true,
                user_data: Some(data),
                error: None,
            },
            _ => Self::failure("no stored session token"),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        UserDataResponse {
            success: false,
            user_data: None,
            error: Some(error.into()),
        }
    }

    /// Token usable for API calls, if the response carries one
    pub fn token(&self) -> Option<&str> {
        if !self.success {
            return None;
        }
        self.user_data
            .as_ref()
            .filter(|data| data.has_token())
            .map(|data| data.token.as_str())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FavoriteChannelsResponse {
    pub success: bool,
    pub favorite_channels_data: Vec<FavoriteChannelRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AckResponse {
    pub success: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct UserStatus {
    pub is_logged_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

impl UserStatus {
    pub fn from_user_data(data: Option<&UserData>) -> Self {
        match data {
            Some(data) if data.has_token() => UserStatus {
                is_logged_in: true,
                user_name: data.user_name.clone().filter(|name| !name.is_empty()),
            },
            _ => UserStatus::default(),
        }
    }
}
