/// Favorite channel fetch against the AscenTube backend

use crate::config::ExtensionConfig;
use crate::directory::ChannelDirectory;
use crate::error::{ExtensionError, Result};
use gloo_net::http::Request;
use serde_json::Value;

/// Fetch the signed-in user's favorite channels
///
/// Never fails: a missing token, network error, non-2xx status or
/// malformed body all produce an empty directory.
pub async fn fetch_directory(config: &ExtensionConfig, token: Option<&str>) -> ChannelDirectory {
    match try_fetch_directory(config, token).await {
        Ok(directory) => {
            log::info!("loaded {} favorite channels", directory.len());
            directory
        }
        Err(ExtensionError::MissingToken) => {
            log::warn!("no session token, skipping favorites request");
            ChannelDirectory::empty()
        }
        Err(e) => {
            log::error!("favorites request failed: {}", e);
            ChannelDirectory::empty()
        }
    }
}

async fn try_fetch_directory(config: &ExtensionConfig, token: Option<&str>) -> Result<ChannelDirectory> {
    let token = usable_token(token).ok_or(ExtensionError::MissingToken)?;
    let url = config.favorite_channels_url();

    log::debug!("GET {}", url);
    let response = Request::get(&url)
        .header("Authorization", &bearer(token))
        .send()
        .await?;

    if !response.ok() {
        return Err(ExtensionError::Status(response.status()));
    }

    let body = response.text().await?;
    let value: Value = serde_json::from_str(&body)?;
    Ok(ChannelDirectory::from_api_value(&value))
}

fn usable_token(token: Option<&str>) -> Option<&str> {
    token.map(str::trim).filter(|t| !t.is_empty())
}

fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usable_token() {
        assert_eq!(usable_token(Some("abc")), Some("abc"));
        assert_eq!(usable_token(Some(" abc ")), Some("abc"));
        assert_eq!(usable_token(Some("   ")), None);
        assert_eq!(usable_token(None), None);
    }

    #[test]
    fn test_bearer() {
        assert_eq!(bearer("abc"), "Bearer abc");
    }
}
