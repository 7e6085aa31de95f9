/// Data structures for favorite channels
use crate::identifier::extract_handle;
use serde::{Deserialize, Serialize};

/// Shown when the backend has no display name for a channel
pub const UNNAMED_CHANNEL: &str = "이름 없음";

/// A favorite channel as returned by the backend favorites endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FavoriteChannelDto {
    pub fav_id: Option<i64>,
    pub cnl_id: Option<String>,
    pub cnl_name: Option<String>,
    pub cnl_url: Option<String>,
    pub cnl_memo: Option<String>,
}

/// A favorite channel, keyed by channel ID and/or handle
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteChannelRecord {
    #[serde(rename = "ucId")]
    pub channel_id: Option<String>,
    pub handle: Option<String>,
    #[serde(rename = "cnlName")]
    pub display_name: String,
}

impl FavoriteChannelRecord {
    /// Build a record from a backend item
    ///
    /// Returns None when neither a channel ID nor a handle can be derived.
    pub fn from_dto(dto: &FavoriteChannelDto) -> Option<FavoriteChannelRecord> {
        let channel_id = non_empty(dto.cnl_id.as_deref());
        let handle = dto.cnl_url.as_deref().and_then(extract_handle);

        if channel_id.is_none() && handle.is_none() {
            return None;
        }

        let display_name =
            non_empty(dto.cnl_name.as_deref()).unwrap_or_else(|| UNNAMED_CHANNEL.to_string());

        Some(FavoriteChannelRecord {
            channel_id,
            handle,
            display_name,
        })
    }

    /// True when either key equals `identifier`
    pub fn matches(&self, identifier: &str) -> bool {
        if identifier.is_empty() {
            return false;
        }
        self.channel_id.as_deref() == Some(identifier) || self.handle.as_deref() == Some(identifier)
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_dto(id: Option<&str>, name: Option<&str>, url: Option<&str>) -> FavoriteChannelDto {
        FavoriteChannelDto {
            fav_id: Some(1),
            cnl_id: id.map(str::to_string),
            cnl_name: name.map(str::to_string),
            cnl_url: url.map(str::to_string),
            cnl_memo: None,
        }
    }

    #[test]
    fn test_from_dto_with_id_and_handle() {
        let dto = create_test_dto(
            Some("UC123"),
            Some("Creator"),
            Some("https://www.youtube.com/@creator"),
        );

        let record = FavoriteChannelRecord::from_dto(&dto).unwrap();

        assert_eq!(record.channel_id.as_deref(), Some("UC123"));
        assert_eq!(record.handle.as_deref(), Some("@creator"));
        assert_eq!(record.display_name, "Creator");
    }

    #[test]
    fn test_from_dto_defaults_display_name() {
        let dto = create_test_dto(Some("UC123"), None, None);
        let record = FavoriteChannelRecord::from_dto(&dto).unwrap();
        assert_eq!(record.display_name, UNNAMED_CHANNEL);

        let dto = create_test_dto(Some("UC123"), Some("  "), None);
        let record = FavoriteChannelRecord::from_dto(&dto).unwrap();
        assert_eq!(record.display_name, UNNAMED_CHANNEL);
    }

    #[test]
    fn test_from_dto_handle_only() {
        let dto = create_test_dto(None, Some("Creator"), Some("https://www.youtube.com/@creator"));
        let record = FavoriteChannelRecord::from_dto(&dto).unwrap();

        assert_eq!(record.channel_id, None);
        assert_eq!(record.handle.as_deref(), Some("@creator"));
    }

    #[test]
    fn test_from_dto_without_any_key_is_discarded() {
        let dto = create_test_dto(None, Some("Nobody"), Some("https://www.youtube.com/channel/UC1"));
        assert_eq!(FavoriteChannelRecord::from_dto(&dto), None);

        let dto = create_test_dto(Some(""), Some("Nobody"), None);
        assert_eq!(FavoriteChannelRecord::from_dto(&dto), None);
    }

    #[test]
    fn test_matches_either_key() {
        let record = FavoriteChannelRecord {
            channel_id: Some("UC123".to_string()),
            handle: Some("@creator".to_string()),
            display_name: "Creator".to_string(),
        };

        assert!(record.matches("UC123"));
        assert!(record.matches("@creator"));
        assert!(!record.matches("@other"));
        assert!(!record.matches(""));
    }

    #[test]
    fn test_dto_deserialization_is_lenient() {
        let json = r#"{"favId": 7, "googleId": "g-1", "cnlId": "UC9", "cnlName": "Nine", "createdAt": null}"#;
        let dto: FavoriteChannelDto = serde_json::from_str(json).unwrap();

        assert_eq!(dto.fav_id, Some(7));
        assert_eq!(dto.cnl_id.as_deref(), Some("UC9"));
        assert_eq!(dto.cnl_url, None);
    }
}
