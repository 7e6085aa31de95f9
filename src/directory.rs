/// In-memory favorite channel directory

use crate::channel_data::{FavoriteChannelDto, FavoriteChannelRecord};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Favorite channels in fetch order
///
/// Duplicates are kept; lookups return the first match.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ChannelDirectory {
    records: Vec<FavoriteChannelRecord>,
}

impl ChannelDirectory {
    pub fn new(records: Vec<FavoriteChannelRecord>) -> Self {
        ChannelDirectory { records }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Normalize a backend response body
    ///
    /// Anything other than a JSON array yields an empty directory. Items
    /// that are not objects, or that have neither a channel ID nor a
    /// handle, are dropped.
    pub fn from_api_value(body: &Value) -> Self {
        let Some(items) = body.as_array() else {
            log::warn!("favorites response is not an array");
            return Self::empty();
        };

        let records: Vec<FavoriteChannelRecord> = items
            .iter()
            .filter_map(|item| serde_json::from_value::<FavoriteChannelDto>(item.clone()).ok())
            .filter_map(|dto| FavoriteChannelRecord::from_dto(&dto))
            .collect();

        log::debug!("normalized {} of {} favorite channels", records.len(), items.len());
        ChannelDirectory { records }
    }

    /// First record whose channel ID or handle equals `identifier`
    pub fn resolve(&self, identifier: &str) -> Option<&FavoriteChannelRecord> {
        self.records.iter().find(|record| record.matches(identifier))
    }

    pub fn records(&self) -> &[FavoriteChannelRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_test_record(id: Option<&str>, handle: Option<&str>, name: &str) -> FavoriteChannelRecord {
        FavoriteChannelRecord {
            channel_id: id.map(str::to_string),
            handle: handle.map(str::to_string),
            display_name: name.to_string(),
        }
    }

    #[test]
    fn test_empty_directory() {
        let directory = ChannelDirectory::empty();
        assert!(directory.is_empty());
        assert_eq!(directory.resolve("@anyone"), None);
    }

    #[test]
    fn test_resolve_by_id_or_handle() {
        let directory = ChannelDirectory::new(vec![
            create_test_record(Some("UC1"), Some("@one"), "One"),
            create_test_record(None, Some("@two"), "Two"),
        ]);

        assert_eq!(directory.resolve("UC1").unwrap().display_name, "One");
        assert_eq!(directory.resolve("@one").unwrap().display_name, "One");
        assert_eq!(directory.resolve("@two").unwrap().display_name, "Two");
        assert_eq!(directory.resolve("@three"), None);
    }

    #[test]
    fn test_resolve_first_match_wins() {
        let directory = ChannelDirectory::new(vec![
            create_test_record(Some("UC1"), None, "First"),
            create_test_record(None, Some("@dup"), "Second"),
            create_test_record(Some("UC1"), Some("@dup"), "Third"),
        ]);

        assert_eq!(directory.resolve("UC1").unwrap().display_name, "First");
        assert_eq!(directory.resolve("@dup").unwrap().display_name, "Second");
    }

    #[test]
    fn test_from_api_value_normalizes_items() {
        let body = json!([
            {"cnlId": "UC1", "cnlName": "One", "cnlUrl": "https://www.youtube.com/@one"},
            {"cnlName": "Handle only", "cnlUrl": "https://www.youtube.com/@handleonly"},
            {"cnlName": "No keys", "cnlUrl": "https://www.youtube.com/"},
            {"cnlId": "UC4"},
            "not an object",
            42
        ]);

        let directory = ChannelDirectory::from_api_value(&body);

        assert_eq!(directory.len(), 3);
        assert_eq!(directory.records()[0].handle.as_deref(), Some("@one"));
        assert_eq!(directory.records()[1].channel_id, None);
        assert_eq!(directory.records()[2].display_name, crate::channel_data::UNNAMED_CHANNEL);
    }

    #[test]
    fn test_from_api_value_rejects_non_arrays() {
        assert!(ChannelDirectory::from_api_value(&json!({"cnlId": "UC1"})).is_empty());
        assert!(ChannelDirectory::from_api_value(&json!(null)).is_empty());
        assert!(ChannelDirectory::from_api_value(&json!("[]")).is_empty());
    }

    #[test]
    fn test_serialization() {
        let directory = ChannelDirectory::new(vec![create_test_record(Some("UC1"), Some("@one"), "One")]);

        let json = serde_json::to_string(&directory).unwrap();
        assert_eq!(json, r#"[{"ucId":"UC1","handle":"@one","cnlName":"One"}]"#);

        let deserialized: ChannelDirectory = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, directory);
    }
}
