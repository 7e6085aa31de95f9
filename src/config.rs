/// Runtime settings for the content script, popup and background worker
use lazy_static::lazy_static;

const DEFAULT_API_BASE_URL: &str = "https://localhost:8082/AscenTube";
const DEFAULT_DASHBOARD_URL: &str = "http://localhost:3000";

lazy_static! {
    pub static ref CONFIG: ExtensionConfig = ExtensionConfig::from_build_env();
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtensionConfig {
    /// Backend root, without a trailing slash
    pub api_base_url: String,
    /// Dashboard root that hosts the `/vidanalysis` page
    pub dashboard_url: String,
    /// Wait after a client-side navigation before rescanning
    pub navigation_delay_ms: u32,
    /// Quiet period before a burst of DOM mutations triggers a rescan
    pub mutation_debounce_ms: u32,
    /// Marker clicks are ignored for this long after initialization
    pub settle_window_ms: u32,
    pub token_bridge_delay_ms: u32,
    pub sync_message_ms: u32,
    /// Wait between attempts to place the Studio dashboard button
    pub studio_retry_ms: u32,
    pub studio_max_attempts: u32,
}

impl ExtensionConfig {
    /// Defaults, with URLs overridable at build time through
    /// `ASCENTUBE_API_URL` and `ASCENTUBE_DASHBOARD_URL`.
    pub fn from_build_env() -> Self {
        let mut config = Self::default();
        if let Some(api) = option_env!("ASCENTUBE_API_URL") {
            config.api_base_url = trim_base(api);
        }
        if let Some(dashboard) = option_env!("ASCENTUBE_DASHBOARD_URL") {
            config.dashboard_url = trim_base(dashboard);
        }
        config
    }

    pub fn favorite_channels_url(&self) -> String {
        format!("{}/api/ascen/user/me/favorite-channels", self.api_base_url)
    }

    pub fn dashboard_home_url(&self) -> String {
        format!("{}/", self.dashboard_url)
    }

    /// Dashboard page that analyzes a single video
    pub fn analysis_url(&self, video_url: &str) -> String {
        format!(
            "{}/vidanalysis?videoUrl={}",
            self.dashboard_url,
            urlencoding::encode(video_url)
        )
    }
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        ExtensionConfig {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            dashboard_url: DEFAULT_DASHBOARD_URL.to_string(),
            navigation_delay_ms: 500,
            mutation_debounce_ms: 750,
            settle_window_ms: 2500,
            token_bridge_delay_ms: 1500,
            sync_message_ms: 5000,
            studio_retry_ms: 500,
            studio_max_attempts: 21,
        }
    }
}

fn trim_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_favorite_channels_url() {
        let config = ExtensionConfig::default();
        assert_eq!(
            config.favorite_channels_url(),
            "https://localhost:8082/AscenTube/api/ascen/user/me/favorite-channels"
        );
    }

    #[test]
    fn test_analysis_url_encodes_video_url() {
        let config = ExtensionConfig::default();
        assert_eq!(
            config.analysis_url("https://www.youtube.com/watch?v=abc&t=10"),
            "http://localhost:3000/vidanalysis?videoUrl=https%3A%2F%2Fwww.youtube.com%2Fwatch%3Fv%3Dabc%26t%3D10"
        );
    }

    #[test]
    fn test_dashboard_home_url() {
        assert_eq!(ExtensionConfig::default().dashboard_home_url(), "http://localhost:3000/");
    }

    #[test]
    fn test_trim_base() {
        assert_eq!(trim_base(" https://example.com/ "), "https://example.com");
        assert_eq!(trim_base("https://example.com"), "https://example.com");
    }
}
