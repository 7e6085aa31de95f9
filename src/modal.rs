/// Analysis modal state machine

use crate::config::ExtensionConfig;
use crate::page::{
    DATA_CHANNEL_HANDLE, DATA_CHANNEL_ID, DATA_CHANNEL_NAME, DATA_VIDEO_TITLE, DATA_VIDEO_URL,
};
use serde::{Deserialize, Serialize};

/// Video details carried by a marker
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoInfo {
    pub video_url: String,
    pub video_title: String,
    pub channel_name: String,
    pub channel_handle: String,
    pub channel_id: String,
}

impl VideoInfo {
    /// Rebuild from a marker's `data-*` attributes
    pub fn from_data_attributes<F>(read: F) -> VideoInfo
    where
        F: Fn(&str) -> Option<String>,
    {
        VideoInfo {
            video_url: read(DATA_VIDEO_URL).unwrap_or_default(),
            video_title: read(DATA_VIDEO_TITLE).unwrap_or_default(),
            channel_name: read(DATA_CHANNEL_NAME).unwrap_or_default(),
            channel_handle: read(DATA_CHANNEL_HANDLE).unwrap_or_default(),
            channel_id: read(DATA_CHANNEL_ID).unwrap_or_default(),
        }
    }

    /// Handle when known, channel ID otherwise
    pub fn channel_label(&self) -> &str {
        if self.channel_handle.is_empty() {
            &self.channel_id
        } else {
            &self.channel_handle
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ModalState {
    #[default]
    Inactive,
    Active(VideoInfo),
}

impl ModalState {
    pub fn is_active(&self) -> bool {
        matches!(self, ModalState::Active(_))
    }

    pub fn video_info(&self) -> Option<&VideoInfo> {
        match self {
            ModalState::Active(info) => Some(info),
            ModalState::Inactive => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct ModalController {
    state: ModalState,
}

impl ModalController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    /// Show the modal for `info`
    ///
    /// Ignored when the video URL is empty. Returns whether the state changed.
    pub fn activate(&mut self, info: VideoInfo) -> bool {
        if info.video_url.is_empty() {
            log::debug!("ignoring activation without a video URL");
            return false;
        }
        log::info!("modal active for {}", info.video_url);
        self.state = ModalState::Active(info);
        true
    }

    pub fn deactivate(&mut self) {
        if self.state.is_active() {
            log::info!("modal closed");
        }
        self.state = ModalState::Inactive;
    }

    /// Dashboard URL for the active video; closes the modal
    pub fn open_analysis(&mut self, config: &ExtensionConfig) -> Option<String> {
        let url = self
            .state
            .video_info()
            .filter(|info| !info.video_url.is_empty())
            .map(|info| config.analysis_url(&info.video_url))?;
        self.deactivate();
        Some(url)
    }
}

/// Suppresses marker clicks during the initial render
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettleGuard {
    ready_at_ms: f64,
}

impl SettleGuard {
    pub fn new(started_at_ms: f64, window_ms: u32) -> Self {
        SettleGuard {
            ready_at_ms: started_at_ms + f64::from(window_ms),
        }
    }

    pub fn is_settled(&self, now_ms: f64) -> bool {
        now_ms >= self.ready_at_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_info(url: &str) -> VideoInfo {
        VideoInfo {
            video_url: url.to_string(),
            video_title: "Title".to_string(),
            channel_name: "Channel".to_string(),
            channel_handle: "@channel".to_string(),
            channel_id: "UC1".to_string(),
        }
    }

    fn assert_invariant(state: &ModalState) {
        assert_eq!(state.is_active(), state.video_info().is_some());
    }

    #[test]
    fn test_starts_inactive() {
        let controller = ModalController::new();
        assert!(!controller.state().is_active());
        assert_eq!(controller.state().video_info(), None);
    }

    #[test]
    fn test_activate_and_deactivate() {
        let mut controller = ModalController::new();

        assert!(controller.activate(create_test_info("https://www.youtube.com/watch?v=1")));
        assert!(controller.state().is_active());
        assert_eq!(
            controller.state().video_info().unwrap().video_url,
            "https://www.youtube.com/watch?v=1"
        );

        controller.deactivate();
        assert_eq!(*controller.state(), ModalState::Inactive);
    }

    #[test]
    fn test_activate_without_url_is_ignored() {
        let mut controller = ModalController::new();
        assert!(!controller.activate(VideoInfo::default()));
        assert_eq!(*controller.state(), ModalState::Inactive);

        controller.activate(create_test_info("https://www.youtube.com/watch?v=1"));
        let before = controller.state().clone();
        assert!(!controller.activate(VideoInfo::default()));
        assert_eq!(*controller.state(), before);
    }

    #[test]
    fn test_activate_replaces_current_video() {
        let mut controller = ModalController::new();
        controller.activate(create_test_info("https://www.youtube.com/watch?v=1"));
        controller.activate(create_test_info("https://www.youtube.com/watch?v=2"));

        assert_eq!(
            controller.state().video_info().unwrap().video_url,
            "https://www.youtube.com/watch?v=2"
        );
    }

    #[test]
    fn test_invariant_over_call_sequences() {
        let mut controller = ModalController::new();
        let config = ExtensionConfig::default();
        let steps: Vec<Box<dyn Fn(&mut ModalController)>> = vec![
            Box::new(|c| {
                c.activate(create_test_info("https://www.youtube.com/watch?v=1"));
            }),
            Box::new(|c| c.deactivate()),
            Box::new(|c| {
                c.activate(VideoInfo::default());
            }),
            Box::new(|c| {
                c.activate(create_test_info("https://www.youtube.com/watch?v=2"));
            }),
            Box::new(move |c| {
                c.open_analysis(&config);
            }),
        ];

        for first in 0..steps.len() {
            for second in 0..steps.len() {
                for third in 0..steps.len() {
                    steps[first](&mut controller);
                    assert_invariant(controller.state());
                    steps[second](&mut controller);
                    assert_invariant(controller.state());
                    steps[third](&mut controller);
                    assert_invariant(controller.state());
                }
            }
        }
    }

    #[test]
    fn test_open_analysis() {
        let config = ExtensionConfig::default();
        let mut controller = ModalController::new();
        assert_eq!(controller.open_analysis(&config), None);

        controller.activate(create_test_info("https://www.youtube.com/watch?v=abc"));
        let url = controller.open_analysis(&config).unwrap();

        assert_eq!(
            url,
            "http://localhost:3000/vidanalysis?videoUrl=https%3A%2F%2Fwww.youtube.com%2Fwatch%3Fv%3Dabc"
        );
        assert!(!controller.state().is_active());
    }

    #[test]
    fn test_channel_label_prefers_handle() {
        let mut info = create_test_info("u");
        assert_eq!(info.channel_label(), "@channel");

        info.channel_handle.clear();
        assert_eq!(info.channel_label(), "UC1");
    }

    #[test]
    fn test_from_data_attributes() {
        let info = VideoInfo::from_data_attributes(|key| match key {
            "video-url" => Some("https://www.youtube.com/watch?v=1".to_string()),
            "channel-name" => Some("Channel".to_string()),
            _ => None,
        });

        assert_eq!(info.video_url, "https://www.youtube.com/watch?v=1");
        assert_eq!(info.channel_name, "Channel");
        assert_eq!(info.channel_handle, "");
    }

    #[test]
    fn test_settle_guard() {
        let guard = SettleGuard::new(1_000.0, 2_500);

        assert!(!guard.is_settled(1_000.0));
        assert!(!guard.is_settled(3_499.0));
        assert!(guard.is_settled(3_500.0));
        assert!(guard.is_settled(10_000.0));
    }
}
