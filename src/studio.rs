/// Dashboard shortcut placed next to the YouTube Studio logo

use crate::bridge;
use crate::config::ExtensionConfig;
use crate::dom::WebPage;
use crate::error::{ExtensionError, Result};
use crate::timer::run_later;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::Element;

pub const STUDIO_BUTTON_ID: &str = "ascenTubeLogoButton";
const HOME_BUTTON_SELECTOR: &str = "#home-button";
const LOGO_PATH: &str = "logo.png";
const BUTTON_LABEL: &str = "AscenTube 대시보드";

const WRAPPER_STYLE: &str = "display: flex; align-items: center; gap: 8px; margin-left: 16px; margin-top: -10px; cursor: pointer; padding: 6px 12px; background: transparent; border-radius: 4px; color: #000; font-weight: bold; font-size: 18px; text-decoration: none; z-index: 9999;";
const DIVIDER_STYLE: &str = "height: 32px; width: 1px; background-color: rgba(0, 0, 0, 0.1); margin: 0 8px;";
const LOGO_STYLE: &str = "height: 32px; width: auto; display: block;";
const LABEL_STYLE: &str = "white-space: nowrap; line-height: 1; color: #000;";

/// Fixed-interval retries with an attempt cap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub interval_ms: u32,
    pub max_attempts: u32,
}

impl RetryPolicy {
    pub fn from_config(config: &ExtensionConfig) -> Self {
        RetryPolicy {
            interval_ms: config.studio_retry_ms,
            max_attempts: config.studio_max_attempts,
        }
    }

    /// Attempt number to run next, or None once done or out of attempts
    pub fn next_attempt(&self, attempt: u32, succeeded: bool) -> Option<u32> {
        if succeeded || attempt >= self.max_attempts {
            None
        } else {
            Some(attempt + 1)
        }
    }
}

struct StudioButton {
    page: WebPage,
    dashboard_url: String,
    policy: RetryPolicy,
}

impl StudioButton {
    fn schedule(self: Rc<Self>, attempt: u32) {
        let button = Rc::clone(&self);
        let scheduled = run_later(self.policy.interval_ms, move || {
            let inserted = match button.try_insert() {
                Ok(inserted) => inserted,
                Err(e) => {
                    log::debug!("studio button attempt {} failed: {}", attempt, e);
                    false
                }
            };

            match button.policy.next_attempt(attempt, inserted) {
                Some(next) => button.schedule(next),
                None if inserted => log::info!("studio dashboard button added"),
                None => log::warn!("no {} after {} attempts", HOME_BUTTON_SELECTOR, attempt),
            }
        });
        if let Err(e) = scheduled {
            log::warn!("could not schedule studio button: {}", e);
        }
    }

    /// Place the button after the home button; false while the header is missing
    fn try_insert(&self) -> Result<bool> {
        let document = self.page.document();
        if document.get_element_by_id(STUDIO_BUTTON_ID).is_some() {
            return Ok(true);
        }

        let Some(home) = document
            .query_selector(HOME_BUTTON_SELECTOR)
            .map_err(ExtensionError::dom)?
        else {
            log::debug!("{} not found yet", HOME_BUTTON_SELECTOR);
            return Ok(false);
        };
        let Some(parent) = home.parent_element() else {
            return Ok(false);
        };

        let wrapper = self.build()?;
        parent
            .insert_before(&wrapper, home.next_sibling().as_ref())
            .map_err(ExtensionError::dom)?;
        Ok(true)
    }

    fn build(&self) -> Result<Element> {
        let wrapper = styled_element(&self.page, "div", WRAPPER_STYLE)?;
        wrapper.set_id(STUDIO_BUTTON_ID);

        let divider = styled_element(&self.page, "div", DIVIDER_STYLE)?;

        let logo = styled_element(&self.page, "img", LOGO_STYLE)?;
        logo.set_attribute("src", &bridge::packaged_url(LOGO_PATH)?)
            .map_err(ExtensionError::dom)?;
        logo.set_attribute("alt", "AscenTube")
            .map_err(ExtensionError::dom)?;

        let label = styled_element(&self.page, "span", LABEL_STYLE)?;
        label.set_text_content(Some(BUTTON_LABEL));

        for child in [&divider, &logo, &label] {
            wrapper.append_child(child).map_err(ExtensionError::dom)?;
        }

        let dashboard_url = self.dashboard_url.clone();
        let on_click = Closure::<dyn FnMut()>::new(move || {
            if let Err(e) = WebPage::current().and_then(|page| page.open_tab(&dashboard_url)) {
                log::error!("could not open dashboard: {}", e);
            }
        });
        wrapper
            .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
            .map_err(ExtensionError::dom)?;
        on_click.forget();

        Ok(wrapper)
    }
}

fn styled_element(page: &WebPage, tag: &str, style: &str) -> Result<Element> {
    let element = page.document().create_element(tag).map_err(ExtensionError::dom)?;
    element.set_attribute("style", style).map_err(ExtensionError::dom)?;
    Ok(element)
}

/// Start placing the dashboard button once the document has loaded
pub fn start(config: &ExtensionConfig) -> Result<()> {
    let page = WebPage::current()?;
    if page.document().get_element_by_id(STUDIO_BUTTON_ID).is_some() {
        return Ok(());
    }

    let button = Rc::new(StudioButton {
        page,
        dashboard_url: config.dashboard_home_url(),
        policy: RetryPolicy::from_config(config),
    });

    if button.page.document().ready_state() != "loading" {
        button.schedule(1);
        return Ok(());
    }

    let window = button.page.window().clone();
    let on_loaded = Closure::once_into_js(move || button.schedule(1));
    window
        .add_event_listener_with_callback("DOMContentLoaded", on_loaded.unchecked_ref())
        .map_err(ExtensionError::dom)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_policy() -> RetryPolicy {
        RetryPolicy::from_config(&ExtensionConfig::default())
    }

    #[test]
    fn test_retry_policy_from_config() {
        assert_eq!(
            create_test_policy(),
            RetryPolicy {
                interval_ms: 500,
                max_attempts: 21,
            }
        );
    }

    #[test]
    fn test_retries_until_success() {
        let policy = create_test_policy();

        assert_eq!(policy.next_attempt(1, false), Some(2));
        assert_eq!(policy.next_attempt(2, true), None);
    }

    #[test]
    fn test_stops_after_max_attempts() {
        let policy = create_test_policy();

        let mut attempts = 1;
        while let Some(next) = policy.next_attempt(attempts, false) {
            attempts = next;
        }

        assert_eq!(attempts, 21);
        assert_eq!(policy.next_attempt(21, false), None);
    }
}
