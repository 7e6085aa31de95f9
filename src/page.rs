/// Page abstraction the scanner works against
///
/// The browser implementation lives in `dom`; tests use the in-memory
/// page in `fake`.
use crate::channel_data::FavoriteChannelRecord;
use crate::error::Result;

pub const MARKER_TEXT: &str = "⭐";
pub const MARKER_CLASS: &str = "ascentube-favorite-star";
pub const MARKER_STYLE: &str = "margin-right: 4px; font-size: inherit; color: inherit; cursor: pointer;";

/// Data attribute (without the `data-` prefix) flagging a marked title link
pub const MARKED_FLAG: &str = "ascentube-starred";

pub const DATA_VIDEO_URL: &str = "video-url";
pub const DATA_VIDEO_TITLE: &str = "video-title";
pub const DATA_CHANNEL_NAME: &str = "channel-name";
pub const DATA_CHANNEL_HANDLE: &str = "channel-handle";
pub const DATA_CHANNEL_ID: &str = "channel-id";

pub trait PageElement: Sized {
    fn query_selector(&self, selector: &str) -> Result<Option<Self>>;
    fn query_selector_all(&self, selector: &str) -> Result<Vec<Self>>;
    fn matches(&self, selector: &str) -> Result<bool>;
    fn closest(&self, selector: &str) -> Result<Option<Self>>;
    /// Resolved link target, if the element is an anchor with an href
    fn href(&self) -> Option<String>;
    fn text_content(&self) -> String;
    /// Read a `data-*` attribute; `key` excludes the prefix
    fn data_attribute(&self, key: &str) -> Option<String>;
    fn set_data_attribute(&self, key: &str, value: &str) -> Result<()>;
    fn prepend_marker(&self, marker: &Marker) -> Result<()>;
}

pub trait PageDocument {
    type Element: PageElement;

    fn query_selector_all(&self, selector: &str) -> Result<Vec<Self::Element>>;
    /// Full URL of the current page
    fn location_href(&self) -> String;
    /// Origin used to resolve relative hrefs
    fn origin(&self) -> String;
}

/// Metadata attached to an injected marker, read back on click
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub video_url: String,
    pub video_title: String,
    pub channel_name: String,
    pub channel_handle: String,
    pub channel_id: String,
}

impl Marker {
    pub fn new(video_url: String, raw_title: &str, channel: &FavoriteChannelRecord) -> Marker {
        Marker {
            video_url,
            video_title: collapse_whitespace(raw_title),
            channel_name: channel.display_name.clone(),
            channel_handle: channel.handle.clone().unwrap_or_default(),
            channel_id: channel.channel_id.clone().unwrap_or_default(),
        }
    }

    /// `data-*` attributes in the order they are written
    pub fn data_attributes(&self) -> [(&'static str, &str); 5] {
        [
            (DATA_VIDEO_URL, self.video_url.as_str()),
            (DATA_VIDEO_TITLE, self.video_title.as_str()),
            (DATA_CHANNEL_NAME, self.channel_name.as_str()),
            (DATA_CHANNEL_HANDLE, self.channel_handle.as_str()),
            (DATA_CHANNEL_ID, self.channel_id.as_str()),
        ]
    }
}

/// Trim and collapse runs of whitespace to a single space
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
pub(crate) mod fake {
    //! Scripted page: each node answers selector queries from a table
    //! instead of running a CSS engine.

    use super::*;
    use crate::error::ExtensionError;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    #[derive(Default)]
    struct NodeData {
        tags: Vec<String>,
        href: Option<String>,
        text: String,
        children: Vec<(String, FakeElement)>,
        closest: Vec<(String, FakeElement)>,
        data: RefCell<HashMap<String, String>>,
        markers: RefCell<Vec<Marker>>,
        broken: bool,
    }

    #[derive(Clone, Default)]
    pub struct FakeElement(Rc<NodeData>);

    pub struct FakeElementBuilder(NodeData);

    impl FakeElement {
        pub fn builder(tag: &str) -> FakeElementBuilder {
            FakeElementBuilder(NodeData {
                tags: vec![tag.to_string()],
                ..NodeData::default()
            })
        }

        pub fn anchor(href: &str, text: &str) -> FakeElement {
            FakeElement::builder("a").href(href).text(text).build()
        }

        pub fn markers(&self) -> Vec<Marker> {
            self.0.markers.borrow().clone()
        }

        fn check(&self) -> Result<()> {
            if self.0.broken {
                Err(ExtensionError::Dom("broken element".to_string()))
            } else {
                Ok(())
            }
        }
    }

    impl FakeElementBuilder {
        /// Additional selector this element answers `matches` for
        pub fn also_matches(mut self, selector: &str) -> Self {
            self.0.tags.push(selector.to_string());
            self
        }

        pub fn href(mut self, href: &str) -> Self {
            self.0.href = Some(href.to_string());
            self
        }

        pub fn text(mut self, text: &str) -> Self {
            self.0.text = text.to_string();
            self
        }

        /// Register `child` as a result of `query_selector(selector)`
        pub fn child(mut self, selector: &str, child: &FakeElement) -> Self {
            self.0.children.push((selector.to_string(), child.clone()));
            self
        }

        pub fn closest(mut self, selector: &str, ancestor: &FakeElement) -> Self {
            self.0.closest.push((selector.to_string(), ancestor.clone()));
            self
        }

        /// Every query against this element fails
        pub fn broken(mut self) -> Self {
            self.0.broken = true;
            self
        }

        pub fn build(self) -> FakeElement {
            FakeElement(Rc::new(self.0))
        }
    }

    impl PageElement for FakeElement {
        fn query_selector(&self, selector: &str) -> Result<Option<Self>> {
            Ok(self.query_selector_all(selector)?.into_iter().next())
        }

        fn query_selector_all(&self, selector: &str) -> Result<Vec<Self>> {
            self.check()?;
            Ok(self
                .0
                .children
                .iter()
                .filter(|(s, _)| s == selector)
                .map(|(_, child)| child.clone())
                .collect())
        }

        fn matches(&self, selector: &str) -> Result<bool> {
            self.check()?;
            Ok(self.0.tags.iter().any(|tag| tag == selector))
        }

        fn closest(&self, selector: &str) -> Result<Option<Self>> {
            self.check()?;
            if self.matches(selector)? {
                return Ok(Some(self.clone()));
            }
            Ok(self
                .0
                .closest
                .iter()
                .find(|(s, _)| s == selector)
                .map(|(_, ancestor)| ancestor.clone()))
        }

        fn href(&self) -> Option<String> {
            self.0.href.clone()
        }

        fn text_content(&self) -> String {
            self.0.text.clone()
        }

        fn data_attribute(&self, key: &str) -> Option<String> {
            self.0.data.borrow().get(key).cloned()
        }

        fn set_data_attribute(&self, key: &str, value: &str) -> Result<()> {
            self.0.data.borrow_mut().insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn prepend_marker(&self, marker: &Marker) -> Result<()> {
            self.0.markers.borrow_mut().insert(0, marker.clone());
            Ok(())
        }
    }

    pub struct FakePage {
        pub url: String,
        pub containers: Vec<(String, FakeElement)>,
    }

    impl FakePage {
        pub fn new(url: &str) -> FakePage {
            FakePage {
                url: url.to_string(),
                containers: Vec::new(),
            }
        }

        pub fn with(mut self, selector: &str, container: &FakeElement) -> FakePage {
            self.containers.push((selector.to_string(), container.clone()));
            self
        }
    }

    impl PageDocument for FakePage {
        type Element = FakeElement;

        fn query_selector_all(&self, selector: &str) -> Result<Vec<FakeElement>> {
            Ok(self
                .containers
                .iter()
                .filter(|(s, _)| s == selector)
                .map(|(_, element)| element.clone())
                .collect())
        }

        fn location_href(&self) -> String {
            self.url.clone()
        }

        fn origin(&self) -> String {
            crate::identifier::DEFAULT_ORIGIN.to_string()
        }
    }
}
