/// Browser DOM implementation of the page traits

use crate::error::{ExtensionError, Result};
use crate::identifier::DEFAULT_ORIGIN;
use crate::modal::VideoInfo;
use crate::page::{Marker, PageDocument, PageElement, MARKER_CLASS, MARKER_STYLE, MARKER_TEXT};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlAnchorElement, HtmlElement, NodeList, Window};

pub struct WebPage {
    window: Window,
    document: Document,
}

impl WebPage {
    pub fn current() -> Result<WebPage> {
        let window = web_sys::window().ok_or_else(|| ExtensionError::Dom("no window".to_string()))?;
        let document = window
            .document()
            .ok_or_else(|| ExtensionError::Dom("no document".to_string()))?;
        Ok(WebPage { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn body(&self) -> Result<HtmlElement> {
        self.document
            .body()
            .ok_or_else(|| ExtensionError::Dom("no body".to_string()))
    }

    /// Open `url` in a new browsing context
    pub fn open_tab(&self, url: &str) -> Result<()> {
        self.window
            .open_with_url_and_target(url, "_blank")
            .map_err(ExtensionError::dom)?;
        Ok(())
    }
}

impl PageDocument for WebPage {
    type Element = Element;

    fn query_selector_all(&self, selector: &str) -> Result<Vec<Element>> {
        let list = self
            .document
            .query_selector_all(selector)
            .map_err(ExtensionError::dom)?;
        Ok(elements(&list))
    }

    fn location_href(&self) -> String {
        self.window.location().href().unwrap_or_default()
    }

    fn origin(&self) -> String {
        self.window
            .location()
            .origin()
            .unwrap_or_else(|_| DEFAULT_ORIGIN.to_string())
    }
}

impl PageElement for Element {
    fn query_selector(&self, selector: &str) -> Result<Option<Element>> {
        Element::query_selector(self, selector).map_err(ExtensionError::dom)
    }

    fn query_selector_all(&self, selector: &str) -> Result<Vec<Element>> {
        let list = Element::query_selector_all(self, selector).map_err(ExtensionError::dom)?;
        Ok(elements(&list))
    }

    fn matches(&self, selector: &str) -> Result<bool> {
        Element::matches(self, selector).map_err(ExtensionError::dom)
    }

    fn closest(&self, selector: &str) -> Result<Option<Element>> {
        Element::closest(self, selector).map_err(ExtensionError::dom)
    }

    fn href(&self) -> Option<String> {
        self.dyn_ref::<HtmlAnchorElement>()
            .map(HtmlAnchorElement::href)
            .filter(|href| !href.is_empty())
    }

    fn text_content(&self) -> String {
        web_sys::Node::text_content(self).unwrap_or_default()
    }

    fn data_attribute(&self, key: &str) -> Option<String> {
        self.get_attribute(&data_name(key))
    }

    fn set_data_attribute(&self, key: &str, value: &str) -> Result<()> {
        self.set_attribute(&data_name(key), value)
            .map_err(ExtensionError::dom)
    }

    fn prepend_marker(&self, marker: &Marker) -> Result<()> {
        let document = self
            .owner_document()
            .ok_or_else(|| ExtensionError::Dom("detached element".to_string()))?;

        let star = document.create_element("span").map_err(ExtensionError::dom)?;
        star.set_text_content(Some(MARKER_TEXT));
        star.set_class_name(MARKER_CLASS);
        star.set_attribute("style", MARKER_STYLE)
            .map_err(ExtensionError::dom)?;
        for (key, value) in marker.data_attributes() {
            star.set_attribute(&data_name(key), value)
                .map_err(ExtensionError::dom)?;
        }

        self.prepend_with_node_1(&star).map_err(ExtensionError::dom)
    }
}

/// Video details of the marker at or above `target`, if any
pub fn marker_video_info(target: &Element) -> Option<VideoInfo> {
    let marker = Element::closest(target, &format!(".{}", MARKER_CLASS)).ok()??;
    Some(VideoInfo::from_data_attributes(|key| {
        marker.get_attribute(&data_name(key))
    }))
}

fn data_name(key: &str) -> String {
    format!("data-{}", key)
}

fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}
