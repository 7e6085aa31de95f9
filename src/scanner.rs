/// Page scanning: find video containers, match them to favorite channels
/// and mark their title links.

use crate::channel_data::FavoriteChannelRecord;
use crate::directory::ChannelDirectory;
use crate::error::Result;
use crate::identifier::extract_channel_identifier;
use crate::page::{Marker, PageDocument, PageElement, MARKED_FLAG};

/// Video container layouts, in scan priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    RichItem,
    GridVideo,
    Video,
    PlaylistVideo,
    CompactVideo,
    ReelItem,
    Shelf,
    Lockup,
}

impl ContainerKind {
    pub const ALL: [ContainerKind; 8] = [
        ContainerKind::RichItem,
        ContainerKind::GridVideo,
        ContainerKind::Video,
        ContainerKind::PlaylistVideo,
        ContainerKind::CompactVideo,
        ContainerKind::ReelItem,
        ContainerKind::Shelf,
        ContainerKind::Lockup,
    ];

    pub const fn selector(self) -> &'static str {
        match self {
            ContainerKind::RichItem => "ytd-rich-item-renderer",
            ContainerKind::GridVideo => "ytd-grid-video-renderer",
            ContainerKind::Video => "ytd-video-renderer",
            ContainerKind::PlaylistVideo => "ytd-playlist-video-renderer",
            ContainerKind::CompactVideo => "ytd-compact-video-renderer",
            ContainerKind::ReelItem => "ytd-reel-item-renderer",
            ContainerKind::Shelf => "ytd-shelf-renderer",
            ContainerKind::Lockup => "yt-lockup-view-model",
        }
    }

    /// Layouts used on single-channel listing pages, where items carry no
    /// owner link of their own and the page URL names the channel.
    ///
    /// Only the first channel-link locator (the owner renderer link)
    /// suppresses the fallback; byline anchors on channel pages often
    /// have no usable href.
    pub const fn allows_page_fallback(self) -> bool {
        matches!(self, ContainerKind::RichItem | ContainerKind::GridVideo)
    }

    /// First non-shelf kind the element matches; plain video otherwise
    pub fn classify<E: PageElement>(element: &E) -> Result<ContainerKind> {
        for kind in ContainerKind::ALL {
            if kind != ContainerKind::Shelf && element.matches(kind.selector())? {
                return Ok(kind);
            }
        }
        Ok(ContainerKind::Video)
    }
}

/// Items inside a horizontal shelf, scanned individually
pub const SHELF_ITEMS_SELECTOR: &str = "#contents ytd-video-renderer, #contents ytd-grid-video-renderer";

/// One step of a matcher chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locator {
    /// First descendant matching the selector
    Select(&'static str),
    /// First descendant matching the selector, widened to its enclosing anchor
    SelectInAnchor(&'static str),
}

impl Locator {
    pub fn locate<E: PageElement>(&self, container: &E) -> Result<Option<E>> {
        match *self {
            Locator::Select(selector) => container.query_selector(selector),
            Locator::SelectInAnchor(selector) => match container.query_selector(selector)? {
                Some(element) => element.closest("a"),
                None => Ok(None),
            },
        }
    }
}

pub const CHANNEL_LINK_LOCATORS: &[Locator] = &[
    Locator::Select(".ytd-video-owner-renderer a.yt-simple-endpoint"),
    Locator::Select("ytd-rich-grid-media .byline-container .yt-formatted-string a"),
    Locator::Select("ytd-rich-grid-media #channel-name a"),
    Locator::Select("#meta #channel-name a"),
    Locator::Select("#meta .ytd-channel-name a"),
    Locator::Select("#channel-info a.yt-simple-endpoint.yt-formatted-string"),
    Locator::Select("#channel-name.ytd-compact-video-renderer a"),
    Locator::Select("ytd-playlist-video-renderer .ytd-channel-name a"),
    Locator::Select("ytd-playlist-video-renderer #byline-container a.yt-simple-endpoint"),
    Locator::Select(
        "yt-lockup-view-model .yt-content-metadata-view-model-wiz__metadata-row a.yt-core-attributed-string__link",
    ),
    Locator::Select("#channel-info.ytd-reel-player-header-renderer a.yt-simple-endpoint.yt-formatted-string"),
    Locator::Select("#text-container.ytd-channel-name a"),
];

pub const TITLE_LOCATORS: &[Locator] = &[
    Locator::SelectInAnchor("a#video-title"),
    Locator::SelectInAnchor("ytd-rich-grid-media #video-title-link"),
    Locator::SelectInAnchor("h3.ytd-compact-video-renderer a#video-title"),
    Locator::SelectInAnchor("span#video-title, yt-formatted-string#video-title"),
];

/// Ordered strategies for finding a container's channel link and title
/// link; the first strategy that succeeds wins.
#[derive(Debug, Clone, Copy)]
pub struct MatcherChain {
    pub channel_links: &'static [Locator],
    pub titles: &'static [Locator],
}

impl Default for MatcherChain {
    fn default() -> Self {
        MatcherChain {
            channel_links: CHANNEL_LINK_LOCATORS,
            titles: TITLE_LOCATORS,
        }
    }
}

/// A container that belongs to a favorite channel
#[derive(Debug)]
pub struct VideoContainerMatch<'d, E> {
    pub identifier: String,
    pub channel: &'d FavoriteChannelRecord,
    pub title_link: Option<E>,
    pub via_page_url: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanReport {
    pub containers: usize,
    pub matched: usize,
    pub marked: usize,
    pub failed: usize,
}

pub struct Scanner<'a, D: PageDocument> {
    page: &'a D,
    directory: &'a ChannelDirectory,
    chain: MatcherChain,
    origin: String,
    page_identifier: Option<String>,
}

impl<'a, D: PageDocument> Scanner<'a, D> {
    pub fn new(page: &'a D, directory: &'a ChannelDirectory, chain: MatcherChain) -> Self {
        let origin = page.origin();
        let page_identifier = extract_channel_identifier(&page.location_href(), &origin);
        Scanner {
            page,
            directory,
            chain,
            origin,
            page_identifier,
        }
    }

    /// Scan every container on the page, marking favorites
    ///
    /// A failure in one container is logged and skips only that container.
    pub fn scan(&self) -> ScanReport {
        let mut report = ScanReport::default();

        if self.directory.is_empty() {
            log::debug!("directory is empty, nothing to mark");
            return report;
        }

        for kind in ContainerKind::ALL {
            let containers = match self.page.query_selector_all(kind.selector()) {
                Ok(containers) => containers,
                Err(e) => {
                    log::debug!("querying {:?} containers failed: {}", kind, e);
                    report.failed += 1;
                    continue;
                }
            };

            for container in containers {
                if kind == ContainerKind::Shelf {
                    self.scan_shelf(&container, &mut report);
                } else {
                    self.scan_one(&container, kind, &mut report);
                }
            }
        }

        log::info!(
            "scanned {} containers: {} matched, {} newly marked",
            report.containers,
            report.matched,
            report.marked
        );
        report
    }

    fn scan_shelf(&self, shelf: &D::Element, report: &mut ScanReport) {
        let items = match shelf.query_selector_all(SHELF_ITEMS_SELECTOR) {
            Ok(items) => items,
            Err(e) => {
                log::debug!("skipping shelf: {}", e);
                report.failed += 1;
                return;
            }
        };

        for item in items {
            match ContainerKind::classify(&item) {
                Ok(kind) => self.scan_one(&item, kind, report),
                Err(e) => {
                    log::debug!("skipping shelf item: {}", e);
                    report.failed += 1;
                }
            }
        }
    }

    fn scan_one(&self, container: &D::Element, kind: ContainerKind, report: &mut ScanReport) {
        report.containers += 1;

        let outcome = self.match_container(container, kind).and_then(|found| match found {
            Some(found) => {
                report.matched += 1;
                match &found.title_link {
                    Some(link) => mark_title_link(link, found.channel),
                    None => Ok(false),
                }
            }
            None => Ok(false),
        });

        match outcome {
            Ok(true) => report.marked += 1,
            Ok(false) => {}
            Err(e) => {
                log::debug!("skipping {:?} container: {}", kind, e);
                report.failed += 1;
            }
        }
    }

    /// Resolve a container to a favorite channel and its title link
    pub fn match_container(
        &self,
        container: &D::Element,
        kind: ContainerKind,
    ) -> Result<Option<VideoContainerMatch<'a, D::Element>>> {
        let mut has_owner_link = false;
        let mut resolved = None;

        for (position, locator) in self.chain.channel_links.iter().enumerate() {
            let Some(link) = locator.locate(container)? else {
                continue;
            };
            if position == 0 {
                has_owner_link = true;
            }

            let Some(identifier) = link
                .href()
                .and_then(|href| extract_channel_identifier(&href, &self.origin))
            else {
                continue;
            };

            if let Some(channel) = self.directory.resolve(&identifier) {
                resolved = Some((identifier, channel, false));
                break;
            }
        }

        if resolved.is_none() && !has_owner_link && kind.allows_page_fallback() {
            if let Some(identifier) = &self.page_identifier {
                resolved = self
                    .directory
                    .resolve(identifier)
                    .map(|channel| (identifier.clone(), channel, true));
            }
        }

        let Some((identifier, channel, via_page_url)) = resolved else {
            return Ok(None);
        };

        Ok(Some(VideoContainerMatch {
            identifier,
            channel,
            title_link: self.find_title_link(container)?,
            via_page_url,
        }))
    }

    fn find_title_link(&self, container: &D::Element) -> Result<Option<D::Element>> {
        for locator in self.chain.titles {
            if let Some(link) = locator.locate(container)? {
                if link.href().is_some_and(|href| !href.is_empty()) {
                    return Ok(Some(link));
                }
            }
        }
        Ok(None)
    }
}

/// Scan `page` with the default matcher chain
pub fn scan_page<D: PageDocument>(page: &D, directory: &ChannelDirectory) -> ScanReport {
    Scanner::new(page, directory, MatcherChain::default()).scan()
}

/// Prepend a marker to a title link unless it already has one
///
/// Returns whether a marker was added.
pub fn mark_title_link<E: PageElement>(link: &E, channel: &FavoriteChannelRecord) -> Result<bool> {
    if is_marked(link) {
        return Ok(false);
    }

    let marker = Marker::new(link.href().unwrap_or_default(), &link.text_content(), channel);
    link.set_data_attribute(MARKED_FLAG, "true")?;
    link.prepend_marker(&marker)?;
    Ok(true)
}

pub fn is_marked<E: PageElement>(link: &E) -> bool {
    link.data_attribute(MARKED_FLAG).as_deref() == Some("true")
}
