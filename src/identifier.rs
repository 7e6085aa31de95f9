/// Channel identifier extraction for YouTube URLs
use lazy_static::lazy_static;
use regex::Regex;
use url::Url;

/// Origin used to resolve relative hrefs when the page origin is unknown
pub const DEFAULT_ORIGIN: &str = "https://www.youtube.com";

/// Canonical channel IDs always start with this prefix
pub const CHANNEL_ID_PREFIX: &str = "UC";

lazy_static! {
    static ref HANDLE_PATTERN: Regex = Regex::new(r"@[\w.-]+").expect("valid handle pattern");
}

/// Extract a channel identifier from a channel link or page URL
///
/// Algorithm:
/// 1. Resolve the URL against `origin` (hrefs may be relative)
/// 2. Split the path into non-empty segments
/// 3. `/@name/...` → `@name`
/// 4. `/c/name` or `/user/name` → `@name` (legacy vanity URLs)
/// 5. `/channel/UC...` → `UC...`
/// 6. Anything else → None
///
/// The forms are recognized on the raw path, so `/%40name` is not a
/// handle. Only the returned name is percent-decoded, since browsers
/// encode non-ASCII handles in `href`.
///
/// Examples:
/// - https://www.youtube.com/@creator/videos → @creator
/// - /c/VanityName → @VanityName
/// - https://www.youtube.com/channel/UCabc → UCabc
/// - https://www.youtube.com/watch?v=abc → None
pub fn extract_channel_identifier(url: &str, origin: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }

    let segments = path_segments(url, origin)?;
    let first = segments.first()?;

    if first.starts_with('@') {
        return Some(decode_segment(first));
    }

    match (first.as_str(), segments.get(1)) {
        ("c" | "user", Some(name)) => Some(format!("@{}", decode_segment(name))),
        ("channel", Some(id)) if id.starts_with(CHANNEL_ID_PREFIX) => Some(id.to_string()),
        _ => None,
    }
}

/// Find the `@handle` embedded in a channel profile URL
///
/// Upstream profile URLs are not always well-formed, so this is a plain
/// pattern search rather than a path parse.
pub fn extract_handle(profile_url: &str) -> Option<String> {
    HANDLE_PATTERN
        .find(profile_url)
        .map(|m| m.as_str().to_string())
}

fn path_segments(url: &str, origin: &str) -> Option<Vec<String>> {
    let parsed = match Url::parse(origin) {
        Ok(base) => base.join(url).ok()?,
        Err(_) => Url::parse(url).ok()?,
    };

    let segments = parsed
        .path_segments()?
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect();

    Some(segments)
}

fn decode_segment(segment: &str) -> String {
    urlencoding::decode(segment)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| segment.to_string())
}
