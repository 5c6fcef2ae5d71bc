use chrono::DateTime;
use scraper::{ElementRef, Html};

use super::types::{LinkEntry, ProfileRecord};

/// Target value the site puts into `data-x-url` for disabled links.
const DISABLED_LINK_PLACEHOLDER: &str = "javascript: void(0);";
/// Stand-in URL reported for disabled links.
pub const DISABLED_LINK_URL: &str = "N/A";

/// Walks the whole document once, in pre-order, and fills a profile record
/// from the elements it recognizes. Fields without a matching element stay
/// unset; links are returned in document order, duplicates included.
pub fn extract_profile(document: &Html, username: &str) -> ProfileRecord {
    let mut record = ProfileRecord::new(username);

    for element in document.tree.root().descendants().filter_map(ElementRef::wrap) {
        match element.value().name() {
            "img" => {
                if element.value().attr("alt") == Some("Profile avatar") {
                    record.avatar_url = attr_or_empty(element, "src");
                }
            }
            "span" => {
                if has_classes(element, &["profile-username"]) {
                    record.display_name = text_content(element);
                }
                if has_classes(element, &["last_online"])
                    && let Some(last_online) = element
                        .value()
                        .attr("data-x-timestamp")
                        .and_then(|raw| raw.parse::<i64>().ok())
                        .and_then(|secs| DateTime::from_timestamp(secs, 0))
                {
                    record.last_online = Some(last_online);
                }
            }
            "div" => {
                if has_classes(element, &["about-section__birthday"]) {
                    record.birthday = Some(text_content(element));
                }
                if has_classes(element, &["about-section__location"]) {
                    record.location = Some(attr_or_empty(element, "title"));
                }
                if has_classes(element, &["about-section__content"]) {
                    record.content = Some(text_content(element));
                }
                if has_classes(element, &["simple-text"])
                    && let Some(link) = extract_link(element)
                {
                    record.links.push(link);
                }
            }
            "p" => {
                if has_classes(element, &["profile-bio"]) {
                    record.bio = Some(text_content(element));
                }
            }
            "a" => {
                if has_classes(element, &["btn", "btn-link", "btn-qr"]) {
                    record.qr_code_url = attr_or_empty(element, "href");
                }
            }
            _ => {}
        }
    }

    record
}

/// Reads one link entry out of a `simple-text` container from the first
/// direct anchor child that carries a non-empty `data-x-url`.
pub fn extract_link(container: ElementRef<'_>) -> Option<LinkEntry> {
    let (anchor, target) = container
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == "a")
        .find_map(|anchor| {
            anchor
                .value()
                .attr("data-x-url")
                .filter(|value| !value.is_empty())
                .map(|target| (anchor, target))
        })?;
    let url = if target == DISABLED_LINK_PLACEHOLDER {
        DISABLED_LINK_URL.to_string()
    } else {
        target.to_string()
    };

    let mut link = LinkEntry {
        url,
        ..LinkEntry::default()
    };
    for span in anchor
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == "span")
    {
        if has_classes(span, &["link-title"]) {
            link.title = text_content(span);
        }
        if has_classes(span, &["link-text"]) {
            link.subtitle = Some(text_content(span));
        }
        if has_classes(span, &["connected-link-label"]) {
            link.connection_status = Some(text_content(span));
        }
    }

    Some(link)
}

/// True when every wanted token is among the element's class tokens.
pub fn has_classes(element: ElementRef<'_>, wanted: &[&str]) -> bool {
    if element.value().attr("class").is_none() {
        return false;
    }
    wanted
        .iter()
        .all(|name| element.value().classes().any(|class| class == *name))
}

/// Concatenated descendant text, trimmed.
pub fn text_content(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn attr_or_empty(element: ElementRef<'_>, name: &str) -> String {
    element.value().attr(name).unwrap_or_default().to_string()
}
