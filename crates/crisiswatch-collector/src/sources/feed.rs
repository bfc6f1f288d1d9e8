//! RSS feed collector.

use chrono::{DateTime, Utc};
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::CollectorError;
use crate::text::{strip_html, truncate_chars};
use crate::types::CandidateArticle;

const DESCRIPTION_MAX_CHARS: usize = 300;

/// Fetch one RSS feed and return up to `limit` candidates.
///
/// # Errors
///
/// Returns [`CollectorError::Http`] on network failure,
/// [`CollectorError::UnexpectedStatus`] on a non-2xx response, or
/// [`CollectorError::Xml`] on malformed XML.
pub(crate) async fn fetch_feed(
    client: &reqwest::Client,
    url: &str,
    limit: usize,
) -> Result<Vec<CandidateArticle>, CollectorError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CollectorError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    let body = response.text().await?;
    parse_feed(&body, url, limit)
}

/// Parse an RSS XML body into candidates.
///
/// Extracts `<item>` elements (`title`, `link`, `description`, `pubDate`),
/// stopping after `limit` items. Items without a link are skipped — they
/// cannot be deduplicated or stored. The source display name is the
/// channel-level `<title>` when the feed supplies one, else the host of
/// `feed_url`.
///
/// # Errors
///
/// Returns [`CollectorError::Xml`] if the XML is malformed.
pub(crate) fn parse_feed(
    xml: &str,
    feed_url: &str,
    limit: usize,
) -> Result<Vec<CandidateArticle>, CollectorError> {
    if limit == 0 {
        return Ok(Vec::new());
    }

    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    struct Item {
        title: String,
        link: String,
        description: String,
        published: Option<DateTime<Utc>>,
    }

    let mut items: Vec<Item> = Vec::new();
    let mut channel_title = String::new();
    let mut in_item = false;
    let mut current_tag = String::new();
    let mut title = String::new();
    let mut link = String::new();
    let mut description = String::new();
    let mut pub_date = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name_buf = e.name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_buf).unwrap_or("").to_string();
                if name == "item" {
                    in_item = true;
                    title.clear();
                    link.clear();
                    description.clear();
                    pub_date.clear();
                }
                current_tag = name;
            }
            Ok(Event::End(e)) => {
                let name_buf = e.name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_buf).unwrap_or("");
                if name == "item" && in_item {
                    in_item = false;
                    if !link.is_empty() {
                        items.push(Item {
                            title: title.clone(),
                            link: link.clone(),
                            description: truncate_chars(
                                &strip_html(&description),
                                DESCRIPTION_MAX_CHARS,
                            ),
                            published: parse_published(&pub_date),
                        });
                        if items.len() >= limit {
                            break;
                        }
                    }
                }
            }
            Ok(Event::Text(e)) => {
                let text = e.unescape().unwrap_or_default().into_owned();
                if in_item {
                    match current_tag.as_str() {
                        "title" => title = text,
                        "link" => link = text,
                        "description" => description = text,
                        "pubDate" => pub_date = text,
                        _ => {}
                    }
                } else if current_tag == "title" && channel_title.is_empty() {
                    channel_title = text;
                }
            }
            Ok(Event::CData(e)) => {
                let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                if in_item {
                    match current_tag.as_str() {
                        "title" => title = text,
                        "link" => link = text,
                        "description" => description = text,
                        _ => {}
                    }
                } else if current_tag == "title" && channel_title.is_empty() {
                    channel_title = text;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(CollectorError::Xml(e)),
            _ => {}
        }
    }

    let source = if channel_title.is_empty() {
        host_from_url(feed_url)
    } else {
        channel_title
    };

    Ok(items
        .into_iter()
        .map(|item| CandidateArticle {
            title: item.title,
            link: item.link,
            description: item.description,
            published: item.published,
            source: source.clone(),
        })
        .collect())
}

/// Best-effort timestamp parse: RFC 2822 (the RSS norm) first, then RFC 3339.
pub(crate) fn parse_published(raw: &str) -> Option<DateTime<Utc>> {
    if raw.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc2822(raw)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Derive a display name from a URL: the host, without scheme or path.
pub(crate) fn host_from_url(url: &str) -> String {
    let without_scheme = url.split_once("//").map_or(url, |(_, rest)| rest);
    without_scheme
        .split('/')
        .next()
        .unwrap_or(without_scheme)
        .to_string()
}
