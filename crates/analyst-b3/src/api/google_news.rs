//! Google News RSS client

use super::{endpoint, get_text};
use crate::config::ResearchConfig;
use crate::error::{ResearchError, Result};
use quick_xml::Reader;
use quick_xml::events::Event;
use tracing::debug;

/// One `<item>` of an RSS feed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
}

/// Client for the Google News search feed (Brazilian edition)
#[derive(Debug, Clone)]
pub struct GoogleNewsClient {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleNewsClient {
    /// Create a new news client
    pub fn new(client: reqwest::Client, config: &ResearchConfig) -> Self {
        Self {
            client,
            base_url: config.google_news_base.clone(),
        }
    }

    /// Feed entries for `query`, in feed order
    pub async fn search(&self, query: &str) -> Result<Vec<FeedEntry>> {
        let url = endpoint(
            &self.base_url,
            "/rss/search",
            &[
                ("q", query),
                ("hl", "pt-BR"),
                ("gl", "BR"),
                ("ceid", "BR:pt-419"),
            ],
        )?;

        let xml = get_text(&self.client, url).await?;
        let entries = parse_rss(&xml)?;
        debug!(query, count = entries.len(), "News feed parsed");
        Ok(entries)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Link,
}

/// Extract `title` and `link` of every `<item>`; channel-level fields are ignored
pub fn parse_rss(xml: &str) -> Result<Vec<FeedEntry>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut entries = Vec::new();
    let mut current: Option<FeedEntry> = None;
    let mut field: Option<Field> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"item" => current = Some(FeedEntry::default()),
                b"title" if current.is_some() => field = Some(Field::Title),
                b"link" if current.is_some() => field = Some(Field::Link),
                _ => {}
            },
            Ok(Event::Text(t)) => {
                if let (Some(entry), Some(f)) = (current.as_mut(), field) {
                    let text = t
                        .unescape()
                        .map_err(|e| ResearchError::FeedError(e.to_string()))?;
                    push_field(entry, f, &text);
                }
            }
            Ok(Event::CData(c)) => {
                if let (Some(entry), Some(f)) = (current.as_mut(), field) {
                    push_field(entry, f, &String::from_utf8_lossy(&c));
                }
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"item" => {
                    if let Some(entry) = current.take() {
                        if !entry.title.is_empty() || !entry.link.is_empty() {
                            entries.push(entry);
                        }
                    }
                }
                b"title" | b"link" => field = None,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(ResearchError::FeedError(format!(
                    "error at position {}: {e}",
                    reader.error_position()
                )));
            }
        }
    }

    Ok(entries)
}

fn push_field(entry: &mut FeedEntry, field: Field, text: &str) {
    let target = match field {
        Field::Title => &mut entry.title,
        Field::Link => &mut entry.link,
    };
    target.push_str(text.trim());
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel>
  <title>"magalu" - Google Notícias</title>
  <link>https://news.google.com/</link>
  <item>
    <title>Magalu reporta lucro &amp; vendas</title>
    <link>https://news.example/1</link>
  </item>
  <item>
    <title><![CDATA[Ações da Magazine Luiza sobem]]></title>
    <link>https://news.example/2</link>
  </item>
</channel></rss>"#;

    #[test]
    fn test_parse_items_only() {
        let entries = parse_rss(FEED).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "Magalu reporta lucro & vendas");
        assert_eq!(entries[0].link, "https://news.example/1");
        assert_eq!(entries[1].title, "Ações da Magazine Luiza sobem");
    }

    #[test]
    fn test_parse_empty_channel() {
        let entries = parse_rss("<rss><channel><title>x</title></channel></rss>").unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_parse_malformed() {
        let err = parse_rss("<rss><channel><item><title>x</item></rss>").unwrap_err();
        assert!(matches!(err, ResearchError::FeedError(_)));
    }
}
