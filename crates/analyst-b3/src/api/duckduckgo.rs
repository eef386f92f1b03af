//! DuckDuckGo lite HTML search client

use super::{endpoint, get_text};
use crate::config::ResearchConfig;
use crate::error::{ResearchError, Result};
use quick_xml::escape::unescape;
use regex::Regex;
use std::borrow::Cow;
use tracing::debug;
use url::Url;

/// One organic search hit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub title: String,
    pub link: String,
    pub snippet: String,
}

/// Client for the DuckDuckGo lite HTML endpoint
#[derive(Debug, Clone)]
pub struct DuckDuckGoClient {
    client: reqwest::Client,
    base_url: String,
    anchor_re: Regex,
    href_re: Regex,
    snippet_re: Regex,
    tag_re: Regex,
}

impl DuckDuckGoClient {
    /// Create a new search client
    pub fn new(client: reqwest::Client, config: &ResearchConfig) -> Result<Self> {
        Ok(Self {
            client,
            base_url: config.duckduckgo_base.clone(),
            anchor_re: compile(r#"(?is)<a\b([^>]*class=['"]result-link['"][^>]*)>(.*?)</a>"#)?,
            href_re: compile(r#"(?i)href=['"]([^'"]+)['"]"#)?,
            snippet_re: compile(r#"(?is)class=['"]result-snippet['"][^>]*>(.*?)</td>"#)?,
            tag_re: compile(r"(?s)<[^>]*>")?,
        })
    }

    /// Search results for `query`, in page order
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let url = endpoint(&self.base_url, "/lite/", &[("q", query)])?;
        let html = get_text(&self.client, url).await?;
        let results = self.parse_results(&html);
        debug!(query, count = results.len(), "DuckDuckGo results parsed");
        Ok(results)
    }

    /// Search and flatten the hits into plain text, one hit per line
    pub async fn search_text(&self, query: &str) -> Result<String> {
        let results = self.search(query).await?;
        Ok(results
            .iter()
            .map(|r| {
                if r.snippet.is_empty() {
                    format!("{} ({})", r.title, r.link)
                } else {
                    format!("{}: {} ({})", r.title, r.snippet, r.link)
                }
            })
            .collect::<Vec<_>>()
            .join("\n"))
    }

    /// Parse the lite results table
    ///
    /// A hit's snippet is the first one between its link and the next link.
    pub fn parse_results(&self, html: &str) -> Vec<SearchResult> {
        let anchors: Vec<_> = self.anchor_re.captures_iter(html).collect();

        anchors
            .iter()
            .enumerate()
            .filter_map(|(i, cap)| {
                let whole = cap.get(0)?;
                let attrs = cap.get(1).map_or("", |m| m.as_str());
                let href = self.href_re.captures(attrs)?.get(1)?.as_str();
                let title = self.clean_text(cap.get(2).map_or("", |m| m.as_str()));
                if title.is_empty() {
                    return None;
                }

                let row_end = anchors
                    .get(i + 1)
                    .and_then(|next| next.get(0))
                    .map_or(html.len(), |m| m.start());
                let snippet = self
                    .snippet_re
                    .captures(&html[whole.end()..row_end])
                    .and_then(|c| c.get(1))
                    .map(|m| self.clean_text(m.as_str()))
                    .unwrap_or_default();

                Some(SearchResult {
                    title,
                    link: resolve_link(&decode_entities(href)),
                    snippet,
                })
            })
            .collect()
    }

    fn clean_text(&self, fragment: &str) -> String {
        let stripped = self.tag_re.replace_all(fragment, "");
        decode_entities(&stripped)
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| ResearchError::Other(format!("invalid pattern: {e}")))
}

fn decode_entities(text: &str) -> String {
    let text = text.replace("&nbsp;", " ");
    unescape(&text).map_or_else(|_| text.clone(), Cow::into_owned)
}

/// Unwrap `//duckduckgo.com/l/?uddg=<target>` redirect links
fn resolve_link(href: &str) -> String {
    let absolute = if href.starts_with("//") {
        format!("https:{href}")
    } else {
        href.to_string()
    };

    Url::parse(&absolute)
        .ok()
        .and_then(|url| {
            url.query_pairs()
                .find(|(k, _)| k == "uddg")
                .map(|(_, v)| v.into_owned())
        })
        .unwrap_or(absolute)
}
