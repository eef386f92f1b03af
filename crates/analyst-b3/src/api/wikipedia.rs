//! MediaWiki action API client for encyclopedia summaries

use super::{endpoint, get_text};
use crate::config::ResearchConfig;
use crate::error::{ResearchError, Result};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    query: Option<SearchQuery>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
}

#[derive(Debug, Deserialize)]
struct PagesEnvelope {
    query: Option<PagesQuery>,
}

#[derive(Debug, Deserialize)]
struct PagesQuery {
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    title: String,
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    invalid: bool,
    #[serde(default)]
    extract: Option<String>,
    #[serde(default)]
    pageprops: Option<PageProps>,
}

#[derive(Debug, Deserialize)]
struct PageProps {
    #[serde(default)]
    disambiguation: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ParseEnvelope {
    parse: Option<ParsedPage>,
}

#[derive(Debug, Deserialize)]
struct ParsedPage {
    #[serde(default)]
    links: Vec<PageLink>,
}

#[derive(Debug, Deserialize)]
struct PageLink {
    ns: i64,
    title: String,
}

/// Client for plain-text summaries from a MediaWiki wiki
#[derive(Debug, Clone)]
pub struct WikipediaClient {
    client: reqwest::Client,
    api_url: String,
    sentences: usize,
}

impl WikipediaClient {
    /// Create a new client for the configured wiki
    pub fn new(client: reqwest::Client, config: &ResearchConfig) -> Self {
        Self {
            client,
            api_url: config.wikipedia_api.clone(),
            sentences: config.summary_sentences,
        }
    }

    /// Summary of the best search hit for `query`
    ///
    /// Fails with [`ResearchError::NotFound`] when nothing matches and with
    /// [`ResearchError::Ambiguous`] when the hit is a disambiguation page.
    pub async fn summary(&self, query: &str) -> Result<String> {
        let title = self
            .search_title(query)
            .await?
            .ok_or_else(|| ResearchError::NotFound(query.to_string()))?;
        self.page_summary(&title).await
    }

    /// Summary of the page titled `title`
    pub async fn page_summary(&self, title: &str) -> Result<String> {
        let sentences = self.sentences.to_string();
        let url = endpoint(
            &self.api_url,
            "",
            &[
                ("action", "query"),
                ("prop", "extracts|pageprops"),
                ("exsentences", &sentences),
                ("explaintext", "1"),
                ("redirects", "1"),
                ("ppprop", "disambiguation"),
                ("titles", title),
                ("format", "json"),
                ("formatversion", "2"),
            ],
        )?;

        let envelope: PagesEnvelope = serde_json::from_str(&get_text(&self.client, url).await?)?;
        let page = envelope
            .query
            .and_then(|q| q.pages.into_iter().next())
            .ok_or_else(|| ResearchError::NotFound(title.to_string()))?;

        if page.missing || page.invalid {
            return Err(ResearchError::NotFound(title.to_string()));
        }

        if page
            .pageprops
            .as_ref()
            .is_some_and(|p| p.disambiguation.is_some())
        {
            let options = self.disambiguation_options(&page.title).await?;
            debug!(title = %page.title, options = options.len(), "Disambiguation page");
            return Err(ResearchError::Ambiguous {
                query: title.to_string(),
                options,
            });
        }

        match page.extract.map(|e| e.trim().to_string()) {
            Some(extract) if !extract.is_empty() => Ok(extract),
            _ => Err(ResearchError::NotFound(title.to_string())),
        }
    }

    async fn search_title(&self, query: &str) -> Result<Option<String>> {
        let url = endpoint(
            &self.api_url,
            "",
            &[
                ("action", "query"),
                ("list", "search"),
                ("srsearch", query),
                ("srlimit", "1"),
                ("format", "json"),
                ("formatversion", "2"),
            ],
        )?;

        let envelope: SearchEnvelope = serde_json::from_str(&get_text(&self.client, url).await?)?;
        Ok(envelope
            .query
            .and_then(|q| q.search.into_iter().next())
            .map(|hit| hit.title))
    }

    /// Article links of a disambiguation page, in page order
    async fn disambiguation_options(&self, title: &str) -> Result<Vec<String>> {
        let url = endpoint(
            &self.api_url,
            "",
            &[
                ("action", "parse"),
                ("page", title),
                ("prop", "links"),
                ("format", "json"),
                ("formatversion", "2"),
            ],
        )?;

        let envelope: ParseEnvelope = serde_json::from_str(&get_text(&self.client, url).await?)?;
        Ok(envelope
            .parse
            .map(|p| {
                p.links
                    .into_iter()
                    .filter(|l| l.ns == 0)
                    .map(|l| l.title)
                    .collect()
            })
            .unwrap_or_default())
    }
}
