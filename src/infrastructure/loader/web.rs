use async_trait::async_trait;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use url::Url;

use crate::domain::{chunk_content, ports::DocumentLoader, DocumentChunk, DomainError};
use crate::infrastructure::config::LoaderConfig;

const SKIPPED_TAGS: [&str; 9] = [
    "script", "style", "template", "noscript", "svg", "nav", "header", "footer", "form",
];
const BLOCK_TAGS: [&str; 11] = [
    "h1", "h2", "h3", "h4", "h5", "h6", "p", "li", "blockquote", "pre", "td",
];

/// Fetches one page over HTTP and splits its readable text into chunks.
pub struct WebPageLoader {
    client: Client,
    chunk_size: usize,
}

impl WebPageLoader {
    pub fn new(config: &LoaderConfig, chunk_size: usize) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.max(1)))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| DomainError::internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, chunk_size })
    }
}

#[async_trait]
impl DocumentLoader for WebPageLoader {
    #[tracing::instrument(skip(self))]
    async fn load(&self, url: &str) -> Result<Vec<DocumentChunk>, DomainError> {
        let parsed = parse_page_url(url)?;

        let response = self
            .client
            .get(parsed.clone())
            .send()
            .await
            .map_err(|e| DomainError::ingestion(format!("failed to fetch {parsed}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::ingestion(format!("{parsed} returned {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| DomainError::ingestion(format!("failed to read {parsed}: {e}")))?;

        let text = extract_page_text(&body);
        let chunks = chunk_content(url, &text, self.chunk_size);
        if chunks.is_empty() {
            return Err(DomainError::ingestion(format!("no readable text found at {parsed}")));
        }

        tracing::debug!(bytes = body.len(), chunks = chunks.len(), "page loaded");
        Ok(chunks)
    }
}

/// Accepts absolute http(s) URLs only.
pub fn parse_page_url(raw: &str) -> Result<Url, DomainError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| DomainError::ingestion(format!("invalid URL {raw:?}: {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(DomainError::ingestion(format!(
            "unsupported URL scheme {other:?}, expected http or https"
        ))),
    }
}

/// Readable text of an HTML document, one paragraph per block element.
///
/// Prefers `<article>`, then `<main>`, then `<body>`. Navigation, scripts and
/// similar chrome are dropped.
pub fn extract_page_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let root = pick_root(&document);

    let mut paragraphs: Vec<String> = root
        .descendent_elements()
        .filter(|el| BLOCK_TAGS.contains(&el.value().name()))
        .filter(|el| !inside_skipped_or_block(el))
        .map(|el| collapse_whitespace(el.text()))
        .filter(|text| !text.is_empty())
        .collect();

    if paragraphs.is_empty() {
        let fallback = collapse_whitespace(
            root.descendants()
                .filter_map(|node| node.value().as_text().map(|text| (node, text)))
                .filter(|(node, _)| {
                    !node
                        .ancestors()
                        .filter_map(ElementRef::wrap)
                        .any(|el| SKIPPED_TAGS.contains(&el.value().name()))
                })
                .map(|(_, text)| &**text),
        );
        if !fallback.is_empty() {
            paragraphs.push(fallback);
        }
    }

    paragraphs.join("\n\n")
}

fn pick_root(document: &Html) -> ElementRef<'_> {
    ["article", "main", "body"]
        .iter()
        .filter_map(|tag| Selector::parse(tag).ok())
        .find_map(|selector| document.select(&selector).next())
        .unwrap_or_else(|| document.root_element())
}

/// Nested blocks are already covered by their outer block's text.
fn inside_skipped_or_block(element: &ElementRef<'_>) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| {
            let name = ancestor.value().name();
            SKIPPED_TAGS.contains(&name) || BLOCK_TAGS.contains(&name)
        })
}

fn collapse_whitespace<'a>(pieces: impl Iterator<Item = &'a str>) -> String {
    let mut buf = String::new();
    for word in pieces.flat_map(str::split_whitespace) {
        if !buf.is_empty() {
            buf.push(' ');
        }
        buf.push_str(word);
    }
    buf
}
