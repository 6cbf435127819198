//! Plex catalog client: HTTP + XML over reqwest/quick-xml.

use async_trait::async_trait;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

use crate::config::PlexConfig;

use super::{CatalogEntry, CatalogError, CatalogSource, LibraryKind, LibrarySection};

/// Catalog client for a Plex server.
///
/// Auth is a token in the query string; responses are XML `MediaContainer`
/// documents. TLS verification is configurable since Plex commonly runs with
/// a self-signed certificate.
pub struct PlexCatalogClient {
    client: Client,
    config: PlexConfig,
}

impl PlexCatalogClient {
    pub fn new(config: PlexConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .danger_accept_invalid_certs(!config.verify_tls)
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}{}?X-Plex-Token={}",
            self.config.url.trim_end_matches('/'),
            path,
            urlencoding::encode(&self.config.token)
        )
    }

    async fn fetch_xml(&self, path: &str) -> Result<String, CatalogError> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| CatalogError::Http(e.to_string()))?;

        let status = response.status().as_u16();
        if status != 200 {
            return Err(CatalogError::Status(status));
        }

        response
            .text()
            .await
            .map_err(|e| CatalogError::Http(e.to_string()))
    }
}

#[async_trait]
impl CatalogSource for PlexCatalogClient {
    async fn library_sections(&self) -> Result<Vec<LibrarySection>, CatalogError> {
        let xml = self.fetch_xml("/library/sections").await?;
        let sections = parse_sections(&xml)?;
        debug!(sections = sections.len(), "Fetched Plex library sections");
        Ok(sections)
    }

    async fn section_items(
        &self,
        section: &LibrarySection,
    ) -> Result<Vec<CatalogEntry>, CatalogError> {
        let xml = self
            .fetch_xml(&format!("/library/sections/{}/all", section.id))
            .await?;
        let items = parse_section_items(&xml, section.kind)?;
        debug!(
            section = %section.title,
            items = items.len(),
            "Fetched Plex section items"
        );
        Ok(items)
    }
}

fn attributes(element: &BytesStart<'_>) -> Result<HashMap<String, String>, CatalogError> {
    let mut attrs = HashMap::new();
    for attr in element.attributes() {
        let attr = attr.map_err(|e| CatalogError::Xml(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| CatalogError::Xml(e.to_string()))?
            .to_string();
        attrs.insert(key, value);
    }
    Ok(attrs)
}

/// Parse `/library/sections`: `<Directory type=.. key=.. title=..>` elements,
/// keeping only the known content kinds ("artist" classifies as music).
pub(crate) fn parse_sections(xml: &str) -> Result<Vec<LibrarySection>, CatalogError> {
    let mut reader = Reader::from_reader(xml.as_bytes());
    reader.config_mut().trim_text(true);

    let mut sections = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e))
                if e.name().as_ref() == b"Directory" =>
            {
                let attrs = attributes(e)?;
                let kind = attrs
                    .get("type")
                    .and_then(|t| LibraryKind::from_section_type(t));
                if let (Some(kind), Some(id), Some(title)) =
                    (kind, attrs.get("key"), attrs.get("title"))
                {
                    sections.push(LibrarySection {
                        id: id.clone(),
                        title: title.clone(),
                        kind,
                    });
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(CatalogError::Xml(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(sections)
}

/// Parse a section's item list. Movie items are `<Video>` elements; show and
/// music items are `<Directory>` elements. Item identity is the `ratingKey`.
pub(crate) fn parse_section_items(
    xml: &str,
    kind: LibraryKind,
) -> Result<Vec<CatalogEntry>, CatalogError> {
    let item_tag: &[u8] = match kind {
        LibraryKind::Movie => b"Video",
        LibraryKind::Show | LibraryKind::Music => b"Directory",
    };

    let mut reader = Reader::from_reader(xml.as_bytes());
    reader.config_mut().trim_text(true);

    let mut items = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) if e.name().as_ref() == item_tag => {
                let attrs = attributes(e)?;
                if let Some(id) = attrs.get("ratingKey") {
                    let title = attrs.get("title").map(String::as_str).unwrap_or("");
                    let original = attrs.get("originalTitle").map(String::as_str).unwrap_or("");
                    let year = attrs.get("year").and_then(|y| y.parse().ok());
                    items.push(CatalogEntry::new(title, original, year, id));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(CatalogError::Xml(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(items)
}
