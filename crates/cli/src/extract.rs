//! Typekit font extraction.
//!
//! A page embeds Typekit through a kit script on `use.typekit.net`. The kit
//! script names a CSS file whose `@font-face` rules carry the fonts as base64
//! `data:` URIs. Each font is decoded, converted to OTF when it is a WOFF file,
//! and written as `<family>_<style>_<weight>.otf`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use base64::{Engine, engine::general_purpose::STANDARD};
use html5ever::{parse_document, tendril::TendrilSink};
use log::{debug, info};
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use regex::Regex;
use reqwest::{
    blocking::Client,
    header::{self, HeaderMap, HeaderValue},
};
use typelift_woff::{Transcoder, WOFF_SIGNATURE};
use url::Url;

use crate::{
    config::{CSS_FORMAT, CSS_FORMAT_PLACEHOLDER, DNT, OTF_EXTENSION, TYPEKIT_HOST, USER_AGENT},
    io::write_font,
    parallel::BatchResult,
};

/// A font found in kit CSS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedFont {
    pub family: String,
    pub style: String,
    pub weight: String,
    pub data: Vec<u8>,
}

impl EmbeddedFont {
    /// File name for the extracted font, with path separators replaced.
    pub fn file_name(&self) -> String {
        let stem = format!("{}_{}_{}", self.family, self.style, self.weight);
        format!("{}.{OTF_EXTENSION}", stem.replace(['/', '\\'], "_"))
    }

    pub fn is_woff(&self) -> bool {
        self.data.starts_with(&WOFF_SIGNATURE.to_be_bytes())
    }
}

/// Source of page, kit script and kit CSS bodies.
pub trait Fetch {
    /// Body of `url` as text, requested on behalf of `referer`.
    fn fetch(&self, url: &Url, referer: &Url) -> Result<String>;
}

/// Blocking HTTP fetcher sending the headers Typekit serves kits to.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));
        headers.insert(header::DNT, HeaderValue::from_static(DNT));
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &Url, referer: &Url) -> Result<String> {
        info!("Downloading {url}");
        let response = self
            .client
            .get(url.as_str())
            .header(header::REFERER, referer.as_str())
            .send()
            .with_context(|| format!("Failed to fetch {url}"))?;
        let status = response.status();
        if !status.is_success() {
            bail!("HTTP {status} for {url}");
        }
        response.text().with_context(|| format!("Failed to read body of {url}"))
    }
}

/// Downloads kits and writes the fonts they embed.
pub struct Extractor<F = HttpFetcher> {
    fetcher: F,
    transcoder: Transcoder,
}

impl Extractor {
    pub fn new(transcoder: Transcoder) -> Result<Self> {
        Ok(Self::with_fetcher(HttpFetcher::new()?, transcoder))
    }
}

impl<F: Fetch> Extractor<F> {
    pub fn with_fetcher(fetcher: F, transcoder: Transcoder) -> Self {
        Self { fetcher, transcoder }
    }

    /// Extract every font of every kit on `page_url` into `out_dir`.
    ///
    /// A font that fails to convert or write is reported and skipped; the
    /// call fails after all fonts were attempted if any of them failed.
    /// Returns the paths written.
    pub fn extract(&self, page_url: &str, out_dir: &Path) -> Result<Vec<PathBuf>> {
        let page = Url::parse(page_url).with_context(|| format!("Invalid URL: {page_url}"))?;
        info!("Extracting fonts from {page}");

        let html = self.fetcher.fetch(&page, &page)?;
        let kit_urls = find_typekit_js_urls(&html, &page);
        if kit_urls.is_empty() {
            bail!("No Typekit scripts found on {page}");
        }

        let mut fonts = Vec::new();
        for kit_url in &kit_urls {
            let js = self.fetcher.fetch(kit_url, &page)?;
            let css_url = find_typekit_css_url(&js, &page)
                .with_context(|| format!("Failed to find kit CSS in {kit_url}"))?;
            let css = self.fetcher.fetch(&css_url, &page)?;
            fonts.extend(extract_css_fonts(&css)?);
        }

        let mut written = Vec::new();
        let mut result = BatchResult::default();
        for font in &fonts {
            let path = out_dir.join(font.file_name());
            match self.to_otf(font).and_then(|data| write_font(&path, data)) {
                Ok(()) => {
                    println!("Writing {}", path.display());
                    written.push(path);
                    result.succeeded += 1;
                }
                Err(e) => {
                    eprintln!("{e:?}");
                    result.failed += 1;
                }
            }
        }

        result.ok_or_bail("Extract")?;
        Ok(written)
    }

    /// Font bytes as OTF, transcoding WOFF payloads.
    pub fn to_otf(&self, font: &EmbeddedFont) -> Result<Vec<u8>> {
        if !font.is_woff() {
            return Ok(font.data.clone());
        }
        self.transcoder
            .convert(&font.data)
            .with_context(|| format!("Failed to convert {}", font.file_name()))
    }
}

/// Kit script URLs: the `src` of every `script` element in the page whose
/// host is Typekit, resolved against `page`.
pub fn find_typekit_js_urls(html: &str, page: &Url) -> Vec<Url> {
    let dom = parse_document(RcDom::default(), Default::default()).one(html);
    let mut sources = Vec::new();
    collect_script_sources(&dom.document, &mut sources);

    sources
        .iter()
        .filter_map(|src| page.join(src).ok())
        .filter(|url| url.host_str() == Some(TYPEKIT_HOST))
        .inspect(|url| debug!("Found kit script {url}"))
        .collect()
}

fn collect_script_sources(handle: &Handle, sources: &mut Vec<String>) {
    if let NodeData::Element { name, attrs, .. } = &handle.data
        && name.local.as_ref() == "script"
    {
        sources.extend(
            attrs
                .borrow()
                .iter()
                .filter(|attr| attr.name.local.as_ref() == "src")
                .map(|attr| attr.value.to_string()),
        );
    }
    for child in handle.children.borrow().iter() {
        collect_script_sources(child, sources);
    }
}

/// The CSS URL a kit script loads, resolved against `page`.
pub fn find_typekit_css_url(js: &str, page: &Url) -> Result<Url> {
    let config = Regex::new(r#"Typekit\.config=\{"f":"(.+?)""#)?;
    let caps = config.captures(js).context("Kit script has no Typekit.config")?;

    let template = caps[1].replace(r"\/", "/");
    let css_url = template.replace(CSS_FORMAT_PLACEHOLDER, CSS_FORMAT);
    let url = page.join(&css_url).with_context(|| format!("Invalid CSS URL: {css_url}"))?;
    debug!("Found kit CSS {url}");
    Ok(url)
}

/// Fonts embedded as base64 data URIs in `@font-face` rules.
pub fn extract_css_fonts(css: &str) -> Result<Vec<EmbeddedFont>> {
    let font_face = Regex::new(concat!(
        r#"@font-face\s*\{\s*"#,
        r#"font-family:\s*"(?P<family>[^"]+)";\s*"#,
        r#"src:\s*url\(\s*["']?data:font/[\w.+-]+;base64,(?P<data>[A-Za-z0-9+/=\s]+?)["']?\s*\)[^;]*;\s*"#,
        r#"font-style:\s*(?P<style>\w+);\s*"#,
        r#"font-weight:\s*(?P<weight>\w+);?\s*"#,
        r#"\}"#,
    ))?;

    font_face
        .captures_iter(css)
        .map(|caps| {
            let family = caps["family"].to_string();
            let encoded: String = caps["data"].split_whitespace().collect();
            let data = STANDARD
                .decode(encoded)
                .with_context(|| format!("Invalid base64 data for {family}"))?;
            let font = EmbeddedFont {
                family,
                style: caps["style"].to_string(),
                weight: caps["weight"].to_string(),
                data,
            };
            debug!(
                "Found font-family: {}, font-style: {}, font-weight: {} ({} bytes)",
                font.family,
                font.style,
                font.weight,
                font.data.len()
            );
            Ok(font)
        })
        .collect()
}
