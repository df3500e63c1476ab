//! Static sitemap generation for the deployed site.

use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use quick_xml::{
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
    Writer,
};
use thiserror::Error;

pub const DEFAULT_HOSTNAME: &str = "https://your-site.vercel.app";
pub const DEFAULT_OUTPUT: &str = "public/sitemap.xml";
const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("priority {0} is outside 0.0..=1.0")]
    InvalidPriority(f32),
    #[error("XML error: {0}")]
    Xml(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn xml_error(err: impl fmt::Display) -> SitemapError {
    SitemapError::Xml(err.to_string())
}

/// How often a page is expected to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFrequency::Always => "always",
            ChangeFrequency::Hourly => "hourly",
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
            ChangeFrequency::Yearly => "yearly",
            ChangeFrequency::Never => "never",
        }
    }
}

impl fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub path: String,
    pub changefreq: ChangeFrequency,
    pub priority: f32,
}

impl SitemapEntry {
    pub fn new(
        path: impl Into<String>,
        changefreq: ChangeFrequency,
        priority: f32,
    ) -> Result<Self, SitemapError> {
        if !(0.0..=1.0).contains(&priority) {
            return Err(SitemapError::InvalidPriority(priority));
        }
        Ok(Self {
            path: path.into(),
            changefreq,
            priority,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Sitemap {
    hostname: String,
    entries: Vec<SitemapEntry>,
}

impl Sitemap {
    pub fn new(hostname: impl Into<String>) -> Self {
        let hostname: String = hostname.into();
        Self {
            hostname: hostname.trim_end_matches('/').to_string(),
            entries: Vec::new(),
        }
    }

    /// The routes of the deployed tracker.
    pub fn site_routes(hostname: impl Into<String>) -> Result<Self, SitemapError> {
        let mut sitemap = Self::new(hostname);
        sitemap.push(SitemapEntry::new("/", ChangeFrequency::Weekly, 1.0)?);
        sitemap.push(SitemapEntry::new("/about", ChangeFrequency::Monthly, 0.8)?);
        sitemap.push(SitemapEntry::new("/contact", ChangeFrequency::Monthly, 0.8)?);
        Ok(sitemap)
    }

    pub fn push(&mut self, entry: SitemapEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[SitemapEntry] {
        &self.entries
    }

    pub fn location(&self, entry: &SitemapEntry) -> String {
        if entry.path.starts_with('/') {
            format!("{}{}", self.hostname, entry.path)
        } else {
            format!("{}/{}", self.hostname, entry.path)
        }
    }

    pub fn render(&self) -> Result<String, SitemapError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(xml_error)?;
        writer
            .write_event(Event::Start(
                BytesStart::new("urlset").with_attributes([("xmlns", SITEMAP_NAMESPACE)]),
            ))
            .map_err(xml_error)?;

        for entry in &self.entries {
            writer
                .write_event(Event::Start(BytesStart::new("url")))
                .map_err(xml_error)?;
            write_text_element(&mut writer, "loc", &self.location(entry))?;
            write_text_element(&mut writer, "changefreq", entry.changefreq.as_str())?;
            write_text_element(&mut writer, "priority", &format!("{:.1}", entry.priority))?;
            writer
                .write_event(Event::End(BytesEnd::new("url")))
                .map_err(xml_error)?;
        }

        writer
            .write_event(Event::End(BytesEnd::new("urlset")))
            .map_err(xml_error)?;
        String::from_utf8(writer.into_inner()).map_err(xml_error)
    }

    /// Renders and writes the document, creating parent directories as needed.
    pub fn write_to(&self, path: &Path) -> Result<PathBuf, SitemapError> {
        let xml = self.render()?;
        if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, xml)?;
        tracing::info!(path = %path.display(), urls = self.entries.len(), "sitemap written");
        Ok(path.to_path_buf())
    }
}

fn write_text_element(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    text: &str,
) -> Result<(), SitemapError> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(xml_error)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(xml_error)?;
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(xml_error)?;
    Ok(())
}
