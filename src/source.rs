//! Data sources and the fetchers that read category resources from them.

use crate::error::{Error, Result};
use reqwest::Url;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Raw response for one resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: 404,
            body: String::new(),
        }
    }

    /// True for 2xx statuses
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Reads a resource path relative to the site root
pub trait Fetch: Send + Sync {
    fn fetch(&self, resource: &str) -> Result<Response>;
}

/// Where the category data lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Site root on disk
    Directory(PathBuf),
    /// Site root served over HTTP(S)
    Remote(Url),
    /// Page addressed through the local-file protocol
    LocalFile(Url),
}

impl Source {
    /// Build the fetcher for this source.
    ///
    /// Fails with [`Error::LocalFileProtocol`] for `file://` sources, since
    /// relative fetches are not possible from a page opened that way.
    pub fn fetcher(&self) -> Result<Box<dyn Fetch>> {
        match self {
            Source::Directory(root) => {
                if !root.is_dir() {
                    return Err(Error::PathNotFound(root.clone()));
                }
                Ok(Box::new(DirectoryFetcher::new(root)))
            }
            Source::Remote(base) => Ok(Box::new(HttpFetcher::new(base.clone())?)),
            Source::LocalFile(_) => Err(Error::LocalFileProtocol),
        }
    }

    /// Directory root, when the data is on disk
    pub fn directory(&self) -> Option<&Path> {
        match self {
            Source::Directory(root) => Some(root),
            _ => None,
        }
    }
}

impl FromStr for Source {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(Error::invalid_source("source must not be empty"));
        }

        let lower = trimmed.to_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            let mut url = parse_url(trimmed)?;
            // Resources join onto the base, so it must read as a directory
            if !url.path().ends_with('/') {
                let path = format!("{}/", url.path());
                url.set_path(&path);
            }
            Ok(Source::Remote(url))
        } else if lower.starts_with("file:") {
            let url = parse_url(trimmed)?;
            Ok(Source::LocalFile(url))
        } else {
            Ok(Source::Directory(PathBuf::from(trimmed)))
        }
    }
}

fn parse_url(s: &str) -> Result<Url> {
    Url::parse(s).map_err(|e| Error::invalid_source(format!("{}: {}", s, e)))
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Directory(root) => write!(f, "{}", root.display()),
            Source::Remote(url) | Source::LocalFile(url) => write!(f, "{}", url),
        }
    }
}

/// Fetches resources from a directory on disk
#[derive(Debug, Clone)]
pub struct DirectoryFetcher {
    root: PathBuf,
}

impl DirectoryFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Fetch for DirectoryFetcher {
    fn fetch(&self, resource: &str) -> Result<Response> {
        let path = self.root.join(resource);
        debug!(path = %path.display(), "reading resource");
        if !path.is_file() {
            return Ok(Response::not_found());
        }
        Ok(Response::ok(std::fs::read_to_string(&path)?))
    }
}

/// Fetches resources over HTTP
pub struct HttpFetcher {
    base: Url,
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(base: Url) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("pgportal/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { base, client })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, resource: &str) -> Result<Response> {
        let url = self
            .base
            .join(resource)
            .map_err(|e| Error::invalid_source(format!("{}: {}", resource, e)))?;
        debug!(%url, "fetching resource");

        let response = self.client.get(url).send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(Response { status, body })
    }
}
