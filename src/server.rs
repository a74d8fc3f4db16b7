//! Static server for a built portal or a portal data root.
//!
//! Only what a portal page requests is served: the page, `search.json`,
//! `assets/*` and `data/**/*.json`. Misses under `data/` answer with a JSON
//! body, so fetchers see the same 404 a static host would give them.

use crate::error::{Error, Result};
use reqwest::Url;
use serde_json::json;
use std::io::{self, BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Serves a portal directory, one thread per connection
pub struct StaticServer {
    root: PathBuf,
    listener: TcpListener,
}

impl StaticServer {
    /// Bind to `addr`. Port 0 picks a free port.
    pub fn bind(root: impl Into<PathBuf>, addr: &str) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(Error::PathNotFound(root));
        }
        let listener = TcpListener::bind(addr)
            .map_err(|e| Error::other(format!("Failed to bind to {}: {}", addr, e)))?;
        Ok(Self { root, listener })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept connections until the process exits
    pub fn run(self) -> Result<()> {
        info!(root = %self.root.display(), addr = %self.local_addr()?, "serving portal");

        for stream in self.listener.incoming() {
            let stream = match stream {
                Ok(stream) => stream,
                Err(e) => {
                    warn!(error = %e, "connection error");
                    continue;
                }
            };
            let root = self.root.clone();
            std::thread::spawn(move || {
                if let Err(e) = serve_connection(stream, &root) {
                    warn!(error = %e, "request error");
                }
            });
        }

        Ok(())
    }
}

/// Portal file a request path refers to
#[derive(Debug, Clone, PartialEq, Eq)]
enum Route {
    Page,
    Search,
    Asset(PathBuf),
    Data(PathBuf),
}

impl Route {
    /// Map a request target onto the portal layout. Dot segments are
    /// resolved first; hidden names and anything outside the layout map to
    /// `None`.
    fn parse(target: &str) -> Option<Self> {
        let base = Url::parse("http://portal.local/").ok()?;
        let url = base.join(target).ok()?;
        let segments: Vec<&str> = url.path_segments()?.filter(|s| !s.is_empty()).collect();
        if segments.iter().any(|s| s.starts_with('.')) {
            return None;
        }

        match segments.as_slice() {
            [] | ["index.html"] => Some(Route::Page),
            ["search.json"] => Some(Route::Search),
            ["assets", rest @ ..] if !rest.is_empty() => Some(Route::Asset(rest.iter().collect())),
            ["data", rest @ ..] if !rest.is_empty() => Some(Route::Data(rest.iter().collect())),
            _ => None,
        }
    }

    fn file(&self, root: &Path) -> PathBuf {
        match self {
            Route::Page => root.join("index.html"),
            Route::Search => root.join("search.json"),
            Route::Asset(rel) => root.join("assets").join(rel),
            Route::Data(rel) => root.join("data").join(rel),
        }
    }

    fn accepts(&self, kind: FileKind) -> bool {
        match self {
            Route::Page => kind == FileKind::Html,
            Route::Search | Route::Data(_) => kind == FileKind::Json,
            Route::Asset(_) => true,
        }
    }

    /// JSON routes answer misses with JSON
    fn is_json(&self) -> bool {
        matches!(self, Route::Search | Route::Data(_))
    }
}

/// The file types a portal consists of
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileKind {
    Html,
    Css,
    Script,
    Json,
}

impl FileKind {
    fn of(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "html" => Some(FileKind::Html),
            "css" => Some(FileKind::Css),
            "js" => Some(FileKind::Script),
            "json" => Some(FileKind::Json),
            _ => None,
        }
    }

    fn content_type(self) -> &'static str {
        match self {
            FileKind::Html => "text/html; charset=utf-8",
            FileKind::Css => "text/css; charset=utf-8",
            FileKind::Script => "application/javascript; charset=utf-8",
            FileKind::Json => "application/json",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Reply {
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
}

impl Reply {
    fn file(kind: FileKind, body: Vec<u8>) -> Self {
        Self {
            status: 200,
            content_type: kind.content_type(),
            body,
        }
    }

    fn text(status: u16) -> Self {
        Self {
            status,
            content_type: "text/plain; charset=utf-8",
            body: reason(status).as_bytes().to_vec(),
        }
    }

    fn not_found(route: &Route, target: &str) -> Self {
        if !route.is_json() {
            return Self::text(404);
        }
        let body = json!({ "error": reason(404), "path": target });
        Self {
            status: 404,
            content_type: FileKind::Json.content_type(),
            body: body.to_string().into_bytes(),
        }
    }

    fn write_to(&self, out: &mut impl Write) -> io::Result<()> {
        write!(
            out,
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            self.status,
            reason(self.status),
            self.content_type,
            self.body.len()
        )?;
        out.write_all(&self.body)?;
        out.flush()
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        _ => "Error",
    }
}

/// Answer one request line against the portal root
fn respond(root: &Path, method: &str, target: &str) -> Reply {
    if method != "GET" {
        return Reply::text(405);
    }
    let Some(route) = Route::parse(target) else {
        return Reply::text(404);
    };

    let path = route.file(root);
    let kind = match FileKind::of(&path) {
        Some(kind) if route.accepts(kind) => kind,
        _ => return Reply::not_found(&route, target),
    };

    match std::fs::read(&path) {
        Ok(body) => Reply::file(kind, body),
        Err(_) => Reply::not_found(&route, target),
    }
}

fn serve_connection(stream: TcpStream, root: &Path) -> Result<()> {
    let mut reader = BufReader::new(stream.try_clone()?);
    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;

    // Headers are not used, but are read so the client sees a clean close
    let mut header = String::new();
    loop {
        header.clear();
        if reader.read_line(&mut header)? == 0 || header.trim().is_empty() {
            break;
        }
    }

    let mut parts = request_line.split_whitespace();
    let reply = match (parts.next(), parts.next()) {
        (Some(method), Some(target)) => respond(root, method, target),
        _ => Reply::text(400),
    };
    debug!(status = reply.status, request = request_line.trim(), "request");

    let mut stream = stream;
    reply.write_to(&mut stream)?;
    Ok(())
}
