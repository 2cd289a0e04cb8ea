use crate::http::body::BodyStream;
use crate::http::headers::{HeaderMap, HeaderValuesMap};
use crate::http::query::{decode_query, split_target};
use anyhow::anyhow;
use bytes::Bytes;
use once_cell::unsync::OnceCell;
use std::collections::HashMap;
use std::io::BufRead;
use std::net::SocketAddr;

/// The request-capability interface handlers and the dispatch layer program
/// against.
///
/// Both genuine inbound requests and forwarded views implement this trait,
/// so downstream processing cannot distinguish one from the other. Fields a
/// given implementation does not support are `None` rather than errors;
/// callers must treat "not supported by this view" as a first-class outcome.
pub trait RequestView {
    /// The HTTP method, always in upper-case form.
    fn method(&self) -> String;

    /// The path portion of the request target, before any `?`.
    fn path(&self) -> &str;

    /// The query string after the first `?`, or `None` if the target has no `?`.
    ///
    /// A missing query string is `None`, never `Some("")`.
    fn query_string(&self) -> Option<&str>;

    /// Decoded query parameters, name to ordered values.
    fn query_parameters(&self) -> &HashMap<String, Vec<String>>;

    /// The prefix under which the handler is mounted, `""` when there is none.
    fn mount_path(&self) -> &str;

    /// Full routing path: mount path joined with the path portion.
    ///
    /// Collapses a double slash at the join seam and guarantees a leading `/`.
    fn request_path(&self) -> String {
        join_paths(self.mount_path(), self.path())
    }

    /// Body length in bytes, 0 when there is no body.
    fn content_length(&self) -> usize;

    /// The media type of the body, if one was supplied.
    fn content_type(&self) -> Option<&str>;

    /// Readable stream over the body bytes, or `None` when there is no body.
    ///
    /// Repeated calls return handles to the same underlying stream; bytes
    /// already consumed are not replayed.
    fn body_stream(&self) -> Option<BodyStream>;

    /// The character encoding of the body, if known.
    fn character_encoding(&self) -> Option<&str>;

    /// Filesystem translation of the path, if the environment provides one.
    fn path_translated(&self) -> Option<&str>;

    /// Buffered text reader over the body, if the view supports text decoding.
    fn reader(&self) -> Option<Box<dyn BufRead + '_>>;

    /// Single-value view of the request headers.
    fn headers(&self) -> &HeaderMap;

    /// Multi-value view of the request headers.
    fn header_values(&self) -> &HeaderValuesMap;

    /// Address of the peer that originated the request, if known.
    fn remote_addr(&self) -> Option<SocketAddr>;

    /// HTTP version string (typically "HTTP/1.1").
    fn version(&self) -> &str;
}

/// Joins a mount path and a path portion into a routing path.
///
/// Avoids the double slash when the mount path ends with `/` and the path
/// starts with one, and prepends `/` when the result would lack it.
pub fn join_paths(mount: &str, path: &str) -> String {
    let joined = if mount.ends_with('/') && path.starts_with('/') {
        format!("{}{}", mount, &path[1..])
    } else {
        format!("{}{}", mount, path)
    };

    if joined.starts_with('/') {
        joined
    } else {
        format!("/{}", joined)
    }
}

/// Extracts the `charset` parameter from a media type, if present.
///
/// `"text/html; charset=utf-8"` yields `Some("utf-8")`.
fn charset_of(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if name.trim().eq_ignore_ascii_case("charset") {
            Some(value.trim().trim_matches('"'))
        } else {
            None
        }
    })
}

/// A genuine inbound request as captured at the edge.
///
/// This is the "original" that forwarded views wrap. The target keeps path
/// and query together as received; splitting and parameter decoding happen
/// on access.
#[derive(Debug)]
pub struct IncomingRequest {
    method: String,
    target: String,
    version: String,
    mount_path: String,
    headers: HeaderMap,
    header_values: HeaderValuesMap,
    body: Option<Bytes>,
    remote_addr: Option<SocketAddr>,
    stream: OnceCell<BodyStream>,
    parameters: OnceCell<HashMap<String, Vec<String>>>,
}

/// Builder for constructing [`IncomingRequest`] objects.
pub struct IncomingRequestBuilder {
    method: Option<String>,
    target: Option<String>,
    version: Option<String>,
    mount_path: String,
    headers: HeaderMap,
    header_values: HeaderValuesMap,
    body: Option<Bytes>,
    remote_addr: Option<SocketAddr>,
}

impl IncomingRequest {
    pub fn builder() -> IncomingRequestBuilder {
        IncomingRequestBuilder::new()
    }

    /// The request target as received, path and query together.
    pub fn target(&self) -> &str {
        &self.target
    }
}

impl IncomingRequestBuilder {
    pub fn new() -> Self {
        Self {
            method: None,
            target: None,
            version: None,
            mount_path: String::new(),
            headers: HeaderMap::new(),
            header_values: HeaderValuesMap::new(),
            body: None,
            remote_addr: None,
        }
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn mount_path(mut self, mount_path: impl Into<String>) -> Self {
        self.mount_path = mount_path.into();
        self
    }

    /// Records a header in both the single-value and multi-value maps.
    ///
    /// Repeated names keep the first value in the single-value map and
    /// accumulate all values, in order, in the multi-value map.
    pub fn header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        let name = name.as_ref();
        let value = value.into();
        if !self.headers.contains(name) {
            self.headers.insert(name, value.clone());
        }
        self.header_values.append(name, value);
        self
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn remote_addr(mut self, addr: SocketAddr) -> Self {
        self.remote_addr = Some(addr);
        self
    }

    pub fn build(self) -> anyhow::Result<IncomingRequest> {
        Ok(IncomingRequest {
            method: self.method.ok_or_else(|| anyhow!("method missing"))?,
            target: self.target.ok_or_else(|| anyhow!("target missing"))?,
            version: self.version.unwrap_or_else(|| "HTTP/1.1".to_string()),
            mount_path: self.mount_path,
            headers: self.headers,
            header_values: self.header_values,
            body: self.body,
            remote_addr: self.remote_addr,
            stream: OnceCell::new(),
            parameters: OnceCell::new(),
        })
    }
}

impl Default for IncomingRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestView for IncomingRequest {
    fn method(&self) -> String {
        self.method.to_ascii_uppercase()
    }

    fn path(&self) -> &str {
        split_target(&self.target).0
    }

    fn query_string(&self) -> Option<&str> {
        split_target(&self.target).1
    }

    fn query_parameters(&self) -> &HashMap<String, Vec<String>> {
        self.parameters
            .get_or_init(|| self.query_string().map(decode_query).unwrap_or_default())
    }

    fn mount_path(&self) -> &str {
        &self.mount_path
    }

    fn content_length(&self) -> usize {
        self.body.as_ref().map(Bytes::len).unwrap_or(0)
    }

    fn content_type(&self) -> Option<&str> {
        self.headers.get("content-type")
    }

    fn body_stream(&self) -> Option<BodyStream> {
        self.body.as_ref().map(|bytes| {
            self.stream
                .get_or_init(|| BodyStream::new(bytes.clone()))
                .clone()
        })
    }

    fn character_encoding(&self) -> Option<&str> {
        self.content_type().and_then(charset_of)
    }

    fn path_translated(&self) -> Option<&str> {
        None
    }

    fn reader(&self) -> Option<Box<dyn BufRead + '_>> {
        self.body
            .as_ref()
            .map(|bytes| Box::new(std::io::Cursor::new(bytes.clone())) as Box<dyn BufRead>)
    }

    fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn header_values(&self) -> &HeaderValuesMap {
        &self.header_values
    }

    fn remote_addr(&self) -> Option<SocketAddr> {
        self.remote_addr
    }

    fn version(&self) -> &str {
        &self.version
    }
}
