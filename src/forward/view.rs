//! Read-only request view used when forwarding a request internally.

use crate::http::body::BodyStream;
use crate::http::headers::{HeaderMap, HeaderValuesMap};
use crate::http::query::decode_query;
use crate::http::request::{join_paths, RequestView};
use bytes::Bytes;
use once_cell::unsync::OnceCell;
use std::collections::HashMap;
use std::io::BufRead;
use std::net::SocketAddr;

/// The only headers a forward propagates from the original request.
///
/// Cookie carries the session, so the target page can know who the user is.
/// Authorization is needed when the target handler calls a service that
/// authenticates per-request; without it such calls come back 401.
/// Everything else (Referer, Content-Length, ...) is dropped by policy,
/// since it describes the original exchange, not the forwarded one.
pub const FORWARDED_HEADERS: [&str; 2] = ["cookie", "authorization"];

/// A synthetic request presented to a handler during an internal forward.
///
/// Wraps the original request and substitutes path, query, method, content
/// type and body, while delegating everything else to the original. The view
/// is immutable after construction; derived fields (path/query split, decoded
/// parameters, routing path, body stream) are computed on first access and
/// cached. Single-owner, sequential use only.
pub struct ForwardedRequest<'a> {
    original: &'a dyn RequestView,
    path_query: String,
    method: String,
    media_type: Option<String>,
    body: Option<Bytes>,

    headers: HeaderMap,
    header_values: HeaderValuesMap,

    query_mark: OnceCell<Option<usize>>,
    parameters: OnceCell<HashMap<String, Vec<String>>>,
    routing_path: OnceCell<String>,
    stream: OnceCell<BodyStream>,
}

impl<'a> ForwardedRequest<'a> {
    /// Creates a view that simulates a POST or a PUT.
    ///
    /// # Arguments
    ///
    /// * `original` - The inbound request being forwarded
    /// * `path_query` - New target, `"path"` or `"path?query"`
    /// * `method` - Simulated method name, any case
    /// * `media_type` - Content type of the forwarded body
    /// * `body` - Payload carried by the forward; may be empty
    pub fn with_body(
        original: &'a dyn RequestView,
        path_query: impl Into<String>,
        method: impl Into<String>,
        media_type: impl Into<String>,
        body: Bytes,
    ) -> Self {
        Self::build(
            original,
            path_query.into(),
            method.into(),
            Some(media_type.into()),
            Some(body),
        )
    }

    /// Creates a view that simulates a GET: no content type, no body,
    /// content length zero.
    pub fn bodyless(
        original: &'a dyn RequestView,
        path_query: impl Into<String>,
        method: impl Into<String>,
    ) -> Self {
        Self::build(original, path_query.into(), method.into(), None, None)
    }

    fn build(
        original: &'a dyn RequestView,
        path_query: String,
        method: String,
        media_type: Option<String>,
        body: Option<Bytes>,
    ) -> Self {
        let (headers, header_values) = allowlisted_headers(original);

        tracing::debug!(
            method = %method,
            target = %path_query,
            headers = headers.len(),
            "Forwarding request internally"
        );

        Self {
            original,
            path_query,
            method,
            media_type,
            body,
            headers,
            header_values,
            query_mark: OnceCell::new(),
            parameters: OnceCell::new(),
            routing_path: OnceCell::new(),
            stream: OnceCell::new(),
        }
    }

    /// Position of the first `?` in the target, computed once.
    fn query_mark(&self) -> Option<usize> {
        *self.query_mark.get_or_init(|| self.path_query.find('?'))
    }
}

/// Copies the allowlisted headers out of the original request.
///
/// Eager on purpose: the copy captures the original's header state at
/// forward time, before the original could change. Headers absent in the
/// original are simply omitted.
fn allowlisted_headers(original: &dyn RequestView) -> (HeaderMap, HeaderValuesMap) {
    let mut headers = HeaderMap::new();
    let mut header_values = HeaderValuesMap::new();

    for name in FORWARDED_HEADERS {
        if let Some(value) = original.headers().get(name) {
            headers.insert(name, value);
        }
        if let Some(values) = original.header_values().get(name) {
            header_values.insert_all(name, values.to_vec());
        }
    }

    (headers, header_values)
}

impl RequestView for ForwardedRequest<'_> {
    fn method(&self) -> String {
        self.method.to_ascii_uppercase()
    }

    fn path(&self) -> &str {
        match self.query_mark() {
            Some(mark) => &self.path_query[..mark],
            None => &self.path_query,
        }
    }

    fn query_string(&self) -> Option<&str> {
        self.query_mark().map(|mark| &self.path_query[mark + 1..])
    }

    fn query_parameters(&self) -> &HashMap<String, Vec<String>> {
        self.parameters
            .get_or_init(|| self.query_string().map(decode_query).unwrap_or_default())
    }

    /// A forwarded view has no mount prefix; all routing information lives
    /// in the path portion.
    fn mount_path(&self) -> &str {
        ""
    }

    fn request_path(&self) -> String {
        self.routing_path
            .get_or_init(|| join_paths(self.mount_path(), self.path()))
            .clone()
    }

    fn content_length(&self) -> usize {
        self.body.as_ref().map(Bytes::len).unwrap_or(0)
    }

    fn content_type(&self) -> Option<&str> {
        self.media_type.as_deref()
    }

    fn body_stream(&self) -> Option<BodyStream> {
        self.body.as_ref().map(|bytes| {
            self.stream
                .get_or_init(|| BodyStream::new(bytes.clone()))
                .clone()
        })
    }

    /// Always `None`: forwarded views do not support text decoding, only
    /// the raw byte stream. Deliberately not inferred from the media type.
    fn character_encoding(&self) -> Option<&str> {
        None
    }

    fn path_translated(&self) -> Option<&str> {
        None
    }

    /// Always `None`, for the same reason as [`character_encoding`].
    ///
    /// [`character_encoding`]: ForwardedRequest::character_encoding
    fn reader(&self) -> Option<Box<dyn BufRead + '_>> {
        None
    }

    fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn header_values(&self) -> &HeaderValuesMap {
        &self.header_values
    }

    fn remote_addr(&self) -> Option<SocketAddr> {
        self.original.remote_addr()
    }

    fn version(&self) -> &str {
        self.original.version()
    }
}
