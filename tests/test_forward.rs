use bytes::Bytes;
use redispatch::forward::ForwardedRequest;
use redispatch::http::request::{IncomingRequest, RequestView};
use std::io::Read;

/// An inbound request carrying both allowlisted headers and one that
/// must not survive the forward.
fn original() -> IncomingRequest {
    IncomingRequest::builder()
        .method("GET")
        .target("/orig?from=here")
        .header("Cookie", "JSESSIONID=abc123")
        .header("Authorization", "Bearer token")
        .header("Referer", "https://example.com/prev")
        .header("Content-Length", "0")
        .remote_addr("10.0.0.7:50412".parse().unwrap())
        .build()
        .unwrap()
}

#[test]
fn test_path_without_query() {
    let orig = original();
    let fwd = ForwardedRequest::bodyless(&orig, "/app/page", "GET");

    assert_eq!(fwd.path(), "/app/page");
    assert_eq!(fwd.query_string(), None);
    assert!(fwd.query_parameters().is_empty());
}

#[test]
fn test_path_and_query_split() {
    let orig = original();
    let fwd = ForwardedRequest::bodyless(&orig, "/app/page?a=1&b=2", "GET");

    assert_eq!(fwd.path(), "/app/page");
    assert_eq!(fwd.query_string(), Some("a=1&b=2"));
    assert_eq!(fwd.query_parameters()["a"], vec!["1"]);
    assert_eq!(fwd.query_parameters()["b"], vec!["2"]);
}

#[test]
fn test_method_is_upper_cased_on_read() {
    let orig = original();
    let fwd = ForwardedRequest::bodyless(&orig, "/x", "post");

    assert_eq!(fwd.method(), "POST");
}

#[test]
fn test_only_allowlisted_headers_propagate() {
    let orig = original();
    let fwd = ForwardedRequest::bodyless(&orig, "/x", "GET");

    assert_eq!(fwd.headers().len(), 2);
    assert_eq!(fwd.headers().get("cookie"), Some("JSESSIONID=abc123"));
    assert_eq!(fwd.headers().get("authorization"), Some("Bearer token"));
    assert_eq!(fwd.headers().get("referer"), None);
    assert_eq!(fwd.headers().get("content-length"), None);

    assert_eq!(fwd.header_values().len(), 2);
    assert_eq!(
        fwd.header_values().get("cookie"),
        Some(["JSESSIONID=abc123".to_string()].as_slice())
    );
    assert_eq!(fwd.header_values().get("referer"), None);
}

#[test]
fn test_absent_original_headers_are_omitted() {
    let orig = IncomingRequest::builder()
        .method("GET")
        .target("/")
        .header("Referer", "https://example.com")
        .build()
        .unwrap();
    let fwd = ForwardedRequest::bodyless(&orig, "/x", "GET");

    assert!(fwd.headers().is_empty());
    assert!(fwd.header_values().is_empty());
}

#[test]
fn test_header_copy_is_captured_at_construction() {
    // The allowlisted copy reflects forward-time state even if the view
    // outlives interest in the original's maps.
    let orig = original();
    let fwd = ForwardedRequest::bodyless(&orig, "/x", "GET");

    assert_eq!(fwd.headers().get("cookie"), orig.headers().get("cookie"));
}

#[test]
fn test_bodyless_view_defaults() {
    let orig = original();
    let fwd = ForwardedRequest::bodyless(&orig, "/x", "GET");

    assert_eq!(fwd.content_length(), 0);
    assert!(fwd.body_stream().is_none());
    assert_eq!(fwd.content_type(), None);
}

#[test]
fn test_body_bearing_view() {
    let orig = original();
    let payload = Bytes::from_static(b"name=value&other=1");
    let fwd = ForwardedRequest::with_body(
        &orig,
        "/submit",
        "POST",
        "application/x-www-form-urlencoded",
        payload.clone(),
    );

    assert_eq!(fwd.content_length(), payload.len());
    assert_eq!(fwd.content_type(), Some("application/x-www-form-urlencoded"));

    let mut read_back = Vec::new();
    fwd.body_stream().unwrap().read_to_end(&mut read_back).unwrap();
    assert_eq!(read_back, payload.as_ref());
}

#[test]
fn test_body_stream_is_memoized() {
    let orig = original();
    let fwd = ForwardedRequest::with_body(&orig, "/submit", "PUT", "text/plain", Bytes::from_static(b"abc"));

    let first = fwd.body_stream().unwrap();
    let second = fwd.body_stream().unwrap();
    assert!(first.same_stream(&second));

    // Consuming through one handle consumes for all: the accessor hands
    // back the same stream, not a fresh wrap of the bytes.
    let mut drained = Vec::new();
    fwd.body_stream().unwrap().read_to_end(&mut drained).unwrap();
    assert_eq!(drained, b"abc");

    let mut rest = Vec::new();
    fwd.body_stream().unwrap().read_to_end(&mut rest).unwrap();
    assert!(rest.is_empty());
}

#[test]
fn test_empty_body_is_still_a_body() {
    let orig = original();
    let fwd = ForwardedRequest::with_body(&orig, "/submit", "POST", "text/plain", Bytes::new());

    assert_eq!(fwd.content_length(), 0);
    assert!(fwd.body_stream().is_some());
    assert_eq!(fwd.content_type(), Some("text/plain"));
}

#[test]
fn test_request_path_joining() {
    let orig = original();

    let fwd = ForwardedRequest::bodyless(&orig, "/x", "GET");
    assert_eq!(fwd.mount_path(), "");
    assert_eq!(fwd.request_path(), "/x");

    // A path not starting with '/' gains a leading one
    let fwd = ForwardedRequest::bodyless(&orig, "relative/page?q=1", "GET");
    assert_eq!(fwd.request_path(), "/relative/page");
}

#[test]
fn test_derived_fields_are_idempotent() {
    let orig = original();
    let fwd = ForwardedRequest::bodyless(&orig, "/app/page?a=1&a=2", "GET");

    assert_eq!(fwd.path(), fwd.path());
    assert_eq!(fwd.query_string(), fwd.query_string());
    assert_eq!(fwd.query_parameters(), fwd.query_parameters());
    assert_eq!(fwd.request_path(), fwd.request_path());
    assert_eq!(fwd.query_parameters()["a"], vec!["1", "2"]);
}

#[test]
fn test_unsupported_fields_are_absent_not_errors() {
    let orig = original();
    let fwd = ForwardedRequest::bodyless(&orig, "/x", "GET");

    assert_eq!(fwd.character_encoding(), None);
    assert_eq!(fwd.path_translated(), None);
    assert!(fwd.reader().is_none());
}

#[test]
fn test_unlisted_accessors_delegate_to_original() {
    let orig = original();
    let fwd = ForwardedRequest::bodyless(&orig, "/x", "GET");

    assert_eq!(fwd.remote_addr(), orig.remote_addr());
    assert_eq!(fwd.version(), orig.version());
    // ...while the overridden ones do not leak through
    assert_ne!(fwd.path(), orig.path());
    assert_ne!(fwd.query_string(), orig.query_string());
}
