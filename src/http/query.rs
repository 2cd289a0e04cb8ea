//! Query string handling.
//!
//! Decoding is delegated to `url::form_urlencoded` and is deliberately
//! lenient: malformed input degrades to partial or empty parameter maps
//! rather than erroring, matching form-style
//! `application/x-www-form-urlencoded` semantics.

use std::collections::HashMap;

/// Decodes a query string into a parameter map.
///
/// Repeated parameter names accumulate their values in order of appearance.
/// `+` decodes to a space and invalid percent sequences pass through as-is.
///
/// # Example
///
/// ```
/// # use redispatch::http::query::decode_query;
/// let params = decode_query("a=1&b=2&a=3");
/// assert_eq!(params["a"], vec!["1", "3"]);
/// assert_eq!(params["b"], vec!["2"]);
/// ```
pub fn decode_query(query: &str) -> HashMap<String, Vec<String>> {
    let mut params: HashMap<String, Vec<String>> = HashMap::new();

    for (name, value) in url::form_urlencoded::parse(query.as_bytes()) {
        params
            .entry(name.into_owned())
            .or_default()
            .push(value.into_owned());
    }

    params
}

/// Splits a request target into its path and optional query string.
///
/// The split happens at the first `?`. A target without `?` has no query
/// string, as opposed to an empty one.
pub fn split_target(target: &str) -> (&str, Option<&str>) {
    match target.find('?') {
        Some(mark) => (&target[..mark], Some(&target[mark + 1..])),
        None => (target, None),
    }
}
