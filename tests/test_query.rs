use redispatch::http::query::{decode_query, split_target};

#[test]
fn test_decode_simple_pairs() {
    let params = decode_query("a=1&b=2");

    assert_eq!(params.len(), 2);
    assert_eq!(params["a"], vec!["1"]);
    assert_eq!(params["b"], vec!["2"]);
}

#[test]
fn test_decode_repeated_names_accumulate_in_order() {
    let params = decode_query("x=first&y=other&x=second");

    assert_eq!(params["x"], vec!["first", "second"]);
    assert_eq!(params["y"], vec!["other"]);
}

#[test]
fn test_decode_form_style_escapes() {
    let params = decode_query("q=hello+world&name=J%C3%BCrgen");

    assert_eq!(params["q"], vec!["hello world"]);
    assert_eq!(params["name"], vec!["Jürgen"]);
}

#[test]
fn test_decode_bare_name_yields_empty_value() {
    let params = decode_query("flag");

    assert_eq!(params["flag"], vec![""]);
}

#[test]
fn test_decode_is_lenient_on_malformed_input() {
    // Invalid percent sequences pass through rather than erroring
    let params = decode_query("a=%zz&b=ok");

    assert_eq!(params["a"], vec!["%zz"]);
    assert_eq!(params["b"], vec!["ok"]);
}

#[test]
fn test_decode_empty_query() {
    assert!(decode_query("").is_empty());
}

#[test]
fn test_split_target_without_query() {
    assert_eq!(split_target("/app/page"), ("/app/page", None));
}

#[test]
fn test_split_target_with_query() {
    assert_eq!(split_target("/app/page?a=1&b=2"), ("/app/page", Some("a=1&b=2")));
}

#[test]
fn test_split_target_with_empty_query() {
    // A trailing '?' is an empty query, distinct from no query at all
    assert_eq!(split_target("/app/page?"), ("/app/page", Some("")));
}
