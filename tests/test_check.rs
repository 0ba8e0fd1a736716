//! End-to-end lookup (src/check.rs): authenticate, fetch email, search.

mod common;

use mockito::Matcher;
use pretty_assertions::assert_eq;

use gphotos::check::check_file;
use gphotos::lookup::LookupClient;

fn mock_auth(server: &mut mockito::Server) -> (mockito::Mock, mockito::Mock) {
    let token = server
        .mock("POST", "/token")
        .match_body(Matcher::UrlEncoded("code".into(), "ABC123".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(common::token_body("tok-e2e", Some("ref-e2e")))
        .expect(1)
        .create();
    let userinfo = server
        .mock("GET", "/userinfo")
        .match_query(Matcher::Any)
        .match_header("authorization", "Bearer tok-e2e")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"email":"someone@example.com"}"#)
        .expect(1)
        .create();
    (token, userinfo)
}

fn run(feed_body: &str) -> String {
    let (_tmp, dir) = common::temp_config_dir();
    let path = common::write_config_ini(&dir, "");
    let mut server = mockito::Server::new();
    let (token, userinfo) = mock_auth(&mut server);
    let feed = server
        .mock("GET", "/feed/api/user/default")
        .match_query(Matcher::UrlEncoded("q".into(), "sunset.jpg".into()))
        .match_header("authorization", "OAuth tok-e2e")
        .with_status(200)
        .with_body(feed_body)
        .expect(1)
        .create();

    let mut oauth = common::oauth_against(&path, &server.url())
        .with_code_source(|_url: &str| Ok("ABC123".to_string()));
    let client = LookupClient::new(&server.url());
    let verdict = check_file(&mut oauth, &client, "sunset.jpg").unwrap();

    token.assert();
    userinfo.assert();
    feed.assert();
    verdict.to_string()
}

#[test]
fn test_file_exists() {
    let out = run("<feed>...<title>sunset.jpg</title>...</feed>");
    assert_eq!(out, "file exists on google photos");
}

#[test]
fn test_file_probably_not_uploaded() {
    let out = run("<feed><title>Search Results</title><openSearch:totalResults>0</openSearch:totalResults></feed>");
    assert_eq!(out, "file probably not uploaded");
}
