//! Wiremock integration tests for the Wikipedia client.

use seminar::encyclopedia::{EncyclopediaLookup, EncyclopediaProvider, WikipediaClient};
use seminar::topic::Topic;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn extract_response(title: &str, extract: &str) -> serde_json::Value {
    serde_json::json!({
        "batchcomplete": true,
        "query": {
            "pages": [{
                "pageid": 24544,
                "ns": 0,
                "title": title,
                "extract": extract
            }]
        }
    })
}

fn missing_response(title: &str) -> serde_json::Value {
    serde_json::json!({
        "batchcomplete": true,
        "query": {
            "pages": [{
                "ns": 0,
                "title": title,
                "missing": true
            }]
        }
    })
}

fn client(server: &MockServer, max_chars: usize) -> WikipediaClient {
    WikipediaClient::with_base_url(server.uri(), "seminar-tests/1.0", max_chars).unwrap()
}

#[tokio::test]
async fn found_page_renders_summary_and_sections() {
    let server = MockServer::start().await;
    let extract = "Plants convert light into chemical energy.\n\n\n== Overview ==\nChlorophyll absorbs light.\n\n== See also ==\n";

    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("titles", "Photosynthesis"))
        .and(query_param("prop", "extracts"))
        .and(header("user-agent", "seminar-tests/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(extract_response("Photosynthesis", extract)))
        .expect(1)
        .mount(&server)
        .await;

    let topic = Topic::new("Photosynthesis").unwrap();
    let lookup = client(&server, 8000).lookup(&topic).await;

    assert_eq!(
        lookup,
        EncyclopediaLookup::Found(
            "Plants convert light into chemical energy.\n\nOverview:\nChlorophyll absorbs light.\n\nSee also:\n"
                .to_string()
        )
    );
}

#[tokio::test]
async fn long_articles_are_truncated() {
    let server = MockServer::start().await;
    let extract = "x".repeat(10_000);

    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(extract_response("Long", &extract)))
        .mount(&server)
        .await;

    let lookup = client(&server, 8000).lookup(&Topic::new("Long").unwrap()).await;

    match lookup {
        EncyclopediaLookup::Found(text) => assert_eq!(text.chars().count(), 8000),
        other => panic!("expected a page, got {:?}", other),
    }
}

#[tokio::test]
async fn missing_page_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("titles", "Xyzzyqqrandomtopic123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(missing_response("Xyzzyqqrandomtopic123")))
        .mount(&server)
        .await;

    let lookup = client(&server, 8000)
        .lookup(&Topic::new("Xyzzyqqrandomtopic123").unwrap())
        .await;

    assert_eq!(lookup, EncyclopediaLookup::NotFound);
}

#[tokio::test]
async fn server_error_is_failed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let lookup = client(&server, 8000).lookup(&Topic::new("Gravity").unwrap()).await;

    assert!(matches!(lookup, EncyclopediaLookup::Failed(_)));
}
