//! End-to-end translation through the HTTP transport against a stub provider

use assert_json_diff::assert_json_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

use gtx_translator::{AsyncTranslator, TranslationError, TranslationRequest, TranslatorConfig};

const HELLO_FIXTURE: &str = include_str!("fixtures/hello_en_fr.txt");

fn translator_for(international: &MockServer, china: &MockServer) -> AsyncTranslator {
    let config = TranslatorConfig {
        international_host: international.uri(),
        china_host: china.uri(),
        timeout_ms: 5000,
        ..Default::default()
    };
    AsyncTranslator::new(config).unwrap()
}

/// Echoes the query text back as a one-segment payload
struct Echo;

impl Respond for Echo {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let q = request
            .url
            .query_pairs()
            .find(|(k, _)| k == "q")
            .map(|(_, v)| v.into_owned())
            .unwrap_or_default();

        ResponseTemplate::new(200).set_body_string(format!(
            r#"[[["<{q}>","{q}",,,1]],,"de",,,[["{q}",,[["<{q}>",1000,true,false]]]]]"#
        ))
    }
}

#[tokio::test]
async fn test_hello_en_fr_matches_fixture() {
    let server = MockServer::start().await;
    let unused = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/translate_a/single"))
        .and(query_param("client", "t"))
        .and(query_param("sl", "en"))
        .and(query_param("tl", "fr"))
        .and(query_param("q", "Hello"))
        .respond_with(ResponseTemplate::new(200).set_body_string(HELLO_FIXTURE))
        .expect(1)
        .mount(&server)
        .await;

    let result = translator_for(&server, &unused)
        .translate(&TranslationRequest::new("en", "fr", "Hello"))
        .await
        .unwrap();

    assert_json_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({
            "outputText": "Bonjour",
            "inputRoman": "həˈlō",
            "outputRoman": null,
            "outputSegments": [
                {
                    "inputText": "Hello",
                    "outputArr": [
                        { "text": "Bonjour", "accuracy": 1000.0 },
                        { "text": "Salut", "accuracy": 0.0 }
                    ]
                }
            ],
            "detectedInputLang": "en",
            "inputDict": null,
            "outputDict": [
                ["interjection", ["Bonjour!", "Salut!"],
                 [["Bonjour!", ["Hello!", "Hi!"], null, 0.70501554]], "Hello!", 9]
            ],
            "suggestedInputLang": "en",
            "suggestedInputText": null,
            "provider": "Google"
        })
    );
}

#[tokio::test]
async fn test_china_mode_uses_mainland_host() {
    let international = MockServer::start().await;
    let china = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(Echo)
        .expect(0)
        .mount(&international)
        .await;
    Mock::given(method("GET"))
        .and(path("/translate_a/single"))
        .respond_with(Echo)
        .expect(1)
        .mount(&china)
        .await;

    let result = translator_for(&international, &china)
        .translate(&TranslationRequest::new("de", "en", "Hallo").with_china_mode(true))
        .await
        .unwrap();

    assert_eq!(result.output_text, "<Hallo>");
}

#[tokio::test]
async fn test_long_text_over_http_keeps_reading_order() {
    let server = MockServer::start().await;
    let unused = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/translate_a/single"))
        .respond_with(Echo)
        .mount(&server)
        .await;

    let text = (0..600)
        .map(|i| format!("Wort{}", i))
        .collect::<Vec<_>>()
        .join(" ");

    let result = translator_for(&server, &unused)
        .translate(&TranslationRequest::new("de", "en", text.clone()))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(requests.len() >= 4);

    let segments = serde_json::to_value(&result.output_segments).unwrap();
    let inputs: Vec<&str> = segments
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["inputText"].as_str().unwrap())
        .collect();
    assert_eq!(inputs.len(), requests.len());
    assert_eq!(inputs.join(" "), text);
    assert_eq!(result.detected_input_lang, "de");
    assert!(result.output_text.starts_with("<Wort0 Wort1 "));
    assert!(result.output_text.ends_with("Wort599>"));
}

#[tokio::test]
async fn test_provider_error_rejects_the_call() {
    let server = MockServer::start().await;
    let unused = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Too Many Requests"))
        .mount(&server)
        .await;

    let err = translator_for(&server, &unused)
        .translate(&TranslationRequest::new("en", "fr", "Hello"))
        .await
        .unwrap_err();

    assert!(matches!(err, TranslationError::ApiError { status: 429, .. }));
}

#[tokio::test]
async fn test_garbage_body_is_a_parse_failure() {
    let server = MockServer::start().await;
    let unused = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>captcha</html>"))
        .mount(&server)
        .await;

    let err = translator_for(&server, &unused)
        .translate(&TranslationRequest::new("en", "fr", "Hello"))
        .await
        .unwrap_err();

    assert!(matches!(err, TranslationError::ResponseParseFailure { .. }));
}
