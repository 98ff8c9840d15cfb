use std::time::Duration;

use approx::assert_abs_diff_eq;
use hypr_highlight_interface::SentimentClassifier;
use sentiment::{Error, HfSentimentClient, HfSentimentConfig};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> HfSentimentClient {
    let mut config = HfSentimentConfig::new("hf-token");
    config.base_url = server.uri();
    config.num_retries = 2;
    config.min_delay = Duration::from_millis(10);
    config.max_delay = Duration::from_millis(50);
    HfSentimentClient::new(config)
}

#[tokio::test(flavor = "multi_thread")]
async fn classifies_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/cardiffnlp/twitter-roberta-base-sentiment"))
        .and(header("authorization", "Bearer hf-token"))
        .and(body_partial_json(json!({ "inputs": "What a game!" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([[
            { "label": "LABEL_2", "score": 0.85 },
            { "label": "LABEL_1", "score": 0.1 },
            { "label": "LABEL_0", "score": 0.05 }
        ]])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let scores = tokio::task::spawn_blocking(move || client.classify("What a game!"))
        .await
        .unwrap()
        .unwrap();

    assert_abs_diff_eq!(scores.positive, 0.85, epsilon = 1e-6);
    assert_abs_diff_eq!(scores.emotion(), 0.9, epsilon = 1e-6);
}

#[tokio::test(flavor = "multi_thread")]
async fn waits_out_model_loading() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "error": "Model is currently loading", "estimated_time": 20.0
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "label": "neutral", "score": 1.0 }
        ])))
        .mount(&server)
        .await;

    let client = client(&server);
    let scores = tokio::task::spawn_blocking(move || client.classify_text("ok"))
        .await
        .unwrap()
        .unwrap();

    assert_abs_diff_eq!(scores.neutral, 1.0, epsilon = 1e-6);
}

#[tokio::test(flavor = "multi_thread")]
async fn gives_up_after_retries() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({ "error": "overloaded" })))
        .expect(3)
        .mount(&server)
        .await;

    let client = client(&server);
    let result = tokio::task::spawn_blocking(move || client.classify_text("ok"))
        .await
        .unwrap();

    assert!(matches!(result, Err(Error::Api { status: 503, ref message }) if message == "overloaded"));
}

#[test]
#[ignore]
fn live_classification() {
    let token = std::env::var("HF_API_TOKEN").unwrap();
    let client = HfSentimentClient::new(HfSentimentConfig::new(token));
    let scores = client.classify_text("I absolutely love this!").unwrap();
    assert!(scores.positive > scores.negative);
}
