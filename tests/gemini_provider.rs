//! Integration tests for the Gemini provider against a mocked HTTP endpoint

use frey::config::GeminiConfig;
use frey::providers::{GenerationOptions, GenerationOutcome, Provider, Turn};
use frey::providers::GeminiProvider;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider_for(server: &MockServer) -> GeminiProvider {
    GeminiProvider::new(GeminiConfig {
        api_key: Some("test-key".to_string()),
        model: "gemini-2.5-flash".to_string(),
        api_base: Some(server.uri()),
    })
    .unwrap()
}

#[tokio::test]
async fn test_generate_returns_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{"text": "Hello from the mock"}]
                }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let outcome = provider
        .generate("Say hello", &GenerationOptions::new(0.7, "persona"))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        GenerationOutcome::Text("Hello from the mock".to_string())
    );
}

#[tokio::test]
async fn test_generate_carries_system_instruction_and_temperature() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
        .and(body_partial_json(json!({
            "systemInstruction": {
                "parts": [{"text": "You are FREY."}]
            },
            "generationConfig": {"temperature": 0.3}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {"parts": [{"text": "ok"}]}
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let outcome = provider
        .generate("prompt", &GenerationOptions::new(0.3, "You are FREY."))
        .await
        .unwrap();

    assert!(outcome.is_text());
}

#[tokio::test]
async fn test_generate_blocked_response_is_empty_outcome() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [],
            "promptFeedback": {"blockReason": "SAFETY"}
        })))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let outcome = provider
        .generate("blocked prompt", &GenerationOptions::default())
        .await
        .unwrap();

    assert_eq!(
        outcome,
        GenerationOutcome::Empty {
            block_reason: Some("SAFETY".to_string())
        }
    );
    let text = outcome.into_text();
    assert!(text.contains("SAFETY"));
}

#[tokio::test]
async fn test_generate_http_error_is_provider_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exhausted"))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let result = provider
        .generate("prompt", &GenerationOptions::default())
        .await;

    assert!(result.is_err());
    let message = result.unwrap_err().to_string();
    assert!(message.contains("429"));
    assert!(message.contains("quota exhausted"));
}

#[tokio::test]
async fn test_chat_sends_history_in_order() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
        .and(body_partial_json(json!({
            "contents": [
                {"role": "user", "parts": [{"text": "first"}]},
                {"role": "model", "parts": [{"text": "reply"}]},
                {"role": "user", "parts": [{"text": "second"}]}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {"parts": [{"text": "next reply"}]}
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let history = vec![Turn::user("first"), Turn::model("reply")];
    let outcome = provider
        .chat(&history, "second", &GenerationOptions::default())
        .await
        .unwrap();

    assert_eq!(outcome, GenerationOutcome::Text("next reply".to_string()));
}

#[tokio::test]
async fn test_list_models_filters_generate_content() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1beta/models"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "models": [
                {
                    "name": "models/gemini-2.5-flash",
                    "displayName": "Gemini 2.5 Flash",
                    "supportedGenerationMethods": ["generateContent", "countTokens"]
                },
                {
                    "name": "models/embedding-001",
                    "displayName": "Embedding 001",
                    "supportedGenerationMethods": ["embedContent"]
                }
            ]
        })))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let models = provider.list_models().await.unwrap();

    assert_eq!(models.len(), 1);
    assert_eq!(models[0].name, "gemini-2.5-flash");
    assert_eq!(models[0].display_name, "Gemini 2.5 Flash");
}

#[test]
fn test_missing_api_key_is_rejected_at_construction() {
    let result = GeminiProvider::new(GeminiConfig {
        api_key: None,
        model: "gemini-2.5-flash".to_string(),
        api_base: None,
    });
    assert!(result.is_err());

    let result = GeminiProvider::new(GeminiConfig {
        api_key: Some("   ".to_string()),
        model: "gemini-2.5-flash".to_string(),
        api_base: None,
    });
    assert!(result.is_err());
}
