use mockito::{Matcher, Server};
use summarizer_relay::services::gemini::{
    compose_prompt, GeminiClient, GeminiError, GenerateContentRequest, GenerateContentResponse,
};

#[test]
fn test_compose_prompt() {
    assert_eq!(
        compose_prompt("A: hi\nB: hello", "Bullet points"),
        "Transcript: A: hi\nB: hello\n\nInstruction: Bullet points"
    );
}

#[test]
fn test_request_shape() {
    let request = GenerateContentRequest::from_text("hello".to_string());

    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        serde_json::json!({ "contents": [{ "parts": [{ "text": "hello" }] }] })
    );
}

#[test]
fn test_first_text_handles_missing_levels() {
    let cases = [
        (r#"{}"#, None),
        (r#"{"candidates":null}"#, None),
        (r#"{"candidates":[{}]}"#, None),
        (r#"{"candidates":[{"content":{"parts":[]}}]}"#, None),
        (r#"{"candidates":[{"content":{"parts":null}}]}"#, None),
        (r#"{"candidates":[{"content":{"parts":[{}]}}]}"#, Some("")),
        (r#"{"candidates":[{"content":{"parts":[{"text":null}]}}]}"#, Some("")),
        (
            r#"{"candidates":[{"content":{"parts":[{"inlineData":{"mimeType":"image/png"}}]}}]}"#,
            Some(""),
        ),
        (
            r#"{"candidates":[{"content":{"parts":[{"text":"first"},{"text":"second"}]}},{"content":{"parts":[{"text":"other"}]}}]}"#,
            Some("first"),
        ),
    ];

    for (body, expected) in cases {
        let response: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.first_text(), expected, "body: {}", body);
    }
}

#[test]
fn test_finish_reason() {
    let response: GenerateContentResponse =
        serde_json::from_str(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#).unwrap();

    assert_eq!(response.finish_reason(), Some("SAFETY"));
    assert_eq!(response.first_text(), None);
}

#[tokio::test]
async fn test_error_status_body_is_decoded() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/models/gemini-2.5-flash:generateContent")
        .match_query(Matcher::UrlEncoded("key".into(), "bad-key".into()))
        .with_status(403)
        .with_body(r#"{"error":{"code":403,"message":"Permission denied"}}"#)
        .create_async()
        .await;

    let client = GeminiClient::new(&format!("{}/", server.url()), "gemini-2.5-flash");
    let response = client
        .generate_content("bad-key", "hi".to_string())
        .await
        .unwrap();

    assert_eq!(response.first_text(), None);
}

#[tokio::test]
async fn test_unparsable_error_status_body_is_invalid_response() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/models/gemini-2.5-flash:generateContent")
        .with_status(503)
        .with_body("Service Unavailable")
        .create_async()
        .await;

    let client = GeminiClient::new(&server.url(), "gemini-2.5-flash");
    let result = client.generate_content("key", "hi".to_string()).await;

    assert!(matches!(result, Err(GeminiError::InvalidResponse(_))));
}

#[tokio::test]
async fn test_request_error_hides_api_key() {
    let client = GeminiClient::new("http://127.0.0.1:1", "gemini-2.5-flash");
    let result = client.generate_content("secret-key", "hi".to_string()).await;

    let err = result.err().expect("connection should be refused");
    assert!(matches!(err, GeminiError::RequestError(_)));
    assert!(!err.to_string().contains("secret-key"));
}
