use kit_gemini::{Error, GeminiBuilder, GeminiClient, Modality, Part};
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> GeminiClient {
    let base_url = Url::parse(&format!("{}/v1beta/", server.uri())).unwrap();
    GeminiBuilder::new("test-key").with_base_url(base_url).build().unwrap()
}

#[tokio::test]
async fn generate_content_sends_key_parts_and_modalities() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash-image-preview:generateContent"))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "contents": [{
                "role": "user",
                "parts": [
                    { "inlineData": { "mimeType": "image/png", "data": "AAAA" } },
                    { "text": "make posters" }
                ]
            }],
            "generationConfig": { "responseModalities": ["IMAGE", "TEXT"] }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        { "text": "Title: Billboard" },
                        { "inlineData": { "mimeType": "image/png", "data": "iVBORw==" } }
                    ]
                },
                "finishReason": "STOP"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .generate_content()
        .with_inline_data("image/png", "AAAA")
        .with_text("make posters")
        .with_response_modalities(vec![Modality::Image, Modality::Text])
        .execute()
        .await
        .unwrap();

    assert_eq!(response.parts().len(), 2);
    assert_eq!(response.parts()[0], Part::text("Title: Billboard"));
    assert_eq!(response.image_count(), 1);
}

#[tokio::test]
async fn bad_status_surfaces_api_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash-image-preview:generateContent"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": { "code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT" }
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).generate_content().with_text("hi").execute().await.unwrap_err();

    assert_eq!(err.status(), Some(400));
    match err {
        Error::BadResponse { description, .. } => {
            assert_eq!(description.as_deref(), Some("API key not valid."))
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_deserialize_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server).generate_content().with_text("hi").execute().await.unwrap_err();
    assert!(matches!(err, Error::Deserialize { .. }));
}

#[tokio::test]
async fn predict_posts_imagen_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/imagen-4.0-generate-001:predict"))
        .and(body_partial_json(json!({
            "instances": [{ "prompt": "a cosy bakery" }],
            "parameters": {
                "sampleCount": 1,
                "aspectRatio": "1:1",
                "outputOptions": { "mimeType": "image/jpeg" }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "predictions": [{ "bytesBase64Encoded": "/9j/", "mimeType": "image/jpeg" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .generate_images("a cosy bakery")
        .with_count(1)
        .with_aspect_ratio("1:1")
        .with_output_mime_type("image/jpeg")
        .execute()
        .await
        .unwrap();

    let images: Vec<_> = response.images().collect();
    assert_eq!(images.len(), 1);
    assert_eq!(images[0].image_bytes().unwrap().unwrap(), vec![0xff, 0xd8, 0xff]);
}
