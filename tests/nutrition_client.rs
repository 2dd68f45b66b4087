use food_calorie_finder::nutrition::{NutritionClient, NutritionError, NutritionOutcome};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, api_key: Option<&str>) -> NutritionClient {
    NutritionClient::new(
        format!("{}/v1/nutrition", server.uri()),
        api_key.map(str::to_string),
    )
}

#[tokio::test]
async fn ok_body_is_passed_through_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/nutrition"))
        .and(query_param("query", "banana"))
        .and(header("X-Api-Key", "secret"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"[{"name":"banana","calories":89}]"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let outcome = client_for(&server, Some("secret"))
        .lookup("  Banana ")
        .await
        .unwrap();

    assert_eq!(
        outcome,
        NutritionOutcome::Found {
            data: json!([{ "name": "banana", "calories": 89 }])
        }
    );
}

#[tokio::test]
async fn empty_result_set_counts_as_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/nutrition"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&server)
        .await;

    let outcome = client_for(&server, Some("secret")).lookup("tench").await.unwrap();
    assert_eq!(outcome, NutritionOutcome::Found { data: json!([]) });
}

#[tokio::test]
async fn not_found_surfaces_code_and_raw_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/nutrition"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such food"))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = client_for(&server, Some("secret")).lookup("banana").await.unwrap();
    assert_eq!(
        outcome,
        NutritionOutcome::Failed {
            code: 404,
            body: "no such food".to_string()
        }
    );
}

#[tokio::test]
async fn missing_credential_still_sends_the_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/nutrition"))
        .respond_with(
            ResponseTemplate::new(400).set_body_string(r#"{"error": "Missing API Key."}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let outcome = client_for(&server, None).lookup("pizza").await.unwrap();
    match outcome {
        NutritionOutcome::Failed { code, body } => {
            assert_eq!(code, 400);
            assert!(body.contains("Missing API Key."));
        }
        other => panic!("expected a failure, got {other:?}"),
    }

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("x-api-key").is_none());
}

#[tokio::test]
async fn multi_word_labels_are_sent_whole() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/nutrition"))
        .and(query_param("query", "hot dog, hotdog, red hot"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server, Some("k"))
        .lookup("Hot dog, hotdog, red hot")
        .await
        .unwrap();
}

#[tokio::test]
async fn non_json_success_body_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server, Some("k")).lookup("banana").await.unwrap_err();
    match err {
        NutritionError::InvalidBody { body, .. } => assert!(body.contains("maintenance")),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn unreachable_api_is_a_transport_error() {
    // Nothing listens on the discard port.
    let err = NutritionClient::new("http://127.0.0.1:9/v1/nutrition", None)
        .lookup("banana")
        .await
        .unwrap_err();
    assert!(matches!(err, NutritionError::Transport(_)));
}
