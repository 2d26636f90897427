use nursecall_client::{ApiClient, ApiError};
use nursecall_core::{Bed, BedStatus, ResourceKind};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(&server.uri())
        .unwrap()
        .with_token("test-token")
}

#[tokio::test]
async fn list_accepts_bare_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/beds/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "bed-1", "number": "B-1", "ward": "w1", "status": "available"},
            {"id": "bed-2", "number": "B-2", "ward": "w1", "status": "occupied"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let records = client_for(&server).list(ResourceKind::Bed).await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1]["status"], "occupied");
}

#[tokio::test]
async fn list_accepts_results_wrapper() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wards/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 1,
            "results": [{"id": "w1", "name": "ICU", "building": "b1", "floor": "f1"}]
        })))
        .mount(&server)
        .await;

    let records = client_for(&server).list(ResourceKind::Ward).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["name"], "ICU");
}

#[tokio::test]
async fn bearer_token_is_attached_to_every_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nurses/"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server).list(ResourceKind::Nurse).await.unwrap();
}

#[tokio::test]
async fn get_maps_404_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wards/missing/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Not found."})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get(ResourceKind::Ward, "missing")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "wards missing not found");
}

#[tokio::test]
async fn expired_session_maps_to_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/calls/"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"detail": "Token is invalid or expired"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).list(ResourceKind::Call).await.unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn validation_errors_keep_field_messages() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/beds/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "number": ["This field is required."],
            "ward": ["Invalid pk \"nope\" - object does not exist."]
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .create(ResourceKind::Bed, &json!({"ward": "nope"}))
        .await
        .unwrap_err();

    let body = err.validation_body().expect("validation error");
    let fields: Vec<_> = body.field_messages().map(|(f, _)| f).collect();
    assert_eq!(fields, vec!["number", "ward"]);
    assert_eq!(body.display_message(), "number: This field is required.");
}

#[tokio::test]
async fn create_posts_payload_and_returns_created_record() {
    let server = MockServer::start().await;
    let payload = json!({"name": "ICU", "building": "b1", "floor": "f1", "description": null});
    Mock::given(method("POST"))
        .and(path("/wards/"))
        .and(body_json(&payload))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "w9", "name": "ICU", "building": "b1", "floor": "f1", "description": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = client_for(&server)
        .create(ResourceKind::Ward, &payload)
        .await
        .unwrap();
    assert_eq!(created["id"], "w9");
}

#[tokio::test]
async fn update_uses_put_on_the_record_url() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/hospitals/h1/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "h1", "name": "St. Anne", "address": "1 Main St",
            "phone_number": null, "speciality": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .update(
            ResourceKind::Hospital,
            "h1",
            &json!({"name": "St. Anne", "address": "1 Main St"}),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn delete_tolerates_empty_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/devices/d1/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .delete(ResourceKind::Device, "d1")
        .await
        .unwrap();
}

#[tokio::test]
async fn server_errors_map_to_unexpected_with_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/floors/"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let err = client_for(&server).list(ResourceKind::Floor).await.unwrap_err();
    match err {
        ApiError::Unexpected { status, message } => {
            assert_eq!(status, 502);
            assert_eq!(message, "bad gateway");
        }
        other => panic!("expected Unexpected, got {other:?}"),
    }
}

#[tokio::test]
async fn typed_fetch_deserializes_models() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/beds/bed-1/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "bed-1", "number": "B-1", "ward": "w1", "status": "occupied"
        })))
        .mount(&server)
        .await;

    let bed: Bed = client_for(&server).get_as("bed-1").await.unwrap();
    assert_eq!(bed.status, BedStatus::Occupied);
    assert!(bed.is_occupied());
}
