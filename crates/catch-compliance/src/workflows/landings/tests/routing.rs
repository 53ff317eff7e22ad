use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use super::common::{
    assert_status, build_service, case_router_with_service, document, high_risk, landing,
    low_risk, overweight_landing, read_json_body, DOCUMENT_NUMBER,
};

fn post_json(uri: &str, payload: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request builds")
}

fn submit_payload(landings: Vec<crate::workflows::landings::LandingFact>) -> serde_json::Value {
    let mut payload = serde_json::to_value(document(landings)).expect("document serializes");
    payload["now"] = json!("2024-03-06T09:00:00Z");
    payload
}

#[tokio::test]
async fn submit_returns_accepted_case() {
    let (service, _) = build_service(high_risk());
    let app = case_router_with_service(service);

    let response = app
        .oneshot(post_json(
            "/api/v1/compliance/cases",
            submit_payload(vec![landing(), overweight_landing()]),
        ))
        .await
        .expect("router responds");

    assert_status(&response, StatusCode::ACCEPTED);
    let body = read_json_body(response).await;
    assert_eq!(body["case_type"], "RealTimeValidation_Rejected");
    assert_eq!(body["status_at_submission"], "ValidationFailure");
    assert_eq!(body["outcome_at_submission"], "Rejected");
    assert_eq!(body["landings"][1]["status"], "ValidationFailure_Weight");
}

#[tokio::test]
async fn invalid_submission_is_unprocessable() {
    let (service, _) = build_service(low_risk());
    let app = case_router_with_service(service);

    let response = app
        .oneshot(post_json("/api/v1/compliance/cases", submit_payload(Vec::new())))
        .await
        .expect("router responds");

    assert_status(&response, StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert_eq!(
        body["error"],
        format!("document {DOCUMENT_NUMBER} has no landings")
    );
}

#[tokio::test]
async fn unknown_case_is_not_found() {
    let (service, _) = build_service(low_risk());
    let app = case_router_with_service(service);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/compliance/cases/GBR-2024-CC-MISSING")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_status(&response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn stored_case_can_be_fetched_rechecked_and_voided() {
    let (service, _) = build_service(low_risk());
    service
        .submit(
            document(vec![overweight_landing()]),
            super::common::at(2024, 3, 6, 9, 0),
        )
        .expect("document accepted");
    let app = case_router_with_service(service);
    let case_uri = format!("/api/v1/compliance/cases/{DOCUMENT_NUMBER}");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(&case_uri)
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");
    assert_status(&response, StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["case_type"], "Success");

    let response = app
        .clone()
        .oneshot(post_json(
            &format!("{case_uri}/recheck"),
            json!({
                "now": "2024-03-08T09:00:00Z",
                "risk": { "vessels": { "BM111": 4.0 } }
            }),
        ))
        .await
        .expect("router responds");
    assert_status(&response, StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["landings"][0]["is_rejected"], true);
    assert_eq!(body["landings"][0]["was_rejected_at_submission"], false);

    let response = app
        .clone()
        .oneshot(post_json(
            &format!("{case_uri}/void"),
            json!({ "actor": "exporter", "now": "2024-03-09T09:00:00Z" }),
        ))
        .await
        .expect("router responds");
    assert_status(&response, StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["case_type"], "VoidByExporter");

    let response = app
        .oneshot(post_json(
            &format!("{case_uri}/void"),
            json!({ "actor": "admin" }),
        ))
        .await
        .expect("router responds");
    assert_status(&response, StatusCode::CONFLICT);
}
