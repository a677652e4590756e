//! Router-level checks that need no listener.

use assistant_service::services::metrics::{get_metrics, init_metrics, UNMATCHED_PATH};
use assistant_service::services::providers::mock::MockTextProvider;
use assistant_service::startup::build_router;
use assistant_service::AppState;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::util::ServiceExt;

fn app(provider: MockTextProvider) -> axum::Router {
    build_router(AppState::new(Arc::new(provider)))
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

#[tokio::test]
async fn documented_scenario_round_trips() {
    let response = app(MockTextProvider::fixed("Use role-based access control."))
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/prompt")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{"prompt": "How do I set document permissions?"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "prompt": "How do I set document permissions?",
            "response": "Use role-based access control.",
            "status": "success"
        })
    );
}

#[tokio::test]
async fn post_without_content_type_is_still_parsed() {
    let response = app(MockTextProvider::fixed("ok"))
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/prompt")
                .body(Body::from(r#"{"prompt": "hi"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn post_without_body_is_bad_request() {
    let response = app(MockTextProvider::echo())
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/prompt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_bytes(response).await,
        br#"{"error":"Prompt is required"}"#.to_vec()
    );
}

#[tokio::test]
async fn preflight_with_arbitrary_headers_is_empty_ok() {
    let requests = [
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/prompt")
            .body(Body::empty())
            .unwrap(),
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/prompt")
            .header("origin", "http://localhost:3000")
            .header("access-control-request-method", "POST")
            .header("x-custom", "anything")
            .body(Body::empty())
            .unwrap(),
    ];

    for request in requests {
        let response = app(MockTextProvider::echo()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_bytes(response).await.is_empty());
    }
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let response = app(MockTextProvider::echo())
        .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unmatched_paths_share_one_metrics_series() {
    init_metrics().unwrap();

    for path in ["/junk/7f3a", "/junk/c91e", "/prompt/extra"] {
        let response = app(MockTextProvider::echo())
            .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    let response = app(MockTextProvider::echo())
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let text = get_metrics();
    let unmatched_label = format!("path=\"{}\"", UNMATCHED_PATH);
    let not_found_series: Vec<&str> = text
        .lines()
        .filter(|line| line.starts_with("assistant_http_requests_total{"))
        .filter(|line| line.contains("status=\"404\""))
        .collect();

    assert_eq!(not_found_series.len(), 1, "{:?}", not_found_series);
    assert!(not_found_series[0].contains(&unmatched_label));
    assert!(!text.contains("/junk"));
    assert!(text.contains("path=\"/health\""));
}
