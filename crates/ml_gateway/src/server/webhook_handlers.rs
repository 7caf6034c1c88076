//! Marketplace notification receiver
//!
//! Every push is acknowledged. The payload is only recorded in the log.

use axum::{body::Bytes, Json};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::info;

/// POST /ml/webhooks
pub async fn receive_notification(body: Bytes) -> Json<Value> {
    let payload: Value = serde_json::from_slice(&body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()));

    let topic = payload.get("topic").and_then(|v| v.as_str()).unwrap_or("-");
    let resource = payload.get("resource").and_then(|v| v.as_str()).unwrap_or("-");

    info!(
        received_at = %Utc::now().to_rfc3339(),
        topic = topic,
        resource = resource,
        payload = %payload,
        "Marketplace webhook received"
    );

    Json(json!({ "ok": true }))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{body_json, router_for, send};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use mockito::{Matcher, Server};
    use serde_json::json;

    #[tokio::test]
    async fn test_any_payload_is_acknowledged_without_upstream_calls() {
        let mut server = Server::new_async().await;
        let get = server
            .mock("GET", Matcher::Any)
            .expect(0)
            .create_async()
            .await;
        let post = server
            .mock("POST", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let bodies = [
            r#"{"resource":"/orders/2000001","user_id":123,"topic":"orders_v2","attempts":1}"#,
            r#"[1,2,3]"#,
            r#"{}"#,
            "not json at all",
            "",
        ];

        for body in bodies {
            let request = Request::builder()
                .method("POST")
                .uri("/ml/webhooks")
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap();
            let response = send(router_for(&server.url()), request).await;

            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(body_json(response).await, json!({ "ok": true }));
        }

        get.assert_async().await;
        post.assert_async().await;
    }
}
