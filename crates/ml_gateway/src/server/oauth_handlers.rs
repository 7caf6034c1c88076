//! OAuth Authentication Handlers
//!
//! Browser redirect to the marketplace consent page and the callback that
//! trades the returned code for a token pair.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use crate::error::GatewayError;

use super::AppState;

/// OAuth callback query parameters
#[derive(Debug, Deserialize)]
pub struct OAuthCallbackQuery {
    pub code: Option<String>,
}

/// Redirect the browser to the marketplace authorization page
pub async fn ml_auth(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let url = state.oauth.authorization_url();
    (StatusCode::FOUND, [(header::LOCATION, url)])
}

/// Exchange the authorization code and hand the token pair back verbatim
pub async fn ml_callback(
    State(state): State<Arc<AppState>>,
    Query(params): Query<OAuthCallbackQuery>,
) -> Result<Json<Value>, GatewayError> {
    let token_pair = state.oauth.exchange_code(params.code.as_deref()).await?;
    Ok(Json(token_pair))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{body_json, router_for, send};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use mockito::{Matcher, Server};
    use serde_json::json;

    #[tokio::test]
    async fn test_auth_redirects_to_marketplace() {
        let response = send(
            router_for("http://127.0.0.1:1"),
            Request::builder().uri("/ml/auth").body(Body::empty()).unwrap(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get("location").and_then(|v| v.to_str().ok()),
            Some(
                "https://auth.mercadolivre.com.br/authorization?response_type=code&client_id=app-1\
                 &redirect_uri=https%3A%2F%2Fbdv.example.com%2Fml%2Fcallback"
            )
        );
    }

    #[tokio::test]
    async fn test_callback_relays_token_pair() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/oauth/token")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("grant_type".into(), "authorization_code".into()),
                Matcher::UrlEncoded("code".into(), "ABC".into()),
                Matcher::UrlEncoded("client_id".into(), "app-1".into()),
                Matcher::UrlEncoded("client_secret".into(), "s3cret".into()),
                Matcher::UrlEncoded(
                    "redirect_uri".into(),
                    "https://bdv.example.com/ml/callback".into(),
                ),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token":"X","refresh_token":"Y"}"#)
            .expect(1)
            .create_async()
            .await;

        let response = send(
            router_for(&server.url()),
            Request::builder()
                .uri("/ml/callback?code=ABC")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        mock.assert_async().await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({ "access_token": "X", "refresh_token": "Y" })
        );
    }

    #[tokio::test]
    async fn test_callback_failure_is_flattened_to_500() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/oauth/token")
            .with_status(400)
            .with_body(r#"{"message":"invalid_grant","status":400}"#)
            .create_async()
            .await;

        let response = send(
            router_for(&server.url()),
            Request::builder()
                .uri("/ml/callback?code=stale")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "error": { "message": "invalid_grant", "status": 400 } })
        );
    }

    #[tokio::test]
    async fn test_callback_network_failure_reports_local_message() {
        let response = send(
            router_for("http://127.0.0.1:1"),
            Request::builder()
                .uri("/ml/callback?code=ABC")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().starts_with("Marketplace request failed"));
    }
}
