use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use crate::config::{Credentials, MarketplaceEndpoints};
use crate::error::Result;
use crate::marketplace::relay;

/// OAuth client for the marketplace authorization-code flow
#[derive(Clone)]
pub struct OAuthClient {
    credentials: Arc<Credentials>,
    auth_url: Url,
    token_url: Url,
    http_client: reqwest::Client,
}

impl OAuthClient {
    /// Create a new OAuth client
    pub fn new(
        credentials: Arc<Credentials>,
        endpoints: &MarketplaceEndpoints,
        http_client: reqwest::Client,
    ) -> Self {
        Self {
            credentials,
            auth_url: endpoints.auth_url.clone(),
            token_url: endpoints.token_url.clone(),
            http_client,
        }
    }

    /// Build the URL the user's browser is sent to for consent
    pub fn authorization_url(&self) -> String {
        let mut url = self.auth_url.clone();
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.credentials.client_id)
            .append_pair("redirect_uri", &self.credentials.redirect_uri);
        url.to_string()
    }

    /// Exchange an authorization code for the marketplace token pair
    ///
    /// The code is not validated here. Without one the form simply lacks the
    /// `code` field and the marketplace rejects the exchange. The returned JSON
    /// is the upstream body, untouched.
    pub async fn exchange_code(&self, code: Option<&str>) -> Result<Value> {
        let mut form_params = vec![
            ("grant_type", "authorization_code"),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
        ];
        if let Some(code) = code {
            form_params.push(("code", code));
        }
        form_params.push(("redirect_uri", self.credentials.redirect_uri.as_str()));

        debug!(
            token_url = %self.token_url,
            has_code = code.is_some(),
            "Exchanging authorization code"
        );

        let response = self
            .http_client
            .post(self.token_url.clone())
            .header("Accept", "application/json")
            .form(&form_params)
            .send()
            .await?;

        let token_pair = relay(response).await?;
        info!("[OK] Authorization code exchanged");

        Ok(token_pair)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GatewayError;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn credentials() -> Arc<Credentials> {
        Arc::new(Credentials {
            client_id: "app-1".to_string(),
            client_secret: "s3cret".to_string(),
            redirect_uri: "https://bdv.example.com/ml/callback".to_string(),
        })
    }

    fn client_for(api_base: &str) -> OAuthClient {
        let endpoints = MarketplaceEndpoints::with_api_base(
            "https://auth.mercadolivre.com.br/authorization",
            api_base,
        )
        .unwrap();
        OAuthClient::new(credentials(), &endpoints, reqwest::Client::new())
    }

    #[test]
    fn test_authorization_url() {
        let url = client_for("https://api.mercadolibre.com").authorization_url();

        assert_eq!(
            url,
            "https://auth.mercadolivre.com.br/authorization?response_type=code&client_id=app-1\
             &redirect_uri=https%3A%2F%2Fbdv.example.com%2Fml%2Fcallback"
        );
    }

    #[tokio::test]
    async fn test_exchange_code_posts_form() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/oauth/token")
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("grant_type".into(), "authorization_code".into()),
                Matcher::UrlEncoded("client_id".into(), "app-1".into()),
                Matcher::UrlEncoded("client_secret".into(), "s3cret".into()),
                Matcher::UrlEncoded("code".into(), "ABC".into()),
                Matcher::UrlEncoded(
                    "redirect_uri".into(),
                    "https://bdv.example.com/ml/callback".into(),
                ),
            ]))
            .with_status(200)
            .with_body(r#"{"access_token":"X","refresh_token":"Y","user_id":7}"#)
            .expect(1)
            .create_async()
            .await;

        let pair = client_for(&server.url()).exchange_code(Some("ABC")).await.unwrap();

        mock.assert_async().await;
        assert_eq!(pair, json!({ "access_token": "X", "refresh_token": "Y", "user_id": 7 }));
    }

    #[tokio::test]
    async fn test_exchange_without_code_still_calls_upstream() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/oauth/token")
            .match_body(Matcher::Regex("^grant_type=authorization_code&client_id=app-1&client_secret=s3cret&redirect_uri=".into()))
            .with_status(400)
            .with_body(r#"{"error":"invalid_grant"}"#)
            .expect(1)
            .create_async()
            .await;

        let err = client_for(&server.url()).exchange_code(None).await.unwrap_err();

        mock.assert_async().await;
        assert!(matches!(err, GatewayError::Upstream { .. }));
    }
}
