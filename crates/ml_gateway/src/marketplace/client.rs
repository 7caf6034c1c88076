use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use super::relay;
use crate::config::with_segments;
use crate::error::Result;

/// Access token presented by the caller, forwarded as-is to the marketplace
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Take the second whitespace-separated token of an `Authorization` header value
    ///
    /// The scheme word is not checked, only the presence of a credential after it.
    pub fn from_authorization(value: &str) -> Option<Self> {
        value
            .split_whitespace()
            .nth(1)
            .map(|token| Self(token.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

/// Message forwarded to a pack's message thread
///
/// Fields are relayed untouched; absent fields are omitted from the upstream body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutgoingMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<Value>,
}

/// Authenticated pass-through client for the marketplace REST API
#[derive(Clone)]
pub struct MarketplaceClient {
    http_client: reqwest::Client,
    api_base_url: Url,
}

impl MarketplaceClient {
    pub fn new(http_client: reqwest::Client, api_base_url: Url) -> Self {
        Self {
            http_client,
            api_base_url,
        }
    }

    /// `GET /users/me`
    pub async fn get_current_user(&self, token: &BearerToken) -> Result<Value> {
        let url = self.endpoint(&["users", "me"])?;
        self.send(self.http_client.get(url), token).await
    }

    /// `GET /orders/search?seller=<id>&order.status=paid`
    pub async fn search_orders(&self, token: &BearerToken, seller_id: &str) -> Result<Value> {
        let mut url = self.endpoint(&["orders", "search"])?;
        url.query_pairs_mut()
            .append_pair("seller", seller_id)
            .append_pair("order.status", "paid");
        self.send(self.http_client.get(url), token).await
    }

    /// `GET /orders/<id>`
    pub async fn get_order(&self, token: &BearerToken, order_id: &str) -> Result<Value> {
        let url = self.endpoint(&["orders", order_id])?;
        self.send(self.http_client.get(url), token).await
    }

    /// `GET /messages/packs/<id>/messages`
    pub async fn get_messages(&self, token: &BearerToken, order_id: &str) -> Result<Value> {
        let url = self.endpoint(&["messages", "packs", order_id, "messages"])?;
        self.send(self.http_client.get(url), token).await
    }

    /// `POST /messages/packs/<id>/messages` with `{subject, text}`
    pub async fn post_message(
        &self,
        token: &BearerToken,
        order_id: &str,
        message: &OutgoingMessage,
    ) -> Result<Value> {
        let url = self.endpoint(&["messages", "packs", order_id, "messages"])?;
        self.send(self.http_client.post(url).json(message), token).await
    }

    /// Append percent-encoded path segments to the API base
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        with_segments(&self.api_base_url, segments)
    }

    async fn send(&self, request: reqwest::RequestBuilder, token: &BearerToken) -> Result<Value> {
        let response = request
            .bearer_auth(token.as_str())
            .header("Accept", "application/json")
            .send()
            .await?;
        relay(response).await
    }
}
