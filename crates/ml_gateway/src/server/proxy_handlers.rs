//! Authenticated marketplace proxy handlers
//!
//! Each handler checks for the caller's bearer token and its required
//! identifiers, makes exactly one marketplace call, and relays the result.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, HeaderMap},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::error::GatewayError;
use crate::marketplace::{BearerToken, OutgoingMessage};

use super::AppState;

pub const TOKEN_REQUIRED: &str = "Access token required";
pub const SELLER_AND_TOKEN_REQUIRED: &str = "sellerId and access token are required";

/// Bearer token from the `Authorization` header, or a 401 before any upstream call
pub fn bearer_token(headers: &HeaderMap) -> Result<BearerToken, GatewayError> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(BearerToken::from_authorization)
        .ok_or_else(|| GatewayError::MissingCredential(TOKEN_REQUIRED.to_string()))
}

#[derive(Debug, Deserialize)]
pub struct SearchOrdersQuery {
    #[serde(rename = "sellerId")]
    pub seller_id: Option<String>,
}

/// GET /ml/users/me
pub async fn get_current_user(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Value>, GatewayError> {
    let token = bearer_token(&headers)?;
    let user = state.marketplace.get_current_user(&token).await?;
    Ok(Json(user))
}

/// GET /ml/orders?sellerId=<id>
pub async fn search_orders(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<SearchOrdersQuery>,
) -> Result<Json<Value>, GatewayError> {
    let token = bearer_token(&headers)?;
    let seller_id = query
        .seller_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| GatewayError::MissingCredential(SELLER_AND_TOKEN_REQUIRED.to_string()))?;

    debug!(seller_id = %seller_id, "Searching paid orders");
    let orders = state.marketplace.search_orders(&token, &seller_id).await?;
    Ok(Json(orders))
}

/// GET /ml/orders/:id
pub async fn get_order(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(order_id): Path<String>,
) -> Result<Json<Value>, GatewayError> {
    let token = bearer_token(&headers)?;
    let order = state.marketplace.get_order(&token, &order_id).await?;
    Ok(Json(order))
}

/// GET /ml/messages/:orderId
pub async fn get_messages(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(order_id): Path<String>,
) -> Result<Json<Value>, GatewayError> {
    let token = bearer_token(&headers)?;
    let messages = state.marketplace.get_messages(&token, &order_id).await?;
    Ok(Json(messages))
}

/// POST /ml/messages/:orderId
///
/// The body is read leniently: anything that is not a JSON object with
/// `subject`/`text` is forwarded as an empty message.
pub async fn post_message(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(order_id): Path<String>,
    body: Bytes,
) -> Result<Json<Value>, GatewayError> {
    let token = bearer_token(&headers)?;
    let message: OutgoingMessage = serde_json::from_slice(&body).unwrap_or_default();
    let sent = state
        .marketplace
        .post_message(&token, &order_id, &message)
        .await?;
    Ok(Json(sent))
}
