//! Marketplace API access
//!
//! Thin pass-through calls against the Mercado Livre REST API. Bodies are
//! relayed as opaque JSON; nothing here interprets upstream payloads.

pub mod client;

pub use client::{BearerToken, MarketplaceClient, OutgoingMessage};

use serde_json::Value;
use tracing::warn;

use crate::error::{GatewayError, Result};

/// Turn an upstream response into the relayed JSON body or an upstream error
///
/// Non-JSON bodies are kept as a JSON string so the caller still sees them.
pub(crate) async fn relay(response: reqwest::Response) -> Result<Value> {
    let status = response.status();
    let text = response.text().await?;
    let body = parse_body(&text);

    if !status.is_success() {
        warn!(status = %status, "Marketplace request failed");
        return Err(GatewayError::Upstream { status, body });
    }

    Ok(body)
}

fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
