//! BDV Backend Gateway
//!
//! Storefront catalog plus a Mercado Livre OAuth gateway.
//!
//! # Features
//! - Static categories, products and offers
//! - OAuth2 authorization-code redirect and code exchange
//! - Authenticated pass-through for user, order and message endpoints
//! - Webhook receiver for marketplace notifications

pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod marketplace;
pub mod server;

pub use auth::OAuthClient;
pub use catalog::Catalog;
pub use config::{Credentials, GatewayConfig, MarketplaceEndpoints};
pub use error::{GatewayError, Result};
pub use marketplace::{BearerToken, MarketplaceClient};
pub use server::{build_router, start_server, AppState};
