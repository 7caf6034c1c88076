//! Gateway HTTP Server
//!
//! Serves the static catalog and the `/ml` routes: OAuth redirect and code
//! exchange, the authenticated marketplace proxy, and the webhook receiver.

pub mod catalog_handlers;
pub mod oauth_handlers;
pub mod proxy_handlers;
pub mod webhook_handlers;

use crate::{Catalog, GatewayConfig, MarketplaceClient, OAuthClient};
use axum::{
    routing::{get, post},
    Router as AxumRouter,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across handlers
///
/// Everything in here is immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub oauth: OAuthClient,
    pub marketplace: MarketplaceClient,
    pub catalog: Catalog,
}

impl AppState {
    /// Build state from configuration, sharing one HTTP client between the OAuth and API clients
    pub fn new(config: &GatewayConfig) -> crate::error::Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;

        let credentials = Arc::new(config.credentials.clone());

        Ok(Self {
            oauth: OAuthClient::new(credentials, &config.endpoints, http_client.clone()),
            marketplace: MarketplaceClient::new(http_client, config.endpoints.api_base_url.clone()),
            catalog: Catalog::builtin(),
        })
    }
}

/// Build the router with every gateway route
///
/// Routes:
/// - GET /health, /categories, /products, /offers - static catalog
/// - GET /ml/auth - redirect to marketplace consent page
/// - GET /ml/callback - exchange authorization code for tokens
/// - GET /ml/users/me - current marketplace user
/// - GET /ml/orders?sellerId= - paid orders of a seller
/// - GET /ml/orders/:id - single order
/// - GET /ml/messages/:orderId - message thread of an order pack
/// - POST /ml/messages/:orderId - send a message to an order pack
/// - POST /ml/webhooks - marketplace notifications
pub fn build_router(state: Arc<AppState>) -> AxumRouter {
    AxumRouter::new()
        .route("/health", get(catalog_handlers::health))
        .route("/categories", get(catalog_handlers::list_categories))
        .route("/products", get(catalog_handlers::list_products))
        .route("/offers", get(catalog_handlers::list_offers))
        .route("/ml/auth", get(oauth_handlers::ml_auth))
        .route("/ml/callback", get(oauth_handlers::ml_callback))
        .route("/ml/users/me", get(proxy_handlers::get_current_user))
        .route("/ml/orders", get(proxy_handlers::search_orders))
        .route("/ml/orders/:id", get(proxy_handlers::get_order))
        .route(
            "/ml/messages/:order_id",
            get(proxy_handlers::get_messages).post(proxy_handlers::post_message),
        )
        .route("/ml/webhooks", post(webhook_handlers::receive_notification))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the gateway HTTP server
///
/// # Errors
/// Returns error if the HTTP client cannot be built or the address cannot be bound
pub async fn start_server(config: GatewayConfig) -> anyhow::Result<()> {
    let state = AppState::new(&config)
        .map_err(|e| anyhow::anyhow!("Failed to initialize gateway state: {}", e))?;

    let app = build_router(Arc::new(state));

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind {}: {}", addr, e))?;

    info!("[INFO] BDV Backend listening on {}", addr);
    info!("[INFO] Marketplace API: {}", config.endpoints.api_base_url);

    axum::serve(listener, app).await?;

    Ok(())
}
