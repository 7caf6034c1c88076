// BDV Backend Gateway
//
// Serves the storefront catalog and brokers Mercado Livre OAuth plus the
// authenticated marketplace endpoints.

use ml_gateway::{start_server, GatewayConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = GatewayConfig::from_env()?;

    if config.credentials.client_id.is_empty() {
        warn!("[WARN] ML_CLIENT_ID is not set; /ml/auth and /ml/callback will fail upstream");
    } else {
        info!("[OK] Mercado Livre app configured: {}", config.credentials.client_id);
    }

    info!("[INFO] Available endpoints:");
    info!("  GET    /health /categories /products /offers");
    info!("  GET    /ml/auth                 - Redirect to marketplace authorization");
    info!("  GET    /ml/callback?code=       - Exchange code for tokens");
    info!("  GET    /ml/users/me             - Current marketplace user");
    info!("  GET    /ml/orders?sellerId=     - Paid orders of a seller");
    info!("  GET    /ml/orders/:id           - Order details");
    info!("  GET    /ml/messages/:orderId    - Order messages");
    info!("  POST   /ml/messages/:orderId    - Send order message");
    info!("  POST   /ml/webhooks             - Marketplace notifications");

    start_server(config).await?;

    Ok(())
}
