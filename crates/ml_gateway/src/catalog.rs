//! Static storefront catalog
//!
//! Categories, products and offers served as-is by the catalog endpoints.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub category_id: String,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub id: String,
    pub product_id: String,
    pub label: String,
    pub discount_percent: u8,
}

/// Liveness payload for `/health`
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub ok: bool,
    pub name: &'static str,
    pub status: &'static str,
}

impl HealthStatus {
    pub fn online() -> Self {
        Self {
            ok: true,
            name: "BDV Backend",
            status: "online",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Catalog {
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
    pub offers: Vec<Offer>,
}

impl Catalog {
    /// The catalog shipped with the service
    pub fn builtin() -> Self {
        let category = |id: &str, name: &str| Category {
            id: id.to_string(),
            name: name.to_string(),
        };

        Self {
            categories: vec![
                category("casa-inteligente", "Casa Inteligente"),
                category("beleza", "Beleza"),
                category("eletronicos", "Eletrônicos"),
            ],
            products: vec![Product {
                id: "p1".to_string(),
                name: "Lâmpada Smart Wi-Fi".to_string(),
                price: 59.9,
                category_id: "casa-inteligente".to_string(),
                image: "https://via.placeholder.com/400x300".to_string(),
            }],
            offers: vec![Offer {
                id: "o1".to_string(),
                product_id: "p1".to_string(),
                label: "Oferta do Dia".to_string(),
                discount_percent: 15,
            }],
        }
    }
}
