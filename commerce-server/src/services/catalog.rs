//! Catalog seam
//!
//! The Order Ledger prices line items against the catalog through this
//! trait. The catalog is a collaborator, not part of the ledger: lookups
//! can fail independently, and the ledger maps those failures to its own
//! error taxonomy.

use async_trait::async_trait;

use crate::db::repository::ProductRepository;
use crate::db::{Database, Repository};
use shared::models::Product;

/// Catalog lookup failure modes
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("product {0} not found")]
    NotFound(String),

    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

/// Read-only price/stock lookup
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Fetch the current catalog record for a product
    async fn product(&self, id: &str) -> Result<Product, CatalogError>;
}

/// Catalog backed by the local product store
pub struct StoreCatalog {
    products: ProductRepository,
}

impl StoreCatalog {
    pub fn new(db: Database) -> Self {
        Self {
            products: ProductRepository::new(db),
        }
    }
}

#[async_trait]
impl Catalog for StoreCatalog {
    async fn product(&self, id: &str) -> Result<Product, CatalogError> {
        match self.products.find_by_id(id).await {
            Ok(Some(product)) => Ok(product),
            Ok(None) => Err(CatalogError::NotFound(id.to_string())),
            Err(e) => Err(CatalogError::Unavailable(e.to_string())),
        }
    }
}

impl From<CatalogError> for shared::ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(id) => shared::ApiError::not_found(format!("Product {}", id)),
            CatalogError::Unavailable(message) => shared::ApiError::dependency("catalog", message),
        }
    }
}
