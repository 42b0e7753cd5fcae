//! Product Repository

use chrono::Utc;
use uuid::Uuid;

use crate::db::{Database, RepoError, RepoResult, Repository};
use shared::models::{Product, ProductCreate, ProductUpdate};

#[derive(Clone)]
pub struct ProductRepository {
    db: Database,
}

impl ProductRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// List products ordered by creation time, optionally filtered by
    /// category, with the unpaged total
    pub async fn find_all(
        &self,
        limit: usize,
        offset: usize,
        category: Option<&str>,
    ) -> RepoResult<(Vec<Product>, usize)> {
        let mut products: Vec<Product> = self
            .db
            .products
            .iter()
            .filter(|e| category.is_none_or(|c| e.value().category == c))
            .map(|e| e.value().clone())
            .collect();
        products.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        let total = products.len();
        let page = products.into_iter().skip(offset).take(limit).collect();
        Ok((page, total))
    }

    /// Set the absolute stock level
    pub async fn set_stock(&self, id: &str, quantity: i32) -> RepoResult<Product> {
        let mut entry = self
            .db
            .products
            .get_mut(id)
            .ok_or_else(|| RepoError::NotFound(format!("Product {}", id)))?;
        entry.stock = quantity;
        entry.updated_at = Utc::now();
        Ok(entry.value().clone())
    }
}

impl Repository<Product, ProductCreate, ProductUpdate> for ProductRepository {
    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        Ok(self.db.products.get(id).map(|e| e.value().clone()))
    }

    async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: data.name,
            description: data.description,
            price: data.price,
            stock: data.stock.unwrap_or(0),
            category: data.category,
            images: data.images,
            attributes: data.attributes,
            created_at: now,
            updated_at: now,
        };

        self.db.products.insert(product.id.clone(), product.clone());
        Ok(product)
    }

    async fn update(&self, id: &str, data: ProductUpdate) -> RepoResult<Product> {
        let mut entry = self
            .db
            .products
            .get_mut(id)
            .ok_or_else(|| RepoError::NotFound(format!("Product {}", id)))?;

        if let Some(v) = data.name {
            entry.name = v;
        }
        if let Some(v) = data.description {
            entry.description = Some(v);
        }
        if let Some(v) = data.price {
            entry.price = v;
        }
        if let Some(v) = data.stock {
            entry.stock = v;
        }
        if let Some(v) = data.category {
            entry.category = v;
        }
        if let Some(v) = data.images {
            entry.images = Some(v);
        }
        if let Some(v) = data.attributes {
            entry.attributes = Some(v);
        }
        entry.updated_at = Utc::now();

        Ok(entry.value().clone())
    }

    async fn delete(&self, id: &str) -> RepoResult<()> {
        self.db
            .products
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| RepoError::NotFound(format!("Product {}", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn create_payload(name: &str, category: &str) -> ProductCreate {
        ProductCreate {
            name: name.to_string(),
            description: None,
            price: Decimal::new(1000, 2),
            stock: None,
            category: category.to_string(),
            images: None,
            attributes: None,
        }
    }

    #[tokio::test]
    async fn category_filter_and_pagination() {
        let repo = ProductRepository::new(crate::db::Store::shared());
        repo.create(create_payload("Keyboard", "electronics"))
            .await
            .unwrap();
        repo.create(create_payload("Mug", "kitchen")).await.unwrap();
        repo.create(create_payload("Mouse", "electronics"))
            .await
            .unwrap();

        let (page, total) = repo.find_all(10, 0, Some("electronics")).await.unwrap();
        assert_eq!(total, 2);
        assert!(page.iter().all(|p| p.category == "electronics"));

        let (page, total) = repo.find_all(1, 1, None).await.unwrap();
        assert_eq!(total, 3);
        assert_eq!(page.len(), 1);
    }

    #[tokio::test]
    async fn set_stock_is_absolute() {
        let repo = ProductRepository::new(crate::db::Store::shared());
        let product = repo
            .create(create_payload("Keyboard", "electronics"))
            .await
            .unwrap();
        assert_eq!(product.stock, 0);

        let product = repo.set_stock(&product.id, 42).await.unwrap();
        assert_eq!(product.stock, 42);

        let product = repo.set_stock(&product.id, 7).await.unwrap();
        assert_eq!(product.stock, 7);
    }
}
