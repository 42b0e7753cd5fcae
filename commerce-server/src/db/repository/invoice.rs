//! Invoice Repository

use crate::db::{Database, RepoResult};
use shared::models::Invoice;

#[derive(Clone)]
pub struct InvoiceRepository {
    db: Database,
}

impl InvoiceRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn create(&self, invoice: Invoice) -> RepoResult<Invoice> {
        self.db.invoices.insert(invoice.id.clone(), invoice.clone());
        Ok(invoice)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Invoice>> {
        Ok(self.db.invoices.get(id).map(|e| e.value().clone()))
    }

    /// List invoices, optionally restricted to one client, ordered by
    /// creation time
    pub async fn find_filtered(&self, client_id: Option<&str>) -> RepoResult<Vec<Invoice>> {
        let mut invoices: Vec<Invoice> = self
            .db
            .invoices
            .iter()
            .filter(|e| client_id.is_none_or(|c| e.value().client_id == c))
            .map(|e| e.value().clone())
            .collect();
        invoices.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(invoices)
    }
}
