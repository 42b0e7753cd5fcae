//! Payment Repository

use chrono::Utc;

use crate::db::{Database, RepoError, RepoResult};
use shared::models::{Payment, PaymentStatus};

#[derive(Clone)]
pub struct PaymentRepository {
    db: Database,
}

impl PaymentRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn create(&self, payment: Payment) -> RepoResult<Payment> {
        self.db.payments.insert(payment.id.clone(), payment.clone());
        Ok(payment)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Payment>> {
        Ok(self.db.payments.get(id).map(|e| e.value().clone()))
    }

    /// Move the payment to a new status, recording the provider
    /// transaction id when one was obtained
    pub async fn transition(
        &self,
        id: &str,
        status: PaymentStatus,
        transaction_id: Option<String>,
    ) -> RepoResult<Payment> {
        let mut entry = self
            .db
            .payments
            .get_mut(id)
            .ok_or_else(|| RepoError::NotFound(format!("Payment {}", id)))?;
        entry.status = status;
        if let Some(txn) = transaction_id {
            entry.transaction_id = Some(txn);
        }
        entry.updated_at = Utc::now();
        Ok(entry.value().clone())
    }
}
