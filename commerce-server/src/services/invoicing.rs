//! Invoice Generator
//!
//! Derives tax/subtotal/total from an order snapshot fetched through the
//! Order Ledger (component seam, never the order table directly),
//! persists the invoice and assigns a human-readable number.

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::core::ServerState;
use crate::db::repository::InvoiceRepository;
use crate::events::EventBus;
use crate::services::ledger::OrderLedger;
use shared::error::{ApiError, ApiResult};
use shared::events::{self, topics};
use shared::models::{Invoice, InvoiceStatus};
use shared::util;

/// Fixed VAT rate applied to every invoice (0.20)
const TAX_RATE: Decimal = Decimal::from_parts(20, 0, 0, false, 2);

#[derive(Clone)]
pub struct InvoiceGenerator {
    invoices: InvoiceRepository,
    ledger: OrderLedger,
    events: EventBus,
}

impl InvoiceGenerator {
    pub fn new(invoices: InvoiceRepository, ledger: OrderLedger, events: EventBus) -> Self {
        Self {
            invoices,
            ledger,
            events,
        }
    }

    pub fn from_state(state: &ServerState) -> Self {
        Self::new(
            InvoiceRepository::new(state.db.clone()),
            OrderLedger::from_state(state),
            state.events.clone(),
        )
    }

    /// Generate an invoice for an order.
    ///
    /// `subtotal = order.total`, `tax = round(subtotal x 0.20, 2)`,
    /// `total = subtotal + tax`. Financial fields are frozen at creation.
    /// There is no idempotency guard: a second call for the same order
    /// issues a second invoice.
    pub async fn generate_invoice(&self, order_id: &str) -> ApiResult<Invoice> {
        let order = self.ledger.get_order(order_id).await?;

        let subtotal = order.total;
        let tax = (subtotal * TAX_RATE).round_dp(2);
        let total = subtotal + tax;

        let invoice = Invoice {
            id: Uuid::new_v4().to_string(),
            invoice_number: util::invoice_number(),
            order_id: order.id.clone(),
            client_id: order.client_id.clone(),
            subtotal,
            tax,
            total,
            status: InvoiceStatus::Issued,
            pdf_url: None,
            created_at: Utc::now(),
        };
        let invoice = self.invoices.create(invoice).await?;

        self.notify(
            topics::INVOICE_GENERATED,
            events::InvoiceGenerated {
                id: invoice.id.clone(),
                order_id: invoice.order_id.clone(),
                invoice_number: invoice.invoice_number.clone(),
            },
        );
        if let Err(e) = self.ledger.attach_invoice(&order.id, &invoice.id).await {
            tracing::warn!(order_id = %order.id, error = %e, "failed to link invoice to order");
        }
        tracing::info!(invoice_id = %invoice.id, invoice_number = %invoice.invoice_number, "invoice generated");

        Ok(invoice)
    }

    pub async fn get_invoice(&self, id: &str) -> ApiResult<Invoice> {
        self.invoices
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("Invoice {}", id)))
    }

    pub async fn list_invoices(&self, client_id: Option<&str>) -> ApiResult<Vec<Invoice>> {
        Ok(self.invoices.find_filtered(client_id).await?)
    }

    fn notify(&self, topic: &str, payload: impl Serialize) {
        if let Err(e) = self.events.publish(topic, payload) {
            tracing::warn!(topic, error = %e, "event publish failed");
        }
    }
}
