//! SQLite-backed invoice repository.

use crate::domain::{AccountId, Invoice, InvoiceId, SubscriptionId};
use crate::error::DaoResult;
use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;
use tracing::debug;

use super::{invoice_from_row, ping, InvoiceRepository};

#[derive(Debug, Clone)]
pub struct SqliteInvoiceRepository {
    pool: SqlitePool,
}

impl SqliteInvoiceRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        SqliteInvoiceRepository { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl InvoiceRepository for SqliteInvoiceRepository {
    async fn create_invoice(&self, invoice: &Invoice) -> DaoResult<()> {
        invoice.validate()?;
        sqlx::query(
            r#"
            INSERT INTO invoices (id, account_id, target_date, currency, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(invoice.id.to_string())
        .bind(invoice.account_id.to_string())
        .bind(invoice.target_date.to_string())
        .bind(invoice.currency.code())
        .bind(chrono::Utc::now().timestamp_millis())
        .execute(&self.pool)
        .await?;

        debug!(
            invoice_id = %invoice.id,
            account_id = %invoice.account_id,
            "Invoice created"
        );
        Ok(())
    }

    async fn get_invoice(&self, id: InvoiceId) -> DaoResult<Option<Invoice>> {
        let row = sqlx::query(
            r#"
            SELECT id, account_id, target_date, currency
            FROM invoices
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(invoice_from_row).transpose()
    }

    async fn get_invoices_by_account(&self, account_id: AccountId) -> DaoResult<Vec<Invoice>> {
        let rows = sqlx::query(
            r#"
            SELECT id, account_id, target_date, currency
            FROM invoices
            WHERE account_id = ?
            ORDER BY target_date ASC, id ASC
            "#,
        )
        .bind(account_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(invoice_from_row).collect()
    }

    async fn get_invoices_by_subscription(
        &self,
        subscription_id: SubscriptionId,
    ) -> DaoResult<Vec<Invoice>> {
        let rows = sqlx::query(
            r#"
            SELECT DISTINCT i.id, i.account_id, i.target_date, i.currency
            FROM invoices i
            JOIN invoice_items ii ON ii.invoice_id = i.id
            WHERE ii.subscription_id = ?
            ORDER BY i.target_date ASC, i.id ASC
            "#,
        )
        .bind(subscription_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(invoice_from_row).collect()
    }

    async fn health_check(&self) -> DaoResult<()> {
        ping(&self.pool).await
    }
}
