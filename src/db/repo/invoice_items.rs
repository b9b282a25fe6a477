//! SQLite-backed invoice item repository.

use crate::domain::{AccountId, InvoiceId, InvoiceItem, InvoiceItemId, SubscriptionId};
use crate::error::DaoResult;
use async_trait::async_trait;
use sqlx::sqlite::{Sqlite, SqlitePool};
use sqlx::Executor;
use tracing::{debug, info};

use super::{invoice_item_from_row, ping, InvoiceItemRepository};

#[derive(Debug, Clone)]
pub struct SqliteInvoiceItemRepository {
    pool: SqlitePool,
}

impl SqliteInvoiceItemRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        SqliteInvoiceItemRepository { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

async fn insert_item<'e, E>(executor: E, item: &InvoiceItem, created_at: i64) -> DaoResult<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"
        INSERT INTO invoice_items (
            id, invoice_id, subscription_id, start_date, end_date,
            description, amount, rate, currency, created_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(item.id.to_string())
    .bind(item.invoice_id.to_string())
    .bind(item.subscription_id.to_string())
    .bind(item.start_date.to_string())
    .bind(item.end_date.to_string())
    .bind(item.description.clone())
    .bind(item.amount.to_storage_string())
    .bind(item.rate.to_storage_string())
    .bind(item.currency.code())
    .bind(created_at)
    .execute(executor)
    .await?;

    Ok(())
}

#[async_trait]
impl InvoiceItemRepository for SqliteInvoiceItemRepository {
    async fn create_invoice_item(&self, item: &InvoiceItem) -> DaoResult<()> {
        item.validate()?;
        insert_item(&self.pool, item, chrono::Utc::now().timestamp_millis()).await?;

        debug!(
            item_id = %item.id,
            invoice_id = %item.invoice_id,
            subscription_id = %item.subscription_id,
            "Invoice item created"
        );
        Ok(())
    }

    async fn create_invoice_items(&self, items: &[InvoiceItem]) -> DaoResult<usize> {
        if items.is_empty() {
            return Ok(0);
        }
        for item in items {
            item.validate()?;
        }

        let created_at = chrono::Utc::now().timestamp_millis();
        let mut tx = self.pool.begin().await?;

        for item in items {
            insert_item(&mut *tx, item, created_at).await?;
        }

        tx.commit().await?;
        info!(count = items.len(), "Invoice items created");
        Ok(items.len())
    }

    async fn get_invoice_item(&self, id: InvoiceItemId) -> DaoResult<Option<InvoiceItem>> {
        let row = sqlx::query(
            r#"
            SELECT id, invoice_id, subscription_id, start_date, end_date,
                   description, amount, rate, currency
            FROM invoice_items
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(invoice_item_from_row).transpose()
    }

    async fn get_invoice_items_by_subscription(
        &self,
        subscription_id: SubscriptionId,
    ) -> DaoResult<Vec<InvoiceItem>> {
        let rows = sqlx::query(
            r#"
            SELECT id, invoice_id, subscription_id, start_date, end_date,
                   description, amount, rate, currency
            FROM invoice_items
            WHERE subscription_id = ?
            ORDER BY start_date ASC, id ASC
            "#,
        )
        .bind(subscription_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(invoice_item_from_row).collect()
    }

    async fn get_invoice_items_by_invoice(
        &self,
        invoice_id: InvoiceId,
    ) -> DaoResult<Vec<InvoiceItem>> {
        let rows = sqlx::query(
            r#"
            SELECT id, invoice_id, subscription_id, start_date, end_date,
                   description, amount, rate, currency
            FROM invoice_items
            WHERE invoice_id = ?
            ORDER BY start_date ASC, id ASC
            "#,
        )
        .bind(invoice_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(invoice_item_from_row).collect()
    }

    async fn get_invoice_items_by_account(
        &self,
        account_id: AccountId,
    ) -> DaoResult<Vec<InvoiceItem>> {
        let rows = sqlx::query(
            r#"
            SELECT ii.id, ii.invoice_id, ii.subscription_id, ii.start_date, ii.end_date,
                   ii.description, ii.amount, ii.rate, ii.currency
            FROM invoice_items ii
            JOIN invoices i ON i.id = ii.invoice_id
            WHERE i.account_id = ?
            ORDER BY ii.start_date ASC, ii.id ASC
            "#,
        )
        .bind(account_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(invoice_item_from_row).collect()
    }

    async fn health_check(&self) -> DaoResult<()> {
        ping(&self.pool).await
    }
}
