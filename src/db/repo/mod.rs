//! Repository layer for invoices and invoice items.
//!
//! Each entity gets a trait describing its access contract and a SQLite
//! implementation over a shared `SqlitePool`:
//! - `invoices.rs` - `SqliteInvoiceRepository`
//! - `invoice_items.rs` - `SqliteInvoiceItemRepository`

mod invoice_items;
mod invoices;

pub use invoice_items::SqliteInvoiceItemRepository;
pub use invoices::SqliteInvoiceRepository;

use crate::domain::{
    AccountId, Invoice, InvoiceId, InvoiceItem, InvoiceItemId, SubscriptionId,
};
use crate::error::{DaoError, DaoResult};
use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;
use std::str::FromStr;

/// Access contract for invoices.
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    /// Validate and persist a new invoice under its pre-assigned id.
    ///
    /// # Errors
    /// `DaoError::Validation` before any write when an id is nil;
    /// `DaoError::Persistence` on duplicate id or storage failure.
    async fn create_invoice(&self, invoice: &Invoice) -> DaoResult<()>;

    /// Fetch an invoice by id; `None` when it does not exist.
    async fn get_invoice(&self, id: InvoiceId) -> DaoResult<Option<Invoice>>;

    /// All invoices owned by an account, ordered by target date.
    async fn get_invoices_by_account(&self, account_id: AccountId) -> DaoResult<Vec<Invoice>>;

    /// Invoices carrying at least one item for the subscription.
    async fn get_invoices_by_subscription(
        &self,
        subscription_id: SubscriptionId,
    ) -> DaoResult<Vec<Invoice>>;

    /// Verify the backing storage answers queries.
    async fn health_check(&self) -> DaoResult<()>;
}

/// Access contract for invoice items.
#[async_trait]
pub trait InvoiceItemRepository: Send + Sync {
    /// Validate and persist a new item under its pre-assigned id.
    ///
    /// # Errors
    /// `DaoError::Validation` before any write when the item is malformed;
    /// `DaoError::Persistence` when the parent invoice is missing, the id is
    /// already taken, or storage fails.
    async fn create_invoice_item(&self, item: &InvoiceItem) -> DaoResult<()>;

    /// Validate and persist several items atomically.
    ///
    /// Returns the number of rows written. Nothing is written on error.
    async fn create_invoice_items(&self, items: &[InvoiceItem]) -> DaoResult<usize>;

    /// Fetch an item by id; `None` when it does not exist.
    async fn get_invoice_item(&self, id: InvoiceItemId) -> DaoResult<Option<InvoiceItem>>;

    async fn get_invoice_items_by_subscription(
        &self,
        subscription_id: SubscriptionId,
    ) -> DaoResult<Vec<InvoiceItem>>;

    async fn get_invoice_items_by_invoice(
        &self,
        invoice_id: InvoiceId,
    ) -> DaoResult<Vec<InvoiceItem>>;

    /// Items on any invoice owned by the account.
    async fn get_invoice_items_by_account(
        &self,
        account_id: AccountId,
    ) -> DaoResult<Vec<InvoiceItem>>;

    /// Verify the backing storage answers queries.
    async fn health_check(&self) -> DaoResult<()>;
}

/// Both repositories wired to one pool.
#[derive(Debug, Clone)]
pub struct Repositories {
    pub invoices: SqliteInvoiceRepository,
    pub items: SqliteInvoiceItemRepository,
}

impl Repositories {
    pub fn new(pool: SqlitePool) -> Self {
        Repositories {
            invoices: SqliteInvoiceRepository::new(pool.clone()),
            items: SqliteInvoiceItemRepository::new(pool),
        }
    }
}

async fn ping(pool: &SqlitePool) -> DaoResult<()> {
    let row = sqlx::query("SELECT 1 AS ok").fetch_one(pool).await?;
    let ok: i64 = row.try_get("ok")?;
    if ok == 1 {
        Ok(())
    } else {
        Err(DaoError::corrupt("ok", ok.to_string()))
    }
}

/// Read a TEXT column and parse it into a domain value.
fn parse_column<T: FromStr>(row: &SqliteRow, column: &'static str) -> DaoResult<T> {
    let raw: String = row.try_get(column)?;
    raw.parse::<T>().map_err(|_| DaoError::corrupt(column, raw))
}

fn invoice_from_row(row: &SqliteRow) -> DaoResult<Invoice> {
    Ok(Invoice::with_id(
        parse_column(row, "id")?,
        parse_column(row, "account_id")?,
        parse_column(row, "target_date")?,
        parse_column(row, "currency")?,
    ))
}

fn invoice_item_from_row(row: &SqliteRow) -> DaoResult<InvoiceItem> {
    Ok(InvoiceItem {
        id: parse_column(row, "id")?,
        invoice_id: parse_column(row, "invoice_id")?,
        subscription_id: parse_column(row, "subscription_id")?,
        start_date: parse_column(row, "start_date")?,
        end_date: parse_column(row, "end_date")?,
        description: row.try_get("description")?,
        amount: parse_column(row, "amount")?,
        rate: parse_column(row, "rate")?,
        currency: parse_column(row, "currency")?,
    })
}
