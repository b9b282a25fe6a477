pub mod config;
pub mod db;
pub mod domain;
pub mod error;

pub use config::Config;
pub use db::{
    init_db, InvoiceItemRepository, InvoiceRepository, Repositories, SqliteInvoiceItemRepository,
    SqliteInvoiceRepository,
};
pub use domain::{
    AccountId, Currency, Decimal, Invoice, InvoiceId, InvoiceItem, InvoiceItemId, SubscriptionId,
};
pub use error::{DaoError, DaoResult};
