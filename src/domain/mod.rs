//! Domain types for invoices and their line items.
//!
//! This module provides:
//! - Exact monetary values via the Decimal wrapper
//! - Typed identifiers and Currency
//! - Invoice and InvoiceItem entities

pub mod decimal;
pub mod invoice;
pub mod invoice_item;
pub mod primitives;

pub use decimal::Decimal;
pub use invoice::Invoice;
pub use invoice_item::InvoiceItem;
pub use primitives::{
    AccountId, Currency, InvoiceId, InvoiceItemId, SubscriptionId, UnknownCurrency,
};
