//! InvoiceItem: a single line on an invoice.

use crate::domain::{Currency, Decimal, InvoiceId, InvoiceItemId, SubscriptionId};
use crate::error::{DaoError, DaoResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One billed line: a subscription over a half-open date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceItem {
    /// Assigned at construction, never at persistence time.
    pub id: InvoiceItemId,
    /// Parent invoice.
    pub invoice_id: InvoiceId,
    pub subscription_id: SubscriptionId,
    /// First day covered (inclusive).
    pub start_date: NaiveDate,
    /// First day not covered (exclusive).
    pub end_date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub rate: Decimal,
    pub currency: Currency,
}

impl InvoiceItem {
    /// Create a new item with a freshly generated id.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        invoice_id: InvoiceId,
        subscription_id: SubscriptionId,
        start_date: NaiveDate,
        end_date: NaiveDate,
        description: impl Into<String>,
        amount: Decimal,
        rate: Decimal,
        currency: Currency,
    ) -> Self {
        Self {
            id: InvoiceItemId::new_random(),
            invoice_id,
            subscription_id,
            start_date,
            end_date,
            description: description.into(),
            amount,
            rate,
            currency,
        }
    }

    /// Check the item before it is written.
    ///
    /// # Errors
    /// Returns `DaoError::Validation` naming the first problem found.
    pub fn validate(&self) -> DaoResult<()> {
        if self.id.is_nil() {
            return Err(DaoError::Validation("item id must not be nil".to_string()));
        }
        if self.invoice_id.is_nil() {
            return Err(DaoError::Validation(
                "invoice_id is required".to_string(),
            ));
        }
        if self.subscription_id.is_nil() {
            return Err(DaoError::Validation(
                "subscription_id is required".to_string(),
            ));
        }
        if self.start_date > self.end_date {
            return Err(DaoError::Validation(format!(
                "start_date {} is after end_date {}",
                self.start_date, self.end_date
            )));
        }

        let max_scale = self.currency.minor_units();
        for (field, value) in [("amount", &self.amount), ("rate", &self.rate)] {
            if value.significant_scale() > max_scale {
                return Err(DaoError::Validation(format!(
                    "{} {} has more than {} decimal places for {}",
                    field, value, max_scale, self.currency
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_item() -> InvoiceItem {
        let rate = Decimal::from_str("20.00").unwrap();
        InvoiceItem::new(
            InvoiceId::new_random(),
            SubscriptionId::new_random(),
            date(2011, 10, 1),
            date(2011, 11, 1),
            "test",
            rate,
            rate,
            Currency::Usd,
        )
    }

    #[test]
    fn test_valid_item_passes() {
        let item = sample_item();
        assert!(item.validate().is_ok());
    }

    #[test]
    fn test_empty_range_is_valid() {
        let mut item = sample_item();
        item.end_date = item.start_date;
        assert!(item.validate().is_ok());
    }

    #[test]
    fn test_inverted_range_rejected() {
        let mut item = sample_item();
        item.end_date = date(2011, 9, 30);
        match item.validate() {
            Err(DaoError::Validation(msg)) => assert!(msg.contains("start_date")),
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_nil_invoice_id_rejected() {
        let mut item = sample_item();
        item.invoice_id = InvoiceId::from_uuid(Uuid::nil());
        assert!(matches!(item.validate(), Err(DaoError::Validation(_))));
    }

    #[test]
    fn test_nil_subscription_id_rejected() {
        let mut item = sample_item();
        item.subscription_id = SubscriptionId::from_uuid(Uuid::nil());
        assert!(matches!(item.validate(), Err(DaoError::Validation(_))));
    }

    #[test]
    fn test_excess_scale_rejected() {
        let mut item = sample_item();
        item.rate = Decimal::from_str("19.995").unwrap();
        match item.validate() {
            Err(DaoError::Validation(msg)) => assert!(msg.starts_with("rate")),
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_trailing_zeros_do_not_count_as_scale() {
        let mut item = sample_item();
        item.amount = Decimal::from_str("20.0000").unwrap();
        assert!(item.validate().is_ok());
    }
}
