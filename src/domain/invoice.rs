//! Invoice: the billing document items hang off.

use crate::domain::{AccountId, Currency, InvoiceId};
use crate::error::{DaoError, DaoResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A billing document for one account and target date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    /// Assigned at construction, never at persistence time.
    pub id: InvoiceId,
    /// Owning account.
    pub account_id: AccountId,
    /// Billing period target date.
    pub target_date: NaiveDate,
    pub currency: Currency,
}

impl Invoice {
    /// Create a new invoice with a freshly generated id.
    pub fn new(account_id: AccountId, target_date: NaiveDate, currency: Currency) -> Self {
        Self::with_id(InvoiceId::new_random(), account_id, target_date, currency)
    }

    /// Rebuild an invoice whose id is already known (e.g. from a stored row).
    pub fn with_id(
        id: InvoiceId,
        account_id: AccountId,
        target_date: NaiveDate,
        currency: Currency,
    ) -> Self {
        Self {
            id,
            account_id,
            target_date,
            currency,
        }
    }

    /// Check the invoice before it is written.
    ///
    /// # Errors
    /// Returns `DaoError::Validation` naming the first problem found.
    pub fn validate(&self) -> DaoResult<()> {
        if self.id.is_nil() {
            return Err(DaoError::Validation(
                "invoice id must not be nil".to_string(),
            ));
        }
        if self.account_id.is_nil() {
            return Err(DaoError::Validation("account_id is required".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_new_assigns_id() {
        let account = AccountId::new_random();
        let date = NaiveDate::from_ymd_opt(2011, 5, 23).unwrap();
        let a = Invoice::new(account, date, Currency::Usd);
        let b = Invoice::new(account, date, Currency::Usd);
        assert!(!a.id.is_nil());
        assert_ne!(a.id, b.id);
        assert_eq!(a.account_id, account);
    }

    #[test]
    fn test_validate_rejects_nil_ids() {
        let date = NaiveDate::from_ymd_opt(2011, 5, 23).unwrap();
        let valid = Invoice::new(AccountId::new_random(), date, Currency::Usd);
        assert!(valid.validate().is_ok());

        let no_account = Invoice::new(AccountId::from_uuid(Uuid::nil()), date, Currency::Usd);
        match no_account.validate() {
            Err(DaoError::Validation(msg)) => assert!(msg.contains("account_id")),
            other => panic!("Expected Validation error, got {:?}", other),
        }

        let nil_id = Invoice::with_id(
            InvoiceId::from_uuid(Uuid::nil()),
            AccountId::new_random(),
            date,
            Currency::Usd,
        );
        assert!(matches!(nil_id.validate(), Err(DaoError::Validation(_))));
    }

    #[test]
    fn test_json_shape() {
        let invoice = Invoice::new(
            AccountId::new_random(),
            NaiveDate::from_ymd_opt(2011, 5, 23).unwrap(),
            Currency::Usd,
        );
        let json = serde_json::to_value(&invoice).unwrap();
        assert_eq!(json["target_date"], "2011-05-23");
        assert_eq!(json["currency"], "USD");
        assert_eq!(json["id"], serde_json::json!(invoice.id.to_string()));
    }
}
