//! Payment registration for a single transaction.
//!
//! A payment draft is a short-lived edit context separate from the page's form
//! draft. It is opened on an unpaid transaction with the transaction's amount
//! and today's date pre-filled, and confirming it sends only the payment
//! fields.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::AppError;
use crate::gateway::item_path;
use crate::models::transaction::PaymentBody;
use crate::models::{FieldErrors, Resource, Transaction};

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentDraft {
    pub transaction_id: i64,
    /// Shown in the payment dialog
    pub name: String,
    pub amount: Decimal,
    pub payment_date: Option<NaiveDate>,
    pub paid_amount: Decimal,
}

impl PaymentDraft {
    /// Open a payment context on `transaction`.
    ///
    /// # Errors
    ///
    /// `AlreadyPaid` when the transaction already carries a payment date.
    pub fn open(transaction: &Transaction, today: NaiveDate) -> Result<Self, AppError> {
        if transaction.is_paid() {
            return Err(AppError::AlreadyPaid(transaction.id));
        }

        Ok(Self {
            transaction_id: transaction.id,
            name: transaction.name.clone(),
            amount: transaction.amount,
            payment_date: Some(today),
            paid_amount: transaction.amount,
        })
    }

    /// A payment needs a date and a positive amount.
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.payment_date.is_none() {
            errors.insert("payment_date", "Payment date is required".to_string());
        }
        if self.paid_amount <= Decimal::ZERO {
            errors.insert("paid_amount", "Paid amount must be greater than zero".to_string());
        }
        errors
    }

    pub fn body(&self) -> PaymentBody {
        PaymentBody {
            payment_date: self.payment_date,
            paid_amount: self.paid_amount,
        }
    }

    /// `/transaction/{id}/payment`
    pub fn path(&self) -> String {
        format!("{}/payment", item_path(Transaction::COLLECTION, self.transaction_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionKind;

    fn power_bill(payment_date: Option<NaiveDate>) -> Transaction {
        Transaction {
            id: 12,
            name: "Electricity".to_string(),
            description: String::new(),
            amount: Decimal::new(8050, 2),
            due_date: NaiveDate::from_ymd_opt(2024, 3, 10),
            payment_date,
            category_id: 1,
            subcategory_id: 0,
            account_id: 2,
            user_id: 1,
            paid_amount: Decimal::new(8050, 2),
            kind: TransactionKind::Expense,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 12).unwrap()
    }

    #[test]
    fn open_prefills_amount_and_today() {
        let draft = PaymentDraft::open(&power_bill(None), today()).unwrap();
        assert_eq!(draft.paid_amount, Decimal::new(8050, 2));
        assert_eq!(draft.payment_date, Some(today()));
        assert_eq!(draft.path(), "/transaction/12/payment");
        assert!(draft.validate().is_empty());
    }

    #[test]
    fn paid_transaction_cannot_be_paid_again() {
        let result = PaymentDraft::open(&power_bill(Some(today())), today());
        assert!(matches!(result, Err(AppError::AlreadyPaid(12))));
    }

    #[test]
    fn zero_amount_and_missing_date_are_rejected() {
        let mut draft = PaymentDraft::open(&power_bill(None), today()).unwrap();
        draft.payment_date = None;
        draft.paid_amount = Decimal::ZERO;
        assert_eq!(
            draft.validate().keys().copied().collect::<Vec<_>>(),
            vec!["paid_amount", "payment_date"]
        );
    }
}
