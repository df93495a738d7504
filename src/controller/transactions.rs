//! Transaction page: the generic controller plus payment registration,
//! the category-dependent subcategory selector and dashboard figures.

use std::ops::Deref;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tokio::sync::Mutex;

use crate::controller::{Confirmer, Notice, Notifier, Outcome, ResourceController};
use crate::error::AppError;
use crate::gateway::Gateway;
use crate::models::{Subcategory, Transaction};
use crate::services::aggregate::{self, Totals};
use crate::services::health::{self, FinancialSnapshot, HealthReport};
use crate::services::payment::PaymentDraft;

pub struct TransactionPage {
    controller: ResourceController<Transaction>,
    notifier: Arc<dyn Notifier>,
    payment: Mutex<Option<PaymentDraft>>,
}

impl Deref for TransactionPage {
    type Target = ResourceController<Transaction>;

    fn deref(&self) -> &Self::Target {
        &self.controller
    }
}

impl TransactionPage {
    pub fn new(
        gateway: Arc<dyn Gateway>,
        notifier: Arc<dyn Notifier>,
        confirmer: Arc<dyn Confirmer>,
    ) -> Self {
        Self {
            controller: ResourceController::new(gateway, notifier.clone(), confirmer),
            notifier,
            payment: Mutex::new(None),
        }
    }

    // ============= Payment =============

    /// Open the payment context on an unpaid transaction.
    ///
    /// Replaces any payment context already open.
    ///
    /// # Errors
    ///
    /// `AlreadyPaid` when the transaction has a payment date.
    pub async fn open_payment(
        &self,
        transaction: &Transaction,
        today: NaiveDate,
    ) -> Result<PaymentDraft, AppError> {
        let draft = match PaymentDraft::open(transaction, today) {
            Ok(draft) => draft,
            Err(e) => {
                tracing::warn!(id = transaction.id, "{}", e);
                self.notifier
                    .notify(Notice::error("Payment", e.user_message()));
                return Err(e);
            }
        };

        *self.payment.lock().await = Some(draft.clone());
        Ok(draft)
    }

    pub async fn payment(&self) -> Option<PaymentDraft> {
        self.payment.lock().await.clone()
    }

    pub async fn update_payment<F>(&self, change: F) -> Result<(), AppError>
    where
        F: FnOnce(&mut PaymentDraft),
    {
        let mut payment = self.payment.lock().await;
        let draft = payment.as_mut().ok_or(AppError::NoPaymentOpen)?;
        change(draft);
        Ok(())
    }

    /// Dismiss the payment context without sending anything.
    pub async fn close_payment(&self) {
        self.payment.lock().await.take();
    }

    /// Send the payment fields, then reload the whole list.
    ///
    /// The transaction shows as paid only once the reload returns it with a
    /// payment date. On failure the payment context stays open for a retry.
    pub async fn confirm_payment(&self) -> Result<Outcome, AppError> {
        self.scope().ensure_open()?;
        let _busy = self.controller.begin()?;

        let draft = self
            .payment
            .lock()
            .await
            .clone()
            .ok_or(AppError::NoPaymentOpen)?;

        let errors = draft.validate();
        if !errors.is_empty() {
            tracing::warn!(id = draft.transaction_id, fields = ?errors.keys(), "payment blocked by validation");
            return Err(AppError::Validation(errors));
        }

        tracing::debug!(id = draft.transaction_id, paid_amount = %draft.paid_amount, "registering payment");
        let body = serde_json::to_value(draft.body())?;
        let result = self
            .controller
            .gateway()
            .patch(&draft.path(), body)
            .await
            .map(|_| Outcome::PaymentRegistered);

        let outcome = self.controller.finish(result, |_| {}).await?;

        let mut payment = self.payment.lock().await;
        if payment.as_ref().map(|open| open.transaction_id) == Some(draft.transaction_id) {
            payment.take();
        }
        Ok(outcome)
    }

    // ============= Selectors =============

    /// Set the draft's category, dropping a subcategory that belongs elsewhere.
    pub async fn select_category(&self, category_id: Option<i64>) {
        let references = self.references().await;
        self.update_draft(|fields| {
            fields.category_id = category_id;
            let still_valid = match (category_id, fields.subcategory_id) {
                (Some(category), Some(sub)) => references
                    .subcategories_of(category)
                    .iter()
                    .any(|s| s.id == sub),
                _ => false,
            };
            if !still_valid {
                fields.subcategory_id = None;
            }
        })
        .await;
    }

    /// Subcategories offered for the draft's current category.
    pub async fn subcategory_options(&self) -> Vec<Subcategory> {
        let category = self.draft().await.fields.category_id;
        let references = self.references().await;
        match category {
            Some(id) => references.subcategories_of(id).into_iter().cloned().collect(),
            None => Vec::new(),
        }
    }

    // ============= Dashboard =============

    pub async fn totals(&self) -> Totals {
        self.summary().await
    }

    /// Expense totals per category name, largest first.
    pub async fn expenses_by_category(&self) -> Vec<(String, Decimal)> {
        let items = self.items().await;
        let references = self.references().await;
        aggregate::expenses_by_category(&items, &references)
    }

    /// Health report computed from the loaded transactions.
    pub async fn health(&self) -> HealthReport {
        let items = self.items().await;
        let totals = aggregate::totals(&items);
        let snapshot = FinancialSnapshot::from_totals(&totals, aggregate::outstanding_expenses(&items));
        health::report(&snapshot)
    }
}
