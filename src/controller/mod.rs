//! Resource sync controller.
//!
//! One controller backs one page. It keeps a local list in sync with a remote
//! collection and mediates single-record edits through a form draft.
//!
//! # Operation Flow
//!
//! - `load_all`: read the collection (and its reference collections), replace the list wholesale
//! - `submit`: validate the draft, create or update depending on the draft mode, then reload
//! - `remove`: ask for confirmation, delete, then reload
//! - `begin_edit` / `cancel` / `update_draft`: local draft changes, no network
//! - `filter`: substring search over the local list, no network
//!
//! # Failure Policy
//!
//! A failed load keeps the previous list (stale but available). A failed write
//! keeps the draft so the user can retry. Both surface an error notice and
//! return the error; nothing is retried.
//!
//! # Concurrency
//!
//! Submit, delete and payment registration share a busy flag: while one is in
//! flight, another is rejected with `AppError::Busy`. Loads are not guarded;
//! when two loads race, whichever resolves last wins.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use crate::error::AppError;
use crate::gateway::{Gateway, item_path};
use crate::models::{
    Account, Category, FieldErrors, ReferenceLists, Resource, Subcategory, filter_items,
};

pub mod draft;
pub mod feedback;
pub mod scope;
pub mod transactions;
pub mod wishlists;

pub use draft::{FormDraft, FormMode};
pub use feedback::{
    AutoConfirm, Confirmer, LogNotifier, Notice, NoticeLevel, Notifier, Prompt, TerminalConfirm,
};
pub use scope::PageScope;
pub use transactions::TransactionPage;
pub use wishlists::WishlistPage;

pub type AccountPage = ResourceController<Account>;
pub type CategoryPage = ResourceController<Category>;
pub type SubcategoryPage = ResourceController<Subcategory>;

/// Result of a user-triggered mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Created,
    Updated,
    Deleted,
    PaymentRegistered,
    BoughtToggled,
    /// The user answered "no"; nothing was sent.
    Declined,
}

/// State owned exclusively by one page.
struct PageState<R: Resource> {
    items: Vec<R>,
    summary: R::Summary,
    references: ReferenceLists,
    draft: FormDraft<R::Fields>,
}

impl<R: Resource> PageState<R> {
    fn new() -> Self {
        Self {
            items: Vec::new(),
            summary: R::Summary::default(),
            references: ReferenceLists::default(),
            draft: FormDraft::new(),
        }
    }

    /// Replace the list and recompute its aggregates in the same step.
    fn replace_items(&mut self, items: Vec<R>) {
        self.summary = R::summarize(&items);
        self.items = items;
    }
}

/// Clears the busy flag when the mutation ends, however it ends.
pub(crate) struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Tracks loads in flight for `is_loading`.
struct LoadGuard<'a>(&'a AtomicUsize);

impl<'a> LoadGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::AcqRel);
        Self(counter)
    }
}

impl Drop for LoadGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

/// Keeps one page's list and draft in sync with its REST collection.
pub struct ResourceController<R: Resource> {
    gateway: Arc<dyn Gateway>,
    notifier: Arc<dyn Notifier>,
    confirmer: Arc<dyn Confirmer>,
    scope: PageScope,
    busy: AtomicBool,
    loads: AtomicUsize,
    state: Mutex<PageState<R>>,
}

impl<R: Resource> ResourceController<R> {
    pub fn new(
        gateway: Arc<dyn Gateway>,
        notifier: Arc<dyn Notifier>,
        confirmer: Arc<dyn Confirmer>,
    ) -> Self {
        Self {
            gateway,
            notifier,
            confirmer,
            scope: PageScope::new(),
            busy: AtomicBool::new(false),
            loads: AtomicUsize::new(0),
            state: Mutex::new(PageState::new()),
        }
    }

    // ============= Loading =============

    /// Read the collection and any reference collections, then replace both wholesale.
    ///
    /// # Errors
    ///
    /// - `Closed`: the page was torn down before the result arrived (nothing changes)
    /// - any gateway error: previous list and references stay as they were
    pub async fn load_all(&self) -> Result<(), AppError> {
        self.refresh(true).await
    }

    /// Re-read only the primary collection (used after every successful mutation).
    pub async fn reload(&self) -> Result<(), AppError> {
        self.refresh(false).await
    }

    async fn refresh(&self, with_references: bool) -> Result<(), AppError> {
        let _loading = LoadGuard::enter(&self.loads);

        let fetched = self
            .scope
            .run(async {
                if with_references {
                    let (references, items) =
                        tokio::try_join!(self.fetch_references(), self.fetch_list())?;
                    Ok::<_, AppError>((Some(references), items))
                } else {
                    Ok::<_, AppError>((None, self.fetch_list().await?))
                }
            })
            .await;

        match fetched {
            Ok((references, items)) => {
                let mut state = self.state.lock().await;
                // Teardown may have happened while waiting for the lock
                self.scope.ensure_open()?;

                if let Some(references) = references {
                    state.references = references;
                }
                tracing::info!(resource = R::LABEL, count = items.len(), "list loaded");
                state.replace_items(items);
                Ok(())
            }
            Err(AppError::Closed) => {
                tracing::debug!(resource = R::LABEL, "load discarded, page closed");
                Err(AppError::Closed)
            }
            Err(e) => {
                self.report_failure("Could not load data", &e);
                Err(e)
            }
        }
    }

    async fn fetch_list(&self) -> Result<Vec<R>, AppError> {
        self.fetch_collection::<R>(R::COLLECTION, true).await
    }

    async fn fetch_references(&self) -> Result<ReferenceLists, AppError> {
        let needs = R::NEEDS;
        if !needs.any() {
            return Ok(ReferenceLists::default());
        }

        let (categories, subcategories, accounts) = tokio::try_join!(
            self.fetch_collection::<Category>(Category::COLLECTION, needs.categories),
            self.fetch_collection::<Subcategory>(Subcategory::COLLECTION, needs.subcategories),
            self.fetch_collection::<Account>(Account::COLLECTION, needs.accounts),
        )?;

        Ok(ReferenceLists {
            categories,
            subcategories,
            accounts,
        })
    }

    /// Fetch and decode a collection; an unneeded one resolves to an empty list.
    async fn fetch_collection<T: DeserializeOwned>(
        &self,
        path: &str,
        needed: bool,
    ) -> Result<Vec<T>, AppError> {
        if !needed {
            return Ok(Vec::new());
        }
        let value = self.gateway.get(path).await?;
        Ok(serde_json::from_value(value)?)
    }

    // ============= Draft =============

    /// Required-field checks for a set of fields. Empty result means valid.
    pub fn validate(fields: &R::Fields) -> FieldErrors {
        R::validate(fields)
    }

    /// Copy a record into the draft for editing. No server-side lock is taken.
    pub async fn begin_edit(&self, item: &R) {
        let mut state = self.state.lock().await;
        state.draft = FormDraft::editing(item.id(), item.fields());
    }

    /// Discard the draft and its errors. No network call.
    pub async fn cancel(&self) {
        self.state.lock().await.draft.reset();
    }

    /// Change draft fields.
    ///
    /// Errors shown from the last submit are dropped for fields that are now valid.
    pub async fn update_draft<F>(&self, change: F)
    where
        F: FnOnce(&mut R::Fields),
    {
        let mut state = self.state.lock().await;
        change(&mut state.draft.fields);
        let remaining = R::validate(&state.draft.fields);
        state.draft.errors.retain(|field, _| remaining.contains_key(field));
    }

    // ============= Mutations =============

    /// Create or update from the draft, depending on its mode.
    ///
    /// # Process
    ///
    /// 1. Validate; any error blocks the request entirely
    /// 2. Ask for confirmation if the resource requires it
    /// 3. POST (creating) or PATCH (editing)
    /// 4. On success: notify, clear the draft unless it changed meanwhile, reload the list
    /// 5. On failure: notify, keep the draft for a retry
    pub async fn submit(&self) -> Result<Outcome, AppError> {
        self.scope.ensure_open()?;
        let _busy = self.begin()?;

        let draft = {
            let mut state = self.state.lock().await;
            let errors = R::validate(&state.draft.fields);
            state.draft.errors = errors.clone();
            if !errors.is_empty() {
                tracing::warn!(resource = R::LABEL, fields = ?errors.keys(), "submit blocked by validation");
                return Err(AppError::Validation(errors));
            }
            state.draft.clone()
        };

        if R::CONFIRM_SUBMIT {
            let text = match draft.mode {
                FormMode::Creating => format!("Create this {}?", R::LABEL.to_lowercase()),
                FormMode::Editing { .. } => format!("Update this {}?", R::LABEL.to_lowercase()),
            };
            if !self.confirmer.confirm(&Prompt::new("Confirm", text)).await {
                tracing::info!(resource = R::LABEL, "submit declined");
                return Ok(Outcome::Declined);
            }
        }

        let result = match draft.mode {
            FormMode::Creating => {
                let body = serde_json::to_value(R::create_body(&draft.fields))?;
                self.gateway
                    .post(R::COLLECTION, body)
                    .await
                    .map(|_| Outcome::Created)
            }
            FormMode::Editing { id } => {
                let body = serde_json::to_value(R::update_body(&draft.fields))?;
                self.gateway
                    .patch(&item_path(R::COLLECTION, id), body)
                    .await
                    .map(|_| Outcome::Updated)
            }
        };

        self.finish(result, |current| {
            // Edits started while the request was in flight are kept
            if current.mode == draft.mode && current.fields == draft.fields {
                current.reset();
            }
        })
        .await
    }

    /// Delete a record after the user confirms.
    ///
    /// Declining sends nothing and leaves the list unchanged.
    pub async fn remove(&self, id: i64) -> Result<Outcome, AppError> {
        self.scope.ensure_open()?;
        let _busy = self.begin()?;

        let prompt = Prompt::new(
            "Confirm",
            format!("Delete this {}?", R::LABEL.to_lowercase()),
        );
        if !self.confirmer.confirm(&prompt).await {
            tracing::info!(resource = R::LABEL, id, "delete declined");
            return Ok(Outcome::Declined);
        }

        let result = self
            .gateway
            .delete(&item_path(R::COLLECTION, id))
            .await
            .map(|_| Outcome::Deleted);

        self.finish(result, |draft| {
            // The record being edited no longer exists
            if draft.mode == (FormMode::Editing { id }) {
                draft.reset();
            }
        })
        .await
    }

    /// Mark the page busy for the duration of a mutation.
    pub(crate) fn begin(&self) -> Result<BusyGuard<'_>, AppError> {
        if self.busy.swap(true, Ordering::AcqRel) {
            tracing::warn!(resource = R::LABEL, "operation rejected, page busy");
            return Err(AppError::Busy);
        }
        Ok(BusyGuard(&self.busy))
    }

    /// Settle a mutation: notify, apply `on_success` to the draft, reload.
    ///
    /// A successful write whose follow-up reload fails still reports success;
    /// the reload failure is notified on its own.
    pub(crate) async fn finish<F>(
        &self,
        result: Result<Outcome, AppError>,
        on_success: F,
    ) -> Result<Outcome, AppError>
    where
        F: FnOnce(&mut FormDraft<R::Fields>),
    {
        if self.scope.is_closed() {
            tracing::debug!(resource = R::LABEL, "mutation result discarded, page closed");
            return Err(AppError::Closed);
        }

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => {
                self.report_failure("Could not save changes", &e);
                return Err(e);
            }
        };

        on_success(&mut self.state.lock().await.draft);
        tracing::info!(resource = R::LABEL, ?outcome, "mutation complete");
        self.notifier.notify(success_notice(R::LABEL, outcome));

        if let Err(e) = self.reload().await {
            tracing::warn!(resource = R::LABEL, "reload after mutation failed: {}", e);
        }
        Ok(outcome)
    }

    pub(crate) fn gateway(&self) -> &Arc<dyn Gateway> {
        &self.gateway
    }

    pub(crate) fn report_failure(&self, title: &str, error: &AppError) {
        tracing::error!(resource = R::LABEL, "{}: {}", title, error);
        self.notifier.notify(Notice::error(title, error.user_message()));
    }

    // ============= Views =============

    /// Records whose display texts contain `term`, case-insensitively.
    pub async fn filter(&self, term: &str) -> Vec<R> {
        let state = self.state.lock().await;
        filter_items(&state.items, &state.references, term)
    }

    pub async fn items(&self) -> Vec<R> {
        self.state.lock().await.items.clone()
    }

    pub async fn summary(&self) -> R::Summary {
        self.state.lock().await.summary.clone()
    }

    pub async fn references(&self) -> ReferenceLists {
        self.state.lock().await.references.clone()
    }

    pub async fn draft(&self) -> FormDraft<R::Fields> {
        self.state.lock().await.draft.clone()
    }

    /// True while a submit, delete or payment is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn is_loading(&self) -> bool {
        self.loads.load(Ordering::Acquire) > 0
    }

    /// Lifecycle scope of this page.
    pub fn scope(&self) -> &PageScope {
        &self.scope
    }

    /// Tear the page down; pending loads are aborted and late results dropped.
    pub fn close(&self) {
        tracing::debug!(resource = R::LABEL, "page closed");
        self.scope.close();
    }
}

fn success_notice(label: &str, outcome: Outcome) -> Notice {
    match outcome {
        Outcome::Created => Notice::success("Saved", format!("{} created", label)),
        Outcome::Updated => Notice::success("Saved", format!("{} updated", label)),
        Outcome::Deleted => Notice::success("Deleted", format!("{} deleted", label)),
        Outcome::PaymentRegistered => Notice::success("Paid", "Payment registered"),
        Outcome::BoughtToggled => Notice::success("Saved", format!("{} updated", label)),
        Outcome::Declined => Notice::success("Cancelled", "Nothing was changed"),
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{RecordingNotifier, ScriptedConfirm};
    use super::*;
    use crate::gateway::{Call, MemoryGateway, Verb};
    use crate::models::{AccountFields, CategoryFields, SubcategoryFields};
    use rust_decimal::Decimal;
    use serde_json::json;

    struct Harness<R: Resource> {
        gateway: MemoryGateway,
        notifier: Arc<RecordingNotifier>,
        confirm: Arc<ScriptedConfirm>,
        page: Arc<ResourceController<R>>,
    }

    fn harness<R: Resource>(gateway: MemoryGateway, answers: &[bool]) -> Harness<R> {
        let notifier = Arc::new(RecordingNotifier::default());
        let confirm = Arc::new(ScriptedConfirm::new(answers));
        let page = Arc::new(ResourceController::<R>::new(
            Arc::new(gateway.clone()),
            notifier.clone(),
            confirm.clone(),
        ));
        Harness {
            gateway,
            notifier,
            confirm,
            page,
        }
    }

    async fn seeded_accounts() -> MemoryGateway {
        let gateway = MemoryGateway::recording();
        gateway
            .seed(
                "/bank-account",
                vec![
                    json!({"id": 1, "description": "Rent", "balance": 100}),
                    json!({"id": 2, "description": "Wages", "balance": 200}),
                ],
            )
            .await;
        gateway
    }

    #[tokio::test]
    async fn load_replaces_list() {
        let h = harness::<Account>(seeded_accounts().await, &[]);
        h.page.load_all().await.unwrap();

        let items = h.page.items().await;
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].description, "Wages");
        assert_eq!(h.gateway.calls().await, vec![Call::new(Verb::Get, "/bank-account")]);
    }

    #[tokio::test]
    async fn failed_load_keeps_previous_list() {
        let h = harness::<Account>(seeded_accounts().await, &[]);
        h.page.load_all().await.unwrap();

        h.gateway.fail_next(Verb::Get).await;
        let result = h.page.load_all().await;

        assert!(matches!(result, Err(AppError::Status { .. })));
        assert_eq!(h.page.items().await.len(), 2);
        assert_eq!(h.notifier.levels(), vec![NoticeLevel::Error]);
        assert!(!h.page.is_loading());
    }

    #[tokio::test]
    async fn filter_searches_local_list_only() {
        let h = harness::<Account>(seeded_accounts().await, &[]);
        h.page.load_all().await.unwrap();

        let found = h.page.filter("wag").await;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 2);
        assert_eq!(h.page.filter("").await, h.page.items().await);
        assert_eq!(h.gateway.calls().await.len(), 1);
    }

    #[tokio::test]
    async fn invalid_draft_blocks_the_request() {
        let h = harness::<Category>(MemoryGateway::recording(), &[]);
        h.page
            .update_draft(|f| f.description = "x".to_string())
            .await;

        let result = h.page.submit().await;

        match result {
            Err(AppError::Validation(errors)) => {
                assert_eq!(errors.keys().copied().collect::<Vec<_>>(), vec!["name"]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(h.gateway.calls().await.is_empty());
        assert!(h.page.draft().await.errors.contains_key("name"));
        assert!(!h.page.is_busy());
    }

    #[tokio::test]
    async fn fixing_a_field_clears_its_error() {
        let h = harness::<Subcategory>(MemoryGateway::recording(), &[]);
        let _ = h.page.submit().await;
        assert_eq!(h.page.draft().await.errors.len(), 3);

        h.page.update_draft(|f| f.name = "Fuel".to_string()).await;

        let errors = h.page.draft().await.errors;
        assert!(!errors.contains_key("name"));
        assert!(errors.contains_key("description"));
    }

    #[tokio::test]
    async fn creating_draft_posts_and_reloads_once() {
        let h = harness::<Account>(seeded_accounts().await, &[]);
        h.page.load_all().await.unwrap();
        h.page
            .update_draft(|f| {
                *f = AccountFields {
                    description: "Savings".to_string(),
                    balance: Decimal::from(50),
                }
            })
            .await;

        let outcome = h.page.submit().await.unwrap();

        assert_eq!(outcome, Outcome::Created);
        assert_eq!(
            h.gateway.calls().await,
            vec![
                Call::new(Verb::Get, "/bank-account"),
                Call::new(Verb::Post, "/bank-account"),
                Call::new(Verb::Get, "/bank-account"),
            ]
        );
        assert_eq!(h.page.items().await.len(), 3);
        assert_eq!(h.page.draft().await, FormDraft::new());
        assert_eq!(h.notifier.levels(), vec![NoticeLevel::Success]);
    }

    #[tokio::test]
    async fn editing_draft_patches_the_record() {
        let h = harness::<Account>(seeded_accounts().await, &[]);
        h.page.load_all().await.unwrap();
        let rent = h.page.items().await[0].clone();

        h.page.begin_edit(&rent).await;
        assert_eq!(h.page.draft().await.mode, FormMode::Editing { id: 1 });
        h.page
            .update_draft(|f| f.description = "Rent & bills".to_string())
            .await;

        assert_eq!(h.page.submit().await.unwrap(), Outcome::Updated);
        assert_eq!(h.gateway.count(Verb::Patch, "/bank-account/1").await, 1);
        assert_eq!(h.gateway.count(Verb::Post, "/bank-account").await, 0);
        assert_eq!(h.page.items().await[0].description, "Rent & bills");
    }

    #[tokio::test]
    async fn failed_submit_keeps_draft() {
        let h = harness::<Category>(MemoryGateway::recording(), &[]);
        let fields = CategoryFields {
            name: "Travel".to_string(),
            description: "Trips".to_string(),
        };
        h.page.update_draft(|f| *f = fields.clone()).await;
        h.gateway.fail_next(Verb::Post).await;

        let result = h.page.submit().await;

        assert!(matches!(result, Err(AppError::Status { .. })));
        assert_eq!(h.page.draft().await.fields, fields);
        assert_eq!(h.notifier.levels(), vec![NoticeLevel::Error]);
        // No reload after a failed write
        assert_eq!(h.gateway.count(Verb::Get, "/category").await, 0);
    }

    #[tokio::test]
    async fn declined_delete_sends_nothing() {
        let h = harness::<Account>(seeded_accounts().await, &[false]);
        h.page.load_all().await.unwrap();

        let outcome = h.page.remove(1).await.unwrap();

        assert_eq!(outcome, Outcome::Declined);
        assert_eq!(h.gateway.calls().await.len(), 1);
        assert_eq!(h.page.items().await.len(), 2);
        assert_eq!(h.confirm.asked().len(), 1);
    }

    #[tokio::test]
    async fn confirmed_delete_reloads_and_resets_matching_draft() {
        let h = harness::<Account>(seeded_accounts().await, &[true]);
        h.page.load_all().await.unwrap();
        let wages = h.page.items().await[1].clone();
        h.page.begin_edit(&wages).await;

        assert_eq!(h.page.remove(2).await.unwrap(), Outcome::Deleted);

        assert_eq!(h.gateway.count(Verb::Delete, "/bank-account/2").await, 1);
        assert_eq!(h.page.items().await.len(), 1);
        assert_eq!(h.page.draft().await.mode, FormMode::Creating);
    }

    #[tokio::test]
    async fn failed_delete_leaves_list_unchanged() {
        let h = harness::<Account>(seeded_accounts().await, &[true]);
        h.page.load_all().await.unwrap();
        h.gateway.fail_next(Verb::Delete).await;

        assert!(h.page.remove(1).await.is_err());
        assert_eq!(h.page.items().await.len(), 2);
        assert_eq!(h.gateway.count(Verb::Get, "/bank-account").await, 1);
    }

    #[tokio::test]
    async fn subcategory_submit_asks_first() {
        let gateway = MemoryGateway::recording();
        gateway
            .seed("/category", vec![json!({"id": 3, "name": "Car", "description": ""})])
            .await;
        let h = harness::<Subcategory>(gateway, &[false]);
        h.page.load_all().await.unwrap();
        h.page
            .update_draft(|f| {
                *f = SubcategoryFields {
                    name: "Fuel".to_string(),
                    description: "Gas station".to_string(),
                    category_id: Some(3),
                }
            })
            .await;

        assert_eq!(h.page.submit().await.unwrap(), Outcome::Declined);
        assert_eq!(h.gateway.count(Verb::Post, "/subcategory").await, 0);
        assert_eq!(h.page.draft().await.fields.name, "Fuel");
        assert_eq!(h.confirm.asked()[0].text, "Create this subcategory?");
    }

    #[tokio::test]
    async fn load_all_fetches_reference_lists() {
        let gateway = MemoryGateway::recording();
        gateway
            .seed("/category", vec![json!({"id": 3, "name": "Car", "description": ""})])
            .await;
        gateway
            .seed(
                "/subcategory",
                vec![json!({"id": 1, "name": "Fuel", "description": "", "categoryId": 3})],
            )
            .await;
        let h = harness::<Subcategory>(gateway, &[]);

        h.page.load_all().await.unwrap();

        assert_eq!(h.page.references().await.category_name(3), "Car");
        assert_eq!(h.page.filter("car").await.len(), 1);
        assert_eq!(h.gateway.count(Verb::Get, "/bank-account").await, 0);

        // A plain reload leaves references alone
        h.page.reload().await.unwrap();
        assert_eq!(h.gateway.count(Verb::Get, "/category").await, 1);
    }

    #[tokio::test]
    async fn second_mutation_while_busy_is_rejected() {
        let gateway = MemoryGateway::gated();
        let h = harness::<Category>(gateway, &[true, true]);
        h.page
            .update_draft(|f| f.name = "Gifts".to_string())
            .await;

        let first = {
            let page = h.page.clone();
            tokio::spawn(async move { page.submit().await })
        };
        while !h.page.is_busy() {
            tokio::task::yield_now().await;
        }

        assert!(matches!(h.page.remove(1).await, Err(AppError::Busy)));
        assert!(matches!(h.page.submit().await, Err(AppError::Busy)));

        // POST, then the reload
        h.gateway.release(2);
        assert_eq!(first.await.unwrap().unwrap(), Outcome::Created);
        assert!(!h.page.is_busy());
        assert_eq!(h.gateway.count(Verb::Delete, "/category/1").await, 0);
    }

    #[tokio::test]
    async fn edit_started_during_submit_survives_success() {
        let gateway = MemoryGateway::gated();
        let h = harness::<Category>(gateway, &[]);
        h.page.update_draft(|f| f.name = "Gifts".to_string()).await;

        let submit = {
            let page = h.page.clone();
            tokio::spawn(async move { page.submit().await })
        };
        while !h.page.is_busy() {
            tokio::task::yield_now().await;
        }
        let food = Category {
            id: 7,
            name: "Food".to_string(),
            description: String::new(),
        };
        h.page.begin_edit(&food).await;

        h.gateway.release(2);
        assert_eq!(submit.await.unwrap().unwrap(), Outcome::Created);

        let draft = h.page.draft().await;
        assert_eq!(draft.mode, FormMode::Editing { id: 7 });
        assert_eq!(draft.fields.name, "Food");
    }

    #[tokio::test]
    async fn load_resolving_after_close_is_discarded() {
        let gateway = MemoryGateway::gated();
        gateway
            .seed("/category", vec![json!({"id": 1, "name": "Food", "description": ""})])
            .await;
        let h = harness::<Category>(gateway, &[]);

        let load = {
            let page = h.page.clone();
            tokio::spawn(async move { page.load_all().await })
        };
        while h.gateway.calls().await.is_empty() {
            tokio::task::yield_now().await;
        }

        h.page.close();
        h.gateway.release(1);

        assert!(matches!(load.await.unwrap(), Err(AppError::Closed)));
        assert!(h.page.items().await.is_empty());
        assert!(h.notifier.notices().is_empty());
        assert!(matches!(h.page.submit().await, Err(AppError::Closed)));
    }

    #[tokio::test]
    async fn cancel_resets_draft_without_network() {
        let h = harness::<Account>(seeded_accounts().await, &[]);
        h.page.load_all().await.unwrap();
        let rent = h.page.items().await[0].clone();
        h.page.begin_edit(&rent).await;

        h.page.cancel().await;

        assert_eq!(h.page.draft().await, FormDraft::new());
        assert_eq!(h.gateway.calls().await.len(), 1);
    }
}
