//! Query/mutation coordinator for the recipe catalog.
//!
//! [`RecipeCatalog`] owns the list/search/pagination state one consuming
//! view renders from. It decides whether a reload hits the list or the
//! search endpoint, serializes what the view may observe through a single
//! snapshot, and guarantees that out of any set of concurrently running
//! fetches only the most recently initiated one commits its result.
//!
//! Mutations (`create`/`update`/`delete`) are not applied locally: a
//! successful mutation triggers one full [`RecipeCatalog::reload`] so the
//! visible page always reflects server state. A failed mutation leaves the
//! previous list untouched and only records the error.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::client::{ApiError, Page, Recipe, RecipeApi, RecipeDraft, RecipePatch};
use crate::debounce::Debouncer;
use crate::notify::{report_api_error, Notifier};

const LOAD_FAILED: &str = "Failed to load recipes";
const SEARCH_FAILED: &str = "Failed to search recipes";
const CREATE_FAILED: &str = "Failed to create recipe";
const UPDATE_FAILED: &str = "Failed to update recipe";
const DELETE_FAILED: &str = "Failed to delete recipe";

/// Snapshot of the coordinator state, cloned out for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogState {
    /// Records of the currently visible page
    pub recipes: Vec<Recipe>,
    /// 1-based page number the next fetch will request
    pub page: u32,
    /// Records per page
    pub page_size: u32,
    /// Active search term; empty means plain listing
    pub search: String,
    /// Total records on the server for the current term
    pub total: u64,
    /// Total pages at the current page size
    pub total_pages: u32,
    /// True from fetch start until that fetch (or its superseder) commits
    pub loading: bool,
    /// Fixed per-operation message of the last failure, cleared on success
    pub last_error: Option<String>,
}

/// Initial state and timing knobs for a [`RecipeCatalog`].
#[derive(Debug, Clone)]
pub struct CatalogOptions {
    pub initial_page: u32,
    pub page_size: u32,
    pub initial_search: String,
    /// Keystroke debounce for [`RecipeCatalog::debounce_search`]
    pub search_delay: Duration,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            initial_page: 1,
            page_size: 10,
            initial_search: String::new(),
            search_delay: Duration::from_millis(500),
        }
    }
}

/// Coordinates list/search/pagination state against a [`RecipeApi`].
///
/// One instance per consuming view. All methods take `&self`; consumers
/// share the coordinator behind an [`Arc`] and read state via
/// [`snapshot`](Self::snapshot). Remote failures never propagate out of the
/// coordinator: callers get `None`/`false` plus a recorded error, and the
/// underlying failure is routed to the injected [`Notifier`].
pub struct RecipeCatalog {
    api: Arc<dyn RecipeApi>,
    notifier: Arc<dyn Notifier>,
    state: Mutex<CatalogState>,
    /// Monotonic fetch tag; only the latest claim may commit.
    generation: AtomicU64,
    /// Set by [`close`](Self::close); blocks all further commits.
    closed: AtomicBool,
    debouncer: Debouncer,
}

impl RecipeCatalog {
    pub fn new(api: Arc<dyn RecipeApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self::with_options(api, notifier, CatalogOptions::default())
    }

    pub fn with_options(
        api: Arc<dyn RecipeApi>,
        notifier: Arc<dyn Notifier>,
        options: CatalogOptions,
    ) -> Self {
        Self {
            api,
            notifier,
            state: Mutex::new(CatalogState {
                recipes: Vec::new(),
                page: options.initial_page,
                page_size: options.page_size,
                search: options.initial_search,
                total: 0,
                total_pages: 1,
                loading: false,
                last_error: None,
            }),
            generation: AtomicU64::new(0),
            closed: AtomicBool::new(false),
            debouncer: Debouncer::new(options.search_delay),
        }
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> CatalogState {
        self.lock_state().clone()
    }

    /// Replace the search term, reset to page 1 and reload.
    pub async fn set_search_term(&self, term: impl Into<String>) {
        {
            let mut state = self.lock_state();
            state.search = term.into();
            state.page = 1;
        }
        self.reload().await;
    }

    /// Jump to page `n` and reload.
    ///
    /// No clamping happens here; callers are expected to stay within
    /// `[1, total_pages]`, and an out-of-range page fetches whatever the
    /// server returns for it.
    pub async fn set_page_number(&self, n: u32) {
        self.lock_state().page = n;
        self.reload().await;
    }

    /// Change the page size (the page number is kept) and reload.
    pub async fn set_page_size(&self, n: u32) {
        self.lock_state().page_size = n;
        self.reload().await;
    }

    /// Debounced [`set_search_term`](Self::set_search_term): the fetch runs
    /// after the configured delay, and a newer call cancels a pending one.
    ///
    /// Takes an owned handle because the scheduled fetch may outlive the
    /// caller's borrow; pass `catalog.clone()`.
    pub fn debounce_search(self: Arc<Self>, term: impl Into<String>) {
        let term = term.into();
        let catalog = Arc::clone(&self);
        self.debouncer.call(move || async move {
            catalog.set_search_term(term).await;
        });
    }

    /// Fetch the current page with the current term and page size.
    ///
    /// A trimmed non-empty term goes to the search endpoint, anything else
    /// to the plain listing. Safe to call concurrently: every call issues
    /// its own fetch, but only the most recently initiated one commits;
    /// superseded fetches are discarded without surfacing an error.
    pub async fn reload(&self) {
        if self.is_closed() {
            return;
        }

        let (page, limit, term, generation) = {
            let mut state = self.lock_state();
            state.loading = true;
            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            (
                state.page,
                state.page_size,
                state.search.trim().to_string(),
                generation,
            )
        };

        let searching = !term.is_empty();
        let result = if searching {
            self.api.search(&term, page, limit).await
        } else {
            self.api.list(page, limit).await
        };

        self.commit(generation, searching, result);
    }

    /// Create a record from `draft` (blank ingredient lines are dropped
    /// first), then reload so the visible page reflects server state.
    /// Returns the created record, or `None` with the error recorded.
    pub async fn create(&self, draft: RecipeDraft) -> Option<Recipe> {
        if self.is_closed() {
            return None;
        }
        let draft = draft.normalized();
        match self.api.create(&draft).await {
            Ok(recipe) => {
                self.reload().await;
                Some(recipe)
            }
            Err(err) => {
                self.fail(CREATE_FAILED, &err);
                None
            }
        }
    }

    /// Apply a partial update, then reload. Returns the updated record, or
    /// `None` with the error recorded and the previous list state intact.
    pub async fn update(&self, id: &str, patch: RecipePatch) -> Option<Recipe> {
        if self.is_closed() {
            return None;
        }
        let patch = patch.normalized();
        match self.api.update(id, &patch).await {
            Ok(recipe) => {
                self.reload().await;
                Some(recipe)
            }
            Err(err) => {
                self.fail(UPDATE_FAILED, &err);
                None
            }
        }
    }

    /// Delete a record, then reload. Returns whether the delete succeeded;
    /// on failure the previous list state is left intact.
    pub async fn delete(&self, id: &str) -> bool {
        if self.is_closed() {
            return false;
        }
        match self.api.delete(id).await {
            Ok(reply) => {
                tracing::debug!(id, message = %reply.message, "recipe deleted");
                self.reload().await;
                true
            }
            Err(err) => {
                self.fail(DELETE_FAILED, &err);
                false
            }
        }
    }

    /// Fetch a single record on demand.
    ///
    /// Pagination state and `last_error` are untouched; a failure is
    /// reported through the notifier only, and yields `None`.
    pub async fn get_by_id(&self, id: &str) -> Option<Recipe> {
        match self.api.get(id).await {
            Ok(recipe) => Some(recipe),
            Err(err) => {
                report_api_error(self.notifier.as_ref(), &err);
                None
            }
        }
    }

    /// Tear down: cancel any pending debounced search and prevent every
    /// in-flight fetch from committing. The last committed snapshot stays
    /// readable.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
        self.debouncer.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn commit(&self, generation: u64, searching: bool, result: Result<Page, ApiError>) {
        if self.is_closed() {
            return;
        }
        // The notifier is a foreign callback; report only after the state
        // lock is released.
        let mut report = None;
        {
            let mut state = self.lock_state();
            if self.generation.load(Ordering::SeqCst) != generation {
                // A newer fetch owns the state now; drop this result silently.
                return;
            }
            match result {
                Ok(page) => {
                    state.recipes = page.results;
                    state.total = page.total;
                    state.total_pages = page.total_pages;
                    state.last_error = None;
                }
                Err(err) => {
                    state.last_error =
                        Some(if searching { SEARCH_FAILED } else { LOAD_FAILED }.to_string());
                    report = Some(err);
                }
            }
            state.loading = false;
        }
        if let Some(err) = report {
            report_api_error(self.notifier.as_ref(), &err);
        }
    }

    fn fail(&self, message: &str, err: &ApiError) {
        if !self.is_closed() {
            self.lock_state().last_error = Some(message.to_string());
        }
        report_api_error(self.notifier.as_ref(), err);
    }

    fn lock_state(&self) -> MutexGuard<'_, CatalogState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
