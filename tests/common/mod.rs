//! Shared test fixtures: a scripted in-memory implementation of the
//! transport trait, plus a recording notification sink.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use recetario::client::{
    ApiError, Deleted, ErrorBody, Page, Recipe, RecipeApi, RecipeDraft, RecipePatch,
};
use recetario::notify::{Notifier, Severity};
use reqwest::{Method, StatusCode};

/// One recorded call against the mock transport.
#[derive(Debug, Clone, PartialEq)]
#[allow(dead_code)]
pub enum Call {
    List { page: u32, limit: u32 },
    Search { query: String, page: u32, limit: u32 },
    Get { id: String },
    Create { draft: RecipeDraft },
    Update { id: String, patch: RecipePatch },
    Delete { id: String },
}

/// In-memory stand-in for the catalog service.
///
/// Keeps a record store that list/search/create/update/delete operate on,
/// so reload-after-mutation tests observe real server-state changes.
/// Failures are injected per operation, and list/search calls can be given
/// artificial latency (consumed in call order) for ordering tests.
#[derive(Default)]
pub struct MockApi {
    store: Mutex<Vec<Recipe>>,
    calls: Mutex<Vec<Call>>,
    delays: Mutex<VecDeque<Duration>>,
    failures: Mutex<HashMap<&'static str, ApiError>>,
    next_id: AtomicU64,
}

#[allow(dead_code)]
impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed `n` recipes titled "Recipe 1" .. "Recipe n".
    pub fn with_recipes(n: usize) -> Self {
        let api = Self::new();
        for _ in 0..n {
            let id = api.next_id.fetch_add(1, Ordering::SeqCst) + 1;
            api.store.lock().unwrap().push(sample_recipe(
                &format!("r{}", id),
                &format!("Recipe {}", id),
            ));
        }
        api
    }

    pub fn seed(&self, recipe: Recipe) {
        self.store.lock().unwrap().push(recipe);
    }

    pub fn titles(&self) -> Vec<String> {
        self.store
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.title.clone())
            .collect()
    }

    /// Make every subsequent `op` call fail with `err`.
    pub fn fail(&self, op: &'static str, err: ApiError) {
        self.failures.lock().unwrap().insert(op, err);
    }

    /// Let `op` succeed again.
    pub fn clear_fail(&self, op: &'static str) {
        self.failures.lock().unwrap().remove(op);
    }

    /// Queue an artificial latency for the next list/search call.
    pub fn push_delay(&self, delay: Duration) {
        self.delays.lock().unwrap().push_back(delay);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn fetch_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::List { .. } | Call::Search { .. }))
            .count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn injected_failure(&self, op: &'static str) -> Option<ApiError> {
        self.failures.lock().unwrap().get(op).cloned()
    }

    async fn next_delay(&self) {
        let delay = self.delays.lock().unwrap().pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn paginate(&self, items: Vec<Recipe>, page: u32, limit: u32) -> Page {
        let total = items.len() as u64;
        let total_pages = (total.div_ceil(limit.max(1) as u64) as u32).max(1);
        let start = (page.saturating_sub(1) as usize) * limit as usize;
        let results = items
            .into_iter()
            .skip(start)
            .take(limit as usize)
            .collect();
        Page {
            total,
            page,
            total_pages,
            results,
        }
    }
}

#[async_trait]
impl RecipeApi for MockApi {
    async fn list(&self, page: u32, limit: u32) -> Result<Page, ApiError> {
        self.record(Call::List { page, limit });
        self.next_delay().await;
        if let Some(err) = self.injected_failure("list") {
            return Err(err);
        }
        let items = self.store.lock().unwrap().clone();
        Ok(self.paginate(items, page, limit))
    }

    async fn search(&self, query: &str, page: u32, limit: u32) -> Result<Page, ApiError> {
        self.record(Call::Search {
            query: query.to_string(),
            page,
            limit,
        });
        self.next_delay().await;
        if let Some(err) = self.injected_failure("search") {
            return Err(err);
        }
        let needle = query.to_lowercase();
        let items: Vec<Recipe> = self
            .store
            .lock()
            .unwrap()
            .iter()
            .filter(|r| {
                r.title.to_lowercase().contains(&needle)
                    || r.description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
                    || r.ingredients
                        .iter()
                        .any(|i| i.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect();
        Ok(self.paginate(items, page, limit))
    }

    async fn get(&self, id: &str) -> Result<Recipe, ApiError> {
        self.record(Call::Get { id: id.to_string() });
        if let Some(err) = self.injected_failure("get") {
            return Err(err);
        }
        self.store
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| not_found(Method::GET, id))
    }

    async fn create(&self, draft: &RecipeDraft) -> Result<Recipe, ApiError> {
        self.record(Call::Create {
            draft: draft.clone(),
        });
        if let Some(err) = self.injected_failure("create") {
            return Err(err);
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let recipe = Recipe {
            id: format!("r{}", id),
            title: draft.title.clone(),
            description: draft.description.clone(),
            ingredients: draft.ingredients.clone(),
            instructions: draft.instructions.clone(),
            created: None,
            updated: None,
        };
        self.store.lock().unwrap().push(recipe.clone());
        Ok(recipe)
    }

    async fn update(&self, id: &str, patch: &RecipePatch) -> Result<Recipe, ApiError> {
        self.record(Call::Update {
            id: id.to_string(),
            patch: patch.clone(),
        });
        if let Some(err) = self.injected_failure("update") {
            return Err(err);
        }
        let mut store = self.store.lock().unwrap();
        let recipe = store
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| not_found(Method::PUT, id))?;
        if let Some(title) = &patch.title {
            recipe.title = title.clone();
        }
        if let Some(description) = &patch.description {
            recipe.description = Some(description.clone());
        }
        if let Some(ingredients) = &patch.ingredients {
            recipe.ingredients = ingredients.clone();
        }
        if let Some(instructions) = &patch.instructions {
            recipe.instructions = Some(instructions.clone());
        }
        Ok(recipe.clone())
    }

    async fn delete(&self, id: &str) -> Result<Deleted, ApiError> {
        self.record(Call::Delete { id: id.to_string() });
        if let Some(err) = self.injected_failure("delete") {
            return Err(err);
        }
        let mut store = self.store.lock().unwrap();
        let before = store.len();
        store.retain(|r| r.id != id);
        if store.len() == before {
            return Err(not_found(Method::DELETE, id));
        }
        Ok(Deleted {
            message: "Recipe deleted".to_string(),
        })
    }
}

/// Notification sink that records every notification it receives.
#[derive(Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<(String, String, Severity)>>,
}

#[allow(dead_code)]
impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<(String, String, Severity)> {
        self.events.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, title: &str, description: &str, severity: Severity) {
        self.events
            .lock()
            .unwrap()
            .push((title.to_string(), description.to_string(), severity));
    }
}

#[allow(dead_code)]
pub fn sample_recipe(id: &str, title: &str) -> Recipe {
    Recipe {
        id: id.to_string(),
        title: title.to_string(),
        description: Some(format!("{} description", title)),
        ingredients: vec!["1 cup flour".to_string(), "2 eggs".to_string()],
        instructions: Some("Mix and bake.".to_string()),
        created: None,
        updated: None,
    }
}

#[allow(dead_code)]
pub fn not_found(method: Method, id: &str) -> ApiError {
    ApiError::Status {
        method,
        url: format!("http://mock/api/recipes/{}", id),
        status: StatusCode::NOT_FOUND,
        body: Some(ErrorBody {
            message: Some("Recipe not found".to_string()),
            error: None,
            errors: None,
        }),
    }
}

#[allow(dead_code)]
pub fn server_error(method: Method, message: &str) -> ApiError {
    ApiError::Status {
        method,
        url: "http://mock/api/recipes".to_string(),
        status: StatusCode::INTERNAL_SERVER_ERROR,
        body: Some(ErrorBody {
            message: Some(message.to_string()),
            error: None,
            errors: None,
        }),
    }
}

#[allow(dead_code)]
pub fn network_error(method: Method) -> ApiError {
    ApiError::Transport {
        method,
        url: "http://mock/api/recipes".to_string(),
        message: "connection refused".to_string(),
    }
}

#[allow(dead_code)]
pub fn init_test_logging() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}
