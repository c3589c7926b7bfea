#![allow(dead_code)]

use async_trait::async_trait;
use axum::{Router, routing::get};
use bitroute::api::handlers::{health_handler, raw_paste_handler};
use bitroute::api::routes::api_routes;
use bitroute::domain::entities::{NewPaste, Paste};
use bitroute::domain::repositories::PasteRepository;
use bitroute::error::AppError;
use bitroute::infrastructure::cache::NullCache;
use bitroute::infrastructure::storage::{FsPasteStorage, PasteStorage};
use bitroute::state::AppState;
use chrono::NaiveDateTime;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use tempfile::TempDir;

pub const TEST_BASE_URL: &str = "https://p.example.com";

/// In-memory [`PasteRepository`] keyed by shortlink.
#[derive(Default)]
pub struct InMemoryPasteRepository {
    pastes: Mutex<HashMap<String, Paste>>,
    /// When set, the uniqueness oracle reports every shortlink as taken.
    all_taken: AtomicBool,
    /// When set, every call fails like an unreachable database.
    offline: AtomicBool,
}

impl InMemoryPasteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, paste: Paste) {
        self.pastes
            .lock()
            .unwrap()
            .insert(paste.shortlink.clone(), paste);
    }

    pub fn len(&self) -> usize {
        self.pastes.lock().unwrap().len()
    }

    pub fn set_all_taken(&self, taken: bool) {
        self.all_taken.store(taken, Ordering::SeqCst);
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), AppError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(AppError::internal("Database error", json!({})));
        }
        Ok(())
    }
}

#[async_trait]
impl PasteRepository for InMemoryPasteRepository {
    async fn exists_by_shortlink(&self, shortlink: &str) -> Result<bool, AppError> {
        self.check_online()?;
        if self.all_taken.load(Ordering::SeqCst) {
            return Ok(true);
        }
        Ok(self.pastes.lock().unwrap().contains_key(shortlink))
    }

    async fn create(&self, new_paste: NewPaste) -> Result<Paste, AppError> {
        self.check_online()?;
        let mut pastes = self.pastes.lock().unwrap();
        if pastes.contains_key(&new_paste.shortlink) {
            return Err(AppError::conflict("Shortlink already exists", json!({})));
        }
        let paste: Paste = new_paste.into();
        pastes.insert(paste.shortlink.clone(), paste.clone());
        Ok(paste)
    }

    async fn find_by_shortlink(&self, shortlink: &str) -> Result<Option<Paste>, AppError> {
        self.check_online()?;
        Ok(self.pastes.lock().unwrap().get(shortlink).cloned())
    }

    async fn find_expired(&self, now: NaiveDateTime, limit: i64) -> Result<Vec<Paste>, AppError> {
        self.check_online()?;
        let mut expired: Vec<Paste> = self
            .pastes
            .lock()
            .unwrap()
            .values()
            .filter(|p| p.is_expired_at(now))
            .cloned()
            .collect();
        expired.sort_by_key(|p| p.created_at);
        expired.truncate(limit.max(0) as usize);
        Ok(expired)
    }

    async fn delete(&self, shortlink: &str) -> Result<bool, AppError> {
        self.check_online()?;
        Ok(self.pastes.lock().unwrap().remove(shortlink).is_some())
    }

    async fn count(&self) -> Result<i64, AppError> {
        self.check_online()?;
        Ok(self.pastes.lock().unwrap().len() as i64)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.check_online()
    }
}

/// Test fixture holding the state and the backing fakes.
pub struct TestContext {
    pub state: AppState,
    pub repository: Arc<InMemoryPasteRepository>,
    pub storage: Arc<FsPasteStorage>,
    pub tmp: TempDir,
}

pub async fn create_test_context(max_paste_bytes: usize) -> TestContext {
    let tmp = TempDir::new().unwrap();
    let storage = Arc::new(FsPasteStorage::new(tmp.path().join("pastes")).await.unwrap());
    let repository = Arc::new(InMemoryPasteRepository::new());

    let state = AppState::new(
        repository.clone(),
        storage.clone() as Arc<dyn PasteStorage>,
        Arc::new(NullCache::new()),
        TEST_BASE_URL,
        max_paste_bytes,
        3600,
    );

    TestContext {
        state,
        repository,
        storage,
        tmp,
    }
}

/// Application routes without the outer middleware stack.
pub fn test_router(state: AppState) -> Router {
    Router::new()
        .route("/{shortlink}", get(raw_paste_handler))
        .route("/health", get(health_handler))
        .nest("/api", api_routes())
        .with_state(state)
}
