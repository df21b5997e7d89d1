use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;
use timetable_planner::build_router;
use timetable_planner::config::Config;
use timetable_planner::error::{AppError, AppResult};
use timetable_planner::services::{ExportFetcher, ExportLanguage, ExportRequest};
use timetable_planner::state::AppState;

/// Test configuration backed by a private in-memory SQLite database
pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "test-jwt-secret-that-is-at-least-32-characters-long".to_string(),
        jwt_expiration_hours: 24,
        host: "127.0.0.1".to_string(),
        port: 0,
        sugang_base_url: "http://sugang.invalid".to_string(),
        sugang_timeout_secs: 5,
        sugang_user_agent: "timetable-planner-tests".to_string(),
    }
}

/// Export fetcher serving canned payloads per language
#[derive(Default)]
pub struct FakeFetcher {
    payloads: Mutex<HashMap<&'static str, Vec<u8>>>,
    requests: Mutex<Vec<ExportRequest>>,
}

impl FakeFetcher {
    pub fn set_payload(&self, language: ExportLanguage, bytes: Vec<u8>) {
        self.payloads
            .lock()
            .unwrap()
            .insert(language.code(), bytes);
    }

    /// Every request received so far, in arrival order
    pub fn requests(&self) -> Vec<ExportRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ExportFetcher for FakeFetcher {
    async fn fetch(&self, request: &ExportRequest) -> AppResult<Vec<u8>> {
        self.requests.lock().unwrap().push(request.clone());
        self.payloads
            .lock()
            .unwrap()
            .get(request.language.code())
            .cloned()
            .ok_or_else(|| {
                AppError::ExternalFetch(format!(
                    "no payload for language {}",
                    request.language.code()
                ))
            })
    }
}

/// Test application wrapper
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub fetcher: Arc<FakeFetcher>,
}

impl TestApp {
    /// Create a new test application
    pub async fn new() -> Self {
        let fetcher = Arc::new(FakeFetcher::default());

        let state = AppState::with_fetcher(test_config(), fetcher.clone())
            .await
            .expect("Failed to create test app state");

        let router = build_router(state.clone());
        let server = TestServer::new(router).expect("Failed to create test server");

        Self {
            server,
            state,
            fetcher,
        }
    }
}
