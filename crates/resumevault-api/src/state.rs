//! Application state shared across handlers.

use resumevault_core::Config;
use resumevault_db::{ResumeRepository, UserRepository};
use resumevault_storage::Storage;
use sqlx::PgPool;
use std::sync::Arc;

/// Main application state, injected into handlers via `State<Arc<AppState>>`.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub resumes: ResumeRepository,
    pub users: UserRepository,
    pub storage: Arc<dyn Storage>,
    pub config: Config,
}

impl AppState {
    pub fn new(pool: PgPool, storage: Arc<dyn Storage>, config: Config) -> Self {
        AppState {
            resumes: ResumeRepository::new(pool.clone()),
            users: UserRepository::new(pool.clone()),
            pool,
            storage,
            config,
        }
    }
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
