//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Duration;

use notehub_auth::jwt::{JwtDecoder, JwtEncoder};
use notehub_auth::password::{PasswordHasher, PasswordValidator};
use notehub_core::config::AppConfig;
use notehub_database::StoreManager;
use notehub_service::{
    AuthService, CascadeCoordinator, FolderNoteIndex, FolderService, NoteService, TreeService,
};

use crate::middleware::rate_limit::RateLimiter;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are cheap to clone across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Document store handle
    pub store: StoreManager,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT access token decoder
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Per-client login attempt limiter
    pub login_limiter: Arc<RateLimiter>,

    // ── Services ─────────────────────────────────────────────
    /// Registration and login
    pub auth_service: Arc<AuthService>,
    /// Folder CRUD and moves
    pub folder_service: Arc<FolderService>,
    /// Folder tree view
    pub tree_service: Arc<TreeService>,
    /// Note CRUD and moves
    pub note_service: Arc<NoteService>,
}

impl AppState {
    /// Wires every service onto an opened store.
    pub fn new(config: AppConfig, store: StoreManager) -> Self {
        let password_hasher = Arc::new(PasswordHasher::new());
        let password_validator = Arc::new(PasswordValidator::new(&config.auth));
        let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

        let index = FolderNoteIndex::new(store.folders(), store.notes());
        let cascade = Arc::new(CascadeCoordinator::new(
            store.folders(),
            store.notes(),
            index.clone(),
        ));

        let auth_service = Arc::new(AuthService::new(
            store.users(),
            password_hasher,
            password_validator,
            jwt_encoder,
            Arc::clone(&jwt_decoder),
        ));
        let folder_service = Arc::new(FolderService::new(store.folders(), store.notes(), cascade));
        let tree_service = Arc::new(TreeService::new(store.folders()));
        let note_service = Arc::new(NoteService::new(store.notes(), store.folders(), index));

        let login_limiter = Arc::new(RateLimiter::new(
            config.rate_limit.login_max_attempts,
            Duration::from_secs(config.rate_limit.login_window_seconds),
        ));

        Self {
            config: Arc::new(config),
            store,
            jwt_decoder,
            login_limiter,
            auth_service,
            folder_service,
            tree_service,
            note_service,
        }
    }
}
