use std::sync::Arc;
use tokio::sync::Mutex;

use crate::application::Session;
use crate::infrastructure::AppConfig;

/// Shared handler state: the process-wide session and the loaded config.
///
/// Handlers hold the session lock for the whole request, so ingestion and
/// answering never interleave.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<Session>>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(session: Session, config: AppConfig) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            config: Arc::new(config),
        }
    }

    pub fn wrap_width(&self) -> usize {
        self.config.config.display.wrap_width
    }
}
