//! Page host state

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use crate::config::ServerConfig;

/// Shared state for all handlers
#[derive(Debug, Clone)]
pub struct ServerState {
    pub config: Arc<ServerConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl ServerState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// The UI shell every page route answers with
    pub fn index_path(&self) -> PathBuf {
        self.config.static_dir.join("index.html")
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
