//! Periodic purge of expired blacklist entries
//!
//! A blacklist entry is only useful until the token it revokes would have
//! expired anyway. This service removes dead entries on an interval so the
//! store does not grow without bound.

use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::errors::DomainError;
use crate::repositories::TokenBlacklistRepository;

/// Configuration for the blacklist cleanup service
#[derive(Debug, Clone)]
pub struct BlacklistCleanupConfig {
    /// How often to run cleanup (in seconds)
    pub interval_seconds: u64,
    /// Whether to enable automatic cleanup
    pub enabled: bool,
}

impl Default for BlacklistCleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600, // Run every hour
            enabled: true,
        }
    }
}

/// Service for purging expired blacklist entries
pub struct BlacklistCleanupService<B: TokenBlacklistRepository + 'static> {
    blacklist: Arc<B>,
    config: BlacklistCleanupConfig,
}

impl<B: TokenBlacklistRepository> BlacklistCleanupService<B> {
    pub fn new(blacklist: Arc<B>, config: BlacklistCleanupConfig) -> Self {
        Self { blacklist, config }
    }

    /// Run a single cleanup cycle
    ///
    /// Storage errors are recorded in the result rather than returned, so a
    /// failing cycle does not stop the background loop.
    pub async fn run_cleanup(&self) -> Result<CleanupResult, DomainError> {
        if !self.config.enabled {
            return Ok(CleanupResult::default());
        }

        let mut result = CleanupResult::default();

        match self.blacklist.purge_expired().await {
            Ok(count) => {
                result.blacklist_entries_deleted = count;
                info!("Deleted {} expired blacklist entries", count);
            }
            Err(e) => {
                error!("Failed to cleanup blacklist: {}", e);
                result.errors.push(format!("Blacklist cleanup error: {}", e));
            }
        }

        Ok(result)
    }

    /// Start the cleanup service as a background task
    ///
    /// Returns `None` when cleanup is disabled.
    pub fn start_background_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.config.enabled {
            warn!("Blacklist cleanup service is disabled");
            return None;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds.max(1));

        Some(tokio::spawn(async move {
            info!(
                "Blacklist cleanup service started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                match self.run_cleanup().await {
                    Ok(result) => {
                        if !result.is_success() {
                            warn!("Cleanup completed with errors: {:?}", result.errors);
                        }
                    }
                    Err(e) => {
                        error!("Blacklist cleanup cycle failed: {}", e);
                    }
                }
            }
        }))
    }
}

/// Result of a cleanup operation
#[derive(Debug, Default)]
pub struct CleanupResult {
    /// Number of expired blacklist entries deleted
    pub blacklist_entries_deleted: usize,
    /// Any errors encountered during cleanup
    pub errors: Vec<String>,
}

impl CleanupResult {
    /// Check if the cleanup was successful (no errors)
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}
