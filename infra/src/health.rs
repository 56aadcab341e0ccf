//! Storage liveness checks reported by `/health`

use async_trait::async_trait;
use tracing::warn;

/// A backing service that can be pinged
#[async_trait]
pub trait HealthCheck: Send + Sync {
    /// Component name reported when the check fails
    fn component(&self) -> &'static str;

    /// `true` when the component answered
    async fn is_healthy(&self) -> bool;
}

#[cfg(feature = "mysql")]
#[async_trait]
impl HealthCheck for crate::database::DatabasePool {
    fn component(&self) -> &'static str {
        "mysql"
    }

    async fn is_healthy(&self) -> bool {
        match self.health_check().await {
            Ok(healthy) => healthy,
            Err(e) => {
                warn!("MySQL health check failed: {}", e);
                false
            }
        }
    }
}

#[cfg(feature = "redis-cache")]
#[async_trait]
impl HealthCheck for crate::cache::RedisClient {
    fn component(&self) -> &'static str {
        "redis"
    }

    async fn is_healthy(&self) -> bool {
        match self.health_check().await {
            Ok(healthy) => healthy,
            Err(e) => {
                warn!("Redis health check failed: {}", e);
                false
            }
        }
    }
}

/// Names of the components whose check failed
pub async fn failing_components(checks: &[std::sync::Arc<dyn HealthCheck>]) -> Vec<String> {
    let mut failing = Vec::new();
    for check in checks {
        if !check.is_healthy().await {
            failing.push(check.component().to_string());
        }
    }
    failing
}
