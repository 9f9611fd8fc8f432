//! Health report types for `GET /health`

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Overall health status of the service
///
/// # Example
/// ```
/// use altolink_api::utils::health::{ComponentHealth, HealthStatus};
///
/// let mut status = HealthStatus::new()
///     .add_component(ComponentHealth::healthy("database"))
///     .add_component(ComponentHealth::unhealthy("alto_credentials", "missing secret"));
/// status.calculate_score();
///
/// assert_eq!(status.score, 0.5);
/// assert!(!status.is_healthy);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub is_healthy: bool,

    /// healthy_components / total_components
    pub score: f64,

    pub message: Option<String>,

    pub components: Vec<ComponentHealth>,

    /// Unix timestamp (seconds) of the check
    pub timestamp: i64,
}

impl HealthStatus {
    /// Healthy with score 1.0 and no components.
    pub fn new() -> Self {
        Self {
            is_healthy: true,
            score: 1.0,
            message: None,
            components: Vec::new(),
            timestamp: Utc::now().timestamp(),
        }
    }

    #[must_use]
    pub fn add_component(mut self, component: ComponentHealth) -> Self {
        self.components.push(component);
        self
    }

    /// Recompute the score after all components have been added.
    ///
    /// Every component must be healthy for the service to report healthy.
    pub fn calculate_score(&mut self) {
        if self.components.is_empty() {
            return;
        }

        let healthy = self.components.iter().filter(|c| c.is_healthy).count();
        #[allow(clippy::cast_precision_loss)]
        let score = healthy as f64 / self.components.len() as f64;

        self.score = score;
        self.is_healthy = healthy == self.components.len();
        if !self.is_healthy {
            let failing: Vec<&str> = self
                .components
                .iter()
                .filter(|c| !c.is_healthy)
                .map(|c| c.name.as_str())
                .collect();
            self.message = Some(format!("unhealthy: {}", failing.join(", ")));
        }
    }
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self::new()
    }
}

/// Health status of an individual component
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    /// Component identifier (e.g. "database")
    pub name: String,
    pub is_healthy: bool,
    pub message: Option<String>,
}

impl ComponentHealth {
    pub fn healthy(name: impl Into<String>) -> Self {
        Self { name: name.into(), is_healthy: true, message: None }
    }

    pub fn unhealthy(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self { name: name.into(), is_healthy: false, message: Some(message.into()) }
    }
}
