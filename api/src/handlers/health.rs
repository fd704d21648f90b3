//! Dependency health probes reported by `/health`

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use actix_web::{http::StatusCode, HttpResponse};
use async_trait::async_trait;
use mp_infra::cache::RedisClient;
use mp_infra::database::DatabasePool;
use mp_shared::{HealthResponse, HealthStatus, ServiceHealth};
use tracing::warn;

const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// A backing service whose reachability is reported by the health endpoint
#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn check(&self) -> ServiceHealth;
}

#[async_trait]
impl HealthProbe for DatabasePool {
    async fn check(&self) -> ServiceHealth {
        match self.health_check().await {
            Ok(true) => ServiceHealth {
                status: HealthStatus::Healthy,
                message: Some(self.get_statistics().to_string()),
            },
            Ok(false) => ServiceHealth {
                status: HealthStatus::Degraded,
                message: Some("unexpected probe result".to_string()),
            },
            Err(_) => ServiceHealth {
                status: HealthStatus::Unhealthy,
                message: Some("unreachable".to_string()),
            },
        }
    }
}

#[async_trait]
impl HealthProbe for RedisClient {
    async fn check(&self) -> ServiceHealth {
        match self.health_check().await {
            Ok(true) => ServiceHealth {
                status: HealthStatus::Healthy,
                message: None,
            },
            Ok(false) => ServiceHealth {
                status: HealthStatus::Degraded,
                message: Some("unexpected PING reply".to_string()),
            },
            // The identity cache is optional on the request path
            Err(_) => ServiceHealth {
                status: HealthStatus::Degraded,
                message: Some("unreachable".to_string()),
            },
        }
    }
}

/// Named probes consulted on every health request
#[derive(Clone)]
pub struct HealthChecks {
    probes: Vec<(String, Arc<dyn HealthProbe>)>,
    timeout: Duration,
}

impl Default for HealthChecks {
    fn default() -> Self {
        Self {
            probes: Vec::new(),
            timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }
}

impl HealthChecks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a probe under `name`
    pub fn with_probe(mut self, name: impl Into<String>, probe: Arc<dyn HealthProbe>) -> Self {
        self.probes.push((name.into(), probe));
        self
    }

    /// Upper bound on a single probe
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run all probes; a probe that does not answer in time is unhealthy
    pub async fn run(&self) -> HashMap<String, ServiceHealth> {
        let mut results = HashMap::new();

        for (name, probe) in &self.probes {
            let health = match tokio::time::timeout(self.timeout, probe.check()).await {
                Ok(health) => health,
                Err(_) => {
                    warn!(service = %name, "Health probe timed out");
                    ServiceHealth {
                        status: HealthStatus::Unhealthy,
                        message: Some("timed out".to_string()),
                    }
                }
            };
            results.insert(name.clone(), health);
        }

        results
    }

    /// Builds the `/health` response; 503 when any probe is unhealthy
    pub async fn respond(&self) -> HttpResponse {
        let response = HealthResponse::from_services(self.run().await, env!("CARGO_PKG_VERSION"));
        let status = match response.status {
            HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
            HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
        };

        HttpResponse::build(status).json(response)
    }
}
