//! Detection orchestration.

use std::collections::BTreeMap;
use std::path::Path;

use super::scripts::ScriptFetcher;
use super::services::ServiceDetector;
use super::stack::detect_stack;
use super::types::ServiceDetection;
use crate::config::{Config, ServiceConfig};
use crate::error::{Result, ShipcheckError};

/// Options for a detection run.
#[derive(Debug, Clone, Copy)]
pub struct DetectOptions {
    /// Fetch external scripts referenced by templates.
    pub network: bool,
}

impl Default for DetectOptions {
    fn default() -> Self {
        Self { network: true }
    }
}

/// What auto-detection found for a project.
#[derive(Debug, Clone)]
pub struct Detection {
    pub stack: String,
    /// One entry per catalog service.
    pub services: BTreeMap<String, bool>,
    /// Per-service signals, in catalog order.
    pub details: Vec<ServiceDetection>,
}

impl Detection {
    /// Ids of detected services, in catalog order.
    pub fn detected_services(&self) -> Vec<&str> {
        self.details
            .iter()
            .filter(|d| d.detected())
            .map(|d| d.id.as_str())
            .collect()
    }

    /// Starter configuration declaring the detected stack and services.
    pub fn to_config(&self, project: Option<String>) -> Config {
        let services = self
            .detected_services()
            .into_iter()
            .map(|id| (id.to_string(), ServiceConfig::declared()))
            .collect();

        Config {
            project,
            stack: self.stack.clone(),
            services,
            ..Config::default()
        }
    }

    /// Starter configuration as a YAML document.
    pub fn to_yaml(&self, project: Option<String>) -> Result<String> {
        serde_yaml::to_string(&self.to_config(project))
            .map_err(|e| ShipcheckError::Other(anyhow::anyhow!("Failed to render config: {e}")))
    }
}

/// Runs stack and service detection over a project.
pub struct DetectionRunner {
    options: DetectOptions,
}

impl DetectionRunner {
    pub fn new(options: DetectOptions) -> Self {
        Self { options }
    }

    /// Detect the stack, then the services.
    pub fn run(&self, project_root: &Path) -> Result<Detection> {
        let stack = detect_stack(project_root);
        tracing::debug!("Detected stack {stack}");

        let fetcher = if self.options.network {
            Some(ScriptFetcher::new()?)
        } else {
            None
        };

        let mut detector = ServiceDetector::new(project_root, stack);
        if let Some(fetcher) = &fetcher {
            detector = detector.with_fetcher(fetcher);
        }
        let details = detector.detect();

        Ok(Detection {
            stack: stack.to_string(),
            services: details
                .iter()
                .map(|d| (d.id.clone(), d.detected()))
                .collect(),
            details,
        })
    }
}

impl Default for DetectionRunner {
    fn default() -> Self {
        Self::new(DetectOptions::default())
    }
}
