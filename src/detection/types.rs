//! Detection result types.

use std::path::PathBuf;

/// Evidence that a service is in use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    /// Package named in a dependency manifest.
    Manifest { file: String, package: String },

    /// Env file declares a key with this prefix.
    EnvPrefix(String),

    /// SDK or embed pattern found in a layout/template.
    Template(PathBuf),

    /// A script loaded by the site matches a provider signature.
    Script(String),
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Signal::Manifest { file, package } => write!(f, "{package} in {file}"),
            Signal::EnvPrefix(prefix) => write!(f, "{prefix}* env key"),
            Signal::Template(path) => write!(f, "snippet in {}", path.display()),
            Signal::Script(url) => write!(f, "script {url}"),
        }
    }
}

/// Result of detecting one service.
#[derive(Debug, Clone)]
pub struct ServiceDetection {
    /// Catalog id of the service.
    pub id: String,

    /// Signals that fired, in the order they were checked.
    pub signals: Vec<Signal>,
}

impl ServiceDetection {
    /// Create a detection with no signals yet.
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            signals: Vec::new(),
        }
    }

    /// Add a signal.
    pub fn with_signal(mut self, signal: Signal) -> Self {
        self.signals.push(signal);
        self
    }

    /// Whether any signal fired.
    pub fn detected(&self) -> bool {
        !self.signals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_detection_is_negative() {
        let detection = ServiceDetection::new("stripe");
        assert!(!detection.detected());
        assert_eq!(detection.id, "stripe");
    }

    #[test]
    fn any_signal_detects() {
        let detection =
            ServiceDetection::new("sentry").with_signal(Signal::EnvPrefix("SENTRY_".into()));
        assert!(detection.detected());
    }

    #[test]
    fn signal_display() {
        let signal = Signal::Manifest {
            file: "package.json".into(),
            package: "@sentry/nextjs".into(),
        };
        assert_eq!(signal.to_string(), "@sentry/nextjs in package.json");
        assert_eq!(
            Signal::EnvPrefix("STRIPE_".into()).to_string(),
            "STRIPE_* env key"
        );
    }
}
