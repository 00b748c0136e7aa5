//! Service inference.
//!
//! A service counts as detected when any of four signals fires, checked
//! cheapest first: manifest packages, env key prefixes, template snippets,
//! and live script fingerprints. The live tier only runs for services the
//! local signals missed.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use super::scripts::{external_scripts, matching_script, ScriptFetcher};
use super::types::{ServiceDetection, Signal};
use crate::catalog::{manifest_mentions, ServiceSpec, SERVICES};
use crate::evidence::{compile_patterns, expand_all, has_env_var, stack_candidates, GENERIC_LAYOUTS};

/// Dependency manifests read for package markers.
pub const MANIFESTS: &[&str] = &[
    "package.json",
    "Gemfile",
    "Gemfile.lock",
    "composer.json",
    "requirements.txt",
    "pyproject.toml",
];

struct Manifest {
    name: &'static str,
    content: String,
}

fn read_manifests(root: &Path) -> Vec<Manifest> {
    MANIFESTS
        .iter()
        .filter_map(|&name| {
            fs::read_to_string(root.join(name))
                .ok()
                .map(|content| Manifest { name, content })
        })
        .collect()
}

/// Layout and template files scanned for snippets and script tags.
pub fn template_files(root: &Path, stack: &str) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    stack_candidates(root, stack)
        .into_iter()
        .chain(expand_all(root, GENERIC_LAYOUTS))
        .filter(|p| p.is_file() && seen.insert(p.clone()))
        .collect()
}

fn manifest_signal(spec: &ServiceSpec, manifests: &[Manifest]) -> Option<Signal> {
    manifests.iter().find_map(|manifest| {
        spec.manifest_markers
            .iter()
            .find(|pkg| manifest_mentions(&manifest.content, pkg))
            .map(|pkg| Signal::Manifest {
                file: manifest.name.to_string(),
                package: pkg.to_string(),
            })
    })
}

fn env_signal(spec: &ServiceSpec, root: &Path) -> Option<Signal> {
    spec.env_prefixes
        .iter()
        .find(|prefix| has_env_var(root, prefix))
        .map(|prefix| Signal::EnvPrefix(prefix.to_string()))
}

fn template_signal(spec: &ServiceSpec, root: &Path, templates: &[(PathBuf, String)]) -> Option<Signal> {
    let patterns = compile_patterns(spec.sdk_patterns);
    templates
        .iter()
        .find(|(_, content)| patterns.iter().any(|re| re.is_match(content)))
        .map(|(path, _)| {
            Signal::Template(path.strip_prefix(root).unwrap_or(path).to_path_buf())
        })
}

/// Detects services from local evidence and, optionally, live scripts.
pub struct ServiceDetector<'a> {
    root: &'a Path,
    stack: &'a str,
    fetcher: Option<&'a ScriptFetcher>,
}

impl<'a> ServiceDetector<'a> {
    /// Detector that only looks at local files.
    pub fn new(root: &'a Path, stack: &'a str) -> Self {
        Self {
            root,
            stack,
            fetcher: None,
        }
    }

    /// Enable live script fingerprinting.
    pub fn with_fetcher(mut self, fetcher: &'a ScriptFetcher) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// One detection per catalog service, in catalog order.
    pub fn detect(&self) -> Vec<ServiceDetection> {
        let manifests = read_manifests(self.root);
        let templates: Vec<(PathBuf, String)> = template_files(self.root, self.stack)
            .into_iter()
            .filter_map(|p| fs::read_to_string(&p).ok().map(|c| (p, c)))
            .collect();

        let mut detections: Vec<ServiceDetection> = SERVICES
            .iter()
            .map(|spec| {
                let mut detection = ServiceDetection::new(spec.id);
                let local = manifest_signal(spec, &manifests)
                    .or_else(|| env_signal(spec, self.root))
                    .or_else(|| template_signal(spec, self.root, &templates));
                if let Some(signal) = local {
                    tracing::debug!("Detected {} via {signal}", spec.id);
                    detection = detection.with_signal(signal);
                }
                detection
            })
            .collect();

        if let Some(fetcher) = self.fetcher {
            self.detect_from_scripts(fetcher, &templates, &mut detections);
        }

        detections
    }

    fn detect_from_scripts(
        &self,
        fetcher: &ScriptFetcher,
        templates: &[(PathBuf, String)],
        detections: &mut [ServiceDetection],
    ) {
        if detections.iter().all(ServiceDetection::detected) {
            return;
        }

        let mut seen = HashSet::new();
        let urls: Vec<String> = templates
            .iter()
            .flat_map(|(_, content)| external_scripts(content))
            .filter(|url| seen.insert(url.clone()))
            .collect();
        if urls.is_empty() {
            return;
        }

        let scripts = fetcher.fetch(&urls);
        for (spec, detection) in SERVICES.iter().zip(detections.iter_mut()) {
            if detection.detected() {
                continue;
            }
            if let Some(script) = matching_script(spec, &scripts) {
                tracing::debug!("Detected {} via script {}", spec.id, script.url);
                detection.signals.push(Signal::Script(script.url.clone()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn detected(detections: &[ServiceDetection]) -> Vec<&str> {
        detections
            .iter()
            .filter(|d| d.detected())
            .map(|d| d.id.as_str())
            .collect()
    }

    #[test]
    fn empty_project_detects_nothing() {
        let temp = TempDir::new().unwrap();
        let detections = ServiceDetector::new(temp.path(), "unknown").detect();

        assert_eq!(detections.len(), SERVICES.len());
        assert!(detected(&detections).is_empty());
    }

    #[test]
    fn detects_from_manifest() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "package.json",
            r#"{ "dependencies": { "@sentry/nextjs": "8.0.0", "stripe": "14.0.0" } }"#,
        );

        let detections = ServiceDetector::new(temp.path(), "next").detect();
        assert_eq!(detected(&detections), ["stripe", "sentry"]);

        let sentry = detections.iter().find(|d| d.id == "sentry").unwrap();
        assert_eq!(
            sentry.signals[0],
            Signal::Manifest {
                file: "package.json".into(),
                package: "@sentry/nextjs".into()
            }
        );
    }

    #[test]
    fn detects_from_gem_lockfile() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "Gemfile.lock", "GEM\n  specs:\n    stripe (10.1.0)\n");

        let detections = ServiceDetector::new(temp.path(), "rails").detect();
        assert_eq!(detected(&detections), ["stripe"]);
    }

    #[test]
    fn detects_from_env_prefix() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), ".env", "POSTHOG_KEY=phc_123\n");

        let detections = ServiceDetector::new(temp.path(), "unknown").detect();
        assert_eq!(detected(&detections), ["posthog"]);
    }

    #[test]
    fn detects_from_template() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "index.html",
            r#"<script defer data-domain="example.com" src="https://plausible.io/js/script.js"></script>"#,
        );

        let detections = ServiceDetector::new(temp.path(), "static").detect();
        let plausible = detections.iter().find(|d| d.id == "plausible").unwrap();
        assert_eq!(plausible.signals, [Signal::Template(PathBuf::from("index.html"))]);
    }

    #[test]
    fn script_signal_only_for_undetected() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/bundle.js");
            then.status(200).body("/* Plausible Analytics */ plausible.io/api/event");
        });

        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "index.html",
            &format!(r#"<script src="{}"></script>"#, server.url("/bundle.js")),
        );

        let fetcher = ScriptFetcher::new().unwrap();
        let detections = ServiceDetector::new(temp.path(), "static")
            .with_fetcher(&fetcher)
            .detect();

        let plausible = detections.iter().find(|d| d.id == "plausible").unwrap();
        assert!(matches!(plausible.signals.as_slice(), [Signal::Script(_)]));
        mock.assert_calls(1);
    }
}
