//! Stack and service auto-detection.
//!
//! Detection only reads the project (and, optionally, scripts it loads) and
//! never writes files. Its output seeds a starter `shipcheck.yml`.

pub mod file_detection;
pub mod runner;
pub mod scripts;
pub mod services;
pub mod stack;
pub mod types;

pub use file_detection::{file_contains, file_exists};
pub use runner::{DetectOptions, Detection, DetectionRunner};
pub use scripts::{external_scripts, ScriptFetcher, MAX_SCRIPTS, SCRIPT_DEADLINE, SCRIPT_TIMEOUT};
pub use services::{ServiceDetector, MANIFESTS};
pub use stack::{detect_stack, STACK_RULES, UNKNOWN_STACK};
pub use types::{ServiceDetection, Signal};
