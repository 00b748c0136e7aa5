//! Configuration loading and parsing for shipcheck.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - `.env` parsing in [`env_file`]
//!
//! # Example
//!
//! ```
//! use shipcheck::config::load_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(
//!     temp.path().join("shipcheck.yml"),
//!     "stack: rails\nservices:\n  stripe: { declared: true }\n",
//! ).unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! assert_eq!(config.stack, "rails");
//! assert!(config.is_declared("stripe"));
//! ```

pub mod env_file;
pub mod loader;
pub mod schema;

pub use env_file::{strip_export, EnvFileParser};
pub use loader::{find_config_file, load_config, load_config_file, parse_config, CONFIG_FILE_NAMES};
pub use schema::{
    ChecksConfig, Config, EnvConfig, FilesConfig, HealthConfig, IndexNowConfig, LicenseConfig,
    MalformedConfig, SecurityConfig, SeoConfig, ServiceConfig, Urls,
};
