//! .env file parsing.
//!
//! Parses environment variable files in the standard `KEY=value` format.
//! Only keys matter to the scanner; values are kept for completeness but are
//! never reported.

use anyhow::Result;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Parses .env files into a map of environment variables.
///
/// # Supported Formats
///
/// - Simple: `KEY=value`
/// - Exported: `export KEY=value`
/// - Quoted: `KEY="value with spaces"` or `KEY='single quoted'`
/// - Empty: `KEY=`
/// - Comments: `# This is a comment`
/// - Whitespace around equals: `KEY = value`
///
/// # Example
///
/// ```
/// use shipcheck::config::EnvFileParser;
///
/// let content = r#"
/// # Database config
/// DATABASE_URL=postgres://localhost/db
/// export DEBUG="true"
/// "#;
///
/// let vars = EnvFileParser::parse(content);
/// assert_eq!(vars.get("DATABASE_URL"), Some(&"postgres://localhost/db".to_string()));
/// assert_eq!(vars.get("DEBUG"), Some(&"true".to_string()));
/// ```
pub struct EnvFileParser;

impl EnvFileParser {
    /// Parse an env file content string into an ordered map of variables.
    pub fn parse(content: &str) -> BTreeMap<String, String> {
        let mut vars = BTreeMap::new();

        for line in content.lines() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = Self::parse_line(line) {
                vars.insert(key, value);
            }
        }

        vars
    }

    /// Parse only the keys of an env file.
    pub fn keys(content: &str) -> BTreeSet<String> {
        Self::parse(content).into_keys().collect()
    }

    /// Parse a single line.
    fn parse_line(line: &str) -> Option<(String, String)> {
        let line = strip_export(line);
        let eq_pos = line.find('=')?;
        let key = line[..eq_pos].trim();
        if key.is_empty() || key.contains(char::is_whitespace) {
            return None;
        }

        let value = Self::unquote(line[eq_pos + 1..].trim());

        Some((key.to_string(), value))
    }

    /// Remove surrounding quotes from a value.
    fn unquote(value: &str) -> String {
        if value.len() >= 2
            && ((value.starts_with('"') && value.ends_with('"'))
                || (value.starts_with('\'') && value.ends_with('\'')))
        {
            value[1..value.len() - 1].to_string()
        } else {
            value.to_string()
        }
    }

    /// Load and parse the keys of an env file from a path.
    pub fn load_keys(path: &Path) -> Result<BTreeSet<String>> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::keys(&content))
    }
}

/// Strip a leading `export ` keyword from an env line.
pub fn strip_export(line: &str) -> &str {
    line.strip_prefix("export ")
        .map(str::trim_start)
        .unwrap_or(line)
}
