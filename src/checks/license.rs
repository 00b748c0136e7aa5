//! License file detection and classification.

use std::fs;

use super::check::{Check, Severity};
use super::context::Context;
use super::result::CheckResult;
use crate::error::Result;
use crate::evidence::first_existing_file;

/// License file names, in lookup order.
pub const LICENSE_FILES: &[&str] = &[
    "LICENSE",
    "LICENSE.md",
    "LICENSE.txt",
    "LICENCE",
    "LICENCE.md",
    "COPYING",
    "COPYING.md",
];

/// `(license, markers)`: all markers must appear (case-insensitive).
/// More specific texts come first.
const LICENSE_MARKERS: &[(&str, &[&str])] = &[
    ("AGPL-3.0", &["GNU AFFERO GENERAL PUBLIC LICENSE"]),
    ("LGPL", &["GNU LESSER GENERAL PUBLIC LICENSE"]),
    ("GPL-3.0", &["GNU GENERAL PUBLIC LICENSE", "VERSION 3"]),
    ("GPL-2.0", &["GNU GENERAL PUBLIC LICENSE", "VERSION 2"]),
    ("Apache-2.0", &["APACHE LICENSE", "VERSION 2.0"]),
    ("MPL-2.0", &["MOZILLA PUBLIC LICENSE", "2.0"]),
    (
        "BSD-3-Clause",
        &["REDISTRIBUTION AND USE IN SOURCE AND BINARY FORMS", "NEITHER THE NAME"],
    ),
    ("BSD-2-Clause", &["REDISTRIBUTION AND USE IN SOURCE AND BINARY FORMS"]),
    (
        "ISC",
        &["PERMISSION TO USE, COPY, MODIFY, AND/OR DISTRIBUTE THIS SOFTWARE"],
    ),
    ("MIT", &["PERMISSION IS HEREBY GRANTED, FREE OF CHARGE"]),
    ("Unlicense", &["THIS IS FREE AND UNENCUMBERED SOFTWARE"]),
];

/// Identify a license text, if it is a well-known one.
pub fn classify_license(text: &str) -> Option<&'static str> {
    let upper = text.to_uppercase();
    let normalized = upper.split_whitespace().collect::<Vec<_>>().join(" ");
    LICENSE_MARKERS
        .iter()
        .find(|(_, markers)| markers.iter().all(|m| normalized.contains(m)))
        .map(|(name, _)| *name)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LicenseCheck;

impl Check for LicenseCheck {
    fn id(&self) -> &str {
        "license"
    }

    fn title(&self) -> &str {
        "License"
    }

    fn run(&self, ctx: &Context) -> Result<CheckResult> {
        if !ctx.config().checks.license.enabled {
            return Ok(CheckResult::skip(self.id(), self.title(), "not enabled, skipping"));
        }

        let Some(path) = first_existing_file(ctx.root(), LICENSE_FILES) else {
            return Ok(CheckResult::fail(
                self.id(),
                self.title(),
                Severity::Warn,
                "no LICENSE file found",
            )
            .with_suggestion("Add a LICENSE file (see https://choosealicense.com)"));
        };
        let rel = path
            .strip_prefix(ctx.root())
            .unwrap_or(&path)
            .display()
            .to_string();

        let text = fs::read_to_string(&path).unwrap_or_default();
        if text.trim().is_empty() {
            return Ok(CheckResult::fail(
                self.id(),
                self.title(),
                ctx.config().checks.malformed.license,
                format!("{rel} is empty or unreadable"),
            ));
        }

        let message = match classify_license(&text) {
            Some(license) => format!("{license} license ({rel})"),
            None => format!("custom license ({rel})"),
        };
        Ok(CheckResult::pass(self.id(), self.title(), message))
    }
}
