//! Main layout resolution.
//!
//! The "main layout" is the one file most likely to hold the document
//! `<head>`: an explicit config override, else the stack's conventional
//! layout, else a generic fallback list.

use std::path::{Path, PathBuf};

use super::paths::first_existing_file;

/// Conventional layout files per stack, most specific first.
const STACK_LAYOUTS: &[(&str, &[&str])] = &[
    (
        "next",
        &[
            "app/layout.tsx",
            "app/layout.jsx",
            "app/layout.js",
            "src/app/layout.tsx",
            "src/app/layout.jsx",
            "src/app/layout.js",
            "pages/_document.tsx",
            "pages/_document.jsx",
            "pages/_document.js",
            "src/pages/_document.tsx",
            "pages/_app.tsx",
            "pages/_app.jsx",
            "pages/_app.js",
            "src/pages/_app.tsx",
        ],
    ),
    (
        "rails",
        &[
            "app/views/layouts/application.html.erb",
            "app/views/layouts/application.html.haml",
            "app/views/layouts/application.html.slim",
        ],
    ),
    (
        "nuxt",
        &["app.vue", "app/app.vue", "layouts/default.vue", "nuxt.config.ts", "nuxt.config.js"],
    ),
    ("sveltekit", &["src/app.html", "src/routes/+layout.svelte"]),
    (
        "astro",
        &[
            "src/layouts/Layout.astro",
            "src/layouts/BaseLayout.astro",
            "src/layouts/Base.astro",
            "src/components/BaseHead.astro",
        ],
    ),
    ("remix", &["app/root.tsx", "app/root.jsx", "app/root.js"]),
    (
        "gatsby",
        &["src/html.js", "src/components/seo.js", "src/components/layout.js"],
    ),
    (
        "laravel",
        &[
            "resources/views/layouts/app.blade.php",
            "resources/views/app.blade.php",
            "resources/views/welcome.blade.php",
        ],
    ),
    (
        "django",
        &["templates/base.html", "templates/layout.html", "*/templates/base.html"],
    ),
    (
        "flask",
        &["templates/base.html", "templates/layout.html", "app/templates/base.html"],
    ),
    (
        "wordpress",
        &["header.php", "wp-content/themes/*/header.php"],
    ),
    (
        "hugo",
        &[
            "layouts/_default/baseof.html",
            "layouts/partials/head.html",
            "themes/*/layouts/_default/baseof.html",
        ],
    ),
    ("jekyll", &["_layouts/default.html", "_includes/head.html"]),
    (
        "eleventy",
        &[
            "_includes/layouts/base.njk",
            "_includes/base.njk",
            "_includes/layout.njk",
            "src/_includes/base.njk",
            "src/_includes/layouts/base.njk",
        ],
    ),
    (
        "phoenix",
        &[
            "lib/*_web/components/layouts/root.html.heex",
            "lib/*_web/templates/layout/root.html.heex",
        ],
    ),
    ("vue", &["index.html", "public/index.html", "src/App.vue"]),
    (
        "react",
        &["index.html", "public/index.html", "src/App.tsx", "src/App.jsx"],
    ),
    (
        "node",
        &[
            "views/layout.ejs",
            "views/layout.pug",
            "views/layout.hbs",
            "views/layouts/main.hbs",
            "public/index.html",
        ],
    ),
    ("static", &["index.html", "public/index.html"]),
];

/// Fallback layouts tried for every stack.
pub const GENERIC_LAYOUTS: &[&str] = &[
    "index.html",
    "public/index.html",
    "src/index.html",
    "app/layout.tsx",
    "src/app/layout.tsx",
    "app/views/layouts/application.html.erb",
    "templates/base.html",
    "resources/views/layouts/app.blade.php",
    "views/layout.ejs",
];

/// Conventional layout candidates for a stack (empty for unknown stacks).
pub fn stack_layouts(stack: &str) -> &'static [&'static str] {
    STACK_LAYOUTS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(stack))
        .map(|(_, files)| *files)
        .unwrap_or(&[])
}

/// Resolve the main layout file for a project.
///
/// An override that does not exist is logged and ignored so the conventions
/// still get a chance.
pub fn resolve_main_layout(
    root: &Path,
    stack: &str,
    override_path: Option<&Path>,
) -> Option<PathBuf> {
    if let Some(path) = override_path {
        let full = root.join(path);
        if full.is_file() {
            return Some(full);
        }
        tracing::debug!(
            "Configured main layout {} not found, falling back to conventions",
            path.display()
        );
    }

    first_existing_file(root, stack_layouts(stack))
        .or_else(|| first_existing_file(root, GENERIC_LAYOUTS))
}
