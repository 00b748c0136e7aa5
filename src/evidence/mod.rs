//! Evidence primitives.
//!
//! Stateless helpers every check builds on:
//!
//! - [`search_for_patterns`] - tiered, short-circuiting pattern search
//! - [`has_env_var`] - env-file key prefix lookup
//! - [`resolve_main_layout`] - the file most likely to hold `<head>`
//! - [`find_web_file`] - static files across web roots
//! - [`Walk`] - bounded directory walk with an explicit stop token

pub mod cascade;
pub mod env;
pub mod layout;
pub mod paths;
pub mod walk;
pub mod web_root;

pub use cascade::{
    compile_patterns, file_matches, search_for_patterns, search_with_trace, stack_candidates,
    Evidence, SearchTrace, Tier, SOURCE_DIRS, SOURCE_EXTENSIONS,
};
pub use env::{env_file_has_prefix, has_any_env_var, has_env_var, line_has_prefix, ENV_FILES};
pub use layout::{resolve_main_layout, stack_layouts, GENERIC_LAYOUTS};
pub use paths::{expand, expand_all, first_existing_file};
pub use walk::{extension, Walk, MAX_DEPTH, MAX_FILE_SIZE, SKIP_DIRS};
pub use web_root::{find_web_file, find_web_files, web_roots, RootKind, WebFile};
