//! CLI runtime configuration.
use std::env;
use std::path::PathBuf;

/// Where rules and item catalogs come from when not given on the command line.
#[derive(Clone, Debug, Default)]
pub struct SheetConfig {
    pub rules: Option<PathBuf>,
    pub catalogs: Vec<PathBuf>,
}

impl SheetConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SHEET_RULES` - Rules TOML file (default: built-in rules)
    /// - `SHEET_ITEMS` - Item catalog RON files, separated by the platform
    ///   path separator (default: none)
    pub fn from_env() -> Self {
        let rules = env::var_os("SHEET_RULES").map(PathBuf::from);
        let catalogs = env::var_os("SHEET_ITEMS")
            .map(|paths| env::split_paths(&paths).collect())
            .unwrap_or_default();
        Self { rules, catalogs }
    }
}
