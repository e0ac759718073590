//! Command implementations for the sheet binary.
//!
//! Each command owns its CLI args and shares input loading through
//! [`Inputs`].

mod check;
mod derive;
mod explain;

pub use check::Check;
pub use derive::Derive;
pub use explain::Explain;

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use console::style;
use sheet_content::{CharacterLoader, ItemCatalog, ItemLoader, RulesLoader};
use sheet_core::{Character, DerivationReport, RulesConfig};

use crate::config::SheetConfig;

/// Input files shared by every command.
#[derive(Args)]
pub struct Inputs {
    /// Character RON file
    #[arg(value_name = "CHARACTER")]
    character: PathBuf,

    /// Rules TOML file (defaults to $SHEET_RULES, then built-in rules)
    #[arg(short, long, value_name = "FILE")]
    rules: Option<PathBuf>,

    /// Item catalog RON file; repeatable (defaults to $SHEET_ITEMS)
    #[arg(short, long = "items", value_name = "FILE")]
    items: Vec<PathBuf>,
}

impl Inputs {
    pub fn load(&self) -> Result<(RulesConfig, Character)> {
        let config = SheetConfig::from_env();

        let rules = match self.rules.as_ref().or(config.rules.as_ref()) {
            Some(path) => RulesLoader::load(path)?,
            None => RulesConfig::default(),
        };

        let catalog_paths = if self.items.is_empty() {
            config.catalogs
        } else {
            self.items.clone()
        };
        let catalog = if catalog_paths.is_empty() {
            ItemCatalog::default()
        } else {
            ItemLoader::load_all(catalog_paths.iter().map(PathBuf::as_path))?
        };

        let character = CharacterLoader::load(&self.character, &catalog)?;
        tracing::debug!(
            character = %character.name,
            items = character.items.len(),
            catalog = catalog.len(),
            "loaded inputs"
        );
        Ok((rules, character))
    }
}

/// Prints notices and violations to stderr. Returns how many there were.
pub(crate) fn print_problems(report: &DerivationReport) -> usize {
    for notice in &report.notices {
        let editor = notice
            .editor
            .as_ref()
            .map(|user| user.as_str())
            .unwrap_or("engine");
        eprintln!(
            "{} {} {}",
            style("✗").red().bold(),
            notice.error,
            style(format!("(editor: {editor})")).dim()
        );
    }
    for violation in &report.violations {
        eprintln!("{} {}", style("!").yellow().bold(), violation);
    }
    report.notices.len() + report.violations.len()
}
