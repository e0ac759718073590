//! Rulebook configuration loader.

use std::path::Path;

use sheet_core::RulesConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`RulesConfig`] from TOML files.
pub struct RulesLoader;

impl RulesLoader {
    /// Load rules from a TOML file.
    ///
    /// Omitted keys keep their defaults, so a file may override only the
    /// stacking set or only the dice mode.
    pub fn load(path: &Path) -> LoadResult<RulesConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<RulesConfig> {
        let rules: RulesConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse rules TOML: {}", e))?;
        tracing::debug!(
            stacking = rules.stacking_types.len(),
            categories = rules.category_order.len(),
            mode = %rules.eval_mode,
            "loaded rules"
        );
        Ok(rules)
    }
}

#[cfg(test)]
mod tests {
    use sheet_core::{BonusType, EvalMode};

    use super::*;

    #[test]
    fn partial_files_keep_defaults() {
        let rules = RulesLoader::parse(
            r#"
            eval_mode = "average"
            stacking_types = ["untyped", "dodge"]
            "#,
        )
        .unwrap();

        assert_eq!(rules.eval_mode, EvalMode::Average);
        assert!(rules.is_stacking(&BonusType::DODGE));
        assert!(!rules.is_stacking(&BonusType::CIRCUMSTANCE));
        assert_eq!(rules.category_order, RulesConfig::default().category_order);
    }

    #[test]
    fn unknown_dice_mode_is_rejected() {
        assert!(RulesLoader::parse(r#"eval_mode = "random""#).is_err());
    }
}
