//! Report formula failures and content violations.

use anyhow::Result;
use clap::Parser;
use console::style;

use sheet_core::{ChangeStatus, DerivationEngine, UserId};

use super::{Inputs, print_problems};

/// Report formula failures and content violations
#[derive(Parser)]
pub struct Check {
    #[command(flatten)]
    inputs: Inputs,

    /// Only show notices this user may act on
    #[arg(short, long, value_name = "USER")]
    user: Option<String>,
}

impl Check {
    pub fn execute(self) -> Result<()> {
        let (rules, character) = self.inputs.load()?;
        let derivation = DerivationEngine::new(rules).derive(&character);
        let report = &derivation.report;

        let inert = report
            .outcomes
            .iter()
            .filter(|outcome| outcome.status == ChangeStatus::Inert)
            .count();
        println!(
            "{} {} changes, {} inert, {} failed",
            style("Checked:").bold().cyan(),
            report.outcomes.len(),
            inert,
            report.failed().count()
        );

        let problems = match self.user {
            Some(user) => {
                let user = UserId::new(user);
                let mut count = 0;
                for notice in report.notices_for(&user) {
                    eprintln!("{} {}", style("✗").red().bold(), notice.error);
                    count += 1;
                }
                count
            }
            None => print_problems(report),
        };

        if problems > 0 {
            anyhow::bail!("{} problem(s) in {}", problems, character.name);
        }
        println!("{}", style("✓ No problems found").green().bold());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use tempfile::TempDir;

    use super::*;

    const CATALOG: &str = r#"(
    items: [
        (
            id: "lucky-charm",
            name: "Lucky Charm",
            editor: Some("alice"),
            changes: [
                (id: "lucky-charm.ac", formula: "@abilities.luck.mod", category: "ac", bonus_type: "luck"),
            ],
        ),
        (
            id: "ring",
            name: "Ring of Protection +1",
            changes: [
                (id: "ring.ac", formula: "1", category: "ac", bonus_type: "deflection"),
            ],
        ),
    ],
)"#;

    fn campaign(equipped: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("rules.toml"), "").unwrap();
        fs::write(dir.path().join("items.ron"), CATALOG).unwrap();
        let character = format!("(character: (name: \"Kyra\"), equipped: [{equipped}])");
        fs::write(dir.path().join("kyra.ron"), character).unwrap();
        dir
    }

    fn check(dir: &Path, user: Option<&str>) -> Result<()> {
        let path = |name: &str| dir.join(name).to_string_lossy().into_owned();
        let mut args = vec![
            "check".to_string(),
            path("kyra.ron"),
            "--rules".to_string(),
            path("rules.toml"),
            "--items".to_string(),
            path("items.ron"),
        ];
        if let Some(user) = user {
            args.extend(["--user".to_string(), user.to_string()]);
        }
        Check::try_parse_from(args).unwrap().execute()
    }

    #[test]
    fn clean_characters_pass() {
        let dir = campaign("\"ring\"");
        assert!(check(dir.path(), None).is_ok());
    }

    #[test]
    fn broken_formulas_fail_the_check() {
        let dir = campaign("\"lucky-charm\", \"ring\"");
        let error = check(dir.path(), None).unwrap_err();
        assert!(error.to_string().contains("1 problem(s) in Kyra"), "{error}");
    }

    #[test]
    fn user_filter_keeps_only_their_notices() {
        let dir = campaign("\"lucky-charm\", \"ring\"");
        assert!(check(dir.path(), Some("alice")).is_err());
        assert!(check(dir.path(), Some("bob")).is_ok());
    }
}
