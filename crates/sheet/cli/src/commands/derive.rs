//! Run a derivation pass and print the sheet.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use serde::Serialize;
use strum::IntoEnumIterator;

use sheet_core::{
    Ability, CharacterFlags, CharacterSheet, Derivation, DerivationEngine, DerivationReport, Save,
    SkillDef, paths,
};

use super::{Inputs, print_problems};

/// Run a derivation pass and print the results
#[derive(Parser)]
pub struct Derive {
    #[command(flatten)]
    inputs: Inputs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Headline numbers and any problems
    Summary,
    /// Every path, the report and the fingerprint as JSON
    Json,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    character: &'a str,
    flags: CharacterFlags,
    fingerprint: String,
    values: &'a CharacterSheet,
    report: &'a DerivationReport,
}

impl Derive {
    pub fn execute(self) -> Result<()> {
        let (rules, character) = self.inputs.load()?;
        let derivation = DerivationEngine::new(rules).derive(&character);

        match self.format {
            OutputFormat::Summary => {
                print_summary(&character.name, &character.skills, &derivation);
                print_problems(&derivation.report);
            }
            OutputFormat::Json => {
                let output = JsonOutput {
                    character: &character.name,
                    flags: derivation.flags,
                    fingerprint: hex::encode(derivation.fingerprint()),
                    values: &derivation.sheet,
                    report: &derivation.report,
                };
                let json = serde_json::to_string_pretty(&output)
                    .context("Failed to serialize derivation")?;
                println!("{json}");
            }
        }
        Ok(())
    }
}

fn print_summary(name: &str, skills: &[SkillDef], derivation: &Derivation) {
    let value = |path: &str| derivation.value(path);

    println!("{}", style(format!("=== {name} ===")).bold().green());
    if !derivation.flags.is_empty() {
        println!("{} {:?}", style("Flags:").bold().cyan(), derivation.flags);
    }
    println!();

    println!("{}", style("Abilities:").bold().yellow());
    for ability in Ability::iter() {
        println!(
            "  {:<4} {:>3} ({:+})",
            ability.as_ref(),
            value(paths::ability_total(ability).as_str()),
            value(paths::ability_mod(ability).as_str())
        );
    }

    println!("{}", style("Defense:").bold().yellow());
    println!(
        "  AC {}  touch {}  flat-footed {}",
        value(paths::AC_NORMAL.as_str()),
        value(paths::AC_TOUCH.as_str()),
        value(paths::AC_FLAT_FOOTED.as_str())
    );
    println!(
        "  CMD {}  flat-footed {}",
        value(paths::CMD.as_str()),
        value(paths::CMD_FLAT_FOOTED.as_str())
    );
    println!("  HP {}", value(paths::HP_MAX.as_str()));
    let saves: Vec<_> = Save::iter()
        .map(|save| format!("{save} {:+}", value(paths::save_total(save).as_str())))
        .collect();
    println!("  Saves {}", saves.join("  "));

    println!("{}", style("Offense:").bold().yellow());
    println!(
        "  BAB {:+}  melee {:+}  ranged {:+}",
        value(paths::BAB.as_str()),
        value(paths::ATTACK.as_str()) + value(paths::ATTACK_MELEE.as_str()),
        value(paths::ATTACK.as_str()) + value(paths::ATTACK_RANGED.as_str())
    );
    println!(
        "  CMB {:+}  init {:+}",
        value(paths::CMB.as_str()),
        value(paths::INIT.as_str())
    );

    if !skills.is_empty() {
        println!("{}", style("Skills:").bold().yellow());
        for skill in skills {
            for entry in skill.entries() {
                println!("  {:<20} {:+}", entry.key(), value(entry.mod_path().as_str()));
            }
        }
    }

    println!();
    println!(
        "{} {}",
        style("Fingerprint:").bold().cyan(),
        style(hex::encode(derivation.fingerprint())).dim()
    );
}
