//! Show the breakdown behind one sheet path.

use anyhow::Result;
use clap::Parser;
use console::style;

use sheet_core::{DerivationEngine, Operator, ProvenanceEntry};

use super::Inputs;

/// Show what contributed to one sheet path
#[derive(Parser)]
pub struct Explain {
    #[command(flatten)]
    inputs: Inputs,

    /// Sheet path (e.g., attributes.ac.normal.total)
    #[arg(value_name = "PATH")]
    path: String,

    /// Also list the individual changes folded into each line
    #[arg(short, long)]
    verbose: bool,
}

impl Explain {
    pub fn execute(self) -> Result<()> {
        let (rules, character) = self.inputs.load()?;
        let derivation = DerivationEngine::new(rules).derive(&character);

        if !derivation.sheet.contains(&self.path) {
            anyhow::bail!(
                "Path not found on {}'s sheet: {}\n\nHint: run `sheet derive --format json` to list paths",
                character.name,
                self.path
            );
        }

        let buckets = derivation.explain(&self.path);
        println!(
            "{} {} = {}",
            style("Path:").bold().cyan(),
            self.path,
            style(derivation.value(&self.path)).bold()
        );

        if buckets.is_empty() {
            println!("  {}", style("no contributions").dim());
            return Ok(());
        }
        if !buckets.positive.is_empty() {
            println!("{}", style("Bonuses:").bold().green());
            for entry in &buckets.positive {
                print_entry(entry, self.verbose);
            }
        }
        if !buckets.negative.is_empty() {
            println!("{}", style("Penalties:").bold().red());
            for entry in &buckets.negative {
                print_entry(entry, self.verbose);
            }
        }
        Ok(())
    }
}

fn print_entry(entry: &ProvenanceEntry, verbose: bool) {
    let amount = match entry.operator {
        Operator::Add => format!("{:+}", entry.amount),
        Operator::Set => format!("= {}", entry.amount),
    };
    println!(
        "  {:>6}  {} {}",
        amount,
        entry.label,
        style(format!("[{}]", entry.bonus_type)).dim()
    );
    if verbose && entry.parts.len() > 1 {
        for part in &entry.parts {
            println!(
                "          {} {:+} [{}]",
                style(&part.change).dim(),
                part.amount,
                part.bonus_type
            );
        }
    }
}
