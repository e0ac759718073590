//! Formula evaluation for change values.
//!
//! Formulas are short arithmetic expressions authored on changes, evaluated
//! against a live view of the character:
//!
//! ```text
//! @abilities.dex.mod                      // a sheet value
//! floor(@attributes.bab.total / 4) + 1    // arithmetic and functions
//! min(@abilities.dex.mod, 3)              // capped dex
//! 1d4 + 1                                 // dice resolve per EvalMode
//! ```
//!
//! The engine only depends on the [`FormulaEvaluator`] trait; the bundled
//! [`ArithmeticEvaluator`] is the default implementation.

mod evaluate;
mod lexer;
mod parser;

pub use evaluate::ArithmeticEvaluator;
pub use parser::{BinaryOp, Expr, parse};

use std::collections::{BTreeMap, HashMap};

use crate::error::FormulaError;

/// Named numeric values a formula can reference with `@name`.
pub trait Bindings {
    fn lookup(&self, name: &str) -> Option<f64>;
}

impl Bindings for BTreeMap<String, f64> {
    fn lookup(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

impl Bindings for HashMap<String, f64> {
    fn lookup(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

/// How dice terms resolve.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum EvalMode {
    /// Every die shows its highest face. Derivation always uses this.
    #[default]
    Maximize,
    /// Every die shows 1.
    Minimize,
    /// Every die shows its mean face.
    Average,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EvalOptions {
    pub mode: EvalMode,
}

impl EvalOptions {
    pub const fn maximize() -> Self {
        Self {
            mode: EvalMode::Maximize,
        }
    }
}

/// Result of evaluating a formula.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Evaluation {
    pub total: f64,
    /// False when the expression contained dice.
    pub is_deterministic: bool,
}

/// Evaluates arithmetic expressions against named bindings.
pub trait FormulaEvaluator: Send + Sync {
    fn evaluate(
        &self,
        expr: &str,
        bindings: &dyn Bindings,
        options: EvalOptions,
    ) -> Result<Evaluation, FormulaError>;
}
