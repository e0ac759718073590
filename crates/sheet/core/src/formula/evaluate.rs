//! Tree-walking evaluator for parsed formulas.

use super::parser::{BinaryOp, Expr, parse};
use super::{Bindings, EvalMode, EvalOptions, Evaluation, FormulaEvaluator};
use crate::error::FormulaError;

/// Default [`FormulaEvaluator`]: parses on every call and walks the tree.
#[derive(Clone, Copy, Debug, Default)]
pub struct ArithmeticEvaluator;

impl ArithmeticEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Evaluates an already-parsed expression.
    pub fn evaluate_expr(
        &self,
        expr: &Expr,
        bindings: &dyn Bindings,
        options: EvalOptions,
    ) -> Result<Evaluation, FormulaError> {
        let total = eval(expr, bindings, options.mode)?;
        if !total.is_finite() {
            return Err(FormulaError::NonFinite);
        }
        Ok(Evaluation {
            total,
            is_deterministic: !expr.has_dice(),
        })
    }
}

impl FormulaEvaluator for ArithmeticEvaluator {
    fn evaluate(
        &self,
        expr: &str,
        bindings: &dyn Bindings,
        options: EvalOptions,
    ) -> Result<Evaluation, FormulaError> {
        let parsed = parse(expr)?;
        self.evaluate_expr(&parsed, bindings, options)
    }
}

fn eval(expr: &Expr, bindings: &dyn Bindings, mode: EvalMode) -> Result<f64, FormulaError> {
    match expr {
        Expr::Number(value) => Ok(*value),
        Expr::Reference(name) => bindings
            .lookup(name)
            .ok_or_else(|| FormulaError::UnknownReference(name.clone())),
        Expr::Dice { count, faces } => Ok(roll(*count, *faces, mode)),
        Expr::Neg(inner) => Ok(-eval(inner, bindings, mode)?),
        Expr::Binary { op, left, right } => {
            let left = eval(left, bindings, mode)?;
            let right = eval(right, bindings, mode)?;
            binary(*op, left, right)
        }
        Expr::Call { name, args } => {
            let values = args
                .iter()
                .map(|arg| eval(arg, bindings, mode))
                .collect::<Result<Vec<_>, _>>()?;
            call(name, &values)
        }
    }
}

fn roll(count: u32, faces: u32, mode: EvalMode) -> f64 {
    let count = f64::from(count);
    let faces = f64::from(faces);
    match mode {
        EvalMode::Maximize => count * faces,
        EvalMode::Minimize => count,
        EvalMode::Average => count * (faces + 1.0) / 2.0,
    }
}

fn truth(value: bool) -> f64 {
    if value { 1.0 } else { 0.0 }
}

fn binary(op: BinaryOp, left: f64, right: f64) -> Result<f64, FormulaError> {
    Ok(match op {
        BinaryOp::Add => left + right,
        BinaryOp::Sub => left - right,
        BinaryOp::Mul => left * right,
        BinaryOp::Div | BinaryOp::Rem if right == 0.0 => {
            return Err(FormulaError::DivisionByZero);
        }
        BinaryOp::Div => left / right,
        BinaryOp::Rem => left % right,
        BinaryOp::Eq => truth(left == right),
        BinaryOp::Ne => truth(left != right),
        BinaryOp::Lt => truth(left < right),
        BinaryOp::Le => truth(left <= right),
        BinaryOp::Gt => truth(left > right),
        BinaryOp::Ge => truth(left >= right),
    })
}

fn arity(name: &str, expected: &str, found: usize) -> FormulaError {
    FormulaError::Arity {
        function: name.to_string(),
        expected: expected.to_string(),
        found,
    }
}

fn unary(name: &str, args: &[f64], f: fn(f64) -> f64) -> Result<f64, FormulaError> {
    match args {
        [value] => Ok(f(*value)),
        _ => Err(arity(name, "1", args.len())),
    }
}

fn call(name: &str, args: &[f64]) -> Result<f64, FormulaError> {
    match name {
        "floor" => unary(name, args, f64::floor),
        "ceil" => unary(name, args, f64::ceil),
        "round" => unary(name, args, f64::round),
        "abs" => unary(name, args, f64::abs),
        "sign" => unary(name, args, |value| {
            if value == 0.0 { 0.0 } else { value.signum() }
        }),
        "min" | "max" => {
            if args.is_empty() {
                return Err(arity(name, "at least 1", 0));
            }
            let pick = if name == "min" { f64::min } else { f64::max };
            Ok(args[1..].iter().fold(args[0], |acc, value| pick(acc, *value)))
        }
        "clamp" => match args {
            [value, low, high] => Ok(value.max(*low).min(*high)),
            _ => Err(arity(name, "3", args.len())),
        },
        "if" => match args {
            [condition, then, otherwise] => Ok(if *condition != 0.0 { *then } else { *otherwise }),
            _ => Err(arity(name, "3", args.len())),
        },
        _ => Err(FormulaError::UnknownFunction(name.to_string())),
    }
}
