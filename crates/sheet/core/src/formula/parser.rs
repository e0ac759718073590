//! Pratt parser for formula expressions.

use super::lexer::{DiceTerm, Token, tokenize};
use crate::error::FormulaError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

/// Parsed formula.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Number(f64),
    /// `@path`, without the sigil.
    Reference(String),
    Dice {
        count: u32,
        faces: u32,
    },
    Neg(Box<Expr>),
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Call {
        name: String,
        args: Vec<Expr>,
    },
}

impl Expr {
    /// True when any sub-expression is a dice term.
    pub fn has_dice(&self) -> bool {
        match self {
            Expr::Dice { .. } => true,
            Expr::Number(_) | Expr::Reference(_) => false,
            Expr::Neg(inner) => inner.has_dice(),
            Expr::Binary { left, right, .. } => left.has_dice() || right.has_dice(),
            Expr::Call { args, .. } => args.iter().any(Expr::has_dice),
        }
    }

    /// Every `@` reference in source order.
    pub fn references(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_references(&mut out);
        out
    }

    fn collect_references<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Expr::Reference(name) => out.push(name),
            Expr::Number(_) | Expr::Dice { .. } => {}
            Expr::Neg(inner) => inner.collect_references(out),
            Expr::Binary { left, right, .. } => {
                left.collect_references(out);
                right.collect_references(out);
            }
            Expr::Call { args, .. } => args.iter().for_each(|arg| arg.collect_references(out)),
        }
    }
}

/// Deepest nesting a formula may reach. Parenthesis, unary sign, call and
/// binary-chain levels all count, which also bounds the height of the tree.
pub const MAX_DEPTH: usize = 64;

/// Returns (precedence, op); higher binds tighter. All operators are left
/// associative.
fn binary_op_info(token: &Token) -> Option<(u8, BinaryOp)> {
    match token {
        Token::EqEq => Some((10, BinaryOp::Eq)),
        Token::BangEq => Some((10, BinaryOp::Ne)),
        Token::Lt => Some((10, BinaryOp::Lt)),
        Token::LtEq => Some((10, BinaryOp::Le)),
        Token::Gt => Some((10, BinaryOp::Gt)),
        Token::GtEq => Some((10, BinaryOp::Ge)),
        Token::Plus => Some((20, BinaryOp::Add)),
        Token::Minus => Some((20, BinaryOp::Sub)),
        Token::Star => Some((30, BinaryOp::Mul)),
        Token::Slash => Some((30, BinaryOp::Div)),
        Token::Percent => Some((30, BinaryOp::Rem)),
        _ => None,
    }
}

struct TokenStream<'a> {
    expr: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> TokenStream<'a> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, expected: Token, what: &str) -> Result<(), FormulaError> {
        match self.advance() {
            Some(token) if token == expected => Ok(()),
            Some(token) => Err(self.error(format!("expected {what}, found {token:?}"))),
            None => Err(self.error(format!("expected {what}, found end of input"))),
        }
    }

    fn error(&self, message: impl Into<String>) -> FormulaError {
        FormulaError::parse(self.expr, message)
    }

    fn check_depth(&self, depth: usize) -> Result<(), FormulaError> {
        if depth > MAX_DEPTH {
            return Err(self.error("formula nested too deeply"));
        }
        Ok(())
    }
}

/// Parses `expr` into an expression tree.
pub fn parse(expr: &str) -> Result<Expr, FormulaError> {
    let mut stream = TokenStream {
        expr,
        tokens: tokenize(expr)?,
        pos: 0,
    };
    if stream.peek().is_none() {
        return Err(stream.error("empty formula"));
    }
    let parsed = parse_pratt(&mut stream, 0, 0)?;
    match stream.peek() {
        None => Ok(parsed),
        Some(token) => Err(stream.error(format!("unexpected trailing {token:?}"))),
    }
}

fn parse_pratt(
    stream: &mut TokenStream,
    min_prec: u8,
    depth: usize,
) -> Result<Expr, FormulaError> {
    stream.check_depth(depth)?;
    let mut left = parse_prefix(stream, depth)?;

    // Each link of a left-associative chain deepens the tree by one.
    let mut links = 0;
    while let Some((prec, op)) = stream.peek().and_then(binary_op_info) {
        if prec < min_prec {
            break;
        }
        stream.advance();
        links += 1;
        let right = parse_pratt(stream, prec + 1, depth + links)?;
        left = Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        };
    }

    Ok(left)
}

fn parse_prefix(stream: &mut TokenStream, depth: usize) -> Result<Expr, FormulaError> {
    stream.check_depth(depth)?;
    match stream.peek() {
        Some(Token::Minus) => {
            stream.advance();
            Ok(Expr::Neg(Box::new(parse_prefix(stream, depth + 1)?)))
        }
        Some(Token::Plus) => {
            stream.advance();
            parse_prefix(stream, depth + 1)
        }
        _ => parse_atom(stream, depth),
    }
}

fn parse_atom(stream: &mut TokenStream, depth: usize) -> Result<Expr, FormulaError> {
    match stream.advance() {
        Some(Token::Number(value)) => Ok(Expr::Number(value)),
        Some(Token::Dice(DiceTerm { count, faces })) => Ok(Expr::Dice { count, faces }),
        Some(Token::Reference(name)) => Ok(Expr::Reference(name)),
        Some(Token::Ident(name)) => {
            let args = parse_call_args(stream, depth + 1)?;
            Ok(Expr::Call { name, args })
        }
        Some(Token::LParen) => {
            let inner = parse_pratt(stream, 0, depth + 1)?;
            stream.expect(Token::RParen, "`)`")?;
            Ok(inner)
        }
        Some(token) => Err(stream.error(format!("unexpected {token:?}"))),
        None => Err(stream.error("unexpected end of input")),
    }
}

fn parse_call_args(stream: &mut TokenStream, depth: usize) -> Result<Vec<Expr>, FormulaError> {
    stream.expect(Token::LParen, "`(` after function name")?;
    let mut args = Vec::new();
    if matches!(stream.peek(), Some(Token::RParen)) {
        stream.advance();
        return Ok(args);
    }
    loop {
        args.push(parse_pratt(stream, 0, depth)?);
        match stream.advance() {
            Some(Token::Comma) => continue,
            Some(Token::RParen) => return Ok(args),
            Some(token) => {
                return Err(stream.error(format!("expected `,` or `)`, found {token:?}")));
            }
            None => return Err(stream.error("unclosed argument list")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(value: f64) -> Box<Expr> {
        Box::new(Expr::Number(value))
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        assert_eq!(
            parse("1 + 2 * 3").unwrap(),
            Expr::Binary {
                op: BinaryOp::Add,
                left: num(1.0),
                right: Box::new(Expr::Binary {
                    op: BinaryOp::Mul,
                    left: num(2.0),
                    right: num(3.0),
                }),
            }
        );
    }

    #[test]
    fn subtraction_is_left_associative() {
        assert_eq!(
            parse("5 - 2 - 1").unwrap(),
            Expr::Binary {
                op: BinaryOp::Sub,
                left: Box::new(Expr::Binary {
                    op: BinaryOp::Sub,
                    left: num(5.0),
                    right: num(2.0),
                }),
                right: num(1.0),
            }
        );
    }

    #[test]
    fn calls_collect_arguments() {
        let parsed = parse("min(0, @abilities.dex.mod)").unwrap();
        assert_eq!(
            parsed,
            Expr::Call {
                name: "min".into(),
                args: vec![Expr::Number(0.0), Expr::Reference("abilities.dex.mod".into())],
            }
        );
        assert_eq!(parsed.references(), vec!["abilities.dex.mod"]);
        assert!(!parsed.has_dice());
    }

    #[test]
    fn dice_are_detected_inside_calls() {
        assert!(parse("max(1d4, 2)").unwrap().has_dice());
    }

    #[test]
    fn malformed_input_is_a_parse_error() {
        for expr in ["", "1 +", "(1 + 2", "1 2", "floor 3", "max(1,)"] {
            let error = parse(expr).unwrap_err();
            assert!(
                matches!(error, FormulaError::Parse { .. }),
                "{expr:?} gave {error:?}"
            );
        }
    }

    #[test]
    fn nesting_is_bounded() {
        let shallow = format!("{}1{}", "(".repeat(MAX_DEPTH - 1), ")".repeat(MAX_DEPTH - 1));
        assert_eq!(parse(&shallow).unwrap(), Expr::Number(1.0));

        let chain = vec!["1"; 40].join(" + ");
        assert!(parse(&chain).is_ok());

        let deep_parens = format!("{}1{}", "(".repeat(1_000), ")".repeat(1_000));
        let signs = format!("{}1", "-".repeat(100_000));
        let long_chain = vec!["1"; 100_000].join(" + ");
        let nested_calls = format!("{}1{}", "abs(".repeat(1_000), ")".repeat(1_000));
        for expr in [deep_parens, signs, long_chain, nested_calls] {
            match parse(&expr) {
                Err(FormulaError::Parse { message, .. }) => {
                    assert_eq!(message, "formula nested too deeply");
                }
                other => panic!("expected a depth error, got {other:?}"),
            }
        }
    }
}
