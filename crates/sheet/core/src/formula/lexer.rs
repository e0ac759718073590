//! Formula tokenizer.

use logos::{Lexer, Logos};

use crate::error::FormulaError;

/// A dice term such as `2d6` or `d20`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiceTerm {
    pub count: u32,
    pub faces: u32,
}

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
pub(crate) enum Token {
    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    #[regex(r"[0-9]*d[0-9]+", dice, priority = 4)]
    Dice(DiceTerm),

    /// `@path.to.value`, stored without the `@`.
    #[regex(r"@[A-Za-z_][A-Za-z0-9_.]*", |lex| lex.slice()[1..].to_string())]
    Reference(String),

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("==")]
    EqEq,
    #[token("!=")]
    BangEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(",")]
    Comma,
}

fn dice(lex: &mut Lexer<Token>) -> Option<DiceTerm> {
    let (count, faces) = lex.slice().split_once('d')?;
    let count = if count.is_empty() {
        1
    } else {
        count.parse().ok()?
    };
    let faces: u32 = faces.parse().ok()?;
    (faces > 0).then_some(DiceTerm { count, faces })
}

pub(crate) fn tokenize(expr: &str) -> Result<Vec<Token>, FormulaError> {
    let mut lexer = Token::lexer(expr);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next() {
        match token {
            Ok(token) => tokens.push(token),
            Err(()) => {
                return Err(FormulaError::Lex {
                    expr: expr.to_string(),
                    offset: lexer.span().start,
                });
            }
        }
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn references_drop_the_sigil() {
        let tokens = tokenize("@abilities.dex.mod + 2").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Reference("abilities.dex.mod".into()),
                Token::Plus,
                Token::Number(2.0),
            ]
        );
    }

    #[test]
    fn dice_terms_win_over_identifiers() {
        let tokens = tokenize("2d6 + d20").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Dice(DiceTerm { count: 2, faces: 6 }),
                Token::Plus,
                Token::Dice(DiceTerm { count: 1, faces: 20 }),
            ]
        );
    }

    #[test]
    fn function_names_are_identifiers() {
        let tokens = tokenize("floor(3.5)").unwrap();
        assert_eq!(tokens[0], Token::Ident("floor".into()));
        assert_eq!(tokens[2], Token::Number(3.5));
    }

    #[test]
    fn stray_characters_report_their_offset() {
        let error = tokenize("1 + $").unwrap_err();
        assert_eq!(
            error,
            FormulaError::Lex {
                expr: "1 + $".into(),
                offset: 4
            }
        );
    }
}
