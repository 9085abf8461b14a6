//! nom grammar for damage formulas
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := factor (('*' | '/') factor)*
//! factor := number | identifier | '(' expr ')' | '-' factor
//! ```

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, char, digit1, multispace0},
    combinator::{all_consuming, map, map_res, opt, recognize},
    error::Error,
    multi::many0,
    sequence::{delimited, pair, preceded},
    IResult, Parser,
};

/// Parsed formula expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Variable(String),
    Negate(Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
}

/// Parse a complete formula; trailing garbage is rejected.
pub fn parse(input: &str) -> Result<Expr, nom::Err<Error<&str>>> {
    let (_, ast) = all_consuming(expr).parse(input)?;
    Ok(ast)
}

fn ws<'a, O, P>(inner: P) -> impl Parser<&'a str, Output = O, Error = Error<&'a str>>
where
    P: Parser<&'a str, Output = O, Error = Error<&'a str>>,
{
    delimited(multispace0, inner, multispace0)
}

fn expr(input: &str) -> IResult<&str, Expr> {
    let (input, first) = term(input)?;
    let (input, rest) = many0(pair(ws(alt((char('+'), char('-')))), term)).parse(input)?;
    Ok((input, fold_binary(first, rest)))
}

fn term(input: &str) -> IResult<&str, Expr> {
    let (input, first) = factor(input)?;
    let (input, rest) = many0(pair(ws(alt((char('*'), char('/')))), factor)).parse(input)?;
    Ok((input, fold_binary(first, rest)))
}

fn factor(input: &str) -> IResult<&str, Expr> {
    ws(alt((number, identifier, parens, negation))).parse(input)
}

fn fold_binary(first: Expr, rest: Vec<(char, Expr)>) -> Expr {
    rest.into_iter().fold(first, |lhs, (op, rhs)| {
        let (lhs, rhs) = (Box::new(lhs), Box::new(rhs));
        match op {
            '+' => Expr::Add(lhs, rhs),
            '-' => Expr::Sub(lhs, rhs),
            '*' => Expr::Mul(lhs, rhs),
            _ => Expr::Div(lhs, rhs),
        }
    })
}

fn number(input: &str) -> IResult<&str, Expr> {
    map_res(
        recognize(pair(digit1, opt(preceded(char('.'), digit1)))),
        |s: &str| s.parse::<f64>().map(Expr::Number),
    )
    .parse(input)
}

fn identifier(input: &str) -> IResult<&str, Expr> {
    map(
        recognize(pair(
            alt((alpha1, tag("_"))),
            many0(alt((alphanumeric1, tag("_")))),
        )),
        |s: &str| Expr::Variable(s.to_string()),
    )
    .parse(input)
}

fn parens(input: &str) -> IResult<&str, Expr> {
    delimited(char('('), expr, char(')')).parse(input)
}

fn negation(input: &str) -> IResult<&str, Expr> {
    map(preceded(char('-'), factor), |e| Expr::Negate(Box::new(e))).parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence() {
        let ast = parse("1 + 2 * 3").unwrap();
        assert_eq!(
            ast,
            Expr::Add(
                Box::new(Expr::Number(1.0)),
                Box::new(Expr::Mul(
                    Box::new(Expr::Number(2.0)),
                    Box::new(Expr::Number(3.0)),
                )),
            )
        );
    }

    #[test]
    fn test_identifier_with_underscore_and_digits() {
        assert_eq!(
            parse("max_hp2").unwrap(),
            Expr::Variable("max_hp2".to_string())
        );
    }

    #[test]
    fn test_rejects_trailing_garbage() {
        assert!(parse("1 + 2 !").is_err());
    }
}
