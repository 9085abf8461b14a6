//! Damage-formula evaluation
//!
//! Attack damage is written as an arithmetic expression over the acting
//! combatant's stat names (e.g. `"strength * 2 + level"` or `"STR*2"`),
//! evaluated lazily at use time so formulas see runtime-current stats.
//! The engine only depends on the [`FormulaEvaluator`] trait; the
//! shipped implementation parses with nom.

pub mod parser;

use std::collections::HashMap;

use thiserror::Error;

use parser::Expr;

/// Failure of the formula collaborator. Always a configuration error
/// (bad attack data), never reachable from player input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormulaError {
    #[error("malformed expression '{0}'")]
    Syntax(String),

    #[error("unbound identifier '{0}'")]
    UnboundIdentifier(String),

    #[error("expression '{0}' did not evaluate to a finite number")]
    NonFinite(String),
}

/// Evaluates an arithmetic expression against a set of named bindings.
pub trait FormulaEvaluator {
    fn evaluate(
        &self,
        expression: &str,
        bindings: &HashMap<String, f64>,
    ) -> Result<f64, FormulaError>;
}

/// Default evaluator: nom-parsed AST, re-parsed per evaluation.
///
/// Formulas are short and evaluated once per attack use, so there is no
/// parse cache.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExprEvaluator;

impl ExprEvaluator {
    pub fn new() -> Self {
        Self
    }
}

impl FormulaEvaluator for ExprEvaluator {
    fn evaluate(
        &self,
        expression: &str,
        bindings: &HashMap<String, f64>,
    ) -> Result<f64, FormulaError> {
        let ast = parser::parse(expression)
            .map_err(|_| FormulaError::Syntax(expression.to_string()))?;
        let value = eval(&ast, bindings)?;
        if !value.is_finite() {
            return Err(FormulaError::NonFinite(expression.to_string()));
        }
        Ok(value)
    }
}

fn eval(expr: &Expr, bindings: &HashMap<String, f64>) -> Result<f64, FormulaError> {
    match expr {
        Expr::Number(n) => Ok(*n),
        Expr::Variable(name) => bindings
            .get(name)
            .copied()
            .ok_or_else(|| FormulaError::UnboundIdentifier(name.clone())),
        Expr::Negate(inner) => Ok(-eval(inner, bindings)?),
        Expr::Add(lhs, rhs) => Ok(eval(lhs, bindings)? + eval(rhs, bindings)?),
        Expr::Sub(lhs, rhs) => Ok(eval(lhs, bindings)? - eval(rhs, bindings)?),
        Expr::Mul(lhs, rhs) => Ok(eval(lhs, bindings)? * eval(rhs, bindings)?),
        Expr::Div(lhs, rhs) => Ok(eval(lhs, bindings)? / eval(rhs, bindings)?),
    }
}
