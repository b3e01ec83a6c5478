//! Numeric field expressions.
//!
//! Range and area fields may be plain numbers, percentages, or arithmetic over
//! named variables:
//!
//! ```ignore
//! max_range 3
//! aoe_chance 50%
//! max_range size+level*2
//! max_aoe (level + 1) / 2
//! ```
//!
//! Evaluation substitutes variable values first, so the parser only ever sees
//! numbers, `+ - * / **`, and parentheses.

pub mod evaluate;
pub mod parse;

pub use evaluate::{evaluate, evaluate_expression, number_from};
pub use parse::{FormulaError, parse};

// ============================================================================
// Expression Definition
// ============================================================================

/// Arithmetic expression tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Numeric literal.
    Number(f64),

    /// Unary minus.
    Neg(Box<Expr>),

    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),

    /// Right-associative exponentiation (`**`).
    Pow(Box<Expr>, Box<Expr>),
}
