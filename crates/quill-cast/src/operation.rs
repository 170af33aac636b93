use std::fmt;

use quill_types::{Sort, Type, TypeEnv};
use serde::Serialize;

use crate::promote::{
    promote_add, promote_equality, promote_numeric_binary, promote_numeric_unary, promote_xor,
};
use crate::PromotionError;

/// Script operators whose operand types go through promotion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Mul,
    Div,
    Rem,
    Add,
    Sub,
    Lsh,
    Rsh,
    Ush,
    BwAnd,
    Xor,
    BwOr,
    Eq,
    EqR,
    Ne,
    NeR,
    Lt,
    Lte,
    Gt,
    Gte,
    Not,
    BwNot,
    Plus,
    Minus,
}

impl Operation {
    pub fn symbol(self) -> &'static str {
        match self {
            Operation::Mul => "*",
            Operation::Div => "/",
            Operation::Rem => "%",
            Operation::Add | Operation::Plus => "+",
            Operation::Sub | Operation::Minus => "-",
            Operation::Lsh => "<<",
            Operation::Rsh => ">>",
            Operation::Ush => ">>>",
            Operation::BwAnd => "&",
            Operation::Xor => "^",
            Operation::BwOr => "|",
            Operation::Eq => "==",
            Operation::EqR => "===",
            Operation::Ne => "!=",
            Operation::NeR => "!==",
            Operation::Lt => "<",
            Operation::Lte => "<=",
            Operation::Gt => ">",
            Operation::Gte => ">=",
            Operation::Not => "!",
            Operation::BwNot => "~",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Operation::Mul => "multiplication",
            Operation::Div => "division",
            Operation::Rem => "remainder",
            Operation::Add => "addition",
            Operation::Sub => "subtraction",
            Operation::Lsh => "left shift",
            Operation::Rsh => "right shift",
            Operation::Ush => "unsigned shift",
            Operation::BwAnd => "bitwise and",
            Operation::Xor => "bitwise xor",
            Operation::BwOr => "bitwise or",
            Operation::Eq => "equals",
            Operation::EqR => "reference equals",
            Operation::Ne => "not equals",
            Operation::NeR => "reference not equals",
            Operation::Lt => "less than",
            Operation::Lte => "less than or equals",
            Operation::Gt => "greater than",
            Operation::Gte => "greater than or equals",
            Operation::Not => "boolean not",
            Operation::BwNot => "bitwise not",
            Operation::Plus => "positive",
            Operation::Minus => "negation",
        }
    }

    pub fn is_unary(self) -> bool {
        matches!(
            self,
            Operation::Not | Operation::BwNot | Operation::Plus | Operation::Minus
        )
    }

    /// Parse an operator symbol. `+` and `-` are ambiguous, so the caller says whether a unary
    /// operator is wanted.
    pub fn from_symbol(symbol: &str, unary: bool) -> Option<Self> {
        let op = match (symbol, unary) {
            ("+", true) => Operation::Plus,
            ("-", true) => Operation::Minus,
            ("!", true) => Operation::Not,
            ("~", true) => Operation::BwNot,
            (_, true) => return None,
            ("*", false) => Operation::Mul,
            ("/", false) => Operation::Div,
            ("%", false) => Operation::Rem,
            ("+", false) => Operation::Add,
            ("-", false) => Operation::Sub,
            ("<<", false) => Operation::Lsh,
            (">>", false) => Operation::Rsh,
            (">>>", false) => Operation::Ush,
            ("&", false) => Operation::BwAnd,
            ("^", false) => Operation::Xor,
            ("|", false) => Operation::BwOr,
            ("==", false) => Operation::Eq,
            ("===", false) => Operation::EqR,
            ("!=", false) => Operation::Ne,
            ("!==", false) => Operation::NeR,
            ("<", false) => Operation::Lt,
            ("<=", false) => Operation::Lte,
            (">", false) => Operation::Gt,
            (">=", false) => Operation::Gte,
            (_, false) => return None,
        };
        Some(op)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name(), self.symbol())
    }
}

/// Working operand type for a binary operator.
///
/// For comparisons this is the type both operands are converted to, not the (boolean) result.
/// For shifts it is the promoted left operand; the right operand only has to be integral.
pub fn promote_binary<'env>(
    env: &'env dyn TypeEnv,
    location: &str,
    op: Operation,
    left: &'env Type,
    right: &'env Type,
) -> Result<&'env Type, PromotionError> {
    let promoted = match op {
        Operation::Mul
        | Operation::Div
        | Operation::Rem
        | Operation::Sub
        | Operation::Lt
        | Operation::Lte
        | Operation::Gt
        | Operation::Gte => promote_numeric_binary(env, left, right, true),
        Operation::Add => promote_add(env, left, right),
        Operation::BwAnd | Operation::BwOr => promote_numeric_binary(env, left, right, false),
        Operation::Xor => promote_xor(env, left, right),
        Operation::Eq | Operation::EqR | Operation::Ne | Operation::NeR => {
            promote_equality(env, left, right)
        }
        Operation::Lsh | Operation::Rsh | Operation::Ush => {
            promote_numeric_unary(env, right, false)
                .and_then(|_| promote_numeric_unary(env, left, false))
        }
        Operation::Not | Operation::BwNot | Operation::Plus | Operation::Minus => None,
    };

    promoted.ok_or_else(|| {
        tracing::debug!(
            target: "quill.cast",
            location,
            op = op.symbol(),
            left = %left,
            right = %right,
            "no common operand type"
        );
        PromotionError::NoCommonType {
            location: location.to_string(),
            op,
            left: left.name.clone(),
            right: right.name.clone(),
        }
    })
}

/// Working operand type for a unary operator.
pub fn promote_unary<'env>(
    env: &'env dyn TypeEnv,
    location: &str,
    op: Operation,
    operand: &'env Type,
) -> Result<&'env Type, PromotionError> {
    let promoted = match op {
        Operation::Not if operand.sort.is_bool() || operand.sort == Sort::Def => {
            env.canonical(Sort::Bool)
        }
        Operation::BwNot => promote_numeric_unary(env, operand, false),
        Operation::Plus | Operation::Minus => promote_numeric_unary(env, operand, true),
        _ => None,
    };

    promoted.ok_or_else(|| PromotionError::NoUnaryType {
        location: location.to_string(),
        op,
        operand: operand.name.clone(),
    })
}
