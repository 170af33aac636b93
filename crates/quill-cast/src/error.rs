use crate::Operation;

/// A statically detected illegal conversion.
///
/// `location` is an opaque token supplied by the front end and threaded through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Error{location}: Cannot cast from [{actual}] to [{expected}].")]
pub struct CastError {
    pub location: String,
    pub actual: String,
    pub expected: String,
}

/// The analysis phase broke one of its own contracts, e.g. folded a constant through a cast the
/// decision engine never produced for that value.
///
/// This is never a user error; callers should abort the compilation rather than report it as a
/// diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Error{location}: Cannot cast from [{from}] to [{to}].")]
pub struct InternalConsistencyError {
    pub location: String,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConstantCastError {
    #[error("Error{location}: Cannot cast [String] with length greater than one to [char].")]
    StringLength { location: String },

    #[error("Error{location}: Cannot cast empty [String] to [char].")]
    EmptyString { location: String },

    #[error(transparent)]
    Internal(#[from] InternalConsistencyError),
}

impl ConstantCastError {
    /// `true` when the error is a contract violation that must not be reported as a diagnostic.
    pub fn is_internal(&self) -> bool {
        matches!(self, ConstantCastError::Internal(_))
    }
}

/// No common working type exists for the operands of an operator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PromotionError {
    #[error(
        "Error{location}: Cannot apply {name} [{symbol}] to types [{left}] and [{right}].",
        name = .op.name(),
        symbol = .op.symbol()
    )]
    NoCommonType {
        location: String,
        op: Operation,
        left: String,
        right: String,
    },

    #[error(
        "Error{location}: Cannot apply {name} [{symbol}] to type [{operand}].",
        name = .op.name(),
        symbol = .op.symbol()
    )]
    NoUnaryType {
        location: String,
        op: Operation,
        operand: String,
    },
}
