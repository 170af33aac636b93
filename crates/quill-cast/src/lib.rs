//! Cast legality and type promotion for the Quill analysis phase.
//!
//! - [`decide_cast`] decides whether a conversion between two catalog types is legal and which
//!   conversion the code generator has to emit.
//! - [`apply_cast`] folds a compile-time constant through a decided cast.
//! - The `promote_*` functions pick the common operand type of an operator.
//!
//! Everything here is pure over an immutable [`quill_types::TypeEnv`], so it can be called from
//! several analysis threads at once.

mod cast;
mod caster;
mod constant;
mod error;
mod operation;
mod promote;

pub use crate::cast::{Cast, CastKind, Conversion};
pub use crate::caster::decide_cast;
pub use crate::constant::apply_cast;
pub use crate::error::{CastError, ConstantCastError, InternalConsistencyError, PromotionError};
pub use crate::operation::{promote_binary, promote_unary, Operation};
pub use crate::promote::{
    promote_add, promote_conditional, promote_equality, promote_numeric_binary,
    promote_numeric_unary, promote_xor,
};
