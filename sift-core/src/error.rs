use thiserror::Error;

use crate::ast::Operator;

/// Errors surfaced while translating a specification into a predicate.
///
/// All of these are caller mistakes detected synchronously; nothing is
/// retried and no partial predicate is ever returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SiftError {
    /// A criterion was built over an empty field path.
    #[error("criterion has an empty field path")]
    EmptyFieldPath,

    /// An entity name does not resolve against the schema.
    #[error("unknown entity `{0}`")]
    UnknownEntity(String),

    /// A path segment names a relationship the schema does not know.
    #[error("unknown relation `{relation}` on entity `{entity}`")]
    UnknownRelation { entity: String, relation: String },

    /// An operator was applied to an operand of the wrong shape.
    #[error("operator {op} expects {expected} operand, got {found}")]
    InvalidOperand {
        op: Operator,
        expected: &'static str,
        found: &'static str,
    },
}
