//! The specification AST: criteria, operators, operands.

pub mod criterion;
pub mod operators;
pub mod spec;
pub mod values;

pub use self::criterion::{Criterion, CriterionBuilder};
pub use self::operators::Operator;
pub use self::spec::SearchSpec;
pub use self::values::Value;
