//! SQL rendering backend: a [`PredicateBuilder`](crate::PredicateBuilder)
//! that turns a specification into a SELECT statement.

mod builder;
mod dialect;

pub use builder::{SqlBuilder, SqlEntity, SqlQuery};
pub use dialect::Dialect;

use crate::ast::SearchSpec;
use crate::error::SiftError;
use crate::schema::Schema;

/// Render `spec` as a SELECT with operands inlined as SQL literals.
pub fn select(
    spec: &SearchSpec,
    schema: &Schema,
    entity: &str,
    dialect: Dialect,
) -> Result<SqlQuery, SiftError> {
    let mut builder = SqlBuilder::new(schema, entity, dialect)?;
    let predicate = spec.to_predicate(&mut builder)?;
    Ok(builder.into_select(predicate))
}

/// Render `spec` as a SELECT with placeholders, returning the operands
/// to bind in placeholder order.
pub fn select_parameterized(
    spec: &SearchSpec,
    schema: &Schema,
    entity: &str,
    dialect: Dialect,
) -> Result<SqlQuery, SiftError> {
    let mut builder = SqlBuilder::parameterized(schema, entity, dialect)?;
    let predicate = spec.to_predicate(&mut builder)?;
    Ok(builder.into_select(predicate))
}
