//! SQLx integration for sift.
//!
//! Render a search specification and execute it with typed results.
//!
//! # Example
//! ```no_run
//! use sift_core::schema::{EntityDef, Schema};
//! use sift_sqlx::prelude::*;
//!
//! #[derive(sqlx::FromRow)]
//! struct Book {
//!     id: i64,
//!     title: String,
//! }
//!
//! async fn example(pool: &sqlx::PgPool) -> Result<(), Box<dyn std::error::Error>> {
//!     let schema = Schema::new().entity(EntityDef::new("book", "books"));
//!     let spec = SearchSpec::new().add(["title"]).like("prince");
//!
//!     let query = spec_to_sql_parameterized(&spec, &schema, "book", Dialect::Postgres)?;
//!     let books: Vec<Book> = sift_sqlx::bind_params!(sqlx::query_as(&query.sql), &query.params)
//!         .fetch_all(pool)
//!         .await?;
//!     Ok(())
//! }
//! ```

use sift_core::schema::Schema;
use sift_core::sql::{self, Dialect, SqlQuery};
use sift_core::{SearchSpec, SiftError};

pub use sift_core::ast::Value;

/// Render a specification as a SELECT with inline literals.
pub fn spec_to_sql(
    spec: &SearchSpec,
    schema: &Schema,
    entity: &str,
    dialect: Dialect,
) -> Result<String, SiftError> {
    Ok(sql::select(spec, schema, entity, dialect)?.sql)
}

/// Render a specification with placeholders, returning the SQL and the
/// operands to bind in placeholder order.
pub fn spec_to_sql_parameterized(
    spec: &SearchSpec,
    schema: &Schema,
    entity: &str,
    dialect: Dialect,
) -> Result<SqlQuery, SiftError> {
    sql::select_parameterized(spec, schema, entity, dialect)
}

/// Bind a rendered parameter list onto a `sqlx::query` / `query_as`.
///
/// Works against any database whose driver encodes the scalar types.
/// Rendering expands array operands into individual scalar
/// placeholders, so rendered parameter lists only carry scalars; an
/// array in a hand-assembled list binds as its display form.
///
/// # Example
/// ```ignore
/// let rows = bind_params!(sqlx::query_as(&query.sql), &query.params)
///     .fetch_all(&pool)
///     .await?;
/// ```
#[macro_export]
macro_rules! bind_params {
    ($query:expr, $params:expr) => {{
        let mut q = $query;
        for value in $params {
            q = match value {
                $crate::Value::Null => q.bind(Option::<String>::None),
                $crate::Value::Bool(b) => q.bind(*b),
                $crate::Value::Int(n) => q.bind(*n),
                $crate::Value::Float(x) => q.bind(*x),
                $crate::Value::String(s) => q.bind(s.clone()),
                $crate::Value::Date(d) => q.bind(*d),
                $crate::Value::Timestamp(t) => q.bind(*t),
                $crate::Value::Uuid(u) => q.bind(*u),
                $crate::Value::Array(_) => q.bind(value.to_string()),
            };
        }
        q
    }};
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{spec_to_sql, spec_to_sql_parameterized};
    pub use sift_core::sql::{Dialect, SqlQuery};
    pub use sift_core::{SearchSpec, Value};
}
