//! Fluent search specifications for SQL engines.
//!
//! Compose optional, conditional filter criteria over one target entity
//! into a single conjunctive predicate, then hand it to an execution
//! backend. Each criterion names a field path (possibly crossing
//! relationships), an operator and an operand; criteria whose operand is
//! absent are skipped instead of producing degenerate filters, so one
//! specification covers every variant of an optional multi-field search.
//!
//! # Example
//! ```
//! use sift_core::SearchSpec;
//! use sift_core::schema::{EntityDef, Schema};
//! use sift_core::sql::{self, Dialect};
//!
//! let schema = Schema::new().entity(EntityDef::new("book", "books"));
//!
//! let spec = SearchSpec::new()
//!     .add(["title"]).like("prince")
//!     .add(["year"]).only_if(false).gt(1950);
//!
//! let query = sql::select(&spec, &schema, "book", Dialect::Postgres).unwrap();
//! assert_eq!(
//!     query.sql,
//!     r#"SELECT "books".* FROM "books" WHERE LOWER("books"."title") LIKE '%prince%'"#
//! );
//! ```
//!
//! Translation runs against the [`PredicateBuilder`] trait, so any store
//! able to resolve relationships and build boolean fragments can replace
//! the bundled SQL backend.

pub mod ast;
pub mod error;
pub mod predicate;
pub mod schema;
pub mod sql;

pub use ast::{Criterion, CriterionBuilder, Operator, SearchSpec, Value};
pub use error::SiftError;
pub use predicate::PredicateBuilder;
