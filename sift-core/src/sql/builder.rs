use crate::ast::Value;
use crate::error::SiftError;
use crate::predicate::PredicateBuilder;
use crate::schema::Schema;
use crate::sql::Dialect;

/// A rendered statement plus the operands to bind, in placeholder order.
/// `params` is empty when the statement was rendered with inline
/// literals.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SqlQuery {
    pub sql: String,
    pub params: Vec<Value>,
}

/// Entity reference handed back by the builder: the schema entity plus
/// the alias it is reachable under in the rendered statement.
#[derive(Debug, Clone)]
pub struct SqlEntity {
    entity: String,
    alias: String,
}

/// [`PredicateBuilder`] that renders SQL fragments.
///
/// Every relationship traversal becomes its own aliased JOIN; traversals
/// are never coalesced across criteria, databases merge duplicate joins
/// on their own. The builder accumulates JOIN clauses and, in
/// parameterized mode, the operands backing each placeholder;
/// [`into_select`](SqlBuilder::into_select) flushes everything into one
/// statement.
#[derive(Debug)]
pub struct SqlBuilder<'a> {
    schema: &'a Schema,
    root: String,
    root_table: String,
    dialect: Dialect,
    joins: Vec<String>,
    next_join: usize,
    params: Option<Vec<Value>>,
}

impl<'a> SqlBuilder<'a> {
    /// Builder that inlines operands as SQL literals.
    pub fn new(schema: &'a Schema, root: &str, dialect: Dialect) -> Result<Self, SiftError> {
        let root_table = schema.lookup(root)?.table.clone();
        Ok(Self {
            schema,
            root: root.to_string(),
            root_table,
            dialect,
            joins: Vec::new(),
            next_join: 0,
            params: None,
        })
    }

    /// Builder that renders placeholders and collects the operands to
    /// bind.
    pub fn parameterized(
        schema: &'a Schema,
        root: &str,
        dialect: Dialect,
    ) -> Result<Self, SiftError> {
        Ok(Self {
            params: Some(Vec::new()),
            ..Self::new(schema, root, dialect)?
        })
    }

    /// Render the full SELECT for a finished predicate.
    pub fn into_select(self, predicate: String) -> SqlQuery {
        let table = self.dialect.quote(&self.root_table);
        let mut sql = format!("SELECT {table}.* FROM {table}");
        for join in &self.joins {
            sql.push(' ');
            sql.push_str(join);
        }
        if predicate != IDENTITY {
            sql.push_str(" WHERE ");
            sql.push_str(&predicate);
        }
        SqlQuery {
            sql,
            params: self.params.unwrap_or_default(),
        }
    }

    fn value_sql(&mut self, value: &Value) -> String {
        match &mut self.params {
            Some(params) => {
                params.push(value.clone());
                self.dialect.placeholder(params.len())
            }
            None => literal(value),
        }
    }

    fn compare(&mut self, attr: String, op: &str, value: &Value) -> Result<String, SiftError> {
        let operand = self.value_sql(value);
        Ok(format!("{attr} {op} {operand}"))
    }
}

/// The identity predicate: conjunction over no fragments.
const IDENTITY: &str = "TRUE";

impl PredicateBuilder for SqlBuilder<'_> {
    type Entity = SqlEntity;
    type Attribute = String;
    type Predicate = String;

    fn root(&mut self) -> SqlEntity {
        SqlEntity {
            entity: self.root.clone(),
            alias: self.root_table.clone(),
        }
    }

    fn join(&mut self, from: &SqlEntity, relation: &str) -> Result<SqlEntity, SiftError> {
        let entity = self.schema.lookup(&from.entity)?;
        let rel = entity.relation_named(relation)?;
        let target = self.schema.lookup(&rel.target)?;

        self.next_join += 1;
        let alias = format!("j{}", self.next_join);
        self.joins.push(format!(
            "JOIN {} AS {} ON {}.{} = {}.{}",
            self.dialect.quote(&target.table),
            self.dialect.quote(&alias),
            self.dialect.quote(&from.alias),
            self.dialect.quote(&rel.local_key),
            self.dialect.quote(&alias),
            self.dialect.quote(&rel.target_key),
        ));

        Ok(SqlEntity {
            entity: rel.target.clone(),
            alias,
        })
    }

    fn attribute(&mut self, entity: &SqlEntity, field: &str) -> Result<String, SiftError> {
        Ok(format!(
            "{}.{}",
            self.dialect.quote(&entity.alias),
            self.dialect.quote(field)
        ))
    }

    fn eq(&mut self, attr: String, value: &Value) -> Result<String, SiftError> {
        self.compare(attr, "=", value)
    }

    fn ne(&mut self, attr: String, value: &Value) -> Result<String, SiftError> {
        self.compare(attr, "!=", value)
    }

    fn like(&mut self, attr: String, pattern: &str) -> Result<String, SiftError> {
        let operand = self.value_sql(&Value::String(pattern.to_string()));
        Ok(format!("LOWER({attr}) LIKE {operand}"))
    }

    fn is_in(&mut self, attr: String, values: &[Value]) -> Result<String, SiftError> {
        // SQL has no empty list syntax; membership in nothing is false.
        if values.is_empty() {
            return Ok("FALSE".to_string());
        }
        let list: Vec<String> = values.iter().map(|v| self.value_sql(v)).collect();
        Ok(format!("{} IN ({})", attr, list.join(", ")))
    }

    fn not_in(&mut self, attr: String, values: &[Value]) -> Result<String, SiftError> {
        if values.is_empty() {
            return Ok("TRUE".to_string());
        }
        let list: Vec<String> = values.iter().map(|v| self.value_sql(v)).collect();
        Ok(format!("{} NOT IN ({})", attr, list.join(", ")))
    }

    fn gt(&mut self, attr: String, value: &Value) -> Result<String, SiftError> {
        self.compare(attr, ">", value)
    }

    fn gte(&mut self, attr: String, value: &Value) -> Result<String, SiftError> {
        self.compare(attr, ">=", value)
    }

    fn lt(&mut self, attr: String, value: &Value) -> Result<String, SiftError> {
        self.compare(attr, "<", value)
    }

    fn lte(&mut self, attr: String, value: &Value) -> Result<String, SiftError> {
        self.compare(attr, "<=", value)
    }

    fn and(&mut self, predicates: Vec<String>) -> String {
        if predicates.is_empty() {
            IDENTITY.to_string()
        } else {
            predicates.join(" AND ")
        }
    }
}

fn literal(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
        Value::Int(n) => n.to_string(),
        Value::Float(n) => n.to_string(),
        Value::String(s) => format!("'{}'", s.replace('\'', "''")),
        Value::Date(d) => format!("'{d}'"),
        Value::Timestamp(t) => format!("'{}'", t.to_rfc3339()),
        Value::Uuid(u) => format!("'{u}'"),
        Value::Array(items) => {
            let list: Vec<String> = items.iter().map(literal).collect();
            format!("({})", list.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::SearchSpec;
    use crate::schema::{EntityDef, RelationDef};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn schema() -> Schema {
        Schema::new()
            .entity(
                EntityDef::new("book", "books")
                    .relation(RelationDef::new("author", "author", "author_id", "id")),
            )
            .entity(EntityDef::new("author", "authors"))
    }

    fn render(spec: &SearchSpec, dialect: Dialect) -> SqlQuery {
        let schema = schema();
        let mut builder = SqlBuilder::new(&schema, "book", dialect).unwrap();
        let predicate = spec.to_predicate(&mut builder).unwrap();
        builder.into_select(predicate)
    }

    fn render_parameterized(spec: &SearchSpec, dialect: Dialect) -> SqlQuery {
        let schema = schema();
        let mut builder = SqlBuilder::parameterized(&schema, "book", dialect).unwrap();
        let predicate = spec.to_predicate(&mut builder).unwrap();
        builder.into_select(predicate)
    }

    #[test]
    fn test_eq_literal() {
        let spec = SearchSpec::new().add(["title"]).eq("Le Petit Prince");
        assert_eq!(
            render(&spec, Dialect::Postgres).sql,
            r#"SELECT "books".* FROM "books" WHERE "books"."title" = 'Le Petit Prince'"#
        );
    }

    #[test]
    fn test_string_literal_is_escaped() {
        let spec = SearchSpec::new().add(["title"]).eq("O'Brien");
        assert_eq!(
            render(&spec, Dialect::Postgres).sql,
            r#"SELECT "books".* FROM "books" WHERE "books"."title" = 'O''Brien'"#
        );
    }

    #[test]
    fn test_date_and_bool_literals() {
        let spec = SearchSpec::new()
            .add(["publication_date"]).gt(NaiveDate::from_ymd_opt(1950, 1, 1).unwrap())
            .add(["available"]).eq(true);
        assert_eq!(
            render(&spec, Dialect::Postgres).sql,
            r#"SELECT "books".* FROM "books" WHERE "books"."publication_date" > '1950-01-01' AND "books"."available" = TRUE"#
        );
    }

    #[test]
    fn test_in_list() {
        let spec = SearchSpec::new().add(["title"]).is_in(["a", "b"]);
        assert_eq!(
            render(&spec, Dialect::Postgres).sql,
            r#"SELECT "books".* FROM "books" WHERE "books"."title" IN ('a', 'b')"#
        );
    }

    #[test]
    fn test_strict_empty_in_matches_nothing() {
        let spec = SearchSpec::new().add(["title"]).strictly_in(Vec::<&str>::new());
        assert_eq!(
            render(&spec, Dialect::Postgres).sql,
            r#"SELECT "books".* FROM "books" WHERE FALSE"#
        );
    }

    #[test]
    fn test_empty_not_in_is_identity_fragment() {
        let schema = schema();
        let mut builder = SqlBuilder::new(&schema, "book", Dialect::Postgres).unwrap();
        let attr = "\"books\".\"title\"".to_string();
        assert_eq!(builder.not_in(attr, &[]).unwrap(), "TRUE");
    }

    #[test]
    fn test_no_criteria_renders_no_where() {
        assert_eq!(
            render(&SearchSpec::new(), Dialect::Postgres).sql,
            r#"SELECT "books".* FROM "books""#
        );
    }

    #[test]
    fn test_join_renders_fresh_alias() {
        let spec = SearchSpec::new().add(["author", "name"]).like("Dahl");
        assert_eq!(
            render(&spec, Dialect::Postgres).sql,
            r#"SELECT "books".* FROM "books" JOIN "authors" AS "j1" ON "books"."author_id" = "j1"."id" WHERE LOWER("j1"."name") LIKE '%dahl%'"#
        );
    }

    #[test]
    fn test_shared_path_prefix_is_not_coalesced() {
        let spec = SearchSpec::new()
            .add(["author", "name"]).like("a")
            .add(["author", "name"]).ne("X");
        assert_eq!(
            render(&spec, Dialect::Postgres).sql,
            r#"SELECT "books".* FROM "books" JOIN "authors" AS "j1" ON "books"."author_id" = "j1"."id" JOIN "authors" AS "j2" ON "books"."author_id" = "j2"."id" WHERE LOWER("j1"."name") LIKE '%a%' AND "j2"."name" != 'X'"#
        );
    }

    #[test]
    fn test_parameterized_postgres() {
        let spec = SearchSpec::new()
            .add(["title"]).eq("x")
            .add(["year"]).gt(1950);
        let query = render_parameterized(&spec, Dialect::Postgres);
        assert_eq!(
            query.sql,
            r#"SELECT "books".* FROM "books" WHERE "books"."title" = $1 AND "books"."year" > $2"#
        );
        assert_eq!(query.params, vec![Value::from("x"), Value::Int(1950)]);
    }

    #[test]
    fn test_parameterized_in_expands_elements() {
        let spec = SearchSpec::new().add(["title"]).is_in(["a", "b"]);
        let query = render_parameterized(&spec, Dialect::Postgres);
        assert_eq!(
            query.sql,
            r#"SELECT "books".* FROM "books" WHERE "books"."title" IN ($1, $2)"#
        );
        assert_eq!(query.params, vec![Value::from("a"), Value::from("b")]);
    }

    #[test]
    fn test_parameterized_like_binds_pattern() {
        let spec = SearchSpec::new().add(["title"]).like("Et");
        let query = render_parameterized(&spec, Dialect::Sqlite);
        assert_eq!(
            query.sql,
            r#"SELECT "books".* FROM "books" WHERE LOWER("books"."title") LIKE ?"#
        );
        assert_eq!(query.params, vec![Value::from("%et%")]);
    }

    #[test]
    fn test_mysql_quoting() {
        let spec = SearchSpec::new().add(["title"]).eq("x");
        assert_eq!(
            render(&spec, Dialect::MySql).sql,
            "SELECT `books`.* FROM `books` WHERE `books`.`title` = 'x'"
        );
    }

    #[test]
    fn test_unknown_root_entity() {
        let schema = schema();
        let err = SqlBuilder::new(&schema, "publisher", Dialect::Postgres).unwrap_err();
        assert_eq!(err, SiftError::UnknownEntity("publisher".to_string()));
    }

    #[test]
    fn test_unknown_relation() {
        let spec = SearchSpec::new().add(["publisher", "name"]).eq("x");
        let schema = schema();
        let mut builder = SqlBuilder::new(&schema, "book", Dialect::Postgres).unwrap();
        let err = spec.to_predicate(&mut builder).unwrap_err();
        assert_eq!(
            err,
            SiftError::UnknownRelation {
                entity: "book".to_string(),
                relation: "publisher".to_string(),
            }
        );
    }
}
