//! Relationship metadata the SQL backend resolves field paths against.
//!
//! The translation engine never inspects a schema itself; path validity
//! is the backend's concern. This stays a plain data description: which
//! table backs an entity, and which key pair realizes each named
//! relationship.
//!
//! # Example
//! ```
//! use sift_core::schema::{EntityDef, RelationDef, Schema};
//!
//! let schema = Schema::new()
//!     .entity(
//!         EntityDef::new("book", "books")
//!             .relation(RelationDef::new("author", "author", "author_id", "id")),
//!     )
//!     .entity(EntityDef::new("author", "authors"));
//! ```

use serde::{Deserialize, Serialize};

use crate::error::SiftError;

/// The set of entities a specification can be rendered against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub entities: Vec<EntityDef>,
}

/// One entity: its backing table and outgoing relationships.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityDef {
    pub name: String,
    pub table: String,
    #[serde(default)]
    pub relations: Vec<RelationDef>,
}

/// A named relationship, realized as a key pair between two tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationDef {
    /// Name used in field paths.
    pub name: String,
    /// Target entity name.
    pub target: String,
    /// Join column on the owning side.
    pub local_key: String,
    /// Join column on the target side.
    pub target_key: String,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: register an entity.
    pub fn entity(mut self, entity: EntityDef) -> Self {
        self.entities.push(entity);
        self
    }

    /// Load a schema from a JSON description.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn lookup(&self, name: &str) -> Result<&EntityDef, SiftError> {
        self.entities
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| SiftError::UnknownEntity(name.to_string()))
    }
}

impl EntityDef {
    pub fn new(name: &str, table: &str) -> Self {
        Self {
            name: name.to_string(),
            table: table.to_string(),
            relations: Vec::new(),
        }
    }

    /// Builder: register an outgoing relationship.
    pub fn relation(mut self, relation: RelationDef) -> Self {
        self.relations.push(relation);
        self
    }

    pub fn relation_named(&self, name: &str) -> Result<&RelationDef, SiftError> {
        self.relations
            .iter()
            .find(|r| r.name == name)
            .ok_or_else(|| SiftError::UnknownRelation {
                entity: self.name.clone(),
                relation: name.to_string(),
            })
    }
}

impl RelationDef {
    pub fn new(name: &str, target: &str, local_key: &str, target_key: &str) -> Self {
        Self {
            name: name.to_string(),
            target: target.to_string(),
            local_key: local_key.to_string(),
            target_key: target_key.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Schema {
        Schema::new()
            .entity(
                EntityDef::new("book", "books")
                    .relation(RelationDef::new("author", "author", "author_id", "id")),
            )
            .entity(EntityDef::new("author", "authors"))
    }

    #[test]
    fn test_lookup() {
        let schema = sample();
        assert_eq!(schema.lookup("author").unwrap().table, "authors");
        assert_eq!(
            schema.lookup("nope").unwrap_err(),
            SiftError::UnknownEntity("nope".to_string())
        );
    }

    #[test]
    fn test_relation_lookup() {
        let schema = sample();
        let book = schema.lookup("book").unwrap();
        assert_eq!(book.relation_named("author").unwrap().target, "author");
        assert_eq!(
            book.relation_named("publisher").unwrap_err(),
            SiftError::UnknownRelation {
                entity: "book".to_string(),
                relation: "publisher".to_string(),
            }
        );
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "entities": [{
                "name": "book",
                "table": "books",
                "relations": [
                    { "name": "author", "target": "author", "local_key": "author_id", "target_key": "id" }
                ]
            }]
        }"#;
        let schema = Schema::from_json(json).unwrap();
        assert_eq!(schema.lookup("book").unwrap().relations.len(), 1);
    }
}
