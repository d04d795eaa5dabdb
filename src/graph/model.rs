//! In-memory ERD model handed to the template renderer.

use serde::Serialize;

/// A column of an entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    /// Column name
    pub name: String,
    /// Whether the column takes part in any foreign key, on either side
    pub key: bool,
}

/// A table and its columns, in schema order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entity {
    /// Table name
    pub name: String,
    /// Columns in declaration order
    pub attributes: Vec<Attribute>,
}

impl Entity {
    /// Create an entity whose attributes all start out unkeyed
    pub fn new<I, S>(name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            attributes: columns
                .into_iter()
                .map(|c| Attribute {
                    name: c.into(),
                    key: false,
                })
                .collect(),
        }
    }

    /// Get an attribute by name
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

/// One foreign key, by name only
///
/// Names are not checked against the diagram's entities; a dangling
/// constraint still produces a relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relationship {
    /// Referencing table
    pub child: String,
    /// Referencing column
    pub child_key: String,
    /// Referenced table
    pub parent: String,
    /// Referenced column
    pub parent_key: String,
}

/// Complete diagram: entities in table order plus relationships
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diagram {
    pub entities: Vec<Entity>,
    pub relationships: Vec<Relationship>,
}

impl Diagram {
    /// Get an entity by name
    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name == name)
    }

    /// Total number of attributes across all entities
    pub fn attribute_count(&self) -> usize {
        self.entities.iter().map(|e| e.attributes.len()).sum()
    }

    /// Flag `column` of `table` as a key.
    ///
    /// Every entity and attribute with a matching name is flagged. Unknown
    /// names are ignored. Flags are never cleared.
    pub fn mark_key(&mut self, table: &str, column: &str) {
        for entity in self.entities.iter_mut().filter(|e| e.name == table) {
            for attr in entity.attributes.iter_mut().filter(|a| a.name == column) {
                attr.key = true;
            }
        }
    }

    /// Check if the diagram has no entities
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
