//! Two-pass construction of a [`Diagram`] from schema metadata.
//!
//! All entities are created before any foreign key is applied, because a
//! foreign key flags columns on its parent table, which may be enumerated
//! after the child.

use crate::error::Result;
use crate::graph::model::{Diagram, Entity, Relationship};
use crate::schema::{ForeignKeyInfo, SchemaReader};
use tracing::debug;

impl Diagram {
    /// Read the whole schema behind `reader` into a diagram
    pub fn build(reader: &SchemaReader) -> Result<Self> {
        let tables = reader.list_tables()?;
        let mut diagram = Diagram {
            entities: Vec::with_capacity(tables.len()),
            relationships: Vec::new(),
        };

        for table in &tables {
            let columns = reader.list_columns(table)?;
            debug!(table = %table, columns = columns.len(), "read columns");
            diagram.entities.push(Entity::new(table.as_str(), columns));
        }

        for table in &tables {
            let fks = reader.list_foreign_keys(table)?;
            debug!(table = %table, foreign_keys = fks.len(), "read foreign keys");
            for fk in &fks {
                diagram.add_foreign_key(table, fk);
            }
        }

        Ok(diagram)
    }

    /// Apply one foreign key declared on `table`.
    ///
    /// Flags every referencing and referenced column as a key, then records a
    /// single relationship from the first column pair only. Composite keys
    /// are not drawn as multiple edges.
    pub fn add_foreign_key(&mut self, table: &str, fk: &ForeignKeyInfo) {
        for column in &fk.columns {
            self.mark_key(table, column);
        }
        for column in &fk.referenced_columns {
            self.mark_key(&fk.referenced_table, column);
        }

        self.relationships.push(Relationship {
            child: table.to_string(),
            child_key: fk.columns.first().cloned().unwrap_or_default(),
            parent: fk.referenced_table.clone(),
            parent_key: fk.referenced_columns.first().cloned().unwrap_or_default(),
        });
    }
}
