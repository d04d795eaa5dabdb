//! Read-only introspection of a SQLite database's structure.
//!
//! This module provides:
//! - Table enumeration from `sqlite_master`
//! - Column enumeration in declaration order
//! - Foreign key enumeration, grouped per constraint with aligned column pairs

use crate::error::{ErdError, Result};
use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use tracing::debug;

const PROBE_QUERY: &str = "SELECT count(*) FROM sqlite_master";

const TABLES_QUERY: &str = r#"
SELECT name FROM sqlite_master
WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
ORDER BY name
"#;

const COLUMNS_QUERY: &str = "SELECT name FROM pragma_table_info(?1) ORDER BY cid";

const PRIMARY_KEY_QUERY: &str = "SELECT name FROM pragma_table_info(?1) WHERE pk > 0 ORDER BY pk";

const FOREIGN_KEYS_QUERY: &str = r#"
SELECT id, "from", "table", "to"
FROM pragma_foreign_key_list(?1)
ORDER BY id, seq
"#;

/// Foreign key constraint as reported by SQLite
///
/// `columns` and `referenced_columns` are positionally aligned: index `i` of
/// both lists forms one key pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyInfo {
    /// Referencing columns in the child table
    pub columns: Vec<String>,
    /// Parent table name
    pub referenced_table: String,
    /// Referenced columns in the parent table
    pub referenced_columns: Vec<String>,
}

/// Metadata reader over a single read-only connection.
///
/// The connection is released when the reader is dropped, so every exit
/// path closes it.
pub struct SchemaReader {
    conn: Connection,
}

impl SchemaReader {
    /// Open an existing database file without write access
    pub fn open(path: &Path) -> Result<Self> {
        let connection_error = |source: rusqlite::Error| ErdError::Connection {
            path: path.to_path_buf(),
            source,
        };

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(connection_error)?;

        // SQLite opens lazily; a file that is not a database only fails on first read.
        conn.query_row(PROBE_QUERY, [], |row| row.get::<_, i64>(0))
            .map_err(connection_error)?;

        debug!(path = %path.display(), "opened database");
        Ok(Self { conn })
    }

    /// Wrap an already open connection
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// User tables, ordered by name, excluding SQLite's internal tables
    pub fn list_tables(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(TABLES_QUERY).map_err(ErdError::tables)?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(ErdError::tables)?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(ErdError::tables)
    }

    /// Column names of `table` in declaration order
    pub fn list_columns(&self, table: &str) -> Result<Vec<String>> {
        self.column_names(COLUMNS_QUERY, table)
            .map_err(|e| ErdError::columns(table, e))
    }

    /// Foreign key constraints declared on `table`, in constraint id order.
    ///
    /// A constraint written as `REFERENCES parent` with no column list is
    /// resolved to the parent's primary key columns, so those columns get
    /// flagged as keys. Readers that scan SQLite's NULL `to` as an empty
    /// string flag nothing on the parent instead.
    pub fn list_foreign_keys(&self, table: &str) -> Result<Vec<ForeignKeyInfo>> {
        self.foreign_keys(table)
            .map_err(|e| ErdError::foreign_keys(table, e))
    }

    /// Close the connection, surfacing any error SQLite reports
    pub fn close(self) -> Result<()> {
        let path: PathBuf = self.conn.path().unwrap_or_default().into();
        self.conn
            .close()
            .map_err(|(_, source)| ErdError::Connection { path, source })
    }

    fn column_names(&self, query: &str, table: &str) -> rusqlite::Result<Vec<String>> {
        let mut stmt = self.conn.prepare_cached(query)?;
        let rows = stmt.query_map([table], |row| row.get::<_, String>(0))?;
        rows.collect()
    }

    fn foreign_keys(&self, table: &str) -> rusqlite::Result<Vec<ForeignKeyInfo>> {
        let mut stmt = self.conn.prepare_cached(FOREIGN_KEYS_QUERY)?;
        let rows = stmt.query_map([table], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, Option<String>>(3)?,
            ))
        })?;

        // (constraint id, key) pairs; `to` stays unresolved until grouping is done
        let mut grouped: Vec<(i64, String, Vec<String>, Vec<Option<String>>)> = Vec::new();
        for row in rows {
            let (id, from, parent, to) = row?;
            match grouped.last_mut() {
                Some((last_id, _, columns, referenced)) if *last_id == id => {
                    columns.push(from);
                    referenced.push(to);
                }
                _ => grouped.push((id, parent, vec![from], vec![to])),
            }
        }

        let mut fks = Vec::with_capacity(grouped.len());
        for (_, referenced_table, columns, referenced) in grouped {
            let referenced_columns = if referenced.iter().all(Option::is_some) {
                referenced.into_iter().flatten().collect()
            } else {
                // `REFERENCES parent` without a column list targets the parent's primary key
                let pk = self.column_names(PRIMARY_KEY_QUERY, &referenced_table)?;
                referenced
                    .into_iter()
                    .enumerate()
                    .map(|(i, col)| col.or_else(|| pk.get(i).cloned()).unwrap_or_default())
                    .collect()
            };

            fks.push(ForeignKeyInfo {
                columns,
                referenced_table,
                referenced_columns,
            });
        }

        Ok(fks)
    }
}
