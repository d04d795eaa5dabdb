//! Error types for each stage of ERD generation.

use std::path::PathBuf;
use thiserror::Error;

/// Failure raised while reading a schema or rendering a diagram.
///
/// Every variant is fatal; the binary reports it once and exits.
#[derive(Debug, Error)]
pub enum ErdError {
    #[error("No database specified")]
    NoDatabase,

    #[error("Error opening database '{}': {source}", .path.display())]
    Connection {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Error listing {what}{}: {source}", in_table(.table))]
    SchemaQuery {
        what: &'static str,
        table: Option<String>,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Error loading template file: {0}")]
    TemplateLoad(#[source] Box<handlebars::TemplateError>),

    #[error("Error generating digraph: {0}")]
    TemplateRender(#[source] Box<handlebars::RenderError>),
}

impl ErdError {
    pub(crate) fn tables(source: rusqlite::Error) -> Self {
        ErdError::SchemaQuery {
            what: "tables",
            table: None,
            source,
        }
    }

    pub(crate) fn columns(table: &str, source: rusqlite::Error) -> Self {
        ErdError::SchemaQuery {
            what: "columns",
            table: Some(table.to_string()),
            source,
        }
    }

    pub(crate) fn foreign_keys(table: &str, source: rusqlite::Error) -> Self {
        ErdError::SchemaQuery {
            what: "FKs",
            table: Some(table.to_string()),
            source,
        }
    }
}

fn in_table(table: &Option<String>) -> String {
    match table {
        Some(t) => format!(" in '{}'", t),
        None => String::new(),
    }
}

impl From<handlebars::TemplateError> for ErdError {
    fn from(e: handlebars::TemplateError) -> Self {
        ErdError::TemplateLoad(Box::new(e))
    }
}

impl From<handlebars::RenderError> for ErdError {
    fn from(e: handlebars::RenderError) -> Self {
        ErdError::TemplateRender(Box::new(e))
    }
}

pub type Result<T> = std::result::Result<T, ErdError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_query_message_names_table() {
        let err = ErdError::columns("users", rusqlite::Error::InvalidQuery);
        let msg = err.to_string();
        assert!(msg.starts_with("Error listing columns in 'users': "));
        assert!(matches!(err, ErdError::SchemaQuery { table: Some(ref t), .. } if t == "users"));
    }

    #[test]
    fn test_table_listing_message_has_no_table() {
        let err = ErdError::tables(rusqlite::Error::InvalidQuery);
        assert!(err.to_string().starts_with("Error listing tables: "));
        assert!(matches!(err, ErdError::SchemaQuery { table: None, .. }));
    }

    #[test]
    fn test_foreign_key_message() {
        let err = ErdError::foreign_keys("orders", rusqlite::Error::InvalidQuery);
        assert!(err.to_string().starts_with("Error listing FKs in 'orders': "));
    }
}
