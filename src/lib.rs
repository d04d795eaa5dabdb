//! Entity-relationship diagrams for SQLite databases.
//!
//! The pipeline is strictly linear: [`schema::SchemaReader`] reads table,
//! column and foreign key metadata, [`graph::Diagram::build`] turns it into
//! a diagram, and [`render::Renderer`] expands a DOT template with it.

pub mod config;
pub mod error;
pub mod graph;
pub mod logging;
pub mod render;
pub mod schema;

pub use error::{ErdError, Result};
