//! ERD (Entity-Relationship Diagram) model.
//!
//! This module provides:
//! - The diagram data model: entities, attributes, relationships
//! - Construction of a diagram from SQLite schema metadata
//! - Key flagging of columns that take part in foreign keys

mod builder;
pub mod model;

pub use model::{Attribute, Diagram, Entity, Relationship};
