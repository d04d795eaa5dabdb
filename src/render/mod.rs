//! Template-driven DOT output for ERD diagrams.
//!
//! The layout of nodes and edges lives in an external Handlebars template
//! (`tmpl.dot` in the working directory); this module only feeds it the
//! [`Diagram`] and streams the result.

mod helpers;

use crate::error::Result;
use crate::graph::Diagram;
use handlebars::Handlebars;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Template file name, resolved against the current working directory
pub const TEMPLATE_FILE: &str = "tmpl.dot";

const TEMPLATE_NAME: &str = "erd";

/// A loaded template, ready to expand diagrams
pub struct Renderer {
    handlebars: Handlebars<'static>,
}

impl Renderer {
    /// Load the template at `path`
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut handlebars = Self::registry();
        handlebars.register_template_file(TEMPLATE_NAME, path)?;
        debug!(template = %path.display(), "loaded template");
        Ok(Self { handlebars })
    }

    /// Compile a template held in memory
    pub fn from_source(source: &str) -> Result<Self> {
        let mut handlebars = Self::registry();
        handlebars.register_template_string(TEMPLATE_NAME, source)?;
        Ok(Self { handlebars })
    }

    /// Expand the template for `diagram` into `out`.
    ///
    /// Output is streamed, so a failure part way through leaves whatever
    /// was already written in `out`.
    pub fn render<W: Write>(&self, diagram: &Diagram, out: W) -> Result<()> {
        self.handlebars
            .render_to_write(TEMPLATE_NAME, diagram, out)?;
        Ok(())
    }

    /// Expand the template for `diagram` into a string
    pub fn render_to_string(&self, diagram: &Diagram) -> Result<String> {
        Ok(self.handlebars.render(TEMPLATE_NAME, diagram)?)
    }

    fn registry() -> Handlebars<'static> {
        let mut handlebars = Handlebars::new();
        // Fields missing from the diagram are errors, not empty strings
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);

        handlebars.register_helper("dot_id", Box::new(helpers::dot_id_helper));
        handlebars.register_helper("html", Box::new(helpers::html_helper));
        handlebars
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErdError;
    use crate::graph::{Entity, Relationship};

    const SHIPPED_TEMPLATE: &str = include_str!("../../tmpl.dot");

    fn create_test_diagram() -> Diagram {
        let mut diagram = Diagram {
            entities: vec![
                Entity::new("users", ["id", "email"]),
                Entity::new("orders", ["id", "user_id"]),
            ],
            relationships: vec![Relationship {
                child: "orders".to_string(),
                child_key: "user_id".to_string(),
                parent: "users".to_string(),
                parent_key: "id".to_string(),
            }],
        };
        diagram.mark_key("orders", "user_id");
        diagram.mark_key("users", "id");
        diagram
    }

    #[test]
    fn test_shipped_template_structure() {
        let renderer = Renderer::from_source(SHIPPED_TEMPLATE).unwrap();
        let output = renderer.render_to_string(&create_test_diagram()).unwrap();

        assert!(output.contains("digraph ERD"));
        assert!(output.contains("users [label=<"));
        assert!(output.contains("orders [label=<"));
        assert!(output.contains("PORT=\"user_id\"><B>user_id</B>"));
        assert!(output.contains("PORT=\"email\">email</TD>"));
        assert!(output.contains("orders:user_id -> users:id"));
    }

    #[test]
    fn test_shipped_template_empty_diagram() {
        let renderer = Renderer::from_source(SHIPPED_TEMPLATE).unwrap();
        let output = renderer.render_to_string(&Diagram::default()).unwrap();

        assert!(output.contains("digraph ERD"));
        assert!(!output.contains("[label="));
        assert!(!output.contains("->"));
    }

    #[test]
    fn test_shipped_template_escapes_names() {
        let diagram = Diagram {
            entities: vec![Entity::new("order items", ["a<b"])],
            relationships: Vec::new(),
        };
        let renderer = Renderer::from_source(SHIPPED_TEMPLATE).unwrap();
        let output = renderer.render_to_string(&diagram).unwrap();

        assert!(output.contains("\"order items\" [label=<"));
        assert!(output.contains("a&lt;b"));
    }

    #[test]
    fn test_shipped_template_quotes_keyword_tables() {
        let diagram = Diagram {
            entities: vec![Entity::new("edge", ["id"]), Entity::new("t", ["e"])],
            relationships: vec![Relationship {
                child: "t".to_string(),
                child_key: "e".to_string(),
                parent: "edge".to_string(),
                parent_key: "id".to_string(),
            }],
        };
        let renderer = Renderer::from_source(SHIPPED_TEMPLATE).unwrap();
        let output = renderer.render_to_string(&diagram).unwrap();

        assert!(output.contains("  \"edge\" [label=<"));
        assert!(output.contains("t:e -> \"edge\":id;"));
    }

    #[test]
    fn test_render_streams_to_writer() {
        let renderer =
            Renderer::from_source("{{#each entities}}{{name}};{{/each}}").unwrap();
        let mut buf = Vec::new();
        renderer.render(&create_test_diagram(), &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "users;orders;");
    }

    #[test]
    fn test_unknown_field_is_render_error() {
        let renderer = Renderer::from_source("{{#each entities}}{{columns}}{{/each}}").unwrap();
        let err = renderer
            .render_to_string(&create_test_diagram())
            .err()
            .unwrap();
        assert!(matches!(err, ErdError::TemplateRender(_)));
        assert!(err.to_string().starts_with("Error generating digraph: "));
    }

    #[test]
    fn test_missing_template_file_is_load_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = Renderer::from_file(&dir.path().join(TEMPLATE_FILE))
            .err()
            .unwrap();
        assert!(matches!(err, ErdError::TemplateLoad(_)));
        assert!(err.to_string().starts_with("Error loading template file: "));
    }

    #[test]
    fn test_malformed_template_is_load_error() {
        let err = Renderer::from_source("{{#each entities}}").err().unwrap();
        assert!(matches!(err, ErdError::TemplateLoad(_)));
    }
}
