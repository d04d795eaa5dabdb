use anyhow::Result;
use clap::Parser;
use sqlite_erd::config::Config;
use sqlite_erd::graph::Diagram;
use sqlite_erd::logging;
use sqlite_erd::render::Renderer;
use sqlite_erd::schema::SchemaReader;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "sqlite-erd")]
#[command(version)]
#[command(
    about = "Render an entity-relationship diagram of a SQLite database as Graphviz DOT",
    long_about = "Render an entity-relationship diagram of a SQLite database as Graphviz DOT.\n\n\
                  The layout comes from the template tmpl.dot in the current directory; \
                  the expanded diagram is written to stdout."
)]
pub struct Cli {
    /// SQLite database file (opened read-only)
    pub database: Option<PathBuf>,

    /// More log output on stderr (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

pub fn run(cli: Cli) -> Result<()> {
    logging::init(cli.verbose, cli.quiet);
    let config = Config::new(cli.database)?;

    let diagram = {
        let reader = SchemaReader::open(&config.database)?;
        let diagram = Diagram::build(&reader)?;
        reader.close()?;
        diagram
    };

    if diagram.is_empty() {
        warn!(database = %config.database.display(), "no tables found");
    }
    info!(
        tables = diagram.entities.len(),
        columns = diagram.attribute_count(),
        relationships = diagram.relationships.len(),
        "built diagram"
    );

    let renderer = Renderer::from_file(&config.template)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    renderer.render(&diagram, &mut out)?;
    out.flush()?;

    Ok(())
}
