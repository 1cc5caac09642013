//! # Tablero CLI
//!
//! Command-line interface for rendering dashboards.
//!
//! ## Usage
//!
//! ```bash
//! # Serve dashboards from a directory of <id>.json files
//! tablero serve --data-dir ./dashboards
//!
//! # Serve from the hosted store (SUPABASE_URL / SUPABASE_KEY)
//! tablero serve --listen 0.0.0.0:8080
//!
//! # Render one layout against a dataset to an HTML file
//! tablero render --layout layout.json --data rows.json --output report.html
//!
//! # Same, as JSON on stdout
//! tablero render --layout layout.json --data rows.json --format json
//!
//! # List the recognized element types
//! tablero types
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use tablero::{
    TableroError,
    config::{self, Settings},
    dataset::Dataset,
    html,
    layout::{LayoutDocument, element_types},
    render, server,
};

/// Tablero - declarative dashboard renderer
#[derive(Parser, Debug)]
#[command(name = "tablero")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Address to listen on (overrides TABLERO_BIND)
        #[arg(long, value_name = "ADDR")]
        listen: Option<String>,

        /// Directory of <id>.json dashboards (overrides TABLERO_DATA_DIR)
        #[arg(long, value_name = "DIR")]
        data_dir: Option<PathBuf>,
    },

    /// Render a layout document against a dataset
    Render {
        /// Layout document (JSON array of elements)
        #[arg(long, value_name = "FILE")]
        layout: PathBuf,

        /// Dataset (JSON array of row objects)
        #[arg(long, value_name = "FILE")]
        data: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Html)]
        format: Format,

        /// Write to a file instead of stdout
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// List recognized element types
    Types,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Html,
    Json,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), TableroError> {
    let cli = Cli::parse();
    let mut settings = Settings::from_env();
    config::init_tracing(settings.log_json);

    match cli.command {
        Commands::Serve { listen, data_dir } => {
            if let Some(listen) = listen {
                settings.bind = listen;
            }
            if data_dir.is_some() {
                settings.data_dir = data_dir;
            }
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(&settings))?;
        }
        Commands::Render {
            layout,
            data,
            format,
            output,
        } => {
            let doc = LayoutDocument::from_json(read_json(&layout)?)?;
            for skipped in doc.skipped() {
                eprintln!(
                    "Skipping element #{} ({}): {:?}",
                    skipped.index,
                    skipped.type_name.as_deref().unwrap_or("no type"),
                    skipped.reason
                );
            }
            let dataset = Dataset::from_json(read_json(&data)?)?;
            let rendered = render::render(&doc, &dataset);

            let out = match format {
                Format::Html => html::page(&rendered),
                Format::Json => serde_json::to_string_pretty(&rendered)?,
            };
            match output {
                Some(path) => {
                    std::fs::write(&path, out)?;
                    eprintln!(
                        "Wrote {} ({} blocks, {} failed)",
                        path.display(),
                        rendered.artifacts.len(),
                        rendered.errors().count()
                    );
                }
                None => println!("{}", out),
            }
        }
        Commands::Types => {
            for meta in element_types() {
                println!("  {:<16} {}", meta.type_name, meta.label);
            }
        }
    }

    Ok(())
}

fn read_json(path: &Path) -> Result<serde_json::Value, TableroError> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}
