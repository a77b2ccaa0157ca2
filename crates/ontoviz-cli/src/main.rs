//! OntoViz CLI
//!
//! Loads an ontology document and renders it into a static browsable site:
//! an index, one page per entity, Mermaid schema diagrams and an instance
//! network in either Mermaid or interactive vis.js form.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use ontoviz_model::{load_ontology, FALLBACK_ONTOLOGY_NAME};
use ontoviz_site::{generate, NetworkFormat, SiteConfig};

#[derive(Parser)]
#[command(name = "ontoviz")]
#[command(author, version, about = "Generate a browsable site from an ontology")]
struct Cli {
    /// Ontology document to load.
    onto_path: PathBuf,

    /// Output directory for the generated site.
    #[arg(short, long, default_value = "wiki")]
    output: PathBuf,

    /// Instance network format.
    #[arg(short, long, value_enum, default_value_t = GraphChoice::Mermaid)]
    graph: GraphChoice,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum GraphChoice {
    /// Static Mermaid diagram.
    Mermaid,
    /// Interactive vis.js network.
    Visjs,
}

impl From<GraphChoice> for NetworkFormat {
    fn from(choice: GraphChoice) -> Self {
        match choice {
            GraphChoice::Mermaid => NetworkFormat::Mermaid,
            GraphChoice::Visjs => NetworkFormat::VisJs,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let onto = load_ontology(&cli.onto_path)
        .with_context(|| format!("loading ontology {}", cli.onto_path.display()))?;

    let site_name = match onto.display_name() {
        Some(name) => name.to_string(),
        None => {
            eprintln!(
                "{} ontology has no label, using \"{}\"",
                "warning:".yellow().bold(),
                FALLBACK_ONTOLOGY_NAME
            );
            FALLBACK_ONTOLOGY_NAME.to_string()
        }
    };

    let config = SiteConfig {
        output: cli.output.clone(),
        network: cli.graph.into(),
        site_name,
    };
    let report = generate(&onto, &config)
        .with_context(|| format!("generating site in {}", cli.output.display()))?;

    eprintln!(
        "{} {} ({} classes, {} properties, {} individuals, {} pages)",
        "wrote".green().bold(),
        cli.output.display().to_string().bold(),
        report.classes,
        report.properties,
        report.individuals,
        report.pages
    );

    Ok(())
}
